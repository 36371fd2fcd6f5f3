mod participants;
mod results;

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use cupsync_api::config::{self, Credentials, LeagueTable, Region};
use cupsync_api::{wiki, LeagueClient, WikiClient};
use cupsync_core::Roster;

/// Any client or merge error aborts the run; re-invocation is on the
/// operator.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_KNOWN_PLAYERS: &str = include_str!("../data/known-players.csv");

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    /// Do not write anything; print the new section on stdout instead.
    #[clap(short = 'n', long)]
    dry_run: bool,
    /// Wiki page to edit, with ${region} and ${edition} placeholders.
    #[clap(short, long, default_value = "ESL_Open_Cup_${region}/${edition}")]
    page_template: String,
    /// Known-player table to use instead of the packaged one.
    #[clap(long)]
    known_players: Option<PathBuf>,
    /// League id table to use instead of the packaged one.
    #[clap(long)]
    leagues: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the notable participant list.
    Participants(Target),
    /// Merge fetched results into the bracket.
    Results(Target),
}

#[derive(Debug, clap::Args)]
pub struct Target {
    /// Region the cup runs in (AM, EU or KR).
    #[clap(value_parser = Region::from_str)]
    region: Region,
    /// Edition of the cup.
    edition: u32,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args = Args::parse();

    let credentials = match Credentials::from_environment() {
        Ok(credentials) => credentials,
        Err(_) => {
            println!(
                "Please set the following environment variables:\n    {}\n    {}",
                config::USERNAME_VAR,
                config::PASSWORD_VAR
            );
            process::exit(1);
        }
    };

    if let Err(err) = run(args, credentials).await {
        println!("{}", err);
        process::exit(1);
    }
}

async fn run(args: Args, credentials: Credentials) -> Result<()> {
    let roster = match &args.known_players {
        Some(path) => Roster::from_path(path)?,
        None => Roster::from_reader(DEFAULT_KNOWN_PLAYERS.as_bytes())?,
    };

    let leagues = match &args.leagues {
        Some(path) => LeagueTable::from_path(path)?,
        None => LeagueTable::builtin()?,
    };

    let (Command::Participants(target) | Command::Results(target)) = &args.command;
    let page = wiki::page_name(&args.page_template, target.region, target.edition);

    let mut league = LeagueClient::new(leagues.get(target.region, target.edition)?);
    let mut wiki = WikiClient::new();
    wiki.login(&credentials.username, &credentials.password)
        .await?;

    match &args.command {
        Command::Participants(_) => {
            participants::run(&mut league, &mut wiki, &page, &roster, args.dry_run).await
        }
        Command::Results(_) => {
            results::run(&mut league, &mut wiki, &page, &roster, args.dry_run).await
        }
    }
}
