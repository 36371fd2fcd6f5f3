use cupsync_api::wiki::RESULTS_SECTION;
use cupsync_api::{LeagueClient, WikiClient};
use cupsync_core::merge::merge_results_section;
use cupsync_core::Roster;

use crate::Result;

/// Merges the fetched bracket results into the results section.
///
/// The merge happens fully in memory before anything is written, so an
/// aborted run never leaves a partially updated page behind.
pub async fn run(
    league: &mut LeagueClient,
    wiki: &mut WikiClient,
    page: &str,
    roster: &Roster,
    dry_run: bool,
) -> Result<()> {
    let current = wiki.section_text(page, RESULTS_SECTION).await?;

    let n_league_rounds = league.rounds().await?;
    let results = league.results().await?;

    let new = merge_results_section(&current, n_league_rounds, results, roster)?;

    if new == current {
        log::info!("results of {} are up to date", page);
        return Ok(());
    }

    if dry_run {
        println!("New results section:");
        println!("{}", new);
    } else {
        wiki.edit_section(page, RESULTS_SECTION, &new, "Updating results")
            .await?;
    }

    Ok(())
}
