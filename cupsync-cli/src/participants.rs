use cupsync_api::wiki::PARTICIPANTS_SECTION;
use cupsync_api::{LeagueClient, WikiClient};
use cupsync_core::participants::notable_entries;
use cupsync_core::{markup, Roster};

use crate::Result;

/// Replaces the participant table with the current notable participants.
pub async fn run(
    league: &mut LeagueClient,
    wiki: &mut WikiClient,
    page: &str,
    roster: &Roster,
    dry_run: bool,
) -> Result<()> {
    let current = wiki.section_text(page, PARTICIPANTS_SECTION).await?;
    let participants = league.participants().await?;

    let entries = notable_entries(participants, roster);
    let new = markup::replace_participant_table(&current, &entries);

    if new == current {
        log::info!("participant list of {} is up to date", page);
        return Ok(());
    }

    if dry_run {
        println!("New participants section:");
        println!("{}", new);
    } else {
        wiki.edit_section(page, PARTICIPANTS_SECTION, &new, "Updating participant list")
            .await?;
    }

    Ok(())
}
