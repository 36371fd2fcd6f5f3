//! Merging fetched results into the wiki results section.
//!
//! The merge is field-by-field and always prefers the wiki: a non-empty
//! name, flag, race or score already on the page is kept verbatim, no
//! matter what the league reports. Only empty fields are derived from the
//! fetched match, via the known-player table for name/flag/race and the
//! score/forfeit rules for scores.

use crate::bracket::source_round;
use crate::markup::{bracket_rounds, match_blocks, splice, MatchBlock};
use crate::{Error, Match, Player, Result, Results, Roster, Slot};

/// Merges `results` into the results-section markup.
///
/// Returns the new section text. Blocks that merge to their existing text
/// are not touched, so running the merge twice over unchanged league data
/// returns the input byte-identical.
///
/// # Errors
///
/// Fails if the bracket size token is missing, or if a wiki block maps onto
/// a (round, slot) the league never produced. No partial output escapes: the
/// caller only sees a fully merged section or an error.
pub fn merge_results_section(
    text: &str,
    n_league_rounds: u64,
    results: &Results,
    roster: &Roster,
) -> Result<String> {
    let n_wiki_rounds = bracket_rounds(text)?;
    log::debug!(
        "merging {} league rounds into a {} round wiki bracket",
        n_league_rounds,
        n_wiki_rounds
    );

    let mut edits = Vec::new();
    for block in match_blocks(text, n_wiki_rounds)? {
        let league_round = source_round(block.round as i64, n_league_rounds, n_wiki_rounds)?;

        let r#match = u64::try_from(league_round)
            .ok()
            .and_then(|round| results.get(round, block.slot))
            .ok_or(Error::MissingLeagueMatch {
                round: block.round,
                slot: block.slot,
                league_round,
            })?;

        let merged = merge_block(&block, r#match, roster);
        let rendered = merged.render();
        if rendered != text[block.span()] {
            edits.push((block.span(), rendered));
        }
    }

    log::debug!("{} blocks changed", edits.len());

    Ok(splice(text, edits))
}

/// Merges one parsed block with its fetched match.
pub fn merge_block(block: &MatchBlock, r#match: &Match, roster: &Roster) -> MatchBlock {
    let mut merged = block.clone();

    for (at, fields) in merged.opponents.iter_mut().enumerate() {
        let player = &r#match.players[at];

        if fields.name.is_empty() {
            fields.name = derived_name(player, roster);
        }
        if fields.flag.is_empty() {
            fields.flag = derived_tag(player, roster, "flag", |entry| entry.flag.as_deref());
        }
        if fields.race.is_empty() {
            fields.race = derived_tag(player, roster, "race", |entry| entry.race.as_deref());
        }
        if fields.score.is_empty() {
            fields.score = derived_score(r#match, at);
        }
    }

    merged
}

/// The wiki name for an empty name field.
///
/// A known player resolves through the roster; an unknown one falls back to
/// the raw league name. This is the one field where an unknown id still
/// produces visible output. An empty slot (bye, pruned entrant) stays empty.
fn derived_name(player: &Option<Player>, roster: &Roster) -> String {
    match player {
        Some(player) => match roster.get(player.id) {
            Some(entry) => entry.name.clone(),
            None => player.name.clone(),
        },
        None => String::new(),
    }
}

/// A `|key=value` annotation from the roster, or empty when the player or
/// the roster value is unknown.
fn derived_tag<'a, F>(player: &Option<Player>, roster: &'a Roster, key: &str, value: F) -> String
where
    F: Fn(&'a crate::RosterEntry) -> Option<&'a str>,
{
    player
        .as_ref()
        .and_then(|player| roster.get(player.id))
        .and_then(value)
        .map(|v| format!("|{}={}", key, v))
        .unwrap_or_default()
}

/// The score text for slot `at`: `W`/`FF` for a forfeit, the raw integer
/// for a decided match, empty while undecided.
fn derived_score(r#match: &Match, at: usize) -> String {
    if r#match.is_forfeit() {
        let winner = r#match.winner();

        if winner.map(Slot::index) == Some(at) {
            "W".to_owned()
        } else {
            "FF".to_owned()
        }
    } else if r#match.winner().is_some() {
        r#match.scores[at].to_string()
    } else {
        String::new()
    }
}
