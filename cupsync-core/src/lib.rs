//! # cupsync-core
//!
//! This crate contains the bracket reconciliation logic shared by the cupsync
//! tools: the match/winner rules of a single elimination 1v1 cup, the mapping
//! between the league's round numbering and the wiki's, the fixed-grammar
//! bracket markup parser and renderer, and the field-by-field merge that
//! prefers human-entered wiki values over fetched ones.
//!
//! Important types:
//! - [`Match`]: two opponent slots and their scores, with the forfeit and
//!   winner rules.
//! - [`Results`]: fetched matches indexed by (round, slot).
//! - [`Participants`]: checked-in players in arrival order, keyed by id.
//! - [`Roster`]: the static known-player table.
//! - [`markup::MatchBlock`]: one parsed wiki match block, re-renderable into
//!   the exact source grammar.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to the id types.

pub mod markup;
pub mod merge;
pub mod participants;
pub mod roster;

mod bracket;
mod id;

pub use bracket::{rounds_for, source_round, Match, Player, Results, Slot};
pub use id::{LeagueId, PlayerId};
pub use participants::Participants;
pub use roster::{Roster, RosterEntry};

use thiserror::Error;

/// A `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The wiki round number must be at least 1. Wiki rounds are 1-based; the
    /// league's are 0-based.
    #[error("invalid wiki round {0}: wiki rounds start at 1")]
    InvalidWikiRound(i64),
    /// The results section does not carry a `|Bracket/<size>|` token, so the
    /// number of wiki rounds cannot be derived.
    #[error("cannot locate the bracket size token in the results section")]
    BracketSizeNotFound,
    /// A wiki match block maps onto a (round, slot) the league never
    /// produced.
    #[error("no league match for wiki block R{round}M{slot} (league round {league_round})")]
    MissingLeagueMatch {
        round: u64,
        slot: u64,
        league_round: i64,
    },
    /// The match block pattern could not be built for this bracket size.
    #[error("unusable match block pattern: {0}")]
    BlockPattern(String),
    /// A malformed row in the known-player table.
    #[error("malformed roster row: {0}")]
    Roster(String),
}
