//! # cupsync-api
//!
//! The clients the cupsync tools talk to the outside world with: the league
//! API (read-only JSON) and the wiki (MediaWiki-style section read/write),
//! plus the run configuration they need. All calls are sequential and fail
//! fast; a failed run is meant to be re-invoked by the operator, not
//! retried internally.

pub mod config;
pub mod http;
pub mod league;
pub mod wiki;

pub use config::{Credentials, LeagueTable, Region};
pub use league::LeagueClient;
pub use wiki::WikiClient;

use ::http::StatusCode;
use thiserror::Error;

/// A `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    /// The server answered with an unexpected status code.
    #[error("bad status code: {0}")]
    BadStatusCode(StatusCode),
    /// The wiki rejected the credentials.
    #[error("unauthorized")]
    Unauthorized,
    /// The wiki accepted the request but refused the edit.
    #[error("wiki edit rejected: {0}")]
    EditRejected(String),
    /// The wiki response did not carry the requested token.
    #[error("wiki response carries no {0} token")]
    MissingToken(String),
    /// Not a region code the league table knows.
    #[error("unknown region: {0} (expected AM, EU or KR)")]
    UnknownRegion(String),
    /// The region/edition combination is not in the league table. The table
    /// is maintained by hand and must be extended for new editions.
    #[error("no league configured for {region} edition {edition}")]
    UnknownLeague { region: Region, edition: u32 },
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
}
