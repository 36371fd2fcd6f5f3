//! Run configuration: regions, wiki credentials and the league id table.

use std::collections::HashMap;
use std::env;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use cupsync_core::LeagueId;
use serde::Deserialize;

use crate::{Error, Result};

/// Name of the environment variable carrying the wiki user name.
pub const USERNAME_VAR: &str = "LIQUIPEDIA_USERNAME";
/// Name of the environment variable carrying the wiki password.
pub const PASSWORD_VAR: &str = "LIQUIPEDIA_PASSWORD";

/// The regions the cup series runs in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Region {
    #[serde(rename = "AM")]
    Americas,
    #[serde(rename = "EU")]
    Europe,
    #[serde(rename = "KR")]
    Korea,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Americas, Self::Europe, Self::Korea];

    /// The region code used by the league platform and in page names.
    pub fn code(self) -> &'static str {
        match self {
            Self::Americas => "AM",
            Self::Europe => "EU",
            Self::Korea => "KR",
        }
    }
}

impl Display for Region {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.code() == s)
            .ok_or_else(|| Error::UnknownRegion(s.to_owned()))
    }
}

/// Wiki credentials, supplied out-of-band through the environment.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Reads the credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] naming the first variable that is not
    /// set. Running without credentials is a fatal configuration error.
    pub fn from_environment() -> Result<Self> {
        let username = env::var(USERNAME_VAR).map_err(|_| Error::MissingEnv(USERNAME_VAR))?;
        let password = env::var(PASSWORD_VAR).map_err(|_| Error::MissingEnv(PASSWORD_VAR))?;

        Ok(Self { username, password })
    }
}

/// The region/edition → league id table.
///
/// The league platform's tournament pages sit behind a browser check, so
/// the ids cannot be fetched per run. They are kept in a TOML table instead
/// and must be extended by hand for new editions.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LeagueTable {
    leagues: HashMap<Region, HashMap<String, LeagueId>>,
}

impl LeagueTable {
    /// Loads the table packaged with the tool.
    pub fn builtin() -> Result<Self> {
        Ok(toml::from_str(include_str!("../data/leagues.toml"))?)
    }

    /// Loads a table from a TOML file at `path`.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    /// Resolves the league id for a region and edition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLeague`] if the combination is not in the
    /// table.
    pub fn get(&self, region: Region, edition: u32) -> Result<LeagueId> {
        self.leagues
            .get(&region)
            .and_then(|editions| editions.get(&edition.to_string()))
            .copied()
            .ok_or(Error::UnknownLeague { region, edition })
    }
}

#[cfg(test)]
mod tests {
    use super::{LeagueTable, Region};
    use crate::Error;

    use serde_test::{assert_de_tokens, Token};

    #[test]
    fn test_region_codes() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>().unwrap(), region);
        }

        assert!(matches!(
            "NA".parse::<Region>().unwrap_err(),
            Error::UnknownRegion(_)
        ));
    }

    #[test]
    fn test_region_deserialize() {
        assert_de_tokens(&Region::Korea, &[Token::UnitVariant { name: "Region", variant: "KR" }]);
    }

    #[test]
    fn test_league_table() {
        let table: LeagueTable = toml::from_str(
            "[EU]\n\
             125 = 237930\n\
             126 = 238953\n",
        )
        .unwrap();

        assert_eq!(table.get(Region::Europe, 125).unwrap(), 237930_u64);
        assert!(matches!(
            table.get(Region::Europe, 130).unwrap_err(),
            Error::UnknownLeague { edition: 130, .. }
        ));
        assert!(matches!(
            table.get(Region::Korea, 125).unwrap_err(),
            Error::UnknownLeague { .. }
        ));
    }

    #[test]
    fn test_builtin_table_parses() {
        let table = LeagueTable::builtin().unwrap();

        for region in Region::ALL {
            assert!(table.get(region, 125).is_ok());
        }
    }
}
