//! The static known-player table.
//!
//! A CSV file maintained by hand, keyed by the league's numeric player id.
//! It maps ids to wiki display names plus optional profile link, race and
//! flag codes, and carries the notable flag that controls inclusion in the
//! participant list. The table is loaded once per run and never mutated; a
//! missing id is the normal "unknown player" case, not an error.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::{Error, PlayerId, Result};

/// One known player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub link: Option<String>,
    pub race: Option<String>,
    pub flag: Option<String>,
    pub notable: bool,
}

/// The known-player table.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: HashMap<PlayerId, RosterEntry>,
}

impl Roster {
    /// Reads the table from a CSV file at `path`.
    ///
    /// Expected columns: `id,name,link,race,flag,notable`.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let reader = csv::Reader::from_path(path).map_err(|err| Error::Roster(err.to_string()))?;

        Self::read(reader)
    }

    /// Reads the table from any CSV source, e.g. the packaged default.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        Self::read(csv::Reader::from_reader(reader))
    }

    fn read<R>(mut reader: csv::Reader<R>) -> Result<Self>
    where
        R: Read,
    {
        let mut entries = HashMap::new();

        for record in reader.records() {
            let record = record.map_err(|err| Error::Roster(err.to_string()))?;
            let (id, entry) = parse_row(&record)?;
            entries.insert(id, entry);
        }

        log::debug!("loaded {} known players", entries.len());

        Ok(Self { entries })
    }

    /// Looks up a player by league id. `None` means unknown, which callers
    /// treat as non-notable / fall back to the raw league name.
    pub fn get(&self, id: PlayerId) -> Option<&RosterEntry> {
        self.entries.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_row(record: &StringRecord) -> Result<(PlayerId, RosterEntry)> {
    let column = |at: usize| {
        record
            .get(at)
            .ok_or_else(|| Error::Roster(format!("missing column {} in {:?}", at, record)))
    };

    let id = column(0)?
        .parse()
        .map_err(|_| Error::Roster(format!("invalid player id in {:?}", record)))?;

    let optional = |at: usize| -> Result<Option<String>> {
        let value = column(at)?;
        Ok((!value.is_empty()).then(|| value.to_owned()))
    };

    let notable = column(5)?
        .parse::<u8>()
        .map_err(|_| Error::Roster(format!("invalid notable flag in {:?}", record)))?;

    let entry = RosterEntry {
        name: column(1)?.to_owned(),
        link: optional(2)?,
        race: optional(3)?,
        flag: optional(4)?,
        notable: notable != 0,
    };

    Ok((id, entry))
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use crate::Error;

    const TABLE: &str = "id,name,link,race,flag,notable\n\
        1001,Serral,,z,fi,1\n\
        1002,MaxPax,MaxPax (Danish player),p,dk,1\n\
        1003,Practice,,t,de,0\n";

    #[test]
    fn test_lookup() {
        let roster = Roster::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(roster.len(), 3);

        let serral = roster.get(1001.into()).unwrap();
        assert_eq!(serral.name, "Serral");
        assert_eq!(serral.link, None);
        assert_eq!(serral.race.as_deref(), Some("z"));
        assert_eq!(serral.flag.as_deref(), Some("fi"));
        assert!(serral.notable);

        let maxpax = roster.get(1002.into()).unwrap();
        assert_eq!(maxpax.link.as_deref(), Some("MaxPax (Danish player)"));

        assert!(!roster.get(1003.into()).unwrap().notable);
        assert_eq!(roster.get(9999.into()), None);
    }

    #[test]
    fn test_malformed_rows() {
        let missing = "id,name,link,race,flag,notable\n1001,Serral,,z\n";
        assert!(matches!(
            Roster::from_reader(missing.as_bytes()).unwrap_err(),
            Error::Roster(_)
        ));

        let bad_id = "id,name,link,race,flag,notable\nxx,Serral,,z,fi,1\n";
        assert!(matches!(
            Roster::from_reader(bad_id.as_bytes()).unwrap_err(),
            Error::Roster(_)
        ));

        let bad_flag = "id,name,link,race,flag,notable\n1001,Serral,,z,fi,yes\n";
        assert!(matches!(
            Roster::from_reader(bad_flag.as_bytes()).unwrap_err(),
            Error::Roster(_)
        ));
    }
}
