use std::collections::BTreeMap;

use crate::{Error, PlayerId, Result};

/// A checked-in player as reported by the league.
///
/// Identity is the numeric id; the display name is not unique and is never
/// used for equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    #[inline]
    pub fn new<T>(id: T, name: String) -> Self
    where
        T: Into<PlayerId>,
    {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// One of the two opponent slots of a [`Match`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// Returns the slot index (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// A match of two parties in a 1v1 cup.
///
/// A slot without a player is a bye or a pruned entrant; that is not an
/// error. Scores are the first map of the reported score list, with "not
/// yet played" normalized to 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub players: [Option<Player>; 2],
    pub scores: [u32; 2],
}

impl Match {
    #[inline]
    pub fn new(players: [Option<Player>; 2], scores: [u32; 2]) -> Self {
        Self { players, scores }
    }

    /// Returns `true` if the match ended by withdrawal.
    ///
    /// The league marks a forfeit as a 1-0 scoreline. This is distinct from a
    /// real 1-0 game score: a decided best-of-3 always reports a 2 for the
    /// winner.
    pub fn is_forfeit(&self) -> bool {
        matches!(self.scores, [1, 0] | [0, 1])
    }

    /// Returns the winning slot, or `None` while the match is undecided.
    ///
    /// A score of 2 wins outright (the best-of-3 is decided). Otherwise a
    /// 1-0 scoreline is the forfeit shortcut and also decides the match.
    pub fn winner(&self) -> Option<Slot> {
        match self.scores {
            [2, s] if s < 2 => Some(Slot::First),
            [s, 2] if s < 2 => Some(Slot::Second),
            [1, 0] => Some(Slot::First),
            [0, 1] => Some(Slot::Second),
            _ => None,
        }
    }
}

/// Fetched matches indexed by league round and slot.
///
/// Round numbering is the league's: 0-based, starting from the full field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Results {
    matches: BTreeMap<(u64, u64), Match>,
}

impl Results {
    #[inline]
    pub fn new() -> Self {
        Self {
            matches: BTreeMap::new(),
        }
    }

    /// Inserts the match at (round, slot), replacing any previous one.
    pub fn insert(&mut self, round: u64, slot: u64, r#match: Match) {
        self.matches.insert((round, slot), r#match);
    }

    pub fn get(&self, round: u64, slot: u64) -> Option<&Match> {
        self.matches.get(&(round, slot))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl FromIterator<(u64, u64, Match)> for Results {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64, Match)>,
    {
        let matches = iter
            .into_iter()
            .map(|(round, slot, r#match)| ((round, slot), r#match))
            .collect();

        Self { matches }
    }
}

/// Returns the number of elimination rounds implied by `count` entrants.
///
/// 0 and 1 entrants play no rounds; there is no bracket to speak of.
pub fn rounds_for(count: u64) -> u64 {
    match count {
        0 | 1 => 0,
        n => u64::from(n.next_power_of_two().trailing_zeros()),
    }
}

/// Maps a 1-based wiki round number onto the league's 0-based numbering.
///
/// The league enumerates every round from the full field down to the final;
/// the wiki may start logging only from a later round. With 128 players and
/// the wiki only logging from the Ro32:
///
/// | RoX          | 128 | 64 | 32 | 16 | 8 | 4 | 2 |
/// |--------------|-----|----|----|----|---|---|---|
/// | league round |  0  |  1 |  2 |  3 | 4 | 5 | 6 |
/// | wiki round   | n/a | n/a|  1 |  2 | 3 | 4 | 5 |
///
/// The league knows 7 rounds and the wiki 5, so wiki round 2 is league round
/// `2 + (7 - 5 - 1) = 3`. The wiki is assumed to log a contiguous suffix of
/// the league rounds ending at the final; slots map 1:1.
pub fn source_round(wiki_round: i64, n_league_rounds: u64, n_wiki_rounds: u64) -> Result<i64> {
    if wiki_round < 1 {
        return Err(Error::InvalidWikiRound(wiki_round));
    }

    Ok(wiki_round + n_league_rounds as i64 - n_wiki_rounds as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::{rounds_for, source_round, Match, Player, Slot};
    use crate::Error;

    fn m(s1: u32, s2: u32) -> Match {
        Match::new(
            [
                Some(Player::new(1_u64, "one".to_owned())),
                Some(Player::new(2_u64, "two".to_owned())),
            ],
            [s1, s2],
        )
    }

    #[test]
    fn test_forfeit() {
        assert!(m(1, 0).is_forfeit());
        assert!(m(0, 1).is_forfeit());

        assert!(!m(0, 0).is_forfeit());
        assert!(!m(1, 1).is_forfeit());
        assert!(!m(2, 0).is_forfeit());
        assert!(!m(2, 1).is_forfeit());
    }

    #[test]
    fn test_winner() {
        assert_eq!(m(2, 0).winner(), Some(Slot::First));
        assert_eq!(m(2, 1).winner(), Some(Slot::First));
        assert_eq!(m(0, 2).winner(), Some(Slot::Second));
        assert_eq!(m(1, 2).winner(), Some(Slot::Second));

        assert_eq!(m(1, 0).winner(), Some(Slot::First));
        assert_eq!(m(0, 1).winner(), Some(Slot::Second));

        assert_eq!(m(0, 0).winner(), None);
        assert_eq!(m(1, 1).winner(), None);
    }

    #[test]
    fn test_rounds_for() {
        assert_eq!(rounds_for(0), 0);
        assert_eq!(rounds_for(1), 0);
        assert_eq!(rounds_for(2), 1);
        assert_eq!(rounds_for(4), 2);
        assert_eq!(rounds_for(8), 3);
        assert_eq!(rounds_for(9), 4);
        assert_eq!(rounds_for(128), 7);
    }

    #[test]
    fn test_source_round() {
        assert_eq!(source_round(1, 7, 5).unwrap(), 2);
        assert_eq!(source_round(5, 7, 5).unwrap(), 6);

        // The wiki logging every league round maps round 1 onto round 0.
        assert_eq!(source_round(1, 5, 5).unwrap(), 0);

        assert_eq!(source_round(0, 7, 5).unwrap_err(), Error::InvalidWikiRound(0));
        assert_eq!(
            source_round(-1, 7, 5).unwrap_err(),
            Error::InvalidWikiRound(-1)
        );
    }
}
