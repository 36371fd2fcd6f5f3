//! The checked-in participant set and the notable-participant list.

use std::collections::HashMap;
use std::slice::Iter;

use crate::{Player, PlayerId, Roster};

/// Checked-in players in arrival order, keyed by id.
///
/// The league cannot report the same id twice, but if it ever does the
/// last-seen name wins without disturbing the first-seen position. This
/// fails open rather than erroring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Participants {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl Participants {
    #[inline]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts `player`, collapsing duplicates by id.
    pub fn insert(&mut self, player: Player) {
        match self.index.get(&player.id) {
            Some(&at) => self.players[at] = player,
            None => {
                self.index.insert(player.id, self.players.len());
                self.players.push(player);
            }
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.index.get(&id).map(|&at| &self.players[at])
    }

    /// Iterates the players in arrival order.
    pub fn iter(&self) -> Iter<'_, Player> {
        self.players.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<Player> for Participants {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Player>,
    {
        let mut participants = Self::new();
        for player in iter {
            participants.insert(player);
        }

        participants
    }
}

impl<'a> IntoIterator for &'a Participants {
    type Item = &'a Player;
    type IntoIter = Iter<'a, Player>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds the notable-participant entry lines for the participant table.
///
/// Unknown players are assumed to be non-notable and are skipped silently,
/// as are known players without the notable flag. Surviving entries are
/// numbered consecutively from 1 no matter how many were skipped.
pub fn notable_entries(participants: &Participants, roster: &Roster) -> Vec<String> {
    let mut entries = Vec::new();
    let mut index = 1;

    for player in participants {
        let entry = match roster.get(player.id) {
            Some(entry) if entry.notable => entry,
            _ => continue,
        };

        let mut line = format!("|p{}={}", index, entry.name);
        if let Some(link) = &entry.link {
            line.push_str(&format!("|p{}link={}", index, link));
        }

        entries.push(line);
        index += 1;
    }

    log::debug!(
        "{} of {} participants are notable",
        entries.len(),
        participants.len()
    );

    entries
}
