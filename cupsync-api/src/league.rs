//! The league client.
//!
//! Fetches the checked-in participants and the raw outcome records of one
//! league and maps them onto the core domain types. Both fetches happen at
//! most once per client instance: the caches are plain `Option` fields
//! checked before fetching, and the client is not meant to be shared.

use cupsync_core::{rounds_for, LeagueId, Match, Participants, Player, Results};
use serde::Deserialize;

use crate::http::{Client, Request};
use crate::Result;

/// Base URL of the league API.
pub const BASE_URL: &str = "https://api.eslgaming.com/play/v1/leagues";

#[derive(Debug)]
pub struct LeagueClient {
    http: Client,
    base_url: String,
    league: LeagueId,
    participants: Option<Participants>,
    results: Option<Results>,
}

impl LeagueClient {
    /// Creates a client for the given league against [`BASE_URL`].
    pub fn new(league: LeagueId) -> Self {
        Self::with_base_url(league, BASE_URL)
    }

    pub fn with_base_url<T>(league: LeagueId, base_url: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            league,
            participants: None,
            results: None,
        }
    }

    /// Returns all checked-in participants of the league.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; transport errors are not
    /// retried.
    pub async fn participants(&mut self) -> Result<&Participants> {
        let participants = match self.participants.take() {
            Some(participants) => participants,
            None => self.fetch_participants().await?,
        };

        Ok(self.participants.insert(participants))
    }

    /// Returns the number of elimination rounds implied by the checked-in
    /// field.
    pub async fn rounds(&mut self) -> Result<u64> {
        let participants = self.participants().await?;

        Ok(rounds_for(participants.len() as u64))
    }

    /// Returns the fetched matches indexed by round and slot.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn results(&mut self) -> Result<&Results> {
        let results = match self.results.take() {
            Some(results) => results,
            None => {
                let raw = self.fetch_results().await?;
                let participants = self.participants().await?;

                map_results(raw, participants)
            }
        };

        Ok(self.results.insert(results))
    }

    async fn fetch_participants(&self) -> Result<Participants> {
        let uri = format!(
            "{}/{}/contestants?states=checkedIn",
            self.base_url, self.league
        );
        let req = Request::builder().get().uri(&uri).build();

        let contestants: Vec<Contestant> = self.http.send(req).await?.json().await?;
        log::info!("league {}: {} checked-in participants", self.league, contestants.len());

        Ok(contestants
            .into_iter()
            .map(|contestant| Player::new(contestant.id, contestant.name))
            .collect())
    }

    async fn fetch_results(&self) -> Result<Vec<RawResult>> {
        let uri = format!("{}/{}/results", self.base_url, self.league);
        let req = Request::builder().get().uri(&uri).build();

        let raw: Vec<RawResult> = self.http.send(req).await?.json().await?;
        log::info!("league {}: {} outcome records", self.league, raw.len());

        Ok(raw)
    }
}

#[derive(Clone, Debug, Deserialize)]
struct Contestant {
    id: u64,
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawResult {
    round: u64,
    position: u64,
    participants: [RawSide; 2],
}

#[derive(Clone, Debug, Deserialize)]
struct RawSide {
    id: u64,
    points: Option<Vec<u32>>,
}

/// Maps the raw outcome records onto domain matches.
///
/// The score is the first map of the points list. A `null` or empty list
/// means "not yet played" and is normalized to 0, which this layer cannot
/// tell apart from a genuine 0-0. An id missing from the participant table
/// maps to an empty slot; pruned and disqualified entries are expected.
fn map_results(raw: Vec<RawResult>, participants: &Participants) -> Results {
    raw.into_iter()
        .map(|record| {
            let [first, second] = record.participants;
            let (p1, s1) = map_side(first, participants);
            let (p2, s2) = map_side(second, participants);

            (record.round, record.position, Match::new([p1, p2], [s1, s2]))
        })
        .collect()
}

fn map_side(side: RawSide, participants: &Participants) -> (Option<Player>, u32) {
    let player = participants.get(side.id.into()).cloned();
    let score = side
        .points
        .as_deref()
        .and_then(|points| points.first())
        .copied()
        .unwrap_or(0);

    (player, score)
}
