//! Stored match record schema.
//!
//! Records are protobuf messages written by the ingestion process; the tags
//! below are the wire contract and must stay in lock-step with that writer.
//! The same structs carry the serde representation returned to API callers.

use chrono::{DateTime, Utc};
use matchgrab_common::{Error, Result};
use prost::Message;
use serde::{Deserialize, Serialize};

/// One recorded game session
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Match {
    #[prost(int64, tag = "1")]
    #[serde(rename = "GameID")]
    pub game_id: i64,
    #[prost(int32, tag = "2")]
    #[serde(rename = "SeasonID")]
    pub season_id: i32,
    /// Unix epoch milliseconds
    #[prost(int64, tag = "3")]
    #[serde(rename = "GameCreation")]
    pub game_creation: i64,
    /// Seconds
    #[prost(int32, tag = "4")]
    #[serde(rename = "GameDuration")]
    pub game_duration: i32,
    #[prost(message, repeated, tag = "5")]
    #[serde(rename = "Participants")]
    pub participants: Vec<Participant>,
    /// Banned champion IDs across both teams
    #[prost(int64, repeated, tag = "6")]
    #[serde(rename = "Bans")]
    pub bans: Vec<i64>,
    #[prost(string, tag = "7")]
    #[serde(rename = "GameMode")]
    pub game_mode: String,
    #[prost(int32, tag = "8")]
    #[serde(rename = "MapID")]
    pub map_id: i32,
    #[prost(string, tag = "9")]
    #[serde(rename = "GameType")]
    pub game_type: String,
}

/// One account's seat in a match
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Participant {
    #[prost(string, tag = "1")]
    #[serde(rename = "SummonerName")]
    pub summoner_name: String,
    #[prost(int64, tag = "2")]
    #[serde(rename = "AccountID")]
    pub account_id: i64,
    #[prost(int32, tag = "3")]
    #[serde(rename = "ProfileIcon")]
    pub profile_icon: i32,
    #[prost(int64, tag = "4")]
    #[serde(rename = "SummonerID")]
    pub summoner_id: i64,
    #[prost(int64, tag = "5")]
    #[serde(rename = "ChampionID")]
    pub champion_id: i64,
    #[prost(int32, tag = "6")]
    #[serde(rename = "TeamID")]
    pub team_id: i32,
    #[prost(bool, tag = "7")]
    #[serde(rename = "Winner")]
    pub winner: bool,
}

impl Match {
    /// When the game was created, if the timestamp is in range
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.game_creation)
    }

    /// The seat held by `account_id`, if it played in this match
    #[must_use]
    pub fn participant(&self, account_id: i64) -> Option<&Participant> {
        self.participants.iter().find(|p| p.account_id == account_id)
    }

    /// Whether `account_id` played in this match
    #[must_use]
    pub fn has_account(&self, account_id: i64) -> bool {
        self.participant(account_id).is_some()
    }

    /// Whether `champion_id` was banned by either team
    #[must_use]
    pub fn banned(&self, champion_id: i64) -> bool {
        self.bans.contains(&champion_id)
    }

    /// Whether `champion_id` was played by anyone
    #[must_use]
    pub fn picked(&self, champion_id: i64) -> bool {
        self.participants.iter().any(|p| p.champion_id == champion_id)
    }

    /// Whether `champion_id` was played on the winning side
    #[must_use]
    pub fn won(&self, champion_id: i64) -> bool {
        self.participants
            .iter()
            .any(|p| p.champion_id == champion_id && p.winner)
    }
}

/// Decode the record stored under `match_id`.
///
/// Fails on truncated or malformed protobuf input, and on a body whose
/// `GameID` disagrees with the key it was stored under. An empty blob is
/// always an error, even under key 0 where it would otherwise decode to a
/// default match.
pub fn decode_match(match_id: i64, bytes: &[u8]) -> Result<Match> {
    if bytes.is_empty() {
        return Err(Error::decode(match_id, "empty record"));
    }
    let record = Match::decode(bytes).map_err(|e| Error::decode(match_id, e.to_string()))?;
    if record.game_id != match_id {
        return Err(Error::decode(
            match_id,
            format!("record body carries game id {}", record.game_id),
        ));
    }
    Ok(record)
}

/// Encode a record in the stored wire format
#[must_use]
pub fn encode_match(record: &Match) -> Vec<u8> {
    record.encode_to_vec()
}
