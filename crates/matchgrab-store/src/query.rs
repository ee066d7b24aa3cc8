//! Read-only queries over the match store.
//!
//! Matches are keyed by match ID only, so account-oriented queries are full
//! scans. Scans are all-or-nothing: the first store or decode failure aborts
//! the query and no partial result is returned.

use crate::key::MatchKey;
use crate::record::{Match, decode_match};
use crate::store::RecordStore;
use matchgrab_common::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Account ID to the summoner name last seen for it during a scan
pub type AccountIndex = BTreeMap<i64, String>;

/// Query entry point over any ordered record store
pub struct QueryEngine<S> {
    store: S,
}

impl<S: RecordStore> QueryEngine<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Every account seen in any match, with its most recently scanned name.
    ///
    /// When an account appears under different names, the match with the
    /// highest ID wins since that is the last one the scan visits.
    pub fn list_accounts(&self) -> Result<AccountIndex> {
        let mut accounts = AccountIndex::new();
        let mut scanned = 0_u64;
        self.store.scan(&mut |key, raw| {
            let record = decode_match(key.match_id(), raw)?;
            for participant in record.participants {
                accounts.insert(participant.account_id, participant.summoner_name);
            }
            scanned += 1;
            Ok(())
        })?;
        debug!(
            matches = scanned,
            accounts = accounts.len(),
            "Listed accounts"
        );
        Ok(accounts)
    }

    /// All matches `account_id` played in, ascending by match ID
    pub fn matches_for_account(&self, account_id: i64) -> Result<Vec<Match>> {
        let mut found = Vec::new();
        self.store.scan(&mut |key, raw| {
            let record = decode_match(key.match_id(), raw)?;
            if record.has_account(account_id) {
                found.push(record);
            }
            Ok(())
        })?;
        debug!(account_id, matches = found.len(), "Collected account matches");
        Ok(found)
    }

    /// Single match by ID
    pub fn match_by_id(&self, match_id: i64) -> Result<Match> {
        let raw = self
            .store
            .get(MatchKey::encode(match_id))?
            .ok_or(Error::MatchNotFound(match_id))?;
        decode_match(match_id, &raw)
    }
}
