//! Order-preserving key encoding for match IDs.
//!
//! A match ID is stored as its big-endian bytes with the sign bit flipped, so
//! byte-lexicographic order of keys equals numeric order of IDs across the
//! whole `i64` range. Table iteration therefore visits matches in ascending
//! match-ID order.

use matchgrab_common::{Error, Result};
use std::fmt;

/// Width of an encoded match key
pub const KEY_LEN: usize = 8;

const SIGN_BIT: u64 = 1 << 63;

/// Fixed-width store key for one match
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchKey([u8; KEY_LEN]);

impl MatchKey {
    /// Encode a match ID
    #[must_use]
    pub const fn encode(match_id: i64) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let unsigned = (match_id as u64) ^ SIGN_BIT;
        Self(unsigned.to_be_bytes())
    }

    /// Decode a raw key back into its match ID.
    ///
    /// Rejects anything that is not exactly [`KEY_LEN`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<i64> {
        Self::try_from(bytes).map(Self::match_id)
    }

    /// The match ID this key encodes
    #[must_use]
    pub const fn match_id(self) -> i64 {
        #[allow(clippy::cast_possible_wrap)]
        let signed = (u64::from_be_bytes(self.0) ^ SIGN_BIT) as i64;
        signed
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MatchKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKey { len: bytes.len() })?;
        Ok(Self(raw))
    }
}

impl From<i64> for MatchKey {
    fn from(match_id: i64) -> Self {
        Self::encode(match_id)
    }
}

impl fmt::Debug for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchKey").field(&self.match_id()).finish()
    }
}
