//! matchgrab Store - match record storage and queries
//!
//! Matches are stored in a single redb table keyed by their order-preserving
//! encoded match ID, with protobuf-encoded records as values. Point lookups
//! go through the key; account queries scan the whole table.

pub mod key;
pub mod query;
pub mod record;
pub mod store;
pub mod tables;

// Re-exports
pub use key::MatchKey;
pub use query::{AccountIndex, QueryEngine};
pub use record::{Match, Participant, decode_match, encode_match};
pub use store::{MatchStore, RecordStore, StoreError};
