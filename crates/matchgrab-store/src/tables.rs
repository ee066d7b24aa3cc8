//! Redb table definitions for persistent match storage.

use redb::TableDefinition;

// Key: 8-byte encoded match ID (see `key::MatchKey`), Value: prost-encoded Match
pub const MATCHES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("matches");
