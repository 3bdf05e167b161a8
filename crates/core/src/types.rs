/// Record identifiers. PostgreSQL `BIGSERIAL` in the relational store.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
