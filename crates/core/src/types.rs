/// Database primary keys for autoincrement tables (admins, access events).
pub type DbId = i64;

/// Sensor slot number, also the primary key of the `users` table.
pub type FingerId = i64;

/// All persisted timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
