/// Backend primary keys are 64-bit integers; the client treats them as opaque.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time component (due dates).
pub type Date = chrono::NaiveDate;
