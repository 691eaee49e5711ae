//! Column conversion helpers shared by the query modules.
//!
//! Timestamps and dates are stored as text in their jiff display format.

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

/// Reads a text column as a UTC timestamp.
pub(crate) fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a nullable text column as a civil date.
pub(crate) fn date_column(row: &Row, index: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(index)?
        .map(|raw| {
            raw.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads an INTEGER id column as `u64`.
pub(crate) fn id_column(row: &Row, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}

/// Formats an optional date for storage.
pub(crate) fn date_param(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}
