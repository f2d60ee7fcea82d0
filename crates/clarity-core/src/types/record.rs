//! Imported visit records

use std::collections::HashMap;

/// One imported visit row: column name to column value.
///
/// Column names are matched exactly (case-sensitive).
pub type Record = HashMap<String, String>;

/// Build a record from `(column, value)` pairs
pub fn from_pairs<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
