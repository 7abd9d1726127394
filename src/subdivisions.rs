//! The static reference table of Swedish counties.

use std::io::Cursor;

use polars::prelude::*;

use crate::error::CoronakartanError;

/// Mapping from the display names used by the source feed to subdivision
/// category, ISO 3166-2 code and official county name. Versioned with the
/// crate: adding or renaming a subdivision is an edit to the resource, not to
/// code. The `Display_Name` values must exactly match the ones appearing in
/// the source datasets or the merge drops the unmatched rows.
const SE_SUBDIVISIONS_CSV: &str = include_str!("../data/se_subdivisions.csv");

/// Parse the embedded subdivisions resource into a `DataFrame`.
pub fn load() -> Result<DataFrame, CoronakartanError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(SE_SUBDIVISIONS_CSV.as_bytes()))
        .finish()?;
    Ok(df)
}
