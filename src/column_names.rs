//! This module stores the column names used across the pipeline: the raw
//! columns of the source datasets, the columns attached from the subdivisions
//! table, and the public names of the unified output. Note that the raw names
//! must be synchronised with the headers of the upstream CSV files!

pub const DISPLAY_NAME: &str = "Display_Name";
pub const LAT: &str = "Lat";
pub const LONG: &str = "Long";
pub const TODAY: &str = "Today";

pub const SUBDIVISION_CATEGORY: &str = "subdivision_category";
pub const ISO_3166_2: &str = "3166-2_iso";
pub const SUBDIVISION_NAME: &str = "subdivision_name";

pub const DATE: &str = "date";
pub const NUMBER: &str = "number";
pub const CASES: &str = "cases";
pub const DEATHS: &str = "deaths";

pub const COUNTRY: &str = "country";
pub const SUBDIVISION_NAME_DATASET: &str = "subdivision_name_dataset";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Identity columns of a reshaped series: everything that identifies a region
/// after the subdivisions merge. Together with [`DATE`] they form the join key
/// between the deaths and cases series.
pub const REGION_ID_COLUMNS: &[&str] = &[
    DISPLAY_NAME,
    LAT,
    LONG,
    SUBDIVISION_CATEGORY,
    ISO_3166_2,
    SUBDIVISION_NAME,
];
