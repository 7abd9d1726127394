//! Wide-to-long reshaping of a raw source dataset.

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, info, warn};
use polars::prelude::*;

use crate::{error::CoronakartanError, COL};

/// Display names of rows in the source feed that do not correspond to a
/// county: running totals, unattributed cases and the feed's own derived
/// aggregates (FHM = the Public Health Agency of Sweden). Filtering on the
/// name rather than the row position keeps an upstream reordering from
/// silently corrupting the output.
const SENTINEL_ROWS: &[&str] = &[
    "Totalt",
    "Okänd",
    "FHM_Deaths_Today",
    "At_Hospital",
    "At_ICU",
    "Hospital_Total",
    "ICU_Capacity_2017",
    "FHM_ICU_Est",
    "Region_Deaths",
    "Diff",
];

/// Returns the column names that parse as `YYYY-MM-DD` dates, in the order
/// they appear. The source mixes identity columns with one column per
/// reporting date; everything that parses as a date is a reporting date, so
/// new columns are picked up without a hardcoded list.
pub fn date_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| NaiveDate::parse_from_str(name, "%Y-%m-%d").is_ok())
        .map(|name| name.to_string())
        .collect()
}

/// Reshape one raw wide dataset into long format and attach the subdivision
/// metadata.
///
/// `today` is the date used to relabel the source's "Today" column. This
/// labels the newest data point with the date the pipeline runs, not a date
/// carried in the feed itself; a run that lags the source's update cycle
/// mislabels that point.
pub fn reshape(
    raw: DataFrame,
    subdivisions: &DataFrame,
    today: NaiveDate,
) -> Result<DataFrame, CoronakartanError> {
    if raw.column(COL::DISPLAY_NAME).is_err() {
        return Err(CoronakartanError::MissingColumn(COL::DISPLAY_NAME.into()));
    }

    // Drop rows that are not counties before anything else touches them.
    let rows_fetched = raw.height();
    let sentinels = Series::new("sentinels", SENTINEL_ROWS);
    let mut df = raw
        .lazy()
        .filter(col(COL::DISPLAY_NAME).is_in(lit(sentinels)).not())
        .collect()?;
    if df.height() < rows_fetched {
        info!(
            "Dropped {} aggregate/unknown-region rows",
            rows_fetched - df.height()
        );
    }

    // The newest data point arrives under a mutable "Today" header; pin it to
    // a concrete date key before detection so it melts like any other date.
    let today_column = today.format("%Y-%m-%d").to_string();
    if df.column(COL::TODAY).is_ok() {
        df.rename(COL::TODAY, &today_column)?;
    }

    let dates = date_columns(&df);
    debug!(
        "Detected {} date columns: {}",
        dates.len(),
        dates.iter().join(", ")
    );

    // Attach category, ISO code and official name. Inner semantics: a display
    // name missing from the subdivisions table loses all of its rows.
    let rows_filtered = df.height();
    let merged = df
        .lazy()
        .join(
            subdivisions.clone().lazy(),
            [col(COL::DISPLAY_NAME)],
            [col(COL::DISPLAY_NAME)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;
    if merged.height() < rows_filtered {
        warn!(
            "{} rows had no subdivision metadata and were dropped",
            rows_filtered - merged.height()
        );
    }

    melt_dates(&merged, &dates)
}

/// Convert one-row-per-region wide dates into one row per (region, date),
/// with the count for that date in a generic `number` column.
fn melt_dates(df: &DataFrame, dates: &[String]) -> Result<DataFrame, CoronakartanError> {
    if dates.is_empty() {
        // No reporting dates at all: an empty long frame with the right schema.
        return Ok(df!(
            COL::DISPLAY_NAME => Vec::<String>::new(),
            COL::LAT => Vec::<f64>::new(),
            COL::LONG => Vec::<f64>::new(),
            COL::SUBDIVISION_CATEGORY => Vec::<String>::new(),
            COL::ISO_3166_2 => Vec::<String>::new(),
            COL::SUBDIVISION_NAME => Vec::<String>::new(),
            COL::DATE => Vec::<String>::new(),
            COL::NUMBER => Vec::<i64>::new(),
        )?);
    }

    let id_columns: Vec<Expr> = COL::REGION_ID_COLUMNS.iter().map(|c| col(*c)).collect();
    let mut parts = Vec::with_capacity(dates.len());
    for date in dates {
        let mut columns = id_columns.clone();
        columns.push(lit(date.as_str()).alias(COL::DATE));
        columns.push(col(date.as_str()).cast(DataType::Int64).alias(COL::NUMBER));
        parts.push(df.clone().lazy().select(columns));
    }
    Ok(concat(parts, UnionArgs::default())?.collect()?)
}
