//! Joining the two long series into the unified dataset.

use log::debug;
use polars::prelude::*;

use crate::{error::CoronakartanError, COL};

/// Inner-join the reshaped deaths and cases series on region identity plus
/// date, then project to the public column set.
///
/// A (region, date) pair present in only one of the two inputs is dropped by
/// the join; the input and output heights are logged so the loss is visible.
pub fn unify(mut deaths: DataFrame, mut cases: DataFrame) -> Result<DataFrame, CoronakartanError> {
    deaths.rename(COL::NUMBER, COL::DEATHS)?;
    cases.rename(COL::NUMBER, COL::CASES)?;

    let (deaths_rows, cases_rows) = (deaths.height(), cases.height());
    let key: Vec<Expr> = COL::REGION_ID_COLUMNS
        .iter()
        .chain(std::iter::once(&COL::DATE))
        .map(|c| col(*c))
        .collect();

    let unified = deaths
        .lazy()
        .join(cases.lazy(), key.clone(), key, JoinArgs::new(JoinType::Inner))
        .select([
            lit("Sweden").alias(COL::COUNTRY),
            col(COL::SUBDIVISION_CATEGORY),
            col(COL::SUBDIVISION_NAME),
            col(COL::DISPLAY_NAME).alias(COL::SUBDIVISION_NAME_DATASET),
            col(COL::ISO_3166_2),
            col(COL::LAT).alias(COL::LATITUDE),
            col(COL::LONG).alias(COL::LONGITUDE),
            col(COL::DATE).str().to_date(StrptimeOptions {
                format: Some("%Y-%m-%d".into()),
                ..Default::default()
            }),
            col(COL::CASES),
            col(COL::DEATHS),
        ])
        .collect()?;

    debug!(
        "Joined {deaths_rows} death rows and {cases_rows} case rows into {} unified rows",
        unified.height()
    );
    Ok(unified)
}
