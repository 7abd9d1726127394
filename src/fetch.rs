//! Downloading and parsing of the remote source datasets.

use std::io::Cursor;

use log::{debug, info};
use polars::prelude::*;
use reqwest::Client;
use tokio::try_join;

use crate::{config::Config, error::CoronakartanError};

/// Download both source datasets (deaths first, cases second). The two
/// requests are independent so they are issued together; either failing
/// fails the fetch as a whole.
pub async fn fetch_sources(
    config: &Config,
) -> Result<(DataFrame, DataFrame), CoronakartanError> {
    let client = Client::new();
    let (deaths, cases) = try_join!(
        fetch_csv(&client, &config.deaths_url),
        fetch_csv(&client, &config.cases_url)
    )?;
    Ok((deaths, cases))
}

/// GET a single CSV file and parse it, with headers taken from the first
/// row. Non-2xx responses and malformed CSV are errors; nothing is retried.
async fn fetch_csv(client: &Client, url: &str) -> Result<DataFrame, CoronakartanError> {
    info!("Fetching source dataset from {url}");
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(body.as_bytes()))
        .finish()?;
    debug!("Fetched {url} with shape {:?}", df.shape());
    Ok(df)
}
