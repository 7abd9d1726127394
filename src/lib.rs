use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::debug;
use polars::frame::DataFrame;

use crate::config::Config;

// Re-exports
pub use column_names as COL;

// Modules
pub mod column_names;
pub mod config;
pub mod error;
pub mod fetch;
#[cfg(feature = "formatters")]
pub mod formatters;
pub mod reshape;
pub mod subdivisions;
pub mod unify;

/// Type for coronakartan data and API
pub struct Coronakartan {
    pub subdivisions: DataFrame,
    pub config: Config,
}

impl Coronakartan {
    /// Setup the Coronakartan object with default configuration
    pub fn new() -> Result<Self> {
        Self::new_with_config(Config::default())
    }

    /// Setup the Coronakartan object with custom configuration
    pub fn new_with_config(config: Config) -> Result<Self> {
        debug!("config: {config:?}");
        let subdivisions = subdivisions::load()?;
        Ok(Self {
            subdivisions,
            config,
        })
    }

    /// Fetches both source datasets and produces the unified (region, date)
    /// dataset, labelling the source's "Today" column with the local
    /// calendar date of this run.
    ///
    /// The feed does not embed the date of its own newest data point, so a
    /// run that lags the source's update cycle puts that point under the
    /// wrong date. Use [`Self::unified_timeseries_on`] when the labelling
    /// date is known.
    pub async fn unified_timeseries(&self) -> Result<DataFrame> {
        self.unified_timeseries_on(Local::now().date_naive()).await
    }

    /// Same as [`Self::unified_timeseries`] with an explicit labelling date.
    pub async fn unified_timeseries_on(&self, today: NaiveDate) -> Result<DataFrame> {
        let (deaths, cases) = fetch::fetch_sources(&self.config).await?;
        let deaths = reshape::reshape(deaths, &self.subdivisions, today)?;
        let cases = reshape::reshape(cases, &self.subdivisions, today)?;
        Ok(unify::unify(deaths, cases)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use itertools::Itertools;
    use polars::prelude::*;

    const DEATHS_CSV: &str = "\
Display_Name,Lat,Long,2020-04-18,Today
Stockholm,59.3,18.1,10,12
Skåne,55.6,14.0,5,7
Totalt,0.0,0.0,15,19
";

    // Gotland appears in the cases feed only; its rows cannot survive the
    // final join. Atlantis has no subdivision metadata at all.
    const CASES_CSV: &str = "\
Display_Name,Lat,Long,2020-04-18,Today
Stockholm,59.3,18.1,100,120
Skåne,55.6,14.0,50,70
Gotland,57.5,18.5,8,9
Atlantis,0.0,0.0,1,1
Totalt,0.0,0.0,159,200
";

    fn mock_sources() -> (MockServer, Config) {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/deaths.csv");
            then.status(200)
                .header("content-type", "text/csv; charset=utf-8")
                .body(DEATHS_CSV);
        });
        server.mock(|when, then| {
            when.method(GET).path("/cases.csv");
            then.status(200)
                .header("content-type", "text/csv; charset=utf-8")
                .body(CASES_CSV);
        });
        let config = Config {
            deaths_url: server.url("/deaths.csv"),
            cases_url: server.url("/cases.csv"),
        };
        (server, config)
    }

    #[tokio::test]
    async fn test_unified_timeseries_end_to_end() {
        let (_server, config) = mock_sources();
        let kartan = Coronakartan::new_with_config(config).unwrap();
        let today = NaiveDate::from_ymd_opt(2020, 4, 20).unwrap();

        let df = kartan.unified_timeseries_on(today).await.unwrap();

        assert_eq!(
            df.get_column_names(),
            vec![
                COL::COUNTRY,
                COL::SUBDIVISION_CATEGORY,
                COL::SUBDIVISION_NAME,
                COL::SUBDIVISION_NAME_DATASET,
                COL::ISO_3166_2,
                COL::LATITUDE,
                COL::LONGITUDE,
                COL::DATE,
                COL::CASES,
                COL::DEATHS,
            ]
        );
        // Two regions shared by both feeds, two dates each.
        assert_eq!(df.height(), 4);

        let countries = df.column(COL::COUNTRY).unwrap().str().unwrap();
        assert!(countries.into_iter().all(|c| c == Some("Sweden")));
        let categories = df.column(COL::SUBDIVISION_CATEGORY).unwrap().str().unwrap();
        assert!(categories.into_iter().all(|c| c == Some("county")));

        // Gotland (cases only) and Atlantis (no metadata) must not appear.
        let isos: Vec<&str> = df
            .column(COL::ISO_3166_2)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .unique()
            .sorted()
            .collect();
        assert_eq!(isos, vec!["SE-AB", "SE-M"]);

        assert_eq!(df.column(COL::DATE).unwrap().dtype(), &DataType::Date);
        assert_eq!(
            df.column(COL::DEATHS).unwrap().i64().unwrap().sum(),
            Some(10 + 12 + 5 + 7)
        );
        assert_eq!(
            df.column(COL::CASES).unwrap().i64().unwrap().sum(),
            Some(100 + 120 + 50 + 70)
        );
    }

    #[tokio::test]
    async fn test_unified_dates_come_from_the_sources_and_the_run_date() {
        let (_server, config) = mock_sources();
        let kartan = Coronakartan::new_with_config(config).unwrap();
        let today = NaiveDate::from_ymd_opt(2020, 4, 20).unwrap();

        let df = kartan.unified_timeseries_on(today).await.unwrap();
        let dates: Vec<NaiveDate> = df
            .column(COL::DATE)
            .unwrap()
            .date()
            .unwrap()
            .as_date_iter()
            .flatten()
            .unique()
            .sorted()
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 4, 18).unwrap(),
                NaiveDate::from_ymd_opt(2020, 4, 20).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_a_failing_source_fails_the_pipeline() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/deaths.csv");
            then.status(200).body(DEATHS_CSV);
        });
        server.mock(|when, then| {
            when.method(GET).path("/cases.csv");
            then.status(404);
        });
        let config = Config {
            deaths_url: server.url("/deaths.csv"),
            cases_url: server.url("/cases.csv"),
        };

        let kartan = Coronakartan::new_with_config(config).unwrap();
        let today = NaiveDate::from_ymd_opt(2020, 4, 20).unwrap();
        assert!(kartan.unified_timeseries_on(today).await.is_err());
    }
}
