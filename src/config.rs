use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub deaths_url: String,
    pub cases_url: String,
}

impl Default for Config {
    fn default() -> Self {
        // "confimed" is not a typo here: it is the actual path of the file
        // in the upstream repository.
        Config {
            deaths_url: "https://raw.githubusercontent.com/elinlutz/gatsby-map/master/src/data/time_series/time_series_deaths-deaths.csv".into(),
            cases_url: "https://raw.githubusercontent.com/elinlutz/gatsby-map/master/src/data/time_series/time_series_confimed-confirmed.csv".into(),
        }
    }
}
