use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::selection::Selection;

#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastSettings {
    pub target_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub data_path: String,
    #[serde(default)]
    pub selection: Selection,
    pub forecast: ForecastSettings,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.selection.validate()?;
        Ok(config)
    }
}
