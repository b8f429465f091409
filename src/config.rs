//! Reference layer source configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONSERVATION_URL: &str = "https://kspservices.big.go.id/satupeta/rest/services/PUBLIK/SUMBER_DAYA_ALAM_DAN_LINGKUNGAN/MapServer/35/query";
const DEFAULT_TWELVE_MILE_URL: &str =
    "https://drive.google.com/file/d/16MnH27AofcSSr45jTvmopOZx4CMPxMKs/view?usp=sharing";
const DEFAULT_SEDIMENTATION_URL: &str =
    "https://drive.google.com/file/d/1ZcruoWPzneMCn11Y7vmgCvIWFyO4Sgg6/view?usp=drive_link";
const DEFAULT_KKPRL_PATH: &str = "kkprl.json";

/// Where each reference layer comes from.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Sources {
    /// ArcGIS REST query endpoint for conservation areas.
    pub conservation_url: String,
    /// Drive sharing link for the zipped 12-mile-zone shapefile.
    pub twelve_mile_url: String,
    /// Drive sharing link for the zipped sedimentation shapefile.
    pub sedimentation_url: String,
    /// Local ArcGIS-export JSON with issued KKPRL permits.
    pub kkprl_path: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            conservation_url: DEFAULT_CONSERVATION_URL.to_string(),
            twelve_mile_url: DEFAULT_TWELVE_MILE_URL.to_string(),
            sedimentation_url: DEFAULT_SEDIMENTATION_URL.to_string(),
            kkprl_path: PathBuf::from(DEFAULT_KKPRL_PATH),
        }
    }
}

impl Sources {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let sources: Sources = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(sources)
    }
}
