

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::dashboard::labels::{DateLabeler, LabelZone, DEFAULT_DATE_FORMAT};
use crate::dashboard::pipeline::TeardownPolicy;
use crate::DEFAULT_API_BASE_URL;


const CONFIG_FILE_STEM: &str = "perfdash";

const ENV_PREFIX: &str = "PERFDASH";


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    pub date_format: String,
    pub label_zone: LabelZone,
    pub teardown: TeardownPolicy,
}

impl DashboardConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            label_zone: LabelZone::Local,
            teardown: TeardownPolicy::Cancel,
        }
    }

    /// Defaults, then `perfdash.toml` in the working directory if present, then `PERFDASH_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_STEM))
    }

    pub fn load_from(file: &Path) -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("date_format", defaults.date_format)?
            .set_default("label_zone", <&str>::from(defaults.label_zone))?
            .set_default("teardown", <&str>::from(defaults.teardown))?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn labeler(&self) -> DateLabeler {
        DateLabeler::new(self.date_format.clone(), self.label_zone)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
