use crate::error::Result;
use crate::fetchers::{Endpoint, EndpointKind, HttpTransport, ViewParams};
use crate::models::BatchRounding;
use crate::utils::constants::*;
use crate::utils::Pacer;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Run settings: built-in defaults, then an optional config file, then
/// `PANO_HARVEST_*` environment variables. CLI flags are applied on top.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HarvestSettings {
    #[validate(range(min = 1))]
    pub batch_size: usize,

    pub batch_rounding: BatchRounding,

    pub request_delay_ms: u64,

    pub batch_delay_ms: u64,

    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    pub endpoint: EndpointKind,

    #[validate(length(min = 1))]
    pub xml_endpoint: String,

    #[validate(length(min = 1))]
    pub json_endpoint: String,

    pub api_key: String,

    #[validate(range(min = -360.0, max = 360.0))]
    pub heading: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub pitch: Option<f64>,

    #[validate(range(min = 1.0, max = 120.0))]
    pub fov: Option<f64>,

    pub user_agent: String,
}

/// Values given on the command line; `None` leaves the loaded setting alone
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub batch_size: Option<usize>,
    pub batch_rounding: Option<BatchRounding>,
    pub endpoint: Option<EndpointKind>,
    pub api_key: Option<String>,
}

impl HarvestSettings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("batch_size", DEFAULT_BATCH_SIZE as i64)?
            .set_default("batch_rounding", BatchRounding::Nearest.to_string())?
            .set_default("request_delay_ms", DEFAULT_REQUEST_DELAY_MS as i64)?
            .set_default("batch_delay_ms", DEFAULT_BATCH_DELAY_MS as i64)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("endpoint", EndpointKind::Json.to_string())?
            .set_default("xml_endpoint", XML_ENDPOINT)?
            .set_default("json_endpoint", JSON_ENDPOINT)?
            .set_default("api_key", "")?
            .set_default("user_agent", DEFAULT_USER_AGENT)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(rounding) = overrides.batch_rounding {
            self.batch_rounding = rounding;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = overrides.api_key {
            self.api_key = api_key;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn endpoint(&self) -> Endpoint {
        let base_url = match self.endpoint {
            EndpointKind::Xml => &self.xml_endpoint,
            EndpointKind::Json => &self.json_endpoint,
        };

        let endpoint = Endpoint::new(self.endpoint, base_url.as_str());
        match self.endpoint {
            EndpointKind::Xml => endpoint,
            EndpointKind::Json => endpoint
                .with_view(ViewParams {
                    heading: self.heading,
                    pitch: self.pitch,
                    fov: self.fov,
                })
                .with_api_key(&self.api_key),
        }
    }

    pub fn pacer(&self) -> Pacer {
        Pacer::from_millis(self.request_delay_ms, self.batch_delay_ms)
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(Duration::from_secs(self.timeout_secs), &self.user_agent)
    }
}
