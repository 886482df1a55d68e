use crate::error::Result;
use crate::fetchers::response::{parse_json_metadata, parse_xml_metadata, FetchOutcome};
use crate::models::SamplePoint;
use crate::utils::constants::{JSON_ENDPOINT, XML_ENDPOINT};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded::byte_serialize;

/// Which metadata service is queried, and therefore which wire format comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    /// Unauthenticated `cbk` endpoint answering in XML
    Xml,
    /// Authenticated metadata API answering in JSON
    Json,
}

impl EndpointKind {
    pub fn default_base_url(self) -> &'static str {
        match self {
            EndpointKind::Xml => XML_ENDPOINT,
            EndpointKind::Json => JSON_ENDPOINT,
        }
    }

    /// Parse a response body in this endpoint's wire format
    pub fn parse(self, body: &str) -> Result<FetchOutcome> {
        match self {
            EndpointKind::Xml => parse_xml_metadata(body),
            EndpointKind::Json => parse_json_metadata(body),
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointKind::Xml => write!(f, "xml"),
            EndpointKind::Json => write!(f, "json"),
        }
    }
}

/// Optional camera parameters sent with JSON metadata queries
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewParams {
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub fov: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    kind: EndpointKind,
    base_url: String,
    api_key: Option<String>,
    view: ViewParams,
}

impl Endpoint {
    pub fn new(kind: EndpointKind, base_url: impl Into<String>) -> Self {
        Self {
            kind,
            base_url: base_url.into(),
            api_key: None,
            view: ViewParams::default(),
        }
    }

    pub fn xml() -> Self {
        Self::new(EndpointKind::Xml, EndpointKind::Xml.default_base_url())
    }

    pub fn json(api_key: &str) -> Self {
        Self::new(EndpointKind::Json, EndpointKind::Json.default_base_url()).with_api_key(api_key)
    }

    /// Empty keys are dropped rather than sent as `key=`
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_view(mut self, view: ViewParams) -> Self {
        self.view = view;
        self
    }

    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Metadata query URL for a WGS84 point
    pub fn query_url(&self, point: &SamplePoint) -> String {
        match self.kind {
            EndpointKind::Xml => format!(
                "{}?output=xml&ll={},{}",
                self.base_url, point.latitude, point.longitude
            ),
            EndpointKind::Json => {
                let mut url = format!(
                    "{}?location={},{}",
                    self.base_url, point.latitude, point.longitude
                );
                if let Some(heading) = self.view.heading {
                    url.push_str(&format!("&heading={}", heading));
                }
                if let Some(pitch) = self.view.pitch {
                    url.push_str(&format!("&pitch={}", pitch));
                }
                if let Some(fov) = self.view.fov {
                    url.push_str(&format!("&fov={}", fov));
                }
                if let Some(ref key) = self.api_key {
                    let encoded: String = byte_serialize(key.as_bytes()).collect();
                    url.push_str(&format!("&key={}", encoded));
                }
                url
            }
        }
    }
}
