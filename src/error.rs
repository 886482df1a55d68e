use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Provider returned status {status}: {message}")]
    Provider { status: String, message: String },

    #[error("Malformed metadata response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl HarvestError {
    pub fn fetch(url: &str, message: impl Into<String>) -> Self {
        HarvestError::Fetch {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Errors that only affect a single point; the run carries on past them.
    pub fn is_per_point(&self) -> bool {
        matches!(
            self,
            HarvestError::Fetch { .. }
                | HarvestError::Provider { .. }
                | HarvestError::Json(_)
                | HarvestError::Xml(_)
                | HarvestError::MalformedResponse(_)
        )
    }
}
