use crate::error::{HarvestError, Result};
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

/// Blocking GET of a metadata URL, returning the response body
pub trait Transport {
    fn get(&self, url: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}

/// `ureq` agent with a request timeout, built once per run
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| HarvestError::fetch(url, e.to_string()))?;

        response
            .into_string()
            .map_err(|e| HarvestError::fetch(url, format!("failed to read body: {}", e)))
    }
}
