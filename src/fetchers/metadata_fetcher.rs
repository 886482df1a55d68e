use crate::error::Result;
use crate::fetchers::{Endpoint, FetchOutcome, Transport};
use crate::models::SamplePoint;
use tracing::trace;

/// Queries one endpoint for the panorama nearest to a point
pub struct MetadataFetcher<T: Transport> {
    transport: T,
    endpoint: Endpoint,
}

impl<T: Transport> MetadataFetcher<T> {
    pub fn new(transport: T, endpoint: Endpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// One request, no retry. Transport and parse failures come back as errors;
    /// a valid "nothing here" answer is `FetchOutcome::NoPanorama`.
    pub fn fetch(&self, point: &SamplePoint) -> Result<FetchOutcome> {
        let url = self.endpoint.query_url(point);
        let body = self.transport.get(&url)?;
        trace!(index = point.index, %url, bytes = body.len(), "Metadata response");
        self.endpoint.kind().parse(&body)
    }
}
