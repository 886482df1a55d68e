pub mod endpoint;
pub mod metadata_fetcher;
pub mod response;
pub mod transport;

pub use endpoint::{Endpoint, EndpointKind, ViewParams};
pub use metadata_fetcher::MetadataFetcher;
pub use response::{parse_json_metadata, parse_xml_metadata, FetchOutcome};
pub use transport::{HttpTransport, Transport};
