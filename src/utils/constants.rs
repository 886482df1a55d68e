/// Metadata endpoints
pub const XML_ENDPOINT: &str = "http://maps.google.com/cbk";
pub const JSON_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/streetview/metadata";

/// JSON endpoint status values
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// Output naming
pub const BATCH_FILE_PREFIX: &str = "Pnt_start";
pub const BATCH_FILE_EXTENSION: &str = "txt";
pub const DEFAULT_OUTPUT_DIR: &str = "mosaic-mrt.tif";

/// Companion file holding the dataset's coordinate reference system
pub const PRJ_EXTENSION: &str = "prj";

/// Target coordinate reference system
pub const WGS84_EPSG: &str = "EPSG:4326";

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 50;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("panorama-harvester/", env!("CARGO_PKG_VERSION"));

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "PANO_HARVEST";
