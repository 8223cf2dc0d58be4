// Infrastructure layer modules
pub mod logging;
pub mod upstream_client;
pub mod upstream_config;

// Re-exports
pub use logging::init_logging;
pub use upstream_client::{HttpUpstreamClient, UpstreamClient, UpstreamError};
pub use upstream_config::{UpstreamConfig, UpstreamConfigError};
