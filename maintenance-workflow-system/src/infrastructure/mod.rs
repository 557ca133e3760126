pub mod config;
pub mod external;
mod service_provider;
pub mod telemetry;

pub use service_provider::ServiceProvider;
