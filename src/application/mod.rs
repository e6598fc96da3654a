// Application layer - use cases over the upstream feeds
pub mod environment_service;
pub mod fan_out;
pub mod places_service;
pub mod upstream_client;
