//! Infrastructure layer for galactic-client.

pub mod http_client;

pub use http_client::GalacticHttpClient;
