pub mod client;
pub mod endpoints;

pub use client::BackendClient;
pub use endpoints::Endpoints;
