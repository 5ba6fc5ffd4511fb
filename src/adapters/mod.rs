// Adapters layer: concrete implementations of the domain ports.

pub mod cache;
pub mod http;
