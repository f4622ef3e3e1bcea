//! Reqwest-backed adapter for the remote recipe/ingredient provider.

mod dto;
mod http_source;

pub use http_source::{ProviderHttpConfig, ProviderHttpSource};
