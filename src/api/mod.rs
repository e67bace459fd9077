//! API plumbing: error taxonomy, authenticated request gateway, and the
//! typed domain client built on top of it.

pub mod client;
pub mod error;
pub mod gateway;

pub use client::{GeoClient, DEFAULT_ANALYTICS_MONTHS};
pub use error::ApiError;
pub use gateway::{Gateway, RequestDescriptor};
