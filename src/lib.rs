//! Siteline - client library for carbon & biodiversity project platforms.
//!
//! Wraps a remote projects/sites/analytics API behind an authenticated
//! session: the bearer credential is attached per request, expiry is detected
//! on 401, and recovery runs through a single shared refresh operation so
//! concurrent callers never issue duplicate refreshes and the original
//! request is replayed exactly once with the renewed credential.
//!
//! Map drawing, chart rendering, and navigation are left to the consumer;
//! this crate takes finished GeoJSON geometries in and hands parsed analytics
//! series back.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, Gateway, GeoClient, RequestDescriptor, DEFAULT_ANALYTICS_MONTHS};
pub use auth::{Identity, LogoutReason, NewAccount, Session, SessionEvent, SessionState};
pub use config::Config;
