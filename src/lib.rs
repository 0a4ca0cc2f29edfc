//! # AreShip client library
//!
//! Typed access to the AreShip shipping label API: orders, rates, labels,
//! account info and scan forms. Every call carries a bearer token that is
//! acquired on demand, shared across concurrent callers, cached on disk and
//! replaced once when the upstream rejects it.
//!
//! Modules:
//! - `client`: the `Client` handle and the call executor
//! - `auth`: credentials, token exchange and the token manager
//! - `cache`: durable token storage and expiry policy
//! - `resilience`: per-call re-authentication state and transport retries
//! - `services`: typed domain operations with local validation

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod tests;

pub use crate::client::Client;
pub use crate::config::settings::Config;
pub use crate::error::{Error, Result};
