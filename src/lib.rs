//! # Banco do Brasil Accountability V3 client
//!
//! Wraps the accountability API for the two caller roles, transferring
//! agencies and oversight agencies, which share part of their operations.
//!
//! Modules:
//! - `config`: credentials, remote environments, client settings, YAML loader
//! - `auth`: access token and its lazily renewed cache
//! - `normalize`: coercion of documents, postal codes and dates to wire format
//! - `dispatch`: authenticated calls with a single retry on 401
//! - `table`: tabular results and per-endpoint response shaping
//! - `api`: role facades

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod helpers;
pub mod normalize;
pub mod observability;
pub mod resilience;
pub mod table;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::api::{OversightAgencyApi, TransferringAgencyApi};
pub use crate::config::{ClientConfig, Credentials, Environment};
pub use crate::error::{ApiError, Result};
pub use crate::table::Table;
