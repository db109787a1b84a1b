//! Core components of the Yahoo Finance provider client.
//!
//! This module contains the foundational building blocks, including:
//! - The [`YfClient`] and its builder.
//! - The primary [`YfError`] type.
//! - Shared data models like [`FieldMap`], [`FinancialStatement`] and [`Candle`].
//! - Internal networking and authentication logic.

/// The client (`YfClient`), builder, and cookie/crumb handling.
pub mod client;
/// The primary error type (`YfError`) for the provider layer.
pub mod error;
/// Shared data models used across the provider modules.
pub mod models;
pub(crate) mod net;
pub(crate) mod quotesummary;
pub(crate) mod wire;

pub use client::{YfClient, YfClientBuilder};
pub use error::YfError;
pub use models::{Candle, FieldMap, FinancialStatement, PeriodValue};
