//! Shared types for Mercado Bitcoin Trade API v3
//!
//! This crate provides the core type definitions used across the TAPI client.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`CoinPair`], [`Coin`], [`OrderSide`], [`MessageLevel`] - Closed enums for
//!   every categorical argument the API accepts
//! - [`ParamValue`], [`FormParams`] - Ordered form parameters and their
//!   canonical wire encoding
//! - [`Envelope`] - The uniform `status_code` / `response_data` response wrapper
//! - [`InvalidArgument`] - Raised before any request leaves the process

pub mod enums;
pub mod envelope;
pub mod error;
pub mod params;

// Re-export commonly used types
pub use enums::*;
pub use envelope::*;
pub use error::*;
pub use params::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
