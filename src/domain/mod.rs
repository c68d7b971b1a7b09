//! Domain types for the lot calculator.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper, with form-input parsing
//! - Lot and LotBook (the ordered, never-empty purchase list)
//! - FeeConfig for proportional buy/sell fees

pub mod decimal;
pub mod fee;
pub mod lot;

pub use decimal::{Decimal, DISPLAY_DP};
pub use fee::FeeConfig;
pub use lot::{Lot, LotBook, LotField, DEFAULT_LOT_COUNT};
