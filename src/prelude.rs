//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the matchcore-rs crate. Instead of importing each type
//! individually, you can use:
//!
//! ```rust
//! use matchcore_rs::prelude::*;
//! ```
//!
//! This will import all the essential types needed for working with the
//! matching core.

// The matching core and its event sink type
pub use crate::matchcore::{MatchingCore, MatchingCoreError, OrderHandler};

// Snapshot types
pub use crate::matchcore::{MatchingCoreSnapshot, MatchingCoreSnapshotPackage, OrderSnapshot};

// Domain model types
pub use crate::model::{Instrument, LiquiditySide, Order, OrderId, OrderSide, OrderType, Price};

// Utility functions
pub use crate::utils::current_time_nanos;
