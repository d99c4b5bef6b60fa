//! Domain model shared between the matching core and its owner.

mod instrument;
mod order;
mod price;
mod types;

pub use instrument::Instrument;
pub use order::{Order, OrderId};
pub use price::Price;
pub use types::{LiquiditySide, OrderSide, OrderType};
