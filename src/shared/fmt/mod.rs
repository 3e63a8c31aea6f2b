//! Number formatting for table display.

pub mod num;

pub use num::{display_price, display_volume, group_digits};
