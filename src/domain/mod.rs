//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde shapes matching provider responses
//! - `convert.rs`: Conversions from wire shapes into display types
//! - `state.rs`: State containers with update methods
//! - `client.rs`: Sub-client with HTTP methods

pub mod dashboard;
pub mod quote;
pub mod theme;
