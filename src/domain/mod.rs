//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types and the collaborator trait its data comes from
//! - `wire.rs` — Raw serde structs matching CoinGecko responses (or stored records)
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `client.rs` — Sub-client with HTTP methods (`http` feature)
//!
//! plus the computation each slice owns (`cache`, `view`, `projection`,
//! `valuation`, `store`).

pub mod asset;
pub mod portfolio;
pub mod price_history;
pub mod quote;
pub mod search;
