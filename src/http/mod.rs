//! HTTP client layer — `CoinGeckoHttp` with a configurable retry policy.

pub mod client;
pub mod retry;

pub use client::CoinGeckoHttp;
pub use retry::{RetryConfig, RetryPolicy};
