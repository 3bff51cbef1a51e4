//! API access for the browser
//!
//! `gloo-net` implementation of the population API.

mod client;

pub use client::{get_api_base, GlooClient};
