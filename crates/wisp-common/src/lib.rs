//! Common utilities for the Wisp renderer.
//!
//! This crate provides shared infrastructure used by all pipeline stages:
//! - **Warning System** - deduplicated colored terminal output for tolerated
//!   malformed input
//! - **Networking** - blocking document fetch for `http(s)://` and `data:` URLs

pub mod net;
pub mod warning;
