//! Member Search API Library
//!
//! Dynamic, optional-filter member search over a `member LEFT JOIN team`
//! relation, exposed as plain and paginated HTTP endpoints.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
