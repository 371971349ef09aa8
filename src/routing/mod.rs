//! Routing module
//!
//! Resolves request paths to the climate API's fixed route table.

mod matcher;

pub use matcher::{match_route, ApiRoute};
