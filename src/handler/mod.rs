//! Request handler module
//!
//! Responsible for request routing dispatch and the climate data handlers.

mod climate;
mod health;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
