//! Shared types used across all ticketd crates.

pub mod error;
pub mod problemdetails;

pub use error::{ServiceError, ServiceResult};
