//! # ticketd-tickets
//!
//! Ticket management for the ticketd tracker.
//!
//! This crate provides:
//! - `TicketService` for creating, reading, updating and deleting tickets
//! - HTTP handlers and route configuration for the `/tickets` API
//! - OpenAPI documentation for the ticket endpoints

mod handlers;
mod service;

pub use handlers::{configure_routes, TicketState, TicketsApiDoc};
pub use service::{CreateTicketRequest, TicketError, TicketService, UpdateTicketRequest};
