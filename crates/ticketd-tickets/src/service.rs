//! Ticket service for translating validated input into store operations.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait};
use std::sync::Arc;
use thiserror::Error;
use ticketd_entities::tickets;
use tracing::info;

/// Ticket service errors
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Request to create a new ticket
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
}

/// Request to update a ticket. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateTicketRequest {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Service for managing tickets. Absence of a ticket is signalled with
/// `None`, never with an error.
pub struct TicketService {
    db: Arc<DatabaseConnection>,
}

impl TicketService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List all tickets. No ordering guarantee.
    pub async fn list_tickets(&self) -> Result<Vec<tickets::Model>, TicketError> {
        let all = tickets::Entity::find().all(self.db.as_ref()).await?;
        Ok(all)
    }

    /// Get a ticket by ID
    pub async fn get_ticket(&self, ticket_id: i32) -> Result<Option<tickets::Model>, TicketError> {
        let ticket = tickets::Entity::find_by_id(ticket_id)
            .one(self.db.as_ref())
            .await?;
        Ok(ticket)
    }

    /// Create a new ticket with the default `"open"` status
    pub async fn create_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> Result<tickets::Model, TicketError> {
        let ticket = tickets::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            status: Set(tickets::DEFAULT_STATUS.to_string()),
            ..Default::default()
        };

        let result = ticket.insert(self.db.as_ref()).await?;
        info!("Created ticket {}", result.id);
        Ok(result)
    }

    /// Apply the provided fields to an existing ticket
    pub async fn update_ticket(
        &self,
        ticket_id: i32,
        request: UpdateTicketRequest,
    ) -> Result<Option<tickets::Model>, TicketError> {
        let Some(existing) = self.get_ticket(ticket_id).await? else {
            return Ok(None);
        };

        // An empty update would produce an UPDATE with no SET clause
        if request.is_empty() {
            return Ok(Some(existing));
        }

        let mut ticket: tickets::ActiveModel = existing.into();
        if let Some(title) = request.title {
            ticket.title = Set(title);
        }
        if let Some(description) = request.description {
            ticket.description = Set(description);
        }
        if let Some(status) = request.status {
            ticket.status = Set(status);
        }

        let result = ticket.update(self.db.as_ref()).await?;
        info!("Updated ticket {}", ticket_id);
        Ok(Some(result))
    }

    /// Delete a ticket, returning it as it was before removal
    pub async fn delete_ticket(
        &self,
        ticket_id: i32,
    ) -> Result<Option<tickets::Model>, TicketError> {
        let Some(existing) = self.get_ticket(ticket_id).await? else {
            return Ok(None);
        };

        existing.clone().delete(self.db.as_ref()).await?;
        info!("Deleted ticket {}", ticket_id);
        Ok(Some(existing))
    }
}
