//! HTTP handlers for ticket management.

use crate::service::{CreateTicketRequest, TicketService, UpdateTicketRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticketd_core::problemdetails::{self, Problem};
use tracing::error;
use utoipa::{OpenApi, ToSchema};

/// Shared state for ticket handlers
pub struct TicketState {
    pub ticket_service: Arc<TicketService>,
}

impl TicketState {
    pub fn new(ticket_service: Arc<TicketService>) -> Self {
        Self { ticket_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_tickets,
        get_ticket,
        create_ticket,
        update_ticket,
        delete_ticket,
    ),
    components(
        schemas(
            TicketResponse,
            CreateTicketRequestBody,
            UpdateTicketRequestBody,
        )
    ),
    info(
        title = "Tickets API",
        description = "API endpoints for managing tickets",
        version = "1.0.0"
    ),
    tags(
        (name = "Tickets", description = "Ticket management endpoints")
    )
)]
pub struct TicketsApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
}

impl From<ticketd_entities::tickets::Model> for TicketResponse {
    fn from(ticket: ticketd_entities::tickets::Model) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequestBody {
    /// Short summary of the issue
    #[schema(example = "Bug")]
    pub title: String,
    /// Full description of the issue
    #[schema(example = "Fix crash")]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicketRequestBody {
    /// New title, if it should change
    pub title: Option<String>,
    /// New description, if it should change
    pub description: Option<String>,
    /// New status, if it should change
    #[schema(example = "closed")]
    pub status: Option<String>,
}

fn ticket_not_found() -> Problem {
    problemdetails::new(StatusCode::NOT_FOUND).with_detail("Ticket not found")
}

// ============================================================================
// Handlers
// ============================================================================

/// List all tickets
#[utoipa::path(
    get,
    path = "/tickets",
    responses(
        (status = 200, description = "List of tickets", body = Vec<TicketResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tickets"
)]
async fn list_tickets(State(state): State<Arc<TicketState>>) -> Result<impl IntoResponse, Problem> {
    match state.ticket_service.list_tickets().await {
        Ok(tickets) => {
            let responses: Vec<TicketResponse> = tickets.into_iter().map(Into::into).collect();
            Ok(Json(responses))
        }
        Err(e) => {
            error!("Failed to list tickets: {}", e);
            Err(problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_title("Failed to list tickets")
                .with_detail(e.to_string()))
        }
    }
}

/// Get a specific ticket
#[utoipa::path(
    get,
    path = "/tickets/{ticket_id}",
    responses(
        (status = 200, description = "Ticket details", body = TicketResponse),
        (status = 404, description = "Ticket not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("ticket_id" = i32, Path, description = "Ticket ID")
    ),
    tag = "Tickets"
)]
async fn get_ticket(
    State(state): State<Arc<TicketState>>,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    match state.ticket_service.get_ticket(ticket_id).await {
        Ok(Some(ticket)) => Ok(Json(TicketResponse::from(ticket))),
        Ok(None) => Err(ticket_not_found()),
        Err(e) => {
            error!("Failed to get ticket: {}", e);
            Err(problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_title("Failed to get ticket")
                .with_detail(e.to_string()))
        }
    }
}

/// Create a new ticket
#[utoipa::path(
    post,
    path = "/tickets",
    request_body = CreateTicketRequestBody,
    responses(
        (status = 201, description = "Ticket created", body = TicketResponse),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tickets"
)]
async fn create_ticket(
    State(state): State<Arc<TicketState>>,
    Json(body): Json<CreateTicketRequestBody>,
) -> Result<impl IntoResponse, Problem> {
    let request = CreateTicketRequest {
        title: body.title,
        description: body.description,
    };

    match state.ticket_service.create_ticket(request).await {
        Ok(ticket) => Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket)))),
        Err(e) => {
            error!("Failed to create ticket: {}", e);
            Err(problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_title("Failed to create ticket")
                .with_detail(e.to_string()))
        }
    }
}

/// Update a ticket
///
/// Only the fields present in the request body are applied.
#[utoipa::path(
    put,
    path = "/tickets/{ticket_id}",
    request_body = UpdateTicketRequestBody,
    responses(
        (status = 200, description = "Ticket updated", body = TicketResponse),
        (status = 404, description = "Ticket not found"),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("ticket_id" = i32, Path, description = "Ticket ID")
    ),
    tag = "Tickets"
)]
async fn update_ticket(
    State(state): State<Arc<TicketState>>,
    Path(ticket_id): Path<i32>,
    Json(body): Json<UpdateTicketRequestBody>,
) -> Result<impl IntoResponse, Problem> {
    let request = UpdateTicketRequest {
        title: body.title,
        description: body.description,
        status: body.status,
    };

    match state.ticket_service.update_ticket(ticket_id, request).await {
        Ok(Some(ticket)) => Ok(Json(TicketResponse::from(ticket))),
        Ok(None) => Err(ticket_not_found()),
        Err(e) => {
            error!("Failed to update ticket: {}", e);
            Err(problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_title("Failed to update ticket")
                .with_detail(e.to_string()))
        }
    }
}

/// Delete a ticket
///
/// Returns the ticket as it was immediately before removal.
#[utoipa::path(
    delete,
    path = "/tickets/{ticket_id}",
    responses(
        (status = 200, description = "Ticket deleted", body = TicketResponse),
        (status = 404, description = "Ticket not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("ticket_id" = i32, Path, description = "Ticket ID")
    ),
    tag = "Tickets"
)]
async fn delete_ticket(
    State(state): State<Arc<TicketState>>,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    match state.ticket_service.delete_ticket(ticket_id).await {
        Ok(Some(ticket)) => Ok(Json(TicketResponse::from(ticket))),
        Ok(None) => Err(ticket_not_found()),
        Err(e) => {
            error!("Failed to delete ticket: {}", e);
            Err(problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_title("Failed to delete ticket")
                .with_detail(e.to_string()))
        }
    }
}

/// Configure ticket routes
///
/// The collection routes are registered with and without the trailing
/// slash; axum treats the two paths as distinct.
pub fn configure_routes() -> Router<Arc<TicketState>> {
    Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route("/tickets/", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/{ticket_id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use ticketd_database::test_utils::TestDatabase;
    use tower::ServiceExt;

    struct TestSetup {
        app: Router,
    }

    impl TestSetup {
        async fn new() -> anyhow::Result<Self> {
            let test_db = TestDatabase::new().await?;
            let ticket_service = Arc::new(TicketService::new(test_db.db));
            let state = Arc::new(TicketState::new(ticket_service));
            let app = configure_routes().with_state(state);
            Ok(Self { app })
        }

        async fn request(
            &self,
            method: &str,
            uri: &str,
            body: Option<Value>,
        ) -> anyhow::Result<(StatusCode, Value)> {
            let request = match body {
                Some(body) => Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&body)?))?,
                None => Request::builder().method(method).uri(uri).body(Body::empty())?,
            };

            let response = self.app.clone().oneshot(request).await?;
            let status = response.status();
            let bytes = response.into_body().collect().await?.to_bytes();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)?
            };
            Ok((status, json))
        }

        async fn create_ticket(&self) -> anyhow::Result<Value> {
            let (status, body) = self
                .request(
                    "POST",
                    "/tickets/",
                    Some(json!({"title": "Bug", "description": "Fix crash"})),
                )
                .await?;
            assert_eq!(status, StatusCode::CREATED);
            Ok(body)
        }
    }

    #[tokio::test]
    async fn test_create_ticket() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;

        let (status, body) = setup
            .request(
                "POST",
                "/tickets/",
                Some(json!({"title": "Bug", "description": "Fix crash"})),
            )
            .await?;

        assert_eq!(status, StatusCode::CREATED);
        let ticket: TicketResponse = serde_json::from_value(body)?;
        assert_eq!(ticket.title, "Bug");
        assert_eq!(ticket.description, "Fix crash");
        assert_eq!(ticket.status, "open");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_ticket_missing_field_is_client_error() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;

        let (status, _) = setup
            .request("POST", "/tickets/", Some(json!({"title": "Bug"})))
            .await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Nothing was persisted
        let (status, body) = setup.request("GET", "/tickets/", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_ticket() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        let created = setup.create_ticket().await?;
        let ticket_id = created["id"].as_i64().unwrap();

        let (status, body) = setup
            .request("GET", &format!("/tickets/{}", ticket_id), None)
            .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_tickets() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        setup.create_ticket().await?;
        setup.create_ticket().await?;

        let (status, body) = setup.request("GET", "/tickets/", None).await?;
        assert_eq!(status, StatusCode::OK);

        let tickets: Vec<TicketResponse> = serde_json::from_value(body)?;
        assert_eq!(tickets.len(), 2);

        // Collection is also reachable without the trailing slash
        let (status, _) = setup.request("GET", "/tickets", None).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_ticket_status() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        let created = setup.create_ticket().await?;
        let ticket_id = created["id"].as_i64().unwrap();

        let (status, body) = setup
            .request(
                "PUT",
                &format!("/tickets/{}", ticket_id),
                Some(json!({"status": "closed"})),
            )
            .await?;

        assert_eq!(status, StatusCode::OK);
        let ticket: TicketResponse = serde_json::from_value(body)?;
        assert_eq!(ticket.title, "Bug");
        assert_eq!(ticket.description, "Fix crash");
        assert_eq!(ticket.status, "closed");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_ticket_empty_body_changes_nothing() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        let created = setup.create_ticket().await?;
        let ticket_id = created["id"].as_i64().unwrap();

        let (status, body) = setup
            .request("PUT", &format!("/tickets/{}", ticket_id), Some(json!({})))
            .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_ticket() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        let created = setup.create_ticket().await?;
        let ticket_id = created["id"].as_i64().unwrap();

        let (status, body) = setup
            .request("DELETE", &format!("/tickets/{}", ticket_id), None)
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);

        let (status, body) = setup
            .request("GET", &format!("/tickets/{}", ticket_id), None)
            .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Ticket not found"}));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_ticket_returns_404() -> anyhow::Result<()> {
        let setup = TestSetup::new().await?;
        let expected = json!({"detail": "Ticket not found"});

        let (status, body) = setup.request("GET", "/tickets/9999", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) = setup
            .request("PUT", "/tickets/9999", Some(json!({"status": "closed"})))
            .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) = setup.request("DELETE", "/tickets/9999", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);
        Ok(())
    }
}
