use clap::Args;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ticketd_tickets::{configure_routes, TicketService, TicketState, TicketsApiDoc};

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3000", env = "TICKETD_ADDRESS")]
    pub address: String,

    /// Database connection URL
    #[arg(long, env = "TICKETD_DATABASE_URL")]
    pub database_url: String,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.serve())
    }

    async fn serve(self) -> anyhow::Result<()> {
        debug!("Initializing database connection...");
        let db = ticketd_database::establish_connection(&self.database_url).await?;

        let ticket_service = Arc::new(TicketService::new(db));
        let ticket_state = Arc::new(TicketState::new(ticket_service));

        let app = configure_routes()
            .with_state(ticket_state)
            .merge(
                SwaggerUi::new("/swagger-ui")
                    .url("/api-docs/openapi.json", TicketsApiDoc::openapi()),
            )
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.address).await?;
        info!("Ticketd server listening on {}", self.address);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Ticketd server exited");
        Ok(())
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
