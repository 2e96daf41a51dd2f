// File: services/deskbook_backend/src/main.rs
mod ledger_factory;

use axum::{routing::get, Router};
use deskbook_common::logging;
use deskbook_config::load_config;
use deskbook_sheets::{routes::routes, DeskState};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config()?);
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = logging::init_with_config(&config.logging);

    let ledger = ledger_factory::build_ledger(&config).await?;
    let state = Arc::new(DeskState::new(config.clone(), ledger));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the desk booking API!" }))
        .merge(routes(state));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use deskbook_sheets::doc::DeskbookApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Deskbook API",
                version = "0.1.0",
                description = "Hot-desk booking service",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(DeskbookApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
