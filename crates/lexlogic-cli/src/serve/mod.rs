//! Local viewer for one regulation fragment.
//!
//! Serves a single page showing the highlighted fragment text next to its
//! rule/atom dependency graph (Sigma.js with a ForceAtlas2 layout). Both
//! views share one [`HoverState`]: hovering an atom anywhere emphasizes it
//! everywhere, including in other open tabs.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)
//! - `graph` - Dependency graph to Sigma/Graphology conversion
//! - `templates` - HTML/CSS/JS template rendering

mod graph;
mod handlers;
mod models;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use color_eyre::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use lexlogic_core::client::{Backend, FragmentApi};
use lexlogic_core::models::FragmentId;
use lexlogic_core::{Config, GraphBuilder, Highlighter, HoverState};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub fragment: FragmentId,
    /// Fragment title, for the page header.
    pub title: String,
    pub highlighter: Highlighter,
    /// Configured graph settings; request flags can only switch them on.
    pub graph: GraphBuilder,
    pub hover: HoverState,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// What to serve and where.
pub struct ServeOptions {
    pub fragment: FragmentId,
    pub port: u16,
    pub open_browser: bool,
}

// =============================================================================
// Server Entry Point
// =============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/fragment", get(handlers::api_fragment))
        .route("/api/graph", get(handlers::api_graph))
        .route(
            "/api/hover",
            get(handlers::get_hover)
                .put(handlers::put_hover)
                .delete(handlers::delete_hover),
        )
        .route("/api/hover/changes", get(handlers::hover_changes))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the viewer and run until Ctrl+C.
pub async fn start_server<B: Backend + 'static>(
    backend: B,
    config: &Config,
    options: ServeOptions,
) -> Result<()> {
    // Fail early on an unknown fragment instead of serving an error page.
    let fragment = backend.get_fragment(options.fragment).await?;

    let state = Arc::new(AppState {
        backend: Arc::new(backend),
        fragment: fragment.id,
        title: fragment.title,
        highlighter: Highlighter::new(config.highlight.overlap_policy),
        graph: GraphBuilder::new()
            .head_policy(config.graph.head_policy)
            .extraction(config.graph.extraction),
        hover: HoverState::new(),
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], options.port));
    let url = format!("http://localhost:{}", options.port);

    println!("Serving fragment {} at {}", options.fragment, url);
    println!("Press Ctrl+C to stop\n");

    if options.open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Viewer listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
