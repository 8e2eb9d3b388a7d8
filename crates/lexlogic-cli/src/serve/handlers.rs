//! HTTP route handlers for the viewer.
//!
//! Handlers are kept thin: the core crate highlights and builds the graph,
//! these only fetch, convert and report errors.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::warn;

use lexlogic_core::client::{AtomApi, FragmentApi, RuleApi};
use lexlogic_core::color::atom_color;
use lexlogic_core::models::AtomId;
use lexlogic_core::{ApiError, HeadPolicy, HighlightError, HoverState, ReferenceExtraction};

use super::graph::to_graph_data;
use super::models::{
    AtomView, ChangesQuery, ErrorBody, FragmentView, GraphData, GraphQuery, HoverBody,
};
use super::templates;
use super::AppState;

/// How long `/api/hover/changes` holds a request open.
const LONG_POLL: Duration = Duration::from_secs(25);

// =============================================================================
// Errors
// =============================================================================

/// Failure while answering an API request.
pub enum AppError {
    Backend(ApiError),
    Highlight(HighlightError),
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Backend(e)
    }
}

impl From<HighlightError> for AppError {
    fn from(e: HighlightError) -> Self {
        AppError::Highlight(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Backend(ApiError::Status { status, message }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            AppError::Backend(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Highlight(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };
        warn!(%status, error = %message, "Viewer request failed");
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - The viewer page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(templates::render_viewer_page(&state.title))
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/fragment` - Highlighted text and atom list.
pub async fn api_fragment(State(state): State<Arc<AppState>>) -> Result<Json<FragmentView>, AppError> {
    let (fragment, atoms) = tokio::try_join!(
        state.backend.get_fragment(state.fragment),
        state.backend.list_atoms(state.fragment)
    )?;
    let fragments = state.highlighter.highlight(&fragment.content, &atoms)?;

    let atoms = atoms
        .into_iter()
        .map(|atom| AtomView {
            color: atom_color(atom.id),
            id: atom.id,
            predicate: atom.predicate,
            description: atom.description,
            is_negated: atom.is_negated,
            is_fact: atom.is_fact,
        })
        .collect();

    Ok(Json(FragmentView {
        id: fragment.id,
        title: fragment.title,
        source: fragment.source,
        fragments,
        atoms,
        hovered: state.hover.current(),
    }))
}

/// GET `/api/graph` - Dependency graph for Sigma.js/Graphology.
///
/// Response format:
/// ```json
/// {
///   "nodes": [{"key": "rule:10", "attributes": {...}}],
///   "edges": [{"key": "rule:10->atom:1", "source": "rule:10", "target": "atom:1"}]
/// }
/// ```
pub async fn api_graph(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GraphQuery>,
) -> Result<Json<GraphData>, AppError> {
    let (atoms, rules) = tokio::try_join!(
        state.backend.list_atoms(state.fragment),
        state.backend.list_rules(state.fragment)
    )?;

    let mut builder = state.graph;
    if params.per_rule {
        builder = builder.head_policy(HeadPolicy::NodePerRule);
    }
    if params.parsed {
        builder = builder.extraction(ReferenceExtraction::Parsed);
    }

    Ok(Json(to_graph_data(&builder.build(&atoms, &rules))))
}

/// GET `/api/hover` - Currently hovered atom.
pub async fn get_hover(State(state): State<Arc<AppState>>) -> Json<HoverBody> {
    Json(HoverBody {
        atom_id: state.hover.current(),
    })
}

/// PUT `/api/hover` - Set (or with `null`, clear) the hovered atom.
pub async fn put_hover(State(state): State<Arc<AppState>>, Json(body): Json<HoverBody>) -> Json<HoverBody> {
    state.hover.set(body.atom_id);
    Json(body)
}

/// DELETE `/api/hover` - Clear the hovered atom.
pub async fn delete_hover(State(state): State<Arc<AppState>>) -> StatusCode {
    state.hover.clear();
    StatusCode::NO_CONTENT
}

/// GET `/api/hover/changes?known=ID` - Long poll: answers as soon as the
/// hovered atom differs from `known`, or after a timeout with the current value.
pub async fn hover_changes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChangesQuery>,
) -> Json<HoverBody> {
    Json(HoverBody {
        atom_id: wait_for_change(&state.hover, params.known, LONG_POLL).await,
    })
}

async fn wait_for_change(hover: &HoverState, known: Option<AtomId>, timeout: Duration) -> Option<AtomId> {
    let mut subscription = hover.subscribe();
    if subscription.current() != known {
        return subscription.current();
    }
    let _ = tokio::time::timeout(timeout, subscription.changed()).await;
    hover.current()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_returns_immediately_when_stale() {
        let hover = HoverState::new();
        hover.set(Some(3));
        let current = wait_for_change(&hover, None, Duration::from_secs(10)).await;
        assert_eq!(current, Some(3));
    }

    #[tokio::test]
    async fn test_wait_wakes_on_change() {
        let hover = HoverState::new();
        let writer = hover.clone();
        let waiter = tokio::spawn(async move { wait_for_change(&hover, None, Duration::from_secs(10)).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        writer.set(Some(7));
        assert_eq!(waiter.await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_wait_times_out_with_current_value() {
        let hover = HoverState::new();
        hover.set(Some(1));
        let current = wait_for_change(&hover, Some(1), Duration::from_millis(20)).await;
        assert_eq!(current, Some(1));
    }

    #[test]
    fn test_backend_status_passes_through() {
        let response = AppError::Backend(ApiError::Status {
            status: 404,
            message: "Regulation fragment not found".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Backend(ApiError::Network("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
