//! API request and response models for the viewer.
//!
//! These are Data Transfer Objects (DTOs) that define the shape of
//! JSON exchanged with the frontend.

use serde::{Deserialize, Serialize};

use lexlogic_core::color::HighlightColor;
use lexlogic_core::highlight::Fragment;
use lexlogic_core::models::{AtomId, FragmentId};

// =============================================================================
// Fragment View (for `/api/fragment`)
// =============================================================================

/// Highlighted fragment text plus its atoms.
#[derive(Debug, Serialize)]
pub struct FragmentView {
    pub id: FragmentId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub fragments: Vec<Fragment>,
    pub atoms: Vec<AtomView>,
    /// Atom hovered when the view was built.
    pub hovered: Option<AtomId>,
}

#[derive(Debug, Serialize)]
pub struct AtomView {
    pub id: AtomId,
    pub predicate: String,
    pub description: String,
    pub is_negated: bool,
    pub is_fact: bool,
    pub color: HighlightColor,
}

// =============================================================================
// Graph Data Models (for Sigma.js/Graphology)
// =============================================================================

/// Full graph data response for `/api/graph`.
#[derive(Debug, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A node in the graph visualization.
#[derive(Debug, Serialize)]
pub struct GraphNode {
    /// `atom:{id}` or `rule:{id}`, unique even when the ids collide.
    pub key: String,
    pub attributes: NodeAttributes,
}

#[derive(Debug, Serialize)]
pub struct NodeAttributes {
    pub label: String,
    /// `atom` or `rule`. Not Sigma's render type.
    pub category: String,
    pub color: String,
    pub size: u32,
    /// Set on atom nodes, for hover linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atom_id: Option<AtomId>,
}

#[derive(Debug, Serialize)]
pub struct GraphEdge {
    pub key: String,
    pub source: String,
    pub target: String,
}

/// Query parameters for `/api/graph`. Flags switch the configured policy on.
#[derive(Debug, Default, Deserialize)]
pub struct GraphQuery {
    #[serde(default)]
    pub per_rule: bool,
    #[serde(default)]
    pub parsed: bool,
}

// =============================================================================
// Hover Models (for `/api/hover`)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverBody {
    pub atom_id: Option<AtomId>,
}

/// Query parameters for `/api/hover/changes`: the value the client has.
#[derive(Debug, Default, Deserialize)]
pub struct ChangesQuery {
    pub known: Option<AtomId>,
}

/// Error body, same shape the backend uses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
