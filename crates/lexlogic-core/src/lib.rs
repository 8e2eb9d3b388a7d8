pub mod chat;
pub mod client;
pub mod color;
pub mod config;
pub mod example_facts;
pub mod graph;
pub mod highlight;
pub mod hover;
pub mod logic;
pub mod logs;
pub mod models;

pub use chat::ChatThread;
pub use client::{ApiError, Backend, HttpBackend};
pub use color::{atom_color, highlight_color, HighlightColor};
pub use config::{Config, ConfigError};
pub use example_facts::{ExampleError, ExampleStore};
pub use graph::{DependencyGraph, GraphBuilder, HeadPolicy, ReferenceExtraction};
pub use highlight::{Fragment, HighlightError, Highlighter, OverlapPolicy};
pub use hover::HoverState;
pub use logic::{parse_clause, parse_program, LogicError};
pub use logs::AgenticLogFeed;
