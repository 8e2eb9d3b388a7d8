//! Subcommand implementations.

pub mod chat;
pub mod examples;
pub mod fragments;
pub mod generate;
pub mod graph;
pub mod logs;
pub mod rules;
