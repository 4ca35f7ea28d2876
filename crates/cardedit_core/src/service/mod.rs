//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record-store calls around edit sessions.
//! - Keep presentation layers decoupled from storage details.

pub mod editor_service;
