//! # cmap-core
//!
//! Core types, text normalization, collaborator traits, and error types for coursemap.
//!
//! This crate provides the foundational types shared across all coursemap crates:
//! - Value objects produced and consumed within one matching run (extracted courses,
//!   curriculum courses, grade results, match results, gaps, recommendations)
//! - Enums for extraction provenance, match types, priorities, and rejection reasons
//! - Text normalization and content hashing used as cache keys
//! - PII masking for text that leaves the process
//! - Async traits for the external collaborators (embedding, semantic judge, vector
//!   search, curriculum source, AI extraction, description, verification, difficulty)
//! - Cross-cutting error types

pub mod collaborators;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod pii;
pub mod text;
