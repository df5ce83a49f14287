//! Collaborators at the edge of the core: source file ingestion

pub mod import;
