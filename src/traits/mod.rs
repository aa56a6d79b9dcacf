//! Trait definitions for libraries.io operations.
//!
//! Each operation family implements [`Operation`], exposing its catalog
//! data and its family-specific query parameters to the builder and session.

mod operation;

pub use operation::Operation;
