//! Core types and utilities for ground-control-point marker surveys.
//!
//! This crate is intentionally small and purely geometric. It holds the fixed
//! marker layout model, the observation/correlation data model, and the planar
//! geometry helpers the detection crates build on. It does *not* decode images
//! or depend on any concrete detector.

mod document;
mod geometry;
mod layout;
mod logger;

pub use document::{CorrelationDocument, MarkerEntry, Observation};
pub use geometry::{
    min_enclosing_circle, polygon_area, polygon_perimeter, EnclosingCircle,
};
pub use layout::{marker_positions, MarkerDefinition, MarkerLayout};
pub use logger::init_with_level;
