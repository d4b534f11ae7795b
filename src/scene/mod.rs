//! Scene description: configuration, ornament records and tether geometry.
//!
//! A [`config::SceneConfig`] is plain data (JSON-loadable); [`model::Ornament`] is its live,
//! simulated counterpart.

/// JSON-loadable scene configuration and the built-in placements.
pub mod config;
/// Ornament specs and live ornament state.
pub mod model;
/// Chain and rope sag geometry.
pub mod tether;
