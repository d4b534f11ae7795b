//! Render sinks.
//!
//! The overlay composes a frame into [`sink::DrawCmd`]s; sinks turn them into pixels (or just
//! record them).

/// CPU raster sink (`vello_cpu`).
pub mod cpu;
/// Draw-command contract and the in-memory sink.
pub mod sink;
