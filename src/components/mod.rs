//! Presentation components.

pub mod graph_canvas;
