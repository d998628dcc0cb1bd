//! The graph model: canonical mutable state plus its derived views.

pub mod geometry;
pub mod properties;
pub mod random;
pub mod representation;
pub mod store;

pub use geometry::{EdgeLine, edge_line, edge_lines};
pub use properties::{GraphProperties, analyze, component_color_indices};
pub use random::generate_random_graph_data;
pub use representation::{adjacency_list, adjacency_matrix, edge_list};
pub use store::{DrawLine, Edge, GraphStore, PointerButton, Vertex, VertexId};
