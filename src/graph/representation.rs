//! Derived graph representations. Pure functions of the current vertex/edge
//! collections and the directed flag; recompute on every read rather than
//! cache, so they can never be observed stale.

use super::store::{GraphStore, VertexId};

/// N x N 0/1 matrix indexed by current vertex index. Undirected mode mirrors
/// every entry, so the result is symmetric; directed mode need not be.
pub fn adjacency_matrix(store: &GraphStore, is_directed: bool) -> Vec<Vec<u8>> {
	let n = store.vertex_count();
	let mut matrix = vec![vec![0u8; n]; n];
	for edge in store.edges() {
		let (Some(i), Some(j)) = (store.index_of(edge.source), store.index_of(edge.target))
		else {
			continue;
		};
		matrix[i][j] = 1;
		if !is_directed {
			matrix[j][i] = 1;
		}
	}
	matrix
}

/// Row-wise neighbor lists: for each row of the matrix, the column indices
/// holding 1, ascending.
pub fn adjacency_list(matrix: &[Vec<u8>]) -> Vec<Vec<usize>> {
	matrix
		.iter()
		.map(|row| {
			row.iter()
				.enumerate()
				.filter(|&(_, &connected)| connected == 1)
				.map(|(j, _)| j)
				.collect()
		})
		.collect()
}

/// Stored edges as endpoint id pairs, in storage order.
pub fn edge_list(store: &GraphStore) -> Vec<(VertexId, VertexId)> {
	store
		.edges()
		.iter()
		.map(|e| (e.source, e.target))
		.collect()
}
