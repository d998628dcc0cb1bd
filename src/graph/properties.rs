//! Structural property analysis over the derived adjacency list.

use std::collections::HashSet;

/// Classification of the current graph, recomputed whenever the adjacency
/// list changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphProperties {
	pub has_cycle: bool,
	/// Vertex indices per component, each sorted ascending; components are
	/// emitted in order of their lowest contained index.
	pub connected_components: Vec<Vec<usize>>,
	pub is_tree: bool,
	pub is_forest: bool,
	pub is_complete: bool,
}

/// Runs the parent-tracking depth-first analysis. Cycle detection does not
/// abort the search; every component is still enumerated.
pub fn analyze(
	adjacency_list: &[Vec<usize>],
	vertex_count: usize,
	edge_count: usize,
	is_directed: bool,
) -> GraphProperties {
	let mut visited = HashSet::new();
	let mut connected_components = Vec::new();
	let mut has_cycle = false;

	fn dfs(
		index: usize,
		parent: Option<usize>,
		adjacency_list: &[Vec<usize>],
		visited: &mut HashSet<usize>,
		component: &mut Vec<usize>,
		has_cycle: &mut bool,
	) {
		visited.insert(index);
		component.push(index);
		for &neighbor in &adjacency_list[index] {
			if Some(neighbor) == parent {
				continue;
			}
			if visited.contains(&neighbor) {
				*has_cycle = true;
				continue;
			}
			dfs(neighbor, Some(index), adjacency_list, visited, component, has_cycle);
		}
	}

	for index in 0..adjacency_list.len() {
		if visited.contains(&index) {
			continue;
		}
		let mut component = Vec::new();
		dfs(
			index,
			None,
			adjacency_list,
			&mut visited,
			&mut component,
			&mut has_cycle,
		);
		component.sort_unstable();
		connected_components.push(component);
	}

	let is_forest = !has_cycle;
	let is_tree = is_forest && vertex_count > 0 && edge_count == vertex_count - 1;
	// Directed: every ordered pair present. Undirected: count flattened
	// adjacency entries, which equals the edge-count formula as long as no
	// duplicate or antiparallel edges are stored (the edit operations
	// guarantee that).
	let total_entries: usize = adjacency_list.iter().map(Vec::len).sum();
	let is_complete = if is_directed {
		edge_count == vertex_count * vertex_count.saturating_sub(1)
	} else {
		total_entries == vertex_count * vertex_count.saturating_sub(1)
	};

	GraphProperties {
		has_cycle,
		connected_components,
		is_tree,
		is_forest,
		is_complete,
	}
}

/// Per-vertex component rank, used as a stable coloring key. A vertex whose
/// index appears in no component maps to `None`.
pub fn component_color_indices(
	vertex_count: usize,
	connected_components: &[Vec<usize>],
) -> Vec<Option<usize>> {
	(0..vertex_count)
		.map(|index| {
			connected_components
				.iter()
				.position(|component| component.contains(&index))
		})
		.collect()
}
