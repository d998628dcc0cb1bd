//! Random graph generation for the "generate random graph" control.

use std::collections::HashSet;
use std::f64::consts::PI;

use super::store::{Edge, Vertex};

/// Deterministic linear congruential generator. Good enough for layouts and
/// demo graphs, and keeps the build free of an RNG crate.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: usize,
}

impl Lcg {
	pub fn new(seed: usize) -> Self {
		Self { state: seed }
	}

	/// Next value in [0, 1).
	pub fn next_f64(&mut self) -> f64 {
		self.state = (self.state.wrapping_add(1).wrapping_mul(9301) + 49297) % 233280;
		self.state as f64 / 233280.0
	}

	/// Next index in [0, max).
	pub fn next_index(&mut self, max: usize) -> usize {
		(self.next_f64() * max as f64) as usize
	}
}

/// Builds `vertex_count` vertices placed on a circle around the viewport
/// center, and up to `edge_count` distinct undirected edges. The edge count
/// is capped at `n * (n - 1) / 2`; no self loops, no duplicate unordered
/// pairs.
pub fn generate_random_graph_data(
	vertex_count: usize,
	edge_count: usize,
	(width, height): (f64, f64),
	seed: usize,
) -> (Vec<Vertex>, Vec<Edge>) {
	let mut rng = Lcg::new(seed);

	let vertices: Vec<Vertex> = (0..vertex_count)
		.map(|i| {
			let angle = i as f64 * 2.0 * PI / vertex_count.max(1) as f64;
			Vertex::at(
				i,
				width / 2.0 + 100.0 * angle.cos(),
				height / 2.0 + 100.0 * angle.sin(),
			)
		})
		.collect();

	let mut remaining = edge_count.min(vertex_count * vertex_count.saturating_sub(1) / 2);
	let mut taken: HashSet<(usize, usize)> = HashSet::new();
	let mut edges = Vec::new();

	while remaining > 0 {
		let source = rng.next_index(vertex_count);
		// Draw from n - 1 slots and skip past the source to rule out a
		// self loop.
		let drawn = rng.next_index(vertex_count - 1);
		let target = if drawn < source { drawn } else { drawn + 1 };

		if taken.contains(&(source, target)) || taken.contains(&(target, source)) {
			continue;
		}
		taken.insert((source, target));
		edges.push(Edge {
			source,
			target,
			weight: None,
		});
		remaining -= 1;
	}

	(vertices, edges)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn caps_edge_count_at_the_possible_maximum() {
		let (vertices, edges) = generate_random_graph_data(5, 100, (800.0, 600.0), 7);
		assert_eq!(vertices.len(), 5);
		assert_eq!(edges.len(), 10);
	}

	#[test]
	fn no_duplicates_or_self_loops() {
		let (_, edges) = generate_random_graph_data(6, 12, (800.0, 600.0), 42);
		let mut seen = HashSet::new();
		for edge in &edges {
			assert_ne!(edge.source, edge.target);
			let key = (edge.source.min(edge.target), edge.source.max(edge.target));
			assert!(seen.insert(key), "duplicate unordered pair {key:?}");
		}
	}

	#[test]
	fn handles_degenerate_sizes() {
		let (vertices, edges) = generate_random_graph_data(0, 5, (800.0, 600.0), 1);
		assert!(vertices.is_empty() && edges.is_empty());
		let (vertices, edges) = generate_random_graph_data(1, 5, (800.0, 600.0), 1);
		assert_eq!(vertices.len(), 1);
		assert!(edges.is_empty());
	}

	#[test]
	fn ids_are_dense_and_positions_centered() {
		let (vertices, _) = generate_random_graph_data(4, 0, (200.0, 100.0), 3);
		for (i, v) in vertices.iter().enumerate() {
			assert_eq!(v.id, i);
			assert!((v.x - 100.0).abs() <= 100.0 + 1e-9);
			assert!((v.y - 50.0).abs() <= 100.0 + 1e-9);
		}
	}

	#[test]
	fn same_seed_same_graph() {
		let a = generate_random_graph_data(8, 10, (800.0, 600.0), 11);
		let b = generate_random_graph_data(8, 10, (800.0, 600.0), 11);
		assert_eq!(a.1, b.1);
	}
}
