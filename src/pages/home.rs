use std::collections::HashSet;
use std::sync::Arc;

use leptos::prelude::*;

use crate::components::graph_canvas::{GraphCanvas, TraversalSource};
use crate::traversal::Traversal;

/// Depth-first traversal over an adjacency list, visiting unvisited indices
/// in ascending order. Stands in for the algorithm library feeding the
/// playback controls; each step records the recursion stack at visit time.
fn dfs_traversal(adjacency_list: &[Vec<usize>]) -> Traversal {
	let mut order = Vec::new();
	let mut walk = HashSet::new();
	let mut records = Vec::new();
	let mut stack = Vec::new();
	let mut visited = vec![false; adjacency_list.len()];

	fn visit(
		index: usize,
		adjacency_list: &[Vec<usize>],
		visited: &mut [bool],
		order: &mut Vec<usize>,
		walk: &mut HashSet<(usize, usize)>,
		records: &mut Vec<Vec<usize>>,
		stack: &mut Vec<usize>,
	) {
		visited[index] = true;
		stack.push(index);
		order.push(index);
		records.push(stack.clone());
		for &neighbor in &adjacency_list[index] {
			if visited[neighbor] {
				continue;
			}
			walk.insert((index, neighbor));
			visit(
				neighbor,
				adjacency_list,
				visited,
				order,
				walk,
				records,
				stack,
			);
		}
		stack.pop();
	}

	for index in 0..adjacency_list.len() {
		if !visited[index] {
			visit(
				index,
				adjacency_list,
				&mut visited,
				&mut order,
				&mut walk,
				&mut records,
				&mut stack,
			);
		}
	}
	Traversal {
		order,
		walk,
		records,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dfs: TraversalSource = Arc::new(dfs_traversal);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<main class="page">
				<section class="editor-section">
					<h1>"Graph Sketchpad"</h1>
					<p class="subtitle">
						"Click to add a vertex. Drag between vertices to connect them. "
						"Ctrl-drag (Cmd on Mac) to move a vertex. Right-click removes."
					</p>
					<div class="canvas-frame tall">
						<GraphCanvas
							can_toggle_directed=true
							show_random_button=true
							show_algorithm_controls=true
							show_representation=true
							traversal_source=dfs
						/>
					</div>
				</section>

				<section class="editor-section">
					<h2>"Tree editor"</h2>
					<p class="subtitle">
						"Click a vertex to grow a leaf under it. Right-click a vertex to "
						"remove its subtree. The root stays."
					</p>
					<div class="canvas-frame">
						<GraphCanvas tree_mode=true />
					</div>
				</section>

				<section class="editor-section">
					<h2>"Weighted graph"</h2>
					<p class="subtitle">"Drawn edges pick up a random weight in [0, 10)."</p>
					<div class="canvas-frame">
						<GraphCanvas weighted=true show_random_button=true />
					</div>
				</section>
			</main>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dfs_visits_every_index_once() {
		let adjacency = vec![vec![1, 2], vec![0, 2], vec![0, 1], vec![]];
		let t = dfs_traversal(&adjacency);
		assert_eq!(t.order, vec![0, 1, 2, 3]);
		assert!(t.walk.contains(&(0, 1)));
		assert!(t.walk.contains(&(1, 2)));
		assert!(!t.walk.contains(&(0, 2)));
	}

	#[test]
	fn dfs_restarts_per_component() {
		let adjacency = vec![vec![], vec![2], vec![1]];
		let t = dfs_traversal(&adjacency);
		assert_eq!(t.order, vec![0, 1, 2]);
		assert_eq!(t.walk, [(1, 2)].into_iter().collect());
	}

	#[test]
	fn dfs_records_the_recursion_stack_per_step() {
		let adjacency = vec![vec![1, 2], vec![0], vec![0, 3], vec![2]];
		let t = dfs_traversal(&adjacency);
		assert_eq!(t.order, vec![0, 1, 2, 3]);
		assert_eq!(
			t.records,
			vec![vec![0], vec![0, 1], vec![0, 2], vec![0, 2, 3]]
		);
	}

	#[test]
	fn dfs_of_nothing_is_empty() {
		let t = dfs_traversal(&[]);
		assert!(t.order.is_empty());
		assert!(t.walk.is_empty());
	}
}
