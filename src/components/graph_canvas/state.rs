use std::sync::Arc;

use crate::graph::random::Lcg;
use crate::graph::{
	EdgeLine, GraphProperties, GraphStore, PointerButton, VertexId, adjacency_list,
	adjacency_matrix, analyze, component_color_indices, edge_lines, edge_list,
	generate_random_graph_data,
};
use crate::sim::{LayoutConfig, Simulation};
use crate::traversal::{Traversal, TraversalPlayer};

pub const VERTEX_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const EDGE_HIT_RADIUS: f64 = 6.0;

/// Supplier of the algorithm run to replay, fed the current adjacency list.
pub type TraversalSource = Arc<dyn Fn(&[Vec<usize>]) -> Traversal + Send + Sync>;

/// Snapshot of the derived representations backing the table panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepresentationTables {
	pub matrix: Vec<Vec<u8>>,
	pub list: Vec<Vec<usize>>,
	pub edges: Vec<(VertexId, VertexId)>,
}

/// Options fixed at canvas creation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanvasOptions {
	pub directed: bool,
	/// Tree editing: clicks grow leaves, the root is pinned and protected.
	pub tree_mode: bool,
	/// Attach a random weight in [0, 10) to drawn edges.
	pub weighted: bool,
}

/// Everything one canvas owns: the graph, its simulation, playback, and the
/// in-flight pointer gesture. Independent canvases never share state.
pub struct CanvasState {
	pub store: GraphStore,
	pub sim: Simulation,
	pub player: TraversalPlayer,
	pub is_directed: bool,
	pub tree_mode: bool,
	pub weighted: bool,
	pub width: f64,
	pub height: f64,
	drag_vertex: Option<VertexId>,
	pressed_on_empty: bool,
	traversal_source: Option<TraversalSource>,
	rng: Lcg,
	last_counts: (usize, usize),
}

impl CanvasState {
	pub fn new(
		options: CanvasOptions,
		traversal_source: Option<TraversalSource>,
		width: f64,
		height: f64,
	) -> Self {
		let mut store = GraphStore::new();
		if options.tree_mode {
			// Seed the protected root (id 0) near the top of the viewport.
			store.add_vertex(PointerButton::Primary, (width / 2.0, height * 0.25));
		}
		let config = LayoutConfig {
			pin_root_x: options.tree_mode,
			..LayoutConfig::default()
		};
		Self {
			store,
			sim: Simulation::new(config, width, height),
			player: TraversalPlayer::new(),
			is_directed: options.directed,
			tree_mode: options.tree_mode,
			weighted: options.weighted,
			width,
			height,
			drag_vertex: None,
			pressed_on_empty: false,
			traversal_source,
			rng: Lcg::new(97),
			last_counts: (0, 0),
		}
	}

	/// One animation frame: reheat on structural change, refresh the
	/// traversal being replayed, advance the simulation.
	pub fn frame(&mut self) {
		let counts = (self.store.vertex_count(), self.store.edge_count());
		if counts != self.last_counts {
			self.last_counts = counts;
			self.sim.reheat();
		}
		if let Some(source) = self.traversal_source.clone() {
			let list = self.derived_adjacency_list();
			self.player.set_traversal(source(&list));
		}
		self.sim.tick(&mut self.store);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.resize(width, height);
	}

	pub fn set_directed(&mut self, directed: bool) {
		self.is_directed = directed;
	}

	pub fn derived_adjacency_list(&self) -> Vec<Vec<usize>> {
		adjacency_list(&adjacency_matrix(&self.store, self.is_directed))
	}

	pub fn properties(&self) -> GraphProperties {
		analyze(
			&self.derived_adjacency_list(),
			self.store.vertex_count(),
			self.store.edge_count(),
			self.is_directed,
		)
	}

	pub fn representation(&self) -> RepresentationTables {
		let matrix = adjacency_matrix(&self.store, self.is_directed);
		let list = adjacency_list(&matrix);
		RepresentationTables {
			matrix,
			list,
			edges: edge_list(&self.store),
		}
	}

	/// Bookkeeping snapshot (stack or queue) recorded for the current step.
	pub fn current_record(&self) -> Option<&[usize]> {
		let step = self.player.visiting_step()?;
		self.player.traversal().records.get(step).map(Vec::as_slice)
	}

	pub fn color_indices(&self) -> Vec<Option<usize>> {
		component_color_indices(
			self.store.vertex_count(),
			&self.properties().connected_components,
		)
	}

	/// Topmost vertex under the pointer, if any.
	pub fn vertex_at(&self, x: f64, y: f64) -> Option<VertexId> {
		self.store
			.vertices()
			.iter()
			.rev()
			.find(|v| {
				let (dx, dy) = (v.x - x, v.y - y);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|v| v.id)
	}

	/// Edge whose drawn line passes under the pointer, if any.
	pub fn edge_at(&self, x: f64, y: f64) -> Option<(VertexId, VertexId)> {
		edge_lines(&self.store, self.is_directed)
			.into_iter()
			.find(|(_, line)| segment_distance(x, y, line) < EDGE_HIT_RADIUS)
			.map(|(edge, _)| (edge.source, edge.target))
	}

	pub fn pointer_down(&mut self, x: f64, y: f64, button: PointerButton, modifier: bool) {
		self.pressed_on_empty = false;
		if let Some(id) = self.vertex_at(x, y) {
			match button {
				PointerButton::Primary if modifier => {
					self.drag_vertex = Some(id);
					self.sim.begin_drag(&mut self.store, id, (x, y));
				}
				PointerButton::Primary if self.tree_mode => {
					self.store.add_leaf_vertex(id, (x, y));
				}
				PointerButton::Primary => {
					self.store.begin_draw_edge(button, id, (x, y));
				}
				PointerButton::Secondary if self.tree_mode => {
					self.store.remove_subtree(id);
				}
				PointerButton::Secondary => {
					self.store.remove_vertex(id);
				}
				PointerButton::Auxiliary => {}
			}
			return;
		}
		if let Some((source, target)) = self.edge_at(x, y) {
			if button == PointerButton::Secondary {
				self.store.remove_edge(source, target, self.is_directed);
			}
			return;
		}
		self.pressed_on_empty = button == PointerButton::Primary;
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let Some(id) = self.drag_vertex {
			self.sim.drag(&mut self.store, id, (x, y));
			return;
		}
		self.store.update_draw_edge((x, y));

		match self.vertex_at(x, y) {
			Some(id) => {
				self.store.highlight_vertex(id);
				self.store.unhighlight_edge();
			}
			None => {
				self.store.unhighlight_vertex();
				match self.edge_at(x, y) {
					Some((s, t)) => self.store.highlight_edge(s, t),
					None => self.store.unhighlight_edge(),
				}
			}
		}
	}

	pub fn pointer_up(&mut self, x: f64, y: f64, button: PointerButton) {
		if let Some(id) = self.drag_vertex.take() {
			self.sim.end_drag(&mut self.store, id);
			return;
		}
		if let Some(target) = self.vertex_at(x, y) {
			if self.store.has_pending_draw() {
				let weight = self.weighted.then(|| self.rng.next_index(10) as u32);
				self.store.end_draw_edge(target, self.is_directed, weight);
			}
		} else if self.pressed_on_empty && button == PointerButton::Primary && !self.tree_mode {
			self.store.add_vertex(button, (x, y));
		}
		self.store.hide_draw_edge();
		self.pressed_on_empty = false;
	}

	pub fn pointer_leave(&mut self) {
		if let Some(id) = self.drag_vertex.take() {
			self.sim.end_drag(&mut self.store, id);
		}
		self.store.hide_draw_edge();
		self.store.unhighlight_vertex();
		self.store.unhighlight_edge();
		self.pressed_on_empty = false;
	}

	pub fn generate_random(&mut self, vertex_count: usize, edge_count: usize) {
		let seed = self.rng.next_index(233280);
		let (vertices, edges) = generate_random_graph_data(
			vertex_count,
			edge_count,
			(self.width, self.height),
			seed,
		);
		self.store.replace(vertices, edges);
	}

	pub fn clear(&mut self) {
		self.store.clear();
		self.player.reset();
	}

	/// Short status line for the canvas overlay.
	pub fn summary(&self) -> String {
		let props = self.properties();
		let mut parts = vec![format!(
			"{} vertices, {} edges, {} components",
			self.store.vertex_count(),
			self.store.edge_count(),
			props.connected_components.len()
		)];
		if props.is_tree {
			parts.push("tree".into());
		} else if props.is_forest {
			parts.push("forest".into());
		}
		if props.has_cycle {
			parts.push("cyclic".into());
		}
		if props.is_complete {
			parts.push("complete".into());
		}
		if let Some(v) = self.player.visiting_vertex() {
			parts.push(format!("visiting {v}"));
		}
		parts.join(" / ")
	}
}

fn segment_distance(px: f64, py: f64, line: &EdgeLine) -> f64 {
	let (dx, dy) = (line.x2 - line.x1, line.y2 - line.y1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((px - line.x1) * dx + (py - line.y1) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (line.x1 + t * dx, line.y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn canvas(options: CanvasOptions) -> CanvasState {
		CanvasState::new(options, None, 800.0, 600.0)
	}

	#[test]
	fn click_gesture_adds_and_connects_vertices() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(200.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);
		assert_eq!(state.store.vertex_count(), 2);

		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_move(150.0, 100.0);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);
		assert_eq!(state.store.edge_count(), 1);
		assert!(!state.store.has_pending_draw());
	}

	#[test]
	fn releasing_over_empty_space_cancels_the_draw() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(400.0, 400.0, PointerButton::Primary);
		assert_eq!(state.store.edge_count(), 0);
		// The release did not land on a fresh press, so no vertex either.
		assert_eq!(state.store.vertex_count(), 1);
	}

	#[test]
	fn modifier_drag_pins_instead_of_drawing() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);

		state.pointer_down(100.0, 100.0, PointerButton::Primary, true);
		state.pointer_move(300.0, 300.0);
		assert_eq!(state.store.vertex(0).unwrap().fx, Some(300.0));
		state.pointer_up(300.0, 300.0, PointerButton::Primary);
		assert!(state.store.vertex(0).unwrap().fx.is_none());
	}

	#[test]
	fn secondary_click_removes_a_vertex() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(100.0, 100.0, PointerButton::Secondary, false);
		assert_eq!(state.store.vertex_count(), 0);
	}

	#[test]
	fn tree_mode_grows_leaves_from_the_root() {
		let mut state = canvas(CanvasOptions {
			tree_mode: true,
			..CanvasOptions::default()
		});
		assert_eq!(state.store.vertex_count(), 1);
		let root = state.store.vertices()[0].clone();
		state.pointer_down(root.x, root.y, PointerButton::Primary, false);
		assert_eq!(state.store.vertex_count(), 2);
		assert_eq!(state.store.edge_count(), 1);
		assert_eq!(state.store.vertices()[1].depth, 1);

		// Empty clicks do not add free vertices in tree mode.
		state.pointer_down(700.0, 500.0, PointerButton::Primary, false);
		state.pointer_up(700.0, 500.0, PointerButton::Primary);
		assert_eq!(state.store.vertex_count(), 2);
	}

	#[test]
	fn weighted_canvas_attaches_weights() {
		let mut state = canvas(CanvasOptions {
			weighted: true,
			..CanvasOptions::default()
		});
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(200.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);

		let weight = state.store.edges()[0].weight;
		assert!(weight.is_some_and(|w| w < 10));
	}

	#[test]
	fn frame_reheats_on_structural_change() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		for _ in 0..1000 {
			state.frame();
		}
		assert!(state.sim.is_settled());

		state.pointer_down(500.0, 400.0, PointerButton::Primary, false);
		state.pointer_up(500.0, 400.0, PointerButton::Primary);
		state.frame();
		assert!(!state.sim.is_settled());
	}

	#[test]
	fn traversal_source_feeds_the_player() {
		let source: TraversalSource =
			Arc::new(|list| Traversal::new((0..list.len()).collect(), Default::default()));
		let mut state = CanvasState::new(CanvasOptions::default(), Some(source), 800.0, 600.0);
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.frame();
		assert_eq!(state.player.traversal().order, vec![0]);

		state.player.go_next_step();
		assert_eq!(state.player.visiting_vertex(), Some(0));

		// A structural change swaps the traversal and resets playback.
		state.pointer_down(200.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);
		state.frame();
		assert_eq!(state.player.traversal().order, vec![0, 1]);
		assert_eq!(state.player.visiting_vertex(), None);
	}

	#[test]
	fn hover_follows_the_pointer() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);

		state.pointer_move(102.0, 101.0);
		assert_eq!(state.store.hover_vertex(), Some(0));
		state.pointer_move(400.0, 400.0);
		assert_eq!(state.store.hover_vertex(), None);
	}

	#[test]
	fn edge_hit_testing_uses_the_drawn_line() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(300.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(300.0, 100.0, PointerButton::Primary);
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(300.0, 100.0, PointerButton::Primary);

		assert_eq!(state.edge_at(200.0, 102.0), Some((0, 1)));
		assert_eq!(state.edge_at(200.0, 140.0), None);

		state.pointer_down(200.0, 102.0, PointerButton::Secondary, false);
		assert_eq!(state.store.edge_count(), 0);
	}

	#[test]
	fn representation_tables_track_the_graph() {
		let mut state = canvas(CanvasOptions::default());
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(100.0, 100.0, PointerButton::Primary);
		state.pointer_down(200.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);
		state.pointer_down(100.0, 100.0, PointerButton::Primary, false);
		state.pointer_up(200.0, 100.0, PointerButton::Primary);

		let tables = state.representation();
		assert_eq!(tables.matrix, vec![vec![0, 1], vec![1, 0]]);
		assert_eq!(tables.list, vec![vec![1], vec![0]]);
		assert_eq!(tables.edges, vec![(0, 1)]);

		state.set_directed(true);
		let tables = state.representation();
		assert_eq!(tables.matrix, vec![vec![0, 1], vec![0, 0]]);
		assert_eq!(tables.edges, vec![(0, 1)]);
	}

	#[test]
	fn current_record_follows_the_step() {
		let mut state = canvas(CanvasOptions::default());
		state.player.set_traversal(Traversal {
			order: vec![0, 1],
			walk: Default::default(),
			records: vec![vec![0], vec![0, 1]],
		});
		assert_eq!(state.current_record(), None);

		state.player.go_next_step();
		assert_eq!(state.current_record(), Some([0].as_slice()));
		state.player.go_next_step();
		assert_eq!(state.current_record(), Some([0, 1].as_slice()));
		state.player.go_next_step();
		assert_eq!(state.current_record(), None);
	}

	#[test]
	fn random_graph_replaces_the_store() {
		let mut state = canvas(CanvasOptions::default());
		state.generate_random(5, 100);
		assert_eq!(state.store.vertex_count(), 5);
		assert_eq!(state.store.edge_count(), 10);
		state.clear();
		assert_eq!(state.store.vertex_count(), 0);
	}
}
