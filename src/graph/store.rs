use std::collections::HashSet;

/// Stable vertex identity, assigned monotonically and never reused while the
/// store lives.
pub type VertexId = usize;

/// Pointer button as reported by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Auxiliary,
	Secondary,
}

/// A graph vertex. `x`/`y` are the current layout position; `vx`/`vy` and the
/// `fx`/`fy` pin belong to the force simulation. `depth` is only meaningful
/// for tree-edited vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
	pub id: VertexId,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
	pub depth: usize,
}

impl Vertex {
	pub fn at(id: VertexId, x: f64, y: f64) -> Self {
		Self {
			id,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
			depth: 0,
		}
	}
}

/// An edge between two vertices, referenced by stable id. Equality is
/// structural: same ordered id pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: VertexId,
	pub target: VertexId,
	pub weight: Option<u32>,
}

/// Coordinates of the in-progress edge-draw line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Canonical mutable graph state: vertex/edge collections, hover tracking,
/// and the three-phase edge-draw gesture.
///
/// Invalid mutations (wrong button, duplicate edge, self loop, protected
/// root, unknown id) are silently ignored rather than signalled.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	vertices: Vec<Vertex>,
	edges: Vec<Edge>,
	hover_vertex: Option<VertexId>,
	hover_edge: Option<(VertexId, VertexId)>,
	pending_source: Option<VertexId>,
	draw_line: DrawLine,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
		self.vertices.iter().find(|v| v.id == id)
	}

	pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
		self.vertices.iter_mut().find(|v| v.id == id)
	}

	/// Position of `id` in the vertex sequence. Indices are recomputed slots,
	/// not identity; they shift on removal.
	pub fn index_of(&self, id: VertexId) -> Option<usize> {
		self.vertices.iter().position(|v| v.id == id)
	}

	pub fn vertices_mut(&mut self) -> &mut [Vertex] {
		&mut self.vertices
	}

	fn next_id(&self) -> VertexId {
		self.vertices.last().map_or(0, |v| v.id + 1)
	}

	/// Appends a vertex at the pointer position. No-op for non-primary
	/// buttons.
	pub fn add_vertex(&mut self, button: PointerButton, (x, y): (f64, f64)) {
		if button != PointerButton::Primary {
			return;
		}
		let id = self.next_id();
		self.vertices.push(Vertex::at(id, x, y));
	}

	/// Removes a vertex and every edge touching it, clearing any hover that
	/// referenced the removed elements.
	pub fn remove_vertex(&mut self, id: VertexId) {
		if self.hover_vertex == Some(id) {
			self.hover_vertex = None;
		}
		if self
			.hover_edge
			.is_some_and(|(s, t)| s == id || t == id)
		{
			self.hover_edge = None;
		}
		if self.pending_source == Some(id) {
			self.pending_source = None;
		}
		self.vertices.retain(|v| v.id != id);
		self.edges.retain(|e| e.source != id && e.target != id);
	}

	/// Appends a vertex one depth level below `parent`, slightly offset from
	/// the pointer position, and connects `parent -> new`.
	pub fn add_leaf_vertex(&mut self, parent: VertexId, (x, y): (f64, f64)) {
		let Some(depth) = self.vertex(parent).map(|p| p.depth + 1) else {
			return;
		};
		let id = self.next_id();
		let mut leaf = Vertex::at(id, x, y + 10.0);
		leaf.depth = depth;
		self.vertices.push(leaf);
		self.edges.push(Edge {
			source: parent,
			target: id,
			weight: None,
		});
	}

	/// Removes `root` and every descendant reachable through `source` edges.
	/// The designated tree root (id 0) is protected.
	pub fn remove_subtree(&mut self, root: VertexId) {
		if root == 0 || self.vertex(root).is_none() {
			return;
		}
		// Collect the whole subtree before mutating anything.
		let mut doomed = vec![root];
		let mut seen: HashSet<VertexId> = doomed.iter().copied().collect();
		let mut cursor = 0;
		while cursor < doomed.len() {
			let node = doomed[cursor];
			cursor += 1;
			for edge in self.edges.iter().filter(|e| e.source == node) {
				if seen.insert(edge.target) {
					doomed.push(edge.target);
				}
			}
		}
		for id in doomed {
			self.remove_vertex(id);
		}
	}

	pub fn hover_vertex(&self) -> Option<VertexId> {
		self.hover_vertex
	}

	pub fn hover_edge(&self) -> Option<(VertexId, VertexId)> {
		self.hover_edge
	}

	pub fn highlight_vertex(&mut self, id: VertexId) {
		if self.vertex(id).is_some() {
			self.hover_vertex = Some(id);
		}
	}

	pub fn unhighlight_vertex(&mut self) {
		self.hover_vertex = None;
	}

	pub fn highlight_edge(&mut self, source: VertexId, target: VertexId) {
		if self.find_edge(source, target).is_some() {
			self.hover_edge = Some((source, target));
		}
	}

	pub fn unhighlight_edge(&mut self) {
		self.hover_edge = None;
	}

	/// Whether an edge connects the pair under the given equality rule.
	/// Directed: exact ordered match. Undirected: either direction.
	pub fn contains_edge(&self, a: VertexId, b: VertexId, is_directed: bool) -> bool {
		self.edges.iter().any(|e| {
			(e.source == a && e.target == b)
				|| (!is_directed && e.source == b && e.target == a)
		})
	}

	fn find_edge(&self, source: VertexId, target: VertexId) -> Option<usize> {
		self.edges
			.iter()
			.position(|e| e.source == source && e.target == target)
	}

	pub fn pending_source(&self) -> Option<VertexId> {
		self.pending_source
	}

	pub fn has_pending_draw(&self) -> bool {
		self.pending_source.is_some()
	}

	pub fn draw_line(&self) -> DrawLine {
		self.draw_line
	}

	/// Starts the edge-draw gesture from `source`, anchoring the drag line at
	/// the vertex position. Primary button only.
	pub fn begin_draw_edge(&mut self, button: PointerButton, source: VertexId, (x, y): (f64, f64)) {
		if button != PointerButton::Primary {
			return;
		}
		let Some(v) = self.vertex(source) else {
			return;
		};
		self.draw_line = DrawLine {
			x1: v.x,
			y1: v.y,
			x2: x,
			y2: y,
		};
		self.pending_source = Some(source);
	}

	/// Moves the free end of the drag line. No-op unless a draw is pending.
	/// The anchored end tracks the source vertex, which the simulation may
	/// still be moving.
	pub fn update_draw_edge(&mut self, (x, y): (f64, f64)) {
		let Some(source) = self.pending_source else {
			return;
		};
		let (x1, y1) = self.vertex(source).map_or((x, y), |v| (v.x, v.y));
		self.draw_line = DrawLine { x1, y1, x2: x, y2: y };
	}

	/// Commits the pending draw as an edge to `target`, unless there is no
	/// pending draw, the target is the source, or the pair is already
	/// connected under the current equality rule. The pending source is kept,
	/// so a repeated commit is rejected as a duplicate.
	pub fn end_draw_edge(&mut self, target: VertexId, is_directed: bool, weight: Option<u32>) {
		let Some(source) = self.pending_source else {
			return;
		};
		if source == target || self.vertex(target).is_none() {
			return;
		}
		if self.contains_edge(source, target, is_directed) {
			return;
		}
		self.edges.push(Edge {
			source,
			target,
			weight: weight.map(|w| w % 10),
		});
	}

	/// Cancels a pending edge draw without committing.
	pub fn hide_draw_edge(&mut self) {
		self.pending_source = None;
	}

	/// Removes the edge `source -> target`; in undirected mode the reverse
	/// entry goes with it. Clears the edge hover if it referenced either
	/// direction of the removed pair.
	pub fn remove_edge(&mut self, source: VertexId, target: VertexId, is_directed: bool) {
		let Some(i) = self.find_edge(source, target) else {
			return;
		};
		self.edges.remove(i);
		if !is_directed {
			if let Some(j) = self.find_edge(target, source) {
				self.edges.remove(j);
			}
		}
		if self.hover_edge.is_some_and(|(s, t)| {
			(s == source && t == target) || (!is_directed && s == target && t == source)
		}) {
			self.hover_edge = None;
		}
	}

	/// Drops every vertex and edge along with any gesture state.
	pub fn clear(&mut self) {
		self.replace(Vec::new(), Vec::new());
	}

	/// Replaces the whole graph. Callers must hand over edges whose endpoint
	/// ids are all present in `vertices`.
	pub(crate) fn replace(&mut self, vertices: Vec<Vertex>, edges: Vec<Edge>) {
		self.vertices = vertices;
		self.edges = edges;
		self.hover_vertex = None;
		self.hover_edge = None;
		self.pending_source = None;
		self.draw_line = DrawLine::default();
	}
}
