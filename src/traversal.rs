//! Playback state machine for a precomputed traversal.
//!
//! The traversal itself comes from an external algorithm (DFS, BFS, ...); the
//! player only replays it: one vertex per step, forward or backward, with an
//! optional timed auto-advance driven by the presentation layer.

use std::collections::HashSet;
use std::time::Duration;

/// Auto-advance period used by the playback controls.
pub const DEFAULT_PLAY_INTERVAL: Duration = Duration::from_millis(500);

/// One algorithm run: visit order over vertex indices, the set of directed
/// index pairs actually walked, and optional per-step bookkeeping snapshots
/// (a stack or queue, depending on the algorithm).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Traversal {
	pub order: Vec<usize>,
	pub walk: HashSet<(usize, usize)>,
	pub records: Vec<Vec<usize>>,
}

impl Traversal {
	pub fn new(order: Vec<usize>, walk: HashSet<(usize, usize)>) -> Self {
		Self {
			order,
			walk,
			records: Vec::new(),
		}
	}
}

/// Steps through a [`Traversal`]: `Idle` (nothing visiting) or `Stepping(i)`
/// over positions of the visit order. Stepping past the last entry, or back
/// past the first, returns to `Idle` and clears the visited set.
#[derive(Clone, Debug, Default)]
pub struct TraversalPlayer {
	traversal: Traversal,
	/// Position within `traversal.order`, `None` while idle.
	visiting: Option<usize>,
	visited: HashSet<usize>,
	playing: bool,
}

impl TraversalPlayer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn traversal(&self) -> &Traversal {
		&self.traversal
	}

	/// Swaps in a new traversal. Any change resets playback to `Idle` and
	/// clears the visited set, discarding the in-flight position.
	pub fn set_traversal(&mut self, traversal: Traversal) {
		if self.traversal == traversal {
			return;
		}
		self.traversal = traversal;
		self.reset();
	}

	pub fn reset(&mut self) {
		self.visiting = None;
		self.visited.clear();
	}

	/// Position of the current step within the traversal order.
	pub fn visiting_step(&self) -> Option<usize> {
		self.visiting
	}

	/// Vertex index currently being visited.
	pub fn visiting_vertex(&self) -> Option<usize> {
		self.visiting.map(|i| self.traversal.order[i])
	}

	pub fn visited(&self) -> &HashSet<usize> {
		&self.visited
	}

	pub fn is_visited(&self, vertex_index: usize) -> bool {
		self.visited.contains(&vertex_index)
	}

	/// Whether the walk traversed `source -> target` (either direction in
	/// undirected mode) and both endpoints have been visited so far.
	pub fn is_edge_traversed(&self, source: usize, target: usize, is_directed: bool) -> bool {
		self.visited.contains(&source)
			&& self.visited.contains(&target)
			&& (self.traversal.walk.contains(&(source, target))
				|| (!is_directed && self.traversal.walk.contains(&(target, source))))
	}

	/// Advances one step; from the last step the player wraps back to `Idle`.
	pub fn go_next_step(&mut self) {
		let next = match self.visiting {
			None => 0,
			Some(i) => i + 1,
		};
		if next >= self.traversal.order.len() {
			self.reset();
			return;
		}
		self.visiting = Some(next);
		self.visited.insert(self.traversal.order[next]);
	}

	/// Steps backward; no-op while idle.
	pub fn go_prev_step(&mut self) {
		let Some(i) = self.visiting else {
			return;
		};
		self.visited.remove(&self.traversal.order[i]);
		if i == 0 {
			self.reset();
		} else {
			self.visiting = Some(i - 1);
		}
	}

	/// Flips the auto-play flag and returns the new value. The repeating
	/// timer that fires [`Self::go_next_step`] lives with the caller; this
	/// flag only records whether it should be running.
	pub fn toggle_play(&mut self) -> bool {
		self.playing = !self.playing;
		self.playing
	}

	pub fn is_playing(&self) -> bool {
		self.playing
	}

	/// Whether a replay is in progress: a current step, or visit residue not
	/// yet cleared. Idle players with a loaded traversal are not replaying.
	pub fn is_replaying(&self) -> bool {
		self.visiting.is_some() || !self.visited.is_empty()
	}
}
