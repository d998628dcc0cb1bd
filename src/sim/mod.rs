//! Iterative force-directed layout over the store's vertices.
//!
//! The solver is advanced one step per animation tick by the caller and never
//! blocks. It keeps no references into the graph between ticks; link indices
//! and degrees are re-derived from the store on every step, so vertices and
//! edges may be added or removed mid-simulation.

use crate::graph::store::{GraphStore, VertexId};

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.4;
/// Temperature after a structural change or resize.
const REHEAT_ALPHA: f64 = 0.5;
/// Target temperature held while a vertex is dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Stand-in displacement for exactly coincident vertices.
const JIGGLE: f64 = 1e-6;

/// Force parameters. Ratios are fractions of the current viewport.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
	pub link_distance: f64,
	/// Per-link strength; `None` means `1 / min(deg(source), deg(target))`.
	pub link_strength: Option<f64>,
	pub link_iterations: usize,
	pub charge_strength: f64,
	/// Repulsion is cut off beyond this fraction of `min(width, height)`.
	pub charge_distance_max_ratio: f64,
	pub force_x_ratio: f64,
	pub force_x_strength: f64,
	pub force_y_ratio: f64,
	pub force_y_strength: f64,
	/// Rooted-tree mode: hold vertex 0 at the horizontal viewport center.
	pub pin_root_x: bool,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 40.0,
			link_strength: None,
			link_iterations: 1,
			charge_strength: -200.0,
			charge_distance_max_ratio: 0.5,
			force_x_ratio: 0.5,
			force_x_strength: 0.1,
			force_y_ratio: 0.5,
			force_y_strength: 0.1,
			pin_root_x: false,
		}
	}
}

/// The force simulation. Cooling follows the usual alpha scheme: each tick
/// moves `alpha` toward `alpha_target` by a fixed decay fraction, and the
/// solver goes quiescent once `alpha` falls below the minimum with a zero
/// target.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: LayoutConfig,
	alpha: f64,
	alpha_decay: f64,
	alpha_target: f64,
	width: f64,
	height: f64,
}

impl Simulation {
	pub fn new(config: LayoutConfig, width: f64, height: f64) -> Self {
		Self {
			config,
			alpha: 1.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			alpha_target: 0.0,
			width,
			height,
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	/// Raises the temperature after a structural change.
	pub fn reheat(&mut self) {
		self.alpha = REHEAT_ALPHA;
	}

	/// Adopts new viewport dimensions. Force targets and the repulsion
	/// cutoff derive from these on every tick, so a reheat is all that is
	/// needed beyond recording them.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.reheat();
	}

	/// Freezes the simulation until the next reheat.
	pub fn stop(&mut self) {
		self.alpha = 0.0;
		self.alpha_target = 0.0;
	}

	/// Pins a vertex at the pointer and keeps the simulation warm while the
	/// drag lasts.
	pub fn begin_drag(&mut self, store: &mut GraphStore, id: VertexId, (x, y): (f64, f64)) {
		let Some(v) = store.vertex_mut(id) else {
			return;
		};
		v.fx = Some(x);
		v.fy = Some(y);
		self.alpha_target = DRAG_ALPHA_TARGET;
	}

	pub fn drag(&mut self, store: &mut GraphStore, id: VertexId, (x, y): (f64, f64)) {
		let Some(v) = store.vertex_mut(id) else {
			return;
		};
		v.fx = Some(x);
		v.fy = Some(y);
	}

	/// Releases the pin; the temperature decays back to zero.
	pub fn end_drag(&mut self, store: &mut GraphStore, id: VertexId) {
		if let Some(v) = store.vertex_mut(id) {
			v.fx = None;
			v.fy = None;
		}
		self.alpha_target = 0.0;
	}

	/// Advances the simulation one step. Returns `false` without touching the
	/// graph when there is nothing to do (no vertices, or fully settled).
	pub fn tick(&mut self, store: &mut GraphStore) -> bool {
		if store.vertex_count() == 0 || self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		let (links, degrees) = self.bind_links(store);
		self.apply_link_force(store, &links, &degrees);
		self.apply_charge_force(store);
		self.apply_positioning_forces(store);
		self.integrate(store);
		true
	}

	/// Resolves edges to index pairs against the current vertex sequence.
	/// Edges with a missing endpoint are skipped rather than trusted.
	fn bind_links(&self, store: &GraphStore) -> (Vec<(usize, usize)>, Vec<usize>) {
		let mut links = Vec::with_capacity(store.edge_count());
		let mut degrees = vec![0usize; store.vertex_count()];
		for edge in store.edges() {
			let (Some(s), Some(t)) = (store.index_of(edge.source), store.index_of(edge.target))
			else {
				continue;
			};
			links.push((s, t));
			degrees[s] += 1;
			degrees[t] += 1;
		}
		(links, degrees)
	}

	fn apply_link_force(
		&self,
		store: &mut GraphStore,
		links: &[(usize, usize)],
		degrees: &[usize],
	) {
		let alpha = self.alpha;
		let config = &self.config;
		let vertices = store.vertices_mut();
		for _ in 0..config.link_iterations {
			for &(s, t) in links {
				let (sx, sy) = (vertices[s].x + vertices[s].vx, vertices[s].y + vertices[s].vy);
				let (tx, ty) = (vertices[t].x + vertices[t].vx, vertices[t].y + vertices[t].vy);
				let (mut dx, mut dy) = (tx - sx, ty - sy);
				if dx == 0.0 && dy == 0.0 {
					dx = JIGGLE;
					dy = -JIGGLE;
				}
				let len = (dx * dx + dy * dy).sqrt();
				let strength = config
					.link_strength
					.unwrap_or_else(|| 1.0 / degrees[s].min(degrees[t]) as f64);
				let pull = (len - config.link_distance) / len * alpha * strength;
				dx *= pull;
				dy *= pull;

				let bias = degrees[s] as f64 / (degrees[s] + degrees[t]) as f64;
				vertices[t].vx -= dx * bias;
				vertices[t].vy -= dy * bias;
				vertices[s].vx += dx * (1.0 - bias);
				vertices[s].vy += dy * (1.0 - bias);
			}
		}
	}

	/// Pairwise many-body repulsion with a viewport-relative cutoff. The
	/// graphs here stay small, so no Barnes-Hut approximation.
	fn apply_charge_force(&self, store: &mut GraphStore) {
		let alpha = self.alpha;
		let strength = self.config.charge_strength;
		let max2 = (self.width.min(self.height) * self.config.charge_distance_max_ratio).powi(2);
		let vertices = store.vertices_mut();
		let n = vertices.len();
		for i in 0..n {
			let (xi, yi) = (vertices[i].x, vertices[i].y);
			let (mut ax, mut ay) = (0.0, 0.0);
			for (j, other) in vertices.iter().enumerate() {
				if j == i {
					continue;
				}
				let (mut dx, mut dy) = (other.x - xi, other.y - yi);
				let mut len2 = dx * dx + dy * dy;
				if max2 > 0.0 && len2 >= max2 {
					continue;
				}
				if len2 == 0.0 {
					dx = JIGGLE;
					dy = -JIGGLE;
					len2 = dx * dx + dy * dy;
				}
				// Soften below unit distance to stop the force exploding.
				if len2 < 1.0 {
					len2 = len2.sqrt();
				}
				let weight = strength * alpha / len2;
				ax += dx * weight;
				ay += dy * weight;
			}
			vertices[i].vx += ax;
			vertices[i].vy += ay;
		}
	}

	fn apply_positioning_forces(&self, store: &mut GraphStore) {
		let alpha = self.alpha;
		let config = &self.config;
		let cx = self.width * config.force_x_ratio;
		let cy = self.height * config.force_y_ratio;
		let root_x = self.width * 0.5;
		for v in store.vertices_mut() {
			let (target_x, strength_x) = if config.pin_root_x && v.id == 0 {
				(root_x, 1.0)
			} else {
				(cx, config.force_x_strength)
			};
			v.vx += (target_x - v.x) * strength_x * alpha;
			v.vy += (cy - v.y) * config.force_y_strength * alpha;
		}
	}

	fn integrate(&self, store: &mut GraphStore) {
		let keep = 1.0 - VELOCITY_DECAY;
		for v in store.vertices_mut() {
			v.vx *= keep;
			v.vy *= keep;
			match v.fx {
				Some(fx) => {
					v.x = fx;
					v.vx = 0.0;
				}
				None => v.x += v.vx,
			}
			match v.fy {
				Some(fy) => {
					v.y = fy;
					v.vy = 0.0;
				}
				None => v.y += v.vy,
			}
		}
	}
}
