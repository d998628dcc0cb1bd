//! Draw-line computation for edges. In directed mode, antiparallel pairs are
//! offset along the perpendicular so both arrows stay visible.

use super::store::{Edge, GraphStore};

/// Perpendicular translation applied to each member of an antiparallel pair.
pub const PAIR_OFFSET: f64 = 6.0;
/// Coordinates closer than this count as axis-aligned.
pub const AXIS_EPSILON: f64 = 0.01;

/// Endpoint coordinates of one rendered edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Draw line for a single edge. Undirected edges and directed edges without
/// an antiparallel counterpart use the raw endpoints.
pub fn edge_line(store: &GraphStore, edge: &Edge, is_directed: bool) -> Option<EdgeLine> {
	let source = store.vertex(edge.source)?;
	let target = store.vertex(edge.target)?;
	let raw = EdgeLine {
		x1: source.x,
		y1: source.y,
		x2: target.x,
		y2: target.y,
	};
	if !is_directed || !store.contains_edge(edge.target, edge.source, true) {
		return Some(raw);
	}
	Some(offset_line(raw))
}

/// Draw lines for every stored edge, in storage order. Edges whose endpoints
/// no longer resolve are skipped.
pub fn edge_lines(store: &GraphStore, is_directed: bool) -> Vec<(Edge, EdgeLine)> {
	store
		.edges()
		.iter()
		.filter_map(|e| edge_line(store, e, is_directed).map(|line| (*e, line)))
		.collect()
}

/// Translates a line by [`PAIR_OFFSET`] along its perpendicular. The sign is
/// keyed to the y-order of the endpoints (x-order for horizontal lines), so
/// the two members of an antiparallel pair move to opposite sides.
fn offset_line(line: EdgeLine) -> EdgeLine {
	let EdgeLine { x1, y1, x2, y2 } = line;
	let (dx, dy) = (x2 - x1, y2 - y1);

	if dx.abs() < AXIS_EPSILON {
		// Vertical: shift along x.
		let shift = if dy > 0.0 { PAIR_OFFSET } else { -PAIR_OFFSET };
		return EdgeLine {
			x1: x1 + shift,
			y1,
			x2: x2 + shift,
			y2,
		};
	}
	if dy.abs() < AXIS_EPSILON {
		// Horizontal: shift along y.
		let shift = if dx > 0.0 { PAIR_OFFSET } else { -PAIR_OFFSET };
		return EdgeLine {
			x1,
			y1: y1 + shift,
			x2,
			y2: y2 + shift,
		};
	}

	// Perpendicular via the negative reciprocal slope. Both branches above
	// bound |dy| away from zero here.
	let perp = -dx / dy;
	let norm = (1.0 + perp * perp).sqrt();
	let sign = if y1 < y2 { 1.0 } else { -1.0 };
	let (ox, oy) = (
		sign * PAIR_OFFSET / norm,
		sign * PAIR_OFFSET * perp / norm,
	);
	EdgeLine {
		x1: x1 + ox,
		y1: y1 + oy,
		x2: x2 + ox,
		y2: y2 + oy,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::store::PointerButton;

	fn pair_store(a: (f64, f64), b: (f64, f64)) -> GraphStore {
		let mut store = GraphStore::new();
		store.add_vertex(PointerButton::Primary, a);
		store.add_vertex(PointerButton::Primary, b);
		store.begin_draw_edge(PointerButton::Primary, 0, a);
		store.end_draw_edge(1, true, None);
		store.begin_draw_edge(PointerButton::Primary, 1, b);
		store.end_draw_edge(0, true, None);
		store.hide_draw_edge();
		store
	}

	fn lines_of(store: &GraphStore, is_directed: bool) -> (EdgeLine, EdgeLine) {
		let lines = edge_lines(store, is_directed);
		assert_eq!(lines.len(), 2);
		(lines[0].1, lines[1].1)
	}

	fn length(line: &EdgeLine) -> f64 {
		((line.x2 - line.x1).powi(2) + (line.y2 - line.y1).powi(2)).sqrt()
	}

	#[test]
	fn undirected_uses_raw_endpoints() {
		let store = pair_store((0.0, 0.0), (10.0, 20.0));
		let (ab, ba) = lines_of(&store, false);
		assert_eq!(
			ab,
			EdgeLine {
				x1: 0.0,
				y1: 0.0,
				x2: 10.0,
				y2: 20.0
			}
		);
		assert_eq!((ba.x1, ba.y1), (10.0, 20.0));
	}

	#[test]
	fn unpaired_directed_edge_is_not_offset() {
		let mut store = GraphStore::new();
		store.add_vertex(PointerButton::Primary, (0.0, 0.0));
		store.add_vertex(PointerButton::Primary, (10.0, 5.0));
		store.begin_draw_edge(PointerButton::Primary, 0, (0.0, 0.0));
		store.end_draw_edge(1, true, None);
		let lines = edge_lines(&store, true);
		assert_eq!((lines[0].1.x1, lines[0].1.y1), (0.0, 0.0));
		assert_eq!((lines[0].1.x2, lines[0].1.y2), (10.0, 5.0));
	}

	#[test]
	fn antiparallel_pair_separates() {
		let store = pair_store((0.0, 0.0), (30.0, 40.0));
		let (ab, ba) = lines_of(&store, true);
		// The reversed line, reversed back, must not coincide with the
		// forward line.
		assert_ne!((ab.x1, ab.y1), (ba.x2, ba.y2));
		assert_ne!((ab.x2, ab.y2), (ba.x1, ba.y1));
		// Translation preserves length.
		assert!((length(&ab) - 50.0).abs() < 1e-9);
		assert!((length(&ba) - 50.0).abs() < 1e-9);
	}

	#[test]
	fn vertical_pair_offsets_along_x() {
		let store = pair_store((5.0, 0.0), (5.0, 100.0));
		let (ab, ba) = lines_of(&store, true);
		assert_eq!((ab.x1, ab.x2), (11.0, 11.0));
		assert_eq!((ba.x1, ba.x2), (-1.0, -1.0));
		assert_eq!((ab.y1, ab.y2), (0.0, 100.0));
	}

	#[test]
	fn horizontal_pair_offsets_along_y() {
		let store = pair_store((0.0, 7.0), (100.0, 7.0));
		let (ab, ba) = lines_of(&store, true);
		assert_eq!((ab.y1, ab.y2), (13.0, 13.0));
		assert_eq!((ba.y1, ba.y2), (1.0, 1.0));
	}

	#[test]
	fn near_coincident_endpoints_do_not_divide_by_zero() {
		let store = pair_store((1.0, 1.0), (1.005, 1.005));
		let (ab, ba) = lines_of(&store, true);
		assert!(ab.x1.is_finite() && ab.y1.is_finite());
		assert!(ba.x1.is_finite() && ba.y1.is_finite());
	}

	#[test]
	fn offset_is_perpendicular_to_the_line() {
		let store = pair_store((0.0, 0.0), (30.0, 40.0));
		let (ab, _) = lines_of(&store, true);
		let (ox, oy) = (ab.x1 - 0.0, ab.y1 - 0.0);
		// Dot product with the line direction vanishes.
		assert!((ox * 30.0 + oy * 40.0).abs() < 1e-9);
		assert!(((ox * ox + oy * oy).sqrt() - PAIR_OFFSET).abs() < 1e-9);
	}
}
