use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, VERTEX_RADIUS};
use crate::graph::{Edge, EdgeLine, edge_lines};

// d3.schemeTableau10, the palette the component colors cycle through.
const COLORS: &[&str] = &[
	"#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
	"#9c755f", "#bab0ab",
];

const BACKGROUND: &str = "#fafafa";
const EDGE_COLOR: &str = "#9ca3af";
const EDGE_TRAVERSED: &str = "#1f2937";
const EDGE_HOVER: &str = "#ef4444";
const UNRANKED_VERTEX: &str = "#d1d5db";
const LABEL_COLOR: &str = "#374151";
const ARROW_SIZE: f64 = 8.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_pending_edge(state, ctx);
	draw_vertices(state, ctx);
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let directed = state.is_directed;
	let hover = state.store.hover_edge();

	for (edge, line) in edge_lines(&state.store, directed) {
		let is_hovered = hover.is_some_and(|(s, t)| {
			(s == edge.source && t == edge.target)
				|| (!directed && s == edge.target && t == edge.source)
		});
		let color = if is_hovered {
			EDGE_HOVER
		} else if is_traversed(state, &edge) {
			EDGE_TRAVERSED
		} else {
			EDGE_COLOR
		};

		let (dx, dy) = (line.x2 - line.x1, line.y2 - line.y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(1.5);
		ctx.begin_path();
		ctx.move_to(line.x1 + ux * VERTEX_RADIUS, line.y1 + uy * VERTEX_RADIUS);
		if directed {
			ctx.line_to(
				line.x2 - ux * (VERTEX_RADIUS + ARROW_SIZE),
				line.y2 - uy * (VERTEX_RADIUS + ARROW_SIZE),
			);
		} else {
			ctx.line_to(line.x2 - ux * VERTEX_RADIUS, line.y2 - uy * VERTEX_RADIUS);
		}
		ctx.stroke();

		if directed {
			draw_arrowhead(ctx, &line, (ux, uy), color);
		}

		if let Some(weight) = edge.weight {
			let (mx, my) = ((line.x1 + line.x2) / 2.0, (line.y1 + line.y2) / 2.0);
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font("11px sans-serif");
			let _ = ctx.fill_text(&weight.to_string(), mx + 4.0, my - 4.0);
		}
	}
}

fn is_traversed(state: &CanvasState, edge: &Edge) -> bool {
	let (Some(s), Some(t)) = (
		state.store.index_of(edge.source),
		state.store.index_of(edge.target),
	) else {
		return false;
	};
	state.player.is_edge_traversed(s, t, state.is_directed)
}

fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	line: &EdgeLine,
	(ux, uy): (f64, f64),
	color: &str,
) {
	let (tip_x, tip_y) = (line.x2 - ux * VERTEX_RADIUS, line.y2 - uy * VERTEX_RADIUS);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_pending_edge(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	if !state.store.has_pending_draw() {
		return;
	}
	let line = state.store.draw_line();
	ctx.set_stroke_style_str(EDGE_HOVER);
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(4.0),
	));
	ctx.begin_path();
	ctx.move_to(line.x1, line.y1);
	ctx.line_to(line.x2, line.y2);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_vertices(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let replaying = state.player.is_replaying();
	let color_indices = state.color_indices();
	let visiting = state.player.visiting_vertex();
	let hover = state.store.hover_vertex();

	for (index, vertex) in state.store.vertices().iter().enumerate() {
		// While a replay is in progress, color by visit state; otherwise by
		// connected component.
		let color = if replaying {
			if state.player.is_visited(index) {
				COLORS[1]
			} else {
				COLORS[0]
			}
		} else {
			match color_indices.get(index).copied().flatten() {
				Some(rank) => COLORS[rank % COLORS.len()],
				None => UNRANKED_VERTEX,
			}
		};

		ctx.begin_path();
		let _ = ctx.arc(vertex.x, vertex.y, VERTEX_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		if visiting == Some(index) || hover == Some(vertex.id) {
			ctx.begin_path();
			let _ = ctx.arc(vertex.x, vertex.y, VERTEX_RADIUS + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(if visiting == Some(index) {
				EDGE_TRAVERSED
			} else {
				EDGE_HOVER
			});
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(
			&vertex.id.to_string(),
			vertex.x + VERTEX_RADIUS + 3.0,
			vertex.y + 3.0,
		);
	}
}
