use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::{CanvasOptions, CanvasState, RepresentationTables, TraversalSource};
use crate::graph::PointerButton;
use crate::traversal::DEFAULT_PLAY_INTERVAL;

type SharedState = Rc<RefCell<Option<CanvasState>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn button_of(ev: &MouseEvent) -> PointerButton {
	match ev.button() {
		0 => PointerButton::Primary,
		1 => PointerButton::Auxiliary,
		_ => PointerButton::Secondary,
	}
}

fn canvas_coords(canvas_ref: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn stop_interval(handle: &Rc<Cell<Option<i32>>>, cb: &SharedClosure) {
	if let Some(id) = handle.take() {
		if let Some(win) = web_sys::window() {
			win.clear_interval_with_handle(id);
		}
	}
	cb.borrow_mut().take();
}

/// Interactive graph editor canvas. Owns its graph store, layout simulation
/// and traversal playback; independent instances never share state.
#[component]
pub fn GraphCanvas(
	#[prop(default = false)] directed: bool,
	#[prop(default = false)] can_toggle_directed: bool,
	#[prop(default = false)] tree_mode: bool,
	#[prop(default = false)] weighted: bool,
	#[prop(default = false)] show_random_button: bool,
	#[prop(default = false)] show_algorithm_controls: bool,
	#[prop(default = false)] show_representation: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] traversal_source: Option<TraversalSource>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let interval_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let interval_cb: SharedClosure = Rc::new(RefCell::new(None));
	let running = Rc::new(Cell::new(true));

	let directed_sig = RwSignal::new(directed);
	let playing_sig = RwSignal::new(false);
	let summary_sig = RwSignal::new(String::new());
	let tables_sig = RwSignal::new(RepresentationTables::default());
	let record_sig = RwSignal::new(String::new());

	let (state_init, animate_init, resize_cb_init, running_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		running.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		// The surface's CSS box is authoritative; the backing store follows it.
		let measure = move |canvas: &HtmlCanvasElement| {
			(
				width.unwrap_or_else(|| f64::from(canvas.client_width()).max(1.0)),
				height.unwrap_or_else(|| f64::from(canvas.client_height()).max(1.0)),
			)
		};
		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: web_sys::CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let options = CanvasOptions {
			directed: directed_sig.get_untracked(),
			tree_mode,
			weighted,
		};
		*state_init.borrow_mut() = Some(CanvasState::new(
			options,
			traversal_source.clone(),
			w,
			h,
		));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = measure(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, running_anim) = (
			state_init.clone(),
			animate_init.clone(),
			running_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.frame();
				render::render(s, &ctx);
				let line = s.summary();
				if summary_sig.with_untracked(|cur| cur != &line) {
					summary_sig.set(line);
				}
				if show_representation {
					let tables = s.representation();
					if tables_sig.with_untracked(|cur| cur != &tables) {
						tables_sig.set(tables);
					}
				}
				if show_algorithm_controls {
					let record = s
						.current_record()
						.map(|r| format!("{r:?}"))
						.unwrap_or_default();
					if record_sig.with_untracked(|cur| cur != &record) {
						record_sig.set(record);
					}
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Mode toggles flow from the signal into the canvas state.
	let state_dir = state.clone();
	Effect::new(move |_| {
		let d = directed_sig.get();
		if let Some(ref mut s) = *state_dir.borrow_mut() {
			s.set_directed(d);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(&canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y, button_of(&ev), ev.ctrl_key() || ev.meta_key());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(&canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(&canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up(x, y, button_of(&ev));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let on_toggle_directed = move |_: MouseEvent| {
		directed_sig.update(|d| *d = !*d);
	};

	let state_rand = state.clone();
	let on_random = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rand.borrow_mut() {
			s.generate_random(8, 10);
		}
	};

	let state_clear = state.clone();
	let on_clear = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_clear.borrow_mut() {
			s.clear();
		}
	};

	let state_prev = state.clone();
	let on_prev = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_prev.borrow_mut() {
			s.player.go_prev_step();
		}
	};

	let state_next = state.clone();
	let on_next = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_next.borrow_mut() {
			s.player.go_next_step();
		}
	};

	let (state_play, interval_play, interval_cb_play) =
		(state.clone(), interval_id.clone(), interval_cb.clone());
	let on_play = move |_: MouseEvent| {
		let now_playing = {
			let Some(ref mut s) = *state_play.borrow_mut() else {
				return;
			};
			s.player.toggle_play()
		};
		playing_sig.set(now_playing);
		if !now_playing {
			stop_interval(&interval_play, &interval_cb_play);
			return;
		}
		let state_tick = state_play.clone();
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			if let Some(ref mut s) = *state_tick.borrow_mut() {
				s.player.go_next_step();
			}
		});
		if let Some(win) = web_sys::window() {
			if let Ok(id) = win.set_interval_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				DEFAULT_PLAY_INTERVAL.as_millis() as i32,
			) {
				interval_play.set(Some(id));
			}
		}
		*interval_cb_play.borrow_mut() = Some(cb);
	};

	// Teardown must stop the timers deterministically; the animate closure
	// itself stays alive so an already scheduled frame can still land.
	let cleanup_captures = send_wrapper::SendWrapper::new((
		interval_id.clone(),
		interval_cb.clone(),
		resize_cb.clone(),
		running,
	));
	on_cleanup(move || {
		let (interval_cleanup, interval_cb_cleanup, resize_cleanup, running) =
			cleanup_captures.take();
		running.set(false);
		stop_interval(&interval_cleanup, &interval_cb_cleanup);
		if let Some(cb) = resize_cleanup.borrow_mut().take() {
			if let Some(win) = web_sys::window() {
				let _ = win
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	view! {
		<div class="graph-canvas">
			<div class="graph-toolbar">
				{can_toggle_directed
					.then(|| {
						view! {
							<button on:click=on_toggle_directed>
								{move || if directed_sig.get() { "Directed" } else { "Undirected" }}
							</button>
						}
					})}
				{show_random_button
					.then(|| view! { <button on:click=on_random>"Random graph"</button> })}
				<button on:click=on_clear>"Clear"</button>
				{show_algorithm_controls
					.then(|| {
						view! {
							<button on:click=on_prev>"Prev"</button>
							<button on:click=on_next>"Next"</button>
							<button on:click=on_play>
								{move || if playing_sig.get() { "Pause" } else { "Play" }}
							</button>
							<span class="graph-record">{move || record_sig.get()}</span>
						}
					})}
			</div>
			<canvas
				node_ref=canvas_ref
				class="graph-canvas-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:contextmenu=|ev: MouseEvent| ev.prevent_default()
			/>
			<p class="graph-summary">{move || summary_sig.get()}</p>
			{show_representation
				.then(|| {
					view! {
						<div class="graph-tables">
							<div>
								<h3>"Adjacency matrix"</h3>
								<table>
									<tbody>
										{move || {
											tables_sig
												.get()
												.matrix
												.into_iter()
												.map(|row| {
													view! {
														<tr>
															{row
																.into_iter()
																.map(|cell| view! { <td>{cell}</td> })
																.collect_view()}
														</tr>
													}
												})
												.collect_view()
										}}
									</tbody>
								</table>
							</div>
							<div>
								<h3>"Adjacency list"</h3>
								<table>
									<tbody>
										{move || {
											tables_sig
												.get()
												.list
												.into_iter()
												.enumerate()
												.map(|(i, neighbors)| {
													view! {
														<tr>
															<th>{i}</th>
															<td>{format!("{neighbors:?}")}</td>
														</tr>
													}
												})
												.collect_view()
										}}
									</tbody>
								</table>
							</div>
							<div>
								<h3>"Edge list"</h3>
								<ul>
									{move || {
										tables_sig
											.get()
											.edges
											.into_iter()
											.map(|(s, t)| view! { <li>{format!("({s}, {t})")}</li> })
											.collect_view()
									}}
								</ul>
							</div>
						</div>
					}
				})}
		</div>
	}
}
