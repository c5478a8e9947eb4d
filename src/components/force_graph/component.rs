use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::engine::{EngineSlot, LayoutEngine};
use super::options::LayoutOptions;
use super::types::EngineEvent;
use crate::graph::VisualModel;

/// Screen pixels moved per arrow key or navigation button press.
const PAN_STEP: f64 = 60.0;
const ZOOM_STEP: f64 = 1.1;

/// Camera moves shared by the keyboard and the navigation buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
enum NavAction {
	/// Move the view by screen pixels.
	Pan(f64, f64),
	Zoom(f64),
	Fit,
}

impl NavAction {
	fn from_key(key: &str) -> Option<Self> {
		Some(match key {
			"ArrowUp" => Self::Pan(0.0, PAN_STEP),
			"ArrowDown" => Self::Pan(0.0, -PAN_STEP),
			"ArrowLeft" => Self::Pan(PAN_STEP, 0.0),
			"ArrowRight" => Self::Pan(-PAN_STEP, 0.0),
			"+" | "=" => Self::Zoom(ZOOM_STEP),
			"-" | "_" => Self::Zoom(1.0 / ZOOM_STEP),
			"0" | "f" => Self::Fit,
			_ => return None,
		})
	}

	fn apply(self, engine: &LayoutEngine) {
		match self {
			Self::Pan(dx, dy) => engine.with_state(|s| s.pan_by(dx, dy)),
			Self::Zoom(factor) => engine.with_state(|s| s.zoom_by(factor)),
			Self::Fit => engine.fit(),
		}
	}
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Match the canvas backing store to its container.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

/// Force-directed rendering of a [`VisualModel`].
///
/// Every new model tears down the previous layout and builds a fresh one.
/// Clicks are reported through `on_node_click` / `on_background_click`;
/// the highlighted node follows `selected`. Incrementing `fit_request`
/// re-frames the camera. The canvas fills its container and follows window
/// resizes; the layout is torn down when the component unmounts.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] model: Signal<Option<Arc<VisualModel>>>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] fit_request: Signal<u32>,
	#[prop(into)] on_node_click: Callback<String>,
	#[prop(into)] on_background_click: Callback<()>,
	#[prop(optional)] options: LayoutOptions,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: EngineSlot = EngineSlot::default();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let interaction = options.interaction;

	let engine_render = engine.clone();
	Effect::new(move |_| {
		let model = model.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(model) = model else {
			engine_render.destroy();
			return;
		};
		fit_to_parent(&canvas);
		if let Err(err) = engine_render.render(&canvas, &model, &options) {
			warn!("could not start layout engine: {:?}", err);
			return;
		}
		let current = selected.get_untracked();
		engine_render.with(|e| e.select(current.as_deref()));
	});

	let engine_selected = engine.clone();
	Effect::new(move |_| {
		let id = selected.get();
		engine_selected.with(|e| match id.as_deref() {
			Some(id) => e.select(Some(id)),
			None => e.unselect_all(),
		});
	});

	let engine_fit = engine.clone();
	Effect::new(move |prev: Option<u32>| {
		let request = fit_request.get();
		if prev.is_some() {
			engine_fit.with(|e| e.fit());
		}
		request
	});

	let (engine_resize, resize_init) = (engine.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if resize_init.borrow().is_some() {
			return;
		}
		let engine_resize = engine_resize.clone();
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = fit_to_parent(&canvas);
			engine_resize.with(|e| e.with_state(|s| s.resize(nw, nh)));
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), resize_init.borrow().as_ref()) {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	// The animation loop keeps itself alive, so it must be stopped explicitly.
	let teardown = StoredValue::new_local((engine.clone(), resize_cb));
	on_cleanup(move || {
		teardown.try_with_value(|(engine, resize_cb)| {
			engine.destroy();
			if let (Some(window), Some(cb)) = (web_sys::window(), resize_cb.borrow_mut().take()) {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		});
	});

	let engine_md = engine.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		engine_md.with(|e| e.with_state(|s| s.press(x, y)));
	};

	let engine_mm = engine.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		engine_mm.with(|e| e.with_state(|s| s.motion(x, y)));
	};

	let engine_mu = engine.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		// Callbacks run after the engine borrow is released.
		let event = engine_mu.with(|e| e.with_state(|s| s.release(x, y))).flatten();
		match event {
			Some(EngineEvent::NodeClick(id)) => on_node_click.run(id),
			Some(EngineEvent::BackgroundClick) => on_background_click.run(()),
			None => {}
		}
	};

	let engine_ml = engine.clone();
	let on_mouseleave = move |_: MouseEvent| {
		engine_ml.with(|e| e.with_state(|s| s.leave()));
	};

	let engine_wh = engine.clone();
	let on_wheel = move |ev: WheelEvent| {
		if !interaction.zoom {
			return;
		}
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let factor = if ev.delta_y() > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
		engine_wh.with(|e| e.with_state(|s| s.zoom_at(x, y, factor)));
	};

	let engine_kd = engine.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if !interaction.keyboard {
			return;
		}
		if let Some(action) = NavAction::from_key(&ev.key()) {
			ev.prevent_default();
			engine_kd.with(|e| action.apply(e));
		}
	};

	let nav = move |action: NavAction| {
		let engine = engine.clone();
		move |_: MouseEvent| {
			engine.with(|e| action.apply(e));
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:keydown=on_keydown
				style="display: block; cursor: grab; outline: none;"
			/>
			{interaction
				.navigation_buttons
				.then(|| {
					view! {
						<div class="graph-nav">
							<button title="Pan up" on:click=nav(NavAction::Pan(0.0, PAN_STEP))>"▲"</button>
							<button title="Pan left" on:click=nav(NavAction::Pan(PAN_STEP, 0.0))>"◀"</button>
							<button title="Pan right" on:click=nav(NavAction::Pan(-PAN_STEP, 0.0))>"▶"</button>
							<button title="Pan down" on:click=nav(NavAction::Pan(0.0, -PAN_STEP))>"▼"</button>
							<button title="Zoom in" on:click=nav(NavAction::Zoom(ZOOM_STEP))>"+"</button>
							<button title="Zoom out" on:click=nav(NavAction::Zoom(1.0 / ZOOM_STEP))>"−"</button>
							<button title="Fit to view" on:click=nav(NavAction::Fit)>"⤢"</button>
						</div>
					}
				})}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_keys_map_to_navigation() {
		assert_eq!(NavAction::from_key("ArrowUp"), Some(NavAction::Pan(0.0, PAN_STEP)));
		assert_eq!(NavAction::from_key("ArrowRight"), Some(NavAction::Pan(-PAN_STEP, 0.0)));
		assert_eq!(NavAction::from_key("+"), Some(NavAction::Zoom(ZOOM_STEP)));
		assert_eq!(NavAction::from_key("-"), Some(NavAction::Zoom(1.0 / ZOOM_STEP)));
		assert_eq!(NavAction::from_key("f"), Some(NavAction::Fit));
		assert_eq!(NavAction::from_key("q"), None);
	}
}
