//! A live layout: simulation state, its animation loop and the deferred
//! fit-to-view.
//!
//! Only one engine may drive a canvas. [`EngineSlot::render`] destroys the
//! previous engine before constructing the next one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::options::LayoutOptions;
use super::render;
use super::state::{FRAME_DT, ForceGraphState};
use super::viewport::FIT_DELAY_MS;
use crate::graph::VisualModel;

pub struct LayoutEngine {
	state: Rc<RefCell<ForceGraphState>>,
	alive: Rc<Cell<bool>>,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	fit_timer: Option<Timeout>,
}

impl LayoutEngine {
	/// Build the layout for `model` and start drawing it on `canvas`.
	pub fn new(
		canvas: &HtmlCanvasElement,
		model: &VisualModel,
		options: &LayoutOptions,
	) -> Result<Self, JsValue> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
			.dyn_into()?;
		let (w, h) = (canvas.width() as f64, canvas.height() as f64);
		let state = Rc::new(RefCell::new(ForceGraphState::new(model, options, w, h)));
		info!(
			"layout engine up: {} nodes, {} edges",
			state.borrow().node_count(),
			state.borrow().edge_count()
		);

		let alive = Rc::new(Cell::new(true));
		let frame_id = Rc::new(Cell::new(None));
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

		let (state_anim, alive_anim, frame_anim, animate_inner) = (
			state.clone(),
			alive.clone(),
			frame_id.clone(),
			animate.clone(),
		);
		*animate.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.get() {
				return;
			}
			{
				let mut s = state_anim.borrow_mut();
				s.tick(FRAME_DT);
				render::render(&s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				frame_anim.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		if let Some(cb) = animate.borrow().as_ref() {
			frame_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
		}

		let state_fit = state.clone();
		let fit_timer = Some(Timeout::new(FIT_DELAY_MS, move || {
			state_fit.borrow_mut().start_fit();
		}));

		Ok(Self {
			state,
			alive,
			frame_id,
			animate,
			fit_timer,
		})
	}

	/// Animate the camera to frame every node.
	pub fn fit(&self) {
		debug!("fit to view");
		self.state.borrow_mut().start_fit();
	}

	pub fn unselect_all(&self) {
		self.state.borrow_mut().unselect_all();
	}

	pub fn select(&self, id: Option<&str>) {
		self.state.borrow_mut().select(id);
	}

	/// Run `f` against the simulation state.
	pub fn with_state<R>(&self, f: impl FnOnce(&mut ForceGraphState) -> R) -> R {
		f(&mut self.state.borrow_mut())
	}
}

/// Something holding timers or callbacks that must be released explicitly.
pub trait Teardown {
	fn destroy(self);
}

impl Teardown for LayoutEngine {
	/// Stop the animation loop and any pending fit, releasing the canvas.
	fn destroy(mut self) {
		self.alive.set(false);
		if let (Some(window), Some(id)) = (web_sys::window(), self.frame_id.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Dropping the timeout cancels it.
		self.fit_timer.take();
		// Breaks the closure's reference to itself.
		self.animate.borrow_mut().take();
		debug!("layout engine destroyed");
	}
}

/// Holder for the at-most-one live engine of a canvas.
pub struct EngineSlot<E: Teardown = LayoutEngine>(Rc<RefCell<Option<E>>>);

impl<E: Teardown> Clone for EngineSlot<E> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<E: Teardown> Default for EngineSlot<E> {
	fn default() -> Self {
		Self(Rc::new(RefCell::new(None)))
	}
}

impl<E: Teardown> EngineSlot<E> {
	/// Replace the current engine with the one `build` produces. The previous
	/// engine is destroyed first, even when the new one fails to start.
	pub fn install<F>(&self, build: impl FnOnce() -> Result<E, F>) -> Result<(), F> {
		self.destroy();
		let engine = build()?;
		*self.0.borrow_mut() = Some(engine);
		Ok(())
	}

	pub fn destroy(&self) {
		// Released before teardown runs so `destroy` never re-enters the borrow.
		let previous = self.0.borrow_mut().take();
		if let Some(previous) = previous {
			previous.destroy();
		}
	}

	/// Run `f` against the live engine, if there is one.
	pub fn with<R>(&self, f: impl FnOnce(&E) -> R) -> Option<R> {
		self.0.borrow().as_ref().map(f)
	}
}

impl EngineSlot {
	/// Lay out `model` on `canvas`, replacing whatever engine was running.
	pub fn render(
		&self,
		canvas: &HtmlCanvasElement,
		model: &VisualModel,
		options: &LayoutOptions,
	) -> Result<(), JsValue> {
		self.install(|| LayoutEngine::new(canvas, model, options))
	}
}
