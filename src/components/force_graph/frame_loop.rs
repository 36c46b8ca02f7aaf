//! `requestAnimationFrame` loop and window resize listener, released on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::Window;

type Callback = Closure<dyn FnMut()>;

/// Owns the animation-frame closure, the pending frame id and the resize
/// listener of one canvas.
///
/// The frame closure reschedules itself only after the previous frame
/// finished. Dropping the guard cancels the pending frame, detaches the resize
/// listener and breaks the closure's self-reference, so every exit path of
/// the owning component releases the loop.
pub struct FrameLoop {
	window: Window,
	pending: Rc<Cell<Option<i32>>>,
	tick: Rc<RefCell<Option<Callback>>>,
	resize: Option<Callback>,
}

impl FrameLoop {
	/// An idle loop bound to `window`.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			pending: Rc::new(Cell::new(None)),
			tick: Rc::new(RefCell::new(None)),
			resize: None,
		}
	}

	/// Call `handler` on every window resize, replacing any earlier handler.
	pub fn on_resize(&mut self, handler: impl FnMut() + 'static) {
		self.detach_resize();
		let callback = Callback::new(handler);
		let _ = self
			.window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
		self.resize = Some(callback);
	}

	/// Run `frame` once per animation frame until dropped.
	pub fn start(&mut self, mut frame: impl FnMut() + 'static) {
		let (tick, pending, window) = (self.tick.clone(), self.pending.clone(), self.window.clone());
		*self.tick.borrow_mut() = Some(Callback::new(move || {
			pending.set(None);
			frame();
			if let Some(ref cb) = *tick.borrow() {
				pending.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		self.schedule();
	}

	fn schedule(&self) {
		if let Some(ref cb) = *self.tick.borrow() {
			self.pending
				.set(self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	fn detach_resize(&mut self) {
		if let Some(callback) = self.resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		self.detach_resize();
		self.tick.borrow_mut().take();
		debug!("symbol-graph: frame loop released");
	}
}
