//! Per-frame callback scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Something that will invoke the frame callback once more, at display cadence.
pub trait FrameScheduler {
	/// Ask for one more callback invocation. Returns `false` when the request
	/// could not be queued, so no callback will follow.
	fn request_frame(&self) -> bool;
}

/// Slot holding the frame callback; filled once the closure exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` on the current window.
#[derive(Clone, Default)]
pub struct AnimationFrames {
	callback: FrameCallback,
}

impl AnimationFrames {
	/// Create a scheduler with an empty callback slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Install the closure run on every requested frame.
	pub fn set_callback(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&self) -> bool {
		let Some(window) = web_sys::window() else {
			warn!("particle-network: no window, animation halted");
			return false;
		};
		let Some(ref cb) = *self.callback.borrow() else {
			warn!("particle-network: no frame callback installed");
			return false;
		};
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(_) => true,
			Err(e) => {
				warn!("particle-network: requestAnimationFrame failed: {:?}", e);
				false
			}
		}
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::Cell;

	use super::FrameScheduler;

	/// Counts frame requests. The first `dropped` requests fail to queue.
	#[derive(Debug, Default)]
	pub struct Counting {
		pub requests: Cell<usize>,
		pub dropped: Cell<usize>,
	}

	impl Counting {
		pub fn dropping(dropped: usize) -> Self {
			Self {
				dropped: Cell::new(dropped),
				..Self::default()
			}
		}

		pub fn count(&self) -> usize {
			self.requests.get()
		}
	}

	impl FrameScheduler for Counting {
		fn request_frame(&self) -> bool {
			self.requests.set(self.requests.get() + 1);
			match self.dropped.get() {
				0 => true,
				n => {
					self.dropped.set(n - 1);
					false
				}
			}
		}
	}
}
