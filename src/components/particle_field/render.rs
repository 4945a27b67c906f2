//! Drawing surface abstraction and its canvas implementation.
//!
//! The network only ever clears the surface, fills circles and (in debug
//! mode) draws the wind arrow, so that is all a [`Surface`] has to offer.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::palette::Color;
use super::particle::Bounds;

/// Arrowhead shape for [`Surface::arrow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
	/// How far the head spreads out perpendicular to the shaft.
	pub width: f64,
	/// How far the head reaches back along the shaft.
	pub length: f64,
	pub at_start: bool,
	pub at_end: bool,
}

/// A sized 2D drawing target.
pub trait Surface {
	/// Erase everything within `bounds`.
	fn clear(&mut self, bounds: Bounds);
	/// Fill a circle with the given colour at global alpha `alpha`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64);
	/// Stroke a line with optional arrowheads, leaving the transform reset.
	fn arrow(&mut self, from: (f64, f64), to: (f64, f64), head: ArrowHead);
}

/// Arrow geometry in the shaft's local frame: origin at `from`, x along the shaft.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowPath {
	pub angle: f64,
	pub length: f64,
	/// Polylines to stroke, in local coordinates.
	pub strokes: Vec<Vec<(f64, f64)>>,
}

impl ArrowPath {
	pub fn new(from: (f64, f64), to: (f64, f64), head: ArrowHead) -> Self {
		let (dx, dy) = (to.0 - from.0, to.1 - from.1);
		let length = (dx * dx + dy * dy).sqrt();
		let mut strokes = vec![vec![(0.0, 0.0), (length, 0.0)]];
		if head.at_start {
			strokes.push(vec![
				(head.length, -head.width),
				(0.0, 0.0),
				(head.length, head.width),
			]);
		}
		if head.at_end {
			strokes.push(vec![
				(length - head.length, -head.width),
				(length, 0.0),
				(length - head.length, head.width),
			]);
		}
		Self {
			angle: dy.atan2(dx),
			length,
			strokes,
		}
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, bounds: Bounds) {
		self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.set_global_alpha(alpha);
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn arrow(&mut self, from: (f64, f64), to: (f64, f64), head: ArrowHead) {
		let path = ArrowPath::new(from, to, head);

		self.set_fill_style_str("white");
		self.set_stroke_style_str("white");
		self.set_global_alpha(1.0);

		let _ = self.translate(from.0, from.1);
		let _ = self.rotate(path.angle);
		self.begin_path();
		for stroke in &path.strokes {
			if let Some((&(x, y), rest)) = stroke.split_first() {
				self.move_to(x, y);
				for &(x, y) in rest {
					self.line_to(x, y);
				}
			}
		}
		self.stroke();
		let _ = self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	}
}
