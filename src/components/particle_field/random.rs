//! Uniform random source and the distributions built on top of it.
//!
//! Everything in the engine draws from a [`UniformSource`], so tests can swap
//! the browser's `Math.random` for a scripted or seeded sequence.

/// A source of uniform draws in `[0, 1)`.
pub trait UniformSource {
	/// Next uniform draw in `[0, 1)`.
	fn next_f64(&mut self) -> f64;

	/// Uniform draw in `[min, max)`. Collapses to `min` when `min == max`.
	fn range(&mut self, min: f64, max: f64) -> f64 {
		self.next_f64() * (max - min) + min
	}

	/// Approximately normal draw via the central limit theorem.
	///
	/// Sums twelve uniform draws, so the result always lies within
	/// `mu ± 6 * sigma`. Speed constants are tuned against this exact spread,
	/// not against a true Gaussian.
	fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
		let mut sum = 0.0;
		for _ in 0..12 {
			sum += self.next_f64();
		}
		(sum - 6.0) * sigma + mu
	}

	/// Returns true with the given probability.
	fn chance(&mut self, probability: f64) -> bool {
		self.next_f64() < probability
	}

	/// Uniform index into a collection of `len` elements. `len` must be non-zero.
	fn index(&mut self, len: usize) -> usize {
		// Draws are < 1.0, but guard against rounding up on huge lengths.
		((self.next_f64() * len as f64) as usize).min(len - 1)
	}
}

/// Browser `Math.random`, unseeded.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl UniformSource for MathRandom {
	fn next_f64(&mut self) -> f64 {
		js_sys::Math::random()
	}
}
