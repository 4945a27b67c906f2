//! Individual particles: spawn placement, per-frame motion and drawing.

use super::palette::{Color, Palette};
use super::random::UniformSource;
use super::render::Surface;
use super::tvar::{Sampler, TransitionVar};

/// Steps a velocity change takes.
const VELOCITY_CHANGE_STEPS: Sampler = Sampler::Uniform { min: 15.0, max: 60.0 };
/// Steps a size change takes.
const SIZE_CHANGE_STEPS: Sampler = Sampler::Uniform { min: 60.0, max: 300.0 };

/// Pixel extent of the drawing surface. Both sides are positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

/// Wrap a coordinate into `[0, extent)`. `extent` must be positive.
pub fn wrap(coord: f64, extent: f64) -> f64 {
	let wrapped = coord.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs.
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// Where a particle starts and which axes it may travel along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
	pub x: f64,
	pub y: f64,
	pub moves_x: bool,
	pub moves_y: bool,
}

/// How particles are placed at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnPolicy {
	/// Anywhere on the surface, moving on both axes.
	Free,
	/// Pinned near an edge (or the centre line) and moving along it.
	Edges { include_centre: bool },
}

impl SpawnPolicy {
	/// Draw thresholds splitting the near edge, far edge and centre line.
	pub fn thresholds(&self) -> (f64, f64) {
		match self {
			SpawnPolicy::Edges {
				include_centre: true,
			} => (0.3, 0.6),
			_ => (0.5, 1.0),
		}
	}

	/// Pick a starting position. `margin` keeps pinned particles fully on screen.
	pub fn place<R: UniformSource + ?Sized>(
		&self,
		bounds: Bounds,
		margin: f64,
		rng: &mut R,
	) -> Placement {
		match self {
			SpawnPolicy::Free => Placement {
				x: rng.next_f64() * bounds.width,
				y: rng.next_f64() * bounds.height,
				moves_x: true,
				moves_y: true,
			},
			SpawnPolicy::Edges { .. } => {
				let band = rng.next_f64();
				let thresholds = self.thresholds();
				if rng.next_f64() <= 0.5 {
					// Travels vertically along the left, right or centre line.
					Placement {
						x: pin(band, bounds.width, margin, thresholds),
						y: rng.next_f64() * bounds.height,
						moves_x: false,
						moves_y: true,
					}
				} else {
					// Travels horizontally along the top, bottom or centre line.
					Placement {
						x: rng.next_f64() * bounds.width,
						y: pin(band, bounds.height, margin, thresholds),
						moves_x: true,
						moves_y: false,
					}
				}
			}
		}
	}
}

/// Pinned coordinate for an edge-confined particle, always in `[0, extent)`.
pub fn pin(band: f64, extent: f64, margin: f64, (near, far): (f64, f64)) -> f64 {
	let pinned = if band <= near {
		margin
	} else if band <= far {
		extent - margin
	} else {
		extent / 2.0
	};
	// Margins as wide as the surface would otherwise pin off screen.
	wrap(pinned, extent)
}

/// Per-particle tuning shared by every particle in a network.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleTuning {
	pub policy: SpawnPolicy,
	/// Sigma of the velocity distribution.
	pub velocity: f64,
	/// Chance per step of starting a velocity change. Zero freezes velocity at rest.
	pub wander: f64,
	pub size: (f64, f64),
	pub size_chance: f64,
	pub flicker: f64,
}

/// A glowing particle drifting across the surface.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	moves_x: bool,
	moves_y: bool,
	size: TransitionVar,
	vx: TransitionVar,
	vy: TransitionVar,
	color: Color,
	flicker: f64,
	/// Proximity glow in `[0, 1]`, recomputed every drawn frame.
	pub glow: f64,
}

impl Particle {
	pub fn spawn<R: UniformSource + ?Sized>(
		tuning: &ParticleTuning,
		palette: &Palette,
		bounds: Bounds,
		rng: &mut R,
	) -> Self {
		let placement = tuning.policy.place(bounds, tuning.size.1, rng);
		let size = TransitionVar::new(
			tuning.size_chance,
			Sampler::Uniform {
				min: tuning.size.0,
				max: tuning.size.1,
			},
			SIZE_CHANGE_STEPS,
			rng,
		);
		let color = palette.get(rng.index(palette.colors().len()));
		let (vx, vy) = if tuning.wander > 0.0 {
			let velocity = Sampler::Normal {
				mu: 0.0,
				sigma: tuning.velocity,
			};
			(
				TransitionVar::new(tuning.wander, velocity, VELOCITY_CHANGE_STEPS, rng),
				TransitionVar::new(tuning.wander, velocity, VELOCITY_CHANGE_STEPS, rng),
			)
		} else {
			(TransitionVar::constant(0.0), TransitionVar::constant(0.0))
		};

		Self {
			x: placement.x,
			y: placement.y,
			moves_x: placement.moves_x,
			moves_y: placement.moves_y,
			size,
			vx,
			vy,
			color,
			flicker: tuning.flicker,
			glow: 0.0,
		}
	}

	/// Move one step with the frame's shared draw and wind.
	pub fn advance<R: UniformSource + ?Sized>(
		&mut self,
		rand: f64,
		wind: (f64, f64),
		bounds: Bounds,
		rng: &mut R,
	) {
		if self.moves_x {
			self.x = wrap(self.x + self.vx.advance(rand, rng) + wind.0, bounds.width);
		}
		if self.moves_y {
			self.y = wrap(self.y + self.vy.advance(rand, rng) + wind.1, bounds.height);
		}
		self.size.advance(rand, rng);
	}

	/// Change the spread of future velocity targets.
	pub fn set_velocity_sigma(&mut self, sigma: f64) {
		for v in [&mut self.vx, &mut self.vy] {
			if let Sampler::Normal { mu, .. } = v.target() {
				v.set_target(Sampler::Normal { mu, sigma });
			}
		}
	}

	/// Fresh shimmer multiplier in `[1 - flicker, 1]`.
	pub fn flicker_sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> f64 {
		rng.range(1.0 - self.flicker, 1.0)
	}

	pub fn draw<S: Surface + ?Sized, R: UniformSource + ?Sized>(&self, surface: &mut S, rng: &mut R) {
		let alpha = self.glow * self.flicker_sample(rng);
		surface.fill_circle(self.x, self.y, self.size.value(), self.color, alpha);
	}

	pub fn moves(&self) -> (bool, bool) {
		(self.moves_x, self.moves_y)
	}

	pub fn size(&self) -> f64 {
		self.size.value()
	}

	pub fn velocity(&self) -> (f64, f64) {
		(self.vx.value(), self.vy.value())
	}

	pub fn color(&self) -> Color {
		self.color
	}

	/// Distribution new velocity targets are drawn from.
	pub fn velocity_target(&self) -> Sampler {
		self.vx.target()
	}
}

#[cfg(test)]
mod tests {
	use super::super::random::testing::{Scripted, Seeded};
	use super::*;

	const BOUNDS: Bounds = Bounds {
		width: 800.0,
		height: 600.0,
	};

	fn tuning(policy: SpawnPolicy) -> ParticleTuning {
		ParticleTuning {
			policy,
			velocity: 1.5,
			wander: 0.8,
			size: (2.0, 5.0),
			size_chance: 0.001,
			flicker: 0.5,
		}
	}

	#[test]
	fn wrap_lands_in_range() {
		let mut rng = Seeded::new(17);
		for _ in 0..10_000 {
			let extent = rng.range(0.5, 2000.0);
			let x = rng.range(-1e6, 1e6);
			let w = wrap(x, extent);
			assert!((0.0..extent).contains(&w), "wrap({x}, {extent}) = {w}");
		}
		assert_eq!(wrap(-1e-20, 600.0), 0.0);
		assert_eq!(wrap(600.0, 600.0), 0.0);
		assert_eq!(wrap(-1.0, 600.0), 599.0);
	}

	#[test]
	fn pin_splits_draws_between_edges_and_centre() {
		let centred = SpawnPolicy::Edges {
			include_centre: true,
		}
		.thresholds();
		assert_eq!(pin(0.3, 800.0, 5.0, centred), 5.0);
		assert_eq!(pin(0.45, 800.0, 5.0, centred), 795.0);
		assert_eq!(pin(0.61, 800.0, 5.0, centred), 400.0);

		let edges = SpawnPolicy::Edges {
			include_centre: false,
		}
		.thresholds();
		for band in [0.0, 0.2, 0.5, 0.51, 0.99] {
			assert_ne!(pin(band, 800.0, 5.0, edges), 400.0);
		}
	}

	#[test]
	fn oversized_margin_still_pins_on_the_surface() {
		let edges = SpawnPolicy::Edges {
			include_centre: true,
		}
		.thresholds();
		for band in [0.1, 0.5, 0.9] {
			for margin in [4.0, 9.5, 30.0] {
				let p = pin(band, 4.0, margin, edges);
				assert!((0.0..4.0).contains(&p), "pin({band}, 4, {margin}) = {p}");
			}
		}
		assert_eq!(pin(0.1, 4.0, 5.0, edges), 1.0);
		assert_eq!(pin(0.5, 4.0, 5.0, edges), 3.0);
	}

	#[test]
	fn edge_spawn_consumes_band_then_coin_then_free_axis() {
		let policy = SpawnPolicy::Edges {
			include_centre: true,
		};
		let mut rng = Scripted::new(&[0.9, 0.2, 0.25], 0.0);
		assert_eq!(
			policy.place(BOUNDS, 5.0, &mut rng),
			Placement {
				x: 400.0,
				y: 150.0,
				moves_x: false,
				moves_y: true,
			}
		);

		let mut rng = Scripted::new(&[0.1, 0.7, 0.5], 0.0);
		assert_eq!(
			policy.place(BOUNDS, 5.0, &mut rng),
			Placement {
				x: 400.0,
				y: 5.0,
				moves_x: true,
				moves_y: false,
			}
		);
	}

	#[test]
	fn vertical_traveller_keeps_its_column() {
		let mut rng = Seeded::new(8);
		let policy = SpawnPolicy::Edges {
			include_centre: true,
		};
		let margin = 5.0;
		let pins = [margin, BOUNDS.width - margin, BOUNDS.width / 2.0];
		let mut travellers = 0;
		for _ in 0..200 {
			let mut p = Particle::spawn(&tuning(policy), &Palette::aesthetic(), BOUNDS, &mut rng);
			if p.moves() != (false, true) {
				continue;
			}
			travellers += 1;
			let x = p.x;
			assert!(pins.contains(&x));
			for _ in 0..100 {
				let rand = rng.next_f64();
				p.advance(rand, (3.0, -2.0), BOUNDS, &mut rng);
				assert_eq!(p.x, x);
				assert!((0.0..BOUNDS.height).contains(&p.y));
			}
		}
		assert!(travellers > 0);
	}

	#[test]
	fn horizontal_traveller_keeps_its_row() {
		let mut rng = Seeded::new(21);
		let policy = SpawnPolicy::Edges {
			include_centre: true,
		};
		let margin = 5.0;
		let pins = [margin, BOUNDS.height - margin, BOUNDS.height / 2.0];
		let mut travellers = 0;
		for _ in 0..200 {
			let mut p = Particle::spawn(&tuning(policy), &Palette::aesthetic(), BOUNDS, &mut rng);
			if p.moves() != (true, false) {
				continue;
			}
			travellers += 1;
			let y = p.y;
			assert!(pins.contains(&y));
			for _ in 0..100 {
				let rand = rng.next_f64();
				p.advance(rand, (-3.0, 2.0), BOUNDS, &mut rng);
				assert_eq!(p.y, y);
				assert!((0.0..BOUNDS.width).contains(&p.x));
			}
		}
		assert!(travellers > 0);
	}

	#[test]
	fn free_particles_stay_on_the_surface() {
		let mut rng = Seeded::new(99);
		let mut particles: Vec<Particle> = (0..50)
			.map(|_| Particle::spawn(&tuning(SpawnPolicy::Free), &Palette::aesthetic(), BOUNDS, &mut rng))
			.collect();
		for _ in 0..500 {
			let rand = rng.next_f64();
			for p in &mut particles {
				p.advance(rand, (-40.0, 170.0), BOUNDS, &mut rng);
				assert!((0.0..BOUNDS.width).contains(&p.x));
				assert!((0.0..BOUNDS.height).contains(&p.y));
			}
		}
	}

	#[test]
	fn flicker_stays_in_band() {
		let mut rng = Seeded::new(1);
		let p = Particle::spawn(&tuning(SpawnPolicy::Free), &Palette::aesthetic(), BOUNDS, &mut rng);
		for _ in 0..1000 {
			let f = p.flicker_sample(&mut rng);
			assert!((0.5..=1.0).contains(&f));
		}
	}

	#[test]
	fn no_wander_means_only_wind_moves_particles() {
		let mut rng = Seeded::new(6);
		let calm = ParticleTuning {
			wander: 0.0,
			..tuning(SpawnPolicy::Free)
		};
		let mut p = Particle::spawn(&calm, &Palette::aesthetic(), BOUNDS, &mut rng);
		let (x, y) = (p.x, p.y);
		p.advance(0.0, (0.0, 0.0), BOUNDS, &mut rng);
		assert_eq!((p.x, p.y), (x, y));
		assert_eq!(p.velocity(), (0.0, 0.0));
	}

	#[test]
	fn rescaling_velocity_keeps_the_current_glide() {
		let mut rng = Seeded::new(31);
		let mut p = Particle::spawn(&tuning(SpawnPolicy::Free), &Palette::aesthetic(), BOUNDS, &mut rng);
		let before = p.velocity();
		p.set_velocity_sigma(0.0);
		assert_eq!(p.velocity(), before);
		assert_eq!(p.vx.target(), Sampler::Normal { mu: 0.0, sigma: 0.0 });
		assert_eq!(p.vy.target(), Sampler::Normal { mu: 0.0, sigma: 0.0 });
	}

	#[test]
	fn one_draw_moves_both_axes_and_size_together() {
		let mut rng = Seeded::new(14);
		let mut p = Particle::spawn(&tuning(SpawnPolicy::Free), &Palette::aesthetic(), BOUNDS, &mut rng);
		p.size = TransitionVar::new(0.8, Sampler::Uniform { min: 2.0, max: 5.0 }, SIZE_CHANGE_STEPS, &mut rng);

		p.advance(0.9, (0.0, 0.0), BOUNDS, &mut rng);
		assert!(p.vx.is_resting() && p.vy.is_resting() && p.size.is_resting());

		p.advance(0.1, (0.0, 0.0), BOUNDS, &mut rng);
		assert!(!p.vx.is_resting() && !p.vy.is_resting() && !p.size.is_resting());
	}
}
