//! The particle network: owns every particle and the wind, and turns one
//! scheduler tick into one (possibly skipped) simulated and drawn frame.
//!
//! Glow comes from proximity. Each drawn frame scans all particle pairs for
//! the nearest neighbour using Manhattan distance, and maps that distance
//! through a squared falloff so close neighbours glow brightly and particles
//! further apart than `range` stay dark.

use log::{debug, info};

use super::config::{ConfigError, ParticleOptions};
use super::particle::{Bounds, Particle, ParticleTuning};
use super::random::{MathRandom, UniformSource};
use super::render::{ArrowHead, Surface};
use super::schedule::FrameScheduler;
use super::wind::Wind;

/// Screen position the debug wind arrow starts from.
const WIND_ARROW_ORIGIN: (f64, f64) = (100.0, 100.0);
/// Pixels of arrow per unit of wind speed.
const WIND_ARROW_SCALE: f64 = 100.0;
const WIND_ARROW_HEAD: ArrowHead = ArrowHead {
	width: 3.0,
	length: 3.0,
	at_start: false,
	at_end: true,
};

/// Glow for a nearest-neighbour distance: `((range - closest) / range)^2`.
///
/// One when touching, zero at or beyond `range`. `range` must be positive.
pub fn glow(closest: f64, range: f64) -> f64 {
	let t = (range - closest.clamp(0.0, range)) / range;
	t * t
}

/// Manhattan distance from each point to its nearest other point, capped at `range`.
pub fn nearest_distances(points: &[(f64, f64)], range: f64) -> Vec<f64> {
	let mut closest = vec![range; points.len()];
	for (i, a) in points.iter().enumerate() {
		for (j, b) in points.iter().enumerate().skip(i + 1) {
			let distance = (a.0 - b.0).abs() + (a.1 - b.1).abs();
			if distance < closest[i] {
				closest[i] = distance;
			}
			if distance < closest[j] {
				closest[j] = distance;
			}
		}
	}
	closest
}

/// Whether the network is animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
	Stopped,
	Running,
}

/// Particle simulation driven one tick at a time by a [`FrameScheduler`].
///
/// Created once per surface; particles are spawned up front and never added
/// or removed. Starting after a stop resumes from the current state.
pub struct ParticleNetwork<R: UniformSource = MathRandom> {
	options: ParticleOptions,
	bounds: Bounds,
	wind: Wind,
	particles: Vec<Particle>,
	frame_skip: u32,
	frame_counter: u32,
	state: RunState,
	/// A frame callback has been requested and has not fired yet.
	frame_pending: bool,
	speed_scale: f64,
	rng: R,
}

impl<R: UniformSource> ParticleNetwork<R> {
	/// Validate `options` and spawn particles for a `width` x `height` surface.
	pub fn new(options: ParticleOptions, width: f64, height: f64, mut rng: R) -> Result<Self, ConfigError> {
		options.validate()?;
		if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
			return Err(ConfigError::EmptySurface { width, height });
		}
		let palette = options.palette()?;
		let bounds = Bounds { width, height };

		let wind = Wind::new(
			options.wind_speed,
			options.wind_direction,
			options.wind_chance(),
			&mut rng,
		);

		let tuning = ParticleTuning {
			policy: options.spawn_policy(),
			velocity: options.base_velocity(),
			wander: options.wander,
			size: (options.size_min, options.size_max),
			size_chance: options.size_chance(),
			flicker: options.flicker,
		};
		let count = options.particle_count(width, height);
		let particles = (0..count)
			.map(|_| Particle::spawn(&tuning, &palette, bounds, &mut rng))
			.collect();

		info!(
			"particle-network: created network with N={} on {}x{}",
			count, width, height
		);

		Ok(Self {
			frame_skip: options.frame_skip.max(0) as u32,
			options,
			bounds,
			wind,
			particles,
			frame_counter: 0,
			state: RunState::Stopped,
			frame_pending: false,
			speed_scale: 1.0,
			rng,
		})
	}

	/// Start animating and run a frame right away. No-op while running.
	///
	/// Returns whether the network was stopped before.
	pub fn start<S, F>(&mut self, surface: &mut S, scheduler: &F) -> bool
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		if self.state == RunState::Running {
			return false;
		}
		self.state = RunState::Running;
		self.tick(surface, scheduler);
		true
	}

	/// Rescale particle speed by `scale` in `[0, 1]`, then [`start`](Self::start).
	///
	/// The rescale applies even when already running.
	pub fn start_scaled<S, F>(&mut self, scale: f64, surface: &mut S, scheduler: &F) -> bool
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		self.set_speed_scale(scale);
		self.start(surface, scheduler)
	}

	/// Stop after the current frame; nothing further is drawn or scheduled.
	pub fn stop(&mut self) {
		self.state = RunState::Stopped;
	}

	/// Stop when running, start when stopped.
	pub fn toggle<S, F>(&mut self, surface: &mut S, scheduler: &F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		match self.state {
			RunState::Running => self.stop(),
			RunState::Stopped => {
				self.start(surface, scheduler);
			}
		}
	}

	/// Scale future particle velocities. Clamped to `[0, 1]`; NaN counts as 0.
	pub fn set_speed_scale(&mut self, scale: f64) {
		let scale = if scale.is_nan() { 0.0 } else { scale.clamp(0.0, 1.0) };
		self.speed_scale = scale;
		let sigma = self.options.base_velocity() * scale;
		for p in &mut self.particles {
			p.set_velocity_sigma(sigma);
		}
	}

	/// The scheduler callback: run or skip one frame, then re-arm while running.
	pub fn on_frame<S, F>(&mut self, surface: &mut S, scheduler: &F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		self.frame_pending = false;
		self.tick(surface, scheduler);
	}

	fn tick<S, F>(&mut self, surface: &mut S, scheduler: &F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		if self.state != RunState::Running {
			return;
		}

		if self.frame_counter > 0 {
			self.frame_counter -= 1;
		} else {
			self.update_and_draw(surface);
			self.frame_counter = self.frame_skip;
		}

		// A callback may still be queued from before a stop; reuse it.
		if !self.frame_pending {
			self.frame_pending = scheduler.request_frame();
		}
	}

	/// Advance the wind and every particle once, recompute glow and redraw.
	pub fn update_and_draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		surface.clear(self.bounds);

		let rand = self.rng.next_f64();
		let (speed, direction) = self.wind.advance(rand, &mut self.rng);
		let wind = self.wind.vector();

		if self.options.debug {
			if self.wind.shifted() {
				debug!(
					"particle-network: wind shifting to {:.2} deg @ {:.2}",
					direction, speed
				);
			}
			let (x0, y0) = WIND_ARROW_ORIGIN;
			surface.arrow(
				(x0, y0),
				(x0 + wind.0 * WIND_ARROW_SCALE, y0 + wind.1 * WIND_ARROW_SCALE),
				WIND_ARROW_HEAD,
			);
		}

		// One draw per particle, shared by its velocity and size variables,
		// so a particle tends to change course and size together.
		for p in &mut self.particles {
			let rand = self.rng.next_f64();
			p.advance(rand, wind, self.bounds, &mut self.rng);
		}

		let points: Vec<(f64, f64)> = self.particles.iter().map(|p| (p.x, p.y)).collect();
		let closest = nearest_distances(&points, self.options.range);
		for (p, c) in self.particles.iter_mut().zip(closest) {
			p.glow = glow(c, self.options.range);
		}

		for p in &self.particles {
			p.draw(surface, &mut self.rng);
		}
	}

	pub fn state(&self) -> RunState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == RunState::Running
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn wind(&self) -> &Wind {
		&self.wind
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn options(&self) -> &ParticleOptions {
		&self.options
	}

	/// Ticks left to skip before the next drawn frame.
	pub fn frame_counter(&self) -> u32 {
		self.frame_counter
	}

	pub fn speed_scale(&self) -> f64 {
		self.speed_scale
	}
}
