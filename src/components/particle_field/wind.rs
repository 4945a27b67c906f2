//! Shared wind field applied to every particle.

use super::random::UniformSource;
use super::tvar::{Sampler, TransitionVar, VarGraph, VarId};

/// Steps a wind speed or direction change takes to settle.
const WIND_CHANGE_STEPS: Sampler = Sampler::Uniform { min: 20.0, max: 40.0 };

/// Wind built from a speed and a direction (degrees) variable.
///
/// Direction is entangled to speed, so the wind only swings round at the
/// moments it also changes strength.
#[derive(Clone, Debug)]
pub struct Wind {
	vars: VarGraph,
	speed: VarId,
	direction: VarId,
	shifted: bool,
}

impl Wind {
	pub fn new<R: UniformSource + ?Sized>(
		speed: (f64, f64),
		direction: (f64, f64),
		chance: f64,
		rng: &mut R,
	) -> Self {
		let mut vars = VarGraph::new();
		let speed = vars.insert(TransitionVar::new(
			chance,
			Sampler::Uniform {
				min: speed.0,
				max: speed.1,
			},
			WIND_CHANGE_STEPS,
			rng,
		));
		let direction = vars.insert(TransitionVar::new(
			0.0,
			Sampler::Uniform {
				min: direction.0,
				max: direction.1,
			},
			WIND_CHANGE_STEPS,
			rng,
		));
		vars.entangle(speed, direction)
			.expect("fresh speed and direction variables cannot form a cycle");

		Self {
			vars,
			speed,
			direction,
			shifted: false,
		}
	}

	/// Advance speed, then direction, with one shared draw.
	pub fn advance<R: UniformSource + ?Sized>(&mut self, rand: f64, rng: &mut R) -> (f64, f64) {
		self.shifted = self.vars.step(self.speed, rand, rng);
		let direction = self.vars.advance(self.direction, rand, rng);
		(self.speed(), direction)
	}

	pub fn speed(&self) -> f64 {
		self.vars.value(self.speed)
	}

	/// Bearing in degrees.
	pub fn direction(&self) -> f64 {
		self.vars.value(self.direction)
	}

	/// Whether the latest advance started a new gust.
	pub fn shifted(&self) -> bool {
		self.shifted
	}

	/// Cartesian `(dx, dy)` per step.
	pub fn vector(&self) -> (f64, f64) {
		let speed = self.speed();
		let theta = self.direction().to_radians();
		(speed * theta.cos(), speed * theta.sin())
	}
}
