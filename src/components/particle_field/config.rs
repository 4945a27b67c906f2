//! Construction-time options for the particle network.
//!
//! Field names deserialize in camelCase so a host page can override any subset
//! with a JSON object, e.g. `{"colors": ["#fff"], "frameSkip": 0}`.

use serde::Deserialize;
use thiserror::Error;

use super::palette::{Color, Palette};
use super::particle::SpawnPolicy;

/// Area of one density block, in square pixels.
const DENSITY_BLOCK_AREA: f64 = 500.0 * 500.0;

/// Options are rejected before any frame runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("particle palette must contain at least one colour")]
	EmptyPalette,
	#[error("`{0}` is not a supported colour")]
	InvalidColor(String),
	#[error("{name} range is inverted: {min} > {max}")]
	InvertedRange {
		name: &'static str,
		min: f64,
		max: f64,
	},
	#[error("frame skip must not be negative, got {0}")]
	NegativeFrameSkip(i32),
	#[error("glow range must be positive, got {0}")]
	NonPositiveGlowRange(f64),
	#[error("{name} must be a probability in [0, 1], got {value}")]
	ProbabilityOutOfRange { name: &'static str, value: f64 },
	#[error("flicker must be in [0, 1), got {0}")]
	FlickerOutOfRange(f64),
	#[error("particle density must not be negative, got {0}")]
	NegativeDensity(f64),
	#[error("particle size must not be negative, got {0}")]
	NegativeSize(f64),
	#[error("{0} must be a finite number")]
	NotFinite(&'static str),
	#[error("drawing surface has no area: {width}x{height}")]
	EmptySurface { width: f64, height: f64 },
}

/// Visual and motion options. Any field left out of the JSON keeps its default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleOptions {
	/// CSS colours particles are drawn in.
	pub colors: Vec<String>,
	/// Base particle speed.
	pub speed: f64,
	/// Min and max wind speed.
	pub wind_speed: (f64, f64),
	/// How often the wind changes.
	pub wind_flicker: f64,
	/// Range of wind bearings in degrees (0: right, 90: down, 180: left, 270: up).
	/// Equal bounds pin the wind to one bearing.
	pub wind_direction: (f64, f64),
	/// How often particles change velocity, in `[0, 1]`.
	pub wander: f64,
	/// Per-draw shimmer amount, in `[0, 1)`.
	pub flicker: f64,
	/// Particles per 500x500 block of pixels.
	pub density: f64,
	/// Fixed particle count; overrides `density` when set.
	pub count: Option<usize>,
	/// Distance at which particles are close enough to glow.
	pub range: f64,
	pub size_min: f64,
	pub size_max: f64,
	/// Scheduler ticks to skip between two drawn frames.
	pub frame_skip: i32,
	/// Only spawn particles at the screen edges, moving along them.
	pub edge_only: bool,
	/// With `edge_only`, also spawn along the horizontal and vertical centre lines.
	pub edge_and_centre: bool,
	/// Draw the wind arrow and report wind changes.
	pub debug: bool,
}

impl Default for ParticleOptions {
	fn default() -> Self {
		Self {
			colors: Palette::aesthetic()
				.colors()
				.iter()
				.map(|c| c.to_css())
				.collect(),
			speed: 500.0,
			wind_speed: (2.0, 5.0),
			wind_flicker: 0.01,
			wind_direction: (250.0, 290.0),
			wander: 0.8,
			flicker: 0.5,
			density: 8.0,
			count: None,
			range: 500.0,
			size_min: 2.0,
			size_max: 5.0,
			frame_skip: 2,
			edge_only: false,
			edge_and_centre: false,
			debug: false,
		}
	}
}

impl ParticleOptions {
	/// Check every contract the simulation relies on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let finite = [
			("speed", self.speed),
			("wind speed", self.wind_speed.0),
			("wind speed", self.wind_speed.1),
			("wind flicker", self.wind_flicker),
			("wind direction", self.wind_direction.0),
			("wind direction", self.wind_direction.1),
			("wander", self.wander),
			("flicker", self.flicker),
			("density", self.density),
			("range", self.range),
			("minimum size", self.size_min),
			("maximum size", self.size_max),
		];
		if let Some(&(name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
			return Err(ConfigError::NotFinite(name));
		}

		self.palette()?;

		check_range("wind speed", self.wind_speed)?;
		check_range("wind direction", self.wind_direction)?;
		check_range("particle size", (self.size_min, self.size_max))?;
		if self.size_min < 0.0 {
			return Err(ConfigError::NegativeSize(self.size_min));
		}

		check_probability("wander", self.wander)?;
		check_probability("wind flicker", self.wind_flicker)?;
		if !(0.0..1.0).contains(&self.flicker) {
			return Err(ConfigError::FlickerOutOfRange(self.flicker));
		}

		if self.frame_skip < 0 {
			return Err(ConfigError::NegativeFrameSkip(self.frame_skip));
		}
		if self.range <= 0.0 {
			return Err(ConfigError::NonPositiveGlowRange(self.range));
		}
		if self.density < 0.0 {
			return Err(ConfigError::NegativeDensity(self.density));
		}
		Ok(())
	}

	/// Parse the configured colours.
	pub fn palette(&self) -> Result<Palette, ConfigError> {
		let colors = self
			.colors
			.iter()
			.map(|css| {
				css.parse::<Color>()
					.map_err(|_| ConfigError::InvalidColor(css.clone()))
			})
			.collect::<Result<Vec<_>, _>>()?;
		Palette::new(colors).ok_or(ConfigError::EmptyPalette)
	}

	/// Number of particles for a surface of the given size.
	pub fn particle_count(&self, width: f64, height: f64) -> usize {
		match self.count {
			Some(count) => count,
			None => (self.density * width * height / DENSITY_BLOCK_AREA).ceil() as usize,
		}
	}

	/// Keeps motion per second roughly constant across frame-skip settings.
	pub fn fps_correction(&self) -> f64 {
		f64::from(self.frame_skip.max(0)) + 1.0
	}

	/// Sigma of the particle velocity distribution at full power.
	pub fn base_velocity(&self) -> f64 {
		self.speed * self.fps_correction() / 1000.0
	}

	pub fn size_chance(&self) -> f64 {
		0.001 / self.fps_correction()
	}

	pub fn wind_chance(&self) -> f64 {
		self.wind_flicker / self.fps_correction()
	}

	pub fn spawn_policy(&self) -> SpawnPolicy {
		if self.edge_only {
			SpawnPolicy::Edges {
				include_centre: self.edge_and_centre,
			}
		} else {
			SpawnPolicy::Free
		}
	}
}

fn check_range(name: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
	if min > max {
		Err(ConfigError::InvertedRange { name, min, max })
	} else {
		Ok(())
	}
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if (0.0..=1.0).contains(&value) {
		Ok(())
	} else {
		Err(ConfigError::ProbabilityOutOfRange { name, value })
	}
}
