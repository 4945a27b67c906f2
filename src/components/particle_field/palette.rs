//! Particle colours and named palettes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// Returned when a string is not a supported CSS colour.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported CSS colour")]
pub struct ParseColorError;

impl FromStr for Color {
	type Err = ParseColorError;

	/// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return parse_hex(hex);
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or(ParseColorError)?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		let channel = |i: usize| -> Result<u8, ParseColorError> {
			parts
				.get(i)
				.and_then(|p| p.parse().ok())
				.ok_or(ParseColorError)
		};

		match parts.len() {
			3 => Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?)),
			4 => {
				let a: f64 = parts[3].parse().map_err(|_| ParseColorError)?;
				if !(0.0..=1.0).contains(&a) {
					return Err(ParseColorError);
				}
				Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
			}
			_ => Err(ParseColorError),
		}
	}
}

fn parse_hex(hex: &str) -> Result<Color, ParseColorError> {
	if !hex.is_ascii() {
		return Err(ParseColorError);
	}
	let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ParseColorError);
	match hex.len() {
		// #abc is shorthand for #aabbcc
		3 => {
			let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
			Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
		}
		6 => Ok(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
		_ => Err(ParseColorError),
	}
}

/// A non-empty set of particle colours.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Returns `None` for an empty set.
	pub fn new(colors: Vec<Color>) -> Option<Self> {
		if colors.is_empty() {
			None
		} else {
			Some(Self { colors })
		}
	}

	/// Pale yellow, pink and cyan (default)
	pub fn aesthetic() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 251, 150), // Pale yellow
				Color::rgb(244, 124, 212), // Pink
				Color::rgb(1, 205, 254),   // Cyan
			],
		}
	}

	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::aesthetic()
	}
}
