//! Maps a battery level to a motion scale, or to suspending the animation.

/// What the network should do at a given power level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerCommand {
	/// Keep animating with motion scaled by a factor in `[0, 1]`.
	Run(f64),
	/// Stop animating to save power.
	Suspend,
}

/// Power-saving policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerPolicy {
	/// Battery percentage at or below which the animation is suspended.
	pub cutoff: f64,
}

impl Default for PowerPolicy {
	fn default() -> Self {
		Self { cutoff: 75.0 }
	}
}

impl PowerPolicy {
	/// Map a battery level (0-100) to a command. Motion scales linearly from 0
	/// just above the cutoff to 1 at a full battery.
	pub fn command(&self, level: f64) -> PowerCommand {
		let level = level.clamp(0.0, 100.0);
		if level > self.cutoff && self.cutoff < 100.0 {
			PowerCommand::Run(((level - self.cutoff) / (100.0 - self.cutoff)).clamp(0.0, 1.0))
		} else {
			PowerCommand::Suspend
		}
	}
}
