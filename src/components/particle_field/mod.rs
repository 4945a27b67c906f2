//! Glowing particle field rendered on an HTML canvas.
//!
//! Particles drift on smoothly changing velocities, pushed by a shared wind,
//! and glow brighter the closer they are to their nearest neighbour:
//! - Transition variables give velocity, size and wind their slow glides
//! - Wind direction is entangled to wind speed so gusts turn as they swell
//! - An all-pairs Manhattan-distance scan drives a squared glow falloff
//! - Optional frame skipping and battery-driven slowdown save power
//!
//! # Example
//!
//! ```ignore
//! use particle_network::{ParticleCanvas, ParticleOptions};
//!
//! let options = ParticleOptions {
//!     colors: vec!["#fffb96".into(), "#01cdfe".into()],
//!     frame_skip: 0,
//!     ..Default::default()
//! };
//!
//! view! { <ParticleCanvas options=options fullscreen=true /> }
//! ```

mod component;
mod config;
mod network;
mod palette;
mod particle;
mod power;
mod random;
mod render;
mod schedule;
mod tvar;
mod wind;

pub use component::ParticleCanvas;
pub use config::{ConfigError, ParticleOptions};
pub use network::{ParticleNetwork, RunState, glow, nearest_distances};
pub use palette::{Color, Palette, ParseColorError};
pub use particle::{Bounds, Particle, ParticleTuning, Placement, SpawnPolicy, wrap};
pub use power::{PowerCommand, PowerPolicy};
pub use random::{MathRandom, UniformSource};
pub use render::{ArrowHead, ArrowPath, Surface};
pub use schedule::{AnimationFrames, FrameScheduler};
pub use tvar::{EntangleError, Sampler, TransitionVar, VarGraph, VarId};
pub use wind::Wind;
