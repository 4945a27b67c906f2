//! Transition variables: scalars that rest, then glide to a new value.
//!
//! A [`TransitionVar`] sits at a constant value until a draw falls under its
//! transition chance. It then samples a target and a step count and moves
//! linearly towards the target, one step per [`TransitionVar::advance`].
//!
//! Variables can be entangled through a [`VarGraph`]: a follower never
//! triggers itself and only starts a transition when its leader does.

use thiserror::Error;

use super::random::UniformSource;

/// Distribution used to pick new targets and transition lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sampler {
	/// Always the same value.
	Constant(f64),
	/// Uniform over `[min, max)`.
	Uniform { min: f64, max: f64 },
	/// Sum-of-twelve approximation of a normal distribution.
	Normal { mu: f64, sigma: f64 },
}

impl Sampler {
	pub fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> f64 {
		match *self {
			Sampler::Constant(value) => value,
			Sampler::Uniform { min, max } => rng.range(min, max),
			Sampler::Normal { mu, sigma } => rng.normal(mu, sigma),
		}
	}
}

/// A scalar that occasionally glides to a freshly sampled value.
#[derive(Clone, Debug)]
pub struct TransitionVar {
	value: f64,
	velocity: f64,
	/// `None` once entangled: the variable never triggers itself.
	chance: Option<f64>,
	target: Sampler,
	duration: Sampler,
	steps: u32,
}

impl TransitionVar {
	/// Create a variable resting at a value drawn from `target`.
	pub fn new<R: UniformSource + ?Sized>(
		chance: f64,
		target: Sampler,
		duration: Sampler,
		rng: &mut R,
	) -> Self {
		Self {
			value: target.sample(rng),
			velocity: 0.0,
			chance: Some(chance),
			target,
			duration,
			steps: 0,
		}
	}

	/// A variable that never moves off `value`.
	pub fn constant(value: f64) -> Self {
		Self {
			value,
			velocity: 0.0,
			chance: Some(0.0),
			target: Sampler::Constant(value),
			duration: Sampler::Constant(0.0),
			steps: 0,
		}
	}

	pub fn value(&self) -> f64 {
		self.value
	}

	/// Per-step change while transitioning.
	pub fn velocity(&self) -> f64 {
		self.velocity
	}

	/// Remaining transition steps; zero means at rest.
	pub fn steps(&self) -> u32 {
		self.steps
	}

	pub fn is_resting(&self) -> bool {
		self.steps == 0
	}

	/// Whether the variable can start a transition on its own.
	pub fn is_entangled(&self) -> bool {
		self.chance.is_none()
	}

	/// Replace the sampler for future targets. The current glide is untouched.
	pub fn set_target(&mut self, target: Sampler) {
		self.target = target;
	}

	pub fn target(&self) -> Sampler {
		self.target
	}

	/// Advance one step with the shared draw `rand` and return the new value.
	pub fn advance<R: UniformSource + ?Sized>(&mut self, rand: f64, rng: &mut R) -> f64 {
		self.step(rand, rng);
		self.value
	}

	/// Advance one step; returns true if a transition began in this call.
	fn step<R: UniformSource + ?Sized>(&mut self, rand: f64, rng: &mut R) -> bool {
		if self.steps == 0 {
			match self.chance {
				Some(chance) if rand < chance => {
					self.begin_transition(rng);
					true
				}
				_ => false,
			}
		} else {
			self.value += self.velocity;
			self.steps -= 1;
			false
		}
	}

	fn begin_transition<R: UniformSource + ?Sized>(&mut self, rng: &mut R) {
		self.steps = (self.duration.sample(rng).floor() as u32).max(1);
		self.velocity = (self.target.sample(rng) - self.value) / self.steps as f64;
	}
}

/// Handle to a variable stored in a [`VarGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntangleError {
	#[error("a variable cannot be entangled to itself")]
	SelfLoop,
	#[error("entangling would create a cycle between variables")]
	Cycle,
	#[error("variable is already entangled to another leader")]
	AlreadyFollowing,
}

/// Transition variables plus a one-directional dependency table.
///
/// When a leader begins a transition every follower begins one too,
/// recursively, within the same call.
#[derive(Clone, Debug, Default)]
pub struct VarGraph {
	vars: Vec<TransitionVar>,
	followers: Vec<Vec<VarId>>,
	leader: Vec<Option<VarId>>,
}

impl VarGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, var: TransitionVar) -> VarId {
		self.vars.push(var);
		self.followers.push(Vec::new());
		self.leader.push(None);
		VarId(self.vars.len() - 1)
	}

	pub fn get(&self, id: VarId) -> &TransitionVar {
		&self.vars[id.0]
	}

	pub fn value(&self, id: VarId) -> f64 {
		self.vars[id.0].value
	}

	/// Make `follower` transition only when `leader` does.
	pub fn entangle(&mut self, leader: VarId, follower: VarId) -> Result<(), EntangleError> {
		if leader == follower {
			return Err(EntangleError::SelfLoop);
		}
		if self.leader[follower.0].is_some() {
			return Err(EntangleError::AlreadyFollowing);
		}
		// Walk up from the leader; reaching the follower means a cycle.
		let mut cursor = Some(leader);
		while let Some(id) = cursor {
			if id == follower {
				return Err(EntangleError::Cycle);
			}
			cursor = self.leader[id.0];
		}

		self.vars[follower.0].chance = None;
		self.leader[follower.0] = Some(leader);
		self.followers[leader.0].push(follower);
		Ok(())
	}

	/// Advance one variable, cascading a new transition to its followers.
	pub fn advance<R: UniformSource + ?Sized>(&mut self, id: VarId, rand: f64, rng: &mut R) -> f64 {
		self.step(id, rand, rng);
		self.vars[id.0].value
	}

	/// Like [`VarGraph::advance`], but reports whether `id` began a transition.
	pub fn step<R: UniformSource + ?Sized>(&mut self, id: VarId, rand: f64, rng: &mut R) -> bool {
		let began = self.vars[id.0].step(rand, rng);
		if began {
			self.cascade(id, rng);
		}
		began
	}

	fn cascade<R: UniformSource + ?Sized>(&mut self, id: VarId, rng: &mut R) {
		for i in 0..self.followers[id.0].len() {
			let follower = self.followers[id.0][i];
			self.vars[follower.0].begin_transition(rng);
			self.cascade(follower, rng);
		}
	}
}
