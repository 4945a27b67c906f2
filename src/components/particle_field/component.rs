//! Leptos component wrapping the particle canvas.
//!
//! The component creates an HTML canvas, builds a [`ParticleNetwork`] sized to
//! it and drives the network from `requestAnimationFrame`. An optional battery
//! level signal slows the particles down or suspends the animation entirely.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::ParticleOptions;
use super::network::ParticleNetwork;
use super::power::{PowerCommand, PowerPolicy};
use super::random::MathRandom;
use super::schedule::AnimationFrames;

/// Bundles the running network with the context it draws into.
struct FieldContext {
	network: ParticleNetwork<MathRandom>,
	ctx: CanvasRenderingContext2d,
}

impl FieldContext {
	fn apply_power(&mut self, command: PowerCommand, frames: &AnimationFrames) {
		match command {
			PowerCommand::Run(scale) => {
				info!("particle-network: scale is now {:.2}", scale);
				self.network.start_scaled(scale, &mut self.ctx, frames);
			}
			PowerCommand::Suspend => {
				info!("particle-network: network in power save mode");
				self.network.stop();
			}
		}
	}
}

/// Renders a drifting, glowing particle field on a canvas element.
///
/// Options are read once when the canvas mounts. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport. Explicit `width`/`height` override automatic sizing. Pass a
/// battery `power` level (0-100) to throttle motion according to `policy`.
/// Clicking the canvas pauses and resumes the animation.
#[component]
pub fn ParticleCanvas(
	#[prop(into)] options: Signal<ParticleOptions>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] power: Option<Signal<f64>>,
	#[prop(optional)] policy: PowerPolicy,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let frames = AnimationFrames::new();
	let (wind_text, set_wind_text) = signal(String::new());
	let (ready, set_ready) = signal(false);
	let debug = options.with_untracked(|o| o.debug);
	let (context_init, frames_init) = (context.clone(), frames.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-network: no window to draw in");
			return;
		};

		let (w, h) = if fullscreen {
			(viewport_extent(window.inner_width()), viewport_extent(window.inner_height()))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("particle-network: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("particle-network: canvas has no 2d context");
				return;
			}
		};

		let network = match ParticleNetwork::new(options.get_untracked(), w, h, MathRandom) {
			Ok(network) => network,
			Err(e) => {
				warn!("particle-network: rejected options: {}", e);
				return;
			}
		};
		*context_init.borrow_mut() = Some(FieldContext { network, ctx });

		let (context_anim, frames_anim) = (context_init.clone(), frames_init.clone());
		frames_init.set_callback(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.network.on_frame(&mut c.ctx, &frames_anim);
				if debug && c.network.wind().shifted() {
					let wind = c.network.wind();
					set_wind_text.set(format!(
						"Wind: {:.2}° @ {:.2}",
						wind.direction(),
						wind.speed()
					));
				}
			}
		}));

		// With a power signal the power effect decides whether to start.
		if power.is_none() {
			if let Some(ref mut c) = *context_init.borrow_mut() {
				c.network.start(&mut c.ctx, &frames_init);
			}
		}
		set_ready.set(true);
	});

	if let Some(level) = power {
		let (context_power, frames_power) = (context.clone(), frames.clone());
		Effect::new(move |_| {
			if !ready.get() {
				return;
			}
			let command = policy.command(level.get());
			if let Some(ref mut c) = *context_power.borrow_mut() {
				c.apply_power(command, &frames_power);
			}
		});
	}

	let context_click = context.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_click.borrow_mut() {
			c.network.toggle(&mut c.ctx, &frames);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			on:click=on_click
			style="display: block;"
		/>
		{debug.then(|| view! { <div class="particle-debug">{move || wind_text.get()}</div> })}
	}
}

fn viewport_extent(value: Result<JsValue, JsValue>) -> f64 {
	value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}
