//! particle-network: A drifting field of glowing particles for the browser.
//!
//! This crate provides a WASM canvas component that renders particles moving on
//! slowly changing velocities, pushed by a gusting wind, and glowing brighter
//! as they approach one another.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	ConfigError, ParticleCanvas, ParticleNetwork, ParticleOptions, PowerPolicy,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-network: logging initialized");
}

/// Load options from a script element with id="particle-options".
/// Expected format: a JSON object with camelCase keys; missing keys keep defaults.
fn load_options() -> Option<ParticleOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<ParticleOptions>(&json_text) {
		Ok(options) => {
			info!(
				"particle-network: loaded options with {} colors, frame skip {}",
				options.colors.len(),
				options.frame_skip
			);
			Some(options)
		}
		Err(e) => {
			warn!("particle-network: failed to parse options: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads options from the DOM and renders a fullscreen particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_options().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-particles">
			<ParticleCanvas options=options fullscreen=true />
		</div>
	}
}
