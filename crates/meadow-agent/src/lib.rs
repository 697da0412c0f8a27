//! Autonomous bunnies for the meadow showcase.
//!
//! Each [`Agent`] owns a facing/motion [`State`] and a sprite whose frame
//! always matches it (see [`clip`]). A [`BehaviorDriver`] re-rolls states on
//! a fixed interval, a [`BoundaryGuard`] turns bunnies around at the edges,
//! and a [`Scene`] ties both to the per-frame update.
//!
//! # Quick start
//!
//! ```no_run
//! use std::time::Instant;
//! use meadow_agent::{load_default_sheet, Scene, SceneRng};
//! use meadow_config::MeadowConfig;
//!
//! let config = MeadowConfig::default();
//! let now = Instant::now();
//! let mut rng = SceneRng::new(42);
//! let mut scene = Scene::from_config(&config, load_default_sheet().unwrap(), &mut rng, now).unwrap();
//! scene.poll_behavior(now);
//! scene.frame_tick(now);
//! ```

pub mod agent;
pub mod boundary;
pub mod clip;
mod default_pack;
pub mod driver;
pub mod loader;
pub mod rng;
pub mod scene;
pub mod scenery;
pub mod sprite;
#[cfg(test)]
mod testing;
mod types;

pub use agent::Agent;
pub use boundary::BoundaryGuard;
pub use default_pack::load_default_sheet;
pub use driver::{BehaviorDriver, DecisionSource};
pub use rng::SceneRng;
pub use scene::{Scene, World};
pub use scenery::{Bush, Scenery};
pub use sprite::{AnimatedSprite, Sprite};
pub use types::{AgentId, Facing, Frame, Position, SpriteSheet, State};
