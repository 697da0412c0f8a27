//! Terminal rendering for the bunny meadow.
//!
//! The scene is painted into a [`canvas::Canvas`] and written out as
//! half-block cells; HUD, splash and console overlay are plain ratatui
//! widgets. State lives in [`meadow_agent`] and [`meadow_core`].

pub mod canvas;
pub mod console;
pub mod hud;
pub mod layout;
pub mod meadow;
pub mod splash;
