//! Host infrastructure for the bunny meadow.
//!
//! Everything here is independent of the bunnies themselves: logging with a
//! console ring buffer, the interval timer the behavior driver runs on, the
//! frame-rate meter, the event bus, and the splash/loading state.

pub mod bus;
pub mod console;
pub mod event;
pub mod fps;
pub mod logging;
pub mod splash;
pub mod state;
pub mod timer;
