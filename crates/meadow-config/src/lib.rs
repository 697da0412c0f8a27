//! Configuration schema and loading for the bunny meadow.
//!
//! Every field has a default, so an absent file yields the stock scene.

pub mod scene;

pub use scene::{
    BehaviorSection, BoundarySection, BunniesSection, MeadowConfig, RenderSection, SheetPaths,
    ViewportSection,
};
