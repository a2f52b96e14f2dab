//! # User Interface Module
//!
//! Dear ImGui front end for the tool, rendered as an overlay on the wgpu
//! surface.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`GtagsTool`] - the tool window (radio groups, extra tags, Apply,
//!   overwrite confirmation, notification footer)
//! - [`scene_outliner`] - selection-driving outliner for the standalone app
//!
//! The tool window talks to the scene only through the same tagging core the
//! tests use; the UI layer holds no tagging logic of its own beyond feeding
//! the session and showing its events.

pub mod manager;
pub mod outliner;
pub mod tool;

pub use manager::UiManager;
pub use outliner::scene_outliner;
pub use tool::GtagsTool;
