//! # Tagging Module
//!
//! The core of the tool: turning a selection plus a handful of choices into
//! `GuerillaTags` attribute values on leaf transforms.
//!
//! ## Key Components
//!
//! - [`resolver`] - expands the selection to the leaf transforms to tag
//! - [`composer`] - builds the comma-joined tag string for one object
//! - [`session`] - the per-invocation state machine, including the one-time
//!   overwrite confirmation
//! - [`options`] - the closed option sets behind the tool's radio groups
//!
//! Everything here runs against the [`SceneHost`] trait, so the same code
//! drives the standalone application and the test suite.
//!
//! [`SceneHost`]: crate::host::SceneHost

pub mod composer;
pub mod options;
pub mod resolver;
pub mod session;

pub use composer::compose_tags;
pub use options::{AssetCategory, HierarchyMode, SubdivisionLevel, TagOptions};
pub use resolver::resolve_leaf_transforms;
pub use session::{
    OverwriteDecision, SessionEvent, SessionState, SkipReason, TagReport, TagSession,
};

use thiserror::Error;

/// Name of the string attribute the tool writes on every tagged transform.
pub const TAG_ATTRIBUTE: &str = "GuerillaTags";

/// Invocation-level failures. Everything per-object is a warning instead.
#[derive(Debug, Error)]
pub enum TagError {
    /// Nothing was selected when Apply was pressed; the invocation aborts
    /// before touching the scene.
    #[error("no objects selected")]
    NoSelection,
}
