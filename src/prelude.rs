//! # GTags Prelude
//!
//! One-stop import for typical uses of the crate:
//!
//! ```rust
//! use gtags::prelude::*;
//! ```
//!
//! This covers building a scene, driving a tagging session against it, and
//! running the standalone application.

// Re-export core application types
pub use crate::app::GtagsApp;
pub use crate::default;

// Re-export the host seam
pub use crate::host::{HostError, Interaction, NoticeLevel, ObjectKind, ObjectPath, SceneHost};

// Re-export scene types
pub use crate::scene::{Node, NodeId, NodeKind, SceneGraph};

// Re-export the tagging core
pub use crate::tagging::{
    compose_tags, resolve_leaf_transforms, AssetCategory, HierarchyMode, SubdivisionLevel,
    TagError, TagOptions, TagReport, TagSession, TAG_ATTRIBUTE,
};

// Re-export UI types
pub use crate::ui::{GtagsTool, UiManager};

// Re-export common external dependencies
pub use cgmath::Vector3;
pub use imgui::Ui;
