//! # Host Abstraction Module
//!
//! The tagging core never talks to a concrete application directly. Everything
//! it needs from the surrounding environment is funneled through two small
//! traits:
//!
//! - [`SceneHost`] - scene-graph queries and string-attribute access
//! - [`Interaction`] - modal confirmation and info/warning notices
//!
//! The in-memory [`SceneGraph`] implements [`SceneHost`] and backs both the
//! standalone application and the test suite. An integration against a real
//! content-creation package only has to supply these two traits.
//!
//! [`SceneGraph`]: crate::scene::SceneGraph

use std::fmt;

use thiserror::Error;

/// Full hierarchical path of a scene object, e.g. `/Set_Village/Env/House_A`.
///
/// Paths are the identity the tagging core passes around; how they resolve to
/// actual nodes is the host's business. The final path component is the
/// object's short name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath(String);

impl ObjectPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path component.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectPath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

/// Classification of a transform by its transform children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Has at least one transform child.
    Group,
    /// Has no transform children; this is what gets tagged.
    Leaf,
}

/// Error surface for host-side scene access.
///
/// Per-object failures are reported as warnings by the tagging session and
/// never abort a batch.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("object not found: {0}")]
    MissingObject(String),

    #[error("attribute access failed on {object}: {message}")]
    Attribute { object: String, message: String },
}

/// Scene-graph surface consumed by the tagging core.
///
/// Implementations resolve [`ObjectPath`]s to their own node handles; the
/// core treats paths as opaque beyond splitting off short names.
pub trait SceneHost {
    /// Currently selected objects, as full paths. May be empty.
    fn selection(&self) -> Vec<ObjectPath>;

    /// Whether the object is a transform node (as opposed to shapes and
    /// other non-transform node types).
    fn is_transform(&self, object: &ObjectPath) -> bool;

    /// Whether the object has at least one transform child.
    fn has_transform_children(&self, object: &ObjectPath) -> bool;

    /// All transform descendants of the object, any depth.
    fn transform_descendants(&self, object: &ObjectPath) -> Vec<ObjectPath>;

    /// Parent of the object, `None` at the scene root.
    fn parent(&self, object: &ObjectPath) -> Option<ObjectPath>;

    /// Creates the named string attribute on the object if it does not exist
    /// yet. Idempotent upsert; an already-present attribute is left alone.
    fn ensure_string_attribute(&mut self, object: &ObjectPath, name: &str)
        -> Result<(), HostError>;

    /// Reads a string attribute. `Ok(None)` when the attribute is absent.
    fn string_attribute(&self, object: &ObjectPath, name: &str)
        -> Result<Option<String>, HostError>;

    /// Writes a string attribute, replacing any previous value.
    fn set_string_attribute(
        &mut self,
        object: &ObjectPath,
        name: &str,
        value: &str,
    ) -> Result<(), HostError>;

    /// Classifies a transform by the presence of transform children.
    fn kind(&self, object: &ObjectPath) -> ObjectKind {
        if self.has_transform_children(object) {
            ObjectKind::Group
        } else {
            ObjectKind::Leaf
        }
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-facing dialog surface for blocking drivers.
///
/// Hosts with a modal dialog toolkit implement [`confirm`] as a real modal;
/// the standalone ImGui front end drives the session step-by-step instead and
/// renders its own popup, so it never goes through this trait.
///
/// [`confirm`]: Interaction::confirm
pub trait Interaction {
    /// Modal yes/no question. Dismissing the dialog counts as "no".
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// One-line notice on the host's info/warning surface.
    fn notify(&mut self, level: NoticeLevel, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_is_last_component() {
        let path = ObjectPath::from("/Set_Village/Env/House_A");
        assert_eq!(path.short_name(), "House_A");
    }

    #[test]
    fn short_name_of_root_level_object() {
        assert_eq!(ObjectPath::from("/Root").short_name(), "Root");
    }
}
