//! Invocation-wide tag choices.
//!
//! The option sets mirror the tool's radio groups: an asset category, a
//! subdivision level, and a hierarchy mode, plus one free-form text field.
//! Each closed set exposes `all()` and `as_str()` so UI code can loop over
//! the variants the same way for every group.

/// Asset category, the first token of every tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetCategory {
    #[default]
    Sets,
    Characters,
    Props,
    Setdress,
}

impl AssetCategory {
    pub fn all() -> [AssetCategory; 4] {
        [Self::Sets, Self::Characters, Self::Props, Self::Setdress]
    }

    /// Serialized form, as written into the attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sets => "sets",
            Self::Characters => "characters",
            Self::Props => "props",
            Self::Setdress => "setdress",
        }
    }
}

/// Subdivision level, the second token of every tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubdivisionLevel {
    S0,
    S1,
    #[default]
    S2,
    S3,
    S4,
}

impl SubdivisionLevel {
    pub fn all() -> [SubdivisionLevel; 5] {
        [Self::S0, Self::S1, Self::S2, Self::S3, Self::S4]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S0 => "s0",
            Self::S1 => "s1",
            Self::S2 => "s2",
            Self::S3 => "s3",
            Self::S4 => "s4",
        }
    }
}

/// How ancestor names are folded into the tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyMode {
    /// The object's own short name plus every ancestor, root first.
    #[default]
    FullHierarchy,
    /// Ancestors only, root first; the object's own name is left out.
    GroupHierarchy,
    /// Only the object's own short name.
    ObjectName,
    /// No hierarchy tokens at all.
    None,
}

impl HierarchyMode {
    pub fn all() -> [HierarchyMode; 4] {
        [
            Self::FullHierarchy,
            Self::GroupHierarchy,
            Self::ObjectName,
            Self::None,
        ]
    }

    /// Radio-button label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullHierarchy => "Full hierarchy",
            Self::GroupHierarchy => "Group hierarchy",
            Self::ObjectName => "Object name",
            Self::None => "None",
        }
    }
}

/// Everything the artist picked for one Apply press. Fixed for the whole
/// invocation; per-object variation comes only from the hierarchy walk.
#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    pub category: AssetCategory,
    pub level: SubdivisionLevel,
    pub hierarchy: HierarchyMode,
    /// Free-form comma-separated text, appended verbatim when non-empty.
    pub extra_tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tool_window() {
        let options = TagOptions::default();
        assert_eq!(options.category, AssetCategory::Sets);
        assert_eq!(options.level, SubdivisionLevel::S2);
        assert_eq!(options.hierarchy, HierarchyMode::FullHierarchy);
        assert!(options.extra_tags.is_empty());
    }

    #[test]
    fn serialized_forms_are_lowercase() {
        assert_eq!(AssetCategory::Setdress.as_str(), "setdress");
        assert_eq!(SubdivisionLevel::S4.as_str(), "s4");
    }
}
