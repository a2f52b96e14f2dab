//! Tag string composition.
//!
//! One function builds the full comma-joined value written into the
//! `GuerillaTags` attribute: the category/level pair, the hierarchy tokens
//! for the chosen mode, and the artist's free-form text.

use crate::host::{ObjectPath, SceneHost};

use super::{HierarchyMode, TagOptions};

/// Composes the tag string for one leaf transform.
///
/// Starts from `"{category},{level}"`, appends the hierarchy tokens for the
/// invocation's [`HierarchyMode`], then appends the free-form extra text
/// verbatim when present. Free-form text is not re-split or validated; only
/// dangling separators at the end of the result are trimmed, so a trailing
/// comma typed by the artist never reaches the attribute.
pub fn compose_tags<H: SceneHost>(host: &H, object: &ObjectPath, options: &TagOptions) -> String {
    let mut tags = format!("{},{}", options.category.as_str(), options.level.as_str());

    match options.hierarchy {
        HierarchyMode::FullHierarchy => {
            for name in hierarchy_names(host, object, true) {
                tags.push(',');
                tags.push_str(&name);
            }
        }
        HierarchyMode::GroupHierarchy => {
            for name in hierarchy_names(host, object, false) {
                tags.push(',');
                tags.push_str(&name);
            }
        }
        HierarchyMode::ObjectName => {
            tags.push(',');
            tags.push_str(object.short_name());
        }
        HierarchyMode::None => {}
    }

    if !options.extra_tags.is_empty() {
        tags.push(',');
        tags.push_str(&options.extra_tags);
    }

    let trimmed = tags.trim_end_matches(',').len();
    tags.truncate(trimmed);
    tags
}

/// Short names from the root down to `object`. The object's own name is the
/// last entry and only present when `include_self` is set.
fn hierarchy_names<H: SceneHost>(
    host: &H,
    object: &ObjectPath,
    include_self: bool,
) -> Vec<String> {
    let mut names = Vec::new();
    if include_self {
        names.push(object.short_name().to_owned());
    }

    // Walk bottom-up, then flip to root-to-leaf order.
    let mut current = host.parent(object);
    while let Some(ancestor) = current {
        names.push(ancestor.short_name().to_owned());
        current = host.parent(&ancestor);
    }
    names.reverse();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;
    use crate::tagging::{AssetCategory, SubdivisionLevel};

    fn options(hierarchy: HierarchyMode, extra: &str) -> TagOptions {
        TagOptions {
            category: AssetCategory::Props,
            level: SubdivisionLevel::S2,
            hierarchy,
            extra_tags: extra.to_owned(),
        }
    }

    /// `/Root/Grp1/Prop_A`
    fn nested_scene() -> (SceneGraph, ObjectPath) {
        let mut scene = SceneGraph::new();
        let root = scene.add_transform("Root", None);
        let grp = scene.add_transform("Grp1", Some(root));
        scene.add_transform("Prop_A", Some(grp));
        (scene, ObjectPath::from("/Root/Grp1/Prop_A"))
    }

    #[test]
    fn none_mode_is_just_category_and_level() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::None, ""));
        assert_eq!(tags, "props,s2");
    }

    #[test]
    fn object_name_appends_the_short_name() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::ObjectName, ""));
        assert_eq!(tags, "props,s2,Prop_A");
    }

    #[test]
    fn full_hierarchy_is_root_to_leaf() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::FullHierarchy, ""));
        assert_eq!(tags, "props,s2,Root,Grp1,Prop_A");
    }

    #[test]
    fn group_hierarchy_excludes_the_object_itself() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::GroupHierarchy, ""));
        assert_eq!(tags, "props,s2,Root,Grp1");
    }

    #[test]
    fn group_hierarchy_of_a_root_object_adds_nothing() {
        let mut scene = SceneGraph::new();
        scene.add_transform("Loner", None);
        let tags = compose_tags(
            &scene,
            &ObjectPath::from("/Loner"),
            &options(HierarchyMode::GroupHierarchy, ""),
        );
        assert_eq!(tags, "props,s2");
    }

    #[test]
    fn extra_tags_pass_through_verbatim() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(
            &scene,
            &prop,
            &options(HierarchyMode::ObjectName, "hero,metal"),
        );
        assert_eq!(tags, "props,s2,Prop_A,hero,metal");
    }

    #[test]
    fn trailing_separators_are_trimmed() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::None, "hero,,"));
        assert_eq!(tags, "props,s2,hero");
    }

    #[test]
    fn interior_empty_tokens_survive_as_typed() {
        let (scene, prop) = nested_scene();
        let tags = compose_tags(&scene, &prop, &options(HierarchyMode::None, "a,,b"));
        assert_eq!(tags, "props,s2,a,,b");
    }
}
