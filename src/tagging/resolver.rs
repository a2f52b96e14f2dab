//! Selection resolution.
//!
//! Expands the host's current selection into the concrete set of leaf
//! transforms that should receive tags. Groups are never tagged themselves;
//! selecting one tags every leaf underneath it.

use std::collections::HashSet;

use log::debug;

use crate::host::{ObjectKind, ObjectPath, SceneHost};

use super::TagError;

/// Resolves the current selection to the leaf transforms to tag.
///
/// For every selected transform this collects the leaf transforms among its
/// descendants, and the selected object itself when it has no transform
/// children (a directly selected leaf, or an empty group). Non-transform
/// selection entries are ignored. The result is deduplicated - an object
/// reachable through several selected ancestors is returned once - and keeps
/// first-seen order so batch processing is deterministic.
///
/// # Errors
///
/// [`TagError::NoSelection`] when nothing is selected; the caller must not
/// have mutated anything yet.
pub fn resolve_leaf_transforms<H: SceneHost>(host: &H) -> Result<Vec<ObjectPath>, TagError> {
    let selection = host.selection();
    if selection.is_empty() {
        return Err(TagError::NoSelection);
    }

    let mut seen = HashSet::new();
    let mut leaves = Vec::new();

    for object in selection {
        if !host.is_transform(&object) {
            continue;
        }

        if host.kind(&object) == ObjectKind::Leaf && seen.insert(object.clone()) {
            leaves.push(object.clone());
        }

        for descendant in host.transform_descendants(&object) {
            if host.kind(&descendant) == ObjectKind::Leaf && seen.insert(descendant.clone()) {
                leaves.push(descendant);
            }
        }
    }

    debug!("selection resolved to {} leaf transform(s)", leaves.len());
    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    /// `/Set` with two leaf props under `/Set/Props` and a camera shape.
    fn sample_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        let set = scene.add_transform("Set", None);
        let props = scene.add_transform("Props", Some(set));
        let prop_a = scene.add_transform("Prop_A", Some(props));
        scene.add_shape("Prop_AShape", prop_a);
        scene.add_transform("Prop_B", Some(props));
        scene
    }

    #[test]
    fn group_selection_yields_only_leaf_descendants() {
        let mut scene = sample_scene();
        let set = scene.resolve(&ObjectPath::from("/Set")).unwrap();
        scene.select(set);

        let leaves = resolve_leaf_transforms(&scene).unwrap();
        let paths: Vec<&str> = leaves.iter().map(ObjectPath::as_str).collect();
        assert_eq!(paths, ["/Set/Props/Prop_A", "/Set/Props/Prop_B"]);
    }

    #[test]
    fn selected_leaf_is_included_directly() {
        let mut scene = sample_scene();
        let prop = scene.resolve(&ObjectPath::from("/Set/Props/Prop_A")).unwrap();
        scene.select(prop);

        let leaves = resolve_leaf_transforms(&scene).unwrap();
        assert_eq!(leaves, [ObjectPath::from("/Set/Props/Prop_A")]);
    }

    #[test]
    fn empty_group_is_its_own_leaf() {
        let mut scene = SceneGraph::new();
        let group = scene.add_transform("EmptyGrp", None);
        scene.select(group);

        let leaves = resolve_leaf_transforms(&scene).unwrap();
        assert_eq!(leaves, [ObjectPath::from("/EmptyGrp")]);
    }

    #[test]
    fn overlapping_ancestors_do_not_duplicate_leaves() {
        let mut scene = sample_scene();
        let set = scene.resolve(&ObjectPath::from("/Set")).unwrap();
        let props = scene.resolve(&ObjectPath::from("/Set/Props")).unwrap();
        let prop_a = scene.resolve(&ObjectPath::from("/Set/Props/Prop_A")).unwrap();
        scene.select(set);
        scene.select(props);
        scene.select(prop_a);

        let leaves = resolve_leaf_transforms(&scene).unwrap();
        assert_eq!(leaves.len(), 2);
    }

    #[test]
    fn non_transform_selection_entries_are_ignored() {
        let mut scene = sample_scene();
        let shape = scene
            .resolve(&ObjectPath::from("/Set/Props/Prop_A/Prop_AShape"))
            .unwrap();
        scene.select(shape);

        let leaves = resolve_leaf_transforms(&scene).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn empty_selection_is_an_error() {
        let scene = sample_scene();
        assert!(matches!(
            resolve_leaf_transforms(&scene),
            Err(TagError::NoSelection)
        ));
    }
}
