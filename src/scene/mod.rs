//! # Scene Module
//!
//! An in-memory scene graph: named nodes in a parent/child hierarchy with a
//! local transform, a node kind, and a string-attribute map.
//!
//! [`SceneGraph`] implements [`SceneHost`], which makes it the stand-in for a
//! host application's scene in the standalone tool and in tests. Nodes are
//! arena-allocated and addressed by [`NodeId`]; the host trait addresses them
//! by full path instead, so sibling names are expected to be unique.

pub mod node;

pub use node::{Node, NodeId, NodeKind};

use log::debug;

use crate::host::{HostError, ObjectPath, SceneHost};

/// Scene graph holding nodes, hierarchy and the current selection.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    selection: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transform node under `parent`, or at the root when `None`.
    pub fn add_transform(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.add_node(Node::new(name, NodeKind::Transform, parent))
    }

    /// Adds a shape node under a transform.
    pub fn add_shape(&mut self, name: &str, parent: NodeId) -> NodeId {
        self.add_node(Node::new(name, NodeKind::Shape, Some(parent)))
    }

    fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        let parent = node.parent;
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Full path of a node, root first, e.g. `/Set_Village/Env/House_A`.
    pub fn path_of(&self, id: NodeId) -> ObjectPath {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        ObjectPath::new(format!("/{}", names.join("/")))
    }

    /// Resolves a full path back to a node id.
    pub fn resolve(&self, path: &ObjectPath) -> Option<NodeId> {
        let mut components = path.as_str().split('/').filter(|c| !c.is_empty());
        let first = components.next()?;
        let mut current = self
            .roots
            .iter()
            .copied()
            .find(|&id| self.nodes[id].name == first)?;
        for component in components {
            current = self.nodes[current]
                .children
                .iter()
                .copied()
                .find(|&id| self.nodes[id].name == component)?;
        }
        Some(current)
    }

    /// Depth-first flattening of the whole graph with per-node depth,
    /// in outliner display order.
    pub fn flattened(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for &child in self.nodes[id].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    // Selection management. The selection drives the resolver exactly like a
    // host application's active selection would.

    pub fn select(&mut self, id: NodeId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn toggle_selected(&mut self, id: NodeId) {
        match self.selection.iter().position(|&selected| selected == id) {
            Some(index) => {
                self.selection.remove(index);
            }
            None => self.selection.push(id),
        }
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> &[NodeId] {
        &self.selection
    }

    fn require(&self, object: &ObjectPath) -> Result<NodeId, HostError> {
        self.resolve(object)
            .ok_or_else(|| HostError::MissingObject(object.to_string()))
    }
}

impl SceneHost for SceneGraph {
    fn selection(&self) -> Vec<ObjectPath> {
        self.selection.iter().map(|&id| self.path_of(id)).collect()
    }

    fn is_transform(&self, object: &ObjectPath) -> bool {
        self.resolve(object)
            .map(|id| self.nodes[id].kind == NodeKind::Transform)
            .unwrap_or(false)
    }

    fn has_transform_children(&self, object: &ObjectPath) -> bool {
        self.resolve(object)
            .map(|id| {
                self.nodes[id]
                    .children
                    .iter()
                    .any(|&child| self.nodes[child].kind == NodeKind::Transform)
            })
            .unwrap_or(false)
    }

    fn transform_descendants(&self, object: &ObjectPath) -> Vec<ObjectPath> {
        let Some(id) = self.resolve(object) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.nodes[current].kind == NodeKind::Transform {
                out.push(self.path_of(current));
            }
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }

    fn parent(&self, object: &ObjectPath) -> Option<ObjectPath> {
        let id = self.resolve(object)?;
        self.nodes[id].parent.map(|parent| self.path_of(parent))
    }

    fn ensure_string_attribute(
        &mut self,
        object: &ObjectPath,
        name: &str,
    ) -> Result<(), HostError> {
        let id = self.require(object)?;
        self.nodes[id]
            .attributes
            .entry(name.to_owned())
            .or_default();
        Ok(())
    }

    fn string_attribute(
        &self,
        object: &ObjectPath,
        name: &str,
    ) -> Result<Option<String>, HostError> {
        let id = self.require(object)?;
        Ok(self.nodes[id].attributes.get(name).cloned())
    }

    fn set_string_attribute(
        &mut self,
        object: &ObjectPath,
        name: &str,
        value: &str,
    ) -> Result<(), HostError> {
        let id = self.require(object)?;
        debug!("set {object}.{name} = \"{value}\"");
        self.nodes[id]
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SceneGraph {
        let mut scene = SceneGraph::new();
        let set = scene.add_transform("Set", None);
        let env = scene.add_transform("Env", Some(set));
        let house = scene.add_transform("House_A", Some(env));
        scene.add_shape("House_AShape", house);
        scene
    }

    #[test]
    fn paths_resolve_both_ways() {
        let scene = sample();
        let path = ObjectPath::from("/Set/Env/House_A");
        let id = scene.resolve(&path).unwrap();
        assert_eq!(scene.path_of(id), path);
    }

    #[test]
    fn resolve_rejects_unknown_paths() {
        let scene = sample();
        assert_eq!(scene.resolve(&ObjectPath::from("/Set/Nope")), None);
        assert_eq!(scene.resolve(&ObjectPath::from("/Nope")), None);
    }

    #[test]
    fn shape_children_do_not_make_a_group() {
        let scene = sample();
        let house = ObjectPath::from("/Set/Env/House_A");
        assert!(!scene.has_transform_children(&house));
        assert!(scene.has_transform_children(&ObjectPath::from("/Set/Env")));
    }

    #[test]
    fn transform_descendants_skip_shapes() {
        let scene = sample();
        let descendants = scene.transform_descendants(&ObjectPath::from("/Set"));
        assert_eq!(descendants.len(), 2);
        assert!(descendants.contains(&ObjectPath::from("/Set/Env")));
        assert!(descendants.contains(&ObjectPath::from("/Set/Env/House_A")));
    }

    #[test]
    fn ensure_attribute_is_an_idempotent_upsert() {
        let mut scene = sample();
        let house = ObjectPath::from("/Set/Env/House_A");

        scene.ensure_string_attribute(&house, "GuerillaTags").unwrap();
        assert_eq!(
            scene.string_attribute(&house, "GuerillaTags").unwrap(),
            Some(String::new())
        );

        scene
            .set_string_attribute(&house, "GuerillaTags", "props,s2")
            .unwrap();
        scene.ensure_string_attribute(&house, "GuerillaTags").unwrap();
        assert_eq!(
            scene.string_attribute(&house, "GuerillaTags").unwrap(),
            Some("props,s2".to_owned())
        );
    }

    #[test]
    fn attribute_access_on_missing_objects_is_an_error() {
        let mut scene = sample();
        let ghost = ObjectPath::from("/Ghost");
        assert!(scene.ensure_string_attribute(&ghost, "GuerillaTags").is_err());
        assert!(scene.string_attribute(&ghost, "GuerillaTags").is_err());
    }

    #[test]
    fn toggling_selection_adds_and_removes() {
        let mut scene = sample();
        let set = scene.resolve(&ObjectPath::from("/Set")).unwrap();
        scene.toggle_selected(set);
        assert!(scene.is_selected(set));
        scene.toggle_selected(set);
        assert!(!scene.is_selected(set));
    }

    #[test]
    fn flattened_walk_is_depth_first_with_depths() {
        let scene = sample();
        let flat: Vec<(String, usize)> = scene
            .flattened()
            .into_iter()
            .map(|(id, depth)| (scene.node(id).name.clone(), depth))
            .collect();
        assert_eq!(
            flat,
            [
                ("Set".to_owned(), 0),
                ("Env".to_owned(), 1),
                ("House_A".to_owned(), 2),
                ("House_AShape".to_owned(), 3),
            ]
        );
    }
}
