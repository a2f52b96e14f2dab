use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix, Vector3};

/// Index of a node inside its [`SceneGraph`].
///
/// [`SceneGraph`]: super::SceneGraph
pub type NodeId = usize;

/// Node type. Only transforms participate in tagging; shapes exist so the
/// sample scenes look like real ones (a leaf transform usually carries a
/// shape child).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Transform,
    Shape,
}

/// One scene-graph node.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub transform: Matrix4<f32>,
    pub attributes: HashMap<String, String>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
            transform: Matrix4::identity(),
            attributes: HashMap::new(),
        }
    }

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Apply translation (multiplies with existing transform)
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.transform = self.transform * Matrix4::from_translation(translation);
    }
}
