use serde::{Deserialize, Serialize};

/// Display name of the synthetic node anchoring every outline tree.
pub const ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Module,
    Test,
}

/// A module or test declaration in tree form.
///
/// Only modules carry children; tests are always leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    pub kind: NodeKind,
    /// Declared display name. Empty when the first argument is neither a
    /// string nor a template literal.
    pub name: String,
    /// Byte offset of the declaring statement.
    pub position: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestNode>,
}

impl TestNode {
    pub fn module(name: impl Into<String>, position: usize, children: Vec<TestNode>) -> Self {
        Self {
            kind: NodeKind::Module,
            name: name.into(),
            position,
            children,
        }
    }

    pub fn test(name: impl Into<String>, position: usize) -> Self {
        Self {
            kind: NodeKind::Test,
            name: name.into(),
            position,
            children: Vec::new(),
        }
    }

    /// The synthetic root: a module named "Root" at offset 0.
    pub fn root(children: Vec<TestNode>) -> Self {
        Self::module(ROOT_NAME, 0, children)
    }

    pub fn is_module(&self) -> bool {
        self.kind == NodeKind::Module
    }
}
