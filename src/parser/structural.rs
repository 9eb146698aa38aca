use super::builder::TreeBuilder;
use super::keywords::Keywords;
use super::OutlineExtractor;
use crate::error::{OutlineError, Result};
use crate::ir::{flatten, Extraction, FileVariant, TestNode};

/// Parser → tree builder → path flattener.
pub struct StructuralExtractor {
    keywords: Keywords,
}

impl StructuralExtractor {
    pub fn new(keywords: Keywords) -> Self {
        Self { keywords }
    }

    /// Parse `content` and build the outline tree without flattening it.
    pub fn build_tree(&self, content: &str, variant: FileVariant) -> Result<Option<TestNode>> {
        let mut parser = tree_sitter::Parser::new();

        let lang = match variant {
            FileVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
            _ => tree_sitter_typescript::LANGUAGE_TSX,
        };

        parser
            .set_language(&lang.into())
            .map_err(|e| OutlineError::Parse {
                variant: variant.to_string(),
                message: format!("Failed to load grammar: {e}"),
            })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| OutlineError::Parse {
                variant: variant.to_string(),
                message: "tree-sitter returned no tree".into(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(OutlineError::Parse {
                variant: variant.to_string(),
                message: format!("syntax error near byte {}", first_error_offset(root)),
            });
        }

        Ok(TreeBuilder::new(&self.keywords, content.as_bytes()).build(root))
    }
}

impl OutlineExtractor for StructuralExtractor {
    fn supports(&self, variant: FileVariant) -> bool {
        variant.is_structural()
    }

    fn extract(&self, content: &str, variant: FileVariant) -> Result<Extraction> {
        let tree = self.build_tree(content, variant)?;
        Ok(flatten::flatten(tree.as_ref()))
    }
}

/// Start of the first ERROR or MISSING node, depth-first.
fn first_error_offset(node: tree_sitter::Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_byte();
    }
    let mut cursor = node.walk();
    let children: Vec<tree_sitter::Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find(|child| child.has_error())
        .map(first_error_offset)
        .unwrap_or_else(|| node.start_byte())
}
