use tree_sitter::Node;

use super::keywords::Keywords;
use super::syntax::{self, Call, Statement};
use crate::ir::TestNode;

/// What visiting a single statement contributes to its parent's children.
#[derive(Debug)]
pub enum Visit {
    None,
    One(TestNode),
    /// Nodes found through a transparent construct (loop or iteration
    /// callback), spliced into the current level.
    Many(Vec<TestNode>),
}

impl Visit {
    fn append_to(self, out: &mut Vec<TestNode>) {
        match self {
            Visit::None => {}
            Visit::One(node) => out.push(node),
            Visit::Many(nodes) => out.extend(nodes),
        }
    }
}

/// Builds a module/test tree from a parsed program.
pub struct TreeBuilder<'a> {
    keywords: &'a Keywords,
    source: &'a [u8],
}

impl<'a> TreeBuilder<'a> {
    pub fn new(keywords: &'a Keywords, source: &'a [u8]) -> Self {
        Self { keywords, source }
    }

    /// Walk the program body. Returns `None` when nothing was declared.
    pub fn build(&self, program: Node) -> Option<TestNode> {
        let children = self.walk(program);
        if children.is_empty() {
            None
        } else {
            Some(TestNode::root(children))
        }
    }

    fn walk(&self, block: Node) -> Vec<TestNode> {
        let mut out = Vec::new();
        for stmt in syntax::statements(block) {
            self.visit(stmt).append_to(&mut out);
        }
        out
    }

    fn visit(&self, stmt: Node) -> Visit {
        match syntax::classify(stmt, self.source) {
            Statement::Call(call) => self.visit_call(stmt, &call),
            Statement::Loop(body) => Visit::Many(self.walk(body)),
            Statement::Other => Visit::None,
        }
    }

    fn visit_call(&self, stmt: Node, call: &Call) -> Visit {
        let position = stmt.start_byte();

        if self.keywords.is_module(&call.name) {
            let children = call
                .callback_at(1)
                .map(|body| self.walk(body))
                .unwrap_or_default();
            return Visit::One(TestNode::module(call.first_name(), position, children));
        }

        if self.keywords.is_test(&call.name) {
            return Visit::One(TestNode::test(call.first_name(), position));
        }

        if self.keywords.is_iterator(&call.name) {
            if let Some(body) = call.callback_at(0) {
                return Visit::Many(self.walk(body));
            }
        }

        Visit::None
    }
}
