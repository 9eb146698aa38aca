use std::collections::BTreeMap;

use super::tree::{NodeKind, TestNode};
use super::{Extraction, ModuleEntry, TestEntry};

/// Flatten an outline tree into ordered module and test paths.
///
/// The root itself is never emitted. Tests reached with an empty prefix
/// (no enclosing module) are dropped.
pub fn flatten(root: Option<&TestNode>) -> Extraction {
    let mut out = Extraction::default();
    if let Some(root) = root {
        for child in &root.children {
            visit(child, "", &mut out.modules, &mut out.tests, &mut out.module_tests);
        }
    }
    out
}

fn visit(
    node: &TestNode,
    prefix: &str,
    modules: &mut Vec<ModuleEntry>,
    tests: &mut Vec<TestEntry>,
    module_tests: &mut BTreeMap<String, Vec<String>>,
) {
    match node.kind {
        NodeKind::Module => {
            let full_path = if prefix.is_empty() {
                node.name.clone()
            } else {
                format!("{} > {}", prefix, node.name)
            };
            modules.push(ModuleEntry {
                path: full_path.clone(),
                position: node.position,
            });
            for child in &node.children {
                visit(child, &full_path, modules, tests, module_tests);
            }
        }
        NodeKind::Test => {
            if prefix.is_empty() {
                return;
            }
            tests.push(TestEntry::new(prefix, &node.name, node.position));
            module_tests
                .entry(prefix.to_string())
                .or_default()
                .push(node.name.clone());
        }
    }
}
