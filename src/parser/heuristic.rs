use regex::Regex;

use super::keywords::Keywords;
use super::{names, OutlineExtractor};
use crate::error::{OutlineError, Result};
use crate::ir::{Extraction, FileVariant, ModuleEntry, TestEntry};

/// Raw text of a single-quoted, double-quoted or template literal.
const NAME_LITERAL: &str = r#""(?:[^"\\\n]|\\[\s\S])*"|'(?:[^'\\\n]|\\[\s\S])*'|`(?:[^`\\]|\\[\s\S])*`"#;

/// Text-only outline extraction for files that embed `<template>` markup.
///
/// No syntax tree is built, so there is no nesting: every test belongs to
/// the closest module call that appears before it in the file.
pub struct HeuristicExtractor {
    module_re: Regex,
    test_re: Regex,
}

/// A keyword call found in raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Occurrence {
    name: String,
    position: usize,
}

impl HeuristicExtractor {
    pub fn new(keywords: &Keywords) -> Result<Self> {
        keywords.validate()?;
        Ok(Self {
            module_re: call_pattern(&keywords.modules)?,
            test_re: call_pattern(&keywords.tests)?,
        })
    }
}

impl OutlineExtractor for HeuristicExtractor {
    fn supports(&self, _variant: FileVariant) -> bool {
        true
    }

    fn extract(&self, content: &str, _variant: FileVariant) -> Result<Extraction> {
        let modules = scan(&self.module_re, content);
        let tests = scan(&self.test_re, content);

        let mut out = Extraction {
            modules: modules
                .iter()
                .map(|m| ModuleEntry {
                    path: m.name.clone(),
                    position: m.position,
                })
                .collect(),
            ..Extraction::default()
        };

        for test in tests {
            // Both lists come out of the scan sorted by offset.
            let preceding = modules.partition_point(|m| m.position < test.position);
            let Some(module) = preceding.checked_sub(1).map(|i| &modules[i]) else {
                tracing::debug!(test = %test.name, "test before any module, dropped");
                continue;
            };
            out.tests
                .push(TestEntry::new(&module.name, &test.name, test.position));
            out.module_tests
                .entry(module.name.clone())
                .or_default()
                .push(test.name);
        }

        Ok(out)
    }
}

fn call_pattern(words: &[String]) -> Result<Regex> {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?:^|[^\w$])(?P<kw>{alternatives})\s*\(\s*(?P<lit>{NAME_LITERAL})");
    Regex::new(&pattern).map_err(|e| OutlineError::Config(format!("invalid keyword pattern: {e}")))
}

fn scan(re: &Regex, content: &str) -> Vec<Occurrence> {
    re.captures_iter(content)
        .filter_map(|cap| {
            let kw = cap.name("kw")?;
            let lit = cap.name("lit")?;
            Some(Occurrence {
                name: names::literal_name(lit.as_str()),
                position: kw.start(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn extract(code: &str) -> Extraction {
        HeuristicExtractor::new(&Keywords::default())
            .unwrap()
            .extract(code, FileVariant::Template)
            .unwrap()
    }

    fn test_paths(e: &Extraction) -> Vec<&str> {
        e.tests.iter().map(|t| t.path.as_str()).collect()
    }

    #[test]
    fn nearest_preceding_module_wins() {
        // module("X") at 10, module("Z") at 40, test("y") at 55
        let code = format!(
            "{}module(\"X\"){}module(\"Z\"){}test(\"y\")",
            " ".repeat(10),
            " ".repeat(19),
            " ".repeat(4),
        );
        let out = extract(&code);
        assert_eq!(out.modules[0].position, 10);
        assert_eq!(out.modules[1].position, 40);
        assert_eq!(out.tests[0].position, 55);
        assert_eq!(test_paths(&out), vec!["Z: y"]);
    }

    #[test]
    fn template_file_outline() {
        let code = r#"
import { module, test } from 'qunit';
import { render } from '@ember/test-helpers';

module('Integration | Component | greeting', function (hooks) {
  test('it renders', async function (assert) {
    await render(<template><Greeting @name="world" /></template>);
    assert.dom().hasText('Hello world');
  });

  module('nested', function () {
    test('inner', async function (assert) {});
  });

  test('after nested', async function (assert) {});
});
"#;
        let out = extract(code);
        let modules: Vec<&str> = out.modules.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(modules, vec!["Integration | Component | greeting", "nested"]);
        // No scope information: the trailing test attaches to "nested".
        assert_eq!(
            test_paths(&out),
            vec![
                "Integration | Component | greeting: it renders",
                "nested: inner",
                "nested: after nested",
            ]
        );
    }

    #[test]
    fn tests_before_any_module_are_dropped() {
        let out = extract("test('early', () => {});\nmodule('late', () => {});");
        assert_eq!(out.modules.len(), 1);
        assert!(out.tests.is_empty());
    }

    #[test]
    fn shares_keywords_with_structural_mode() {
        let out = extract("describe('d', () => { it('i', () => {}); specify('s', () => {}); });");
        assert_eq!(test_paths(&out), vec!["d: i", "d: s"]);
    }

    #[test]
    fn member_calls_match_but_suffixes_do_not() {
        let out = extract("QUnit.module('q');\nsubmodule('no');\nQUnit.test('t');\nlatest('no');");
        let modules: Vec<&str> = out.modules.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(modules, vec!["q"]);
        assert_eq!(test_paths(&out), vec!["q: t"]);
        assert_eq!(out.modules[0].position, "QUnit.".len());
    }

    #[test]
    fn template_literal_names_use_head() {
        let out = extract("module(`Suite ${n}`, () => {});\ntest(`case`, () => {});");
        assert_eq!(test_paths(&out), vec!["Suite : case"]);
    }

    #[test]
    fn association_map_uses_module_names() {
        let out = extract("module('a'); test('1'); test('2'); module('b'); test('3');");
        assert_eq!(
            out.module_tests.get("a"),
            Some(&vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(out.module_tests.get("b"), Some(&vec!["3".to_string()]));
    }

    #[test]
    fn custom_keywords() {
        let keywords = Keywords {
            modules: vec!["suite".into()],
            tests: vec!["check".into()],
            ..Keywords::default()
        };
        let out = HeuristicExtractor::new(&keywords)
            .unwrap()
            .extract("suite('s'); module('m'); check('c');", FileVariant::Template)
            .unwrap();
        assert_eq!(test_paths(&out), vec!["s: c"]);
    }

    proptest! {
        #[test]
        fn offsets_and_idempotence(
            names in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 1..6),
            gaps in proptest::collection::vec("[ \n;{}]{0,8}", 6),
        ) {
            let mut code = String::new();
            for (i, name) in names.iter().enumerate() {
                code.push_str(&gaps[i]);
                if i % 2 == 0 {
                    code.push_str(&format!("module('{}', function () {{", name));
                } else {
                    code.push_str(&format!("test(\"{}\", function () {{}});", name));
                }
            }

            let first = extract(&code);
            let second = extract(&code);
            prop_assert_eq!(&first, &second);

            for m in &first.modules {
                prop_assert!(code[m.position..].starts_with("module("));
            }
            for t in &first.tests {
                prop_assert!(code[t.position..].starts_with("test("));
            }
            prop_assert_eq!(first.modules.len(), names.len().div_ceil(2));
            prop_assert_eq!(first.tests.len(), names.len() / 2);
        }
    }
}
