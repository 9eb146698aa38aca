use crate::ir::{FileOutline, OutlineItem};

/// Render outlines as plain console text, one block per file.
pub fn render(files: &[FileOutline]) -> String {
    let mut output = String::new();

    if files.iter().all(|f| f.modules.is_empty() && f.tests.is_empty()) {
        output.push_str("\n  No test modules found.\n\n");
        return output;
    }

    for file in files {
        output.push_str(&format!("\n  {} ({})\n", file.path.display(), file.variant));
        for module in &file.modules {
            push_item(&mut output, "module", module);
        }
        for test in &file.tests {
            push_item(&mut output, "test  ", test);
        }
    }

    let modules: usize = files.iter().map(|f| f.modules.len()).sum();
    let tests: usize = files.iter().map(|f| f.tests.len()).sum();
    output.push_str(&format!(
        "\n  {} module(s), {} test(s) in {} file(s)\n\n",
        modules,
        tests,
        files.len()
    ));

    output
}

fn push_item(output: &mut String, tag: &str, item: &OutlineItem) {
    output.push_str(&format!(
        "    [{}] {}  {}:{}\n",
        tag, item.path, item.location.line, item.location.column
    ));
}
