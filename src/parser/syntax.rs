//! The handful of tree-sitter node shapes the outline builder inspects.
//!
//! Every statement is classified into a small closed set up front, so the
//! builder never matches on raw node kinds itself.

use tree_sitter::Node;

use super::names;

/// Statement shapes relevant to test outlines.
#[derive(Debug)]
pub enum Statement<'t> {
    /// An expression statement whose expression is a plain call.
    Call(Call<'t>),
    /// The body of a `for`, `for-in`, `for-of`, `while` or `do-while` loop.
    Loop(Node<'t>),
    Other,
}

/// A call expression reduced to its callee name and arguments.
#[derive(Debug)]
pub struct Call<'t> {
    /// Identifier callee, or the property name of a member callee.
    pub name: String,
    pub arguments: Vec<Argument<'t>>,
}

#[derive(Debug)]
pub enum Argument<'t> {
    /// A string or template literal, already decoded to a display name.
    Name(String),
    /// An arrow or plain function whose body is a block; holds the block.
    Callback(Node<'t>),
    Other,
}

impl<'t> Call<'t> {
    /// Display name carried by the first argument, or `""`.
    pub fn first_name(&self) -> String {
        match self.arguments.first() {
            Some(Argument::Name(name)) => name.clone(),
            _ => String::new(),
        }
    }

    pub fn callback_at(&self, index: usize) -> Option<Node<'t>> {
        match self.arguments.get(index) {
            Some(Argument::Callback(block)) => Some(*block),
            _ => None,
        }
    }
}

/// Classify a statement node.
pub fn classify<'t>(node: Node<'t>, src: &[u8]) -> Statement<'t> {
    match node.kind() {
        "expression_statement" => node
            .named_child(0)
            .filter(|expr| expr.kind() == "call_expression")
            .and_then(|call| read_call(call, src))
            .map(Statement::Call)
            .unwrap_or(Statement::Other),
        // for_in_statement also covers for-of and for-await-of
        "for_statement" | "for_in_statement" | "while_statement" | "do_statement" => node
            .child_by_field_name("body")
            .map(Statement::Loop)
            .unwrap_or(Statement::Other),
        _ => Statement::Other,
    }
}

/// Statements inside a block, or the node itself for a bare loop body.
pub fn statements(node: Node) -> Vec<Node> {
    match node.kind() {
        "statement_block" | "program" => {
            let mut cursor = node.walk();
            let result: Vec<Node> = node
                .named_children(&mut cursor)
                .filter(|child| !child.is_extra())
                .collect();
            result
        }
        _ => vec![node],
    }
}

fn read_call<'t>(call: Node<'t>, src: &[u8]) -> Option<Call<'t>> {
    let callee = call.child_by_field_name("function")?;
    let name = match callee.kind() {
        "identifier" => text(callee, src).to_string(),
        "member_expression" => text(callee.child_by_field_name("property")?, src).to_string(),
        _ => return None,
    };

    // Tagged templates (`describe\`x\``) carry a template_string here.
    let args = call.child_by_field_name("arguments")?;
    if args.kind() != "arguments" {
        return None;
    }

    let mut cursor = args.walk();
    let arguments = args
        .named_children(&mut cursor)
        .filter(|arg| !arg.is_extra())
        .map(|arg| read_argument(arg, src))
        .collect();

    Some(Call { name, arguments })
}

fn read_argument<'t>(arg: Node<'t>, src: &[u8]) -> Argument<'t> {
    match arg.kind() {
        "string" => Argument::Name(names::string_value(text(arg, src))),
        "template_string" => Argument::Name(names::template_head(text(arg, src))),
        "arrow_function" | "function_expression" | "function" => match arg.child_by_field_name("body") {
            Some(body) if body.kind() == "statement_block" => Argument::Callback(body),
            _ => Argument::Other,
        },
        _ => Argument::Other,
    }
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}
