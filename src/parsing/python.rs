//! Python parser: classes are `class` statements, methods are `def`/`async
//! def` statements in their body, walked via `tree-sitter` rather than a
//! typed AST.

use super::tokens::build_token_bag;
use super::{count_significant_lines, Parser};
use crate::core::{ClassMetrics, Language, MethodMetrics, Parameter};
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tree_sitter::{Node, Tree};

pub struct PythonParser {
    language: tree_sitter::Language,
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn parse_file(&self, path: &Path, source: &str) -> Result<Vec<ClassMetrics>> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.language).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let tree: Tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            message: "tree-sitter failed to produce a syntax tree".to_string(),
        })?;

        // A partially-broken file still yields whatever classes tree-sitter
        // could recover, per the parser trait contract; `has_error` is not
        // treated as fatal.

        let source_bytes = source.as_bytes();
        let source_lines: Vec<&str> = source.lines().collect();
        let mut classes = Vec::new();
        let mut imports = Vec::new();
        let mut cursor = tree.root_node().walk();
        collect_module_items(
            tree.root_node(),
            &mut cursor,
            source_bytes,
            &source_lines,
            &mut imports,
            &mut classes,
        );
        Ok(classes.into_iter().map(|acc| acc.finish(path, &imports)).collect())
    }
}

struct ClassAccumulator {
    name: String,
    field_count: usize,
    methods: Vec<MethodMetrics>,
    dependencies: BTreeSet<String>,
}

impl ClassAccumulator {
    fn finish(self, path: &Path, imports: &[String]) -> ClassMetrics {
        let line_count: usize = self.methods.iter().map(|m| m.line_count).sum();
        let complexity: u32 = self.methods.iter().map(|m| m.cyclomatic_complexity).sum();

        let mut dependencies: Vec<String> = imports.to_vec();
        dependencies.extend(self.dependencies.into_iter().take(50));

        ClassMetrics {
            name: self.name.clone(),
            qualified_name: self.name,
            file_path: path.to_path_buf(),
            line_count,
            method_count: self.methods.len(),
            property_count: self.field_count,
            field_count: self.field_count,
            cyclomatic_complexity: complexity,
            methods: self.methods,
            dependencies,
        }
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Walk direct module-level children, recording `import`/`from ... import`
/// statements and top-level `class` definitions. Nested classes are not
/// descended into separately; their methods are captured when the outer
/// class's body is walked for `def`s, matching a single-level class model.
fn collect_module_items(
    root: Node,
    cursor: &mut tree_sitter::TreeCursor,
    source: &[u8],
    source_lines: &[&str],
    imports: &mut Vec<String>,
    classes: &mut Vec<ClassAccumulator>,
) {
    for child in root.children(cursor) {
        match child.kind() {
            "import_statement" | "import_from_statement" => {
                imports.push(node_text(child, source).trim().to_string());
            }
            "class_definition" => {
                classes.push(class_accumulator(child, source, source_lines));
            }
            "decorated_definition" => {
                if let Some(inner) = child.child_by_field_name("definition") {
                    if inner.kind() == "class_definition" {
                        classes.push(class_accumulator(inner, source, source_lines));
                    }
                }
            }
            _ => {}
        }
    }
}

fn class_accumulator(class_node: Node, source: &[u8], source_lines: &[&str]) -> ClassAccumulator {
    let name = class_node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_else(|| "<anonymous>".to_string());

    let mut methods = Vec::new();
    let mut field_count = 0usize;
    let mut dependencies = BTreeSet::new();

    if let Some(body) = class_node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for stmt in body.children(&mut cursor) {
            visit_class_body_stmt(stmt, source, source_lines, &mut methods, &mut field_count, &mut dependencies);
        }
    }

    ClassAccumulator {
        name,
        field_count,
        methods,
        dependencies,
    }
}

fn visit_class_body_stmt(
    stmt: Node,
    source: &[u8],
    source_lines: &[&str],
    methods: &mut Vec<MethodMetrics>,
    field_count: &mut usize,
    dependencies: &mut BTreeSet<String>,
) {
    match stmt.kind() {
        "function_definition" | "async_function_definition" => {
            methods.push(method_metrics(stmt, source, source_lines));
        }
        "decorated_definition" => {
            if let Some(inner) = stmt.child_by_field_name("definition") {
                if matches!(inner.kind(), "function_definition" | "async_function_definition") {
                    methods.push(method_metrics(inner, source, source_lines));
                }
            }
        }
        "expression_statement" => {
            // `self.x = ...` at class body scope (rare) or a bare
            // `name: Type` annotated assignment both count as a field.
            if let Some(child) = stmt.child(0) {
                if matches!(child.kind(), "assignment" | "augmented_assignment") {
                    *field_count += 1;
                }
            }
        }
        _ => {}
    }
    collect_capitalized_refs(stmt, source, dependencies);
}

fn method_metrics(def: Node, source: &[u8], source_lines: &[&str]) -> MethodMetrics {
    let name = def
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_else(|| "<anonymous>".to_string());

    let mut parameters = Vec::new();
    if let Some(params) = def.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for (i, param) in params.named_children(&mut cursor).enumerate() {
            match param.kind() {
                "identifier" => {
                    let pname = node_text(param, source).to_string();
                    if i == 0 && (pname == "self" || pname == "cls") {
                        continue;
                    }
                    parameters.push(Parameter {
                        name: pname,
                        type_name: None,
                    });
                }
                "typed_parameter" => {
                    let pname = param
                        .child(0)
                        .map(|n| node_text(n, source).to_string())
                        .unwrap_or_default();
                    let ty = param
                        .child_by_field_name("type")
                        .map(|n| node_text(n, source).to_string());
                    parameters.push(Parameter {
                        name: pname,
                        type_name: ty,
                    });
                }
                "default_parameter" | "typed_default_parameter" => {
                    let pname = param
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source).to_string())
                        .unwrap_or_default();
                    let ty = param
                        .child_by_field_name("type")
                        .map(|n| node_text(n, source).to_string());
                    parameters.push(Parameter {
                        name: pname,
                        type_name: ty,
                    });
                }
                _ => {}
            }
        }
    }
    // Python has no explicit `static` keyword; derive it from the absence
    // of a `self`/`cls` first parameter.
    let is_static = def
        .child_by_field_name("parameters")
        .and_then(|params| params.named_child(0))
        .map(|first| {
            let text = node_text(first, source);
            text != "self" && text != "cls" && !text.starts_with("self:") && !text.starts_with("cls:")
        })
        .unwrap_or(true);

    let return_type = def
        .child_by_field_name("return_type")
        .map(|n| node_text(n, source).to_string());

    let is_public = !name.starts_with('_');

    let line_count = def_line_count(def, source_lines);

    let mut body_visitor = BodyWalker::default();
    if let Some(body) = def.child_by_field_name("body") {
        body_visitor.complexity = 1;
        body_visitor.walk(body, source);
    }

    let param_types: Vec<String> = parameters.iter().filter_map(|p| p.type_name.clone()).collect();
    let token_bag = build_token_bag(
        &name,
        param_types.iter().map(String::as_str),
        body_visitor.called.iter().map(String::as_str),
    );

    MethodMetrics {
        name,
        line_count,
        cyclomatic_complexity: body_visitor.complexity,
        parameters,
        return_type,
        is_public,
        is_static,
        called_methods: body_visitor.called,
        accessed_identifiers: body_visitor.accessed,
        token_bag,
    }
}

fn def_line_count(def: Node, source_lines: &[&str]) -> usize {
    let start = def.start_position().row + 1;
    let end = def.end_position().row + 1;
    if start == 0 || start > source_lines.len() {
        return 0;
    }
    let end = end.min(source_lines.len());
    let slice = source_lines[(start - 1)..end].join("\n");
    count_significant_lines(&slice, "#")
}

/// McCabe-style walk over a Python function body: `if`/`elif`, `while`,
/// `for`, `except` clauses, and boolean `and`/`or` operators each add one,
/// matching the branch-counting rule used for the Rust parser.
#[derive(Default)]
struct BodyWalker {
    complexity: u32,
    called: BTreeSet<String>,
    accessed: BTreeSet<String>,
}

impl BodyWalker {
    fn walk(&mut self, node: Node, source: &[u8]) {
        match node.kind() {
            "if_statement" | "elif_clause" => self.complexity += 1,
            "while_statement" | "for_statement" => self.complexity += 1,
            "except_clause" => self.complexity += 1,
            "boolean_operator" => self.complexity += 1,
            "conditional_expression" => self.complexity += 1,
            "call" => {
                if let Some(func) = node.child_by_field_name("function") {
                    self.record_call_target(func, source);
                }
            }
            "attribute" => {
                if let Some(attr) = node.child_by_field_name("attribute") {
                    self.accessed.insert(node_text(attr, source).to_string());
                }
            }
            "identifier" => {
                self.accessed.insert(node_text(node, source).to_string());
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, source);
        }
    }

    fn record_call_target(&mut self, func: Node, source: &[u8]) {
        match func.kind() {
            "identifier" => {
                self.called.insert(node_text(func, source).to_string());
            }
            "attribute" => {
                if let Some(attr) = func.child_by_field_name("attribute") {
                    self.called.insert(node_text(attr, source).to_string());
                }
            }
            _ => {}
        }
    }
}

/// Heuristic dependency hint: capitalized identifiers referenced anywhere in
/// a class body statement, mirroring the Rust parser's treatment of
/// capitalized-path segments as type references.
fn collect_capitalized_refs(node: Node, source: &[u8], out: &mut BTreeSet<String>) {
    if out.len() >= 50 {
        return;
    }
    if node.kind() == "identifier" {
        let text = node_text(node, source);
        if text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
            out.insert(text.to_string());
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if out.len() >= 50 {
            return;
        }
        collect_capitalized_refs(child, source, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<ClassMetrics> {
        let parser = PythonParser::new();
        parser.parse_file(Path::new("sample.py"), source).unwrap()
    }

    #[test]
    fn empty_file_yields_no_classes() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn free_functions_yield_no_classes() {
        let source = "def helper(x):\n    return x + 1\n";
        assert!(parse(source).is_empty());
    }

    #[test]
    fn class_with_methods_is_one_class() {
        let source = indoc::indoc! {"
            class Greeter:
                def __init__(self, name):
                    self.name = name

                def greet(self):
                    return 'hello ' + self.name
        "};
        let classes = parse(source);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Greeter");
        assert_eq!(classes[0].method_count, 2);
    }

    #[test]
    fn static_method_has_no_self_parameter() {
        let source = indoc::indoc! {"
            class Util:
                @staticmethod
                def add(a, b):
                    return a + b
        "};
        let classes = parse(source);
        let method = &classes[0].methods[0];
        assert!(method.is_static);
        assert_eq!(method.parameter_count(), 2);
    }

    #[test]
    fn if_and_boolean_operator_each_add_complexity() {
        let source = indoc::indoc! {"
            class Checker:
                def check(self, a, b):
                    if a and b:
                        return True
                    return False
        "};
        let classes = parse(source);
        // base(1) + if(1) + and(1) = 3
        assert_eq!(classes[0].methods[0].cyclomatic_complexity, 3);
    }

    #[test]
    fn private_method_is_not_public() {
        let source = indoc::indoc! {"
            class Hidden:
                def _internal(self):
                    return 1
        "};
        let classes = parse(source);
        assert!(!classes[0].methods[0].is_public);
    }
}
