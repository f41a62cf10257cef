//! Rust parser: classes are `impl` blocks (inherent or trait) merged by
//! self-type name with any `struct`/`enum` declaration of the same name.

use super::tokens::build_token_bag;
use super::{count_significant_lines, Parser};
use crate::core::{ClassMetrics, Language, MethodMetrics, Parameter};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Block, Expr, FnArg, ImplItem, Item, Pat, ReturnType, Stmt};

pub struct RustParser;

impl Parser for RustParser {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn parse_file(&self, path: &Path, source: &str) -> Result<Vec<ClassMetrics>> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file = syn::parse_file(source).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut accumulator = FileAccumulator::new(source);
        accumulator.visit_file(&file);
        Ok(accumulator.into_classes(path))
    }
}

#[derive(Default)]
struct ClassAccumulator {
    field_count: usize,
    methods: Vec<MethodMetrics>,
    dependencies: BTreeSet<String>,
}

struct FileAccumulator {
    classes: HashMap<String, ClassAccumulator>,
    order: Vec<String>,
    imports: Vec<String>,
    source_lines: Vec<String>,
}

impl FileAccumulator {
    fn new(source: &str) -> Self {
        Self {
            classes: HashMap::new(),
            order: Vec::new(),
            imports: Vec::new(),
            source_lines: source.lines().map(str::to_string).collect(),
        }
    }

    fn entry(&mut self, name: &str) -> &mut ClassAccumulator {
        if !self.classes.contains_key(name) {
            self.order.push(name.to_string());
            self.classes.insert(name.to_string(), ClassAccumulator::default());
        }
        self.classes.get_mut(name).unwrap()
    }

    fn into_classes(self, path: &Path) -> Vec<ClassMetrics> {
        let FileAccumulator {
            mut classes,
            order,
            imports,
            ..
        } = self;

        order
            .into_iter()
            .filter_map(|name| classes.remove(&name).map(|acc| (name, acc)))
            .map(|(name, acc)| {
                let body_lines: usize = acc
                    .methods
                    .iter()
                    .map(|m| m.line_count)
                    .sum();
                let complexity: u32 = acc.methods.iter().map(|m| m.cyclomatic_complexity).sum();

                // Imports (unbounded) plus the first 50 capitalized
                // identifiers encountered in the class, per spec.
                let mut dependencies: Vec<String> = imports.clone();
                dependencies.extend(acc.dependencies.into_iter().take(50));

                ClassMetrics {
                    name: name.clone(),
                    qualified_name: name.clone(),
                    file_path: path.to_path_buf(),
                    line_count: body_lines,
                    method_count: acc.methods.len(),
                    property_count: acc.field_count,
                    field_count: acc.field_count,
                    cyclomatic_complexity: complexity,
                    methods: acc.methods,
                    dependencies,
                }
            })
            .collect()
    }
}

impl<'ast> Visit<'ast> for FileAccumulator {
    fn visit_item(&mut self, item: &'ast Item) {
        match item {
            Item::Use(use_item) => {
                self.imports.push(flatten_use_tree(&use_item.tree));
            }
            Item::Struct(s) => {
                let name = s.ident.to_string();
                let field_count = s.fields.len();
                let acc = self.entry(&name);
                acc.field_count = field_count;
            }
            Item::Enum(e) => {
                let name = e.ident.to_string();
                let field_count = e.variants.len();
                let acc = self.entry(&name);
                acc.field_count = field_count;
            }
            Item::Impl(imp) => {
                let self_type_name = self_type_name(&imp.self_ty);
                if let Some(type_name) = self_type_name {
                    for impl_item in &imp.items {
                        if let ImplItem::Fn(method) = impl_item {
                            let metrics = method_metrics(method, &self.source_lines);
                            self.entry(&type_name).methods.push(metrics);
                        }
                    }
                    // Capitalized identifiers referenced in the impl, as a
                    // dependency-hint heuristic.
                    let mut deps = BTreeSet::new();
                    collect_capitalized_idents(imp, &mut deps);
                    self.entry(&type_name).dependencies.extend(deps);
                }
            }
            _ => {}
        }
        visit::visit_item(self, item);
    }
}

fn self_type_name(ty: &syn::Type) -> Option<String> {
    if let syn::Type::Path(type_path) = ty {
        type_path.path.segments.last().map(|seg| seg.ident.to_string())
    } else {
        None
    }
}

fn flatten_use_tree(tree: &syn::UseTree) -> String {
    match tree {
        syn::UseTree::Path(p) => format!("{}::{}", p.ident, flatten_use_tree(&p.tree)),
        syn::UseTree::Name(n) => n.ident.to_string(),
        syn::UseTree::Rename(r) => r.ident.to_string(),
        syn::UseTree::Glob(_) => "*".to_string(),
        syn::UseTree::Group(g) => g
            .items
            .iter()
            .map(flatten_use_tree)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn collect_capitalized_idents(imp: &syn::ItemImpl, out: &mut BTreeSet<String>) {
    struct IdentVisitor<'a> {
        out: &'a mut BTreeSet<String>,
    }
    impl<'ast> Visit<'ast> for IdentVisitor<'_> {
        fn visit_ident(&mut self, ident: &'ast proc_macro2::Ident) {
            let s = ident.to_string();
            if s.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) && self.out.len() < 50 {
                self.out.insert(s);
            }
        }
    }
    let mut visitor = IdentVisitor { out };
    visitor.visit_item_impl(imp);
}

/// Count significant lines of a method's source span, sliced from the
/// original file text by line number (1-indexed, inclusive) rather than from
/// `quote!`'s re-serialized tokens, which drop the original formatting.
fn method_body_line_count(method: &syn::ImplItemFn, source_lines: &[String]) -> usize {
    let span = method.span();
    let start = span.start().line;
    let end = span.end().line;
    if start == 0 || end == 0 || start > source_lines.len() {
        return 0;
    }
    let end = end.min(source_lines.len());
    let slice = source_lines[(start - 1)..end].join("\n");
    count_significant_lines(&slice, "//")
}

fn method_metrics(method: &syn::ImplItemFn, source_lines: &[String]) -> MethodMetrics {
    let name = method.sig.ident.to_string();
    let is_public = matches!(method.vis, syn::Visibility::Public(_));

    let mut is_static = true;
    let mut parameters = Vec::new();
    for arg in &method.sig.inputs {
        match arg {
            FnArg::Receiver(_) => is_static = false,
            FnArg::Typed(pat_type) => {
                let param_name = match pat_type.pat.as_ref() {
                    Pat::Ident(p) => p.ident.to_string(),
                    _ => "_".to_string(),
                };
                let ty = pat_type.ty.as_ref();
                let type_name = quote::quote!(#ty).to_string();
                parameters.push(Parameter {
                    name: param_name,
                    type_name: Some(type_name),
                });
            }
        }
    }

    let return_type = match &method.sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some(quote::quote!(#ty).to_string()),
    };

    let line_count = method_body_line_count(method, source_lines);

    let mut body_visitor = BodyVisitor::default();
    body_visitor.visit_block(&method.block);

    let param_types: Vec<String> = parameters
        .iter()
        .filter_map(|p| p.type_name.clone())
        .collect();
    let token_bag = build_token_bag(
        &name,
        param_types.iter().map(String::as_str),
        body_visitor.called_methods.iter().map(String::as_str),
    );

    MethodMetrics {
        name,
        line_count,
        cyclomatic_complexity: body_visitor.complexity,
        parameters,
        return_type,
        is_public,
        is_static,
        called_methods: body_visitor.called_methods,
        accessed_identifiers: body_visitor.accessed_identifiers,
        token_bag,
    }
}

/// Walks a method body computing McCabe complexity and collecting call
/// targets / accessed identifiers in one pass.
#[derive(Default)]
struct BodyVisitor {
    complexity: u32,
    called_methods: BTreeSet<String>,
    accessed_identifiers: BTreeSet<String>,
}

impl BodyVisitor {
    fn visit_block(&mut self, block: &Block) {
        self.complexity = 1;
        for stmt in &block.stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Local(local) => {
                if let Some(init) = &local.init {
                    self.visit_expr(&init.expr);
                }
            }
            Stmt::Expr(expr, _) => self.visit_expr(expr),
            Stmt::Item(_) | Stmt::Macro(_) => {}
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::If(e) => {
                self.complexity += 1;
                self.visit_expr(&e.cond);
                for stmt in &e.then_branch.stmts {
                    self.visit_stmt(stmt);
                }
                if let Some((_, else_expr)) = &e.else_branch {
                    self.visit_expr(else_expr);
                }
            }
            Expr::While(e) => {
                self.complexity += 1;
                self.visit_expr(&e.cond);
                for stmt in &e.body.stmts {
                    self.visit_stmt(stmt);
                }
            }
            Expr::ForLoop(e) => {
                self.complexity += 1;
                self.visit_expr(&e.expr);
                for stmt in &e.body.stmts {
                    self.visit_stmt(stmt);
                }
            }
            Expr::Loop(e) => {
                for stmt in &e.body.stmts {
                    self.visit_stmt(stmt);
                }
            }
            Expr::Match(e) => {
                self.complexity += e.arms.len() as u32;
                self.visit_expr(&e.expr);
                for arm in &e.arms {
                    if let Some((_, guard)) = &arm.guard {
                        self.visit_expr(guard);
                    }
                    self.visit_expr(&arm.body);
                }
            }
            Expr::Binary(e) => {
                use syn::BinOp;
                if matches!(e.op, BinOp::And(_) | BinOp::Or(_)) {
                    self.complexity += 1;
                }
                self.visit_expr(&e.left);
                self.visit_expr(&e.right);
            }
            Expr::Block(e) => {
                for stmt in &e.block.stmts {
                    self.visit_stmt(stmt);
                }
            }
            Expr::Unary(e) => self.visit_expr(&e.expr),
            Expr::Paren(e) => self.visit_expr(&e.expr),
            Expr::Reference(e) => self.visit_expr(&e.expr),
            Expr::Try(e) => self.visit_expr(&e.expr),
            Expr::Await(e) => self.visit_expr(&e.base),
            Expr::Return(e) => {
                if let Some(inner) = &e.expr {
                    self.visit_expr(inner);
                }
            }
            Expr::Assign(e) => {
                self.visit_expr(&e.left);
                self.visit_expr(&e.right);
            }
            Expr::MethodCall(e) => {
                self.called_methods.insert(e.method.to_string());
                self.visit_expr(&e.receiver);
                for arg in &e.args {
                    self.visit_expr(arg);
                }
            }
            Expr::Call(e) => {
                if let Expr::Path(p) = e.func.as_ref() {
                    if let Some(seg) = p.path.segments.last() {
                        self.called_methods.insert(seg.ident.to_string());
                    }
                }
                for arg in &e.args {
                    self.visit_expr(arg);
                }
            }
            Expr::Path(p) => {
                if let Some(seg) = p.path.segments.last() {
                    self.accessed_identifiers.insert(seg.ident.to_string());
                }
            }
            Expr::Field(e) => {
                let member = &e.member;
                self.accessed_identifiers
                    .insert(quote::quote!(#member).to_string());
                self.visit_expr(&e.base);
            }
            Expr::Closure(e) => self.visit_expr(&e.body),
            Expr::Async(e) => {
                for stmt in &e.block.stmts {
                    self.visit_stmt(stmt);
                }
            }
            Expr::Let(e) => self.visit_expr(&e.expr),
            Expr::Struct(e) => {
                for field in &e.fields {
                    self.visit_expr(&field.expr);
                }
                if let Some(rest) = &e.rest {
                    self.visit_expr(rest);
                }
            }
            Expr::Array(e) => {
                for elem in &e.elems {
                    self.visit_expr(elem);
                }
            }
            Expr::Tuple(e) => {
                for elem in &e.elems {
                    self.visit_expr(elem);
                }
            }
            Expr::Index(e) => {
                self.visit_expr(&e.expr);
                self.visit_expr(&e.index);
            }
            Expr::Cast(e) => self.visit_expr(&e.expr),
            Expr::Range(e) => {
                if let Some(start) = &e.start {
                    self.visit_expr(start);
                }
                if let Some(end) = &e.end {
                    self.visit_expr(end);
                }
            }
            Expr::Macro(_) => {}
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<ClassMetrics> {
        RustParser.parse_file(Path::new("test.rs"), src).unwrap()
    }

    #[test]
    fn empty_file_yields_no_classes() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn free_functions_yield_no_classes() {
        let classes = parse("fn helper() -> i32 { 1 }");
        assert!(classes.is_empty());
    }

    #[test]
    fn struct_and_impl_merge_into_one_class() {
        let src = r#"
            struct Widget { a: i32, b: i32 }
            impl Widget {
                pub fn new() -> Self { Widget { a: 0, b: 0 } }
                fn area(&self) -> i32 { self.a * self.b }
            }
        "#;
        let classes = parse(src);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Widget");
        assert_eq!(classes[0].field_count, 2);
        assert_eq!(classes[0].method_count, 2);
    }

    #[test]
    fn complexity_of_method_with_no_branches_is_one() {
        let src = "struct W; impl W { fn f(&self) -> i32 { 1 } }";
        let classes = parse(src);
        assert_eq!(classes[0].methods[0].cyclomatic_complexity, 1);
    }

    #[test]
    fn if_while_for_and_match_each_add_complexity() {
        let src = r#"
            struct W;
            impl W {
                fn f(&self, x: i32) -> i32 {
                    if x > 0 {
                        1
                    } else {
                        2
                    }
                }
            }
        "#;
        let classes = parse(src);
        assert_eq!(classes[0].methods[0].cyclomatic_complexity, 2);
    }

    #[test]
    fn static_method_has_no_receiver() {
        let src = "struct W; impl W { fn make() -> W { W } }";
        let classes = parse(src);
        assert!(classes[0].methods[0].is_static);
    }

    #[test]
    fn if_let_scrutinee_call_is_recorded() {
        let src = r#"
            struct W;
            impl W {
                fn f(&self) -> i32 {
                    if let Some(x) = some_call() {
                        x
                    } else {
                        0
                    }
                }
            }
        "#;
        let classes = parse(src);
        assert!(classes[0].methods[0].called_methods.contains("some_call"));
    }

    #[test]
    fn while_let_scrutinee_call_is_recorded() {
        let src = r#"
            struct W;
            impl W {
                fn f(&self) -> i32 {
                    while let Some(x) = next_item() {
                        consume(x);
                    }
                    0
                }
            }
        "#;
        let classes = parse(src);
        assert!(classes[0].methods[0].called_methods.contains("next_item"));
        assert!(classes[0].methods[0].called_methods.contains("consume"));
    }
}
