use tree_sitter::{Node, Query, QueryCursor, StreamingIterator};

use super::docstring::{clean, literal_content};
use super::traits::{
    Parser, SourceFile, content_hash, create_ts_parser, get_node_text, line_end_inclusive,
    line_indent, line_start, node_span,
};
use crate::types::{
    ClassDescriptor, DocError, DocstringSlot, FunctionDescriptor, ImportRef, ModuleDescriptor,
    Result, Span,
};

const IMPORT_QUERY: &str = r#"
    (import_statement
        name: (dotted_name) @import
    )
    (import_statement
        name: (aliased_import name: (dotted_name) @import)
    )
    (import_from_statement
        module_name: (dotted_name) @from
    )
    (import_from_statement
        module_name: (relative_import) @relative
    )
"#;

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Result<Self> {
        // Validate that the language is available
        let _ = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;
        Ok(Self)
    }
}

impl Parser for PythonParser {
    fn parse(&self, file: &SourceFile) -> Result<ModuleDescriptor> {
        let path = file.relative_path.as_str();
        let content = file.content.as_str();

        let mut parser =
            create_ts_parser(tree_sitter_python::LANGUAGE, "Python").map_err(|e| match e {
                DocError::Parse { message, .. } => DocError::parse(path, message),
                other => other,
            })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| DocError::parse(path, "Failed to parse Python file"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(DocError::parse(
                path,
                format!("syntax error near line {}", first_error_line(root)),
            ));
        }

        let slot = module_slot(root, content);
        let docstring = docstring_text(&slot, content);

        let mut classes = Vec::new();
        let mut functions = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let Some(definition) = unwrap_decorated(child) else {
                continue;
            };
            match definition.kind() {
                "class_definition" => classes.push(extract_class(definition, content)),
                "function_definition" => {
                    functions.push(extract_function(definition, content, None))
                }
                _ => {}
            }
        }

        Ok(ModuleDescriptor {
            path: file.path.clone(),
            relative_path: file.relative_path.clone(),
            module_name: file.module_name.clone(),
            docstring,
            slot,
            classes,
            functions,
            imports: extract_imports(root, content),
            content_hash: content_hash(content),
            len: content.len(),
        })
    }

    fn language(&self) -> &'static str {
        "python"
    }
}

fn extract_class(node: Node, content: &str) -> ClassDescriptor {
    let name = field_text(node, "name", content);
    let slot = body_slot(node, content);
    let docstring = docstring_text(&slot, content);

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            if let Some(definition) = unwrap_decorated(child)
                && definition.kind() == "function_definition"
            {
                methods.push(extract_function(definition, content, Some(&name)));
            }
        }
    }

    ClassDescriptor {
        signature: header_text(node, content),
        name,
        docstring,
        slot,
        span: node_span(node),
        methods,
    }
}

fn extract_function(node: Node, content: &str, class: Option<&str>) -> FunctionDescriptor {
    let name = field_text(node, "name", content);
    let slot = body_slot(node, content);
    let docstring = docstring_text(&slot, content);

    let is_async = {
        let mut cursor = node.walk();
        node.children(&mut cursor).any(|c| c.kind() == "async")
    };

    FunctionDescriptor {
        qualified_name: class
            .map(|c| format!("{}.{}", c, name))
            .unwrap_or_else(|| name.clone()),
        signature: header_text(node, content),
        name,
        is_async,
        docstring,
        slot,
        span: node_span(node),
    }
}

fn extract_imports(root: Node, content: &str) -> Vec<ImportRef> {
    let mut imports: Vec<ImportRef> = Vec::new();
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();

    let query = match Query::new(&language, IMPORT_QUERY) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!("Invalid import query: {}", e);
            return imports;
        }
    };

    let capture_names = query.capture_names();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, content.as_bytes());

    while let Some(m) = matches.next() {
        for cap in m.captures.iter() {
            let text = get_node_text(cap.node, content.as_bytes()).trim();
            let relative = capture_names
                .get(cap.index as usize)
                .is_some_and(|name| *name == "relative");
            let module = if relative {
                text.trim_start_matches('.')
            } else {
                text
            };

            let import = ImportRef {
                module: module.to_string(),
                relative,
            };
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
    }

    imports
}

/// Decorated definitions wrap the actual class/function node
fn unwrap_decorated(node: Node) -> Option<Node> {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition")
    } else {
        Some(node)
    }
}

fn field_text(node: Node, field: &str, content: &str) -> String {
    node.child_by_field_name(field)
        .map(|n| get_node_text(n, content.as_bytes()).to_string())
        .unwrap_or_default()
}

/// The `:` that ends a class or function header
fn header_colon(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor).filter(|c| c.kind() == ":").last()
}

/// Header text up to the colon, whitespace collapsed onto one line
fn header_text(node: Node, content: &str) -> String {
    let end = header_colon(node)
        .map(|c| c.start_byte())
        .unwrap_or_else(|| node.end_byte());
    let raw = content.get(node.start_byte()..end).unwrap_or("");
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("( ", "(")
        .replace(", )", ")")
        .replace(",)", ")")
        .replace(" )", ")")
}

fn statements<'t>(block: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = block.walk();
    block
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// Existing docstring slot when `stmt` is a bare string literal statement
fn existing_slot(stmt: Node, sole_statement: bool, content: &str) -> Option<DocstringSlot> {
    if stmt.kind() != "expression_statement" {
        return None;
    }

    let literal = {
        let mut cursor = stmt.walk();
        let named: Vec<Node> = stmt.named_children(&mut cursor).collect();
        match named.as_slice() {
            [only] if only.kind() == "string" => *only,
            _ => return None,
        }
    };
    literal_content(get_node_text(literal, content.as_bytes()))?;

    let start = line_start(content, stmt.start_byte());
    let end = line_end_inclusive(content, stmt.end_byte());
    let alone = content[start..stmt.start_byte()].trim().is_empty()
        && content[stmt.end_byte()..end].trim().is_empty();

    Some(DocstringSlot::Existing {
        literal: node_span(literal),
        lines: alone.then(|| Span::new(start, end)),
        indent: line_indent(content, stmt.start_byte()).to_string(),
        sole_statement,
    })
}

fn body_slot(node: Node, content: &str) -> DocstringSlot {
    let (Some(body), Some(colon)) = (node.child_by_field_name("body"), header_colon(node)) else {
        return DocstringSlot::Inline;
    };

    let stmts = statements(body);
    let Some(first) = stmts.first() else {
        return DocstringSlot::Inline;
    };

    if let Some(slot) = existing_slot(*first, stmts.len() == 1, content) {
        return slot;
    }

    let Some(newline) = content[colon.end_byte()..]
        .find('\n')
        .map(|i| colon.end_byte() + i)
    else {
        return DocstringSlot::Inline;
    };

    if first.start_byte() <= newline {
        return DocstringSlot::Inline;
    }

    DocstringSlot::Missing {
        insert_at: newline + 1,
        indent: line_indent(content, first.start_byte()).to_string(),
    }
}

fn module_slot(root: Node, content: &str) -> DocstringSlot {
    match statements(root).first() {
        Some(first) => existing_slot(*first, false, content).unwrap_or_else(|| {
            DocstringSlot::Missing {
                insert_at: line_start(content, first.start_byte()),
                indent: String::new(),
            }
        }),
        None if content.is_empty() || content.ends_with('\n') => DocstringSlot::Missing {
            insert_at: content.len(),
            indent: String::new(),
        },
        None => DocstringSlot::Inline,
    }
}

fn docstring_text(slot: &DocstringSlot, content: &str) -> Option<String> {
    match slot {
        DocstringSlot::Existing { literal, .. } => {
            literal_content(literal.slice(content)).map(clean)
        }
        _ => None,
    }
}

fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}
