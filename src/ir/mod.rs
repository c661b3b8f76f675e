//! Intermediate representation of an analyzed codebase
//!
//! The IR is four parallel vectors (files, type declarations, function
//! declarations, call sites) with deterministic string IDs of the form
//! `<file-path>:<name>:<ordinal-in-file>`. Records are created once by
//! [`build`] and never mutated; graph construction and the signal
//! detectors consume the IR read-only.

pub mod validate;

use crate::parsers::{ImportInfo, ParsedFile};
use serde::{Deserialize, Serialize};

/// The five Swift type-declaration kinds, distinguished by tag.
///
/// Behavior that varies by kind (export shapes and colors, protocol-only
/// signals) is a pure function of this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Struct,
    Class,
    Enum,
    Protocol,
    Actor,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Class => write!(f, "class"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Protocol => write!(f, "protocol"),
            TypeKind::Actor => write!(f, "actor"),
        }
    }
}

/// Swift access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    #[default]
    Internal,
    Private,
    Fileprivate,
    Open,
    Package,
}

/// One function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// External argument label; absent for `_`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A source file and its import clauses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Input-relative path
    pub path: String,
    /// Base file name minus extension; the unit of import resolution
    pub module_name: String,
    pub imports: Vec<ImportInfo>,
    /// True when the file declares a type carrying the entry-point attribute
    pub is_entry_point: bool,
}

/// A type declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub id: String,
    pub name: String,
    pub kind: TypeKind,
    pub file_path: String,
    /// Inheritance-clause entries exactly as written, unresolved
    pub inherited_types: Vec<String>,
    pub accessibility: Accessibility,
    pub line: u32,
    pub end_line: u32,
    pub attributes: Vec<String>,
    pub generic_parameters: Vec<String>,
}

/// A function declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
    pub id: String,
    pub name: String,
    pub signature: String,
    pub file_path: String,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_throws: bool,
    pub is_mutating: bool,
    pub line: u32,
    pub end_line: u32,
    /// Nearest enclosing type declaration, textual name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<String>,
}

/// A call expression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSite {
    pub id: String,
    /// Textual base name of the callee
    pub called_name: String,
    pub file_path: String,
    pub line: u32,
    /// Nearest enclosing function declaration; absent for module-level calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containing_function: Option<String>,
}

/// The immutable analysis IR
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ir {
    pub files: Vec<SourceFile>,
    pub type_decls: Vec<TypeDecl>,
    pub function_decls: Vec<FunctionDecl>,
    pub call_sites: Vec<CallSite>,
}

/// Attributes that mark a type as a program entry point
const ENTRY_POINT_ATTRIBUTES: &[&str] = &["main", "UIApplicationMain", "NSApplicationMain"];

/// Lower parsed per-file facts into the global IR.
///
/// `parsed` must already be in sorted path order; IDs are the zip of each
/// per-file fact list with its ordinal, so the same input always yields
/// the same IDs.
pub fn build(parsed: &[ParsedFile]) -> Ir {
    let mut ir = Ir::default();

    for file in parsed {
        let is_entry_point = file.has_entry_point_attribute
            || file.types.iter().any(|t| {
                t.attributes
                    .iter()
                    .any(|a| ENTRY_POINT_ATTRIBUTES.contains(&a.as_str()))
            });

        ir.files.push(SourceFile {
            path: file.path.clone(),
            module_name: module_name_of(&file.path),
            imports: file.imports.clone(),
            is_entry_point,
        });

        for (ordinal, t) in file.types.iter().enumerate() {
            ir.type_decls.push(TypeDecl {
                id: record_id(&file.path, &t.name, ordinal),
                name: t.name.clone(),
                kind: t.kind,
                file_path: file.path.clone(),
                inherited_types: t.inherited_types.clone(),
                accessibility: t.accessibility,
                line: t.line,
                end_line: t.end_line,
                attributes: t.attributes.clone(),
                generic_parameters: t.generic_parameters.clone(),
            });
        }

        for (ordinal, f) in file.functions.iter().enumerate() {
            ir.function_decls.push(FunctionDecl {
                id: record_id(&file.path, &f.name, ordinal),
                name: f.name.clone(),
                signature: f.signature.clone(),
                file_path: file.path.clone(),
                parameters: f.parameters.clone(),
                return_type: f.return_type.clone(),
                accessibility: f.accessibility,
                is_static: f.is_static,
                is_async: f.is_async,
                is_throws: f.is_throws,
                is_mutating: f.is_mutating,
                line: f.line,
                end_line: f.end_line,
                containing_type: f.containing_type.clone(),
            });
        }

        for (ordinal, c) in file.call_sites.iter().enumerate() {
            ir.call_sites.push(CallSite {
                id: record_id(&file.path, &c.called_name, ordinal),
                called_name: c.called_name.clone(),
                file_path: file.path.clone(),
                line: c.line,
                containing_function: c.containing_function.clone(),
            });
        }
    }

    ir
}

/// `<file-path>:<name>:<ordinal-in-file>` — unique within one run
fn record_id(path: &str, name: &str, ordinal: usize) -> String {
    format!("{}:{}:{}", path, name, ordinal)
}

/// Base file name with the extension removed.
pub fn module_name_of(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rfind('.') {
        Some(pos) if pos > 0 => base[..pos].to_string(),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::swift;

    fn parse(path: &str, src: &str) -> ParsedFile {
        swift::parse_source(src, path)
    }

    #[test]
    fn test_module_name_of() {
        assert_eq!(module_name_of("Sources/App/Main.swift"), "Main");
        assert_eq!(module_name_of("A.swift"), "A");
        assert_eq!(module_name_of("noext"), "noext");
    }

    #[test]
    fn test_ids_are_deterministic() {
        let parsed = vec![
            parse("A.swift", "func f() {}\nfunc f(x: Int) {}\n"),
            parse("B.swift", "struct S {}\n"),
        ];
        let first = build(&parsed);
        let second = build(&parsed);
        let first_ids: Vec<&String> = first.function_decls.iter().map(|f| &f.id).collect();
        let second_ids: Vec<&String> = second.function_decls.iter().map(|f| &f.id).collect();
        assert_eq!(first_ids, second_ids);
        assert_eq!(first.function_decls[0].id, "A.swift:f:0");
        assert_eq!(first.function_decls[1].id, "A.swift:f:1");
        assert_eq!(first.type_decls[0].id, "B.swift:S:0");
    }

    #[test]
    fn test_entry_point_lifted_from_attribute() {
        let parsed = vec![
            parse("App.swift", "@main\nstruct App {}\n"),
            parse("Lib.swift", "struct Lib {}\n"),
        ];
        let ir = build(&parsed);
        assert!(ir.files[0].is_entry_point);
        assert!(!ir.files[1].is_entry_point);
    }

    #[test]
    fn test_every_record_points_at_a_file() {
        let parsed = vec![parse(
            "A.swift",
            "struct S {\n    func m() {\n        helper()\n    }\n}\n",
        )];
        let ir = build(&parsed);
        for t in &ir.type_decls {
            assert!(ir.files.iter().any(|f| f.path == t.file_path));
        }
        for f in &ir.function_decls {
            assert!(ir.files.iter().any(|file| file.path == f.file_path));
        }
        for c in &ir.call_sites {
            assert!(ir.files.iter().any(|f| f.path == c.file_path));
        }
    }

    #[test]
    fn test_line_invariants() {
        let parsed = vec![parse(
            "A.swift",
            "class C {\n    func m() {\n        work()\n    }\n}\n",
        )];
        let ir = build(&parsed);
        for t in &ir.type_decls {
            assert!(t.line >= 1 && t.end_line >= t.line);
        }
        for f in &ir.function_decls {
            assert!(f.line >= 1 && f.end_line >= f.line);
        }
    }
}
