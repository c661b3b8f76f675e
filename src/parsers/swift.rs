//! Line-oriented Swift fact extractor
//!
//! Scans source text line by line, blanking comments and string literals,
//! and matches declaration headers with regular expressions. Nesting is
//! tracked with a brace-driven scope stack: a declaration owns the next
//! opening brace, every other brace opens an anonymous scope (closures,
//! control flow, accessor blocks). `containingType` / `containingFunction`
//! are read off that stack, and `endLine` is assigned when a scope closes.
//!
//! This is a fact extractor, not a grammar: declaration headers split
//! across lines are not recognized.

use crate::ir::{Accessibility, Parameter, TypeKind};
use crate::parsers::{ImportInfo, ParsedFile, RawCallSite, RawFunctionDecl, RawTypeDecl};
use regex::Regex;
use std::sync::OnceLock;

static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
static TYPE_RE: OnceLock<Regex> = OnceLock::new();
static EXTENSION_RE: OnceLock<Regex> = OnceLock::new();
static FUNC_RE: OnceLock<Regex> = OnceLock::new();
static INIT_RE: OnceLock<Regex> = OnceLock::new();
static LEADING_ATTRS_RE: OnceLock<Regex> = OnceLock::new();
static ATTR_NAME_RE: OnceLock<Regex> = OnceLock::new();
static CALL_RE: OnceLock<Regex> = OnceLock::new();

fn import_re() -> &'static Regex {
    IMPORT_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(@testable\s+)?import\s+(?:(?:typealias|struct|class|enum|protocol|actor|let|var|func)\s+)?([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)",
        )
        .expect("invalid import regex")
    })
}

fn type_re() -> &'static Regex {
    TYPE_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<mods>(?:(?:public|internal|private|fileprivate|open|package)(?:\([^)]*\))?\s+|(?:final|indirect)\s+)*)(?P<kind>struct|class|enum|protocol|actor)\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*(?:<(?P<generics>[^>]*)>)?\s*(?::\s*(?P<inherits>[^{]*))?",
        )
        .expect("invalid type regex")
    })
}

fn extension_re() -> &'static Regex {
    EXTENSION_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:(?:public|internal|private|fileprivate|open|package)\s+)*extension\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        )
        .expect("invalid extension regex")
    })
}

fn func_re() -> &'static Regex {
    FUNC_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<mods>(?:(?:public|internal|private|fileprivate|open|package)(?:\([^)]*\))?\s+|(?:static|class|final|override|mutating|nonmutating|required|convenience|dynamic)\s+)*)func\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*|`[^`]+`|[-+*/%=!<>&|^~?.]+)\s*(?:<(?P<generics>[^>]*)>)?\s*\(",
        )
        .expect("invalid func regex")
    })
}

fn init_re() -> &'static Regex {
    INIT_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<mods>(?:(?:public|internal|private|fileprivate|open|package)(?:\([^)]*\))?\s+|(?:required|convenience|override|final)\s+)*)init\s*[?!]?\s*(?:<(?P<generics>[^>]*)>)?\s*\(",
        )
        .expect("invalid init regex")
    })
}

fn leading_attrs_re() -> &'static Regex {
    LEADING_ATTRS_RE.get_or_init(|| {
        Regex::new(r"^\s*(?P<attrs>(?:@[A-Za-z_][A-Za-z0-9_]*(?:\([^)]*\))?\s*)+)")
            .expect("invalid attribute regex")
    })
}

fn attr_name_re() -> &'static Regex {
    ATTR_NAME_RE
        .get_or_init(|| Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)").expect("invalid attr-name regex"))
}

fn call_re() -> &'static Regex {
    CALL_RE.get_or_init(|| {
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("invalid call regex")
    })
}

/// Keywords that look like `name(` in expression position but are not calls
const NON_CALL_KEYWORDS: &[&str] = &[
    "if", "else", "guard", "while", "for", "repeat", "switch", "case", "default", "return",
    "throw", "throws", "rethrows", "defer", "catch", "where", "in", "as", "is", "try", "await",
    "let", "var", "func", "subscript", "associatedtype", "typealias", "operator",
    "precedencegroup", "willSet", "didSet", "get", "set", "some", "any", "inout",
];

/// Attributes that mark a program entry point
const ENTRY_POINT_ATTRIBUTES: &[&str] = &["main", "UIApplicationMain", "NSApplicationMain"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScopeKind {
    Type,
    Function,
    Anonymous,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    /// Index into the type/function vector for end-line assignment;
    /// `None` for scopes without a record (extensions)
    decl_index: Option<usize>,
    name: String,
}

/// What a just-parsed declaration is waiting for: its opening brace
#[derive(Debug, Clone)]
enum PendingDecl {
    Type(usize),
    Function(usize),
    /// An `extension Foo` block: a type scope with no declaration record
    Extension(String),
}

struct Scanner {
    out: ParsedFile,
    scopes: Vec<Scope>,
    pending_decl: Option<PendingDecl>,
    pending_attributes: Vec<String>,
    block_comment_depth: usize,
    in_multiline_string: bool,
}

/// Extract all raw facts from Swift source text.
pub fn parse_source(source: &str, path: &str) -> ParsedFile {
    let mut scanner = Scanner {
        out: ParsedFile {
            path: path.to_string(),
            ..Default::default()
        },
        scopes: Vec::new(),
        pending_decl: None,
        pending_attributes: Vec::new(),
        block_comment_depth: 0,
        in_multiline_string: false,
    };

    let mut last_line = 0u32;
    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx as u32 + 1;
        last_line = line_no;
        scanner.scan_line(raw_line, line_no);
    }
    scanner.finish(last_line);

    scanner.out.has_entry_point_attribute = scanner.out.types.iter().any(|t| {
        t.attributes
            .iter()
            .any(|a| ENTRY_POINT_ATTRIBUTES.contains(&a.as_str()))
    });

    scanner.out
}

impl Scanner {
    fn scan_line(&mut self, raw_line: &str, line_no: u32) {
        let stripped = self.strip_line(raw_line);

        // Imports first: `@testable` is part of the import clause, not a
        // declaration attribute
        if self.try_import(&stripped, line_no) {
            self.scan_braces(&stripped, line_no);
            return;
        }

        // Split leading attributes (same-line or accumulated from prior lines)
        let (inline_attrs, rest) = match leading_attrs_re().captures(&stripped) {
            Some(caps) => {
                let attrs_text = caps.name("attrs").map(|m| m.as_str()).unwrap_or("");
                let attrs: Vec<String> = attr_name_re()
                    .captures_iter(attrs_text)
                    .map(|c| c[1].to_string())
                    .collect();
                (attrs, stripped[caps.get(0).unwrap().end()..].to_string())
            }
            None => (Vec::new(), stripped.clone()),
        };

        if rest.trim().is_empty() {
            // Attribute-only or blank line; attributes carry to the next decl
            self.pending_attributes.extend(inline_attrs);
            self.scan_braces(&stripped, line_no);
            return;
        }

        let matched_decl = self.try_type_decl(&rest, &inline_attrs, line_no)
            || self.try_extension_decl(&rest)
            || self.try_func_decl(&rest, line_no)
            || self.try_init_decl(&rest, line_no)
            || self.try_deinit_decl(&rest, line_no);

        if !matched_decl {
            // A dangling attribute applies only to the next declaration
            self.pending_attributes.clear();
            self.scan_calls(&rest, line_no);
        }

        self.scan_braces(&stripped, line_no);
    }

    fn try_import(&mut self, line: &str, line_no: u32) -> bool {
        let Some(caps) = import_re().captures(line) else {
            return false;
        };
        self.out.imports.push(ImportInfo {
            module_name: caps[2].to_string(),
            is_testable: caps.get(1).is_some(),
            line: line_no,
        });
        true
    }

    fn try_type_decl(&mut self, rest: &str, inline_attrs: &[String], line_no: u32) -> bool {
        let Some(caps) = type_re().captures(rest) else {
            return false;
        };
        let name = caps["name"].to_string();
        // `class func` / `class var` members parse as kind=class otherwise
        if matches!(
            name.as_str(),
            "func" | "var" | "let" | "init" | "deinit" | "subscript" | "case" | "static"
        ) {
            return false;
        }

        let mut attributes: Vec<String> = std::mem::take(&mut self.pending_attributes);
        attributes.extend(inline_attrs.iter().cloned());

        let mods = caps.name("mods").map(|m| m.as_str()).unwrap_or("");
        let generics = caps.name("generics").map(|m| m.as_str()).unwrap_or("");
        let inherits = caps.name("inherits").map(|m| m.as_str()).unwrap_or("");

        let decl = RawTypeDecl {
            name,
            kind: parse_kind(&caps["kind"]),
            inherited_types: parse_inheritance(inherits),
            accessibility: parse_accessibility(mods),
            line: line_no,
            end_line: line_no,
            attributes,
            generic_parameters: parse_generic_names(generics),
        };
        self.out.types.push(decl);
        self.set_pending(PendingDecl::Type(self.out.types.len() - 1));
        true
    }

    /// Extensions carry no declaration record, but members inside them
    /// still belong to the extended type.
    fn try_extension_decl(&mut self, rest: &str) -> bool {
        let Some(caps) = extension_re().captures(rest) else {
            return false;
        };
        self.pending_attributes.clear();
        self.set_pending(PendingDecl::Extension(caps["name"].to_string()));
        true
    }

    fn try_func_decl(&mut self, rest: &str, line_no: u32) -> bool {
        let Some(caps) = func_re().captures(rest) else {
            return false;
        };
        let mods = caps.name("mods").map(|m| m.as_str()).unwrap_or("");
        let name = caps["name"].trim_matches('`').to_string();
        let generics = caps.name("generics").map(|m| m.as_str()).unwrap_or("");
        let after_paren = &rest[caps.get(0).unwrap().end()..];
        self.push_function(name, mods, generics, after_paren, line_no);
        true
    }

    fn try_init_decl(&mut self, rest: &str, line_no: u32) -> bool {
        let Some(caps) = init_re().captures(rest) else {
            return false;
        };
        // Only meaningful inside a type body
        if !self.scopes.iter().any(|s| s.kind == ScopeKind::Type) {
            return false;
        }
        let mods = caps.name("mods").map(|m| m.as_str()).unwrap_or("");
        let generics = caps.name("generics").map(|m| m.as_str()).unwrap_or("");
        let after_paren = &rest[caps.get(0).unwrap().end()..];
        self.push_function("init".to_string(), mods, generics, after_paren, line_no);
        true
    }

    fn try_deinit_decl(&mut self, rest: &str, line_no: u32) -> bool {
        let trimmed = rest.trim();
        let is_deinit =
            trimmed == "deinit" || trimmed.starts_with("deinit ") || trimmed.starts_with("deinit{");
        if !is_deinit || !self.scopes.iter().any(|s| s.kind == ScopeKind::Type) {
            return false;
        }
        self.push_function("deinit".to_string(), "", "", ")", line_no);
        true
    }

    fn push_function(
        &mut self,
        name: String,
        mods: &str,
        generics: &str,
        after_paren: &str,
        line_no: u32,
    ) {
        self.pending_attributes.clear();

        let (params_text, trailer) = split_params(after_paren);
        let parameters = parse_parameters(&params_text);
        let is_async = trailer.split_whitespace().any(|t| t == "async");
        let is_throws = trailer
            .split_whitespace()
            .any(|t| t == "throws" || t == "rethrows");
        let return_type = parse_return_type(&trailer);

        let mod_tokens: Vec<&str> = mods.split_whitespace().collect();
        let decl = RawFunctionDecl {
            signature: build_signature(&name, generics, &parameters, is_async, is_throws,
                return_type.as_deref()),
            name,
            parameters,
            return_type,
            accessibility: parse_accessibility(mods),
            is_static: mod_tokens.iter().any(|t| *t == "static" || *t == "class"),
            is_async,
            is_throws,
            is_mutating: mod_tokens.contains(&"mutating"),
            line: line_no,
            end_line: line_no,
            containing_type: self.nearest(ScopeKind::Type),
        };
        self.out.functions.push(decl);
        self.set_pending(PendingDecl::Function(self.out.functions.len() - 1));
    }

    fn scan_calls(&mut self, rest: &str, line_no: u32) {
        // Enum cases with associated values are not calls
        if rest.trim_start().starts_with("case ") {
            return;
        }
        let containing_function = self.nearest(ScopeKind::Function);
        for caps in call_re().captures_iter(rest) {
            let m = caps.get(1).unwrap();
            let name = m.as_str();
            if NON_CALL_KEYWORDS.contains(&name) {
                continue;
            }
            // `#available(...)`, `@attr(...)` are not calls
            let prev = rest[..m.start()].chars().next_back();
            if matches!(prev, Some('#') | Some('@')) {
                continue;
            }
            self.out.call_sites.push(RawCallSite {
                called_name: name.to_string(),
                line: line_no,
                containing_function: containing_function.clone(),
            });
        }
    }

    fn scan_braces(&mut self, stripped: &str, line_no: u32) {
        for ch in stripped.chars() {
            match ch {
                '{' => {
                    let scope = match self.pending_decl.take() {
                        Some(PendingDecl::Type(i)) => Scope {
                            kind: ScopeKind::Type,
                            decl_index: Some(i),
                            name: self.out.types[i].name.clone(),
                        },
                        Some(PendingDecl::Function(i)) => Scope {
                            kind: ScopeKind::Function,
                            decl_index: Some(i),
                            name: self.out.functions[i].name.clone(),
                        },
                        Some(PendingDecl::Extension(name)) => Scope {
                            kind: ScopeKind::Type,
                            decl_index: None,
                            name,
                        },
                        None => Scope {
                            kind: ScopeKind::Anonymous,
                            decl_index: None,
                            name: String::new(),
                        },
                    };
                    self.scopes.push(scope);
                }
                '}' => {
                    // A declaration still waiting for a brace here had no body
                    self.pending_decl = None;
                    if let Some(scope) = self.scopes.pop() {
                        self.close_scope(&scope, line_no);
                    }
                }
                _ => {}
            }
        }
    }

    fn close_scope(&mut self, scope: &Scope, line_no: u32) {
        match (scope.kind, scope.decl_index) {
            (ScopeKind::Type, Some(i)) => self.out.types[i].end_line = line_no,
            (ScopeKind::Function, Some(i)) => self.out.functions[i].end_line = line_no,
            _ => {}
        }
    }

    fn finish(&mut self, last_line: u32) {
        self.pending_decl = None;
        while let Some(scope) = self.scopes.pop() {
            self.close_scope(&scope, last_line);
        }
    }

    /// Bodyless declarations (protocol requirements) keep their own line as
    /// the end line; a new declaration or a closing brace flushes them.
    fn set_pending(&mut self, pending: PendingDecl) {
        self.pending_decl = Some(pending);
    }

    fn nearest(&self, kind: ScopeKind) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .find(|s| s.kind == kind)
            .map(|s| s.name.clone())
    }

    /// Blank comments and string literals, preserving everything else.
    fn strip_line(&mut self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;
        while i < chars.len() {
            if self.block_comment_depth > 0 {
                if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                    self.block_comment_depth -= 1;
                    out.push_str("  ");
                    i += 2;
                } else if chars[i] == '/' && chars.get(i + 1) == Some(&'*') {
                    // Swift block comments nest
                    self.block_comment_depth += 1;
                    out.push_str("  ");
                    i += 2;
                } else {
                    out.push(' ');
                    i += 1;
                }
                continue;
            }
            if self.in_multiline_string {
                if chars[i] == '"'
                    && chars.get(i + 1) == Some(&'"')
                    && chars.get(i + 2) == Some(&'"')
                {
                    self.in_multiline_string = false;
                    out.push_str("   ");
                    i += 3;
                } else {
                    out.push(' ');
                    i += 1;
                }
                continue;
            }
            match chars[i] {
                '/' if chars.get(i + 1) == Some(&'/') => {
                    for _ in i..chars.len() {
                        out.push(' ');
                    }
                    break;
                }
                '/' if chars.get(i + 1) == Some(&'*') => {
                    self.block_comment_depth += 1;
                    out.push_str("  ");
                    i += 2;
                }
                '"' if chars.get(i + 1) == Some(&'"') && chars.get(i + 2) == Some(&'"') => {
                    self.in_multiline_string = true;
                    out.push_str("   ");
                    i += 3;
                }
                '"' => {
                    out.push(' ');
                    i += 1;
                    while i < chars.len() {
                        if chars[i] == '\\' {
                            out.push_str("  ");
                            i += 2;
                        } else if chars[i] == '"' {
                            out.push(' ');
                            i += 1;
                            break;
                        } else {
                            out.push(' ');
                            i += 1;
                        }
                    }
                }
                c => {
                    out.push(c);
                    i += 1;
                }
            }
        }
        out
    }
}

fn parse_kind(text: &str) -> TypeKind {
    match text {
        "struct" => TypeKind::Struct,
        "class" => TypeKind::Class,
        "enum" => TypeKind::Enum,
        "protocol" => TypeKind::Protocol,
        "actor" => TypeKind::Actor,
        _ => TypeKind::Struct,
    }
}

fn parse_accessibility(mods: &str) -> Accessibility {
    for token in mods.split_whitespace() {
        if token.starts_with("fileprivate") {
            return Accessibility::Fileprivate;
        }
        if token.starts_with("private") {
            return Accessibility::Private;
        }
        if token == "public" {
            return Accessibility::Public;
        }
        if token == "open" {
            return Accessibility::Open;
        }
        if token == "package" {
            return Accessibility::Package;
        }
    }
    Accessibility::Internal
}

/// Inheritance clause entries, verbatim, `where` clause dropped.
fn parse_inheritance(clause: &str) -> Vec<String> {
    let clause = match clause.find(" where ") {
        Some(pos) => &clause[..pos],
        None => clause,
    };
    split_top_level(clause, ',')
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Generic parameter names only, constraints dropped.
fn parse_generic_names(generics: &str) -> Vec<String> {
    split_top_level(generics, ',')
        .into_iter()
        .filter_map(|piece| {
            let name = piece.split(':').next().unwrap_or("").trim().to_string();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

/// Split `after_paren` (text following the opening parenthesis of a
/// parameter list) into the parameter text and the trailer after the
/// matching close.
fn split_params(after_paren: &str) -> (String, String) {
    let mut depth = 1usize;
    for (i, ch) in after_paren.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (
                        after_paren[..i].to_string(),
                        after_paren[i + 1..].to_string(),
                    );
                }
            }
            _ => {}
        }
    }
    // Unbalanced header; treat everything as parameters
    (after_paren.to_string(), String::new())
}

fn parse_parameters(params_text: &str) -> Vec<Parameter> {
    split_top_level(params_text, ',')
        .into_iter()
        .filter_map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                return None;
            }
            // Drop default values
            let piece = split_top_level(piece, '=')
                .into_iter()
                .next()
                .unwrap_or_default();
            let (head, ty) = match find_top_level(&piece, ':') {
                Some(pos) => (piece[..pos].trim(), piece[pos + 1..].trim()),
                None => (piece.trim(), ""),
            };
            let tokens: Vec<&str> = head.split_whitespace().collect();
            let (label, name) = match tokens.as_slice() {
                [] => return None,
                [single] => (Some(single.to_string()), single.to_string()),
                [.., label, name] => {
                    let label = (*label != "_").then(|| label.to_string());
                    (label, name.to_string())
                }
            };
            Some(Parameter {
                label,
                name,
                type_name: ty.to_string(),
            })
        })
        .collect()
}

fn parse_return_type(trailer: &str) -> Option<String> {
    let pos = trailer.find("->")?;
    let ret = trailer[pos + 2..].trim();
    let ret = match ret.find('{') {
        Some(brace) => ret[..brace].trim(),
        None => ret,
    };
    (!ret.is_empty()).then(|| ret.to_string())
}

fn build_signature(
    name: &str,
    generics: &str,
    parameters: &[Parameter],
    is_async: bool,
    is_throws: bool,
    return_type: Option<&str>,
) -> String {
    let mut sig = format!("func {}", name);
    if !generics.trim().is_empty() {
        sig.push_str(&format!("<{}>", generics.trim()));
    }
    sig.push('(');
    let params: Vec<String> = parameters
        .iter()
        .map(|p| {
            let head = match &p.label {
                Some(label) if *label == p.name => p.name.clone(),
                Some(label) => format!("{} {}", label, p.name),
                None => format!("_ {}", p.name),
            };
            if p.type_name.is_empty() {
                head
            } else {
                format!("{}: {}", head, p.type_name)
            }
        })
        .collect();
    sig.push_str(&params.join(", "));
    sig.push(')');
    if is_async {
        sig.push_str(" async");
    }
    if is_throws {
        sig.push_str(" throws");
    }
    if let Some(ret) = return_type {
        sig.push_str(&format!(" -> {}", ret));
    }
    sig
}

/// Split on `sep` at parenthesis/bracket/angle depth zero.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for ch in text.chars() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth -= 1,
            c if c == sep && depth == 0 => {
                pieces.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut depth = 0i32;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth -= 1,
            c if c == target && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
