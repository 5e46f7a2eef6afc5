//! Organize the import declarations of one script block.
//!
//! Imports are handled per group: consecutive top-level import declarations
//! with nothing but whitespace (and no blank line) between them. Within a
//! group, side-effect imports (`import './polyfills'`) stay where they are and
//! split the group into segments; each segment is sorted and merged on its own.
//!
//! Comments inside the braces of a named import travel with the specifier
//! they belong to. A declaration with comments anywhere else is left as
//! written and acts like a side-effect import.

use std::cmp::Ordering;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Comment, ImportDeclaration, ImportDeclarationSpecifier, Span, Statement};
use oxc_parser::Parser;
use oxc_semantic::{Semantic, SemanticBuilder};
use ts::{LanguageServiceError, OrganizeImportsTypeOrder, TextChange};

use super::script_blocks::{source_type, ScriptBlock};

#[derive(Debug, Clone, Copy)]
pub struct OrganizeSettings {
    pub skip_destructive_code_actions: bool,
    pub type_order: OrganizeImportsTypeOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NamedBinding<'a> {
    /// Source text of the specifier, e.g. `type Foo as Bar`.
    text: &'a str,
    imported: &'a str,
    local: &'a str,
    is_type: bool,
    /// Comments before the specifier, after the previous comma.
    leading: Vec<&'a str>,
    /// Comments after the specifier, up to the end of its line.
    trailing: Vec<&'a str>,
}

impl<'a> NamedBinding<'a> {
    fn has_line_comment(&self) -> bool {
        self.leading
            .iter()
            .chain(&self.trailing)
            .any(|comment| comment.starts_with("//"))
    }

    fn render_inline(&self) -> String {
        let mut parts = self.leading.clone();
        parts.push(self.text);
        parts.extend(&self.trailing);
        parts.join(" ")
    }

    fn render_line(&self, indent: &str, newline: &str) -> String {
        let mut out = String::new();
        for comment in &self.leading {
            out.push_str(indent);
            out.push_str(comment);
            out.push_str(newline);
        }
        out.push_str(indent);
        out.push_str(self.text);
        out.push(',');
        for comment in &self.trailing {
            out.push(' ');
            out.push_str(comment);
        }
        out.push_str(newline);
        out
    }
}

#[derive(Debug, Clone)]
struct ImportInfo<'a> {
    original: &'a str,
    module: &'a str,
    /// The quoted source literal as written.
    source_text: &'a str,
    /// Text of an import attributes clause (`with { type: 'json' }`).
    attributes: Option<&'a str>,
    is_type: bool,
    default: Option<&'a str>,
    namespace: Option<&'a str>,
    named: Vec<NamedBinding<'a>>,
    /// `import 'x'`, `import {} from 'x'` and phase imports are never edited.
    frozen: bool,
    semicolon: bool,
    modified: bool,
}

impl<'a> ImportInfo<'a> {
    fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }

    fn can_merge_with(&self, other: &ImportInfo<'a>) -> bool {
        !self.frozen
            && !other.frozen
            && self.module == other.module
            && self.is_type == other.is_type
            && self.namespace.is_none()
            && other.namespace.is_none()
            && self.attributes.is_none()
            && other.attributes.is_none()
            && !(self.default.is_some() && other.default.is_some())
            && !(self.is_type && self.mixes_default_and_named(other))
    }

    /// `import type A, { B }` is rejected by TypeScript.
    fn mixes_default_and_named(&self, other: &ImportInfo<'a>) -> bool {
        (self.default.is_some() && !other.named.is_empty())
            || (other.default.is_some() && !self.named.is_empty())
    }

    fn merge(&mut self, other: ImportInfo<'a>) {
        if self.default.is_none() {
            self.default = other.default;
        }
        for binding in other.named {
            let duplicate = self.named.iter_mut().find(|existing| {
                existing.imported == binding.imported
                    && existing.local == binding.local
                    && existing.is_type == binding.is_type
            });
            match duplicate {
                Some(existing) => {
                    existing.leading.extend(binding.leading);
                    existing.trailing.extend(binding.trailing);
                }
                None => self.named.push(binding),
            }
        }
        self.semicolon |= other.semicolon;
        self.modified = true;
    }

    fn render(&self, newline: &str) -> String {
        if !self.modified {
            return self.original.to_string();
        }

        let mut clause = Vec::new();
        if let Some(default) = self.default {
            clause.push(default.to_string());
        }
        if let Some(namespace) = self.namespace {
            clause.push(namespace.to_string());
        }
        if self.named.iter().any(NamedBinding::has_line_comment) {
            let lines: String = self
                .named
                .iter()
                .map(|binding| binding.render_line("  ", newline))
                .collect();
            clause.push(format!("{{{}{}}}", newline, lines));
        } else if !self.named.is_empty() {
            let named: Vec<String> = self.named.iter().map(NamedBinding::render_inline).collect();
            clause.push(format!("{{ {} }}", named.join(", ")));
        }

        let mut out = String::from("import ");
        if self.is_type {
            out.push_str("type ");
        }
        out.push_str(&clause.join(", "));
        out.push_str(" from ");
        out.push_str(self.source_text);
        if let Some(attributes) = self.attributes {
            out.push(' ');
            out.push_str(attributes);
        }
        if self.semicolon {
            out.push(';');
        }
        out
    }
}

/// Compute the changes that organize `block`. Offsets are relative to the
/// block text.
pub fn organize_block(
    file_name: &str,
    block: &ScriptBlock<'_>,
    settings: OrganizeSettings,
) -> Result<Vec<TextChange>, LanguageServiceError> {
    let text = block.text;
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, text, source_type(block.kind)).parse();

    if let Some(error) = ret.errors.first() {
        return Err(LanguageServiceError::Parse {
            file_name: file_name.to_string(),
            message: error.to_string(),
        });
    }

    let program = ret.program;
    let skip_destructive = settings.skip_destructive_code_actions || block.embedded;
    let semantic_ret = SemanticBuilder::new()
        .with_excess_capacity(0.0)
        .build(&program);
    let semantic = (!skip_destructive).then_some(&semantic_ret.semantic);

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut changes = Vec::new();

    for group in import_groups(&program.body, text) {
        let start = group[0].span.start as usize;
        let end = group[group.len() - 1].span.end as usize;

        let imports: Vec<ImportInfo<'_>> = group
            .iter()
            .filter_map(|decl| {
                import_info(decl, text, &program.comments, semantic, block.kind.is_jsx())
            })
            .collect();

        let organized = organize_group(imports, settings.type_order);
        let new_text = organized
            .iter()
            .map(|import| import.render(newline))
            .collect::<Vec<_>>()
            .join(newline);

        if new_text == text[start..end] {
            continue;
        }
        let end = if new_text.is_empty() {
            end + line_break_len(&text[end..])
        } else {
            end
        };
        changes.push(TextChange::new(start, end, new_text));
    }

    Ok(changes)
}

fn line_break_len(rest: &str) -> usize {
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}

fn import_groups<'p, 'a>(
    body: &'p [Statement<'a>],
    text: &str,
) -> Vec<Vec<&'p ImportDeclaration<'a>>> {
    let mut groups: Vec<Vec<&ImportDeclaration<'a>>> = Vec::new();
    let mut current: Vec<&ImportDeclaration<'a>> = Vec::new();

    for statement in body {
        let Statement::ImportDeclaration(decl) = statement else {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            continue;
        };
        if let Some(previous) = current.last() {
            let between = &text[previous.span.end as usize..decl.span.start as usize];
            let same_group = between.trim().is_empty() && between.matches('\n').count() <= 1;
            if !same_group {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(decl);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Describe one declaration. Returns `None` when every binding is unused and
/// the declaration should disappear.
fn import_info<'a>(
    decl: &ImportDeclaration<'a>,
    text: &'a str,
    comments: &[Comment],
    semantic: Option<&Semantic<'a>>,
    is_jsx: bool,
) -> Option<ImportInfo<'a>> {
    let slice = |start: u32, end: u32| &text[start as usize..end as usize];
    let original = slice(decl.span.start, decl.span.end);

    let mut info = ImportInfo {
        original,
        module: decl.source.value.as_str(),
        source_text: slice(decl.source.span.start, decl.source.span.end),
        attributes: decl
            .with_clause
            .as_ref()
            .map(|clause| slice(clause.span.start, clause.span.end)),
        is_type: decl.import_kind.is_type(),
        default: None,
        namespace: None,
        named: Vec::new(),
        frozen: decl.phase.is_some(),
        semicolon: original.trim_end().ends_with(';'),
        modified: false,
    };

    let specifiers = match &decl.specifiers {
        Some(specifiers) if !specifiers.is_empty() => specifiers,
        _ => {
            info.frozen = true;
            return Some(info);
        }
    };
    if info.frozen {
        return Some(info);
    }

    let named_spans: Vec<Span> = specifiers
        .iter()
        .filter_map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(named) => Some(named.span),
            _ => None,
        })
        .collect();
    let Some(attached) = attached_comments(decl.span, text, &named_spans, comments) else {
        info.frozen = true;
        return Some(info);
    };
    let mut attached = attached.into_iter();

    let is_used = |local: &oxc_ast::ast::BindingIdentifier<'a>| -> bool {
        let Some(semantic) = semantic else {
            return true;
        };
        if is_jsx && local.name.as_str() == "React" {
            return true;
        }
        match local.symbol_id.get() {
            Some(symbol_id) => semantic.symbol_references(symbol_id).next().is_some(),
            None => true,
        }
    };

    for specifier in specifiers {
        match specifier {
            ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                if is_used(&default.local) {
                    info.default = Some(slice(default.span.start, default.span.end));
                } else {
                    info.modified = true;
                }
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                if is_used(&namespace.local) {
                    info.namespace = Some(slice(namespace.span.start, namespace.span.end));
                } else {
                    info.modified = true;
                }
            }
            ImportDeclarationSpecifier::ImportSpecifier(named) => {
                let SpecifierComments { leading, trailing } = attached.next().unwrap_or_default();
                if is_used(&named.local) {
                    info.named.push(NamedBinding {
                        text: slice(named.span.start, named.span.end),
                        imported: named.imported.name().as_str(),
                        local: named.local.name.as_str(),
                        is_type: named.import_kind.is_type(),
                        leading,
                        trailing,
                    });
                } else {
                    info.modified = true;
                }
            }
        }
    }

    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

#[derive(Debug, Clone, Default)]
struct SpecifierComments<'a> {
    leading: Vec<&'a str>,
    trailing: Vec<&'a str>,
}

enum Trivia<'a> {
    Comma,
    Newline,
    Comment(&'a str),
}

/// Split `gap` into commas, line breaks and comments. Stops at the first
/// character that is none of these and returns the unscanned rest.
fn scan_trivia(gap: &str) -> (Vec<Trivia<'_>>, &str) {
    let mut trivia = Vec::new();
    let mut rest = gap;
    loop {
        if let Some(after) = rest.strip_prefix(',') {
            trivia.push(Trivia::Comma);
            rest = after;
        } else if let Some(after) = rest.strip_prefix('\n') {
            trivia.push(Trivia::Newline);
            rest = after;
        } else if rest.starts_with("//") {
            let end = rest.find('\n').unwrap_or(rest.len());
            trivia.push(Trivia::Comment(rest[..end].trim_end()));
            rest = &rest[end..];
        } else if rest.starts_with("/*") {
            let Some(close) = rest[2..].find("*/") else {
                break;
            };
            let end = close + 4;
            trivia.push(Trivia::Comment(&rest[..end]));
            rest = &rest[end..];
        } else {
            match rest.chars().next() {
                Some(c) if c.is_whitespace() => rest = &rest[c.len_utf8()..],
                _ => break,
            }
        }
    }
    (trivia, rest)
}

/// Attach the comments between the braces of a named import to the
/// specifiers at `named`. A comment goes to the specifier before it when it
/// sits on that specifier's line, otherwise to the one after it.
///
/// Returns `None` when the declaration has a comment that cannot be attached
/// this way.
fn attached_comments<'a>(
    decl: Span,
    text: &'a str,
    named: &[Span],
    comments: &[Comment],
) -> Option<Vec<SpecifierComments<'a>>> {
    let within = |inner: Span, outer: Span| inner.start >= outer.start && inner.end <= outer.end;
    let expected = comments
        .iter()
        .filter(|comment| within(comment.span, decl))
        .filter(|comment| !named.iter().any(|span| within(comment.span, *span)))
        .count();

    let mut attached = vec![SpecifierComments::default(); named.len()];
    if expected == 0 {
        return Some(attached);
    }
    let first = named.first()?;

    let head = &text[decl.start as usize..first.start as usize];
    let open = head.rfind('{')?;
    let (trivia, rest) = scan_trivia(&head[open + 1..]);
    if !rest.is_empty() {
        return None;
    }
    for piece in trivia {
        match piece {
            Trivia::Comment(comment) => attached[0].leading.push(comment),
            Trivia::Newline => {}
            Trivia::Comma => return None,
        }
    }

    for (i, span) in named.iter().enumerate() {
        let last = i + 1 == named.len();
        let end = if last {
            decl.end as usize
        } else {
            named[i + 1].start as usize
        };
        let (trivia, rest) = scan_trivia(&text[span.end as usize..end]);
        let closed = if last { rest.starts_with('}') } else { rest.is_empty() };
        if !closed {
            return None;
        }

        let mut seen_comma = false;
        let mut next_line = false;
        for piece in trivia {
            match piece {
                Trivia::Comma if seen_comma => return None,
                Trivia::Comma => seen_comma = true,
                Trivia::Newline => next_line |= seen_comma,
                Trivia::Comment(comment) if !next_line => attached[i].trailing.push(comment),
                Trivia::Comment(_) if last => return None,
                Trivia::Comment(comment) => attached[i + 1].leading.push(comment),
            }
        }
        if !last && !seen_comma {
            return None;
        }
    }

    let placed: usize = attached
        .iter()
        .map(|comments| comments.leading.len() + comments.trailing.len())
        .sum();
    (placed == expected).then_some(attached)
}

fn organize_group<'a>(
    imports: Vec<ImportInfo<'a>>,
    type_order: OrganizeImportsTypeOrder,
) -> Vec<ImportInfo<'a>> {
    let mut organized = Vec::with_capacity(imports.len());
    let mut segment = Vec::new();

    for import in imports {
        if import.frozen && import.is_empty() {
            organized.extend(organize_segment(std::mem::take(&mut segment), type_order));
            organized.push(import);
        } else {
            segment.push(import);
        }
    }
    organized.extend(organize_segment(segment, type_order));
    organized
}

fn organize_segment<'a>(
    mut imports: Vec<ImportInfo<'a>>,
    type_order: OrganizeImportsTypeOrder,
) -> Vec<ImportInfo<'a>> {
    imports.sort_by(|a, b| {
        compare_module_specifiers(a.module, b.module).then(a.is_type.cmp(&b.is_type))
    });

    let mut merged: Vec<ImportInfo<'a>> = Vec::with_capacity(imports.len());
    for import in imports {
        match merged.last_mut() {
            Some(previous) if previous.can_merge_with(&import) => previous.merge(import),
            _ => merged.push(import),
        }
    }

    for import in &mut merged {
        let before: Vec<&str> = import.named.iter().map(|binding| binding.text).collect();
        import
            .named
            .sort_by(|a, b| compare_named_bindings(a, b, type_order));
        let reordered = import
            .named
            .iter()
            .zip(&before)
            .any(|(binding, text)| binding.text != *text);
        import.modified |= reordered;
    }

    merged
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare_module_specifiers(a: &str, b: &str) -> Ordering {
    compare_case_insensitive(a, b)
}

fn compare_named_bindings(
    a: &NamedBinding<'_>,
    b: &NamedBinding<'_>,
    type_order: OrganizeImportsTypeOrder,
) -> Ordering {
    let kind = match type_order {
        OrganizeImportsTypeOrder::Last => a.is_type.cmp(&b.is_type),
        OrganizeImportsTypeOrder::First => b.is_type.cmp(&a.is_type),
        OrganizeImportsTypeOrder::Inline => Ordering::Equal,
    };
    kind.then_with(|| compare_case_insensitive(a.imported, b.imported))
        .then_with(|| compare_case_insensitive(a.local, b.local))
}
