//! Locating module specifiers in source text.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Statement, StringLiteral, TSModuleReference};
use oxc_parser::Parser;
use ts::{LanguageServiceError, TextSpan};

use crate::file_system::is_rooted;
use crate::language_service::script_blocks::{source_type, ScriptBlock};

/// How a module specifier resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierKind {
    /// Resolved against the importing file's directory.
    Relative,
    /// A rooted path, or a path under the configured absolute prefix.
    Absolute,
    /// Resolved through module resolution: a package or a tsconfig alias.
    Aliased,
}

/// A module specifier found in an import or export declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    /// The string literal including its quotes.
    pub raw_text: String,
    pub kind: SpecifierKind,
    /// The file containing the declaration.
    pub source_path: String,
    /// The module as written, without quotes.
    pub target_module: String,
    /// The interior of the string literal, in document offsets.
    pub span: TextSpan,
}

impl ModuleSpecifier {
    pub fn is_relative(&self) -> bool {
        self.kind == SpecifierKind::Relative
    }

    /// Number of `..` segments in the specifier as written.
    pub fn depth(&self) -> usize {
        relative_depth(&self.target_module)
    }
}

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

pub fn relative_depth(specifier: &str) -> usize {
    specifier.split('/').filter(|segment| *segment == "..").count()
}

pub fn classify_specifier(specifier: &str) -> SpecifierKind {
    if is_relative_specifier(specifier) {
        SpecifierKind::Relative
    } else if is_rooted(specifier) {
        SpecifierKind::Absolute
    } else {
        SpecifierKind::Aliased
    }
}

/// Collect the specifiers of every top-level `import`, `export … from`,
/// `export * from` and `import x = require(…)` in `block`.
pub fn collect_module_specifiers(
    file_name: &str,
    block: &ScriptBlock<'_>,
) -> Result<Vec<ModuleSpecifier>, LanguageServiceError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, block.text, source_type(block.kind)).parse();

    if let Some(error) = ret.errors.first() {
        return Err(LanguageServiceError::Parse {
            file_name: file_name.to_string(),
            message: error.to_string(),
        });
    }

    let mut specifiers = Vec::new();
    for statement in &ret.program.body {
        let source = match statement {
            Statement::ImportDeclaration(decl) => Some(&decl.source),
            Statement::ExportNamedDeclaration(decl) => decl.source.as_ref(),
            Statement::ExportAllDeclaration(decl) => Some(&decl.source),
            Statement::TSImportEqualsDeclaration(decl) => match &decl.module_reference {
                TSModuleReference::ExternalModuleReference(reference) => {
                    Some(&reference.expression)
                }
                _ => None,
            },
            _ => None,
        };
        if let Some(source) = source {
            specifiers.push(module_specifier(file_name, block, source));
        }
    }
    Ok(specifiers)
}

fn module_specifier(
    file_name: &str,
    block: &ScriptBlock<'_>,
    literal: &StringLiteral<'_>,
) -> ModuleSpecifier {
    let start = literal.span.start as usize;
    let end = literal.span.end as usize;
    let target_module = literal.value.to_string();
    ModuleSpecifier {
        raw_text: block.text[start..end].to_string(),
        kind: classify_specifier(&target_module),
        source_path: file_name.to_string(),
        target_module,
        span: TextSpan::from_bounds(block.offset + start + 1, block.offset + end - 1),
    }
}
