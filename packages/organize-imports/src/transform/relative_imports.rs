//! Rewriting deep relative imports as absolute or aliased ones.
//!
//! For each relative specifier the first matching rule wins:
//!
//! 1. depth within `max_relative_path_depth`: keep it relative;
//! 2. a tsconfig `paths` alias covers the target: use the alias;
//! 3. `absolute_path_prefix` is set: prefix + path below the project root;
//! 4. otherwise keep it.

use ts::{LanguageServiceError, TextChange};

use super::framework::normalize_specifier;
use super::module_specifiers::{collect_module_specifiers, ModuleSpecifier, SpecifierKind};
use crate::file_system::{dirname, join, relative_within, AbsoluteFsPath, ReadonlyFileSystem};
use crate::language_service::script_blocks::{script_blocks, DocumentKind};
use crate::logging::Logger;
use crate::options::RewriteOptions;
use crate::tsconfig::AliasTable;

/// The replacement chosen for a specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub kind: SpecifierKind,
    pub text: String,
}

pub struct RelativeImportRewriter<'a> {
    options: &'a RewriteOptions,
    aliases: &'a AliasTable,
    project_root: AbsoluteFsPath,
    source_dir: String,
    logger: &'a dyn Logger,
}

impl<'a> RelativeImportRewriter<'a> {
    /// `file_path` is the absolute, canonical path of the file being rewritten.
    pub fn new(
        fs: &dyn ReadonlyFileSystem,
        options: &'a RewriteOptions,
        aliases: &'a AliasTable,
        file_path: &AbsoluteFsPath,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            options,
            aliases,
            project_root: project_root(fs, options, aliases),
            source_dir: dirname(file_path.as_str()),
            logger,
        }
    }

    pub fn project_root(&self) -> &AbsoluteFsPath {
        &self.project_root
    }

    /// Decide the replacement for one specifier. `None` leaves it as written.
    pub fn resolve(&self, specifier: &ModuleSpecifier) -> Option<Rewrite> {
        if !specifier.is_relative() {
            return None;
        }
        if let Some(max_depth) = self.options.max_relative_path_depth {
            if specifier.depth() <= max_depth {
                return None;
            }
        }

        let target = match self.options.framework_mode() {
            Some(mode) => normalize_specifier(mode, &specifier.target_module),
            None => specifier.target_module.clone(),
        };
        let resolved = join(&self.source_dir, &[&target]);

        if let Some(found) = self.aliases.lookup(&resolved) {
            return Some(Rewrite {
                kind: SpecifierKind::Aliased,
                text: found.specifier,
            });
        }

        let prefix = self.options.absolute_path_prefix.as_deref()?;
        match relative_within(self.project_root.as_str(), &resolved) {
            Some(rest) if !rest.is_empty() => Some(Rewrite {
                kind: SpecifierKind::Absolute,
                text: format!("{}{}", prefix, rest),
            }),
            _ => None,
        }
    }

    /// Compute the edits for every relative specifier in `text`.
    pub fn text_changes(
        &self,
        file_name: &str,
        document_kind: DocumentKind,
        text: &str,
    ) -> Result<Vec<TextChange>, LanguageServiceError> {
        let mut changes = Vec::new();
        for block in script_blocks(document_kind, text) {
            for specifier in collect_module_specifiers(file_name, &block)? {
                let Some(rewrite) = self.resolve(&specifier) else {
                    continue;
                };
                if rewrite.text == specifier.target_module {
                    continue;
                }
                self.logger.debug(&format!(
                    "Rewrote {} to '{}' in {}",
                    specifier.raw_text, rewrite.text, specifier.source_path
                ));
                changes.push(TextChange::new(
                    specifier.span.start,
                    specifier.span.end(),
                    rewrite.text,
                ));
            }
        }
        Ok(changes)
    }
}

/// The directory `absolute_path_prefix` paths are relative to: `project_root`
/// when given, else the tsconfig's `baseUrl` or directory, else the current
/// directory.
pub fn project_root(
    fs: &dyn ReadonlyFileSystem,
    options: &RewriteOptions,
    aliases: &AliasTable,
) -> AbsoluteFsPath {
    if let Some(root) = options.project_root.as_deref() {
        return fs.resolve(&[root]);
    }
    match aliases.base_url().or_else(|| aliases.config_dir()) {
        Some(dir) => AbsoluteFsPath::new(dir),
        None => fs.pwd(),
    }
}
