//! The organize pipeline.
//!
//! `Start -> Normalized -> PathsRewritten? -> Organized -> Done`. Relative
//! imports are rewritten before imports are organized, so the organizer sorts
//! and merges the final specifiers.

use std::sync::Arc;

use rayon::prelude::*;
use ts::{OrganizeImportsArgs, TextChange, UserPreferences};

use crate::error::OrganizeError;
use crate::file_system::{normalize_separators, NodeJSFileSystem, ReadonlyFileSystem};
use crate::language_service::{DocumentKind, LanguageServiceFactory, OxcLanguageServiceFactory};
use crate::logging::{Logger, NullLogger};
use crate::options::OrganizeOptions;
use crate::text_changes::apply_text_changes;
use crate::transform::RelativeImportRewriter;
use crate::tsconfig::{AliasTable, AliasTableCache};

/// Runs the pipeline with injected collaborators.
///
/// An `Organizer` is `Send + Sync`; one instance can serve any number of
/// files, in parallel, sharing its alias cache.
pub struct Organizer {
    fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
    aliases: Arc<AliasTableCache>,
    language_services: Arc<dyn LanguageServiceFactory>,
    logger: Arc<dyn Logger>,
}

impl Organizer {
    pub fn new(fs: Arc<dyn ReadonlyFileSystem + Send + Sync>) -> Self {
        Self {
            fs,
            aliases: Arc::new(AliasTableCache::new()),
            language_services: Arc::new(OxcLanguageServiceFactory),
            logger: Arc::new(NullLogger),
        }
    }

    pub fn with_alias_cache(mut self, aliases: Arc<AliasTableCache>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_language_service_factory(
        mut self,
        language_services: Arc<dyn LanguageServiceFactory>,
    ) -> Self {
        self.language_services = language_services;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn alias_cache(&self) -> &Arc<AliasTableCache> {
        &self.aliases
    }

    /// Organize the imports of one file.
    ///
    /// Any failure aborts the whole call; no partially edited text is returned.
    pub fn organize(&self, code: &str, options: &OrganizeOptions) -> Result<String, OrganizeError> {
        let file_name = normalize_separators(options.filepath());

        if options.is_embedded() {
            self.logger
                .debug(&format!("Skipping {}: block of an enclosing Vue file", file_name));
            return Ok(code.to_string());
        }

        let rewritten;
        let text = if options.rewrite.is_enabled() {
            rewritten = self.rewrite_relative_imports(&file_name, code, options)?;
            rewritten.as_str()
        } else {
            code
        };

        self.organize_imports(&file_name, text, options)
    }

    /// Organize a batch of independent files on the rayon pool. Results are
    /// in input order.
    pub fn organize_all(
        &self,
        files: &[(String, OrganizeOptions)],
    ) -> Vec<Result<String, OrganizeError>> {
        files
            .par_iter()
            .map(|(code, options)| self.organize(code, options))
            .collect()
    }

    fn rewrite_relative_imports(
        &self,
        file_name: &str,
        text: &str,
        options: &OrganizeOptions,
    ) -> Result<String, OrganizeError> {
        let document_kind = DocumentKind::resolve(options.parser.as_deref(), file_name)?;

        let aliases = match options.rewrite.tsconfig_path.as_deref() {
            Some(tsconfig_path) => self.aliases.get_or_load(
                self.fs.as_ref(),
                &self.fs.resolve(&[tsconfig_path]),
                self.logger.as_ref(),
            ),
            None => Arc::new(AliasTable::empty()),
        };

        let file_path = self.fs.resolve(&[file_name]);
        let rewriter = RelativeImportRewriter::new(
            self.fs.as_ref(),
            &options.rewrite,
            &aliases,
            &file_path,
            self.logger.as_ref(),
        );
        let changes = rewriter.text_changes(file_name, document_kind, text)?;
        Ok(apply_text_changes(text, &changes)?)
    }

    fn organize_imports(
        &self,
        file_name: &str,
        text: &str,
        options: &OrganizeOptions,
    ) -> Result<String, OrganizeError> {
        let service =
            self.language_services
                .create(options.parser.as_deref(), file_name, text)?;

        let args = OrganizeImportsArgs {
            file_name: file_name.to_string(),
            skip_destructive_code_actions: options.organize_imports_skip_destructive_code_actions,
        };
        let preferences = UserPreferences {
            organize_imports_type_order: options.organize_imports_type_order,
        };

        let changes: Vec<TextChange> = service
            .organize_imports(&args, &preferences)?
            .into_iter()
            .filter(|file| file.file_name == file_name)
            .flat_map(|file| file.text_changes)
            .collect();

        if !changes.is_empty() {
            self.logger.debug(&format!(
                "Organized imports of {} ({} edit(s))",
                file_name,
                changes.len()
            ));
        }
        Ok(apply_text_changes(text, &changes)?)
    }
}

/// Organize one file against the real file system with a fresh alias cache.
pub fn organize(code: &str, options: &OrganizeOptions) -> Result<String, OrganizeError> {
    Organizer::new(Arc::new(NodeJSFileSystem::new())).organize(code, options)
}
