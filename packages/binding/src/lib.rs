#![deny(clippy::all)]

use std::sync::Arc;

use napi::{Error, Result, Status};
use napi_derive::napi;
use once_cell::sync::Lazy;
use organize_imports::file_system::NodeJSFileSystem;
use organize_imports::logging::{ConsoleLogger, LogLevel};
use organize_imports::tsconfig::AliasTableCache;
use organize_imports::{FrameworkResolutionMode, OrganizeOptions, Organizer, RewriteOptions};
use serde::de::DeserializeOwned;
use ts::OrganizeImportsTypeOrder;

/// Alias tables shared by every call made from this process.
static ALIAS_CACHE: Lazy<Arc<AliasTableCache>> = Lazy::new(|| Arc::new(AliasTableCache::new()));

static ORGANIZER: Lazy<Organizer> = Lazy::new(|| {
    Organizer::new(Arc::new(NodeJSFileSystem::new()))
        .with_alias_cache(ALIAS_CACHE.clone())
        .with_logger(Arc::new(ConsoleLogger::new(LogLevel::Warn)))
});

/// The subset of the host formatter's options the pipeline reads. Any other
/// host option is ignored.
#[napi(object)]
pub struct JsOrganizeOptions {
    pub filepath: Option<String>,
    pub parser: Option<String>,
    pub parent_parser: Option<String>,
    pub organize_imports_skip_destructive_code_actions: Option<bool>,
    /// `"last"`, `"first"` or `"inline"`
    pub organize_imports_type_order: Option<String>,
    pub absolute_path_prefix: Option<String>,
    pub max_relative_path_depth: Option<u32>,
    pub tsconfig_path: Option<String>,
    /// `"nextjs"`
    pub framework_resolution_mode: Option<String>,
    /// Legacy spelling of `frameworkResolutionMode: "nextjs"`.
    pub nextjs_mode: Option<bool>,
    pub project_root: Option<String>,
}

#[napi(object)]
pub struct JsSourceFile {
    pub code: String,
    pub options: Option<JsOrganizeOptions>,
}

fn parse_enum<T: DeserializeOwned>(option: &str, value: String) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.clone())).map_err(|_| {
        Error::new(
            Status::InvalidArg,
            format!("Invalid value for {}: {:?}", option, value),
        )
    })
}

impl TryFrom<JsOrganizeOptions> for OrganizeOptions {
    type Error = Error;

    fn try_from(options: JsOrganizeOptions) -> Result<Self> {
        let organize_imports_type_order = match options.organize_imports_type_order {
            Some(order) => parse_enum("organizeImportsTypeOrder", order)?,
            None => OrganizeImportsTypeOrder::default(),
        };
        let framework_resolution_mode = match (
            options.framework_resolution_mode,
            options.nextjs_mode,
        ) {
            (Some(mode), _) => Some(Some(parse_enum("frameworkResolutionMode", mode)?)),
            (None, Some(true)) => Some(Some(FrameworkResolutionMode::NextJs)),
            (None, Some(false)) => Some(None),
            (None, None) => None,
        };

        Ok(OrganizeOptions {
            filepath: options.filepath,
            parser: options.parser,
            parent_parser: options.parent_parser,
            organize_imports_skip_destructive_code_actions: options
                .organize_imports_skip_destructive_code_actions
                .unwrap_or(false),
            organize_imports_type_order,
            rewrite: RewriteOptions {
                absolute_path_prefix: options.absolute_path_prefix,
                max_relative_path_depth: options
                    .max_relative_path_depth
                    .map(|depth| depth as usize),
                tsconfig_path: options.tsconfig_path,
                framework_resolution_mode,
                project_root: options.project_root,
            },
        })
    }
}

fn to_options(options: Option<JsOrganizeOptions>) -> Result<OrganizeOptions> {
    match options {
        Some(options) => OrganizeOptions::try_from(options),
        None => Ok(OrganizeOptions::default()),
    }
}

/// Organize the imports of one file.
#[napi]
pub fn organize(code: String, options: Option<JsOrganizeOptions>) -> Result<String> {
    let options = to_options(options)?;
    ORGANIZER
        .organize(&code, &options)
        .map_err(|e| Error::new(Status::GenericFailure, e.to_string()))
}

/// Organize many files in parallel. Fails with the first error, in input order.
#[napi]
pub fn organize_all(files: Vec<JsSourceFile>) -> Result<Vec<String>> {
    let files = files
        .into_iter()
        .map(|file| -> Result<(String, OrganizeOptions)> {
            Ok((file.code, to_options(file.options)?))
        })
        .collect::<Result<Vec<_>>>()?;

    ORGANIZER
        .organize_all(&files)
        .into_iter()
        .zip(&files)
        .map(|(result, (_, options))| {
            result.map_err(|e| {
                Error::new(
                    Status::GenericFailure,
                    format!("{}: {}", options.filepath(), e),
                )
            })
        })
        .collect()
}

/// Forget every cached tsconfig, e.g. after the host saw a tsconfig change.
#[napi]
pub fn clear_alias_cache() {
    ALIAS_CACHE.clear();
}
