//! Path aliases from a tsconfig `compilerOptions.paths` map.
//!
//! Given `"@/*": ["src/*"]` and `baseUrl: "."` next to `/project/tsconfig.json`,
//! the table holds an entry with alias prefix `@/` and base directory
//! `/project/src`. A module at `/project/src/lib/a` is then written `@/lib/a`.

use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::Deserialize;

use super::jsonc;
use crate::file_system::{
    clean_path, dirname, is_rooted, join, relative_within, strip_extension, AbsoluteFsPath,
    ReadonlyFileSystem,
};

/// How deep an `extends` chain may go before it is treated as a cycle.
pub const MAX_EXTENDS_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    Single(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::Single(path) => vec![path],
            Extends::Many(paths) => paths,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    extends: Option<Extends>,
    compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    base_url: Option<String>,
    paths: Option<IndexMap<String, Vec<String>>>,
}

/// `baseUrl` and `paths` after following `extends`, with every directory
/// made absolute.
#[derive(Debug, Default, Clone)]
struct ResolvedOptions {
    base_url: Option<String>,
    /// The `paths` map and the directory of the config that declared it.
    paths: Option<(IndexMap<String, Vec<String>>, String)>,
    config_dir: String,
}

impl ResolvedOptions {
    fn override_with(&mut self, other: ResolvedOptions) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
        self.config_dir = other.config_dir;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// The pattern as declared, e.g. `@/*`.
    pub pattern: String,
    /// The pattern without its wildcard, e.g. `@/`. Equal to `pattern` for
    /// exact entries.
    pub alias_prefix: String,
    /// Absolute directory the alias stands for. For exact entries this is the
    /// target module without extension or `/index`.
    pub base_dir: String,
    pub wildcard: bool,
}

impl AliasEntry {
    /// The specifier this entry would use for `resolved`, if it covers it.
    fn specifier_for(&self, resolved: &str) -> Option<String> {
        if self.wildcard {
            match relative_within(&self.base_dir, resolved)? {
                "" => None,
                suffix => Some(format!("{}{}", self.alias_prefix, suffix)),
            }
        } else if strip_index(&strip_extension(resolved)) == self.base_dir {
            Some(self.pattern.clone())
        } else {
            None
        }
    }
}

/// Ordered alias entries. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    base_url: Option<String>,
    config_dir: Option<String>,
}

/// Result of an alias lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch<'t> {
    pub entry: &'t AliasEntry,
    pub specifier: String,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute `baseUrl`, if one was configured anywhere in the chain.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Directory of the tsconfig the table was loaded from.
    pub fn config_dir(&self) -> Option<&str> {
        self.config_dir.as_deref()
    }

    /// Find the alias spelling for an absolute module path.
    ///
    /// The entry with the longest base directory wins; among entries of equal
    /// length the first declared one wins.
    pub fn lookup(&self, resolved: &str) -> Option<AliasMatch<'_>> {
        let mut best: Option<AliasMatch<'_>> = None;
        for entry in &self.entries {
            let Some(specifier) = entry.specifier_for(resolved) else {
                continue;
            };
            let longer = match &best {
                Some(current) => entry.base_dir.len() > current.entry.base_dir.len(),
                None => true,
            };
            if longer {
                best = Some(AliasMatch { entry, specifier });
            }
        }
        best
    }

    /// Load the table for the tsconfig at `tsconfig_path`, following `extends`.
    pub fn load(fs: &dyn ReadonlyFileSystem, tsconfig_path: &AbsoluteFsPath) -> anyhow::Result<Self> {
        let options = load_options(fs, tsconfig_path, 0)?;
        Ok(Self::from_resolved(options))
    }

    /// Build a table from tsconfig text, as if it were stored at `tsconfig_path`.
    /// `extends` is not followed.
    pub fn parse(content: &str, tsconfig_path: &AbsoluteFsPath) -> anyhow::Result<Self> {
        let (options, _) = parse_options(content, tsconfig_path)?;
        Ok(Self::from_resolved(options))
    }

    fn from_resolved(options: ResolvedOptions) -> Self {
        let mut table = AliasTable {
            entries: Vec::new(),
            base_url: options.base_url.clone(),
            config_dir: Some(options.config_dir.clone()),
        };

        let Some((paths, paths_dir)) = options.paths else {
            return table;
        };
        // Without `baseUrl`, targets are relative to the config declaring `paths`.
        let base = options.base_url.unwrap_or(paths_dir);

        for (pattern, targets) in paths {
            for target in targets {
                if let Some(entry) = build_entry(&pattern, &target, &base) {
                    table.entries.push(entry);
                }
            }
        }
        table
    }
}

fn build_entry(pattern: &str, target: &str, base: &str) -> Option<AliasEntry> {
    match (pattern.matches('*').count(), target.matches('*').count()) {
        (0, 0) => Some(AliasEntry {
            pattern: pattern.to_string(),
            alias_prefix: pattern.to_string(),
            base_dir: strip_index(&strip_extension(&join(base, &[target]))),
            wildcard: false,
        }),
        (1, 1) if pattern.ends_with('*') && target.ends_with('*') => {
            let alias_prefix = pattern.trim_end_matches('*');
            // A bare `*` would turn every module under the base into a bare
            // specifier indistinguishable from a package import.
            if alias_prefix.is_empty() {
                return None;
            }
            let base_dir = join(base, &[target.trim_end_matches('*')]);
            Some(AliasEntry {
                pattern: pattern.to_string(),
                alias_prefix: alias_prefix.to_string(),
                base_dir: base_dir.trim_end_matches('/').to_string(),
                wildcard: true,
            })
        }
        _ => None,
    }
}

fn strip_index(path: &str) -> String {
    path.strip_suffix("/index").unwrap_or(path).to_string()
}

fn parse_options(
    content: &str,
    tsconfig_path: &AbsoluteFsPath,
) -> anyhow::Result<(ResolvedOptions, Vec<String>)> {
    let raw: RawTsConfig = serde_json::from_str(&jsonc::to_json(content))
        .with_context(|| format!("failed to parse {}", tsconfig_path))?;

    let config_dir = dirname(tsconfig_path.as_str());
    let compiler_options = raw.compiler_options.unwrap_or_default();

    let options = ResolvedOptions {
        base_url: compiler_options
            .base_url
            .map(|base_url| join(&config_dir, &[&base_url])),
        paths: compiler_options.paths.map(|paths| (paths, config_dir.clone())),
        config_dir,
    };
    let extends = raw.extends.map(Extends::into_vec).unwrap_or_default();
    Ok((options, extends))
}

fn load_options(
    fs: &dyn ReadonlyFileSystem,
    tsconfig_path: &AbsoluteFsPath,
    depth: usize,
) -> anyhow::Result<ResolvedOptions> {
    if depth > MAX_EXTENDS_DEPTH {
        bail!(
            "tsconfig extends chain is deeper than {} at {}",
            MAX_EXTENDS_DEPTH,
            tsconfig_path
        );
    }

    let content = fs
        .read_file(tsconfig_path)
        .with_context(|| format!("failed to read {}", tsconfig_path))?;
    let (own, extends) = parse_options(&content, tsconfig_path)?;

    let mut merged = ResolvedOptions::default();
    for parent in extends {
        // Package specifiers (`@tsconfig/node20/tsconfig.json`) would need
        // node_modules resolution, which is out of reach here.
        if !(parent.starts_with('.') || is_rooted(&parent)) {
            continue;
        }
        let mut parent_path = join(&own.config_dir, &[&parent]);
        if !parent_path.ends_with(".json") {
            parent_path.push_str(".json");
        }
        let parent_path = AbsoluteFsPath::new(clean_path(&parent_path));
        let parent_options = load_options(fs, &parent_path, depth + 1)?;
        merged.override_with(parent_options);
    }
    merged.override_with(own);
    Ok(merged)
}
