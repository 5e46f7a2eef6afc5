use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static SCRIPT_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\.d)?\.[cm]?[jt]sx?$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a script extension (`.ts`, `.d.ts`, `.tsx`, `.mjs`, ...) from a path.
pub fn strip_extension(path: &str) -> String {
    SCRIPT_EXTENSION.replace(path, "").to_string()
}

/// Length of the root prefix of a canonical path: `/`, `C:/` or nothing.
fn root_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        if bytes.get(2) == Some(&b'/') {
            3
        } else {
            2
        }
    } else if path.starts_with('/') {
        1
    } else {
        0
    }
}

pub fn is_rooted(path: &str) -> bool {
    root_len(&normalize_separators(path)) > 0
}

/// Normalize separators and fold `.`, `..` and empty segments.
///
/// `..` segments that would climb above the root of an absolute path are
/// dropped; on relative paths they are kept.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);

    let root = root_len(&normalized);
    let (prefix, path_part) = normalized.split_at(root);
    let is_absolute = root > 0;

    let mut segments: SmallVec<[&str; 16]> = SmallVec::new();

    for segment in path_part.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if is_absolute => {}
                _ => segments.push(segment),
            }
        } else {
            segments.push(segment);
        }
    }

    let joined = segments.join("/");

    if !is_absolute {
        return joined;
    }
    // `C:` without a separator still gets one so the result stays absolute.
    let prefix = if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    };
    format!("{}{}", prefix, joined)
}

pub fn dirname(file: &str) -> String {
    let cleaned = clean_path(file);
    let root = root_len(&cleaned);
    match cleaned.rfind('/') {
        Some(index) if index + 1 > root => cleaned[..index].to_string(),
        Some(_) => cleaned[..root].to_string(),
        None => ".".to_string(),
    }
}

pub fn join(base_path: &str, paths: &[&str]) -> String {
    let mut joined = normalize_separators(base_path);
    for path in paths {
        let path = normalize_separators(path);
        if is_rooted(&path) {
            joined = path;
        } else if joined.is_empty() || joined.ends_with('/') {
            joined.push_str(&path);
        } else {
            joined.push('/');
            joined.push_str(&path);
        }
    }
    clean_path(&joined)
}

/// The part of `path` below `base`, if `path` lives inside `base`.
///
/// Matching is done on whole segments: `/a/bc` is not inside `/a/b`. A path
/// equal to `base` yields an empty suffix.
pub fn relative_within<'p>(base: &str, path: &'p str) -> Option<&'p str> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.strip_prefix('/');
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}
