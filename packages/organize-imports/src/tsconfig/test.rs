use std::sync::Arc;

use crate::file_system::testing::MockFileSystem;
use crate::file_system::AbsoluteFsPath;
use crate::logging::{BufferedLogger, LogLevel, NullLogger};
use crate::tsconfig::{jsonc, AliasTable, AliasTableCache};

fn path(p: &str) -> AbsoluteFsPath {
    AbsoluteFsPath::new(p)
}

mod jsonc_tests {
    use super::*;

    #[test]
    fn should_remove_line_and_block_comments() {
        let input = "{\n  // line\n  \"a\": 1, /* block\n spanning */ \"b\": 2\n}";
        let json = jsonc::strip_comments(input);
        assert!(!json.contains("line"));
        assert!(!json.contains("block"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["b"], 2);
    }

    #[test]
    fn should_keep_comment_markers_inside_strings() {
        let input = r#"{ "url": "https://example.com/*x*/", "q": "say \"//\"" }"#;
        assert_eq!(jsonc::strip_comments(input), input);
    }

    #[test]
    fn should_drop_trailing_commas() {
        let input = "{ \"paths\": { \"@/*\": [\"src/*\",], }, }";
        let value: serde_json::Value = serde_json::from_str(&jsonc::to_json(input)).unwrap();
        assert_eq!(value["paths"]["@/*"][0], "src/*");
    }

    #[test]
    fn should_keep_commas_inside_strings() {
        let input = r#"{ "a": "x,]" }"#;
        assert_eq!(jsonc::strip_trailing_commas(input), input);
    }
}

mod alias_table_tests {
    use super::*;

    #[test]
    fn should_resolve_targets_against_base_url() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "baseUrl": "./src", "paths": { "@lib/*": ["lib/*"] } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        let entry = &table.entries()[0];
        assert_eq!(entry.alias_prefix, "@lib/");
        assert_eq!(entry.base_dir, "/project/src/lib");
        assert!(entry.wildcard);
        assert_eq!(table.base_url(), Some("/project/src"));
    }

    #[test]
    fn should_resolve_targets_against_config_dir_without_base_url() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": { "@/*": ["./src/*"] } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        assert_eq!(table.entries()[0].base_dir, "/project/src");
        assert_eq!(table.config_dir(), Some("/project"));
    }

    #[test]
    fn should_map_module_paths_to_alias_specifiers() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        let found = table.lookup("/project/src/utils/format").unwrap();
        assert_eq!(found.specifier, "@/utils/format");
        assert!(table.lookup("/project/other/format").is_none());
        assert!(table.lookup("/project/srcx/format").is_none());
        assert!(table.lookup("/project/src").is_none());
    }

    #[test]
    fn should_prefer_the_most_specific_base_directory() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": {
                "@/*": ["src/*"],
                "@components/*": ["src/components/*"]
            } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        let found = table.lookup("/project/src/components/button").unwrap();
        assert_eq!(found.specifier, "@components/button");
        assert_eq!(found.entry.pattern, "@components/*");
    }

    #[test]
    fn should_prefer_the_first_declared_entry_on_ties() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": {
                "~/*": ["src/*"],
                "@/*": ["src/*"]
            } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        assert_eq!(table.lookup("/project/src/a").unwrap().specifier, "~/a");
    }

    #[test]
    fn should_match_exact_entries_on_the_whole_module() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": { "config": ["src/config/index.ts"] } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        assert_eq!(table.lookup("/project/src/config").unwrap().specifier, "config");
        assert_eq!(table.lookup("/project/src/config/index").unwrap().specifier, "config");
        assert!(table.lookup("/project/src/config/other").is_none());
    }

    #[test]
    fn should_skip_unsupported_patterns() {
        let table = AliasTable::parse(
            r#"{ "compilerOptions": { "paths": { "*": ["src/*"], "a/*/b": ["x/*/y"] } } }"#,
            &path("/project/tsconfig.json"),
        )
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn should_report_invalid_json() {
        assert!(AliasTable::parse("{ not json", &path("/project/tsconfig.json")).is_err());
    }

    #[test]
    fn should_follow_relative_extends() {
        let fs = MockFileSystem::new_posix();
        fs.init_with_files(vec![
            (
                "/project/tsconfig.base.json",
                r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
            ),
            (
                "/project/app/tsconfig.json",
                r#"{ "extends": "../tsconfig.base", "compilerOptions": { "strict": true } }"#,
            ),
        ]);
        let table = AliasTable::load(&fs, &path("/project/app/tsconfig.json")).unwrap();
        assert_eq!(table.entries()[0].base_dir, "/project/src");
        assert_eq!(table.config_dir(), Some("/project/app"));
    }

    #[test]
    fn should_let_the_extending_config_override_paths() {
        let fs = MockFileSystem::new_posix();
        fs.init_with_files(vec![
            (
                "/project/base.json",
                r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
            ),
            (
                "/project/tsconfig.json",
                r#"{ "extends": ["./base.json"], "compilerOptions": { "paths": { "~/*": ["lib/*"] } } }"#,
            ),
        ]);
        let table = AliasTable::load(&fs, &path("/project/tsconfig.json")).unwrap();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].pattern, "~/*");
    }

    #[test]
    fn should_stop_on_extends_cycles() {
        let fs = MockFileSystem::new_posix();
        fs.init_with_files(vec![
            ("/a.json", r#"{ "extends": "./b.json" }"#),
            ("/b.json", r#"{ "extends": "./a.json" }"#),
        ]);
        let err = AliasTable::load(&fs, &path("/a.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("deeper than"));
    }

    #[test]
    fn should_report_missing_files() {
        let fs = MockFileSystem::new_posix();
        assert!(AliasTable::load(&fs, &path("/missing/tsconfig.json")).is_err());
    }
}

mod cache_tests {
    use super::*;

    #[test]
    fn should_read_each_tsconfig_once() {
        let fs = MockFileSystem::new_posix();
        fs.init_with_files(vec![(
            "/project/tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )]);
        let cache = AliasTableCache::new();
        let tsconfig = path("/project/tsconfig.json");

        let first = cache.get_or_load(&fs, &tsconfig, &NullLogger);
        let second = cache.get_or_load(&fs, &tsconfig, &NullLogger);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fs.read_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn should_degrade_to_an_empty_table_and_warn_once() {
        let fs = MockFileSystem::new_posix();
        let cache = AliasTableCache::new();
        let logger = BufferedLogger::new(LogLevel::Warn);
        let tsconfig = path("/project/tsconfig.json");

        assert!(cache.get_or_load(&fs, &tsconfig, &logger).is_empty());
        assert!(cache.get_or_load(&fs, &tsconfig, &logger).is_empty());

        let warnings = logger.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("/project/tsconfig.json"));
    }

    #[test]
    fn should_reload_after_clear() {
        let fs = MockFileSystem::new_posix();
        fs.write_file("/tsconfig.json", "{}");
        let cache = AliasTableCache::new();
        let tsconfig = path("/tsconfig.json");

        cache.get_or_load(&fs, &tsconfig, &NullLogger);
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_load(&fs, &tsconfig, &NullLogger);
        assert_eq!(fs.read_count(), 2);
    }
}
