use ts::{
    LanguageService, LanguageServiceError, OrganizeImportsArgs, OrganizeImportsTypeOrder,
    ScriptKind, UserPreferences,
};

use super::{script_blocks, DocumentKind, OxcLanguageService};
use crate::text_changes::apply_text_changes;

fn organize_with(
    parser: Option<&str>,
    file_name: &str,
    code: &str,
    skip_destructive: bool,
    type_order: OrganizeImportsTypeOrder,
) -> Result<String, LanguageServiceError> {
    let service = OxcLanguageService::new(parser, file_name, code)?;
    let args = OrganizeImportsArgs {
        file_name: file_name.to_string(),
        skip_destructive_code_actions: skip_destructive,
    };
    let preferences = UserPreferences {
        organize_imports_type_order: type_order,
    };
    let changes = service.organize_imports(&args, &preferences)?;
    let text_changes: Vec<_> = changes
        .into_iter()
        .flat_map(|file| file.text_changes)
        .collect();
    Ok(apply_text_changes(code, &text_changes).unwrap())
}

fn organize(code: &str) -> String {
    organize_with(None, "file.ts", code, false, OrganizeImportsTypeOrder::Last).unwrap()
}

mod document_kind {
    use super::*;

    #[test]
    fn should_map_parsers_to_dialects() {
        assert_eq!(
            DocumentKind::resolve(Some("typescript"), "a.ts").unwrap(),
            DocumentKind::Script(ScriptKind::TS)
        );
        assert_eq!(
            DocumentKind::resolve(Some("typescript"), "a.tsx").unwrap(),
            DocumentKind::Script(ScriptKind::TSX)
        );
        assert_eq!(
            DocumentKind::resolve(Some("babel"), "a.js").unwrap(),
            DocumentKind::Script(ScriptKind::JSX)
        );
        assert_eq!(
            DocumentKind::resolve(Some("vue"), "a.vue").unwrap(),
            DocumentKind::Vue
        );
    }

    #[test]
    fn should_fall_back_to_the_extension() {
        assert_eq!(
            DocumentKind::resolve(None, "component.tsx").unwrap(),
            DocumentKind::Script(ScriptKind::TSX)
        );
        assert_eq!(
            DocumentKind::resolve(None, "file").unwrap(),
            DocumentKind::Script(ScriptKind::TS)
        );
    }

    #[test]
    fn should_reject_unknown_parsers() {
        assert_eq!(
            DocumentKind::resolve(Some("postcss"), "a.css"),
            Err(LanguageServiceError::UnsupportedParser("postcss".to_string()))
        );
    }

    #[test]
    fn should_find_vue_script_blocks() {
        let text = "<template><p/></template>\n<script lang=\"ts\">a</script>\n<script setup>b</script>";
        let blocks = script_blocks(DocumentKind::Vue, text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, ScriptKind::TS);
        assert_eq!(&text[blocks[0].offset..blocks[0].offset + 1], "a");
        assert_eq!(blocks[1].kind, ScriptKind::JSX);
        assert!(blocks.iter().all(|block| block.embedded));
    }
}

mod organize_imports {
    use super::*;

    #[test]
    fn should_sort_by_module_specifier() {
        let code = "import { b } from 'b';\nimport { a } from 'a';\nconsole.log(a, b);\n";
        assert_eq!(
            organize(code),
            "import { a } from 'a';\nimport { b } from 'b';\nconsole.log(a, b);\n"
        );
    }

    #[test]
    fn should_leave_organized_code_alone() {
        let code = "import { a } from 'a';\nimport { b } from 'b';\nconsole.log(a, b);\n";
        let service = OxcLanguageService::new(None, "file.ts", code).unwrap();
        let args = OrganizeImportsArgs {
            file_name: "file.ts".to_string(),
            skip_destructive_code_actions: false,
        };
        let changes = service
            .organize_imports(&args, &UserPreferences::default())
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn should_merge_imports_from_the_same_module() {
        let code = "import { b } from 'x';\nimport { a } from 'x';\nuse(a, b);\n";
        assert_eq!(organize(code), "import { a, b } from 'x';\nuse(a, b);\n");
    }

    #[test]
    fn should_merge_default_and_named_imports() {
        let code = "import { a } from 'x';\nimport X from 'x';\nuse(a, X);\n";
        assert_eq!(organize(code), "import X, { a } from 'x';\nuse(a, X);\n");
    }

    #[test]
    fn should_remove_unused_bindings() {
        let code = "import { a, unused } from 'x';\nconsole.log(a);\n";
        assert_eq!(organize(code), "import { a } from 'x';\nconsole.log(a);\n");
    }

    #[test]
    fn should_remove_fully_unused_import_groups() {
        let code = "import { unused } from 'x';\nconst y = 1;\n";
        assert_eq!(organize(code), "const y = 1;\n");
    }

    #[test]
    fn should_keep_unused_bindings_when_skipping_destructive_actions() {
        let code = "import { b, unused } from 'x';\nimport { a } from 'a';\nconsole.log(a, b);\n";
        let organized =
            organize_with(None, "file.ts", code, true, OrganizeImportsTypeOrder::Last).unwrap();
        assert_eq!(
            organized,
            "import { a } from 'a';\nimport { b, unused } from 'x';\nconsole.log(a, b);\n"
        );
    }

    #[test]
    fn should_not_move_imports_across_side_effect_imports() {
        let code = "import { b } from 'b';\nimport './polyfill';\nimport { a } from 'a';\nuse(a, b);\n";
        assert_eq!(organize(code), code);
    }

    #[test]
    fn should_keep_blank_line_separated_groups_apart() {
        let code = "import { d } from 'd';\nimport { c } from 'c';\n\nimport { b } from 'b';\nimport { a } from 'a';\nuse(a, b, c, d);\n";
        assert_eq!(
            organize(code),
            "import { c } from 'c';\nimport { d } from 'd';\n\nimport { a } from 'a';\nimport { b } from 'b';\nuse(a, b, c, d);\n"
        );
    }

    #[test]
    fn should_place_type_specifiers_per_type_order() {
        let code = "import { type B, A, type C, d } from 'x';\n";
        let with_order = |order| organize_with(None, "file.ts", code, true, order).unwrap();

        assert_eq!(
            with_order(OrganizeImportsTypeOrder::Last),
            "import { A, d, type B, type C } from 'x';\n"
        );
        assert_eq!(
            with_order(OrganizeImportsTypeOrder::First),
            "import { type B, type C, A, d } from 'x';\n"
        );
        assert_eq!(
            with_order(OrganizeImportsTypeOrder::Inline),
            "import { A, type B, type C, d } from 'x';\n"
        );
    }

    #[test]
    fn should_keep_react_in_jsx_files() {
        let code = "import React from 'react';\nexport const App = () => <div />;\n";
        let organized = organize_with(
            Some("babel"),
            "app.jsx",
            code,
            false,
            OrganizeImportsTypeOrder::Last,
        )
        .unwrap();
        assert_eq!(organized, code);
    }

    #[test]
    fn should_organize_vue_script_blocks_without_removing_bindings() {
        let code = "<template><Foo /></template>\n<script lang=\"ts\">\nimport { b } from 'b';\nimport { a, Foo } from 'a';\nexport default { b };\n</script>\n";
        let organized = organize_with(
            Some("vue"),
            "App.vue",
            code,
            false,
            OrganizeImportsTypeOrder::Last,
        )
        .unwrap();
        assert_eq!(
            organized,
            "<template><Foo /></template>\n<script lang=\"ts\">\nimport { a, Foo } from 'a';\nimport { b } from 'b';\nexport default { b };\n</script>\n"
        );
    }

    #[test]
    fn should_report_parse_errors() {
        let err = organize_with(
            None,
            "broken.ts",
            "import { from 'x'\n",
            false,
            OrganizeImportsTypeOrder::Last,
        )
        .unwrap_err();
        assert!(matches!(err, LanguageServiceError::Parse { ref file_name, .. } if file_name == "broken.ts"));
    }

    #[test]
    fn should_reject_requests_for_other_files() {
        let service = OxcLanguageService::new(None, "a.ts", "").unwrap();
        let args = OrganizeImportsArgs {
            file_name: "b.ts".to_string(),
            skip_destructive_code_actions: false,
        };
        assert_eq!(
            service.organize_imports(&args, &UserPreferences::default()),
            Err(LanguageServiceError::UnknownFile("b.ts".to_string()))
        );
    }

    #[test]
    fn should_keep_inline_comments_with_their_specifier() {
        let code = "import { b /* keep me */, a } from 'x';\nuse(a, b);\n";
        assert_eq!(
            organize(code),
            "import { a, b /* keep me */ } from 'x';\nuse(a, b);\n"
        );
    }

    #[test]
    fn should_keep_line_comments_in_multiline_braces() {
        let code = "import {\n  b, // why b\n  a,\n} from 'x';\nuse(a, b);\n";
        let organized = organize(code);
        assert_eq!(
            organized,
            "import {\n  a,\n  b, // why b\n} from 'x';\nuse(a, b);\n"
        );
        assert_eq!(organize(&organized), organized);
    }

    #[test]
    fn should_move_leading_comments_with_their_specifier() {
        let code = "import {\n  // c first\n  c,\n  a,\n} from 'x';\nuse(a, c);\n";
        assert_eq!(
            organize(code),
            "import {\n  a,\n  // c first\n  c,\n} from 'x';\nuse(a, c);\n"
        );
    }

    #[test]
    fn should_keep_comments_when_merging() {
        let code = "import { b /* from b */ } from 'x';\nimport { a } from 'x';\nuse(a, b);\n";
        assert_eq!(
            organize(code),
            "import { a, b /* from b */ } from 'x';\nuse(a, b);\n"
        );
    }

    #[test]
    fn should_leave_declarations_with_unattached_comments_as_written() {
        let outside_braces = "import /* note */ { b, a } from 'x';\nuse(a, b);\n";
        assert_eq!(organize(outside_braces), outside_braces);

        let before_closing_brace = "import {\n  b,\n  a,\n  // more later\n} from 'x';\nuse(a, b);\n";
        assert_eq!(organize(before_closing_brace), before_closing_brace);

        let unused = "import { unused } from 'y';\nimport /* pinned */ { z } from 'x';\nconsole.log(1);\n";
        assert_eq!(
            organize(unused),
            "import /* pinned */ { z } from 'x';\nconsole.log(1);\n"
        );
    }

    #[test]
    fn should_not_merge_type_only_default_and_named_imports() {
        let code = "import type A from 'x';\nimport type { B } from 'x';\nlet v: A | B;\nuse(v);\n";
        assert_eq!(organize(code), code);
    }

    #[test]
    fn should_merge_type_only_named_imports() {
        let code = "import type { B } from 'x';\nimport type { A } from 'x';\nlet v: A | B;\nuse(v);\n";
        assert_eq!(
            organize(code),
            "import type { A, B } from 'x';\nlet v: A | B;\nuse(v);\n"
        );
    }

    #[test]
    fn should_keep_bindings_used_by_exports_and_type_queries() {
        let code = "import a from 'a';\nimport b from 'b';\nimport c from 'c';\nexport { a };\nexport default b;\nlet t: typeof c;\nuse(t);\n";
        assert_eq!(organize(code), code);
    }
}
