//! The CommonJS ⇄ ESM module rewrite.
//!
//! Wiki pages hold CommonJS (`require` / `module.exports`); the local tree
//! holds ESM (`import` / `export default`). Besides the statement forms,
//! three specifier conventions differ between the two sides:
//!
//! - icons come from `@wikimedia/codex-icons` locally and from the bundle's
//!   `icons.json` page on the wiki;
//! - shared dependencies live under `wiki_deps/` locally and as sibling
//!   gadget pages on the wiki;
//! - the app is constructed with `createApp` locally and `createMwApp` on
//!   the wiki.
//!
//! Going toward CommonJS, import statements may span multiple lines (wrapped
//! import lists); going toward ESM every `require` is single-line.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use gadgetry_core::config::SHARED_DEPS_DIR;

use crate::icons::CODEX_ICONS_PACKAGE;
use crate::paths;

static REQUIRE_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const (.+?) = require\((.+?)\);").expect("require pattern"));

static IMPORT_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)import (.+?) from (.+?);").expect("import pattern"));

static ICONS_FILE_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:\.\./)+icons\.json""#).expect("icons specifier pattern"));

/// One shared dependency's specifier patterns, both directions.
struct DepPatterns {
    name: String,
    /// `"./name"` or `"../…/name"` — how wiki pages reference the sibling.
    wiki_form: Regex,
    /// `"./wiki_deps/name"` or `"../…/wiki_deps/name"` — the local form.
    local_form: Regex,
}

/// Bidirectional rewriter for one bundle's declared shared dependencies.
///
/// Precondition: input follows the restricted module grammar (one statement
/// per line, no nested requires, multi-line statements only for ESM import
/// lists). Anything else passes through unchanged.
pub struct Rewriter {
    deps: Vec<DepPatterns>,
}

impl Rewriter {
    pub fn new(shared_deps: &[String]) -> Self {
        let deps = shared_deps
            .iter()
            .map(|name| {
                let quoted = regex::escape(name);
                DepPatterns {
                    name: name.clone(),
                    wiki_form: Regex::new(&format!(r#""(?:\./|(?:\.\./)+){quoted}""#))
                        .expect("escaped dependency pattern"),
                    local_form: Regex::new(&format!(
                        r#""(?:\./|(?:\.\./)+){SHARED_DEPS_DIR}/{quoted}""#
                    ))
                    .expect("escaped dependency pattern"),
                }
            })
            .collect();
        Self { deps }
    }

    /// Rewrite wiki-side CommonJS into the local ESM form.
    ///
    /// `src_path` decides the shared-dependency prefix and whether the file
    /// is itself inside the shared namespace (whose own imports keep their
    /// ancestor-relative form).
    pub fn to_esm(&self, text: &str, src_path: &str) -> String {
        let mut out = REQUIRE_STATEMENT
            .replace_all(text, "import $1 from $2;")
            .into_owned();

        let icons_package = format!("\"{CODEX_ICONS_PACKAGE}\"");
        out = ICONS_FILE_SPECIFIER
            .replace_all(&out, NoExpand(&icons_package))
            .into_owned();

        if !paths::in_shared_deps(src_path) {
            let prefix = paths::root_prefix(src_path);
            for dep in &self.deps {
                let local = format!("\"{prefix}{SHARED_DEPS_DIR}/{}\"", dep.name);
                out = dep.wiki_form.replace_all(&out, NoExpand(&local)).into_owned();
            }
        }

        out = out.replace("module.exports =", "export default");
        out.replace("createMwApp", "createApp")
    }

    /// Rewrite local ESM into the wiki-side CommonJS form.
    ///
    /// The exact inverse of [`Rewriter::to_esm`] for canonical input; the
    /// same-directory dependency form is accepted toward ESM only, so this
    /// direction always emits ancestor-relative specifiers.
    pub fn to_commonjs(&self, text: &str, src_path: &str) -> String {
        let wiki_prefix = paths::wiki_prefix(src_path);
        let mut out = text.replace(
            &format!("\"{CODEX_ICONS_PACKAGE}\""),
            &format!("\"{wiki_prefix}icons.json\""),
        );

        if !paths::in_shared_deps(src_path) {
            for dep in &self.deps {
                let remote = format!("\"{wiki_prefix}{}\"", dep.name);
                out = dep.local_form.replace_all(&out, NoExpand(&remote)).into_owned();
            }
        }

        out = out.replace("createApp", "createMwApp");
        let out = IMPORT_STATEMENT
            .replace_all(&out, "const $1 = require($2);")
            .into_owned();
        out.replace("export default", "module.exports =")
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rewriter() -> Rewriter {
        Rewriter::new(&deps(&["wikt.core.user.js", "wikt.core/edit.js"]))
    }

    #[test]
    fn require_becomes_import() {
        let out = rewriter().to_esm(r#"const api = require("mediawiki.api");"#, "main.js");
        assert_eq!(out, r#"import api from "mediawiki.api";"#);
    }

    #[test]
    fn destructured_require_keeps_its_braces() {
        let out = rewriter().to_esm(r#"const { createMwApp } = require("vue");"#, "main.js");
        assert_eq!(out, r#"import { createApp } from "vue";"#);
    }

    #[test]
    fn module_exports_becomes_export_default() {
        let out = rewriter().to_esm("module.exports = buildForm;\n", "form.js");
        assert_eq!(out, "export default buildForm;\n");
    }

    #[test]
    fn icons_alias_to_the_package_at_any_depth() {
        let root = rewriter().to_esm(
            r#"const { cdxIconEdit } = require("../icons.json");"#,
            "main.js",
        );
        assert_eq!(
            root,
            r#"import { cdxIconEdit } from "@wikimedia/codex-icons";"#
        );

        let nested = rewriter().to_esm(
            r#"const { cdxIconEdit } = require("../../../icons.json");"#,
            "a/b/c.js",
        );
        assert_eq!(
            nested,
            r#"import { cdxIconEdit } from "@wikimedia/codex-icons";"#
        );
    }

    #[test]
    fn icons_return_to_an_ancestor_relative_file() {
        let out = rewriter().to_commonjs(
            r#"import { cdxIconEdit } from "@wikimedia/codex-icons";"#,
            "utils/helpers.js",
        );
        assert_eq!(
            out,
            r#"const { cdxIconEdit } = require("../../icons.json");"#
        );
    }

    #[test]
    fn shared_dep_moves_into_the_namespace() {
        let out = rewriter().to_esm(
            r#"const U = require("../wikt.core.user.js");"#,
            "main.js",
        );
        assert_eq!(out, r#"import U from "./wiki_deps/wikt.core.user.js";"#);
    }

    #[test]
    fn same_directory_form_is_accepted_toward_esm() {
        let out = rewriter().to_esm(r#"const U = require("./wikt.core.user.js");"#, "main.js");
        assert_eq!(out, r#"import U from "./wiki_deps/wikt.core.user.js";"#);
    }

    #[test]
    fn shared_dep_prefix_follows_the_file_depth() {
        let out = rewriter().to_esm(
            r#"const U = require("../../wikt.core.user.js");"#,
            "utils/helpers.js",
        );
        assert_eq!(out, r#"import U from "../wiki_deps/wikt.core.user.js";"#);
    }

    #[test]
    fn shared_dep_returns_to_an_ancestor_relative_sibling() {
        let out = rewriter().to_commonjs(
            r#"import U from "../wiki_deps/wikt.core.user.js";"#,
            "utils/helpers.js",
        );
        assert_eq!(out, r#"const U = require("../../wikt.core.user.js");"#);
    }

    #[test]
    fn dependency_names_may_contain_slashes() {
        let out = rewriter().to_esm(r#"const E = require("../wikt.core/edit.js");"#, "main.js");
        assert_eq!(out, r#"import E from "./wiki_deps/wikt.core/edit.js";"#);
    }

    #[test]
    fn files_inside_the_namespace_keep_their_own_imports() {
        let wiki = r#"const U = require("../wikt.core.user.js");"#;
        let out = rewriter().to_esm(wiki, "wiki_deps/wikt.core.tools.js");
        assert_eq!(out, r#"import U from "../wikt.core.user.js";"#);

        let local = r#"import U from "../wikt.core.user.js";"#;
        let back = rewriter().to_commonjs(local, "wiki_deps/wikt.core.tools.js");
        assert_eq!(back, wiki);
    }

    #[test]
    fn wrapped_import_lists_collapse_into_a_require() {
        let text = "import {\n  CdxButton,\n  CdxField,\n} from \"@wikimedia/codex\";\n";
        let out = rewriter().to_commonjs(text, "main.js");
        assert_eq!(
            out,
            "const {\n  CdxButton,\n  CdxField,\n} = require(\"@wikimedia/codex\");\n"
        );
    }

    #[test]
    fn malformed_input_passes_through() {
        let text = "const x = 1;\nmodule.exports.thing = x;\n";
        assert_eq!(rewriter().to_esm(text, "main.js"), text);
    }

    #[test]
    fn to_esm_is_idempotent_on_esm_text() {
        let esm = concat!(
            "import { createApp } from \"vue\";\n",
            "import { cdxIconEdit } from \"@wikimedia/codex-icons\";\n",
            "import U from \"./wiki_deps/wikt.core.user.js\";\n",
            "export default U;\n",
        );
        assert_eq!(rewriter().to_esm(esm, "main.js"), esm);
    }
}
