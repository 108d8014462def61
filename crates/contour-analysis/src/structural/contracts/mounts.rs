//! Route mount resolver: maps `app.use(base, id)` wiring to router modules.

use std::path::{Path, PathBuf};

use contour_core::config::ContourConfig;
use contour_core::errors::ExtractionError;
use contour_core::types::collections::FxHashMap;
use regex::Regex;

use super::types::RouteMount;
use crate::index::{normalize_lexically, SourceIndex};

/// Extensions a compiled ESM import may name in place of its source's.
const EMITTED_JS_EXTENSIONS: [&str; 4] = ["js", "mjs", "cjs", "jsx"];

/// A `<app>.use("<base>", ..., <id>)` statement found in the wiring source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountStatement {
    pub base_path: String,
    pub identifier: String,
}

/// Raw scan of the wiring source, before any filesystem resolution.
#[derive(Debug, Clone, Default)]
pub struct WiringScan {
    /// identifier → relative module specifier; last binding wins.
    pub imports: FxHashMap<String, String>,
    /// Mount statements in source order.
    pub mounts: Vec<MountStatement>,
}

/// Parses the HTTP wiring entry point into `RouteMount`s.
pub struct MountResolver {
    import_re: Regex,
    require_re: Regex,
    mount_re: Regex,
    routes_dir: String,
    extensions: Vec<String>,
}

impl MountResolver {
    pub fn new(config: &ContourConfig) -> Result<Self, ExtractionError> {
        let app = regex::escape(config.extraction.effective_app_object());
        Ok(Self {
            import_re: compile(
                "import",
                r#"\bimport\s+([A-Za-z_$][\w$]*)\s+from\s+['"](\.{1,2}/[^'"\n]+)['"]"#,
            )?,
            require_re: compile(
                "require",
                r#"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*require\(\s*['"](\.{1,2}/[^'"\n]+)['"]\s*\)"#,
            )?,
            mount_re: compile(
                "mount",
                &format!(r#"\b{app}\s*\.\s*use\(\s*(?:'([^'\n]*)'|"([^"\n]*)")\s*,\s*([\w$\s,]+?)\s*\)"#),
            )?,
            routes_dir: config.layout.effective_routes_dir().to_string(),
            extensions: config.extraction.effective_source_extensions(),
        })
    }

    /// Scan import/require bindings and mount statements.
    pub fn scan(&self, wiring: &str) -> WiringScan {
        let mut bindings: Vec<(usize, String, String)> = self
            .import_re
            .captures_iter(wiring)
            .chain(self.require_re.captures_iter(wiring))
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((whole.start(), caps[1].to_string(), caps[2].to_string()))
            })
            .collect();
        bindings.sort_by_key(|(offset, _, _)| *offset);

        let mut imports = FxHashMap::default();
        for (_, identifier, specifier) in bindings {
            imports.insert(identifier, specifier);
        }

        let mounts = self
            .mount_re
            .captures_iter(wiring)
            .filter_map(|caps| {
                let base_path = caps.get(1).or_else(|| caps.get(2))?.as_str();
                // Middleware may precede the router; the router is the last argument.
                let identifier = caps[3].split(',').map(str::trim).last()?;
                if identifier.is_empty() || identifier.contains(char::is_whitespace) {
                    return None;
                }
                Some(MountStatement {
                    base_path: base_path.to_string(),
                    identifier: identifier.to_string(),
                })
            })
            .collect();

        WiringScan { imports, mounts }
    }

    /// Resolve the wiring source at `wiring_path` into mounts, in source order.
    ///
    /// Mounts whose identifier is not bound to a module under the routes
    /// directory, or whose base path is not absolute, are skipped.
    pub fn resolve(&self, index: &SourceIndex, wiring_path: &Path, wiring: &str) -> Vec<RouteMount> {
        let scan = self.scan(wiring);
        let wiring_dir = wiring_path.parent().unwrap_or(index.root()).to_path_buf();
        let routes_root = index.absolute(Path::new(&self.routes_dir));

        scan.mounts
            .into_iter()
            .filter_map(|stmt| {
                if !stmt.base_path.starts_with('/') {
                    tracing::debug!(base = %stmt.base_path, "skipping mount with relative base path");
                    return None;
                }
                let Some(specifier) = scan.imports.get(&stmt.identifier) else {
                    tracing::debug!(identifier = %stmt.identifier, "skipping unresolved mount");
                    return None;
                };
                let module = normalize_lexically(&wiring_dir.join(specifier));
                if !module.starts_with(&routes_root) {
                    tracing::debug!(identifier = %stmt.identifier, specifier = %specifier, "mount target outside routes dir");
                    return None;
                }
                let file = self.module_file(index, &module);
                if !index.is_file(&file) {
                    tracing::debug!(file = %file.display(), "router module missing on disk");
                }
                Some(RouteMount {
                    identifier: stmt.identifier,
                    base_path: stmt.base_path,
                    file_path: index.relative(&file),
                })
            })
            .collect()
    }

    /// Pick the file a module specifier refers to: the path itself, then each
    /// extension appended, then `index.<ext>` inside it. A specifier naming
    /// emitted JavaScript (`./orders.js`) also tries its stem with each
    /// extension, so TypeScript sources behind ESM imports resolve.
    ///
    /// A missing module keeps a stable name: the specifier itself when it
    /// carries an emitted-JS extension, else the first extension appended.
    fn module_file(&self, index: &SourceIndex, module: &Path) -> PathBuf {
        if index.is_file(module) {
            return module.to_path_buf();
        }
        let emitted_js = module
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| EMITTED_JS_EXTENSIONS.contains(&ext));

        let with_ext = |ext: &str| PathBuf::from(format!("{}.{ext}", module.display()));
        let stem_candidates = self
            .extensions
            .iter()
            .filter(|_| emitted_js)
            .map(|ext| module.with_extension(ext.as_str()));

        stem_candidates
            .chain(self.extensions.iter().map(|ext| with_ext(ext.as_str())))
            .chain(self.extensions.iter().map(|ext| module.join(format!("index.{ext}"))))
            .find(|candidate| index.is_file(candidate))
            .unwrap_or_else(|| match self.extensions.first() {
                Some(_) if emitted_js => module.to_path_buf(),
                Some(ext) => with_ext(ext.as_str()),
                None => module.to_path_buf(),
            })
    }
}

pub(crate) fn compile(name: &str, pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern {
        name: name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MountResolver {
        MountResolver::new(&ContourConfig::default()).unwrap()
    }

    #[test]
    fn scan_collects_imports_and_mounts_in_order() {
        let src = r#"
import express from "express";
import patients from "./routes/patients";
const orders = require('./routes/orders.js');
app.use("/api/patients", patients);
app.use('/api/orders', requireAuth, orders);
"#;
        let scan = resolver().scan(src);
        assert_eq!(scan.imports.get("patients").map(String::as_str), Some("./routes/patients"));
        assert_eq!(scan.imports.get("orders").map(String::as_str), Some("./routes/orders.js"));
        assert!(!scan.imports.contains_key("express"));
        let ids: Vec<_> = scan.mounts.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["patients", "orders"]);
        assert_eq!(scan.mounts[1].base_path, "/api/orders");
    }

    #[test]
    fn last_binding_wins() {
        let src = r#"
import users from "./routes/users-v1";
const users = require("./routes/users-v2");
"#;
        let scan = resolver().scan(src);
        assert_eq!(scan.imports.get("users").map(String::as_str), Some("./routes/users-v2"));
    }

    #[test]
    fn middleware_only_mounts_are_ignored() {
        let scan = resolver().scan("app.use(express.json());\napp.use(cors());\n");
        assert!(scan.mounts.is_empty());
    }
}
