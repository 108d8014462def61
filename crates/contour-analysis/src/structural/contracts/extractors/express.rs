//! Express router endpoint extractor.

use contour_core::config::ContourConfig;
use contour_core::constants::ROUTER_METHODS;
use contour_core::errors::ExtractionError;
use regex::Regex;

use super::identifier_alternation;
use crate::index::LineIndex;
use crate::structural::contracts::mounts::compile;
use crate::structural::contracts::normalize::normalize_path;
use crate::structural::contracts::types::*;

/// Extracts `router.<verb>(<path>` definitions from router modules.
///
/// The path must be a quoted or template literal; anything else (a variable,
/// an array of paths, a regex route) is skipped.
pub struct ExpressRouteExtractor {
    route_re: Regex,
    auth_re: Option<Regex>,
}

impl ExpressRouteExtractor {
    pub fn new(config: &ContourConfig) -> Result<Self, ExtractionError> {
        let router = regex::escape(config.extraction.effective_router_object());
        let verbs = ROUTER_METHODS.join("|");
        let route_re = compile(
            "route",
            &format!(
                r#"\b{router}\s*\.\s*({verbs})\s*\(\s*(?:'([^'\n]*)'|"([^"\n]*)"|`([^`]*)`)"#
            ),
        )?;

        let auth_names = config.extraction.effective_auth_middleware();
        let auth_re = if auth_names.is_empty() {
            None
        } else {
            let names = identifier_alternation(&auth_names);
            Some(compile("auth_middleware", &format!(r"\b(?:{names})\b"))?)
        };

        Ok(Self { route_re, auth_re })
    }

    /// Extract every endpoint of the router module mounted by `mount`.
    pub fn extract(&self, mount: &RouteMount, content: &str) -> Vec<RouteEndpoint> {
        let file_auth_flag = self.has_auth_middleware(content);
        let lines = LineIndex::new(content);

        self.route_re
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let method = HttpMethod::from_source(caps.get(1)?.as_str())?;
                let raw = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?.as_str();
                let line = lines.line_of(whole.start());
                let Some(normalized) = normalize_path(raw) else {
                    tracing::debug!(file = %mount.file_path, line, raw, "skipping unnormalizable route path");
                    return None;
                };
                Some(RouteEndpoint::new(
                    method,
                    raw,
                    normalized,
                    &mount.base_path,
                    line,
                    file_auth_flag,
                ))
            })
            .collect()
    }

    /// Coarse file-level check: does any auth middleware name appear anywhere?
    pub fn has_auth_middleware(&self, content: &str) -> bool {
        self.auth_re.as_ref().is_some_and(|re| re.is_match(content))
    }
}
