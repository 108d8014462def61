//! Frontend API-client call extractor.

use contour_core::config::ContourConfig;
use contour_core::constants::CLIENT_METHODS;
use contour_core::errors::ExtractionError;
use regex::Regex;

use super::identifier_alternation;
use crate::structural::contracts::mounts::compile;
use crate::structural::contracts::normalize::normalize_path;
use crate::structural::contracts::types::*;

/// Extracts `<client>.<verb>('<path>'` call sites, one line at a time.
///
/// The first argument must open with `'`, `"` or a backtick and close with
/// the same delimiter on the same line. Arguments spanning lines, and paths
/// that do not start with `/` once normalized, are skipped.
pub struct ClientCallExtractor {
    call_re: Regex,
}

impl ClientCallExtractor {
    pub fn new(config: &ContourConfig) -> Result<Self, ExtractionError> {
        let receivers = identifier_alternation(&config.extraction.effective_client_objects());
        let verbs = CLIENT_METHODS.join("|");
        let call_re = compile(
            "client_call",
            &format!(r#"\b(?:{receivers})\s*\.\s*({verbs})\s*\(\s*(['"`])"#),
        )?;
        Ok(Self { call_re })
    }

    pub fn extract(&self, content: &str, file_path: &str) -> Vec<ClientEndpoint> {
        let mut endpoints = Vec::new();

        for (line_idx, line) in content.lines().enumerate() {
            let source_line = (line_idx + 1) as u32;
            for caps in self.call_re.captures_iter(line) {
                let (Some(verb), Some(delim)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let Some(method) = HttpMethod::from_source(verb.as_str()) else {
                    continue;
                };
                let rest = &line[delim.end()..];
                let Some(close) = rest.find(delim.as_str()) else {
                    tracing::debug!(file = file_path, line = source_line, "client call argument does not close on its line");
                    continue;
                };
                let raw = &rest[..close];
                match normalize_path(raw) {
                    Some(path) if path.starts_with('/') => endpoints.push(ClientEndpoint {
                        method,
                        normalized_path: path,
                        source_line,
                        file_path: file_path.to_string(),
                    }),
                    _ => {
                        tracing::debug!(file = file_path, line = source_line, raw, "skipping client path");
                    }
                }
            }
        }
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ClientCallExtractor {
        ExtractorFixture::default().build()
    }

    #[derive(Default)]
    struct ExtractorFixture {
        objects: Vec<String>,
    }

    impl ExtractorFixture {
        fn build(self) -> ClientCallExtractor {
            let mut config = ContourConfig::default();
            config.extraction.client_objects = self.objects;
            ClientCallExtractor::new(&config).unwrap()
        }
    }

    #[test]
    fn extracts_quoted_and_template_calls() {
        let src = "export const list = () => api.get('/api/patients');\nexport const one = (id) => api.get(`/api/patients/${id}`);\nexport const add = (p) => apiClient.post(\"/api/patients\", p);";
        let eps = extractor().extract(src, "frontend/src/lib/api.ts");
        assert_eq!(eps.len(), 3);
        assert_eq!(eps[1].method, HttpMethod::Get);
        assert_eq!(eps[1].normalized_path, "/api/patients/:id");
        assert_eq!(eps[1].source_line, 2);
        assert_eq!(eps[2].method, HttpMethod::Post);
    }

    #[test]
    fn multi_line_template_is_skipped() {
        let src = "api.get(`/api/reports/${\n  id}`);\napi.delete('/api/x');";
        let eps = extractor().extract(src, "api.ts");
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].method, HttpMethod::Delete);
        assert_eq!(eps[0].source_line, 3);
    }

    #[test]
    fn non_literal_and_relative_arguments_are_skipped() {
        let src = "api.get(url);\napi.get(`${BASE}/users`);\napi.patch('/api/x');\nfoo.get('/api/y');";
        assert!(extractor().extract(src, "api.ts").is_empty());
    }

    #[test]
    fn several_calls_on_one_line() {
        let src = "Promise.all([api.get('/a'), api.put(\"/b\", x)]);";
        let eps = extractor().extract(src, "api.ts");
        let paths: Vec<_> = eps.iter().map(|e| e.normalized_path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn configured_receivers_replace_defaults() {
        let ex = ExtractorFixture { objects: vec!["http".into()] }.build();
        let eps = ex.extract("http.get('/h');\napi.get('/a');", "api.ts");
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].normalized_path, "/h");
    }

    #[test]
    fn crlf_line_numbers_match_enumeration() {
        let eps = extractor().extract("// c\r\n\r\napi.get('/z');\r\n", "api.ts");
        assert_eq!(eps[0].source_line, 3);
    }
}
