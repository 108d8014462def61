//! Path normalization shared by the backend and frontend extractors.

/// Rewrite every `${expr}` interpolation to a `:name` parameter marker.
///
/// The marker name is the last identifier inside the expression, so
/// `${id}`, `${user.id}` and `${encodeURIComponent(id)}` all become `:id`.
/// Returns `None` for shapes that cannot be rewritten faithfully (an
/// unterminated `${`, or an expression with no identifier); callers skip
/// those rather than guess.
pub fn normalize_path(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let name = param_name(&after[..end])?;
        out.push(':');
        out.push_str(name);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}

fn param_name(expr: &str) -> Option<&str> {
    expr.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty() && !token.starts_with(|c: char| c.is_ascii_digit()))
        .last()
}

/// Join a router-relative path onto its mount base.
///
/// `/` (or an empty path) maps to the base itself; otherwise trailing slashes
/// are stripped from the base and exactly one `/` separates the two parts.
pub fn join_mount_path(base_path: &str, route_path: &str) -> String {
    if route_path == "/" || route_path.is_empty() {
        return base_path.to_string();
    }
    let base = base_path.trim_end_matches('/');
    if route_path.starts_with('/') {
        format!("{base}{route_path}")
    } else {
        format!("{base}/{route_path}")
    }
}
