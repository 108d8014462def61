//! Schema inventory: table names declared in SQL schema files.

use contour_core::errors::ExtractionError;
use regex::Regex;

use crate::structural::contracts::mounts::compile;

/// Extracts `CREATE TABLE [IF NOT EXISTS] [schema.]name` declarations.
pub struct TableExtractor {
    create_re: Regex,
    ident_re: Regex,
}

impl TableExtractor {
    pub fn new() -> Result<Self, ExtractionError> {
        let ident = r#"(?:"[^"]+"|`[^`]+`|\[[^\]]+\]|[A-Za-z_][\w$]*)"#;
        let create_re = compile(
            "create_table",
            &format!(r"(?i)\bcreate\s+(?:temp(?:orary)?\s+)?table\s+(?:if\s+not\s+exists\s+)?((?:{ident}\s*\.\s*)?{ident})"),
        )?;
        let ident_re = compile("sql_identifier", ident)?;
        Ok(Self { create_re, ident_re })
    }

    /// Table names in declaration order, unqualified and unquoted.
    pub fn extract(&self, sql: &str) -> Vec<String> {
        self.create_re
            .captures_iter(sql)
            .filter_map(|caps| {
                // Quoted parts may contain dots; split by identifier, not by '.'.
                let qualified = caps.get(1)?.as_str();
                let last = self.ident_re.find_iter(qualified).last()?.as_str();
                let name = last.trim_matches(|c| matches!(c, '"' | '`' | '[' | ']'));
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_qualified_and_quoted_tables() {
        let sql = r#"
CREATE TABLE patients (id SERIAL PRIMARY KEY);
create table if not exists public.orders (id int);
CREATE TEMP TABLE "audit_log" (x int);
CREATE TABLE [dbo].[invoices] (x int);
-- CREATE INDEX idx ON patients(id);
"#;
        let tables = TableExtractor::new().unwrap().extract(sql);
        assert_eq!(tables, vec!["patients", "orders", "audit_log", "invoices"]);
    }

    #[test]
    fn quoted_names_keep_their_dots() {
        let sql = "CREATE TABLE \"audit.log\" (x int);\nCREATE TABLE reporting.\"daily.totals\" (x int);\nCREATE TABLE `a.b`.events (x int);";
        let tables = TableExtractor::new().unwrap().extract(sql);
        assert_eq!(tables, vec!["audit.log", "daily.totals", "events"]);
    }
}
