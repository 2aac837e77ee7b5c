//! Statement rendering primitives: every operation type implements
//! [`SqlRenderer`] and produces one or more [`SqlStatement`]s, each
//! carrying a transaction-safety classification (`can_run_in_transaction`)
//! and a separate `is_destructive()` flag for drop statements.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::ir::ObjectId;

pub mod extension;
pub mod function;
pub mod index;
pub mod policy;
pub mod privilege;
pub mod schema;
pub mod sequence;
pub mod table;
pub mod trigger;
pub mod types;
pub mod view;

/// A non-mutating directive bundled alongside a statement, currently only
/// used for the `CREATE INDEX CONCURRENTLY` progress-wait probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Wait,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub sql: String,
    pub can_run_in_transaction: bool,
    pub directive: Option<Directive>,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            can_run_in_transaction: true,
            directive: None,
        }
    }

    pub fn non_transactional(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            can_run_in_transaction: false,
            directive: None,
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }
}

pub trait SqlRenderer {
    fn db_object_id(&self) -> ObjectId;
    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement>;

    fn is_destructive(&self) -> bool {
        false
    }
}

/// PostgreSQL reserved words that force quoting even when the identifier is
/// otherwise a bare lowercase word that case-folds to a reserved word.
/// Not exhaustive of the full `pg_get_keywords()` reserved set; covers the
/// words that show up in real schemas (`user`, `order`, `group`, ...).
static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "both",
        "case", "cast", "check", "collate", "column", "constraint", "create", "current_date",
        "current_role", "current_time", "current_timestamp", "current_user", "default",
        "deferrable", "desc", "distinct", "do", "else", "end", "except", "false", "for",
        "foreign", "from", "grant", "group", "having", "in", "initially", "intersect", "into",
        "leading", "limit", "localtime", "localtimestamp", "not", "null", "offset", "on", "only",
        "or", "order", "placing", "primary", "references", "returning", "select", "session_user",
        "some", "symmetric", "table", "then", "to", "trailing", "true", "union", "unique",
        "user", "using", "variadic", "when", "where", "window", "with",
    ]
    .into_iter()
    .collect()
});

/// Identifier-quoting rule: quote iff empty after trimming, starts with a
/// non-letter, contains characters outside `[a-z0-9_]`, or case-folds to a
/// reserved word. Already-quoted identifiers pass through unchanged.
pub fn quote_ident(ident: &str) -> String {
    if ident.starts_with('"') && ident.ends_with('"') && ident.len() >= 2 {
        return ident.to_string();
    }
    let trimmed = ident.trim();
    let needs_quoting = trimmed.is_empty()
        || !trimmed
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        || RESERVED_WORDS.contains(trimmed.to_ascii_lowercase().as_str());
    if needs_quoting {
        format!("\"{}\"", ident.replace('"', "\"\""))
    } else {
        ident.to_string()
    }
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Schema-qualifies `name`, eliding the schema when it equals `target_schema`.
pub fn qualify(schema: &str, name: &str, target_schema: &str) -> String {
    if schema == target_schema {
        quote_ident(name)
    } else {
        format!("{}.{}", quote_ident(schema), quote_ident(name))
    }
}

pub fn render_comment_sql(
    object_kind: &str,
    quoted_ident: &str,
    comment: &Option<String>,
) -> String {
    match comment {
        Some(text) => format!(
            "COMMENT ON {object_kind} {quoted_ident} IS {};",
            escape_string(text)
        ),
        None => format!("COMMENT ON {object_kind} {quoted_ident} IS NULL;"),
    }
}
