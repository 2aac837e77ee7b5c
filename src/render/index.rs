//! Index statement rendering: column list with direction, `USING method`,
//! `WHERE` predicate, plus an online `CONCURRENTLY` + wait-probe pairing
//! for plan mode, where indexes are not created inside a transaction.

use crate::ir::index::{Index, SortDirection};
use crate::ir::ObjectId;
use crate::render::{
    qualify, quote_ident, render_comment_sql, Directive, DirectiveKind, SqlRenderer, SqlStatement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionMode {
    /// Online migration: `CREATE INDEX CONCURRENTLY` + wait directive.
    Plan,
    /// Offline dump: plain `CREATE INDEX`.
    Dump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOperation {
    Create { index: Index, mode: EmissionMode },
    Drop { schema: String, name: String },
    Comment { schema: String, name: String, comment: Option<String> },
}

/// JSON operators need double-parenthesization when used inside an index
/// column expression.
fn wrap_json_operators(expr: &str) -> String {
    if expr.contains("->") {
        format!("(({expr}))")
    } else {
        expr.to_string()
    }
}

fn render_create(index: &Index, target_schema: &str, concurrently: bool) -> String {
    let q = quote_ident(&index.name);
    let table_q = qualify(&index.schema, &index.table, target_schema);
    let unique = if matches!(index.kind, crate::ir::index::IndexKind::Unique) {
        "UNIQUE "
    } else {
        ""
    };
    let concurrently_kw = if concurrently { "CONCURRENTLY " } else { "" };
    let method = if index.method.is_empty() || index.method == "btree" {
        String::new()
    } else {
        format!(" USING {}", index.method)
    };
    let columns = index
        .columns
        .iter()
        .map(|c| {
            let expr = wrap_json_operators(&c.name);
            match c.direction {
                SortDirection::Asc => expr,
                SortDirection::Desc => format!("{expr} DESC"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!(
        "CREATE {unique}INDEX {concurrently_kw}IF NOT EXISTS {q} ON {table_q}{method} ({columns})"
    );
    if index.is_partial {
        if let Some(predicate) = &index.where_clause {
            sql.push_str(&format!(" WHERE {predicate}"));
        }
    }
    sql.push(';');
    sql
}

impl SqlRenderer for IndexOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, name) = match self {
            IndexOperation::Create { index, .. } => (index.schema.clone(), index.name.clone()),
            IndexOperation::Drop { schema, name } | IndexOperation::Comment { schema, name, .. } => {
                (schema.clone(), name.clone())
            }
        };
        ObjectId::Index { schema, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            IndexOperation::Create { index, mode } => match mode {
                EmissionMode::Dump => {
                    vec![SqlStatement::new(render_create(index, target_schema, false))]
                }
                EmissionMode::Plan => {
                    let create = SqlStatement::non_transactional(render_create(
                        index,
                        target_schema,
                        true,
                    ));
                    let wait = SqlStatement::new(format!(
                        "SELECT phase, blocks_done, blocks_total \
                         FROM pg_stat_progress_create_index \
                         WHERE relid = '{}'::regclass;",
                        index.name
                    ))
                    .with_directive(Directive {
                        kind: DirectiveKind::Wait,
                        message: format!("Creating index {}", index.name),
                    });
                    vec![create, wait]
                }
            },
            IndexOperation::Drop { schema, name } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!("DROP INDEX IF EXISTS {q};"))]
            }
            IndexOperation::Comment {
                schema,
                name,
                comment,
            } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(render_comment_sql("INDEX", &q, comment))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, IndexOperation::Drop { .. })
    }
}
