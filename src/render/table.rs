//! Table statement rendering. Multi-column UNIQUE/FOREIGN KEY/PRIMARY KEY
//! constraints are inlined into `CREATE TABLE` alongside the primary key;
//! single-column PK/UK/FK still attach directly to the column definition.

use crate::ir::column::Column;
use crate::ir::constraint::{Constraint, ConstraintKind};
use crate::ir::table::Table;
use crate::ir::ObjectId;
use crate::render::{qualify, quote_ident, render_comment_sql, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOperation {
    Create(Table),
    Drop { schema: String, name: String },
    AddColumn { schema: String, table: String, column: Column },
    DropColumn { schema: String, table: String, name: String },
    AlterColumnType { schema: String, table: String, column: String, new_type: String },
    SetNotNull { schema: String, table: String, column: String },
    DropNotNull { schema: String, table: String, column: String },
    SetDefault { schema: String, table: String, column: String, default: String },
    DropDefault { schema: String, table: String, column: String },
    AddConstraint { schema: String, table: String, constraint: Constraint },
    DropConstraint { schema: String, table: String, name: String },
    Comment { schema: String, name: String, comment: Option<String> },
    CommentColumn { schema: String, table: String, column: String, comment: Option<String> },
    CommentConstraint { schema: String, table: String, name: String, comment: Option<String> },
}

fn render_column_def(column: &Column, inline_pk_single: bool, inline_ref: Option<&str>) -> String {
    let mut def = format!("{} {}", quote_ident(&column.name), column.data_type);
    if !column.is_nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default_value {
        def.push_str(&format!(" DEFAULT {default}"));
    }
    if let Some(generation) = &column.identity_generation {
        def.push_str(&format!(" GENERATED {generation} AS IDENTITY"));
    }
    if inline_pk_single {
        def.push_str(" PRIMARY KEY");
    }
    if let Some(reference) = inline_ref {
        def.push_str(&format!(" REFERENCES {reference}"));
    }
    def
}

fn render_inline_constraint(constraint: &Constraint, target_schema: &str) -> String {
    let cols = constraint
        .columns
        .iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    match &constraint.kind {
        ConstraintKind::PrimaryKey => format!(
            "CONSTRAINT {} PRIMARY KEY ({cols})",
            quote_ident(&constraint.name)
        ),
        ConstraintKind::Unique => format!(
            "CONSTRAINT {} UNIQUE ({cols})",
            quote_ident(&constraint.name)
        ),
        ConstraintKind::ForeignKey {
            referenced_schema,
            referenced_table,
            referenced_columns,
            update_rule,
            delete_rule,
            deferrable,
            initially_deferred,
        } => {
            let ref_table = qualify(referenced_schema, referenced_table, target_schema);
            let ref_cols = referenced_columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ");
            let mut sql = format!(
                "CONSTRAINT {} FOREIGN KEY ({cols}) REFERENCES {ref_table} ({ref_cols})",
                quote_ident(&constraint.name)
            );
            if update_rule != "NO ACTION" {
                sql.push_str(&format!(" ON UPDATE {update_rule}"));
            }
            if delete_rule != "NO ACTION" {
                sql.push_str(&format!(" ON DELETE {delete_rule}"));
            }
            if *deferrable {
                sql.push_str(" DEFERRABLE");
                if *initially_deferred {
                    sql.push_str(" INITIALLY DEFERRED");
                }
            }
            sql
        }
        ConstraintKind::Check { check_clause, .. } => format!(
            "CONSTRAINT {} CHECK ({check_clause})",
            quote_ident(&constraint.name)
        ),
    }
}

/// Table-level inline constraints: only multi-column PK/UK/FK, plus every
/// CHECK (always named and table-level), ordered PK → UK → FK →
/// CHECK.
fn inline_table_constraints<'a>(table: &'a Table) -> Vec<&'a Constraint> {
    let mut pk = vec![];
    let mut uk = vec![];
    let mut fk = vec![];
    let mut check = vec![];
    for c in &table.constraints {
        match &c.kind {
            ConstraintKind::PrimaryKey if c.is_multi_column() => pk.push(c),
            ConstraintKind::Unique if c.is_multi_column() => uk.push(c),
            ConstraintKind::ForeignKey { .. } if c.is_multi_column() => fk.push(c),
            ConstraintKind::Check { .. } => check.push(c),
            _ => {}
        }
    }
    pk.into_iter().chain(uk).chain(fk).chain(check).collect()
}

fn render_create_table(table: &Table, target_schema: &str) -> String {
    let q = qualify(&table.schema, &table.name, target_schema);
    let single_pk_column = table
        .primary_key()
        .filter(|c| !c.is_multi_column())
        .and_then(|c| c.columns.first())
        .map(|c| c.name.as_str());
    let single_fk_refs: std::collections::HashMap<&str, String> = table
        .constraints
        .iter()
        .filter(|c| !c.is_multi_column())
        .filter_map(|c| {
            let col = c.columns.first()?.name.as_str();
            if let ConstraintKind::ForeignKey {
                referenced_schema,
                referenced_table,
                referenced_columns,
                ..
            } = &c.kind
            {
                let ref_table = qualify(referenced_schema, referenced_table, target_schema);
                let ref_col = referenced_columns
                    .first()
                    .map(|c| quote_ident(c))
                    .unwrap_or_default();
                Some((col, format!("{ref_table} ({ref_col})")))
            } else {
                None
            }
        })
        .collect();

    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|col| {
            render_column_def(
                col,
                Some(col.name.as_str()) == single_pk_column,
                single_fk_refs.get(col.name.as_str()).map(|s| s.as_str()),
            )
        })
        .collect();

    for constraint in inline_table_constraints(table) {
        lines.push(render_inline_constraint(constraint, target_schema));
    }

    let body = lines
        .iter()
        .map(|l| format!("    {l}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {q} (\n{body}\n);")
}

impl SqlRenderer for TableOperation {
    fn db_object_id(&self) -> ObjectId {
        match self {
            TableOperation::Create(t) => t.id(),
            TableOperation::Drop { schema, name } => ObjectId::Table {
                schema: schema.clone(),
                name: name.clone(),
            },
            TableOperation::AddColumn { schema, table, .. }
            | TableOperation::DropColumn { schema, table, .. }
            | TableOperation::AlterColumnType { schema, table, .. }
            | TableOperation::SetNotNull { schema, table, .. }
            | TableOperation::DropNotNull { schema, table, .. }
            | TableOperation::SetDefault { schema, table, .. }
            | TableOperation::DropDefault { schema, table, .. }
            | TableOperation::AddConstraint { schema, table, .. }
            | TableOperation::DropConstraint { schema, table, .. }
            | TableOperation::CommentColumn { schema, table, .. }
            | TableOperation::CommentConstraint { schema, table, .. } => ObjectId::Table {
                schema: schema.clone(),
                name: table.clone(),
            },
            TableOperation::Comment { schema, name, .. } => ObjectId::Table {
                schema: schema.clone(),
                name: name.clone(),
            },
        }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            TableOperation::Create(table) => {
                vec![SqlStatement::new(render_create_table(table, target_schema))]
            }
            TableOperation::Drop { schema, name } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!("DROP TABLE IF EXISTS {q} CASCADE;"))]
            }
            TableOperation::AddColumn { schema, table, column } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ADD COLUMN {};",
                    render_column_def(column, false, None)
                ))]
            }
            TableOperation::DropColumn { schema, table, name } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} DROP COLUMN {};",
                    quote_ident(name)
                ))]
            }
            TableOperation::AlterColumnType {
                schema,
                table,
                column,
                new_type,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ALTER COLUMN {} TYPE {new_type};",
                    quote_ident(column)
                ))]
            }
            TableOperation::SetNotNull {
                schema,
                table,
                column,
            } => {
                let q = qualify(schema, table, target_schema);
                let col_q = quote_ident(column);
                let cn = quote_ident(&format!("{column}_not_null"));
                vec![
                    SqlStatement::new(format!(
                        "ALTER TABLE {q} ADD CONSTRAINT {cn} CHECK ({col_q} IS NOT NULL) NOT VALID;"
                    )),
                    SqlStatement::new(format!("ALTER TABLE {q} VALIDATE CONSTRAINT {cn};")),
                    SqlStatement::new(format!(
                        "ALTER TABLE {q} ALTER COLUMN {col_q} SET NOT NULL;"
                    )),
                ]
            }
            TableOperation::DropNotNull {
                schema,
                table,
                column,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ALTER COLUMN {} DROP NOT NULL;",
                    quote_ident(column)
                ))]
            }
            TableOperation::SetDefault {
                schema,
                table,
                column,
                default,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ALTER COLUMN {} SET DEFAULT {default};",
                    quote_ident(column)
                ))]
            }
            TableOperation::DropDefault {
                schema,
                table,
                column,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ALTER COLUMN {} DROP DEFAULT;",
                    quote_ident(column)
                ))]
            }
            TableOperation::AddConstraint {
                schema,
                table,
                constraint,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} ADD {};",
                    render_inline_constraint(constraint, target_schema)
                ))]
            }
            TableOperation::DropConstraint { schema, table, name } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {q} DROP CONSTRAINT {};",
                    quote_ident(name)
                ))]
            }
            TableOperation::Comment { schema, name, comment } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(render_comment_sql("TABLE", &q, comment))]
            }
            TableOperation::CommentColumn {
                schema,
                table,
                column,
                comment,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(render_comment_sql(
                    "COLUMN",
                    &format!("{q}.{}", quote_ident(column)),
                    comment,
                ))]
            }
            TableOperation::CommentConstraint {
                schema,
                table,
                name,
                comment,
            } => {
                let q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(render_comment_sql(
                    "CONSTRAINT",
                    &format!("{} ON {q}", quote_ident(name)),
                    comment,
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(
            self,
            TableOperation::Drop { .. }
                | TableOperation::DropColumn { .. }
                | TableOperation::DropConstraint { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::constraint::ConstraintColumn;

    fn users_table() -> Table {
        Table {
            schema: "public".into(),
            name: "users".into(),
            columns: vec![
                Column {
                    name: "id".into(),
                    data_type: "bigint".into(),
                    is_nullable: false,
                    default_value: None,
                    max_length: None,
                    identity_generation: None,
                    comment: None,
                },
                Column {
                    name: "email".into(),
                    data_type: "text".into(),
                    is_nullable: false,
                    default_value: None,
                    max_length: None,
                    identity_generation: None,
                    comment: None,
                },
            ],
            constraints: vec![Constraint {
                schema: "public".into(),
                table: "users".into(),
                name: "users_pkey".into(),
                kind: ConstraintKind::PrimaryKey,
                columns: vec![ConstraintColumn {
                    name: "id".into(),
                    position: 1,
                }],
                comment: None,
            }],
            indexes: vec![],
            triggers: vec![],
            policies: vec![],
            rls_enabled: false,
            comment: None,
        }
    }

    #[test]
    fn single_column_pk_is_inline_on_column() {
        let sql = TableOperation::Create(users_table()).to_sql("public")[0].sql.clone();
        assert!(sql.contains("id bigint NOT NULL PRIMARY KEY"));
        assert!(!sql.contains("CONSTRAINT users_pkey"));
    }

    #[test]
    fn multi_column_unique_is_inline_table_level() {
        let mut table = users_table();
        table.constraints.push(Constraint {
            schema: "public".into(),
            table: "users".into(),
            name: "users_account_uniq".into(),
            kind: ConstraintKind::Unique,
            columns: vec![
                ConstraintColumn {
                    name: "userId".into(),
                    position: 1,
                },
                ConstraintColumn {
                    name: "accountId".into(),
                    position: 2,
                },
            ],
            comment: None,
        });
        let sql = TableOperation::Create(table).to_sql("public")[0].sql.clone();
        assert!(sql.contains("UNIQUE (\"userId\", \"accountId\")"));
    }

    #[test]
    fn set_not_null_emits_three_step_pattern() {
        let op = TableOperation::SetNotNull {
            schema: "public".into(),
            table: "users".into(),
            column: "email".into(),
        };
        let stmts = op.to_sql("public");
        assert_eq!(stmts.len(), 3);
        assert_eq!(
            stmts[0].sql,
            "ALTER TABLE users ADD CONSTRAINT email_not_null CHECK (email IS NOT NULL) NOT VALID;"
        );
        assert_eq!(
            stmts[1].sql,
            "ALTER TABLE users VALIDATE CONSTRAINT email_not_null;"
        );
        assert_eq!(
            stmts[2].sql,
            "ALTER TABLE users ALTER COLUMN email SET NOT NULL;"
        );
        assert!(stmts.iter().all(|s| s.can_run_in_transaction));
    }
}
