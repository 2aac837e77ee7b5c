//! RLS policy statement rendering.

use crate::ir::policy::{Policy, PolicyCommand};
use crate::ir::ObjectId;
use crate::render::{qualify, quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyAlterItem {
    Roles(Vec<String>),
    Using(String),
    WithCheck(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOperation {
    Create(Policy),
    Drop {
        schema: String,
        table: String,
        name: String,
    },
    /// Name, command, or permissive/restrictive changed: DROP + CREATE.
    Replace {
        schema: String,
        table: String,
        old_name: String,
        new: Policy,
    },
    Alter {
        schema: String,
        table: String,
        name: String,
        items: Vec<PolicyAlterItem>,
    },
    SetRowLevelSecurity {
        schema: String,
        table: String,
        enabled: bool,
    },
}

fn command_sql(command: PolicyCommand) -> Option<&'static str> {
    match command {
        PolicyCommand::All => None,
        PolicyCommand::Select => Some("SELECT"),
        PolicyCommand::Insert => Some("INSERT"),
        PolicyCommand::Update => Some("UPDATE"),
        PolicyCommand::Delete => Some("DELETE"),
    }
}

fn render_create(policy: &Policy, target_schema: &str) -> String {
    let table_q = qualify(&policy.schema, &policy.table, target_schema);
    let mut sql = format!(
        "CREATE POLICY {} ON {table_q}",
        quote_ident(&policy.name)
    );
    if !policy.permissive {
        sql.push_str(" AS RESTRICTIVE");
    }
    if let Some(cmd) = command_sql(policy.command) {
        sql.push_str(&format!(" FOR {cmd}"));
    }
    let roles = if policy.roles.is_empty() {
        "PUBLIC".to_string()
    } else {
        policy.roles.join(", ")
    };
    sql.push_str(&format!(" TO {roles}"));
    if let Some(using) = &policy.using_expr {
        sql.push_str(&format!(" USING ({using})"));
    }
    if let Some(check) = &policy.with_check_expr {
        sql.push_str(&format!(" WITH CHECK ({check})"));
    }
    sql.push(';');
    sql
}

fn render_drop(schema: &str, table: &str, name: &str, target_schema: &str) -> String {
    let table_q = qualify(schema, table, target_schema);
    format!(
        "DROP POLICY IF EXISTS {} ON {table_q};",
        quote_ident(name)
    )
}

impl SqlRenderer for PolicyOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, table, name) = match self {
            PolicyOperation::Create(p) => (p.schema.clone(), p.table.clone(), p.name.clone()),
            PolicyOperation::Drop { schema, table, name }
            | PolicyOperation::Alter {
                schema,
                table,
                name,
                ..
            } => (schema.clone(), table.clone(), name.clone()),
            PolicyOperation::Replace {
                schema,
                table,
                new,
                ..
            } => (schema.clone(), table.clone(), new.name.clone()),
            PolicyOperation::SetRowLevelSecurity { schema, table, .. } => {
                (schema.clone(), table.clone(), String::new())
            }
        };
        ObjectId::Policy { schema, table, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            PolicyOperation::Create(policy) => {
                vec![SqlStatement::new(render_create(policy, target_schema))]
            }
            PolicyOperation::Drop { schema, table, name } => {
                vec![SqlStatement::new(render_drop(schema, table, name, target_schema))]
            }
            PolicyOperation::Replace {
                schema,
                table,
                old_name,
                new,
            } => vec![
                SqlStatement::new(render_drop(schema, table, old_name, target_schema)),
                SqlStatement::new(render_create(new, target_schema)),
            ],
            PolicyOperation::Alter {
                schema,
                table,
                name,
                items,
            } => {
                let table_q = qualify(schema, table, target_schema);
                let mut sql = format!("ALTER POLICY {} ON {table_q}", quote_ident(name));
                for item in items {
                    match item {
                        PolicyAlterItem::Roles(roles) => {
                            let roles = if roles.is_empty() {
                                "PUBLIC".to_string()
                            } else {
                                roles.join(", ")
                            };
                            sql.push_str(&format!(" TO {roles}"));
                        }
                        PolicyAlterItem::Using(expr) => sql.push_str(&format!(" USING ({expr})")),
                        PolicyAlterItem::WithCheck(expr) => {
                            sql.push_str(&format!(" WITH CHECK ({expr})"))
                        }
                    }
                }
                sql.push(';');
                vec![SqlStatement::new(sql)]
            }
            PolicyOperation::SetRowLevelSecurity {
                schema,
                table,
                enabled,
            } => {
                let table_q = qualify(schema, table, target_schema);
                let verb = if *enabled { "ENABLE" } else { "DISABLE" };
                vec![SqlStatement::new(format!(
                    "ALTER TABLE {table_q} {verb} ROW LEVEL SECURITY;"
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, PolicyOperation::Drop { .. } | PolicyOperation::Replace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_policy() -> Policy {
        Policy {
            schema: "public".into(),
            table: "users".into(),
            name: "user_isolation".into(),
            command: PolicyCommand::All,
            permissive: true,
            roles: vec![],
            using_expr: Some("user_id = current_user_id()".into()),
            with_check_expr: None,
        }
    }

    #[test]
    fn create_defaults_to_public() {
        let sql = PolicyOperation::Create(sample_policy()).to_sql("public")[0]
            .sql
            .clone();
        assert_eq!(
            sql,
            "CREATE POLICY user_isolation ON users TO PUBLIC USING (user_id = current_user_id());"
        );
    }

    #[test]
    fn rename_is_drop_then_create() {
        let mut new = sample_policy();
        new.name = "user_policy".into();
        let op = PolicyOperation::Replace {
            schema: "public".into(),
            table: "users".into(),
            old_name: "user_isolation".into(),
            new,
        };
        let stmts = op.to_sql("public");
        assert_eq!(stmts.len(), 2);
        assert_eq!(
            stmts[0].sql,
            "DROP POLICY IF EXISTS user_isolation ON users;"
        );
        assert!(stmts[1].sql.starts_with("CREATE POLICY user_policy"));
    }

    #[test]
    fn alter_roles_only() {
        let op = PolicyOperation::Alter {
            schema: "public".into(),
            table: "users".into(),
            name: "user_isolation".into(),
            items: vec![PolicyAlterItem::Roles(vec!["user_role".into()])],
        };
        assert_eq!(
            op.to_sql("public")[0].sql,
            "ALTER POLICY user_isolation ON users TO user_role;"
        );
    }
}
