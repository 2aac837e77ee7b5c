//! Column-privilege statement rendering.

use std::collections::BTreeSet;

use crate::ir::privilege::Privilege;
use crate::ir::ObjectId;
use crate::render::{qualify, quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeOperation {
    Grant {
        schema: String,
        table: String,
        grantee: String,
        columns: BTreeSet<String>,
        privileges: BTreeSet<Privilege>,
        with_grant_option: bool,
    },
    Revoke {
        schema: String,
        table: String,
        grantee: String,
        columns: BTreeSet<String>,
        privileges: BTreeSet<Privilege>,
    },
    RevokeGrantOption {
        schema: String,
        table: String,
        grantee: String,
        columns: BTreeSet<String>,
        privileges: BTreeSet<Privilege>,
    },
}

fn cols_sql(columns: &BTreeSet<String>) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn privs_sql(privileges: &BTreeSet<Privilege>) -> String {
    privileges
        .iter()
        .map(|p| p.as_sql())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SqlRenderer for PrivilegeOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, table, grantee) = match self {
            PrivilegeOperation::Grant {
                schema,
                table,
                grantee,
                ..
            }
            | PrivilegeOperation::Revoke {
                schema,
                table,
                grantee,
                ..
            }
            | PrivilegeOperation::RevokeGrantOption {
                schema,
                table,
                grantee,
                ..
            } => (schema.clone(), table.clone(), grantee.clone()),
        };
        ObjectId::ColumnPrivilege {
            schema,
            table,
            grantee,
        }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            PrivilegeOperation::Grant {
                schema,
                table,
                grantee,
                columns,
                privileges,
                with_grant_option,
            } => {
                let table_q = qualify(schema, table, target_schema);
                let mut sql = format!(
                    "GRANT {} ({}) ON TABLE {table_q} TO {};",
                    privs_sql(privileges),
                    cols_sql(columns),
                    quote_ident(grantee)
                );
                if *with_grant_option {
                    sql.pop();
                    sql.push_str(" WITH GRANT OPTION;");
                }
                vec![SqlStatement::new(sql)]
            }
            PrivilegeOperation::Revoke {
                schema,
                table,
                grantee,
                columns,
                privileges,
            } => {
                let table_q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "REVOKE {} ({}) ON TABLE {table_q} FROM {};",
                    privs_sql(privileges),
                    cols_sql(columns),
                    quote_ident(grantee)
                ))]
            }
            PrivilegeOperation::RevokeGrantOption {
                schema,
                table,
                grantee,
                columns,
                privileges,
            } => {
                let table_q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "REVOKE GRANT OPTION FOR {} ({}) ON TABLE {table_q} FROM {};",
                    privs_sql(privileges),
                    cols_sql(columns),
                    quote_ident(grantee)
                ))]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_with_option_moves_clause_before_semicolon() {
        let op = PrivilegeOperation::Grant {
            schema: "public".into(),
            table: "users".into(),
            grantee: "app_role".into(),
            columns: BTreeSet::from(["email".to_string()]),
            privileges: BTreeSet::from([Privilege::Select]),
            with_grant_option: true,
        };
        assert_eq!(
            op.to_sql("public")[0].sql,
            "GRANT SELECT (email) ON TABLE users TO app_role WITH GRANT OPTION;"
        );
    }

    #[test]
    fn revoke_mirrors_grant() {
        let op = PrivilegeOperation::Revoke {
            schema: "public".into(),
            table: "users".into(),
            grantee: "app_role".into(),
            columns: BTreeSet::from(["email".to_string()]),
            privileges: BTreeSet::from([Privilege::Select]),
        };
        assert_eq!(
            op.to_sql("public")[0].sql,
            "REVOKE SELECT (email) ON TABLE users FROM app_role;"
        );
    }
}
