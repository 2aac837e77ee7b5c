//! Type/domain statement rendering.

use crate::ir::types::{DomainConstraint, Type, TypeKind};
use crate::ir::ObjectId;
use crate::render::{qualify, quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAlterItem {
    SetDefault(String),
    DropDefault,
    SetNotNull,
    DropNotNull,
    DropConstraint(String),
    AddConstraint {
        name: Option<String>,
        definition: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOperation {
    Create(Type),
    Drop {
        schema: String,
        name: String,
        kind: TypeKind,
    },
    /// Positional enum value insertions, each `(value, anchor, before)`.
    AlterEnum {
        schema: String,
        name: String,
        insertions: Vec<(String, String, bool)>,
    },
    AlterDomain {
        schema: String,
        name: String,
        items: Vec<DomainAlterItem>,
    },
}

fn render_enum_create(schema: &str, name: &str, values: &[String], target_schema: &str) -> String {
    let q = qualify(schema, name, target_schema);
    if values.is_empty() {
        return format!("CREATE TYPE {q} AS ENUM ();");
    }
    let body = values
        .iter()
        .map(|v| format!("    {}", crate::render::escape_string(v)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TYPE {q} AS ENUM (\n{body}\n);")
}

fn render_composite_create(
    schema: &str,
    name: &str,
    columns: &[crate::ir::types::CompositeColumn],
    target_schema: &str,
) -> String {
    let q = qualify(schema, name, target_schema);
    let body = columns
        .iter()
        .map(|c| {
            let ty = strip_schema_prefix(&c.data_type, target_schema);
            format!("{} {}", quote_ident(&c.name), ty)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TYPE {q} AS ({body});")
}

fn strip_schema_prefix(data_type: &str, target_schema: &str) -> String {
    let prefix = format!("{target_schema}.");
    data_type
        .strip_prefix(&prefix)
        .unwrap_or(data_type)
        .to_string()
}

fn render_domain_create(
    schema: &str,
    name: &str,
    base_type: &str,
    default: &Option<String>,
    not_null: bool,
    constraints: &[DomainConstraint],
    target_schema: &str,
) -> String {
    let q = qualify(schema, name, target_schema);
    if default.is_none() && !not_null && constraints.is_empty() {
        return format!("CREATE DOMAIN {q} AS {base_type};");
    }
    let mut lines = vec![format!("CREATE DOMAIN {q} AS {base_type}")];
    if let Some(d) = default {
        lines.push(format!("    DEFAULT {d}"));
    }
    if not_null {
        lines.push("    NOT NULL".to_string());
    }
    for c in constraints {
        match &c.name {
            Some(n) => lines.push(format!("    CONSTRAINT {} {}", quote_ident(n), c.definition)),
            None => lines.push(format!("    {}", c.definition)),
        }
    }
    lines.join("\n") + ";"
}

impl SqlRenderer for TypeOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, name) = match self {
            TypeOperation::Create(t) => (t.schema.clone(), t.name.clone()),
            TypeOperation::Drop { schema, name, .. }
            | TypeOperation::AlterEnum { schema, name, .. }
            | TypeOperation::AlterDomain { schema, name, .. } => (schema.clone(), name.clone()),
        };
        ObjectId::Type { schema, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            TypeOperation::Create(t) => {
                let sql = match &t.kind {
                    TypeKind::Enum { values } => {
                        render_enum_create(&t.schema, &t.name, values, target_schema)
                    }
                    TypeKind::Composite { columns } => {
                        render_composite_create(&t.schema, &t.name, columns, target_schema)
                    }
                    TypeKind::Domain {
                        base_type,
                        default,
                        not_null,
                        constraints,
                    } => render_domain_create(
                        &t.schema,
                        &t.name,
                        base_type,
                        default,
                        *not_null,
                        constraints,
                        target_schema,
                    ),
                };
                vec![SqlStatement::new(sql)]
            }
            TypeOperation::Drop { schema, name, kind } => {
                let keyword = if kind.is_domain() { "DOMAIN" } else { "TYPE" };
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!(
                    "DROP {keyword} IF EXISTS {q} RESTRICT;"
                ))]
            }
            TypeOperation::AlterEnum {
                schema,
                name,
                insertions,
            } => {
                let q = qualify(schema, name, target_schema);
                insertions
                    .iter()
                    .map(|(value, anchor, before)| {
                        let direction = if *before { "BEFORE" } else { "AFTER" };
                        SqlStatement::new(format!(
                            "ALTER TYPE {q} ADD VALUE {} {direction} {};",
                            crate::render::escape_string(value),
                            crate::render::escape_string(anchor)
                        ))
                    })
                    .collect()
            }
            TypeOperation::AlterDomain {
                schema,
                name,
                items,
            } => {
                let q = qualify(schema, name, target_schema);
                items
                    .iter()
                    .map(|item| {
                        let clause = match item {
                            DomainAlterItem::SetDefault(d) => format!("SET DEFAULT {d}"),
                            DomainAlterItem::DropDefault => "DROP DEFAULT".to_string(),
                            DomainAlterItem::SetNotNull => "SET NOT NULL".to_string(),
                            DomainAlterItem::DropNotNull => "DROP NOT NULL".to_string(),
                            DomainAlterItem::DropConstraint(n) => {
                                format!("DROP CONSTRAINT {}", quote_ident(n))
                            }
                            DomainAlterItem::AddConstraint { name, definition } => match name {
                                Some(n) => {
                                    format!("ADD CONSTRAINT {} {definition}", quote_ident(n))
                                }
                                None => format!("ADD {definition}"),
                            },
                        };
                        SqlStatement::new(format!("ALTER DOMAIN {q} {clause};"))
                    })
                    .collect()
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TypeOperation::Drop { .. })
    }
}
