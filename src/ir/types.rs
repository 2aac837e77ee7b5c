//! User-defined types and domains, unified into a single entity with a
//! `kind` tag (`enum | composite | domain`) rather than split by Postgres
//! system view. `diff::types` and `render::types` still branch on `kind`
//! internally, but callers hold one `Type` value regardless of shape.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeColumn {
    pub name: String,
    pub data_type: String,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConstraint {
    /// `None` for an unnamed CHECK constraint synthesized by Postgres.
    pub name: Option<String>,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Enum {
        values: Vec<String>,
    },
    Composite {
        columns: Vec<CompositeColumn>,
    },
    Domain {
        base_type: String,
        default: Option<String>,
        not_null: bool,
        constraints: Vec<DomainConstraint>,
    },
}

impl TypeKind {
    pub fn is_domain(&self) -> bool {
        matches!(self, TypeKind::Domain { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub schema: String,
    pub name: String,
    pub kind: TypeKind,
}

impl Type {
    pub fn id(&self) -> ObjectId {
        ObjectId::Type {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    /// The bare type name this type's definition nests, used by
    /// `topo::types` to build the nested-reference dependency graph.
    pub fn nested_type_refs(&self) -> Vec<&str> {
        match &self.kind {
            TypeKind::Enum { .. } => Vec::new(),
            TypeKind::Composite { columns } => {
                columns.iter().map(|c| c.data_type.as_str()).collect()
            }
            TypeKind::Domain { base_type, .. } => vec![base_type.as_str()],
        }
    }
}
