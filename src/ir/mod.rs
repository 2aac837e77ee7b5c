//! The immutable IR snapshot.
//!
//! Every type here is a plain data holder with no I/O: `Snapshot` is
//! handed to `generate_migration` fully formed by an external inspector or
//! parser, which this crate does not implement.

pub mod column;
pub mod constraint;
pub mod extension;
pub mod function;
pub mod id;
pub mod index;
pub mod policy;
pub mod privilege;
pub mod schema;
pub mod sequence;
pub mod table;
pub mod trigger;
pub mod types;
pub mod view;

pub use column::Column;
pub use constraint::{Constraint, ConstraintColumn, ConstraintKind};
pub use extension::Extension;
pub use function::Function;
pub use id::ObjectId;
pub use index::{Index, IndexColumn, IndexKind, SortDirection};
pub use policy::{Policy, PolicyCommand};
pub use privilege::{ColumnPrivilege, Privilege};
pub use schema::Schema;
pub use sequence::Sequence;
pub use table::Table;
pub use trigger::{Trigger, TriggerEvent, TriggerLevel, TriggerTiming};
pub use types::{CompositeColumn, DomainConstraint, Type, TypeKind};
pub use view::View;

/// A full schema snapshot: one side of a diff. Represented as flat vectors
/// rather than a schema tree, since every diff builder groups by
/// `(schema, name)` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub schemas: Vec<Schema>,
    pub extensions: Vec<Extension>,
    pub types: Vec<Type>,
    pub sequences: Vec<Sequence>,
    pub tables: Vec<Table>,
    pub views: Vec<View>,
    pub functions: Vec<Function>,
    pub column_privileges: Vec<ColumnPrivilege>,
}

impl Snapshot {
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == name)
    }

    pub fn function(&self, schema: &str, name: &str, arguments: &str) -> Option<&Function> {
        self.functions
            .iter()
            .find(|f| f.schema == schema && f.name == name && f.arguments == arguments)
    }

    pub fn functions_named(&self, name: &str) -> Vec<&Function> {
        self.functions.iter().filter(|f| f.name == name).collect()
    }

    pub fn r#type(&self, schema: &str, name: &str) -> Option<&Type> {
        self.types
            .iter()
            .find(|t| t.schema == schema && t.name == name)
    }
}
