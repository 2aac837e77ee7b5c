//! `Function`.
//!
//! Call-graph dependencies are never part of the struct supplied by the
//! caller; there is no catalog to query them from, so they are derived
//! purely from `definition` by `topo::functions::call_graph`, which is the
//! single source of truth for them. Calls reached only through dynamic SQL
//! are out of reach of this derivation.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub schema: String,
    pub name: String,
    /// The argument-type signature, e.g. `"integer, text"`, used in the
    /// identity tuple alongside `(schema, name)` since Postgres allows
    /// overloaded functions.
    pub arguments: String,
    pub language: String,
    pub definition: String,
}

impl Function {
    pub fn id(&self) -> ObjectId {
        ObjectId::Function {
            schema: self.schema.clone(),
            name: self.name.clone(),
            arguments: self.arguments.clone(),
        }
    }
}
