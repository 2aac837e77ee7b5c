//! `View`.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub schema: String,
    pub name: String,
    pub definition: String,
}

impl View {
    pub fn id(&self) -> ObjectId {
        ObjectId::View {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}
