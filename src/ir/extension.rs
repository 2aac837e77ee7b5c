//! `Extension`.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    /// Installed schema; empty/`None` when the extension has no fixed schema.
    pub schema: Option<String>,
}

impl Extension {
    pub fn id(&self) -> ObjectId {
        ObjectId::Extension {
            name: self.name.clone(),
        }
    }
}
