//! `Trigger`.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerLevel {
    Row,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub schema: String,
    pub table: String,
    pub name: String,
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub level: TriggerLevel,
    pub function: String,
    pub condition: Option<String>,
}

impl Trigger {
    pub fn id(&self) -> ObjectId {
        ObjectId::Trigger {
            schema: self.schema.clone(),
            table: self.table.clone(),
            name: self.name.clone(),
        }
    }

    /// Events in canonical emission order INSERT, UPDATE, DELETE.
    pub fn events_in_canonical_order(&self) -> Vec<TriggerEvent> {
        let mut events = self.events.clone();
        events.sort();
        events.dedup();
        events
    }
}
