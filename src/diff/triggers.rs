//! Diff triggers, per table.

use crate::ir::trigger::Trigger;
use crate::operations::MigrationStep;
use crate::render::trigger::TriggerOperation;

pub fn equal(old: &Trigger, new: &Trigger) -> bool {
    old.timing == new.timing
        && old.events_in_canonical_order() == new.events_in_canonical_order()
        && old.level == new.level
        && old.function == new.function
        && old.condition == new.condition
}

pub fn diff(old: &[Trigger], new: &[Trigger]) -> Vec<MigrationStep> {
    let (added, dropped, modified) = crate::diff::diff_list(
        old,
        new,
        |t| (t.schema.clone(), t.table.clone(), t.name.clone()),
        equal,
    );

    let mut added: Vec<&Trigger> = added;
    added.sort_by_key(|t| t.name.clone());
    let mut dropped: Vec<&Trigger> = dropped;
    dropped.sort_by_key(|t| t.name.clone());

    let mut steps = Vec::new();

    for t in dropped {
        steps.push(MigrationStep::Trigger(TriggerOperation::Drop {
            schema: t.schema.clone(),
            table: t.table.clone(),
            name: t.name.clone(),
        }));
    }

    for t in added {
        steps.push(MigrationStep::Trigger(TriggerOperation::CreateOrReplace(
            t.clone(),
        )));
    }

    for (_old_t, new_t) in modified {
        steps.push(MigrationStep::Trigger(TriggerOperation::CreateOrReplace(
            new_t.clone(),
        )));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::trigger::{TriggerEvent, TriggerLevel, TriggerTiming};

    fn trig(name: &str, function: &str) -> Trigger {
        Trigger {
            schema: "public".into(),
            table: "users".into(),
            name: name.into(),
            timing: TriggerTiming::After,
            events: vec![TriggerEvent::Insert],
            level: TriggerLevel::Row,
            function: function.into(),
            condition: None,
        }
    }

    #[test]
    fn function_change_is_create_or_replace() {
        let old = vec![trig("t1", "f_old()")];
        let new = vec![trig("t1", "f_new()")];
        let steps = diff(&old, &new);
        assert_eq!(steps.len(), 1);
        assert!(matches!(
            steps[0],
            MigrationStep::Trigger(TriggerOperation::CreateOrReplace(_))
        ));
    }

    #[test]
    fn added_triggers_are_alphabetical() {
        let old = vec![];
        let new = vec![trig("b_trig", "f()"), trig("a_trig", "f()")];
        let steps = diff(&old, &new);
        let names: Vec<String> = steps
            .iter()
            .map(|s| match s {
                MigrationStep::Trigger(TriggerOperation::CreateOrReplace(t)) => t.name.clone(),
                _ => panic!(),
            })
            .collect();
        assert_eq!(names, vec!["a_trig", "b_trig"]);
    }
}
