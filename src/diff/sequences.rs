//! Diff sequences.

use crate::ir::Sequence;
use crate::operations::MigrationStep;
use crate::render::sequence::{SequenceAlterItem, SequenceOperation};

pub fn equal(old: &Sequence, new: &Sequence) -> bool {
    old.effective_data_type() == new.effective_data_type()
        && old.start_value == new.start_value
        && old.increment == new.increment
        && old.effective_min() == new.effective_min()
        && old.effective_max() == new.effective_max()
        && old.effective_cache() == new.effective_cache()
        && old.cycle == new.cycle
        && old.owned_by == new.owned_by
}

pub fn diff(old: &[Sequence], new: &[Sequence]) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |s| (s.schema.clone(), s.name.clone()), equal);

    let mut steps = Vec::new();

    for seq in dropped {
        steps.push(MigrationStep::Sequence(SequenceOperation::Drop {
            schema: seq.schema.clone(),
            name: seq.name.clone(),
        }));
    }

    for seq in added {
        steps.push(MigrationStep::Sequence(SequenceOperation::Create(
            seq.clone(),
        )));
    }

    for (old_seq, new_seq) in modified {
        let mut items = Vec::new();
        if old_seq.start_value != new_seq.start_value {
            items.push(SequenceAlterItem::Restart(new_seq.start_value));
        }
        if old_seq.increment != new_seq.increment {
            items.push(SequenceAlterItem::Increment(new_seq.increment));
        }
        if old_seq.min_value != new_seq.min_value {
            items.push(SequenceAlterItem::MinValue(new_seq.min_value));
        }
        if old_seq.max_value != new_seq.max_value {
            items.push(SequenceAlterItem::MaxValue(new_seq.max_value));
        }
        if old_seq.effective_cache() != new_seq.effective_cache() {
            items.push(SequenceAlterItem::Cache(new_seq.effective_cache()));
        }
        if old_seq.cycle != new_seq.cycle {
            items.push(SequenceAlterItem::Cycle(new_seq.cycle));
        }
        if old_seq.effective_data_type() != new_seq.effective_data_type() {
            items.push(SequenceAlterItem::DataType(
                new_seq.effective_data_type().to_string(),
            ));
        }
        if !items.is_empty() {
            steps.push(MigrationStep::Sequence(SequenceOperation::Alter {
                schema: new_seq.schema.clone(),
                name: new_seq.name.clone(),
                items,
            }));
        }
    }

    steps
}
