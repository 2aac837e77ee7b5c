//! Diff the columns of a single table.
//!
//! Within a column alter, sub-operations are ordered type change, then
//! nullable change, then default change. A nullable change from nullable to
//! `NOT NULL` goes through the three-step online-safe pattern (see
//! `render::table::TableOperation::SetNotNull`).

use crate::ir::column::Column;
use crate::operations::MigrationStep;
use crate::render::table::TableOperation;

pub fn equal(old: &Column, new: &Column) -> bool {
    old.data_type == new.data_type
        && old.is_nullable == new.is_nullable
        && old.default_value == new.default_value
        && old.identity_generation == new.identity_generation
        && old.comment == new.comment
}

pub fn diff(schema: &str, table: &str, old: &[Column], new: &[Column]) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |c| c.name.clone(), equal);

    let mut steps = Vec::new();

    for col in dropped {
        steps.push(MigrationStep::Table(TableOperation::DropColumn {
            schema: schema.to_string(),
            table: table.to_string(),
            name: col.name.clone(),
        }));
    }

    for col in added {
        steps.push(MigrationStep::Table(TableOperation::AddColumn {
            schema: schema.to_string(),
            table: table.to_string(),
            column: col.clone(),
        }));
    }

    for (old_col, new_col) in modified {
        if old_col.data_type != new_col.data_type {
            steps.push(MigrationStep::Table(TableOperation::AlterColumnType {
                schema: schema.to_string(),
                table: table.to_string(),
                column: new_col.name.clone(),
                new_type: new_col.data_type.clone(),
            }));
        }

        if old_col.is_nullable != new_col.is_nullable {
            if new_col.is_nullable {
                steps.push(MigrationStep::Table(TableOperation::DropNotNull {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    column: new_col.name.clone(),
                }));
            } else {
                steps.push(MigrationStep::Table(TableOperation::SetNotNull {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    column: new_col.name.clone(),
                }));
            }
        }

        if old_col.default_value != new_col.default_value {
            match &new_col.default_value {
                Some(default) => {
                    steps.push(MigrationStep::Table(TableOperation::SetDefault {
                        schema: schema.to_string(),
                        table: table.to_string(),
                        column: new_col.name.clone(),
                        default: default.clone(),
                    }));
                }
                None => {
                    steps.push(MigrationStep::Table(TableOperation::DropDefault {
                        schema: schema.to_string(),
                        table: table.to_string(),
                        column: new_col.name.clone(),
                    }));
                }
            }
        }

        if old_col.comment != new_col.comment {
            steps.push(MigrationStep::Table(TableOperation::CommentColumn {
                schema: schema.to_string(),
                table: table.to_string(),
                column: new_col.name.clone(),
                comment: new_col.comment.clone(),
            }));
        }
    }

    steps
}
