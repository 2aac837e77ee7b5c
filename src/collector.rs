//! The `Diff` record and append-only collector.
//!
//! Rather than rendering straight to a flat `Vec<String>` of SQL, each
//! pushed step keeps its statements, type, operation, path, source, and an
//! optional rewrite descriptor together, so callers can group, preview,
//! and gate on transaction-safety boundaries downstream.

use crate::error::{DiffError, Result};
use crate::ir::ObjectId;
use crate::operations::{DiffOperationKind, MigrationStep};
use crate::render::index::{EmissionMode, IndexOperation};
use crate::render::table::TableOperation;
use crate::render::SqlStatement;

/// Marks a `Diff` as an online-safe rewrite bundle (the NOT-NULL three-step
/// pattern, or a `CREATE INDEX CONCURRENTLY` + wait pairing) rather than a
/// single literal statement, so an executor can decide whether to keep the
/// bundle intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStrategy {
    NotNullCheckValidate,
    ConcurrentIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub statements: Vec<SqlStatement>,
    pub diff_type: &'static str,
    pub operation: DiffOperationKind,
    pub path: String,
    pub source: ObjectId,
    pub rewrite: Option<RewriteStrategy>,
}

/// The two step shapes that are online-safe multi-statement bundles rather
/// than a single literal statement.
fn rewrite_for_step(step: &MigrationStep) -> Option<RewriteStrategy> {
    match step {
        MigrationStep::Table(TableOperation::SetNotNull { .. }) => {
            Some(RewriteStrategy::NotNullCheckValidate)
        }
        MigrationStep::Index(IndexOperation::Create {
            mode: EmissionMode::Plan,
            ..
        }) => Some(RewriteStrategy::ConcurrentIndex),
        _ => None,
    }
}

impl Diff {
    pub fn from_step(step: &MigrationStep, target_schema: &str) -> Diff {
        Diff {
            statements: step.to_sql(target_schema),
            diff_type: step.diff_type(),
            operation: step.operation_kind(),
            path: step.path(target_schema),
            source: step.db_object_id(),
            rewrite: rewrite_for_step(step),
        }
    }

    pub fn with_rewrite(mut self, strategy: RewriteStrategy) -> Diff {
        self.rewrite = Some(strategy);
        self
    }

    /// Concatenates every statement's SQL with a blank-line separator, the
    /// rendering the default plan printer does.
    pub fn render_text(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Append-only collector; never reorders what is pushed into it.
#[derive(Debug, Default)]
pub struct DiffCollector {
    diffs: Vec<Diff>,
}

impl DiffCollector {
    pub fn new() -> Self {
        Self { diffs: Vec::new() }
    }

    pub fn push(&mut self, diff: Diff) -> Result<()> {
        if diff.statements.is_empty() {
            return Err(DiffError::OrderingFailed(format!(
                "refusing to collect {} with no statements",
                diff.path
            )));
        }
        if diff.path.is_empty() {
            return Err(DiffError::OrderingFailed(
                "refusing to collect a diff with empty context".to_string(),
            ));
        }
        self.diffs.push(diff);
        Ok(())
    }

    pub fn push_step(&mut self, step: &MigrationStep, target_schema: &str) -> Result<()> {
        self.push(Diff::from_step(step, target_schema))
    }

    pub fn into_vec(self) -> Vec<Diff> {
        self.diffs
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SqlStatement;

    #[test]
    fn rejects_empty_statement_list() {
        let mut collector = DiffCollector::new();
        let diff = Diff {
            statements: vec![],
            diff_type: "table",
            operation: DiffOperationKind::Create,
            path: "public.users".into(),
            source: ObjectId::Table {
                schema: "public".into(),
                name: "users".into(),
            },
            rewrite: None,
        };
        assert!(collector.push(diff).is_err());
    }

    #[test]
    fn rejects_empty_path() {
        let mut collector = DiffCollector::new();
        let diff = Diff {
            statements: vec![SqlStatement::new("SELECT 1;")],
            diff_type: "table",
            operation: DiffOperationKind::Create,
            path: "".into(),
            source: ObjectId::Table {
                schema: "public".into(),
                name: "users".into(),
            },
            rewrite: None,
        };
        assert!(collector.push(diff).is_err());
    }

    #[test]
    fn preserves_insertion_order() {
        let mut collector = DiffCollector::new();
        for name in ["a", "b", "c"] {
            collector
                .push(Diff {
                    statements: vec![SqlStatement::new(format!("-- {name}"))],
                    diff_type: "table",
                    operation: DiffOperationKind::Create,
                    path: format!("public.{name}"),
                    source: ObjectId::Table {
                        schema: "public".into(),
                        name: name.into(),
                    },
                    rewrite: None,
                })
                .unwrap();
        }
        let diffs = collector.into_vec();
        assert_eq!(diffs[0].path, "public.a");
        assert_eq!(diffs[2].path, "public.c");
    }

    #[test]
    fn set_not_null_step_is_tagged_as_check_validate_rewrite() {
        let step = MigrationStep::Table(TableOperation::SetNotNull {
            schema: "public".into(),
            table: "users".into(),
            column: "email".into(),
        });
        let diff = Diff::from_step(&step, "public");
        assert_eq!(diff.rewrite, Some(RewriteStrategy::NotNullCheckValidate));
    }

    #[test]
    fn plan_mode_index_create_step_is_tagged_as_concurrent_index_rewrite() {
        use crate::ir::index::{Index, IndexKind};

        let step = MigrationStep::Index(IndexOperation::Create {
            index: Index {
                schema: "public".into(),
                table: "users".into(),
                name: "idx_email".into(),
                kind: IndexKind::Plain,
                method: "btree".into(),
                columns: vec![],
                is_partial: false,
                where_clause: None,
                comment: None,
            },
            mode: EmissionMode::Plan,
        });
        let diff = Diff::from_step(&step, "public");
        assert_eq!(diff.rewrite, Some(RewriteStrategy::ConcurrentIndex));
    }

    #[test]
    fn ordinary_step_has_no_rewrite_tag() {
        let step = MigrationStep::Table(TableOperation::DropColumn {
            schema: "public".into(),
            table: "users".into(),
            name: "legacy".into(),
        });
        let diff = Diff::from_step(&step, "public");
        assert_eq!(diff.rewrite, None);
    }
}
