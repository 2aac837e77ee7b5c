//! Functions ordered by body call graph: a function sorts after any other
//! function its body calls.
//!
//! There is no live catalog to resolve dependencies from, so the call
//! graph is built by textually scanning each function body for call
//! syntax with a static compiled `regex` pattern. A callee referenced only
//! through dynamic SQL is invisible to this scan and is not ordered.
//!
//! An unqualified call that matches more than one function by name is
//! resolved against `target_schema` first (the schema the migration will
//! run against), falling back to the first candidate in alphabetical
//! schema order when none of them live in `target_schema`.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::function::Function;
use crate::ir::ObjectId;
use crate::topo::kahn::topological_sort;

static CALL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:([A-Za-z_][A-Za-z0-9_]*)\.)?([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousCall {
    pub caller: ObjectId,
    pub call_name: String,
    pub candidate_count: usize,
    pub picked: ObjectId,
}

pub struct CallGraph {
    /// Indices into the input slice, dependency-first.
    pub order: Vec<usize>,
    pub ambiguous: Vec<AmbiguousCall>,
}

/// Builds the call graph and a dependency-first order over `functions`.
pub fn build(functions: &[Function], target_schema: &str) -> CallGraph {
    let mut ambiguous = Vec::new();
    let mut edges: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); functions.len()];

    for (i, caller) in functions.iter().enumerate() {
        let mut reported: HashSet<String> = HashSet::new();
        for cap in CALL_PATTERN.captures_iter(&caller.definition) {
            let explicit_schema = cap.get(1).map(|m| m.as_str());
            let name = &cap[2];

            let candidates: Vec<usize> = functions
                .iter()
                .enumerate()
                .filter(|(_, f)| {
                    f.name.eq_ignore_ascii_case(name)
                        && explicit_schema.is_none_or(|s| s.eq_ignore_ascii_case(&f.schema))
                })
                .map(|(idx, _)| idx)
                .collect();

            let Some(&first) = candidates.first() else {
                continue; // built-in, extension function, or unknown
            };

            let picked = if candidates.len() == 1 {
                first
            } else {
                candidates
                    .iter()
                    .copied()
                    .find(|&idx| functions[idx].schema == target_schema)
                    .unwrap_or_else(|| {
                        *candidates
                            .iter()
                            .min_by_key(|&&idx| functions[idx].schema.as_str())
                            .expect("candidates is non-empty")
                    })
            };

            if candidates.len() > 1 {
                let key = format!("{}:{name}", explicit_schema.unwrap_or(""));
                if reported.insert(key) {
                    ambiguous.push(AmbiguousCall {
                        caller: caller.id(),
                        call_name: name.to_string(),
                        candidate_count: candidates.len(),
                        picked: functions[picked].id(),
                    });
                }
            }

            if picked != i {
                edges[i].insert(picked);
            }
        }
    }

    let order = topological_sort(functions.len(), |i| edges[i].iter().copied().collect());
    CallGraph { order, ambiguous }
}
