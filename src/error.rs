//! Errors surfaced by the diff engine.
//!
//! The engine is total on well-formed IR: a call to
//! [`crate::generate_migration`] either returns a complete [`crate::collector::Diff`]
//! list or fails with [`DiffError::InvalidIr`]. The other variants are
//! non-fatal; they are recorded as warnings (via `tracing::warn!`) rather
//! than aborting the migration.

use crate::ir::id::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A referenced constraint column, FK target, trigger table, or policy
    /// table is missing from the snapshot that is supposed to contain it.
    #[error("invalid IR: {object} references {reference}, which does not exist in the snapshot")]
    InvalidIr { object: ObjectId, reference: ObjectId },

    /// An unnamed domain constraint cannot be dropped individually.
    #[error("domain {domain} has an unnamed constraint that cannot be dropped individually")]
    UnsupportedDomainChange { domain: ObjectId },

    /// A function body contains a call that matches more than one function
    /// by name; the call-graph builder resolved it (target-schema match,
    /// else first alphabetically) but flags the ambiguity.
    #[error(
        "call to `{call_name}` in function {caller} matches {candidate_count} functions; picked {picked}"
    )]
    AmbiguousFunctionCall {
        caller: ObjectId,
        call_name: String,
        candidate_count: usize,
        picked: ObjectId,
    },

    /// A dependency cycle survived every cycle-tolerant fallback (this
    /// should not happen in practice; the topo sorters never error on
    /// cycles, but the global step collector can still detect an
    /// inconsistency between drop/create ordering rules).
    #[error("migration step ordering is inconsistent: {0}")]
    OrderingFailed(String),
}

pub type Result<T> = std::result::Result<T, DiffError>;
