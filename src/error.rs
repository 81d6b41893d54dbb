use thiserror::Error;

/// Errors raised by the assembly core.
///
/// Degenerate inputs (no reads, all reads shorter than k) are not errors:
/// they flow through as an empty k-mer map, an empty graph and an empty
/// contig set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// k-mer size below the minimum needed to form an overlap edge.
    #[error("invalid k-mer size {0}: must be at least 2")]
    InvalidKmerSize(usize),

    /// Internal contract violation: a path handed to weight averaging had
    /// fewer than two nodes, or skipped over a missing edge. Not reachable
    /// from a well-formed graph.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}
