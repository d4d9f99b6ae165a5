//! The error taxonomy surfaced by every fallible library operation.

use thiserror::Error;

use crate::arch::Arch;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller passed something nonsensical: an out-of-range argument
    /// index, an architecture with no syscall table, an invalid action word.
    #[error("invalid argument: {0}")]
    Usage(String),

    /// A syscall name could not be resolved on a configured architecture.
    #[error("unknown syscall: {0}")]
    UnknownSyscall(String),

    /// The operation refers to an architecture the filter does not contain.
    #[error("architecture {0} is not part of the filter")]
    ArchMismatch(Arch),

    /// The new rule contradicts an existing rule on the same syscall with
    /// the same predicate chain.
    #[error("rule conflicts with an existing rule for the same syscall")]
    RuleConflict,

    /// The filter does not fit the limits of a BPF program.
    #[error("filter is too large for a BPF program")]
    Overflow,

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
