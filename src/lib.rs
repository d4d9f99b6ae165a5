//! A seccomp filter compiler.
//!
//! This crate turns a declarative syscall policy (which syscalls are
//! allowed, denied, traced or killed, optionally qualified by argument
//! predicates) into a classic BPF program ready for installation through
//! the kernel's seccomp facility. Installing the program is the caller's
//! business; this crate is the compiler, the syscall registry it compiles
//! against, and a small BPF simulator used to verify what was generated.
//!
//! ```
//! use seccomp::{Action, Arch, ArgCmp, CmpOp, Filter};
//!
//! let mut filter = Filter::new(Action::KillThread);
//! filter.add_arch(Arch::X8664)?;
//! filter.rule_add(Action::Allow, "read", &[])?;
//! filter.rule_add(
//!     Action::Errno(1),
//!     "write",
//!     &[ArgCmp::new(0, CmpOp::Eq(2))?],
//! )?;
//!
//! let mut program = Vec::new();
//! filter.export_bpf(&mut program)?;
//! # Ok::<(), seccomp::Error>(())
//! ```
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod action;
pub mod arch;
pub mod bpf;
mod error;
pub mod filter;
mod pfc;

pub use action::Action;
pub use arch::{Arch, Endian, SyscallDef};
pub use bpf::sim::{simulate, SimError, SyscallRecord};
pub use error::{Error, Result};
pub use filter::{ArgCmp, CmpOp, Filter};
