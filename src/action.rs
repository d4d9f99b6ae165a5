//! Filter actions and their 32-bit seccomp return encoding.

use std::fmt;

use crate::error::{Error, Result};

const SECCOMP_RET_KILL_PROCESS: u32 = 0x8000_0000;
const SECCOMP_RET_KILL_THREAD: u32 = 0x0000_0000;
const SECCOMP_RET_TRAP: u32 = 0x0003_0000;
const SECCOMP_RET_ERRNO: u32 = 0x0005_0000;
const SECCOMP_RET_USER_NOTIF: u32 = 0x7fc0_0000;
const SECCOMP_RET_TRACE: u32 = 0x7ff0_0000;
const SECCOMP_RET_LOG: u32 = 0x7ffc_0000;
const SECCOMP_RET_ALLOW: u32 = 0x7fff_0000;

/// Mask selecting the action class of a seccomp return word.
pub const SECCOMP_RET_ACTION_FULL: u32 = 0xffff_0000;
/// Mask selecting the 16-bit data field of a seccomp return word.
pub const SECCOMP_RET_DATA: u32 = 0x0000_ffff;

/// What the kernel should do when a rule (or the filter default) matches.
///
/// Each action maps to a 32-bit return word: an action class in the high
/// bits and a 16-bit data field in the low bits. `Errno` carries the errno
/// returned to the caller, `Trace` the cookie handed to a ptrace tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Kill the whole process.
    KillProcess,
    /// Kill the calling thread.
    KillThread,
    /// Deliver a SIGSYS to the calling thread.
    Trap,
    /// Fail the syscall with the given errno.
    Errno(u16),
    /// Notify an attached ptrace tracer with the given cookie.
    Trace(u16),
    /// Allow the syscall after logging it.
    Log,
    /// Allow the syscall.
    Allow,
    /// Forward the syscall to a userspace notification listener.
    Notify,
}

impl Action {
    /// The 32-bit return word installed in `RET` instructions.
    pub fn token(self) -> u32 {
        match self {
            Action::KillProcess => SECCOMP_RET_KILL_PROCESS,
            Action::KillThread => SECCOMP_RET_KILL_THREAD,
            Action::Trap => SECCOMP_RET_TRAP,
            Action::Errno(errno) => SECCOMP_RET_ERRNO | u32::from(errno),
            Action::Trace(cookie) => SECCOMP_RET_TRACE | u32::from(cookie),
            Action::Log => SECCOMP_RET_LOG,
            Action::Allow => SECCOMP_RET_ALLOW,
            Action::Notify => SECCOMP_RET_USER_NOTIF,
        }
    }

    /// Decode a 32-bit return word back into an action.
    ///
    /// The data field is significant for `Errno` and `Trace` and ignored for
    /// every other class, mirroring how the kernel consumes the word.
    pub fn from_token(word: u32) -> Result<Action> {
        let data = (word & SECCOMP_RET_DATA) as u16;
        match word & SECCOMP_RET_ACTION_FULL {
            SECCOMP_RET_KILL_PROCESS => Ok(Action::KillProcess),
            SECCOMP_RET_KILL_THREAD => Ok(Action::KillThread),
            SECCOMP_RET_TRAP => Ok(Action::Trap),
            SECCOMP_RET_ERRNO => Ok(Action::Errno(data)),
            SECCOMP_RET_TRACE => Ok(Action::Trace(data)),
            SECCOMP_RET_LOG => Ok(Action::Log),
            SECCOMP_RET_ALLOW => Ok(Action::Allow),
            SECCOMP_RET_USER_NOTIF => Ok(Action::Notify),
            _ => Err(Error::Usage(format!(
                "{:#010x} is not a valid action word",
                word
            ))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::KillProcess => write!(f, "KILL_PROCESS"),
            Action::KillThread => write!(f, "KILL"),
            Action::Trap => write!(f, "TRAP"),
            Action::Errno(errno) => write!(f, "ERRNO({})", errno),
            Action::Trace(cookie) => write!(f, "TRACE({})", cookie),
            Action::Log => write!(f, "LOG"),
            Action::Allow => write!(f, "ALLOW"),
            Action::Notify => write!(f, "NOTIFY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let actions = [
            Action::KillProcess,
            Action::KillThread,
            Action::Trap,
            Action::Errno(1),
            Action::Trace(1234),
            Action::Log,
            Action::Allow,
            Action::Notify,
        ];

        for action in actions.iter() {
            assert_eq!(Action::from_token(action.token()).unwrap(), *action);
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(Action::KillThread.token(), 0);
        assert_eq!(Action::Allow.token(), 0x7fff_0000);
        assert_eq!(Action::Errno(38).token(), 0x0005_0026);
        assert_eq!(Action::Trace(1).token(), 0x7ff0_0001);
        assert_eq!(Action::Log.token(), 0x7ffc_0000);
        assert_eq!(Action::Notify.token(), 0x7fc0_0000);
    }

    #[test]
    fn test_bad_action_word() {
        assert!(Action::from_token(0x1234_0000).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::KillThread.to_string(), "KILL");
        assert_eq!(Action::Errno(1).to_string(), "ERRNO(1)");
        assert_eq!(Action::Trace(42).to_string(), "TRACE(42)");
    }
}
