//! Argument comparators: per-argument predicates attached to rules.

use crate::error::{Error, Result};

/// Highest valid syscall argument index.
pub const ARG_INDEX_MAX: u8 = 5;

/// The comparison a rule performs against one syscall argument.
///
/// All comparisons are over the full 64-bit argument value as it appears in
/// the syscall record. `MaskedEq` matches when `arg & mask == value`; the
/// value is normalized (masked) on construction so that equivalent
/// predicates compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq(u64),
    Ne(u64),
    Lt(u64),
    Le(u64),
    Gt(u64),
    Ge(u64),
    MaskedEq { mask: u64, value: u64 },
}

/// A single argument predicate: which argument, compared how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgCmp {
    pub(crate) arg: u8,
    pub(crate) op: CmpOp,
}

impl ArgCmp {
    /// Build a predicate on argument `arg` (0..=5).
    pub fn new(arg: u8, op: CmpOp) -> Result<ArgCmp> {
        if arg > ARG_INDEX_MAX {
            return Err(Error::Usage(format!(
                "syscall argument index {} is out of range",
                arg
            )));
        }

        let op = match op {
            CmpOp::MaskedEq { mask, value } => CmpOp::MaskedEq {
                mask,
                value: value & mask,
            },
            other => other,
        };

        Ok(ArgCmp { arg, op })
    }

    pub fn arg(&self) -> u8 {
        self.arg
    }

    pub fn op(&self) -> CmpOp {
        self.op
    }

    /// Evaluate the predicate against a full argument vector.
    pub(crate) fn matches(&self, args: &[u64; 6]) -> bool {
        let actual = args[self.arg as usize];
        match self.op {
            CmpOp::Eq(datum) => actual == datum,
            CmpOp::Ne(datum) => actual != datum,
            CmpOp::Lt(datum) => actual < datum,
            CmpOp::Le(datum) => actual <= datum,
            CmpOp::Gt(datum) => actual > datum,
            CmpOp::Ge(datum) => actual >= datum,
            CmpOp::MaskedEq { mask, value } => actual & mask == value,
        }
    }
}

/// The set of argument values an ordered comparison admits, as a closed
/// interval. `None` for predicates that are not intervals.
fn interval(op: CmpOp) -> Option<(u64, u64)> {
    match op {
        CmpOp::Eq(v) => Some((v, v)),
        CmpOp::Lt(0) => Some((1, 0)), // empty
        CmpOp::Lt(v) => Some((0, v - 1)),
        CmpOp::Le(v) => Some((0, v)),
        CmpOp::Gt(u64::MAX) => Some((1, 0)), // empty
        CmpOp::Gt(v) => Some((v + 1, u64::MAX)),
        CmpOp::Ge(v) => Some((v, u64::MAX)),
        CmpOp::Ne(_) | CmpOp::MaskedEq { .. } => None,
    }
}

/// Does `premise` holding on an argument force `conclusion` to hold?
///
/// Used by the rule-merge pass to detect subsumed predicate chains. The
/// check is conservative: a `false` answer only means "could not prove it".
pub(crate) fn implies(premise: CmpOp, conclusion: CmpOp) -> bool {
    if premise == conclusion {
        return true;
    }

    // a known exact value decides any predicate
    if let CmpOp::Eq(v) = premise {
        return ArgCmp { arg: 0, op: conclusion }.matches(&[v, 0, 0, 0, 0, 0]);
    }

    match (interval(premise), interval(conclusion)) {
        (Some((plo, phi)), Some((clo, chi))) => {
            if plo > phi {
                return true; // empty premise implies anything
            }
            clo <= plo && phi <= chi
        }
        (Some((plo, phi)), None) => match conclusion {
            CmpOp::Ne(v) => v < plo || v > phi,
            _ => false,
        },
        _ => match (premise, conclusion) {
            // a wider mask pins every bit a narrower mask looks at
            (
                CmpOp::MaskedEq { mask: pm, value: pv },
                CmpOp::MaskedEq { mask: cm, value: cv },
            ) => cm & !pm == 0 && pv & cm == cv,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(arg: u8, op: CmpOp) -> ArgCmp {
        ArgCmp::new(arg, op).unwrap()
    }

    #[test]
    fn test_arg_index_bounds() {
        assert!(ArgCmp::new(5, CmpOp::Eq(0)).is_ok());
        assert!(ArgCmp::new(6, CmpOp::Eq(0)).is_err());
    }

    #[test]
    fn test_masked_eq_normalized() {
        let a = cmp(1, CmpOp::MaskedEq { mask: 0x00ff, value: 0x3301 });
        let b = cmp(1, CmpOp::MaskedEq { mask: 0x00ff, value: 0x0001 });
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches() {
        let args = [0, 0x3301, 2, 0, 0, 0];
        assert!(cmp(0, CmpOp::Eq(0)).matches(&args));
        assert!(cmp(1, CmpOp::MaskedEq { mask: 0x00ff, value: 1 }).matches(&args));
        assert!(cmp(1, CmpOp::Gt(0x3300)).matches(&args));
        assert!(cmp(2, CmpOp::Le(2)).matches(&args));
        assert!(!cmp(2, CmpOp::Ne(2)).matches(&args));
        assert!(cmp(3, CmpOp::Lt(1)).matches(&args));
    }

    #[test]
    fn test_full_width_comparison() {
        let args = [0x1_0000_0000, 0, 0, 0, 0, 0];
        assert!(!cmp(0, CmpOp::Eq(0)).matches(&args));
        assert!(cmp(0, CmpOp::Gt(u32::MAX as u64)).matches(&args));
    }

    #[test]
    fn test_implies_eq() {
        assert!(implies(CmpOp::Eq(5), CmpOp::Le(5)));
        assert!(implies(CmpOp::Eq(5), CmpOp::Ne(6)));
        assert!(implies(CmpOp::Eq(5), CmpOp::Gt(4)));
        assert!(implies(
            CmpOp::Eq(0x1234),
            CmpOp::MaskedEq { mask: 0xff00, value: 0x1200 }
        ));
        assert!(!implies(CmpOp::Eq(5), CmpOp::Lt(5)));
    }

    #[test]
    fn test_implies_intervals() {
        assert!(implies(CmpOp::Lt(5), CmpOp::Lt(10)));
        assert!(implies(CmpOp::Lt(5), CmpOp::Le(4)));
        assert!(implies(CmpOp::Gt(10), CmpOp::Ge(10)));
        assert!(implies(CmpOp::Lt(5), CmpOp::Ne(9)));
        assert!(!implies(CmpOp::Lt(10), CmpOp::Lt(5)));
        assert!(!implies(CmpOp::Ne(9), CmpOp::Lt(5)));
    }

    #[test]
    fn test_implies_masked() {
        let wide = CmpOp::MaskedEq { mask: 0xffff, value: 0x1234 };
        let narrow = CmpOp::MaskedEq { mask: 0x00ff, value: 0x0034 };
        assert!(implies(wide, narrow));
        assert!(!implies(narrow, wide));
    }
}
