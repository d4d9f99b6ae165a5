//! The BPF backend: lowers a filter database into a branch-minimized
//! classic BPF program.
//!
//! A program is laid out as: architecture prologue, then one block per
//! architecture consisting of a syscall dispatch (priority-hoisted JEQ
//! chain plus a balanced binary search tree), the per-syscall argument
//! blocks, and one shared RET slot per distinct action. All branch targets
//! are symbolic labels until a final resolution pass fits every conditional
//! displacement into the 8-bit field, inserting unconditional trampolines
//! where a target is too far away.

use crate::action::Action;
use crate::arch::{Arch, Endian};
use crate::error::{Error, Result};
use crate::filter::{ArchFilter, ArgCmp, CmpOp, Filter, RuleChain};

use super::insn::{
    bpf_jump, bpf_stmt, SockFilter, BPF_ABS, BPF_ALU, BPF_AND, BPF_JA, BPF_JEQ, BPF_JGE, BPF_JGT,
    BPF_JMP, BPF_K, BPF_LD, BPF_RET, BPF_W, PROGRAM_MAX_INSNS, RECORD_ARCH_OFFSET,
    RECORD_ARGS_OFFSET, RECORD_ARG_SIZE, RECORD_NR_OFFSET,
};

/// Largest displacement a conditional jump can encode.
const JUMP_MAX: usize = u8::MAX as usize;

/// Static frequency scores biasing well-known hot syscalls toward the top
/// of the dispatch, behind any explicit priority. Sorted by name.
static FREQUENT_SYSCALLS: &[(&str, u8)] = &[
    ("brk", 50),
    ("clock_gettime", 60),
    ("close", 75),
    ("epoll_pwait", 65),
    ("epoll_wait", 65),
    ("fstat", 55),
    ("futex", 85),
    ("gettimeofday", 60),
    ("ioctl", 45),
    ("lseek", 40),
    ("mmap", 50),
    ("munmap", 45),
    ("openat", 55),
    ("poll", 65),
    ("read", 95),
    ("recvfrom", 70),
    ("recvmsg", 70),
    ("sendmsg", 70),
    ("sendto", 70),
    ("write", 90),
];

fn frequency_score(arch: Arch, nr: u32) -> u8 {
    let name = match arch.resolve_num(nr as i32) {
        Some(name) => name,
        None => return 0,
    };
    FREQUENT_SYSCALLS
        .binary_search_by(|&(n, _)| n.cmp(name))
        .map(|idx| FREQUENT_SYSCALLS[idx].1)
        .unwrap_or(0)
}

type Label = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Fall through to the next instruction.
    Next,
    /// Jump to a symbolic label.
    Label(Label),
}

#[derive(Debug, Clone, Copy)]
enum Operand {
    /// A literal immediate.
    Imm(u32),
    /// A jump target carried in the k field (JA only).
    Goto(Target),
}

#[derive(Debug, Clone, Copy)]
struct PendingInsn {
    code: u16,
    k: Operand,
    jt: Target,
    jf: Target,
}

impl PendingInsn {
    fn is_conditional(&self) -> bool {
        self.code & 0x07 == BPF_JMP && self.code & 0xf0 != BPF_JA
    }
}

/// Collects instructions with symbolic branch targets, then resolves them
/// into displacement form.
struct Emitter {
    insns: Vec<PendingInsn>,
    /// Label bindings: instruction index each label points at.
    labels: Vec<Option<usize>>,
}

impl Emitter {
    fn new() -> Emitter {
        Emitter {
            insns: Vec::new(),
            labels: Vec::new(),
        }
    }

    fn label(&mut self) -> Label {
        self.labels.push(None);
        self.labels.len() - 1
    }

    /// Bind a label to the next instruction emitted.
    fn bind(&mut self, label: Label) -> Result<()> {
        if self.labels[label].is_some() {
            return Err(Error::Internal("label bound twice"));
        }
        self.labels[label] = Some(self.insns.len());
        Ok(())
    }

    fn stmt(&mut self, code: u16, k: u32) {
        self.insns.push(PendingInsn {
            code,
            k: Operand::Imm(k),
            jt: Target::Next,
            jf: Target::Next,
        });
    }

    fn jump(&mut self, code: u16, k: u32, jt: Target, jf: Target) {
        self.insns.push(PendingInsn {
            code,
            k: Operand::Imm(k),
            jt,
            jf,
        });
    }

    fn ja(&mut self, target: Target) {
        self.insns.push(PendingInsn {
            code: BPF_JMP | BPF_JA,
            k: Operand::Goto(target),
            jt: Target::Next,
            jf: Target::Next,
        });
    }

    fn ret(&mut self, k: u32) {
        self.stmt(BPF_RET | BPF_K, k);
    }

    /// Turn the fall-through operands of every conditional jump into bound
    /// labels. After this, inserting an instruction right after a jump
    /// cannot cut a fall-through edge: every edge is a label that moves
    /// with its instruction.
    fn materialize_fallthrough_labels(&mut self) {
        for idx in 0..self.insns.len() {
            if !self.insns[idx].is_conditional() {
                continue;
            }
            for pick in 0..2 {
                let target = if pick == 0 {
                    self.insns[idx].jt
                } else {
                    self.insns[idx].jf
                };
                if target == Target::Next {
                    self.labels.push(Some(idx + 1));
                    let label = self.labels.len() - 1;
                    if pick == 0 {
                        self.insns[idx].jt = Target::Label(label);
                    } else {
                        self.insns[idx].jf = Target::Label(label);
                    }
                }
            }
        }
    }

    fn displacement(&self, from: usize, target: Target) -> Result<usize> {
        match target {
            Target::Next => Ok(0),
            Target::Label(label) => {
                let to = self.labels[label].ok_or(Error::Internal("unbound label"))?;
                if to <= from {
                    return Err(Error::Internal("backward jump"));
                }
                Ok(to - from - 1)
            }
        }
    }

    /// Find the first conditional jump whose displacement does not fit.
    fn find_overlong_jump(&self) -> Result<Option<(usize, bool)>> {
        for (idx, insn) in self.insns.iter().enumerate() {
            if !insn.is_conditional() {
                continue;
            }
            if self.displacement(idx, insn.jt)? > JUMP_MAX {
                return Ok(Some((idx, true)));
            }
            if self.displacement(idx, insn.jf)? > JUMP_MAX {
                return Ok(Some((idx, false)));
            }
        }
        Ok(None)
    }

    /// Put an unconditional trampoline to the far target right behind the
    /// offending jump and retarget the jump at it. Safe because both edges
    /// of every conditional are labels by now, so no fall-through crosses
    /// the insertion point.
    fn insert_trampoline(&mut self, idx: usize, taken_branch: bool) {
        let far = if taken_branch {
            self.insns[idx].jt
        } else {
            self.insns[idx].jf
        };

        for binding in self.labels.iter_mut().flatten() {
            if *binding > idx {
                *binding += 1;
            }
        }
        self.insns.insert(
            idx + 1,
            PendingInsn {
                code: BPF_JMP | BPF_JA,
                k: Operand::Goto(far),
                jt: Target::Next,
                jf: Target::Next,
            },
        );
        self.labels.push(Some(idx + 1));
        let trampoline = self.labels.len() - 1;
        if taken_branch {
            self.insns[idx].jt = Target::Label(trampoline);
        } else {
            self.insns[idx].jf = Target::Label(trampoline);
        }
    }

    /// Resolve every symbolic target into a displacement, inserting
    /// trampolines until the 8-bit fields suffice.
    ///
    /// Each insertion retires one overlong branch and grows the program by
    /// one instruction, so the kernel's program cap doubles as the loop
    /// bound: a filter that cannot be resolved within it is an overflow,
    /// never an endless loop.
    fn resolve(mut self) -> Result<Vec<SockFilter>> {
        self.materialize_fallthrough_labels();

        while let Some((idx, taken_branch)) = self.find_overlong_jump()? {
            if self.insns.len() >= PROGRAM_MAX_INSNS {
                return Err(Error::Overflow);
            }
            self.insert_trampoline(idx, taken_branch);
        }

        if self.insns.len() > PROGRAM_MAX_INSNS {
            return Err(Error::Overflow);
        }

        let mut program = Vec::with_capacity(self.insns.len());
        for (idx, insn) in self.insns.iter().enumerate() {
            let resolved = match insn.k {
                Operand::Imm(k) => {
                    let jt = self.displacement(idx, insn.jt)?;
                    let jf = self.displacement(idx, insn.jf)?;
                    if jt > JUMP_MAX || jf > JUMP_MAX {
                        return Err(Error::Internal("unresolved overlong jump"));
                    }
                    bpf_jump(insn.code, k, jt as u8, jf as u8)
                }
                Operand::Goto(target) => {
                    bpf_stmt(insn.code, self.displacement(idx, target)? as u32)
                }
            };
            program.push(resolved);
        }
        Ok(program)
    }
}

/// Compile the database into host-order instructions.
pub(crate) fn compile(filter: &Filter) -> Result<Vec<SockFilter>> {
    if filter.arches.is_empty() {
        return Err(Error::Usage(
            "the filter has no target architectures".to_string(),
        ));
    }

    let mut emitter = Emitter::new();

    // prologue: dispatch on the record's architecture token
    emitter.stmt(BPF_LD | BPF_W | BPF_ABS, RECORD_ARCH_OFFSET);
    let mut arch_labels = Vec::with_capacity(filter.arches.len());
    for arch_filter in filter.arches.iter() {
        let label = emitter.label();
        emitter.jump(
            BPF_JMP | BPF_JEQ | BPF_K,
            arch_filter.arch.token(),
            Target::Label(label),
            Target::Next,
        );
        arch_labels.push(label);
    }
    emitter.ret(filter.bad_arch_action.token());

    for (arch_filter, label) in filter.arches.iter().zip(arch_labels) {
        emitter.bind(label)?;
        emit_arch_block(&mut emitter, filter, arch_filter)?;
    }

    let program = emitter.resolve()?;
    log::debug!(
        "generated {} instructions for {} architecture(s)",
        program.len(),
        filter.arches.len()
    );
    Ok(program)
}

/// Compile the database and serialize it in the primary architecture's
/// byte order.
pub(crate) fn compile_bytes(filter: &Filter) -> Result<Vec<u8>> {
    let endian = filter
        .arches
        .first()
        .map(|af| af.arch.endian())
        .unwrap_or(Endian::Little);
    let program = compile(filter)?;
    let mut bytes = Vec::with_capacity(program.len() * super::insn::INSN_SIZE);
    for insn in program.iter() {
        insn.write_to(&mut bytes, endian);
    }
    Ok(bytes)
}

/// Look up or create the shared RET slot for an action.
fn action_target(
    emitter: &mut Emitter,
    actions: &mut Vec<(u32, Label)>,
    action: Action,
) -> Target {
    let token = action.token();
    if let Some(&(_, label)) = actions.iter().find(|&&(t, _)| t == token) {
        return Target::Label(label);
    }
    let label = emitter.label();
    actions.push((token, label));
    Target::Label(label)
}

fn emit_arch_block(
    emitter: &mut Emitter,
    filter: &Filter,
    arch_filter: &ArchFilter,
) -> Result<()> {
    let arch = arch_filter.arch;
    let default_label = emitter.label();
    let mut actions: Vec<(u32, Label)> = Vec::new();

    emitter.stmt(BPF_LD | BPF_W | BPF_ABS, RECORD_NR_OFFSET);

    let entries: Vec<(u32, &RuleChain)> = arch_filter
        .chains
        .iter()
        .filter(|(_, chain)| !chain.rules.is_empty())
        .map(|(&nr, chain)| (nr, chain))
        .collect();

    // order the dispatch: explicitly prioritized or known-hot syscalls get
    // a linear JEQ chain up front, everything else a balanced tree
    let mut hoisted: Vec<(u32, &RuleChain, u8, u8)> = Vec::new();
    let mut tree: Vec<(u32, &RuleChain)> = Vec::new();
    for (nr, chain) in entries {
        let freq = frequency_score(arch, nr);
        if chain.priority > 0 || freq > 0 {
            hoisted.push((nr, chain, chain.priority, freq));
        } else {
            tree.push((nr, chain));
        }
    }
    hoisted.sort_by(|a, b| {
        b.2.cmp(&a.2)
            .then(b.3.cmp(&a.3))
            .then(a.0.cmp(&b.0))
    });
    tree.sort_by_key(|&(nr, _)| nr);

    // pick a dispatch target per syscall: straight to the shared action
    // slot for an unconditional single-rule chain, otherwise an argument
    // block of its own
    let mut blocks: Vec<(Label, &RuleChain)> = Vec::new();
    let mut targets: Vec<(u32, Target)> = Vec::new();
    for (nr, chain) in hoisted
        .iter()
        .map(|&(nr, chain, _, _)| (nr, chain))
        .chain(tree.iter().copied())
    {
        let target = match chain.rules.as_slice() {
            [rule] if rule.cmps.is_empty() => action_target(emitter, &mut actions, rule.action),
            _ => {
                let label = emitter.label();
                blocks.push((label, chain));
                Target::Label(label)
            }
        };
        targets.push((nr, target));
    }

    let hoisted_count = hoisted.len();
    for &(nr, target) in targets[..hoisted_count].iter() {
        emitter.jump(BPF_JMP | BPF_JEQ | BPF_K, nr, target, Target::Next);
    }
    let tree_targets = &targets[hoisted_count..];
    if tree_targets.is_empty() {
        emitter.ja(Target::Label(default_label));
    } else {
        emit_dispatch_tree(emitter, tree_targets, default_label)?;
    }

    for &(label, chain) in blocks.iter() {
        emitter.bind(label)?;
        emit_argument_block(emitter, arch, chain, default_label, &mut actions)?;
    }

    // shared action returns; unmatched syscalls fall through to the
    // default at the head of the slots
    emitter.bind(default_label)?;
    emitter.ret(filter.default_action.token());
    for &(token, label) in actions.iter() {
        emitter.bind(label)?;
        emitter.ret(token);
    }

    Ok(())
}

/// Balanced binary search over the syscall numbers: JGT nodes partition,
/// JEQ leaves match, misses go to the default action.
fn emit_dispatch_tree(
    emitter: &mut Emitter,
    targets: &[(u32, Target)],
    default_label: Label,
) -> Result<()> {
    if targets.len() == 1 {
        let (nr, target) = targets[0];
        emitter.jump(
            BPF_JMP | BPF_JEQ | BPF_K,
            nr,
            target,
            Target::Label(default_label),
        );
        return Ok(());
    }

    let mid = targets.len() / 2;
    let (left, right) = targets.split_at(mid);
    let right_label = emitter.label();
    emitter.jump(
        BPF_JMP | BPF_JGT | BPF_K,
        left[left.len() - 1].0,
        Target::Label(right_label),
        Target::Next,
    );
    emit_dispatch_tree(emitter, left, default_label)?;
    emitter.bind(right_label)?;
    emit_dispatch_tree(emitter, right, default_label)
}

/// One syscall's rule chain: each rule is a conjunction of comparators
/// falling through to the next rule on failure, ending in a jump to the
/// rule's action slot; the last rule fails into the default action.
fn emit_argument_block(
    emitter: &mut Emitter,
    arch: Arch,
    chain: &RuleChain,
    default_label: Label,
    actions: &mut Vec<(u32, Label)>,
) -> Result<()> {
    for (idx, rule) in chain.rules.iter().enumerate() {
        let last = idx + 1 == chain.rules.len();
        let fail = if last {
            Target::Label(default_label)
        } else {
            Target::Label(emitter.label())
        };

        for cmp in rule.cmps.iter() {
            emit_comparator(emitter, arch, cmp, fail)?;
        }
        let action = action_target(emitter, actions, rule.action);
        emitter.ja(action);

        if let Target::Label(label) = fail {
            if !last {
                emitter.bind(label)?;
            }
        }
    }
    Ok(())
}

/// Lower one comparator into the two-word form: the 64-bit argument is
/// tested as (hi, lo) halves in the target's endian layout, with ordered
/// comparisons using the lexicographic two-word sequence.
fn emit_comparator(
    emitter: &mut Emitter,
    arch: Arch,
    cmp: &ArgCmp,
    fail: Target,
) -> Result<()> {
    let arg_offset = RECORD_ARGS_OFFSET + u32::from(cmp.arg()) * RECORD_ARG_SIZE;
    let (hi_off, lo_off) = match arch.endian() {
        Endian::Little => (arg_offset + 4, arg_offset),
        Endian::Big => (arg_offset, arg_offset + 4),
    };
    let load = BPF_LD | BPF_W | BPF_ABS;
    let jeq = BPF_JMP | BPF_JEQ | BPF_K;
    let jgt = BPF_JMP | BPF_JGT | BPF_K;
    let jge = BPF_JMP | BPF_JGE | BPF_K;

    let halves = |datum: u64| ((datum >> 32) as u32, datum as u32);

    match cmp.op() {
        CmpOp::Eq(datum) => {
            let (hi, lo) = halves(datum);
            emitter.stmt(load, hi_off);
            emitter.jump(jeq, hi, Target::Next, fail);
            emitter.stmt(load, lo_off);
            emitter.jump(jeq, lo, Target::Next, fail);
        }
        CmpOp::Ne(datum) => {
            let (hi, lo) = halves(datum);
            let differs = emitter.label();
            emitter.stmt(load, hi_off);
            emitter.jump(jeq, hi, Target::Next, Target::Label(differs));
            emitter.stmt(load, lo_off);
            emitter.jump(jeq, lo, fail, Target::Next);
            emitter.bind(differs)?;
        }
        CmpOp::Gt(datum) => {
            let (hi, lo) = halves(datum);
            let above = emitter.label();
            emitter.stmt(load, hi_off);
            emitter.jump(jgt, hi, Target::Label(above), Target::Next);
            emitter.jump(jeq, hi, Target::Next, fail);
            emitter.stmt(load, lo_off);
            emitter.jump(jgt, lo, Target::Next, fail);
            emitter.bind(above)?;
        }
        CmpOp::Ge(datum) => {
            let (hi, lo) = halves(datum);
            let above = emitter.label();
            emitter.stmt(load, hi_off);
            emitter.jump(jgt, hi, Target::Label(above), Target::Next);
            emitter.jump(jeq, hi, Target::Next, fail);
            emitter.stmt(load, lo_off);
            emitter.jump(jge, lo, Target::Next, fail);
            emitter.bind(above)?;
        }
        CmpOp::Lt(datum) => {
            let (hi, lo) = halves(datum);
            let below = emitter.label();
            emitter.stmt(load, hi_off);
            emitter.jump(jgt, hi, fail, Target::Next);
            emitter.jump(jeq, hi, Target::Next, Target::Label(below));
            emitter.stmt(load, lo_off);
            emitter.jump(jge, lo, fail, Target::Next);
            emitter.bind(below)?;
        }
        CmpOp::Le(datum) => {
            let (hi, lo) = halves(datum);
            let below = emitter.label();
            emitter.stmt(load, hi_off);
            emitter.jump(jgt, hi, fail, Target::Next);
            emitter.jump(jeq, hi, Target::Next, Target::Label(below));
            emitter.stmt(load, lo_off);
            emitter.jump(jgt, lo, fail, Target::Next);
            emitter.bind(below)?;
        }
        CmpOp::MaskedEq { mask, value } => {
            let (mask_hi, mask_lo) = halves(mask);
            let (value_hi, value_lo) = halves(value);
            emitter.stmt(load, hi_off);
            emitter.stmt(BPF_ALU | BPF_AND | BPF_K, mask_hi);
            emitter.jump(jeq, value_hi, Target::Next, fail);
            emitter.stmt(load, lo_off);
            emitter.stmt(BPF_ALU | BPF_AND | BPF_K, mask_lo);
            emitter.jump(jeq, value_lo, Target::Next, fail);
        }
    }
    Ok(())
}
