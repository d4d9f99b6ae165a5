//! A reference interpreter for generated programs.
//!
//! The simulator executes a serialized filter against a synthetic syscall
//! record and reports the resulting action. It understands exactly the
//! opcodes the generator emits; anything else is a simulator fault, while
//! out-of-range loads, running off the end of the program or an
//! undecodable action word are errors in the program itself. The record is
//! laid out in the target architecture's byte order and the program's
//! immediates are expected to match, so the two conversions cancel.

use thiserror::Error;

use crate::action::Action;
use crate::arch::{Arch, Endian};

use super::insn::{
    SockFilter, BPF_ABS, BPF_ALU, BPF_AND, BPF_JA, BPF_JEQ, BPF_JGE, BPF_JGT, BPF_JMP, BPF_K,
    BPF_LD, BPF_OR, BPF_RET, BPF_W, INSN_SIZE, PROGRAM_MAX_INSNS, RECORD_SIZE,
};

/// Scratch memory slots of the classic BPF machine.
const SCRATCH_SIZE: usize = 16;

/// A synthesized `seccomp_data` record: what the kernel would hand the
/// filter for one syscall invocation.
#[derive(Debug, Clone, Copy)]
pub struct SyscallRecord {
    pub arch: Arch,
    pub nr: u32,
    pub instruction_pointer: u64,
    pub args: [u64; 6],
}

impl SyscallRecord {
    pub fn new(arch: Arch, nr: u32) -> SyscallRecord {
        SyscallRecord {
            arch,
            nr,
            instruction_pointer: 0,
            args: [0; 6],
        }
    }

    pub fn with_args(arch: Arch, nr: u32, args: [u64; 6]) -> SyscallRecord {
        SyscallRecord {
            arch,
            nr,
            instruction_pointer: 0,
            args,
        }
    }

    /// Serialize the record in the architecture's byte order, exactly as a
    /// program load sees it.
    fn encode(&self) -> [u8; RECORD_SIZE as usize] {
        let mut bytes = [0u8; RECORD_SIZE as usize];
        let put32 = |offset: usize, value: u32, bytes: &mut [u8; RECORD_SIZE as usize]| {
            let raw = match self.arch.endian() {
                Endian::Little => value.to_le_bytes(),
                Endian::Big => value.to_be_bytes(),
            };
            bytes[offset..offset + 4].copy_from_slice(&raw);
        };
        let put64 = |offset: usize, value: u64, bytes: &mut [u8; RECORD_SIZE as usize]| {
            let raw = match self.arch.endian() {
                Endian::Little => value.to_le_bytes(),
                Endian::Big => value.to_be_bytes(),
            };
            bytes[offset..offset + 8].copy_from_slice(&raw);
        };

        put32(0, self.nr, &mut bytes);
        put32(4, self.arch.token(), &mut bytes);
        put64(8, self.instruction_pointer, &mut bytes);
        for (idx, &arg) in self.args.iter().enumerate() {
            put64(16 + idx * 8, arg, &mut bytes);
        }
        bytes
    }
}

/// Why a simulation did not produce an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The program uses an opcode outside the simulator's repertoire.
    #[error("unsupported opcode {code:#06x} at instruction {ip}")]
    UnsupportedOpcode { code: u16, ip: usize },

    /// The program is empty, truncated mid-instruction, or longer than the
    /// simulator's cap.
    #[error("program has no valid instruction stream")]
    MalformedProgram,

    /// A load reaches past the end of the syscall record.
    #[error("load past the syscall record at instruction {ip}")]
    LoadOutOfBounds { ip: usize },

    /// A jump or fall-through left the program without returning.
    #[error("execution left the program without returning")]
    FellOffEnd,

    /// A RET carried a word that is not a valid action encoding.
    #[error("invalid action word {word:#010x} at instruction {ip}")]
    BadAction { word: u32, ip: usize },
}

impl SimError {
    /// Faults are the simulator's own limits; everything else indicts the
    /// program. The CLI maps the two classes to different exit codes.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            SimError::UnsupportedOpcode { .. } | SimError::MalformedProgram
        )
    }
}

/// The result of a completed simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOutcome {
    pub action: Action,
    /// Instructions executed, RET included.
    pub steps: usize,
    /// Jump instructions among them.
    pub jumps: usize,
}

/// Run a serialized program against a record and report the action.
pub fn simulate(program: &[u8], record: &SyscallRecord) -> Result<Action, SimError> {
    simulate_full(program, record).map(|outcome| outcome.action)
}

/// Like [`simulate`], also reporting execution statistics.
pub fn simulate_full(program: &[u8], record: &SyscallRecord) -> Result<SimOutcome, SimError> {
    if program.is_empty()
        || program.len() % INSN_SIZE != 0
        || program.len() / INSN_SIZE > PROGRAM_MAX_INSNS
    {
        return Err(SimError::MalformedProgram);
    }

    let endian = record.arch.endian();
    let insns: Vec<SockFilter> = program
        .chunks_exact(INSN_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; INSN_SIZE];
            raw.copy_from_slice(chunk);
            SockFilter::read_from(&raw, endian)
        })
        .collect();

    let record_bytes = record.encode();
    let load = |offset: u32, ip: usize| -> Result<u32, SimError> {
        if offset.checked_add(4).map_or(true, |end| end > RECORD_SIZE) {
            return Err(SimError::LoadOutOfBounds { ip });
        }
        let offset = offset as usize;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&record_bytes[offset..offset + 4]);
        Ok(match endian {
            Endian::Little => u32::from_le_bytes(raw),
            Endian::Big => u32::from_be_bytes(raw),
        })
    };

    let mut acc: u32 = 0;
    let _scratch = [0u32; SCRATCH_SIZE];
    let mut ip = 0usize;
    let mut steps = 0usize;
    let mut jumps = 0usize;

    while ip < insns.len() {
        let at = ip;
        let insn = insns[ip];
        ip += 1;
        steps += 1;

        match insn.code {
            code if code == BPF_LD | BPF_W | BPF_ABS => {
                acc = load(insn.k, at)?;
            }
            code if code == BPF_ALU | BPF_OR | BPF_K => {
                acc |= insn.k;
            }
            code if code == BPF_ALU | BPF_AND | BPF_K => {
                acc &= insn.k;
            }
            code if code == BPF_JMP | BPF_JA => {
                jumps += 1;
                ip = ip.checked_add(insn.k as usize).ok_or(SimError::FellOffEnd)?;
            }
            code if code == BPF_JMP | BPF_JEQ | BPF_K => {
                jumps += 1;
                ip += if acc == insn.k {
                    insn.jt as usize
                } else {
                    insn.jf as usize
                };
            }
            code if code == BPF_JMP | BPF_JGT | BPF_K => {
                jumps += 1;
                ip += if acc > insn.k {
                    insn.jt as usize
                } else {
                    insn.jf as usize
                };
            }
            code if code == BPF_JMP | BPF_JGE | BPF_K => {
                jumps += 1;
                ip += if acc >= insn.k {
                    insn.jt as usize
                } else {
                    insn.jf as usize
                };
            }
            code if code == BPF_RET | BPF_K => {
                let action = Action::from_token(insn.k).map_err(|_| SimError::BadAction {
                    word: insn.k,
                    ip: at,
                })?;
                return Ok(SimOutcome {
                    action,
                    steps,
                    jumps,
                });
            }
            code => {
                return Err(SimError::UnsupportedOpcode { code, ip: at });
            }
        }
    }

    Err(SimError::FellOffEnd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bpf::insn::{bpf_jump, bpf_stmt};
    use crate::filter::{ArgCmp, CmpOp, Filter};

    fn raw_program(insns: &[SockFilter], endian: Endian) -> Vec<u8> {
        let mut bytes = Vec::new();
        for insn in insns {
            insn.write_to(&mut bytes, endian);
        }
        bytes
    }

    fn compiled(filter: &Filter) -> Vec<u8> {
        let mut program = Vec::new();
        filter.export_bpf(&mut program).unwrap();
        program
    }

    #[test]
    fn test_minimal_program() {
        let program = raw_program(
            &[bpf_stmt(BPF_RET | BPF_K, Action::Allow.token())],
            Endian::Little,
        );
        let record = SyscallRecord::new(Arch::X8664, 0);
        assert_eq!(simulate(&program, &record).unwrap(), Action::Allow);
    }

    #[test]
    fn test_unsupported_opcode_is_fault() {
        // BPF_LDX is outside the repertoire
        let program = raw_program(&[bpf_stmt(0x01, 0)], Endian::Little);
        let record = SyscallRecord::new(Arch::X8664, 0);
        let err = simulate(&program, &record).unwrap_err();
        assert_eq!(err, SimError::UnsupportedOpcode { code: 0x01, ip: 0 });
        assert!(err.is_fault());
    }

    #[test]
    fn test_load_out_of_bounds() {
        let program = raw_program(
            &[bpf_stmt(BPF_LD | BPF_W | BPF_ABS, RECORD_SIZE)],
            Endian::Little,
        );
        let record = SyscallRecord::new(Arch::X8664, 0);
        let err = simulate(&program, &record).unwrap_err();
        assert_eq!(err, SimError::LoadOutOfBounds { ip: 0 });
        assert!(!err.is_fault());
    }

    #[test]
    fn test_fell_off_end() {
        let program = raw_program(&[bpf_stmt(BPF_LD | BPF_W | BPF_ABS, 0)], Endian::Little);
        let record = SyscallRecord::new(Arch::X8664, 0);
        assert_eq!(
            simulate(&program, &record).unwrap_err(),
            SimError::FellOffEnd
        );
    }

    #[test]
    fn test_bad_action_word() {
        let program = raw_program(&[bpf_stmt(BPF_RET | BPF_K, 0x1234_0000)], Endian::Little);
        let record = SyscallRecord::new(Arch::X8664, 0);
        assert_eq!(
            simulate(&program, &record).unwrap_err(),
            SimError::BadAction {
                word: 0x1234_0000,
                ip: 0
            }
        );
    }

    #[test]
    fn test_truncated_program() {
        let record = SyscallRecord::new(Arch::X8664, 0);
        assert_eq!(
            simulate(&[0u8; 7], &record).unwrap_err(),
            SimError::MalformedProgram
        );
        assert_eq!(
            simulate(&[], &record).unwrap_err(),
            SimError::MalformedProgram
        );
    }

    #[test]
    fn test_jump_with_displacements() {
        let allow = Action::Allow.token();
        let kill = Action::KillThread.token();
        let program = raw_program(
            &[
                bpf_stmt(BPF_LD | BPF_W | BPF_ABS, 0),
                bpf_jump(BPF_JMP | BPF_JEQ | BPF_K, 42, 1, 0),
                bpf_stmt(BPF_RET | BPF_K, kill),
                bpf_stmt(BPF_RET | BPF_K, allow),
            ],
            Endian::Little,
        );
        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::X8664, 42)).unwrap(),
            Action::Allow
        );
        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::X8664, 41)).unwrap(),
            Action::KillThread
        );
    }

    #[test]
    fn test_compiled_filter_allows_and_kills() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        let program = compiled(&filter);

        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::X8664, 0)).unwrap(),
            Action::Allow
        );
        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::X8664, 1)).unwrap(),
            Action::KillThread
        );
        // wrong architecture token falls into the bad-arch tail
        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::X86, 0)).unwrap(),
            Action::KillThread
        );
    }

    #[test]
    fn test_compiled_filter_big_endian() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::Ppc64).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        let program = compiled(&filter);

        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::Ppc64, 3)).unwrap(),
            Action::Allow
        );
        assert_eq!(
            simulate(&program, &SyscallRecord::new(Arch::Ppc64, 4)).unwrap(),
            Action::KillThread
        );
    }

    #[test]
    fn test_argument_comparators() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter
            .rule_add(
                Action::Allow,
                "write",
                &[
                    ArgCmp::new(0, CmpOp::Eq(1)).unwrap(),
                    ArgCmp::new(2, CmpOp::Lt(4096)).unwrap(),
                ],
            )
            .unwrap();
        let program = compiled(&filter);

        let nr = 1; // write on x86_64
        let hit = SyscallRecord::with_args(Arch::X8664, nr, [1, 0, 100, 0, 0, 0]);
        let wrong_fd = SyscallRecord::with_args(Arch::X8664, nr, [2, 0, 100, 0, 0, 0]);
        let too_big = SyscallRecord::with_args(Arch::X8664, nr, [1, 0, 5000, 0, 0, 0]);

        assert_eq!(simulate(&program, &hit).unwrap(), Action::Allow);
        assert_eq!(simulate(&program, &wrong_fd).unwrap(), Action::KillThread);
        assert_eq!(simulate(&program, &too_big).unwrap(), Action::KillThread);
    }

    #[test]
    fn test_64bit_argument_halves() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter
            .rule_add(
                Action::Allow,
                "mmap",
                &[ArgCmp::new(1, CmpOp::Eq(0x1_0000_0000)).unwrap()],
            )
            .unwrap();
        let program = compiled(&filter);

        let nr = 9; // mmap on x86_64
        let hit = SyscallRecord::with_args(Arch::X8664, nr, [0, 0x1_0000_0000, 0, 0, 0, 0]);
        // same low half, different high half must not match
        let near = SyscallRecord::with_args(Arch::X8664, nr, [0, 0x2_0000_0000, 0, 0, 0, 0]);
        let zero = SyscallRecord::with_args(Arch::X8664, nr, [0, 0, 0, 0, 0, 0]);

        assert_eq!(simulate(&program, &hit).unwrap(), Action::Allow);
        assert_eq!(simulate(&program, &near).unwrap(), Action::KillThread);
        assert_eq!(simulate(&program, &zero).unwrap(), Action::KillThread);
    }

    quickcheck! {
        /// The compiled program agrees with a straight-line interpretation
        /// of the database for arbitrary records.
        fn prop_simulator_agrees_with_database(
            nr: u32,
            arg0: u64,
            arg1: u64,
            ordered: bool
        ) -> bool {
            let nr = nr % 600;
            let mut filter = Filter::new(Action::KillThread);
            filter.add_arch(Arch::X8664).unwrap();
            filter.rule_add(Action::Allow, "read", &[]).unwrap();
            filter
                .rule_add(
                    Action::Errno(1),
                    "write",
                    &[ArgCmp::new(0, CmpOp::Eq(4)).unwrap()],
                )
                .unwrap();
            filter
                .rule_add(
                    Action::Trace(7),
                    "openat",
                    &[
                        ArgCmp::new(
                            1,
                            if ordered {
                                CmpOp::Ge(0x8000)
                            } else {
                                CmpOp::MaskedEq { mask: 0xff, value: 0x41 }
                            },
                        )
                        .unwrap(),
                    ],
                )
                .unwrap();

            let mut program = Vec::new();
            filter.export_bpf(&mut program).unwrap();

            let args = [arg0, arg1, 0, 0, 0, 0];
            let record = SyscallRecord::with_args(Arch::X8664, nr, args);
            simulate(&program, &record).unwrap() == filter.evaluate(Arch::X8664, nr, &args)
        }
    }
}
