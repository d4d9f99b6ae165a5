//! BPF filter disassembler.
//!
//! Decodes a binary seccomp filter and prints one instruction per line:
//! address, raw fields and a mnemonic with resolved jump targets.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use seccomp::bpf::insn::{
    SockFilter, BPF_ABS, BPF_ALU, BPF_AND, BPF_JA, BPF_JEQ, BPF_JGE, BPF_JGT, BPF_JMP, BPF_K,
    BPF_LD, BPF_OR, BPF_RET, BPF_W, INSN_SIZE,
};
use seccomp::Arch;

#[derive(Parser)]
#[clap(name = "scmp_bpf_disasm", about = "Disassemble a binary seccomp BPF filter")]
struct Opts {
    /// Binary BPF filter to decode
    #[clap(short = 'f', value_name = "FILE")]
    file: PathBuf,

    /// Architecture the filter was generated for (fixes the byte order)
    #[clap(short = 'a', value_name = "ARCH", default_value = "x86_64")]
    arch: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let arch = match Arch::from_name(&opts.arch) {
        Some(arch) => arch,
        None => bail!("unknown architecture: {}", opts.arch),
    };

    let bytes = fs::read(&opts.file)
        .with_context(|| format!("failed to read {}", opts.file.display()))?;
    if bytes.is_empty() || bytes.len() % INSN_SIZE != 0 {
        bail!("{} is not a BPF program", opts.file.display());
    }

    println!(" addr  op   jt   jf   k");
    println!("=================================");
    for (addr, chunk) in bytes.chunks_exact(INSN_SIZE).enumerate() {
        let mut raw = [0u8; INSN_SIZE];
        raw.copy_from_slice(chunk);
        let insn = SockFilter::read_from(&raw, arch.endian());
        println!(
            " {:04x}: 0x{:02x} 0x{:02x} 0x{:02x} 0x{:08x}   {}",
            addr,
            insn.code,
            insn.jt,
            insn.jf,
            insn.k,
            mnemonic(&insn, addr)
        );
    }
    Ok(())
}

fn mnemonic(insn: &SockFilter, addr: usize) -> String {
    let jump_targets = |insn: &SockFilter| {
        (
            addr + 1 + insn.jt as usize,
            addr + 1 + insn.jf as usize,
        )
    };
    match insn.code {
        code if code == BPF_LD | BPF_W | BPF_ABS => format!("ld  $data[{}]", insn.k),
        code if code == BPF_ALU | BPF_AND | BPF_K => format!("and 0x{:08x}", insn.k),
        code if code == BPF_ALU | BPF_OR | BPF_K => format!("or  0x{:08x}", insn.k),
        code if code == BPF_JMP | BPF_JA => format!("jmp {:04x}", addr + 1 + insn.k as usize),
        code if code == BPF_JMP | BPF_JEQ | BPF_K => {
            let (jt, jf) = jump_targets(insn);
            format!("jeq {}\ttrue:{:04x} false:{:04x}", insn.k, jt, jf)
        }
        code if code == BPF_JMP | BPF_JGT | BPF_K => {
            let (jt, jf) = jump_targets(insn);
            format!("jgt {}\ttrue:{:04x} false:{:04x}", insn.k, jt, jf)
        }
        code if code == BPF_JMP | BPF_JGE | BPF_K => {
            let (jt, jf) = jump_targets(insn);
            format!("jge {}\ttrue:{:04x} false:{:04x}", insn.k, jt, jf)
        }
        code if code == BPF_RET | BPF_K => format!("ret 0x{:08x}", insn.k),
        _ => "unknown".to_string(),
    }
}
