//! BPF filter simulator.
//!
//! Executes a binary seccomp filter against a synthesized syscall record
//! and prints the resulting action. Exit codes follow the simulator's
//! error classes: EINVAL for usage errors, EFAULT for simulator faults,
//! ENOEXEC for errors in the program under test.

use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use seccomp::{simulate, Arch, SyscallRecord};

#[derive(Parser)]
#[clap(name = "scmp_bpf_sim", about = "Simulate a binary seccomp BPF filter")]
struct Opts {
    /// Binary BPF filter to execute
    #[clap(short = 'f', value_name = "FILE")]
    file: PathBuf,

    /// Architecture of the syscall record
    #[clap(short = 'a', value_name = "ARCH", default_value = "x86_64")]
    arch: String,

    /// Syscall number placed in the record
    #[clap(short = 's', value_name = "NR", default_value = "0", parse(try_from_str = parse_num))]
    syscall: i64,

    /// Verbose failure reporting
    #[clap(short = 'v')]
    verbose: bool,

    /// Syscall argument values
    #[clap(short = '0', value_name = "A0", default_value = "0", parse(try_from_str = parse_num))]
    arg0: i64,
    #[clap(short = '1', value_name = "A1", default_value = "0", parse(try_from_str = parse_num))]
    arg1: i64,
    #[clap(short = '2', value_name = "A2", default_value = "0", parse(try_from_str = parse_num))]
    arg2: i64,
    #[clap(short = '3', value_name = "A3", default_value = "0", parse(try_from_str = parse_num))]
    arg3: i64,
    #[clap(short = '4', value_name = "A4", default_value = "0", parse(try_from_str = parse_num))]
    arg4: i64,
    #[clap(short = '5', value_name = "A5", default_value = "0", parse(try_from_str = parse_num))]
    arg5: i64,
}

/// Accept decimal and 0x-prefixed hexadecimal, like strtoll(3) with base 0.
fn parse_num(raw: &str) -> Result<i64, String> {
    let (digits, radix) = match raw.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (raw, 10),
    };
    i64::from_str_radix(digits, radix).map_err(|err| format!("{}: {}", raw, err))
}

fn main() {
    env_logger::init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let _ = err.print();
            exit(libc::EINVAL);
        }
    };
    exit(run(&opts));
}

fn run(opts: &Opts) -> i32 {
    let arch = match Arch::from_name(&opts.arch) {
        Some(arch) => arch,
        None => {
            eprintln!("unknown architecture: {}", opts.arch);
            return libc::EINVAL;
        }
    };

    let program = match fs::read(&opts.file) {
        Ok(program) => program,
        Err(err) => {
            if opts.verbose {
                eprintln!("FAULT: failed to read {}: {}", opts.file.display(), err);
            } else {
                eprintln!("FAULT");
            }
            return libc::EFAULT;
        }
    };

    let record = SyscallRecord {
        arch,
        nr: opts.syscall as u32,
        instruction_pointer: 0,
        args: [
            opts.arg0 as u64,
            opts.arg1 as u64,
            opts.arg2 as u64,
            opts.arg3 as u64,
            opts.arg4 as u64,
            opts.arg5 as u64,
        ],
    };

    match simulate(&program, &record) {
        Ok(action) => {
            println!("{}", action);
            0
        }
        Err(err) if err.is_fault() => {
            if opts.verbose {
                eprintln!("FAULT: {}", err);
            } else {
                eprintln!("FAULT");
            }
            libc::EFAULT
        }
        Err(err) => {
            if opts.verbose {
                eprintln!("ERROR: {}", err);
            } else {
                eprintln!("ERROR");
            }
            libc::ENOEXEC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seccomp::{Action, Filter};
    use std::io::Write as _;

    #[test]
    fn test_parse_num() {
        assert_eq!(parse_num("42").unwrap(), 42);
        assert_eq!(parse_num("0x2a").unwrap(), 0x2a);
        assert_eq!(parse_num("-1").unwrap(), -1);
        assert!(parse_num("x").is_err());
    }

    fn opts(file: PathBuf, arch: &str, syscall: i64) -> Opts {
        Opts {
            file,
            arch: arch.to_string(),
            syscall,
            verbose: false,
            arg0: 0,
            arg1: 0,
            arg2: 0,
            arg3: 0,
            arg4: 0,
            arg5: 0,
        }
    }

    #[test]
    fn test_run_against_generated_filter() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(seccomp::Arch::X8664).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        let mut program = Vec::new();
        filter.export_bpf(&mut program).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&program).unwrap();

        assert_eq!(run(&opts(file.path().to_path_buf(), "x86_64", 0)), 0);
    }

    #[test]
    fn test_run_missing_file_is_fault() {
        let path = PathBuf::from("/no/such/filter.bpf");
        assert_eq!(run(&opts(path, "x86_64", 0)), libc::EFAULT);
    }

    #[test]
    fn test_run_unknown_arch_is_usage_error() {
        let path = PathBuf::from("/dev/null");
        assert_eq!(run(&opts(path, "vax", 0)), libc::EINVAL);
    }
}
