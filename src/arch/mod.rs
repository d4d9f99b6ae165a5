//! Architecture descriptors: audit tokens, word width, endianness and the
//! per-architecture view of the syscall registry.

use std::fmt;

mod pseudo;
mod table;

pub use table::SyscallDef;

/// Flag set in an audit token for 64-bit ABIs.
const AUDIT_ARCH_64BIT: u32 = 0x8000_0000;
/// Flag set in an audit token for little-endian ABIs.
const AUDIT_ARCH_LE: u32 = 0x4000_0000;

const AUDIT_ARCH_X86: u32 = 0x4000_0003;
const AUDIT_ARCH_X86_64: u32 = 0xc000_003e;
const AUDIT_ARCH_X32: u32 = 0x4000_003e;
const AUDIT_ARCH_ARM: u32 = 0x4000_0028;
const AUDIT_ARCH_AARCH64: u32 = 0xc000_00b7;
const AUDIT_ARCH_MIPS: u32 = 0x0000_0008;
const AUDIT_ARCH_MIPSEL: u32 = 0x4000_0008;
const AUDIT_ARCH_PPC: u32 = 0x0000_0014;
const AUDIT_ARCH_PPC64: u32 = 0x8000_0015;
const AUDIT_ARCH_PPC64LE: u32 = 0xc000_0015;
const AUDIT_ARCH_S390: u32 = 0x0000_0016;
const AUDIT_ARCH_S390X: u32 = 0x8000_0016;
const AUDIT_ARCH_RISCV64: u32 = 0xc000_00f3;

/// Byte order of an ABI, as seen by the kernel executing a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// An ABI that seccomp can report in a syscall record.
///
/// Every variant knows its audit token, word width and endianness. The
/// subset backed by a column of the canonical syscall table can be added to
/// a filter as a compilation target; the rest (arm, mips, mipsel, ppc,
/// riscv64) exist so that synthetic records and the simulator CLI can name
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X8664,
    X32,
    Arm,
    Aarch64,
    Mips,
    Mipsel,
    Ppc,
    Ppc64,
    Ppc64Le,
    S390,
    S390X,
    Riscv64,
}

impl Arch {
    /// Every ABI the crate knows about, in a fixed order.
    pub const ALL: &'static [Arch] = &[
        Arch::X86,
        Arch::X8664,
        Arch::X32,
        Arch::Arm,
        Arch::Aarch64,
        Arch::Mips,
        Arch::Mipsel,
        Arch::Ppc,
        Arch::Ppc64,
        Arch::Ppc64Le,
        Arch::S390,
        Arch::S390X,
        Arch::Riscv64,
    ];

    /// The ABI of the build target.
    pub fn native() -> Arch {
        #[cfg(target_arch = "x86")]
        return Arch::X86;
        #[cfg(target_arch = "x86_64")]
        return Arch::X8664;
        #[cfg(target_arch = "arm")]
        return Arch::Arm;
        #[cfg(target_arch = "aarch64")]
        return Arch::Aarch64;
        #[cfg(all(target_arch = "powerpc64", target_endian = "big"))]
        return Arch::Ppc64;
        #[cfg(all(target_arch = "powerpc64", target_endian = "little"))]
        return Arch::Ppc64Le;
        #[cfg(target_arch = "s390x")]
        return Arch::S390X;
        #[cfg(target_arch = "riscv64")]
        return Arch::Riscv64;
    }

    /// The AUDIT_ARCH_* token the kernel places in the syscall record.
    pub fn token(self) -> u32 {
        match self {
            Arch::X86 => AUDIT_ARCH_X86,
            Arch::X8664 => AUDIT_ARCH_X86_64,
            Arch::X32 => AUDIT_ARCH_X32,
            Arch::Arm => AUDIT_ARCH_ARM,
            Arch::Aarch64 => AUDIT_ARCH_AARCH64,
            Arch::Mips => AUDIT_ARCH_MIPS,
            Arch::Mipsel => AUDIT_ARCH_MIPSEL,
            Arch::Ppc => AUDIT_ARCH_PPC,
            Arch::Ppc64 => AUDIT_ARCH_PPC64,
            Arch::Ppc64Le => AUDIT_ARCH_PPC64LE,
            Arch::S390 => AUDIT_ARCH_S390,
            Arch::S390X => AUDIT_ARCH_S390X,
            Arch::Riscv64 => AUDIT_ARCH_RISCV64,
        }
    }

    pub fn from_token(token: u32) -> Option<Arch> {
        Arch::ALL.iter().copied().find(|a| a.token() == token)
    }

    /// The name used by the CLI tools and the PFC renderer.
    pub fn name(self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X8664 => "x86_64",
            Arch::X32 => "x32",
            Arch::Arm => "arm",
            Arch::Aarch64 => "aarch64",
            Arch::Mips => "mips",
            Arch::Mipsel => "mipsel",
            Arch::Ppc => "ppc",
            Arch::Ppc64 => "ppc64",
            Arch::Ppc64Le => "ppc64le",
            Arch::S390 => "s390",
            Arch::S390X => "s390x",
            Arch::Riscv64 => "riscv64",
        }
    }

    pub fn from_name(name: &str) -> Option<Arch> {
        Arch::ALL.iter().copied().find(|a| a.name() == name)
    }

    /// Word width of the ABI, derived from the audit token.
    pub fn bits(self) -> u32 {
        if self.token() & AUDIT_ARCH_64BIT != 0 {
            64
        } else {
            32
        }
    }

    /// Byte order of the ABI, derived from the audit token.
    pub fn endian(self) -> Endian {
        if self.token() & AUDIT_ARCH_LE != 0 {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Number of syscall arguments carried by the record. Fixed by the ABI.
    pub fn arg_count(self) -> usize {
        6
    }

    /// Index of this ABI's column in the canonical syscall table, or `None`
    /// for token-only ABIs that cannot be compiled for.
    pub(crate) fn table_column(self) -> Option<usize> {
        match self {
            Arch::X86 => Some(table::COL_X86),
            Arch::X8664 => Some(table::COL_X86_64),
            Arch::X32 => Some(table::COL_X32),
            Arch::Aarch64 => Some(table::COL_AARCH64),
            Arch::Ppc64 | Arch::Ppc64Le => Some(table::COL_PPC64),
            Arch::S390 | Arch::S390X => Some(table::COL_S390X),
            _ => None,
        }
    }

    /// Whether this ABI funnels the socket syscalls through `socketcall`.
    ///
    /// On such ABIs the twenty socket names resolve to their pseudo-numbers
    /// ahead of the table lookup, even where the table carries a real
    /// number, so that rules keyed on those names never reach the backend
    /// directly.
    pub fn multiplexes_socket_syscalls(self) -> bool {
        matches!(self, Arch::S390 | Arch::S390X)
    }

    /// Resolve a syscall name to its number on this ABI.
    ///
    /// A negative return is a pseudo-number: the name is known but has no
    /// number of its own here. `None` means the name is not in the registry
    /// at all.
    pub fn resolve_name(self, name: &str) -> Option<i32> {
        let column = self.table_column()?;

        if self.multiplexes_socket_syscalls() {
            if let Some(num) = pseudo::socket_pseudo_number(name) {
                return Some(num);
            }
        }

        table::lookup_name(name).map(|def| def.nums[column])
    }

    /// Resolve a syscall number back to its name on this ABI.
    ///
    /// Negative numbers are resolved through the shared pseudo-number
    /// namespace; non-negative ones through this ABI's table column.
    pub fn resolve_num(self, num: i32) -> Option<&'static str> {
        self.table_column()?;
        if num < 0 {
            return pseudo::pseudo_name(num);
        }
        table::lookup_num(self.table_column()?, num)
    }

    /// Walk this ABI's view of the registry in table order, pseudo entries
    /// included.
    pub fn iterate(self) -> impl Iterator<Item = (&'static str, i32)> {
        let column = self.table_column();
        table::SYSCALL_TABLE
            .iter()
            .filter_map(move |def| column.map(|c| (def.name, def.nums[c])))
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
