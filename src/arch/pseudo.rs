//! The shared pseudo-number namespace.
//!
//! A pseudo-number is a negative sentinel standing in for a syscall name on
//! an ABI where the name has no number of its own. The namespace is shared
//! by every ABI so a policy written against one can be carried to another,
//! and the values are frozen: changing one breaks previously serialized
//! policies.
//!
//! Allocation scheme: the socket family occupies -101..-120 in `socketcall`
//! subcall order, the SysV IPC family -201..-212 in `ipc` subcall order,
//! and everything else counts down from -10001 in name order.

/// Pseudo-numbers of the twenty socket syscalls, in `socketcall` subcall
/// order. ABIs that multiplex sockets resolve these names ahead of the
/// table.
pub(crate) const PNR_SOCKET: i32 = -101;
pub(crate) const PNR_BIND: i32 = -102;
pub(crate) const PNR_CONNECT: i32 = -103;
pub(crate) const PNR_LISTEN: i32 = -104;
pub(crate) const PNR_ACCEPT: i32 = -105;
pub(crate) const PNR_GETSOCKNAME: i32 = -106;
pub(crate) const PNR_GETPEERNAME: i32 = -107;
pub(crate) const PNR_SOCKETPAIR: i32 = -108;
pub(crate) const PNR_SEND: i32 = -109;
pub(crate) const PNR_RECV: i32 = -110;
pub(crate) const PNR_SENDTO: i32 = -111;
pub(crate) const PNR_RECVFROM: i32 = -112;
pub(crate) const PNR_SHUTDOWN: i32 = -113;
pub(crate) const PNR_SETSOCKOPT: i32 = -114;
pub(crate) const PNR_GETSOCKOPT: i32 = -115;
pub(crate) const PNR_SENDMSG: i32 = -116;
pub(crate) const PNR_RECVMSG: i32 = -117;
pub(crate) const PNR_ACCEPT4: i32 = -118;
pub(crate) const PNR_RECVMMSG: i32 = -119;
pub(crate) const PNR_SENDMMSG: i32 = -120;

/// Resolve a socket syscall name to its pseudo-number.
pub(crate) fn socket_pseudo_number(name: &str) -> Option<i32> {
    let num = match name {
        "socket" => PNR_SOCKET,
        "bind" => PNR_BIND,
        "connect" => PNR_CONNECT,
        "listen" => PNR_LISTEN,
        "accept" => PNR_ACCEPT,
        "getsockname" => PNR_GETSOCKNAME,
        "getpeername" => PNR_GETPEERNAME,
        "socketpair" => PNR_SOCKETPAIR,
        "send" => PNR_SEND,
        "recv" => PNR_RECV,
        "sendto" => PNR_SENDTO,
        "recvfrom" => PNR_RECVFROM,
        "shutdown" => PNR_SHUTDOWN,
        "setsockopt" => PNR_SETSOCKOPT,
        "getsockopt" => PNR_GETSOCKOPT,
        "sendmsg" => PNR_SENDMSG,
        "recvmsg" => PNR_RECVMSG,
        "accept4" => PNR_ACCEPT4,
        "recvmmsg" => PNR_RECVMMSG,
        "sendmmsg" => PNR_SENDMMSG,
        _ => return None,
    };
    Some(num)
}

/// Resolve a pseudo-number back to its syscall name.
pub(crate) fn pseudo_name(num: i32) -> Option<&'static str> {
    PSEUDO_TABLE
        .iter()
        .find(|&&(_, pnr)| pnr == num)
        .map(|&(name, _)| name)
}

const fn p(name: &'static str, num: i32) -> (&'static str, i32) {
    (name, num)
}

/// Every name that owns a pseudo-number, sorted by name. Keep frozen.
pub(crate) static PSEUDO_TABLE: &[(&str, i32)] = &[
    p("_llseek",               -10001),
    p("_newselect",            -10002),
    p("_sysctl",               -10003),
    p("accept",                  -105),
    p("accept4",                 -118),
    p("access",                -10004),
    p("afs_syscall",           -10005),
    p("alarm",                 -10006),
    p("arch_prctl",            -10007),
    p("arm_fadvise64_64",      -10008),
    p("arm_sync_file_range",   -10009),
    p("bdflush",               -10010),
    p("bind",                    -102),
    p("break",                 -10011),
    p("breakpoint",            -10012),
    p("cachectl",              -10013),
    p("cacheflush",            -10014),
    p("chmod",                 -10015),
    p("chown",                 -10016),
    p("chown32",               -10017),
    p("clock_adjtime64",       -10018),
    p("clock_getres_time64",   -10019),
    p("clock_gettime64",       -10020),
    p("clock_nanosleep_time64", -10021),
    p("clock_settime64",       -10022),
    p("clone3",                -10023),
    p("connect",                 -103),
    p("creat",                 -10024),
    p("create_module",         -10025),
    p("dup2",                  -10026),
    p("epoll_create",          -10027),
    p("epoll_ctl_old",         -10028),
    p("epoll_wait",            -10029),
    p("epoll_wait_old",        -10030),
    p("eventfd",               -10031),
    p("fadvise64_64",          -10032),
    p("fchown32",              -10033),
    p("fcntl64",               -10034),
    p("fork",                  -10035),
    p("fstat64",               -10036),
    p("fstatat64",             -10037),
    p("fstatfs64",             -10038),
    p("ftime",                 -10039),
    p("ftruncate64",           -10040),
    p("futex_time64",          -10041),
    p("futimesat",             -10042),
    p("get_kernel_syms",       -10043),
    p("get_thread_area",       -10044),
    p("get_tls",               -10045),
    p("getdents",              -10046),
    p("getegid32",             -10047),
    p("geteuid32",             -10048),
    p("getgid32",              -10049),
    p("getgroups32",           -10050),
    p("getpeername",             -107),
    p("getpgrp",               -10051),
    p("getpmsg",               -10052),
    p("getresgid32",           -10053),
    p("getresuid32",           -10054),
    p("getrlimit",             -10055),
    p("getsockname",             -106),
    p("getsockopt",              -115),
    p("getuid32",              -10056),
    p("gtty",                  -10057),
    p("idle",                  -10058),
    p("inotify_init",          -10059),
    p("io_pgetevents_time64",  -10060),
    p("ioperm",                -10061),
    p("iopl",                  -10062),
    p("ipc",                   -10063),
    p("kexec_file_load",       -10064),
    p("lchown",                -10065),
    p("lchown32",              -10066),
    p("link",                  -10067),
    p("listen",                  -104),
    p("lock",                  -10068),
    p("lstat",                 -10069),
    p("lstat64",               -10070),
    p("mkdir",                 -10071),
    p("mknod",                 -10072),
    p("mmap2",                 -10073),
    p("modify_ldt",            -10074),
    p("mpx",                   -10075),
    p("mq_timedreceive_time64", -10076),
    p("mq_timedsend_time64",   -10077),
    p("msgctl",                  -208),
    p("msgget",                  -207),
    p("msgrcv",                  -206),
    p("msgsnd",                  -205),
    p("multiplexer",           -10078),
    p("newfstatat",            -10079),
    p("nfsservctl",            -10080),
    p("nice",                  -10081),
    p("oldfstat",              -10082),
    p("oldlstat",              -10083),
    p("oldolduname",           -10084),
    p("oldstat",               -10085),
    p("olduname",              -10086),
    p("oldwait4",              -10087),
    p("open",                  -10088),
    p("pause",                 -10089),
    p("pciconfig_iobase",      -10090),
    p("pciconfig_read",        -10091),
    p("pciconfig_write",       -10092),
    p("pipe",                  -10093),
    p("poll",                  -10094),
    p("ppoll_time64",          -10095),
    p("prof",                  -10096),
    p("profil",                -10097),
    p("pselect6_time64",       -10098),
    p("putpmsg",               -10099),
    p("query_module",          -10100),
    p("readdir",               -10101),
    p("readlink",              -10102),
    p("recv",                    -110),
    p("recvfrom",                -112),
    p("recvmmsg",                -119),
    p("recvmmsg_time64",       -10103),
    p("recvmsg",                 -117),
    p("rename",                -10104),
    p("rmdir",                 -10105),
    p("rt_sigtimedwait_time64", -10106),
    p("rtas",                  -10107),
    p("s390_guarded_storage",  -10108),
    p("s390_pci_mmio_read",    -10109),
    p("s390_pci_mmio_write",   -10110),
    p("s390_runtime_instr",    -10111),
    p("s390_sthyi",            -10112),
    p("sched_rr_get_interval_time64", -10113),
    p("security",              -10114),
    p("select",                -10115),
    p("semctl",                  -203),
    p("semget",                  -202),
    p("semop",                   -201),
    p("semtimedop",              -204),
    p("semtimedop_time64",     -10116),
    p("send",                    -109),
    p("sendfile64",            -10117),
    p("sendmmsg",                -120),
    p("sendmsg",                 -116),
    p("sendto",                  -111),
    p("set_thread_area",       -10118),
    p("set_tls",               -10119),
    p("setfsgid32",            -10120),
    p("setfsuid32",            -10121),
    p("setgid32",              -10122),
    p("setgroups32",           -10123),
    p("setregid32",            -10124),
    p("setresgid32",           -10125),
    p("setresuid32",           -10126),
    p("setreuid32",            -10127),
    p("setrlimit",             -10128),
    p("setsockopt",              -114),
    p("setuid32",              -10129),
    p("sgetmask",              -10130),
    p("shmat",                   -209),
    p("shmctl",                  -212),
    p("shmdt",                   -210),
    p("shmget",                  -211),
    p("shutdown",                -113),
    p("sigaction",             -10131),
    p("signal",                -10132),
    p("signalfd",              -10133),
    p("sigpending",            -10134),
    p("sigprocmask",           -10135),
    p("sigreturn",             -10136),
    p("sigsuspend",            -10137),
    p("socket",                  -101),
    p("socketcall",            -10138),
    p("socketpair",              -108),
    p("spu_create",            -10139),
    p("spu_run",               -10140),
    p("ssetmask",              -10141),
    p("stat",                  -10142),
    p("stat64",                -10143),
    p("statfs64",              -10144),
    p("stime",                 -10145),
    p("stty",                  -10146),
    p("subpage_prot",          -10147),
    p("swapcontext",           -10148),
    p("switch_endian",         -10149),
    p("symlink",               -10150),
    p("sync_file_range",       -10151),
    p("sync_file_range2",      -10152),
    p("sys_debug_setcontext",  -10153),
    p("syscall",               -10154),
    p("sysfs",                 -10155),
    p("sysmips",               -10156),
    p("time",                  -10157),
    p("timer_gettime64",       -10158),
    p("timer_settime64",       -10159),
    p("timerfd",               -10160),
    p("timerfd_gettime64",     -10161),
    p("timerfd_settime64",     -10162),
    p("truncate64",            -10163),
    p("tuxcall",               -10164),
    p("ugetrlimit",            -10165),
    p("ulimit",                -10166),
    p("umount",                -10167),
    p("unlink",                -10168),
    p("uselib",                -10169),
    p("usr26",                 -10170),
    p("usr32",                 -10171),
    p("ustat",                 -10172),
    p("utime",                 -10173),
    p("utimensat_time64",      -10174),
    p("utimes",                -10175),
    p("vfork",                 -10176),
    p("vm86",                  -10177),
    p("vm86old",               -10178),
    p("vserver",               -10179),
    p("waitpid",               -10180),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sorted_by_name() {
        for pair in PSEUDO_TABLE.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_all_negative_and_unique() {
        let mut seen = HashSet::new();
        for &(name, num) in PSEUDO_TABLE {
            assert!(num < 0, "{} has a non-negative pseudo-number", name);
            assert!(seen.insert(num), "{} reuses pseudo-number {}", name, num);
        }
    }

    fn number(name: &str) -> i32 {
        PSEUDO_TABLE
            .binary_search_by(|&(n, _)| n.cmp(name))
            .map(|idx| PSEUDO_TABLE[idx].1)
            .unwrap()
    }

    #[test]
    fn test_stable_values() {
        // frozen namespace: these exact values are load-bearing for
        // serialized policies
        assert_eq!(number("socket"), -101);
        assert_eq!(number("sendmmsg"), -120);
        assert_eq!(number("semop"), -201);
        assert_eq!(number("shmctl"), -212);
        assert_eq!(number("_llseek"), -10001);
        assert_eq!(number("waitpid"), -10180);
        assert_eq!(pseudo_name(-110), Some("recv"));
    }

    #[test]
    fn test_socket_family_complete() {
        let names = [
            "socket", "bind", "connect", "listen", "accept", "getsockname",
            "getpeername", "socketpair", "send", "recv", "sendto", "recvfrom",
            "shutdown", "setsockopt", "getsockopt", "sendmsg", "recvmsg",
            "accept4", "recvmmsg", "sendmmsg",
        ];
        for (idx, name) in names.iter().enumerate() {
            assert_eq!(socket_pseudo_number(name), Some(-101 - idx as i32));
        }
        assert_eq!(socket_pseudo_number("socketcall"), None);
    }
}
