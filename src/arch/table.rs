//! The canonical syscall table.
//!
//! One row per syscall name, sorted by name, with the syscall number for
//! every table-backed ABI in fixed column order. Numbers follow the
//! kernel's uapi syscall tables; a negative number is the name's
//! pseudo-number on ABIs where it was never wired up (see
//! [`super::pseudo`]). The ppc64 column serves both byte orders and the
//! s390x column serves both zSeries widths.
//!
//! This file is data. Keep the rows sorted and the columns aligned; the
//! tests at the bottom hold the invariants.

pub(crate) const COL_X86: usize = 0;
pub(crate) const COL_X86_64: usize = 1;
pub(crate) const COL_X32: usize = 2;
pub(crate) const COL_AARCH64: usize = 3;
pub(crate) const COL_PPC64: usize = 4;
pub(crate) const COL_S390X: usize = 5;

pub(crate) const COLUMNS: usize = 6;

/// One row of the table: a syscall name and its per-ABI numbers.
#[derive(Debug)]
pub struct SyscallDef {
    pub name: &'static str,
    pub nums: [i32; COLUMNS],
}

const fn s(name: &'static str, nums: [i32; COLUMNS]) -> SyscallDef {
    SyscallDef { name, nums }
}

/// Binary search a row by name.
pub(crate) fn lookup_name(name: &str) -> Option<&'static SyscallDef> {
    SYSCALL_TABLE
        .binary_search_by(|def| def.name.cmp(name))
        .ok()
        .map(|idx| &SYSCALL_TABLE[idx])
}

/// Scan a column for a real syscall number.
pub(crate) fn lookup_num(column: usize, num: i32) -> Option<&'static str> {
    SYSCALL_TABLE
        .iter()
        .find(|def| def.nums[column] == num)
        .map(|def| def.name)
}

pub(crate) static SYSCALL_TABLE: &[SyscallDef] = &[
    s("_llseek",              [       140,     -10001,     -10001,     -10001,        140,     -10001]),
    s("_newselect",           [       142,     -10002,     -10002,     -10002,        142,     -10002]),
    s("_sysctl",              [       149,        156,     -10003,     -10003,        149,        149]),
    s("accept",               [      -105,         43, 1073741867,        202,        330,       -105]),
    s("accept4",              [       364,        288, 1073742112,        242,        344,        364]),
    s("access",               [        33,         21, 1073741845,     -10004,         33,         33]),
    s("acct",                 [        51,        163, 1073741987,         89,         51,         51]),
    s("add_key",              [       286,        248, 1073742072,        217,        269,        278]),
    s("adjtimex",             [       124,        159, 1073741983,        171,        124,        124]),
    s("afs_syscall",          [       137,        183, 1073742007,     -10005,        137,        137]),
    s("alarm",                [        27,         37, 1073741861,     -10006,         27,         27]),
    s("arch_prctl",           [       384,        158, 1073741982,     -10007,     -10007,     -10007]),
    s("arm_fadvise64_64",     [    -10008,     -10008,     -10008,     -10008,     -10008,     -10008]),
    s("arm_sync_file_range",  [    -10009,     -10009,     -10009,     -10009,     -10009,     -10009]),
    s("bdflush",              [       134,     -10010,     -10010,     -10010,        134,        134]),
    s("bind",                 [       361,         49, 1073741873,        200,        327,        361]),
    s("bpf",                  [       357,        321, 1073742145,        280,        361,        351]),
    s("break",                [        17,     -10011,     -10011,     -10011,         17,     -10011]),
    s("breakpoint",           [    -10012,     -10012,     -10012,     -10012,     -10012,     -10012]),
    s("brk",                  [        45,         12, 1073741836,        214,         45,         45]),
    s("cachectl",             [    -10013,     -10013,     -10013,     -10013,     -10013,     -10013]),
    s("cacheflush",           [    -10014,     -10014,     -10014,     -10014,     -10014,     -10014]),
    s("capget",               [       184,        125, 1073741949,         90,        183,        184]),
    s("capset",               [       185,        126, 1073741950,         91,        184,        185]),
    s("chdir",                [        12,         80, 1073741904,         49,         12,         12]),
    s("chmod",                [        15,         90, 1073741914,     -10015,         15,         15]),
    s("chown",                [       182,         92, 1073741916,     -10016,        181,        212]),
    s("chown32",              [       212,     -10017,     -10017,     -10017,     -10017,     -10017]),
    s("chroot",               [        61,        161, 1073741985,         51,         61,         61]),
    s("clock_adjtime",        [       343,        305, 1073742129,        266,        347,        337]),
    s("clock_adjtime64",      [       405,     -10018,     -10018,     -10018,     -10018,     -10018]),
    s("clock_getres",         [       266,        229, 1073742053,        114,        247,        261]),
    s("clock_getres_time64",  [       406,     -10019,     -10019,     -10019,     -10019,     -10019]),
    s("clock_gettime",        [       265,        228, 1073742052,        113,        246,        260]),
    s("clock_gettime64",      [       403,     -10020,     -10020,     -10020,     -10020,     -10020]),
    s("clock_nanosleep",      [       267,        230, 1073742054,        115,        248,        262]),
    s("clock_nanosleep_time64",[       407,     -10021,     -10021,     -10021,     -10021,     -10021]),
    s("clock_settime",        [       264,        227, 1073742051,        112,        245,        259]),
    s("clock_settime64",      [       404,     -10022,     -10022,     -10022,     -10022,     -10022]),
    s("clone",                [       120,         56, 1073741880,        220,        120,        120]),
    s("clone3",               [       435,        435, 1073742259,     -10023,        435,        435]),
    s("close",                [         6,          3, 1073741827,         57,          6,          6]),
    s("close_range",          [       436,        436, 1073742260,        436,        436,        436]),
    s("connect",              [       362,         42, 1073741866,        203,        328,        362]),
    s("copy_file_range",      [       377,        326, 1073742150,        285,        379,        375]),
    s("creat",                [         8,         85, 1073741909,     -10024,          8,          8]),
    s("create_module",        [       127,        174,     -10025,     -10025,        127,        127]),
    s("delete_module",        [       129,        176, 1073742000,        106,        129,        129]),
    s("dup",                  [        41,         32, 1073741856,         23,         41,         41]),
    s("dup2",                 [        63,         33, 1073741857,     -10026,         63,         63]),
    s("dup3",                 [       330,        292, 1073742116,         24,        316,        326]),
    s("epoll_create",         [       254,        213, 1073742037,     -10027,        236,        249]),
    s("epoll_create1",        [       329,        291, 1073742115,         20,        315,        327]),
    s("epoll_ctl",            [       255,        233, 1073742057,         21,        237,        250]),
    s("epoll_ctl_old",        [    -10028,        214,     -10028,     -10028,     -10028,     -10028]),
    s("epoll_pwait",          [       319,        281, 1073742105,         22,        303,        312]),
    s("epoll_wait",           [       256,        232, 1073742056,     -10029,        238,        251]),
    s("epoll_wait_old",       [    -10030,        215,     -10030,     -10030,     -10030,     -10030]),
    s("eventfd",              [       323,        284, 1073742108,     -10031,        307,        318]),
    s("eventfd2",             [       328,        290, 1073742114,         19,        314,        323]),
    s("execve",               [        11,         59, 1073742344,        221,         11,         11]),
    s("execveat",             [       358,        322, 1073742369,        281,        362,        354]),
    s("exit",                 [         1,         60, 1073741884,         93,          1,          1]),
    s("exit_group",           [       252,        231, 1073742055,         94,        234,        248]),
    s("faccessat",            [       307,        269, 1073742093,         48,        298,        300]),
    s("faccessat2",           [       439,        439, 1073742263,        439,        439,        439]),
    s("fadvise64",            [       250,        221, 1073742045,        223,        233,        253]),
    s("fadvise64_64",         [       272,     -10032,     -10032,     -10032,     -10032,     -10032]),
    s("fallocate",            [       324,        285, 1073742109,         47,        309,        314]),
    s("fanotify_init",        [       338,        300, 1073742124,        262,        323,        332]),
    s("fanotify_mark",        [       339,        301, 1073742125,        263,        324,        333]),
    s("fchdir",               [       133,         81, 1073741905,         50,        133,        133]),
    s("fchmod",               [        94,         91, 1073741915,         52,         94,         94]),
    s("fchmodat",             [       306,        268, 1073742092,         53,        297,        299]),
    s("fchown",               [        95,         93, 1073741917,         55,         95,        207]),
    s("fchown32",             [       207,     -10033,     -10033,     -10033,     -10033,     -10033]),
    s("fchownat",             [       298,        260, 1073742084,         54,        289,        291]),
    s("fcntl",                [        55,         72, 1073741896,         25,         55,         55]),
    s("fcntl64",              [       221,     -10034,     -10034,     -10034,     -10034,     -10034]),
    s("fdatasync",            [       148,         75, 1073741899,         83,        148,        148]),
    s("fgetxattr",            [       231,        193, 1073742017,         10,        214,        229]),
    s("finit_module",         [       350,        313, 1073742137,        273,        353,        344]),
    s("flistxattr",           [       234,        196, 1073742020,         13,        217,        232]),
    s("flock",                [       143,         73, 1073741897,         32,        143,        143]),
    s("fork",                 [         2,         57, 1073741881,     -10035,          2,          2]),
    s("fremovexattr",         [       237,        199, 1073742023,         16,        220,        235]),
    s("fsconfig",             [       431,        431, 1073742255,        431,        431,        431]),
    s("fsetxattr",            [       228,        190, 1073742014,          7,        211,        226]),
    s("fsmount",              [       432,        432, 1073742256,        432,        432,        432]),
    s("fsopen",               [       430,        430, 1073742254,        430,        430,        430]),
    s("fspick",               [       433,        433, 1073742257,        433,        433,        433]),
    s("fstat",                [       108,          5, 1073741829,         80,        108,        108]),
    s("fstat64",              [       197,     -10036,     -10036,     -10036,     -10036,     -10036]),
    s("fstatat64",            [       300,     -10037,     -10037,     -10037,     -10037,     -10037]),
    s("fstatfs",              [       100,        138, 1073741962,         44,        100,        100]),
    s("fstatfs64",            [       269,     -10038,     -10038,     -10038,        253,        266]),
    s("fsync",                [       118,         74, 1073741898,         82,        118,        118]),
    s("ftime",                [        35,     -10039,     -10039,     -10039,         35,     -10039]),
    s("ftruncate",            [        93,         77, 1073741901,         46,         93,         93]),
    s("ftruncate64",          [       194,     -10040,     -10040,     -10040,     -10040,     -10040]),
    s("futex",                [       240,        202, 1073742026,         98,        221,        238]),
    s("futex_time64",         [       422,     -10041,     -10041,     -10041,     -10041,     -10041]),
    s("futimesat",            [       299,        261, 1073742085,     -10042,        290,        292]),
    s("get_kernel_syms",      [       130,        177,     -10043,     -10043,        130,        130]),
    s("get_mempolicy",        [       275,        239, 1073742063,        236,        260,        269]),
    s("get_robust_list",      [       312,        274, 1073742355,        100,        299,        305]),
    s("get_thread_area",      [       244,        211,     -10044,     -10044,     -10044,     -10044]),
    s("get_tls",              [    -10045,     -10045,     -10045,     -10045,     -10045,     -10045]),
    s("getcpu",               [       318,        309, 1073742133,        168,        302,        311]),
    s("getcwd",               [       183,         79, 1073741903,         17,        182,        183]),
    s("getdents",             [       141,         78, 1073741902,     -10046,        141,        141]),
    s("getdents64",           [       220,        217, 1073742041,         61,        202,        220]),
    s("getegid",              [        50,        108, 1073741932,        177,         50,        202]),
    s("getegid32",            [       202,     -10047,     -10047,     -10047,     -10047,     -10047]),
    s("geteuid",              [        49,        107, 1073741931,        175,         49,        201]),
    s("geteuid32",            [       201,     -10048,     -10048,     -10048,     -10048,     -10048]),
    s("getgid",               [        47,        104, 1073741928,        176,         47,        200]),
    s("getgid32",             [       200,     -10049,     -10049,     -10049,     -10049,     -10049]),
    s("getgroups",            [        80,        115, 1073741939,        158,         80,        205]),
    s("getgroups32",          [       205,     -10050,     -10050,     -10050,     -10050,     -10050]),
    s("getitimer",            [       105,         36, 1073741860,        102,        105,        105]),
    s("getpeername",          [       368,         52, 1073741876,        205,        332,        368]),
    s("getpgid",              [       132,        121, 1073741945,        155,        132,        132]),
    s("getpgrp",              [        65,        111, 1073741935,     -10051,         65,         65]),
    s("getpid",               [        20,         39, 1073741863,        172,         20,         20]),
    s("getpmsg",              [       188,        181, 1073742005,     -10052,        187,        188]),
    s("getppid",              [        64,        110, 1073741934,        173,         64,         64]),
    s("getpriority",          [        96,        140, 1073741964,        141,         96,         96]),
    s("getrandom",            [       355,        318, 1073742142,        278,        359,        349]),
    s("getresgid",            [       171,        120, 1073741944,        150,        170,        211]),
    s("getresgid32",          [       211,     -10053,     -10053,     -10053,     -10053,     -10053]),
    s("getresuid",            [       165,        118, 1073741942,        148,        165,        209]),
    s("getresuid32",          [       209,     -10054,     -10054,     -10054,     -10054,     -10054]),
    s("getrlimit",            [        76,         97, 1073741921,     -10055,         76,        191]),
    s("getrusage",            [        77,         98, 1073741922,        165,         77,         77]),
    s("getsid",               [       147,        124, 1073741948,        156,        147,        147]),
    s("getsockname",          [       367,         51, 1073741875,        204,        331,        367]),
    s("getsockopt",           [       365,         55, 1073742366,        209,        340,        365]),
    s("gettid",               [       224,        186, 1073742010,        178,        207,        236]),
    s("gettimeofday",         [        78,         96, 1073741920,        169,         78,         78]),
    s("getuid",               [        24,        102, 1073741926,        174,         24,        199]),
    s("getuid32",             [       199,     -10056,     -10056,     -10056,     -10056,     -10056]),
    s("getxattr",             [       229,        191, 1073742015,          8,        212,        227]),
    s("gtty",                 [        32,     -10057,     -10057,     -10057,         32,     -10057]),
    s("idle",                 [       112,     -10058,     -10058,     -10058,        112,        112]),
    s("init_module",          [       128,        175, 1073741999,        105,        128,        128]),
    s("inotify_add_watch",    [       292,        254, 1073742078,         27,        276,        285]),
    s("inotify_init",         [       291,        253, 1073742077,     -10059,        275,        284]),
    s("inotify_init1",        [       332,        294, 1073742118,         26,        318,        324]),
    s("inotify_rm_watch",     [       293,        255, 1073742079,         28,        277,        286]),
    s("io_cancel",            [       249,        210, 1073742034,          3,        231,        247]),
    s("io_destroy",           [       246,        207, 1073742031,          1,        228,        244]),
    s("io_getevents",         [       247,        208, 1073742032,          4,        229,        245]),
    s("io_pgetevents",        [       385,        333, 1073742157,        292,        388,        382]),
    s("io_pgetevents_time64", [       416,     -10060,     -10060,     -10060,     -10060,     -10060]),
    s("io_setup",             [       245,        206, 1073742367,          0,        227,        243]),
    s("io_submit",            [       248,        209, 1073742368,          2,        230,        246]),
    s("io_uring_enter",       [       426,        426, 1073742250,        426,        426,        426]),
    s("io_uring_register",    [       427,        427, 1073742251,        427,        427,        427]),
    s("io_uring_setup",       [       425,        425, 1073742249,        425,        425,        425]),
    s("ioctl",                [        54,         16, 1073742338,         29,         54,         54]),
    s("ioperm",               [       101,        173, 1073741997,     -10061,        101,     -10061]),
    s("iopl",                 [       110,        172, 1073741996,     -10062,        110,     -10062]),
    s("ioprio_get",           [       290,        252, 1073742076,         31,        274,        283]),
    s("ioprio_set",           [       289,        251, 1073742075,         30,        273,        282]),
    s("ipc",                  [       117,     -10063,     -10063,     -10063,        117,        117]),
    s("kcmp",                 [       349,        312, 1073742136,        272,        354,        343]),
    s("kexec_file_load",      [    -10064,        320, 1073742144,        294,        382,        381]),
    s("kexec_load",           [       283,        246, 1073742352,        104,        268,        277]),
    s("keyctl",               [       288,        250, 1073742074,        219,        271,        280]),
    s("kill",                 [        37,         62, 1073741886,        129,         37,         37]),
    s("lchown",               [        16,         94, 1073741918,     -10065,         16,        198]),
    s("lchown32",             [       198,     -10066,     -10066,     -10066,     -10066,     -10066]),
    s("lgetxattr",            [       230,        192, 1073742016,          9,        213,        228]),
    s("link",                 [         9,         86, 1073741910,     -10067,          9,          9]),
    s("linkat",               [       303,        265, 1073742089,         37,        294,        296]),
    s("listen",               [       363,         50, 1073741874,        201,        329,        363]),
    s("listxattr",            [       232,        194, 1073742018,         11,        215,        230]),
    s("llistxattr",           [       233,        195, 1073742019,         12,        216,        231]),
    s("lock",                 [        53,     -10068,     -10068,     -10068,         53,     -10068]),
    s("lookup_dcookie",       [       253,        212, 1073742036,         18,        235,        110]),
    s("lremovexattr",         [       236,        198, 1073742022,         15,        219,        234]),
    s("lseek",                [        19,          8, 1073741832,         62,         19,         19]),
    s("lsetxattr",            [       227,        189, 1073742013,          6,        210,        225]),
    s("lstat",                [       107,          6, 1073741830,     -10069,        107,        107]),
    s("lstat64",              [       196,     -10070,     -10070,     -10070,     -10070,     -10070]),
    s("madvise",              [       219,         28, 1073741852,        233,        205,        219]),
    s("mbind",                [       274,        237, 1073742061,        235,        259,        268]),
    s("membarrier",           [       375,        324, 1073742148,        283,        365,        356]),
    s("memfd_create",         [       356,        319, 1073742143,        279,        360,        350]),
    s("migrate_pages",        [       294,        256, 1073742080,        238,        258,        287]),
    s("mincore",              [       218,         27, 1073741851,        232,        206,        218]),
    s("mkdir",                [        39,         83, 1073741907,     -10071,         39,         39]),
    s("mkdirat",              [       296,        258, 1073742082,         34,        287,        289]),
    s("mknod",                [        14,        133, 1073741957,     -10072,         14,         14]),
    s("mknodat",              [       297,        259, 1073742083,         33,        288,        290]),
    s("mlock",                [       150,        149, 1073741973,        228,        150,        150]),
    s("mlock2",               [       376,        325, 1073742149,        284,        378,        374]),
    s("mlockall",             [       152,        151, 1073741975,        230,        152,        152]),
    s("mmap",                 [        90,          9, 1073741833,        222,         90,         90]),
    s("mmap2",                [       192,     -10073,     -10073,     -10073,     -10073,     -10073]),
    s("modify_ldt",           [       123,        154, 1073741978,     -10074,        123,     -10074]),
    s("mount",                [        21,        165, 1073741989,         40,         21,         21]),
    s("move_mount",           [       429,        429, 1073742253,        429,        429,        429]),
    s("move_pages",           [       317,        279, 1073742357,        239,        301,        310]),
    s("mprotect",             [       125,         10, 1073741834,        226,        125,        125]),
    s("mpx",                  [        56,     -10075,     -10075,     -10075,         56,     -10075]),
    s("mq_getsetattr",        [       282,        245, 1073742069,        185,        267,        276]),
    s("mq_notify",            [       281,        244, 1073742351,        184,        266,        275]),
    s("mq_open",              [       277,        240, 1073742064,        180,        262,        271]),
    s("mq_timedreceive",      [       280,        243, 1073742067,        183,        265,        274]),
    s("mq_timedreceive_time64",[       419,     -10076,     -10076,     -10076,     -10076,     -10076]),
    s("mq_timedsend",         [       279,        242, 1073742066,        182,        264,        273]),
    s("mq_timedsend_time64",  [       418,     -10077,     -10077,     -10077,     -10077,     -10077]),
    s("mq_unlink",            [       278,        241, 1073742065,        181,        263,        272]),
    s("mremap",               [       163,         25, 1073741849,        216,        163,        163]),
    s("msgctl",               [       402,         71, 1073741895,        187,        402,        402]),
    s("msgget",               [       399,         68, 1073741892,        186,        399,        399]),
    s("msgrcv",               [       401,         70, 1073741894,        188,        401,        401]),
    s("msgsnd",               [       400,         69, 1073741893,        189,        400,        400]),
    s("msync",                [       144,         26, 1073741850,        227,        144,        144]),
    s("multiplexer",          [    -10078,     -10078,     -10078,     -10078,        201,     -10078]),
    s("munlock",              [       151,        150, 1073741974,        229,        151,        151]),
    s("munlockall",           [       153,        152, 1073741976,        231,        153,        153]),
    s("munmap",               [        91,         11, 1073741835,        215,         91,         91]),
    s("name_to_handle_at",    [       341,        303, 1073742127,        264,        345,        335]),
    s("nanosleep",            [       162,         35, 1073741859,        101,        162,        162]),
    s("newfstatat",           [    -10079,        262, 1073742086,         79,        291,        293]),
    s("nfsservctl",           [       169,        180,     -10080,         42,        168,        169]),
    s("nice",                 [        34,     -10081,     -10081,     -10081,         34,         34]),
    s("oldfstat",             [        28,     -10082,     -10082,     -10082,         28,     -10082]),
    s("oldlstat",             [        84,     -10083,     -10083,     -10083,         84,     -10083]),
    s("oldolduname",          [        59,     -10084,     -10084,     -10084,         59,     -10084]),
    s("oldstat",              [        18,     -10085,     -10085,     -10085,         18,     -10085]),
    s("olduname",             [       109,     -10086,     -10086,     -10086,        109,     -10086]),
    s("oldwait4",             [    -10087,     -10087,     -10087,     -10087,     -10087,     -10087]),
    s("open",                 [         5,          2, 1073741826,     -10088,          5,          5]),
    s("open_by_handle_at",    [       342,        304, 1073742128,        265,        346,        336]),
    s("open_tree",            [       428,        428, 1073742252,        428,        428,        428]),
    s("openat",               [       295,        257, 1073742081,         56,        286,        288]),
    s("openat2",              [       437,        437, 1073742261,        437,        437,        437]),
    s("pause",                [        29,         34, 1073741858,     -10089,         29,         29]),
    s("pciconfig_iobase",     [    -10090,     -10090,     -10090,     -10090,        200,     -10090]),
    s("pciconfig_read",       [    -10091,     -10091,     -10091,     -10091,        198,     -10091]),
    s("pciconfig_write",      [    -10092,     -10092,     -10092,     -10092,        199,     -10092]),
    s("perf_event_open",      [       336,        298, 1073742122,        241,        319,        331]),
    s("personality",          [       136,        135, 1073741959,         92,        136,        136]),
    s("pidfd_open",           [       434,        434, 1073742258,        434,        434,        434]),
    s("pidfd_send_signal",    [       424,        424, 1073742248,        424,        424,        424]),
    s("pipe",                 [        42,         22, 1073741846,     -10093,         42,         42]),
    s("pipe2",                [       331,        293, 1073742117,         59,        317,        325]),
    s("pivot_root",           [       217,        155, 1073741979,         41,        203,        217]),
    s("pkey_alloc",           [       381,        330, 1073742154,        289,        384,        385]),
    s("pkey_free",            [       382,        331, 1073742155,        290,        385,        386]),
    s("pkey_mprotect",        [       380,        329, 1073742153,        288,        386,        384]),
    s("poll",                 [       168,          7, 1073741831,     -10094,        167,        168]),
    s("ppoll",                [       309,        271, 1073742095,         73,        281,        302]),
    s("ppoll_time64",         [       414,     -10095,     -10095,     -10095,     -10095,     -10095]),
    s("prctl",                [       172,        157, 1073741981,        167,        171,        172]),
    s("pread64",              [       180,         17, 1073741841,         67,        179,        180]),
    s("preadv",               [       333,        295, 1073742358,         69,        320,        328]),
    s("preadv2",              [       378,        327, 1073742370,        286,        380,        376]),
    s("prlimit64",            [       340,        302, 1073742126,        261,        325,        334]),
    s("process_vm_readv",     [       347,        310, 1073742363,        270,        351,        340]),
    s("process_vm_writev",    [       348,        311, 1073742364,        271,        352,        341]),
    s("prof",                 [        44,     -10096,     -10096,     -10096,         44,     -10096]),
    s("profil",               [        98,     -10097,     -10097,     -10097,         98,     -10097]),
    s("pselect6",             [       308,        270, 1073742094,         72,        280,        301]),
    s("pselect6_time64",      [       413,     -10098,     -10098,     -10098,     -10098,     -10098]),
    s("ptrace",               [        26,        101, 1073742345,        117,         26,         26]),
    s("putpmsg",              [       189,        182, 1073742006,     -10099,        188,        189]),
    s("pwrite64",             [       181,         18, 1073741842,         68,        180,        181]),
    s("pwritev",              [       334,        296, 1073742359,         70,        321,        329]),
    s("pwritev2",             [       379,        328, 1073742371,        287,        381,        377]),
    s("query_module",         [       167,        178,     -10100,     -10100,        166,        167]),
    s("quotactl",             [       131,        179, 1073742003,         60,        131,        131]),
    s("read",                 [         3,          0, 1073741824,         63,          3,          3]),
    s("readahead",            [       225,        187, 1073742011,        213,        191,        222]),
    s("readdir",              [        89,     -10101,     -10101,     -10101,         89,         89]),
    s("readlink",             [        85,         89, 1073741913,     -10102,         85,         85]),
    s("readlinkat",           [       305,        267, 1073742091,         78,        296,        298]),
    s("readv",                [       145,         19, 1073742339,         65,        145,        145]),
    s("reboot",               [        88,        169, 1073741993,        142,         88,         88]),
    s("recv",                 [      -110,       -110,       -110,       -110,        336,       -110]),
    s("recvfrom",             [       371,         45, 1073742341,        207,        337,        371]),
    s("recvmmsg",             [       337,        299, 1073742361,        243,        343,        357]),
    s("recvmmsg_time64",      [       417,     -10103,     -10103,     -10103,     -10103,     -10103]),
    s("recvmsg",              [       372,         47, 1073742343,        212,        342,        372]),
    s("remap_file_pages",     [       257,        216, 1073742040,        234,        239,        267]),
    s("removexattr",          [       235,        197, 1073742021,         14,        218,        233]),
    s("rename",               [        38,         82, 1073741906,     -10104,         38,         38]),
    s("renameat",             [       302,        264, 1073742088,         38,        293,        295]),
    s("renameat2",            [       353,        316, 1073742140,        276,        357,        347]),
    s("request_key",          [       287,        249, 1073742073,        218,        270,        279]),
    s("restart_syscall",      [         0,        219, 1073742043,        128,          0,          7]),
    s("rmdir",                [        40,         84, 1073741908,     -10105,         40,         40]),
    s("rseq",                 [       386,        334, 1073742158,        293,        387,        383]),
    s("rt_sigaction",         [       174,         13, 1073742336,        134,        173,        174]),
    s("rt_sigpending",        [       176,        127, 1073742346,        136,        175,        176]),
    s("rt_sigprocmask",       [       175,         14, 1073741838,        135,        174,        175]),
    s("rt_sigqueueinfo",      [       178,        129, 1073742348,        138,        177,        178]),
    s("rt_sigreturn",         [       173,         15, 1073742337,        139,        172,        173]),
    s("rt_sigsuspend",        [       179,        130, 1073741954,        133,        178,        179]),
    s("rt_sigtimedwait",      [       177,        128, 1073742347,        137,        176,        177]),
    s("rt_sigtimedwait_time64",[       421,     -10106,     -10106,     -10106,     -10106,     -10106]),
    s("rt_tgsigqueueinfo",    [       335,        297, 1073742360,        240,        322,        330]),
    s("rtas",                 [    -10107,     -10107,     -10107,     -10107,        255,     -10107]),
    s("s390_guarded_storage", [    -10108,     -10108,     -10108,     -10108,     -10108,        378]),
    s("s390_pci_mmio_read",   [    -10109,     -10109,     -10109,     -10109,     -10109,        353]),
    s("s390_pci_mmio_write",  [    -10110,     -10110,     -10110,     -10110,     -10110,        352]),
    s("s390_runtime_instr",   [    -10111,     -10111,     -10111,     -10111,     -10111,        342]),
    s("s390_sthyi",           [    -10112,     -10112,     -10112,     -10112,     -10112,        380]),
    s("sched_get_priority_max",[       159,        146, 1073741970,        125,        159,        159]),
    s("sched_get_priority_min",[       160,        147, 1073741971,        126,        160,        160]),
    s("sched_getaffinity",    [       242,        204, 1073742028,        123,        223,        240]),
    s("sched_getattr",        [       352,        315, 1073742139,        275,        356,        346]),
    s("sched_getparam",       [       155,        143, 1073741967,        121,        155,        155]),
    s("sched_getscheduler",   [       157,        145, 1073741969,        120,        157,        157]),
    s("sched_rr_get_interval",[       161,        148, 1073741972,        127,        161,        161]),
    s("sched_rr_get_interval_time64",[       423,     -10113,     -10113,     -10113,     -10113,     -10113]),
    s("sched_setaffinity",    [       241,        203, 1073742027,        122,        222,        239]),
    s("sched_setattr",        [       351,        314, 1073742138,        274,        355,        345]),
    s("sched_setparam",       [       154,        142, 1073741966,        118,        154,        154]),
    s("sched_setscheduler",   [       156,        144, 1073741968,        119,        156,        156]),
    s("sched_yield",          [       158,         24, 1073741848,        124,        158,        158]),
    s("seccomp",              [       354,        317, 1073742141,        277,        358,        348]),
    s("security",             [    -10114,        185, 1073742009,     -10114,     -10114,     -10114]),
    s("select",               [        82,         23, 1073741847,     -10115,         82,        142]),
    s("semctl",               [       394,         66, 1073741890,        191,        394,        394]),
    s("semget",               [       393,         64, 1073741888,        190,        393,        393]),
    s("semop",                [      -201,         65, 1073741889,        193,       -201,       -201]),
    s("semtimedop",           [      -204,        220, 1073742044,        192,        392,        392]),
    s("semtimedop_time64",    [       420,     -10116,     -10116,     -10116,     -10116,     -10116]),
    s("send",                 [      -109,       -109,       -109,       -109,        334,       -109]),
    s("sendfile",             [       187,         40, 1073741864,         71,        186,        187]),
    s("sendfile64",           [       239,     -10117,     -10117,     -10117,     -10117,     -10117]),
    s("sendmmsg",             [       345,        307, 1073742362,        269,        349,        358]),
    s("sendmsg",              [       370,         46, 1073742342,        211,        341,        370]),
    s("sendto",               [       369,         44, 1073741868,        206,        335,        369]),
    s("set_mempolicy",        [       276,        238, 1073742062,        237,        261,        270]),
    s("set_robust_list",      [       311,        273, 1073742354,         99,        300,        304]),
    s("set_thread_area",      [       243,        205,     -10118,     -10118,     -10118,     -10118]),
    s("set_tid_address",      [       258,        218, 1073742042,         96,        232,        252]),
    s("set_tls",              [    -10119,     -10119,     -10119,     -10119,     -10119,     -10119]),
    s("setdomainname",        [       121,        171, 1073741995,        162,        121,        121]),
    s("setfsgid",             [       139,        123, 1073741947,        152,        139,        216]),
    s("setfsgid32",           [       216,     -10120,     -10120,     -10120,     -10120,     -10120]),
    s("setfsuid",             [       138,        122, 1073741946,        151,        138,        215]),
    s("setfsuid32",           [       215,     -10121,     -10121,     -10121,     -10121,     -10121]),
    s("setgid",               [        46,        106, 1073741930,        144,         46,        214]),
    s("setgid32",             [       214,     -10122,     -10122,     -10122,     -10122,     -10122]),
    s("setgroups",            [        81,        116, 1073741940,        159,         81,        206]),
    s("setgroups32",          [       206,     -10123,     -10123,     -10123,     -10123,     -10123]),
    s("sethostname",          [        74,        170, 1073741994,        161,         74,         74]),
    s("setitimer",            [       104,         38, 1073741862,        103,        104,        104]),
    s("setns",                [       346,        308, 1073742132,        268,        350,        339]),
    s("setpgid",              [        57,        109, 1073741933,        154,         57,         57]),
    s("setpriority",          [        97,        141, 1073741965,        140,         97,         97]),
    s("setregid",             [        71,        114, 1073741938,        143,         71,        204]),
    s("setregid32",           [       204,     -10124,     -10124,     -10124,     -10124,     -10124]),
    s("setresgid",            [       170,        119, 1073741943,        149,        169,        210]),
    s("setresgid32",          [       210,     -10125,     -10125,     -10125,     -10125,     -10125]),
    s("setresuid",            [       164,        117, 1073741941,        147,        164,        208]),
    s("setresuid32",          [       208,     -10126,     -10126,     -10126,     -10126,     -10126]),
    s("setreuid",             [        70,        113, 1073741937,        145,         70,        203]),
    s("setreuid32",           [       203,     -10127,     -10127,     -10127,     -10127,     -10127]),
    s("setrlimit",            [        75,        160, 1073741984,     -10128,         75,         75]),
    s("setsid",               [        66,        112, 1073741936,        157,         66,         66]),
    s("setsockopt",           [       366,         54, 1073742365,        208,        339,        366]),
    s("settimeofday",         [        79,        164, 1073741988,        170,         79,         79]),
    s("setuid",               [        23,        105, 1073741929,        146,         23,        213]),
    s("setuid32",             [       213,     -10129,     -10129,     -10129,     -10129,     -10129]),
    s("setxattr",             [       226,        188, 1073742012,          5,        209,        224]),
    s("sgetmask",             [        68,     -10130,     -10130,     -10130,         68,     -10130]),
    s("shmat",                [       397,         30, 1073741854,        196,        397,        397]),
    s("shmctl",               [       396,         31, 1073741855,        195,        396,        396]),
    s("shmdt",                [       398,         67, 1073741891,        197,        398,        398]),
    s("shmget",               [       395,         29, 1073741853,        194,        395,        395]),
    s("shutdown",             [       373,         48, 1073741872,        210,        338,        373]),
    s("sigaction",            [        67,     -10131,     -10131,     -10131,         67,         67]),
    s("sigaltstack",          [       186,        131, 1073742349,        132,        185,        186]),
    s("signal",               [        48,     -10132,     -10132,     -10132,         48,         48]),
    s("signalfd",             [       321,        282, 1073742106,     -10133,        305,        316]),
    s("signalfd4",            [       327,        289, 1073742113,         74,        313,        322]),
    s("sigpending",           [        73,     -10134,     -10134,     -10134,         73,         73]),
    s("sigprocmask",          [       126,     -10135,     -10135,     -10135,        126,        126]),
    s("sigreturn",            [       119,     -10136,     -10136,     -10136,        119,        119]),
    s("sigsuspend",           [        72,     -10137,     -10137,     -10137,         72,         72]),
    s("socket",               [       359,         41, 1073741865,        198,        326,        359]),
    s("socketcall",           [       102,     -10138,     -10138,     -10138,        102,        102]),
    s("socketpair",           [       360,         53, 1073741877,        199,        333,        360]),
    s("splice",               [       313,        275, 1073742099,         76,        283,        306]),
    s("spu_create",           [    -10139,     -10139,     -10139,     -10139,        279,     -10139]),
    s("spu_run",              [    -10140,     -10140,     -10140,     -10140,        278,     -10140]),
    s("ssetmask",             [        69,     -10141,     -10141,     -10141,         69,     -10141]),
    s("stat",                 [       106,          4, 1073741828,     -10142,        106,        106]),
    s("stat64",               [       195,     -10143,     -10143,     -10143,     -10143,     -10143]),
    s("statfs",               [        99,        137, 1073741961,         43,         99,         99]),
    s("statfs64",             [       268,     -10144,     -10144,     -10144,        252,        265]),
    s("statx",                [       383,        332, 1073742156,        291,        383,        379]),
    s("stime",                [        25,     -10145,     -10145,     -10145,         25,     -10145]),
    s("stty",                 [        31,     -10146,     -10146,     -10146,         31,     -10146]),
    s("subpage_prot",         [    -10147,     -10147,     -10147,     -10147,        310,     -10147]),
    s("swapcontext",          [    -10148,     -10148,     -10148,     -10148,        249,     -10148]),
    s("swapoff",              [       115,        168, 1073741992,        225,        115,        115]),
    s("swapon",               [        87,        167, 1073741991,        224,         87,         87]),
    s("switch_endian",        [    -10149,     -10149,     -10149,     -10149,        363,     -10149]),
    s("symlink",              [        83,         88, 1073741912,     -10150,         83,         83]),
    s("symlinkat",            [       304,        266, 1073742090,         36,        295,        297]),
    s("sync",                 [        36,        162, 1073741986,         81,         36,         36]),
    s("sync_file_range",      [       314,        277, 1073742101,         84,     -10151,        307]),
    s("sync_file_range2",     [    -10152,     -10152,     -10152,     -10152,        308,     -10152]),
    s("syncfs",               [       344,        306, 1073742130,        267,        348,        338]),
    s("sys_debug_setcontext", [    -10153,     -10153,     -10153,     -10153,        256,     -10153]),
    s("syscall",              [    -10154,     -10154,     -10154,     -10154,     -10154,     -10154]),
    s("sysfs",                [       135,        139, 1073741963,     -10155,        135,        135]),
    s("sysinfo",              [       116,         99, 1073741923,        179,        116,        116]),
    s("syslog",               [       103,        103, 1073741927,        116,        103,        103]),
    s("sysmips",              [    -10156,     -10156,     -10156,     -10156,     -10156,     -10156]),
    s("tee",                  [       315,        276, 1073742100,         77,        284,        308]),
    s("tgkill",               [       270,        234, 1073742058,        131,        250,        241]),
    s("time",                 [        13,        201, 1073742025,     -10157,         13,     -10157]),
    s("timer_create",         [       259,        222, 1073742350,        107,        240,        254]),
    s("timer_delete",         [       263,        226, 1073742050,        111,        244,        258]),
    s("timer_getoverrun",     [       262,        225, 1073742049,        109,        243,        257]),
    s("timer_gettime",        [       261,        224, 1073742048,        108,        242,        256]),
    s("timer_gettime64",      [       408,     -10158,     -10158,     -10158,     -10158,     -10158]),
    s("timer_settime",        [       260,        223, 1073742047,        110,        241,        255]),
    s("timer_settime64",      [       409,     -10159,     -10159,     -10159,     -10159,     -10159]),
    s("timerfd",              [    -10160,     -10160,     -10160,     -10160,     -10160,        317]),
    s("timerfd_create",       [       322,        283, 1073742107,         85,        306,        319]),
    s("timerfd_gettime",      [       326,        287, 1073742111,         87,        312,        321]),
    s("timerfd_gettime64",    [       410,     -10161,     -10161,     -10161,     -10161,     -10161]),
    s("timerfd_settime",      [       325,        286, 1073742110,         86,        311,        320]),
    s("timerfd_settime64",    [       411,     -10162,     -10162,     -10162,     -10162,     -10162]),
    s("times",                [        43,        100, 1073741924,        153,         43,         43]),
    s("tkill",                [       238,        200, 1073742024,        130,        208,        237]),
    s("truncate",             [        92,         76, 1073741900,         45,         92,         92]),
    s("truncate64",           [       193,     -10163,     -10163,     -10163,     -10163,     -10163]),
    s("tuxcall",              [    -10164,        184, 1073742008,     -10164,        225,     -10164]),
    s("ugetrlimit",           [       191,     -10165,     -10165,     -10165,        190,     -10165]),
    s("ulimit",               [        58,     -10166,     -10166,     -10166,         58,     -10166]),
    s("umask",                [        60,         95, 1073741919,        166,         60,         60]),
    s("umount",               [        22,     -10167,     -10167,     -10167,         22,         22]),
    s("umount2",              [        52,        166, 1073741990,         39,         52,         52]),
    s("uname",                [       122,         63, 1073741887,        160,        122,        122]),
    s("unlink",               [        10,         87, 1073741911,     -10168,         10,         10]),
    s("unlinkat",             [       301,        263, 1073742087,         35,        292,        294]),
    s("unshare",              [       310,        272, 1073742096,         97,        282,        303]),
    s("uselib",               [        86,        134,     -10169,     -10169,         86,         86]),
    s("userfaultfd",          [       374,        323, 1073742147,        282,        364,        355]),
    s("usr26",                [    -10170,     -10170,     -10170,     -10170,     -10170,     -10170]),
    s("usr32",                [    -10171,     -10171,     -10171,     -10171,     -10171,     -10171]),
    s("ustat",                [        62,        136, 1073741960,     -10172,         62,         62]),
    s("utime",                [        30,        132, 1073741956,     -10173,         30,         30]),
    s("utimensat",            [       320,        280, 1073742104,         88,        304,        315]),
    s("utimensat_time64",     [       412,     -10174,     -10174,     -10174,     -10174,     -10174]),
    s("utimes",               [       271,        235, 1073742059,     -10175,        251,        313]),
    s("vfork",                [       190,         58, 1073741882,     -10176,        189,        190]),
    s("vhangup",              [       111,        153, 1073741977,         58,        111,        111]),
    s("vm86",                 [       166,     -10177,     -10177,     -10177,        113,     -10177]),
    s("vm86old",              [       113,     -10178,     -10178,     -10178,     -10178,     -10178]),
    s("vmsplice",             [       316,        278, 1073742356,         75,        285,        309]),
    s("vserver",              [       273,        236,     -10179,     -10179,     -10179,     -10179]),
    s("wait4",                [       114,         61, 1073741885,        260,        114,        114]),
    s("waitid",               [       284,        247, 1073742353,         95,        272,        281]),
    s("waitpid",              [         7,     -10180,     -10180,     -10180,          7,     -10180]),
    s("write",                [         4,          1, 1073741825,         64,          4,          4]),
    s("writev",               [       146,         20, 1073742340,         66,        146,        146]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sorted_by_name() {
        for pair in SYSCALL_TABLE.windows(2) {
            assert!(
                pair[0].name < pair[1].name,
                "{} sorts after {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_no_duplicate_numbers_per_column() {
        for column in 0..COLUMNS {
            let mut seen = HashSet::new();
            for def in SYSCALL_TABLE {
                let num = def.nums[column];
                if num >= 0 {
                    assert!(
                        seen.insert(num),
                        "column {} lists {} twice",
                        column,
                        num
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_name() {
        assert_eq!(lookup_name("read").unwrap().nums[COL_X86_64], 0);
        assert_eq!(lookup_name("write").unwrap().nums[COL_AARCH64], 64);
        assert!(lookup_name("nope").is_none());
    }

    #[test]
    fn test_lookup_num() {
        assert_eq!(lookup_num(COL_X86_64, 59), Some("execve"));
        assert_eq!(lookup_num(COL_X86, 11), Some("execve"));
        assert_eq!(lookup_num(COL_X86_64, 100_000), None);
    }

    #[test]
    fn test_spot_checks() {
        // one well-known row per column
        let brk = lookup_name("brk").unwrap();
        assert_eq!(brk.nums, [45, 12, 0x4000_0000 + 12, 214, 45, 45]);

        // x32 numbers carry the dedicated syscall bit
        let read = lookup_name("read").unwrap();
        assert_eq!(read.nums[COL_X32], 0x4000_0000);

        // the s390x column keeps the real socket number; the resolver is
        // what rewrites it
        assert_eq!(lookup_name("socket").unwrap().nums[COL_S390X], 359);
        assert_eq!(lookup_name("socketcall").unwrap().nums[COL_S390X], 102);
    }

    #[test]
    fn test_pseudo_cells_agree_with_namespace() {
        for def in SYSCALL_TABLE {
            for &num in def.nums.iter() {
                if num < 0 {
                    assert_eq!(
                        super::super::pseudo::pseudo_name(num),
                        Some(def.name),
                        "{} carries a foreign pseudo-number",
                        def.name
                    );
                }
            }
        }
    }
}
