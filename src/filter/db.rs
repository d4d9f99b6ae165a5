//! The filter database: default action, target architectures and the
//! per-(architecture, syscall) rule chains, plus the insertion-time policy
//! engine (merging, subsumption, conflict detection, atomicity).

use std::collections::BTreeMap;
use std::io::Write;

use crate::action::Action;
use crate::arch::Arch;
use crate::bpf::gen;
use crate::error::{Error, Result};
use crate::pfc;

use super::compare::{implies, ArgCmp};

/// One conjunction of argument predicates and the action it selects.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rule {
    pub(crate) action: Action,
    pub(crate) cmps: Vec<ArgCmp>,
}

impl Rule {
    #[cfg(test)]
    pub(crate) fn matches(&self, args: &[u64; 6]) -> bool {
        self.cmps.iter().all(|cmp| cmp.matches(args))
    }
}

/// Everything attached to one syscall number on one architecture: a
/// dispatch priority and an ordered disjunction of rules (first match
/// wins).
#[derive(Debug, Clone, Default)]
pub(crate) struct RuleChain {
    pub(crate) priority: u8,
    pub(crate) rules: Vec<Rule>,
}

/// The per-architecture slice of the database, keyed by syscall number.
#[derive(Debug, Clone)]
pub(crate) struct ArchFilter {
    pub(crate) arch: Arch,
    pub(crate) chains: BTreeMap<u32, RuleChain>,
}

impl ArchFilter {
    fn new(arch: Arch) -> ArchFilter {
        ArchFilter {
            arch,
            chains: BTreeMap::new(),
        }
    }
}

/// How a rule names its syscall.
enum SyscallRef<'a> {
    Name(&'a str),
    Nr(i32),
}

impl<'a> std::fmt::Display for SyscallRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyscallRef::Name(name) => write!(f, "{}", name),
            SyscallRef::Nr(nr) => write!(f, "#{}", nr),
        }
    }
}

/// A seccomp filter under construction.
///
/// A filter owns a default action, an ordered list of target architectures
/// (the first one added is the *primary*) and the rules attached to each.
/// It is a plain single-threaded builder: mutate it with the policy
/// operations, then export BPF or PFC, which never alters the database.
///
/// ```
/// use seccomp::{Action, Arch, Filter};
///
/// let mut filter = Filter::new(Action::KillThread);
/// filter.add_arch(Arch::X8664)?;
/// filter.rule_add(Action::Allow, "read", &[])?;
/// let mut program = Vec::new();
/// filter.export_bpf(&mut program)?;
/// # Ok::<(), seccomp::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    pub(crate) default_action: Action,
    pub(crate) bad_arch_action: Action,
    pub(crate) arches: Vec<ArchFilter>,
}

impl Filter {
    /// Create an empty filter with the given default action. At least one
    /// architecture must be added before rules or exports make sense.
    pub fn new(default_action: Action) -> Filter {
        log::debug!("new filter, default action {}", default_action);
        Filter {
            default_action,
            bad_arch_action: Action::KillThread,
            arches: Vec::new(),
        }
    }

    /// Drop every rule and priority hint and install a new default action.
    /// The configured architectures survive a reset.
    pub fn reset(&mut self, default_action: Action) {
        log::debug!("filter reset, default action {}", default_action);
        self.default_action = default_action;
        self.bad_arch_action = Action::KillThread;
        for arch_filter in self.arches.iter_mut() {
            arch_filter.chains.clear();
        }
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    /// The action returned when the record's architecture matches no
    /// configured target. Defaults to killing the thread.
    pub fn bad_arch_action(&self) -> Action {
        self.bad_arch_action
    }

    pub fn set_bad_arch_action(&mut self, action: Action) {
        self.bad_arch_action = action;
    }

    /// Add a compilation target. The first architecture added becomes the
    /// primary one: raw syscall numbers are interpreted against it and a
    /// serialized program takes its byte order.
    pub fn add_arch(&mut self, arch: Arch) -> Result<()> {
        if arch.table_column().is_none() {
            return Err(Error::Usage(format!(
                "{} has no syscall table and cannot be a filter target",
                arch
            )));
        }
        if self.arches.iter().any(|af| af.arch == arch) {
            return Err(Error::Usage(format!("{} is already a filter target", arch)));
        }
        log::debug!("adding architecture {}", arch);
        self.arches.push(ArchFilter::new(arch));
        Ok(())
    }

    /// Remove a compilation target and all of its rules.
    pub fn remove_arch(&mut self, arch: Arch) -> Result<()> {
        match self.arches.iter().position(|af| af.arch == arch) {
            Some(idx) => {
                log::debug!("removing architecture {}", arch);
                self.arches.remove(idx);
                Ok(())
            }
            None => Err(Error::ArchMismatch(arch)),
        }
    }

    /// The configured architectures, primary first.
    pub fn arches(&self) -> impl Iterator<Item = Arch> + '_ {
        self.arches.iter().map(|af| af.arch)
    }

    /// Add a rule by syscall name, merging it into the existing chain.
    ///
    /// The name is resolved on every configured architecture: where it has
    /// a real number the rule is appended, where it has a pseudo-number the
    /// architecture is silently skipped, and an unresolvable name fails the
    /// whole operation with nothing applied. Overlapping predicate chains
    /// with the same action are merged so the chain stays minimal; an
    /// identical chain with a different action is a conflict.
    pub fn rule_add(&mut self, action: Action, syscall: &str, cmps: &[ArgCmp]) -> Result<()> {
        self.rule_add_inner(action, SyscallRef::Name(syscall), cmps, false)
    }

    /// Like [`Filter::rule_add`] but without any merging: the rule is
    /// appended exactly as given (conflicting duplicates are still
    /// rejected).
    pub fn rule_add_exact(&mut self, action: Action, syscall: &str, cmps: &[ArgCmp]) -> Result<()> {
        self.rule_add_inner(action, SyscallRef::Name(syscall), cmps, true)
    }

    /// Add a rule by syscall number.
    ///
    /// A non-negative number that the primary architecture can name is
    /// translated to every other architecture by name; a number unknown to
    /// the primary is used verbatim everywhere. A negative number is
    /// treated as a pseudo-number handle and translated through the shared
    /// namespace.
    pub fn rule_add_nr(&mut self, action: Action, nr: i32, cmps: &[ArgCmp]) -> Result<()> {
        self.rule_add_inner(action, SyscallRef::Nr(nr), cmps, false)
    }

    /// Like [`Filter::rule_add_nr`] but without any merging.
    pub fn rule_add_nr_exact(&mut self, action: Action, nr: i32, cmps: &[ArgCmp]) -> Result<()> {
        self.rule_add_inner(action, SyscallRef::Nr(nr), cmps, true)
    }

    /// Bias a syscall toward the top of the dispatch tree. A hint only:
    /// it changes the shape of the generated program, never its meaning.
    pub fn set_priority(&mut self, syscall: &str, priority: u8) -> Result<()> {
        self.set_priority_inner(SyscallRef::Name(syscall), priority)
    }

    /// [`Filter::set_priority`] keyed by syscall number.
    pub fn set_priority_nr(&mut self, nr: i32, priority: u8) -> Result<()> {
        self.set_priority_inner(SyscallRef::Nr(nr), priority)
    }

    /// Compile the database and write the BPF program to `sink`.
    /// Compilation is a pure function of the database: exporting twice
    /// yields byte-identical programs.
    pub fn export_bpf(&self, sink: &mut dyn Write) -> Result<()> {
        let program = gen::compile_bytes(self)?;
        sink.write_all(&program)?;
        Ok(())
    }

    /// Render the database as human-readable pseudo filter code.
    pub fn export_pfc(&self, sink: &mut dyn Write) -> Result<()> {
        pfc::render(self, sink)
    }

    fn primary(&self) -> Option<Arch> {
        self.arches.first().map(|af| af.arch)
    }

    /// Resolve a syscall reference on one architecture. `Ok(None)` means
    /// "pseudo here, skip this architecture".
    fn resolve_on(&self, arch: Arch, syscall: &SyscallRef<'_>) -> Result<Option<u32>> {
        match *syscall {
            SyscallRef::Name(name) => match arch.resolve_name(name) {
                None => Err(Error::UnknownSyscall(name.to_string())),
                Some(num) if num < 0 => Ok(None),
                Some(num) => Ok(Some(num as u32)),
            },
            SyscallRef::Nr(nr) => {
                let primary = self
                    .primary()
                    .ok_or_else(|| Error::Internal("resolving against an empty filter"))?;
                let name = if nr < 0 {
                    match primary.resolve_num(nr) {
                        Some(name) => name,
                        None => {
                            return Err(Error::UnknownSyscall(format!("#{}", nr)));
                        }
                    }
                } else {
                    match primary.resolve_num(nr) {
                        // number unknown to the registry: taken verbatim
                        None => return Ok(Some(nr as u32)),
                        Some(name) => name,
                    }
                };
                self.resolve_on(arch, &SyscallRef::Name(name))
            }
        }
    }

    fn rule_add_inner(
        &mut self,
        action: Action,
        syscall: SyscallRef<'_>,
        cmps: &[ArgCmp],
        exact: bool,
    ) -> Result<()> {
        if self.arches.is_empty() {
            return Err(Error::Usage(
                "the filter has no target architectures".to_string(),
            ));
        }

        if action == self.default_action {
            log::debug!(
                "rule on {} matches the default action, nothing to add",
                syscall
            );
            return Ok(());
        }

        let rule = Rule {
            action,
            cmps: cmps.to_vec(),
        };

        // Plan first, commit second: nothing is mutated until every
        // architecture has resolved and passed the conflict checks.
        enum Plan {
            Skip,
            Append { remove: Vec<usize> },
        }

        let mut plans = Vec::with_capacity(self.arches.len());
        for arch_filter in self.arches.iter() {
            let nr = match self.resolve_on(arch_filter.arch, &syscall)? {
                None => {
                    log::debug!(
                        "skipping rule on {} for {}: pseudo syscall",
                        syscall,
                        arch_filter.arch
                    );
                    plans.push((0, Plan::Skip));
                    continue;
                }
                Some(nr) => nr,
            };

            let mut remove = Vec::new();
            let mut plan = None;
            if let Some(chain) = arch_filter.chains.get(&nr) {
                for (idx, existing) in chain.rules.iter().enumerate() {
                    if existing.cmps == rule.cmps {
                        if existing.action != rule.action {
                            return Err(Error::RuleConflict);
                        }
                        plan = Some(Plan::Skip); // duplicate
                        break;
                    }
                    if exact || existing.action != rule.action {
                        continue;
                    }
                    if subsumes(&existing.cmps, &rule.cmps) {
                        // the chain already covers the new rule
                        plan = Some(Plan::Skip);
                        break;
                    }
                    if subsumes(&rule.cmps, &existing.cmps) {
                        // the new rule covers this one; drop the narrower
                        remove.push(idx);
                    }
                }
            }
            plans.push((nr, plan.unwrap_or(Plan::Append { remove })));
        }

        for (arch_filter, (nr, plan)) in self.arches.iter_mut().zip(plans) {
            if let Plan::Append { remove } = plan {
                let chain = arch_filter.chains.entry(nr).or_default();
                for idx in remove.iter().rev() {
                    chain.rules.remove(*idx);
                }
                chain.rules.push(rule.clone());
                log::debug!(
                    "added rule: arch={}, syscall={}, action={}",
                    arch_filter.arch,
                    nr,
                    action
                );
            }
        }

        Ok(())
    }

    fn set_priority_inner(&mut self, syscall: SyscallRef<'_>, priority: u8) -> Result<()> {
        if self.arches.is_empty() {
            return Err(Error::Usage(
                "the filter has no target architectures".to_string(),
            ));
        }

        let mut resolved = Vec::with_capacity(self.arches.len());
        for arch_filter in self.arches.iter() {
            resolved.push(self.resolve_on(arch_filter.arch, &syscall)?);
        }

        for (arch_filter, nr) in self.arches.iter_mut().zip(resolved) {
            if let Some(nr) = nr {
                arch_filter.chains.entry(nr).or_default().priority = priority;
            }
        }

        Ok(())
    }

    /// Straight-line interpretation of the database, used as the oracle the
    /// compiled program is checked against.
    #[cfg(test)]
    pub(crate) fn evaluate(&self, arch: Arch, nr: u32, args: &[u64; 6]) -> Action {
        let arch_filter = match self.arches.iter().find(|af| af.arch == arch) {
            Some(af) => af,
            None => return self.bad_arch_action,
        };
        arch_filter
            .chains
            .get(&nr)
            .and_then(|chain| chain.rules.iter().find(|rule| rule.matches(args)))
            .map(|rule| rule.action)
            .unwrap_or(self.default_action)
    }
}

/// Does every record matched by `narrow` also match `broad`?
///
/// Conservative: only provable containment counts, so unmergeable overlaps
/// are left as separate rules.
fn subsumes(broad: &[ArgCmp], narrow: &[ArgCmp]) -> bool {
    broad.iter().all(|b| {
        narrow
            .iter()
            .any(|n| n.arg() == b.arg() && implies(n.op(), b.op()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CmpOp;

    fn cmp(arg: u8, op: CmpOp) -> ArgCmp {
        ArgCmp::new(arg, op).unwrap()
    }

    fn rules_on(filter: &Filter, arch: Arch, nr: u32) -> usize {
        filter
            .arches
            .iter()
            .find(|af| af.arch == arch)
            .and_then(|af| af.chains.get(&nr))
            .map(|chain| chain.rules.len())
            .unwrap_or(0)
    }

    fn x86_64_filter(default: Action) -> Filter {
        let mut filter = Filter::new(default);
        filter.add_arch(Arch::X8664).unwrap();
        filter
    }

    #[test]
    fn test_add_arch_twice() {
        let mut filter = x86_64_filter(Action::KillThread);
        assert!(matches!(
            filter.add_arch(Arch::X8664),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn test_add_tokenonly_arch() {
        let mut filter = Filter::new(Action::KillThread);
        assert!(matches!(filter.add_arch(Arch::Mips), Err(Error::Usage(_))));
    }

    #[test]
    fn test_remove_missing_arch() {
        let mut filter = x86_64_filter(Action::KillThread);
        assert!(matches!(
            filter.remove_arch(Arch::Aarch64),
            Err(Error::ArchMismatch(Arch::Aarch64))
        ));
    }

    #[test]
    fn test_default_action_rule_is_noop() {
        let mut filter = x86_64_filter(Action::Allow);
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 0);
    }

    #[test]
    fn test_duplicate_rule_merged() {
        let mut filter = x86_64_filter(Action::KillThread);
        let cmps = [cmp(0, CmpOp::Eq(1))];
        filter.rule_add(Action::Allow, "read", &cmps).unwrap();
        filter.rule_add(Action::Allow, "read", &cmps).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 1);
    }

    #[test]
    fn test_narrower_rule_dropped() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        filter
            .rule_add(Action::Allow, "read", &[cmp(0, CmpOp::Eq(1))])
            .unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 1);
    }

    #[test]
    fn test_broader_rule_replaces() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter
            .rule_add(Action::Allow, "read", &[cmp(0, CmpOp::Eq(1))])
            .unwrap();
        filter
            .rule_add(Action::Allow, "read", &[cmp(0, CmpOp::Le(8))])
            .unwrap();
        let af = &filter.arches[0];
        let chain = af.chains.get(&0).unwrap();
        assert_eq!(chain.rules.len(), 1);
        assert_eq!(chain.rules[0].cmps, vec![cmp(0, CmpOp::Le(8))]);
    }

    #[test]
    fn test_exact_skips_merging() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.rule_add_exact(Action::Allow, "read", &[]).unwrap();
        filter
            .rule_add_exact(Action::Allow, "read", &[cmp(0, CmpOp::Eq(1))])
            .unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 2);
    }

    #[test]
    fn test_conflicting_rule_rejected() {
        let mut filter = x86_64_filter(Action::KillThread);
        let cmps = [cmp(1, CmpOp::Eq(7))];
        filter.rule_add(Action::Allow, "read", &cmps).unwrap();
        assert!(matches!(
            filter.rule_add(Action::Errno(1), "read", &cmps),
            Err(Error::RuleConflict)
        ));
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 1);
    }

    #[test]
    fn test_unknown_name_fails_atomically() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.add_arch(Arch::Aarch64).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();

        let err = filter.rule_add(Action::Allow, "not_a_syscall", &[]);
        assert!(matches!(err, Err(Error::UnknownSyscall(_))));

        // nothing changed: one rule on each architecture
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 1);
        assert_eq!(rules_on(&filter, Arch::Aarch64, 63), 1);
        assert_eq!(
            filter
                .arches
                .iter()
                .map(|af| af.chains.len())
                .sum::<usize>(),
            2
        );
    }

    #[test]
    fn test_pseudo_arch_skipped() {
        // "open" is real on x86_64 but was never wired up on aarch64
        let mut filter = x86_64_filter(Action::KillThread);
        filter.add_arch(Arch::Aarch64).unwrap();
        filter.rule_add(Action::Allow, "open", &[]).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 2), 1);
        assert!(filter.arches[1].chains.is_empty());
    }

    #[test]
    fn test_socket_rule_skipped_on_multiplexed_arch() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::S390X).unwrap();
        filter.add_arch(Arch::X8664).unwrap();
        filter.rule_add(Action::Allow, "socket", &[]).unwrap();
        assert!(filter.arches[0].chains.is_empty());
        assert_eq!(rules_on(&filter, Arch::X8664, 41), 1);
    }

    #[test]
    fn test_raw_number_translated_by_name() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.add_arch(Arch::Aarch64).unwrap();
        // 0 is read on the primary; aarch64 gets 63
        filter.rule_add_nr(Action::Allow, 0, &[]).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 0), 1);
        assert_eq!(rules_on(&filter, Arch::Aarch64, 63), 1);
    }

    #[test]
    fn test_unknown_raw_number_used_verbatim() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.add_arch(Arch::Aarch64).unwrap();
        filter.rule_add_nr(Action::Allow, 1000, &[]).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 1000), 1);
        assert_eq!(rules_on(&filter, Arch::Aarch64, 1000), 1);
    }

    #[test]
    fn test_pseudo_number_as_handle() {
        // -101 is the socket pseudo-number; on x86_64 it lands on 41
        let mut filter = x86_64_filter(Action::KillThread);
        filter.rule_add_nr(Action::Allow, -101, &[]).unwrap();
        assert_eq!(rules_on(&filter, Arch::X8664, 41), 1);
    }

    #[test]
    fn test_priority_recorded() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        filter.set_priority("read", 100).unwrap();
        assert_eq!(filter.arches[0].chains.get(&0).unwrap().priority, 100);
    }

    #[test]
    fn test_priority_before_rules_survives() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.set_priority("read", 100).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        let chain = filter.arches[0].chains.get(&0).unwrap();
        assert_eq!(chain.priority, 100);
        assert_eq!(chain.rules.len(), 1);
    }

    #[test]
    fn test_reset_keeps_arches() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        filter.reset(Action::Allow);
        assert_eq!(filter.default_action(), Action::Allow);
        assert_eq!(filter.arches().collect::<Vec<_>>(), vec![Arch::X8664]);
        assert!(filter.arches[0].chains.is_empty());
    }

    #[test]
    fn test_evaluate_reference() {
        let mut filter = x86_64_filter(Action::KillThread);
        filter
            .rule_add(Action::Allow, "read", &[cmp(0, CmpOp::Eq(4))])
            .unwrap();
        assert_eq!(
            filter.evaluate(Arch::X8664, 0, &[4, 0, 0, 0, 0, 0]),
            Action::Allow
        );
        assert_eq!(
            filter.evaluate(Arch::X8664, 0, &[5, 0, 0, 0, 0, 0]),
            Action::KillThread
        );
        assert_eq!(
            filter.evaluate(Arch::X8664, 1, &[4, 0, 0, 0, 0, 0]),
            Action::KillThread
        );
        assert_eq!(
            filter.evaluate(Arch::Aarch64, 0, &[4, 0, 0, 0, 0, 0]),
            Action::KillThread
        );
    }
}
