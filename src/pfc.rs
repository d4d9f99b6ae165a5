//! Pseudo filter code: a human-readable rendering of the filter database.
//!
//! PFC is a debugging surface, not an input format. It mirrors the
//! database (architectures in insertion order, syscalls by number, rules
//! in chain order) rather than the generated program, so reading it tells
//! you what the policy *means*, not how it was scheduled.

use std::io::Write;

use crate::error::Result;
use crate::filter::{ArgCmp, CmpOp, Filter};

pub(crate) fn render(filter: &Filter, sink: &mut dyn Write) -> Result<()> {
    writeln!(sink, "#")?;
    writeln!(sink, "# pseudo filter code start")?;
    writeln!(sink, "#")?;

    for arch_filter in filter.arches.iter() {
        let arch = arch_filter.arch;
        writeln!(sink, "# filter for arch {} ({})", arch.name(), arch.token())?;
        writeln!(sink, "if ($arch == {})", arch.token())?;

        for (&nr, chain) in arch_filter.chains.iter() {
            if chain.rules.is_empty() {
                continue;
            }
            let name = arch
                .resolve_num(nr as i32)
                .unwrap_or("UNKNOWN");
            writeln!(
                sink,
                "  # filter for syscall \"{}\" ({}) [priority: {}]",
                name, nr, chain.priority
            )?;
            writeln!(sink, "  if ($syscall == {})", nr)?;
            for rule in chain.rules.iter() {
                if rule.cmps.is_empty() {
                    writeln!(sink, "    action {};", rule.action)?;
                } else {
                    writeln!(sink, "    if ({})", render_conjunction(&rule.cmps))?;
                    writeln!(sink, "      action {};", rule.action)?;
                }
            }
        }
    }

    writeln!(sink, "# default action")?;
    writeln!(sink, "action {};", filter.default_action)?;
    writeln!(sink, "# invalid architecture action")?;
    writeln!(sink, "action {};", filter.bad_arch_action)?;
    writeln!(sink, "#")?;
    writeln!(sink, "# pseudo filter code end")?;
    writeln!(sink, "#")?;
    Ok(())
}

fn render_conjunction(cmps: &[ArgCmp]) -> String {
    cmps.iter()
        .map(render_cmp)
        .collect::<Vec<_>>()
        .join(" && ")
}

fn render_cmp(cmp: &ArgCmp) -> String {
    let arg = cmp.arg();
    match cmp.op() {
        CmpOp::Eq(v) => format!("$a{} == {}", arg, v),
        CmpOp::Ne(v) => format!("$a{} != {}", arg, v),
        CmpOp::Lt(v) => format!("$a{} < {}", arg, v),
        CmpOp::Le(v) => format!("$a{} <= {}", arg, v),
        CmpOp::Gt(v) => format!("$a{} > {}", arg, v),
        CmpOp::Ge(v) => format!("$a{} >= {}", arg, v),
        CmpOp::MaskedEq { mask, value } => {
            format!("$a{} & {:#x} == {:#x}", arg, mask, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::arch::Arch;

    #[test]
    fn test_render_small_filter() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();
        filter
            .rule_add(
                Action::Errno(1),
                "write",
                &[ArgCmp::new(0, CmpOp::Eq(2)).unwrap()],
            )
            .unwrap();

        let mut out = Vec::new();
        filter.export_pfc(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("#\n# pseudo filter code start\n#\n"));
        assert!(text.contains("# filter for arch x86_64 (3221225534)"));
        assert!(text.contains("  # filter for syscall \"read\" (0) [priority: 0]"));
        assert!(text.contains("  if ($syscall == 1)\n    if ($a0 == 2)\n      action ERRNO(1);"));
        assert!(text.contains("# default action\naction KILL;"));
        assert!(text.ends_with("# pseudo filter code end\n#\n"));
    }

    #[test]
    fn test_render_masked_predicate() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter
            .rule_add(
                Action::Allow,
                "ioctl",
                &[ArgCmp::new(1, CmpOp::MaskedEq { mask: 0xff00, value: 0x1200 }).unwrap()],
            )
            .unwrap();

        let mut out = Vec::new();
        filter.export_pfc(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("if ($a1 & 0xff00 == 0x1200)"));
    }

    #[test]
    fn test_export_does_not_mutate() {
        let mut filter = Filter::new(Action::KillThread);
        filter.add_arch(Arch::X8664).unwrap();
        filter.rule_add(Action::Allow, "read", &[]).unwrap();

        let mut first = Vec::new();
        filter.export_pfc(&mut first).unwrap();
        let mut second = Vec::new();
        filter.export_pfc(&mut second).unwrap();
        assert_eq!(first, second);
    }
}
