//! Console output for a finished run.

use fresh_onion_core::Report;

/// Print one line per diagnostic, then the verdict banner.
pub fn print(report: &Report) {
    println!("{}", render(report));
}

fn render(report: &Report) -> String {
    let mut lines: Vec<String> = report.diagnostics.iter().map(ToString::to_string).collect();
    lines.push(report.verdict().to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresh_onion_core::{ConfigProblem, Diagnostic};

    #[test]
    fn empty_report_prints_only_banner() {
        assert_eq!(render(&Report::new()), "👍 Fresh 🧅");
    }

    #[test]
    fn diagnostics_precede_banner() {
        let mut report = Report::new();
        report.push(Diagnostic::InvalidConfig(ConfigProblem::UnknownRuleSource {
            from: "X".into(),
        }));
        assert_eq!(
            render(&report),
            "Rule from layer X does not exist\n👎 Rotten 🧅"
        );
    }
}
