//! Explain command - prints what a rule checks and how to fix findings

use clap::Args;
use colored::{ColoredString, Colorize};
use shinsa_core::analysis::AnalysisEngine;
use shinsa_core::diagnostic::Severity;

#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[arg(
        value_name = "RULE",
        help = "Rule to explain, by issue kind or kebab-case name (e.g., \"shadowed_builtin\", \"shadowed-builtin\")"
    )]
    pub rule: String,
}

impl ExplainArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let engine = AnalysisEngine::new();
        let registry = engine.registry();

        let rule = registry
            .get_rule(&self.rule)
            .or_else(|| registry.get_rule_by_name(&self.rule));

        match rule {
            Some(rule) => {
                let metadata = rule.metadata();

                println!();
                println!("{}", format!("Rule {}", metadata.kind).bold());
                println!();
                println!("  {}: {}", "Name".cyan(), metadata.name);
                println!("  {}: {}", "Description".cyan(), metadata.description);
                println!(
                    "  {}: {}",
                    "Severity".cyan(),
                    format_severity(metadata.severity)
                );

                if let Some(examples) = metadata.examples {
                    println!();
                    println!("  {}:", "Examples".cyan());
                    for line in examples.lines() {
                        println!("    {}", line);
                    }
                }
                println!();

                Ok(())
            }
            None => {
                eprintln!(
                    "{} no rule named '{}'",
                    "error:".red().bold(),
                    self.rule
                );
                eprintln!();
                eprintln!("Available rules:");

                for rule in registry.rules() {
                    let meta = rule.metadata();
                    eprintln!("  {} ({})", meta.kind, meta.name);
                }

                std::process::exit(1);
            }
        }
    }
}

fn format_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "high".red(),
        Severity::Medium => "medium".yellow(),
        Severity::Low => "low".cyan(),
    }
}

#[cfg(test)]
mod tests {
    use shinsa_core::analysis::AnalysisEngine;

    #[test]
    fn explain_known_rule_returns_metadata() {
        let engine = AnalysisEngine::new();
        let registry = engine.registry();

        let rule = registry.get_rule("mutable_default_argument");
        assert!(rule.is_some(), "mutable_default_argument rule should exist");

        let metadata = rule.unwrap().metadata();
        assert_eq!(metadata.name, "mutable-default-argument");
        assert!(!metadata.description.is_empty());
    }

    #[test]
    fn explain_unknown_rule_returns_none() {
        let engine = AnalysisEngine::new();
        let registry = engine.registry();

        let rule = registry.get_rule("no_such_rule");
        assert!(rule.is_none(), "no_such_rule should not exist");
    }

    #[test]
    fn explain_rule_by_kebab_name() {
        let engine = AnalysisEngine::new();
        let registry = engine.registry();

        let rule = registry.get_rule_by_name("exception-swallowing");
        assert!(rule.is_some(), "exception-swallowing rule should exist");
        assert_eq!(
            rule.unwrap().metadata().kind.as_str(),
            "exception_swallowing"
        );
    }

    #[test]
    fn every_rule_has_examples() {
        let engine = AnalysisEngine::new();
        let registry = engine.registry();

        for rule in registry.rules() {
            let metadata = rule.metadata();
            assert!(
                metadata.examples.is_some(),
                "rule {} should have examples defined",
                metadata.name
            );
        }
    }
}
