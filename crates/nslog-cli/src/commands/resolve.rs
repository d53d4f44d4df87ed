//! Resolve command
//!
//! Usage: nslog resolve <NAMESPACE> [--level <LEVEL>]

use clap::Args;
use nslog_core::{resolve_rule, Level, PatternClass, Registry};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Namespace to resolve
    pub namespace: String,

    /// Also report whether a message at this level would be emitted
    #[arg(short, long)]
    pub level: Option<String>,
}

fn class_name(class: PatternClass) -> &'static str {
    match class {
        PatternClass::Wildcard => "wildcard",
        PatternClass::Prefix => "prefix",
        PatternClass::Regex => "regex",
        PatternClass::Exact => "exact",
    }
}

/// Execute resolve command
pub fn execute(registry: &Registry, args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let level = args.level.as_deref().map(str::parse::<Level>).transpose()?;
    let rules = registry.rules();

    println!("namespace: {}", args.namespace);
    match resolve_rule(&args.namespace, &rules) {
        Some(matched) => {
            println!("effective level: {}", matched.level);
            println!(
                "matched rule: {} ({})",
                matched.pattern,
                class_name(matched.specificity.class)
            );
        }
        None => println!("effective level: unconfigured"),
    }
    if !registry.is_enabled() {
        println!("gate: disabled");
    }

    if let Some(level) = level {
        let verdict = if registry.would_emit(&args.namespace, level) {
            "emitted"
        } else {
            "suppressed"
        };
        println!("{}: {}", level, verdict);
    }

    Ok(())
}
