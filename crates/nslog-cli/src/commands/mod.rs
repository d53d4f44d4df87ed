//! CLI commands and the shared rule options

pub mod emit;
pub mod resolve;
pub mod rules;

use clap::Args;
use nslog_core::logging_facility::{init, Profile};
use nslog_core::{Registry, RegistryConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where rules come from, lowest precedence first:
/// config file, then `NSLOG_RULES` / `--rules`, then each `--rule`.
#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Configuration file (TOML, or JSON when the extension is .json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma-separated directives, e.g. "*=info,app:*=trace,/^db:\d+$/=warn"
    #[arg(long, env = "NSLOG_RULES", global = true)]
    pub rules: Option<String>,

    /// A single PATTERN=LEVEL directive (repeatable)
    #[arg(short, long = "rule", global = true)]
    pub rule: Vec<String>,

    /// Close the gate so nothing is emitted
    #[arg(long, global = true)]
    pub disabled: bool,

    /// Print the registry's own diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn load_config_file(path: &Path) -> Result<RegistryConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => RegistryConfig::from_json_str(&text)?,
        _ => RegistryConfig::from_toml_str(&text)?,
    };
    Ok(config)
}

/// Configure the process-wide registry from the rule options
pub fn build_registry(args: &RuleArgs) -> Result<Arc<Registry>, Box<dyn std::error::Error>> {
    if args.verbose {
        init(Profile::Development);
    }

    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => RegistryConfig::default(),
    };
    if let Some(directives) = &args.rules {
        config = config.merge(RegistryConfig::parse_directives(directives)?);
    }
    for directive in &args.rule {
        config = config.merge(RegistryConfig::parse_directives(directive)?);
    }
    if args.disabled {
        config.enabled = Some(false);
    }

    let registry = Registry::instance();
    config.apply(&registry)?;
    Ok(registry)
}
