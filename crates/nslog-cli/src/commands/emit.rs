//! Emit command
//!
//! Usage: nslog emit <NAMESPACE> <LEVEL> [PARTS]... [--json] [--timestamps]

use clap::Args;
use nslog_core::{LogValue, Registry, WriterSink};

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Namespace of the logger
    pub namespace: String,

    /// Level symbol: trace, info, warn or error
    pub level: String,

    /// Message parts
    pub parts: Vec<String>,

    /// Parse every part as JSON instead of taking it as text
    #[arg(long)]
    pub json: bool,

    /// Write to stdout with an RFC 3339 timestamp prefix
    #[arg(long)]
    pub timestamps: bool,
}

fn parse_parts(parts: &[String], json: bool) -> Result<Vec<LogValue>, serde_json::Error> {
    parts
        .iter()
        .map(|part| {
            if json {
                serde_json::from_str::<serde_json::Value>(part).map(LogValue::from)
            } else {
                Ok(LogValue::from(part))
            }
        })
        .collect()
}

/// Execute emit command
pub fn execute(registry: &Registry, args: EmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parts = parse_parts(&args.parts, args.json)?;

    if args.timestamps {
        registry.set_sink(WriterSink::new(std::io::stdout()).with_timestamps(true));
    }

    let logger = registry.get_logger(&args.namespace)?;
    let level = args.level.parse()?;
    logger.log(level, &parts);
    Ok(())
}
