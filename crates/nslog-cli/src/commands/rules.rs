//! Rules command
//!
//! Usage: nslog rules

use nslog_core::Registry;

/// Execute rules command
pub fn execute(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    for (pattern, level) in registry.rules().iter() {
        println!("{}={}", pattern, level);
    }
    if !registry.is_enabled() {
        println!("# gate disabled");
    }
    Ok(())
}
