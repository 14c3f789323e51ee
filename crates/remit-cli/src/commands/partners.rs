//! Partners command - list the routing table.

use console::style;

use remit_core::ExtractorRegistry;

use super::load_config;

pub fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = ExtractorRegistry::from_config(&config);

    println!("{}", style("Partner routes (first match wins):").bold());
    for (i, (partner, _, extractor)) in registry.routes().enumerate() {
        println!("  {}. {} -> {}", i + 1, partner, style(extractor).cyan());
    }
    println!(
        "  *  {} -> {}",
        style("anything else").dim(),
        style(registry.fallback().name()).cyan()
    );

    Ok(())
}
