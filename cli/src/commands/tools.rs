//! Tools listing command

use anyhow::Result;
use tracing::info;
use wayfinder_core::{ToolRegistry, TransportConfig};

/// Show available tools
pub async fn tools_command() -> Result<()> {
    info!("Listing available tools");

    let registry = ToolRegistry::with_builtin_tools(&TransportConfig::default())?;

    println!("🛠️  Available Tools\n");
    print!("{}", describe_tools(&registry));

    Ok(())
}

/// One block per tool: name, then the first line of its description
fn describe_tools(registry: &ToolRegistry) -> String {
    let mut listing = String::new();
    for tool in registry.iter() {
        let description = tool.description();
        let first_line = description.lines().next().unwrap_or(description);
        listing.push_str(&format!("📦 {}\n   {}\n\n", tool.name(), first_line));
    }
    listing
}
