//! `oktakey backends`: show which secret stores this build can use.

use console::{style, Emoji};
use oktakey_core::{BackendType, Config};
use oktakey_secrets::{default_order, is_supported};

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");

/// Run the backends command.
pub fn run(config: &Config, backend: Option<&str>) -> anyhow::Result<()> {
    let selected = match backend {
        Some(name) => name.parse::<BackendType>().ok(),
        None => config.backend_type(),
    };

    println!("{:<16} {}", "BACKEND", "STATUS");
    println!("{}", "-".repeat(32));
    for backend in BackendType::ALL {
        let status = if is_supported(backend) {
            format!("{} supported", style(CHECK).green())
        } else {
            format!("{} not available", style(CROSS).red())
        };
        let marker = if selected == Some(backend) { " (selected)" } else { "" };
        println!("{:<16} {status}{}", backend.as_str(), style(marker).bold());
    }

    let order: Vec<&str> = default_order().iter().map(|b| b.as_str()).collect();
    println!("\nDefault order: {}", style(order.join(", ")).dim());

    if let (Some(name), None) = (backend.or(config.backend.as_deref()), selected) {
        println!(
            "{} '{}' is not a known backend; update will report it unavailable",
            style(CROSS).red(),
            name
        );
    }
    Ok(())
}
