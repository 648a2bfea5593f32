//! Read-only command handlers.

use super::{hid_registry, CommandResult};
use analogsense::{find_rule_group, union_filters, Config, SUPPORTED};
use analogsense_transport::HidHost;

/// List every HID interface, marking the ones a decoder would accept
pub fn devices() -> CommandResult {
    let host = HidHost::new();
    let descriptors = host.enumerate()?;
    if descriptors.is_empty() {
        println!("No HID devices found");
        return Ok(());
    }

    println!("{:<9} {:<6} {:<6} {:<22} Product", "VID:PID", "Page", "Usage", "Family");
    for desc in &descriptors {
        let family = find_rule_group(desc, SUPPORTED).map_or("-", |g| g.name);
        for collection in &desc.collections {
            println!(
                "{:04x}:{:04x} {:04x}   {:04x}   {:<22} {}",
                desc.vendor_id,
                desc.product_id,
                collection.usage_page,
                collection.usage,
                family,
                desc.display_name()
            );
        }
    }
    Ok(())
}

/// Print the union filter set
pub fn filters(json: bool) -> CommandResult {
    let filters = union_filters(SUPPORTED);
    if json {
        println!("{}", serde_json::to_string_pretty(&filters)?);
        return Ok(());
    }

    for group in SUPPORTED {
        println!("{} ({}):", group.name, group.variant);
        for filter in group.filters {
            println!("  {filter}");
        }
    }
    Ok(())
}

/// List supported keyboards the current user can open
pub fn list(config: &Config) -> CommandResult {
    let sessions = hid_registry(config, None).list_sessions()?;
    if sessions.is_empty() {
        println!("No supported analog keyboard found");
        return Ok(());
    }

    for (i, session) in sessions.iter().enumerate() {
        println!(
            "{}. {} [{:04x}:{:04x}] {} / {}",
            i + 1,
            session.product_name(),
            session.vendor_id(),
            session.product_id(),
            session.family(),
            session.variant()
        );
    }
    Ok(())
}
