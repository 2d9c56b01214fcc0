use crate::dialects::{get_registry, list_dialects};
use crate::params::schema;
use log::info;

/// Print the parameter schema in presentation order, grouped.
pub fn run_schema() {
    info!("Listing import parameters");

    for (group, _) in schema::groups() {
        println!("{}", group);
        for field in schema::presentation_order().into_iter().filter(|f| f.group == group) {
            let mut flags = Vec::new();
            if field.optional {
                flags.push("optional");
            }
            if field.sensitive {
                flags.push("sensitive");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            println!("  {} - {}{}", field.key, field.display_name, flags);
        }
    }
}

/// Print the built-in dialects with their default ports.
pub fn run_dialects() {
    info!("Listing dialects");
    let registry = get_registry();

    for name in list_dialects() {
        if let Some(dialect) = registry.get(&name) {
            let aliases = registry.get_aliases(&name);
            println!(
                "{} ({}) default port {}, aliases: {}",
                name,
                dialect.dialect_id(),
                dialect.default_port(),
                aliases.join(", ")
            );
        }
    }
}
