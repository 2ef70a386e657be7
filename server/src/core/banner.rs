//! Startup banner and URL display

use super::config::{AppConfig, FailPolicy, is_all_interfaces};
use super::constants::APP_NAME;

/// Print the startup banner with URLs and the active backends
pub fn print_banner(config: &AppConfig, store_backend: &str, moderation_provider: &str) {
    let host = config.server.host.as_str();
    let port = config.server.port;

    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    const W: usize = 12;

    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}",
        "API:", display_host, port
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/api/docs",
        "Docs:", display_host, port
    );

    let store_detail = match config.store.scylla {
        Some(ref scylla) => format!(
            "{} \x1b[90m({} @ {})\x1b[0m",
            store_backend,
            scylla.keyspace,
            scylla.nodes.join(",")
        ),
        None => format!("{} \x1b[90m(data is lost on restart)\x1b[0m", store_backend),
    };
    println!("  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}", "Store:", store_detail);

    let fail_note = match config.moderation.fail_policy {
        FailPolicy::Closed => "fails closed",
        FailPolicy::Open => "fails open",
    };
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {} \x1b[90m({})\x1b[0m",
        "Moderation:", moderation_provider, fail_note
    );

    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }

    println!();
}
