//! Info command: package information.

use clap::Args;
use tracing::instrument;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {}

/// Print package name, version, and description.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(_args: InfoArgs, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
    }
    Ok(())
}
