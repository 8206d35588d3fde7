use anyhow::Result;
use wardrive_runtime::{expand_tilde, Config};

use super::args::{Cli, Commands, SessionCommand, VendorCommand};
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = expand_tilde(&cli.data_dir);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_from(&Config::default_path()?)?,
    };

    let Some(command) = cli.command else {
        show_guidance();
        return Ok(());
    };

    match command {
        Commands::Build {
            output,
            oui,
            no_jitter,
            verbose,
        } => handlers::build::handle(&data_dir, &config, output, oui, no_jitter, verbose),

        Commands::Session { command } => match command {
            SessionCommand::List => handlers::session_list::handle(&data_dir),
        },

        Commands::Check { file_path } => handlers::check::handle(&file_path),

        Commands::Vendor { command } => match command {
            VendorCommand::Lookup { mac, oui } => {
                handlers::vendor_lookup::handle(&mac, oui.or(config.oui_csv))
            }
        },
    }
}

fn show_guidance() {
    println!("wardrive - Wi-Fi wardriving capture processor\n");
    println!("Quick commands:");
    println!("  wardrive build                    # Build the GeoJSON map document");
    println!("  wardrive session list             # Summarize capture sessions");
    println!("  wardrive check <FILE>             # Validate a capture file");
    println!("  wardrive vendor lookup <MAC>      # Resolve a MAC to its vendor\n");
    println!("For more commands:");
    println!("  wardrive --help");
}
