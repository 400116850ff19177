use clap::Parser;
use dashboard_utils::cli::dispatcher::Dispatcher;
use dashboard_utils::cli::main_types::Cli;
use dashboard_utils::storage::config::{Config, Profile};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create the profile on first use
    if config.get_profile(&profile_name).is_none() {
        if cli.verbose {
            println!("Creating default profile: {}", profile_name);
        }

        config.set_profile(profile_name.clone(), Profile::default());
        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            if cli.verbose {
                println!("Warning: Failed to save config: {}", err);
            }
        }
    }

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using profile: {}", profile_name);

        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }
    }

    let result = match Dispatcher::new(
        config,
        config_path,
        profile_name,
        cli.server_url,
        cli.verbose,
    ) {
        Ok(dispatcher) => dispatcher.dispatch(cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        // Notified failures were already printed as a toast
        if !e.is_notified() {
            eprintln!("{} {}", e.severity().emoji(), e.display_friendly());
        }
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("   Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
