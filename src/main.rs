use clap::Parser;
use form_sense::cli::commands::{cmd_ask, cmd_classify};
use form_sense::cli::config::{Cli, Commands, build_engine_config, load_config};
use form_sense::engine::engine::FormEngine;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout stays clean JSON. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve Ollama settings: CLI > config > defaults
    let ollama_endpoint = cli.ollama_endpoint.as_deref();
    let ollama_model = cli.ollama_model.as_deref();

    let output = match cli.command {
        Commands::Classify { input, threshold } => {
            let engine_config =
                build_engine_config(&config, threshold, cli.remote, ollama_endpoint, ollama_model);
            cmd_classify(&FormEngine::new(engine_config), &input)?
        }
        Commands::Ask { input } => {
            let engine_config =
                build_engine_config(&config, None, cli.remote, ollama_endpoint, ollama_model);
            cmd_ask(&FormEngine::new(engine_config), &input)?
        }
    };

    println!("{}", output);
    Ok(())
}
