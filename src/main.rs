use clap::Parser;
use jsonvault::cli::{Cli, Commands};
use jsonvault::config::Settings;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging();

    let result = match cli.command {
        Commands::Init => jsonvault::cli::commands::init::execute(&cli),
        Commands::Get { ref key } => jsonvault::cli::commands::get::execute(&cli, key),
        Commands::Set { ref key, ref value } => {
            jsonvault::cli::commands::set::execute(&cli, key, value.as_deref())
        }
        Commands::Remove { ref key } => jsonvault::cli::commands::remove::execute(&cli, key),
        Commands::List => jsonvault::cli::commands::list::execute(&cli),
        Commands::Dump { ref output } => {
            jsonvault::cli::commands::dump::execute(&cli, output.as_deref())
        }
        Commands::Import { ref file } => jsonvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Delete { force } => jsonvault::cli::commands::delete::execute(&cli, force),
        Commands::RotateKey => jsonvault::cli::commands::rotate::execute(&cli),
        Commands::Check => jsonvault::cli::commands::check::execute(&cli),
        Commands::Completions { shell } => jsonvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        jsonvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Send `tracing` output to stderr, filtered by `RUST_LOG` or the
/// `log_level` setting.
fn init_logging() {
    let fallback = std::env::current_dir()
        .ok()
        .and_then(|cwd| Settings::load(&cwd).ok())
        .unwrap_or_default()
        .log_level;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
