use clap::Parser;
use tracing_subscriber::EnvFilter;

use credkeep::cli::{AuthAction, Cli, Commands};

fn main() {
    // Logging goes to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Set { ref name, ref value } => {
            credkeep::cli::commands::set::execute(&cli, name, value.as_deref())
        }
        Commands::Get { ref name, copy } => credkeep::cli::commands::get::execute(&cli, name, copy),
        Commands::List { detail } => credkeep::cli::commands::list::execute(&cli, detail),
        Commands::Delete { ref name, force } => {
            credkeep::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::Rename { ref old, ref new } => {
            credkeep::cli::commands::rename::execute(&cli, old, new)
        }
        Commands::Reconcile => credkeep::cli::commands::reconcile::execute(&cli),
        Commands::Export {
            ref target,
            ref output,
        } => credkeep::cli::commands::export::execute(&cli, target, output.as_deref()),
        Commands::Generate {
            ref args,
            ref script,
        } => credkeep::cli::commands::generate::execute(&cli, args, script.as_deref()),
        Commands::Auth { ref action } => match action {
            AuthAction::Keyring { delete } => {
                credkeep::cli::commands::auth::execute_keyring(&cli, *delete)
            }
        },
        Commands::Completions { ref shell } => credkeep::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credkeep::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
