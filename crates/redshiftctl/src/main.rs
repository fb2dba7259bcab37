use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use redshiftctl_core::Config;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;
mod prompt;
mod resilience;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::RedshiftCtlError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        error!("Command failed: {}", e);
        e.print_diagnostic();
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), RedshiftCtlError> {
    // Load configuration from specified path or default location
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        (config, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    let mut conn_mgr = ConnectionManager::with_config_path(config, config_path);

    execute_command(cli, &mut conn_mgr).await
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "redshiftctl=warn,redshiftctl_core=warn,aws_config=warn",
            1 => "redshiftctl=info,redshiftctl_core=info,aws_config=info",
            2 => "redshiftctl=debug,redshiftctl_core=debug,aws_config=debug",
            _ => {
                "redshiftctl=trace,redshiftctl_core=trace,aws_config=trace,aws_smithy_runtime=debug"
            }
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(
    cli: &Cli,
    conn_mgr: &mut ConnectionManager,
) -> Result<(), RedshiftCtlError> {
    info!("Executing command: {}", format_command(&cli.command));

    match &cli.command {
        Commands::Version => {
            println!("redshiftctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
        Commands::Profile(profile_cmd) => {
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, cli.output).await
        }
        Commands::SubnetGroup(cmd) => {
            commands::redshift::handle_subnet_group_command(conn_mgr, cli, cmd).await
        }
        Commands::Logging(cmd) => {
            commands::redshift::handle_logging_command(conn_mgr, cli, cmd).await
        }
        Commands::Event(cmd) => commands::redshift::handle_event_command(conn_mgr, cli, cmd).await,
        Commands::Tag(cmd) => commands::redshift::handle_tag_command(conn_mgr, cli, cmd).await,
        Commands::ReservedNode(cmd) => {
            commands::redshift::handle_reserved_node_command(conn_mgr, cli, cmd).await
        }
        Commands::Cluster(cmd) => {
            commands::redshift::handle_cluster_command(conn_mgr, cli, cmd).await
        }
        Commands::SecurityGroup(cmd) => {
            commands::redshift::handle_security_group_command(conn_mgr, cli, cmd).await
        }
    }
}

fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Short command description for logs
fn format_command(command: &Commands) -> String {
    match command {
        Commands::SubnetGroup(_) => "subnet-group".to_string(),
        Commands::Logging(cmd) => format!("logging {:?}", cmd),
        Commands::Event(_) => "event categories".to_string(),
        Commands::Tag(_) => "tag".to_string(),
        Commands::ReservedNode(_) => "reserved-node purchase".to_string(),
        Commands::Cluster(cmd) => format!("cluster {:?}", cmd),
        Commands::SecurityGroup(_) => "security-group delete".to_string(),
        Commands::Profile(cmd) => format!("profile {:?}", cmd),
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
    }
}
