use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use n8n_builder::cli::{
    OutputFormat, build_workflows, compare_workflows, pull_workflows, push_workflows,
    render_comparison,
};
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// n8n Workflow Builder: render workflows from templates, sync them with an n8n instance, and compare the two
#[derive(Parser)]
#[command(name = "n8nb", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source secrets from
    #[arg(short, long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the configured workflow templates into the output directory
    Build {
        /// The build configuration YAML file
        config_file: PathBuf,
    },

    /// Download every workflow from the n8n instance into the pulled directory
    Pull {
        /// The build configuration YAML file
        config_file: PathBuf,
    },

    /// Create or update built workflows on the n8n instance
    Push {
        /// The build configuration YAML file
        config_file: PathBuf,

        /// List what would be uploaded without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare built workflows against pulled workflows
    Compare {
        /// The build configuration YAML file
        config_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Build { config_file } => {
            log::info!("Building from {}", config_file.display().bright_black());
            build_workflows(&config_file, &cli.env_file).await?;
        }
        Commands::Pull { config_file } => {
            log::info!("Pulling with {}", config_file.display().bright_black());
            pull_workflows(&config_file, &cli.env_file).await?;
        }
        Commands::Push {
            config_file,
            dry_run,
        } => {
            log::info!(
                "Pushing {} from {}",
                match dry_run {
                    true => "(dry run)",
                    false => "workflows",
                }
                .cyan(),
                config_file.display().bright_black(),
            );
            push_workflows(&config_file, &cli.env_file, dry_run).await?;
        }
        Commands::Compare {
            config_file,
            format,
        } => {
            log::debug!("Comparing with {}", config_file.display().bright_black());
            let results = compare_workflows(&config_file)?;
            let rendered = render_comparison(&results, format)?;
            println!("{}", rendered.trim_end());
        }
    }

    Ok(())
}
