use clap::Parser;
use eyre::Result;
use std::path::PathBuf;
use stubgen::commands::{fetch, generate};
use stubgen::{git, PipelineConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "stubgen")]
#[command(about = "Fetch DefraDB proto sources and generate tonic client stubs")]
struct Cli {
    /// Remote repository holding the proto definitions (overrides STUBGEN_REMOTE)
    #[arg(short = 'r', long = "remote")]
    remote: Option<String>,

    /// Branch pulled on every run (overrides STUBGEN_BRANCH)
    #[arg(short = 'b', long = "branch")]
    branch: Option<String>,

    /// Local mirror directory for the cloned sources
    #[arg(long = "mirror-dir")]
    mirror_dir: Option<PathBuf>,

    /// Directory inside the mirror holding the proto file
    #[arg(long = "proto-dir")]
    proto_dir: Option<String>,

    /// Proto definition file to compile
    #[arg(long = "proto-file")]
    proto_file: Option<String>,

    /// Directory the generated stubs are written to
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    verbose: clap_verbosity::Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser)]
enum Commands {
    /// Clone the proto source mirror, or update it in place if it exists
    Fetch,
    /// Update the mirror, then generate message and RPC client stubs
    Generate,
    /// Print the resolved configuration
    Config {
        /// Optional path to save the configuration as JSON
        #[arg(short, long)]
        output_file: Option<String>,
    },
    /// Show resolved paths and external tool availability
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure log level based on verbosity flag
    let log_level = if cli.verbose.is_silent() {
        Level::ERROR
    } else {
        match cli.verbose.log_level_filter() {
            log::LevelFilter::Off => Level::ERROR,
            log::LevelFilter::Error => Level::ERROR,
            log::LevelFilter::Warn => Level::WARN,
            log::LevelFilter::Info => Level::INFO,
            log::LevelFilter::Debug => Level::DEBUG,
            log::LevelFilter::Trace => Level::TRACE,
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global subscriber");

    // Build the pipeline configuration
    let mut builder = PipelineConfig::builder();
    if let Some(remote) = cli.remote {
        builder = builder.with_remote(remote);
    }
    if let Some(branch) = cli.branch {
        builder = builder.with_branch(branch);
    }
    if let Some(dir) = cli.mirror_dir {
        builder = builder.with_mirror_dir(dir);
    }
    if let Some(dir) = cli.proto_dir {
        builder = builder.with_proto_dir(dir);
    }
    if let Some(file) = cli.proto_file {
        builder = builder.with_proto_file(file);
    }
    if let Some(dir) = cli.out_dir {
        builder = builder.with_out_dir(dir);
    }
    let config = builder.build();

    match cli.command {
        Commands::Fetch => {
            fetch::call_fetch(&config).await?;
            info!("✓ Mirror at {} is up to date", config.mirror_dir().display());
        }
        Commands::Generate => {
            // Generation always runs against a freshly fetched mirror.
            fetch::call_fetch(&config).await?;
            generate::call_generate(&config).await?;
            info!("✓ Stubs generated into {}", config.out_dir().display());
        }
        Commands::Config { output_file } => {
            let json = serde_json::to_string_pretty(&config)?;
            if let Some(path) = output_file {
                std::fs::write(&path, &json)?;
                info!("Configuration saved to: {}", path);
            } else {
                println!("{}", json);
            }
        }
        Commands::Status => {
            println!("Pipeline status:");
            println!("  Remote:     {}", config.remote());
            println!("  Branch:     {}", config.branch());
            println!(
                "  Mirror:     {} ({})",
                config.mirror_dir().display(),
                if config.mirror_dir().exists() {
                    "present"
                } else {
                    "absent"
                }
            );
            println!("  Proto file: {}", config.proto_path().display());
            println!("  Output:     {}", config.out_dir().display());
            println!(
                "  git:        {}",
                if git::available().await {
                    "OK"
                } else {
                    "NOT FOUND"
                }
            );
            println!(
                "  protoc:     {}",
                if generate::protoc_available() {
                    "OK"
                } else {
                    "NOT FOUND"
                }
            );
        }
    }

    Ok(())
}
