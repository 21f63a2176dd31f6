mod commands;

use clap::{Parser, Subcommand, builder::styling};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

#[derive(Parser)]
#[command(name = "rizzmeme")]
#[command(about = "Render Rizz Score memes")]
#[command(version = env!("RIZZMEME_VERSION"))]
#[command(long_version = env!("RIZZMEME_VERSION"))]
#[command(
    styles = styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Cyan.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one meme for a rizz score
    Render(commands::render::RenderArgs),
    /// List the template catalog
    Templates(commands::templates::TemplatesArgs),
    /// Render several templates and scores in one go
    Batch(commands::batch::BatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let multi_progress = init_logging(&cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, &cli.global),
        Commands::Templates(args) => commands::templates::run(args, &cli.global),
        Commands::Batch(args) => commands::batch::run(args, &cli.global, multi_progress),
    };

    std::process::exit(if result { 0 } else { 1 });
}

/// Route log output through a progress-bar aware writer.
fn init_logging(verbose: &Verbosity<InfoLevel>) -> MultiProgress {
    let logger = env_logger::Builder::from_default_env()
        .filter_level(verbose.log_level_filter())
        .format_timestamp(None)
        .format_module_path(false)
        .build();
    let level = logger.filter();

    let multi_progress = MultiProgress::new();
    if let Err(e) = LogWrapper::new(multi_progress.clone(), logger).try_init() {
        eprintln!("Failed to initialize logging: {e}");
    }
    log::set_max_level(level);

    multi_progress
}
