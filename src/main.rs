use anyhow::Result;
use clap::Parser;
use messier::config;
use messier::pipeline;
use messier::wikimedia::{DisabledResolver, ImageResolver, WikimediaResolver};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "messier")]
#[command(about = "Convert the Wikipedia Messier objects table into a CSV catalogue")]
struct Cli {
    /// Path to the saved wiki table markup
    #[arg(short, long, default_value = config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Directory for downloaded images
    #[arg(long, default_value = config::DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Path to the ImageMagick executable
    #[arg(long, default_value = config::DEFAULT_MAGICK)]
    magick: PathBuf,

    /// Skip image download and conversion entirely
    #[arg(long)]
    skip_images: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();

    let resolver: Box<dyn ImageResolver> = if cli.skip_images {
        info!("Image resolution disabled");
        Box::new(DisabledResolver)
    } else {
        Box::new(WikimediaResolver::new(&cli.images_dir, &cli.magick)?)
    };

    let stats = pipeline::run(&cli.input, &cli.output, resolver.as_ref())?;

    println!();
    println!("=== Summary ===");
    println!("Total time:       {:.2}s", start.elapsed().as_secs_f64());
    println!("Rows seen:        {}", stats.rows_seen);
    println!("Rows skipped:     {}", stats.rows_skipped);
    println!("Records written:  {}", stats.records_written);
    println!("Images resolved:  {}", stats.images_resolved);
    println!("Images failed:    {}", stats.images_failed);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
