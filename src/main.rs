use clap::{Parser, Subcommand};
use fitwidth::config::{self, OnError, Overrides};
use fitwidth::imaging::ResampleFilter;
use fitwidth::{output, process};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("FITWIDTH_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FITWIDTH_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "fitwidth")]
#[command(about = "Shrink images in a folder to a maximum width, in place")]
#[command(long_about = "\
Shrink images in a folder to a maximum width, in place

Every .png, .jpg, .jpeg, .bmp, .gif and .webp file (any letter case) wider
than the maximum width is resampled to exactly that width, keeping its
aspect ratio, and written back over the original in the same format.
Narrower images are left untouched. Other files are ignored. Dot-files
and symlinks to images count like any other file.

Settings are read from fitwidth.toml in the target directory when present,
then overridden by the flags below.

Run 'fitwidth gen-config' to print a documented fitwidth.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing the images
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Maximum width in pixels [default: 800]
    #[arg(long, short = 'w')]
    max_width: Option<u32>,

    /// Resampling filter [default: lanczos3]
    #[arg(long, value_enum)]
    filter: Option<ResampleFilter>,

    /// What to do when a file cannot be decoded or written [default: abort]
    #[arg(long, value_enum)]
    on_error: Option<OnError>,

    /// Also resize images in sub-directories
    #[arg(long, short = 'r')]
    recursive: bool,

    /// Leave out files and directories whose name starts with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Report what would change without writing anything
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Print the run report as JSON instead of status lines. If the run
    /// aborts, the files handled so far are still printed
    #[arg(long)]
    json: bool,

    /// Config file to use instead of <DIR>/fitwidth.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock fitwidth.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let overrides = Overrides {
        max_width: cli.max_width,
        filter: cli.filter,
        on_error: cli.on_error,
        recursive: cli.recursive,
        skip_hidden: cli.skip_hidden,
        dry_run: cli.dry_run,
    };
    let resize_config = config::resolve(&cli.dir, cli.config.as_deref(), &overrides)?;

    let report = if cli.json {
        let report = match process::process(&cli.dir, &resize_config, None) {
            Ok(report) => report,
            Err(err) => {
                if let Some(partial) = err.partial_report() {
                    output::print_json_report(partial)?;
                }
                return Err(err.into());
            }
        };
        output::print_json_report(&report)?;
        report
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_process_event(&event) {
                    println!("{}", line);
                }
            }
        });
        let result = process::process(&cli.dir, &resize_config, Some(tx));
        printer
            .join()
            .map_err(|_| "status printer thread panicked")?;
        let report = result?;
        output::print_summary(&report);
        report
    };

    if report.failed() > 0 {
        return Err(format!("{} file(s) could not be resized", report.failed()).into());
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("fitwidth={default_level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
