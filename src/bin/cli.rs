use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use testoutline::config::{Config, CONFIG_FILE_NAME};
use testoutline::error::OutlineError;
use testoutline::output::OutputFormat;
use testoutline::runner::RunTarget;
use testoutline::ScanOptions;

#[derive(Parser)]
#[command(
    name = "testoutline",
    about = "List the test modules and tests declared in JavaScript/TypeScript test files",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract module/test outlines from a file or directory
    Scan {
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the test-runner URL for a module or a single test
    RunUrl {
        /// Test file the module is declared in
        #[arg(long)]
        file: PathBuf,

        /// Full module path, e.g. "Unit | Service | cart > totals"
        #[arg(long, short = 'm')]
        module: String,

        /// Test name inside the module
        #[arg(long, short = 't')]
        test: Option<String>,

        /// Config file path (defaults to the nearest .testoutline.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Generate a starter .testoutline.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            path,
            config,
            format,
            output,
        } => cmd_scan(path, config, format, output),
        Commands::RunUrl {
            file,
            module,
            test,
            config,
        } => cmd_run_url(file, module, test, config),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, OutlineError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = ScanOptions {
        config_path: config,
        format,
    };

    let report = testoutline::scan(&path, &options)?;
    let rendered = testoutline::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(0)
}

fn cmd_run_url(
    file: PathBuf,
    module: String,
    test: Option<String>,
    config: Option<PathBuf>,
) -> Result<i32, OutlineError> {
    let config = match config {
        Some(path) => Config::load(&path)?,
        None => Config::load_nearest(&file)?,
    };

    let target = match test {
        Some(test) => RunTarget::test(module, test, file),
        None => RunTarget::module(module, file),
    };

    println!("{}", target.url(&config.runner)?);
    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, OutlineError> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", CONFIG_FILE_NAME);

    Ok(0)
}
