//! pylight - highlight a Python file in the terminal

use std::env;
use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use pylight::error::{PylightError, Result};
use pylight::render::Renderer;
use pylight::syntax::SyntaxManager;
use pylight::Config;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    verbose: bool,
    spans: bool,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--verbose" | "-v" => options.verbose = true,
            "--spans" => options.spans = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| PylightError::Message("--config needs a path".to_string()))?;
                options.config = Some(PathBuf::from(path));
            }
            _ if arg.starts_with('-') => {
                return Err(PylightError::Message(format!("Unknown option: {}", arg)));
            }
            _ => options.file = Some(PathBuf::from(arg)),
        }
    }

    init_logging(options.verbose)?;

    let Some(path) = options.file else {
        print_usage();
        return Err(PylightError::Message("No input file".to_string()));
    };

    let config = match &options.config {
        Some(config_path) => Config::load_from(config_path)?,
        None => Config::load(),
    };
    let theme = config.theme()?;

    let source = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PylightError::FileNotFound(path.display().to_string()),
        _ => PylightError::Io(err),
    })?;
    tracing::info!(file = %path.display(), lines = source.lines().count(), "highlighting");

    let mut manager = SyntaxManager::from_config(&config);
    let highlighted = manager.highlight_text(0, &source);

    let mut renderer = Renderer::new(BufWriter::new(io::stdout().lock()), theme);
    for (idx, (text, spans)) in source.lines().zip(&highlighted).enumerate() {
        if options.spans {
            renderer.list_spans(idx + 1, text, spans)?;
        } else {
            renderer.render_line(text, spans)?;
        }
    }
    renderer.flush()?;

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| PylightError::Message(e.to_string()))
}

fn print_usage() {
    println!("pylight {} - Python syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pylight [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!("  -v, --verbose      Log debug output to stderr");
    println!("      --spans        List spans instead of painting the file");
    println!("      --config PATH  Read settings from PATH instead of ~/.pylight.toml");
}

fn print_version() {
    println!("pylight {}", env!("CARGO_PKG_VERSION"));
}
