//! pyhl - print Python source with syntax highlighting

use std::env;
use std::fs;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pyhl::config::Config;
use pyhl::error::{HighlightError, Result};
use pyhl::render::Renderer;
use pyhl::syntax::{HighlightCache, LineStartRule, Theme};

/// Command line options layered over the config file
#[derive(Debug, Default)]
struct Options {
    files: Vec<PathBuf>,
    theme: Option<PathBuf>,
    line_numbers: bool,
    legacy_line_start: bool,
    dump_tokens: bool,
    no_color: bool,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let mut config = Config::load();
    if options.line_numbers {
        config.show_line_numbers = true;
    }
    if options.legacy_line_start {
        config.line_start_rule = LineStartRule::LegacyWhitespace;
    }

    let theme = match options.theme.as_ref().or(config.theme_path.as_ref()) {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };

    let stdout = io::stdout();
    let color = !options.no_color && stdout.is_tty();
    let mut renderer = Renderer::new(BufWriter::new(stdout.lock()), config.tab_width)
        .with_line_numbers(config.show_line_numbers)
        .with_color(color);

    if options.files.is_empty() {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        highlight_source(&source, &config, &theme, options.dump_tokens, &mut renderer)?;
    }

    for path in &options.files {
        info!(path = %path.display(), "highlighting");
        let source = fs::read_to_string(path)?;
        highlight_source(&source, &config, &theme, options.dump_tokens, &mut renderer)?;
    }

    renderer.flush()
}

fn highlight_source<W: io::Write>(
    source: &str,
    config: &Config,
    theme: &Theme,
    dump_tokens: bool,
    renderer: &mut Renderer<W>,
) -> Result<()> {
    let lines: Vec<&str> = source.lines().collect();
    let mut cache = HighlightCache::new(config.highlight_options());
    cache.rehighlight_all(&lines);
    debug!(lines = lines.len(), "classified source");

    for (idx, text) in lines.iter().enumerate() {
        let Some(entry) = cache.cached(idx) else {
            continue;
        };
        if dump_tokens {
            renderer.dump_tokens(idx, text, entry.initial_state, &entry.line)?;
        } else {
            renderer.render_line(idx, text, &entry.line.styled(theme))?;
        }
    }
    Ok(())
}

/// Parse arguments; `None` means the invocation was fully handled
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--legacy-line-start" => options.legacy_line_start = true,
            "--dump-tokens" => options.dump_tokens = true,
            "--no-color" => options.no_color = true,
            "--theme" => {
                let path = iter
                    .next()
                    .ok_or_else(|| HighlightError::Message("--theme needs a path".to_string()))?;
                options.theme = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => {
                return Err(HighlightError::Message(format!("Unknown option: {}", other)));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("pyhl {} - incremental Python syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pyhl [OPTIONS] [FILE]...");
    println!();
    println!("Reads standard input when no FILE is given.");
    println!();
    println!("Options:");
    println!("  -h, --help            Show this help message");
    println!("  -V, --version         Show version information");
    println!("  -n, --line-numbers    Prefix lines with their number");
    println!("      --theme PATH      Load styles from a TOML theme file");
    println!("      --legacy-line-start");
    println!("                        Only look ahead from keywords before any whitespace");
    println!("      --dump-tokens     Print scanner tokens instead of highlighted text");
    println!("      --no-color        Disable ANSI styling");
    println!();
    println!("Settings are read from ~/.pyhl.conf; set RUST_LOG for diagnostics.");
}

fn print_version() {
    println!("pyhl {}", env!("CARGO_PKG_VERSION"));
}
