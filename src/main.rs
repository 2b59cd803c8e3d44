//! cleanindent - a small terminal editor with clean auto-indentation

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use cleanindent::buffer::Buffer;
use cleanindent::config::Config;
use cleanindent::editor::EditorState;
use cleanindent::error::{EditorError, Result};
use cleanindent::terminal::Terminal;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    simple: bool,
    disabled: bool,
    log_file: Option<PathBuf>,
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
    let mut opts = Options::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("cleanindent {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--simple" => opts.simple = true,
            "--disabled" => opts.disabled = true,
            "--log" => match iter.next() {
                Some(path) => opts.log_file = Some(PathBuf::from(path)),
                None => return Err(EditorError::Message("--log needs a file".into())),
            },
            _ if arg.starts_with('-') => {
                return Err(EditorError::Message(format!("unknown option: {}", arg)));
            }
            _ => opts.file = Some(PathBuf::from(arg)),
        }
    }

    if let Some(path) = &opts.log_file {
        init_logging(path)?;
    }

    // A broken config file should not keep the editor from starting
    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => {
            log::warn!("using default configuration: {}", e);
            (Config::default(), Some(e))
        }
    };
    if opts.simple {
        config.simple_indent = true;
    }
    if opts.disabled {
        config.enabled = false;
    }

    let buffer = match &opts.file {
        Some(path) => Buffer::open(path)?,
        None => Buffer::new("*scratch*"),
    };

    let mut editor = EditorState::new(buffer, &config);
    if let Some(e) = config_error {
        editor.display.set_message(e.to_string());
    }

    let mut terminal = Terminal::new()?;
    editor.run(&mut terminal)?;

    Ok(())
}

/// Send log output to a file; the terminal belongs to the editor
fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn print_usage() {
    println!("cleanindent {} - auto-indent that cleans up after itself", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: cleanindent [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!("  --simple       Copy the previous line's indentation on RET");
    println!("  --disabled     Start with clean indent mode off");
    println!("  --log FILE     Write debug log to FILE");
    println!();
    println!("Key bindings:");
    println!("  RET            Newline and indent; unused indentation is trimmed");
    println!("  M-Backspace    Unindent to the previous level");
    println!("  C-j            Newline and indent without tracking");
    println!("  C-x m          Toggle clean indent mode");
    println!("  C-x s          Toggle simple indentation");
    println!("  C-x C-s        Save");
    println!("  C-x C-c        Quit");
    println!();
    println!("Configuration is read from ~/.cleanindent.toml");
}
