//! preconfig CLI entry point.
//!
//! Resolves a configuration template read from a file or stdin and writes
//! the result to stdout, optionally re-formatted as JSON or YAML.

mod diagnostic;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, ValueEnum};
use miette::Report;
use owo_colors::OwoColorize;
use preconfig::{OutputFormat, Template, reformat};

use diagnostic::SyntaxDiagnostic;

/// Configuration template transpiler.
#[derive(Debug, Parser)]
#[command(name = "preconfig")]
#[command(about = "Resolve ${source:path} controls in configuration templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Template file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Output format for the resolved template
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Parameters in key=value form (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,
}

/// Output format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected key=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    match run(cli) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}

/// The template text plus where it came from.
struct Input {
    name: String,
    content: String,
    cwd: PathBuf,
}

fn run(cli: Cli) -> miette::Result<i32> {
    let input = match read_input(cli.file.as_deref()) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            return Ok(exitcode::IOERR);
        }
    };

    let template = match Template::new(input.content.clone(), &input.cwd) {
        Ok(template) => template,
        Err(error) => {
            let report = Report::new(SyntaxDiagnostic::new(&input.name, &input.content, &error));
            eprintln!("{:?}", report);
            return Ok(exitcode::DATAERR);
        }
    };

    let parameter: HashMap<String, String> = cli.params.into_iter().collect();
    let resolved = match template.resolve(&parameter) {
        Ok(resolved) => resolved,
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            return Ok(exitcode::DATAERR);
        }
    };

    match reformat(&resolved, cli.format.into()) {
        Ok(output) => {
            println!("{}", output);
            Ok(exitcode::OK)
        }
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            Ok(exitcode::DATAERR)
        }
    }
}

/// Read the template from the given file, or stdin when absent.
fn read_input(file: Option<&Path>) -> Result<Input, String> {
    match file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            let cwd = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            Ok(Input {
                name: path.display().to_string(),
                content,
                cwd,
            })
        }
        None => {
            let content =
                io::read_to_string(io::stdin()).map_err(|e| format!("cannot read stdin: {}", e))?;
            let cwd = std::env::current_dir()
                .map_err(|e| format!("cannot determine working directory: {}", e))?;
            Ok(Input {
                name: "<stdin>".to_string(),
                content,
                cwd,
            })
        }
    }
}
