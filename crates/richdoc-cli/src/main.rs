mod config;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use richdoc_color::{Adjustment, ColorResolver, Rgb};
use richdoc_core::{extract_text, parse_document, to_markdown, word_count, Node, TextMode};
use richdoc_view::ViewService;

use config::{parse_mark_order, Config};

#[derive(Parser)]
#[command(name = "richdoc")]
#[command(about = "Render, export and summarize rich documents stored as JSON")]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Nesting order for overlapping marks: authored or canonical
    #[arg(long, global = true, value_parser = parse_mark_order_arg)]
    mark_order: Option<richdoc_core::MarkOrder>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a document as Markdown
    Markdown {
        /// Document file; reads stdin when absent or "-"
        input: Option<PathBuf>,
    },
    /// Extract plain text from a document
    Text {
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Mode::Paragraphs)]
        mode: Mode,

        /// Words kept in preview mode
        #[arg(long)]
        words: Option<usize>,
    },
    /// Count the words of a document
    Words { input: Option<PathBuf> },
    /// Render a document as HTML
    Html { input: Option<PathBuf> },
    /// Resolve a color to one legible on the dark and light backgrounds
    Color {
        /// Hex color such as #FFFF00
        hex: String,

        /// Minimum contrast ratio against each background
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Text of paragraphs only
    Paragraphs,
    /// First words of all text, with an ellipsis when cut
    Preview,
}

impl From<Mode> for TextMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Paragraphs => TextMode::Paragraphs,
            Mode::Preview => TextMode::Preview,
        }
    }
}

fn parse_mark_order_arg(value: &str) -> std::result::Result<richdoc_core::MarkOrder, String> {
    parse_mark_order(value).ok_or_else(|| format!("unknown mark order '{}'", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(order) = cli.mark_order {
        config.mark_order = order;
    }

    // Logs go to stderr so stdout carries only document output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Markdown { input } => {
            let doc = load_document(input.as_deref())?;
            println!("{}", to_markdown(&doc, &config.markdown_options()));
        }
        Commands::Text { input, mode, words } => {
            if let Some(words) = words {
                config.preview_words = words;
            }
            let doc = load_document(input.as_deref())?;
            println!("{}", extract_text(&doc, mode.into(), &config.text_options()));
        }
        Commands::Words { input } => {
            let doc = load_document(input.as_deref())?;
            println!("{}", word_count(&doc));
        }
        Commands::Html { input } => {
            let json = read_input(input.as_deref())?;
            let service = ViewService::with_options(config.view_options());
            println!("{}", service.render_html(&json));
        }
        Commands::Color { hex, threshold } => {
            if let Some(threshold) = threshold {
                config.palette.threshold = threshold;
            }
            println!("{}", resolve_color(&hex, &config)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_document(path: Option<&Path>) -> Result<Node> {
    let json = read_input(path)?;
    let doc = parse_document(&json).context("input is not a rich document")?;
    debug!(root = %doc.type_name(), "loaded document");
    Ok(doc)
}

fn resolve_color(hex: &str, config: &Config) -> Result<String> {
    let resolver = ColorResolver::with_palette(&config.palette).context("invalid palette")?;
    let color = Rgb::from_hex(hex)?;

    let resolved = match resolver.adjust(color) {
        Adjustment::Compliant => hex.to_string(),
        Adjustment::Adjusted { color, delta } => {
            info!(from = %hex, to = %color.to_hex(), delta, "adjusted lightness");
            color.to_hex()
        }
        Adjustment::Unresolvable => {
            info!(
                color = %hex,
                threshold = resolver.threshold(),
                "no compliant lightness, keeping color"
            );
            hex.to_string()
        }
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_color_keeps_color_without_compliant_lightness() {
        // No lightness reaches 4.5:1 on both #1e1e1e and #FAF9F6
        let config = Config::default();
        assert_eq!(resolve_color("#FFFF00", &config).unwrap(), "#FFFF00");
        assert_eq!(resolve_color("#777777", &config).unwrap(), "#777777");
    }

    #[test]
    fn test_resolve_color_relaxed_threshold_adjusts_yellow() {
        let mut config = Config::default();
        config.palette.threshold = 3.0;
        let resolved = resolve_color("#FFFF00", &config).unwrap();
        assert_ne!(resolved, "#FFFF00");

        let resolver = ColorResolver::with_palette(&config.palette).unwrap();
        assert!(resolver.is_compliant(Rgb::from_hex(&resolved).unwrap()));
    }

    #[test]
    fn test_resolve_color_rejects_invalid_hex() {
        assert!(resolve_color("not-a-color", &Config::default()).is_err());
    }

    #[test]
    fn test_mark_order_arg() {
        assert!(parse_mark_order_arg("canonical").is_ok());
        assert_eq!(
            parse_mark_order_arg("sideways").unwrap_err(),
            "unknown mark order 'sideways'"
        );
    }

    #[test]
    fn test_cli_parses_text_mode() {
        let args = ["richdoc", "text", "doc.json", "--mode", "preview", "--words", "5"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Text { input, mode, words } => {
                assert_eq!(input, Some(PathBuf::from("doc.json")));
                assert!(matches!(mode, Mode::Preview));
                assert_eq!(words, Some(5));
            }
            _ => panic!("expected text command"),
        }
    }
}
