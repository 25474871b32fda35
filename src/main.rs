use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tool_render::{
    Expandable, RenderConfig, RenderContext, Styles, ToolCall, ToolItem, ToolResult,
};

/// Render a transcript of tool calls the way the chat view shows them
#[derive(Parser, Debug)]
#[command(name = "tool-render", version, about)]
struct Cli {
    /// JSON transcript: an array of tool calls with optional results.
    /// Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Render width (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// TOML file with layout overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show full bodies instead of the first lines
    #[arg(short, long)]
    expanded: bool,

    /// Print without ANSI styling
    #[arg(long)]
    plain: bool,
}

/// One transcript entry. Children are nested under container tools.
#[derive(Debug, Deserialize)]
struct Entry {
    call: ToolCall,
    #[serde(default)]
    result: Option<ToolResult>,
    #[serde(default)]
    canceled: bool,
    #[serde(default)]
    children: Vec<Entry>,
}

impl Entry {
    fn into_item(self) -> ToolItem {
        let id = self.call.id.clone();
        let mut item = ToolItem::new(self.call, self.result, self.canceled);
        if self.children.is_empty() {
            return item;
        }
        match item.as_container_mut() {
            Some(container) => {
                for child in self.children {
                    container.add_nested_tool(child.into_item());
                }
            }
            None => tracing::warn!(%id, "children ignored on a non-container tool"),
        }
        item
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read transcript {}", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            Ok(buf)
        }
    }
}

/// Explicit `--config`, else `render.toml` in the user config directory,
/// else defaults.
fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match dirs::config_dir().map(|d| d.join("tool-render").join("render.toml")) {
            Some(p) if p.exists() => p,
            _ => return Ok(RenderConfig::default()),
        },
    };
    tracing::debug!(path = %path.display(), "loading render config");
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    RenderConfig::from_toml_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if config.home_dir.is_none() {
        config.home_dir = dirs::home_dir();
    }
    let styles = Styles::default();
    let ctx = RenderContext::new(&styles, &config);

    let input = read_input(cli.input.as_deref())?;
    let entries: Vec<Entry> = serde_json::from_str(&input).context("Invalid transcript")?;

    let width = cli.width.unwrap_or_else(|| {
        crossterm::terminal::size().map_or(100, |(cols, _)| usize::from(cols))
    });

    let mut stdout = io::stdout().lock();
    for entry in entries {
        let mut item = entry.into_item();
        if cli.expanded {
            item.toggle_expanded();
        }
        let block = item.render(&ctx, width);
        if cli.plain {
            writeln!(stdout, "{}", block.plain_text())?;
        } else {
            block.write_to(&mut stdout)?;
        }
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
