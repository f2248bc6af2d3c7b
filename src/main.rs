use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rankdex::plugin::quotes::{
    load_quotes, movie_quotes_plugin_configuration, movies_registry, quote_search_plugin,
};
use rankdex::{SearchContext, SearchPluginConfiguration, output};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of hits fetched when neither `--size` nor the context sets one
const DEFAULT_SIZE: i64 = 10;

#[derive(Parser)]
#[command(name = "rankdex", version)]
#[command(about = "In-memory ranked search over movie quotes")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a movie quote collection
    Search {
        /// JSON file with the quote collection
        data: PathBuf,

        /// Query words (joined into the `q` context field)
        query: Vec<String>,

        /// Number of hits to fetch
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Extra context field as key=value (repeatable)
        #[arg(short = 'C', long = "context", value_parser = parse_key_value)]
        context: Vec<(String, String)>,

        /// Plugin configuration file (defaults to the built-in movie quote configuration)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show index statistics for a quote collection
    Stats {
        /// JSON file with the quote collection
        data: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the plugin configuration as JSON
    Config {
        /// Query template whose {{ variables }} become context fields
        #[arg(short, long)]
        template: Option<String>,

        /// Configuration file to start from
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rankdex::init_tracing(cli.verbose);

    match cli.command {
        Commands::Search {
            data,
            query,
            size,
            context,
            config,
            json,
            no_color,
        } => {
            let configuration = load_configuration(config.as_deref())?;

            let mut raw = SearchContext::new();
            raw.extend(context);
            if !query.is_empty() {
                raw.insert("q".to_string(), query.join(" "));
            }
            if let Some(size) = size {
                raw.insert("size".to_string(), size.to_string());
            }

            let resolved = configuration
                .resolve_context(&raw)
                .context("Invalid search context")?;
            let size = match resolved.get("size") {
                Some(value) => value
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("Invalid size: {value}"))?,
                None => DEFAULT_SIZE,
            };
            debug!(?resolved, size, "resolved search context");

            let quotes = load_quotes(&data)
                .with_context(|| format!("Failed to load quotes from {}", data.display()))?;
            let plugin = movies_registry(quotes)
                .create(&configuration)
                .with_context(|| format!("Failed to create plugin '{}'", configuration.name))?;

            let results = plugin.fetch(&resolved, size)?;
            if json {
                output::print_json(&results)?;
            } else {
                output::print_results(&results, !no_color)?;
            }
        }
        Commands::Stats {
            data,
            json,
            no_color,
        } => {
            let quotes = load_quotes(&data)
                .with_context(|| format!("Failed to load quotes from {}", data.display()))?;
            let stats = quote_search_plugin(&quotes).index().stats();
            if json {
                output::print_json(&stats)?;
            } else {
                output::print_stats(&stats, !no_color)?;
            }
        }
        Commands::Config { template, config } => {
            let mut configuration = load_configuration(config.as_deref())?;
            if let Some(template) = template {
                configuration = configuration.with_template_fields(&template);
            }
            println!("{}", configuration.to_json_pretty()?);
        }
    }

    Ok(())
}

fn load_configuration(path: Option<&Path>) -> Result<SearchPluginConfiguration> {
    match path {
        Some(path) => SearchPluginConfiguration::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(movie_quotes_plugin_configuration()),
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
