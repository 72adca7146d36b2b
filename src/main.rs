//! OmniSumma CLI - document, audio and video summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use omnisumma::credentials::{self, CredentialStore};
use omnisumma::{
    logging, Config, LengthType, SummarizationOptions, Summarizer, SummaryReport, SummaryType,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "omnisumma")]
#[command(author, version, about = "Summarise documents, audio and video", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Use this config file instead of searching for omnisumma.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a file
    Summarise(SummariseArgs),
    /// Manage the stored OpenAI API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct SummariseArgs {
    /// File to summarise
    file: PathBuf,
    /// Summary length
    #[arg(long, value_enum)]
    length: Option<LengthType>,
    /// Summary style (AI only)
    #[arg(long = "type", value_enum)]
    summary_type: Option<SummaryType>,
    /// Output language (AI only)
    #[arg(long)]
    language: Option<String>,
    /// Skip bullet points
    #[arg(long)]
    no_bullets: bool,
    /// Skip keywords
    #[arg(long)]
    no_keywords: bool,
    /// Include sentiment
    #[arg(long)]
    sentiment: bool,
    /// Include topics
    #[arg(long)]
    topics: bool,
    /// Include chapter summaries
    #[arg(long)]
    chapters: bool,
    /// Use local heuristics even when an API key is set
    #[arg(long)]
    local: bool,
    /// Show raw extracted text instead of summary
    #[arg(long)]
    raw: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Write the text export to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SummariseArgs {
    /// Apply command-line flags on top of the configured defaults.
    fn options(&self, defaults: &SummarizationOptions) -> SummarizationOptions {
        let mut options = defaults.clone();
        if let Some(length) = self.length {
            options.length_type = length;
        }
        if let Some(summary_type) = self.summary_type {
            options.summary_type = summary_type;
        }
        if let Some(language) = &self.language {
            options.language = language.clone();
        }
        options.bullet_points &= !self.no_bullets;
        options.extract_keywords &= !self.no_keywords;
        options.include_sentiment |= self.sentiment;
        options.topic_detection |= self.topics;
        options.chapter_summarization |= self.chapters;
        options
    }
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save an API key (prompts when omitted)
    Set {
        key: Option<String>,
    },
    /// Show the saved key, masked
    Show,
    /// Remove the saved key
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Summarise(args) => summarise(&config, &args).await?,
        Commands::Key { action } => manage_key(&config, action)?,
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "omnisumma", &mut std::io::stdout());
        }
    }

    Ok(())
}

async fn summarise(config: &Config, args: &SummariseArgs) -> anyhow::Result<()> {
    let store = open_store(&config.storage.path);
    let api_key = credentials::resolve_api_key(config.api.openai_key.as_deref(), store.as_ref());
    let summarizer = Summarizer::new(config, api_key)?;

    println!("Reading: {}", args.file.display());
    let source = summarizer.extract(&args.file).await?;

    if args.raw {
        println!("\n=== {} ===\n", source.file_name);
        println!("{}", source.text);
        println!("\n--- Extracted {} characters ---", source.text.len());
        return Ok(());
    }

    let options = args.options(&config.defaults);
    let mode = if summarizer.has_agent() && !args.local {
        "with OpenAI"
    } else {
        "locally"
    };
    println!("Summarising {} characters {}...\n", source.text.len(), mode);

    let report = summarizer.summarize_source(&source, &options, args.local).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = &args.output {
        let path = if path.is_dir() {
            path.join(report.export_file_name())
        } else {
            path.clone()
        };
        std::fs::write(&path, report.to_text())?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}

fn print_report(report: &SummaryReport) {
    let result = &report.result;

    println!("{}", format!("=== {} ===", report.title).bold());
    let mut meta = format!("{} · {:?}", report.reading_time, report.source_type);
    if let Some(sentiment) = result.sentiment {
        meta.push_str(&format!(" · {}", sentiment));
    }
    println!("{}\n", meta.dimmed());

    println!("{}", "Summary:".cyan().bold());
    println!("{}\n", result.summary);

    if !result.bullet_points.is_empty() {
        println!("{}", "Key Points:".cyan().bold());
        for point in &result.bullet_points {
            println!("  • {}", point);
        }
        println!();
    }

    if !result.keywords.is_empty() {
        println!("{}", "Keywords:".cyan().bold());
        println!("  {}\n", result.keywords.join(", "));
    }

    if let Some(topics) = &result.topics {
        println!("{}", "Topics:".cyan().bold());
        println!("  {}\n", topics.join(", "));
    }

    if let Some(chapters) = &result.chapters {
        println!("{}", "Chapters:".cyan().bold());
        for chapter in chapters {
            println!("  {}", chapter.title.bold());
            println!("  {}\n", chapter.content.replace('\n', "\n  "));
        }
    }
}

fn manage_key(config: &Config, action: KeyAction) -> anyhow::Result<()> {
    let store = CredentialStore::open(&config.storage.path)?;

    match action {
        KeyAction::Set { key } => {
            let key = match key {
                Some(key) => key,
                None => dialoguer::Password::new()
                    .with_prompt("OpenAI API key")
                    .interact()?,
            };
            store.set(&key)?;
            println!("{}", "API key saved".green());
        }
        KeyAction::Show => match store.get()? {
            Some(key) => println!("{}", credentials::mask(&key)),
            None => println!("No API key saved. Summaries will use local heuristics."),
        },
        KeyAction::Clear => {
            if store.clear()? {
                println!("API key removed");
            } else {
                println!("No API key was saved");
            }
        }
    }

    Ok(())
}

/// Open the credential store, treating an unavailable store as empty.
fn open_store(path: &Path) -> Option<CredentialStore> {
    match CredentialStore::open(path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "credential store unavailable");
            None
        }
    }
}
