//! CLI binary for the research agent.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use research_agent::{AgentConfig, QueryOutcome, ResearchAgent};
use research_search::{score_breakdown, HttpPageFetcher, SerpApiProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Queries used by `health-check`.
const HEALTH_CHECK_QUERIES: [&str; 3] = [
    "What is the capital of France?",
    "Who developed the theory of relativity?",
    "What is the chemical symbol for gold?",
];

type Agent = ResearchAgent<SerpApiProvider, HttpPageFetcher>;

/// Research agent: answer questions from the web with cited sources.
#[derive(Parser)]
#[command(name = "research-agent", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Answer a single question.
    Ask {
        /// The question to research.
        query: String,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run a fixed set of sample queries and summarise the results.
    HealthCheck,

    /// Answer questions read line by line from stdin.
    Repl {
        /// Write the session history as JSON to this file on exit.
        #[arg(long, value_name = "PATH")]
        save_history: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("research_agent=info,research_search=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AgentConfig::load(cli.config.as_deref())?;
    let mut agent = ResearchAgent::from_config(&config)?;

    match cli.command {
        Command::Ask { query, json } => run_ask(&mut agent, &query, json).await,
        Command::HealthCheck => run_health_check(&mut agent).await,
        Command::Repl { save_history } => run_repl(agent, save_history.as_deref()).await,
    }
}

async fn run_ask(agent: &mut Agent, query: &str, json: bool) -> anyhow::Result<()> {
    let outcome = agent.process_query(query).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(query, &outcome);
    }
    Ok(())
}

async fn run_health_check(agent: &mut Agent) -> anyhow::Result<()> {
    println!("Research agent v{} health check", env!("CARGO_PKG_VERSION"));
    let mut answered = 0usize;

    for (i, query) in HEALTH_CHECK_QUERIES.iter().enumerate() {
        let outcome = agent.process_query(query).await;
        let ok = !outcome.citations.is_empty();
        if ok {
            answered += 1;
        }
        println!();
        println!("[{}/{}] {query}", i + 1, HEALTH_CHECK_QUERIES.len());
        println!("  answer:    {}", first_line(&outcome.answer));
        println!(
            "  sources:   {} evaluated, {} cited",
            outcome.metrics.sources_evaluated, outcome.metrics.sources_used
        );
        println!("  time:      {:.2}s", outcome.metrics.processing_time);
        println!("  status:    {}", if ok { "ok" } else { "no citations" });
    }

    println!();
    println!(
        "{answered}/{} queries answered with citations",
        HEALTH_CHECK_QUERIES.len()
    );
    info!(answered, "health check complete");
    Ok(())
}

async fn run_repl(mut agent: Agent, save_history: Option<&Path>) -> anyhow::Result<()> {
    eprintln!("Enter a question per line (Ctrl-D to finish).");

    // Blocking stdin reads are fine here: the agent is idle while waiting.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        let outcome = agent.process_query(query).await;
        print_outcome(query, &outcome);
    }

    let history = agent.into_history();
    println!();
    println!("Session history ({} answers):", history.responses().len());
    for record in history.responses() {
        println!(
            "- {} [{}] {:.2}s, {} sources",
            record.query,
            record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            record.processing_time,
            record.sources_used.len()
        );
    }

    if let Some(path) = save_history {
        history.save_json(path)?;
        info!(path = %path.display(), "session history saved");
    }
    Ok(())
}

fn print_outcome(query: &str, outcome: &QueryOutcome) {
    println!();
    println!("Q: {query}");
    println!("A: {}", outcome.answer);
    println!();

    let metrics = &outcome.metrics;
    print!(
        "{:.2}s | {} sources evaluated | {} cited",
        metrics.processing_time, metrics.sources_evaluated, metrics.sources_used
    );
    match metrics.token_usage {
        Some(usage) => println!(" | {} tokens", usage.total()),
        None => println!(),
    }

    for source in &outcome.citations {
        let breakdown = score_breakdown(&source.link, Some(&source.content));
        println!(
            "- {} ({}/10)\n    {}\n    {}",
            source.title,
            source.quality_score,
            source.link,
            breakdown.explain()
        );
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repl_accepts_history_path() {
        let args = ["research-agent", "repl", "--save-history", "out/history.json"];
        let cli = Cli::try_parse_from(args).expect("parse");
        match cli.command {
            Command::Repl { save_history } => {
                assert_eq!(save_history, Some(PathBuf::from("out/history.json")));
            }
            _ => panic!("expected repl"),
        }
    }

    #[test]
    fn repl_history_path_is_optional() {
        let args = ["research-agent", "--config", "c.toml", "repl"];
        let cli = Cli::try_parse_from(args).expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Command::Repl { save_history: None }));
    }
}
