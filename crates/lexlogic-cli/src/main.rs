//! lexlogic - inspect and drive regulation formalizations from the terminal.
//!
//! Talks to the formalization backend to show highlighted fragments, rule
//! listings and dependency graphs, create fragments and edit rules, trigger
//! (re)generation, run examples, chat, follow agentic logs, and serve a
//! local viewer page.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lexlogic_core::models::{FragmentId, LlmIdentifier, RuleId, UpdateRule};
use lexlogic_core::{Config, HttpBackend};

mod commands;
mod output;
mod serve;

use commands::{chat, examples, fragments, generate, graph, logs, rules};
use commands::generate::Target;

#[derive(Parser)]
#[command(name = "lexlogic")]
#[command(about = "Inspect regulation formalizations: atoms, rules, graphs, examples and chat", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./lexlogic.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List regulation fragments, or create and delete them
    Fragments {
        #[command(subcommand)]
        action: Option<FragmentAction>,
    },
    /// Show a fragment with its atoms highlighted
    Show {
        fragment: FragmentId,
        /// Render this atom's spans in the emphasized color
        #[arg(long)]
        focus: Option<i64>,
        /// Print `<atom id="N">` markup instead of colors
        #[arg(long)]
        annotated: bool,
    },
    /// List a fragment's rules, one body literal per line
    Rules { fragment: FragmentId },
    /// Add, edit or delete a single rule
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },
    /// Delete every atom or rule of a fragment
    Clear {
        #[arg(value_enum)]
        target: Target,
        fragment: FragmentId,
    },
    /// Print the full generated program
    Program { fragment: FragmentId },
    /// Print the rule/atom dependency graph
    Graph {
        fragment: FragmentId,
        /// One node per rule instead of one per distinct head
        #[arg(long)]
        per_rule: bool,
        /// Read references from a real parse instead of token matching
        #[arg(long)]
        parsed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Ask the backend to generate atoms or rules
    Generate {
        #[arg(value_enum)]
        target: Target,
        fragment: FragmentId,
    },
    /// Regenerate atoms or rules with feedback
    Regenerate {
        #[arg(value_enum)]
        target: Target,
        fragment: FragmentId,
        #[arg(short, long)]
        feedback: String,
    },
    /// Run the fragment's program against facts from a file
    Run {
        fragment: FragmentId,
        #[arg(long)]
        facts: PathBuf,
    },
    /// Generate example facts, optionally running them
    Examples {
        fragment: FragmentId,
        #[arg(long)]
        run: bool,
    },
    /// Show the chat, or send a message when one is given
    Chat {
        fragment: FragmentId,
        message: Vec<String>,
    },
    /// Show the agentic log
    Logs {
        fragment: FragmentId,
        /// Keep polling for new entries
        #[arg(short, long)]
        follow: bool,
    },
    /// Show what a fragment has cost so far
    Cost { fragment: FragmentId },
    /// Print the effective configuration as TOML
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        default: bool,
    },
    /// Serve a local page with the highlighted text and dependency graph
    Serve {
        fragment: FragmentId,
        #[arg(short, long)]
        port: Option<u16>,
        /// Don't open the browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Subcommand)]
enum FragmentAction {
    /// Create a fragment from a text file
    Create {
        title: String,
        /// File holding the regulation text
        #[arg(long)]
        file: PathBuf,
        /// Where the text comes from, e.g. a document and article
        #[arg(long)]
        source: Option<String>,
        /// Model to formalize with
        #[arg(long, default_value = "GPT_4o_MINI")]
        llm: LlmIdentifier,
    },
    /// Delete a fragment with its atoms and rules
    Delete { fragment: FragmentId },
}

#[derive(Subcommand)]
enum RuleAction {
    /// Add a rule to a fragment
    Add {
        fragment: FragmentId,
        /// Clause text, e.g. "flies(X) :- bird(X)."
        definition: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Mark the rule as a goal
        #[arg(long)]
        goal: bool,
    },
    /// Change a rule's definition, description or goal flag
    Edit {
        rule: RuleId,
        #[arg(long)]
        definition: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        goal: Option<bool>,
    },
    /// Delete a rule
    Delete { rule: RuleId },
}

/// Log to stderr, filtered by `RUST_LOG` or else the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.as_deref()).wrap_err("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let backend = HttpBackend::from_config(&config.backend)?;

    match cli.command {
        Commands::Fragments { action: None } => fragments::list(&backend).await,
        Commands::Fragments {
            action:
                Some(FragmentAction::Create {
                    title,
                    file,
                    source,
                    llm,
                }),
        } => fragments::create(&backend, title, &file, source, llm).await,
        Commands::Fragments {
            action: Some(FragmentAction::Delete { fragment }),
        } => fragments::delete(&backend, fragment).await,
        Commands::Show {
            fragment,
            focus,
            annotated,
        } => fragments::show(&backend, &config, fragment, focus, annotated).await,
        Commands::Rules { fragment } => rules::list(&backend, fragment).await,
        Commands::Rule { action } => match action {
            RuleAction::Add {
                fragment,
                definition,
                description,
                goal,
            } => rules::add(&backend, fragment, definition, description, goal).await,
            RuleAction::Edit {
                rule,
                definition,
                description,
                goal,
            } => {
                let update = UpdateRule {
                    description,
                    definition,
                    is_goal: goal,
                };
                rules::edit(&backend, rule, update).await
            }
            RuleAction::Delete { rule } => rules::delete(&backend, rule).await,
        },
        Commands::Clear { target, fragment } => generate::clear(&backend, target, fragment).await,
        Commands::Program { fragment } => rules::program(&backend, fragment).await,
        Commands::Graph {
            fragment,
            per_rule,
            parsed,
            json,
        } => {
            let options = graph::GraphOptions::from_config(&config.graph, per_rule, parsed);
            graph::print(&backend, fragment, options, json).await
        }
        Commands::Generate { target, fragment } => generate::generate(&backend, target, fragment).await,
        Commands::Regenerate {
            target,
            fragment,
            feedback,
        } => generate::regenerate(&backend, target, fragment, feedback).await,
        Commands::Run { fragment, facts } => examples::run_file(&backend, fragment, &facts).await,
        Commands::Examples { fragment, run } => examples::generated(&backend, fragment, run).await,
        Commands::Chat { fragment, message } => chat::execute(backend, fragment, message.join(" ")).await,
        Commands::Logs { fragment, follow } => logs::execute(backend, &config.logs, fragment, follow).await,
        Commands::Cost { fragment } => fragments::cost(&backend, fragment).await,
        Commands::Config { default } => {
            let text = if default {
                Config::default_config_string()
            } else {
                toml::to_string_pretty(&config)?
            };
            print!("{}", text);
            Ok(())
        }
        Commands::Serve {
            fragment,
            port,
            no_open,
        } => {
            let options = serve::ServeOptions {
                fragment,
                port: port.unwrap_or(config.serve.port),
                open_browser: config.serve.open_browser && !no_open,
            };
            serve::start_server(backend, &config, options).await
        }
    }
}
