use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docweave::cli::commands::{self, docstring::DocstringOptions, generate::GenerateOptions};
use docweave::cli::{LlmOverrides, Output};
use docweave::config::{DocLanguage, ManagerStrategy};
use docweave::types::Directive;

#[derive(Parser)]
#[command(name = "docweave")]
#[command(
    version,
    about = "Docstring and project documentation generator for Python codebases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,

    #[arg(long, global = true, help = "Text-generation provider (openai, deepseek, ollama)")]
    provider: Option<String>,

    #[arg(long, global = true, help = "Model to use")]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clear, fill, polish or translate docstrings
    Docstring {
        #[arg(default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(long, short, help = "Directive: clear, fill, polish, translate")]
        directive: Option<String>,
        #[arg(long, short, help = "Strategy: base, simple, custom")]
        strategy: Option<ManagerStrategy>,
        #[arg(long, short, help = "Docstring language (target language for translate)")]
        language: Option<String>,
        #[arg(long = "dry-run", help = "Compute edits without writing files")]
        dry_run: bool,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Generate README, requirements, .gitignore and MkDocs site
    Generate {
        #[arg(default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(long)]
        readme: bool,
        #[arg(long)]
        requirements: bool,
        #[arg(long)]
        gitignore: bool,
        #[arg(long)]
        mkdocs: bool,
        #[arg(long, short, help = "Documentation language: zh, en, bilingual")]
        language: Option<DocLanguage>,
    },

    /// Run every documentation step on a project
    Standardize {
        #[arg(default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(long = "no-docstrings", help = "Skip docstring generation")]
        no_docstrings: bool,
        #[arg(long = "no-mkdocs", help = "Skip the MkDocs site")]
        no_mkdocs: bool,
    },

    /// Serve the generated MkDocs site locally
    Serve {
        #[arg(default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(long, short, help = "Port (default: agent.serve_port)")]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (merged from all sources)
    Show {
        #[arg(long, short, default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path {
        #[arg(long, short, default_value = ".", help = "Project root")]
        path: PathBuf,
    },
    /// Write a commented configuration template
    Init {
        #[arg(long, short, default_value = ".", help = "Project root")]
        path: PathBuf,
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = Output::new().quiet(cli.quiet);
    let overrides = LlmOverrides {
        provider: cli.provider,
        model: cli.model,
    };

    let success = match cli.command {
        Commands::Docstring {
            path,
            directive,
            strategy,
            language,
            dry_run,
            json,
        } => {
            let directive = directive
                .map(|name| Directive::from_parts(&name, language.as_deref()))
                .transpose()
                .map_err(anyhow::Error::msg)?;
            commands::docstring::run(
                DocstringOptions {
                    path,
                    directive,
                    strategy,
                    language,
                    dry_run,
                    json,
                },
                &overrides,
                &output,
            )?
        }
        Commands::Generate {
            path,
            readme,
            requirements,
            gitignore,
            mkdocs,
            language,
        } => commands::generate::run(
            GenerateOptions {
                path,
                readme,
                requirements,
                gitignore,
                mkdocs,
                language,
            },
            &overrides,
            &output,
        )?,
        Commands::Standardize {
            path,
            no_docstrings,
            no_mkdocs,
        } => commands::standardize::run(
            commands::standardize::StandardizeOptions {
                path,
                docstrings: !no_docstrings,
                mkdocs: !no_mkdocs,
            },
            &overrides,
            &output,
        )?,
        Commands::Serve { path, port } => {
            commands::serve::run(&path, port, &overrides, &output)?
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show { path, format } => commands::config::show(&path, &format)?,
                ConfigAction::Path { path } => commands::config::path(&path, &output)?,
                ConfigAction::Init {
                    path,
                    global,
                    force,
                } => commands::config::init(&path, global, force, &output)?,
            }
            true
        }
    };

    Ok(success)
}
