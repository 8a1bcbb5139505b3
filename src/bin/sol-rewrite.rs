//! CLI for sol-rewrite.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use sol_rewrite::diff::unified_diff;
use sol_rewrite::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sol-rewrite")]
#[command(author, version, about = "Tree-wide rewrites for Solidity sources", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TreeArgs {
    /// Directory to scan
    root: PathBuf,

    /// File name suffix to rewrite
    #[arg(short, long, default_value = rules::SOLIDITY_SUFFIX)]
    extension: String,

    /// Glob (relative to the root) of files to skip; repeatable
    #[arg(long)]
    exclude: Vec<String>,

    /// Print a unified diff of each rewritten file
    #[arg(long)]
    show_diff: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert the missing space in `revert<Error>();` statements
    RevertSpacing {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Replace one exact `pragma solidity` version with another
    Pragma {
        #[command(flatten)]
        tree: TreeArgs,

        /// Version to replace, exactly as written after `pragma solidity`
        #[arg(long, default_value = rules::DEFAULT_PRAGMA_FROM)]
        from: String,

        /// Replacement version
        #[arg(long, default_value = rules::DEFAULT_PRAGMA_TO)]
        to: String,
    },

    /// Run the rules described in a YAML or JSON config file
    Run {
        /// Path to the config file
        #[arg(short, long)]
        config: PathBuf,

        /// Override the config's root directory
        #[arg(long)]
        root: Option<PathBuf>,

        /// Print a unified diff of each rewritten file
        #[arg(long)]
        show_diff: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::RevertSpacing { tree } => {
            let preset = RulePreset::revert_spacing()?;
            cmd_preset(tree, preset)
        }
        Commands::Pragma { tree, from, to } => {
            cmd_preset(tree, RulePreset::pragma_update(&from, &to))
        }
        Commands::Run {
            config,
            root,
            show_diff,
        } => cmd_run(config, root, show_diff),
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("sol_rewrite={level}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn cmd_preset(tree: TreeArgs, preset: RulePreset) -> Result<()> {
    let rewriter = Rewriter::in_dir(&tree.root)
        .files(|f| f.suffix(&tree.extension).excludes(&tree.exclude))
        .transform(preset.transform);

    execute(rewriter, &preset.report, preset.done_marker, tree.show_diff)
}

fn cmd_run(config: PathBuf, root: Option<PathBuf>, show_diff: bool) -> Result<()> {
    let mut config = RewriteConfig::load(&config)
        .with_context(|| format!("Failed to load config {}", config.display()))?;
    if let Some(root) = root {
        config.root = root;
    }

    let rewriter = config.rewriter().context("Invalid rewrite rules")?;
    execute(rewriter, &config.report, config.done_marker, show_diff)
}

fn execute(rewriter: Rewriter, report: &str, done_marker: bool, show_diff: bool) -> Result<()> {
    let root = rewriter.root().to_path_buf();

    let result = rewriter
        .run_with(|change| {
            println!("{}{}", report, change.path.display());
            if show_diff {
                print!(
                    "{}",
                    unified_diff(&change.original, &change.transformed, &change.path)
                );
            }
        })
        .with_context(|| format!("Rewrite of {} failed", root.display()))?;

    tracing::info!("{}", result.summary);

    if done_marker {
        println!("Done!");
    }
    Ok(())
}
