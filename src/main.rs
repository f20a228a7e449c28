use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taxlca::{classify_reads, read_tree, LcaEngine};

#[derive(Parser, Debug)]
#[command(name = "taxlca", about = "Taxonomic LCA classifier over a rooted taxonomy tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collapse each read's taxon hits into their lowest common ancestor.
    Classify {
        /// Taxonomy tree edges (`father son` per line).
        tree: PathBuf,
        /// Query rows (`read_id taxon_id kmer_count` per line, rows for a
        /// read contiguous).
        queries: PathBuf,
    },
    /// Print structural statistics for a taxonomy tree.
    Info {
        /// Taxonomy tree edges (`father son` per line).
        tree: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { tree, queries } => run_classify(tree, queries)?,
        Commands::Info { tree } => run_info(tree)?,
    }

    Ok(())
}

fn build_engine(tree_path: &PathBuf) -> Result<LcaEngine<String>> {
    let reader = BufReader::new(File::open(tree_path).with_context(|| {
        format!("failed to open tree file {}", tree_path.display())
    })?);
    let builder = read_tree(reader)
        .with_context(|| format!("failed to parse tree file {}", tree_path.display()))?;
    let engine = LcaEngine::build(builder).context("failed to build LCA engine")?;
    Ok(engine)
}

fn run_classify(tree_path: PathBuf, queries_path: PathBuf) -> Result<()> {
    let engine = build_engine(&tree_path)?;

    let queries = BufReader::new(File::open(&queries_path).with_context(|| {
        format!("failed to open query file {}", queries_path.display())
    })?);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = classify_reads(&engine, queries, &mut out)
        .with_context(|| format!("failed to classify {}", queries_path.display()))?;
    out.flush()?;

    if summary.reads_skipped > 0 {
        eprintln!(
            "warning: skipped {} of {} reads with unresolvable taxa",
            summary.reads_skipped,
            summary.reads_classified + summary.reads_skipped
        );
    }

    Ok(())
}

fn run_info(tree_path: PathBuf) -> Result<()> {
    let engine = build_engine(&tree_path)?;

    println!("vertices\t{}", engine.num_vertices());
    println!("root\t{}", engine.root()?);
    println!("tour length\t{}", engine.tour_len());
    println!("max depth\t{}", engine.max_depth());

    Ok(())
}
