//! Neighbor Graph CLI
//!
//! Builds a KNN/SNN graph from a delimited embedding and writes it as a
//! tab-separated edge file.
//!
//! # Usage
//!
//! ```bash
//! # SNN graph with default settings
//! cargo run --bin neighbor-graph --release -- build --input umap.csv --output graph.tsv
//!
//! # Plain KNN graph, k=15, first two dimensions only
//! cargo run --bin neighbor-graph --release -- build -i umap.tsv -o knn.tsv -k 15 --no-snn --dims 1,2
//!
//! # Print the resolved configuration
//! cargo run --bin neighbor-graph --release -- config --preset fast
//! ```

use clap::{Parser, Subcommand};
use neighbor_graph::config::{GraphConfig, OutputMode, Preset, SearchMethod, SnnScope};
use neighbor_graph::shared::{read_embedding_file, EmbeddingFormat};
use neighbor_graph::GraphPipeline;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neighbor-graph")]
#[command(about = "KNN/SNN similarity graph construction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct ConfigArgs {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset (fast, balanced, exact); ignored when --config is given
    #[arg(long, value_parser = Preset::from_str)]
    preset: Option<Preset>,

    /// Neighbors per point
    #[arg(short, long)]
    k: Option<usize>,

    /// Approximation factor for kd-tree search
    #[arg(long)]
    eps: Option<f64>,

    /// Use exhaustive search instead of the kd-tree
    #[arg(long)]
    brute_force: bool,

    /// 1-indexed embedding dimensions to use
    #[arg(long, value_delimiter = ',')]
    dims: Option<Vec<usize>>,

    /// L2-normalize points before search
    #[arg(long)]
    l2_norm: bool,

    /// Skip SNN refinement
    #[arg(long)]
    no_snn: bool,

    /// SNN prune threshold in [0, 1]
    #[arg(long)]
    prune: Option<f64>,

    /// Score all pairs sharing a neighbor, not only KNN edges
    #[arg(long)]
    shared_neighbors: bool,

    /// Worker threads (0 = auto)
    #[arg(short, long)]
    workers: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph and write it to an edge file
    Build {
        /// Embedding file, one point per line
        #[arg(short, long)]
        input: PathBuf,

        /// Edge file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Column delimiter (default: comma, tab or whitespace, from the first row)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// First line is a header
        #[arg(long)]
        header: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the resolved configuration as YAML
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
        },
    }
}

fn resolve_config(args: &ConfigArgs) -> Result<GraphConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GraphConfig::from_yaml(path)?,
        None => GraphConfig::preset(args.preset.unwrap_or_default()),
    };

    if let Some(k) = args.k {
        config = config.k(k);
    }
    if let Some(eps) = args.eps {
        config = config.search(|s| s.eps(eps));
    }
    if args.brute_force {
        config = config.search(|s| s.method(SearchMethod::BruteForce));
    }
    if let Some(dims) = &args.dims {
        let dims = dims.clone();
        config = config.search(|s| s.dims(dims));
    }
    if args.l2_norm {
        config = config.search(|s| s.l2_norm(true));
    }
    if args.no_snn {
        config = config.snn_enabled(false);
    }
    if let Some(prune) = args.prune {
        config = config.prune_threshold(prune);
    }
    if args.shared_neighbors {
        config = config.snn(|s| s.scope(SnnScope::SharedNeighbors));
    }
    if let Some(workers) = args.workers {
        config = config.workers(workers);
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neighbor_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            delimiter,
            header,
            config,
        } => {
            let config = resolve_config(&config)?.output(OutputMode::file(&output));
            let validated = config.build()?;

            let mut format = EmbeddingFormat::default().with_header(header);
            if let Some(d) = delimiter {
                format = format.with_delimiter(d);
            }
            let embedding = read_embedding_file(&input, format)?;
            info!(
                input = %input.display(),
                points = embedding.n_points(),
                dims = embedding.n_dims(),
                "loaded embedding"
            );

            let result = GraphPipeline::from_config(validated)?.run(&embedding)?;
            for advisory in &result.advisories {
                eprintln!("note: {}", advisory);
            }
            println!("{}", serde_json::to_string_pretty(&result.handle.metadata)?);
        }
        Commands::Config { config } => {
            let config = resolve_config(&config)?;
            config.clone().build()?;
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
