use anyhow::{Context, bail};
use delve::cli::{
    Cli, Commands,
    init::{self, InitResult},
    output::Output,
};
use delve::{Capabilities, DelveConfig, KnowledgeGraph, ResearchCoordinator, ResearchSettings};
use delve_vector::VectorRecordStore;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Commands::Init { path, force } = &cli.command {
        return match init::run(path, *force, &output) {
            InitResult::Success(_) | InitResult::AlreadyExists(_) => Ok(()),
            InitResult::Error(e) => bail!(e),
        };
    }

    let config = DelveConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    init_tracing(&config.logging.level, cli.verbose, cli.json_logs);

    let memory = Arc::new(open_memory(&config).await?);
    let graph = Arc::new(KnowledgeGraph::new());
    let coordinator = ResearchCoordinator::with_settings(
        build_capabilities(&config)?,
        Arc::clone(&memory),
        graph,
        ResearchSettings::from(&config.research),
    )?;
    tracing::debug!(?coordinator, "Coordinator ready");

    match cli.command {
        Commands::Research { query, json } => {
            let run = coordinator.research(&query.join(" ")).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                output.research_run(&run);
                output.kv(
                    "knowledge graph",
                    &format!(
                        "{} entities, {} relations",
                        coordinator.graph().entity_count(),
                        coordinator.graph().edge_count()
                    ),
                );
                output.kv("memory", &format!("{} records", memory.len()));
            }

            if let Some(path) = &config.memory.snapshot_path {
                delve_vector::save_store(path, &memory)
                    .await
                    .with_context(|| format!("Failed to save memory to {}", path.display()))?;
                tracing::info!(path = %path.display(), records = memory.len(), "Saved memory snapshot");
                if !json {
                    output.info(&format!(
                        "Saved {} memory records to {}",
                        memory.len(),
                        path.display()
                    ));
                }
            }
        }
        Commands::Recall { question, top_k } => {
            if config.memory.snapshot_path.is_none() {
                output.warning("memory.snapshot_path is not set; nothing is remembered between runs");
            }
            let top_k = top_k.unwrap_or(config.memory.top_k);
            let neighbors = coordinator.recall(&question.join(" "), top_k).await?;
            output.neighbors(&neighbors);
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn init_tracing(level: &str, verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

/// Load the snapshot if one is configured and present, else start empty.
async fn open_memory(config: &DelveConfig) -> anyhow::Result<VectorRecordStore> {
    let dimension = config.memory.dimension;

    let Some(path) = config.memory.snapshot_path.as_deref().filter(|p| Path::exists(p)) else {
        return Ok(VectorRecordStore::new(dimension)?);
    };

    let store = delve_vector::load_store(path)
        .await
        .with_context(|| format!("Failed to load memory from {}", path.display()))?;
    if store.dimension() != dimension {
        bail!(
            "snapshot {} is {}-d but memory.dimension is {}",
            path.display(),
            store.dimension(),
            dimension
        );
    }
    tracing::info!(path = %path.display(), records = store.len(), "Loaded memory snapshot");
    Ok(store)
}

#[cfg(all(feature = "web", feature = "ollama", feature = "local-embeddings"))]
fn build_capabilities(config: &DelveConfig) -> anyhow::Result<Capabilities> {
    use delve::llm::ollama::OllamaSummarizer;
    use delve::rag::embeddings::FastEmbedder;
    use delve::tools::search::{DaedraExtractor, DaedraRetriever};

    let summarizer = OllamaSummarizer::new(&config.summarizer.base_url, &config.summarizer.model);
    let embedder = FastEmbedder::new().context("Failed to load embedding model")?;

    Ok(Capabilities::new(
        Arc::new(DaedraRetriever::new()),
        Arc::new(DaedraExtractor::new()),
        Arc::new(summarizer),
        Arc::new(embedder),
    ))
}

#[cfg(not(all(feature = "web", feature = "ollama", feature = "local-embeddings")))]
fn build_capabilities(_config: &DelveConfig) -> anyhow::Result<Capabilities> {
    bail!("the delve binary needs the `web`, `ollama` and `local-embeddings` features")
}
