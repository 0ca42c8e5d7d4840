use crate::{
    graph::KnowledgeGraph,
    research::{citation, critic, summarizer::ChunkedSummarizer, with_timeout},
    tools::Capabilities,
    types::{
        AppError, FindingRecord, ResearchRun, Result, Source, SourceFailure, Stage,
        SynthesisRecord, Triplet,
    },
    utils::toml_config::ResearchConfig,
};
use chrono::Utc;
use delve_vector::{MemoryRecord, Neighbor, VectorRecordStore};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Tunables for a research run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchSettings {
    /// Sources requested from the retriever per sub-query.
    pub sources_per_query: usize,
    /// Summarizer window in characters.
    pub chunk_size: usize,
    /// Process the sources of one sub-query concurrently.
    pub parallel_sources: bool,
    pub retrieve_timeout: Duration,
    pub extract_timeout: Duration,
    pub summarize_timeout: Duration,
    pub embed_timeout: Duration,
    pub triplets_timeout: Duration,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            sources_per_query: 2,
            chunk_size: crate::rag::chunker::DEFAULT_CHUNK_SIZE,
            parallel_sources: false,
            retrieve_timeout: Duration::from_secs(30),
            extract_timeout: Duration::from_secs(30),
            summarize_timeout: Duration::from_secs(120),
            embed_timeout: Duration::from_secs(30),
            triplets_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&ResearchConfig> for ResearchSettings {
    fn from(config: &ResearchConfig) -> Self {
        Self {
            sources_per_query: config.sources_per_query,
            chunk_size: config.chunk_size,
            parallel_sources: config.parallel_sources,
            retrieve_timeout: Duration::from_secs(config.retrieve_timeout_secs),
            extract_timeout: Duration::from_secs(config.extract_timeout_secs),
            summarize_timeout: Duration::from_secs(config.summarize_timeout_secs),
            embed_timeout: Duration::from_secs(config.embed_timeout_secs),
            triplets_timeout: Duration::from_secs(config.triplets_timeout_secs),
        }
    }
}

/// Findings and recovered failures of one sub-query, in source order.
#[derive(Debug, Clone, Default)]
pub struct SubQueryReport {
    pub findings: Vec<FindingRecord>,
    pub failures: Vec<SourceFailure>,
}

/// Everything one source produced. Store writes are deferred to
/// [`ResearchCoordinator::commit`] so they land in retrieval order.
#[derive(Debug, Default)]
struct SourceOutcome {
    finding: Option<FindingRecord>,
    failures: Vec<SourceFailure>,
    triplets: Vec<Triplet>,
    record: Option<MemoryRecord>,
}

/// Drives research runs over a set of capabilities and two long-lived stores.
///
/// The stores are shared handles; several coordinators (or concurrent runs of
/// one coordinator) may feed the same memory and graph.
#[derive(Clone)]
pub struct ResearchCoordinator {
    capabilities: Capabilities,
    memory: Arc<VectorRecordStore>,
    graph: Arc<KnowledgeGraph>,
    summarizer: ChunkedSummarizer,
    settings: ResearchSettings,
}

impl ResearchCoordinator {
    /// Fails with [`AppError::Configuration`] if the embedder's output width
    /// does not match the memory store.
    pub fn new(
        capabilities: Capabilities,
        memory: Arc<VectorRecordStore>,
        graph: Arc<KnowledgeGraph>,
    ) -> Result<Self> {
        Self::with_settings(capabilities, memory, graph, ResearchSettings::default())
    }

    pub fn with_settings(
        capabilities: Capabilities,
        memory: Arc<VectorRecordStore>,
        graph: Arc<KnowledgeGraph>,
        settings: ResearchSettings,
    ) -> Result<Self> {
        let embedder_dim = capabilities.embedder.dimension();
        if embedder_dim != memory.dimension() {
            return Err(AppError::Configuration(format!(
                "embedder '{}' produces {}-d vectors but memory is {}-d",
                capabilities.embedder.name(),
                embedder_dim,
                memory.dimension()
            )));
        }
        if settings.sources_per_query == 0 || settings.chunk_size == 0 {
            return Err(AppError::Configuration(
                "sources_per_query and chunk_size must be positive".to_string(),
            ));
        }

        let summarizer = ChunkedSummarizer::new(
            Arc::clone(&capabilities.summarizer),
            settings.chunk_size,
            settings.summarize_timeout,
        );

        Ok(Self {
            capabilities,
            memory,
            graph,
            summarizer,
            settings,
        })
    }

    pub fn memory(&self) -> &Arc<VectorRecordStore> {
        &self.memory
    }

    pub fn graph(&self) -> &Arc<KnowledgeGraph> {
        &self.graph
    }

    pub fn settings(&self) -> &ResearchSettings {
        &self.settings
    }

    /// Break a query into three fixed sub-questions.
    ///
    /// The first asks about the query's first word, so a single-word query is
    /// handled the same way.
    pub fn decompose(query: &str) -> Vec<String> {
        let query = query.trim();
        let first = query.split_whitespace().next().unwrap_or(query);
        vec![
            format!("What is {}?", first),
            format!("What is the impact of {}?", query),
            format!("Who are the key players in {}?", query),
        ]
    }

    /// See [`critic::critique`].
    pub fn critique(summary: &str, url: &str) -> f64 {
        critic::critique(summary, url)
    }

    /// Assemble the report payload. Findings and references follow the order
    /// of `findings`.
    pub fn synthesize(query: &str, findings: &[FindingRecord]) -> SynthesisRecord {
        SynthesisRecord {
            title: format!("Research Report on {}", query),
            abstract_text: format!(
                "This report synthesizes information from multiple online sources regarding the query: {}",
                query
            ),
            findings: findings.iter().map(|f| f.summary.clone()).collect(),
            references: citation::references(findings),
            created_at: Utc::now(),
        }
    }

    /// Run a full research pass: decompose, research each sub-query in order,
    /// then synthesize.
    ///
    /// Only a blank query is an error; everything downstream degrades to a
    /// recorded [`SourceFailure`].
    #[instrument(skip(self), fields(run_id))]
    pub async fn research(&self, query: &str) -> Result<ResearchRun> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput("research query is empty".to_string()));
        }

        let id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(id));
        let started = Instant::now();

        let sub_queries = Self::decompose(query);
        info!(sub_queries = ?sub_queries, "Decomposed query");

        let mut findings = Vec::new();
        let mut failures = Vec::new();

        for (i, sub_query) in sub_queries.iter().enumerate() {
            info!("Researching sub-query {}/{}: {}", i + 1, sub_queries.len(), sub_query);
            let report = self.run_sub_query(sub_query).await;
            findings.extend(report.findings);
            failures.extend(report.failures);
        }

        let synthesis = Self::synthesize(query, &findings);
        let duration_ms = started.elapsed().as_millis() as u64;

        info!(
            findings = findings.len(),
            failures = failures.len(),
            memory_records = self.memory.len(),
            graph_entities = self.graph.entity_count(),
            duration_ms,
            "Research complete"
        );

        Ok(ResearchRun {
            id,
            query: query.to_string(),
            sub_queries,
            findings,
            synthesis,
            failures,
            duration_ms,
        })
    }

    /// Retrieve sources for one sub-query and turn each into a finding.
    ///
    /// Sources without extractable text are skipped. Findings are returned in
    /// retrieval order even when sources are processed concurrently.
    #[instrument(skip(self))]
    pub async fn run_sub_query(&self, sub_query: &str) -> SubQueryReport {
        let mut report = SubQueryReport::default();

        let sources = match with_timeout(
            "retrieve",
            self.settings.retrieve_timeout,
            self.capabilities
                .retriever
                .retrieve(sub_query, self.settings.sources_per_query),
        )
        .await
        {
            Ok(sources) => sources,
            Err(e) => {
                report
                    .failures
                    .push(failure(sub_query, "", Stage::Retrieve, &e));
                return report;
            }
        };
        debug!(count = sources.len(), "Retrieved sources");

        let outcomes = if self.settings.parallel_sources {
            self.process_parallel(sub_query, sources).await
        } else {
            let mut outcomes = Vec::with_capacity(sources.len());
            for source in sources {
                outcomes.push(self.process_source(sub_query, source).await);
            }
            outcomes
        };

        for outcome in outcomes {
            self.commit(sub_query, outcome, &mut report);
        }
        report
    }

    /// Apply one source's graph and memory writes, then append its finding.
    fn commit(&self, sub_query: &str, mut outcome: SourceOutcome, report: &mut SubQueryReport) {
        if !outcome.triplets.is_empty() {
            self.graph.merge(outcome.triplets);
        }

        if let Some(record) = outcome.record {
            let url = record.source_url.clone();
            if let Err(e) = self.memory.insert(record) {
                outcome
                    .failures
                    .push(failure(sub_query, &url, Stage::Memory, &AppError::Store(e)));
            }
        }

        report.findings.extend(outcome.finding);
        report.failures.extend(outcome.failures);
    }

    async fn process_parallel(&self, sub_query: &str, sources: Vec<Source>) -> Vec<SourceOutcome> {
        let mut set = JoinSet::new();

        for (index, source) in sources.into_iter().enumerate() {
            let this = self.clone();
            let sub_query = sub_query.to_string();
            set.spawn(async move { (index, this.process_source(&sub_query, source).await) });
        }

        let mut results = Vec::new();
        while let Some(res) = set.join_next().await {
            match res {
                Ok(result) => results.push(result),
                Err(e) => warn!(error = %e, "Source task did not complete"),
            }
        }

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, outcome)| outcome).collect()
    }

    async fn process_source(&self, sub_query: &str, source: Source) -> SourceOutcome {
        let mut outcome = SourceOutcome::default();
        let url = source.url.as_str();

        let text = match with_timeout(
            "extract",
            self.settings.extract_timeout,
            self.capabilities.extractor.extract_text(url),
        )
        .await
        {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                debug!(url, "No extractable text, skipping source");
                return outcome;
            }
            Err(e) => {
                outcome
                    .failures
                    .push(failure(sub_query, url, Stage::Extract, &e));
                return outcome;
            }
        };

        let summary = self.summarizer.summarize(&text).await;
        for message in &summary.errors {
            outcome.failures.push(SourceFailure {
                sub_query: sub_query.to_string(),
                url: url.to_string(),
                stage: Stage::Summarize,
                message: message.clone(),
            });
        }

        let confidence = critic::critique(&summary.text, url);
        debug!(url, confidence, chunks = summary.chunks, "Scored source");

        if summary.all_failed() {
            debug!(url, "Every chunk failed, not remembering source");
        } else {
            match with_timeout(
                "extract_triplets",
                self.settings.triplets_timeout,
                self.capabilities.triplets.extract_triplets(&summary.text),
            )
            .await
            {
                Ok(triplets) => outcome.triplets = triplets,
                Err(e) => outcome
                    .failures
                    .push(failure(sub_query, url, Stage::Triplets, &e)),
            }

            match with_timeout(
                "embed",
                self.settings.embed_timeout,
                self.capabilities.embedder.embed(&summary.text),
            )
            .await
            {
                Ok(embedding) => {
                    outcome.record =
                        Some(MemoryRecord::new(sub_query, &summary.text, url, embedding));
                }
                Err(e) => outcome
                    .failures
                    .push(failure(sub_query, url, Stage::Embed, &e)),
            }
        }

        outcome.finding = Some(FindingRecord {
            title: source.title,
            summary: summary.text,
            confidence,
            url: source.url,
        });
        outcome
    }

    /// Nearest remembered findings for a free-text question, nearest first.
    ///
    /// An empty memory answers without calling the embedder.
    #[instrument(skip(self))]
    pub async fn recall(&self, question: &str, top_k: usize) -> Result<Vec<Neighbor>> {
        if question.trim().is_empty() {
            return Err(AppError::InvalidInput("question is empty".to_string()));
        }
        if self.memory.is_empty() {
            debug!("Memory is empty");
            return Ok(Vec::new());
        }

        let vector = with_timeout(
            "embed",
            self.settings.embed_timeout,
            self.capabilities.embedder.embed(question),
        )
        .await?;

        let neighbors = self.memory.query(&vector, top_k)?;
        debug!(hits = neighbors.len(), "Recalled from memory");
        Ok(neighbors)
    }
}

impl std::fmt::Debug for ResearchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchCoordinator")
            .field("capabilities", &self.capabilities)
            .field("memory", &self.memory)
            .field("graph", &self.graph)
            .field("settings", &self.settings)
            .finish()
    }
}

fn failure(sub_query: &str, url: &str, stage: Stage, error: &AppError) -> SourceFailure {
    warn!(sub_query, url, %stage, error = %error, "Recovered from external failure");
    SourceFailure {
        sub_query: sub_query.to_string(),
        url: url.to_string(),
        stage,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_templates() {
        assert_eq!(
            ResearchCoordinator::decompose("  quantum computing "),
            vec![
                "What is quantum?",
                "What is the impact of quantum computing?",
                "Who are the key players in quantum computing?",
            ]
        );
    }

    #[test]
    fn test_decompose_degenerate_input() {
        let subs = ResearchCoordinator::decompose("");
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0], "What is ?");
    }

    #[test]
    fn test_synthesize_payload() {
        let findings = vec![FindingRecord {
            title: "Rust".to_string(),
            summary: "• A systems language".to_string(),
            confidence: 0.3,
            url: "https://en.wikipedia.org/wiki/Rust".to_string(),
        }];

        let synthesis = ResearchCoordinator::synthesize("rust", &findings);
        assert_eq!(synthesis.title, "Research Report on rust");
        assert_eq!(
            synthesis.abstract_text,
            "This report synthesizes information from multiple online sources regarding the query: rust"
        );
        assert_eq!(synthesis.findings, vec!["• A systems language"]);
        assert_eq!(synthesis.references.len(), 1);
        assert!(synthesis.references[0].contains("howpublished = {https://en.wikipedia.org/wiki/Rust}"));
    }

    #[test]
    fn test_synthesize_empty() {
        let synthesis = ResearchCoordinator::synthesize("nothing", &[]);
        assert!(synthesis.findings.is_empty());
        assert!(synthesis.references.is_empty());
    }

    #[test]
    fn test_settings_from_config() {
        let config = ResearchConfig {
            parallel_sources: true,
            summarize_timeout_secs: 9,
            ..ResearchConfig::default()
        };
        let settings = ResearchSettings::from(&config);

        assert!(settings.parallel_sources);
        assert_eq!(settings.summarize_timeout, Duration::from_secs(9));
        assert_eq!(settings.sources_per_query, 2);
        assert_eq!(settings.chunk_size, 800);
    }
}
