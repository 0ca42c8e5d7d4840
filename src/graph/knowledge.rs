use crate::types::{AppError, Result, Triplet};
use parking_lot::RwLock;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Node tag. Only plain entities exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Entity,
}

/// A knowledge-graph node, identified by its trimmed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
}

/// Outcome of one [`KnowledgeGraph::merge`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Well-formed triplets seen, including ones already present.
    pub accepted: usize,
    /// Triplets skipped for an empty head or tail.
    pub skipped: usize,
    pub new_entities: usize,
    pub new_edges: usize,
}

/// Directed multi-relation graph of entities.
///
/// Merging is idempotent and order-independent: the resulting node and edge
/// sets depend only on the set of triplets ever merged.
pub struct KnowledgeGraph {
    inner: RwLock<GraphInner>,
}

#[derive(Default)]
struct GraphInner {
    graph: DiGraph<Entity, String>,
    nodes: HashMap<String, NodeIndex>,
    edges: HashSet<(NodeIndex, NodeIndex, String)>,
}

impl GraphInner {
    fn ensure_node(&mut self, id: &str) -> (NodeIndex, bool) {
        if let Some(&idx) = self.nodes.get(id) {
            return (idx, false);
        }
        let idx = self.graph.add_node(Entity {
            id: id.to_string(),
            kind: EntityKind::Entity,
        });
        self.nodes.insert(id.to_string(), idx);
        (idx, true)
    }

    fn lookup_edge(&self, head: &str, relation: &str, tail: &str) -> bool {
        let (Some(&h), Some(&t)) = (self.nodes.get(head), self.nodes.get(tail)) else {
            return false;
        };
        self.edges.contains(&(h, t, relation.to_string()))
    }
}

/// Trim a triplet and reject it if either endpoint is empty.
fn normalize(triplet: &Triplet) -> Result<(&str, &str, &str)> {
    let head = triplet.head.trim();
    let tail = triplet.tail.trim();
    if head.is_empty() || tail.is_empty() {
        return Err(AppError::MalformedTriplet(format!(
            "({:?}, {:?}, {:?})",
            triplet.head, triplet.relation, triplet.tail
        )));
    }
    Ok((head, triplet.relation.trim(), tail))
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(GraphInner::default()),
        }
    }

    /// Merge triplets into the graph.
    ///
    /// Endpoints are created if absent and never replaced; an edge is added
    /// only if the identical (head, relation, tail) edge does not exist yet.
    /// Malformed triplets are skipped.
    pub fn merge<I, T>(&self, triplets: I) -> MergeStats
    where
        I: IntoIterator<Item = T>,
        T: Into<Triplet>,
    {
        let mut stats = MergeStats::default();
        let mut inner = self.inner.write();

        for triplet in triplets {
            let triplet = triplet.into();
            let (head, relation, tail) = match normalize(&triplet) {
                Ok(parts) => parts,
                Err(e) => {
                    debug!(error = %e, "Skipping triplet");
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.accepted += 1;

            let (h, head_new) = inner.ensure_node(head);
            let (t, tail_new) = inner.ensure_node(tail);
            stats.new_entities += usize::from(head_new) + usize::from(tail_new);

            if inner.edges.insert((h, t, relation.to_string())) {
                inner.graph.add_edge(h, t, relation.to_string());
                stats.new_edges += 1;
                trace!(head, relation, tail, "Added relation");
            }
        }

        debug!(
            accepted = stats.accepted,
            skipped = stats.skipped,
            new_entities = stats.new_entities,
            new_edges = stats.new_edges,
            "Merged triplets"
        );
        stats
    }

    pub fn entity_count(&self) -> usize {
        self.inner.read().graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().graph.edge_count()
    }

    pub fn has_entity(&self, id: &str) -> bool {
        self.inner.read().nodes.contains_key(id.trim())
    }

    /// Check for a directed edge; arguments are trimmed like merged triplets.
    pub fn has_edge(&self, head: &str, relation: &str, tail: &str) -> bool {
        self.inner
            .read()
            .lookup_edge(head.trim(), relation.trim(), tail.trim())
    }

    /// All entities, sorted by id.
    pub fn entities(&self) -> Vec<Entity> {
        let inner = self.inner.read();
        let mut entities: Vec<Entity> = inner.graph.node_weights().cloned().collect();
        entities.sort_by(|a, b| a.id.cmp(&b.id));
        entities
    }

    /// All edges as triplets, sorted.
    pub fn triplets(&self) -> Vec<Triplet> {
        let inner = self.inner.read();
        let mut triplets: Vec<Triplet> = inner
            .graph
            .edge_references()
            .map(|e| {
                Triplet::new(
                    inner.graph[e.source()].id.clone(),
                    e.weight().clone(),
                    inner.graph[e.target()].id.clone(),
                )
            })
            .collect();
        triplets.sort();
        triplets
    }

    /// Outgoing `(relation, tail)` pairs of an entity, sorted.
    pub fn relations_from(&self, id: &str) -> Vec<(String, String)> {
        let inner = self.inner.read();
        let Some(&idx) = inner.nodes.get(id.trim()) else {
            return Vec::new();
        };
        let mut out: Vec<(String, String)> = inner
            .graph
            .edges(idx)
            .map(|e| (e.weight().clone(), inner.graph[e.target()].id.clone()))
            .collect();
        out.sort();
        out
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("entities", &self.entity_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn t(h: &str, r: &str, tail: &str) -> Triplet {
        Triplet::new(h, r, tail)
    }

    #[test]
    fn test_empty_graph() {
        let graph = KnowledgeGraph::new();
        assert_eq!(graph.entity_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_edge("a", "r", "b"));
    }

    #[test]
    fn test_merge_creates_nodes_and_edges() {
        let graph = KnowledgeGraph::new();
        let stats = graph.merge([t("Rust", "developed_by", "Mozilla")]);

        assert_eq!(stats.new_entities, 2);
        assert_eq!(stats.new_edges, 1);
        assert!(graph.has_entity("Rust"));
        assert!(graph.has_edge("Rust", "developed_by", "Mozilla"));
        assert!(!graph.has_edge("Mozilla", "developed_by", "Rust"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let triplets = vec![
            t("a", "r1", "b"),
            t("b", "r2", "c"),
            t("a", "r3", "c"),
        ];

        let graph = KnowledgeGraph::new();
        graph.merge(triplets.clone());
        let (entities, edges) = (graph.entity_count(), graph.edge_count());

        let stats = graph.merge(triplets);
        assert_eq!(graph.entity_count(), entities);
        assert_eq!(graph.edge_count(), edges);
        assert_eq!(stats.new_entities, 0);
        assert_eq!(stats.new_edges, 0);
        assert_eq!(stats.accepted, 3);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let (t1, t2, t3) = (t("a", "r", "b"), t("b", "r", "c"), t("c", "q", "a"));

        let split = KnowledgeGraph::new();
        split.merge([t1.clone(), t2.clone()]);
        split.merge([t3.clone()]);

        let single = KnowledgeGraph::new();
        single.merge([t3, t1, t2]);

        assert_eq!(split.entity_count(), single.entity_count());
        assert_eq!(split.edge_count(), single.edge_count());
        assert_eq!(split.triplets(), single.triplets());
        assert_eq!(split.entities(), single.entities());
    }

    #[test]
    fn test_distinct_relations_between_same_pair() {
        let graph = KnowledgeGraph::new();
        graph.merge([
            t("Alice", "works_with", "Bob"),
            t("Alice", "mentors", "Bob"),
            t("Alice", "works_with", "Bob"),
        ]);

        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.relations_from("Alice"),
            vec![
                ("mentors".to_string(), "Bob".to_string()),
                ("works_with".to_string(), "Bob".to_string()),
            ]
        );
    }

    #[test]
    fn test_identity_is_trimmed() {
        let graph = KnowledgeGraph::new();
        graph.merge([t("  Rust ", "uses", "LLVM"), t("Rust", "uses", " LLVM")]);

        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(" Rust", "uses", "LLVM "));
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let graph = KnowledgeGraph::new();
        graph.merge([t("rust", "is", "fast"), t("Rust", "is", "fast")]);
        assert_eq!(graph.entity_count(), 3);
    }

    #[test]
    fn test_malformed_triplets_skipped() {
        let graph = KnowledgeGraph::new();
        let stats = graph.merge([
            t("", "r", "b"),
            t("a", "r", "   "),
            t("a", "r", "b"),
        ]);

        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.accepted, 1);
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_existing_edges_survive_new_merges() {
        let graph = KnowledgeGraph::new();
        graph.merge([t("a", "r", "b")]);
        graph.merge([t("b", "r", "c"), t("a", "s", "c")]);

        assert!(graph.has_edge("a", "r", "b"));
        assert_eq!(graph.relations_from("a").len(), 2);
    }

    #[test]
    fn test_concurrent_merges() {
        let graph = Arc::new(KnowledgeGraph::new());
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let graph = Arc::clone(&graph);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        // Every worker merges the same shared facts plus its own.
                        graph.merge([
                            t(&format!("e{i}"), "next", &format!("e{}", i + 1)),
                            t(&format!("w{worker}"), "saw", &format!("e{i}")),
                        ]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // e0..e25 plus w0..w3
        assert_eq!(graph.entity_count(), 26 + 4);
        assert_eq!(graph.edge_count(), 25 + 4 * 25);
    }
}
