use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::GraphError;
use crate::list::List;

/// Stable position of a vertex in the graph's vertex table (insertion order).
pub type VertexIdx = usize;

/// Non-negative risk weight of an edge, and cumulative risk of a route.
pub type Risk = u64;

/// A directed edge, stored on its source vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    target: VertexIdx,
    cost: Risk,
}

impl Edge {
    pub fn target(&self) -> VertexIdx {
        self.target
    }

    pub fn cost(&self) -> Risk {
        self.cost
    }
}

/// A location in the network.
///
/// Identity is the `id`: two vertices compare and hash equal iff their ids do.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: String,
    name: String,
    edges: List<Edge>,
}

impl Vertex {
    /// Build a detached vertex. The id must be non-empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, GraphError> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::InvalidArgument(
                "vertex id cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name: name.into(),
            edges: List::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &List<Edge> {
        &self.edges
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// In-memory risk graph: vertex table + per-vertex adjacency lists + id index.
///
/// Topology is append-only. Queries take `&self` and keep their scratch state
/// outside the graph, so a loaded graph can be shared by concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexIdx>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
        }
    }

    /// Register a new location.
    pub fn add_vertex(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<VertexIdx, GraphError> {
        let vertex = Vertex::new(id, name)?;
        if self.index.contains_key(&vertex.id) {
            return Err(GraphError::DuplicateVertex(vertex.id));
        }
        let idx = self.vertices.len();
        self.index.insert(vertex.id.clone(), idx);
        self.vertices.push(vertex);
        Ok(idx)
    }

    /// Add a one-way route from `origin` to `dest`.
    ///
    /// Checked in order: negative cost, unknown origin, unknown destination,
    /// self-loop.
    pub fn add_directed_edge(
        &mut self,
        origin: &str,
        dest: &str,
        cost: i64,
    ) -> Result<(), GraphError> {
        let cost = Risk::try_from(cost).map_err(|_| GraphError::InvalidWeight(cost))?;
        let from = self.require(origin)?;
        let to = self.require(dest)?;
        if from == to {
            return Err(GraphError::SelfLoopNotAllowed(origin.to_string()));
        }
        self.vertices[from].edges.push_back(Edge { target: to, cost });
        Ok(())
    }

    /// Add a two-way route as two directed edges, `a -> b` then `b -> a`.
    ///
    /// Not atomic: if the second insertion fails the first one stays.
    pub fn add_undirected_edge(&mut self, a: &str, b: &str, cost: i64) -> Result<(), GraphError> {
        self.add_directed_edge(a, b, cost)?;
        self.add_directed_edge(b, a, cost)
    }

    pub fn find_vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertex_index(id).map(|idx| &self.vertices[idx])
    }

    pub fn vertex_index(&self, id: &str) -> Option<VertexIdx> {
        self.index.get(id).copied()
    }

    /// Vertex at a known index. Panics if `idx` did not come from this graph.
    pub fn vertex(&self, idx: VertexIdx) -> &Vertex {
        &self.vertices[idx]
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn require(&self, id: &str) -> Result<VertexIdx, GraphError> {
        self.vertex_index(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }
}
