use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::GraphError;
use crate::graph::{Graph, Risk, Vertex, VertexIdx};
use crate::heap::MinHeap;
use crate::list::List;

/// The safest route found between two vertices.
///
/// Empty when the destination is unreachable from the origin.
#[derive(Debug, Clone)]
pub struct Route<'g> {
    vertices: List<&'g Vertex>,
    total_risk: Risk,
}

impl<'g> Route<'g> {
    fn unreachable() -> Self {
        Self {
            vertices: List::new(),
            total_risk: 0,
        }
    }

    /// Vertices from origin to destination, both inclusive.
    pub fn vertices(&self) -> &List<&'g Vertex> {
        &self.vertices
    }

    /// Sum of edge costs along the route. Zero for an empty route.
    pub fn total_risk(&self) -> Risk {
        self.total_risk
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn ids(&self) -> Vec<&'g str> {
        self.vertices.iter().map(|v| v.id()).collect()
    }
}

impl<'g> IntoIterator for Route<'g> {
    type Item = &'g Vertex;
    type IntoIter = crate::list::IntoIter<&'g Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}

/// Queue entry: a vertex paired with the risk it had when pushed.
///
/// Ordered by risk, then vertex index, so extraction is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    risk: Risk,
    vertex: VertexIdx,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.risk
            .cmp(&other.risk)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-search scratch state, indexed by `VertexIdx`.
///
/// `None` in `min_risk` means "not reached yet".
struct RouteSearch {
    min_risk: Vec<Option<Risk>>,
    previous: Vec<Option<VertexIdx>>,
}

impl RouteSearch {
    fn new(vertex_count: usize) -> Self {
        Self {
            min_risk: vec![None; vertex_count],
            previous: vec![None; vertex_count],
        }
    }

    /// Record `candidate` for `vertex` if it beats the best known risk.
    fn relax(&mut self, vertex: VertexIdx, candidate: Risk, via: VertexIdx) -> bool {
        match self.min_risk[vertex] {
            Some(best) if best <= candidate => false,
            _ => {
                self.min_risk[vertex] = Some(candidate);
                self.previous[vertex] = Some(via);
                true
            }
        }
    }

    fn is_stale(&self, entry: &Frontier) -> bool {
        self.min_risk[entry.vertex].is_some_and(|best| entry.risk > best)
    }
}

impl Graph {
    /// Minimum cumulative-risk route from `origin` to `dest` (Dijkstra).
    ///
    /// Returns `VertexNotFound` if either id is unknown, and an empty
    /// [`Route`] if `dest` is unreachable. The queue uses lazy reinsertion:
    /// a vertex is pushed again on every improvement and entries older than
    /// its live risk are skipped on extraction.
    pub fn find_safest_route(&self, origin: &str, dest: &str) -> Result<Route<'_>, GraphError> {
        let start = self.require(origin)?;
        let target = self.require(dest)?;

        let mut search = RouteSearch::new(self.vertex_count());
        let mut queue = MinHeap::new();
        let mut settled = 0usize;
        let mut stale = 0usize;

        search.min_risk[start] = Some(0);
        queue.insert(Frontier {
            risk: 0,
            vertex: start,
        });

        while let Ok(entry) = queue.extract_min() {
            if search.is_stale(&entry) {
                stale += 1;
                continue;
            }
            settled += 1;

            if entry.vertex == target {
                debug!(origin, dest, risk = entry.risk, settled, stale, "safest route found");
                return Ok(self.reconstruct_route(&search, target, entry.risk));
            }

            for edge in self.vertex(entry.vertex).edges() {
                let candidate = entry.risk.saturating_add(edge.cost());
                if search.relax(edge.target(), candidate, entry.vertex) {
                    trace!(vertex = edge.target(), risk = candidate, "relaxed");
                    queue.insert(Frontier {
                        risk: candidate,
                        vertex: edge.target(),
                    });
                }
            }
        }

        debug!(origin, dest, settled, stale, "no route");
        Ok(Route::unreachable())
    }

    /// Walk `previous` links back from `target`, prepending each vertex.
    fn reconstruct_route(
        &self,
        search: &RouteSearch,
        target: VertexIdx,
        total_risk: Risk,
    ) -> Route<'_> {
        let mut vertices = List::new();
        let mut current = Some(target);
        while let Some(idx) = current {
            vertices.push_front(self.vertex(idx));
            current = search.previous[idx];
        }
        Route {
            vertices,
            total_risk,
        }
    }
}
