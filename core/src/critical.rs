use tracing::debug;

use crate::graph::{Edge, Graph, Vertex, VertexIdx};
use crate::list::{self, List};
use crate::stack::Stack;

/// Per-pass scratch state for articulation-point detection, indexed by
/// `VertexIdx`. Discovery times start at 1; 0 means undiscovered.
struct CutVertexSearch {
    visited: Vec<bool>,
    dfs_order: Vec<u32>,
    low_link: Vec<u32>,
    dfs_parent: Vec<Option<VertexIdx>>,
    is_articulation_point: Vec<bool>,
    counter: u32,
}

impl CutVertexSearch {
    fn new(vertex_count: usize) -> Self {
        Self {
            visited: vec![false; vertex_count],
            dfs_order: vec![0; vertex_count],
            low_link: vec![0; vertex_count],
            dfs_parent: vec![None; vertex_count],
            is_articulation_point: vec![false; vertex_count],
            counter: 0,
        }
    }

    fn discover(&mut self, u: VertexIdx) {
        self.visited[u] = true;
        self.counter += 1;
        self.dfs_order[u] = self.counter;
        self.low_link[u] = self.counter;
    }
}

/// One suspended DFS call: the vertex, where it is in its edge list, and how
/// many tree children it has spawned so far.
struct Frame<'g> {
    vertex: VertexIdx,
    edges: list::Iter<'g, Edge>,
    children: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g Graph, vertex: VertexIdx) -> Self {
        Self {
            vertex,
            edges: graph.vertex(vertex).edges().iter(),
            children: 0,
        }
    }
}

impl Graph {
    /// Vertices whose removal would disconnect part of the network
    /// (articulation points), in insertion order.
    ///
    /// Every undiscovered vertex starts a new DFS tree, so disconnected
    /// components are all covered. The DFS runs on an explicit work-stack.
    ///
    /// The parent-skip rule assumes every edge has its reverse (graphs built
    /// with [`Graph::add_undirected_edge`]). On graphs with one-way edges the
    /// result carries no guarantee.
    pub fn find_critical_points(&self) -> List<&Vertex> {
        let mut search = CutVertexSearch::new(self.vertex_count());

        for root in 0..self.vertex_count() {
            if !search.visited[root] {
                self.dfs_articulation(root, &mut search);
            }
        }

        let points: List<&Vertex> = self
            .vertices()
            .enumerate()
            .filter(|(idx, _)| search.is_articulation_point[*idx])
            .map(|(_, v)| v)
            .collect();

        debug!(
            vertices = self.vertex_count(),
            critical = points.len(),
            "critical points computed"
        );
        points
    }

    fn dfs_articulation(&self, root: VertexIdx, search: &mut CutVertexSearch) {
        let mut stack = Stack::new();
        search.discover(root);
        stack.push(Frame::new(self, root));

        while let Ok(frame) = stack.peek_mut() {
            let u = frame.vertex;

            if let Some(edge) = frame.edges.next() {
                let v = edge.target();
                if search.dfs_parent[u] == Some(v) {
                    continue;
                }
                if search.visited[v] {
                    search.low_link[u] = search.low_link[u].min(search.dfs_order[v]);
                } else {
                    frame.children += 1;
                    search.dfs_parent[v] = Some(u);
                    search.discover(v);
                    stack.push(Frame::new(self, v));
                }
                continue;
            }

            // u is exhausted; fold it into its parent's frame.
            let _ = stack.pop();
            let Some(parent) = search.dfs_parent[u] else {
                continue;
            };
            search.low_link[parent] = search.low_link[parent].min(search.low_link[u]);

            if search.dfs_parent[parent].is_none() {
                let children = stack.peek().map(|f| f.children).unwrap_or(0);
                if children > 1 {
                    search.is_articulation_point[parent] = true;
                }
            } else if search.low_link[u] >= search.dfs_order[parent] {
                search.is_articulation_point[parent] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn undirected(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for id in ids {
            g.add_vertex(*id, id.to_lowercase()).unwrap();
        }
        for (a, b) in edges {
            g.add_undirected_edge(a, b, 1).unwrap();
        }
        g
    }

    fn critical_ids(g: &Graph) -> Vec<String> {
        g.find_critical_points()
            .iter()
            .map(|v| v.id().to_string())
            .collect()
    }

    #[test]
    fn test_path_interior_vertices() {
        let g = undirected(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        assert_eq!(critical_ids(&g), vec!["B", "C"]);
    }

    #[test]
    fn test_cycle_has_none() {
        let g = undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        assert!(critical_ids(&g).is_empty());
    }

    #[test]
    fn test_star_center() {
        let g = undirected(
            &["Hub", "L1", "L2", "L3"],
            &[("Hub", "L1"), ("Hub", "L2"), ("Hub", "L3")],
        );
        assert_eq!(critical_ids(&g), vec!["Hub"]);
    }

    #[test]
    fn test_leaf_root_is_not_critical() {
        // Root A has a single DFS child, so it is never flagged.
        let g = undirected(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        assert_eq!(critical_ids(&g), vec!["B"]);
    }

    #[test]
    fn test_bowtie_shared_vertex() {
        let g = undirected(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D"), ("D", "E"), ("E", "C")],
        );
        assert_eq!(critical_ids(&g), vec!["C"]);
    }

    #[test]
    fn test_disconnected_components() {
        let g = undirected(
            &["A", "B", "C", "X", "Y", "Z", "Solo"],
            &[("A", "B"), ("B", "C"), ("X", "Y"), ("Y", "Z"), ("Z", "X")],
        );
        assert_eq!(critical_ids(&g), vec!["B"]);
    }

    #[test]
    fn test_empty_and_trivial_graphs() {
        assert!(Graph::new().find_critical_points().is_empty());
        let g = undirected(&["A", "B"], &[("A", "B")]);
        assert!(critical_ids(&g).is_empty());
    }

    #[test]
    fn test_result_in_insertion_order() {
        let g = undirected(
            &["D", "C", "B", "A"],
            &[("A", "B"), ("B", "C"), ("C", "D")],
        );
        assert_eq!(critical_ids(&g), vec!["C", "B"]);
    }

    #[test]
    fn test_repeated_passes_agree() {
        let g = undirected(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        assert_eq!(critical_ids(&g), critical_ids(&g));
    }

    #[test]
    fn test_long_path_does_not_overflow_stack() {
        let n = 100_000;
        let mut g = Graph::with_capacity(n);
        for i in 0..n {
            g.add_vertex(format!("v{i}"), "").unwrap();
        }
        for i in 1..n {
            g.add_undirected_edge(&format!("v{}", i - 1), &format!("v{i}"), 1).unwrap();
        }
        assert_eq!(g.find_critical_points().len(), n - 2);
    }

    /// Connected components among non-removed vertices, following arcs both ways.
    fn components_without(g: &Graph, removed: Option<VertexIdx>) -> usize {
        let n = g.vertex_count();
        let mut seen = vec![false; n];
        let mut count = 0;
        for start in 0..n {
            if seen[start] || Some(start) == removed {
                continue;
            }
            count += 1;
            seen[start] = true;
            let mut todo = vec![start];
            while let Some(u) = todo.pop() {
                for e in g.vertex(u).edges() {
                    let v = e.target();
                    if !seen[v] && Some(v) != removed {
                        seen[v] = true;
                        todo.push(v);
                    }
                }
            }
        }
        count
    }

    proptest! {
        #[test]
        fn test_matches_removal_brute_force(
            n in 1usize..9,
            pairs in proptest::collection::vec((0usize..9, 0usize..9), 0..16),
        ) {
            let mut g = Graph::new();
            for i in 0..n {
                g.add_vertex(format!("v{i}"), "").unwrap();
            }
            for (a, b) in pairs {
                let (a, b) = (a % n, b % n);
                if a != b {
                    g.add_undirected_edge(&format!("v{a}"), &format!("v{b}"), 1).unwrap();
                }
            }

            let base = components_without(&g, None);
            let expected: Vec<String> = (0..n)
                .filter(|&i| components_without(&g, Some(i)) > base)
                .map(|i| g.vertex(i).id().to_string())
                .collect();
            prop_assert_eq!(critical_ids(&g), expected);
        }
    }
}
