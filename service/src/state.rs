use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use aegis_core::Graph;

use crate::load::LoadStats;

/// A loaded graph plus where and when it came from.
#[derive(Debug)]
pub struct GraphState {
    pub graph: Graph,
    pub source: String,
    pub stats: LoadStats,
    pub loaded_at: Instant,
}

/// Process-wide graph state.
///
/// Queries clone the `Arc` and release the lock before running, so a reload
/// never waits on a long search and readers keep the graph they started with.
static GRAPH_STATE: RwLock<Option<Arc<GraphState>>> = RwLock::new(None);

/// The currently loaded graph, shared with any other holder.
pub fn current() -> Option<Arc<GraphState>> {
    GRAPH_STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Execute a closure with a read reference to the loaded graph.
/// Returns None if no graph is loaded.
pub fn with_graph<R, F: FnOnce(&GraphState) -> R>(f: F) -> Option<R> {
    current().map(|gs| f(&gs))
}

/// Replace the loaded graph for every thread.
pub fn set_graph(state: GraphState) {
    *GRAPH_STATE.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(state));
}

/// Drop the loaded graph, if any.
pub fn clear() {
    GRAPH_STATE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}

pub fn is_loaded() -> bool {
    GRAPH_STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Serializes tests that install or clear the shared state.
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(ids: &[&str]) -> GraphState {
        let mut graph = Graph::new();
        for id in ids {
            graph.add_vertex(*id, *id).unwrap();
        }
        GraphState {
            graph,
            source: "test".to_string(),
            stats: LoadStats::default(),
            loaded_at: Instant::now(),
        }
    }

    #[test]
    fn test_not_loaded_after_clear() {
        let _guard = test_lock();
        clear();
        assert!(!is_loaded());
        assert!(current().is_none());
        assert!(with_graph(|gs| gs.graph.vertex_count()).is_none());
    }

    #[test]
    fn test_set_replace_clear() {
        let _guard = test_lock();
        set_graph(state_with(&["A"]));
        assert_eq!(with_graph(|gs| gs.graph.vertex_count()), Some(1));

        set_graph(state_with(&["A", "B"]));
        assert_eq!(with_graph(|gs| gs.graph.vertex_count()), Some(2));

        clear();
        assert!(!is_loaded());
    }

    #[test]
    fn test_state_is_shared_across_threads() {
        let _guard = test_lock();
        let loader = std::thread::spawn(|| set_graph(state_with(&["A", "B", "C"])));
        loader.join().unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| with_graph(|gs| gs.graph.vertex_count())))
            .collect();
        for reader in readers {
            assert_eq!(reader.join().unwrap(), Some(3));
        }
        clear();
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let _guard = test_lock();
        set_graph(state_with(&["A"]));
        let held = current().unwrap();

        set_graph(state_with(&["A", "B"]));
        assert_eq!(held.graph.vertex_count(), 1);
        assert_eq!(with_graph(|gs| gs.graph.vertex_count()), Some(2));
        clear();
    }
}
