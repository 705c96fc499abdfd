use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use aegis_core::Graph;
use tracing::{info, warn};

use crate::config::{EdgeMode, ServiceConfig};
use crate::cost::CostCalculator;
use crate::error::ServiceError;
use crate::state::{self, GraphState};

/// Counters reported by a load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Rows with too few columns. Blank lines are not counted.
    pub skipped_rows: usize,
    pub load_time_ms: f64,
}

/// Load the configured CSV files and install the graph as the process-wide
/// loaded state, replacing any previous one.
pub fn load(config: &ServiceConfig) -> Result<LoadStats, ServiceError> {
    let (graph, stats) = load_graph(config)?;

    state::set_graph(GraphState {
        graph,
        source: config.vertices_path.display().to_string(),
        stats,
        loaded_at: Instant::now(),
    });

    Ok(stats)
}

/// Build a graph from the configured vertex and edge files.
pub fn load_graph(config: &ServiceConfig) -> Result<(Graph, LoadStats), ServiceError> {
    let vertices = open(&config.vertices_path)?;
    let edges = open(&config.edges_path)?;
    load_sources(
        Source::new(vertices, &config.vertices_path),
        Source::new(edges, &config.edges_path),
        config,
    )
}

/// Build a graph from in-memory or otherwise non-file sources.
pub fn load_from_readers<V: Read, E: Read>(
    vertices: V,
    edges: E,
    config: &ServiceConfig,
) -> Result<(Graph, LoadStats), ServiceError> {
    load_sources(
        Source {
            reader: vertices,
            label: "<vertices>".to_string(),
        },
        Source {
            reader: edges,
            label: "<edges>".to_string(),
        },
        config,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct Source<R> {
    reader: R,
    label: String,
}

impl<R: Read> Source<R> {
    fn new(reader: R, path: &Path) -> Self {
        Self {
            reader,
            label: path.display().to_string(),
        }
    }

    fn csv(self, has_headers: bool) -> (csv::Reader<R>, String) {
        let reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(self.reader);
        (reader, self.label)
    }
}

fn open(path: &Path) -> Result<File, ServiceError> {
    File::open(path).map_err(|source| ServiceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_sources<V: Read, E: Read>(
    vertices: Source<V>,
    edges: Source<E>,
    config: &ServiceConfig,
) -> Result<(Graph, LoadStats), ServiceError> {
    config.validate()?;
    let start = Instant::now();
    let calculator = config.cost.build();
    let mut graph = Graph::new();
    let mut stats = LoadStats::default();

    load_vertices(vertices, config, &mut graph, &mut stats)?;
    load_edges(edges, config, calculator.as_ref(), &mut graph, &mut stats)?;

    stats.vertex_count = graph.vertex_count();
    stats.edge_count = graph.edge_count();
    stats.load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        vertices = stats.vertex_count,
        edges = stats.edge_count,
        skipped = stats.skipped_rows,
        load_time_ms = stats.load_time_ms,
        "graph loaded"
    );

    Ok((graph, stats))
}

/// Rows: `id,name`. Extra columns are ignored.
fn load_vertices<R: Read>(
    source: Source<R>,
    config: &ServiceConfig,
    graph: &mut Graph,
    stats: &mut LoadStats,
) -> Result<(), ServiceError> {
    let (mut reader, file) = source.csv(config.has_headers);

    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let line = line_of(&record);

        let (Some(id), Some(name)) = (record.get(0), record.get(1)) else {
            warn!(file = %file, line, "skipping vertex row with fewer than 2 columns");
            stats.skipped_rows += 1;
            continue;
        };

        if graph.vertex_count() >= config.max_vertices {
            return Err(ServiceError::TooManyVertices {
                limit: config.max_vertices,
            });
        }

        graph
            .add_vertex(id, name)
            .map_err(|error| ServiceError::Graph {
                file: file.clone(),
                line,
                error,
            })?;
    }

    Ok(())
}

/// Rows: `origin,dest,risk[,distance]`. A missing distance counts as 0.
fn load_edges<R: Read>(
    source: Source<R>,
    config: &ServiceConfig,
    calculator: &dyn CostCalculator,
    graph: &mut Graph,
    stats: &mut LoadStats,
) -> Result<(), ServiceError> {
    let (mut reader, file) = source.csv(config.has_headers);

    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let line = line_of(&record);

        let (Some(origin), Some(dest), Some(risk)) =
            (record.get(0), record.get(1), record.get(2))
        else {
            warn!(file = %file, line, "skipping edge row with fewer than 3 columns");
            stats.skipped_rows += 1;
            continue;
        };

        let risk = parse_int(risk, "risk", &file, line)?;
        let distance = match record.get(3).filter(|s| !s.is_empty()) {
            Some(d) => parse_int(d, "distance", &file, line)?,
            None => 0,
        };
        let cost = calculator.calculate(risk, distance);

        let inserted = match config.edge_mode {
            EdgeMode::Directed => graph.add_directed_edge(origin, dest, cost),
            EdgeMode::Undirected => graph.add_undirected_edge(origin, dest, cost),
        };
        inserted.map_err(|error| ServiceError::Graph {
            file: file.clone(),
            line,
            error,
        })?;
    }

    Ok(())
}

fn parse_int(value: &str, column: &str, file: &str, line: u64) -> Result<i64, ServiceError> {
    value.parse().map_err(|_| ServiceError::Parse {
        file: file.to_string(),
        line,
        message: format!("{column} must be an integer, got '{value}'"),
    })
}

/// Whitespace-only lines trim down to a record of empty fields.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
