use std::collections::VecDeque;
use std::time::Instant;

use aegis_core::{Graph, GraphError};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Generator = fn(u64) -> Result<Graph, GraphError>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: aegis-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  path        Single chain (deepest DFS, every interior vertex critical)");
        println!("  grid        Square lattice (no critical points)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default vertex_count: 200000. Set RUST_LOG=debug for per-query logs.");
        return;
    }

    println!("aegis-bench");
    println!("===========");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "path" => vec![("Path (chain)", gen_path)],
        "grid" => vec![("Grid lattice", gen_grid)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Path (chain)", gen_path as Generator),
            ("Grid lattice", gen_grid),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, vertex_count) {
            eprintln!("{}: generator produced an invalid graph: {}", name, e);
        }
    }
}

fn run_benchmark(name: &str, generator: Generator, vertex_count: u64) -> Result<(), GraphError> {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s, {} vertices, {} edges",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
    );
    info!(name, vertices = graph.vertex_count(), edges = graph.edge_count(), "generated");

    if graph.is_empty() {
        println!();
        return Ok(());
    }

    // Safest route: first vertex to a spread of targets
    println!();
    println!("{:>12} {:>8} {:>12} {:>10}", "target", "hops", "risk", "time");
    println!("{:->12} {:->8} {:->12} {:->10}", "", "", "", "");

    let last = graph.vertex_count() - 1;
    for target in [1, last / 100, last / 10, last / 2, last] {
        let origin = graph.vertex(0).id();
        let dest = graph.vertex(target.min(last)).id();

        let t = Instant::now();
        let route = graph.find_safest_route(origin, dest)?;
        let elapsed = t.elapsed();

        if route.is_empty() {
            println!(
                "{:>12} {:>8} {:>12} {:>8.1}ms",
                dest,
                "-",
                "no route",
                elapsed.as_secs_f64() * 1000.0
            );
        } else {
            println!(
                "{:>12} {:>8} {:>12} {:>8.1}ms",
                dest,
                route.len() - 1,
                route.total_risk(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }

    // Critical points over the whole graph
    println!();
    let t = Instant::now();
    let points = graph.find_critical_points();
    let elapsed = t.elapsed();
    println!(
        "Critical points: {} of {} vertices in {:.1}ms",
        points.len(),
        graph.vertex_count(),
        elapsed.as_secs_f64() * 1000.0
    );
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Edge risk in 1..=MAX_RISK.
    fn risk(&mut self) -> i64 {
        (self.next(MAX_RISK) + 1) as i64
    }
}

const MAX_RISK: u64 = 100;

const NAMES: [&str; 5] = ["Station", "Market", "Clinic", "School", "Depot"];

fn vid(i: u64) -> String {
    format!("v{}", i)
}

/// Add `count` vertices starting at id `from`, with rotating display names.
fn add_vertices(graph: &mut Graph, from: u64, count: u64) -> Result<(), GraphError> {
    for i in from..from + count {
        graph.add_vertex(vid(i), format!("{} {}", NAMES[(i % 5) as usize], i))?;
    }
    Ok(())
}

fn link(graph: &mut Graph, a: u64, b: u64, risk: i64) -> Result<(), GraphError> {
    if a == b {
        return Ok(());
    }
    graph.add_undirected_edge(&vid(a), &vid(b), risk)
}

/// Single chain v0 - v1 - ... - v(n-1).
///
/// Worst case for DFS depth: the work-stack holds every vertex at once.
fn gen_path(vertex_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(42);
    add_vertices(&mut graph, 0, vertex_count)?;
    for i in 1..vertex_count {
        link(&mut graph, i - 1, i, rng.risk())?;
    }
    Ok(graph)
}

/// Square lattice, row-major ids. Many equal-length routes, no cut vertices.
fn gen_grid(vertex_count: u64) -> Result<Graph, GraphError> {
    let side = (vertex_count as f64).sqrt().max(1.0) as u64;
    let mut graph = Graph::with_capacity((side * side) as usize);
    let mut rng = FastRng::new(2024);
    add_vertices(&mut graph, 0, side * side)?;
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                link(&mut graph, id, id + 1, rng.risk())?;
            }
            if row + 1 < side {
                link(&mut graph, id, id + side, rng.risk())?;
            }
        }
    }
    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Start with each vertex connected to K nearest neighbors on a ring,
/// then rewire each edge with probability p. High clustering, short routes.
fn gen_small_world(vertex_count: u64) -> Result<Graph, GraphError> {
    let k = 3u64; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(67890);
    add_vertices(&mut graph, 0, vertex_count)?;

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            let target = if rng.next_f64() < p {
                rng.next(vertex_count)
            } else {
                neighbor
            };
            link(&mut graph, i, target, rng.risk())?;
        }
    }
    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, ~3 per vertex. Leaves isolated vertices
/// and small islands, so some routes are unreachable.
fn gen_random(vertex_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(54321);
    add_vertices(&mut graph, 0, vertex_count)?;

    for _ in 0..vertex_count * 3 / 2 {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        link(&mut graph, from, to, rng.risk())?;
    }
    Ok(graph)
}

/// Barbell: two dense clusters joined by a single chain of bridge vertices.
///
/// Every bridge vertex and both chain endpoints are critical; every route
/// between the clusters must cross the bridge.
fn gen_barbell(vertex_count: u64) -> Result<Graph, GraphError> {
    let bridge_len = 10u64.min(vertex_count);
    let cluster_size = (vertex_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(99999);

    // Cluster A: 0..cluster_size, bridge, then cluster B
    add_vertices(&mut graph, 0, cluster_size * 2 + bridge_len)?;
    let b_start = cluster_size + bridge_len;

    for base in [0, b_start] {
        for i in 0..cluster_size {
            for _ in 0..5u64.min(cluster_size.saturating_sub(1)) {
                let target = rng.next(cluster_size);
                link(&mut graph, base + i, base + target, rng.risk())?;
            }
        }
    }

    // Chain from last of A through the bridge to first of B
    if cluster_size > 0 {
        let mut prev = cluster_size - 1;
        for id in cluster_size..b_start {
            link(&mut graph, prev, id, rng.risk())?;
            prev = id;
        }
        link(&mut graph, prev, b_start, rng.risk())?;
    }
    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex attaches to a random recent "surface" vertex, with
/// occasional long-range links that close loops. Mostly tree-like, so many
/// vertices are critical.
fn gen_dla(vertex_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(77777);
    add_vertices(&mut graph, 0, vertex_count)?;

    // VecDeque for O(1) pop_front when evicting oldest surface vertices.
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_vertex in 1..vertex_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(&mut graph, new_vertex, attach_to, rng.risk())?;

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_vertex > 1 {
            let other = rng.next(new_vertex);
            if other != attach_to {
                link(&mut graph, new_vertex, other, rng.risk())?;
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }
    Ok(graph)
}
