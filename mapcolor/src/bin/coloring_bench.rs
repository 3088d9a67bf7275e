#[cfg(feature = "bench_coloring")]
use mapcolor::{assign_by_hash, build_adjacency, color_graph_report, GreedyMode, Palette, Region};
#[cfg(feature = "bench_coloring")]
use std::time::Instant;

#[cfg(not(feature = "bench_coloring"))]
fn main() {
    panic!("coloring_bench requires --features bench_coloring");
}

// Municipality-like tiling: a w x h grid of unit squares with jittered interior
// vertices shared exactly between neighbors.
#[cfg(feature = "bench_coloring")]
fn build_grid_regions(w: usize, h: usize) -> Vec<Region> {
    let jitter = |i: usize, j: usize| -> [f64; 2] {
        let s = ((i * 73 + j * 151) % 97) as f64 / 970.0;
        [i as f64 + s, j as f64 - s]
    };
    let mut regions = Vec::with_capacity(w * h);
    for j in 0..h {
        for i in 0..w {
            let ring = vec![jitter(i, j), jitter(i + 1, j), jitter(i + 1, j + 1), jitter(i, j + 1), jitter(i, j)];
            regions.push(Region::polygon(format!("muc-{}", j * w + i), vec![ring]));
        }
    }
    regions
}

#[cfg(feature = "bench_coloring")]
fn main() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = std::env::args().collect();
    let mut w = 40usize; // 1600 regions by default, the size of a large province set
    let mut h = 40usize;
    let mut repeats = 5usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--w=") {
            if let Ok(v) = val.parse() {
                w = v;
            }
        } else if let Some(val) = a.strip_prefix("--h=") {
            if let Ok(v) = val.parse() {
                h = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    let regions = build_grid_regions(w, h);
    let palette = Palette::dark2();
    let repeats = repeats.max(1);

    let mut adj_ms = 0.0;
    let mut greedy_ms = 0.0;
    let mut hash_ms = 0.0;
    let mut last_report = None;
    for _ in 0..repeats {
        let t0 = Instant::now();
        let graph = build_adjacency(&regions);
        adj_ms += t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        let (_, report) = color_graph_report(&graph, &palette, GreedyMode::Balanced);
        greedy_ms += t1.elapsed().as_secs_f64() * 1000.0;
        last_report = Some(report);

        let t2 = Instant::now();
        let _ = assign_by_hash(regions.iter().map(|r| r.id.as_str()), &palette);
        hash_ms += t2.elapsed().as_secs_f64() * 1000.0;
    }
    let n = repeats as f64;
    let (max_degree, fallbacks, conflicts) =
        last_report.map_or((0, 0, 0), |r| (r.max_degree, r.fallbacks, r.conflicts));

    println!(
        "grid={}x{} regions={} adjacency_ms={:.3} greedy_ms={:.3} hash_ms={:.3} max_degree={} fallbacks={} conflicts={}",
        w,
        h,
        regions.len(),
        adj_ms / n,
        greedy_ms / n,
        hash_ms / n,
        max_degree,
        fallbacks,
        conflicts
    );
}
