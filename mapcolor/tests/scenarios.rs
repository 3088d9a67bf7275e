use mapcolor::{
    assign_by_hash, build_adjacency, color_graph, json::regions_from_geojson, ColorEngine, ColoringConfig,
    GreedyMode, Palette, Region, Strategy,
};
use serde_json::json;
use std::collections::BTreeSet;

fn ab() -> Palette { Palette::new(vec!["#A".into(), "#B".into()]) }

#[test]
fn two_regions_sharing_one_vertex() {
    let x1 = Region::polygon("x1", vec![vec![[-1.0, -1.0], [0.0, -1.0], [0.0, 0.0], [-1.0, 0.0]]]);
    let x2 = Region::polygon("x2", vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]);
    let g = build_adjacency(&[x1, x2]);
    let map = g.to_map();
    assert_eq!(map["x1"], BTreeSet::from(["x2".to_string()]));
    assert_eq!(map["x2"], BTreeSet::from(["x1".to_string()]));

    let a = color_graph(&g, &ab(), GreedyMode::Balanced);
    let colors: BTreeSet<&str> = [a.get("x1").unwrap(), a.get("x2").unwrap()].into();
    assert_eq!(colors, BTreeSet::from(["#A", "#B"]));
}

#[test]
fn three_isolated_regions_one_color() {
    let regions: Vec<Region> = (0..3)
        .map(|i| {
            let x = i as f64 * 10.0;
            Region::polygon(format!("r{i}"), vec![vec![[x, 0.0], [x + 1.0, 0.0], [x, 1.0]]])
        })
        .collect();
    let engine = ColorEngine::new(ColoringConfig { palette: Palette::new(vec!["#only".into()]), ..Default::default() });
    let (a, report) = engine.assign_with_report(&regions);
    assert_eq!(a.len(), 3);
    assert!(a.iter().all(|(_, c)| c == "#only"));
    assert_eq!(report.unwrap().fallbacks, 0);
}

#[test]
fn hash_assigner_ignores_input_order() {
    let p = Palette::new((0..10).map(|i| format!("#{i:06x}")).collect());
    let fwd = assign_by_hash(["muc-1", "muc-2", "muc-3"], &p);
    let rev = assign_by_hash(["muc-3", "muc-2", "muc-1"], &p);
    assert_eq!(fwd, rev);
}

#[test]
fn empty_inputs_give_empty_outputs() {
    assert!(ColorEngine::default().assign(&[]).is_empty());
    let engine = ColorEngine::new(ColoringConfig { palette: Palette::new(vec![]), ..Default::default() });
    assert!(engine.assign(&[Region::new("a", None)]).is_empty());
    let hash = ColorEngine::new(ColoringConfig { palette: Palette::new(vec![]), strategy: Strategy::Hash, ..Default::default() });
    assert!(hash.assign(&[Region::new("a", None)]).is_empty());
}

#[test]
fn geojson_to_colors_end_to_end() {
    // three provinces in a row plus one with broken coordinates
    let fc = json!({"type":"FeatureCollection","features":[
        {"type":"Feature","id":"28","properties":{"name":"Madrid"},
         "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
        {"type":"Feature","properties":{"id":"45","name":"Toledo"},
         "geometry":{"type":"Polygon","coordinates":[[[1,0],[2,0],[2,1],[1,1],[1,0]]]}},
        {"type":"Feature","properties":{"name":"Cuenca"},
         "geometry":{"type":"MultiPolygon","coordinates":[[[[2,0],[3,0],[3,1],[2,1],[2,0]]]]}},
        {"type":"Feature","id":"xx","geometry":{"type":"Polygon","coordinates":[[["a","b"]]]}}
    ]});
    let regions = regions_from_geojson(&fc).unwrap();
    let engine = ColorEngine::default();
    let g = engine.adjacency(&regions);
    assert!(g.are_adjacent("28", "45"));
    assert!(g.are_adjacent("45", "2"));
    assert!(!g.are_adjacent("28", "2"));
    assert_eq!(g.degree("xx"), Some(0));

    let a = engine.assign(&regions);
    assert_eq!(a.len(), 4);
    assert_ne!(a.get("28"), a.get("45"));
    assert_ne!(a.get("45"), a.get("2"));
    assert!(a.iter().all(|(_, c)| engine.palette().entries().iter().any(|p| p == c)));
}

#[test]
fn first_fit_and_balanced_both_proper_on_a_ring() {
    // 6-cycle: max degree 2, 3 colors suffice for the guarantee
    let ids = ["a", "b", "c", "d", "e", "f"];
    let edges: Vec<(&str, &str)> = (0..6).map(|i| (ids[i], ids[(i + 1) % 6])).collect();
    let g = mapcolor::AdjacencyGraph::from_edges(&ids, &edges);
    let p = Palette::new(vec!["#1".into(), "#2".into(), "#3".into()]);
    for mode in [GreedyMode::Balanced, GreedyMode::FirstFit] {
        let a = color_graph(&g, &p, mode);
        for (x, y) in &edges {
            assert_ne!(a.get(x), a.get(y), "{mode:?} {x}-{y}");
        }
    }
}
