use std::fs;

use roadroute_core::prelude::*;
use tempfile::TempDir;

const NODES: &str = "id,latitude,longitude
1,47.3769,8.5417
2,47.3779,8.5417
3,47.3779,8.5437
4,47.3769,8.5437
bad,1,1
";

const EDGES: &str = "from_node,to_node,name,speed,highway,length,oneway
1,2,Bahnhofstrasse,30,primary,111,no
2,3,Rennweg,,residential,151,yes
3,4,Limmatquai,abc,,111
4,1,Uraniastrasse,50,secondary,151,false
1,9,Ghost Lane,50,service,20,no
2,4,Broken,50
";

fn write(dir: &TempDir) -> GraphSourceConfig {
    let nodes = dir.path().join("nodes.csv");
    let edges = dir.path().join("edges.csv");
    fs::write(&nodes, NODES).unwrap();
    fs::write(&edges, EDGES).unwrap();
    GraphSourceConfig::csv(nodes, edges)
}

#[test]
fn loads_tables_with_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir);
    let graph = load_legacy(&config.nodes_path, &config.edges_path).unwrap();

    assert_eq!(graph.node_count(), 4);
    // Ghost Lane names an unknown node, Broken is missing its length
    assert_eq!(graph.edge_count(), 4);
    let rennweg = graph.edge(1).unwrap();
    assert_eq!(rennweg.speed_limit_kph, 50);
    assert!(rennweg.one_way);
    let limmatquai = graph.edge(2).unwrap();
    assert_eq!(limmatquai.speed_limit_kph, 50);
    assert_eq!(limmatquai.highway, "unknown");
    assert!(!limmatquai.one_way);
}

#[test]
fn routes_over_legacy_graph() {
    let dir = TempDir::new().unwrap();
    let loaded = load_network(&write(&dir)).unwrap();
    let network = loaded.graph();

    let result = find_path(network, 3, 2, CostMode::Distance).unwrap();
    // 3 -> 2 is one-way the other way: 3 -> 4 -> 1 -> 2
    assert_eq!(result.cost(), Some(373.0));
    assert_eq!(result.path_ids(network).unwrap(), vec![3, 4, 1, 2]);

    let fastest = find_path(network, 1, 3, CostMode::Time).unwrap();
    assert!(fastest.target_found());
}

#[test]
fn missing_csv_is_file_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_legacy(&dir.path().join("nodes.csv"), &dir.path().join("edges.csv"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn latin1_street_name_keeps_other_rows() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir);
    let mut edges = b"from_node,to_node,name,speed,highway,length,oneway\n".to_vec();
    edges.extend_from_slice(b"1,2,Bahnhofstrasse,30,primary,111,no\n");
    edges.extend_from_slice(b"2,3,Sihlstra\xdfe,30,residential,151,no\n");
    edges.extend_from_slice(b"3,4,Limmatquai,50,secondary,111,no\n");
    fs::write(&config.edges_path, edges).unwrap();

    let loaded = load_network(&config).unwrap();
    let LoadedGraph::Lists(graph) = &loaded else {
        panic!("CSV tables should load as a list-backed graph");
    };
    assert_eq!(graph.edge(1).unwrap().name, "Sihlstra\u{FFFD}e");

    let result = find_path(loaded.graph(), 1, 4, CostMode::Distance).unwrap();
    assert_eq!(result.cost(), Some(373.0));
}
