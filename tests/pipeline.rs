use std::fs::{self, File};

use roadroute::report::to_json;
use roadroute::{AppConfig, Endpoint, GraphOverrides, LoadedNetwork, RouteRequest, reach, route};
use roadroute_core::loading::binary::{write_edges, write_nodes};
use roadroute_core::{CostMode, Edge, Node, SourceFormat};

#[test]
fn config_file_drives_load_route_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = vec![
        Node::new(10, 59.3293, 18.0686),
        Node::new(20, 59.3303, 18.0686),
        Node::new(30, 59.3303, 18.0706),
    ];
    let edges = vec![Edge::new(10, 20, 111, 40), Edge::new(20, 30, 114, 40)];
    write_nodes(File::create(dir.path().join("nodes.bin")).unwrap(), &nodes).unwrap();
    write_edges(File::create(dir.path().join("edges.bin")).unwrap(), &edges).unwrap();

    let config_path = dir.path().join("roadroute.toml");
    fs::write(
        &config_path,
        "[graph]\nnodes = \"nodes.bin\"\nedges = \"edges.bin\"\n\n\
         [routing]\nmode = \"time\"\n\n[output]\ngpx = \"out/route.gpx\"\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let source = config.graph_source(&GraphOverrides::default()).unwrap();
    assert_eq!(source.format, SourceFormat::Binary);
    let network = LoadedNetwork::open(&source).unwrap();

    let request = RouteRequest {
        from: Endpoint::Id(10),
        to: Endpoint::Id(30),
        mode: config.mode(None),
        gpx: config.output.gpx.clone(),
        geojson: None,
    };
    let summary = route(network.graph(), &request).unwrap();
    assert_eq!(summary.mode, CostMode::Time);
    assert_eq!(summary.path, vec![10, 20, 30]);
    let expected = (0.111 + 0.114) / 40.0 * 60.0;
    assert!((summary.cost.unwrap() - expected).abs() < 1e-9);

    let gpx = fs::read_to_string(dir.path().join("out/route.gpx")).unwrap();
    assert_eq!(gpx.matches("<trkpt").count(), 3);

    let json = to_json(&summary).unwrap();
    assert!(json.contains("\"mode\": \"time\""));

    let reached = reach(network.graph(), Endpoint::Id(30), CostMode::Distance).unwrap();
    assert_eq!(reached.reachable.len(), 3);
    assert!(network.summary().to_string().contains("- Nodes: 3"));
}
