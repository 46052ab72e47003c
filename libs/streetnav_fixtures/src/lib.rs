//! On-disk fixtures shared by the workspace tests and benches.

use std::path::PathBuf;

/// Five node panorama graph, a northbound street with a right turn.
pub const GRAPH_NODES: &str = "nodes.txt";
pub const GRAPH_LINKS: &str = "links.txt";

/// Links referencing a node that is not listed in [`GRAPH_NODES`].
pub const DANGLING_LINKS: &str = "dangling_links.txt";

/// External panorama mapping, `n3` and `n4` alias the same panorama.
pub const PANORAMA_MAPPING: &str = "mapping.json";

/// Two route records walking the fixture graph.
pub const ROUTES: &str = "routes.json";

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

/// A fresh scratch directory under the system temp dir, unique per test name and process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("streetnav-{name}-{}", std::process::id()));

    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("could not create scratch directory");
    dir
}
