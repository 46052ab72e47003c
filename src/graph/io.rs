use codec::graph::{read_records, write_records};
use codec::{LinkRecord, NodeRecord};
use log::info;
use measure_time::info_time;
use std::path::Path;

use crate::graph::{Conflict, Graph, GraphError, Heading};

impl Graph {
    /// Loads the graph from its node and link files, under the default
    /// conflict policy.
    pub fn load(nodes: &Path, links: &Path) -> Result<Graph, GraphError> {
        Graph::load_with(nodes, links, Conflict::default())
    }

    /// Loads the graph from its node and link files.
    ///
    /// Every node is inserted before any link, so links may be listed in
    /// any order. A link naming an unknown node fails the entire load.
    pub fn load_with(nodes: &Path, links: &Path, conflict: Conflict) -> Result<Graph, GraphError> {
        info_time!("Loading graph from {}", nodes.display());

        let nodes = read_records::<NodeRecord>(nodes)?;
        let links = read_records::<LinkRecord>(links)?;

        let graph = Graph::from_records(nodes, links, conflict)?;
        info!(
            "Loaded graph with {} nodes and {} edges",
            graph.len(),
            graph.edge_count()
        );

        Ok(graph)
    }

    pub fn from_records(
        nodes: impl IntoIterator<Item = NodeRecord>,
        links: impl IntoIterator<Item = LinkRecord>,
        conflict: Conflict,
    ) -> Result<Graph, GraphError> {
        let mut graph = Graph::with_conflict(conflict);

        for node in nodes {
            graph.add_node(node.id, Heading::new(node.yaw), node.lat, node.lng)?;
        }

        for link in links {
            graph.add_edge(&link.from, &link.to, Heading::new(link.heading))?;
        }

        Ok(graph)
    }

    pub fn node_records(&self) -> Vec<NodeRecord> {
        self.nodes()
            .map(|node| NodeRecord {
                id: node.id.clone(),
                yaw: node.yaw.degrees() as i32,
                lat: node.lat(),
                lng: node.lng(),
            })
            .collect()
    }

    pub fn link_records(&self) -> Vec<LinkRecord> {
        self.edges()
            .map(|(from, heading, to)| LinkRecord {
                from: from.clone(),
                heading: heading.degrees() as i32,
                to: to.clone(),
            })
            .collect()
    }

    /// Writes the graph into its node and link files, replacing both.
    pub fn write(&self, nodes: &Path, links: &Path) -> Result<(), GraphError> {
        info_time!("Writing graph to {}", nodes.display());

        let node_count = write_records(nodes, &self.node_records())?;
        let link_count = write_records(links, &self.link_records())?;

        info!("Wrote {node_count} nodes and {link_count} links");
        Ok(())
    }
}
