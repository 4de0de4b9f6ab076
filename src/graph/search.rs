//! Single-source shortest path over the classifier graph.
//!
//! Bellman-Ford relaxation: tolerant of the negative edge weights produced by
//! marginal-cost weighting. The layered topology is acyclic by construction;
//! the complete topology is not, and a negative-weight cycle there leaves the
//! shortest path undefined — an extra relaxation pass detects that case and
//! logs a warning, matching the reference behavior of not aborting.
use crate::error::EnsembleError;
use crate::graph::{ClassifierEdge, EnsembleGraph, Vertex};

fn dense_index(v: Vertex) -> usize {
    match v {
        Vertex::Source => 0,
        Vertex::Sink => 1,
        Vertex::Node(k) => k + 2,
    }
}

/// Minimum-total-weight edge sequence from source to sink.
///
/// Returns `PathNotFound` when the sink is unreachable, e.g. when node
/// training failures disconnected the graph.
pub fn shortest_path(graph: &EnsembleGraph) -> Result<Vec<ClassifierEdge>, EnsembleError> {
    let n = graph.nodes.len() + 2;
    let source = dense_index(Vertex::Source);
    let sink = dense_index(Vertex::Sink);

    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    dist[source] = 0.0;

    for _ in 1..n {
        let mut changed = false;
        for (e, edge) in graph.edges.iter().enumerate() {
            let u = dense_index(edge.source);
            let v = dense_index(edge.target);
            if dist[u].is_finite() && dist[u] + edge.weight < dist[v] {
                dist[v] = dist[u] + edge.weight;
                pred[v] = Some(e);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for edge in &graph.edges {
        let u = dense_index(edge.source);
        let v = dense_index(edge.target);
        if dist[u].is_finite() && dist[u] + edge.weight < dist[v] {
            log::warn!("negative-weight cycle detected; shortest path is not well defined");
            break;
        }
    }

    if !dist[sink].is_finite() {
        return Err(EnsembleError::PathNotFound);
    }

    let mut path = Vec::new();
    let mut v = sink;
    // Predecessor chains longer than the vertex count can only come from a
    // negative cycle; bail out rather than loop.
    while v != source {
        if path.len() > n {
            return Err(EnsembleError::PathNotFound);
        }
        let e = pred[v].ok_or(EnsembleError::PathNotFound)?;
        let edge = graph.edges[e].clone();
        v = dense_index(edge.source);
        path.push(edge);
    }
    path.reverse();

    log::debug!(
        "shortest path: {} edges, total weight {:.4}",
        path.len(),
        dist[sink]
    );
    Ok(path)
}
