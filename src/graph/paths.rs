use fxhash::FxHashSet;

use super::types::OverlapGraph;
use crate::error::AssemblyError;

/// Enumerate every simple path (no repeated node) from `source` to `target`.
///
/// Depth-first search with a per-path visited set, so cycles cannot recurse
/// forever. Successors are explored in lexicographic order, which makes the
/// enumeration order reproducible. Exponential in the worst case; callers
/// keep queries to small bubble and tip neighborhoods.
pub fn all_simple_paths(graph: &OverlapGraph, source: &str, target: &str) -> Vec<Vec<String>> {
    let mut found = Vec::new();
    if !graph.contains(source) || !graph.contains(target) {
        return found;
    }
    if source == target {
        found.push(vec![source.to_string()]);
        return found;
    }

    let mut visited: FxHashSet<String> = FxHashSet::default();
    visited.insert(source.to_string());
    let mut path = vec![source.to_string()];
    extend_path(graph, source, target, &mut path, &mut visited, &mut found);
    found
}

fn extend_path(
    graph: &OverlapGraph,
    current: &str,
    target: &str,
    path: &mut Vec<String>,
    visited: &mut FxHashSet<String>,
    found: &mut Vec<Vec<String>>,
) {
    for next in graph.successors(current) {
        if next == target {
            let mut complete = path.clone();
            complete.push(next);
            found.push(complete);
        } else if !visited.contains(&next) {
            visited.insert(next.clone());
            path.push(next.clone());
            extend_path(graph, &next, target, path, visited, found);
            path.pop();
            visited.remove(&next);
        }
    }
}

/// Mean weight of the edges along consecutive path nodes.
///
/// A path with fewer than two nodes has no edges to average, and a gap
/// between consecutive nodes means the caller handed in a path that does not
/// exist in the graph; both are contract violations, not user errors.
pub fn path_average_weight(graph: &OverlapGraph, path: &[String]) -> Result<f64, AssemblyError> {
    if path.len() < 2 {
        return Err(AssemblyError::InvalidPath(format!(
            "{} node(s), need at least 2",
            path.len()
        )));
    }
    let mut total = 0usize;
    for pair in path.windows(2) {
        let weight = graph.edge_weight(&pair[0], &pair[1]).ok_or_else(|| {
            AssemblyError::InvalidPath(format!("no edge {} -> {}", pair[0], pair[1]))
        })?;
        total += weight;
    }
    Ok(total as f64 / (path.len() - 1) as f64)
}

/// Index of the best path: highest average weight, then most nodes.
/// The first index wins any remaining tie.
pub fn select_best_path(paths: &[Vec<String>], weights: &[f64]) -> usize {
    debug_assert_eq!(paths.len(), weights.len());
    let mut best = 0;
    for i in 1..paths.len() {
        if weights[i] > weights[best]
            || (weights[i] == weights[best] && paths[i].len() > paths[best].len())
        {
            best = i;
        }
    }
    best
}

/// True when every node of the path is still in the graph and every
/// consecutive pair is still connected.
pub(crate) fn path_is_intact(graph: &OverlapGraph, path: &[String]) -> bool {
    path.iter().all(|node| graph.contains(node))
        && path
            .windows(2)
            .all(|pair| graph.edge_weight(&pair[0], &pair[1]).is_some())
}

/// Delete the nodes of losing paths. `delete_entry_node` / `delete_sink_node`
/// extend the removal to the path's endpoints; nodes in `keep` (the winning
/// path) are never removed.
pub(crate) fn prune_paths(
    graph: &mut OverlapGraph,
    paths: &[Vec<String>],
    keep: &FxHashSet<String>,
    delete_entry_node: bool,
    delete_sink_node: bool,
) {
    for path in paths {
        if path.len() < 2 {
            continue;
        }
        let start = if delete_entry_node { 0 } else { 1 };
        let end = if delete_sink_node {
            path.len()
        } else {
            path.len() - 1
        };
        for node in &path[start..end] {
            if !keep.contains(node) {
                graph.remove_node(node);
            }
        }
    }
}
