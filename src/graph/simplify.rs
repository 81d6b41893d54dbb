use std::collections::{BTreeMap, VecDeque};

use fxhash::FxHashSet;
use log::debug;

use super::paths::{
    all_simple_paths, path_average_weight, path_is_intact, prune_paths, select_best_path,
};
use super::types::OverlapGraph;
use crate::error::AssemblyError;

/// Every node reachable by walking edges backwards from `node`, including
/// `node` itself.
fn ancestors(graph: &OverlapGraph, node: &str) -> FxHashSet<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<String> = VecDeque::new();
    seen.insert(node.to_string());
    queue.push_back(node.to_string());
    while let Some(current) = queue.pop_front() {
        for source in graph.predecessors(&current) {
            if seen.insert(source.clone()) {
                queue.push_back(source);
            }
        }
    }
    seen
}

/// Closest common ancestor of a set of nodes: a node that reaches every one
/// of them and has no other such node among its own descendants. Ties are
/// broken lexicographically. Returns None when the ancestor sets do not
/// intersect.
pub fn closest_common_ancestor(graph: &OverlapGraph, nodes: &[String]) -> Option<String> {
    let mut common: Option<FxHashSet<String>> = None;
    for node in nodes {
        let node_ancestors = ancestors(graph, node);
        common = Some(match common {
            None => node_ancestors,
            Some(shared) => shared.intersection(&node_ancestors).cloned().collect(),
        });
    }

    let mut candidates: Vec<String> = common.unwrap_or_default().into_iter().collect();
    candidates.sort();
    candidates
        .iter()
        .find(|candidate| {
            !candidates
                .iter()
                .any(|other| *other != **candidate && graph.has_path(candidate, other))
        })
        .cloned()
}

/// Collapse one bubble: keep the best ancestor-to-convergence branch and
/// delete the interiors of the rest. Returns the number of removed nodes.
fn collapse_bubble(
    graph: &mut OverlapGraph,
    ancestor: &str,
    convergence: &str,
) -> Result<usize, AssemblyError> {
    let paths = all_simple_paths(graph, ancestor, convergence);
    if paths.len() < 2 {
        return Ok(0);
    }
    let weights = paths
        .iter()
        .map(|path| path_average_weight(graph, path))
        .collect::<Result<Vec<_>, _>>()?;
    let best = select_best_path(&paths, &weights);
    let keep: FxHashSet<String> = paths[best].iter().cloned().collect();
    let losers: Vec<Vec<String>> = paths
        .into_iter()
        .enumerate()
        .filter(|(index, _)| *index != best)
        .map(|(_, path)| path)
        .collect();

    let before = graph.node_count();
    prune_paths(graph, &losers, &keep, false, false);
    Ok(before - graph.node_count())
}

/// Detect and pop bubbles: wherever multiple branches reconverge on a node
/// beneath a common ancestor, only the best-supported branch survives.
///
/// Each pass iterates a sorted snapshot of node identities and the whole
/// procedure repeats until a pass removes nothing, since collapsing one
/// bubble can expose another. Returns the total number of removed nodes.
pub fn simplify_bubbles(graph: &mut OverlapGraph) -> Result<usize, AssemblyError> {
    let mut removed_total = 0;
    loop {
        let mut removed = 0;
        for node in graph.sorted_nodes() {
            if !graph.contains(&node) {
                continue;
            }
            let predecessors = graph.predecessors(&node);
            if predecessors.len() < 2 {
                continue;
            }
            let Some(ancestor) = closest_common_ancestor(graph, &predecessors) else {
                continue;
            };
            if ancestor == node {
                continue;
            }
            removed += collapse_bubble(graph, &ancestor, &node)?;
        }
        if removed == 0 {
            break;
        }
        debug!("bubble pass removed {} nodes", removed);
        removed_total += removed;
    }
    Ok(removed_total)
}

/// First node with more than one predecessor on a forward walk from
/// `source`, if any: the point where a tip rejoins the main assembly.
fn first_convergence(graph: &OverlapGraph, source: &str) -> Option<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<String> = VecDeque::new();
    seen.insert(source.to_string());
    queue.push_back(source.to_string());
    while let Some(current) = queue.pop_front() {
        for next in graph.successors(&current) {
            if !seen.insert(next.clone()) {
                continue;
            }
            if graph.in_degree(&next) > 1 {
                return Some(next);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Mirror of `first_convergence`: first node with more than one successor on
/// a backward walk from `sink`.
fn first_divergence(graph: &OverlapGraph, sink: &str) -> Option<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<String> = VecDeque::new();
    seen.insert(sink.to_string());
    queue.push_back(sink.to_string());
    while let Some(current) = queue.pop_front() {
        for previous in graph.predecessors(&current) {
            if !seen.insert(previous.clone()) {
                continue;
            }
            if graph.out_degree(&previous) > 1 {
                return Some(previous);
            }
            queue.push_back(previous);
        }
    }
    None
}

/// Drop nodes left with no edges at all after pruning.
fn remove_orphans(graph: &mut OverlapGraph) -> usize {
    let orphans: Vec<String> = graph
        .sorted_nodes()
        .into_iter()
        .filter(|node| graph.in_degree(node) == 0 && graph.out_degree(node) == 0)
        .collect();
    for node in &orphans {
        graph.remove_node(node);
    }
    orphans.len()
}

/// Score a group of competing paths and delete all but the best.
/// Returns the number of removed nodes.
fn prune_competing_paths(
    graph: &mut OverlapGraph,
    paths: Vec<Vec<String>>,
    delete_entry_node: bool,
    delete_sink_node: bool,
) -> Result<usize, AssemblyError> {
    let paths: Vec<Vec<String>> = paths
        .into_iter()
        .filter(|path| path_is_intact(graph, path))
        .collect();
    if paths.len() < 2 {
        return Ok(0);
    }
    let weights = paths
        .iter()
        .map(|path| path_average_weight(graph, path))
        .collect::<Result<Vec<_>, _>>()?;
    let best = select_best_path(&paths, &weights);
    let keep: FxHashSet<String> = paths[best].iter().cloned().collect();
    let losers: Vec<Vec<String>> = paths
        .into_iter()
        .enumerate()
        .filter(|(index, _)| *index != best)
        .map(|(_, path)| path)
        .collect();

    let before = graph.node_count();
    prune_paths(graph, &losers, &keep, delete_entry_node, delete_sink_node);
    Ok(before - graph.node_count())
}

/// Trim entry tips: sources whose branch into the first convergence point is
/// outcompeted by another incoming branch are removed whole, entry node
/// included. Repeats until no removal occurs. Returns removed node count.
pub fn solve_entry_tips(graph: &mut OverlapGraph) -> Result<usize, AssemblyError> {
    let mut removed_total = 0;
    loop {
        let mut removed = 0;
        let mut competing: BTreeMap<String, Vec<Vec<String>>> = BTreeMap::new();
        for source in graph.starting_nodes() {
            if graph.out_degree(&source) != 1 {
                continue;
            }
            let Some(convergence) = first_convergence(graph, &source) else {
                continue;
            };
            for path in all_simple_paths(graph, &source, &convergence) {
                competing.entry(convergence.clone()).or_default().push(path);
            }
        }
        for (convergence, paths) in competing {
            if !graph.contains(&convergence) {
                continue;
            }
            removed += prune_competing_paths(graph, paths, true, false)?;
        }
        removed += remove_orphans(graph);
        if removed == 0 {
            break;
        }
        debug!("entry tip pass removed {} nodes", removed);
        removed_total += removed;
    }
    Ok(removed_total)
}

/// Trim exit tips: the mirror of `solve_entry_tips`. Sinks whose branch out
/// of the last divergence point is outcompeted are removed whole, sink node
/// included. Returns removed node count.
pub fn solve_out_tips(graph: &mut OverlapGraph) -> Result<usize, AssemblyError> {
    let mut removed_total = 0;
    loop {
        let mut removed = 0;
        let mut competing: BTreeMap<String, Vec<Vec<String>>> = BTreeMap::new();
        for sink in graph.sink_nodes() {
            if graph.in_degree(&sink) != 1 {
                continue;
            }
            let Some(divergence) = first_divergence(graph, &sink) else {
                continue;
            };
            for path in all_simple_paths(graph, &divergence, &sink) {
                competing.entry(divergence.clone()).or_default().push(path);
            }
        }
        for (divergence, paths) in competing {
            if !graph.contains(&divergence) {
                continue;
            }
            removed += prune_competing_paths(graph, paths, false, true)?;
        }
        removed += remove_orphans(graph);
        if removed == 0 {
            break;
        }
        debug!("exit tip pass removed {} nodes", removed);
        removed_total += removed;
    }
    Ok(removed_total)
}
