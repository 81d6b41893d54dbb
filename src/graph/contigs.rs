use super::paths::all_simple_paths;
use super::types::OverlapGraph;

/// An assembled contiguous sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub sequence: String,
    pub length: usize,
}

/// Rebuild the sequence a path spells out: the first node in full, then the
/// last character of every following node (consecutive nodes overlap on all
/// but one character).
fn path_sequence(path: &[String]) -> String {
    let mut sequence = path[0].clone();
    for node in &path[1..] {
        if let Some(&last) = node.as_bytes().last() {
            sequence.push(last as char);
        }
    }
    sequence
}

/// Extract one contig per simple path between every connected
/// (source, sink) pair. Collection order is not part of the contract.
pub fn get_contigs(
    graph: &OverlapGraph,
    starting_nodes: &[String],
    sink_nodes: &[String],
) -> Vec<Contig> {
    let mut contigs = Vec::new();
    for start in starting_nodes {
        for end in sink_nodes {
            if !graph.has_path(start, end) {
                continue;
            }
            for path in all_simple_paths(graph, start, end) {
                let sequence = path_sequence(&path);
                let length = sequence.len();
                contigs.push(Contig { sequence, length });
            }
        }
    }
    contigs
}
