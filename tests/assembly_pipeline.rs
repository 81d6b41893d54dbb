use rayon::prelude::*;

use rustig::graph::{
    get_contigs, simplify_bubbles, solve_entry_tips, solve_out_tips, OverlapGraph,
};
use rustig::kmer::KmerCounter;

/// Run the whole pipeline over in-memory reads and return the assembled
/// sequences, sorted for comparison.
fn assemble(reads: &[&str], k: usize) -> Vec<String> {
    let counter = KmerCounter::new(k).unwrap();
    let sequences: Vec<Vec<u8>> = reads.iter().map(|read| read.as_bytes().to_vec()).collect();
    counter.count_sequences(sequences.into_par_iter()).unwrap();

    let mut graph = OverlapGraph::from_kmer_counts(&counter.get_counts());
    simplify_bubbles(&mut graph).unwrap();
    solve_entry_tips(&mut graph).unwrap();
    solve_out_tips(&mut graph).unwrap();

    let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());
    let mut sequences: Vec<String> = contigs.into_iter().map(|contig| contig.sequence).collect();
    sequences.sort();
    sequences
}

#[test]
fn single_read_reassembles_to_itself() {
    assert_eq!(assemble(&["TATAAT"], 4), vec!["TATAAT"]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(assemble(&[], 5).is_empty());
    // Reads shorter than k are degenerate input, not an error
    assert!(assemble(&["ACG", "T"], 5).is_empty());
}

#[test]
fn deep_coverage_is_one_contig() {
    let truth = "AAGGCTGCATCGTA";
    let reads: Vec<&str> = std::iter::repeat(truth).take(30).collect();
    assert_eq!(assemble(&reads, 5), vec![truth.to_string()]);
}

#[test]
fn sequencing_artifacts_are_simplified_away() {
    // 30 error-free copies of the sequence, plus one read with a substitution
    // in the middle (a bubble), one with a bad first base (an entry tip) and
    // one with a bad last base (an exit tip). Simplification must recover the
    // single true sequence.
    let truth = "AAGGCTGCATCGTA";
    let mid_error = "AAGGCTGTATCGTA";
    let start_error = "CAGGCTGCATCGTA";
    let end_error = "AAGGCTGCATCGTT";

    let mut reads: Vec<&str> = std::iter::repeat(truth).take(30).collect();
    reads.push(mid_error);
    reads.push(start_error);
    reads.push(end_error);

    assert_eq!(assemble(&reads, 5), vec![truth.to_string()]);
}

#[test]
fn unsimplified_artifacts_survive_without_cleanup() {
    // Control for the test above: skipping simplification leaves the error
    // branches in the graph and produces more than one contig.
    let truth = "AAGGCTGCATCGTA";
    let mid_error = "AAGGCTGTATCGTA";

    let counter = KmerCounter::new(5).unwrap();
    for _ in 0..30 {
        counter.count_sequence(truth.as_bytes()).unwrap();
    }
    counter.count_sequence(mid_error.as_bytes()).unwrap();

    let graph = OverlapGraph::from_kmer_counts(&counter.get_counts());
    let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());
    assert_eq!(contigs.len(), 2);
}

#[test]
fn two_loci_assemble_independently() {
    let locus_a = "AACCGGTTACAT";
    let locus_b = "TTTGCACAGGAG";
    let mut reads = Vec::new();
    for _ in 0..10 {
        reads.push(locus_a);
        reads.push(locus_b);
    }
    assert_eq!(
        assemble(&reads, 6),
        vec![locus_a.to_string(), locus_b.to_string()]
    );
}
