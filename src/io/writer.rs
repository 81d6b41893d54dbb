use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::graph::Contig;

/// Write contigs in FASTA format, one two-line record per contig:
/// a `>contig_<index> len=<length>` header followed by the raw sequence.
/// Indices are zero-based in collection order.
pub fn save_contigs(contigs: &[Contig], output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_contigs(&mut writer, contigs)?;
    info!("Wrote {} contigs to {}", contigs.len(), output.display());
    Ok(())
}

fn write_contigs<W: Write>(writer: &mut W, contigs: &[Contig]) -> Result<()> {
    for (index, contig) in contigs.iter().enumerate() {
        writeln!(writer, ">contig_{} len={}", index, contig.length)?;
        writeln!(writer, "{}", contig.sequence)?;
    }
    Ok(())
}

/// Machine-readable summary of an assembly run.
#[derive(Debug, Serialize)]
pub struct AssemblyReport {
    pub kmer_size: usize,
    pub reads: usize,
    pub total_kmers: usize,
    pub unique_kmers: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub bubble_nodes_removed: usize,
    pub entry_tip_nodes_removed: usize,
    pub out_tip_nodes_removed: usize,
    pub contigs: usize,
    pub total_contig_length: usize,
    pub longest_contig: usize,
}

pub fn save_report(report: &AssemblyReport, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create report file: {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .context("Failed to serialize assembly report")?;
    info!("Wrote assembly report to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn contig(sequence: &str) -> Contig {
        Contig {
            sequence: sequence.to_string(),
            length: sequence.len(),
        }
    }

    #[test]
    fn test_fasta_format_is_exact() {
        let contigs = vec![contig("TATAAT"), contig("ACGT")];
        let mut buffer = Vec::new();
        write_contigs(&mut buffer, &contigs).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            ">contig_0 len=6\nTATAAT\n>contig_1 len=4\nACGT\n"
        );
    }

    #[test]
    fn test_empty_contig_set_writes_nothing() {
        let mut buffer = Vec::new();
        write_contigs(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_save_contigs_to_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("contigs.fasta");
        save_contigs(&[contig("TATAAT")], &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert_eq!(written, ">contig_0 len=6\nTATAAT\n");
        Ok(())
    }

    #[test]
    fn test_report_serializes_all_fields() -> Result<()> {
        let report = AssemblyReport {
            kmer_size: 22,
            reads: 100,
            total_kmers: 5000,
            unique_kmers: 1200,
            graph_nodes: 1100,
            graph_edges: 1200,
            bubble_nodes_removed: 3,
            entry_tip_nodes_removed: 2,
            out_tip_nodes_removed: 1,
            contigs: 4,
            total_contig_length: 900,
            longest_contig: 400,
        };
        let dir = tempdir()?;
        let path = dir.path().join("report.json");
        save_report(&report, &path)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value["kmer_size"], 22);
        assert_eq!(value["contigs"], 4);
        assert_eq!(value["longest_contig"], 400);
        Ok(())
    }
}
