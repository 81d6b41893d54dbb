use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "De Bruijn graph short-read assembler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble reads into contigs
    Assemble(AssembleCommand),

    /// Count k-mers and export the spectrum
    Kmers(KmersCommand),
}

#[derive(Parser, Debug)]
pub struct AssembleCommand {
    /// Input FASTA/FASTQ files
    #[arg(required = true)]
    pub input_files: Vec<PathBuf>,

    /// K-mer size to use
    #[arg(short, long, default_value = "22")]
    pub kmer_size: usize,

    /// Output contigs FASTA file
    #[arg(short, long, default_value = "contigs.fasta")]
    pub output: PathBuf,

    /// Save the simplified graph in Graphviz DOT format
    #[arg(long)]
    pub graph_dot: Option<PathBuf>,

    /// Write a JSON report of the assembly run
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct KmersCommand {
    /// Input FASTA/FASTQ files
    #[arg(required = true)]
    pub input_files: Vec<PathBuf>,

    /// K-mer size to use
    #[arg(short, long, default_value = "22")]
    pub kmer_size: usize,

    /// Output TSV file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assemble_defaults() {
        let cli = Cli::parse_from(["rustig", "assemble", "reads.fastq"]);
        match cli.command {
            Commands::Assemble(cmd) => {
                assert_eq!(cmd.kmer_size, 22);
                assert_eq!(cmd.output, PathBuf::from("contigs.fasta"));
                assert_eq!(cmd.input_files, vec![PathBuf::from("reads.fastq")]);
            }
            _ => panic!("expected assemble subcommand"),
        }
    }
}
