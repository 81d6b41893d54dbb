use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use rustig::cli::{AssembleCommand, Cli, Commands, KmersCommand};
use rustig::graph::{
    get_contigs, simplify_bubbles, solve_entry_tips, solve_out_tips, OverlapGraph,
};
use rustig::io::{save_contigs, save_dot, save_report, AssemblyReport, FastxReader};
use rustig::kmer::KmerCounter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(log_file) = cli.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Set up parallel processing
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    match cli.command {
        Commands::Assemble(cmd) => handle_assemble_command(cmd)?,
        Commands::Kmers(cmd) => handle_kmers_command(cmd)?,
    }

    Ok(())
}

fn handle_assemble_command(cmd: AssembleCommand) -> Result<()> {
    // Validate the configuration before touching any input
    let counter = KmerCounter::new(cmd.kmer_size)?;

    let reader = FastxReader::new(cmd.input_files);
    let sequences = reader.read_all()?;
    let reads = sequences.len();
    info!("Loaded {} reads", reads);

    counter.count_sequences(sequences.into_par_iter())?;
    info!(
        "Counted {} k-mers of size {} ({} unique)",
        counter.total_kmers(),
        counter.kmer_size(),
        counter.unique_kmers()
    );

    let mut graph = OverlapGraph::from_kmer_counts(&counter.get_counts());
    let graph_nodes = graph.node_count();
    let graph_edges = graph.edge_count();
    info!(
        "Built overlap graph with {} nodes and {} edges",
        graph_nodes, graph_edges
    );

    let bubble_nodes_removed = simplify_bubbles(&mut graph)?;
    info!("Bubble resolution removed {} nodes", bubble_nodes_removed);

    let entry_tip_nodes_removed = solve_entry_tips(&mut graph)?;
    info!("Entry tip trimming removed {} nodes", entry_tip_nodes_removed);

    let out_tip_nodes_removed = solve_out_tips(&mut graph)?;
    info!("Exit tip trimming removed {} nodes", out_tip_nodes_removed);

    let starting_nodes = graph.starting_nodes();
    let sink_nodes = graph.sink_nodes();
    let contigs = get_contigs(&graph, &starting_nodes, &sink_nodes);
    info!("Extracted {} contigs", contigs.len());

    save_contigs(&contigs, &cmd.output)?;

    if let Some(dot_path) = &cmd.graph_dot {
        save_dot(&graph, dot_path)?;
    }

    if let Some(report_path) = &cmd.report {
        let report = AssemblyReport {
            kmer_size: counter.kmer_size(),
            reads,
            total_kmers: counter.total_kmers(),
            unique_kmers: counter.unique_kmers(),
            graph_nodes,
            graph_edges,
            bubble_nodes_removed,
            entry_tip_nodes_removed,
            out_tip_nodes_removed,
            contigs: contigs.len(),
            total_contig_length: contigs.iter().map(|contig| contig.length).sum(),
            longest_contig: contigs.iter().map(|contig| contig.length).max().unwrap_or(0),
        };
        save_report(&report, report_path)?;
    }

    Ok(())
}

fn handle_kmers_command(cmd: KmersCommand) -> Result<()> {
    let counter = KmerCounter::new(cmd.kmer_size)?;

    let reader = FastxReader::new(cmd.input_files);
    let sequences = reader.read_all()?;
    counter.count_sequences(sequences.into_par_iter())?;
    info!(
        "Counted {} k-mers ({} unique)",
        counter.total_kmers(),
        counter.unique_kmers()
    );

    let mut writer: Box<dyn Write> = match cmd.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    writeln!(writer, "kmer\tcount")?;
    let mut kmers: Vec<(String, usize)> = counter.get_counts().into_iter().collect();
    kmers.sort_by(|(kmer_a, count_a), (kmer_b, count_b)| {
        count_b.cmp(count_a).then_with(|| kmer_a.cmp(kmer_b))
    });
    for (kmer, count) in kmers {
        writeln!(writer, "{}\t{}", kmer, count)?;
    }

    Ok(())
}
