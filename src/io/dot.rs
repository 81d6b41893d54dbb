use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::graph::OverlapGraph;

/// Render the graph in Graphviz DOT form. Well-supported edges (weight > 3)
/// are drawn solid, weakly supported ones dashed.
pub fn save_dot(graph: &OverlapGraph, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create graph file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_dot(&mut writer, graph)?;
    info!(
        "Wrote graph with {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        output.display()
    );
    Ok(())
}

fn write_dot<W: Write>(writer: &mut W, graph: &OverlapGraph) -> Result<()> {
    writeln!(writer, "digraph overlap {{")?;
    for (from, to, weight) in graph.sorted_edges() {
        let style = if weight > 3 { "solid" } else { "dashed" };
        writeln!(
            writer,
            "    \"{}\" -> \"{}\" [label={}, style={}];",
            from, to, weight, style
        )?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}
