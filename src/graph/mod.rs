pub(crate) mod contigs;
pub(crate) mod paths;
pub(crate) mod simplify;
pub(crate) mod types;

pub use contigs::{get_contigs, Contig};
pub use paths::{all_simple_paths, path_average_weight, select_best_path};
pub use simplify::{simplify_bubbles, solve_entry_tips, solve_out_tips};
pub use types::OverlapGraph;
