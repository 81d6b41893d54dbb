pub(crate) mod counter;
pub(crate) mod types;

pub use counter::KmerCounter;
pub use types::Kmer;
