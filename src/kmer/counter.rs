use std::collections::HashMap;

use anyhow::Result;
use dashmap::DashMap;
use rayon::prelude::*;

use super::types::Kmer;
use crate::error::AssemblyError;

/// Counts every k-length window across a set of reads.
pub struct KmerCounter {
    k: usize,
    counts: DashMap<Kmer, usize>,
}

impl KmerCounter {
    /// Create a new KmerCounter with the given k-mer size.
    ///
    /// A k-mer needs distinct prefix and suffix views to form an edge, so
    /// k < 2 is rejected before any input is touched.
    pub fn new(k: usize) -> Result<Self, AssemblyError> {
        if k < 2 {
            return Err(AssemblyError::InvalidKmerSize(k));
        }
        Ok(KmerCounter {
            k,
            counts: DashMap::new(),
        })
    }

    /// Count k-mers in a single read. Reads shorter than k contribute nothing.
    pub fn count_sequence(&self, sequence: &[u8]) -> Result<()> {
        if sequence.len() < self.k {
            return Ok(());
        }

        sequence.windows(self.k).for_each(|window| {
            let kmer = Kmer::new(window);
            self.counts
                .entry(kmer)
                .and_modify(|count| *count += 1)
                .or_insert(1);
        });

        Ok(())
    }

    /// Process reads in parallel using rayon.
    pub fn count_sequences<I>(&self, sequences: I) -> Result<()>
    where
        I: ParallelIterator<Item = Vec<u8>>,
    {
        sequences.try_for_each(|seq| self.count_sequence(&seq))?;
        Ok(())
    }

    /// Get k-mer counts as a regular HashMap keyed by sequence.
    pub fn get_counts(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().sequence(), *entry.value()))
            .collect()
    }

    /// Get the k-mer size
    pub fn kmer_size(&self) -> usize {
        self.k
    }

    /// Get the number of unique k-mers
    pub fn unique_kmers(&self) -> usize {
        self.counts.len()
    }

    /// Get the total number of k-mers (including duplicates)
    pub fn total_kmers(&self) -> usize {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }
}
