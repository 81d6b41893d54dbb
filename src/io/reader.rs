use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use needletail::{parse_fastx_file, Sequence};

/// FASTA/FASTQ read source over one or more input files.
///
/// Sequences are normalized to uppercase; records containing characters
/// outside {A,C,G,T} are skipped with a warning, since they cannot take part
/// in the overlap graph.
pub struct FastxReader {
    files: Vec<PathBuf>,
}

impl FastxReader {
    pub fn new<P: AsRef<Path>>(files: Vec<P>) -> Self {
        let files = files.into_iter().map(|p| p.as_ref().to_owned()).collect();

        FastxReader { files }
    }

    /// Invoke `callback` with each read sequence and record id, across all
    /// input files in order.
    pub fn process_all<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(&[u8], &str) -> Result<()>,
    {
        for file in &self.files {
            self.process_file(file, &mut callback)
                .with_context(|| format!("Failed to process file: {}", file.display()))?;
        }
        Ok(())
    }

    /// Collect every read into memory. The assembly pipeline is a batch
    /// computation over the full read set, so this is the common entry point.
    pub fn read_all(&self) -> Result<Vec<Vec<u8>>> {
        let mut sequences = Vec::new();
        self.process_all(|sequence, _id| {
            sequences.push(sequence.to_vec());
            Ok(())
        })?;
        Ok(sequences)
    }

    fn process_file<F>(&self, path: &Path, callback: &mut F) -> Result<()>
    where
        F: FnMut(&[u8], &str) -> Result<()>,
    {
        info!("Processing file: {}", path.display());

        let mut reader = parse_fastx_file(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let mut num_sequences = 0;
        let mut num_invalid = 0;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "Failed to parse sequence record")?;

            let sequence = record.normalize(false);
            let id = String::from_utf8_lossy(record.id());

            if sequence
                .iter()
                .any(|&b| !matches!(b, b'A' | b'C' | b'G' | b'T'))
            {
                num_invalid += 1;
                continue;
            }

            callback(&sequence, &id)?;
            num_sequences += 1;
        }

        info!("Processed {} sequences from {}", num_sequences, path.display());
        if num_invalid > 0 {
            warn!("Skipped {} sequences containing invalid characters", num_invalid);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_all_fasta() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("reads.fasta");
        let mut file = File::create(&file_path)?;
        writeln!(file, ">read1\nACGT\n>read2\nGTCA")?;

        let reader = FastxReader::new(vec![file_path]);
        let sequences = reader.read_all()?;

        assert_eq!(sequences, vec![b"ACGT".to_vec(), b"GTCA".to_vec()]);
        Ok(())
    }

    #[test]
    fn test_read_all_fastq() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("reads.fastq");
        let mut file = File::create(&file_path)?;
        writeln!(file, "@read1\nTATAAT\n+\nIIIIII")?;

        let reader = FastxReader::new(vec![file_path]);
        let sequences = reader.read_all()?;

        assert_eq!(sequences, vec![b"TATAAT".to_vec()]);
        Ok(())
    }

    #[test]
    fn test_invalid_sequences_skipped() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("reads.fasta");
        let mut file = File::create(&file_path)?;
        writeln!(file, ">read1\nACGT\n>read2\nNNNN\n>read3\nGTCA")?;

        let reader = FastxReader::new(vec![file_path]);
        let mut ids = Vec::new();
        reader.process_all(|_seq, id| {
            ids.push(id.to_string());
            Ok(())
        })?;

        assert_eq!(ids, vec!["read1", "read3"]);
        Ok(())
    }

    #[test]
    fn test_multiple_files_in_order() -> Result<()> {
        let dir = tempdir()?;
        let first = dir.path().join("a.fasta");
        let second = dir.path().join("b.fasta");
        writeln!(File::create(&first)?, ">a\nAAAA")?;
        writeln!(File::create(&second)?, ">b\nCCCC")?;

        let reader = FastxReader::new(vec![first, second]);
        let sequences = reader.read_all()?;

        assert_eq!(sequences, vec![b"AAAA".to_vec(), b"CCCC".to_vec()]);
        Ok(())
    }
}
