// fasta.rs - Contig length table from a FASTA file

use bio::io::fasta;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Map contig name → nucleotide length
pub fn read_contig_lengths(path: &Path) -> Result<BTreeMap<String, u64>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open contigs file '{}': {}", path.display(), e))?;
    let reader = fasta::Reader::new(BufReader::new(file));

    let mut lengths = BTreeMap::new();
    for record_result in reader.records() {
        let record = record_result
            .map_err(|e| format!("Invalid FASTA record in {}: {}", path.display(), e))?;
        let id = record.id().to_string();
        if lengths.insert(id.clone(), record.seq().len() as u64).is_some() {
            return Err(format!("Duplicate contig '{}' in {}", id, path.display()));
        }
    }

    println!("✅ Contigs loaded: {} sequences", lengths.len());
    Ok(lengths)
}
