// mod.rs - Input loaders for contigs, gene calls, hits and taxonomy

pub mod fasta;
pub mod gff;
pub mod hits;
pub mod taxonomy;

pub use self::fasta::read_contig_lengths;
pub use gff::read_contig_loci;
pub use hits::read_contig_hits;
pub use taxonomy::read_taxonomy;

use std::collections::BTreeMap;

/// Records grouped per contig, contigs in order of first appearance
pub type ContigGroups<T> = Vec<(String, Vec<T>)>;

/// Group `(contig, record)` pairs into runs per contig.
///
/// A contig that reappears after another contig is merged into its first
/// group rather than producing a second one.
pub(crate) fn group_by_contig<T>(records: Vec<(String, T)>) -> ContigGroups<T> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut groups: ContigGroups<T> = Vec::new();
    for (contig, record) in records {
        match index.get(&contig) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(contig.clone(), groups.len());
                groups.push((contig, vec![record]));
            }
        }
    }
    groups
}

/// Tab-delimited reader tolerant of ragged rows and `#` comments
pub(crate) fn tsv_reader(path: &std::path::Path, has_headers: bool) -> Result<csv::Reader<std::fs::File>, String> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .comment(Some(b'#'))
        .quoting(false)
        .from_path(path)
        .map_err(|e| format!("Failed to open '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_contig_merges_repeats() {
        let records = vec![
            ("c2".to_string(), 1),
            ("c1".to_string(), 2),
            ("c2".to_string(), 3),
        ];
        let groups = group_by_contig(records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("c2".to_string(), vec![1, 3]));
        assert_eq!(groups[1], ("c1".to_string(), vec![2]));
    }
}
