// gff.rs - Gene calls from GFF-style tables

use super::{group_by_contig, tsv_reader, ContigGroups};
use crate::data::Locus;
use bio::bio_types::strand::Strand;
use std::path::Path;

/// Attribute keys that identify a feature rather than annotate it
const STRUCTURAL_ATTRIBUTES: [&str; 3] = ["ID", "Name", "Parent"];

pub(crate) fn parse_strand(s: &str) -> Result<Strand, String> {
    match s.trim() {
        "+" => Ok(Strand::Forward),
        "-" => Ok(Strand::Reverse),
        "." | "?" => Ok(Strand::Unknown),
        other => Err(format!("Invalid strand '{}'", other)),
    }
}

fn parse_coordinate(s: &str, what: &str) -> Result<u64, String> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid {} coordinate '{}'", what, s))
}

/// Read gene calls grouped per contig.
///
/// With `attach_annotations`, GFF attributes other than `ID`, `Name` and
/// `Parent` are stored on the locus as externally sourced annotations.
pub fn read_contig_loci(path: &Path, attach_annotations: bool) -> Result<ContigGroups<Locus>, String> {
    let mut reader = tsv_reader(path, false)?;
    let mut records = Vec::new();

    for (line_num, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        if row.len() < 9 {
            return Err(format!(
                "{} record {} has {} columns, expected 9",
                path.display(),
                line_num + 1,
                row.len()
            ));
        }
        let context = |e: String| format!("{} record {}: {}", path.display(), line_num + 1, e);

        let start = parse_coordinate(&row[3], "start").map_err(context)?;
        let end = parse_coordinate(&row[4], "end").map_err(context)?;
        let strand = parse_strand(&row[6]).map_err(context)?;
        let mut locus = Locus::new(start, end, strand);

        if attach_annotations {
            for pair in row[8].split(';') {
                let Some((key, value)) = pair.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                if key.is_empty() || STRUCTURAL_ATTRIBUTES.contains(&key) {
                    continue;
                }
                locus.annotate_external(key, value.trim());
            }
        }

        records.push((row[0].to_string(), locus));
    }

    let groups = group_by_contig(records);
    println!(
        "✅ Gene calls loaded: {} loci on {} contigs",
        groups.iter().map(|(_, loci)| loci.len()).sum::<usize>(),
        groups.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn gff_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "##gff-version 3").unwrap();
        writeln!(file, "c1\tcaller\tCDS\t500\t900\t.\t-\t0\tID=c1_2;KO=K00001").unwrap();
        writeln!(file, "c1\tcaller\tCDS\t1\t300\t.\t+\t0\tID=c1_1").unwrap();
        writeln!(file, "c2\tcaller\tCDS\t10\t400\t.\t.\t0\tID=c2_1").unwrap();
        file
    }

    #[test]
    fn test_read_contig_loci() {
        let file = gff_file();
        let groups = read_contig_loci(file.path(), false).unwrap();
        assert_eq!(groups.len(), 2);
        let (name, loci) = &groups[0];
        assert_eq!(name, "c1");
        assert_eq!(loci.len(), 2);
        assert_eq!(loci[0].start, 500);
        assert_eq!(loci[0].strand, Strand::Reverse);
        assert!(loci[0].annotations.is_empty());
        assert!(groups[1].1[0].strand.is_unknown());
    }

    #[test]
    fn test_external_annotations() {
        let file = gff_file();
        let groups = read_contig_loci(file.path(), true).unwrap();
        let locus = &groups[0].1[0];
        assert_eq!(locus.annotations.get("KO").map(String::as_str), Some("K00001"));
        assert!(!locus.annotations.contains_key("ID"));
    }

    #[test]
    fn test_bad_coordinate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "c1\tcaller\tCDS\tx\t300\t.\t+\t0\tID=c1_1").unwrap();
        let err = read_contig_loci(file.path(), false).unwrap_err();
        assert!(err.contains("start"));
    }
}
