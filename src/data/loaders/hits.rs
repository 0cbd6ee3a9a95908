// hits.rs - Homology hit table

use super::gff::parse_strand;
use super::{group_by_contig, tsv_reader, ContigGroups};
use crate::data::Hit;
use std::path::Path;

/// Expected header of the hit table
pub const HIT_COLUMNS: [&str; 8] = [
    "contig", "qstart", "qend", "sstrand", "taxon", "score", "scov", "annotations",
];

fn parse_unit(s: &str, what: &str) -> Result<f64, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid {} '{}'", what, s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} {} outside [0, 1]", what, value));
    }
    Ok(value)
}

/// Read hits grouped per contig.
///
/// Annotations are `system=value` pairs separated by `;`, or `-` for none.
pub fn read_contig_hits(path: &Path) -> Result<ContigGroups<Hit>, String> {
    let mut reader = tsv_reader(path, true)?;

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read header of {}: {}", path.display(), e))?;
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found.len() < HIT_COLUMNS.len() || found[..HIT_COLUMNS.len()] != HIT_COLUMNS {
        return Err(format!(
            "{} header must start with: {}",
            path.display(),
            HIT_COLUMNS.join(" ")
        ));
    }

    let mut records = Vec::new();
    for (line_num, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let context = |e: String| format!("{} line {}: {}", path.display(), line_num + 2, e);
        if row.len() < HIT_COLUMNS.len() {
            return Err(context(format!(
                "{} columns, expected {}",
                row.len(),
                HIT_COLUMNS.len()
            )));
        }

        let qstart = row[1]
            .trim()
            .parse::<u64>()
            .map_err(|_| context(format!("Invalid qstart '{}'", &row[1])))?;
        let qend = row[2]
            .trim()
            .parse::<u64>()
            .map_err(|_| context(format!("Invalid qend '{}'", &row[2])))?;
        let sstrand = parse_strand(&row[3]).map_err(context)?;
        let score = parse_unit(&row[5], "score").map_err(context)?;
        let scov = parse_unit(&row[6], "scov").map_err(context)?;

        let mut hit = Hit::new(qstart, qend, row[4].trim(), score)
            .with_strand(sstrand)
            .with_scov(scov);
        let annotations = row[7].trim();
        if annotations != "-" && !annotations.is_empty() {
            for pair in annotations.split(';') {
                match pair.split_once('=') {
                    Some((system, value)) if !system.trim().is_empty() => {
                        hit = hit.with_annotation(system.trim(), value.trim());
                    }
                    _ => eprintln!(
                        "⚠️  Warning: {} line {}: skipping malformed annotation '{}'",
                        path.display(),
                        line_num + 2,
                        pair
                    ),
                }
            }
        }

        records.push((row[0].to_string(), hit));
    }

    let groups = group_by_contig(records);
    println!(
        "✅ Hits loaded: {} hits on {} contigs",
        groups.iter().map(|(_, hits)| hits.len()).sum::<usize>(),
        groups.len()
    );
    Ok(groups)
}
