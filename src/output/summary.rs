// summary.rs - JSON run summary

use crate::core::evaluate::ContigResult;
use crate::core::settings::Settings;
use serde::Serialize;
use std::path::Path;

/// Contigs per call stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallCounts {
    pub lgt: usize,
    pub no_lgt: usize,
    pub unclassified: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.lgt + self.no_lgt + self.unclassified
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputFiles {
    pub contigs: String,
    pub gff: String,
    pub hits: String,
    pub taxonomy: String,
}

/// Everything worth keeping about one run, apart from the calls themselves
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    /// UTC, RFC 3339
    pub generated: String,
    pub command_line: String,
    pub threads: usize,
    pub inputs: InputFiles,
    pub settings: Settings,
    pub filters: Vec<String>,
    pub contigs: usize,
    pub contigs_with_hits: usize,
    pub counts: CallCounts,
    pub skipped_contigs: Vec<String>,
    pub climb_cap_contigs: Vec<String>,
    /// Contigs that needed at least one taxonomic climb
    pub climbed_contigs: usize,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// Fill the per-contig statistics from sorted evaluation results
    pub fn record_results(&mut self, results: &[ContigResult]) {
        self.contigs = results.len();
        self.climb_cap_contigs = results
            .iter()
            .filter(|r| r.climb_cap_hit)
            .map(|r| r.contig.name.clone())
            .collect();
        self.climbed_contigs = results.iter().filter(|r| r.climbs > 0).count();
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize run summary: {}", e))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write run summary '{}': {}", path.display(), e))?;
    println!("💾 Run summary saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_summary_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary {
            version: "0.1.0".to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            command_line: "lgtcall".to_string(),
            threads: 1,
            inputs: InputFiles {
                contigs: "c.fa".to_string(),
                gff: "c.gff".to_string(),
                hits: "h.tsv".to_string(),
                taxonomy: "t.tsv".to_string(),
            },
            settings: Settings::default(),
            filters: vec!["ambiguous-fraction".to_string()],
            contigs: 3,
            contigs_with_hits: 2,
            counts: CallCounts {
                lgt: 1,
                no_lgt: 1,
                unclassified: 1,
            },
            skipped_contigs: vec![],
            climb_cap_contigs: vec![],
            climbed_contigs: 0,
            elapsed_seconds: 0.5,
        };
        write_summary(&path, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["counts"]["lgt"], 1);
        assert_eq!(value["settings"]["two_clade_threshold"], 0.8);
        assert_eq!(value["settings"]["weak_loci"], "Ignore");
        assert_eq!(value["filters"][0], "ambiguous-fraction");
    }
}
