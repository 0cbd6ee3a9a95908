// hit.rs - Alignment hits between contig regions and reference taxa

use bio::bio_types::strand::Strand;
use std::collections::BTreeMap;

/// One alignment of a contig region against a reference taxon
#[derive(Debug, Clone)]
pub struct Hit {
    /// Query (contig) coordinates, inclusive, either orientation
    pub qstart: u64,
    pub qend: u64,
    /// Strand of the subject relative to the contig
    pub sstrand: Strand,
    pub taxon: String,
    /// Homology score in [0, 1]
    pub score: f64,
    /// Subject coverage after trimming, in [0, 1]
    pub scov_modified: f64,
    pub annotations: BTreeMap<String, String>,
}

impl Hit {
    pub fn new(qstart: u64, qend: u64, taxon: &str, score: f64) -> Self {
        Self {
            qstart,
            qend,
            sstrand: Strand::Forward,
            taxon: taxon.to_string(),
            score,
            scov_modified: 1.0,
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.sstrand = strand;
        self
    }

    pub fn with_scov(mut self, scov: f64) -> Self {
        self.scov_modified = scov;
        self
    }

    pub fn with_annotation(mut self, system: &str, value: &str) -> Self {
        self.annotations.insert(system.to_string(), value.to_string());
        self
    }

    pub fn left(&self) -> u64 {
        self.qstart.min(self.qend)
    }

    pub fn right(&self) -> u64 {
        self.qstart.max(self.qend)
    }
}
