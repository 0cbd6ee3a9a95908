// locus.rs - Gene calls on a contig

use bio::bio_types::strand::Strand;
use std::collections::BTreeMap;

/// Provenance of a locus annotation for one annotation system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationSource {
    /// Supplied with the gene calls; hits never overwrite it
    External,
    /// Transferred from a hit with this score
    Hit(f64),
}

/// One gene call on a contig
#[derive(Debug, Clone)]
pub struct Locus {
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    /// 1-based index by ascending start, assigned when attached to a contig
    pub name: usize,
    pub annotations: BTreeMap<String, String>,
    pub annotation_sources: BTreeMap<String, AnnotationSource>,
    /// Set by the scoring engine under the `ignore` weak-loci policy
    pub ignore: bool,
}

impl Locus {
    pub fn new(start: u64, end: u64, strand: Strand) -> Self {
        Self {
            start,
            end,
            strand,
            name: 0,
            annotations: BTreeMap::new(),
            annotation_sources: BTreeMap::new(),
            ignore: false,
        }
    }

    /// Lower coordinate regardless of input orientation
    pub fn left(&self) -> u64 {
        self.start.min(self.end)
    }

    pub fn right(&self) -> u64 {
        self.start.max(self.end)
    }

    /// Length in nucleotides (coordinates are inclusive)
    pub fn len(&self) -> usize {
        (self.right() - self.left() + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach an annotation from the gene-call source
    pub fn annotate_external(&mut self, system: &str, value: &str) {
        self.annotations.insert(system.to_string(), value.to_string());
        self.annotation_sources
            .insert(system.to_string(), AnnotationSource::External);
    }

    /// Take `value` for `system` if `score` beats the evidence behind the
    /// current value (or `floor` when there is none). External values stay.
    pub fn offer_annotation(&mut self, system: &str, value: &str, score: f64, floor: f64) -> bool {
        let reference = match self.annotation_sources.get(system) {
            Some(AnnotationSource::External) => return false,
            Some(AnnotationSource::Hit(previous)) => *previous,
            None => floor,
        };
        if score > reference {
            self.annotations.insert(system.to_string(), value.to_string());
            self.annotation_sources
                .insert(system.to_string(), AnnotationSource::Hit(score));
            true
        } else {
            false
        }
    }

    /// Strand match where two unknown (`.`) strands count as the same
    pub fn same_strand(&self, strand: Strand) -> bool {
        self.strand.strand_symbol() == strand.strand_symbol()
    }

    /// `start:end:strand` as rendered in output rows
    pub fn geometry(&self) -> String {
        format!("{}:{}:{}", self.start, self.end, self.strand.strand_symbol())
    }
}

/// Fraction of the shorter interval covered by the overlap of two
/// inclusive intervals given in either orientation.
pub fn calc_overlap(a1: u64, a2: u64, b1: u64, b2: u64) -> f64 {
    let (a1, a2) = (a1.min(a2), a1.max(a2));
    let (b1, b2) = (b1.min(b2), b1.max(b2));
    let lo = a1.max(b1);
    let hi = a2.min(b2);
    if hi < lo {
        return 0.0;
    }
    let shorter = (a2 - a1 + 1).min(b2 - b1 + 1);
    (hi - lo + 1) as f64 / shorter as f64
}
