// contig.rs - Contig scoring engine

use crate::core::scores::{GeneScores, SiteScores};
use crate::core::settings::{Settings, WeakLoci};
use crate::data::{calc_overlap, Hit, Locus, Taxonomy};
use std::collections::BTreeSet;

/// An assembled contig, its gene calls, and the per-clade scores derived
/// from the hits landing on them.
#[derive(Debug, Clone)]
pub struct Contig {
    pub name: String,
    pub length: u64,
    pub loci: Vec<Locus>,
    site_scores: SiteScores,
    gene_scores: GeneScores,
    clades: BTreeSet<String>,
    /// Indices of reliable loci; `None` means all of them
    mask: Option<Vec<usize>>,
}

impl Contig {
    pub fn new(name: &str, length: u64) -> Self {
        Self {
            name: name.to_string(),
            length,
            loci: Vec::new(),
            site_scores: SiteScores::new(),
            gene_scores: GeneScores::new(0),
            clades: BTreeSet::new(),
            mask: None,
        }
    }

    /// Keep loci of at least `min_gene_length` and name them 1..n by start
    pub fn attach_loci(&mut self, loci: Vec<Locus>, settings: &Settings) {
        let mut kept: Vec<Locus> = loci
            .into_iter()
            .filter(|locus| locus.len() >= settings.min_gene_length)
            .collect();
        kept.sort_by_key(|locus| locus.left());
        for (i, locus) in kept.iter_mut().enumerate() {
            locus.name = i + 1;
        }
        self.loci = kept;
        self.site_scores = SiteScores::new();
        self.gene_scores = GeneScores::new(self.loci.len());
        self.clades.clear();
        self.mask = None;
    }

    /// Score every sufficiently covering hit into each locus it overlaps
    pub fn attach_hits(&mut self, hits: &[Hit], settings: &Settings) {
        let transfer_threshold = settings.transfer_threshold();
        for hit in hits {
            if hit.scov_modified < settings.min_scov {
                continue;
            }
            for index in 0..self.loci.len() {
                let locus = &self.loci[index];
                if settings.stranded && !locus.same_strand(hit.sstrand) {
                    continue;
                }
                let overlap = calc_overlap(hit.qstart, hit.qend, locus.start, locus.end);
                if overlap >= settings.min_overlap {
                    self.score_hit(hit, index, transfer_threshold);
                }
            }
        }
        self.clades = self.site_scores.clades().map(str::to_string).collect();
    }

    /// Fold one hit into the per-base scores of locus `index` and offer its
    /// annotations to the locus.
    pub fn score_hit(&mut self, hit: &Hit, index: usize, transfer_threshold: f64) {
        let locus = &mut self.loci[index];
        let left = locus.left() as i64;
        let len = locus.len();
        let lo = (hit.left() as i64 - left).max(0);
        let hi = (hit.right() as i64 - left).min(len as i64 - 1);
        if hi >= lo {
            self.site_scores
                .apply(&hit.taxon, index, len, lo as usize, hi as usize, hit.score);
        }
        for (system, value) in &hit.annotations {
            locus.offer_annotation(system, value, hit.score, transfer_threshold);
        }
    }

    /// Rebuild gene scores from site scores and apply the weak-loci policy
    pub fn update_gene_scores(&mut self, settings: &Settings) {
        let n_loci = self.loci.len();
        self.gene_scores = GeneScores::from_sites(&self.site_scores, n_loci);
        let maxes = self.gene_scores.maxes_excluding(&settings.unknown_clade);

        match settings.weak_loci {
            WeakLoci::Penalize => {
                self.mask = None;
            }
            WeakLoci::AssignUnknown => {
                let unknown: Vec<f64> = maxes.iter().map(|m| 1.0 - m).collect();
                self.gene_scores.insert(&settings.unknown_clade, &unknown);
                self.mask = None;
            }
            WeakLoci::Ignore => {
                let floor = settings.min_threshold();
                let mut kept = Vec::with_capacity(n_loci);
                for (index, (locus, max)) in self.loci.iter_mut().zip(&maxes).enumerate() {
                    locus.ignore = *max < floor;
                    if !locus.ignore {
                        kept.push(index);
                    }
                }
                self.mask = if kept.len() == n_loci { None } else { Some(kept) };
            }
        }

        self.clades = self.gene_scores.clades().map(str::to_string).collect();
    }

    /// Climb one taxonomic rank and rescore
    pub fn raise_taxonomy(&mut self, taxonomy: &dyn Taxonomy, settings: &Settings) {
        self.site_scores = self.site_scores.raised(taxonomy);
        self.update_gene_scores(settings);
    }

    /// `(crit, rank)`: min and mean over (masked) loci of the best score
    /// among the given clades. No scorable loci gives `(0, 0)`.
    pub fn score(&self, clade1: &str, clade2: Option<&str>) -> (f64, f64) {
        let row1 = self.gene_scores.get(clade1);
        let row2 = clade2.and_then(|c| self.gene_scores.get(c));
        let best_at = |i: usize| -> f64 {
            let a = row1.map_or(0.0, |r| r[i]);
            let b = row2.map_or(0.0, |r| r[i]);
            a.max(b)
        };

        let values: Vec<f64> = match &self.mask {
            Some(mask) => mask.iter().map(|&i| best_at(i)).collect(),
            None => (0..self.loci.len()).map(best_at).collect(),
        };
        if values.is_empty() {
            return (0.0, 0.0);
        }
        let crit = values.iter().copied().fold(f64::INFINITY, f64::min);
        let rank = values.iter().sum::<f64>() / values.len() as f64;
        (crit, rank)
    }

    pub fn gene_scores(&self) -> &GeneScores {
        &self.gene_scores
    }

    pub fn site_scores(&self) -> &SiteScores {
        &self.site_scores
    }

    /// Clades currently represented, in id order
    pub fn clades(&self) -> &BTreeSet<String> {
        &self.clades
    }

    pub fn mask(&self) -> Option<&[usize]> {
        self.mask.as_deref()
    }

    /// True when no locus survives the weak-loci mask (or there are no loci)
    pub fn all_ignored(&self) -> bool {
        self.loci.iter().all(|locus| locus.ignore)
    }
}
