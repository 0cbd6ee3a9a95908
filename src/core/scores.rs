// scores.rs - Per-clade score storage for a single contig

use crate::data::Taxonomy;
use std::collections::BTreeMap;

/// Per-base scores: clade → locus index → one value per nucleotide
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteScores {
    by_clade: BTreeMap<String, BTreeMap<usize, Vec<f64>>>,
}

impl SiteScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise bases `lo..=hi` of `locus` for `clade` to at least `score`.
    /// `locus_len` sizes the vector on first touch.
    pub fn apply(&mut self, clade: &str, locus: usize, locus_len: usize, lo: usize, hi: usize, score: f64) {
        let sites = self
            .by_clade
            .entry(clade.to_string())
            .or_default()
            .entry(locus)
            .or_insert_with(|| vec![0.0; locus_len]);
        let hi = hi.min(sites.len().saturating_sub(1));
        if lo > hi || sites.is_empty() {
            return;
        }
        for site in &mut sites[lo..=hi] {
            if score > *site {
                *site = score;
            }
        }
    }

    pub fn get(&self, clade: &str, locus: usize) -> Option<&[f64]> {
        self.by_clade
            .get(clade)
            .and_then(|loci| loci.get(&locus))
            .map(Vec::as_slice)
    }

    pub fn clades(&self) -> impl Iterator<Item = &str> {
        self.by_clade.keys().map(String::as_str)
    }

    /// Scores one taxonomic rank up: every clade is re-keyed by its parent,
    /// sites merged by elementwise maximum. Clades without a parent drop out.
    pub fn raised(&self, taxonomy: &dyn Taxonomy) -> SiteScores {
        let mut next: BTreeMap<String, BTreeMap<usize, Vec<f64>>> = BTreeMap::new();
        for (clade, loci) in &self.by_clade {
            let Some(parent) = taxonomy.get_parent(clade) else {
                continue;
            };
            let inner = next.entry(parent.to_string()).or_default();
            for (&locus, sites) in loci {
                match inner.get_mut(&locus) {
                    Some(merged) => {
                        for (m, s) in merged.iter_mut().zip(sites) {
                            *m = m.max(*s);
                        }
                    }
                    None => {
                        inner.insert(locus, sites.clone());
                    }
                }
            }
        }
        SiteScores { by_clade: next }
    }
}

/// Per-gene scores stored as one flat arena of fixed-length rows,
/// one row per clade, one column per locus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneScores {
    n_loci: usize,
    rows: BTreeMap<String, usize>,
    values: Vec<f64>,
}

impl GeneScores {
    pub fn new(n_loci: usize) -> Self {
        Self {
            n_loci,
            rows: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    /// Collapse site scores by averaging; untouched loci score 0
    pub fn from_sites(sites: &SiteScores, n_loci: usize) -> Self {
        let mut scores = Self::new(n_loci);
        for clade in sites.clades() {
            let row: Vec<f64> = (0..n_loci)
                .map(|i| match sites.get(clade, i) {
                    Some(values) if !values.is_empty() => {
                        values.iter().sum::<f64>() / values.len() as f64
                    }
                    _ => 0.0,
                })
                .collect();
            scores.insert(clade, &row);
        }
        scores
    }

    /// Add or replace the row for `clade`
    pub fn insert(&mut self, clade: &str, row: &[f64]) {
        debug_assert_eq!(row.len(), self.n_loci, "gene score row must cover every locus");
        match self.rows.get(clade) {
            Some(&r) => {
                self.values[r * self.n_loci..(r + 1) * self.n_loci].copy_from_slice(row);
            }
            None => {
                self.rows.insert(clade.to_string(), self.rows.len());
                self.values.extend_from_slice(row);
            }
        }
    }

    pub fn get(&self, clade: &str) -> Option<&[f64]> {
        self.rows
            .get(clade)
            .map(|&r| &self.values[r * self.n_loci..(r + 1) * self.n_loci])
    }

    /// Clades in id order
    pub fn clades(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Best score at each locus over all clades except `excluded`
    pub fn maxes_excluding(&self, excluded: &str) -> Vec<f64> {
        let mut maxes = vec![0.0f64; self.n_loci];
        for (clade, &r) in &self.rows {
            if clade == excluded {
                continue;
            }
            let row = &self.values[r * self.n_loci..(r + 1) * self.n_loci];
            for (m, v) in maxes.iter_mut().zip(row) {
                *m = m.max(*v);
            }
        }
        maxes
    }
}
