// Sister-penalty filter
//
// A locus labelled A is checked against the sisters of clade B (minus A),
// a locus labelled B against the sisters of clade A (minus B). If close
// relatives of the other side also explain the locus, the split is suspect.

use super::LgtFilter;
use crate::core::contig::Contig;
use crate::core::explanation::{Explanation, SYN_A, SYN_B};
use crate::data::Taxonomy;
use std::collections::BTreeSet;

pub struct SisterPenaltyFilter {
    ceiling: f64,
    /// Score at which a sister counts as explaining a locus
    threshold: f64,
}

impl SisterPenaltyFilter {
    pub fn new(ceiling: f64, threshold: f64) -> Self {
        Self { ceiling, threshold }
    }

    /// Worse of the per-side mean sister hit fractions
    pub fn penalty(&self, option: &Explanation, contig: &Contig, taxonomy: &dyn Taxonomy) -> f64 {
        let Some(clade2) = option.clade2.as_deref() else {
            return 0.0;
        };
        let clade1 = option.clade1.as_str();
        let without = |mut set: BTreeSet<String>, clade: &str| {
            set.remove(clade);
            set
        };
        let sisters_for_a = without(taxonomy.get_sisters(clade2), clade1);
        let sisters_for_b = without(taxonomy.get_sisters(clade1), clade2);

        let scores = contig.gene_scores();
        let mut sums = [0.0f64; 2];
        let mut counts = [0usize; 2];
        for (i, label) in option.synteny.chars().enumerate() {
            let (side, sisters) = match label {
                SYN_A => (0, &sisters_for_a),
                SYN_B => (1, &sisters_for_b),
                _ => continue,
            };
            let fraction = if sisters.is_empty() {
                0.0
            } else {
                let hits = sisters
                    .iter()
                    .filter_map(|s| scores.get(s))
                    .filter(|row| row[i] >= self.threshold)
                    .count();
                hits as f64 / sisters.len() as f64
            };
            sums[side] += fraction;
            counts[side] += 1;
        }

        (0..2)
            .filter(|&side| counts[side] > 0)
            .map(|side| sums[side] / counts[side] as f64)
            .fold(0.0, f64::max)
    }
}

impl LgtFilter for SisterPenaltyFilter {
    fn name(&self) -> &'static str {
        "sister-penalty"
    }

    fn passes(&self, option: &Explanation, contig: &Contig, taxonomy: &dyn Taxonomy) -> bool {
        self.penalty(option, contig, taxonomy) <= self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;
    use approx::assert_relative_eq;

    #[test]
    fn test_sister_penalty() {
        let settings = test_settings();
        let tree = sample_tree();
        // s__X2 (sister of s__X1) also explains the B locus
        let contig = scored_contig(
            3,
            &[("s__X1", 0, 0.9), ("s__Y1", 1, 0.9), ("s__X2", 1, 0.6), ("s__X1", 2, 0.9)],
            &settings,
        );
        let option = Explanation::two_clade(&contig, "s__X1", "s__Y1", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "ABA");
        let filter = SisterPenaltyFilter::new(0.5, settings.min_threshold());
        // B side: s__X2 hits at the only B locus; A side: s__Y1 has no sisters
        assert_relative_eq!(filter.penalty(&option, &contig, &tree), 1.0, epsilon = 1e-9);
        assert!(!filter.passes(&option, &contig, &tree));
        assert!(SisterPenaltyFilter::new(1.0, 0.5).passes(&option, &contig, &tree));
    }

    #[test]
    fn test_no_labelled_loci_passes() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(1, &[("s__X1", 0, 0.9), ("s__X2", 0, 0.9)], &settings);
        let option = Explanation::two_clade(&contig, "s__X1", "s__X2", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "*");
        let filter = SisterPenaltyFilter::new(0.0, 0.5);
        assert_relative_eq!(filter.penalty(&option, &contig, &tree), 0.0, epsilon = 1e-9);
        assert!(filter.passes(&option, &contig, &tree));
    }
}
