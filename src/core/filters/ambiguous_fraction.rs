// Ambiguous-fraction filter: limits gene length explained equally well by both clades

use super::LgtFilter;
use crate::core::contig::Contig;
use crate::core::explanation::{Explanation, SYN_A, SYN_AMBIGUOUS, SYN_B};
use crate::data::Taxonomy;

pub struct AmbiguousFractionFilter {
    ceiling: f64,
}

impl AmbiguousFractionFilter {
    pub fn new(ceiling: f64) -> Self {
        Self { ceiling }
    }

    /// Ambiguous length over A+B+ambiguous length; 0 when there is none
    pub fn ambiguous_fraction(option: &Explanation, contig: &Contig) -> f64 {
        let mut total = 0usize;
        let mut ambiguous = 0usize;
        for (label, locus) in option.synteny.chars().zip(&contig.loci) {
            if label == SYN_A || label == SYN_B || label == SYN_AMBIGUOUS {
                total += locus.len();
                if label == SYN_AMBIGUOUS {
                    ambiguous += locus.len();
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            ambiguous as f64 / total as f64
        }
    }
}

impl LgtFilter for AmbiguousFractionFilter {
    fn name(&self) -> &'static str {
        "ambiguous-fraction"
    }

    fn passes(&self, option: &Explanation, contig: &Contig, _taxonomy: &dyn Taxonomy) -> bool {
        Self::ambiguous_fraction(option, contig) <= self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;
    use approx::assert_relative_eq;

    #[test]
    fn test_ambiguous_fraction() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(
            4,
            &[("x", 0, 0.9), ("y", 0, 0.9), ("x", 1, 0.9), ("y", 2, 0.9), ("x", 3, 0.9)],
            &settings,
        );
        let option = Explanation::two_clade(&contig, "x", "y", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "*ABA");
        assert_relative_eq!(AmbiguousFractionFilter::ambiguous_fraction(&option, &contig), 0.25, epsilon = 1e-9);
        assert!(AmbiguousFractionFilter::new(0.25).passes(&option, &contig, &tree));
        assert!(!AmbiguousFractionFilter::new(0.1).passes(&option, &contig, &tree));
    }

    #[test]
    fn test_no_eligible_length_counts_as_zero() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(1, &[("x", 0, 0.3)], &settings);
        let option = Explanation::two_clade(&contig, "x", "y", 0.0, 0.0, 0.8);
        assert_eq!(option.synteny, "~");
        assert_relative_eq!(AmbiguousFractionFilter::ambiguous_fraction(&option, &contig), 0.0, epsilon = 1e-9);
        assert!(AmbiguousFractionFilter::new(0.0).passes(&option, &contig, &tree));
    }
}
