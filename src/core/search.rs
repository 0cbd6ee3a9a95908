// search.rs - Best one-clade and two-clade explanations of a contig

use crate::core::contig::Contig;
use crate::core::explanation::{Direction, Explanation};
use crate::core::filters::FilterChain;
use crate::core::settings::{DisambiguateOne, DisambiguateTwo, Settings};
use crate::data::Taxonomy;

/// Explanation search over the clades currently represented on a contig
pub struct ExplanationSearch<'a> {
    settings: &'a Settings,
    taxonomy: &'a dyn Taxonomy,
    filters: &'a FilterChain,
}

impl<'a> ExplanationSearch<'a> {
    pub fn new(settings: &'a Settings, taxonomy: &'a dyn Taxonomy, filters: &'a FilterChain) -> Self {
        Self {
            settings,
            taxonomy,
            filters,
        }
    }

    /// Best single clade covering every (unmasked) locus at k1
    pub fn explain_one(&self, contig: &Contig) -> Option<Explanation> {
        let k1 = self.settings.one_clade_threshold;
        let options: Vec<Explanation> = contig
            .clades()
            .iter()
            .filter_map(|clade| {
                let (crit, rank) = contig.score(clade, None);
                (crit >= k1).then(|| Explanation::one_clade(contig, clade, crit, rank, k1))
            })
            .collect();
        self.meld_one(options)
    }

    /// Best pair of clades jointly covering every (unmasked) locus at k2
    pub fn explain_two(&self, contig: &Contig) -> Option<Explanation> {
        let k2 = self.settings.two_clade_threshold;
        let scores = contig.gene_scores();
        // a clade that never reaches k2 alone cannot be half of a valid pair
        let candidates: Vec<&str> = contig
            .clades()
            .iter()
            .map(String::as_str)
            .filter(|clade| {
                scores
                    .get(clade)
                    .is_some_and(|row| row.iter().any(|&s| s >= k2))
            })
            .collect();

        let mut options = Vec::new();
        for (i, &clade1) in candidates.iter().enumerate() {
            for &clade2 in &candidates[i + 1..] {
                let (crit, rank) = contig.score(clade1, Some(clade2));
                if crit >= k2 {
                    options.push(Explanation::two_clade(contig, clade1, clade2, crit, rank, k2));
                }
            }
        }
        if options.is_empty() {
            None
        } else {
            self.meld_two(options, contig)
        }
    }

    /// Best-ranked candidate plus every candidate within `range` of it,
    /// best last
    fn near_best(&self, mut options: Vec<Explanation>) -> Vec<Explanation> {
        options.sort_by(|a, b| a.rank.total_cmp(&b.rank));
        let best_rank = options.last().map_or(f64::NEG_INFINITY, |o| o.rank);
        options.retain(|o| best_rank - o.rank <= self.settings.range);
        options
    }

    /// Resolve near-tied one-clade candidates. Never invalidates the result;
    /// `None` only for an empty candidate list.
    pub fn meld_one(&self, options: Vec<Explanation>) -> Option<Explanation> {
        let mut kept = self.near_best(options);
        let clades: Vec<String> = kept.iter().map(|o| o.clade1.clone()).collect();
        let mut best = kept.pop()?;

        if self.settings.disambiguate_one == DisambiguateOne::Meld {
            let refs: Vec<&str> = clades.iter().map(String::as_str).collect();
            let lca = self.taxonomy.get_lca(&refs);
            best.tails1 = self.taxonomy.get_tails(&refs, &lca);
            best.clade1 = lca;
        }
        Some(best)
    }

    /// Filter and resolve near-tied two-clade candidates
    pub fn meld_two(&self, options: Vec<Explanation>, contig: &Contig) -> Option<Explanation> {
        let mut kept = self.near_best(options);
        for option in &mut kept {
            self.filters.apply(option, contig, self.taxonomy);
        }

        if kept.len() == 1 {
            return kept.pop();
        }
        match self.settings.disambiguate_two {
            DisambiguateTwo::ReportBest => kept.pop(),
            DisambiguateTwo::Jump => None,
            DisambiguateTwo::Meld => {
                if !meld_precheck(&kept) {
                    return None;
                }
                self.meld_pair(kept)
            }
        }
    }

    fn meld_pair(&self, mut kept: Vec<Explanation>) -> Option<Explanation> {
        let clades1: Vec<String> = kept.iter().map(|o| o.clade1.clone()).collect();
        let clades2: Vec<String> = kept.iter().filter_map(|o| o.clade2.clone()).collect();
        let refs1: Vec<&str> = clades1.iter().map(String::as_str).collect();
        let refs2: Vec<&str> = clades2.iter().map(String::as_str).collect();

        let lca1 = self.taxonomy.get_lca(&refs1);
        let lca2 = self.taxonomy.get_lca(&refs2);
        if !self.settings.allow_lca {
            let joint = self.taxonomy.get_lca(&[lca1.as_str(), lca2.as_str()]);
            if joint == lca1 || joint == lca2 {
                return None;
            }
        }

        let mut best = kept.pop()?;
        best.tails1 = self.taxonomy.get_tails(&refs1, &lca1);
        best.tails2 = self.taxonomy.get_tails(&refs2, &lca2);
        best.clade1 = lca1;
        best.clade2 = Some(lca2);
        if best.direction == Direction::BIntoA {
            best.donor = best.clade2.clone();
            best.recip = Some(best.clade1.clone());
        }
        Some(best)
    }
}

/// Melding needs every candidate to pass its filters and share one synteny
pub fn meld_precheck(options: &[Explanation]) -> bool {
    match options.first() {
        Some(first) => options
            .iter()
            .all(|o| o.ok && o.synteny == first.synteny),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;
    use approx::assert_relative_eq;

    fn search_with<'a>(settings: &'a Settings, tree: &'a dyn Taxonomy, chain: &'a FilterChain) -> ExplanationSearch<'a> {
        ExplanationSearch::new(settings, tree, chain)
    }

    #[test]
    fn test_explain_one_picks_best_rank() {
        let settings = Settings {
            disambiguate_one: DisambiguateOne::ReportBest,
            ..test_settings()
        };
        let tree = sample_tree();
        let chain = FilterChain::from_settings(&settings);
        let contig = scored_contig(
            2,
            &[("s__X1", 0, 0.9), ("s__X1", 1, 0.9), ("s__Y1", 0, 0.6), ("s__Y1", 1, 0.6)],
            &settings,
        );
        let best = search_with(&settings, &tree, &chain).explain_one(&contig).unwrap();
        assert_eq!(best.clade1, "s__X1");
        assert_eq!(best.synteny, "AA");
        assert!(best.tails1.is_empty());
        assert!(best.crit <= best.rank);
    }

    #[test]
    fn test_meld_one_generalizes_to_lca() {
        let settings = test_settings();
        let tree = sample_tree();
        let chain = FilterChain::from_settings(&settings);
        let contig = scored_contig(1, &[("s__X1", 0, 0.9), ("s__X2", 0, 0.88)], &settings);
        let best = search_with(&settings, &tree, &chain).explain_one(&contig).unwrap();
        assert_eq!(best.clade1, "g__X");
        assert_eq!(best.tails1, vec![vec!["s__X2".to_string()], vec!["s__X1".to_string()]]);
        assert_relative_eq!(best.rank, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_explain_one_none_below_k1() {
        let settings = test_settings();
        let tree = sample_tree();
        let chain = FilterChain::from_settings(&settings);
        let contig = scored_contig(2, &[("s__X1", 0, 0.9), ("s__Y1", 1, 0.9)], &settings);
        assert!(search_with(&settings, &tree, &chain).explain_one(&contig).is_none());
    }

    #[test]
    fn test_explain_two_pair() {
        let settings = test_settings();
        let tree = sample_tree();
        let chain = FilterChain::from_settings(&settings);
        let contig = scored_contig(
            3,
            &[("s__X1", 0, 0.9), ("s__Y1", 1, 0.9), ("s__X1", 2, 0.9), ("s__X2", 0, 0.55)],
            &settings,
        );
        let best = search_with(&settings, &tree, &chain).explain_two(&contig).unwrap();
        assert!(best.ok);
        assert_eq!(best.clade1, "s__X1");
        assert_eq!(best.clade2.as_deref(), Some("s__Y1"));
        assert_eq!(best.synteny, "ABA");
        assert_eq!(best.direction, Direction::BIntoA);
    }

    fn tied_pairs_contig(settings: &Settings) -> Contig {
        // (s__X1|s__X2) + s__Y1 tie exactly
        scored_contig(
            2,
            &[("s__X1", 0, 0.9), ("s__X2", 0, 0.9), ("s__Y1", 1, 0.9)],
            settings,
        )
    }

    #[test]
    fn test_meld_two_policies() {
        let tree = sample_tree();

        let jump = Settings {
            disambiguate_two: DisambiguateTwo::Jump,
            ambiguous_fraction: None,
            ..test_settings()
        };
        let chain = FilterChain::from_settings(&jump);
        let contig = tied_pairs_contig(&jump);
        assert!(search_with(&jump, &tree, &chain).explain_two(&contig).is_none());

        let report = Settings {
            disambiguate_two: DisambiguateTwo::ReportBest,
            ..jump.clone()
        };
        let best = search_with(&report, &tree, &chain).explain_two(&contig).unwrap();
        assert!(best.tails1.is_empty());
        assert_eq!(best.clade2.as_deref(), Some("s__Y1"));

        let meld = Settings {
            disambiguate_two: DisambiguateTwo::Meld,
            ..jump
        };
        let best = search_with(&meld, &tree, &chain).explain_two(&contig).unwrap();
        assert_eq!(best.clade1, "g__X");
        assert_eq!(best.clade2.as_deref(), Some("s__Y1"));
        assert_eq!(best.tails1.len(), 2);
        assert_eq!(best.synteny, "AB");
    }

    #[test]
    fn test_meld_two_rejects_ancestor_pairs() {
        let tree = sample_tree();
        let settings = Settings {
            ambiguous_fraction: None,
            ..test_settings()
        };
        let chain = FilterChain::from_settings(&settings);
        // g__X+s__X2 and s__X1+s__X2 tie and meld to g__X + s__X2, an ancestor pair
        let contig = scored_contig(
            2,
            &[("s__X1", 0, 0.9), ("g__X", 0, 0.9), ("s__X2", 1, 0.9)],
            &settings,
        );
        assert!(search_with(&settings, &tree, &chain).explain_two(&contig).is_none());

        let allow = Settings {
            allow_lca: true,
            ..settings
        };
        let best = search_with(&allow, &tree, &chain).explain_two(&contig).unwrap();
        assert_eq!(best.clade1, "g__X");
        assert_eq!(best.clade2.as_deref(), Some("s__X2"));
    }

    #[test]
    fn test_meld_precheck() {
        let settings = test_settings();
        let contig = tied_pairs_contig(&settings);
        let a = Explanation::two_clade(&contig, "s__X1", "s__Y1", 0.9, 0.9, 0.8);
        let mut b = Explanation::two_clade(&contig, "s__X2", "s__Y1", 0.9, 0.9, 0.8);
        assert!(meld_precheck(&[a.clone(), b.clone()]));
        b.ok = false;
        assert!(!meld_precheck(&[a.clone(), b.clone()]));
        b.ok = true;
        b.synteny = "BA".to_string();
        assert!(!meld_precheck(&[a, b]));
        assert!(!meld_precheck(&[]));
    }
}
