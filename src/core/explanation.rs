// explanation.rs - Candidate one- and two-clade explanations of a contig

use crate::core::contig::Contig;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Synteny alphabet
pub const SYN_A: char = 'A';
pub const SYN_B: char = 'B';
pub const SYN_AMBIGUOUS: char = '*';
pub const SYN_IGNORED: char = '~';
pub const SYN_ERROR: char = '!';

/// Direction of a putative transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Unknown,
    /// B inserted into an A background
    BIntoA,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Unknown => write!(f, "A?B"),
            Direction::BIntoA => write!(f, "B>A"),
        }
    }
}

fn leading_b() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^A]*B").expect("static regex"))
}

fn interior_insertion() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^A+B+A+$").expect("static regex"))
}

/// One candidate explanation. Lives for a single explanation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Cleared by any failed LGT filter
    pub ok: bool,
    pub crit: f64,
    pub rank: f64,
    pub clade1: String,
    pub clade2: Option<String>,
    pub synteny: String,
    pub direction: Direction,
    pub donor: Option<String>,
    pub recip: Option<String>,
    /// Lineage segments removed from clade1 candidates by melding
    pub tails1: Vec<Vec<String>>,
    pub tails2: Vec<Vec<String>>,
}

impl Explanation {
    fn new(crit: f64, rank: f64, clade1: &str, clade2: Option<&str>) -> Self {
        Self {
            ok: true,
            crit,
            rank,
            clade1: clade1.to_string(),
            clade2: clade2.map(str::to_string),
            synteny: String::new(),
            direction: Direction::Unknown,
            donor: None,
            recip: None,
            tails1: Vec::new(),
            tails2: Vec::new(),
        }
    }

    /// One-clade explanation with per-locus synteny against `k1`
    pub fn one_clade(contig: &Contig, clade: &str, crit: f64, rank: f64, k1: f64) -> Self {
        let mut option = Self::new(crit, rank, clade, None);
        let scores = contig.gene_scores().get(clade).unwrap_or(&[]);
        option.synteny = contig
            .loci
            .iter()
            .enumerate()
            .map(|(i, locus)| {
                let score = scores.get(i).copied().unwrap_or(0.0);
                if locus.ignore {
                    SYN_IGNORED
                } else if score >= k1 {
                    SYN_A
                } else {
                    SYN_ERROR
                }
            })
            .collect();
        option
    }

    /// Two-clade explanation with canonical A/B labelling and direction
    pub fn two_clade(contig: &Contig, clade1: &str, clade2: &str, crit: f64, rank: f64, k2: f64) -> Self {
        let mut option = Self::new(crit, rank, clade1, Some(clade2));
        let scores = contig.gene_scores();
        let row1 = scores.get(clade1).unwrap_or(&[]);
        let row2 = scores.get(clade2).unwrap_or(&[]);
        option.synteny = contig
            .loci
            .iter()
            .enumerate()
            .map(|(i, locus)| {
                let s1 = row1.get(i).copied().unwrap_or(0.0);
                let s2 = row2.get(i).copied().unwrap_or(0.0);
                if locus.ignore {
                    SYN_IGNORED
                } else if s1.min(s2) >= k2 {
                    SYN_AMBIGUOUS
                } else if s1 >= k2 {
                    SYN_A
                } else if s2 >= k2 {
                    SYN_B
                } else {
                    SYN_ERROR
                }
            })
            .collect();
        option.canonicalize();
        option.detect_direction();
        option
    }

    /// Relabel so that A is the first clearly assigned clade
    fn canonicalize(&mut self) {
        if !leading_b().is_match(&self.synteny) {
            return;
        }
        if let Some(clade2) = self.clade2.take() {
            let clade1 = std::mem::replace(&mut self.clade1, clade2);
            self.clade2 = Some(clade1);
        }
        self.synteny = self
            .synteny
            .chars()
            .map(|c| match c {
                SYN_A => SYN_B,
                SYN_B => SYN_A,
                other => other,
            })
            .collect();
    }

    /// A+B+A+ (ignoring masked loci) means B was inserted into A
    fn detect_direction(&mut self) {
        let pattern: String = self.synteny.chars().filter(|&c| c != SYN_IGNORED).collect();
        if interior_insertion().is_match(&pattern) {
            self.direction = Direction::BIntoA;
            self.donor = self.clade2.clone();
            self.recip = Some(self.clade1.clone());
        }
    }

    /// Number of loci carrying synteny label `label`
    pub fn count_label(&self, label: char) -> usize {
        self.synteny.chars().filter(|&c| c == label).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};

    #[test]
    fn test_one_clade_synteny() {
        let settings = test_settings();
        let contig = scored_contig(3, &[("a", 0, 0.9), ("a", 1, 0.3), ("b", 1, 0.9), ("a", 2, 0.7)], &settings);
        let option = Explanation::one_clade(&contig, "a", 0.3, 0.63, 0.5);
        assert_eq!(option.synteny, "A!A");
        assert_eq!(option.synteny.len(), contig.loci.len());
        assert!(option.ok);
    }

    #[test]
    fn test_two_clade_canonical_swap() {
        let settings = test_settings();
        let contig = scored_contig(2, &[("x", 0, 0.1), ("x", 1, 0.9), ("y", 0, 0.9), ("y", 1, 0.1)], &settings);
        let option = Explanation::two_clade(&contig, "x", "y", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "AB");
        assert_eq!(option.clade1, "y");
        assert_eq!(option.clade2.as_deref(), Some("x"));
        assert_eq!(option.direction, Direction::Unknown);
        assert_eq!(option.direction.to_string(), "A?B");
    }

    #[test]
    fn test_two_clade_direction_with_ignored_loci() {
        let settings = test_settings();
        let contig = scored_contig(
            4,
            &[("x", 0, 0.9), ("y", 1, 0.9), ("z", 2, 0.1), ("x", 3, 0.9)],
            &settings,
        );
        let option = Explanation::two_clade(&contig, "x", "y", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "AB~A");
        assert_eq!(option.direction, Direction::BIntoA);
        assert_eq!(option.donor.as_deref(), Some("y"));
        assert_eq!(option.recip.as_deref(), Some("x"));
    }

    #[test]
    fn test_ambiguous_and_error_labels() {
        let settings = test_settings();
        let contig = scored_contig(
            3,
            &[("x", 0, 0.9), ("y", 0, 0.9), ("x", 1, 0.6), ("y", 2, 0.85)],
            &settings,
        );
        let option = Explanation::two_clade(&contig, "x", "y", 0.6, 0.8, 0.8);
        // the only clear locus belongs to y, so y becomes A
        assert_eq!(option.synteny, "*!A");
        assert_eq!(option.clade1, "y");
        assert_eq!(option.count_label(SYN_A), 1);
        assert_eq!(option.count_label(SYN_B), 0);
    }
}
