// settings.rs - Evaluation thresholds and policies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handling of loci that no known clade explains confidently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeakLoci {
    /// Leave them in; they drag down every explanation
    Penalize,
    /// Add a synthetic clade scoring `1 - max` at each locus
    AssignUnknown,
    /// Mask them out of scoring and synteny
    Ignore,
}

/// Stringency of annotation transfer from hits to loci
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferMode {
    Lenient,
    Strict,
    VeryStrict,
}

/// Resolution of near-tied one-clade explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisambiguateOne {
    ReportBest,
    Meld,
}

/// Resolution of near-tied two-clade explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisambiguateTwo {
    ReportBest,
    Jump,
    Meld,
}

impl FromStr for WeakLoci {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "penalize" => Ok(WeakLoci::Penalize),
            "assign-unknown" => Ok(WeakLoci::AssignUnknown),
            "ignore" => Ok(WeakLoci::Ignore),
            _ => Err(format!(
                "Invalid weak-loci policy: {}. Use: ignore, penalize, assign-unknown",
                s
            )),
        }
    }
}

impl FromStr for TransferMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(TransferMode::Lenient),
            "strict" => Ok(TransferMode::Strict),
            "very-strict" => Ok(TransferMode::VeryStrict),
            _ => Err(format!(
                "Invalid annotation transfer mode: {}. Use: lenient, strict, very-strict",
                s
            )),
        }
    }
}

impl FromStr for DisambiguateOne {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report-best" => Ok(DisambiguateOne::ReportBest),
            "meld" => Ok(DisambiguateOne::Meld),
            _ => Err(format!(
                "Invalid one-clade disambiguation: {}. Use: report-best, meld",
                s
            )),
        }
    }
}

impl FromStr for DisambiguateTwo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report-best" => Ok(DisambiguateTwo::ReportBest),
            "jump" => Ok(DisambiguateTwo::Jump),
            "meld" => Ok(DisambiguateTwo::Meld),
            _ => Err(format!(
                "Invalid two-clade disambiguation: {}. Use: report-best, jump, meld",
                s
            )),
        }
    }
}

impl fmt::Display for WeakLoci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeakLoci::Penalize => "penalize",
            WeakLoci::AssignUnknown => "assign-unknown",
            WeakLoci::Ignore => "ignore",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for DisambiguateTwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisambiguateTwo::ReportBest => "report-best",
            DisambiguateTwo::Jump => "jump",
            DisambiguateTwo::Meld => "meld",
        };
        write!(f, "{}", name)
    }
}

/// Read-only configuration shared by every contig evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// k1: minimum per-gene score for a one-clade explanation
    pub one_clade_threshold: f64,
    /// k2: minimum per-gene score for a two-clade explanation
    pub two_clade_threshold: f64,
    pub disambiguate_one: DisambiguateOne,
    pub disambiguate_two: DisambiguateTwo,
    /// Rank window for near-tied explanations
    pub range: f64,
    /// Climbs applied before the first explanation attempt
    pub jump_taxonomy: Option<usize>,
    /// Keep melded LGTs whose clades are ancestor/descendant
    pub allow_lca: bool,
    pub ambiguous_fraction: Option<f64>,
    pub clade_genes: Option<usize>,
    pub clade_leaves: Option<usize>,
    pub sister_penalty: Option<f64>,
    pub weak_loci: WeakLoci,
    pub transfer_annotations: TransferMode,
    pub min_overlap: f64,
    pub min_gene_length: usize,
    pub min_scov: f64,
    pub stranded: bool,
    pub root_clade: String,
    pub unknown_clade: String,
    /// Upper bound on taxonomic climbs per contig
    pub max_climbs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            one_clade_threshold: 0.5,
            two_clade_threshold: 0.8,
            disambiguate_one: DisambiguateOne::Meld,
            disambiguate_two: DisambiguateTwo::Meld,
            range: 0.05,
            jump_taxonomy: None,
            allow_lca: false,
            ambiguous_fraction: Some(0.1),
            clade_genes: None,
            clade_leaves: None,
            sister_penalty: None,
            weak_loci: WeakLoci::Ignore,
            transfer_annotations: TransferMode::Strict,
            min_overlap: 0.1,
            min_gene_length: 200,
            min_scov: 0.0,
            stranded: false,
            root_clade: "r__Root".to_string(),
            unknown_clade: "Unknown".to_string(),
            max_climbs: 100,
        }
    }
}

impl Settings {
    /// Lower of k1/k2; loci below it everywhere are weak
    pub fn min_threshold(&self) -> f64 {
        self.one_clade_threshold.min(self.two_clade_threshold)
    }

    pub fn max_threshold(&self) -> f64 {
        self.one_clade_threshold.max(self.two_clade_threshold)
    }

    /// Score a hit must beat to annotate a locus that has no annotation yet
    pub fn transfer_threshold(&self) -> f64 {
        match self.transfer_annotations {
            TransferMode::Lenient => 0.0,
            TransferMode::Strict => self.min_threshold(),
            TransferMode::VeryStrict => self.max_threshold(),
        }
    }

    /// Check ranges that argument parsing cannot express
    pub fn validate(&self) -> Result<(), String> {
        let unit = [
            ("one-clade-threshold", Some(self.one_clade_threshold)),
            ("two-clade-threshold", Some(self.two_clade_threshold)),
            ("min-overlap", Some(self.min_overlap)),
            ("min-scov", Some(self.min_scov)),
            ("ambiguous-fraction", self.ambiguous_fraction),
            ("sister-penalty", self.sister_penalty),
        ];
        for (name, value) in unit {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("--{} must be between 0.0 and 1.0 (got {})", name, v));
                }
            }
        }
        if self.range < 0.0 {
            return Err(format!("--range must be non-negative (got {})", self.range));
        }
        if self.jump_taxonomy == Some(0) {
            return Err("--jump-taxonomy must be at least 1".to_string());
        }
        if self.clade_genes == Some(0) || self.clade_leaves == Some(0) {
            return Err("--clade-genes and --clade-leaves must be at least 1".to_string());
        }
        if self.max_climbs == 0 {
            return Err("climbing cap must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_handle_swapped_k() {
        let settings = Settings {
            one_clade_threshold: 0.9,
            two_clade_threshold: 0.6,
            ..Settings::default()
        };
        assert_eq!(settings.min_threshold(), 0.6);
        assert_eq!(settings.max_threshold(), 0.9);
        assert_eq!(settings.transfer_threshold(), 0.6);

        let lenient = Settings {
            transfer_annotations: TransferMode::Lenient,
            ..settings.clone()
        };
        assert_eq!(lenient.transfer_threshold(), 0.0);
        let very = Settings {
            transfer_annotations: TransferMode::VeryStrict,
            ..settings
        };
        assert_eq!(very.transfer_threshold(), 0.9);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("assign-unknown".parse::<WeakLoci>(), Ok(WeakLoci::AssignUnknown));
        assert_eq!("JUMP".parse::<DisambiguateTwo>(), Ok(DisambiguateTwo::Jump));
        assert_eq!("report-best".parse::<DisambiguateOne>(), Ok(DisambiguateOne::ReportBest));
        assert!("jump".parse::<DisambiguateOne>().is_err());
        assert!("loose".parse::<TransferMode>().is_err());
        assert_eq!(WeakLoci::AssignUnknown.to_string(), "assign-unknown");
    }

    #[test]
    fn test_validate() {
        assert!(Settings::default().validate().is_ok());
        let bad = Settings {
            two_clade_threshold: 1.5,
            ..Settings::default()
        };
        assert!(bad.validate().is_err());
        let bad_jump = Settings {
            jump_taxonomy: Some(0),
            ..Settings::default()
        };
        assert!(bad_jump.validate().is_err());
    }
}
