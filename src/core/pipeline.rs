// pipeline.rs - Assemble contigs from the loaded input streams

use crate::core::contig::Contig;
use crate::core::settings::Settings;
use crate::data::loaders::ContigGroups;
use crate::data::{Hit, Locus};
use std::collections::{BTreeMap, BTreeSet};

/// A contig with its loci attached and the hits that landed on it.
/// `hits` is `None` when the hit table never mentions the contig.
#[derive(Debug, Clone)]
pub struct ContigInput {
    pub contig: Contig,
    pub hits: Option<Vec<Hit>>,
}

/// Everything evaluation needs, plus the contigs dropped along the way
#[derive(Debug, Default)]
pub struct Assembly {
    pub inputs: Vec<ContigInput>,
    /// Contigs named by the loci or hit streams but missing from the length table
    pub skipped: BTreeSet<String>,
}

impl Assembly {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn with_hits(&self) -> usize {
        self.inputs.iter().filter(|input| input.hits.is_some()).count()
    }
}

/// One input per contig of the length table, in name order
pub fn assemble_contigs(
    lengths: &BTreeMap<String, u64>,
    loci: ContigGroups<Locus>,
    hits: ContigGroups<Hit>,
    settings: &Settings,
) -> Assembly {
    let mut skipped = BTreeSet::new();

    let mut contigs: BTreeMap<String, Contig> = lengths
        .iter()
        .map(|(name, &length)| (name.clone(), Contig::new(name, length)))
        .collect();

    for (name, group) in loci {
        match contigs.get_mut(&name) {
            Some(contig) => contig.attach_loci(group, settings),
            None => {
                eprintln!("⚠️  Warning: loci reference unknown contig '{}'; skipping", name);
                skipped.insert(name);
            }
        }
    }

    let mut hits_by_contig: BTreeMap<String, Vec<Hit>> = BTreeMap::new();
    for (name, group) in hits {
        if contigs.contains_key(&name) {
            hits_by_contig.insert(name, group);
        } else {
            if !skipped.contains(&name) {
                eprintln!("⚠️  Warning: hits reference unknown contig '{}'; skipping", name);
            }
            skipped.insert(name);
        }
    }

    let inputs = contigs
        .into_iter()
        .map(|(name, contig)| ContigInput {
            contig,
            hits: hits_by_contig.remove(&name),
        })
        .collect();

    Assembly { inputs, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bio::bio_types::strand::Strand;

    #[test]
    fn test_assemble_keeps_every_length_entry() {
        let settings = Settings {
            min_gene_length: 0,
            ..Settings::default()
        };
        let lengths: BTreeMap<String, u64> =
            [("c2".to_string(), 500), ("c1".to_string(), 300)].into_iter().collect();
        let loci = vec![
            ("c1".to_string(), vec![Locus::new(1, 100, Strand::Forward)]),
            ("ghost".to_string(), vec![Locus::new(1, 100, Strand::Forward)]),
        ];
        let hits = vec![
            ("c1".to_string(), vec![Hit::new(1, 100, "s__X1", 0.9)]),
            ("phantom".to_string(), vec![Hit::new(1, 100, "s__X1", 0.9)]),
        ];

        let assembly = assemble_contigs(&lengths, loci, hits, &settings);
        assert_eq!(assembly.len(), 2);
        assert_eq!(assembly.with_hits(), 1);
        assert_eq!(assembly.inputs[0].contig.name, "c1");
        assert_eq!(assembly.inputs[0].contig.loci.len(), 1);
        assert!(assembly.inputs[1].hits.is_none());
        assert!(assembly.inputs[1].contig.loci.is_empty());
        assert_eq!(
            assembly.skipped.iter().collect::<Vec<_>>(),
            vec!["ghost", "phantom"]
        );
    }
}
