// evaluate.rs - Per-contig evaluation loop and the parallel driver

use crate::core::contig::Contig;
use crate::core::explanation::Explanation;
use crate::core::filters::FilterChain;
use crate::core::pipeline::ContigInput;
use crate::core::search::ExplanationSearch;
use crate::core::settings::Settings;
use crate::data::{Hit, Taxonomy};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Final classification of a contig
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    NoLgt(Explanation),
    Lgt(Explanation),
    Unclassified,
}

impl Call {
    /// Stream / call label
    pub fn label(&self) -> &'static str {
        match self {
            Call::NoLgt(_) => "no_lgt",
            Call::Lgt(_) => "lgt",
            Call::Unclassified => "unclassified",
        }
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        match self {
            Call::NoLgt(option) | Call::Lgt(option) => Some(option),
            Call::Unclassified => None,
        }
    }
}

/// Evaluation state of one contig
#[derive(Debug)]
enum State {
    Unattempted,
    OneCladeAttempted(Option<Explanation>),
    TwoCladeAttempted(Option<Explanation>),
    Climbing,
    Finished(Call),
}

/// Outcome of evaluating one contig
#[derive(Debug, Clone)]
pub struct ContigResult {
    pub contig: Contig,
    pub call: Call,
    /// Taxonomic ranks climbed before the call
    pub climbs: usize,
    pub climb_cap_hit: bool,
}

pub struct Evaluator<'a> {
    settings: &'a Settings,
    taxonomy: &'a dyn Taxonomy,
    filters: FilterChain,
}

impl<'a> Evaluator<'a> {
    pub fn new(settings: &'a Settings, taxonomy: &'a dyn Taxonomy) -> Self {
        Self {
            settings,
            taxonomy,
            filters: FilterChain::from_settings(settings),
        }
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// Score a contig against its hits, then apply any initial taxonomy jumps
    pub fn prepare(&self, contig: &mut Contig, hits: &[Hit]) {
        contig.attach_hits(hits, self.settings);
        contig.update_gene_scores(self.settings);
        if let Some(jumps) = self.settings.jump_taxonomy {
            for _ in 0..jumps {
                contig.raise_taxonomy(self.taxonomy, self.settings);
            }
        }
    }

    fn can_climb(&self, contig: &Contig) -> bool {
        !contig.clades().is_empty() && !contig.clades().contains(&self.settings.root_clade)
    }

    /// Run the explanation state machine on a scored contig
    pub fn evaluate(&self, mut contig: Contig) -> ContigResult {
        if contig.all_ignored() {
            return ContigResult {
                contig,
                call: Call::Unclassified,
                climbs: 0,
                climb_cap_hit: false,
            };
        }

        let search = ExplanationSearch::new(self.settings, self.taxonomy, &self.filters);
        let mut climbs = 0;
        let mut climb_cap_hit = false;
        let mut state = State::Unattempted;

        let call = loop {
            state = match state {
                State::Unattempted => State::OneCladeAttempted(search.explain_one(&contig)),
                State::OneCladeAttempted(Some(one)) if one.ok => State::Finished(Call::NoLgt(one)),
                State::OneCladeAttempted(_) => State::TwoCladeAttempted(search.explain_two(&contig)),
                State::TwoCladeAttempted(Some(two)) if two.ok => State::Finished(Call::Lgt(two)),
                State::TwoCladeAttempted(_) if self.can_climb(&contig) => State::Climbing,
                State::TwoCladeAttempted(_) => State::Finished(Call::Unclassified),
                State::Climbing if climbs >= self.settings.max_climbs => {
                    eprintln!(
                        "⚠️  Warning: contig '{}' still unresolved after {} taxonomic climbs; reporting as unclassified",
                        contig.name, climbs
                    );
                    climb_cap_hit = true;
                    State::Finished(Call::Unclassified)
                }
                State::Climbing => {
                    contig.raise_taxonomy(self.taxonomy, self.settings);
                    climbs += 1;
                    State::Unattempted
                }
                State::Finished(call) => break call,
            };
        };

        ContigResult {
            contig,
            call,
            climbs,
            climb_cap_hit,
        }
    }

    /// Score and evaluate one assembled contig. Contigs that received no
    /// hits are never scored and come out unclassified.
    pub fn run(&self, input: ContigInput) -> ContigResult {
        let ContigInput { mut contig, hits } = input;
        match hits {
            Some(hits) => {
                self.prepare(&mut contig, &hits);
                self.evaluate(contig)
            }
            None => ContigResult {
                contig,
                call: Call::Unclassified,
                climbs: 0,
                climb_cap_hit: false,
            },
        }
    }
}

/// Evaluate every contig in parallel; results come back sorted by name
pub fn evaluate_all(inputs: Vec<ContigInput>, evaluator: &Evaluator, show_progress: bool) -> Vec<ContigResult> {
    let total = inputs.len();
    let start = Instant::now();
    println!("🔄 Evaluating {} contigs...", total);

    let pb = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let update_interval = std::cmp::max(1, total / 100);
    let completed = AtomicUsize::new(0);

    let mut results: Vec<ContigResult> = inputs
        .into_par_iter()
        .map(|input| {
            let result = evaluator.run(input);
            let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if count % update_interval == 0 {
                pb.set_position(count as u64);
            }
            result
        })
        .collect();

    pb.set_position(total as u64);
    pb.finish_with_message("✅ Contig evaluation completed!");

    results.sort_by(|a, b| a.contig.name.cmp(&b.contig.name));
    println!("✅ Evaluated {} contigs in {:.2?}", total, start.elapsed());
    results
}
