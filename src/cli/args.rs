// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// lgtcall - Detect lateral gene transfer in taxonomically annotated contigs
pub struct Args {
    /// contig sequences (FASTA), used for contig lengths
    #[argh(option)]
    pub contigs: Option<String>,

    /// gene calls on the contigs (GFF)
    #[argh(option)]
    pub gff: Option<String>,

    /// taxonomically annotated hits against the contigs (TSV)
    #[argh(option)]
    pub hits: Option<String>,

    /// taxonomy table: clade<TAB>parent per line (TSV)
    #[argh(option)]
    pub taxonomy: Option<String>,

    /// output directory (default: .)
    #[argh(option)]
    pub outdir: Option<String>,

    /// basename for output files (default: hits file name up to the first '.')
    #[argh(option)]
    pub basename: Option<String>,

    /// minimum per-gene score for a one-clade explanation (default: 0.5)
    #[argh(option)]
    pub k1: Option<f64>,

    /// minimum per-gene score for a two-clade explanation (default: 0.8)
    #[argh(option)]
    pub k2: Option<f64>,

    /// resolution of near-tied one-clade explanations: report-best, meld (default: meld)
    #[argh(option, default = "String::from(\"meld\")")]
    pub disambiguate_one: String,

    /// resolution of near-tied two-clade explanations: report-best, jump, meld (default: meld)
    #[argh(option, default = "String::from(\"meld\")")]
    pub disambiguate_two: String,

    /// rank window for considering explanations tied (default: 0.05)
    #[argh(option)]
    pub range: Option<f64>,

    /// climb the taxonomy this many ranks before the first attempt
    #[argh(option)]
    pub jump_taxonomy: Option<usize>,

    /// keep melded LGT calls whose clades are ancestor and descendant
    #[argh(switch)]
    pub allow_lca: bool,

    /// reject LGT calls whose ambiguous length fraction exceeds this (default: 0.1)
    #[argh(option)]
    pub ambiguous_fraction: Option<f64>,

    /// reject LGT calls where either clade explains fewer genes than this
    #[argh(option)]
    pub clade_genes: Option<usize>,

    /// reject LGT calls where either clade has fewer descendant leaves than this
    #[argh(option)]
    pub clade_leaves: Option<usize>,

    /// reject LGT calls whose sister-clade penalty exceeds this
    #[argh(option)]
    pub sister_penalty: Option<f64>,

    /// handling of genes no clade explains: ignore, penalize, assign-unknown (default: ignore)
    #[argh(option, default = "String::from(\"ignore\")")]
    pub weak_loci: String,

    /// annotation transfer from hits to genes: lenient, strict, very-strict (default: strict)
    #[argh(option, default = "String::from(\"strict\")")]
    pub transfer_annotations: String,

    /// minimum hit/gene overlap as a fraction of the shorter one (default: 0.1)
    #[argh(option)]
    pub min_overlap: Option<f64>,

    /// ignore genes shorter than this many bases (default: 200)
    #[argh(option)]
    pub min_gene_length: Option<usize>,

    /// ignore hits with lower modified subject coverage (default: 0.0)
    #[argh(option)]
    pub min_scov: Option<f64>,

    /// only count hits on the same strand as the gene
    #[argh(switch)]
    pub stranded: bool,

    /// keep GFF attributes (except ID, Name, Parent) as gene annotations
    #[argh(switch)]
    pub gff_annotations: bool,

    /// name of the taxonomy root (default: r__Root)
    #[argh(option)]
    pub root_clade: Option<String>,

    /// name of the synthetic clade used by --weak-loci assign-unknown (default: Unknown)
    #[argh(option)]
    pub unknown_clade: Option<String>,

    /// maximum taxonomic climbs per contig (default: 100)
    #[argh(option)]
    pub max_climbs: Option<usize>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// write a JSON run summary to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// hide the progress bar
    #[argh(switch)]
    pub no_progress: bool,

    /// validate inputs without evaluating contigs (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
