// mod.rs - Output writers: per-call TSV streams and the run summary

pub mod summary;

pub use summary::{write_summary, CallCounts, InputFiles, RunSummary};

use crate::core::evaluate::{Call, ContigResult};
use crate::core::explanation::Explanation;
use crate::data::Taxonomy;
use csv::{QuoteStyle, WriterBuilder};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Decimal places kept for scores
pub const PRECISION: i32 = 3;
/// Placeholder for an empty field
pub const EMPTY_FIELD: &str = "-";
/// Placeholder for a locus without an annotation in some system
pub const MISSING_ANNOTATION: &str = "N/A";
/// Prefix of the dynamic annotation columns
pub const ANNOTATION_PREFIX: &str = "ANNOTATIONS:";

pub const UNCLASSIFIED_FIELDS: &[&str] = &["contig_name", "call", "contig_length", "loci"];

pub const NO_LGT_FIELDS: &[&str] = &[
    "contig_name",
    "call",
    "contig_length",
    "min_score",
    "avg_score",
    "synteny",
    "clade",
    "melded",
    "taxonomy",
    "loci",
];

pub const LGT_FIELDS: &[&str] = &[
    "contig_name",
    "call",
    "contig_length",
    "min_max_score",
    "avg_max_score",
    "synteny",
    "direction",
    "clade_A",
    "clade_B",
    "lca",
    "melded_A",
    "melded_B",
    "taxonomy_A",
    "taxonomy_B",
    "loci",
];

/// Destination of each call stream
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub lgt: PathBuf,
    pub no_lgt: PathBuf,
    pub unclassified: PathBuf,
}

impl OutputPaths {
    pub fn new(outdir: &Path, basename: &str) -> Self {
        Self {
            lgt: outdir.join(format!("{}.lgt.tsv", basename)),
            no_lgt: outdir.join(format!("{}.no_lgt.tsv", basename)),
            unclassified: outdir.join(format!("{}.unclassified.tsv", basename)),
        }
    }
}

/// Default basename: the file name up to its first '.'
pub fn default_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "lgtcall".to_string())
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

/// Round to `PRECISION` decimals; whole values keep one decimal ("1.0")
pub fn format_score(value: f64) -> String {
    let factor = 10f64.powi(PRECISION);
    let rounded = (value * factor).round() / factor;
    // avoid "-0.0"
    format!("{:?}", rounded + 0.0)
}

fn or_empty(value: String) -> String {
    if value.is_empty() {
        EMPTY_FIELD.to_string()
    } else {
        value
    }
}

/// Distinct non-empty tails, each pipe-joined, sorted and "; "-joined
pub fn format_tails(tails: &[Vec<String>]) -> String {
    let distinct: BTreeSet<String> = tails
        .iter()
        .filter(|tail| !tail.is_empty())
        .map(|tail| tail.join("|"))
        .collect();
    or_empty(distinct.into_iter().collect::<Vec<_>>().join("; "))
}

/// Collection pass: every annotation system seen on any locus, sorted
pub fn collect_annotation_systems(results: &[ContigResult]) -> Vec<String> {
    let systems: BTreeSet<&str> = results
        .iter()
        .flat_map(|result| result.contig.loci.iter())
        .flat_map(|locus| locus.annotations.keys().map(String::as_str))
        .collect();
    systems.into_iter().map(str::to_string).collect()
}

/// Header row of one stream, upper-cased, annotation columns appended
pub fn header(fields: &[&str], systems: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|field| field.to_uppercase())
        .chain(systems.iter().map(|system| format!("{}{}", ANNOTATION_PREFIX, system)))
        .collect()
}

fn fields_for(call: &Call) -> &'static [&'static str] {
    match call {
        Call::Lgt(_) => LGT_FIELDS,
        Call::NoLgt(_) => NO_LGT_FIELDS,
        Call::Unclassified => UNCLASSIFIED_FIELDS,
    }
}

fn one_clade_fields(option: &Explanation, taxonomy: &dyn Taxonomy, row: &mut BTreeMap<&'static str, String>) {
    row.insert("min_score", format_score(option.crit));
    row.insert("avg_score", format_score(option.rank));
    row.insert("synteny", or_empty(option.synteny.clone()));
    row.insert("clade", option.clade1.clone());
    row.insert("melded", format_tails(&option.tails1));
    row.insert("taxonomy", taxonomy.get_lineage(&option.clade1).join("|"));
}

fn two_clade_fields(option: &Explanation, taxonomy: &dyn Taxonomy, row: &mut BTreeMap<&'static str, String>) {
    let clade_b = option.clade2.clone().unwrap_or_default();
    row.insert("min_max_score", format_score(option.crit));
    row.insert("avg_max_score", format_score(option.rank));
    row.insert("synteny", or_empty(option.synteny.clone()));
    row.insert("direction", option.direction.to_string());
    row.insert("lca", taxonomy.get_lca(&[option.clade1.as_str(), clade_b.as_str()]));
    row.insert("melded_A", format_tails(&option.tails1));
    row.insert("melded_B", format_tails(&option.tails2));
    row.insert("taxonomy_A", taxonomy.get_lineage(&option.clade1).join("|"));
    row.insert("taxonomy_B", or_empty(taxonomy.get_lineage(&clade_b).join("|")));
    row.insert("clade_A", option.clade1.clone());
    row.insert("clade_B", or_empty(clade_b));
}

/// Rendering pass for one contig. A produced field set that does not match
/// the declared schema is an error.
pub fn render_row(result: &ContigResult, taxonomy: &dyn Taxonomy, systems: &[String]) -> Result<Vec<String>, String> {
    let contig = &result.contig;
    let mut row: BTreeMap<&'static str, String> = BTreeMap::new();
    row.insert("contig_name", contig.name.clone());
    row.insert("call", result.call.label().to_string());
    row.insert("contig_length", contig.length.to_string());
    row.insert(
        "loci",
        contig
            .loci
            .iter()
            .map(|locus| locus.geometry())
            .collect::<Vec<_>>()
            .join("|"),
    );
    match &result.call {
        Call::NoLgt(option) => one_clade_fields(option, taxonomy, &mut row),
        Call::Lgt(option) => two_clade_fields(option, taxonomy, &mut row),
        Call::Unclassified => {}
    }

    let fields = fields_for(&result.call);
    if row.len() != fields.len() || fields.iter().any(|field| !row.contains_key(field)) {
        return Err(format!(
            "Row for contig '{}' does not match the {} schema (declared {:?}, produced {:?})",
            contig.name,
            result.call.label(),
            fields,
            row.keys().collect::<Vec<_>>()
        ));
    }

    let mut values: Vec<String> = fields
        .iter()
        .map(|field| or_empty(row.remove(field).unwrap_or_default()))
        .collect();
    for system in systems {
        let joined = contig
            .loci
            .iter()
            .map(|locus| {
                locus
                    .annotations
                    .get(system)
                    .map_or(MISSING_ANNOTATION, String::as_str)
            })
            .collect::<Vec<_>>()
            .join("|");
        values.push(or_empty(joined));
    }
    Ok(values)
}

fn write_stream(
    path: &Path,
    fields: &[&str],
    systems: &[String],
    rows: &[Vec<String>],
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_path(path)
        .map_err(|e| format!("Failed to create output file '{}': {}", path.display(), e))?;

    writer
        .write_record(header(fields, systems))
        .map_err(|e| format!("Write error in '{}': {}", path.display(), e))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| format!("Write error in '{}': {}", path.display(), e))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Flush error in '{}': {}", path.display(), e))?;
    Ok(())
}

/// Write the three call streams. `results` must already be sorted by
/// contig name.
pub fn write_results(
    results: &[ContigResult],
    taxonomy: &dyn Taxonomy,
    paths: &OutputPaths,
) -> Result<CallCounts, String> {
    let systems = collect_annotation_systems(results);

    let mut lgt = Vec::new();
    let mut no_lgt = Vec::new();
    let mut unclassified = Vec::new();
    for result in results {
        let row = render_row(result, taxonomy, &systems)?;
        match result.call {
            Call::Lgt(_) => lgt.push(row),
            Call::NoLgt(_) => no_lgt.push(row),
            Call::Unclassified => unclassified.push(row),
        }
    }

    write_stream(&paths.lgt, LGT_FIELDS, &systems, &lgt)?;
    write_stream(&paths.no_lgt, NO_LGT_FIELDS, &systems, &no_lgt)?;
    write_stream(&paths.unclassified, UNCLASSIFIED_FIELDS, &systems, &unclassified)?;

    println!("✅ LGT calls written to: {} ({} contigs)", paths.lgt.display(), lgt.len());
    println!("✅ No-LGT calls written to: {} ({} contigs)", paths.no_lgt.display(), no_lgt.len());
    println!(
        "✅ Unclassified contigs written to: {} ({} contigs)",
        paths.unclassified.display(),
        unclassified.len()
    );

    Ok(CallCounts {
        lgt: lgt.len(),
        no_lgt: no_lgt.len(),
        unclassified: unclassified.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::core::contig::Contig;
    use crate::core::evaluate::Evaluator;
    use crate::data::taxonomy::tests::sample_tree;
    use tempfile::TempDir;

    fn unclassified(name: &str) -> ContigResult {
        ContigResult {
            contig: Contig::new(name, 42),
            call: Call::Unclassified,
            climbs: 0,
            climb_cap_hit: false,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.9), "0.9");
        assert_eq!(format_score(0.12345), "0.123");
        assert_eq!(format_score(0.6666), "0.667");
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.9996), "1.0");
        assert_eq!(format_score(-0.0001), "0.0");
        assert_eq!(format_score(0.001), "0.001");
    }

    #[test]
    fn test_format_tails() {
        let tails = vec![
            vec!["s__B".to_string()],
            vec![],
            vec!["g__A".to_string(), "s__A".to_string()],
            vec!["s__B".to_string()],
        ];
        assert_eq!(format_tails(&tails), "g__A|s__A; s__B");
        assert_eq!(format_tails(&[vec![]]), EMPTY_FIELD);
    }

    #[test]
    fn test_default_basename() {
        assert_eq!(default_basename(Path::new("/data/sample1.blastout.tsv")), "sample1");
        assert_eq!(default_basename(Path::new("hits")), "hits");
    }

    #[test]
    fn test_header_and_annotation_columns() {
        let settings = test_settings();
        let tree = sample_tree();
        let mut contig = scored_contig(2, &[("s__X1", 0, 0.9), ("s__X1", 1, 0.9)], &settings);
        contig.loci[1].annotate_external("KO", "K00001");
        let result = Evaluator::new(&settings, &tree).evaluate(contig);
        let systems = collect_annotation_systems(std::slice::from_ref(&result));
        assert_eq!(systems, vec!["KO"]);

        let head = header(NO_LGT_FIELDS, &systems);
        assert_eq!(head[0], "CONTIG_NAME");
        assert_eq!(head.last().unwrap(), "ANNOTATIONS:KO");

        let row = render_row(&result, &tree, &systems).unwrap();
        assert_eq!(row.len(), head.len());
        assert_eq!(row[1], "no_lgt");
        assert_eq!(row[5], "AA");
        assert_eq!(row[6], "s__X1");
        assert_eq!(row[7], EMPTY_FIELD);
        assert_eq!(row[8], "r__Root|k__Bac|g__X|s__X1");
        assert_eq!(row[9], "1:100:+|101:200:+");
        assert_eq!(row[10], "N/A|K00001");
    }

    #[test]
    fn test_lgt_row() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(
            3,
            &[("s__X1", 0, 0.9), ("s__Y1", 1, 0.9), ("s__X1", 2, 0.9)],
            &settings,
        );
        let result = Evaluator::new(&settings, &tree).evaluate(contig);
        let row = render_row(&result, &tree, &[]).unwrap();
        assert_eq!(row.len(), LGT_FIELDS.len());
        assert_eq!(row[5], "ABA");
        assert_eq!(row[6], "B>A");
        assert_eq!(row[7], "s__X1");
        assert_eq!(row[8], "s__Y1");
        assert_eq!(row[9], "k__Bac");
    }

    #[test]
    fn test_write_results_three_streams() {
        let dir = TempDir::new().unwrap();
        let paths = OutputPaths::new(&dir.path().join("out"), "sample");
        let tree = sample_tree();
        let results = vec![unclassified("a"), unclassified("b")];

        let counts = write_results(&results, &tree, &paths).unwrap();
        assert_eq!(counts.unclassified, 2);
        assert_eq!(counts.total(), 2);

        let text = std::fs::read_to_string(&paths.unclassified).unwrap();
        assert_eq!(
            text,
            "CONTIG_NAME\tCALL\tCONTIG_LENGTH\tLOCI\na\tunclassified\t42\t-\nb\tunclassified\t42\t-\n"
        );
        let lgt = std::fs::read_to_string(&paths.lgt).unwrap();
        assert_eq!(lgt.lines().count(), 1);
        assert!(paths.no_lgt.exists());
    }
}
