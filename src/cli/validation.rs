// validation.rs - Turn command line arguments into validated settings

use crate::cli::args::Args;
use crate::core::settings::Settings;
use crate::output::default_basename;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The four input files of a run
#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub contigs: PathBuf,
    pub gff: PathBuf,
    pub hits: PathBuf,
    pub taxonomy: PathBuf,
}

pub struct ValidationResult {
    pub settings: Settings,
    pub inputs: InputPaths,
    pub outdir: PathBuf,
    pub basename: String,
}

fn require_file(value: &Option<String>, flag: &str) -> Result<PathBuf, String> {
    let path = value
        .as_ref()
        .ok_or_else(|| format!("--{} is required", flag))?;
    let path = Path::new(path);
    if !path.is_file() {
        return Err(format!("--{} file not found: {}", flag, path.display()));
    }
    Ok(path.to_path_buf())
}

/// Build evaluation settings from arguments, without touching the filesystem
pub fn settings_from_args(args: &Args) -> Result<Settings, String> {
    let defaults = Settings::default();
    let settings = Settings {
        one_clade_threshold: args.k1.unwrap_or(defaults.one_clade_threshold),
        two_clade_threshold: args.k2.unwrap_or(defaults.two_clade_threshold),
        disambiguate_one: FromStr::from_str(&args.disambiguate_one)?,
        disambiguate_two: FromStr::from_str(&args.disambiguate_two)?,
        range: args.range.unwrap_or(defaults.range),
        jump_taxonomy: args.jump_taxonomy,
        allow_lca: args.allow_lca,
        ambiguous_fraction: args.ambiguous_fraction.or(defaults.ambiguous_fraction),
        clade_genes: args.clade_genes,
        clade_leaves: args.clade_leaves,
        sister_penalty: args.sister_penalty,
        weak_loci: FromStr::from_str(&args.weak_loci)?,
        transfer_annotations: FromStr::from_str(&args.transfer_annotations)?,
        min_overlap: args.min_overlap.unwrap_or(defaults.min_overlap),
        min_gene_length: args.min_gene_length.unwrap_or(defaults.min_gene_length),
        min_scov: args.min_scov.unwrap_or(defaults.min_scov),
        stranded: args.stranded,
        root_clade: args.root_clade.clone().unwrap_or(defaults.root_clade),
        unknown_clade: args.unknown_clade.clone().unwrap_or(defaults.unknown_clade),
        max_climbs: args.max_climbs.unwrap_or(defaults.max_climbs),
    };
    settings.validate()?;
    if settings.root_clade.is_empty() || settings.unknown_clade.is_empty() {
        return Err("--root-clade and --unknown-clade must not be empty".to_string());
    }
    if settings.root_clade == settings.unknown_clade {
        return Err(format!(
            "--unknown-clade must differ from the root clade '{}'",
            settings.root_clade
        ));
    }
    Ok(settings)
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }
    let settings = settings_from_args(args)?;

    let inputs = InputPaths {
        contigs: require_file(&args.contigs, "contigs")?,
        gff: require_file(&args.gff, "gff")?,
        hits: require_file(&args.hits, "hits")?,
        taxonomy: require_file(&args.taxonomy, "taxonomy")?,
    };

    let outdir = PathBuf::from(args.outdir.as_deref().unwrap_or("."));
    if outdir.is_file() {
        return Err(format!("--outdir is an existing file: {}", outdir.display()));
    }
    let basename = match &args.basename {
        Some(name) if name.is_empty() || name.contains('/') => {
            return Err(format!("Invalid --basename '{}'", name));
        }
        Some(name) => name.clone(),
        None => default_basename(&inputs.hits),
    };

    Ok(ValidationResult {
        settings,
        inputs,
        outdir,
        basename,
    })
}
