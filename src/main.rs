// main.rs - CLI entry point

use std::time::Instant;

use lgtcall::cli::Config;
use lgtcall::output::{write_results, write_summary, InputFiles, OutputPaths, RunSummary};
use lgtcall::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validated = validate_args(&args)?;
    let settings = validated.settings;
    let inputs = validated.inputs;

    println!("🚀 {}", lgtcall::get_info());

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }
    println!(
        "🎯 k1 = {}, k2 = {}, weak loci: {}, two-clade ties: {}",
        settings.one_clade_threshold,
        settings.two_clade_threshold,
        settings.weak_loci,
        settings.disambiguate_two
    );

    let total_start = Instant::now();

    println!("📂 Loading taxonomy: {}", inputs.taxonomy.display());
    let taxonomy = read_taxonomy(&inputs.taxonomy, &settings.root_clade)?;

    println!("📂 Loading contig lengths: {}", inputs.contigs.display());
    let lengths = read_contig_lengths(&inputs.contigs)?;

    println!("🧬 Attaching loci: {}", inputs.gff.display());
    let loci = read_contig_loci(&inputs.gff, args.gff_annotations)?;

    println!("📂 Loading hits: {}", inputs.hits.display());
    let hits = read_contig_hits(&inputs.hits)?;

    let assembly = assemble_contigs(&lengths, loci, hits, &settings);
    if !assembly.skipped.is_empty() {
        eprintln!(
            "⚠️  Warning: {} contigs in the loci/hit inputs are missing from {}",
            assembly.skipped.len(),
            inputs.contigs.display()
        );
    }
    let contigs_with_hits = assembly.with_hits();
    let skipped_contigs: Vec<String> = assembly.skipped.iter().cloned().collect();

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!(
            "📊 {} contigs, {} with hits, {} skipped",
            assembly.len(),
            contigs_with_hits,
            skipped_contigs.len()
        );
        return Ok(());
    }

    let evaluator = Evaluator::new(&settings, &taxonomy);
    if !evaluator.filters().is_empty() {
        println!("🔍 LGT filters: {}", evaluator.filters().names().join(", "));
    }
    let results = evaluate_all(assembly.inputs, &evaluator, !args.no_progress);

    let paths = OutputPaths::new(&validated.outdir, &validated.basename);
    let counts = write_results(&results, &taxonomy, &paths)?;

    let total_elapsed = total_start.elapsed();
    println!(
        "📊 Calls: {} lgt, {} no_lgt, {} unclassified",
        counts.lgt, counts.no_lgt, counts.unclassified
    );

    if let Some(summary_path) = &args.summary {
        let mut summary = RunSummary {
            version: lgtcall::VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            command_line,
            threads: rayon::current_num_threads(),
            inputs: InputFiles {
                contigs: inputs.contigs.display().to_string(),
                gff: inputs.gff.display().to_string(),
                hits: inputs.hits.display().to_string(),
                taxonomy: inputs.taxonomy.display().to_string(),
            },
            settings: settings.clone(),
            filters: evaluator.filters().names().iter().map(|name| name.to_string()).collect(),
            contigs: results.len(),
            contigs_with_hits,
            counts,
            skipped_contigs,
            climb_cap_contigs: Vec::new(),
            climbed_contigs: 0,
            elapsed_seconds: total_elapsed.as_secs_f64(),
        };
        summary.record_results(&results);
        write_summary(std::path::Path::new(summary_path), &summary)?;
    }

    println!("⏱️  Total time: {:.2}s", total_elapsed.as_secs_f64());
    Ok(())
}
