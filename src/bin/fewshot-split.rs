//! Split a folder-per-class image dataset into few-shot train/val/test sets.

use std::path::PathBuf;

use fewshot::config::SplitConfig;
use fewshot::dataset::{ExportParams, FewShotDataset, export_split, split_rng};
use fewshot::logging;

#[derive(Debug, Default)]
struct CliOptions {
    config: SplitConfig,
    out_dir: Option<PathBuf>,
    save_config: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let level = if options.verbose { "debug" } else { "info" };
    if let Err(err) = logging::init(level) {
        eprintln!("Logging disabled: {err}");
    }
    let config = &options.config;
    if let Some(path) = &options.save_config {
        config.save_to(path).map_err(|err| err.to_string())?;
        println!("Saved settings to {}", path.display());
    }
    let names = config.semantic_names().map_err(|err| err.to_string())?;
    let mut rng = split_rng(config.seed);
    let dataset = FewShotDataset::load(
        &config.dataset_dir,
        &names,
        &config.split_options(),
        &mut rng,
    )
    .map_err(|err| err.to_string())?;

    println!(
        "Split {} classes with {} shots: train {}, val {}, test {}",
        dataset.num_classes(),
        config.shots,
        dataset.train_x.len(),
        dataset.val.len(),
        dataset.test.len()
    );
    println!("Per-class counts (train/val/test):");
    for counts in dataset.class_counts() {
        println!(
            "  {:>3} {}: {}/{}/{}",
            counts.label, counts.class_name, counts.train, counts.val, counts.test
        );
    }

    if let Some(out_dir) = &options.out_dir {
        let params = ExportParams {
            shots: config.shots,
            val_fraction: config.val_fraction,
            seed: config.seed,
        };
        let summary = export_split(&dataset, &params, out_dir).map_err(|err| err.to_string())?;
        println!("Wrote {}", summary.manifest_path.display());
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    if let Some(path) = config_path(&args)? {
        let config = SplitConfig::load_from(&path).map_err(|err| err.to_string())?;
        return apply_args(CliOptions { config, ..CliOptions::default() }, &args);
    }
    apply_args(CliOptions::default(), &args)
}

fn config_path(args: &[String]) -> Result<Option<PathBuf>, String> {
    match args.iter().position(|arg| arg == "--config") {
        Some(idx) => args
            .get(idx + 1)
            .map(|value| Some(PathBuf::from(value)))
            .ok_or_else(|| "--config requires a value".to_string()),
        None => Ok(None),
    }
}

fn apply_args(mut options: CliOptions, args: &[String]) -> Result<CliOptions, String> {
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--config" => {
                idx += 1;
            }
            "--dataset" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--dataset requires a value".to_string())?;
                options.config.dataset_dir = PathBuf::from(value);
            }
            "--shots" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--shots requires a value".to_string())?;
                options.config.shots = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --shots value: {value}"))?;
            }
            "--val-fraction" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--val-fraction requires a value".to_string())?;
                options.config.val_fraction = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --val-fraction value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                options.config.seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --seed value: {value}"))?,
                );
            }
            "--names" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--names requires a value".to_string())?;
                options.config.names_file = Some(PathBuf::from(value));
            }
            "--no-builtin-names" => {
                options.config.builtin_names = false;
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                options.out_dir = Some(PathBuf::from(value));
            }
            "--save-config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--save-config requires a value".to_string())?;
                options.save_config = Some(PathBuf::from(value));
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    if options.config.dataset_dir.as_os_str().is_empty() {
        return Err("--dataset is required (or set dataset_dir in --config)".to_string());
    }
    Ok(options)
}

fn help_text() -> String {
    [
        "fewshot-split",
        "",
        "Splits a folder-per-class image dataset into few-shot train/val/test sets.",
        "",
        "Usage:",
        "  fewshot-split --dataset <dir> [options]",
        "",
        "Options:",
        "  --config <file>        TOML settings; flags below override it.",
        "  --dataset <dir>        Dataset root with one folder per class.",
        "  --shots <n>            Training images per class (default: 16).",
        "  --val-fraction <f64>   Share of leftover images used for val (default: 0.2).",
        "  --seed <u64>           Shuffle seed (default: random).",
        "  --names <file>         TOML of folder id = \"semantic name\" pairs.",
        "  --no-builtin-names     Ignore the built-in folder id table.",
        "  --out <dir>            Write train/val/test JSONL and manifest.json.",
        "  --save-config <file>   Save the effective settings as TOML.",
        "  -v, --verbose          Debug logging.",
    ]
    .join("\n")
}
