//! symptomcheck - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use symptomcheck::{
    artifact::ModelArtifact,
    cli::{Args, Commands},
    display::render_prediction,
    logging,
    pipeline::PipelineSettings,
    repl::ReplSession,
    training::{Corpus, Trainer},
    Config, PredictionReport, SymptomChecker,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(dir) = &args.model_dir {
        config.model.artifact_dir = dir.to_string_lossy().into_owned();
    }

    logging::init(args.verbosity(), &config.logging.level);

    match &args.command {
        Commands::Predict { symptoms, json } => run_predict(&config, symptoms, *json)?,
        Commands::Start => run_repl(&config)?,
        Commands::Train { corpus, out, check } => {
            run_train(&args, &config, corpus, out.clone(), *check)?
        }
        Commands::Doctor => run_doctor(&config)?,
        Commands::Labels => list_labels(&config)?,
        Commands::Config => show_config(&args, &config)?,
    }

    Ok(())
}

fn load_checker(config: &Config) -> Result<SymptomChecker> {
    SymptomChecker::initialize(config).with_context(|| {
        format!(
            "No usable model in {} (run `symptomcheck train` first)",
            config.artifact_dir().display()
        )
    })
}

/// Analyze a single description and print the result
fn run_predict(config: &Config, symptoms: &str, json: bool) -> Result<()> {
    let checker = load_checker(config)?;
    let prediction = checker.predict(symptoms)?;

    if json {
        let report = PredictionReport::new(symptoms, prediction);
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_prediction(&prediction));
    }

    Ok(())
}

fn run_repl(config: &Config) -> Result<()> {
    let checker = load_checker(config)?;

    let mut session = match dirs::home_dir() {
        Some(home) => ReplSession::with_history(home.join(".symptomcheck_history"))?,
        None => ReplSession::new()?,
    };
    session.run(&checker)
}

/// Fit a model on a corpus and write the artifact
fn run_train(
    args: &Args,
    config: &Config,
    corpus: &str,
    out: Option<PathBuf>,
    check: bool,
) -> Result<()> {
    let corpus = Corpus::resolve(corpus)?;
    let out_dir = out.unwrap_or_else(|| config.artifact_dir());
    let labels = corpus.labels();

    let pb = if args.verbosity().show_progress() {
        ProgressBar::new(labels.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Training [{bar:40.cyan/blue}] {pos}/{len} | {msg}")?
            .progress_chars("=>-"),
    );

    let trainer = Trainer::new(config.training.clone());
    let artifact = trainer.fit_with_progress(&corpus, |_, label| {
        pb.set_message(label.to_string());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if check {
        let sample = corpus
            .examples
            .first()
            .map(|ex| ex.symptoms.as_str())
            .context("Corpus has no examples to check against")?;
        let checker =
            SymptomChecker::from_artifact(artifact.clone(), PipelineSettings::from(config))
                .context("Trained model failed validation")?;
        let prediction = checker
            .self_check(sample)
            .context("Trained model failed its check prediction")?;
        let top = prediction
            .conditions
            .first()
            .map(|c| format!("{} ({:.1}%)", c.name, c.probability * 100.0))
            .unwrap_or_else(|| "no conditions".to_string());
        println!("{} '{}' -> {}", "Checked".cyan().bold(), sample, top);
    }

    artifact
        .save(&out_dir)
        .with_context(|| format!("Failed to write model to {}", out_dir.display()))?;

    println!(
        "{} {} labels, {} terms, {} samples from '{}' -> {}",
        "Trained".green().bold(),
        artifact.labels.len(),
        artifact.encoder.dimension(),
        artifact.metadata.training_samples,
        artifact.metadata.corpus,
        out_dir.display()
    );

    Ok(())
}

/// Check that the artifact loads and report its shape
fn run_doctor(config: &Config) -> Result<()> {
    let dir = config.artifact_dir();
    println!("{}", "symptomcheck doctor".bold());
    println!("  Model directory: {}", dir.display());

    match ModelArtifact::load(&dir) {
        Ok(artifact) => {
            println!("  {} model loaded", "✓".green());
            println!("  Conditions:      {}", artifact.labels.len());
            println!("  Vocabulary:      {}", artifact.encoder.dimension());
            println!("  Corpus:          {}", artifact.metadata.corpus);
            println!("  Samples:         {}", artifact.metadata.training_samples);
            println!("  Trained at:      {}", artifact.metadata.trained_at.to_rfc3339());
            println!("  Format version:  {}", artifact.metadata.format_version);
            Ok(())
        }
        Err(e) => {
            println!("  {} {}", "✗".red(), e);
            Err(anyhow::anyhow!("Model check failed"))
        }
    }
}

fn list_labels(config: &Config) -> Result<()> {
    let checker = load_checker(config)?;
    for label in checker.labels() {
        println!("{}", label);
    }
    Ok(())
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = args
        .config
        .clone()
        .or_else(|| Config::default_path().filter(|p| p.exists()));

    match source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Built-in defaults"),
    }
    println!("# Verbosity: {}", args.verbosity().as_str());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
