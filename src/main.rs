//! Resume ranker: rank resumes against a job description by semantic similarity

use clap::Parser;
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, ModelAction, RankArgs};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::input::manager::InputManager;
use resume_ranker::input::text_extractor;
use resume_ranker::output::formatter::ReportGenerator;
use resume_ranker::output::report::RankingReport;
use resume_ranker::output::xlsx::ExportedReport;
use resume_ranker::processing::embedding_manager::EmbeddingModelManager;
use resume_ranker::processing::embeddings::EmbeddingEngine;
use resume_ranker::processing::pipeline::RankingPipeline;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        if e.is_user_warning() {
            warn!("{}", e);
            process::exit(2);
        }
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Rank(args) => run_rank(args, &config).await,

        Commands::Models { action } => run_models(action, &config).await,

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("Models Directory: {}", config.models_dir().display());
                println!("Default Embedding Model: {}", config.models.default_embedding_model);
                println!("Top K: {}", config.ranking.top_k);
                println!("Score Precision: {}", config.ranking.score_precision);
                println!("Output Format: {:?}", config.output.format);
                println!("Export File: {}", config.output.export_file_name);
                println!("Sheet Name: {}", config.output.sheet_name);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset to defaults: {}", config_path.display());
                Ok(())
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

async fn run_rank(args: RankArgs, config: &Config) -> Result<()> {
    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format)?,
        None => config.output.format,
    };
    let top_k = args.top.unwrap_or(config.ranking.top_k);
    if top_k == 0 {
        return Err(ResumeRankerError::InvalidInput("--top must be at least 1".to_string()));
    }

    let mut input_manager = InputManager::new();

    let job_description = match (&args.job_text, &args.job) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            let upload = input_manager.load_file(path).await?;
            text_extractor::extract(&upload)?
        }
        (None, None) => String::new(),
    };

    info!("Loading {} resume path(s)", args.resumes.len());
    let uploads = input_manager.load_batch(&args.resumes).await?;

    let engine = EmbeddingEngine::from_config(config, args.embedding.as_deref());
    let pipeline = RankingPipeline::new(engine).with_progress(output_format == OutputFormat::Console);
    let outcome = pipeline.run(&job_description, &uploads)?;

    let mut report = RankingReport::from_outcome(&outcome, top_k);

    if !args.no_export {
        let export_path = args
            .export
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.export_file_name));
        let file_name = export_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| config.output.export_file_name.clone());

        let exported = ExportedReport::with_options(&outcome.ranking, &file_name, &config.output.sheet_name)?;
        exported.write_to(&export_path)?;
        report = report.with_export_path(export_path.display().to_string());
    }

    let generator = ReportGenerator::with_options(
        config.output.color_output,
        config.ranking.score_precision,
        true,
    );
    println!("{}", generator.generate_report(&report, &output_format)?);

    Ok(())
}

async fn run_models(action: ModelAction, config: &Config) -> Result<()> {
    let mut manager = EmbeddingModelManager::new(config).await?;

    match action {
        ModelAction::List => {
            println!("Available Embedding Models\n");
            for model in manager.list_available_models() {
                let status = if manager.is_model_downloaded(&model.name) {
                    "Downloaded"
                } else {
                    "Available"
                };
                let default_marker = if model.name == config.models.default_embedding_model {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "  • {}{} ({}) - {} MB [{}]",
                    model.name, default_marker, model.repo_id, model.size_mb, status
                );
                println!("    {}", model.description);
            }

            if manager.list_downloaded_models().is_empty() {
                println!("\nNo models downloaded yet; the default model is fetched on first use.");
                println!(
                    "To download ahead of time: resume-ranker models download {}",
                    config.models.default_embedding_model
                );
            }
        }

        ModelAction::Download { model, force } => {
            if !force && manager.is_model_downloaded(&model) {
                println!("Model '{}' is already downloaded (use --force to re-download)", model);
                return Ok(());
            }

            let model_path = manager.download_model(&model, force).await?;
            println!("Model '{}' downloaded to {}", model, model_path.display());
        }

        ModelAction::Remove { model } => {
            let removed = manager.remove_model(&model).await?;
            println!("Model '{}' removed ({})", model, removed.display());
        }

        ModelAction::Info { model } => {
            let info = manager
                .get_model_info(&model)
                .ok_or_else(|| ResumeRankerError::ModelNotFound(model.clone()))?;

            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Description: {}", info.description);
            match manager.get_model_path(&model) {
                Some(path) => println!("Status: Downloaded ({})", path.display()),
                None => println!("Status: Available for download"),
            }
        }
    }

    Ok(())
}
