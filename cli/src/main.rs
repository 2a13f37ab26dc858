//! CLI entrypoint for ev-concierge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use concierge_application::{
    Classifier, ExpertGenerator, ExpertRegistry, ExpertRouter, HandleTurnUseCase, KnowledgeLoader,
    LlmGateway, NoTurnProgress, TurnError, TurnProgressNotifier,
};
use concierge_domain::{AnthropicProviderConfig, BedrockProviderConfig, ConversationHistory};
use concierge_infrastructure::{
    ConfigLoader, FileConfig, FileKnowledgeLoader, JsonlDiagnosticSink, ProviderAdapter,
    RoutingGateway,
};
use concierge_presentation::{ChatRepl, Cli, ProgressReporter, formatter_for};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", ConfigLoader::render(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let _log_guard = init_logging(cli.verbose, config.logging.directory.as_deref());
    info!("Starting ev-concierge");

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config: {issue}");
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    // === Dependency Injection ===
    let use_case = Arc::new(build_use_case(&config).await?);

    let formatter = formatter_for(cli.output);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case)
            .with_progress(!cli.quiet)
            .with_formatter(formatter);
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let progress: Box<dyn TurnProgressNotifier> = if cli.quiet {
        Box::new(NoTurnProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let mut history = ConversationHistory::new();
    match use_case.execute(&mut history, &question, progress.as_ref()).await {
        Ok(outcome) => {
            println!("{}", formatter.format_outcome(&outcome));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let TurnError::Configuration { .. } = e {
                warn!(error = %e, "Expert configuration problem");
            }
            eprintln!("{}", formatter.format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Install the stderr subscriber, plus a daily rolling file when a log
/// directory is configured. The returned guard flushes the file writer.
fn init_logging(verbose: u8, directory: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let mut guard = None;
    let file_layer = directory.and_then(|dir| {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("ev-concierge")
            .filename_suffix("log")
            .build(dir);
        match appender {
            Ok(appender) => {
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .with_filter(filter()),
                )
            }
            Err(e) => {
                eprintln!("Log directory {} unusable: {e}", dir.display());
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

async fn build_use_case(config: &FileConfig) -> Result<HandleTurnUseCase> {
    let provider_config = config.provider_config();

    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();
    providers.extend(anthropic_provider(&provider_config.anthropic));
    providers.extend(bedrock_provider(&provider_config.bedrock).await);

    let routing = RoutingGateway::new(providers, &provider_config);
    if routing.is_empty() {
        bail!(
            "No completion provider available. Set {} or build with the `bedrock` feature.",
            provider_config.anthropic.api_key_env
        );
    }
    let gateway: Arc<dyn LlmGateway> = Arc::new(routing);

    let base_dir = config.resources.base_dir();
    info!(base_dir = %base_dir.display(), "Resolving resources");
    let loader: Arc<dyn KnowledgeLoader> = Arc::new(FileKnowledgeLoader::new(base_dir));

    let params = config.turn_params();
    let classifier = Classifier::new(
        gateway.clone(),
        loader.clone(),
        config.classifier_spec(),
        params.clone(),
    );

    let mut generator = ExpertGenerator::new(gateway, config.response_schema(), params.clone());
    if let Some(path) = &config.logging.diagnostics {
        match JsonlDiagnosticSink::new(path) {
            Some(sink) => generator = generator.with_diagnostic_sink(Arc::new(sink)),
            None => warn!(path = %path.display(), "Diagnostic records disabled"),
        }
    }

    let registry = ExpertRegistry::new(loader, config.expert_specs());
    let router = ExpertRouter::new(registry, generator, &params);

    // Experts that fail here are retried on every turn routed to them.
    for (expert, error) in router.registry().preload().await {
        warn!(%expert, %error, "Expert not ready");
    }

    Ok(HandleTurnUseCase::new(classifier, router))
}

#[cfg(feature = "anthropic")]
fn anthropic_provider(config: &AnthropicProviderConfig) -> Option<Arc<dyn ProviderAdapter>> {
    concierge_infrastructure::AnthropicProviderAdapter::try_new(config)
        .map(|adapter| Arc::new(adapter) as Arc<dyn ProviderAdapter>)
}

#[cfg(not(feature = "anthropic"))]
fn anthropic_provider(_config: &AnthropicProviderConfig) -> Option<Arc<dyn ProviderAdapter>> {
    None
}

#[cfg(feature = "bedrock")]
async fn bedrock_provider(config: &BedrockProviderConfig) -> Option<Arc<dyn ProviderAdapter>> {
    let adapter = concierge_infrastructure::BedrockProviderAdapter::new(config).await;
    Some(Arc::new(adapter))
}

#[cfg(not(feature = "bedrock"))]
async fn bedrock_provider(_config: &BedrockProviderConfig) -> Option<Arc<dyn ProviderAdapter>> {
    None
}
