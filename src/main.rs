//! Taskmind CLI
//!
//! Line-oriented front end for the intent pipeline: each input line is a
//! submission for the local user; `retry` re-runs the last failed one.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use taskmind::pipeline::IntentPipeline;
use taskmind::{AppConfig, Database, PipelineOutcome};
use taskmind_nlp::{HfZeroShotClassifier, OpenAiExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = match std::env::args().nth(1) {
        Some(path) => path.into(),
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::load(&config_path)?;

    let db_path = config.database_path()?;
    let db = Database::new(&db_path)
        .with_context(|| format!("opening task store at {}", db_path.display()))?;

    let classifier = Arc::new(HfZeroShotClassifier::new(config.classifier.clone()));
    let extractor = Arc::new(OpenAiExtractor::new(config.extractor.clone()));
    let mut pipeline = IntentPipeline::new(classifier, extractor, Arc::new(db));

    let owner = std::env::var("TASKMIND_USER").unwrap_or_else(|_| "local".to_string());
    tracing::info!(owner, "taskmind ready; type a task or a search, 'retry', or 'quit'");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = if line.eq_ignore_ascii_case("retry") {
            pipeline.retry(&owner, Utc::now()).await
        } else {
            pipeline.process(&owner, &line, Utc::now()).await
        };

        match result {
            Ok(PipelineOutcome::Search { results }) => {
                println!("Found {} matching task(s)", results.len());
                for task in results {
                    println!("  - [{}] {} (due {})", task.status, task.summary, task.due_date);
                }
            }
            Ok(PipelineOutcome::Create { task, analysis }) => {
                println!(
                    "Created '{}' [{} / {} / due {} / ~{}]",
                    task.summary,
                    task.category,
                    task.priority,
                    task.due_date,
                    task.estimated_duration
                );
                println!(
                    "  confidence {:.0}%, keywords: {}",
                    analysis.overall_confidence * 100.0,
                    analysis.related_keywords.join(", ")
                );
                pipeline.acknowledge();
            }
            Err(err) => {
                println!("{}", err.user_message());
                if err.is_retryable() && pipeline.state().can_retry() {
                    println!("  (type 'retry' to try again)");
                }
            }
        }
    }

    Ok(())
}
