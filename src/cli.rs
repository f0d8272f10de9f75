//! CLI helper functions
//!
//! One function per subcommand. Each loads the build config, checks its
//! directory preconditions and runs the matching pipeline.

use crate::{
    build::{TemplateExtractor, TemplateRenderer},
    client::{ApiKey, N8nClient},
    compare::{self, ComparisonResult},
    config::BuildConfig,
    error::Error,
    etl::{IdentityTransformer, Pipeline},
    n8n::{WorkflowsExtractor, WorkflowsLoader},
    storage::{DirectoryReader, DirectoryWriter, Secrets},
    transform::UploadPreparer,
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// How `compare` prints its result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Create an n8n client for the configured instance
///
/// The API key is read from the secret named by `n8n_instance.api_key_env`.
pub fn load_n8n_client(config: &BuildConfig, secrets: &Secrets) -> Result<N8nClient> {
    let api_key = secrets.required(&config.n8n_instance.api_key_env)?;
    N8nClient::try_new(config.n8n_instance.url.clone(), ApiKey::new(api_key))
        .context("Failed to create n8n client")
}

fn require_dir(path: &Path, label: &'static str, hint: &'static str) -> crate::error::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    Err(Error::DirectoryNotFound {
        label,
        path: path.to_path_buf(),
        hint,
    })
}

/// Render every configured workflow into the output directory
///
/// Pipeline: TemplateExtractor → TemplateRenderer → DirectoryWriter
pub async fn build_workflows(
    config_path: impl AsRef<Path>,
    env_file: impl AsRef<Path>,
) -> Result<usize> {
    let config = BuildConfig::from_yaml(config_path)?;
    let secrets = Secrets::load(env_file)?;

    log::info!(
        "Building {} workflow(s) into {}",
        config.workflows.len(),
        config.output_dir.display()
    );

    let pipeline = Pipeline::new(
        TemplateExtractor::new(config.workflows.clone()),
        TemplateRenderer::new(secrets),
        DirectoryWriter::new(&config.output_dir)?,
    );
    let count = pipeline.run().await?;

    log::info!(
        "✓ Built {} workflow(s) to {}",
        count,
        config.output_dir.display()
    );
    Ok(count)
}

/// Download every workflow on the server into the pulled directory
///
/// Pipeline: WorkflowsExtractor → IdentityTransformer → DirectoryWriter
pub async fn pull_workflows(
    config_path: impl AsRef<Path>,
    env_file: impl AsRef<Path>,
) -> Result<usize> {
    let config = BuildConfig::from_yaml(config_path)?;
    let secrets = Secrets::load(env_file)?;
    let client = load_n8n_client(&config, &secrets)?;

    log::info!("Pulling workflows from {}", client.url().as_str().cyan());

    // Workflows deleted on the server must not linger locally, but the old
    // files stay until every workflow has been fetched
    let pipeline = Pipeline::new(
        WorkflowsExtractor::new(client),
        IdentityTransformer::new(),
        DirectoryWriter::new_with_options(&config.pulled_dir, true)?,
    );
    let count = pipeline.run().await?;

    // An empty server skips the loader, so nothing replaced the old files
    if count == 0 {
        DirectoryWriter::new(&config.pulled_dir)?.clear()?;
    }

    log::info!(
        "✓ Pulled {} workflow(s) to {}",
        count,
        config.pulled_dir.display()
    );
    Ok(count)
}

/// Upload every built workflow to the server
///
/// Pipeline: DirectoryReader → UploadPreparer → WorkflowsLoader. With
/// `dry_run` the files are only listed and the API is never called.
pub async fn push_workflows(
    config_path: impl AsRef<Path>,
    env_file: impl AsRef<Path>,
    dry_run: bool,
) -> Result<usize> {
    let config = BuildConfig::from_yaml(config_path)?;
    require_dir(&config.output_dir, "Built workflows", "build")?;

    let secrets = Secrets::load(env_file)?;
    let client = load_n8n_client(&config, &secrets)?;
    let reader = DirectoryReader::new(&config.output_dir);

    if dry_run {
        let files = reader.list()?;
        for (name, path) in &files {
            println!("Would upload: {} from {}", name, path.display());
        }
        log::info!("Dry run: {} workflow(s) not uploaded", files.len());
        return Ok(files.len());
    }

    log::info!("Pushing workflows to {}", client.url().as_str().cyan());

    let pipeline = Pipeline::new(reader, UploadPreparer::new(), WorkflowsLoader::new(client));
    let count = pipeline.run().await?;

    log::info!("✓ Pushed {} workflow(s)", count);
    Ok(count)
}

/// Compare the built directory against the pulled directory
pub fn compare_workflows(config_path: impl AsRef<Path>) -> Result<Vec<ComparisonResult>> {
    let config = BuildConfig::from_yaml(config_path)?;
    require_dir(&config.output_dir, "Built workflows", "build")?;
    require_dir(&config.pulled_dir, "Pulled workflows", "pull")?;

    let results = compare::compare_directories(&config.output_dir, &config.pulled_dir)
        .context("Failed to compare workflows")?;

    log::debug!("{}", compare::Summary::from_results(&results));
    Ok(results)
}

/// Format comparison results for stdout
pub fn render_comparison(results: &[ComparisonResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(compare::render_table(results)),
        OutputFormat::Json => {
            compare::render_json(results).context("Failed to serialize comparison")
        }
    }
}
