use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inspo_clock::application::{OfflineCacheManager, PublishRequest, PublishWallpaperUseCase};
use inspo_clock::domain::entities::{ApiKey, CacheRequest, UserHash};
use inspo_clock::domain::errors::GenerationError;
use inspo_clock::infrastructure::config::{CacheAction, Command, PublishArgs};
use inspo_clock::infrastructure::{
    AppConfig, CatboxUploader, CliArgs, ConfigLoader, DiskCacheStorage, HttpNetwork, JsonLinkLog,
    OpenAiImageClient, TemplatePageWriter,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            ConfigLoader::with_dir(dir).load_config(Some(path))?
        }
        None => ConfigLoader::new()?.load_config(None)?,
    };
    config.merge_with_args(args);
    Ok(config)
}

async fn publish(config: &AppConfig, args: &PublishArgs) -> Result<()> {
    let api_key = args
        .api_key
        .clone()
        .and_then(ApiKey::new)
        .ok_or(GenerationError::MissingApiKey)?;
    let user_hash = args.user_hash.clone().and_then(UserHash::new);

    let generator = Arc::new(OpenAiImageClient::with_base_url(
        config.image.api_base.as_str(),
        api_key,
    )?);
    let uploader = Arc::new(CatboxUploader::with_endpoint(config.upload.endpoint.as_str())?);
    let link_log = Arc::new(JsonLinkLog::new(&config.paths.link_log));
    let page = Arc::new(TemplatePageWriter::new(
        config.paths.template.clone(),
        &config.paths.page_output,
    ));

    let use_case = PublishWallpaperUseCase::new(
        generator,
        uploader,
        link_log,
        page,
        config.image.model.as_str(),
    )
    .with_prompt(config.image.prompt.clone());

    let request = PublishRequest::new(config.image.size, config.image.quality)
        .with_user_hash(user_hash)
        .with_album(config.album())
        .with_local_copy(config.local_copy_path());

    let response = use_case.execute(request).await?;

    println!("CATBOX_URL={}", response.url);
    Ok(())
}

async fn cache(config: &AppConfig, action: &CacheAction) -> Result<()> {
    let storage = Arc::new(DiskCacheStorage::new(config.effective_cache_dir()).await?);
    let timeout = config.cache.fetch_timeout_secs.map(Duration::from_secs);
    let network = Arc::new(HttpNetwork::new(&config.cache.origin, timeout)?);
    let core_assets = network.canonical_assets(&config.core_assets())?;
    let manager = OfflineCacheManager::new(
        storage,
        network.clone(),
        config.cache_version(),
        core_assets,
    );

    match action {
        CacheAction::Install => {
            let cached = manager.on_install().await?;
            info!(
                version = %manager.version(),
                state = %manager.state(),
                cached,
                "Install complete"
            );
        }
        CacheAction::Activate => {
            // Each run starts parsed, so activation needs a fresh install.
            manager.on_install().await?;
            let purged = manager.on_activate().await?;
            for version in &purged {
                info!(%version, "Deleted stale cache version");
            }
            info!(version = %manager.version(), purged = purged.len(), "Activation complete");
        }
        CacheAction::Fetch {
            url,
            navigate,
            accept,
            output,
        } => {
            let mut request = if *navigate {
                CacheRequest::navigate(url.as_str())
            } else {
                CacheRequest::get(url.as_str())
            };
            if let Some(accept) = accept {
                request = request.with_accept(accept.as_str());
            }

            let request = network.canonicalize(request)?;
            let response = manager.on_fetch(&request).await;
            info!(
                status = response.status(),
                kind = ?response.kind(),
                bytes = response.body().len(),
                "Fetch routed"
            );
            if response.is_error() {
                return Err(eyre!("no response available for {url}"));
            }

            match output {
                Some(path) => std::fs::write(path, response.body())
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?,
                None => std::io::stdout().write_all(response.body())?,
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = inspo_clock::VERSION, "Starting {}", inspo_clock::NAME);

    let result = match &args.command {
        Command::Publish(publish_args) => publish(&config, publish_args).await,
        Command::Cache { action } => cache(&config, action).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "Run failed");
    }
    result
}
