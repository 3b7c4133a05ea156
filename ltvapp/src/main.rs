use ltvapp::{CatalogEvent, Coordinator, CycleOutcome};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let use_cache = std::env::args().any(|arg| arg == "--cached");

    info!("Loading LoungeTV configuration...");
    let config = ltvconfig::get_config();
    let coordinator = Coordinator::from_config(&config)?;

    // Relay coordinator events the way a UI front end would
    let mut events = coordinator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                CatalogEvent::SourceErrored { source, kind } => {
                    warn!(source = %source, kind = %kind, "Source failed");
                }
                CatalogEvent::CatalogReady(catalog) => {
                    let channels: usize =
                        catalog.categories.iter().map(|c| c.channels.len()).sum();
                    info!(
                        categories = catalog.categories.len(),
                        channels, "Catalog ready"
                    );
                }
                CatalogEvent::TotalFailure { cache_available } => {
                    warn!(cache_available, "No source produced a catalog");
                }
            }
        }
    });

    info!(use_cache, "Starting update cycle...");
    match coordinator.request_update(use_cache).await {
        CycleOutcome::Loaded { errors } => {
            if !errors.is_empty() {
                warn!(failed_sources = errors.len(), "Catalog loaded with errors");
            }
            Ok(())
        }
        CycleOutcome::TotalFailure { cache_available } => {
            if cache_available {
                if let Some(fallback) = coordinator.load_cached_catalog() {
                    warn!(
                        categories = fallback.categories.len(),
                        "Serving last cached catalog"
                    );
                    return Ok(());
                }
            }
            error!("No catalog available and no cache to fall back to");
            std::process::exit(1);
        }
        CycleOutcome::Superseded => Ok(()),
    }
}
