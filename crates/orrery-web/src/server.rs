//! HTTP server for the explorer

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use orrery_engine::{AssetManifest, Catalog, Scene, SceneConfig};

use crate::config::ServerConfig;
use crate::routes::{self, AppState};
use crate::upstream::GeminiClient;

/// Load the catalog named by the config, or the built-in one. Either way it
/// is validated before anything is served.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json(&json)
                .with_context(|| format!("loading catalog {}", path.display()))?
        }
        None => {
            let catalog = Catalog::solar_system();
            catalog.validate().context("built-in catalog")?;
            catalog
        }
    };
    log::info!("Catalog: {} bodies around '{}'", catalog.len(), catalog.star.id);
    Ok(catalog)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<()> {
    if config.api_key.is_none() {
        log::warn!("GEMINI_API_KEY is not set; /api/ask will answer 500");
    }

    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let scene = Scene::new(catalog, AssetManifest::embedded(), SceneConfig::default());

    let generator = GeminiClient::new(
        config.upstream_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )
    .context("building upstream client")?;

    let addr = config.bind.clone();
    let state = Arc::new(AppState::new(config, Arc::new(generator), scene));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl-C: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("orrery-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn catalog_file_is_validated() {
        let mut catalog = Catalog::solar_system();
        catalog.bodies[0].eccentricity = 1.5;
        let path = temp_file("bad.json", &serde_json::to_string(&catalog).unwrap());
        let err = load_catalog(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("eccentricity"), "{err:#}");
    }

    #[test]
    fn catalog_file_round_trips() {
        let mut catalog = Catalog::solar_system();
        catalog.bodies.truncate(3);
        let path = temp_file("inner.json", &serde_json::to_string(&catalog).unwrap());
        let loaded = load_catalog(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.bodies[2].id, "earth");
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let path = std::env::temp_dir().join("orrery-no-such-catalog.json");
        assert!(load_catalog(Some(&path)).is_err());
    }
}
