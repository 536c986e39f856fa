pub mod now;
pub mod refresh;
pub mod track;

use crate::core::models::Satellite;
use crate::core::settings::Settings;
use crate::tle::{self, CacheStatus, TleSource};
use anyhow::{Context, Result};

/// Brings the TLE cache up to date (at most one fetch) and loads the satellites from it.
pub async fn prepare(settings: &Settings, source: &dyn TleSource) -> Result<Vec<Satellite>> {
    let path = settings.tle.resolved_cache_path();

    let status = tle::ensure_fresh(source, &path, settings.tle.max_age(), false)
        .await
        .with_context(|| format!("Could not refresh TLE data from {}", source.location()))?;

    // stdout is reserved for command output
    if status == CacheStatus::Refreshed {
        tracing::info!(path = %path.display(), "Using freshly downloaded TLE data");
    } else {
        tracing::info!(path = %path.display(), "Using cached TLE data");
    }

    tle::load_satellites(&path).with_context(|| {
        format!(
            "Could not load satellites; delete {} or run `overhead-gps refresh --force`",
            path.display()
        )
    })
}
