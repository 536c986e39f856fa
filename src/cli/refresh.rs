use crate::core::settings::Settings;
use crate::tle::{self, CacheStatus, HttpTleSource};
use anyhow::{Context, Result};

pub async fn run(settings: &Settings, force: bool) -> Result<()> {
    let path = settings.tle.resolved_cache_path();
    let source = HttpTleSource::new(settings.tle.url.as_str(), settings.tle.timeout());

    let status = tle::ensure_fresh(&source, &path, settings.tle.max_age(), force)
        .await
        .with_context(|| format!("Could not refresh TLE data from {}", settings.tle.url))?;

    match status {
        CacheStatus::Refreshed => println!("TLE data saved to {}.", path.display()),
        CacheStatus::Fresh { age } => println!(
            "TLE file {} is up-to-date ({}h old).",
            path.display(),
            age.as_secs() / 3600
        ),
    }

    Ok(())
}
