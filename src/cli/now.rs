use crate::core::settings::Settings;
use crate::orbit::Sgp4Propagator;
use crate::tle::{HttpTleSource, TleSource};
use crate::tracker::{render, Tracker};
use anyhow::Result;
use chrono::Utc;
use std::io::Write;

pub async fn run(settings: &Settings, json: bool) -> Result<()> {
    let source = HttpTleSource::new(settings.tle.url.as_str(), settings.tle.timeout());
    report(settings, &source, json, &mut std::io::stdout()).await
}

/// Evaluates one tick and writes it to `out`; nothing else goes to `out`.
async fn report<W: Write>(
    settings: &Settings,
    source: &dyn TleSource,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let satellites = super::prepare(settings, source).await?;

    let tracker = Tracker::new(
        satellites,
        Sgp4Propagator::new(),
        settings.observer.observer(),
        settings.tracking.interval(),
    );
    let report = tracker.tick(Utc::now());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for line in render(report.best.as_ref()) {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures::{GPS_LINE1, GPS_LINE2};
    use crate::tle::FakeTleSource;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.tle.cache_path = Some(dir.path().join("gps-ops.txt"));
        settings
    }

    fn tle_body() -> String {
        format!("GPS BIIR-2  (PRN 13)\n{}\n{}\n", GPS_LINE1, GPS_LINE2)
    }

    #[tokio::test]
    async fn test_json_output_is_a_single_document() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let source = FakeTleSource::ok(&tle_body());

        // first run downloads, second reads the fresh cache
        for _ in 0..2 {
            let mut out = Vec::new();
            report(&settings, &source, true, &mut out).await.unwrap();

            let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
            assert_eq!(value["evaluated"].as_u64(), Some(1));
            assert_eq!(value["best"]["name"], "GPS BIIR-2  (PRN 13)");
        }
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_text_output_is_three_lines() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let source = FakeTleSource::ok(&tle_body());

        let mut out = Vec::new();
        report(&settings, &source, false, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Satellite overhead: GPS BIIR-2  (PRN 13)");
        assert!(lines[1].starts_with("Altitude: "));
        assert!(lines[2].starts_with("Azimuth: "));
    }
}
