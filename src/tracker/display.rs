use crate::core::models::BestSatellite;
use std::io::{self, Write};

pub const REGION_LINES: usize = 3;

// cursor to start of previous line, clear to end of line
const LINE_UP_AND_CLEAR: &str = "\x1b[F\x1b[K";

/// Formats the three display lines. No best satellite renders a placeholder.
pub fn render(best: Option<&BestSatellite>) -> [String; REGION_LINES] {
    match best {
        Some(best) => [
            format!("Satellite overhead: {}", best.name),
            format!("Altitude: {:.2}°", best.altitude_deg),
            format!("Azimuth: {:.2}°", best.azimuth_deg),
        ],
        None => [
            "Satellite overhead: none".to_string(),
            "Altitude: --".to_string(),
            "Azimuth: --".to_string(),
        ],
    }
}

/// A fixed three-line region rewritten in place with cursor movement sequences.
pub struct Display<W: Write> {
    out: W,
    reserved: bool,
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            reserved: false,
        }
    }

    pub fn update(&mut self, best: Option<&BestSatellite>) -> io::Result<()> {
        if !self.reserved {
            write!(self.out, "{}", "\n".repeat(REGION_LINES))?;
            self.reserved = true;
        }

        write!(self.out, "{}", LINE_UP_AND_CLEAR.repeat(REGION_LINES))?;
        for line in render(best) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    pub fn stopped(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nStopped.")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best() -> BestSatellite {
        BestSatellite {
            name: "GPS BIII-3  (PRN 23)".to_string(),
            altitude_deg: 71.236,
            azimuth_deg: 254.1,
            distance_km: 20_500.0,
        }
    }

    #[test]
    fn test_render_best() {
        let lines = render(Some(&best()));
        assert_eq!(lines[0], "Satellite overhead: GPS BIII-3  (PRN 23)");
        assert_eq!(lines[1], "Altitude: 71.24°");
        assert_eq!(lines[2], "Azimuth: 254.10°");
    }

    #[test]
    fn test_render_none() {
        let lines = render(None);
        assert_eq!(lines[0], "Satellite overhead: none");
        assert_eq!(lines[1], "Altitude: --");
        assert_eq!(lines[2], "Azimuth: --");
    }

    #[test]
    fn test_region_reserved_once_and_rewritten() {
        let mut display = Display::new(Vec::new());
        display.update(Some(&best())).unwrap();
        display.update(None).unwrap();

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert!(out.starts_with("\n\n\n\x1b[F\x1b[K\x1b[F\x1b[K\x1b[F\x1b[K"));
        assert_eq!(out.matches(LINE_UP_AND_CLEAR).count(), 6);
        assert_eq!(out.matches("\n\n\n").count(), 1);
        assert!(out.ends_with("Satellite overhead: none\nAltitude: --\nAzimuth: --\n"));
    }

    #[test]
    fn test_empty_tick_does_not_repeat_previous_result() {
        let mut display = Display::new(Vec::new());
        display.update(Some(&best())).unwrap();
        display.update(None).unwrap();

        let out = String::from_utf8(display.into_inner()).unwrap();
        let last_region = out.rsplit(LINE_UP_AND_CLEAR).next().unwrap();
        assert!(!last_region.contains("GPS BIII-3"));
    }

    #[test]
    fn test_stopped_message() {
        let mut display = Display::new(Vec::new());
        display.stopped().unwrap();
        assert_eq!(String::from_utf8(display.into_inner()).unwrap(), "\nStopped.\n");
    }
}
