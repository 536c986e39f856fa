use crate::core::error::DataLoadError;
use crate::core::models::Satellite;
use std::path::Path;

/// Reads every element set in the TLE file at `path`, in file order.
pub fn load_satellites(path: &Path) -> Result<Vec<Satellite>, DataLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let satellites = parse_satellites(&content, path)?;
    tracing::info!(path = %path.display(), count = satellites.len(), "Loaded satellites");
    Ok(satellites)
}

/// Parses three-line (named) and bare two-line element sets; both may appear in one file.
pub fn parse_satellites(content: &str, path: &Path) -> Result<Vec<Satellite>, DataLoadError> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut satellites = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (name, line1, line2, consumed) = if is_line(lines[i], '1') {
            (None, lines[i], lines.get(i + 1).copied(), 2)
        } else {
            let name = lines[i].trim().to_string();
            match lines.get(i + 1) {
                Some(l1) if is_line(l1, '1') => (Some(name), *l1, lines.get(i + 2).copied(), 3),
                _ => {
                    return Err(DataLoadError::Parse {
                        path: path.to_path_buf(),
                        message: format!("expected line 1 after '{}'", name),
                    })
                }
            }
        };

        let line2 = line2.filter(|l| is_line(l, '2')).ok_or_else(|| DataLoadError::Parse {
            path: path.to_path_buf(),
            message: format!("missing line 2 for '{}'", line1),
        })?;

        let elements = sgp4::Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| DataLoadError::Parse {
                path: path.to_path_buf(),
                message: format!("{} ({})", e, name.as_deref().unwrap_or(line1)),
            })?;

        let name = name.unwrap_or_else(|| fallback_name(&elements));
        let satellite =
            Satellite::from_elements(name.clone(), elements).map_err(|e| DataLoadError::Elements {
                path: path.to_path_buf(),
                name,
                message: e.to_string(),
            })?;

        satellites.push(satellite);
        i += consumed;
    }

    Ok(satellites)
}

fn is_line(line: &str, number: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(number) && chars.next() == Some(' ')
}

fn fallback_name(elements: &sgp4::Elements) -> String {
    elements
        .international_designator
        .clone()
        .unwrap_or_else(|| format!("NORAD {}", elements.norad_id))
}
