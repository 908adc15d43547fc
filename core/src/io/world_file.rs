//! World-file sidecars (`.jgw`, `.tfw`, `.wld`, ...) next to raster images.

use crate::config::WORLD_FILE_EXTENSIONS;
use crate::geo::GeoTransform;
use crate::prelude::{CoreError, CoreResult};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Locate the world file that belongs to `image`.
///
/// Known extensions are tried next to the image first (lower then upper
/// case); failing that the directory is scanned for any world-file
/// extension whose stem matches the image stem case-insensitively.
pub fn find_world_file(image: &Path) -> Option<PathBuf> {
    for ext in WORLD_FILE_EXTENSIONS {
        for candidate in [
            image.with_extension(ext),
            image.with_extension(ext.to_ascii_uppercase()),
        ] {
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    let stem = image.file_stem()?.to_string_lossy().to_lowercase();
    let dir = match image.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let entries = fs::read_dir(&dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let ext_ok = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .is_some_and(|e| WORLD_FILE_EXTENSIONS.contains(&e.as_str()));
            let stem_ok = path
                .file_stem()
                .is_some_and(|s| s.to_string_lossy().to_lowercase() == stem);
            ext_ok && stem_ok && path.is_file()
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Parse the six numeric lines `A D B E C F` of a world file.
///
/// Blank lines are skipped; anything after the sixth value is ignored.
pub fn parse_world_file(path: &Path) -> CoreResult<[f64; 6]> {
    let contents = fs::read_to_string(path)?;
    parse_world_file_str(&contents).map_err(|reason| CoreError::WorldFile {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_world_file_str(contents: &str) -> Result<[f64; 6], String> {
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 6 {
        return Err(format!("has only {} lines, need at least 6", lines.len()));
    }

    let mut values = [0.0; 6];
    for (idx, line) in lines.iter().take(6).enumerate() {
        values[idx] = line
            .parse::<f64>()
            .map_err(|_| format!("cannot parse line {} as a number: '{}'", idx + 1, line))?;
    }
    debug!("world file parameters {:?}", values);
    Ok(values)
}

/// Find, parse and convert the world file for `image`, if there is one.
pub fn load_transform(image: &Path) -> CoreResult<Option<(PathBuf, GeoTransform)>> {
    let Some(path) = find_world_file(image) else {
        return Ok(None);
    };
    let values = parse_world_file(&path)?;
    Ok(Some((path, GeoTransform::from_world_file(values))))
}

/// Write a world file for `transform`.
pub fn write_world_file(path: &Path, transform: &GeoTransform) -> CoreResult<()> {
    let body = transform
        .to_world_file()
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, body + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_skips_blank_lines() {
        let values = parse_world_file_str("0.5\n\n0\n0\n-0.5\n  200000.25 \n600000.75\n").unwrap();
        assert_eq!(values, [0.5, 0.0, 0.0, -0.5, 200_000.25, 600_000.75]);
    }

    #[test]
    fn short_or_garbled_files_fail() {
        assert!(parse_world_file_str("1\n0\n0\n-1\n").is_err());
        let err = parse_world_file_str("1\n0\nzero\n-1\n5\n6\n").unwrap_err();
        assert!(err.contains("line 3"));
    }

    #[test]
    fn finds_sidecar_by_extension() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("ortho.jpg");
        fs::write(&image, b"").unwrap();
        fs::write(dir.path().join("ortho.jgw"), "1\n0\n0\n-1\n0.5\n9.5\n").unwrap();

        let found = find_world_file(&image).unwrap();
        assert_eq!(found.file_name().unwrap(), "ortho.jgw");
        let (_, transform) = load_transform(&image).unwrap().unwrap();
        assert_eq!(transform.origin_x, 0.0);
        assert_eq!(transform.origin_y, 10.0);
    }

    #[test]
    fn scan_matches_stem_case_insensitively() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("Scan.tif");
        fs::write(&image, b"").unwrap();
        fs::write(dir.path().join("SCAN.Tfw"), "1\n0\n0\n-1\n0\n0\n").unwrap();
        assert!(find_world_file(&image).is_some());
    }

    #[test]
    fn missing_world_file_is_none() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("plain.png");
        fs::write(&image, b"").unwrap();
        assert!(find_world_file(&image).is_none());
        assert!(load_transform(&image).unwrap().is_none());
    }

    #[test]
    fn written_world_file_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wld");
        let transform = GeoTransform::new(100.0, 200.0, 2.0, -2.0);
        write_world_file(&path, &transform).unwrap();
        let values = parse_world_file(&path).unwrap();
        assert_eq!(GeoTransform::from_world_file(values), transform);
    }
}
