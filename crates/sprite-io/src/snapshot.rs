//! Color-array JSON snapshots.
//!
//! The only persisted format is a small JSON document:
//!
//! ```json
//! {"document": {"width": 2, "height": 2, "colorArr": [[r, g, b, a], ...]}}
//! ```
//!
//! `colorArr` is column-major: entry `x * height + y` holds pixel `(x, y)`.
//! For the usual square documents this is the same as `y + x * width`.
//! A missing `width` or `height` defaults to 32.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprite_core::{Color, PixelBuffer};
use tracing::debug;

use crate::{IoError, IoResult};

/// Side length assumed when a snapshot omits `width` or `height`.
pub const DEFAULT_SNAPSHOT_SIZE: u32 = 32;

fn default_size() -> u32 {
    DEFAULT_SNAPSHOT_SIZE
}

/// Top-level snapshot wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The pixel document
    pub document: SnapshotDocument,
}

/// Pixel payload of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Width in pixels
    #[serde(default = "default_size")]
    pub width: u32,
    /// Height in pixels
    #[serde(default = "default_size")]
    pub height: u32,
    /// Column-major `[r, g, b, a]` entries
    #[serde(rename = "colorArr")]
    pub color_arr: Vec<[u8; 4]>,
}

/// Builds a buffer from a parsed snapshot.
///
/// # Errors
///
/// Returns [`IoError::Snapshot`] if `colorArr` does not hold exactly
/// `width * height` entries, and a core error for a zero-sized document.
pub fn from_snapshot(snapshot: &Snapshot) -> IoResult<PixelBuffer> {
    let doc = &snapshot.document;
    let expected = doc.width as usize * doc.height as usize;
    if doc.color_arr.len() != expected {
        return Err(IoError::Snapshot(format!(
            "colorArr has {} entries, expected {} for {}x{}",
            doc.color_arr.len(),
            expected,
            doc.width,
            doc.height
        )));
    }

    let mut buffer = PixelBuffer::new(doc.width, doc.height)?;
    let h = doc.height as usize;
    for (i, rgba) in doc.color_arr.iter().enumerate() {
        let (x, y) = ((i / h) as i32, (i % h) as i32);
        buffer.set(x, y, Color::from_array(*rgba))?;
    }
    Ok(buffer)
}

/// Captures a buffer as a snapshot. The origin is not stored.
pub fn to_snapshot(buffer: &PixelBuffer) -> Snapshot {
    let color_arr = buffer
        .local_bounds()
        .iter_coords()
        .filter_map(|(x, y)| buffer.get(x, y).ok())
        .map(Color::to_array)
        .collect();
    Snapshot {
        document: SnapshotDocument {
            width: buffer.width(),
            height: buffer.height(),
            color_arr,
        },
    }
}

/// Parses a snapshot JSON string into a buffer.
pub fn from_json(json: &str) -> IoResult<PixelBuffer> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    from_snapshot(&snapshot)
}

/// Serializes a buffer to snapshot JSON.
pub fn to_json(buffer: &PixelBuffer) -> IoResult<String> {
    Ok(serde_json::to_string(&to_snapshot(buffer))?)
}

/// Reads a snapshot file.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let buffer = from_json(&fs::read_to_string(path)?)?;
    debug!(path = %path.display(), width = buffer.width(), height = buffer.height(), "read snapshot");
    Ok(buffer)
}

/// Writes a snapshot file.
pub fn write_snapshot<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    fs::write(path, to_json(buffer)?)?;
    debug!(path = %path.display(), width = buffer.width(), height = buffer.height(), "wrote snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_indexing() {
        let json = r#"{"document": {"width": 2, "height": 2, "colorArr": [
            [1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255], [4, 0, 0, 255]
        ]}}"#;
        let buf = from_json(json).unwrap();
        assert_eq!(buf.get(0, 0).unwrap().r, 1);
        assert_eq!(buf.get(0, 1).unwrap().r, 2);
        assert_eq!(buf.get(1, 0).unwrap().r, 3);
        assert_eq!(buf.get(1, 1).unwrap().r, 4);
    }

    #[test]
    fn test_non_square_roundtrip() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        for (i, (x, y)) in buf.local_bounds().iter_coords().enumerate().collect::<Vec<_>>() {
            buf.set(x, y, Color::new(i as u8, x as u8, y as u8, 200)).unwrap();
        }
        let back = from_json(&to_json(&buf).unwrap()).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_missing_size_defaults_to_32() {
        let arr = vec!["[0,0,0,0]"; 32 * 32].join(",");
        let json = format!(r#"{{"document": {{"colorArr": [{arr}]}}}}"#);
        let buf = from_json(&json).unwrap();
        assert_eq!(buf.dimensions(), (32, 32));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let json = r#"{"document": {"width": 2, "height": 2, "colorArr": [[0,0,0,0]]}}"#;
        assert!(matches!(from_json(json), Err(IoError::Snapshot(_))));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(from_json("{"), Err(IoError::Json(_))));
        assert!(matches!(
            from_json(r#"{"document": {"width": 1, "height": 1, "colorArr": [[300, 0, 0, 0]]}}"#),
            Err(IoError::Json(_))
        ));
    }

    #[test]
    fn test_serialized_field_name() {
        let buf = PixelBuffer::new(1, 1).unwrap();
        let json = to_json(&buf).unwrap();
        assert!(json.contains("\"colorArr\""));
        assert!(json.contains("\"document\""));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.json");
        let buf = PixelBuffer::filled(4, 4, Color::new(1, 2, 3, 4)).unwrap();
        write_snapshot(&path, &buf).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), buf);
    }
}
