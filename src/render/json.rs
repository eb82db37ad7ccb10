//! JSON rendering of model entities.

use crate::error::Result;
use crate::model::{Block, Node, Resource, Section};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert any entity to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Write any entity as JSON to a writer.
pub fn write_json<T: Serialize + ?Sized, W: Write>(
    value: &T,
    mut writer: W,
    format: JsonFormat,
) -> Result<()> {
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        JsonFormat::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

macro_rules! impl_to_json {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Convert to JSON.
                pub fn to_json(&self, format: JsonFormat) -> Result<String> {
                    to_json(self, format)
                }
            }
        )*
    };
}

impl_to_json!(Block, Section, Resource, Node);

impl Resource {
    /// Save the resource as a JSON file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        let file = File::create(path)?;
        write_json(self, BufWriter::new(file), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coords, Label};

    fn sample() -> Resource {
        Resource::new()
            .with_title("Test")
            .with_sections(vec![Section::with_blocks(vec![Block::text(
                Coords::new(0.0, 1.0, 2.0, 3.0, 4.0),
                "Hello",
            )])])
            .with_other_blocks(vec![Block::new(Coords::default()).with_label(Label::Figure)])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = sample().to_json(JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = sample().to_json(JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"_type\":\"Block\""));
        assert!(json.contains("\"label\":\"figure\""));
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&Section::new(), &mut buf, JsonFormat::Compact).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            r#"{"_type":"Section","blocks":[],"title":null,"summary":null}"#
        );
    }
}
