//! Position maps in Source Map v3 format.
//!
//! Lines and columns are 0-based; columns count UTF-16 code units, which is
//! what browsers and bundlers expect.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use serde::{Deserialize, Serialize};

use crate::core::PositionMapError;

const BASE64_DIGITS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// One generated position pointing back at an original position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source: u32,
    pub original_line: u32,
    pub original_column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalPosition<'a> {
    pub source: &'a str,
    pub line: u32,
    pub column: u32,
}

/// On-disk shape of a source map.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    names: Vec<String>,
    mappings: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub sources_content: Vec<Option<String>>,
    mappings: Vec<Mapping>,
}

impl PositionMap {
    /// An empty map for output generated from a single source file.
    pub fn for_source(source: impl Into<String>, content: Option<String>) -> Self {
        Self {
            file: None,
            sources: vec![source.into()],
            sources_content: vec![content],
            mappings: Vec::new(),
        }
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Record a mapping into source 0. Mappings must be added in generated order.
    pub fn add(&mut self, generated: (u32, u32), original: (u32, u32)) {
        let mapping = Mapping {
            generated_line: generated.0,
            generated_column: generated.1,
            source: 0,
            original_line: original.0,
            original_column: original.1,
        };
        if let Some(last) = self.mappings.last_mut()
            && last.generated_line == mapping.generated_line
            && last.generated_column == mapping.generated_column
        {
            *last = mapping;
            return;
        }
        self.mappings.push(mapping);
    }

    /// Original position for a generated position.
    ///
    /// Picks the closest mapping at or before `column` on the same line.
    pub fn lookup(&self, line: u32, column: u32) -> Option<OriginalPosition<'_>> {
        let end = self
            .mappings
            .partition_point(|m| (m.generated_line, m.generated_column) <= (line, column));
        let mapping = self.mappings[..end].last()?;
        if mapping.generated_line != line {
            return None;
        }
        Some(OriginalPosition {
            source: self.sources.get(mapping.source as usize)?,
            line: mapping.original_line,
            column: mapping.original_column,
        })
    }

    /// Re-target this map through `upstream`, which maps this map's
    /// sources back to their own originals.
    ///
    /// Mappings that `upstream` cannot resolve are dropped.
    pub fn compose(&self, upstream: &PositionMap) -> PositionMap {
        let mut composed = PositionMap {
            file: self.file.clone(),
            sources: Vec::new(),
            sources_content: Vec::new(),
            mappings: Vec::new(),
        };
        for mapping in &self.mappings {
            let Some(original) = upstream.lookup(mapping.original_line, mapping.original_column)
            else {
                continue;
            };
            let content = upstream
                .sources
                .iter()
                .position(|s| s == original.source)
                .and_then(|i| upstream.sources_content.get(i).cloned().flatten());
            let source = composed.source_index(original.source, content);
            composed.mappings.push(Mapping {
                source,
                original_line: original.line,
                original_column: original.column,
                ..*mapping
            });
        }
        composed
    }

    /// Append `other` as if its output started `line_offset` lines into ours.
    pub fn append(&mut self, other: &PositionMap, line_offset: u32) {
        for mapping in &other.mappings {
            let name = &other.sources[mapping.source as usize];
            let content = other.sources_content.get(mapping.source as usize).cloned().flatten();
            let source = self.source_index(name, content);
            self.mappings.push(Mapping {
                generated_line: mapping.generated_line + line_offset,
                source,
                ..*mapping
            });
        }
        self.mappings.sort();
    }

    fn source_index(&mut self, name: &str, content: Option<String>) -> u32 {
        if let Some(index) = self.sources.iter().position(|s| s == name) {
            return index as u32;
        }
        self.sources.push(name.to_string());
        self.sources_content.push(content);
        (self.sources.len() - 1) as u32
    }

    pub fn to_json(&self) -> String {
        let raw = RawSourceMap {
            version: 3,
            file: self.file.clone(),
            sources: self.sources.clone(),
            sources_content: self
                .sources_content
                .iter()
                .any(Option::is_some)
                .then(|| self.sources_content.clone()),
            names: Vec::new(),
            mappings: encode_mappings(&self.mappings),
        };
        // Only strings and integers: serialization cannot fail.
        serde_json::to_string(&raw).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, PositionMapError> {
        let raw: RawSourceMap = serde_json::from_str(json)?;
        if raw.version != 3 {
            return Err(PositionMapError::Version(raw.version));
        }
        let mut sources_content = raw.sources_content.unwrap_or_default();
        sources_content.resize(raw.sources.len(), None);
        let mappings = decode_mappings(&raw.mappings)?;
        if let Some(bad) = mappings.iter().find(|m| m.source as usize >= raw.sources.len()) {
            return Err(PositionMapError::Mappings(format!(
                "source index {} out of range",
                bad.source
            )));
        }
        Ok(Self {
            file: raw.file,
            sources: raw.sources,
            sources_content,
            mappings,
        })
    }

    /// The map as a `data:` URL for inline `sourceMappingURL` comments.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:application/json;charset=utf-8;base64,{}",
            Base64.encode(self.to_json())
        )
    }
}

/// The trailing comment that points a generated file at its map.
pub fn source_mapping_url_comment(url: &str) -> String {
    format!("//# sourceMappingURL={}\n", url)
}

fn encode_vlq(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = (vlq & 0b11111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64_DIGITS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn encode_mappings(mappings: &[Mapping]) -> String {
    let mut out = String::new();
    let mut line = 0;
    let mut previous_source = 0i64;
    let mut previous_original_line = 0i64;
    let mut previous_original_column = 0i64;
    let mut previous_column = 0i64;
    let mut first_on_line = true;

    for mapping in mappings {
        while line < mapping.generated_line {
            out.push(';');
            line += 1;
            previous_column = 0;
            first_on_line = true;
        }
        if !first_on_line {
            out.push(',');
        }
        first_on_line = false;

        encode_vlq(mapping.generated_column as i64 - previous_column, &mut out);
        encode_vlq(mapping.source as i64 - previous_source, &mut out);
        encode_vlq(mapping.original_line as i64 - previous_original_line, &mut out);
        encode_vlq(mapping.original_column as i64 - previous_original_column, &mut out);

        previous_column = mapping.generated_column as i64;
        previous_source = mapping.source as i64;
        previous_original_line = mapping.original_line as i64;
        previous_original_column = mapping.original_column as i64;
    }
    out
}

fn decode_segment(segment: &str) -> Result<Vec<i64>, PositionMapError> {
    let mut values = Vec::new();
    let mut value = 0i64;
    let mut shift = 0;
    for byte in segment.bytes() {
        let digit = BASE64_DIGITS
            .iter()
            .position(|&d| d == byte)
            .ok_or_else(|| PositionMapError::Mappings(format!("invalid character {:?}", byte as char)))?
            as i64;
        value += (digit & 0b11111) << shift;
        if digit & 0b100000 != 0 {
            shift += 5;
            if shift > 60 {
                return Err(PositionMapError::Mappings("VLQ value too large".to_string()));
            }
            continue;
        }
        values.push(if value & 1 == 1 { -(value >> 1) } else { value >> 1 });
        value = 0;
        shift = 0;
    }
    if shift != 0 {
        return Err(PositionMapError::Mappings("truncated VLQ value".to_string()));
    }
    Ok(values)
}

fn decode_mappings(encoded: &str) -> Result<Vec<Mapping>, PositionMapError> {
    let mut mappings = Vec::new();
    let mut source = 0i64;
    let mut original_line = 0i64;
    let mut original_column = 0i64;

    for (line, segments) in encoded.split(';').enumerate() {
        let mut column = 0i64;
        for segment in segments.split(',').filter(|s| !s.is_empty()) {
            let fields = decode_segment(segment)?;
            column += fields[0];
            match fields.len() {
                1 => continue,
                4 | 5 => {
                    source += fields[1];
                    original_line += fields[2];
                    original_column += fields[3];
                }
                n => {
                    return Err(PositionMapError::Mappings(format!(
                        "segment with {} fields",
                        n
                    )));
                }
            }
            if column < 0 || source < 0 || original_line < 0 || original_column < 0 {
                return Err(PositionMapError::Mappings("negative position".to_string()));
            }
            mappings.push(Mapping {
                generated_line: line as u32,
                generated_column: column as u32,
                source: source as u32,
                original_line: original_line as u32,
                original_column: original_column as u32,
            });
        }
    }
    mappings.sort();
    Ok(mappings)
}
