//! Text level format
//!
//! ```text
//! # comment to end of line
//! 0x1                         # version, hexadecimal
//! 0  100 200  1 1             # type posX posY sizeX sizeY
//! 4  300 64   1 2  10 11      # ... [id] [linkId]
//! ```
//!
//! Positions are signed pixel offsets, sizes are counted in atoms. Records
//! without an explicit id get their 0-based record index.

use std::path::Path;

use glam::Vec2;

use crate::consts::LEVEL_FORMAT_VERSION;
use crate::sim::{EntityKind, EntityRecord, LevelError};

/// Decode level text into entity records
pub fn parse(text: &str) -> Result<Vec<EntityRecord>, LevelError> {
    let mut version = None;
    let mut records = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw_line.split('#').next().unwrap_or_default();
        let mut tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if version.is_none() {
            let v = parse_version(tokens[0], line)?;
            if v != LEVEL_FORMAT_VERSION {
                return Err(LevelError::UnsupportedVersion(v));
            }
            version = Some(v);
            tokens.remove(0);
            if tokens.is_empty() {
                continue;
            }
        }

        records.push(parse_record(&tokens, line)?);
    }

    if version.is_none() {
        return Err(LevelError::MissingVersion);
    }
    Ok(records)
}

/// Read and decode a level file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<EntityRecord>, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let records = parse(&text)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn parse_version(token: &str, line: usize) -> Result<u32, LevelError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).map_err(|_| invalid(token, line))
}

fn parse_record(tokens: &[&str], line: usize) -> Result<EntityRecord, LevelError> {
    if tokens.len() < 5 {
        return Err(LevelError::IncompleteRecord {
            line,
            fields: tokens.len(),
        });
    }

    let code: u32 = number(tokens[0], line)?;
    let kind = EntityKind::from_code(code).ok_or(LevelError::UnknownEntityType { line, code })?;
    let x: i32 = number(tokens[1], line)?;
    let y: i32 = number(tokens[2], line)?;
    let w: u32 = number(tokens[3], line)?;
    let h: u32 = number(tokens[4], line)?;

    let mut record = EntityRecord::new(
        kind,
        Vec2::new(x as f32, y as f32),
        Vec2::new(w as f32, h as f32),
    );
    if let Some(token) = tokens.get(5) {
        record = record.with_id(number(token, line)?);
    }
    if let Some(token) = tokens.get(6) {
        record = record.with_link(number(token, line)?);
    }
    Ok(record)
}

fn number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, LevelError> {
    token.parse().map_err(|_| invalid(token, line))
}

fn invalid(token: &str, line: usize) -> LevelError {
    LevelError::InvalidNumber {
        line,
        token: token.to_string(),
    }
}
