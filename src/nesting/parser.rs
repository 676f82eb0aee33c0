use super::error::Result;
use super::types::{Curve, Part, PartJob};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a single part document
pub fn parse_part(json: &str) -> Result<Part> {
    let part: Part = serde_json::from_str(json)?;
    debug!("Parsed part with {} contours", part.contours.len());
    Ok(part)
}

/// Parse a list of invalid geometry curves
pub fn parse_invalid_geometry(json: &str) -> Result<Vec<Curve>> {
    let curves: Vec<Curve> = serde_json::from_str(json)?;
    debug!("Parsed {} invalid geometry curves", curves.len());
    Ok(curves)
}

/// Parse `{"Part": .., "InvalidGeometry": ..}` or a bare part object
pub fn parse_job(json: &str) -> Result<PartJob> {
    let value: Value = serde_json::from_str(json)?;

    if value.get("Part").is_some() {
        return Ok(serde_json::from_value(value)?);
    }

    Ok(PartJob {
        part: serde_json::from_value(value)?,
        invalid_geometry: None,
    })
}

/// Read and parse a part document from disk
pub fn read_job(path: &Path) -> Result<PartJob> {
    let content = fs::read_to_string(path)?;
    parse_job(&content)
}

/// Read and parse an invalid geometry list from disk
pub fn read_invalid_geometry(path: &Path) -> Result<Vec<Curve>> {
    let content = fs::read_to_string(path)?;
    parse_invalid_geometry(&content)
}
