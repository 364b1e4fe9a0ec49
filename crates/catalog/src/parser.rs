//! Parser for the catalog JSON files.
//!
//! - restaurants file: a JSON array of restaurant records
//! - promotions file: a JSON array of promotional offers
//!
//! Unknown cuisine or price labels fail here, because the enums only
//! deserialize from their known labels.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Open a file, mapping a missing file to [`CatalogError::FileNotFound`]
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode a JSON array of records from any reader
fn parse_records<T: DeserializeOwned>(reader: impl Read, file: &str) -> Result<Vec<T>> {
    serde_json::from_reader(reader).map_err(|source| CatalogError::ParseError {
        file: file.to_string(),
        source,
    })
}

/// Parse the restaurants file
pub fn parse_restaurants(path: &Path) -> Result<Vec<Restaurant>> {
    let reader = BufReader::new(open(path)?);
    let restaurants: Vec<Restaurant> = parse_records(reader, &file_label(path))?;

    for restaurant in &restaurants {
        check_rating(restaurant)?;
    }

    Ok(restaurants)
}

/// Parse the promotions file
pub fn parse_promotions(path: &Path) -> Result<Vec<Promotion>> {
    let reader = BufReader::new(open(path)?);
    parse_records(reader, &file_label(path))
}

/// Parse restaurants from an in-memory JSON string
pub fn parse_restaurants_str(json: &str) -> Result<Vec<Restaurant>> {
    let restaurants: Vec<Restaurant> = parse_records(json.as_bytes(), "<inline>")?;
    for restaurant in &restaurants {
        check_rating(restaurant)?;
    }
    Ok(restaurants)
}

/// Parse promotions from an in-memory JSON string
pub fn parse_promotions_str(json: &str) -> Result<Vec<Promotion>> {
    parse_records(json.as_bytes(), "<inline>")
}

/// Ratings must lie in [0, 5]
pub(crate) fn check_rating(restaurant: &Restaurant) -> Result<()> {
    if !(0.0..=5.0).contains(&restaurant.rating) {
        return Err(CatalogError::InvalidValue {
            field: format!("rating of restaurant {}", restaurant.id),
            value: restaurant.rating.to_string(),
        });
    }
    Ok(())
}
