/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use chrono::{DateTime, Utc};
use log::warn;

// Parses an RFC 3339 feed timestamp. Empty text means the element carried no value.
pub(crate) fn parse_timestamp(
    field: &'static str,
    text: &str,
) -> Result<Option<DateTime<Utc>>, PicasaError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|v| Some(v.with_timezone(&Utc)))
        .map_err(|err| PicasaError::InvalidField {
            field,
            value: text.to_string(),
            reason: err.to_string(),
        })
}

// Parses a non-negative count such as totalResults or numphotos
pub(crate) fn parse_count(field: &'static str, text: &str) -> Result<Option<u64>, PicasaError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u64>()
        .map(Some)
        .map_err(|err| PicasaError::InvalidField {
            field,
            value: text.to_string(),
            reason: err.to_string(),
        })
}

// Keywords arrive comma joined. An empty string yields a single empty keyword.
pub(crate) fn split_keywords(keywords: &str) -> Vec<String> {
    keywords.split(',').map(str::to_string).collect()
}

// Parses a georss "lat long" pair. Unparsable halves are logged and left at 0.0.
pub(crate) fn parse_position(id: &str, position: &str) -> (f64, f64) {
    if position.is_empty() {
        return (0.0, 0.0);
    }
    let Some((lat, long)) = position.split_once(' ') else {
        warn!("photo {id}: position {position:?} is not a \"lat long\" pair");
        return (0.0, 0.0);
    };
    (
        parse_axis(id, "latitude", lat),
        parse_axis(id, "longitude", long),
    )
}

fn parse_axis(id: &str, axis: &str, text: &str) -> f64 {
    text.parse::<f64>().unwrap_or_else(|err| {
        warn!("photo {id}: cannot parse {text:?} as {axis}: {err}");
        0.0
    })
}
