//! Coordinate extraction from Google Maps links.

use std::sync::LazyLock;

use regex::Regex;

use crate::traits::{Coordinate, MapLinkExtractor};

// `!3d<lat>!4d<lng>` is the pin of a place page and beats the viewport.
static PLACE_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!3d([-+]?\d+(?:\.\d+)?)!4d([-+]?\d+(?:\.\d+)?)").expect("valid place regex")
});

static QUERY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[?&](?:q|query|ll|destination|daddr)=(?:loc:)?([-+]?\d+(?:\.\d+)?)(?:,|%2C)(?:\+|%20)*([-+]?\d+(?:\.\d+)?)",
    )
    .expect("valid query regex")
});

static VIEWPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([-+]?\d+(?:\.\d+)?),([-+]?\d+(?:\.\d+)?)").expect("valid viewport regex")
});

/// Reads coordinates embedded in full Google Maps URLs.
///
/// Short links (`maps.app.goo.gl/...`) carry no coordinates and would need
/// an HTTP redirect to expand, so they yield `None` and the destination falls
/// through to address geocoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMapsLinkExtractor;

impl GoogleMapsLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl MapLinkExtractor for GoogleMapsLinkExtractor {
    fn extract(&self, link: &str) -> Option<Coordinate> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        [&*PLACE_PIN, &*QUERY_PARAM, &*VIEWPORT]
            .into_iter()
            .find_map(|pattern| lat_lng(pattern, link))
    }
}

fn lat_lng(pattern: &Regex, link: &str) -> Option<Coordinate> {
    let captures = pattern.captures(link)?;
    let lat: f64 = captures.get(1)?.as_str().parse().ok()?;
    let lng: f64 = captures.get(2)?.as_str().parse().ok()?;
    Some(Coordinate::new(lng, lat))
}
