//! Raw place records and their normalization into candidate points.

use std::collections::HashSet;

use serde::Deserialize;

use crate::model::{Accessibility, CandidatePoint};

/// Place types searched for each user-facing category.
pub const CATEGORY_PLACE_TYPES: &[(&str, &[&str])] = &[
    (
        "attraction",
        &["tourist_attraction", "museum", "landmark", "art_gallery", "town_square"],
    ),
    (
        "nature",
        &["park", "natural_feature", "zoo", "aquarium", "beach", "rv_park"],
    ),
    (
        "entertainment",
        &["amusement_park", "casino", "bowling_alley", "movie_theater", "stadium", "night_club"],
    ),
    (
        "food",
        &["restaurant", "cafe", "bar", "bakery", "liquor_store", "meal_takeaway"],
    ),
    (
        "shopping",
        &[
            "shopping_mall",
            "clothing_store",
            "shoe_store",
            "jewelry_store",
            "supermarket",
            "department_store",
            "gift_shop",
        ],
    ),
    (
        "religious",
        &["church", "mosque", "synagogue", "hindu_temple"],
    ),
];

/// A place as returned by the nearby-search service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlace {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub location: Option<RawLocation>,
    pub current_opening_hours: Option<OpeningHours>,
    pub accessibility_options: Option<AccessibilityOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizedText {
    pub text: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    pub next_close_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityOptions {
    pub wheelchair_accessible_parking: Option<bool>,
    pub wheelchair_accessible_entrance: Option<bool>,
    pub wheelchair_accessible_restroom: Option<bool>,
    pub wheelchair_accessible_seating: Option<bool>,
}

impl From<&AccessibilityOptions> for Accessibility {
    fn from(options: &AccessibilityOptions) -> Self {
        Self {
            parking: options.wheelchair_accessible_parking.unwrap_or(false),
            entrance: options.wheelchair_accessible_entrance.unwrap_or(false),
            restroom: options.wheelchair_accessible_restroom.unwrap_or(false),
            seating: options.wheelchair_accessible_seating.unwrap_or(false),
        }
    }
}

/// Expand user categories into place types.
///
/// Unknown keywords are searched as-is. The result holds each type once, in
/// first-seen order.
pub fn expand_keywords<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();

    for category in categories {
        let category = category.as_ref();
        let related = CATEGORY_PLACE_TYPES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, place_types)| place_types.to_vec())
            .unwrap_or_else(|| vec![category]);

        for place_type in related {
            if seen.insert(place_type) {
                types.push(place_type.to_string());
            }
        }
    }

    types
}

/// Turn raw places into candidate points.
///
/// With `accessible_only`, places without any wheelchair-accessible feature
/// are dropped. Places without coordinates are kept; clustering ignores them.
pub fn normalize_places(raw: &[RawPlace], accessible_only: bool) -> Vec<CandidatePoint> {
    raw.iter()
        .filter_map(|place| {
            let accessibility = place
                .accessibility_options
                .as_ref()
                .map(Accessibility::from)
                .unwrap_or_default();
            if accessible_only && !accessibility.any() {
                return None;
            }

            let location = place.location.clone().unwrap_or_default();
            let hours = place.current_opening_hours.clone().unwrap_or_default();

            Some(CandidatePoint {
                name: place.display_name.as_ref().and_then(|name| name.text.clone()),
                latitude: location.latitude,
                longitude: location.longitude,
                open_now: hours.open_now,
                next_closing_time: hours.next_close_time,
                accessibility: Some(accessibility),
            })
        })
        .collect()
}
