//! Filter configuration: bounding box, exclusion regions, category sets and
//! the output projection.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Column;

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lat_min: 57.2,
            lat_max: 57.5,
            lon_min: 11.2,
            lon_max: 11.9,
        }
    }
}

/// A named rectangle cut out of the bounding box.
///
/// Missing bounds leave that side open. Present bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusionRegion {
    pub name: String,
    #[serde(default)]
    pub lat_min: Option<f64>,
    #[serde(default)]
    pub lat_max: Option<f64>,
    #[serde(default)]
    pub lon_min: Option<f64>,
    #[serde(default)]
    pub lon_max: Option<f64>,
}

impl ExclusionRegion {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat_min.map_or(true, |min| lat >= min)
            && self.lat_max.map_or(true, |max| lat <= max)
            && self.lon_min.map_or(true, |min| lon >= min)
            && self.lon_max.map_or(true, |max| lon <= max)
    }
}

/// Everything the record filter needs to know about one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub bounding_box: BoundingBox,

    #[serde(default)]
    pub exclusion_regions: Vec<ExclusionRegion>,

    /// Stationary statuses; rows reporting one of these are dropped.
    #[serde(default = "default_excluded_statuses")]
    pub excluded_statuses: Vec<String>,

    /// Transponder classes to keep. Empty keeps every class.
    #[serde(default = "default_included_mobile_types")]
    pub included_mobile_types: Vec<String>,

    /// Ship types that sail close to other vessels by definition.
    #[serde(default = "default_excluded_ship_types")]
    pub excluded_ship_types: Vec<String>,

    #[serde(default = "default_output_columns")]
    pub output_columns: Vec<Column>,
}

fn default_excluded_statuses() -> Vec<String> {
    to_strings(&["Moored", "At anchor", "Aground"])
}

fn default_included_mobile_types() -> Vec<String> {
    to_strings(&["Class A", "Class B"])
}

fn default_excluded_ship_types() -> Vec<String> {
    to_strings(&["Pilot", "Tug", "Towing", "Towing long/wide"])
}

fn default_output_columns() -> Vec<Column> {
    vec![
        Column::Timestamp,
        Column::Mmsi,
        Column::Latitude,
        Column::Longitude,
    ]
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::minimal(BoundingBox::default())
    }
}

impl FilterConfig {
    /// Category filters with a plain bounding box and the four position columns.
    pub fn minimal(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            exclusion_regions: Vec::new(),
            excluded_statuses: default_excluded_statuses(),
            included_mobile_types: default_included_mobile_types(),
            excluded_ship_types: default_excluded_ship_types(),
            output_columns: default_output_columns(),
        }
    }

    /// Wider box with two cut-outs, keeping the kinematic columns and ship type.
    pub fn extended() -> Self {
        let mut config = Self::minimal(BoundingBox {
            lat_min: 57.3,
            lat_max: 57.7,
            lon_min: 10.7,
            lon_max: 11.7,
        });
        config.exclusion_regions = vec![
            ExclusionRegion {
                name: "north-east".to_string(),
                lat_min: Some(57.6),
                lat_max: None,
                lon_min: Some(11.6),
                lon_max: None,
            },
            ExclusionRegion {
                name: "south".to_string(),
                lat_min: None,
                lat_max: Some(57.35),
                lon_min: Some(10.8),
                lon_max: Some(11.2),
            },
        ];
        config.output_columns.extend([
            Column::Rot,
            Column::Sog,
            Column::Cog,
            Column::ShipType,
        ]);
        config
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: FilterConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Columns to load from the input: the projection first, then whatever
    /// the active predicates look at. No duplicates.
    pub fn required_columns(&self) -> Vec<Column> {
        let mut columns = self.output_columns.clone();
        let mut needed = vec![Column::Latitude, Column::Longitude];
        if !self.excluded_statuses.is_empty() {
            needed.push(Column::NavigationalStatus);
        }
        if !self.included_mobile_types.is_empty() {
            needed.push(Column::MobileType);
        }
        if !self.excluded_ship_types.is_empty() {
            needed.push(Column::ShipType);
        }
        for column in needed {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}
