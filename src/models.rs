use serde::{Deserialize, Serialize};

/// Fixed CSV header, written even when no row survives extraction.
pub const CSV_HEADER: [&str; 12] = [
    "Messier number",
    "NGC/IC number",
    "Common name",
    "Image",
    "Image small",
    "Object type",
    "Distance (kly)",
    "Constellation",
    "Apparent magnitude",
    "Apparent dimensions",
    "Right ascension",
    "Declination",
];

/// Role of a cell, derived solely from its position within the row.
/// Column index 5 carries the distance value and gets its own cleaning path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Generic,
    Distance,
}

impl ColumnRole {
    pub fn from_index(index: usize) -> Self {
        if index == 5 {
            ColumnRole::Distance
        } else {
            ColumnRole::Generic
        }
    }
}

/// Local paths produced by a successful image resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePaths {
    pub full: String,
    pub thumb: String,
}

/// One output row of the catalogue. Field order matches the CSV header;
/// unresolved values are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessierRecord {
    #[serde(rename = "Messier number")]
    pub messier_number: String,
    #[serde(rename = "NGC/IC number")]
    pub ngc_ic_number: String,
    #[serde(rename = "Common name")]
    pub common_name: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Image small")]
    pub image_small: String,
    #[serde(rename = "Object type")]
    pub object_type: String,
    #[serde(rename = "Distance (kly)")]
    pub distance_kly: String,
    #[serde(rename = "Constellation")]
    pub constellation: String,
    #[serde(rename = "Apparent magnitude")]
    pub apparent_magnitude: String,
    #[serde(rename = "Apparent dimensions")]
    pub apparent_dimensions: String,
    #[serde(rename = "Right ascension")]
    pub right_ascension: String,
    #[serde(rename = "Declination")]
    pub declination: String,
}

impl MessierRecord {
    /// Assembles a record from role-cleaned cells and an optional resolved image.
    ///
    /// The raw image cell (index 3) is replaced by the two local path columns,
    /// so cells beyond index 10 are ignored.
    pub fn from_cells(cells: &[String], image: Option<ImagePaths>) -> Self {
        let field = |i: usize| cells.get(i).cloned().unwrap_or_default();
        let (full, thumb) = match image {
            Some(paths) => (paths.full, paths.thumb),
            None => (String::new(), String::new()),
        };
        MessierRecord {
            messier_number: field(0),
            ngc_ic_number: field(1),
            common_name: field(2),
            image: full,
            image_small: thumb,
            object_type: field(4),
            distance_kly: field(5),
            constellation: field(6),
            apparent_magnitude: field(7),
            apparent_dimensions: field(8),
            right_ascension: field(9),
            declination: field(10),
        }
    }
}
