//! Application state and its update operations.
//!
//! Every operation borrows the current [`AppState`] and returns a new snapshot
//! (or a [`StateError`] whose `Display` is the notice to show the user). The
//! caller swaps the snapshot in; nothing is patched in place.

use crate::format::parse_formatted_number;
use crate::models::{
    CropList, DEFAULT_COUNTRY, DataRecord, DataType, YEAR_FIELD, default_data, example_data,
};
use crate::paste::{PasteError, PasteReport, parse_clipboard};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Please enter a crop name")]
    EmptyCropName,
    #[error("Crop already exists")]
    DuplicateCrop,
    #[error("\"{0}\" is reserved for the year column")]
    ReservedCropName(String),
    #[error("Cannot remove the last crop")]
    LastCrop,
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),
    #[error("Year must be positive, got {0}")]
    InvalidYear(i32),
    #[error("Year {0} already exists")]
    DuplicateYear(i32),
    #[error(transparent)]
    Paste(#[from] PasteError),
}

/// Everything a session edits: header fields, the crop schema and the table.
///
/// Serializes to the JSON export layout
/// (`{country, dataType, crops, data}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub country: String,
    pub data_type: DataType,
    pub crops: CropList,
    pub data: Vec<DataRecord>,
}

impl Default for AppState {
    fn default() -> Self {
        let crops = CropList::default();
        let data = default_data(&crops);
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            data_type: DataType::default(),
            crops,
            data,
        }
    }
}

impl AppState {
    pub fn with_country(&self, country: &str) -> Self {
        Self {
            country: country.to_string(),
            ..self.clone()
        }
    }

    pub fn with_data_type(&self, data_type: DataType) -> Self {
        Self {
            data_type,
            ..self.clone()
        }
    }

    /// Merge clipboard text into the table. On error the caller keeps `self`.
    pub fn paste(&self, text: &str) -> Result<(Self, PasteReport), StateError> {
        let report = parse_clipboard(text, &self.data, &self.crops)?;
        let next = Self {
            data: report.data.clone(),
            ..self.clone()
        };
        Ok((next, report))
    }

    /// Append a crop and back-fill `0` on every record.
    pub fn add_crop(&self, name: &str) -> Result<Self, StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::EmptyCropName);
        }
        if name.eq_ignore_ascii_case(YEAR_FIELD) {
            return Err(StateError::ReservedCropName(name.to_string()));
        }
        if self.crops.contains(name) {
            return Err(StateError::DuplicateCrop);
        }
        let data = self
            .data
            .iter()
            .map(|r| {
                let mut r = r.clone();
                r.set(name, 0);
                r
            })
            .collect();
        log::info!("added crop {name:?}");
        Ok(Self {
            crops: self.crops.with(name),
            data,
            ..self.clone()
        })
    }

    /// Drop a crop from the schema and from every record.
    pub fn remove_crop(&self, name: &str) -> Result<Self, StateError> {
        if self.crops.len() <= 1 {
            return Err(StateError::LastCrop);
        }
        if !self.crops.contains(name) {
            return Err(StateError::UnknownCrop(name.to_string()));
        }
        let data = self
            .data
            .iter()
            .map(|r| {
                let mut r = r.clone();
                r.remove(name);
                r
            })
            .collect();
        log::info!("removed crop {name:?}");
        Ok(Self {
            crops: self.crops.without(name),
            data,
            ..self.clone()
        })
    }

    /// Insert a zeroed record for `year`, keeping the table sorted.
    pub fn add_year(&self, year: i32) -> Result<Self, StateError> {
        if year <= 0 {
            return Err(StateError::InvalidYear(year));
        }
        if self.data.iter().any(|r| r.year == year) {
            return Err(StateError::DuplicateYear(year));
        }
        let mut data = self.data.clone();
        data.push(DataRecord::zeroed(year, &self.crops));
        data.sort_by_key(|r| r.year);
        Ok(Self {
            data,
            ..self.clone()
        })
    }

    /// Remove the record for `year`; unknown years leave the table as is.
    pub fn remove_year(&self, year: i32) -> Self {
        Self {
            data: self.data.iter().filter(|r| r.year != year).cloned().collect(),
            ..self.clone()
        }
    }

    /// Manual cell edit. Text that does not start with a number stores `0`.
    /// Unknown years and crops leave the table unchanged.
    pub fn set_value(&self, year: i32, crop: &str, text: &str) -> Self {
        if !self.crops.contains(crop) {
            return self.clone();
        }
        let value = parse_formatted_number(text).unwrap_or(0);
        let data = self
            .data
            .iter()
            .map(|r| {
                if r.year == year {
                    let mut r = r.clone();
                    r.set(crop, value);
                    r
                } else {
                    r.clone()
                }
            })
            .collect();
        Self {
            data,
            ..self.clone()
        }
    }

    /// Default year offered by the "add year" control.
    pub fn next_year_suggestion(&self) -> i32 {
        self.data
            .iter()
            .map(|r| r.year)
            .max()
            .map(|y| y + 1)
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// Zero table for the default years over the current crop list.
    pub fn reset_data(&self) -> Self {
        Self {
            data: default_data(&self.crops),
            ..self.clone()
        }
    }

    /// Example figures with the default crops and country; data type is kept.
    pub fn load_example(&self) -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            data_type: self.data_type,
            crops: CropList::default(),
            data: example_data(),
        }
    }

    /// Header line, e.g. `Production of Food in China`.
    pub fn heading(&self) -> String {
        format!("{} of Food in {}", self.data_type, self.country)
    }

    /// Chart title with the covered year span appended.
    pub fn title(&self) -> String {
        let years = self.data.iter().map(|r| r.year);
        match (years.clone().min(), years.max()) {
            (Some(a), Some(b)) if a != b => format!("{} ({a}-{b})", self.heading()),
            (Some(a), _) => format!("{} ({a})", self.heading()),
            _ => self.heading(),
        }
    }
}
