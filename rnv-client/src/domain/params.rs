//! Closed parameter sets accepted by the Start.Info endpoints.

use std::fmt;
use std::str::FromStr;

/// Error returned when a request parameter is missing or out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameter `{name}`: {reason}")]
pub struct InvalidParameter {
    /// Query key (or logical name) of the offending parameter.
    pub name: &'static str,
    /// What was wrong with it.
    pub reason: String,
}

impl InvalidParameter {
    pub(crate) fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject an empty (or whitespace-only) required string parameter.
pub(crate) fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, InvalidParameter> {
    if value.trim().is_empty() {
        return Err(InvalidParameter::new(name, "must not be empty"));
    }
    Ok(value)
}

/// Reject an empty list, or a list containing empty entries.
pub(crate) fn require_all<S: AsRef<str>>(
    name: &'static str,
    values: &[S],
) -> Result<(), InvalidParameter> {
    if values.is_empty() {
        return Err(InvalidParameter::new(name, "at least one value is required"));
    }
    for value in values {
        require(name, value.as_ref())?;
    }
    Ok(())
}

/// Whether a station monitor lists departures or arrivals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MonitorMode {
    #[default]
    Departures,
    Arrivals,
}

impl MonitorMode {
    /// Wire value: `DEP` or `ARR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorMode::Departures => "DEP",
            MonitorMode::Arrivals => "ARR",
        }
    }
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorMode {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEP" => Ok(MonitorMode::Departures),
            "ARR" => Ok(MonitorMode::Arrivals),
            other => Err(InvalidParameter::new(
                "mode",
                format!("expected DEP or ARR, got {other:?}"),
            )),
        }
    }
}

/// Source of a tour's timetable.
///
/// `452` tours come from the planned schedule tables, `454` tours from the
/// real-time feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourType {
    Scheduled,
    RealTime,
}

impl TourType {
    /// Numeric code used on the wire.
    pub fn code(&self) -> u16 {
        match self {
            TourType::Scheduled => 452,
            TourType::RealTime => 454,
        }
    }
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<u16> for TourType {
    type Error = InvalidParameter;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            452 => Ok(TourType::Scheduled),
            454 => Ok(TourType::RealTime),
            other => Err(InvalidParameter::new(
                "tourType",
                format!("expected 452 or 454, got {other}"),
            )),
        }
    }
}

impl FromStr for TourType {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u16 = s.parse().map_err(|_| {
            InvalidParameter::new("tourType", format!("expected 452 or 454, got {s:?}"))
        })?;
        TourType::try_from(code)
    }
}

/// Edge length in pixels of map thumbnails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThumbnailSize {
    Px32,
    Px64,
    #[default]
    Px128,
    Px256,
    Px512,
}

impl ThumbnailSize {
    pub fn pixels(&self) -> u16 {
        match self {
            ThumbnailSize::Px32 => 32,
            ThumbnailSize::Px64 => 64,
            ThumbnailSize::Px128 => 128,
            ThumbnailSize::Px256 => 256,
            ThumbnailSize::Px512 => 512,
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

impl TryFrom<u16> for ThumbnailSize {
    type Error = InvalidParameter;

    fn try_from(pixels: u16) -> Result<Self, Self::Error> {
        match pixels {
            32 => Ok(ThumbnailSize::Px32),
            64 => Ok(ThumbnailSize::Px64),
            128 => Ok(ThumbnailSize::Px128),
            256 => Ok(ThumbnailSize::Px256),
            512 => Ok(ThumbnailSize::Px512),
            other => Err(InvalidParameter::new(
                "thumbnailSize",
                format!("expected one of 32, 64, 128, 256, 512, got {other}"),
            )),
        }
    }
}

impl FromStr for ThumbnailSize {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pixels: u16 = s.parse().map_err(|_| {
            InvalidParameter::new("thumbnailSize", format!("not a pixel size: {s:?}"))
        })?;
        ThumbnailSize::try_from(pixels)
    }
}

/// File format of the full-size map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MapFormat {
    #[default]
    Png,
    Pdf,
}

impl MapFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapFormat::Png => "png",
            MapFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapFormat {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(MapFormat::Png),
            "pdf" => Ok(MapFormat::Pdf),
            other => Err(InvalidParameter::new(
                "format",
                format!("expected png or pdf, got {other:?}"),
            )),
        }
    }
}
