//! Typed views of Start.Info responses.
//!
//! The client returns responses as untyped JSON. These DTOs describe the
//! documented shapes for callers who want them. The API sends nearly every
//! scalar as a string and omits fields freely, so everything defaults and
//! unknown fields are ignored.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::RnvError;

/// Convert an untyped response into one of the models below.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RnvError> {
    serde_json::from_value(value).map_err(|e| RnvError::Json {
        message: e.to_string(),
        body: None,
    })
}

/// An entry of the update-check response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateElement {
    #[serde(rename = "updateElementID")]
    pub update_element_id: String,
    /// `LINE` or `STATIONPACKAGE`.
    pub element: String,
    pub description: String,
    /// `"true"` or `"false"`.
    pub critical: String,
    /// Always `CHANGED` in practice.
    pub action: String,
    #[serde(rename = "elementID")]
    pub element_id: String,
}

/// All stations of a region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StationPackage {
    #[serde(rename = "regionID")]
    pub region_id: String,
    pub name: String,
    #[serde(rename = "elementID")]
    pub element_id: String,
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Station {
    pub short_name: String,
    pub long_name: String,
    pub longitude: String,
    pub latitude: String,
    /// Unique station id used by every station-scoped endpoint.
    #[serde(rename = "hafasID")]
    pub hafas_id: String,
    #[serde(rename = "elementID")]
    pub element_id: String,
}

/// Stop sequence of one line, from the line package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineJourney {
    #[serde(rename = "lineID", alias = "lineId")]
    pub line_id: String,
    pub stop_list_ids: Vec<String>,
    pub valid_from_index: String,
}

/// Presentation data for one line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineInfo {
    /// `STRB`, `BUS` or `WEBUKOM`.
    pub line_type: String,
    pub line_id: String,
    pub icon: String,
    pub icon_name: String,
    pub hexcolor: String,
    #[serde(rename = "elementID")]
    pub element_id: String,
}

/// Departure (or arrival) monitor of one station.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StationMonitor {
    pub time: String,
    #[serde(rename = "shortlabel")]
    pub short_label: String,
    pub label: String,
    #[serde(rename = "projectedtime")]
    pub projected_time: String,
    pub icon: String,
    pub color: String,
    pub past_request_text: String,
    /// Ticker messages, each wrapped in `***`.
    pub ticker: String,
    pub list_of_departures: Vec<Departure>,
    pub station_infos: Vec<StationInfo>,
}

impl StationMonitor {
    /// Individual ticker messages with the `***` delimiters removed.
    pub fn ticker_messages(&self) -> Vec<&str> {
        self.ticker
            .split("***")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Departure {
    pub line_id: String,
    pub direction: String,
    pub time: String,
    /// Minutes between the requested time and the departure.
    pub difference_time: String,
    pub tour_id: String,
    /// `452`, `454REFAUS` or `454AUS`.
    pub kind_of_tour: String,
    pub foreign_line: String,
    pub news_available: String,
    pub position_in_tour: String,
    /// `STRAB`, `KOM` or `WEBU`.
    pub transportation: String,
    pub platform: String,
    /// `OK` or `CANCELLED`.
    pub status: String,
    pub status_note: String,
}

impl Departure {
    pub fn is_cancelled(&self) -> bool {
        self.status == "CANCELLED"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StationInfo {
    pub id: String,
    pub title: String,
    pub text: String,
    pub line_id: String,
    #[serde(alias = "stationsIDs")]
    pub stations_ids: Vec<String>,
    pub stations_names: Vec<String>,
    pub url: String,
    pub author: String,
    pub created: Value,
    pub valid_from: Value,
    pub valid_to: Value,
    pub display_from: Value,
    pub display_to: Value,
}

/// Upcoming stops of a tour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextStops {
    pub line_id: String,
    pub ticker: String,
    pub valid_from_index: String,
    pub time_list: Vec<String>,
    pub predicted_time_list: Vec<String>,
    pub stop_list_ids: Vec<String>,
    #[serde(rename = "stationIDs")]
    pub station_ids: Value,
    pub directions: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_station_package() {
        let value = json!({
            "regionID": "1",
            "name": "RNV",
            "elementID": "sp-1",
            "groupURIs": "",
            "stations": [
                {
                    "shortName": "Hbf",
                    "longName": "Mannheim Hauptbahnhof",
                    "longitude": "8.4693",
                    "latitude": "49.4793",
                    "hafasID": "2417",
                    "elementID": "st-2417"
                }
            ]
        });

        let package: StationPackage = decode(value).unwrap();
        assert_eq!(package.region_id, "1");
        assert_eq!(package.stations.len(), 1);
        assert_eq!(package.stations[0].hafas_id, "2417");
        assert_eq!(package.stations[0].long_name, "Mannheim Hauptbahnhof");
    }

    #[test]
    fn decode_station_monitor() {
        let value = json!({
            "time": "15.03.2024 14:30",
            "shortlabel": "Hbf",
            "label": "Mannheim Hbf",
            "projectedtime": "14:31",
            "ticker": "***Bauarbeiten***Umleitung Linie 5***",
            "listOfDepartures": [
                {"lineId": "5", "direction": "Weinheim", "differenceTime": "3", "kindOfTour": "454AUS", "status": "OK"},
                {"lineId": "1", "direction": "Schönau", "differenceTime": "7", "kindOfTour": "452", "status": "CANCELLED"}
            ],
            "stationInfos": []
        });

        let monitor: StationMonitor = decode(value).unwrap();
        assert_eq!(monitor.short_label, "Hbf");
        assert_eq!(monitor.projected_time, "14:31");
        assert_eq!(monitor.list_of_departures.len(), 2);
        assert!(!monitor.list_of_departures[0].is_cancelled());
        assert!(monitor.list_of_departures[1].is_cancelled());
        assert_eq!(
            monitor.ticker_messages(),
            vec!["Bauarbeiten", "Umleitung Linie 5"]
        );
    }

    #[test]
    fn decode_line_info_list() {
        let value = json!([
            {"lineType": "STRB", "lineId": "5", "iconName": "5.png", "hexcolor": "#00975F", "elementID": "l5"},
            {"lineType": "BUS", "lineId": "45"}
        ]);

        let lines: Vec<LineInfo> = decode(value).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].hexcolor, "#00975F");
        assert_eq!(lines[1].icon_name, "");
    }

    #[test]
    fn decode_update_elements() {
        let value = json!([{
            "updateElementID": "u1",
            "element": "STATIONPACKAGE",
            "description": "contains new stations",
            "critical": "false",
            "action": "CHANGED",
            "elementID": "sp-1"
        }]);

        let updates: Vec<UpdateElement> = decode(value).unwrap();
        assert_eq!(updates[0].element, "STATIONPACKAGE");
        assert_eq!(updates[0].action, "CHANGED");
    }

    #[test]
    fn decode_wrong_shape_is_json_error() {
        let err = decode::<StationPackage>(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, RnvError::Json { .. }));
    }
}
