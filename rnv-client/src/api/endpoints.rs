//! One method per Start.Info endpoint.
//!
//! Every method validates its parameters, builds the query and hands it to
//! [`RnvClient::send_request`]. Validation failures are returned before any
//! request is sent. Responses are returned as untyped JSON; see
//! [`crate::models`] for optional typed views.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::{
    MapFormat, MonitorMode, ThumbnailSize, TourType, UNUSED_UPDATE_TIME, format_timestamp,
    require, require_all, require_epoch_millis,
};
use crate::query::{Query, encode_path_segment};

use super::client::RnvClient;
use super::error::RnvError;

/// Region covering the whole RNV network.
pub const DEFAULT_REGION_ID: &str = "1";

const UPDATE_PATH: &str = "/update";
const STATION_PACKAGE_PATH: &str = "/regions/rnv/modules/stations/packages";
const LINE_PACKAGE_PATH: &str = "/regions/rnv/modules/lines/allJourney";
const ALL_LINES_PATH: &str = "/regions/rnv/modules/lines/all";
const STATION_MONITOR_PATH: &str = "/regions/rnv/modules/stationmonitor/element";
const NEXT_STOPS_PATH: &str = "/regions/rnv/modules/lines";
const NEWS_PATH: &str = "/regions/rnv/modules/news";
const TICKER_PATH: &str = "/regions/rnv/modules/ticker";
const CANCELED_LINE_PATH: &str = "/regions/rnv/modules/canceled/line";
const STATION_INFO_PATH: &str = "/regions/rnv/modules/info/station";
const STATION_DETAIL_PATH: &str = "/regions/rnv/modules/stations/detail";
const JOURNEY_INFO_PATH: &str = "/regions/rnv/modules/info/journey";
const MAP_PATH: &str = "/regions/rnv/modules/maps";

/// Parameters for the update check.
///
/// The API expects three timestamps packed into one `time` parameter:
/// the last station package update, the last line package update, and a
/// third slot the server ignores.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub station_package_time: NaiveDateTime,
    pub line_package_time: NaiveDateTime,
    pub unused_time: Option<NaiveDateTime>,
    pub region_id: String,
}

impl UpdateRequest {
    pub fn new(station_package_time: NaiveDateTime, line_package_time: NaiveDateTime) -> Self {
        Self {
            station_package_time,
            line_package_time,
            unused_time: None,
            region_id: DEFAULT_REGION_ID.to_string(),
        }
    }

    pub fn with_unused_time(mut self, t: NaiveDateTime) -> Self {
        self.unused_time = Some(t);
        self
    }

    pub fn with_region_id(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = region_id.into();
        self
    }

    pub fn to_query(&self) -> Result<Query, RnvError> {
        let region_id = require("regionID", &self.region_id)?;
        let unused = self
            .unused_time
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| UNUSED_UPDATE_TIME.to_string());

        let time = format!(
            "{}${}${}",
            format_timestamp(&self.station_package_time),
            format_timestamp(&self.line_package_time),
            unused
        );

        Ok(Query::new().with("regionID", region_id).with("time", time))
    }
}

/// Parameters for a station departure/arrival monitor.
#[derive(Debug, Clone)]
pub struct StationMonitorRequest {
    pub hafas_id: String,
    pub time: NaiveDateTime,
    pub mode: MonitorMode,
    /// Restrict the monitor to these poles. Empty means all poles.
    pub poles: Vec<String>,
    pub need_platform_detail: bool,
}

impl StationMonitorRequest {
    pub fn new(hafas_id: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            hafas_id: hafas_id.into(),
            time,
            mode: MonitorMode::default(),
            poles: Vec::new(),
            need_platform_detail: true,
        }
    }

    pub fn with_mode(mut self, mode: MonitorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_poles<I, S>(mut self, poles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.poles = poles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platform_detail(mut self, need_platform_detail: bool) -> Self {
        self.need_platform_detail = need_platform_detail;
        self
    }

    pub fn to_query(&self) -> Result<Query, RnvError> {
        let hafas_id = require("hafasID", &self.hafas_id)?;
        require_poles(&self.poles)?;

        let query = Query::new()
            .with("hafasID", hafas_id)
            .with("time", format_timestamp(&self.time))
            .with("mode", self.mode.as_str())
            .with("needPlatformDetail", self.need_platform_detail.to_string());

        Ok(if self.poles.is_empty() {
            query
        } else {
            query.with("poles", self.poles.join(","))
        })
    }
}

/// Parameters for the upcoming stops of one tour.
#[derive(Debug, Clone)]
pub struct NextStopsRequest {
    pub line_id: String,
    pub time: NaiveDateTime,
    pub tour_type: TourType,
    pub tour_id: String,
    pub hafas_id: String,
    /// Number of leading stops to skip; 0 lists the tour from its first stop.
    pub stop_index: u32,
}

impl NextStopsRequest {
    pub fn new(
        line_id: impl Into<String>,
        time: NaiveDateTime,
        tour_type: TourType,
        tour_id: impl Into<String>,
        hafas_id: impl Into<String>,
    ) -> Self {
        Self {
            line_id: line_id.into(),
            time,
            tour_type,
            tour_id: tour_id.into(),
            hafas_id: hafas_id.into(),
            stop_index: 0,
        }
    }

    pub fn with_stop_index(mut self, stop_index: u32) -> Self {
        self.stop_index = stop_index;
        self
    }

    pub fn to_query(&self) -> Result<Query, RnvError> {
        let line_id = require("lineID", &self.line_id)?;
        let tour_id = require("tourID", &self.tour_id)?;
        let hafas_id = require("hafasID", &self.hafas_id)?;

        Ok(Query::new()
            .with("hafasID", hafas_id)
            .with("time", format_timestamp(&self.time))
            .with("lineID", line_id)
            .with("stopIndex", self.stop_index.to_string())
            .with("tourType", self.tour_type.to_string())
            .with("tourID", tour_id))
    }
}

/// Parameters for journey information.
///
/// Poles may only be given together with a station id.
#[derive(Debug, Clone, Default)]
pub struct JourneyInfoRequest {
    pub hafas_id: Option<String>,
    pub poles: Vec<String>,
    /// Epoch milliseconds.
    pub departure_time: Option<String>,
}

impl JourneyInfoRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hafas_id(mut self, hafas_id: impl Into<String>) -> Self {
        self.hafas_id = Some(hafas_id.into());
        self
    }

    pub fn with_poles<I, S>(mut self, poles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.poles = poles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_departure_time(mut self, epoch_millis: impl Into<String>) -> Self {
        self.departure_time = Some(epoch_millis.into());
        self
    }

    pub fn to_query(&self) -> Result<Query, RnvError> {
        let departure_time = self
            .departure_time
            .as_deref()
            .map(|t| require_epoch_millis("departureTime", t))
            .transpose()?;

        let Some(hafas_id) = self.hafas_id.as_deref() else {
            if !self.poles.is_empty() {
                return Err(RnvError::InvalidArgument {
                    name: "poles",
                    reason: "poles require a hafasID".to_string(),
                });
            }
            return Ok(Query::new().with_opt("departureTime", departure_time));
        };

        let hafas_id = require("hafasID", hafas_id)?;
        require_poles(&self.poles)?;

        let query = Query::new()
            .with("hafasID", hafas_id)
            .with_opt("departureTime", departure_time);

        Ok(if self.poles.is_empty() {
            query
        } else {
            query.with("poles", self.poles.join(","))
        })
    }
}

/// Every pole must be non-blank and free of the `,` list separator.
fn require_poles(poles: &[String]) -> Result<(), RnvError> {
    for pole in poles {
        if require("poles", pole)?.contains(',') {
            return Err(RnvError::InvalidArgument {
                name: "poles",
                reason: format!("pole {pole:?} contains the list separator ','"),
            });
        }
    }
    Ok(())
}

fn lines_query<S: AsRef<str>>(lines: &[S]) -> Result<String, RnvError> {
    require_all("lines", lines)?;
    Ok(lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(";"))
}

impl RnvClient {
    /// Check whether the station or line packages changed since the given times.
    ///
    /// Returns an empty object when nothing changed, otherwise a collection
    /// of update elements (`element` is `LINE` or `STATIONPACKAGE`).
    pub async fn update(&self, request: &UpdateRequest) -> Result<Value, RnvError> {
        let query = request.to_query()?;
        self.send_request(UPDATE_PATH, &query).await
    }

    /// Fetch every station of a region.
    ///
    /// Region [`DEFAULT_REGION_ID`] covers the whole RNV area.
    pub async fn station_package(&self, region_id: &str) -> Result<Value, RnvError> {
        let region_id = require("regionID", region_id)?;
        let path = format!("{STATION_PACKAGE_PATH}/{}", encode_path_segment(region_id));
        self.send_request(&path, &Query::new()).await
    }

    /// Fetch the stop sequence of every line.
    pub async fn line_package(&self) -> Result<Value, RnvError> {
        self.send_request(LINE_PACKAGE_PATH, &Query::new()).await
    }

    /// Fetch type, colour and icon of every line.
    pub async fn all_lines(&self) -> Result<Value, RnvError> {
        self.send_request(ALL_LINES_PATH, &Query::new()).await
    }

    /// Fetch departures (or arrivals) at a station.
    pub async fn station_monitor(
        &self,
        request: &StationMonitorRequest,
    ) -> Result<Value, RnvError> {
        let query = request.to_query()?;
        self.send_request(STATION_MONITOR_PATH, &query).await
    }

    /// Fetch the stops that follow on one tour of a line.
    pub async fn next_stops(&self, request: &NextStopsRequest) -> Result<Value, RnvError> {
        let query = request.to_query()?;
        self.send_request(NEXT_STOPS_PATH, &query).await
    }

    /// Fetch current news entries.
    pub async fn news(&self) -> Result<Value, RnvError> {
        self.send_request(NEWS_PATH, &Query::new()).await
    }

    /// Fetch ticker messages for the given lines.
    pub async fn ticker<S: AsRef<str>>(&self, lines: &[S]) -> Result<Value, RnvError> {
        let query = Query::new().with("lines", lines_query(lines)?);
        self.send_request(TICKER_PATH, &query).await
    }

    /// Fetch cancellation details for a line departing at `departure_time`
    /// (epoch milliseconds).
    pub async fn canceled_line(
        &self,
        line_id: &str,
        departure_time: &str,
    ) -> Result<Value, RnvError> {
        let line_id = require("line", line_id)?;
        let departure_time = require_epoch_millis("departureTime", departure_time)?;

        let query = Query::new()
            .with("line", line_id)
            .with("departureTime", departure_time);
        self.send_request(CANCELED_LINE_PATH, &query).await
    }

    /// Fetch station information for lines at `departure_time`, optionally
    /// narrowed to one station.
    pub async fn station_info<S: AsRef<str>>(
        &self,
        lines: &[S],
        departure_time: &str,
        hafas_id: Option<&str>,
    ) -> Result<Value, RnvError> {
        let lines = lines_query(lines)?;
        let departure_time = require_epoch_millis("departureTime", departure_time)?;
        let hafas_id = hafas_id.map(|id| require("hafasID", id)).transpose()?;

        let query = Query::new()
            .with("lines", lines)
            .with("departureTime", departure_time)
            .with_opt("hafasID", hafas_id);
        self.send_request(STATION_INFO_PATH, &query).await
    }

    /// Fetch details of one station.
    pub async fn station_detail(&self, station_id: &str) -> Result<Value, RnvError> {
        let station_id = require("stationId", station_id)?;
        let query = Query::new().with("stationId", station_id);
        self.send_request(STATION_DETAIL_PATH, &query).await
    }

    /// Fetch journey information, similar to the ticker.
    pub async fn journey_info(&self, request: &JourneyInfoRequest) -> Result<Value, RnvError> {
        let query = request.to_query()?;
        self.send_request(JOURNEY_INFO_PATH, &query).await
    }

    /// List the available network and detour maps.
    pub async fn map(
        &self,
        thumbnail_size: ThumbnailSize,
        format: MapFormat,
    ) -> Result<Value, RnvError> {
        let query = Query::new()
            .with("thumbnailSize", thumbnail_size.to_string())
            .with("format", format.as_str());
        self.send_request(MAP_PATH, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn update_packs_three_timestamps() {
        let query = UpdateRequest::new(at(9, 5), at(14, 30)).to_query().unwrap();
        assert_eq!(
            query.encode(),
            "regionID=1&time=2024-03-15+09:05$2024-03-15+14:30$2011-11-11+11:11"
        );
    }

    #[test]
    fn update_with_explicit_unused_time_and_region() {
        let query = UpdateRequest::new(at(9, 5), at(14, 30))
            .with_unused_time(at(0, 0))
            .with_region_id("2")
            .to_query()
            .unwrap();
        assert_eq!(query.get("regionID"), Some("2"));
        assert_eq!(
            query.get("time"),
            Some("2024-03-15+09:05$2024-03-15+14:30$2024-03-15+00:00")
        );
    }

    #[test]
    fn update_rejects_empty_region() {
        let err = UpdateRequest::new(at(9, 5), at(14, 30))
            .with_region_id("")
            .to_query()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn station_monitor_defaults() {
        let query = StationMonitorRequest::new("2417", at(8, 0)).to_query().unwrap();
        assert_eq!(
            query.encode(),
            "hafasID=2417&time=2024-03-15+08:00&mode=DEP&needPlatformDetail=true"
        );
    }

    #[test]
    fn station_monitor_joins_poles() {
        let query = StationMonitorRequest::new("2417", at(8, 0))
            .with_mode(MonitorMode::Arrivals)
            .with_poles(["A", "B"])
            .with_platform_detail(false)
            .to_query()
            .unwrap();
        assert_eq!(query.get("mode"), Some("ARR"));
        assert_eq!(query.get("needPlatformDetail"), Some("false"));
        assert_eq!(query.get("poles"), Some("A,B"));
        assert!(query.encode().ends_with("&poles=A,B"));
    }

    #[test]
    fn station_monitor_empty_poles_omitted() {
        let query = StationMonitorRequest::new("2417", at(8, 0))
            .with_poles(Vec::<String>::new())
            .to_query()
            .unwrap();
        assert_eq!(query.get("poles"), None);
    }

    #[test]
    fn station_monitor_rejects_blank_ids() {
        assert!(
            StationMonitorRequest::new("", at(8, 0))
                .to_query()
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            StationMonitorRequest::new("2417", at(8, 0))
                .with_poles(["A", ""])
                .to_query()
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn next_stops_query() {
        let query = NextStopsRequest::new("5", at(12, 15), TourType::RealTime, "77", "2417")
            .with_stop_index(3)
            .to_query()
            .unwrap();
        assert_eq!(
            query.encode(),
            "hafasID=2417&time=2024-03-15+12:15&lineID=5&stopIndex=3&tourType=454&tourID=77"
        );
    }

    #[test]
    fn next_stops_default_stop_index() {
        let query = NextStopsRequest::new("5", at(12, 15), TourType::Scheduled, "77", "2417")
            .to_query()
            .unwrap();
        assert_eq!(query.get("stopIndex"), Some("0"));
        assert_eq!(query.get("tourType"), Some("452"));
    }

    #[test]
    fn next_stops_requires_every_id() {
        for (line, tour, hafas) in [("", "77", "2417"), ("5", "", "2417"), ("5", "77", "")] {
            let err = NextStopsRequest::new(line, at(12, 15), TourType::Scheduled, tour, hafas)
                .to_query()
                .unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn journey_info_without_station() {
        let query = JourneyInfoRequest::new()
            .with_departure_time("1577836800000")
            .to_query()
            .unwrap();
        assert_eq!(query.encode(), "departureTime=1577836800000");

        assert!(JourneyInfoRequest::new().to_query().unwrap().is_empty());
    }

    #[test]
    fn journey_info_with_station() {
        let query = JourneyInfoRequest::new()
            .with_hafas_id("2417")
            .with_departure_time("1577836800000")
            .with_poles(["1", "2"])
            .to_query()
            .unwrap();
        assert_eq!(
            query.encode(),
            "hafasID=2417&departureTime=1577836800000&poles=1,2"
        );

        let query = JourneyInfoRequest::new()
            .with_hafas_id("2417")
            .to_query()
            .unwrap();
        assert_eq!(query.encode(), "hafasID=2417");
    }

    #[test]
    fn journey_info_poles_need_station() {
        let err = JourneyInfoRequest::new()
            .with_poles(["1"])
            .to_query()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn journey_info_rejects_malformed_departure_time() {
        let err = JourneyInfoRequest::new()
            .with_departure_time("tomorrow")
            .to_query()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn poles_containing_separator_are_rejected() {
        let err = StationMonitorRequest::new("2417", at(8, 0))
            .with_poles(["A,B"])
            .to_query()
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = JourneyInfoRequest::new()
            .with_hafas_id("2417")
            .with_poles(["1", "2,3"])
            .to_query()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn lines_are_semicolon_joined() {
        assert_eq!(lines_query(&["1", "5", "45"]).unwrap(), "1;5;45");
        let none: [&str; 0] = [];
        assert!(lines_query(&none).unwrap_err().is_invalid_argument());
    }
}
