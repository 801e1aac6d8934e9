//! Point-in-time query parsing helpers.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

/// Resolve the optional `at` query parameter that report and transaction date ranges are measured
/// from.
///
/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date, read as midnight UTC. Missing means
/// now.
pub(crate) trait PointInTimeExt {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        self.into_inner()
            .as_deref()
            .map(parse_point_in_time)
            .transpose()
            .map(|point_in_time| point_in_time.unwrap_or_else(Timestamp::now))
    }
}

fn parse_point_in_time(value: &str) -> Result<Timestamp, StatusError> {
    let value = value.trim();

    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    value
        .parse::<Date>()
        .and_then(|date| date.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .or_400("could not parse \"at\" query parameter")
}
