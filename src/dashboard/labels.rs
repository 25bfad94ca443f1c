

use std::fmt::Write;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};


pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";


pub const INVALID_DATE: &str = "Invalid Date";


const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LabelZone {
    Local,
    Utc,
}


/// Turns backend timestamps into short date labels for axes and cards.
///
/// Offset-less date-times are read as wall-clock time in the label zone; bare dates are UTC
/// midnight. Anything unparseable becomes [`INVALID_DATE`] instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabeler {
    format: String,
    zone: LabelZone,
}

impl DateLabeler {
    pub fn new(format: impl Into<String>, zone: LabelZone) -> Self {
        Self {
            format: format.into(),
            zone,
        }
    }

    pub fn utc() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, LabelZone::Utc)
    }

    pub fn zone(&self) -> LabelZone {
        self.zone
    }

    pub fn label(&self, raw: &str) -> String {
        let Some(date) = self.parse(raw.trim()) else {
            return INVALID_DATE.to_string();
        };

        let mut out = String::new();
        match write!(out, "{}", date.format(&self.format)) {
            Ok(()) => out,
            Err(_) => INVALID_DATE.to_string(),
        }
    }

    fn parse(&self, raw: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(match self.zone {
                LabelZone::Utc => dt.with_timezone(&Utc).date_naive(),
                LabelZone::Local => dt.with_timezone(&Local).date_naive(),
            });
        }

        if let Some(dt) = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        {
            return Some(dt.date());
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
            return Some(match self.zone {
                LabelZone::Utc => date,
                LabelZone::Local => midnight.with_timezone(&Local).date_naive(),
            });
        }

        NaiveDate::parse_from_str(raw, &self.format).ok()
    }
}

impl Default for DateLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, LabelZone::Local)
    }
}
