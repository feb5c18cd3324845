//! The two timestamp variants used on the wire.
//!
//! [`TimePointSec`] is the block-header style 4-byte Unix-seconds
//! stamp with an ISO-like JSON form; [`TimePoint`] is the 8-byte
//! nanosecond stamp whose JSON form is a decimal nanosecond string.
//!
//! The calendar math is the standard days-from-civil arithmetic — the
//! stack carries no date crate, and two fixed-format conversions do
//! not justify one.

use std::fmt;
use std::str::FromStr;

use chainwire_codec::{CodecError, Decoder, Encoder, WireDecode, WireEncode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SECS_PER_DAY: i64 = 86_400;

/// Gregorian date → days since 1970-01-01.
fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = y - i64::from(m <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = if m > 2 { m - 3 } else { m + 9 } as u64;
    let doy = (153 * mp + 2) / 5 + u64::from(d) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe as i64 - 719_468
}

/// Days since 1970-01-01 → Gregorian (year, month, day).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (y + i64::from(m <= 2), m, d)
}

// ---------------------------------------------------------------------------
// TimePointSec — 4-byte Unix seconds
// ---------------------------------------------------------------------------

/// Seconds since the Unix epoch, 4 bytes on the wire.
///
/// JSON form: `"YYYY-MM-DDTHH:MM:SS"` (UTC, no zone suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TimePointSec(pub u32);

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = i64::from(self.0);
        let (y, mo, d) = civil_from_days(secs.div_euclid(SECS_PER_DAY));
        let tod = secs.rem_euclid(SECS_PER_DAY);
        write!(
            f,
            "{y:04}-{mo:02}-{d:02}T{:02}:{:02}:{:02}",
            tod / 3600,
            (tod % 3600) / 60,
            tod % 60,
        )
    }
}

impl FromStr for TimePointSec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || {
            CodecError::InvalidFormat(format!(
                "invalid timestamp \"{s}\", expected YYYY-MM-DDTHH:MM:SS"
            ))
        };
        let (date, time) = s.split_once('T').ok_or_else(bad)?;

        let mut date_parts = date.splitn(3, '-');
        let mut time_parts = time.splitn(3, ':');
        let mut next_num = |it: &mut dyn Iterator<Item = &str>| {
            it.next().and_then(|p| p.parse::<i64>().ok()).ok_or_else(|| bad())
        };

        let y = next_num(&mut date_parts)?;
        let mo = next_num(&mut date_parts)?;
        let d = next_num(&mut date_parts)?;
        let h = next_num(&mut time_parts)?;
        let mi = next_num(&mut time_parts)?;
        let sec = next_num(&mut time_parts)?;

        // u32 seconds cover 1970-01-01 through 2106-02-07. Bounding
        // the year here also keeps the calendar math below inside
        // i64 for arbitrary parsed input.
        if !(1970..=2106).contains(&y)
            || !(1..=12).contains(&mo)
            || !(1..=31).contains(&d)
            || !(0..24).contains(&h)
            || !(0..60).contains(&mi)
            || !(0..60).contains(&sec)
        {
            return Err(bad());
        }

        let days = days_from_civil(y, mo as u32, d as u32);
        let secs = days * SECS_PER_DAY + h * 3600 + mi * 60 + sec;
        u32::try_from(secs).map(TimePointSec).map_err(|_| bad())
    }
}

impl WireEncode for TimePointSec {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_u32(self.0);
        Ok(())
    }
}

impl WireDecode for TimePointSec {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TimePointSec(dec.read_u32()?))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TimePoint — 8-byte Unix nanoseconds
// ---------------------------------------------------------------------------

/// Nanoseconds since the Unix epoch, 8 bytes on the wire.
///
/// JSON form: the nanosecond count as a decimal string (a bare JSON
/// integer is also accepted on input — both shapes exist in the wild).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TimePoint(pub i64);

impl TimePoint {
    /// Builds a stamp from whole seconds.
    pub fn from_unix_seconds(secs: i64) -> Self {
        TimePoint(secs * 1_000_000_000)
    }

    /// The stamp truncated to whole seconds.
    pub fn as_unix_seconds(self) -> i64 {
        self.0.div_euclid(1_000_000_000)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl WireEncode for TimePoint {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_i64(self.0);
        Ok(())
    }
}

impl WireDecode for TimePoint {
    const FIXED_SIZE: Option<usize> = Some(8);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TimePoint(dec.read_i64()?))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NanosRepr {
            Num(i64),
            Text(String),
        }

        match NanosRepr::deserialize(deserializer)? {
            NanosRepr::Num(n) => Ok(TimePoint(n)),
            NanosRepr::Text(s) => s
                .parse::<i64>()
                .map(TimePoint)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_codec::{decode_exact, encode_to_vec};

    #[test]
    fn test_epoch_formats_correctly() {
        assert_eq!(TimePointSec(0).to_string(), "1970-01-01T00:00:00");
    }

    #[test]
    fn test_known_timestamp_formats_correctly() {
        // 2018-06-01T12:00:00 UTC = 1527854400.
        assert_eq!(
            TimePointSec(1_527_854_400).to_string(),
            "2018-06-01T12:00:00"
        );
    }

    #[test]
    fn test_parse_round_trips_display() {
        for s in [
            "1970-01-01T00:00:00",
            "2000-02-29T23:59:59",
            "2018-06-01T12:00:00",
            "2106-02-07T06:28:15", // u32::MAX
        ] {
            let t: TimePointSec = s.parse().unwrap();
            assert_eq!(t.to_string(), s, "round trip of {s}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_timestamps() {
        for bad in ["2018-06-01", "12:00:00", "2018-13-01T00:00:00", "junk"] {
            assert!(bad.parse::<TimePointSec>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_rejects_pre_epoch() {
        assert!("1969-12-31T23:59:59".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_window_years() {
        // Grammar-valid strings with years the 4-byte stamp cannot
        // hold must error, including ones big enough to overflow the
        // day arithmetic.
        for bad in [
            "2107-01-01T00:00:00",
            "92233720368547758-01-01T00:00:00",
            "-92233720368547758-01-01T00:00:00",
        ] {
            assert!(matches!(
                bad.parse::<TimePointSec>(),
                Err(CodecError::InvalidFormat(_))
            ));
        }
        // The JSON path reports the same failure as a serde error.
        assert!(serde_json::from_str::<TimePointSec>(
            "\"92233720368547758-01-01T00:00:00\""
        )
        .is_err());
    }

    #[test]
    fn test_time_point_sec_wire_is_4_le_bytes() {
        let t = TimePointSec(0x0102_0304);
        let bytes = encode_to_vec(&t).unwrap();
        assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(decode_exact::<TimePointSec>(&bytes).unwrap(), t);
    }

    #[test]
    fn test_time_point_wire_is_8_le_bytes() {
        let t = TimePoint::from_unix_seconds(1);
        let bytes = encode_to_vec(&t).unwrap();
        assert_eq!(bytes, 1_000_000_000i64.to_le_bytes());
        assert_eq!(decode_exact::<TimePoint>(&bytes).unwrap(), t);
    }

    #[test]
    fn test_time_point_sec_json_is_iso_string() {
        let t = TimePointSec(1_527_854_400);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2018-06-01T12:00:00\"");
        assert_eq!(serde_json::from_str::<TimePointSec>(&json).unwrap(), t);
    }

    #[test]
    fn test_time_point_json_accepts_string_and_integer() {
        let t = TimePoint(1_527_854_400_000_000_000);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"1527854400000000000\"");

        assert_eq!(serde_json::from_str::<TimePoint>(&json).unwrap(), t);
        assert_eq!(
            serde_json::from_str::<TimePoint>("1527854400000000000").unwrap(),
            t
        );
    }
}
