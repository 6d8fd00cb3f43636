//! Inbound game-state telemetry (interface → client).

use serde_json::Value;

use crate::codec;
use crate::error::{Result, WireError};

/// Latest game state pushed by the interface. One record per JSON line.
///
/// Every field is defaulted when the line omits or mistypes it; a record is
/// only rejected for malformed JSON, never for its content. A new record
/// fully replaces the previous one — there is no partial merge.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    /// Selected club, short form (e.g. "DR", "7I", "SW").
    pub club: String,
    /// Distance to the flag, in the simulator's configured units.
    pub distance_to_flag: f64,
    /// Lie surface ("Tee", "Fairway", ...).
    pub surface: String,
    /// Player handedness ("right" / "left").
    pub hand: String,
    pub player_name: String,
    pub course_name: String,
    pub tour_name: String,
}

impl Default for TelemetryRecord {
    fn default() -> Self {
        Self {
            club: "DR".to_string(),
            distance_to_flag: 0.0,
            surface: "Tee".to_string(),
            hand: "right".to_string(),
            player_name: String::new(),
            course_name: String::new(),
            tour_name: String::new(),
        }
    }
}

impl TelemetryRecord {
    /// Decode one JSON line into a fully-defaulted record.
    ///
    /// Fields live under the top-level `data` object; unlisted fields are
    /// ignored. Numeric fields accept both native numbers and decimal
    /// strings.
    pub fn decode(line: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(line).map_err(|e| WireError::json(line, e))?;
        if !value.is_object() {
            return Err(WireError::not_an_object(line));
        }
        let data = value.get("data").and_then(Value::as_object);

        Ok(Self {
            club: codec::get_str(data, "club_small", "DR"),
            distance_to_flag: codec::get_f64(data, "distance_to_flag", 0.0),
            surface: codec::get_str(data, "surface", "Tee"),
            hand: codec::get_str(data, "handed_player", "right"),
            player_name: codec::get_str(data, "playerName", ""),
            course_name: codec::get_str(data, "courseName", ""),
            tour_name: codec::get_str(data, "tourName", ""),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_worked_example() {
        // Partial line from a live capture: absent fields take defaults.
        let rec =
            TelemetryRecord::decode(br#"{"data":{"club_small":"7I","distance_to_flag":"142.5"}}"#)
                .unwrap();
        assert_eq!(rec.club, "7I");
        assert_eq!(rec.distance_to_flag, 142.5);
        assert_eq!(rec.surface, "Tee");
        assert_eq!(rec.hand, "right");
        assert_eq!(rec.player_name, "");
    }

    #[test]
    fn decode_full_record() {
        let line = br#"{"data":{"club_small":"SW","distance_to_flag":34.2,"surface":"Bunker","handed_player":"left","playerName":"Ann","courseName":"Links","tourName":"Sunday"}}"#;
        let rec = TelemetryRecord::decode(line).unwrap();
        assert_eq!(rec.club, "SW");
        assert_eq!(rec.distance_to_flag, 34.2);
        assert_eq!(rec.surface, "Bunker");
        assert_eq!(rec.hand, "left");
        assert_eq!(rec.player_name, "Ann");
        assert_eq!(rec.course_name, "Links");
        assert_eq!(rec.tour_name, "Sunday");
    }

    #[test]
    fn missing_data_object_defaults_everything() {
        let rec = TelemetryRecord::decode(br#"{"status":"ok"}"#).unwrap();
        assert_eq!(rec, TelemetryRecord::default());
    }

    #[test]
    fn bad_field_falls_back_without_dropping_record() {
        let rec = TelemetryRecord::decode(
            br#"{"data":{"club_small":"3W","distance_to_flag":"n/a"}}"#,
        )
        .unwrap();
        assert_eq!(rec.club, "3W");
        assert_eq!(rec.distance_to_flag, 0.0);
    }

    #[test]
    fn unlisted_fields_ignored() {
        let rec = TelemetryRecord::decode(
            br#"{"data":{"club_small":"PT","wind_speed":"12","pin":3}}"#,
        )
        .unwrap();
        assert_eq!(rec.club, "PT");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            TelemetryRecord::decode(b"not json"),
            Err(WireError::Json { .. })
        ));
        assert!(matches!(
            TelemetryRecord::decode(b""),
            Err(WireError::Json { .. })
        ));
    }

    #[test]
    fn non_object_is_an_error() {
        assert!(matches!(
            TelemetryRecord::decode(b"[1,2,3]"),
            Err(WireError::NotAnObject { .. })
        ));
    }
}
