//! Outbound shot messages (client → interface).

use serde_json::{Map, Value, json};

use crate::codec;
use crate::protocol::{DEVICE, PROTOCOL, UNITS};

/// Optional shot parameters.
///
/// The interface treats presence and absence of these fields differently
/// from their value, so they are only transmitted when supplied — and, as
/// the interface's reference implementation does, a supplied value of
/// exactly 0 is treated as "not supplied" and suppressed. `drag` is the
/// exception: it is always transmitted, computed from the boost
/// configuration when the caller leaves it out, and a zero drag is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotOptions {
    /// Club head speed (MPH).
    pub clubspeed: Option<f64>,
    /// Club face angle (deg); positive is closed.
    pub clubface: Option<f64>,
    /// Club path (deg); positive is out-to-in.
    pub clubpath: Option<f64>,
    /// Sweet spot offset.
    pub sweetspot: Option<f64>,
    /// Drag coefficient override.
    pub drag: Option<f64>,
    /// Carry distance.
    pub carry: Option<f64>,
}

/// A single outbound shot. Transient: built, encoded, sent, discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    /// Shot counter, also sent as the shot number. Strictly increasing
    /// across the lifetime of one client.
    pub counter: u64,
    /// Ball speed (MPH).
    pub ballspeed: f64,
    /// Ball path (deg).
    pub ballpath: f64,
    /// Launch angle (deg).
    pub launchangle: f64,
    /// Backspin (RPM).
    pub backspin: f64,
    /// Sidespin (RPM); negative is draw spin.
    pub sidespin: f64,
    pub clubspeed: Option<f64>,
    pub clubface: Option<f64>,
    pub clubpath: Option<f64>,
    pub sweetspot: Option<f64>,
    pub drag: Option<f64>,
    pub carry: Option<f64>,
}

impl ShotRecord {
    /// Encode as a compact wire message, no trailing whitespace or
    /// delimiter. All numeric values go out as decimal strings.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Map::new();
        let counter = self.counter.to_string();
        data.insert("counter".into(), Value::String(counter.clone()));
        data.insert("shotnumber".into(), Value::String(counter));
        data.insert("ballspeed".into(), codec::wire_number(self.ballspeed));
        data.insert("ballpath".into(), codec::wire_number(self.ballpath));
        data.insert("launchangle".into(), codec::wire_number(self.launchangle));
        data.insert("backspin".into(), codec::wire_number(self.backspin));
        data.insert("sidespin".into(), codec::wire_number(self.sidespin));

        for (key, value) in [
            ("clubspeed", self.clubspeed),
            ("clubface", self.clubface),
            ("clubpath", self.clubpath),
            ("sweetspot", self.sweetspot),
        ] {
            if let Some(v) = value
                && v != 0.0
            {
                data.insert(key.into(), codec::wire_number(v));
            }
        }
        // Zero drag is meaningful and not suppressed.
        if let Some(drag) = self.drag {
            data.insert("drag".into(), codec::wire_number(drag));
        }
        if let Some(carry) = self.carry
            && carry != 0.0
        {
            data.insert("carry".into(), codec::wire_number(carry));
        }

        let message = json!({
            "protocol": PROTOCOL,
            "info": { "device": DEVICE, "units": UNITS },
            "data": data,
        });
        message.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_shot() -> ShotRecord {
        ShotRecord {
            counter: 2,
            ballspeed: 100.0,
            ballpath: 2.0,
            launchangle: 12.0,
            backspin: 4000.0,
            sidespin: -200.0,
            clubspeed: None,
            clubface: None,
            clubpath: None,
            sweetspot: None,
            drag: Some(1.0),
            carry: None,
        }
    }

    fn data_of(wire: &[u8]) -> Map<String, Value> {
        let value: Value = serde_json::from_slice(wire).unwrap();
        value["data"].as_object().unwrap().clone()
    }

    #[test]
    fn minimal_shot_key_set() {
        let wire = minimal_shot().encode();
        let data = data_of(&wire);
        let mut keys: Vec<&str> = data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "backspin", "ballpath", "ballspeed", "counter", "drag",
                "launchangle", "shotnumber", "sidespin",
            ],
        );
    }

    #[test]
    fn envelope_is_fixed() {
        let value: Value = serde_json::from_slice(&minimal_shot().encode()).unwrap();
        assert_eq!(value["protocol"], "PROTEE");
        assert_eq!(value["info"]["device"], "EXT");
        assert_eq!(value["info"]["units"], "MPH");
    }

    #[test]
    fn all_numbers_are_strings() {
        let data = data_of(&minimal_shot().encode());
        assert!(data.values().all(Value::is_string));
        assert_eq!(data["counter"], "2");
        assert_eq!(data["shotnumber"], "2");
        assert_eq!(data["ballspeed"], "100");
        assert_eq!(data["sidespin"], "-200");
    }

    #[test]
    fn no_insignificant_whitespace() {
        let wire = minimal_shot().encode();
        let text = std::str::from_utf8(&wire).unwrap();
        assert!(!text.contains(": "));
        assert!(!text.contains(", "));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn supplied_optionals_are_sent() {
        let shot = ShotRecord {
            clubspeed: Some(90.5),
            clubface: Some(-4.45),
            carry: Some(180.0),
            ..minimal_shot()
        };
        let data = data_of(&shot.encode());
        assert_eq!(data["clubspeed"], "90.5");
        assert_eq!(data["clubface"], "-4.45");
        assert_eq!(data["carry"], "180");
        assert!(!data.contains_key("clubpath"));
        assert!(!data.contains_key("sweetspot"));
    }

    #[test]
    fn zero_optional_is_suppressed() {
        let shot = ShotRecord {
            clubspeed: Some(0.0),
            sweetspot: Some(0.0),
            carry: Some(0.0),
            ..minimal_shot()
        };
        let data = data_of(&shot.encode());
        assert!(!data.contains_key("clubspeed"));
        assert!(!data.contains_key("sweetspot"));
        assert!(!data.contains_key("carry"));
    }

    #[test]
    fn zero_drag_is_kept() {
        let shot = ShotRecord { drag: Some(0.0), ..minimal_shot() };
        assert_eq!(data_of(&shot.encode())["drag"], "0");
    }

    #[test]
    fn round_trip_recovers_required_values() {
        // Feed the emitted bytes back through a decoder and compare the
        // required fields, modulo string/float representation.
        let shot = minimal_shot();
        let data = data_of(&shot.encode());
        let field = |key: &str| data[key].as_str().unwrap().parse::<f64>().unwrap();
        assert_eq!(field("ballspeed"), shot.ballspeed);
        assert_eq!(field("ballpath"), shot.ballpath);
        assert_eq!(field("launchangle"), shot.launchangle);
        assert_eq!(field("backspin"), shot.backspin);
        assert_eq!(field("sidespin"), shot.sidespin);
        assert_eq!(data["counter"].as_str().unwrap().parse::<u64>().unwrap(), shot.counter);
    }
}
