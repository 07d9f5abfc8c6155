use serde::{Deserialize, Serialize};

/// One raw location sample as delivered by the device location stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Radius of uncertainty in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl GpsFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            timestamp,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Altitude used for elevation math; a fix without one counts as sea level.
    pub fn elevation(&self) -> f64 {
        self.altitude.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub uri: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_fix_with_optional_fields() {
        let full: GpsFix = serde_json::from_str(
            r#"{ "latitude": 46.5, "longitude": 7.9, "altitude": 1210.5, "accuracy": 4.0, "timestamp": 1000 }"#,
        )
        .unwrap();
        assert_eq!(
            full,
            GpsFix::new(46.5, 7.9, 1000)
                .with_altitude(1210.5)
                .with_accuracy(4.0)
        );

        let bare: GpsFix =
            serde_json::from_str(r#"{ "latitude": 46.5, "longitude": 7.9, "timestamp": 2000 }"#)
                .unwrap();
        assert_eq!(bare.altitude, None);
        assert_eq!(bare.accuracy, None);
        assert_eq!(bare.elevation(), 0.0);
    }
}
