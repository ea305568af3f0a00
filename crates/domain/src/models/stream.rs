//! Live sensor stream wire messages.
//!
//! Every frame is a JSON object discriminated by a `type` field:
//!
//! | `type` | Direction | Payload |
//! |---|---|---|
//! | `connected` | server → client | `message` |
//! | `heartRate` | server → client | [`HeartRateSample`] |
//! | `gps` | server → client | [`GpsSample`] |
//! | `accelerometer` | server → client | [`AccelerometerSample`] |
//! | `ecg` | server → client | [`EcgSample`] |
//! | `status` | server → client | `message` |
//! | `error` | server → client | `message` |
//!
//! Clients send `{"command": "startMonitoring" | "stopMonitoring"}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heart rate tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSample {
    pub heart_rate: i32,
    #[serde(default)]
    pub signal_quality: i32,
    pub timestamp: DateTime<Utc>,
}

/// GPS tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsSample {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
    pub accuracy: i32,
    pub speed: i32,
    pub timestamp: DateTime<Utc>,
}

impl GpsSample {
    /// Formats a coordinate as degrees with a hemisphere letter, e.g. `40.712800° N`.
    pub fn format_coordinate(value: f64, is_longitude: bool) -> String {
        let direction = match (is_longitude, value >= 0.0) {
            (true, true) => 'E',
            (true, false) => 'W',
            (false, true) => 'N',
            (false, false) => 'S',
        };
        format!("{:.6}° {}", value.abs(), direction)
    }
}

/// Accelerometer/gyroscope tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerometerSample {
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
}

impl AccelerometerSample {
    /// Magnitude of the acceleration vector.
    pub fn acceleration_magnitude(&self) -> f64 {
        (self.accel_x.powi(2) + self.accel_y.powi(2) + self.accel_z.powi(2)).sqrt()
    }

    /// Magnitude of the angular velocity vector.
    pub fn gyroscope_magnitude(&self) -> f64 {
        (self.gyro_x.powi(2) + self.gyro_y.powi(2) + self.gyro_z.powi(2)).sqrt()
    }
}

/// ECG waveform tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcgSample {
    pub amplitude: f64,
    pub timestamp: DateTime<Utc>,
    pub cycle_position: f64,
}

/// Free-text payload of `connected`, `status` and `error` frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Server → client frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    Connected(Notice),
    HeartRate(HeartRateSample),
    Gps(GpsSample),
    Accelerometer(AccelerometerSample),
    Ecg(EcgSample),
    Status(Notice),
    Error(Notice),
}

impl StreamMessage {
    /// Greeting sent once per connection before any sensor frame.
    pub fn connected() -> Self {
        StreamMessage::Connected(Notice::new("All sensors connected"))
    }

    /// The `type` tag, also used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamMessage::Connected(_) => "connected",
            StreamMessage::HeartRate(_) => "heartRate",
            StreamMessage::Gps(_) => "gps",
            StreamMessage::Accelerometer(_) => "accelerometer",
            StreamMessage::Ecg(_) => "ecg",
            StreamMessage::Status(_) => "status",
            StreamMessage::Error(_) => "error",
        }
    }
}

/// Client → server command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    StartMonitoring,
    StopMonitoring,
    Unknown,
}

impl ClientCommand {
    /// Parses a text frame. Anything that is valid JSON but not a known
    /// command (including a missing `command` field) is `Unknown`. A JSON
    /// `null` carries no command at all and is rejected like malformed text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.is_null() {
            return Err(serde::de::Error::custom("command frame is null"));
        }
        let command = value.get("command").and_then(|c| c.as_str());
        Ok(match command {
            Some("startMonitoring") => ClientCommand::StartMonitoring,
            Some("stopMonitoring") => ClientCommand::StopMonitoring,
            _ => ClientCommand::Unknown,
        })
    }

    /// The acknowledgement sent back for this command.
    ///
    /// Commands are acknowledged only; the sensor producers keep running.
    pub fn reply(self) -> StreamMessage {
        match self {
            ClientCommand::StartMonitoring => {
                StreamMessage::Status(Notice::new("Monitoring started"))
            }
            ClientCommand::StopMonitoring => {
                StreamMessage::Status(Notice::new("Monitoring stopped"))
            }
            ClientCommand::Unknown => StreamMessage::Error(Notice::new("Unknown command")),
        }
    }
}
