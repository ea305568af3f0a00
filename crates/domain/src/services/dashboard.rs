//! Dashboard client state.
//!
//! Consumes the multiplexed sensor stream and keeps what the live dashboard
//! renders: the latest value per sensor, bounded rolling buffers for the
//! heart rate and ECG charts, and a recency-weighted average.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use shared::numeric::round_half_up;

use crate::models::{AccelerometerSample, EcgSample, GpsSample, HeartRateSample, StreamMessage};

/// Number of points on the live heart rate chart.
pub const REALTIME_WINDOW: usize = 20;

/// ECG samples kept for the waveform chart (5 s at 50 Hz).
pub const ECG_WINDOW: usize = 250;

/// Amplitude (mV) above which an ECG sample is part of an R wave.
pub const R_PEAK_THRESHOLD: f64 = 0.8;

const ECG_MIN_SAMPLES: usize = 10;

/// Whether the stream is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// One point on the live heart rate chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time: DateTime<Utc>,
    pub heart_rate: i32,
}

/// Client-side view of one sensor stream connection.
#[derive(Debug, Clone)]
pub struct DashboardState {
    connection: ConnectionState,
    current_heart_rate: i32,
    average_heart_rate: i32,
    signal_quality: i32,
    last_update: Option<DateTime<Utc>>,
    realtime: VecDeque<ChartPoint>,
    gps: Option<GpsSample>,
    accelerometer: Option<AccelerometerSample>,
    ecg: VecDeque<EcgSample>,
    last_status: Option<String>,
    last_error: Option<String>,
}

impl DashboardState {
    /// Creates a disconnected state whose chart is seeded with zero-valued
    /// placeholders one second apart, the last one at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        let realtime = (0..REALTIME_WINDOW as i64)
            .rev()
            .map(|seconds_ago| ChartPoint {
                time: now - Duration::seconds(seconds_ago),
                heart_rate: 0,
            })
            .collect();

        Self {
            connection: ConnectionState::Disconnected,
            current_heart_rate: 0,
            average_heart_rate: 0,
            signal_quality: 0,
            last_update: None,
            realtime,
            gps: None,
            accelerometer: None,
            ecg: VecDeque::with_capacity(ECG_WINDOW),
            last_status: None,
            last_error: None,
        }
    }

    pub fn on_open(&mut self) {
        self.connection = ConnectionState::Connected;
    }

    pub fn on_close(&mut self) {
        self.connection = ConnectionState::Disconnected;
    }

    pub fn on_error(&mut self) {
        self.connection = ConnectionState::Disconnected;
    }

    /// Handles a raw text frame. Frames that are not valid JSON or carry an
    /// unrecognized `type` are ignored. Returns the kind that was applied.
    pub fn handle_frame(&mut self, text: &str, received_at: DateTime<Utc>) -> Option<&'static str> {
        match serde_json::from_str::<StreamMessage>(text) {
            Ok(message) => {
                let kind = message.kind();
                self.apply(message, received_at);
                Some(kind)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unrecognized stream frame");
                None
            }
        }
    }

    /// Applies a decoded message.
    pub fn apply(&mut self, message: StreamMessage, received_at: DateTime<Utc>) {
        match message {
            StreamMessage::HeartRate(sample) => self.apply_heart_rate(sample, received_at),
            StreamMessage::Gps(sample) => self.gps = Some(sample),
            StreamMessage::Accelerometer(sample) => self.accelerometer = Some(sample),
            StreamMessage::Ecg(sample) => {
                if self.ecg.len() == ECG_WINDOW {
                    self.ecg.pop_front();
                }
                self.ecg.push_back(sample);
            }
            StreamMessage::Connected(notice) | StreamMessage::Status(notice) => {
                self.last_status = Some(notice.message)
            }
            StreamMessage::Error(notice) => self.last_error = Some(notice.message),
        }
    }

    fn apply_heart_rate(&mut self, sample: HeartRateSample, received_at: DateTime<Utc>) {
        self.current_heart_rate = sample.heart_rate;
        self.signal_quality = sample.signal_quality;
        self.last_update = Some(received_at);

        if self.realtime.len() == REALTIME_WINDOW {
            self.realtime.pop_front();
        }
        self.realtime.push_back(ChartPoint {
            time: received_at,
            heart_rate: sample.heart_rate,
        });

        self.average_heart_rate = blend_average(self.average_heart_rate, sample.heart_rate);
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn current_heart_rate(&self) -> i32 {
        self.current_heart_rate
    }

    pub fn average_heart_rate(&self) -> i32 {
        self.average_heart_rate
    }

    pub fn signal_quality(&self) -> i32 {
        self.signal_quality
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn realtime_points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.realtime.iter()
    }

    pub fn gps(&self) -> Option<&GpsSample> {
        self.gps.as_ref()
    }

    pub fn accelerometer(&self) -> Option<&AccelerometerSample> {
        self.accelerometer.as_ref()
    }

    pub fn ecg_samples(&self) -> impl Iterator<Item = &EcgSample> {
        self.ecg.iter()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Heart rate estimated from the spacing of the last two R peaks in the
    /// ECG buffer. 0 when there is not enough data.
    ///
    /// A peak is counted once, at the first sample of a run above the
    /// threshold, so consecutive samples of one R wave are not mistaken for
    /// separate beats.
    pub fn ecg_bpm(&self) -> i32 {
        if self.ecg.len() < ECG_MIN_SAMPLES {
            return 0;
        }

        let mut peaks = Vec::new();
        let mut above = false;
        for sample in &self.ecg {
            let is_peak = sample.amplitude > R_PEAK_THRESHOLD;
            if is_peak && !above {
                peaks.push(sample.timestamp);
            }
            above = is_peak;
        }

        let [.., previous, last] = peaks.as_slice() else {
            return 0;
        };
        let seconds = (*last - *previous).num_milliseconds() as f64 / 1000.0;
        if seconds > 0.0 {
            round_half_up(60.0 / seconds) as i32
        } else {
            0
        }
    }

    /// Largest amplitude in the ECG buffer.
    pub fn ecg_max_amplitude(&self) -> Option<f64> {
        self.ecg.iter().map(|s| s.amplitude).reduce(f64::max)
    }
}

/// Recency-weighted running blend: the first sample seeds the average, each
/// later sample is averaged with the previous value.
pub fn blend_average(previous: i32, sample: i32) -> i32 {
    if previous == 0 {
        sample
    } else {
        round_half_up(f64::from(previous + sample) / 2.0) as i32
    }
}
