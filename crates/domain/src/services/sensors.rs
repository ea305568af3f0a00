//! Simulated sensor sources.
//!
//! Each generator produces one tick of a synthetic sensor: an AD8232 heart
//! rate front end, a GPS module, an MPU-6050 motion sensor and an ECG lead.
//! Randomness is injected so tests can use a seeded generator.

use chrono::{DateTime, Utc};
use rand::Rng;
use shared::numeric::{round_half_up, round_to};

use crate::models::{AccelerometerSample, EcgSample, GpsSample, HeartRateSample};

/// Resting heart rate the simulators are centred on.
pub const BASE_HEART_RATE: f64 = 72.0;

const HEART_RATE_MIN: f64 = 50.0;
const HEART_RATE_MAX: f64 = 150.0;

/// Base coordinate (New York City) the GPS fix jitters around.
pub const BASE_LATITUDE: f64 = 40.7128;
pub const BASE_LONGITUDE: f64 = -74.0060;
const GPS_JITTER_DEGREES: f64 = 0.0005;

const GRAVITY: f64 = 9.8;
const BODY_TEMPERATURE: f64 = 36.5;

fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    rng.gen_range(-half_width..half_width)
}

/// Heart rate: 72 BPM ± 10 clamped to [50, 150], signal quality in [85, 100].
pub fn heart_rate_sample<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> HeartRateSample {
    let heart_rate = round_half_up(BASE_HEART_RATE + jitter(rng, 10.0))
        .clamp(HEART_RATE_MIN, HEART_RATE_MAX) as i32;
    let signal_quality = round_half_up(85.0 + rng.gen_range(0.0..15.0)) as i32;

    HeartRateSample {
        heart_rate,
        signal_quality,
        timestamp: at,
    }
}

/// Near-stationary GPS fix around the base coordinate.
pub fn gps_sample<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> GpsSample {
    GpsSample {
        latitude: BASE_LATITUDE + jitter(rng, GPS_JITTER_DEGREES),
        longitude: BASE_LONGITUDE + jitter(rng, GPS_JITTER_DEGREES),
        altitude: round_half_up(10.0 + rng.gen_range(0.0..5.0)) as i32,
        accuracy: round_half_up(3.0 + rng.gen_range(0.0..2.0)) as i32,
        speed: round_half_up(rng.gen_range(0.0..5.0)) as i32,
        timestamp: at,
    }
}

/// Motion sample: ±1 g on X/Y, gravity on Z, ±25 °/s gyro, skin temperature.
pub fn accelerometer_sample<R: Rng + ?Sized>(
    rng: &mut R,
    at: DateTime<Utc>,
) -> AccelerometerSample {
    AccelerometerSample {
        accel_x: round_to(jitter(rng, 1.0), 2),
        accel_y: round_to(jitter(rng, 1.0), 2),
        accel_z: round_to(GRAVITY + jitter(rng, 0.25), 2),
        gyro_x: round_to(jitter(rng, 25.0), 2),
        gyro_y: round_to(jitter(rng, 25.0), 2),
        gyro_z: round_to(jitter(rng, 25.0), 2),
        temperature: round_to(BODY_TEMPERATURE + jitter(rng, 1.0), 1),
        timestamp: at,
    }
}

/// Length of one cardiac cycle at the base rate, in seconds.
pub fn cardiac_period() -> f64 {
    60.0 / BASE_HEART_RATE
}

/// Position within the current cardiac cycle, in [0, 1).
///
/// Derived from wall-clock time only, so the waveform is continuous across
/// reconnects.
pub fn cycle_position(at: DateTime<Utc>) -> f64 {
    let period = cardiac_period();
    let seconds = at.timestamp_millis() as f64 / 1000.0;
    seconds.rem_euclid(period) / period
}

/// Noise-free ECG amplitude (mV) at a cycle position.
///
/// Half-sine P wave on [0, 0.10), QRS complex on [0.15, 0.25) and half-sine
/// T wave on [0.4, 0.7).
pub fn ecg_waveform(cycle_position: f64) -> f64 {
    use std::f64::consts::PI;

    let c = cycle_position;
    let mut amplitude = 0.0;

    if (0.0..0.10).contains(&c) {
        let p = c / 0.10;
        amplitude += 0.25 * (PI * p).sin();
    }

    if (0.15..0.25).contains(&c) {
        let q = (c - 0.15) / 0.10;
        if q < 0.3 {
            amplitude -= 0.3;
        } else if q < 0.7 {
            amplitude += 1.5 * (PI * (q - 0.3) / 0.4).sin();
        } else {
            amplitude -= 0.4;
        }
    }

    if (0.4..0.7).contains(&c) {
        let t = (c - 0.4) / 0.3;
        amplitude += 0.3 * (PI * t).sin();
    }

    amplitude
}

/// ECG tick: waveform at the current cycle position plus ±0.025 mV noise.
pub fn ecg_sample<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> EcgSample {
    let position = cycle_position(at);
    let amplitude = ecg_waveform(position) + jitter(rng, 0.025);

    EcgSample {
        amplitude: round_to(amplitude, 3),
        timestamp: at,
        cycle_position: round_to(position, 3),
    }
}
