//! Age-adjusted heart rate assessment.

use shared::numeric::round_half_up;

use crate::models::{
    HealthStatus, HeartRateAlert, HeartRateReading, HeartRateZones, Patient, PatientVitals,
};

/// Below this rate a reading is always critical.
pub const LOW_HEART_RATE: i32 = 50;

/// Above this rate a reading is at least elevated.
pub const ELEVATED_HEART_RATE: i32 = 100;

/// Fraction of the age-predicted maximum that marks the danger threshold.
pub const DANGER_FRACTION: f64 = 0.85;

const SAFE_RANGE: &str = "60-100";

/// Age-predicted maximum heart rate (220 - age).
pub fn max_heart_rate(age: i32) -> i32 {
    220 - age
}

/// Heart rate above which the patient is in danger.
pub fn danger_threshold(age: i32) -> f64 {
    f64::from(max_heart_rate(age)) * DANGER_FRACTION
}

/// Classifies a heart rate for a patient of the given age.
///
/// Without an age or a reading (either is 0) the status is unknown.
pub fn assess(heart_rate: i32, age: i32) -> HealthStatus {
    if age == 0 || heart_rate == 0 {
        return HealthStatus::Unknown;
    }

    if f64::from(heart_rate) > danger_threshold(age) || heart_rate < LOW_HEART_RATE {
        HealthStatus::Critical
    } else if heart_rate > ELEVATED_HEART_RATE {
        HealthStatus::Elevated
    } else {
        HealthStatus::Healthy
    }
}

/// Heart rate zones for the given age; generic zones when age is 0.
pub fn zones(age: i32) -> HeartRateZones {
    let resting = "50-70 BPM".to_string();
    let normal = "70-100 BPM".to_string();

    if age == 0 {
        return HeartRateZones {
            resting,
            normal,
            elevated: "100-120 BPM".to_string(),
            danger: "120+ BPM".to_string(),
        };
    }

    let threshold = round_half_up(danger_threshold(age)) as i64;
    HeartRateZones {
        resting,
        normal,
        elevated: format!("100-{} BPM", threshold),
        danger: format!("{}+ BPM", threshold),
    }
}

/// Returns an alert when the heart rate is outside safe limits.
pub fn check_alert(heart_rate: i32, age: i32) -> Option<HeartRateAlert> {
    if age == 0 {
        return None;
    }

    let threshold = danger_threshold(age);
    let high = f64::from(heart_rate) > threshold;
    if !high && heart_rate >= LOW_HEART_RATE {
        return None;
    }

    let direction = if high { "exceeded" } else { "fallen below" };
    Some(HeartRateAlert {
        heart_rate,
        message: format!(
            "The patient's heart rate has {} safe limits ({} BPM). Please check on the patient immediately.",
            direction, heart_rate
        ),
        safe_range: SAFE_RANGE.to_string(),
    })
}

/// Builds the vitals summary for a patient and their latest reading.
pub fn patient_vitals(patient: Patient, latest: Option<HeartRateReading>) -> PatientVitals {
    let heart_rate = latest.as_ref().map(|r| r.heart_rate).unwrap_or(0);
    let status = assess(heart_rate, patient.age);
    let alert = if latest.is_some() {
        check_alert(heart_rate, patient.age)
    } else {
        None
    };

    PatientVitals {
        zones: zones(patient.age),
        status,
        status_label: status.label().to_string(),
        alert,
        latest_heart_rate: latest,
        patient,
    }
}
