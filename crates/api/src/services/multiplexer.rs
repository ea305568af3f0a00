//! Per-connection sensor stream producers.
//!
//! Four producers tick on their own intervals and push messages into a
//! bounded outbound queue. The heart rate producer also persists every
//! reading it sends against the connection's patient.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::models::{NewHeartRateReading, StreamMessage};
use domain::services::sensors;
use persistence::VitalsStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::config::StreamConfig;
use crate::middleware::metrics::{record_stream_message_dropped, record_stream_message_sent};

/// Result of a non-blocking send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// The queue was full and the message was discarded.
    Dropped,
    /// The connection's writer is gone.
    Closed,
}

/// Sending half of a connection's outbound queue.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::Sender<StreamMessage>,
}

impl Outbox {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<StreamMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queues a message without waiting.
    pub fn send(&self, message: StreamMessage) -> SendOutcome {
        let kind = message.kind();
        match self.tx.try_send(message) {
            Ok(()) => {
                record_stream_message_sent(kind);
                SendOutcome::Sent
            }
            Err(TrySendError::Full(_)) => {
                record_stream_message_dropped(kind);
                SendOutcome::Dropped
            }
            Err(TrySendError::Closed(_)) => SendOutcome::Closed,
        }
    }
}

/// Tick periods for the four producers.
#[derive(Debug, Clone, Copy)]
pub struct Intervals {
    pub heart_rate: Duration,
    pub gps: Duration,
    pub accelerometer: Duration,
    pub ecg: Duration,
}

impl From<&StreamConfig> for Intervals {
    fn from(config: &StreamConfig) -> Self {
        Self {
            heart_rate: config.heart_rate_interval(),
            gps: config.gps_interval(),
            accelerometer: config.accelerometer_interval(),
            ecg: config.ecg_interval(),
        }
    }
}

/// The producers of one connection, cancelled together.
pub struct ProducerGroup {
    tasks: JoinSet<()>,
}

impl ProducerGroup {
    /// Starts all four producers. Heart rate readings are persisted only
    /// when a patient is given.
    pub fn spawn(
        store: Arc<dyn VitalsStore>,
        patient_id: Option<Uuid>,
        outbox: Outbox,
        intervals: Intervals,
    ) -> Self {
        let mut tasks = JoinSet::new();

        tasks.spawn(heart_rate_loop(
            intervals.heart_rate,
            outbox.clone(),
            store,
            patient_id,
        ));
        tasks.spawn(sample_loop(intervals.gps, outbox.clone(), |rng, at| {
            StreamMessage::Gps(sensors::gps_sample(rng, at))
        }));
        tasks.spawn(sample_loop(
            intervals.accelerometer,
            outbox.clone(),
            |rng, at| StreamMessage::Accelerometer(sensors::accelerometer_sample(rng, at)),
        ));
        tasks.spawn(sample_loop(intervals.ecg, outbox, |rng, at| {
            StreamMessage::Ecg(sensors::ecg_sample(rng, at))
        }));

        Self { tasks }
    }

    /// Cancels every producer and waits until none is running.
    pub async fn shutdown(mut self) {
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn sample_loop(
    period: Duration,
    outbox: Outbox,
    generate: fn(&mut StdRng, DateTime<Utc>) -> StreamMessage,
) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = ticker(period);

    loop {
        ticker.tick().await;
        if outbox.send(generate(&mut rng, Utc::now())) == SendOutcome::Closed {
            return;
        }
    }
}

async fn heart_rate_loop(
    period: Duration,
    outbox: Outbox,
    store: Arc<dyn VitalsStore>,
    patient_id: Option<Uuid>,
) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = ticker(period);

    loop {
        ticker.tick().await;
        let sample = sensors::heart_rate_sample(&mut rng, Utc::now());

        if outbox.send(StreamMessage::HeartRate(sample.clone())) == SendOutcome::Closed {
            return;
        }

        let Some(patient_id) = patient_id else {
            continue;
        };
        let reading = NewHeartRateReading {
            patient_id: Some(patient_id),
            heart_rate: sample.heart_rate,
            signal_quality: Some(f64::from(sample.signal_quality)),
        };
        if let Err(e) = store.create_heart_rate_reading(reading).await {
            tracing::error!(%patient_id, error = %e, "Failed to persist streamed heart rate");
        }
    }
}
