use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

/// Where the simulation waits out its fixed delays.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Real wall-clock pacing on the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Skips every delay but remembers how long it would have waited.
#[derive(Default)]
pub struct InstantPacer {
    waited: Mutex<Duration>,
    pauses: Mutex<usize>,
}

impl InstantPacer {
    pub fn waited(&self) -> Duration {
        self.waited.lock().map(|waited| *waited).unwrap_or_default()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.lock().map(|pauses| *pauses).unwrap_or_default()
    }
}

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, delay: Duration) {
        if let Ok(mut waited) = self.waited.lock() {
            *waited += delay;
        }
        if let Ok(mut pauses) = self.pauses.lock() {
            *pauses += 1;
        }
    }
}
