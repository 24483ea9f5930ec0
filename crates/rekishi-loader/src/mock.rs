//! Mock dataset source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::source::DatasetSource;

struct Scripted {
    delay: Duration,
    outcome: Result<String, String>,
}

/// A scripted source for exercising loaders without files or a network.
///
/// Each fetch consumes the next scripted response (waiting its delay first);
/// once the script is exhausted every fetch returns the default body.
pub struct MockSource {
    script: Mutex<VecDeque<Scripted>>,
    default_body: String,
    call_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns `body` immediately.
    pub fn with_fixed_body(body: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_body: body.to_string(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Queue a successful response delivered after `delay`.
    pub fn then_respond(self, delay: Duration, body: &str) -> Self {
        self.push(delay, Ok(body.to_string()))
    }

    /// Queue a network failure delivered after `delay`.
    pub fn then_fail(self, delay: Duration, message: &str) -> Self {
        self.push(delay, Err(message.to_string()))
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn push(self, delay: Duration, outcome: Result<String, String>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted { delay, outcome });
        self
    }
}

#[async_trait]
impl DatasetSource for MockSource {
    fn location(&self) -> String {
        "mock://dataset".to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Scripted { delay, outcome }) => {
                tokio::time::sleep(delay).await;
                outcome.map_err(LoadError::Network)
            }
            None => Ok(self.default_body.clone()),
        }
    }
}
