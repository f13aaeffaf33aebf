//! A call-recording engine for tests and demos.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use sightline_core::CameraId;

use crate::error::{EngineError, Result};
use crate::traits::DetectionEngine;

/// One recorded boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Start(CameraId),
    Stop,
}

/// In-memory engine that records every call in order.
///
/// Clones share the log, so a test can inspect calls while the lifecycle
/// machinery owns its own handle. Failures can be scripted one call at a
/// time to exercise the fail-closed paths.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    inner: Arc<RwLock<RecordingInner>>,
}

#[derive(Default)]
struct RecordingInner {
    calls: Vec<EngineCall>,
    fail_next_start: bool,
    fail_next_stop: bool,
}

impl RecordingEngine {
    /// Create an engine with an empty call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every boundary call so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.read().unwrap().calls.clone()
    }

    /// Number of `start` calls recorded.
    pub fn start_count(&self) -> usize {
        self.inner
            .read()
            .unwrap()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Start(_)))
            .count()
    }

    /// Number of `stop` calls recorded.
    pub fn stop_count(&self) -> usize {
        self.inner
            .read()
            .unwrap()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Stop))
            .count()
    }

    /// The camera id of the most recent `start`, if any.
    pub fn last_started(&self) -> Option<CameraId> {
        self.inner
            .read()
            .unwrap()
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                EngineCall::Start(id) => Some(id.clone()),
                EngineCall::Stop => None,
            })
    }

    /// Make the next `start` call fail.
    pub fn fail_next_start(&self) {
        self.inner.write().unwrap().fail_next_start = true;
    }

    /// Make the next `stop` call fail.
    pub fn fail_next_stop(&self) {
        self.inner.write().unwrap().fail_next_stop = true;
    }

    /// Check the ordering contract over the recorded log: no second
    /// `start` without an intervening `stop`.
    pub fn starts_are_bracketed(&self) -> bool {
        let mut running = false;
        for call in self.inner.read().unwrap().calls.iter() {
            match call {
                EngineCall::Start(_) => {
                    if running {
                        return false;
                    }
                    running = true;
                }
                EngineCall::Stop => running = false,
            }
        }
        true
    }
}

#[async_trait]
impl DetectionEngine for RecordingEngine {
    async fn start(&self, camera: &CameraId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.calls.push(EngineCall::Start(camera.clone()));
        if inner.fail_next_start {
            inner.fail_next_start = false;
            return Err(EngineError::StartFailed {
                camera: camera.clone(),
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.calls.push(EngineCall::Stop);
        if inner.fail_next_stop {
            inner.fail_next_stop = false;
            return Err(EngineError::StopFailed {
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(id: &str) -> CameraId {
        CameraId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let engine = RecordingEngine::new();

        engine.start(&camera("1")).await.unwrap();
        engine.stop().await.unwrap();

        assert_eq!(
            engine.calls(),
            vec![EngineCall::Start(camera("1")), EngineCall::Stop]
        );
        assert_eq!(engine.start_count(), 1);
        assert_eq!(engine.stop_count(), 1);
        assert_eq!(engine.last_started(), Some(camera("1")));
    }

    #[tokio::test]
    async fn test_scripted_failures_are_one_shot() {
        let engine = RecordingEngine::new();

        engine.fail_next_stop();
        assert!(engine.stop().await.is_err());
        assert!(engine.stop().await.is_ok());

        engine.fail_next_start();
        assert!(engine.start(&camera("0")).await.is_err());
        // Failed calls are still recorded; the boundary was crossed.
        assert_eq!(engine.start_count(), 1);
    }

    #[tokio::test]
    async fn test_bracketing_check() {
        let engine = RecordingEngine::new();
        engine.start(&camera("0")).await.unwrap();
        engine.stop().await.unwrap();
        engine.start(&camera("0")).await.unwrap();
        assert!(engine.starts_are_bracketed());

        engine.start(&camera("0")).await.unwrap();
        assert!(!engine.starts_are_bracketed());
    }
}
