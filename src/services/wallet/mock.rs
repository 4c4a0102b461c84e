//! Mock credential generator for testing
//!
//! Hands out keys from a fixed list, can be told to fail, and records when
//! each generation ran so tests can check that critical sections never
//! overlap.

use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::{CredentialGenerator, GenerationError};
use crate::models::wallet::CredentialPair;

/// Start and end of one generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationWindow {
    pub started: Instant,
    pub finished: Instant,
}

impl GenerationWindow {
    pub fn overlaps(&self, other: &GenerationWindow) -> bool {
        self.started < other.finished && other.started < self.finished
    }
}

/// Deterministic, instrumented generator
pub struct MockCredentialGenerator {
    signers: Vec<PrivateKeySigner>,
    current_index: RwLock<usize>,
    delay: Duration,
    failures_remaining: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: AtomicUsize,
    windows: RwLock<Vec<GenerationWindow>>,
}

impl MockCredentialGenerator {
    /// Create a generator cycling through the given signers
    pub fn new(signers: Vec<PrivateKeySigner>) -> Self {
        Self {
            signers,
            current_index: RwLock::new(0),
            delay: Duration::ZERO,
            failures_remaining: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            windows: RwLock::new(Vec::new()),
        }
    }

    /// Create a generator from Anvil's deterministic test keys
    pub fn from_anvil_keys() -> Result<Self, GenerationError> {
        let keys = [
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
        ];
        Self::from_keys(&keys)
    }

    /// Create a generator from hex-encoded private keys
    pub fn from_keys(keys: &[&str]) -> Result<Self, GenerationError> {
        let signers = keys
            .iter()
            .map(|k| {
                k.parse::<PrivateKeySigner>()
                    .map_err(|e| GenerationError::KeyGeneration(format!("Invalid test key: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(signers))
    }

    /// Hold the critical section for `delay` on every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make the next `count` calls fail
    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    /// Total number of calls, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn windows(&self) -> Vec<GenerationWindow> {
        self.windows.read().unwrap().clone()
    }

    /// Whether any two recorded windows overlapped
    pub fn any_overlap(&self) -> bool {
        let windows = self.windows();
        windows
            .iter()
            .enumerate()
            .any(|(i, a)| windows[i + 1..].iter().any(|b| a.overlaps(b)))
    }

    fn next_signer(&self) -> Result<PrivateKeySigner, GenerationError> {
        if self.signers.is_empty() {
            return Err(GenerationError::KeyGeneration(
                "No signers available in mock generator".to_string(),
            ));
        }

        let mut index = self.current_index.write().unwrap();
        let signer = self.signers[*index % self.signers.len()].clone();
        *index = (*index + 1) % self.signers.len();
        Ok(signer)
    }
}

#[async_trait]
impl CredentialGenerator for MockCredentialGenerator {
    async fn generate(&self) -> Result<CredentialPair, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        let started = Instant::now();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let result = if should_fail {
            Err(GenerationError::KeyGeneration(
                "Injected generation failure".to_string(),
            ))
        } else {
            self.next_signer()
                .and_then(|signer| CredentialPair::new(signer.address(), signer.to_bytes()))
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.windows.write().unwrap().push(GenerationWindow {
            started,
            finished: Instant::now(),
        });

        result
    }
}
