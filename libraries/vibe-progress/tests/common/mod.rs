//! In-memory tiers, clocks and media shared by the progress tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vibe_core::{
    Clock, ConnectivityFlag, ContentItemId, LocalProgressTier, OwnerId, Part, ProgressRecord,
    PutStatus, RemoteProgressTier, Result, VibeError,
};
use vibe_progress::{MediaElement, ProgressConfig, Reconciler};

pub const OWNER: &str = "user_123";

pub fn owner() -> OwnerId {
    OwnerId::new(OWNER)
}

pub fn item(id: &str) -> ContentItemId {
    ContentItemId::new(id)
}

pub fn record(id: &str, part_index: u32, position: f64, updated_at: i64) -> ProgressRecord {
    ProgressRecord::new(owner(), item(id), part_index, position, 3600.0, updated_at)
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Quota,
    Network,
}

/// Tier keeping records in a map, with the same "newer or equal wins" rule
/// as the SQLite store
#[derive(Default)]
pub struct MemoryTier {
    records: Mutex<HashMap<(OwnerId, ContentItemId), ProgressRecord>>,
    puts: AtomicUsize,
    gets: AtomicUsize,
    failure: Mutex<Option<Failure>>,
    delay: Mutex<Option<Duration>>,
}

impl MemoryTier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, record: ProgressRecord) {
        let key = (record.owner_id.clone(), record.content_item_id.clone());
        self.records.lock().unwrap().insert(key, record);
    }

    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn respond_after(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn stored(&self, id: &str) -> Option<ProgressRecord> {
        self.records.lock().unwrap().get(&(owner(), item(id))).cloned()
    }

    async fn before_call(&self) -> Result<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = *self.failure.lock().unwrap();
        match failure {
            Some(Failure::Quota) => Err(VibeError::quota_exceeded("database or disk is full")),
            Some(Failure::Network) => Err(VibeError::network("connection refused")),
            None => Ok(()),
        }
    }

    async fn store(&self, record: &ProgressRecord) -> Result<PutStatus> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;

        let key = (record.owner_id.clone(), record.content_item_id.clone());
        let mut records = self.records.lock().unwrap();
        match records.get(&key) {
            Some(existing) if existing.updated_at > record.updated_at => Ok(PutStatus::Superseded),
            _ => {
                records.insert(key, record.clone());
                Ok(PutStatus::Applied)
            }
        }
    }

    async fn load(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.before_call().await?;

        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LocalProgressTier for MemoryTier {
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus> {
        self.store(record).await
    }

    async fn get_all(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        self.load(owner_id).await
    }
}

#[async_trait]
impl RemoteProgressTier for MemoryTier {
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus> {
        self.store(record).await
    }

    async fn get(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        self.load(owner_id).await
    }
}

/// Clock that advances by a fixed step on every read
pub struct StepClock {
    next: AtomicI64,
    step: i64,
}

impl StepClock {
    pub fn starting_at(start: i64) -> Arc<Self> {
        Arc::new(Self {
            next: AtomicI64::new(start),
            step: 1_000,
        })
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

pub struct Harness {
    pub local: Arc<MemoryTier>,
    pub remote: Arc<MemoryTier>,
    pub flag: ConnectivityFlag,
    pub reconciler: Reconciler,
}

pub fn harness() -> Harness {
    harness_with(ProgressConfig::default())
}

pub fn harness_with(config: ProgressConfig) -> Harness {
    let local = MemoryTier::new();
    let remote = MemoryTier::new();
    let flag = ConnectivityFlag::online();

    let reconciler = Reconciler::new(
        local.clone(),
        remote.clone(),
        Arc::new(flag.clone()),
        config,
    )
    .with_clock(StepClock::starting_at(1_000_000));

    Harness {
        local,
        remote,
        flag,
        reconciler,
    }
}

#[derive(Debug, Default)]
pub struct MediaState {
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub loaded: Vec<(u32, f64)>,
}

/// Media element driven by the test through a shared state handle
#[derive(Clone, Default)]
pub struct FakeMedia {
    pub state: Arc<Mutex<MediaState>>,
}

impl FakeMedia {
    pub fn playing_at(current_time: f64, duration: f64) -> Self {
        let media = Self::default();
        {
            let mut state = media.state.lock().unwrap();
            state.current_time = current_time;
            state.duration = duration;
        }
        media
    }

    pub fn set_time(&self, seconds: f64) {
        self.state.lock().unwrap().current_time = seconds;
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.lock().unwrap().paused = paused;
    }

    pub fn loaded(&self) -> Vec<(u32, f64)> {
        self.state.lock().unwrap().loaded.clone()
    }

    pub fn time(&self) -> f64 {
        self.state.lock().unwrap().current_time
    }
}

impl MediaElement for FakeMedia {
    fn current_time(&self) -> f64 {
        self.time()
    }

    fn duration(&self) -> f64 {
        self.state.lock().unwrap().duration
    }

    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn set_current_time(&self, seconds: f64) {
        self.set_time(seconds);
    }

    fn load_part(&self, index: u32, part: &Part, start_at: f64) {
        let mut state = self.state.lock().unwrap();
        state.loaded.push((index, start_at));
        state.current_time = start_at;
        state.duration = part.duration.unwrap_or(f64::NAN);
    }

    fn pause(&self) {
        self.set_paused(true);
    }
}
