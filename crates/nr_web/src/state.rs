use chrono::{DateTime, FixedOffset, Local, Utc};
use nr_core::{Digest, Engine, SearchPage};
use nr_search::NewsSource;
use std::sync::Arc;

/// Where "now" comes from when deciding recency.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// The host's local time zone.
    #[default]
    Local,
    /// Current time viewed at a fixed UTC offset.
    Offset(FixedOffset),
    /// A frozen instant.
    Pinned(DateTime<FixedOffset>),
}

impl Clock {
    pub fn digest(&self, engine: &Engine, page: SearchPage) -> Digest {
        match self {
            Clock::Local => engine.process(page, &Local::now()),
            Clock::Offset(offset) => engine.process(page, &Utc::now().with_timezone(offset)),
            Clock::Pinned(now) => engine.process(page, now),
        }
    }
}

pub struct AppState {
    pub source: Arc<dyn NewsSource>,
    pub engine: Engine,
    pub clock: Clock,
}

impl AppState {
    pub fn new(source: Arc<dyn NewsSource>, engine: Engine) -> Self {
        Self {
            source,
            engine,
            clock: Clock::default(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}
