//! Domain events and the in-process event bus.
//!
//! Aggregates publish a `DomainEvent` after every state change, once their
//! own lock has been released. Subscribers run synchronously on the
//! publishing thread and may publish further events.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::board::TileKind;
use crate::core::{PlayerId, ResourceKind};

/// State change notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    ResourcesChanged {
        player: PlayerId,
        kind: ResourceKind,
        delta: i32,
        total: i32,
    },
    ProductionChanged {
        player: PlayerId,
        kind: ResourceKind,
        delta: i32,
        total: i32,
    },
    TerraformRatingChanged {
        player: PlayerId,
        old: i32,
        new: i32,
    },
    TemperatureChanged {
        old: i32,
        new: i32,
    },
    OxygenChanged {
        old: i32,
        new: i32,
    },
    OceansChanged {
        old: i32,
        new: i32,
    },
    TilesQueued {
        player: PlayerId,
        tiles: Vec<TileKind>,
        source: String,
    },
    CardDrawSelectionCreated {
        player: PlayerId,
        available: usize,
        source: String,
    },
    CardDrawSelectionResolved {
        player: PlayerId,
        taken: usize,
        bought: usize,
    },
    TriggeredEffectRecorded {
        player: PlayerId,
        source: String,
    },
}

type Subscriber = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

/// Cheaply cloneable publish/subscribe hub. Clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&DomainEvent) + Send + Sync + 'static) {
        self.subscribers.write().push(Arc::new(subscriber));
    }

    /// Deliver `event` to every subscriber registered at call time.
    pub fn publish(&self, event: DomainEvent) {
        let snapshot: Vec<Subscriber> = self.subscribers.read().clone();
        for subscriber in snapshot {
            subscriber(&event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
