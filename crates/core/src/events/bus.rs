use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::time::Instant;
use uuid::Uuid;

use crate::events::{BusConfig, Envelope, Event, Routes};

#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

struct EventBusInner {
    run_id: Uuid,
    next_seq: AtomicU64,
    unrouted_total: AtomicU64,
    routes: Routes,
}

impl EventBus {
    pub(crate) fn new(cfg: BusConfig, routes: Routes) -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                run_id: cfg.run_id,
                next_seq: AtomicU64::new(0),
                unrouted_total: AtomicU64::new(0),
                routes,
            }),
        }
    }

    pub fn publish(&self, event: Arc<dyn Event>) {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);
        let event_type = event.event_type();

        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(&*event) {
                Ok(payload) => tracing::trace!(seq, event_type, %payload, "publish"),
                Err(e) => tracing::trace!(seq, event_type, error = %e, "publish (unserializable)"),
            }
        }

        let envelope = Arc::new(Envelope {
            event,
            seq,
            run_id: self.inner.run_id,
            published_at: Instant::now(),
        });

        let Some(routes) = self.inner.routes.table.get(event_type) else {
            self.inner.unrouted_total.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(event_type, "no subscriber for event");
            return;
        };

        for route in routes {
            route.deliver(Arc::clone(&envelope));
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.inner.run_id
    }

    pub fn published_total(&self) -> u64 {
        self.inner.next_seq.load(Ordering::Relaxed)
    }

    pub fn unrouted_total(&self) -> u64 {
        self.inner.unrouted_total.load(Ordering::Relaxed)
    }

    /// Values overwritten or evicted before their subscriber read them.
    pub fn drops_by_subscriber(&self) -> HashMap<&'static str, u64> {
        let mut drops = HashMap::new();
        for route in self.inner.routes.table.values().flatten() {
            *drops.entry(route.subscriber_id).or_default() +=
                route.drops_total.load(Ordering::Relaxed);
        }
        drops
    }
}
