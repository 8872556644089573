use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, atomic::AtomicU64},
};

use anyhow::Result;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    events::{EventBus, Route, RouteInbox, Routes},
    queues::{DropOldestQueue, LatestSlot, QueueKind},
    workers::{FifoInput, LatestInput, SubscriptionSpec, WorkerInputs, WorkerWiring},
};

pub struct BusConfig {
    pub run_id: Uuid,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }
}

fn validate(subs: &[SubscriptionSpec]) -> Result<()> {
    let mut seen_subscribers: HashSet<&'static str> = HashSet::new();
    for s in subs {
        if s.subscriber_id.trim().is_empty() {
            anyhow::bail!("empty subscriber_id");
        }
        if !seen_subscribers.insert(s.subscriber_id) {
            anyhow::bail!("duplicate subscriber_id={}", s.subscriber_id);
        }
        if s.inputs.is_empty() {
            anyhow::bail!("subscriber_id={} has no inputs", s.subscriber_id);
        }

        let mut seen_inputs: HashSet<&'static str> = HashSet::new();
        for i in &s.inputs {
            if i.event_type.trim().is_empty() {
                anyhow::bail!("subscriber_id={} has empty event_type", s.subscriber_id);
            }
            if !seen_inputs.insert(i.event_type) {
                anyhow::bail!(
                    "subscriber_id={} has duplicate input event_type={}",
                    s.subscriber_id,
                    i.event_type
                );
            }
            if let QueueKind::DropOldest { capacity } = i.queue_kind {
                anyhow::ensure!(
                    capacity > 0,
                    "subscriber_id={} input {} has zero capacity",
                    s.subscriber_id,
                    i.event_type
                );
            }
        }
    }
    Ok(())
}

pub struct EventBusBuilder {
    cfg: BusConfig,
    subs: Vec<SubscriptionSpec>,
}

impl EventBusBuilder {
    pub fn new(cfg: BusConfig) -> Self {
        Self {
            cfg,
            subs: Vec::new(),
        }
    }

    pub fn subscribe(mut self, s: SubscriptionSpec) -> Self {
        self.subs.push(s);
        self
    }

    pub fn build(self) -> Result<(EventBus, WorkerWiring)> {
        validate(&self.subs)?;

        let mut table: HashMap<&'static str, Vec<Route>> = HashMap::new();
        let mut wiring: HashMap<&'static str, WorkerInputs> = HashMap::new();

        for spec in self.subs {
            let notify_any = Arc::new(Notify::new());
            let mut latest = Vec::new();
            let mut fifos = Vec::new();

            for input in spec.inputs {
                let inbox = match input.queue_kind {
                    QueueKind::Latest => {
                        let slot = Arc::new(LatestSlot::new(Arc::clone(&notify_any)));
                        latest.push(LatestInput {
                            event_type: input.event_type,
                            slot: Arc::clone(&slot),
                        });
                        RouteInbox::Latest(slot)
                    }
                    QueueKind::DropOldest { capacity } => {
                        let queue = DropOldestQueue::new(capacity, Arc::clone(&notify_any));
                        fifos.push(FifoInput {
                            event_type: input.event_type,
                            queue: queue.clone(),
                        });
                        RouteInbox::DropOldest(queue)
                    }
                };

                table.entry(input.event_type).or_default().push(Route {
                    subscriber_id: spec.subscriber_id,
                    inbox,
                    drops_total: Arc::new(AtomicU64::new(0)),
                });
            }

            tracing::debug!(
                subscriber_id = spec.subscriber_id,
                latest = latest.len(),
                fifos = fifos.len(),
                "subscriber wired"
            );
            wiring.insert(
                spec.subscriber_id,
                WorkerInputs::new(latest, fifos, notify_any),
            );
        }

        let bus = EventBus::new(self.cfg, Routes { table });
        Ok((bus, WorkerWiring::new(wiring)))
    }
}
