use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;

use crate::{
    events::{Envelope, EventBus},
    workers::{PipelineFailed, SubscriptionSpec, WorkerBatch, WorkerInputs},
};

pub trait Worker: Send + Sized + 'static {
    const SUBSCRIBER_ID: &'static str;

    fn subscription() -> SubscriptionSpec;

    async fn handle(&mut self, envelope: Arc<Envelope>, bus: &EventBus) -> Result<()>;

    /// Pulls from `inputs` until `shutdown` fires. A failed `handle` becomes a
    /// [`PipelineFailed`] event instead of stopping the worker.
    async fn run(
        mut self,
        mut inputs: WorkerInputs,
        bus: Arc<EventBus>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<()> {
        tracing::debug!(worker = Self::SUBSCRIBER_ID, "worker started");
        loop {
            let envelopes: Vec<Arc<Envelope>> = tokio::select! {
                _ = shutdown.recv() => break,
                batch = inputs.next() => match batch {
                    WorkerBatch::Snapshots(updates) => {
                        updates.into_iter().map(|u| u.envelope).collect()
                    }
                    WorkerBatch::FifoItem { envelope, .. } => vec![envelope],
                },
            };

            for envelope in envelopes {
                let failed = Arc::clone(&envelope.event);
                if let Err(e) = self.handle(envelope, &bus).await {
                    tracing::warn!(
                        worker = Self::SUBSCRIBER_ID,
                        event_type = failed.event_type(),
                        error = %e,
                        "handler failed"
                    );
                    bus.publish(Arc::new(PipelineFailed::new(
                        &failed,
                        Self::SUBSCRIBER_ID,
                        format!("{e:#}"),
                    )));
                }
            }
        }
        tracing::debug!(worker = Self::SUBSCRIBER_ID, "worker stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, time::SystemTime};

    use serde::Serialize;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::*;
    use crate::{
        events::{BusConfig, Event, EventBusBuilder, EventHeader, downcast_ref, expect},
        queues::QueueKind,
        workers::InputSpec,
    };

    #[derive(Serialize)]
    struct Ping {
        header: EventHeader,
        n: u32,
    }

    impl Ping {
        const EVENT_TYPE: &'static str = "test.ping";

        fn new(n: u32) -> Self {
            Self {
                header: EventHeader::root(),
                n,
            }
        }
    }

    impl Event for Ping {
        fn event_id(&self) -> Uuid {
            self.header.event_id
        }

        fn parent_ids(&self) -> &[Uuid] {
            &self.header.parent_ids
        }

        fn event_type(&self) -> &'static str {
            Self::EVENT_TYPE
        }

        fn timestamp(&self) -> SystemTime {
            self.header.timestamp
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Forwards even pings, fails on odd ones.
    struct EvenOnly {
        out: mpsc::UnboundedSender<u32>,
    }

    impl Worker for EvenOnly {
        const SUBSCRIBER_ID: &'static str = "test.even_only";

        fn subscription() -> SubscriptionSpec {
            SubscriptionSpec {
                subscriber_id: Self::SUBSCRIBER_ID,
                inputs: vec![InputSpec {
                    event_type: Ping::EVENT_TYPE,
                    queue_kind: QueueKind::DropOldest { capacity: 8 },
                }],
            }
        }

        async fn handle(&mut self, envelope: Arc<Envelope>, _bus: &EventBus) -> Result<()> {
            let ping = expect::<Ping>(&envelope.event, Ping::EVENT_TYPE)?;
            anyhow::ensure!(ping.n % 2 == 0, "odd ping {}", ping.n);
            self.out.send(ping.n)?;
            Ok(())
        }
    }

    struct FailureSink {
        out: mpsc::UnboundedSender<PipelineFailed>,
    }

    impl Worker for FailureSink {
        const SUBSCRIBER_ID: &'static str = "test.failure_sink";

        fn subscription() -> SubscriptionSpec {
            SubscriptionSpec {
                subscriber_id: Self::SUBSCRIBER_ID,
                inputs: vec![InputSpec {
                    event_type: PipelineFailed::EVENT_TYPE,
                    queue_kind: QueueKind::Latest,
                }],
            }
        }

        async fn handle(&mut self, envelope: Arc<Envelope>, _bus: &EventBus) -> Result<()> {
            if let Some(failed) = downcast_ref::<PipelineFailed>(&envelope.event) {
                self.out.send(failed.clone())?;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_worker_handles_and_reports_failures() {
        let (bus, mut wiring) = EventBusBuilder::new(BusConfig::default())
            .subscribe(EvenOnly::subscription())
            .subscribe(FailureSink::subscription())
            .build()
            .unwrap();
        let bus = Arc::new(bus);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let (even_tx, mut even_rx) = mpsc::unbounded_channel();
        let (failed_tx, mut failed_rx) = mpsc::unbounded_channel();

        let even = tokio::spawn(EvenOnly { out: even_tx }.run(
            wiring.take(EvenOnly::SUBSCRIBER_ID).unwrap(),
            Arc::clone(&bus),
            shutdown_rx.resubscribe(),
        ));
        let sink = tokio::spawn(FailureSink { out: failed_tx }.run(
            wiring.take(FailureSink::SUBSCRIBER_ID).unwrap(),
            Arc::clone(&bus),
            shutdown_rx,
        ));

        let odd = Arc::new(Ping::new(3));
        let odd_id = odd.event_id();
        bus.publish(Arc::new(Ping::new(2)));
        bus.publish(odd);

        assert_eq!(even_rx.recv().await, Some(2));
        let failed = failed_rx.recv().await.unwrap();
        assert_eq!(failed.stage, EvenOnly::SUBSCRIBER_ID);
        assert_eq!(failed.failed_event_type, Ping::EVENT_TYPE);
        assert_eq!(failed.header.parent_ids, vec![odd_id]);
        assert!(failed.message.contains("odd ping 3"));

        shutdown_tx.send(()).unwrap();
        even.await.unwrap().unwrap();
        sink.await.unwrap().unwrap();
        assert_eq!(bus.published_total(), 3);
        assert_eq!(bus.unrouted_total(), 0);
    }

    #[tokio::test]
    async fn test_unrouted_events_are_counted() {
        let (bus, _wiring) = EventBusBuilder::new(BusConfig::default())
            .subscribe(FailureSink::subscription())
            .build()
            .unwrap();

        bus.publish(Arc::new(Ping::new(1)));
        assert_eq!(bus.unrouted_total(), 1);
    }

    #[tokio::test]
    async fn test_latest_input_counts_overwrites() {
        let (bus, _wiring) = EventBusBuilder::new(BusConfig::default())
            .subscribe(FailureSink::subscription())
            .build()
            .unwrap();

        let ping: Arc<dyn Event> = Arc::new(Ping::new(1));
        for _ in 0..3 {
            bus.publish(Arc::new(PipelineFailed::new(&ping, "test", "x".into())));
        }
        assert_eq!(bus.drops_by_subscriber()[FailureSink::SUBSCRIBER_ID], 2);
    }

    #[test]
    fn test_builder_rejects_duplicate_subscribers() {
        let result = EventBusBuilder::new(BusConfig::default())
            .subscribe(EvenOnly::subscription())
            .subscribe(EvenOnly::subscription())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = EventBusBuilder::new(BusConfig::default())
            .subscribe(SubscriptionSpec {
                subscriber_id: "test.zero",
                inputs: vec![InputSpec {
                    event_type: Ping::EVENT_TYPE,
                    queue_kind: QueueKind::DropOldest { capacity: 0 },
                }],
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_events_serialize_through_trait_object() {
        let event: Arc<dyn Event> = Arc::new(Ping::new(7));
        let json = serde_json::to_value(&*event).unwrap();
        assert_eq!(json["n"], 7);
    }
}
