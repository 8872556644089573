use std::sync::Arc;

use tokio::sync::Notify;

use crate::{
    events::Envelope,
    queues::{DropOldestQueue, LatestSlot},
};

pub struct LatestInput {
    pub event_type: &'static str,
    pub slot: Arc<LatestSlot<Arc<Envelope>>>,
}

pub struct FifoInput {
    pub event_type: &'static str,
    pub queue: DropOldestQueue<Arc<Envelope>>,
}

pub struct WorkerInputs {
    latest: Vec<LatestInput>,
    fifos: Vec<FifoInput>,
    notify_any: Arc<Notify>,
    fifo_index: usize,
}

pub enum WorkerBatch {
    Snapshots(Vec<SnapshotUpdate>),
    FifoItem {
        event_type: &'static str,
        envelope: Arc<Envelope>,
    },
}

pub struct SnapshotUpdate {
    pub event_type: &'static str,
    pub envelope: Arc<Envelope>,
}

impl WorkerInputs {
    pub fn new(latest: Vec<LatestInput>, fifos: Vec<FifoInput>, notify_any: Arc<Notify>) -> Self {
        Self {
            latest,
            fifos,
            notify_any,
            fifo_index: 0,
        }
    }

    /// Waits for the next batch. Pending snapshots win over FIFO items; FIFO
    /// inputs are drained round-robin so one busy input can't starve the rest.
    pub async fn next(&mut self) -> WorkerBatch {
        loop {
            let snaps: Vec<_> = self
                .latest
                .iter()
                .filter_map(|l| {
                    l.slot.take().map(|envelope| SnapshotUpdate {
                        event_type: l.event_type,
                        envelope,
                    })
                })
                .collect();

            if !snaps.is_empty() {
                return WorkerBatch::Snapshots(snaps);
            }

            for _ in 0..self.fifos.len() {
                let i = self.fifo_index;
                self.fifo_index = (self.fifo_index + 1) % self.fifos.len();

                let fifo = &self.fifos[i];
                if let Some(envelope) = fifo.queue.try_recv() {
                    return WorkerBatch::FifoItem {
                        event_type: fifo.event_type,
                        envelope,
                    };
                }
            }

            self.notify_any.notified().await;
        }
    }
}
