use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    events::Envelope,
    queues::{DropOldestQueue, LatestSlot},
};

pub struct Routes {
    pub table: HashMap<&'static str, Vec<Route>>,
}

pub struct Route {
    pub subscriber_id: &'static str,
    pub inbox: RouteInbox,
    pub drops_total: Arc<AtomicU64>,
}

pub enum RouteInbox {
    Latest(Arc<LatestSlot<Arc<Envelope>>>),
    DropOldest(DropOldestQueue<Arc<Envelope>>),
}

impl Route {
    pub fn deliver(&self, envelope: Arc<Envelope>) {
        let lost = match &self.inbox {
            RouteInbox::Latest(slot) => slot.set(envelope),
            RouteInbox::DropOldest(queue) => queue.push(envelope),
        };

        if lost {
            self.drops_total.fetch_add(1, Ordering::Relaxed);
        }
    }
}
