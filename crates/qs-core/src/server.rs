//! Service desk record.

use crate::{CustomerId, ServerId, Tick};

/// One server.  Holds at most one customer at a time; the `Option` makes a
/// second assignment unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Server {
    pub id:          ServerId,
    pub current:     Option<CustomerId>,
    /// Tick at which the current customer's service ends.  Meaningless while
    /// idle.
    pub service_end: Tick,
}

impl Server {
    pub fn new(id: ServerId) -> Self {
        Self { id, current: None, service_end: Tick::ZERO }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// `true` if busy and the current service ends at or before `now`.
    #[inline]
    pub fn is_due(&self, now: Tick) -> bool {
        self.is_busy() && self.service_end <= now
    }

    /// Attach `customer` until `service_end`.
    pub fn assign(&mut self, customer: CustomerId, service_end: Tick) {
        debug_assert!(!self.is_busy(), "server {} already busy", self.id);
        self.current = Some(customer);
        self.service_end = service_end;
    }

    /// Detach and return the current customer, if any.
    pub fn release(&mut self) -> Option<CustomerId> {
        self.current.take()
    }
}
