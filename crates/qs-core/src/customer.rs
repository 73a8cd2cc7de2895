//! Per-customer timing record.

use crate::{CustomerId, Tick};

/// Where a customer is in its lifecycle.
///
/// Start and end times only exist on the variants where they are
/// meaningful, so a wait time can never be read before service began.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum ServiceStatus {
    /// In the queue.
    Waiting,
    /// Assigned to a server at `start`.
    InService { start: Tick },
    /// Service began at `start` and completed at `end`.
    Served { start: Tick, end: Tick },
}

/// One customer of one run.
///
/// `service_time` is sampled at arrival and is always at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id:           CustomerId,
    pub arrival:      Tick,
    pub service_time: u64,
    pub status:       ServiceStatus,
}

impl Customer {
    pub fn new(id: CustomerId, arrival: Tick, service_time: u64) -> Self {
        debug_assert!(service_time > 0, "service_time must be positive");
        Self { id, arrival, service_time, status: ServiceStatus::Waiting }
    }

    /// Tick at which service began, if it has.
    #[inline]
    pub fn start(&self) -> Option<Tick> {
        match self.status {
            ServiceStatus::Waiting => None,
            ServiceStatus::InService { start } | ServiceStatus::Served { start, .. } => Some(start),
        }
    }

    /// Tick at which service completed, if it has.
    #[inline]
    pub fn end(&self) -> Option<Tick> {
        match self.status {
            ServiceStatus::Served { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Minutes between arrival and start of service.  `None` while waiting.
    #[inline]
    pub fn wait_time(&self) -> Option<u64> {
        self.start().map(|start| start.since(self.arrival))
    }

    /// `true` once service has begun (in service or served).
    #[inline]
    pub fn is_started(&self) -> bool {
        self.start().is_some()
    }

    /// `true` once service has completed.
    #[inline]
    pub fn is_served(&self) -> bool {
        matches!(self.status, ServiceStatus::Served { .. })
    }

    /// Move from `Waiting` to `InService` at `now`.  Returns the tick at which
    /// service will end.
    pub fn begin_service(&mut self, now: Tick) -> Tick {
        debug_assert!(
            self.status == ServiceStatus::Waiting && now >= self.arrival,
            "customer {} cannot start service at {now}",
            self.id,
        );
        self.status = ServiceStatus::InService { start: now };
        now + self.service_time
    }

    /// Move from `InService` to `Served` at `now`.
    pub fn complete(&mut self, now: Tick) {
        if let ServiceStatus::InService { start } = self.status {
            self.status = ServiceStatus::Served { start, end: now };
        } else {
            debug_assert!(false, "customer {} completed without starting", self.id);
        }
    }
}
