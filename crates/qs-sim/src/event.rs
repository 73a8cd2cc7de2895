//! Events emitted by `Sim::step`.

use std::fmt;

use qs_core::{Customer, ServerId, Tick};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Arrival,
    ServiceStart,
    Finish,
}

/// Something that happened during one tick.
///
/// `customer` is a snapshot taken right after the change, so consumers can
/// keep it after the engine moves on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind:     EventKind,
    pub tick:     Tick,
    pub message:  String,
    pub customer: Option<Customer>,
    /// Server involved, for `ServiceStart` and `Finish`.
    pub server:   Option<ServerId>,
}

impl Event {
    pub(crate) fn arrival(tick: Tick, customer: Customer, queue_len: usize) -> Self {
        Self {
            kind: EventKind::Arrival,
            tick,
            message: format!(
                "[{tick}] Customer {} arrived (needs {} mins). Queue: {queue_len}",
                customer.id, customer.service_time,
            ),
            customer: Some(customer),
            server: None,
        }
    }

    pub(crate) fn service_start(tick: Tick, customer: Customer, server: ServerId, queue_len: usize) -> Self {
        Self {
            kind: EventKind::ServiceStart,
            tick,
            message: format!(
                "[{tick}] Server {server} serving customer {} (waited {} mins). Queue: {queue_len}",
                customer.id,
                customer.wait_time().unwrap_or(0),
            ),
            customer: Some(customer),
            server: Some(server),
        }
    }

    pub(crate) fn finish(tick: Tick, customer: Customer, server: ServerId) -> Self {
        Self {
            kind: EventKind::Finish,
            tick,
            message: format!("[{tick}] Server {server} finished with customer {}.", customer.id),
            customer: Some(customer),
            server: Some(server),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
