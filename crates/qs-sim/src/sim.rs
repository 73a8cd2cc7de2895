//! The `Sim` struct and its tick loop.

use std::collections::VecDeque;

use qs_analytics::{BusyTime, HourlyAnalyzer, HourlyReport, RunSummary, SummaryCalculator};
use qs_core::{
    Customer, CustomerId, InsightThresholds, Server, SimConfig, SimRng, Tick, UniformSource,
};

use crate::{CancelHandle, Event, SimError, SimObserver, SimResult, SimState};

/// One run of the queue.
///
/// `Sim` owns every customer and server record of the run and advances one
/// tick (minute) per [`step`][Self::step].  Each step runs five phases in a
/// fixed order:
///
/// 1. **Arrival**: if a customer is due and the arrival window is still open,
///    sample its service time, append it to the queue, and schedule the next
///    arrival `uniform(1, max_arrival_interval)` ticks later.
/// 2. **Finish**: release every server (ascending id) whose service ends at or
///    before now.
/// 3. **Assign**: give each free server (ascending id) the head of the queue.
/// 4. **Termination**: once the window has closed and every server is idle,
///    the run is `Finished`; that tick is neither credited nor advanced past.
/// 5. **Bookkeeping**: credit one busy-tick per busy server, then advance.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::new`].
pub struct Sim<R: UniformSource = SimRng> {
    pub(crate) config:       SimConfig,
    pub(crate) insight:      InsightThresholds,
    pub(crate) source:       R,
    pub(crate) cancel:       CancelHandle,
    pub(crate) state:        SimState,
    pub(crate) now:          Tick,
    pub(crate) next_arrival: Tick,
    /// Indexed by `CustomerId`.
    pub(crate) customers:    Vec<Customer>,
    pub(crate) queue:        VecDeque<CustomerId>,
    pub(crate) servers:      Vec<Server>,
    /// Completed customers in finish order.
    pub(crate) served:       Vec<CustomerId>,
    pub(crate) total_busy:   u64,
}

impl Sim<SimRng> {
    /// Build a run seeded from `config.seed` with default insight thresholds.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        crate::SimBuilder::new(config).build()
    }
}

impl<R: UniformSource> Sim<R> {
    // ── Driving the run ───────────────────────────────────────────────────

    /// Advance one tick and return its events in emission order.
    ///
    /// A `Ready` run becomes `Running` first.  Once the run is `Finished` or
    /// `Stopped` this is a no-op returning an empty list.
    pub fn step(&mut self) -> Vec<Event> {
        if self.cancel.is_cancelled() && !self.state.is_terminal() {
            self.transition(SimState::Stopped);
        }
        match self.state {
            SimState::Ready => self.transition(SimState::Running),
            SimState::Running => {}
            SimState::Finished | SimState::Stopped => return Vec::new(),
        }

        let now = self.now;
        let mut events = Vec::new();

        self.admit_arrival(now, &mut events);
        self.finish_services(now, &mut events);
        self.assign_servers(now, &mut events);

        let busy = self.busy_servers();
        if now.0 >= self.config.duration && busy == 0 {
            self.transition(SimState::Finished);
            return events;
        }

        self.total_busy += busy as u64;
        self.now = now + 1;
        events
    }

    /// Step until the run is no longer running.  Returns the final state.
    pub fn run(&mut self) -> SimState {
        self.run_with(&mut crate::NoopObserver)
    }

    /// Like [`run`][Self::run], calling observer hooks around every tick.
    pub fn run_with<O: SimObserver>(&mut self, observer: &mut O) -> SimState {
        loop {
            let tick = self.now;
            observer.on_tick_start(tick);
            let events = self.step();
            if !events.is_empty() {
                observer.on_events(tick, &events);
            }
            observer.on_tick_end(tick, self.busy_servers());
            if self.state.is_terminal() {
                break;
            }
        }
        observer.on_sim_end(self.now, self.state);
        self.state
    }

    /// Cancel the run.  Takes effect immediately for later `step()` calls;
    /// records produced so far are kept.
    pub fn cancel(&mut self) -> SimResult<()> {
        if !self.state.can_become(SimState::Stopped) {
            return Err(SimError::InvalidTransition { from: self.state, to: SimState::Stopped });
        }
        self.transition(SimState::Stopped);
        Ok(())
    }

    /// A handle that cancels this run from elsewhere (another thread, a UI
    /// callback).  Observed at the start of the next `step()`.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    // ── Results ───────────────────────────────────────────────────────────

    /// Summary statistics of the run so far.  Meaningful once terminal.
    pub fn get_summary(&self, stress_threshold: u64) -> RunSummary {
        SummaryCalculator::new(stress_threshold)
            .with_thresholds(self.insight)
            .calculate(&self.customers, self.busy_time())
    }

    /// Per-hour breakdown of the run so far.  `None` if nobody arrived.
    pub fn get_hourly_report(&self, duration: u64, stress_threshold: u64) -> Option<HourlyReport> {
        HourlyAnalyzer::new(duration, stress_threshold).analyze(&self.customers)
    }

    /// [`get_summary`][Self::get_summary] with the configured threshold.
    pub fn summary(&self) -> RunSummary {
        self.get_summary(self.config.stress_threshold)
    }

    /// [`get_hourly_report`][Self::get_hourly_report] with the configured
    /// duration and threshold.
    pub fn hourly_report(&self) -> Option<HourlyReport> {
        self.get_hourly_report(self.config.duration, self.config.stress_threshold)
    }

    pub fn busy_time(&self) -> BusyTime {
        BusyTime {
            total_busy_time: self.total_busy,
            elapsed_ticks:   self.elapsed_ticks(),
            server_count:    self.config.server_count,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// The tick the next `step()` will process.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Ticks fully processed (credited to busy time).
    pub fn elapsed_ticks(&self) -> u64 {
        self.now.0
    }

    pub fn total_busy_time(&self) -> u64 {
        self.total_busy
    }

    /// Every customer that arrived, in arrival (= id) order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Completed customers in finish order.
    pub fn served(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.served.iter().map(|id| &self.customers[id.index()])
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued customers, head first.
    pub fn queued(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.queue.iter().map(|id| &self.customers[id.index()])
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn busy_servers(&self) -> usize {
        self.servers.iter().filter(|s| s.is_busy()).count()
    }

    /// Tick of the next scheduled arrival (may lie past the window).
    pub fn next_arrival(&self) -> Tick {
        self.next_arrival
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn admit_arrival(&mut self, now: Tick, events: &mut Vec<Event>) {
        if now != self.next_arrival || now.0 >= self.config.duration {
            return;
        }
        let service_time = self.source.uniform(1, self.config.max_service_time);
        let id = CustomerId(self.customers.len() as u32);
        let customer = Customer::new(id, now, service_time);
        self.customers.push(customer);
        self.queue.push_back(id);
        events.push(Event::arrival(now, customer, self.queue.len()));

        let gap = self.source.uniform(1, self.config.max_arrival_interval);
        self.next_arrival = now + gap;
    }

    fn finish_services(&mut self, now: Tick, events: &mut Vec<Event>) {
        for server in &mut self.servers {
            if !server.is_due(now) {
                continue;
            }
            let Some(id) = server.release() else { continue };
            let customer = &mut self.customers[id.index()];
            customer.complete(now);
            self.served.push(id);
            events.push(Event::finish(now, *customer, server.id));
        }
    }

    fn assign_servers(&mut self, now: Tick, events: &mut Vec<Event>) {
        for server in &mut self.servers {
            if server.is_busy() {
                continue;
            }
            let Some(id) = self.queue.pop_front() else { break };
            let customer = &mut self.customers[id.index()];
            let end = customer.begin_service(now);
            server.assign(id, end);
            events.push(Event::service_start(now, *customer, server.id, self.queue.len()));
        }
    }

    fn transition(&mut self, next: SimState) {
        debug_assert!(self.state.can_become(next), "illegal transition {} -> {next}", self.state);
        log::debug!("run seed={} {} -> {next} at {}", self.config.seed, self.state, self.now);
        self.state = next;
        if next == SimState::Finished {
            log::debug!(
                "run seed={} finished: {} customers, {} busy server-ticks over {} ticks",
                self.config.seed,
                self.customers.len(),
                self.total_busy,
                self.elapsed_ticks(),
            );
        }
    }
}
