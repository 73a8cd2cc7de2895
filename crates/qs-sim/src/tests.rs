//! Integration tests for qs-sim.

use qs_core::{CoreError, ScriptedSource, SimConfig, Tick};

use crate::{Event, EventKind, Sim, SimBuilder, SimError, SimObserver, SimState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(duration: u64, servers: u32, max_gap: u64, max_service: u64) -> SimConfig {
    SimConfig {
        duration,
        server_count:         servers,
        max_arrival_interval: max_gap,
        max_service_time:     max_service,
        stress_threshold:     5,
        seed:                 42,
    }
}

/// A run driven by `draws` (service, gap, service, gap, …).
fn scripted(cfg: SimConfig, draws: Vec<u64>) -> Sim<ScriptedSource> {
    SimBuilder::new(cfg).source(ScriptedSource::new(draws)).build().unwrap()
}

fn kinds(events: &[Event]) -> Vec<EventKind> {
    events.iter().map(|e| e.kind).collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_ready() {
        let sim = Sim::new(config(10, 3, 4, 5)).unwrap();
        assert_eq!(sim.state(), SimState::Ready);
        assert_eq!(sim.servers().len(), 3);
        assert_eq!(sim.now(), Tick::ZERO);
        assert_eq!(sim.next_arrival(), Tick::ZERO);
    }

    #[test]
    fn zero_bounds_are_configuration_errors() {
        let err = Sim::new(config(0, 1, 1, 1)).err();
        assert_eq!(err, Some(SimError::Config(CoreError::NonPositive { field: "duration" })));

        let err = Sim::new(config(10, 0, 1, 1)).err();
        assert_eq!(err, Some(SimError::Config(CoreError::NonPositive { field: "server_count" })));

        assert!(Sim::new(config(10, 1, 0, 1)).is_err());
        assert!(Sim::new(config(10, 1, 1, 0)).is_err());
    }

    #[test]
    fn bad_insight_thresholds_rejected() {
        let result = SimBuilder::new(config(10, 1, 1, 1))
            .insight_thresholds(qs_core::InsightThresholds { good_below: 60.0, pressure_below: 40.0 })
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Tick semantics ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;
    use qs_analytics::InsightTier;

    #[test]
    fn unit_gaps_and_services_keep_one_server_saturated() {
        let mut sim = Sim::new(config(10, 1, 1, 1)).unwrap();
        assert_eq!(sim.run(), SimState::Finished);

        let arrivals: Vec<u64> = sim.customers().iter().map(|c| c.arrival.0).collect();
        assert_eq!(arrivals, (0..10).collect::<Vec<_>>());
        assert!(sim.customers().iter().all(|c| c.wait_time() == Some(0)));
        assert!(sim.customers().iter().all(|c| c.is_served()));

        let s = sim.summary();
        assert_eq!(s.total_served, 10);
        assert!((s.utilization - 100.0).abs() < 1e-9, "got {}", s.utilization);
        assert_eq!(s.insight, InsightTier::Excellent);
        assert_eq!(sim.elapsed_ticks(), 10);
        assert_eq!(sim.total_busy_time(), 10);
    }

    #[test]
    fn saturated_server_queues_fifo() {
        // Three arrivals at t=0,1,2 each needing 5 minutes; the next gap is
        // past the window.
        let mut sim = scripted(config(5, 1, 10, 5), vec![5, 1, 5, 1, 5, 10]);
        sim.run();

        let starts: Vec<_> = sim.customers().iter().map(|c| c.start().unwrap().0).collect();
        assert_eq!(starts, [0, 5, 10]);
        let waits: Vec<_> = sim.customers().iter().map(|c| c.wait_time().unwrap()).collect();
        assert_eq!(waits, [0, 4, 8]);
        assert_eq!(sim.customers().len(), 3);

        // Services at the boundary run to completion.
        assert_eq!(sim.elapsed_ticks(), 15);
        assert!((sim.summary().utilization - 100.0).abs() < 1e-9);
    }

    #[test]
    fn first_tick_emits_arrival_then_service_start() {
        let mut sim = scripted(config(5, 1, 10, 5), vec![2, 3]);
        let events = sim.step();
        assert_eq!(kinds(&events), [EventKind::Arrival, EventKind::ServiceStart]);
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(events[0].tick, Tick(0));
        assert!(events[0].message.contains("Customer 0 arrived"));
        assert_eq!(sim.next_arrival(), Tick(3));
    }

    #[test]
    fn same_tick_finishes_and_assignments_go_in_server_order() {
        let mut sim = scripted(config(3, 2, 10, 10), vec![3, 1, 2, 1, 4, 10]);
        for _ in 0..3 {
            sim.step();
        }
        assert_eq!(sim.queue_len(), 1);
        let queued: Vec<_> = sim.queued().map(|c| c.id.0).collect();
        assert_eq!(queued, [2]);

        let events = sim.step(); // t = 3
        assert_eq!(kinds(&events), [EventKind::Finish, EventKind::Finish, EventKind::ServiceStart]);
        let servers: Vec<_> = events.iter().map(|e| e.server.unwrap().0).collect();
        assert_eq!(servers, [0, 1, 0]);
        let customers: Vec<_> = events.iter().map(|e| e.customer.unwrap().id.0).collect();
        assert_eq!(customers, [0, 1, 2]);

        sim.run();
        assert_eq!(sim.elapsed_ticks(), 7);
        assert_eq!(sim.total_busy_time(), 3 + 2 + 4);
        let served: Vec<_> = sim.served().map(|c| c.id.0).collect();
        assert_eq!(served, [0, 1, 2]);
    }

    #[test]
    fn no_arrivals_at_or_after_duration() {
        for seed in 0..20 {
            let cfg = SimConfig { seed, ..config(90, 1, 3, 8) };
            let mut sim = Sim::new(cfg).unwrap();
            sim.run();
            assert!(sim.customers().iter().all(|c| c.arrival.0 < 90));
            assert!(sim.elapsed_ticks() >= 90);
        }
    }

    #[test]
    fn event_snapshots_match_final_records() {
        let mut sim = Sim::new(config(60, 2, 3, 6)).unwrap();
        let mut finishes = Vec::new();
        while sim.state() != SimState::Finished {
            finishes.extend(sim.step().into_iter().filter(|e| e.kind == EventKind::Finish));
        }
        for e in finishes {
            let snap = e.customer.unwrap();
            assert_eq!(snap, sim.customers()[snap.id.index()]);
            assert_eq!(snap.end(), Some(e.tick));
        }
    }
}

// ── Properties over seeded runs ───────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    fn seeded_runs() -> impl Iterator<Item = Sim> {
        let shapes = [(120, 1, 3, 5), (240, 2, 4, 12), (480, 3, 2, 9), (60, 4, 1, 15)];
        shapes.into_iter().flat_map(|(d, s, g, m)| {
            (0..8u64).map(move |seed| {
                let mut sim = Sim::new(SimConfig { seed, ..config(d, s, g, m) }).unwrap();
                sim.run();
                sim
            })
        })
    }

    #[test]
    fn served_never_exceeds_customers_and_waits_are_consistent() {
        for sim in seeded_runs() {
            let s = sim.summary();
            assert!(s.total_served <= s.total_customers);
            for c in sim.customers() {
                let start = c.start().expect("finished run leaves no one waiting");
                assert_eq!(c.wait_time(), Some(start.since(c.arrival)));
                assert!(c.service_time >= 1);
                assert!(c.is_served());
            }
        }
    }

    #[test]
    fn utilization_stays_within_bounds() {
        for sim in seeded_runs() {
            let u = sim.summary().utilization;
            assert!((0.0..=100.0).contains(&u), "utilization {u}");
        }
    }

    #[test]
    fn start_times_follow_arrival_order() {
        for sim in seeded_runs() {
            let starts: Vec<Tick> = sim.customers().iter().filter_map(|c| c.start()).collect();
            assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn busy_time_equals_total_service() {
        for sim in seeded_runs() {
            let total: u64 = sim.customers().iter().map(|c| c.service_time).sum();
            assert_eq!(sim.total_busy_time(), total);
        }
    }

    #[test]
    fn hourly_arrivals_sum_to_customers() {
        for sim in seeded_runs() {
            let report = sim.hourly_report().unwrap();
            assert_eq!(report.total_arrivals(), sim.customers().len() as u64);
        }
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn step_after_finish_is_a_no_op() {
        let mut sim = Sim::new(config(30, 2, 3, 4)).unwrap();
        sim.run();
        let now = sim.now();
        let servers = sim.servers().to_vec();
        let queue = sim.queue_len();
        let customers = sim.customers().len();

        for _ in 0..3 {
            assert!(sim.step().is_empty());
        }
        assert_eq!(sim.state(), SimState::Finished);
        assert_eq!(sim.now(), now);
        assert_eq!(sim.servers(), servers.as_slice());
        assert_eq!(sim.queue_len(), queue);
        assert_eq!(sim.customers().len(), customers);
        assert_eq!(sim.run(), SimState::Finished);
    }

    #[test]
    fn cancel_keeps_records_and_stops_scheduling() {
        let mut sim = Sim::new(config(120, 1, 2, 6)).unwrap();
        for _ in 0..20 {
            sim.step();
        }
        let produced = sim.customers().len();
        assert!(produced > 0);

        sim.cancel().unwrap();
        assert_eq!(sim.state(), SimState::Stopped);
        assert!(sim.step().is_empty());
        assert_eq!(sim.customers().len(), produced);
        assert_eq!(sim.elapsed_ticks(), 20);
    }

    #[test]
    fn cancel_before_first_step() {
        let mut sim = Sim::new(config(10, 1, 1, 1)).unwrap();
        sim.cancel().unwrap();
        assert_eq!(sim.run(), SimState::Stopped);
        assert!(sim.customers().is_empty());
        assert!(!sim.summary().has_data());
        assert!(sim.hourly_report().is_none());
    }

    #[test]
    fn cancel_is_rejected_once_terminal() {
        let mut sim = Sim::new(config(10, 1, 1, 1)).unwrap();
        sim.run();
        assert_eq!(
            sim.cancel(),
            Err(SimError::InvalidTransition { from: SimState::Finished, to: SimState::Stopped })
        );

        let mut stopped = Sim::new(config(10, 1, 1, 1)).unwrap();
        stopped.cancel().unwrap();
        assert!(stopped.cancel().is_err());
    }

    #[test]
    fn cancel_handle_is_observed_on_next_step() {
        let mut sim = Sim::new(config(120, 2, 2, 6)).unwrap();
        let handle = sim.cancel_handle();
        sim.step();
        assert_eq!(sim.state(), SimState::Running);

        std::thread::spawn(move || handle.cancel()).join().unwrap();
        assert_eq!(sim.state(), SimState::Running);
        assert!(sim.step().is_empty());
        assert_eq!(sim.state(), SimState::Stopped);
    }

    #[test]
    fn transitions_are_monotonic() {
        use SimState::*;
        assert!(Ready.can_become(Running));
        assert!(Ready.can_become(Stopped));
        assert!(Running.can_become(Finished));
        assert!(!Finished.can_become(Running));
        assert!(!Stopped.can_become(Finished));
        assert!(!Running.can_become(Ready));
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;

    fn trace<R: qs_core::UniformSource>(sim: &mut Sim<R>) -> Vec<Event> {
        let mut out = Vec::new();
        while !sim.state().is_terminal() {
            out.extend(sim.step());
        }
        out
    }

    #[test]
    fn same_draws_produce_identical_runs() {
        let draws = vec![4, 2, 7, 1, 3, 3, 9, 2, 1, 1, 6, 4];
        let mut a = scripted(config(200, 2, 4, 9), draws.clone());
        let mut b = scripted(config(200, 2, 4, 9), draws);
        assert_eq!(trace(&mut a), trace(&mut b));
        assert_eq!(a.summary(), b.summary());
        assert_eq!(a.hourly_report(), b.hourly_report());
    }

    #[test]
    fn same_seed_produces_identical_runs() {
        let mut a = Sim::new(config(480, 2, 4, 12)).unwrap();
        let mut b = Sim::new(config(480, 2, 4, 12)).unwrap();
        assert_eq!(trace(&mut a), trace(&mut b));
        assert_eq!(a.summary(), b.summary());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Sim::new(SimConfig { seed: 1, ..config(480, 2, 4, 12) }).unwrap();
        let mut b = Sim::new(SimConfig { seed: 2, ..config(480, 2, 4, 12) }).unwrap();
        assert_ne!(trace(&mut a), trace(&mut b));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:   u64,
        ends:     u64,
        events:   usize,
        finished: Option<(Tick, SimState)>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_events(&mut self, _tick: Tick, events: &[Event]) {
            assert!(!events.is_empty());
            self.events += events.len();
        }
        fn on_tick_end(&mut self, _tick: Tick, busy: usize) {
            assert!(busy <= 2);
            self.ends += 1;
        }
        fn on_sim_end(&mut self, final_tick: Tick, state: SimState) {
            assert!(self.finished.is_none(), "on_sim_end called twice");
            self.finished = Some((final_tick, state));
        }
    }

    #[test]
    fn hooks_fire_for_every_tick() {
        let mut sim = Sim::new(config(60, 2, 3, 5)).unwrap();
        let mut rec = Recorder::default();
        sim.run_with(&mut rec);

        // One step per credited tick plus the terminal step.
        assert_eq!(rec.starts, sim.elapsed_ticks() + 1);
        assert_eq!(rec.ends, rec.starts);
        // Each customer arrives, starts, and finishes exactly once.
        assert_eq!(rec.events, sim.customers().len() * 3);
        assert_eq!(rec.finished, Some((sim.now(), SimState::Finished)));
    }
}
