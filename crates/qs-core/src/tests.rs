//! Unit tests for qs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CustomerId, ServerId};

    #[test]
    fn index_roundtrip() {
        let id = CustomerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CustomerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ServerId(0) < ServerId(1));
        assert!(CustomerId(100) > CustomerId(99));
    }

    #[test]
    fn display() {
        assert_eq!(CustomerId(7).to_string(), "7");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn arithmetic() {
        assert_eq!(Tick(5) + 3, Tick(8));
        assert_eq!(Tick(8) - Tick(5), 3);
        assert_eq!(Tick(8).since(Tick(2)), 6);
        assert_eq!(Tick(2).offset(4), Tick(6));
    }

    #[test]
    fn hour_buckets() {
        assert_eq!(Tick(0).hour(), 0);
        assert_eq!(Tick(59).hour(), 0);
        assert_eq!(Tick(60).hour(), 1);
        assert_eq!(Tick(479).hour(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(12).to_string(), "T=12");
    }
}

#[cfg(test)]
mod rng {
    use crate::{ScriptedSource, SimRng, UniformSource, derive_seed};

    #[test]
    fn sim_rng_stays_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            let v = rng.uniform(1, 4);
            assert!((1..=4).contains(&v), "got {v}");
        }
    }

    #[test]
    fn sim_rng_is_deterministic() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let xs: Vec<u64> = (0..32).map(|_| a.uniform(1, 100)).collect();
        let ys: Vec<u64> = (0..32).map(|_| b.uniform(1, 100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn degenerate_range_returns_bound() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.uniform(3, 3), 3);
    }

    #[test]
    fn scripted_cycles_and_clamps() {
        let mut src = ScriptedSource::new(vec![0, 5, 99]);
        assert_eq!(src.uniform(1, 10), 1);  // 0 clamped up
        assert_eq!(src.uniform(1, 10), 5);
        assert_eq!(src.uniform(1, 10), 10); // 99 clamped down
        assert_eq!(src.uniform(1, 10), 1);  // wraps
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn empty_script_returns_low() {
        let mut src = ScriptedSource::default();
        assert_eq!(src.uniform(2, 9), 2);
    }

    #[test]
    fn derived_seeds_differ_per_index() {
        let base = 0xDEAD_BEEF;
        assert_eq!(derive_seed(base, 0), base);
        assert_ne!(derive_seed(base, 1), derive_seed(base, 2));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, InsightThresholds, PatternConfig, SimConfig};

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(InsightThresholds::default().validate().is_ok());
        assert!(PatternConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_bounds_rejected() {
        let cases: [(&str, fn(&mut SimConfig)); 4] = [
            ("duration", |c| c.duration = 0),
            ("server_count", |c| c.server_count = 0),
            ("max_arrival_interval", |c| c.max_arrival_interval = 0),
            ("max_service_time", |c| c.max_service_time = 0),
        ];
        for (field, mutate) in cases {
            let mut cfg = SimConfig::default();
            mutate(&mut cfg);
            assert_eq!(cfg.validate(), Err(CoreError::NonPositive { field }));
        }
    }

    #[test]
    fn zero_stress_threshold_allowed() {
        let cfg = SimConfig { stress_threshold: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn hours_round_up() {
        let cfg = SimConfig { duration: 61, ..SimConfig::default() };
        assert_eq!(cfg.hours(), 2);
        assert_eq!(SimConfig::default().hours(), 8);
    }

    #[test]
    fn inverted_utilization_thresholds_rejected() {
        let cfg = PatternConfig {
            high_utilization_threshold: 30.0,
            low_utilization_threshold:  60.0,
            ..PatternConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CoreError::OutOfRange { field: "low_utilization_threshold", .. })
        ));
    }

    #[test]
    fn consistency_threshold_must_be_fraction() {
        for bad in [0.0, 1.5, -0.2] {
            let cfg = PatternConfig { stress_consistency_threshold: bad, ..PatternConfig::default() };
            assert!(cfg.validate().is_err(), "{bad} accepted");
        }
    }
}

#[cfg(test)]
mod records {
    use crate::{Customer, CustomerId, ServerId, Server, ServiceStatus, Tick};

    #[test]
    fn customer_lifecycle() {
        let mut c = Customer::new(CustomerId(0), Tick(3), 4);
        assert_eq!(c.wait_time(), None);
        assert_eq!(c.end(), None);

        let end = c.begin_service(Tick(5));
        assert_eq!(end, Tick(9));
        assert_eq!(c.wait_time(), Some(2));
        assert!(c.is_started());
        assert!(!c.is_served());

        c.complete(Tick(9));
        assert_eq!(c.status, ServiceStatus::Served { start: Tick(5), end: Tick(9) });
        assert_eq!(c.wait_time(), Some(2));
        assert_eq!(c.end(), Some(Tick(9)));
    }

    #[test]
    fn server_assign_and_release() {
        let mut s = Server::new(ServerId(0));
        assert!(!s.is_busy());
        assert!(!s.is_due(Tick(100)));

        s.assign(CustomerId(3), Tick(10));
        assert!(s.is_busy());
        assert!(!s.is_due(Tick(9)));
        assert!(s.is_due(Tick(10)));

        assert_eq!(s.release(), Some(CustomerId(3)));
        assert_eq!(s.release(), None);
    }
}
