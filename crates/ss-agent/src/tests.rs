//! Unit tests for ss-agent.

#[cfg(test)]
mod params {
    use crate::{DecisionModel, Selfishness};

    #[test]
    fn sentinel_maps_to_unweighted() {
        assert_eq!(Selfishness::from_factor(-1.0), Selfishness::Unweighted);
        assert_eq!(Selfishness::from_factor(0.25), Selfishness::Weighted(0.25));
        assert_eq!(Selfishness::from_factor(3.0), Selfishness::Weighted(1.0));
        assert_eq!(Selfishness::Unweighted.factor(), -1.0);
    }

    #[test]
    fn weights() {
        let s = Selfishness::Weighted(0.75);
        assert_eq!(s.weight(true), 0.75);
        assert_eq!(s.weight(false), 0.25);
        assert_eq!(Selfishness::Unweighted.weight(true), 1.0);
        assert_eq!(Selfishness::Unweighted.weight(false), 1.0);
    }

    #[test]
    fn considers_others_until_fully_selfish() {
        assert!(Selfishness::Unweighted.considers_others());
        assert!(Selfishness::Weighted(0.99).considers_others());
        assert!(!Selfishness::Weighted(1.0).considers_others());
    }

    #[test]
    fn decision_model_labels() {
        for model in [
            DecisionModel::Egoistic { lookahead: false },
            DecisionModel::Egoistic { lookahead: true },
            DecisionModel::Bentham { lookahead: false },
            DecisionModel::Bentham { lookahead: true },
        ] {
            assert_eq!(DecisionModel::parse(model.as_str()), Some(model));
        }
        assert!(DecisionModel::parse("kantian").is_none());
        assert!(DecisionModel::Bentham { lookahead: true }.lookahead());
    }
}

#[cfg(test)]
mod store {
    use ss_core::{AgentId, CellId, CoreError, Tick};

    use crate::{AgentParams, AgentStore, Endowment, UNBOUNDED_TIME_TO_LIVE};

    fn endowment() -> Endowment {
        Endowment {
            sugar:            10.0,
            spice:            4.0,
            sugar_metabolism: 2.0,
            spice_metabolism: 1.0,
            vision:           3,
            movement:         3,
            max_age:          None,
        }
    }

    #[test]
    fn push_and_remove() {
        let mut store = AgentStore::new();
        let a = store.push_agent(endowment(), AgentParams::default(), CellId(3), Tick(0));
        let b = store.push_agent(endowment(), AgentParams::default(), CellId(4), Tick(2));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(store.living_count(), 2);

        assert_eq!(store.remove(a).unwrap(), CellId(3));
        assert!(!store.is_alive(a));
        assert_eq!(store.cell[a.index()], CellId::INVALID);
        assert_eq!(store.living().collect::<Vec<_>>(), vec![b]);
        assert!(matches!(store.remove(a), Err(CoreError::AgentRemoved(_))));
        assert!(matches!(store.check_alive(AgentId(9)), Err(CoreError::AgentNotFound(_))));

        // Slots are never reused.
        let c = store.push_agent(endowment(), AgentParams::default(), CellId(3), Tick(5));
        assert_eq!(c, AgentId(2));
        assert_eq!(store.count, 3);
    }

    #[test]
    fn time_to_live_is_limited_by_scarcest_resource() {
        let mut store = AgentStore::new();
        let a = store.push_agent(endowment(), AgentParams::default(), CellId(0), Tick(0));
        // sugar lasts 5 steps, spice lasts 4.
        assert_eq!(store.time_to_live(a), 4.0);

        store.max_age[a.index()] = Some(10);
        store.age[a.index()] = 8;
        assert_eq!(store.time_to_live(a), 2.0);
    }

    #[test]
    fn time_to_live_without_metabolism_is_unbounded() {
        let mut store = AgentStore::new();
        let e = Endowment { sugar_metabolism: 0.0, spice_metabolism: 0.0, ..endowment() };
        let a = store.push_agent(e, AgentParams::default(), CellId(0), Tick(0));
        assert_eq!(store.time_to_live(a), UNBOUNDED_TIME_TO_LIVE);
    }

    #[test]
    fn welfare_is_cobb_douglas() {
        let mut store = AgentStore::new();
        let e = Endowment { sugar: 4.0, spice: 9.0, sugar_metabolism: 1.0, spice_metabolism: 1.0, ..endowment() };
        let a = store.push_agent(e, AgentParams::default(), CellId(0), Tick(0));
        assert!((store.welfare(a, 0.0, 0.0) - 6.0).abs() < 1e-12);
        assert!((store.welfare(a, 5.0, 0.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn welfare_without_metabolism_is_face_value() {
        let mut store = AgentStore::new();
        let e = Endowment { sugar_metabolism: 0.0, spice_metabolism: 0.0, ..endowment() };
        let a = store.push_agent(e, AgentParams::default(), CellId(0), Tick(0));
        assert_eq!(store.welfare(a, 1.0, 1.0), 16.0);
    }

    #[test]
    fn starvation_ignores_unmetabolised_resources() {
        let mut store = AgentStore::new();
        let e = Endowment { spice: 0.0, spice_metabolism: 0.0, ..endowment() };
        let a = store.push_agent(e, AgentParams::default(), CellId(0), Tick(0));
        assert!(!store.is_starved_or_expired(a));
        store.sugar[a.index()] = 0.0;
        assert!(store.is_starved_or_expired(a));
    }

    #[test]
    fn expiry_after_max_age() {
        let mut store = AgentStore::new();
        let e = Endowment { max_age: Some(3), ..endowment() };
        let a = store.push_agent(e, AgentParams::default(), CellId(0), Tick(0));
        store.age[a.index()] = 3;
        assert!(!store.is_starved_or_expired(a));
        store.age[a.index()] = 4;
        assert!(store.is_starved_or_expired(a));
    }
}

#[cfg(test)]
mod builder {
    use ss_core::{AgentId, CellId};

    use crate::{AgentError, AgentParams, AgentStoreBuilder, Endowment};

    #[test]
    fn correct_count() {
        let mut b = AgentStoreBuilder::new(1);
        for i in 0..20 {
            b = b.agent(Endowment::default(), AgentParams::default(), CellId(i));
        }
        assert_eq!(b.len(), 20);
        let (store, rngs) = b.build().unwrap();
        assert_eq!(store.living_count(), 20);
        assert_eq!(rngs.len(), 20);
        assert_eq!(store.cell[7], CellId(7));
    }

    #[test]
    fn zero_agents() {
        let (store, rngs) = AgentStoreBuilder::new(0).build().unwrap();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn negative_metabolism_rejected() {
        let bad = Endowment { sugar_metabolism: -1.0, ..Default::default() };
        let err = AgentStoreBuilder::new(0)
            .agent(Endowment::default(), AgentParams::default(), CellId(0))
            .agent(bad, AgentParams::default(), CellId(1))
            .build()
            .err()
            .expect("negative metabolism must fail");
        assert!(matches!(err, AgentError::InvalidEndowment { agent: AgentId(1), .. }));
    }

    #[test]
    fn per_agent_rng_determinism() {
        let build = || {
            AgentStoreBuilder::new(999)
                .agent(Endowment::default(), AgentParams::default(), CellId(0))
                .agent(Endowment::default(), AgentParams::default(), CellId(1))
                .build()
                .unwrap()
        };
        let (_, mut r1) = build();
        let (_, mut r2) = build();
        for i in 0..2u32 {
            let a: u64 = r1.get_mut(AgentId(i)).random();
            let b: u64 = r2.get_mut(AgentId(i)).random();
            assert_eq!(a, b, "agent {i} RNG should be deterministic");
        }
    }

    #[test]
    fn pushed_rng_matches_builder_seed() {
        let (_, mut rngs) = AgentStoreBuilder::new(5)
            .agent(Endowment::default(), AgentParams::default(), CellId(0))
            .build()
            .unwrap();
        rngs.push(AgentId(1));
        let a: u64 = rngs.get_mut(AgentId(1)).random();
        let b: u64 = ss_core::AgentRng::new(5, AgentId(1)).random();
        assert_eq!(a, b);
    }
}
