//! Unit tests for ss-sim.

#[cfg(test)]
mod helpers {
    use ss_agent::{AgentParams, AgentStoreBuilder, Endowment};
    use ss_core::{CellId, SimConfig};
    use ss_ethics::TribalCombat;
    use ss_grid::{Environment, Grid, GridBuilder, GridPos};

    use crate::{Sim, SimBuilder};

    pub const EPS: f64 = 1e-12;

    pub fn endow(sugar: f64, metabolism: f64, vision: u32) -> Endowment {
        Endowment {
            sugar,
            sugar_metabolism: metabolism,
            vision,
            movement: vision,
            ..Default::default()
        }
    }

    /// Non-wrapping single row with the given sugar levels.
    pub fn row(sugar: &[f64], environment: Environment) -> Grid {
        let mut b = GridBuilder::new(sugar.len() as u32, 1).environment(environment);
        for (x, &s) in sugar.iter().enumerate() {
            b = b.sugar(GridPos::new(x as u32, 0), s);
        }
        b.build().unwrap()
    }

    pub fn config(total_ticks: u64, output_interval_ticks: u64) -> SimConfig {
        SimConfig { total_ticks, seed: 7, output_interval_ticks }
    }

    pub fn sim(
        config: SimConfig,
        grid:   Grid,
        agents: Vec<(Endowment, AgentParams, CellId)>,
    ) -> Sim {
        let mut builder = AgentStoreBuilder::new(config.seed);
        for (e, p, c) in agents {
            builder = builder.agent(e, p, c);
        }
        let (agents, rngs) = builder.build().unwrap();
        SimBuilder::new(config, grid, agents, rngs, TribalCombat).build().unwrap()
    }

    /// Occupancy, viewer registrations and caches agree for every agent.
    pub fn assert_consistent(sim: &Sim) {
        for agent in sim.agents.living() {
            let cell = sim.agents.cell[agent.index()];
            assert_eq!(sim.grid.occupant(cell), Some(agent), "{agent} not on {cell}");
            for &seen in sim.engine.registry.neighborhood(agent) {
                assert!(sim.engine.registry.viewers(seen).contains(&agent));
            }
            sim.engine.check_cache(&sim.agents, agent).unwrap();
        }
        let occupied = sim.grid.cells().filter(|&c| sim.grid.is_occupied(c)).count();
        assert_eq!(occupied, sim.agents.living_count());
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::io::Write;

    use ss_agent::{DecisionModel, Selfishness};

    use crate::{SimError, SugarscapeConfig};

    #[test]
    fn defaults_match_the_classic_setup() {
        let c = SugarscapeConfig::default();
        assert_eq!(c.initial_agents, 250);
        assert_eq!((c.environment_width, c.environment_height), (50, 50));
        assert_eq!(c.agent_max_vision, 6);
        assert_eq!(c.agent_max_metabolism, 4);
        assert_eq!(c.environment_max_sugar, 4.0);
        assert_eq!(c.selfishness(), Selfishness::Unweighted);
        c.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c = SugarscapeConfig::from_json_str(
            r#"{ "initialAgents": 10, "agentDecisionModels": ["bentham_lookahead", "egoistic"] }"#,
        )
        .unwrap();
        assert_eq!(c.initial_agents, 10);
        assert_eq!(c.environment_width, 50);
        assert_eq!(
            c.decision_models().unwrap(),
            vec![DecisionModel::Bentham { lookahead: true }, DecisionModel::Egoistic { lookahead: false }]
        );
    }

    #[test]
    fn selfishness_factor_maps_sentinel() {
        let c = SugarscapeConfig::from_json_str(r#"{ "agentSelfishnessFactor": 0.5 }"#).unwrap();
        assert_eq!(c.selfishness(), Selfishness::Weighted(0.5));
    }

    #[test]
    fn unknown_decision_model_rejected() {
        let err = SugarscapeConfig::from_json_str(r#"{ "agentDecisionModels": ["kantian"] }"#).unwrap_err();
        assert!(matches!(err, SimError::Config(msg) if msg.contains("kantian")));
    }

    #[test]
    fn empty_environment_rejected() {
        let err = SugarscapeConfig::from_json_str(r#"{ "environmentWidth": 0 }"#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn negative_rate_rejected() {
        let err = SugarscapeConfig::from_json_str(r#"{ "environmentSugarRegrowRate": -1 }"#).unwrap_err();
        assert!(matches!(err, SimError::Config(msg) if msg.contains("environmentSugarRegrowRate")));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = SugarscapeConfig::from_json_str("{ initialAgents: }").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "timesteps": 42, "seed": 9, "logfile": "run.json" }}"#).unwrap();
        let c = SugarscapeConfig::from_json_path(file.path()).unwrap();
        assert_eq!(c.sim_config().total_ticks, 42);
        assert_eq!(c.sim_config().seed, 9);
        assert_eq!(c.logfile.as_deref(), Some(std::path::Path::new("run.json")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SugarscapeConfig::from_json_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use ss_agent::{AgentParams, AgentStoreBuilder, Endowment};
    use ss_core::{CellId, Tick};

    use super::helpers::EPS;
    use crate::{RuntimeStats, gini};

    #[test]
    fn gini_of_equal_shares_is_zero() {
        assert!(gini(&[3.0, 3.0, 3.0]).abs() < EPS);
    }

    #[test]
    fn gini_of_one_holder() {
        assert!((gini(&[0.0, 10.0, 0.0, 0.0]) - 0.75).abs() < EPS);
    }

    #[test]
    fn gini_degenerate_inputs() {
        assert_eq!(gini(&[]), 0.0);
        assert_eq!(gini(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn collect_summarises_living_agents() {
        let e = |sugar, metabolism, vision| Endowment {
            sugar,
            sugar_metabolism: metabolism,
            vision,
            ..Default::default()
        };
        let (mut agents, _) = AgentStoreBuilder::new(1)
            .agent(e(2.0, 1.0, 2), AgentParams::default(), CellId(0))
            .agent(e(6.0, 3.0, 4), AgentParams::default(), CellId(1))
            .agent(e(50.0, 1.0, 1), AgentParams::default(), CellId(2))
            .build()
            .unwrap();
        agents.remove(ss_core::AgentId(2)).unwrap();

        let s = RuntimeStats::collect(Tick(3), &agents);
        assert_eq!(s.timestep, 3);
        assert_eq!(s.agents, 2);
        assert!((s.mean_wealth - 4.0).abs() < EPS);
        assert!((s.total_wealth - 8.0).abs() < EPS);
        assert!((s.max_wealth - 6.0).abs() < EPS);
        assert!((s.min_wealth - 2.0).abs() < EPS);
        assert!((s.mean_metabolism - 2.0).abs() < EPS);
        assert!((s.mean_vision - 3.0).abs() < EPS);
        assert!((s.gini_coefficient - 0.25).abs() < EPS);
    }

    #[test]
    fn extinct_population_reports_zeros() {
        let (agents, _) = AgentStoreBuilder::new(1).build().unwrap();
        let s = RuntimeStats::collect(Tick(5), &agents);
        assert_eq!(s, RuntimeStats { timestep: 5, ..Default::default() });
    }
}

// ── World setup ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod setup {
    use std::collections::HashSet;

    use ss_agent::{DecisionModel, Tribe};
    use ss_core::SimRng;

    use super::helpers::assert_consistent;
    use crate::setup::{build_grid, build_sim, endowments, round_robin};
    use crate::{NoopObserver, SugarscapeConfig};

    fn small(agents: usize, side: u32) -> SugarscapeConfig {
        SugarscapeConfig {
            initial_agents: agents,
            environment_width: side,
            environment_height: side,
            timesteps: 10,
            seed: 3,
            ..SugarscapeConfig::default()
        }
    }

    #[test]
    fn round_robin_cycles_from_one() {
        assert_eq!(round_robin(5, 3), vec![1, 2, 3, 1, 2]);
        assert_eq!(round_robin(3, 0), vec![0, 0, 0]);
    }

    #[test]
    fn endowments_stay_in_range() {
        let c = small(40, 10);
        let list = endowments(&c, 40, &mut SimRng::new(1));
        assert_eq!(list.len(), 40);
        for e in &list {
            assert!((1..=6).contains(&e.vision));
            assert!((1.0..=4.0).contains(&e.sugar_metabolism));
            assert!((1.0..=5.0).contains(&e.sugar));
            assert_eq!(e.spice, 0.0);
            assert_eq!(e.spice_metabolism, 0.0);
            assert_eq!(e.movement, e.vision);
        }
        let visions: HashSet<u32> = list.iter().map(|e| e.vision).collect();
        assert_eq!(visions.len(), 6);
    }

    #[test]
    fn sugar_peaks_reach_the_configured_maximum() {
        let grid = build_grid(&small(0, 10)).unwrap();
        assert_eq!(grid.environment.global_max_sugar, 4.0);
        assert_eq!(grid.environment.global_max_spice, 0.0);
        assert!(grid.total_resources() > 0.0);
    }

    #[test]
    fn spice_peaks_only_when_enabled() {
        let c = SugarscapeConfig { environment_max_spice: 3.0, ..small(0, 10) };
        let grid = build_grid(&c).unwrap();
        assert_eq!(grid.environment.global_max_spice, 3.0);
    }

    #[test]
    fn population_placed_on_distinct_cells() {
        let sim = build_sim(&small(20, 10)).unwrap();
        assert_eq!(sim.agents.living_count(), 20);
        let cells: HashSet<_> = sim.agents.living().map(|a| sim.agents.cell[a.index()]).collect();
        assert_eq!(cells.len(), 20);
        assert_consistent(&sim);
    }

    #[test]
    fn population_capped_at_cell_count() {
        let sim = build_sim(&small(20, 3)).unwrap();
        assert_eq!(sim.agents.living_count(), 9);
    }

    #[test]
    fn models_and_tribes_dealt_round_robin() {
        let c = SugarscapeConfig {
            agent_decision_models: vec!["egoistic".into(), "bentham".into()],
            agent_tribes: 3,
            ..small(6, 10)
        };
        let sim = build_sim(&c).unwrap();
        let p = |i: u32| *sim.agents.params(ss_core::AgentId(i));
        assert_eq!(p(0).decision_model, DecisionModel::Egoistic { lookahead: false });
        assert_eq!(p(1).decision_model, DecisionModel::Bentham { lookahead: false });
        assert_eq!(p(4).tribe, Tribe(1));
    }

    #[test]
    fn same_seed_same_history() {
        let c = SugarscapeConfig {
            environment_max_spice: 2.0,
            agent_tribes: 2,
            agent_aggression_factor: 0.5,
            environment_max_combat_loot: 3.0,
            ..small(30, 12)
        };
        let mut a = build_sim(&c).unwrap();
        let mut b = build_sim(&c).unwrap();
        a.run_ticks(8, &mut NoopObserver).unwrap();
        b.run_ticks(8, &mut NoopObserver).unwrap();
        assert_eq!(a.stats(), b.stats());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim {
    use ss_agent::{AgentParams, Tribe};
    use ss_core::{AgentId, CellId, Tick};
    use ss_grid::{Environment, GridBuilder, GridError};

    use super::helpers::{assert_consistent, config, endow, row, sim, EPS};
    use crate::setup::build_sim;
    use crate::{NoopObserver, RuntimeStats, SimError, SimObserver, SugarscapeConfig, TickSummary};

    #[test]
    fn lone_agent_moves_gathers_and_metabolises() {
        let grid = row(&[0.0, 5.0, 0.0], Environment::default());
        let mut s = sim(config(10, 0), grid, vec![(endow(10.0, 1.0, 2), AgentParams::default(), CellId(0))]);

        let summary = s.step(&mut NoopObserver).unwrap();
        assert_eq!(summary, TickSummary { acted: 1, moved: 1, kills: 0, deaths: 0 });

        let a = AgentId(0);
        assert_eq!(s.agents.cell[0], CellId(1));
        assert!((s.agents.sugar[0] - 14.0).abs() < EPS);
        assert_eq!(s.agents.age[0], 1);
        assert_eq!(s.grid.occupant(CellId(1)), Some(a));
        assert_eq!(s.grid.occupant(CellId(0)), None);
        // Harvested to 0, then regrown by one.
        assert!((s.grid.sugar[1] - 1.0).abs() < EPS);
        assert_eq!(s.clock.current_tick, Tick(1));
        assert_consistent(&s);
    }

    #[test]
    fn gathering_and_metabolism_pollute() {
        let env = Environment { production_pollution: 0.5, consumption_pollution: 1.0, ..Default::default() };
        let grid = row(&[0.0, 5.0, 0.0], env);
        let mut s = sim(config(10, 0), grid, vec![(endow(10.0, 1.0, 2), AgentParams::default(), CellId(0))]);
        s.step(&mut NoopObserver).unwrap();
        assert!((s.grid.pollution[1] - 3.5).abs() < EPS);
        assert_eq!(s.grid.pollution[0], 0.0);
    }

    #[test]
    fn starving_agent_dies_and_run_stops() {
        let grid = GridBuilder::new(1, 1).build().unwrap();
        let mut s = sim(config(10, 0), grid, vec![(endow(1.0, 2.0, 1), AgentParams::default(), CellId(0))]);
        let end = s.run(&mut NoopObserver).unwrap();
        assert_eq!(end, Tick(1));
        assert!(s.agents.is_empty());
        assert_eq!(s.grid.occupant(CellId(0)), None);
        assert!(s.engine.registry.viewers(CellId(0)).is_empty());
    }

    #[test]
    fn old_age_kills() {
        let grid = GridBuilder::new(2, 1).build().unwrap();
        let e = ss_agent::Endowment { max_age: Some(1), ..endow(100.0, 1.0, 1) };
        let mut s = sim(config(10, 0), grid, vec![(e, AgentParams::default(), CellId(0))]);
        let first = s.step(&mut NoopObserver).unwrap();
        assert_eq!(first.deaths, 0);
        let second = s.step(&mut NoopObserver).unwrap();
        assert_eq!(second.deaths, 1);
        assert!(s.agents.is_empty());
    }

    #[test]
    fn raider_kills_and_loots_outsider() {
        let env = Environment { max_combat_loot: 5.0, ..Default::default() };
        let grid = row(&[0.0, 5.0], env);
        let raider = AgentParams { aggression: 1.0, tribe: Tribe(0), ..AgentParams::default() };
        let victim = AgentParams { tribe: Tribe(1), ..AgentParams::default() };
        let mut s = sim(
            config(10, 0),
            grid,
            vec![
                (endow(10.0, 1.0, 1), raider, CellId(0)),
                (endow(2.0, 1.0, 1), victim, CellId(1)),
            ],
        );

        let summary = s.step(&mut NoopObserver).unwrap();
        assert_eq!(summary.kills, 1);
        assert!(!s.agents.is_alive(AgentId(1)));
        assert_eq!(s.agents.cell[0], CellId(1));
        // 16 when the raider moves first, 14 when the victim harvests first.
        assert!(s.agents.sugar[0] >= 14.0 - EPS);
        assert_consistent(&s);
    }

    #[test]
    fn spawned_child_inherits_parent_params() {
        let grid = row(&[0.0, 5.0, 0.0], Environment::default());
        let parent = AgentParams { decision_model_factor: 2.5, ..AgentParams::default() };
        let mut s = sim(config(10, 0), grid, vec![(endow(10.0, 1.0, 2), parent, CellId(0))]);

        let child = s.spawn_child(AgentId(0), endow(3.0, 1.0, 1), CellId(2)).unwrap();
        assert_eq!(s.agents.living_count(), 2);
        assert_eq!(s.agents.params(child).decision_model_factor, 2.5);
        assert_eq!(s.grid.occupant(CellId(2)), Some(child));
        assert!(s.engine.cache(child).best().is_some());
        assert!(s.engine.registry.viewers(CellId(2)).contains(&AgentId(0)));
        assert_consistent(&s);
    }

    #[test]
    fn spawn_on_occupied_cell_rejected() {
        let grid = row(&[0.0, 5.0, 0.0], Environment::default());
        let mut s = sim(config(10, 0), grid, vec![(endow(10.0, 1.0, 2), AgentParams::default(), CellId(0))]);
        let err = s.spawn_child(AgentId(0), endow(3.0, 1.0, 1), CellId(0)).unwrap_err();
        assert!(matches!(err, SimError::Grid(GridError::Occupied { .. })));
        assert_eq!(s.agents.count, 1);
    }

    #[derive(Default)]
    struct Recorder {
        started:   usize,
        ticks:     Vec<Tick>,
        snapshots: Vec<Tick>,
        ended:     Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_sim_start(&mut self, _stats: &RuntimeStats) {
            self.started += 1;
        }
        fn on_tick_end(&mut self, tick: Tick, _summary: &TickSummary, stats: &RuntimeStats) {
            assert_eq!(stats.timestep, tick.0);
            self.ticks.push(tick);
        }
        fn on_snapshot(&mut self, tick: Tick, _agents: &ss_agent::AgentStore, _grid: &ss_grid::Grid) {
            self.snapshots.push(tick);
        }
        fn on_sim_end(&mut self, final_tick: Tick, _stats: &RuntimeStats) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn observer_sees_every_tick_and_snapshot() {
        let grid = GridBuilder::new(3, 3).build().unwrap();
        let mut s = sim(config(5, 2), grid, vec![(endow(100.0, 1.0, 1), AgentParams::default(), CellId(4))]);
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        assert_eq!(rec.started, 1);
        assert_eq!(rec.ticks, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(2), Tick(4)]);
        assert_eq!(rec.ended, Some(Tick(5)));
    }

    #[test]
    fn long_run_keeps_index_consistent() {
        let c = SugarscapeConfig {
            initial_agents: 40,
            environment_width: 15,
            environment_height: 15,
            environment_max_spice: 2.0,
            agent_tribes: 2,
            agent_aggression_factor: 0.5,
            environment_max_combat_loot: 3.0,
            environment_production_pollution: 0.1,
            environment_pollution_diffusion_period: 3,
            agent_decision_models: vec![
                "egoistic".into(),
                "bentham".into(),
                "egoistic_lookahead".into(),
                "bentham_lookahead".into(),
            ],
            seed: 11,
            ..SugarscapeConfig::default()
        };
        let mut s = build_sim(&c).unwrap();
        for _ in 0..20 {
            s.step(&mut NoopObserver).unwrap();
            assert_consistent(&s);
        }
    }
}
