//! Greenfield Headless Simulation Harness
//!
//! Validates the reference data, sweeps the pure formulas and runs seeded
//! company simulations end to end. No UI, no persistence backend.
//!
//! Usage:
//!   cargo run -p greenfield-simtest
//!   cargo run -p greenfield-simtest -- --verbose
//!   cargo run -p greenfield-simtest -- --days 2000

use std::collections::HashSet;

use greenfield_core::config::config_from_json;
use greenfield_core::persistence::{load_snapshot, load_snapshot_json, save_snapshot, save_snapshot_json};
use greenfield_core::prelude::*;
use greenfield_core::systems::next_stage_cost;
use greenfield_logic::audit::{audit_trigger_probability, pass_probability, AuditExposure};
use greenfield_logic::costs::transition_cost;
use greenfield_logic::global_events::{catalog, templates_for, EventCategory};
use greenfield_logic::stages::blended_value_multiplier;
use greenfield_logic::valuation::{market_value, ValuationInput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Reference data (same JSON a host application ships) ─────────────────
const COUNTIES_JSON: &str = include_str!("../../../data/counties.json");
const CONFIG_JSON: &str = include_str!("../../../data/sim_config.json");

const TECHNOLOGIES: [Technology; 6] = [
    Technology::Pv,
    Technology::Wind,
    Technology::Bess,
    Technology::PvBess,
    Technology::WindPv,
    Technology::WindBess,
];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let days = args
        .iter()
        .position(|a| a == "--days")
        .and_then(|i| args.get(i + 1))
        .and_then(|d| d.parse::<u32>().ok())
        .unwrap_or(1_095);
    println!("=== Greenfield Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Reference data
    let data = validate_reference_data(&mut results);

    // 2. Formula sweeps
    results.extend(validate_formulas(verbose));

    // 3. Seeded company runs
    if let Some((catalog, config)) = data {
        results.extend(validate_company_runs(&catalog, &config, days, verbose));
        results.extend(validate_determinism(&catalog, &config));
        results.extend(validate_snapshots(&catalog, &config));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Reference Data ───────────────────────────────────────────────────

fn validate_reference_data(results: &mut Vec<TestResult>) -> Option<(StaticCatalog, SimConfig)> {
    println!("--- Reference Data ---");

    let catalog = match StaticCatalog::from_json(COUNTIES_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new("counties_parse", false, format!("JSON parse error: {e}")));
            return None;
        }
    };

    results.push(TestResult::new(
        "counties_not_empty",
        catalog.counties.len() >= 6,
        format!(
            "{} counties in {} regions",
            catalog.counties.len(),
            catalog.regions().len()
        ),
    ));

    let mut seen = HashSet::new();
    let dupes: Vec<&str> = catalog
        .counties
        .iter()
        .filter(|c| !seen.insert(c.id.as_str()))
        .map(|c| c.id.as_str())
        .collect();
    results.push(TestResult::new(
        "counties_unique_ids",
        dupes.is_empty(),
        if dupes.is_empty() {
            "all county ids unique".to_string()
        } else {
            format!("duplicate ids: {dupes:?}")
        },
    ));

    let bad_capacity: Vec<&str> = catalog
        .counties
        .iter()
        .filter(|c| c.land_capacity_mw <= 0.0 || c.grid_capacity_mw <= 0.0)
        .map(|c| c.id.as_str())
        .collect();
    results.push(TestResult::new(
        "counties_positive_capacity",
        bad_capacity.is_empty(),
        if bad_capacity.is_empty() {
            "every county has land and grid capacity".to_string()
        } else {
            format!("without capacity: {bad_capacity:?}")
        },
    ));

    // Land is the outer bound; grid capacity never exceeds it.
    let grid_over_land = catalog
        .counties
        .iter()
        .filter(|c| c.grid_capacity_mw > c.land_capacity_mw)
        .count();
    results.push(TestResult::new(
        "counties_grid_within_land",
        grid_over_land == 0,
        format!("{grid_over_land} counties with grid > land"),
    ));

    let config = match config_from_json(CONFIG_JSON) {
        Ok(c) => {
            results.push(TestResult::new(
                "config_valid",
                true,
                format!("seed {:?}, cash {:.0}", c.seed, c.starting_cash),
            ));
            c
        }
        Err(e) => {
            results.push(TestResult::new("config_valid", false, e.to_string()));
            return None;
        }
    };

    Some((catalog, config))
}

// ── 2. Formula Sweeps ───────────────────────────────────────────────────

fn validate_formulas(verbose: bool) -> Vec<TestResult> {
    println!("--- Formula Sweeps ---");
    let mut results = Vec::new();

    // Value never drops while a project moves through the pipeline.
    let mut last = 0.0;
    let mut monotonic = true;
    for stage in Stage::ALL {
        for step in 0..=10 {
            let m = blended_value_multiplier(stage, step as f64 * 10.0);
            if m + 1e-12 < last {
                monotonic = false;
            }
            last = m;
        }
    }
    results.push(TestResult::new(
        "stage_value_monotonic",
        monotonic,
        format!("RTB multiplier {last:.2}"),
    ));

    let mut bad_costs = Vec::new();
    for tech in TECHNOLOGIES {
        for stage in Stage::ALL.iter().skip(1) {
            let total = transition_cost(*stage, tech, tech.default_power_mw()).total();
            if verbose {
                println!("    {tech:?} → {}: {total:.0}", stage.label());
            }
            if total <= 0.0 {
                bad_costs.push(format!("{tech:?}/{stage:?}"));
            }
        }
    }
    results.push(TestResult::new(
        "transition_costs_positive",
        bad_costs.is_empty(),
        if bad_costs.is_empty() {
            "every transition costs something".to_string()
        } else {
            format!("free transitions: {bad_costs:?}")
        },
    ));

    let empty: Vec<String> = EventCategory::ALL
        .iter()
        .filter(|c| templates_for(**c).is_empty())
        .map(|c| format!("{c:?}"))
        .collect();
    results.push(TestResult::new(
        "event_catalog_covers_categories",
        empty.is_empty(),
        format!("{} templates, empty categories: {empty:?}", catalog().len()),
    ));

    let mut rtb_beats_land = true;
    for tech in TECHNOLOGIES {
        let input = |stage| ValuationInput {
            power_mw: tech.default_power_mw(),
            stage,
            progress: 0.0,
            technology: tech,
            global_market_modifier: 1.0,
            technology_modifier: 1.0,
            location_modifier: 1.0,
            developer_skill: Some(5.0),
            random_event_multiplier: 1.0,
        };
        let land = market_value(&input(Stage::LandAcquisition)).value;
        let rtb = market_value(&input(Stage::ReadyToBuild)).value;
        if verbose {
            println!("    {tech:?}: land {land:.0}, RTB {rtb:.0}");
        }
        rtb_beats_land &= rtb > land && land > 0.0;
    }
    results.push(TestResult::new(
        "valuation_rewards_progress",
        rtb_beats_land,
        "RTB worth more than land for every technology",
    ));

    let mut probabilities_ok = true;
    for risk in [0.0, 25.0, 50.0, 100.0] {
        for illegal in [0usize, 1, 5, 20] {
            let exposure = AuditExposure {
                audit_risk: risk,
                turns_since_last_audit: 40,
                reputation: 40,
                illegal_project_count: illegal,
                illegal_history_len: illegal * 2,
                total_bribes: 0.0,
            };
            let pass = pass_probability(&exposure);
            probabilities_ok &= (0.1..=1.0).contains(&pass) && audit_trigger_probability(&exposure) >= 0.0;
        }
    }
    results.push(TestResult::new(
        "audit_probabilities_bounded",
        probabilities_ok,
        "pass probability within [0.1, 1] over exposure grid",
    ));

    results
}

// ── 3. Company Runs ─────────────────────────────────────────────────────

/// Outcome counters for one simulated company.
#[derive(Debug, Default)]
struct RunStats {
    projects_started: usize,
    ready_to_build: usize,
    sold: usize,
    audits: usize,
    global_events: usize,
    promotions: usize,
    loans: usize,
    violations: Vec<String>,
}

/// A simple developer bot: staff every project, push stages as soon as
/// they complete (borrowing when short), list finished projects and keep a
/// task pipeline busy.
fn play_company(engine: &mut SimulationEngine, days: u32) -> RunStats {
    let mut stats = RunStats::default();
    let counties: Vec<CountyInfo> = engine.catalog().counties().to_vec();

    for (i, county) in counties.iter().take(4).enumerate() {
        let tech = TECHNOLOGIES[i % TECHNOLOGIES.len()];
        let opened = engine
            .hire_specialist(Level::Mid, tech)
            .and_then(|scout| engine.assign_lessor(scout, &county.id, tech))
            .and_then(|_| engine.start_project(&county.region_id, &county.id, tech));
        let project = match opened {
            Ok(p) => p,
            Err(e) => {
                stats.violations.push(format!("could not open project in {}: {e}", county.id));
                continue;
            }
        };
        stats.projects_started += 1;
        for role in [Role::Developer, Role::Lawyer, Role::EnvSpecialist, Role::Lobbyist] {
            let _ = engine
                .hire_staff(role, Level::Junior)
                .and_then(|s| engine.assign_staff(s, project));
        }
    }

    while engine.state.clock.day < days {
        for event in engine.advance_day(GameSpeed::Normal) {
            match event {
                SimEvent::ReadyToBuild { .. } => stats.ready_to_build += 1,
                SimEvent::ProjectSold { .. } => stats.sold += 1,
                SimEvent::AuditPassed { .. } | SimEvent::AuditFailed { .. } => stats.audits += 1,
                SimEvent::GlobalEventActivated { .. } => stats.global_events += 1,
                SimEvent::StaffPromoted { .. } => stats.promotions += 1,
                _ => {}
            }
        }

        let ids: Vec<ProjectId> = engine.state.projects.keys().copied().collect();
        for id in ids {
            let Some(project) = engine.project(id) else { continue };
            if project.is_terminal() {
                if project.listing.is_none() {
                    let _ = engine.send_project_to_market(id, None);
                }
            } else if project.is_stage_complete() {
                // Borrow the shortfall rather than stall the pipeline.
                if let Some((_, cost)) = next_stage_cost(&engine.state, project) {
                    let short = cost - engine.state.company.cash;
                    if short > 0.0 && engine.take_loan(short * 1.5, 60).is_ok() {
                        stats.loans += 1;
                    }
                }
                let _ = engine.advance_project_stage(id);
            } else if project.tasks.is_empty() && engine.state.task_count() < 3 {
                let _ = engine.start_task(id, TaskKind::LegalReview, 5, 25_000.0);
            }
        }

        check_invariants(&engine.state, &mut stats.violations);
    }
    stats
}

fn check_invariants(state: &SimulationState, violations: &mut Vec<String>) {
    let day = state.clock.day;
    for p in state.projects.values() {
        if !(0.0..=100.0).contains(&p.progress) {
            violations.push(format!("day {day}: project {} progress {:.2}", p.id, p.progress));
        }
    }
    for s in state.staff.values() {
        if !(1..=10).contains(&s.skill)
            || !(0.0..=100.0).contains(&s.morale)
            || !(0.0..=100.0).contains(&s.energy)
        {
            violations.push(format!("day {day}: staff {} out of bounds", s.id));
        }
    }
    let company = &state.company;
    if !(0..=200).contains(&company.reputation) || !(0.0..=100.0).contains(&company.illegals.audit_risk) {
        violations.push(format!("day {day}: company gauges out of bounds"));
    }
}

fn validate_company_runs(
    catalog: &StaticCatalog,
    config: &SimConfig,
    days: u32,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Company Runs ({days} days) ---");
    let mut results = Vec::new();
    let base_seed = config.seed.unwrap_or(0);

    for offset in 0..3u64 {
        let seed = base_seed + offset;
        let mut engine = SimulationEngine::with_rng(
            config.clone(),
            catalog.clone(),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let stats = play_company(&mut engine, days);
        if verbose {
            println!(
                "    seed {seed}: {stats:?}, cash {:.0}, reputation {}",
                engine.state.company.cash, engine.state.company.reputation
            );
        }

        results.push(TestResult::new(
            &format!("run_{seed}_invariants"),
            stats.violations.is_empty(),
            match stats.violations.first() {
                None => format!("{days} days clean"),
                Some(first) => format!("{} violations, first: {first}", stats.violations.len()),
            },
        ));
        results.push(TestResult::new(
            &format!("run_{seed}_pipeline_moves"),
            stats.projects_started > 0 && stats.ready_to_build > 0,
            format!(
                "{} started, {} reached RTB, {} sold",
                stats.projects_started, stats.ready_to_build, stats.sold
            ),
        ));
        results.push(TestResult::new(
            &format!("run_{seed}_clock"),
            engine.state.clock.day == days && engine.state.clock.turn == days / 2,
            format!("day {} turn {}", engine.state.clock.day, engine.state.clock.turn),
        ));
        results.push(TestResult::new(
            &format!("run_{seed}_world_is_alive"),
            stats.global_events > 0,
            format!(
                "{} global events, {} audits, {} promotions",
                stats.global_events, stats.audits, stats.promotions
            ),
        ));
    }

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(catalog: &StaticCatalog, config: &SimConfig) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let run = || {
        let mut engine = SimulationEngine::with_rng(
            config.clone(),
            catalog.clone(),
            ChaCha8Rng::seed_from_u64(77),
        );
        play_company(&mut engine, 180);
        engine.state
    };
    let a = run();
    let b = run();
    vec![TestResult::new(
        "same_seed_same_state",
        a == b,
        format!("cash {:.0} vs {:.0}", a.company.cash, b.company.cash),
    )]
}

// ── 5. Snapshots ────────────────────────────────────────────────────────

fn validate_snapshots(catalog: &StaticCatalog, config: &SimConfig) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();
    let mut engine = SimulationEngine::with_rng(
        config.clone(),
        catalog.clone(),
        ChaCha8Rng::seed_from_u64(5),
    );
    play_company(&mut engine, 120);
    let state = engine.state;

    let binary = save_snapshot(&state).and_then(|bytes| {
        let size = bytes.len();
        load_snapshot(&bytes).map(|loaded| (loaded, size))
    });
    results.push(match binary {
        Ok((loaded, size)) => TestResult::new("snapshot_bincode", loaded == state, format!("{size} bytes")),
        Err(e) => TestResult::new("snapshot_bincode", false, e.to_string()),
    });

    let json = save_snapshot_json(&state).and_then(|text| {
        let size = text.len();
        load_snapshot_json(&text).map(|loaded| (loaded, size))
    });
    results.push(match json {
        Ok((loaded, size)) => TestResult::new("snapshot_json", loaded == state, format!("{size} chars")),
        Err(e) => TestResult::new("snapshot_json", false, e.to_string()),
    });

    results
}
