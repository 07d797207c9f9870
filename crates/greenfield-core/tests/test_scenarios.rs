//! Behavioral scenarios for the simulation engine.

mod common;

use common::*;
use greenfield_core::prelude::*;
use greenfield_core::systems::tick_increment;
use greenfield_logic::audit::audit_trigger_probability;
use greenfield_logic::global_events::ScopeQuery;
use greenfield_logic::project_events::ProjectEventKind;
use greenfield_logic::staff::StaffEventKind;

// ── Project lifecycle ───────────────────────────────────────────────────

#[test]
fn scenario_a_start_without_lessor_fails_and_keeps_cash() {
    let mut engine = quiet_engine(SimConfig {
        starting_cash: 100_000_000.0,
        starting_reputation: 100,
        ..Default::default()
    });
    let result = engine.start_project(REGION, COUNTY, Technology::Pv);
    assert_eq!(result, Err(CommandError::MissingRequiredStaff { role: Role::Scout }));
    assert_eq!(engine.state.company.cash, 100_000_000.0);
    assert!(engine.state.projects.is_empty());
}

#[test]
fn scenario_b_one_lessor_tick() {
    let mut engine = quiet_engine(rich_config());
    let (scout, project) = pv_project(&mut engine);
    engine.state.staff.get_mut(&scout).unwrap().skill = 5;

    let p = engine.project(project).unwrap();
    assert!((tick_increment(&engine.state, p) - 4.75).abs() < 1e-9);

    // Day 1 is not a progress day.
    engine.advance_day(GameSpeed::Normal);
    assert_eq!(engine.project(project).unwrap().progress, 0.0);

    engine.advance_day(GameSpeed::Normal);
    let progress = engine.project(project).unwrap().progress;
    assert!((progress - 4.75).abs() < 1e-9, "progress {progress}");
}

#[test]
fn specialized_lessor_counts_half_again() {
    // Junior scouts roll skill 4: a plain lessor adds 0.8, a matching
    // specialist 1.2.
    let mut plain = quiet_engine(rich_config());
    let (_, plain_project) = pv_project(&mut plain);

    let mut engine = quiet_engine(rich_config());
    let scout = engine.hire_specialist(Level::Junior, Technology::Pv).unwrap();
    assert_eq!(engine.staff_member(scout).unwrap().specialization, Some(Technology::Pv));
    engine.assign_lessor(scout, COUNTY, Technology::Pv).unwrap();
    let project = engine.start_project(REGION, COUNTY, Technology::Pv).unwrap();

    let plain_tick = tick_increment(&plain.state, plain.project(plain_project).unwrap());
    let special_tick = tick_increment(&engine.state, engine.project(project).unwrap());
    assert!((plain_tick - (3.75 + 0.8)).abs() < 1e-9, "{plain_tick}");
    assert!((special_tick - (3.75 + 1.2)).abs() < 1e-9, "{special_tick}");
}

#[test]
fn specialization_only_for_scouts() {
    let mut engine = quiet_engine(rich_config());
    let cash = engine.state.company.cash;
    let result = engine.execute(&Command::HireStaff {
        role: Role::Lawyer,
        level: Level::Mid,
        specialization: Some(Technology::Wind),
    });
    assert!(matches!(result, Err(CommandError::InvalidInput(_))), "{result:?}");
    assert!(engine.state.staff.is_empty());
    assert_eq!(engine.state.company.cash, cash);

    let outcome = engine
        .execute(&Command::HireStaff {
            role: Role::Scout,
            level: Level::Mid,
            specialization: Some(Technology::Wind),
        })
        .unwrap();
    let CommandOutcome::Hired(id) = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert_eq!(engine.staff_member(id).unwrap().specialization, Some(Technology::Wind));
}

#[test]
fn scenario_c_stage_advance_without_funds_changes_nothing() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    hire_developer(&mut engine, project);
    complete_stage(&mut engine, project);
    engine.state.company.cash = 1_000.0;

    let before = engine.state.clone();
    let result = engine.advance_project_stage(project);
    assert!(matches!(result, Err(CommandError::InsufficientFunds { .. })), "{result:?}");
    assert_eq!(engine.state, before);
    let p = engine.project(project).unwrap();
    assert_eq!(p.stage, Stage::LandAcquisition);
    assert_eq!(p.progress, 100.0);
    assert_eq!(engine.state.company.cash, 1_000.0);
}

#[test]
fn stage_advance_pays_and_resets_progress() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    hire_developer(&mut engine, project);
    complete_stage(&mut engine, project);
    let cash = engine.state.company.cash;

    assert_eq!(engine.advance_project_stage(project), Ok(Stage::EnvironmentalDecision));
    let p = engine.project(project).unwrap();
    assert_eq!(p.progress, 0.0);
    assert_eq!(p.stage_costs.get(&Stage::EnvironmentalDecision), Some(&65_000.0));
    assert!((engine.state.company.cash - (cash - 65_000.0)).abs() < 1e-6);
}

#[test]
fn stage_advance_preconditions() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);

    assert_eq!(
        engine.advance_project_stage(project),
        Err(CommandError::InvalidStageTransition {
            project,
            stage: Stage::LandAcquisition
        })
    );
    complete_stage(&mut engine, project);
    assert_eq!(
        engine.advance_project_stage(project),
        Err(CommandError::MissingRequiredStaff { role: Role::Developer })
    );
    assert!(matches!(
        engine.advance_project_stage(999),
        Err(CommandError::NotFound { .. })
    ));
}

#[test]
fn full_path_to_ready_to_build() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    hire_developer(&mut engine, project);
    let reputation = engine.state.company.reputation;

    let mut visited = vec![Stage::LandAcquisition];
    while !engine.project(project).unwrap().stage.is_terminal() {
        complete_stage(&mut engine, project);
        visited.push(engine.advance_project_stage(project).unwrap());
    }
    assert_eq!(visited, Stage::ALL.to_vec());

    assert_eq!(engine.state.company.rtb_power_mw, 50.0);
    assert_eq!(engine.state.market.global_rtb_power_mw, 50.0);
    assert_eq!(engine.state.company.reputation, reputation + 10);
    assert!(matches!(
        engine.advance_project_stage(project),
        Err(CommandError::InvalidStageTransition { .. })
    ));

    // Terminal projects no longer progress.
    run_until(&mut engine, 10);
    assert_eq!(engine.project(project).unwrap().progress, 0.0);
}

#[test]
fn crossing_one_hundred_completes_the_stage_once() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    engine.state.projects.get_mut(&project).unwrap().progress = 98.0;
    let reputation = engine.state.company.reputation;

    let events = run_until(&mut engine, 6);
    let completions = events
        .iter()
        .filter(|e| matches!(e, SimEvent::StageCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(engine.project(project).unwrap().progress, 100.0);
    assert_eq!(engine.state.company.reputation, reputation + 5);
}

#[test]
fn acceleration_costs_by_power() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let cash = engine.state.company.cash;

    assert_eq!(engine.accelerate_project(project, None), Ok(100_000.0));
    assert_eq!(engine.project(project).unwrap().progress, 10.0);
    assert!((engine.state.company.cash - (cash - 100_000.0)).abs() < 1e-6);

    // Only the 90 points left in the stage are paid for.
    let reputation = engine.state.company.reputation;
    let cash = engine.state.company.cash;
    assert_eq!(engine.accelerate_project(project, Some(95.0)), Ok(900_000.0));
    assert_eq!(engine.project(project).unwrap().progress, 100.0);
    assert!((engine.state.company.cash - (cash - 900_000.0)).abs() < 1e-6);
    assert_eq!(engine.state.company.reputation, reputation + 5);

    assert!(matches!(
        engine.accelerate_project(project, Some(0.0)),
        Err(CommandError::InvalidInput(_))
    ));
}

#[test]
fn completed_stage_cannot_be_accelerated() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    complete_stage(&mut engine, project);
    let cash = engine.state.company.cash;

    assert_eq!(
        engine.accelerate_project(project, Some(10.0)),
        Err(CommandError::InvalidStageTransition {
            project,
            stage: Stage::LandAcquisition
        })
    );
    assert_eq!(engine.state.company.cash, cash);
    assert_eq!(engine.project(project).unwrap().progress, 100.0);
}

#[test]
fn land_and_grid_capacity_limit_projects() {
    let mut engine = quiet_engine(rich_config());
    // pl-2202 has 45 MW of grid capacity.
    let scout = engine.hire_staff(Role::Scout, Level::Junior).unwrap();
    engine.assign_lessor(scout, "pl-2202", Technology::Pv).unwrap();
    assert_eq!(
        engine.start_project(REGION, "pl-2202", Technology::Pv),
        Err(CommandError::CapacityExceeded {
            resource: "grid",
            limit: 45.0
        })
    );
    assert!(matches!(
        engine.start_project("mazowieckie", "pl-2202", Technology::Pv),
        Err(CommandError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.start_project(REGION, "pl-9999", Technology::Pv),
        Err(CommandError::NotFound { .. })
    ));
}

#[test]
fn project_events_shift_progress() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    run_until(&mut engine, 2);
    let before = engine.project(project).unwrap().progress;

    // Day 3: event roll, then the pick (0.7 lands on a favorable ruling).
    engine.set_rng(FixedRolls::sequence([0.0, 0.7], 0.99));
    let events = engine.advance_day(GameSpeed::Normal);

    assert!(events.contains(&SimEvent::ProjectEvent {
        project,
        kind: ProjectEventKind::FavorableRuling,
        progress_delta: 5.0,
    }));
    let p = engine.project(project).unwrap();
    assert!((p.progress - (before + 5.0)).abs() < 1e-9);
    assert!(matches!(
        p.log.last().map(|e| &e.kind),
        Some(ProjectLogKind::LocalEvent { .. })
    ));
}

// ── Staff ───────────────────────────────────────────────────────────────

#[test]
fn scenario_e_promotion_threshold_is_strict() {
    let mut engine = quiet_engine(SimConfig::default());
    let at = engine.hire_staff(Role::Lawyer, Level::Junior).unwrap();
    let above = engine.hire_staff(Role::Lawyer, Level::Junior).unwrap();
    // One staff tick adds 10 experience.
    engine.state.staff.get_mut(&at).unwrap().experience = 2_990.0;
    engine.state.staff.get_mut(&above).unwrap().experience = 2_991.0;

    let events = run_until(&mut engine, 2);

    let at = engine.staff_member(at).unwrap();
    assert_eq!(at.experience, 3_000.0);
    assert_eq!(at.level, Level::Junior);

    let above_member = engine.staff_member(above).unwrap();
    assert_eq!(above_member.level, Level::Mid);
    assert_eq!(above_member.skill, 4 + 3);
    assert_eq!(above_member.salary, 14_000.0 * 1.5);
    assert!(events.contains(&SimEvent::StaffPromoted {
        staff: above,
        level: Level::Mid,
        skill: 7
    }));
}

#[test]
fn training_program_scales_experience() {
    let mut engine = quiet_engine(rich_config());
    let id = engine.hire_staff(Role::Lobbyist, Level::Junior).unwrap();
    assert_eq!(engine.upgrade_training_program(), Ok(1));
    assert_eq!(engine.upgrade_training_program(), Ok(2));
    run_until(&mut engine, 2);
    assert!((engine.staff_member(id).unwrap().experience - 12.0).abs() < 1e-9);

    assert_eq!(engine.upgrade_training_program(), Ok(3));
    assert!(matches!(
        engine.upgrade_training_program(),
        Err(CommandError::InvalidInput(_))
    ));
}

#[test]
fn training_courses() {
    let mut engine = quiet_engine(rich_config());
    let id = engine.hire_staff(Role::EnvSpecialist, Level::Senior).unwrap();
    assert_eq!(engine.staff_member(id).unwrap().skill, 10);
    let cash = engine.state.company.cash;

    engine.train_staff(id, TrainingType::Certification).unwrap();
    assert_eq!(engine.staff_member(id).unwrap().skill, 10);
    engine.train_staff(id, TrainingType::Course).unwrap();
    assert_eq!(engine.staff_member(id).unwrap().experience, 1_500.0);
    assert!((engine.state.company.cash - (cash - 70_000.0)).abs() < 1e-6);

    engine.state.company.cash = 0.0;
    assert!(matches!(
        engine.train_staff(id, TrainingType::TeamBuilding),
        Err(CommandError::InsufficientFunds { .. })
    ));
}

#[test]
fn firing_pays_severance_and_frees_the_slot() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let dev = hire_developer(&mut engine, project);
    let cash = engine.state.company.cash;

    assert_eq!(engine.fire_staff(dev), Ok(36_000.0));
    assert!((engine.state.company.cash - (cash - 36_000.0)).abs() < 1e-6);
    assert!(engine.staff_member(dev).is_none());
    assert!(engine.project(project).unwrap().assigned_staff.is_empty());
}

#[test]
fn assignment_rules() {
    let mut engine = quiet_engine(rich_config());
    let (scout, project) = pv_project(&mut engine);
    let dev = hire_developer(&mut engine, project);
    let second = engine.hire_staff(Role::Developer, Level::Junior).unwrap();

    assert_eq!(
        engine.assign_staff(second, project),
        Err(CommandError::CapacityExceeded {
            resource: "project role",
            limit: 1.0
        })
    );
    assert!(matches!(
        engine.assign_staff(scout, project),
        Err(CommandError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.assign_lessor(dev, COUNTY, Technology::Pv),
        Err(CommandError::InvalidInput(_))
    ));

    engine.unassign_staff(dev).unwrap();
    assert!(engine.staff_member(dev).unwrap().assignment.is_none());
    engine.assign_staff(second, project).unwrap();
    assert_eq!(
        engine.project(project).unwrap().staff_in(Role::Developer),
        Some(second)
    );
}

#[test]
fn lease_pools_are_capped() {
    let mut engine = quiet_engine(rich_config());
    for _ in 0..3 {
        let scout = engine.hire_staff(Role::Scout, Level::Junior).unwrap();
        engine.assign_lessor(scout, COUNTY, Technology::Wind).unwrap();
    }
    let extra = engine.hire_staff(Role::Scout, Level::Junior).unwrap();
    assert_eq!(
        engine.assign_lessor(extra, COUNTY, Technology::Wind),
        Err(CommandError::CapacityExceeded {
            resource: "lease pool",
            limit: 3.0
        })
    );
    // Another technology in the same county is a separate pool.
    engine.assign_lessor(extra, COUNTY, Technology::Pv).unwrap();
    assert_eq!(engine.state.lease_pools.len(), 2);
}

#[test]
fn staff_events_apply_their_effects() {
    let mut engine = quiet_engine(rich_config());
    let dev = engine.hire_staff(Role::Developer, Level::Junior).unwrap();
    run_until(&mut engine, 1);

    // Day 2: event roll, then the pick (0.4 lands on burnout).
    engine.set_rng(FixedRolls::sequence([0.0, 0.4], 0.99));
    let events = engine.advance_day(GameSpeed::Normal);

    assert!(events.contains(&SimEvent::StaffEvent {
        staff: dev,
        kind: StaffEventKind::Burnout,
        reputation_delta: -2,
    }));
    let m = engine.staff_member(dev).unwrap();
    assert_eq!(m.morale, 50.0);
    assert_eq!(m.energy, 60.0);
    assert_eq!((m.productivity, m.productivity_ticks), (0.4, 5));
    assert_eq!(engine.state.company.reputation, 98);

    run_until(&mut engine, 4);
    assert_eq!(engine.staff_member(dev).unwrap().productivity_ticks, 4);
}

// ── Illegal methods and audits ──────────────────────────────────────────

#[test]
fn bribery_feeds_the_audit_model() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let cash = engine.state.company.cash;

    engine.apply_illegal_method(project, IllegalMethod::Bribery).unwrap();
    let illegals = &engine.state.company.illegals;
    assert_eq!(illegals.total_bribes, 50_000.0);
    assert_eq!(illegals.corruption_network, 10.0);
    assert_eq!(illegals.audit_risk, 15.0);
    assert_eq!(illegals.action_history.len(), 1);
    assert!(engine.project(project).unwrap().uses_illegal_methods);
    assert!((engine.state.company.cash - (cash - 50_000.0)).abs() < 1e-6);

    engine.apply_illegal_method(project, IllegalMethod::IllegalDatabase).unwrap();
    assert!(engine.state.company.illegals.has_illegal_database);
    assert_eq!(engine.state.company.illegals.total_bribes, 50_000.0);
}

#[test]
fn illegal_projects_skip_the_completion_bonus() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    engine.apply_illegal_method(project, IllegalMethod::OfficialPressure).unwrap();
    let reputation = engine.state.company.reputation;
    engine.accelerate_project(project, Some(100.0)).unwrap();
    assert_eq!(engine.state.company.reputation, reputation);
}

#[test]
fn detection_rolls_every_progress_tick() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    engine.apply_illegal_method(project, IllegalMethod::DocumentForgery).unwrap();
    run_until(&mut engine, 1);
    let reputation = engine.state.company.reputation;

    // Day 2: progress roll for detection fires, the audit trigger does not.
    engine.set_rng(FixedRolls::sequence([0.05, 0.99], 0.99));
    let events = engine.advance_day(GameSpeed::Normal);
    assert!(events.contains(&SimEvent::IllegalMethodDetected {
        project,
        reputation_loss: 10
    }));
    assert_eq!(engine.state.company.reputation, reputation - 10);
}

#[test]
fn scenario_d_saturated_audit_always_fires() {
    let mut engine = quiet_engine(rich_config());
    let (_, first) = pv_project(&mut engine);
    let second = engine.start_project(REGION, COUNTY, Technology::Pv).unwrap();
    let third = engine.start_project(REGION, COUNTY, Technology::Pv).unwrap();
    for id in [first, second, third] {
        engine.state.projects.get_mut(&id).unwrap().uses_illegal_methods = true;
    }
    engine.state.company.illegals.audit_risk = 100.0;
    engine.state.company.turns_since_last_audit = 50;
    assert!(audit_trigger_probability(&engine.state.audit_exposure()) > 1.0);

    let reputation = engine.state.company.reputation;
    let cash = engine.state.company.cash;
    let events = run_until(&mut engine, 2);

    // Roll 0.99 still triggers; pass chance is 0.7, so the audit fails.
    assert!(events.contains(&SimEvent::AuditFailed {
        fine: 150_000.0,
        reputation_loss: 25
    }));
    assert_eq!(engine.state.company.reputation, reputation - 25);
    assert!((engine.state.company.cash - (cash - 150_000.0)).abs() < 1e-6);
    assert_eq!(engine.state.company.turns_since_last_audit, 0);
    assert_eq!(engine.state.company.last_audit_day, Some(2));
}

#[test]
fn passed_audit_lowers_risk() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.state.company.illegals.audit_risk = 100.0;
    run_until(&mut engine, 1);
    engine.set_rng(FixedRolls::sequence([0.5, 0.5], 0.99));
    let events = engine.advance_day(GameSpeed::Normal);
    assert!(events.contains(&SimEvent::AuditPassed { risk_reduction: 10.0 }));
    assert_eq!(engine.state.company.illegals.audit_risk, 90.0);
}

#[test]
fn clean_company_is_never_audited() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.set_rng(FixedRolls::always(0.0));
    engine.state.company.turns_since_last_audit = 100;
    let events = run_until(&mut engine, 4);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SimEvent::AuditPassed { .. } | SimEvent::AuditFailed { .. })));
    assert_eq!(engine.state.company.turns_since_last_audit, 102);
}

// ── Global events ───────────────────────────────────────────────────────

#[test]
fn global_events_activate_scope_and_expire() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.set_rng(FixedRolls::always(0.0));
    let events = run_until(&mut engine, 5);
    let activated: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::GlobalEventActivated { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        activated,
        ["rate_hike", "renewable_auction", "local_protests", "drought", "panel_price_drop"]
    );
    // Local protests cost 3 reputation.
    assert_eq!(engine.state.company.reputation, 97);

    assert_eq!(engine.get_active_global_events(None).len(), 5);
    let pv = ScopeQuery::technology(Technology::Pv);
    assert_eq!(engine.get_active_global_events(Some(&pv)).len(), 4);
    let protest_region = ScopeQuery::region("dolnoslaskie");
    assert_eq!(engine.get_active_global_events(Some(&protest_region)).len(), 3);

    engine.set_rng(FixedRolls::always(0.99));
    let events = run_until(&mut engine, 35);
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::GlobalEventExpired { key, .. } if key == "local_protests"
    )));
    assert_eq!(engine.state.global_events.active.len(), 4);
}

#[test]
fn market_events_move_valuations() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    run_until(&mut engine, 4);
    let before = engine.get_market_value(project).unwrap();

    // Day 5: the economic category fires and draws its first template
    // (interest rate hike, market × 0.9). Nothing else fires.
    engine.set_rng(FixedRolls::sequence([0.0, 0.0], 0.99));
    engine.advance_day(GameSpeed::Normal);
    let after = engine.get_market_value(project).unwrap();
    assert!((after.technology - 0.9).abs() < 1e-12);
    assert!((after.value - before.value * 0.9).abs() < 1e-6);
    assert!((engine.project(project).unwrap().market_value - after.value).abs() < 1e-6);
}

#[test]
fn valuation_quality_ignores_productivity() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    assert_eq!(engine.get_market_value(project).unwrap().quality, 1.0);

    let dev = hire_developer(&mut engine, project);
    let member = engine.state.staff.get_mut(&dev).unwrap();
    member.skill = 10;
    member.productivity = 1.3;
    assert_eq!(engine.get_market_value(project).unwrap().quality, 1.5);
    // Progress still sees the boosted skill.
    assert!((engine.state.developer_skill(engine.project(project).unwrap()).unwrap() - 13.0).abs() < 1e-9);
}

// ── Parallel tasks ──────────────────────────────────────────────────────

#[test]
fn tasks_complete_exactly_once() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let cash = engine.state.company.cash;
    let task = engine.start_task(project, TaskKind::GridStudy, 4, 10_000.0).unwrap();
    assert!((engine.state.company.cash - (cash - 10_000.0)).abs() < 1e-6);

    let events = run_until(&mut engine, 20);
    let completions: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SimEvent::TaskCompleted { .. }))
        .collect();
    assert_eq!(
        completions,
        [&SimEvent::TaskCompleted {
            project,
            task,
            kind: TaskKind::GridStudy
        }]
    );
    assert!(engine.project(project).unwrap().tasks.is_empty());
    assert_eq!(engine.cancel_task(task), Err(CommandError::not_found("task", task)));
}

#[test]
fn task_finishes_on_its_last_progress_tick() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let task = engine.start_task(project, TaskKind::LegalReview, 12, 5_000.0).unwrap();

    // Progress ticks run on even days: the 11th is day 22, the 12th day 24.
    run_until(&mut engine, 22);
    let running = &engine.project(project).unwrap().tasks[0];
    assert_eq!(running.elapsed, 11);
    assert!(running.progress < 100.0);

    let events = run_until(&mut engine, 24);
    assert!(events.contains(&SimEvent::TaskCompleted {
        project,
        task,
        kind: TaskKind::LegalReview
    }));
    assert!(engine.project(project).unwrap().tasks.is_empty());
}

#[test]
fn task_limits() {
    let mut engine = quiet_engine(rich_config());
    let (_, a) = pv_project(&mut engine);
    let b = engine.start_project(REGION, COUNTY, Technology::Pv).unwrap();

    engine.start_task(a, TaskKind::LegalReview, 5, 1_000.0).unwrap();
    engine.start_task(a, TaskKind::LegalReview, 5, 1_000.0).unwrap();
    assert_eq!(
        engine.start_task(a, TaskKind::LegalReview, 5, 1_000.0),
        Err(CommandError::CapacityExceeded {
            resource: "tasks per project",
            limit: 2.0
        })
    );
    engine.start_task(b, TaskKind::LegalReview, 5, 1_000.0).unwrap();
    assert_eq!(
        engine.start_task(b, TaskKind::LegalReview, 5, 1_000.0),
        Err(CommandError::CapacityExceeded {
            resource: "parallel tasks",
            limit: 3.0
        })
    );
}

#[test]
fn task_funds_and_cancellation() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);

    let before = engine.state.clone();
    let huge = engine.state.company.cash + 1.0;
    assert!(matches!(
        engine.start_task(project, TaskKind::EnvironmentalSurvey, 10, huge),
        Err(CommandError::InsufficientFunds { .. })
    ));
    assert_eq!(engine.state, before);

    let cash = engine.state.company.cash;
    let task = engine
        .start_task(project, TaskKind::EnvironmentalSurvey, 10, 40_000.0)
        .unwrap();
    assert_eq!(engine.cancel_task(task), Ok(20_000.0));
    assert!((engine.state.company.cash - (cash - 20_000.0)).abs() < 1e-6);
    assert!(engine.project(project).unwrap().tasks.is_empty());
}

// ── Market ──────────────────────────────────────────────────────────────

#[test]
fn direct_sale_releases_staff() {
    let mut engine = quiet_engine(rich_config());
    let (scout, project) = pv_project(&mut engine);
    let dev = hire_developer(&mut engine, project);
    let cash = engine.state.company.cash;

    engine.sell_project(project, 1_000_000.0).unwrap();
    assert!(engine.project(project).is_none());
    assert!(engine.staff_member(dev).unwrap().assignment.is_none());
    // Scouts stay in their lease pool.
    assert!(engine.staff_member(scout).unwrap().assignment.is_some());
    assert!((engine.state.company.cash - (cash + 1_000_000.0)).abs() < 1e-6);
    assert_eq!(engine.state.company.metrics.total_revenue, 1_000_000.0);
    assert_eq!(engine.state.market.sales.len(), 1);
}

#[test]
fn listed_project_finds_a_buyer() {
    let mut engine = quiet_engine(SimConfig {
        market_buyer_chance: 1.0,
        ..rich_config()
    });
    let (_, project) = pv_project(&mut engine);
    let asking = engine.send_project_to_market(project, None).unwrap();
    assert!((asking - engine.project(project).unwrap().market_value).abs() < 1e-6);

    let events = run_until(&mut engine, 5);
    assert!(events.contains(&SimEvent::ProjectSold {
        project,
        price: asking,
        buyer: Buyer::Market
    }));
    assert!(engine.state.projects.is_empty());
}

#[test]
fn overpriced_listing_does_not_sell() {
    let mut engine = quiet_engine(SimConfig {
        market_buyer_chance: 1.0,
        ..rich_config()
    });
    let (_, project) = pv_project(&mut engine);
    let value = engine.project(project).unwrap().market_value;
    engine.send_project_to_market(project, Some(value * 2.0)).unwrap();
    run_until(&mut engine, 10);
    assert!(engine.project(project).is_some());
}

#[test]
fn appraisal_shock_is_logged() {
    let mut engine = quiet_engine(rich_config());
    let (_, project) = pv_project(&mut engine);
    let value = engine.project(project).unwrap().market_value;

    engine.set_rng(FixedRolls::sequence([0.0, 0.0, 0.0], 0.99));
    let asking = engine.send_project_to_market(project, None).unwrap();
    assert!((asking - value * 0.8).abs() < 1e-6);
    assert_eq!(engine.state.market.shocks.len(), 1);
    assert_eq!(engine.state.market.shocks[0].shock, greenfield_logic::valuation::MarketShock::InvestorPanic);
}

// ── Finance ─────────────────────────────────────────────────────────────

#[test]
fn salaries_may_push_cash_negative() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.hire_staff(Role::Developer, Level::Junior).unwrap();
    engine.state.company.cash = 5_000.0;
    let events = run_until(&mut engine, 30);
    assert!(events.contains(&SimEvent::SalariesPaid { total: 12_000.0 }));
    assert_eq!(engine.state.company.cash, -7_000.0);
}

#[test]
fn salaries_floor_at_zero_when_configured() {
    let mut engine = quiet_engine(SimConfig {
        negative_cash_policy: NegativeCashPolicy::FloorAtZero,
        ..Default::default()
    });
    engine.hire_staff(Role::Developer, Level::Junior).unwrap();
    engine.state.company.cash = 5_000.0;
    let events = run_until(&mut engine, 30);
    assert!(events.contains(&SimEvent::SalariesPaid { total: 5_000.0 }));
    assert_eq!(engine.state.company.cash, 0.0);
}

#[test]
fn loans_are_repaid_monthly() {
    let mut engine = quiet_engine(SimConfig::default());
    let loan = engine.take_loan(120_000.0, 12).unwrap();
    assert_eq!(engine.state.company.cash, 2_120_000.0);

    let mut events = Vec::new();
    for _ in 0..36 {
        events.extend(engine.advance_day(GameSpeed::Fastest));
    }
    let installments = events
        .iter()
        .filter(|e| matches!(e, SimEvent::LoanInstallment { .. }))
        .count();
    assert_eq!(installments, 12);
    assert!(events.contains(&SimEvent::LoanRepaid { loan }));
    assert!(engine.state.company.loans.is_empty());
    assert!(engine.state.company.cash < 2_000_000.0);

    assert!(matches!(engine.take_loan(-1.0, 12), Err(CommandError::InvalidInput(_))));
    assert!(matches!(engine.take_loan(1.0, 0), Err(CommandError::InvalidInput(_))));
}
