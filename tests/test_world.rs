use danmaku_shooter::archetypes::Archetype;
use danmaku_shooter::entities::*;
use danmaku_shooter::input::InputState;
use danmaku_shooter::tuning::MatchTuning;
use danmaku_shooter::world::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Default scoring, but enemies only appear when a test places them.
fn quiet_tuning() -> MatchTuning {
    MatchTuning { enemy_spawn_chance: 0.0, ..MatchTuning::default() }
}

fn setup(archetype: Archetype) -> (World, Progress, StdRng) {
    let tuning = quiet_tuning();
    (World::new(archetype, tuning), Progress::new(&tuning), StdRng::seed_from_u64(1))
}

fn idle() -> InputState {
    InputState::default()
}

/// Enemy centred on `(x, y)`.
fn enemy_at(kind: EnemyKind, x: f32, y: f32) -> Enemy {
    let mut e = Enemy::new(kind, x - 15.0);
    e.body.y = y;
    e
}

/// Plain upward player shot that lands on `(x, y)` after one tick.
fn shot_onto(x: f32, y: f32, flags: ShotFlags) -> Projectile {
    Projectile::spawn(x, y + 10.0, 0.0, -10.0, Side::Player, Tint::Cyan, flags)
}

fn orb_at(x: f32, y: f32) -> Projectile {
    Projectile::spawn(x, y, 0.0, 0.0, Side::Enemy, Tint::EnemyOrb, ShotFlags::default())
}

/// A boss that has just reached the battle line, directly above centre.
fn parked_boss(world: &mut World, hp: u32) {
    let mut boss = Boss::new(1, 100);
    boss.body.y = 200.0;
    boss.hp = hp;
    world.boss = Some(boss);
}

// ── Enemy hits ────────────────────────────────────────────────────────────────

#[test]
fn shooting_an_enemy_scores_and_consumes_the_shot() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.player_shots.push(shot_onto(100.0, 300.0, ShotFlags::default()));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(events, vec![FrameEvent::EnemyKilled { kind: EnemyKind::Normal }]);
    assert_eq!(progress.score, 10);
    assert!(world.enemies.is_empty());
    assert!(world.player_shots.is_empty());
}

#[test]
fn plain_shot_stops_at_first_enemy() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.player_shots.push(shot_onto(100.0, 300.0, ShotFlags::default()));

    world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(progress.score, 10);
    assert_eq!(world.enemies.len(), 1);
    assert!(world.player_shots.is_empty());
}

#[test]
fn piercing_shot_passes_through_enemies() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Charge);
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.enemies.push(enemy_at(EnemyKind::Wavy, 100.0, 300.0));
    world
        .player_shots
        .push(shot_onto(100.0, 300.0, ShotFlags { pierce: true, ..ShotFlags::default() }));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(events.len(), 2);
    assert_eq!(progress.score, 20);
    assert!(world.enemies.is_empty());
    assert_eq!(world.player_shots.len(), 1);
}

#[test]
fn several_shots_on_one_enemy_score_once() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.player_shots.push(shot_onto(95.0, 300.0, ShotFlags::default()));
    world.player_shots.push(shot_onto(105.0, 300.0, ShotFlags::default()));

    world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(progress.score, 10);
    assert!(world.player_shots.is_empty());
}

#[test]
fn shots_in_flight_leave_enemies_alone() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.player_shots.push(shot_onto(400.0, 300.0, ShotFlags::default()));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert!(events.is_empty());
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(world.player_shots.len(), 1);
}

// ── Melee erasure ─────────────────────────────────────────────────────────────

#[test]
fn melee_blade_erases_enemy_shots() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Melee);
    let blade = ShotFlags { melee: true, life: 15, size: Some((20.0, 20.0)), ..ShotFlags::default() };
    world
        .player_shots
        .push(Projectile::spawn(400.0, 400.0, 0.0, 0.0, Side::Player, Tint::Blade, blade));
    world.enemy_shots.push(orb_at(400.0, 400.0));
    world.enemy_shots.push(orb_at(100.0, 100.0));

    world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(world.enemy_shots.len(), 1);
    assert_eq!(world.enemy_shots[0].body.center(), (100.0, 100.0));
    assert_eq!(world.player_shots.len(), 1);
    assert_eq!(world.player_shots[0].life, Some(14));
}

#[test]
fn erased_shot_cannot_hit_the_player() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Melee);
    let (px, py) = world.player.body.center();
    let blade = ShotFlags { melee: true, life: 15, size: Some((20.0, 20.0)), ..ShotFlags::default() };
    world
        .player_shots
        .push(Projectile::spawn(px, py, 0.0, 0.0, Side::Player, Tint::Blade, blade));
    world.enemy_shots.push(orb_at(px, py));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert!(!events.contains(&FrameEvent::PlayerDown));
    assert!(world.enemy_shots.is_empty());
}

#[test]
fn plain_shots_do_not_erase_enemy_shots() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    world
        .player_shots
        .push(Projectile::spawn(400.0, 400.0, 0.0, 0.0, Side::Player, Tint::Cyan, ShotFlags::default()));
    world.enemy_shots.push(orb_at(400.0, 400.0));

    world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(world.enemy_shots.len(), 1);
    assert_eq!(world.player_shots.len(), 1);
}

// ── Boss hits ─────────────────────────────────────────────────────────────────

#[test]
fn boss_hit_scores_and_consumes_even_piercing_shots() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Charge);
    parked_boss(&mut world, 100);
    world
        .player_shots
        .push(shot_onto(300.0, 202.0, ShotFlags { damage: 5, pierce: true, ..ShotFlags::default() }));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(events, vec![FrameEvent::BossDamaged { damage: 5, hp: 95 }]);
    assert_eq!(progress.score, 1);
    assert!(world.player_shots.is_empty());
    assert_eq!(world.boss.as_ref().map(|b| b.hp), Some(95));
}

#[test]
fn defeating_the_boss_advances_progress() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    parked_boss(&mut world, 1);
    world.player_shots.push(shot_onto(295.0, 202.0, ShotFlags::default()));
    world.player_shots.push(shot_onto(305.0, 202.0, ShotFlags::default()));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(
        events,
        vec![FrameEvent::BossDamaged { damage: 1, hp: 0 }, FrameEvent::BossDefeated { level: 1 }]
    );
    assert!(world.boss.is_none());
    assert_eq!(progress.score, 1001);
    assert_eq!(progress.boss_level, 2);
    assert_eq!(progress.next_boss_score, 1151);
    // The second shot arrived after the boss was gone.
    assert_eq!(world.player_shots.len(), 1);
}

#[test]
fn no_enemies_spawn_while_boss_is_up() {
    let tuning = MatchTuning { enemy_spawn_chance: 1.0, ..MatchTuning::default() };
    let mut world = World::new(Archetype::Balance, tuning);
    let mut progress = Progress::new(&tuning);
    let mut rng = StdRng::seed_from_u64(3);

    world.step(&idle(), 1, &mut progress, &mut rng);
    assert_eq!(world.enemies.len(), 1);

    parked_boss(&mut world, 100);
    world.enemies.clear();
    for now in 2..20 {
        world.step(&idle(), now, &mut progress, &mut rng);
    }
    assert!(world.enemies.is_empty());
}

// ── Boss arrival ──────────────────────────────────────────────────────────────

#[test]
fn boss_arrival_sweeps_remaining_enemies() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    progress.score = 140;
    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
    world.enemies.push(enemy_at(EnemyKind::Normal, 200.0, 300.0));
    world.enemies.push(enemy_at(EnemyKind::Wavy, 300.0, 300.0));
    world.enemies.push(enemy_at(EnemyKind::Shooter, 400.0, 300.0));
    world.player_shots.push(shot_onto(100.0, 300.0, ShotFlags::default()));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(
        events,
        vec![
            FrameEvent::EnemyKilled { kind: EnemyKind::Normal },
            FrameEvent::BossArrived { level: 1, swept: 3 },
        ]
    );
    assert_eq!(progress.score, 180);
    assert!(world.enemies.is_empty());
    let boss = world.boss.as_ref().expect("boss should be up");
    assert_eq!(boss.hp, 100);
    assert_eq!(boss.phase, BossPhase::Entering);
}

#[test]
fn fifteen_kills_summon_the_first_boss() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    let mut arrivals = Vec::new();
    for now in 1..=15 {
        world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 300.0));
        world.player_shots.push(shot_onto(100.0, 300.0, ShotFlags::default()));
        let events = world.step(&idle(), now, &mut progress, &mut rng);
        arrivals.extend(events.into_iter().filter(|e| matches!(e, FrameEvent::BossArrived { .. })));
    }
    assert_eq!(arrivals, vec![FrameEvent::BossArrived { level: 1, swept: 0 }]);
    assert_eq!(progress.score, 150);
    assert_eq!(world.boss.as_ref().map(|b| b.max_hp), Some(100));
}

#[test]
fn player_hit_ends_the_tick_before_boss_arrival() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    progress.score = 150;
    let (px, py) = world.player.body.center();
    world.enemies.push(enemy_at(EnemyKind::Normal, px, py - 3.0));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);

    assert_eq!(events, vec![FrameEvent::PlayerDown]);
    assert!(world.boss.is_none());
}

#[test]
fn enemy_shot_on_player_is_fatal() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Speed);
    let (px, py) = world.player.body.center();
    world.enemy_shots.push(orb_at(px, py));

    let events = world.step(&idle(), 1, &mut progress, &mut rng);
    assert_eq!(events, vec![FrameEvent::PlayerDown]);
}

#[test]
fn touching_the_boss_is_fatal() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Balance);
    let mut boss = Boss::new(1, 100);
    boss.body.y = world.player.body.y - 2.0;
    world.boss = Some(boss);

    let events = world.step(&idle(), 1, &mut progress, &mut rng);
    assert!(events.contains(&FrameEvent::PlayerDown));
}

// ── Homing targets ────────────────────────────────────────────────────────────

#[test]
fn nearest_target_ignores_enemies_above_screen() {
    let (mut world, _, _) = setup(Archetype::Homing);
    world.enemies.push(Enemy::new(EnemyKind::Normal, 100.0));
    assert_eq!(world.nearest_target(), None);

    world.enemies.push(enemy_at(EnemyKind::Normal, 200.0, 100.0));
    world.enemies.push(enemy_at(EnemyKind::Normal, 300.0, 500.0));
    assert_eq!(world.nearest_target(), Some((300.0, 500.0)));
}

#[test]
fn nearest_target_includes_boss_while_entering() {
    let (mut world, _, _) = setup(Archetype::Homing);
    world.boss = Some(Boss::new(1, 100));
    assert_eq!(world.nearest_target(), Some((300.0, -100.0)));

    world.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 200.0));
    assert_eq!(world.nearest_target(), Some((100.0, 200.0)));
}

#[test]
fn homing_fires_straight_up_without_targets() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Homing);
    let fire = InputState { fire: true, ..idle() };
    world.step(&fire, 1, &mut progress, &mut rng);

    assert_eq!(world.player_shots.len(), 2);
    for s in &world.player_shots {
        assert!(s.vx.abs() < 1e-4);
        assert!((s.vy + 8.0).abs() < 1e-4);
    }
}

#[test]
fn homing_aims_at_enemy_in_world() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Homing);
    world.enemies.push(enemy_at(EnemyKind::Normal, 285.0, 300.0));
    let fire = InputState { fire: true, ..idle() };
    world.step(&fire, 1, &mut progress, &mut rng);

    let left = world
        .player_shots
        .iter()
        .find(|s| s.vx.abs() < 1e-4)
        .expect("left muzzle shot points straight at the enemy");
    assert!(left.vy < 0.0);
    assert!(world.player_shots.iter().any(|s| s.vx < -1e-3));
}

// ── Whole runs ────────────────────────────────────────────────────────────────

#[test]
fn newly_fired_shots_move_on_the_same_tick() {
    let (mut world, mut progress, mut rng) = setup(Archetype::Switch);
    world.player.toggle_mode(0);
    let fire = InputState { fire: true, ..idle() };
    world.step(&fire, 1, &mut progress, &mut rng);

    assert_eq!(world.player_shots.len(), 1);
    assert!((world.player_shots[0].body.y - 725.0).abs() < 1e-3);
}

#[test]
fn seeded_run_keeps_score_monotonic() {
    let tuning = MatchTuning::default();
    let mut world = World::new(Archetype::Shotgun, tuning);
    let mut progress = Progress::new(&tuning);
    let mut rng = StdRng::seed_from_u64(2024);
    let input = InputState { fire: true, left: true, ..idle() };

    let mut last = 0;
    for now in 1..=3000 {
        let events = world.step(&input, now, &mut progress, &mut rng);
        assert!(progress.score >= last);
        last = progress.score;
        assert!(world.player_shots.iter().all(|s| s.body.alive));
        assert!(world.enemy_shots.iter().all(|s| s.body.alive));
        assert!(world.enemies.iter().all(|e| e.body.alive));
        if events.iter().any(|e| matches!(e, FrameEvent::BossArrived { .. })) {
            assert!(world.boss_active());
            assert!(world.enemies.is_empty());
        }
        if events.contains(&FrameEvent::PlayerDown) {
            break;
        }
    }
}
