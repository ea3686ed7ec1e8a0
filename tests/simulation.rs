use neon_snake::game::{
    CollisionType, Direction, GameConfig, GameEvent, GameSimulation, LifecycleState, Position,
};

fn cells(raw: &[(i32, i32)]) -> Vec<Position> {
    raw.iter().copied().map(Position::from).collect()
}

#[test]
fn straight_run_eats_starting_food_then_hits_the_wall() {
    let mut sim = GameSimulation::with_seed(GameConfig::default(), 2024);
    sim.reset(0);

    // Ticks stay well inside the power-up cooldown
    let mut now = 0;
    let mut tick = |sim: &mut GameSimulation| {
        now += 150;
        sim.tick(now)
    };

    assert_eq!(tick(&mut sim).event, None);
    assert_eq!(sim.snake(), cells(&[(0, 1), (0, 2), (0, 3)]).as_slice());

    for _ in 0..3 {
        assert_eq!(tick(&mut sim).event, None);
    }
    assert_eq!(sim.head(), Position::new(0, -2));

    assert_eq!(tick(&mut sim).event, Some(GameEvent::AteFood));
    assert_eq!(sim.score(), 10);
    assert_eq!(sim.snake().len(), 4);
    assert_eq!(sim.effective_interval_ms(), 148);
    assert!(!sim.snake().contains(&sim.food()));

    let mut last = None;
    for _ in 0..20 {
        let outcome = tick(&mut sim);
        if outcome.is_terminal() {
            last = outcome.event;
            break;
        }
    }

    assert_eq!(last, Some(GameEvent::Died(CollisionType::Wall)));
    assert_eq!(sim.lifecycle(), LifecycleState::GameOver);
    assert_eq!(sim.head(), Position::new(0, -7));
    assert!(sim.score() >= 10);
}

#[test]
fn ticks_are_ignored_outside_a_run() {
    let mut sim = GameSimulation::with_seed(GameConfig::default(), 5);
    let before = sim.snapshot(0);

    for now in [0, 10_000, 50_000] {
        assert_eq!(sim.tick(now).event, None);
    }

    assert_eq!(sim.snapshot(0), before);
    assert_eq!(sim.lifecycle(), LifecycleState::Menu);
}

#[test]
fn steering_around_the_board() {
    let mut sim = GameSimulation::with_seed(GameConfig::default(), 11);
    sim.reset(0);

    assert!(sim.set_direction(Direction::Right));
    sim.tick(150);
    assert_eq!(sim.head(), Position::new(1, 2));

    assert!(!sim.set_direction(Direction::Left));
    assert!(sim.set_direction(Direction::Down));
    sim.tick(300);
    assert_eq!(sim.head(), Position::new(1, 3));
    assert_eq!(sim.snake(), cells(&[(1, 3), (1, 2), (0, 2)]).as_slice());
}

#[test]
fn power_up_spawns_once_the_cooldown_has_passed() {
    let mut sim = GameSimulation::with_seed(GameConfig::default(), 99);
    sim.reset(0);

    // Walk a small square so the snake never dies while time passes
    let loop_dirs = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];
    let mut now = 0;
    let mut saw_item = false;
    for step in 0..200 {
        if step % 2 == 0 {
            sim.set_direction(loop_dirs[(step / 2) % 4]);
        }
        now += sim.effective_interval_ms();
        sim.tick(now);
        if sim.lifecycle() != LifecycleState::Playing {
            break;
        }
        if sim.power_up_item().is_some() || sim.active_power_up().is_some() {
            saw_item = true;
            break;
        }
    }

    assert!(saw_item, "a power-up should appear after the spawn interval");
    assert!(now > 10_000);
}
