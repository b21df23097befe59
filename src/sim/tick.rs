//! Simulation tick
//!
//! Core game loop step, advanced by an external driver. Within a tick the
//! paddle always moves before the ball, so the ball is tested against the
//! paddle's position for the same frame.

use rand::Rng;
use rand::seq::SliceRandom;

use super::collision::{
    Side, ball_border_collision, ball_rect_collision, resolve_border_collision,
    resolve_rect_collision,
};
use super::geometry::{Edges, Rect};
use super::state::{Brick, BrickGrid, GameEvent, GameState, GameStatus, brick_left, brick_top};
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::{ConfigError, GameError};

/// Advance the game by `dt` seconds
///
/// Motion is scaled by `dt / tick_interval`. Does nothing while paused or
/// after the game has ended. Collisions are checked against the paddle, then
/// the borders, then the live bricks in row-major order; only the first brick
/// hit in a tick counts.
pub fn tick<R: Rng>(state: &mut GameState<R>, dt: f32) -> Result<Vec<GameEvent>, GameError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(GameError::InvalidDeltaTime(dt));
    }

    let mut events = Vec::new();
    if state.paused || state.status.is_over() {
        return Ok(events);
    }

    state.time_ticks += 1;
    let scale = dt / state.config.tick_interval;
    let bounds = state.config.inner_bounds();

    state.paddle.advance(scale, &bounds);
    state.ball.advance(scale);

    // Paddle
    if let Some(side) = ball_rect_collision(&state.ball.body, &state.paddle.rect) {
        let landing = state.paddle.landing_side(state.ball.center().x);
        resolve_rect_collision(&mut state.ball, &state.paddle.rect, side, landing);
        log::trace!(
            "Paddle hit on {:?} ({:?}), heading {}°",
            side,
            landing,
            state.ball.direction
        );
        events.push(GameEvent::PaddleHit { side, landing });
    }

    // Borders
    match ball_border_collision(&state.ball.body, &bounds) {
        Some(Side::Bottom) => {
            state.finish(GameStatus::Lost);
            events.push(GameEvent::Lost);
            return Ok(events);
        }
        Some(side) => {
            resolve_border_collision(&mut state.ball, &bounds, side);
            log::trace!("Border bounce on {:?}, heading {}°", side, state.ball.direction);
            events.push(GameEvent::BorderBounce { side });
        }
        None => {}
    }

    // Bricks
    let hit = state
        .bricks
        .bricks
        .iter()
        .enumerate()
        .filter(|(_, brick)| brick.exists())
        .find_map(|(index, brick)| {
            ball_rect_collision(&state.ball.body, &brick.rect).map(|side| (index, side))
        });

    if let Some((index, side)) = hit {
        let (row, column) = state.bricks.cell_of(index);
        // Brick bounces are biased by the paddle zone under the ball, as on the paddle
        let landing = state.paddle.landing_side(state.ball.center().x);
        let brick = &mut state.bricks.bricks[index];
        resolve_rect_collision(&mut state.ball, &brick.rect, side, landing);
        let lives = brick.hit();
        state.score += HIT_POINTS;

        if lives == 1 {
            state.ball.accelerate(DAMAGED_SPEEDUP);
        }

        if lives == 0 {
            state.score += DESTROY_BONUS;
            state.ball.accelerate(DESTROYED_SPEEDUP);
            log::debug!(
                "Brick ({}, {}) destroyed, score {}, ball speed {}",
                row,
                column,
                state.score,
                state.ball.speed
            );
            events.push(GameEvent::BrickDestroyed { row, column });

            if state.bricks.live_count() == 0 {
                state.finish(GameStatus::Won);
                events.push(GameEvent::Won);
            }
        } else {
            log::trace!("Brick ({}, {}) hit on {:?}, {} lives left", row, column, side, lives);
            events.push(GameEvent::BrickDamaged { row, column, lives });
        }
    }

    Ok(events)
}

/// Build a brick grid with shuffled lives
///
/// The lives template is shuffled once and handed out row-major, repeating
/// when the grid has more cells than the template.
pub fn generate_bricks<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<BrickGrid, ConfigError> {
    config.grid.validate()?;
    Ok(layout_bricks(config, rng))
}

/// Grid generation for an already validated config
pub(crate) fn layout_bricks<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> BrickGrid {
    let grid = &config.grid;
    let mut lives = LIVES_TEMPLATE;
    lives.shuffle(rng);

    let size = glam::Vec2::new(grid.brick_width, grid.brick_height);
    let bricks = (0..grid.rows)
        .flat_map(|row| (0..grid.columns).map(move |column| (row, column)))
        .zip(lives.iter().cycle())
        .map(|((row, column), &lives)| {
            let pos = glam::Vec2::new(
                brick_left(column, grid.gap, grid.brick_width, config.border_thickness),
                brick_top(row, grid.gap, grid.brick_height, config.border_thickness),
            );
            Brick::new(Rect::new(pos, size), lives)
        })
        .collect();

    BrickGrid {
        rows: grid.rows,
        columns: grid.columns,
        bricks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridLayout;
    use crate::sim::collision::LandingSide;
    use crate::sim::state::brick_color;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed).unwrap();
        state.resume().unwrap();
        state
    }

    /// Ball just below brick (2, 2), which spans x 411..589 and y 205..280
    fn below_center_brick(state: &mut GameState) {
        state.ball.body.pos = Vec2::new(475.0, 285.0);
        state.ball.direction = 270.0;
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let mut state = playing_state(1);
        assert!(matches!(tick(&mut state, 0.0), Err(GameError::InvalidDeltaTime(_))));
        assert!(tick(&mut state, -0.04).is_err());
        assert!(tick(&mut state, f32::NAN).is_err());
    }

    #[test]
    fn test_tick_paused_is_noop() {
        let mut state = GameState::new(GameConfig::default(), 5).unwrap();
        let before = state.snapshot();
        let events = tick(&mut state, TICK_INTERVAL).unwrap();
        assert!(events.is_empty());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_ball_moves_speed_per_tick() {
        let mut state = playing_state(5);
        state.ball.direction = 0.0;
        tick(&mut state, TICK_INTERVAL).unwrap();
        assert!((state.ball.body.pos.x - 510.0).abs() < 1e-3);
        assert_eq!(state.time_ticks(), 1);

        tick(&mut state, TICK_INTERVAL * 2.0).unwrap();
        assert!((state.ball.body.pos.x - 530.0).abs() < 1e-3);
    }

    #[test]
    fn test_straight_drop_bounces_off_paddle() {
        let mut state = playing_state(11);
        state.ball.body.pos = Vec2::new(500.0, 500.0);
        state.ball.direction = 90.0;

        let mut paddle_hit = None;
        for _ in 0..40 {
            let events = tick(&mut state, TICK_INTERVAL).unwrap();
            paddle_hit = events.into_iter().find_map(|event| match event {
                GameEvent::PaddleHit { side, landing } => Some((side, landing)),
                _ => None,
            });
            if paddle_hit.is_some() {
                break;
            }
        }

        // Center 525 sits in the first quarter of 500..700
        assert_eq!(paddle_hit, Some((Side::Top, Some(LandingSide::Left))));
        assert_eq!(state.ball.body.pos.y, 750.0);
        assert!((state.ball.direction - 270.0).abs() < 1e-3);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_paddle_moves_before_collision() {
        let mut state = playing_state(2);
        // Ball falls past the paddle's right edge; only the moved paddle catches it
        state.ball.body.pos = Vec2::new(690.0, 745.0);
        state.ball.direction = 90.0;
        state.set_paddle_velocity(crate::sim::PaddleDirection::Right);

        let events = tick(&mut state, TICK_INTERVAL).unwrap();
        assert_eq!(state.paddle.rect.pos.x, 525.0);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::PaddleHit { side: Side::Top, .. }))
        );
    }

    #[test]
    fn test_border_bounce() {
        let mut state = playing_state(3);
        state.ball.body.pos = Vec2::new(30.0, 500.0);
        state.ball.direction = 180.0;

        let events = tick(&mut state, TICK_INTERVAL).unwrap();
        assert_eq!(events, vec![GameEvent::BorderBounce { side: Side::Left }]);
        assert_eq!(state.ball.body.pos.x, 25.0);
        assert_eq!(state.ball.direction, 0.0);
    }

    #[test]
    fn test_falling_past_paddle_loses() {
        let mut state = playing_state(3);
        state.ball.body.pos = Vec2::new(100.0, 920.0);
        state.ball.direction = 90.0;

        let events = tick(&mut state, TICK_INTERVAL).unwrap();
        assert_eq!(events, vec![GameEvent::Lost]);
        assert_eq!(state.status(), GameStatus::Lost);
        assert!(state.is_paused());

        // Terminal: further ticks change nothing
        let before = state.snapshot();
        assert!(tick(&mut state, TICK_INTERVAL).unwrap().is_empty());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_damaging_brick() {
        let mut state = playing_state(8);
        state.bricks.bricks[12].lives = 2;
        below_center_brick(&mut state);

        let events = tick(&mut state, TICK_INTERVAL).unwrap();

        assert_eq!(
            events,
            vec![GameEvent::BrickDamaged {
                row: 2,
                column: 2,
                lives: 1
            }]
        );
        let brick = state.bricks().get(2, 2).unwrap();
        assert_eq!(brick.lives, 1);
        assert!(brick.exists());
        assert_eq!(brick.color(), brick_color(1));
        assert_eq!(state.score(), 50);
        assert!((state.ball.speed - 10.5).abs() < 1e-6);
        // Bounced off the underside, now heading down
        assert_eq!(state.ball.body.pos.y, 280.0);
        assert!((state.ball.direction - 90.0).abs() < 1e-3);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_three_life_brick_does_not_speed_up() {
        let mut state = playing_state(8);
        state.bricks.bricks[12].lives = 3;
        below_center_brick(&mut state);

        tick(&mut state, TICK_INTERVAL).unwrap();
        assert_eq!(state.bricks().get(2, 2).unwrap().lives, 2);
        assert_eq!(state.score(), 50);
        assert_eq!(state.ball.speed, BALL_START_SPEED);
    }

    #[test]
    fn test_destroying_last_brick_wins() {
        let mut state = playing_state(8);
        for brick in &mut state.bricks.bricks {
            brick.lives = 0;
        }
        state.bricks.bricks[12].lives = 1;
        below_center_brick(&mut state);

        let events = tick(&mut state, TICK_INTERVAL).unwrap();

        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed { row: 2, column: 2 }, GameEvent::Won]
        );
        assert!(!state.bricks().get(2, 2).unwrap().exists());
        assert_eq!(state.score(), 75);
        assert!((state.ball.speed - 11.0).abs() < 1e-6);
        assert_eq!(state.live_bricks(), 0);
        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.is_paused());
    }

    #[test]
    fn test_destroying_brick_keeps_playing() {
        let mut state = playing_state(8);
        state.bricks.bricks[12].lives = 1;
        below_center_brick(&mut state);

        tick(&mut state, TICK_INTERVAL).unwrap();
        assert_eq!(state.score(), 75);
        assert_eq!(state.live_bricks(), 14);
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_only_first_brick_counts() {
        let mut state = playing_state(8);
        for brick in &mut state.bricks.bricks {
            brick.lives = 3;
        }
        // Moves into the gap between bricks (2, 1) and (2, 2), overlapping both
        state.ball.body.pos = Vec2::new(370.0, 220.0);
        state.ball.direction = 0.0;

        let events = tick(&mut state, TICK_INTERVAL).unwrap();
        let damaged: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDamaged { .. }))
            .collect();
        assert_eq!(damaged.len(), 1);
        assert_eq!(
            damaged[0],
            &GameEvent::BrickDamaged {
                row: 2,
                column: 1,
                lives: 2
            }
        );
        // Right face of (2, 1) wins; the ball is pushed back out of the gap
        assert_eq!(state.ball.body.pos.x, 401.0);
        assert_eq!(state.ball.direction, 180.0);
        assert_eq!(state.score(), 50);
        assert_eq!(state.bricks().total_lives(), 44);
    }

    #[test]
    fn test_generated_brick_positions() {
        let mut rng = Pcg32::seed_from_u64(1);
        let grid = generate_bricks(&GameConfig::default(), &mut rng).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.get(0, 0).unwrap().rect.pos, Vec2::new(35.0, 35.0));
        assert_eq!(grid.get(0, 1).unwrap().rect.pos, Vec2::new(223.0, 35.0));
        assert_eq!(grid.get(2, 4).unwrap().rect.pos, Vec2::new(787.0, 205.0));
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn test_generate_rejects_empty_grid() {
        let config = GameConfig {
            grid: GridLayout {
                rows: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate_bricks(&config, &mut rng),
            Err(ConfigError::EmptyGrid { rows: 0, .. })
        ));
    }

    #[test]
    fn test_larger_grid_cycles_template() {
        let config = GameConfig {
            grid: GridLayout {
                rows: 4,
                brick_height: 50.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let grid = generate_bricks(&config, &mut rng).unwrap();
        let lives: Vec<u8> = grid.iter().map(|b| b.lives).collect();
        assert_eq!(lives.len(), 20);
        assert_eq!(lives[15..], lives[..5]);
    }

    proptest! {
        #[test]
        fn prop_grid_lives_always_sum_to_thirty(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = generate_bricks(&GameConfig::default(), &mut rng).unwrap();
            prop_assert_eq!(grid.total_lives(), 30);
            prop_assert_eq!(grid.live_count(), 15);
            for lives in 1..=3u8 {
                prop_assert_eq!(grid.iter().filter(|b| b.lives == lives).count(), 5);
            }
        }

        #[test]
        fn prop_launch_direction_in_range(seed in any::<u64>()) {
            let state = GameState::new(GameConfig::default(), seed).unwrap();
            let direction = state.ball().direction;
            prop_assert!((45.0..=135.0).contains(&direction));
            prop_assert_eq!(direction.fract(), 0.0);
        }

        #[test]
        fn prop_same_seed_same_trajectory(seed in any::<u64>()) {
            let mut a = playing_state(seed);
            let mut b = playing_state(seed);
            for _ in 0..200 {
                let events_a = tick(&mut a, TICK_INTERVAL).unwrap();
                let events_b = tick(&mut b, TICK_INTERVAL).unwrap();
                prop_assert_eq!(events_a, events_b);
            }
            prop_assert_eq!(a.snapshot(), b.snapshot());
        }

        #[test]
        fn prop_exists_iff_lives(seed in any::<u64>(), ticks in 1usize..400) {
            let mut state = playing_state(seed);
            for _ in 0..ticks {
                tick(&mut state, TICK_INTERVAL).unwrap();
            }
            for brick in state.bricks().iter() {
                prop_assert_eq!(brick.exists(), brick.lives > 0);
            }
            prop_assert!((0.0..360.0).contains(&state.ball().direction));
        }
    }
}
