//! Property-based tests for the board games.
//!
//! Positions are generated by random play from the initial state, so every
//! generated state is reachable.

use std::sync::{Arc, OnceLock};

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ultimatoe_boards::{BoardUniverse, Fivedown, Tictactoe, Ultimatoe};
use ultimatoe_core::Game;

fn universe() -> Arc<BoardUniverse> {
    static UNIVERSE: OnceLock<Arc<BoardUniverse>> = OnceLock::new();
    UNIVERSE
        .get_or_init(|| Arc::new(BoardUniverse::build()))
        .clone()
}

/// Play up to `plies` random moves from the initial state.
fn random_position<G: Game>(game: &G, seed: u64, plies: usize) -> G::State {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.initial_state();
    for _ in 0..plies {
        if game.is_finished(&state) {
            break;
        }
        state = game.play_random(&state, &mut rng).unwrap();
    }
    state
}

/// The contract every game must satisfy at `state`.
fn check_contract<G: Game>(game: &G, state: &G::State) -> Result<(), TestCaseError> {
    let children = game.children(state);
    prop_assert_eq!(children.is_empty(), game.is_finished(state));

    for (child, mv) in children.iter() {
        prop_assert_eq!(&game.play(state, mv).unwrap(), child);
        prop_assert_eq!(game.turn(child), game.turn(state) + 1);
        prop_assert_eq!(game.move_to(state, child).unwrap(), mv);
    }

    let score = game.score(state);
    prop_assert!((-1.0..=1.0).contains(&score));
    if game.is_finished(state) {
        prop_assert!(score == -1.0 || score == 0.0 || score == 1.0);
    } else {
        prop_assert_eq!(score, 0.0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_tictactoe_contract(seed in any::<u64>(), plies in 0usize..10) {
        let game = Tictactoe::new(universe());
        let state = random_position(&game, seed, plies);
        check_contract(&game, &state)?;
        prop_assert_eq!(
            game.possibilities(&state).count_ones() as usize,
            game.children(&state).len()
        );
    }

    #[test]
    fn prop_ultimatoe_contract(seed in any::<u64>(), plies in 0usize..82) {
        let game = Ultimatoe::new(universe());
        let state = random_position(&game, seed, plies);
        check_contract(&game, &state)?;
        prop_assert_eq!(game.children_count(&state) as usize, game.children(&state).len());
    }

    #[test]
    fn prop_ultimatoe_open_boards_are_undecided(seed in any::<u64>(), plies in 0usize..82) {
        let game = Ultimatoe::new(universe());
        let state = random_position(&game, seed, plies);
        for major in 0..9 {
            if game.is_open(&state, major) {
                prop_assert!(game.legal_mask(&state, major) != 0);
                prop_assert_eq!(game.board_winner(&state, major), None);
            }
        }
        if game.is_finished(&state) {
            prop_assert_eq!(game.open_mask(&state), 0);
        }
    }

    #[test]
    fn prop_ultimatoe_random_move_is_a_child(seed in any::<u64>(), plies in 0usize..60) {
        let game = Ultimatoe::new(universe());
        let state = random_position(&game, seed, plies);
        prop_assume!(!game.is_finished(&state));

        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED);
        let next = game.play_random(&state, &mut rng).unwrap();
        prop_assert!(game.children(&state).move_for(&next).is_some());
    }

    #[test]
    fn prop_fivedown_contract(seed in any::<u64>(), plies in 0usize..60) {
        let game = Fivedown::new();
        let state = random_position(&game, seed, plies);
        check_contract(&game, &state)?;
        prop_assert!(game.energy(&state, game.player_on_turn(&state)) >= 0);
    }
}
