//! Playing-strength and scenario tests for the Monte-Carlo actor.
//!
//! Strength is checked against a uniformly random opponent with fixed seeds,
//! using generous margins: the adaptive policy searches two plies deep while
//! the uniform one only compares random playouts of the root children.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ultimatoe_boards::{indexes_to_move_string, Tictactoe, Ultimatoe};
use ultimatoe_core::{Game, Player};
use ultimatoe_mcts::{
    Actor, GameMatch, MonteCarloActor, MonteCarloConfig, MonteCarloEvaluator, RandomActor,
};

/// Create a Monte-Carlo actor with the given seed.
fn create_actor(seed: u64, config: MonteCarloConfig) -> MonteCarloActor<ChaCha8Rng> {
    MonteCarloActor::new(config, ChaCha8Rng::seed_from_u64(seed))
}

fn play_moves<G: Game>(game: &G, moves: &[&str]) -> G::State {
    let mut state = game.initial_state();
    for mv in moves {
        state = game.play(&state, mv).unwrap();
    }
    state
}

/// Play one game, Monte-Carlo as `mc_player`, and return the score from the
/// Monte-Carlo actor's perspective.
fn play_against_random<G: Game>(
    game: &G,
    actor: &mut MonteCarloActor<ChaCha8Rng>,
    mc_player: Player,
    seed: u64,
) -> f64 {
    let mut random = RandomActor::new(ChaCha8Rng::seed_from_u64(seed));
    let mut state = game.initial_state();
    while !game.is_finished(&state) {
        let mv = if game.player_on_turn(&state) == mc_player {
            actor.select_move(game, &state).unwrap()
        } else {
            random.select_move(game, &state).unwrap()
        };
        state = game.play(&state, &mv).unwrap();
    }
    mc_player.sign() * game.score(&state)
}

/// Tally (wins, losses) over `games` games.
fn tally(scores: impl Iterator<Item = f64>) -> (usize, usize) {
    scores.fold((0, 0), |(wins, losses), score| {
        if score > 0.5 {
            (wins + 1, losses)
        } else if score < -0.5 {
            (wins, losses + 1)
        } else {
            (wins, losses)
        }
    })
}

#[test]
fn test_uniform_beats_random_as_x() {
    let game = Tictactoe::default();
    let (wins, losses) = tally((0..30).map(|seed| {
        let mut actor = create_actor(seed, MonteCarloConfig::with_budget(1000));
        play_against_random(&game, &mut actor, Player::X, seed + 1000)
    }));

    assert!(losses <= 3, "lost {losses} of 30 games as X");
    assert!(wins >= 20, "won only {wins} of 30 games as X");
}

#[test]
fn test_adaptive_beats_random_as_o() {
    let game = Tictactoe::default();
    let (wins, losses) = tally((0..30).map(|seed| {
        let mut actor = create_actor(seed, MonteCarloConfig::adaptive(1000));
        play_against_random(&game, &mut actor, Player::O, seed + 2000)
    }));

    assert!(losses <= 5, "lost {losses} of 30 games as O");
    assert!(wins >= 15, "won only {wins} of 30 games as O");
}

/// Test that the actor finds winning moves in won positions.
#[test]
fn test_finds_winning_move() {
    let game = Tictactoe::default();

    // X _ X
    // O O _
    // _ _ _
    // X to move wins at 1
    let state = play_moves(&game, &["0", "3", "2", "4"]);

    for config in [MonteCarloConfig::with_budget(500), MonteCarloConfig::adaptive(500)] {
        for seed in 0..10 {
            let mv = create_actor(seed, config).select_move(&game, &state).unwrap();
            assert_eq!(mv, "1", "{config:?} with seed {seed} missed the win");
        }
    }
}

/// Test that the adaptive actor blocks the opponent's winning move.
#[test]
fn test_adaptive_blocks_winning_move() {
    let game = Tictactoe::default();

    // X X _
    // O _ _
    // _ _ _
    // O to move must block at 2
    let state = play_moves(&game, &["0", "3", "1"]);

    for seed in 0..20 {
        let mv = create_actor(seed, MonteCarloConfig::adaptive(500))
            .select_move(&game, &state)
            .unwrap();
        assert_eq!(mv, "2", "seed {seed} did not block");
    }
}

/// Budget 0 never claims a best child but still moves.
#[test]
fn test_zero_budget_plays_random_legal_move() {
    let game = Ultimatoe::default();
    let state = game.initial_state();

    let mut evaluator = MonteCarloEvaluator::new(
        game.clone(),
        state,
        MonteCarloConfig::default().policy,
        7,
    );
    evaluator.spend(0).unwrap();
    assert_eq!(evaluator.best_child(), None);

    let mut actor = create_actor(7, MonteCarloConfig::with_budget(0));
    let mv = actor.select_move(&game, &state).unwrap();
    assert!(game.children(&state).state_for(&mv).is_some());
}

/// Same seed produces identical games.
#[test]
fn test_deterministic_self_play() {
    let game = Ultimatoe::default();

    let play_game = |seed: u64| -> Vec<String> {
        let mut x = create_actor(seed, MonteCarloConfig::adaptive(100));
        let mut o = create_actor(seed + 1, MonteCarloConfig::with_budget(100));
        let mut state = game.initial_state();
        let mut moves = Vec::new();

        while !game.is_finished(&state) {
            let mv = match game.player_on_turn(&state) {
                Player::X => x.select_move(&game, &state).unwrap(),
                Player::O => o.select_move(&game, &state).unwrap(),
            };
            state = game.play(&state, &mv).unwrap();
            moves.push(mv);
        }
        moves
    };

    assert_eq!(play_game(12345), play_game(12345));
}

/// Every move that wins a sub-board here also completes the top row of
/// sub-boards, so the actor must end the game.
#[test]
fn test_ultimatoe_takes_global_win() {
    let game = Ultimatoe::default();
    // <major><minor> digit pairs
    let indexes = "37 71 14 41 16 60 00 01 13 32 24 42 27 70 08 80 04 44 43 34 40 72 21 11";
    let moves: Vec<String> = indexes
        .split_whitespace()
        .map(|pair| {
            let digit = |i: usize| usize::from(pair.as_bytes()[i] - b'0');
            indexes_to_move_string(digit(0), digit(1)).unwrap()
        })
        .collect();
    let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
    let state = play_moves(&game, &moves);
    assert_eq!(game.open_mask(&state), 1 << 1);

    for config in [MonteCarloConfig::with_budget(300), MonteCarloConfig::adaptive(300)] {
        let mv = create_actor(3, config).select_move(&game, &state).unwrap();
        let next = game.play(&state, &mv).unwrap();
        assert_eq!(game.winner(&next), Some(Player::X), "{config:?} played {mv}");
    }
}

#[test]
fn test_adaptive_beats_random_at_ultimatoe() {
    let game = Ultimatoe::default();
    let actors: Vec<Box<dyn Actor<Ultimatoe>>> = vec![
        Box::new(create_actor(11, MonteCarloConfig::adaptive(200))),
        Box::new(RandomActor::new(ChaCha8Rng::seed_from_u64(12))),
    ];
    let mut game_match = GameMatch::new(game, actors).unwrap();
    game_match.run_rounds(3).unwrap();

    let stats = &game_match.stats()[0];
    assert_eq!(stats.games, 6);
    assert!(stats.wins >= 4, "{stats}");
    assert!(stats.score_sum > 0.0, "{stats}");
}
