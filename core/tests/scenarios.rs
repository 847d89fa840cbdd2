use minefield_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

fn hazard_neighbors(board: &Board, coords: Coord2) -> u8 {
    board
        .iter_neighbors(coords)
        .filter(|&pos| board.state_at(pos).is_hazard())
        .count() as u8
}

#[test]
fn classic_first_click_scenario() {
    for seed in 0..50 {
        let config = EngineConfig::default();
        let mut engine = GameEngine::with_clock(config, seed, ManualClock::new()).unwrap();

        engine.click((5, 5)).unwrap();
        let board = engine.board();

        assert_eq!(board.hazard_count(), 10, "seed {seed}");
        assert!(!board.state_at((5, 5)).is_hazard(), "seed {seed}");
        assert!(board.is_revealed((5, 5)));

        for coords in board.coords() {
            let expected = hazard_neighbors(board, coords);
            match board.state_at(coords) {
                CellState::Hazard => {}
                CellState::Empty => assert_eq!(expected, 0, "seed {seed} at {coords:?}"),
                CellState::Count(count) => assert_eq!(count, expected, "seed {seed} at {coords:?}"),
            }
        }

        // revealed set is closed around empty cells and only grows from them
        for coords in board.coords().filter(|&pos| board.is_revealed(pos)) {
            if board.state_at(coords).is_empty() {
                assert!(board.iter_neighbors(coords).all(|pos| board.is_revealed(pos)));
            }
            if coords != (5, 5) {
                assert!(
                    board
                        .iter_neighbors(coords)
                        .any(|pos| board.is_revealed(pos) && board.state_at(pos).is_empty()),
                    "seed {seed}: {coords:?} revealed without an empty neighbour"
                );
            }
        }
    }
}

#[test]
fn hazard_free_board_is_won_by_one_click() {
    let config = EngineConfig::new(10, 0).unwrap();
    let mut engine = GameEngine::with_clock(config, 3, ManualClock::new()).unwrap();

    let outcome = engine.click((9, 0)).unwrap();

    assert_eq!(engine.unrevealed_count(), 0);
    assert_eq!(
        outcome,
        ClickOutcome::Won(GameOutcome {
            won: true,
            elapsed_seconds: 0
        })
    );
    assert!(engine.is_over());
}

#[test]
fn playing_every_safe_cell_wins() {
    let config = EngineConfig::new(8, 9).unwrap();
    let mut engine = GameEngine::with_clock(config, 99, ManualClock::new()).unwrap();
    engine.click((0, 0)).unwrap();

    let safe: Vec<_> = engine
        .board()
        .coords()
        .filter(|&pos| !engine.board().state_at(pos).is_hazard())
        .collect();

    let mut last = ClickOutcome::NoChange;
    for coords in safe {
        if engine.is_over() {
            break;
        }
        last = engine.click(coords).unwrap();
    }

    assert!(matches!(last, ClickOutcome::Won(_)) || engine.state() == EngineState::Won);
    assert_eq!(engine.state(), EngineState::Won);
}

#[test]
fn outcome_feeds_statistics_across_games() {
    let stats = Rc::new(RefCell::new(Statistics::new()));

    for (hazards, click, elapsed) in [(&[(0, 0)][..], (0, 0), 4), (&[(2, 2)][..], (0, 0), 10)] {
        let mut engine = GameEngine::with_layout(3, hazards, ManualClock::new()).unwrap();
        let sink = Rc::clone(&stats);
        engine.add_observer(move |outcome: &GameOutcome| sink.borrow_mut().record(outcome));

        engine.clock_mut().start();
        engine.clock_mut().advance(elapsed);
        engine.click(click).unwrap();
        assert!(engine.is_over());
    }

    let stats = *stats.borrow();
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.average_seconds, 7);
}

#[test]
fn board_snapshot_survives_json() {
    let mut engine = GameEngine::with_layout(4, &[(1, 2), (3, 0)], ManualClock::new()).unwrap();
    engine.click((0, 0)).unwrap();

    let json = serde_json::to_string(engine.board()).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, engine.board());
    assert_eq!(restored.size(), 4);
}

#[test]
fn malformed_snapshot_is_rejected() {
    let mut json = serde_json::to_value(Board::new(2).unwrap()).unwrap();
    json["dim"] = serde_json::json!([2, 1]);
    json["data"] = serde_json::json!([
        { "state": "Empty", "revealed": false },
        { "state": "Empty", "revealed": false }
    ]);

    assert!(serde_json::from_value::<Board>(json).is_err());
}

#[test]
fn config_and_outcome_serialize() {
    let config = EngineConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);

    let outcome = GameOutcome {
        won: false,
        elapsed_seconds: 17,
    };
    assert_eq!(
        serde_json::to_value(outcome).unwrap(),
        serde_json::json!({ "won": false, "elapsed_seconds": 17 })
    );
}
