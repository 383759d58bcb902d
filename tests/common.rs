#![allow(dead_code)]
use chrono::{Duration, TimeZone, Utc};
use rowop_puzzle::config::Settings;
use rowop_puzzle::game::input::PointerEvent;
use rowop_puzzle::game::{AddSign, OperationKind, ScaleMode};
use rowop_puzzle::generator::SourceKind;
use rowop_puzzle::session::{Clock, ManualClock};
use rowop_puzzle::stats::KeyValueStore;
use rowop_puzzle::{NoopObserver, Puzzle};

pub fn manual_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap())
}

pub fn settings(rows: usize, cols: usize, seed: u64) -> Settings {
    Settings {
        rows,
        cols,
        seed,
        source: SourceKind::Sine,
    }
}

/// Feeds pointer events in order, stopping quietly once the puzzle is solved.
pub fn click<S: KeyValueStore, C: Clock>(puzzle: &mut Puzzle<S, C>, events: Vec<PointerEvent>) {
    for event in events {
        if puzzle.state().is_solved() {
            return;
        }
        puzzle
            .pointer(event.clone(), &mut NoopObserver)
            .unwrap_or_else(|e| panic!("{:?} rejected: {}", event, e));
    }
}

/// Solves the current puzzle by elimination, advancing `clock` by `step` per
/// operation. Returns the operation count at the win.
pub fn solve<S: KeyValueStore>(
    puzzle: &mut Puzzle<S, &ManualClock>,
    clock: &ManualClock,
    step: Duration,
) -> u32 {
    let rows = puzzle.state().rows();
    let cols = puzzle.state().cols();

    for j in 0..rows.min(cols) {
        if puzzle.state().is_solved() {
            break;
        }
        let pivot_row = {
            let m = puzzle.state().matrix();
            (j..rows).find(|&r| m[[r, j]].abs() > 1e-9)
        };
        let Some(p) = pivot_row else {
            continue;
        };
        if p != j {
            clock.advance(step);
            click(
                puzzle,
                vec![
                    PointerEvent::Operation(OperationKind::Swap),
                    PointerEvent::Row(j),
                    PointerEvent::Row(p),
                ],
            );
        }
        for i in (j + 1)..rows {
            if puzzle.state().is_solved() {
                break;
            }
            let (pivot, value) = {
                let m = puzzle.state().matrix();
                (m[[j, j]], m[[i, j]])
            };
            if value.abs() <= 1e-9 {
                continue;
            }
            clock.advance(step);
            click(
                puzzle,
                vec![
                    PointerEvent::Operation(OperationKind::Scale),
                    PointerEvent::Row(i),
                    PointerEvent::Scale {
                        mode: ScaleMode::Multiply,
                        input: (pivot / value).to_string(),
                    },
                ],
            );
            clock.advance(step);
            click(
                puzzle,
                vec![
                    PointerEvent::Operation(OperationKind::Add),
                    PointerEvent::Row(i),
                    PointerEvent::Row(j),
                    PointerEvent::Sign(AddSign::Subtract),
                    PointerEvent::Row(i),
                ],
            );
        }
    }

    assert!(puzzle.state().is_solved(), "elimination left {:?}", puzzle.state().matrix());
    puzzle.operations()
}
