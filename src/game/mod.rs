//! # Game State Machine
//!
//! [`GameState`] owns the matrix, the selection in progress and the session
//! counters. Every input mode feeds it the same [`Action`]s and receives the
//! same [`Event`]s back; only the way a row index is produced differs (see
//! [`input`]).
//!
//! ```text
//! Idle --ChooseOperation--> Selecting --2nd row (Swap)----------------------> apply
//!                               |------2nd row (Add)--> ChoosingSign --sign--> ChoosingTarget --row--> apply
//!                               `------1st row (Scale)-> AwaitingScalar --SubmitScalar--> apply
//! apply --> Idle, or Solved once the matrix is upper-triangular
//! ```

pub mod input;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use ndarray::{Array2, ArrayView2};
use thiserror::Error;

use crate::session::GameSession;
use crate::utils::{RowOperations, UpperTriangular, WIN_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Swap,
    Scale,
}

impl OperationKind {
    /// Rows picked before the operation asks for anything else.
    pub fn rows_needed(self) -> usize {
        match self {
            OperationKind::Add | OperationKind::Swap => 2,
            OperationKind::Scale => 1,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Add => write!(f, "add"),
            OperationKind::Swap => write!(f, "swap"),
            OperationKind::Scale => write!(f, "multiply"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddSign {
    #[default]
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleMode {
    #[default]
    Multiply,
    Divide,
}

/// Where the current selection sequence stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Selecting {
        op: OperationKind,
        rows: Vec<usize>,
    },
    ChoosingSign {
        first: usize,
        second: usize,
    },
    ChoosingTarget {
        first: usize,
        second: usize,
        sign: AddSign,
    },
    AwaitingScalar {
        row: usize,
        mode: ScaleMode,
    },
    Solved,
}

impl Phase {
    pub fn operation(&self) -> Option<OperationKind> {
        match self {
            Phase::Idle | Phase::Solved => None,
            Phase::Selecting { op, .. } => Some(*op),
            Phase::ChoosingSign { .. } | Phase::ChoosingTarget { .. } => Some(OperationKind::Add),
            Phase::AwaitingScalar { .. } => Some(OperationKind::Scale),
        }
    }

    /// Rows chosen so far, in selection order.
    pub fn selected_rows(&self) -> Vec<usize> {
        match self {
            Phase::Selecting { rows, .. } => rows.clone(),
            Phase::ChoosingSign { first, second } | Phase::ChoosingTarget { first, second, .. } => {
                vec![*first, *second]
            }
            Phase::AwaitingScalar { row, .. } => vec![*row],
            Phase::Idle | Phase::Solved => Vec::new(),
        }
    }
}

/// Mode-agnostic input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ChooseOperation(OperationKind),
    SelectRow(usize),
    ChooseSign(AddSign),
    ChooseScaleMode(ScaleMode),
    SubmitScalar(f64),
    Cancel,
}

/// A row operation as it was applied to the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppliedOperation {
    Add {
        first: usize,
        second: usize,
        target: usize,
        sign: AddSign,
    },
    Swap {
        first: usize,
        second: usize,
    },
    Scale {
        row: usize,
        mode: ScaleMode,
        value: f64,
    },
}

impl fmt::Display for AppliedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AppliedOperation::Add {
                first,
                second,
                target,
                sign,
            } => {
                let symbol = match sign {
                    AddSign::Add => '+',
                    AddSign::Subtract => '-',
                };
                write!(
                    f,
                    "R{} = R{} {} R{}",
                    target + 1,
                    first + 1,
                    symbol,
                    second + 1
                )
            }
            AppliedOperation::Swap { first, second } => {
                write!(f, "R{} <-> R{}", first + 1, second + 1)
            }
            AppliedOperation::Scale { row, mode, value } => {
                let symbol = match mode {
                    ScaleMode::Multiply => '*',
                    ScaleMode::Divide => '/',
                };
                write!(f, "R{} = R{} {} {}", row + 1, row + 1, symbol, value)
            }
        }
    }
}

/// What a dispatched action changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OperationChosen(OperationKind),
    SessionStarted,
    RowSelected(usize),
    AwaitingSign { first: usize, second: usize },
    AwaitingTarget { sign: AddSign },
    AwaitingScalar { row: usize, mode: ScaleMode },
    Applied {
        operation: AppliedOperation,
        operations: u32,
    },
    Won {
        elapsed: Duration,
        operations: u32,
    },
    Cancelled,
}

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("Please select an operation first")]
    NoOperationSelected,

    #[error("Row {} does not exist (matrix has {rows} rows)", .row + 1)]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Value cannot be zero or invalid: {0}")]
    InvalidScalar(String),

    #[error("Cannot {action} right now")]
    UnexpectedAction { action: &'static str },

    #[error("The puzzle is already solved; start a new game")]
    Solved,

    #[error("row operation failed: {0}")]
    Operation(String),
}

/// Parses player input for a multiply/divide value.
pub fn parse_scalar(input: &str) -> Result<f64, GameError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| GameError::InvalidScalar(input.trim().to_string()))?;
    validate_scalar(value)
}

pub fn validate_scalar(value: f64) -> Result<f64, GameError> {
    if value == 0.0 || !value.is_finite() {
        return Err(GameError::InvalidScalar(value.to_string()));
    }
    Ok(value)
}

/// Snapshot handed to renderers.
#[derive(Debug, Clone)]
pub struct BoardView<'a> {
    pub matrix: ArrayView2<'a, f64>,
    pub operation: Option<OperationKind>,
    pub selected: Vec<usize>,
    pub highlighted: Option<usize>,
    pub solved: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    matrix: Array2<f64>,
    phase: Phase,
    session: GameSession,
}

impl GameState {
    pub fn new(matrix: Array2<f64>) -> Self {
        GameState {
            matrix,
            phase: Phase::Idle,
            session: GameSession::new(),
        }
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn operations(&self) -> u32 {
        self.session.operations()
    }

    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.session.elapsed(now)
    }

    pub fn board(&self, highlighted: Option<usize>) -> BoardView<'_> {
        BoardView {
            matrix: self.matrix.view(),
            operation: self.phase.operation(),
            selected: self.phase.selected_rows(),
            highlighted,
            solved: self.is_solved(),
        }
    }

    /// Applies one action. Rejected actions leave the state untouched.
    pub fn dispatch(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>, GameError> {
        if self.is_solved() {
            return Err(GameError::Solved);
        }
        debug!("dispatch {:?} in {:?}", action, self.phase);

        match action {
            Action::ChooseOperation(op) => {
                self.phase = Phase::Selecting {
                    op,
                    rows: Vec::with_capacity(op.rows_needed()),
                };
                Ok(vec![Event::OperationChosen(op)])
            }
            Action::Cancel => {
                let had_selection = self.phase != Phase::Idle;
                self.phase = Phase::Idle;
                Ok(if had_selection {
                    vec![Event::Cancelled]
                } else {
                    Vec::new()
                })
            }
            Action::SelectRow(row) => self.select_row(row, now),
            Action::ChooseSign(sign) => match self.phase {
                Phase::ChoosingSign { first, second } => {
                    self.phase = Phase::ChoosingTarget {
                        first,
                        second,
                        sign,
                    };
                    Ok(vec![Event::AwaitingTarget { sign }])
                }
                _ => Err(GameError::UnexpectedAction {
                    action: "choose add or subtract",
                }),
            },
            Action::ChooseScaleMode(new_mode) => match &mut self.phase {
                Phase::AwaitingScalar { mode, .. } => {
                    *mode = new_mode;
                    Ok(Vec::new())
                }
                _ => Err(GameError::UnexpectedAction {
                    action: "choose multiply or divide",
                }),
            },
            Action::SubmitScalar(value) => match self.phase {
                Phase::AwaitingScalar { row, mode } => {
                    let value = validate_scalar(value).inspect_err(|_| {
                        warn!("Rejected scalar {} for row {}", value, row + 1);
                    })?;
                    self.apply(AppliedOperation::Scale { row, mode, value }, now)
                }
                _ => Err(GameError::UnexpectedAction {
                    action: "apply a multiplier",
                }),
            },
        }
    }

    fn select_row(&mut self, row: usize, now: DateTime<Utc>) -> Result<Vec<Event>, GameError> {
        if self.phase == Phase::Idle {
            return Err(GameError::NoOperationSelected);
        }
        if row >= self.rows() {
            return Err(GameError::RowOutOfRange {
                row,
                rows: self.rows(),
            });
        }

        let mut events = Vec::new();
        if self.session.start(now) {
            events.push(Event::SessionStarted);
        }

        match std::mem::take(&mut self.phase) {
            Phase::Selecting { op, mut rows } => {
                if rows.contains(&row) {
                    self.phase = Phase::Selecting { op, rows };
                    return Ok(events);
                }
                rows.push(row);
                events.push(Event::RowSelected(row));

                if rows.len() < op.rows_needed() {
                    self.phase = Phase::Selecting { op, rows };
                    return Ok(events);
                }
                match op {
                    OperationKind::Add => {
                        let (first, second) = (rows[0], rows[1]);
                        self.phase = Phase::ChoosingSign { first, second };
                        events.push(Event::AwaitingSign { first, second });
                    }
                    OperationKind::Swap => {
                        let swap = AppliedOperation::Swap {
                            first: rows[0],
                            second: rows[1],
                        };
                        events.extend(self.apply(swap, now)?);
                    }
                    OperationKind::Scale => {
                        let mode = ScaleMode::default();
                        self.phase = Phase::AwaitingScalar { row, mode };
                        events.push(Event::AwaitingScalar { row, mode });
                    }
                }
            }
            // A row picked without an explicit sign adds into that row.
            Phase::ChoosingSign { first, second } => {
                let add = AppliedOperation::Add {
                    first,
                    second,
                    target: row,
                    sign: AddSign::default(),
                };
                events.extend(self.apply(add, now)?);
            }
            Phase::ChoosingTarget {
                first,
                second,
                sign,
            } => {
                let add = AppliedOperation::Add {
                    first,
                    second,
                    target: row,
                    sign,
                };
                events.extend(self.apply(add, now)?);
            }
            Phase::AwaitingScalar { mode, .. } => {
                self.phase = Phase::AwaitingScalar { row, mode };
                events.push(Event::RowSelected(row));
                events.push(Event::AwaitingScalar { row, mode });
            }
            other @ (Phase::Idle | Phase::Solved) => {
                self.phase = other;
            }
        }
        Ok(events)
    }

    fn apply(
        &mut self,
        operation: AppliedOperation,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>, GameError> {
        let result = match operation {
            AppliedOperation::Add {
                first,
                second,
                target,
                sign: AddSign::Add,
            } => self.matrix.add_rows(first, second, target),
            AppliedOperation::Add {
                first,
                second,
                target,
                sign: AddSign::Subtract,
            } => self.matrix.subtract_rows(first, second, target),
            AppliedOperation::Swap { first, second } => self.matrix.swap_rows(first, second),
            AppliedOperation::Scale {
                row,
                mode: ScaleMode::Multiply,
                value,
            } => self.matrix.multiply_row(row, value),
            AppliedOperation::Scale {
                row,
                mode: ScaleMode::Divide,
                value,
            } => self.matrix.divide_row(row, value),
        };
        result.map_err(|e| GameError::Operation(e.to_string()))?;

        let operations = self.session.record_operation();
        debug!("Applied {} (operation {})", operation, operations);
        self.phase = Phase::Idle;

        let mut events = vec![Event::Applied {
            operation,
            operations,
        }];
        if self.matrix.is_upper_triangular(WIN_TOLERANCE) {
            let elapsed = self.session.finish(now);
            self.phase = Phase::Solved;
            info!(
                "Solved {}x{} matrix in {} ms with {} operations",
                self.rows(),
                self.cols(),
                elapsed.num_milliseconds(),
                operations
            );
            events.push(Event::Won {
                elapsed,
                operations,
            });
        }
        Ok(events)
    }

    /// Guidance for the pointer-driven flow.
    pub fn instructions(&self) -> String {
        match &self.phase {
            Phase::Idle => "Select an operation to begin".to_string(),
            Phase::Solved => "Solved! Start a new game or generate a new matrix".to_string(),
            Phase::Selecting { op, rows } => match (op, rows.len()) {
                (OperationKind::Add, 0) => "Select first row to add".to_string(),
                (OperationKind::Add, _) => {
                    format!("Select second row to add (Row {})", rows[0] + 1)
                }
                (OperationKind::Swap, 0) => "Select first row to swap".to_string(),
                (OperationKind::Swap, _) => {
                    format!("Select second row to swap (Row {})", rows[0] + 1)
                }
                (OperationKind::Scale, _) => "Select row to multiply by a constant".to_string(),
            },
            Phase::ChoosingSign { first, second } => format!(
                "Row {} and Row {}: choose add or subtract, or select the target row to add",
                first + 1,
                second + 1
            ),
            Phase::ChoosingTarget {
                first,
                second,
                sign,
            } => {
                let symbol = match sign {
                    AddSign::Add => '+',
                    AddSign::Subtract => '-',
                };
                format!(
                    "Select target row for Row {} {} Row {}",
                    first + 1,
                    symbol,
                    second + 1
                )
            }
            Phase::AwaitingScalar { row, mode } => match mode {
                ScaleMode::Multiply => format!("Enter value to multiply row {} by", row + 1),
                ScaleMode::Divide => format!("Enter value to divide row {} by", row + 1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use ndarray::array;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    fn fixture() -> GameState {
        GameState::new(array![[2.0, 4.0, -2.0], [2.0, 5.0, -3.0], [-2.0, -4.0, 7.0]])
    }

    fn run(state: &mut GameState, actions: &[Action]) -> Vec<Event> {
        let mut events = Vec::new();
        for action in actions {
            events.extend(state.dispatch(*action, now()).unwrap());
        }
        events
    }

    #[test]
    fn test_select_row_without_operation() {
        let mut state = fixture();
        let before = state.matrix().clone();
        assert_eq!(
            state.dispatch(Action::SelectRow(0), now()),
            Err(GameError::NoOperationSelected)
        );
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(!state.session().is_started());
        assert_eq!(state.matrix(), &before);
    }

    #[test]
    fn test_first_selection_starts_session() {
        let mut state = fixture();
        let events = run(
            &mut state,
            &[Action::ChooseOperation(OperationKind::Swap), Action::SelectRow(2)],
        );
        assert_eq!(
            events,
            vec![
                Event::OperationChosen(OperationKind::Swap),
                Event::SessionStarted,
                Event::RowSelected(2)
            ]
        );
        assert_eq!(state.session().started_at(), Some(now()));
    }

    #[test]
    fn test_swap_executes_on_second_row() {
        let mut state = fixture();
        let original = state.matrix().clone();
        run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Swap),
                Action::SelectRow(0),
                Action::SelectRow(2),
            ],
        );
        assert_eq!(state.matrix().row(0), original.row(2));
        assert_eq!(state.matrix().row(2), original.row(0));
        assert_eq!(state.operations(), 1);
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn test_duplicate_row_is_ignored() {
        let mut state = fixture();
        run(
            &mut state,
            &[Action::ChooseOperation(OperationKind::Swap), Action::SelectRow(1)],
        );
        let events = state.dispatch(Action::SelectRow(1), now()).unwrap();
        assert!(events.is_empty());
        assert_eq!(
            state.phase(),
            &Phase::Selecting {
                op: OperationKind::Swap,
                rows: vec![1]
            }
        );
        assert_eq!(state.operations(), 0);
    }

    #[test]
    fn test_add_with_sign_and_target() {
        let mut state = fixture();
        let events = run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(1),
                Action::SelectRow(0),
                Action::ChooseSign(AddSign::Subtract),
                Action::SelectRow(1),
            ],
        );
        assert_eq!(state.matrix().row(1), array![0.0, 1.0, -1.0]);
        assert!(events.contains(&Event::AwaitingSign {
            first: 1,
            second: 0
        }));
        assert!(events.contains(&Event::AwaitingTarget {
            sign: AddSign::Subtract
        }));
    }

    #[test]
    fn test_add_target_can_be_any_row() {
        // Target distinct from both sources
        let mut state = GameState::new(array![[1.0, 2.0], [3.0, 4.0], [9.0, 9.0]]);
        run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(0),
                Action::SelectRow(1),
                Action::ChooseSign(AddSign::Add),
                Action::SelectRow(2),
            ],
        );
        assert_eq!(state.matrix().row(2), array![4.0, 6.0]);
        assert_eq!(state.matrix().row(0), array![1.0, 2.0]);
    }

    #[test]
    fn test_row_during_sign_choice_adds_into_it() {
        let mut state = GameState::new(array![[1.0, 2.0], [3.0, 4.0], [9.0, 9.0]]);
        run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(0),
                Action::SelectRow(1),
                Action::SelectRow(0),
            ],
        );
        assert_eq!(state.matrix().row(0), array![4.0, 6.0]);
        assert_eq!(state.operations(), 1);
    }

    #[test]
    fn test_scale_rejects_bad_values_and_keeps_selection() {
        let mut state = fixture();
        let original = state.matrix().clone();
        run(
            &mut state,
            &[Action::ChooseOperation(OperationKind::Scale), Action::SelectRow(2)],
        );
        for bad in [0.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                state.dispatch(Action::SubmitScalar(bad), now()),
                Err(GameError::InvalidScalar(_))
            ));
        }
        assert_eq!(state.matrix(), &original);
        assert_eq!(
            state.phase(),
            &Phase::AwaitingScalar {
                row: 2,
                mode: ScaleMode::Multiply
            }
        );

        run(
            &mut state,
            &[Action::ChooseScaleMode(ScaleMode::Divide), Action::SubmitScalar(2.0)],
        );
        assert_eq!(state.matrix().row(2), array![-1.0, -2.0, 3.5]);
        assert_eq!(state.operations(), 1);
    }

    #[test]
    fn test_multiply_then_divide_round_trip() {
        let mut state = fixture();
        let original = state.matrix().clone();
        for mode in [ScaleMode::Multiply, ScaleMode::Divide] {
            run(
                &mut state,
                &[
                    Action::ChooseOperation(OperationKind::Scale),
                    Action::SelectRow(0),
                    Action::ChooseScaleMode(mode),
                    Action::SubmitScalar(-3.5),
                ],
            );
        }
        for (a, b) in state.matrix().iter().zip(original.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        assert_eq!(state.operations(), 2);
    }

    #[test]
    fn test_new_row_replaces_pending_scale_row() {
        let mut state = fixture();
        run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Scale),
                Action::SelectRow(0),
                Action::SelectRow(1),
            ],
        );
        assert_eq!(
            state.phase(),
            &Phase::AwaitingScalar {
                row: 1,
                mode: ScaleMode::Multiply
            }
        );
    }

    #[test]
    fn test_switching_operation_discards_selection() {
        let mut state = fixture();
        run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(0),
                Action::ChooseOperation(OperationKind::Swap),
            ],
        );
        assert_eq!(
            state.phase(),
            &Phase::Selecting {
                op: OperationKind::Swap,
                rows: vec![]
            }
        );
        run(&mut state, &[Action::SelectRow(1), Action::Cancel]);
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.phase().selected_rows().is_empty());
    }

    #[test]
    fn test_out_of_phase_actions_are_rejected() {
        let mut state = fixture();
        assert!(matches!(
            state.dispatch(Action::ChooseSign(AddSign::Add), now()),
            Err(GameError::UnexpectedAction { .. })
        ));
        assert!(matches!(
            state.dispatch(Action::SubmitScalar(2.0), now()),
            Err(GameError::UnexpectedAction { .. })
        ));
        run(&mut state, &[Action::ChooseOperation(OperationKind::Add)]);
        assert_eq!(
            state.dispatch(Action::SelectRow(3), now()),
            Err(GameError::RowOutOfRange { row: 3, rows: 3 })
        );
    }

    #[test]
    fn test_win_is_signalled_once() {
        let mut state = fixture();
        let later = now() + Duration::seconds(42);
        let mut events = run(
            &mut state,
            &[
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(1),
                Action::SelectRow(0),
                Action::ChooseSign(AddSign::Subtract),
                Action::SelectRow(1),
                Action::ChooseOperation(OperationKind::Add),
                Action::SelectRow(2),
                Action::SelectRow(0),
                Action::ChooseSign(AddSign::Add),
            ],
        );
        events.extend(state.dispatch(Action::SelectRow(2), later).unwrap());

        let wins: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Won { .. }))
            .collect();
        assert_eq!(
            wins,
            vec![&Event::Won {
                elapsed: Duration::seconds(42),
                operations: 2
            }]
        );
        assert!(state.is_solved());
        assert_eq!(
            state.dispatch(Action::ChooseOperation(OperationKind::Swap), later),
            Err(GameError::Solved)
        );
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar(" 2.5 "), Ok(2.5));
        assert_eq!(parse_scalar("-4"), Ok(-4.0));
        assert!(parse_scalar("0").is_err());
        assert!(parse_scalar("abc").is_err());
        assert!(parse_scalar("").is_err());
        assert!(parse_scalar("NaN").is_err());
    }

    #[test]
    fn test_applied_operation_display() {
        let add = AppliedOperation::Add {
            first: 0,
            second: 1,
            target: 2,
            sign: AddSign::Subtract,
        };
        assert_eq!(add.to_string(), "R3 = R1 - R2");
        assert_eq!(
            AppliedOperation::Swap { first: 0, second: 2 }.to_string(),
            "R1 <-> R3"
        );
    }
}
