//! Input adapters. Both turn raw player input into [`Action`]s for
//! [`GameState::dispatch`]; neither touches the matrix itself.
//!
//! - [`PointerEvent`]: buttons, row clicks and the value dialog.
//! - [`VimInput`]: keyboard only. A highlighted-row cursor (`q`/`e`) and
//!   `space` stand in for row clicks, single keys stand in for the dialogs.

use log::debug;

use super::{parse_scalar, Action, AddSign, GameError, GameState, OperationKind, Phase, ScaleMode};

/// Value the VIM prompt starts with.
pub const DEFAULT_PROMPT_VALUE: &str = "2";

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Operation(OperationKind),
    Row(usize),
    Sign(AddSign),
    /// Value dialog submitted with the raw text the player typed.
    Scale { mode: ScaleMode, input: String },
    Cancel,
}

impl PointerEvent {
    /// Unparseable dialog input fails here, before anything reaches the state machine.
    pub fn into_actions(self) -> Result<Vec<Action>, GameError> {
        Ok(match self {
            PointerEvent::Operation(op) => vec![Action::ChooseOperation(op)],
            PointerEvent::Row(row) => vec![Action::SelectRow(row)],
            PointerEvent::Sign(sign) => vec![Action::ChooseSign(sign)],
            PointerEvent::Scale { mode, input } => {
                let value = parse_scalar(&input)?;
                vec![Action::ChooseScaleMode(mode), Action::SubmitScalar(value)]
            }
            PointerEvent::Cancel => vec![Action::Cancel],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Backspace,
}

impl Key {
    /// Reads a key name as typed in the terminal front end: a single character,
    /// or one of `space`, `enter`, `esc`, `backspace`.
    pub fn parse(token: &str) -> Option<Key> {
        match token.to_ascii_lowercase().as_str() {
            "space" | "spc" => Some(Key::Space),
            "enter" | "ret" | "return" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Escape),
            "backspace" | "bs" => Some(Key::Backspace),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(' '), None) => Some(Key::Space),
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarPrompt {
    pub mode: ScaleMode,
    pub buffer: String,
}

/// Keyboard state layered over the game: whether VIM mode is on, where the
/// cursor is, and the value prompt when one is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VimInput {
    active: bool,
    cursor: usize,
    prompt: Option<ScalarPrompt>,
}

impl VimInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn prompt(&self) -> Option<&ScalarPrompt> {
        self.prompt.as_ref()
    }

    /// Highlighted row, if VIM mode is on.
    pub fn highlighted(&self) -> Option<usize> {
        self.active.then_some(self.cursor)
    }

    pub fn exit(&mut self) {
        if self.active {
            debug!("Leaving VIM mode");
        }
        *self = Self::default();
    }

    fn enter(&mut self, op: OperationKind) -> Vec<Action> {
        debug!("Entering VIM mode for {}", op);
        self.active = true;
        self.cursor = 0;
        self.prompt = None;
        vec![Action::ChooseOperation(op)]
    }

    fn move_cursor(&mut self, delta: isize, rows: usize) {
        let last = rows.saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Translates one key press. Cursor moves and prompt edits return no actions.
    pub fn translate(&mut self, key: Key, state: &GameState) -> Result<Vec<Action>, GameError> {
        if state.is_solved() {
            return Err(GameError::Solved);
        }
        if !self.active {
            return Ok(self.translate_inactive(key, state));
        }
        if self.prompt.is_some() {
            return self.translate_prompt(key);
        }

        let actions = match (key, state.phase()) {
            (Key::Char('q'), _) => {
                self.move_cursor(-1, state.rows());
                Vec::new()
            }
            (Key::Char('e'), _) => {
                self.move_cursor(1, state.rows());
                Vec::new()
            }
            (Key::Space, _) => vec![Action::SelectRow(self.cursor)],
            (Key::Escape, _) => {
                self.exit();
                vec![Action::Cancel]
            }
            (Key::Char('a'), Phase::Idle) => self.enter(OperationKind::Add),
            (Key::Char('s'), Phase::Idle) => self.enter(OperationKind::Swap),
            (Key::Char('d'), Phase::Idle) => self.enter(OperationKind::Scale),
            (Key::Char('a') | Key::Enter, Phase::ChoosingSign { .. }) => {
                vec![Action::ChooseSign(AddSign::Add)]
            }
            (Key::Char('f'), Phase::ChoosingSign { .. }) => {
                vec![Action::ChooseSign(AddSign::Subtract)]
            }
            (Key::Char('d') | Key::Enter, Phase::AwaitingScalar { .. }) => {
                self.open_prompt(ScaleMode::Multiply);
                Vec::new()
            }
            (Key::Char('f'), Phase::AwaitingScalar { .. }) => {
                self.open_prompt(ScaleMode::Divide);
                Vec::new()
            }
            _ => Vec::new(),
        };
        Ok(actions)
    }

    fn translate_inactive(&mut self, key: Key, state: &GameState) -> Vec<Action> {
        match key {
            Key::Char('a') => self.enter(OperationKind::Add),
            Key::Char('s') => self.enter(OperationKind::Swap),
            Key::Char('d') => self.enter(OperationKind::Scale),
            Key::Char(c) => match c.to_digit(10) {
                Some(n) if n >= 1 && (n as usize) <= state.rows() => {
                    vec![Action::SelectRow(n as usize - 1)]
                }
                _ => Vec::new(),
            },
            Key::Escape if *state.phase() != Phase::Idle => vec![Action::Cancel],
            _ => Vec::new(),
        }
    }

    fn open_prompt(&mut self, mode: ScaleMode) {
        self.prompt = Some(ScalarPrompt {
            mode,
            buffer: DEFAULT_PROMPT_VALUE.to_string(),
        });
    }

    fn translate_prompt(&mut self, key: Key) -> Result<Vec<Action>, GameError> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(Vec::new());
        };
        match key {
            Key::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                prompt.buffer.push(c);
                Ok(Vec::new())
            }
            Key::Backspace => {
                prompt.buffer.pop();
                Ok(Vec::new())
            }
            Key::Enter | Key::Char('f') => {
                // The prompt stays open on bad input so the player can fix it
                let value = parse_scalar(&prompt.buffer)?;
                let mode = prompt.mode;
                self.prompt = None;
                Ok(vec![Action::ChooseScaleMode(mode), Action::SubmitScalar(value)])
            }
            Key::Escape => {
                self.exit();
                Ok(vec![Action::Cancel])
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Guidance for the keyboard flow.
    pub fn instructions(&self, state: &GameState) -> String {
        if let Some(prompt) = &self.prompt {
            let verb = match prompt.mode {
                ScaleMode::Multiply => "multiply",
                ScaleMode::Divide => "divide",
            };
            let row = match state.phase() {
                Phase::AwaitingScalar { row, .. } => row + 1,
                _ => self.cursor + 1,
            };
            return format!(
                "Enter value to {} row {} by: {} (Enter/F to confirm, ESC to cancel)",
                verb, row, prompt.buffer
            );
        }
        let hint = match state.phase() {
            Phase::ChoosingSign { .. } => {
                return "Press A (or Enter) for addition, F for subtraction".to_string()
            }
            Phase::AwaitingScalar { .. } => {
                return "Press D (or Enter) for multiply, F for divide".to_string()
            }
            Phase::Selecting { op, rows } => match (op, rows.len()) {
                (OperationKind::Scale, _) => "SPACE to select row",
                (_, 0) => "SPACE to select first row",
                _ => "SPACE to select second row",
            },
            Phase::ChoosingTarget { .. } => "SPACE to select target row",
            Phase::Idle | Phase::Solved => "A add, S swap, D multiply",
        };
        format!(
            "VIM Mode: Q/E to navigate, {} | Row {} highlighted | ESC to exit VIM mode",
            hint,
            self.cursor + 1
        )
    }
}
