use std::collections::VecDeque;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index of the chosen menu option.
    Option(usize),
    Exit,
}

pub trait SelectionInput {
    /// Blocks until a valid choice among `option_count` options is made.
    fn read_selection(&mut self, option_count: usize) -> Result<Selection>;
}

/// Menus show options as `1..=option_count` and exit as `0`.
pub fn parse_selection(key: char, option_count: usize) -> Option<Selection> {
    match key.to_digit(10)? as usize {
        0 => Some(Selection::Exit),
        n if n <= option_count => Some(Selection::Option(n - 1)),
        _ => None,
    }
}

/// Reads single key presses with the terminal in raw mode.
#[derive(Debug, Default)]
pub struct RawKeyboard;

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!("failed to restore terminal mode: {err}");
        }
    }
}

impl SelectionInput for RawKeyboard {
    fn read_selection(&mut self, option_count: usize) -> Result<Selection> {
        let _guard = RawModeGuard::enable()?;
        loop {
            let event = event::read().context("Failed to read terminal input")?;
            let Event::Key(KeyEvent {
                code: KeyCode::Char(key),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event
            else {
                continue;
            };
            if modifiers.contains(KeyModifiers::CONTROL) && key == 'c' {
                return Ok(Selection::Exit);
            }
            match parse_selection(key, option_count) {
                Some(selection) => return Ok(selection),
                None => debug!("ignoring key {key:?}"),
            }
        }
    }
}

/// Replays queued keys; an empty queue reads as exit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl SelectionInput for ScriptedInput {
    fn read_selection(&mut self, option_count: usize) -> Result<Selection> {
        while let Some(key) = self.keys.pop_front() {
            if let Some(selection) = parse_selection(key, option_count) {
                return Ok(selection);
            }
        }
        Ok(Selection::Exit)
    }
}
