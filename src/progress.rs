//! Step grid that drives both farm engines and the bars that visualize it.
//!
//! A run walks `rows * cols` steps in row-major order. Each step renders one
//! tick before the caller's callback sees it, so logical work never runs
//! ahead of what the user has been shown.

use std::{io::Write, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{RestorePosition, SavePosition},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::FarmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGrid {
    rows: usize,
    cols: usize,
}

impl ProgressGrid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, FarmError> {
        if rows == 0 || cols == 0 {
            return Err(FarmError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn total_steps(&self) -> usize {
        self.rows * self.cols
    }

    pub fn run<F>(&self, renderer: &mut dyn ProgressRenderer, mut on_step: F) -> Result<()>
    where
        F: FnMut(Step),
    {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let step = Step {
                    row,
                    col,
                    rows: self.rows,
                    cols: self.cols,
                };
                renderer.tick(&step)?;
                on_step(step);
            }
        }
        renderer.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Step {
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }

    pub fn index(&self) -> usize {
        self.row * self.cols + self.col
    }

    pub fn is_last(&self) -> bool {
        self.index() + 1 == self.total()
    }

    /// Completion shown to the user; grows by one step each tick.
    pub fn percent(&self) -> usize {
        (self.index() + 1) * 100 / self.total()
    }

    /// Completion the farm engines pace against. This is the product of the
    /// 1-indexed coordinates, not a running count, so it drops at each row
    /// start and only reaches 100 on the final step.
    pub fn paced_percent(&self) -> usize {
        (self.row + 1) * (self.col + 1) * 100 / self.total()
    }
}

pub trait ProgressRenderer {
    fn tick(&mut self, step: &Step) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressRenderer for SilentProgress {
    fn tick(&mut self, _step: &Step) -> Result<()> {
        Ok(())
    }
}

/// One marker per step, one grid row per terminal line, with the running
/// percentage kept just right of the cursor.
pub struct TerminalBar<W: Write> {
    out: W,
    marker: char,
}

impl<W: Write> TerminalBar<W> {
    pub fn new(out: W, marker: char) -> Self {
        Self { out, marker }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressRenderer for TerminalBar<W> {
    fn tick(&mut self, step: &Step) -> Result<()> {
        queue!(
            self.out,
            Print(self.marker),
            SavePosition,
            Print(format!(" {:>3}%", step.percent())),
            Clear(ClearType::UntilNewLine),
            RestorePosition
        )
        .context("Failed to draw progress tick")?;
        if step.col + 1 == step.cols && !step.is_last() {
            queue!(self.out, Print("\n")).context("Failed to draw progress row")?;
        }
        self.out.flush().context("Failed to flush progress bar")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out).context("Failed to finish progress bar")?;
        self.out.flush().context("Failed to flush progress bar")?;
        Ok(())
    }
}

/// Random short sleeps between ticks so the bars are visible.
pub struct Pacer {
    rng: ChaCha8Rng,
    max_delay: Duration,
}

impl Pacer {
    pub fn new(rng: ChaCha8Rng, max_delay: Duration) -> Self {
        Self { rng, max_delay }
    }

    /// Never sleeps.
    pub fn instant() -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(0), Duration::ZERO)
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn pause(&mut self) {
        let max_ms = self.max_delay.as_millis() as u64;
        if max_ms == 0 {
            return;
        }
        let delay = self.rng.gen_range(0..=max_ms);
        thread::sleep(Duration::from_millis(delay));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        finished: bool,
    }

    impl ProgressRenderer for Recorder {
        fn tick(&mut self, step: &Step) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("tick {},{}", step.row, step.col));
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(
            ProgressGrid::new(0, 4),
            Err(FarmError::EmptyGrid { rows: 0, cols: 4 })
        );
        assert!(ProgressGrid::new(3, 0).is_err());
    }

    #[test]
    fn run_ticks_before_each_step_in_row_major_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut recorder = Recorder {
            log: Rc::clone(&log),
            finished: false,
        };
        let grid = ProgressGrid::new(2, 2).unwrap();

        let callback_log = Rc::clone(&log);
        grid.run(&mut recorder, |step| {
            callback_log
                .borrow_mut()
                .push(format!("step {},{}", step.row, step.col));
        })
        .unwrap();

        assert!(recorder.finished);
        assert_eq!(
            *log.borrow(),
            vec![
                "tick 0,0", "step 0,0", "tick 0,1", "step 0,1", "tick 1,0", "step 1,0",
                "tick 1,1", "step 1,1",
            ]
        );
    }

    #[test]
    fn single_row_bar_with_noop_callback() {
        let grid = ProgressGrid::new(1, 10).unwrap();
        let mut bar = TerminalBar::new(Vec::new(), '=');
        grid.run(&mut bar, |_| {}).unwrap();

        let text = String::from_utf8(bar.into_inner()).unwrap();
        assert_eq!(text.matches('=').count(), 10);
        assert!(text.contains(" 10%"));
        assert!(text.contains("100%"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn terminal_bar_breaks_line_per_row() {
        let grid = ProgressGrid::new(3, 4).unwrap();
        let mut bar = TerminalBar::new(Vec::new(), '#');
        grid.run(&mut bar, |_| {}).unwrap();

        let text = String::from_utf8(bar.into_inner()).unwrap();
        assert_eq!(text.matches('#').count(), 12);
        assert_eq!(text.matches('\n').count(), 3);
    }

    #[test]
    fn paced_percent_is_not_monotonic() {
        let end_of_first_row = Step { row: 0, col: 19, rows: 3, cols: 20 };
        let start_of_second_row = Step { row: 1, col: 0, rows: 3, cols: 20 };
        let last = Step { row: 2, col: 19, rows: 3, cols: 20 };

        assert_eq!(end_of_first_row.paced_percent(), 33);
        assert_eq!(start_of_second_row.paced_percent(), 3);
        assert_eq!(last.paced_percent(), 100);
        assert!(start_of_second_row.percent() > end_of_first_row.percent());
        assert!(last.is_last());
    }

    #[test]
    fn instant_pacer_does_not_sleep() {
        let mut pacer = Pacer::instant();
        let start = std::time::Instant::now();
        for _ in 0..1_000 {
            pacer.pause();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
        assert_eq!(pacer.max_delay(), Duration::ZERO);
    }
}
