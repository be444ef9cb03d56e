//! Progress side channel for long-running generation phases
//!
//! Generation reports coarse progress events to a [`ProgressSink`]. Nothing depends on
//! the events being consumed; [`NoProgress`] discards them and [`ProgressReporter`]
//! renders them as a terminal progress bar.

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;

/// Stage of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Decoding and digesting candidate photos
    LoadingTiles,
    /// Assigning tiles to grid cells
    Assigning,
    /// Stitching tiles into the output image
    Composing,
}

impl Phase {
    /// Human-readable label for display
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoadingTiles => "Processing photo tiles",
            Self::Assigning => "Assigning unique tiles",
            Self::Composing => "Constructing final mosaic",
        }
    }
}

/// A single progress report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Phase being reported
    pub phase: Phase,
    /// Units of work finished so far
    pub completed: usize,
    /// Total units of work in this phase
    pub total: usize,
}

impl ProgressEvent {
    /// Completed fraction in `[0, 1]`; an empty phase counts as complete
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Receiver of progress events
pub trait ProgressSink: Send {
    /// Handle one progress event
    fn report(&mut self, event: ProgressEvent);
}

/// Sink that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent) + Send,
{
    fn report(&mut self, event: ProgressEvent) {
        self(event);
    }
}

/// Interval between reports so a phase emits about `steps` events
pub fn report_interval(total: usize, steps: usize) -> usize {
    (total / steps.max(1)).max(1)
}

/// Terminal progress bar that restarts for each phase
pub struct ProgressReporter {
    bar: ProgressBar,
    phase: Option<Phase>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter with a hidden bar until the first event arrives
    pub fn new() -> Self {
        let template = format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} [{{elapsed_precise}}]"
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");

        let bar = ProgressBar::hidden();
        bar.set_style(style);

        Self { bar, phase: None }
    }

    /// Whether the bar is currently not drawn
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Phase of the most recent event
    pub const fn current_phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for ProgressReporter {
    fn report(&mut self, event: ProgressEvent) {
        if self.phase.is_none() {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        if self.phase != Some(event.phase) {
            self.phase = Some(event.phase);
            self.bar.reset();
            self.bar.set_message(event.phase.label());
        }
        self.bar.set_length(event.total as u64);
        self.bar.set_position(event.completed as u64);
        if event.fraction() >= 1.0 {
            debug!("{} finished", event.phase.label());
        }
    }
}
