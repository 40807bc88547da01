//! Corpus progress reporting.
//!
//! Reporting is observational only: reporters see each card's name as the
//! pipeline reaches it and never affect processing.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Width the card name is padded or truncated to on the bar.
const NAME_WIDTH: usize = 16;

/// How often `LogProgress` logs.
const LOG_EVERY: usize = 500;

/// Trait for receiving corpus progress updates.
pub trait ProgressReporter {
    /// Called as each card is reached (1-based `current`).
    fn on_card(&self, current: usize, total: usize, name: &str);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn on_card(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn on_card(&self, current: usize, total: usize, name: &str) {
        if current % LOG_EVERY == 0 || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Pad or truncate a card name to a fixed display width.
fn fit_name(name: &str) -> String {
    let truncated: String = name.chars().take(NAME_WIDTH).collect();
    format!("{:<width$}", truncated, width = NAME_WIDTH)
}

/// A terminal progress bar showing the current card, count and ETA.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Create a bar for `total` cards.
    #[must_use]
    pub fn new(total: usize) -> Self {
        let style = ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len} ETA {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(total as u64);
        bar.set_style(style);
        Self { bar }
    }

    /// Create a bar that draws nothing.
    #[must_use]
    pub fn hidden(total: usize) -> Self {
        let bar = Self::new(total);
        bar.bar.set_draw_target(ProgressDrawTarget::hidden());
        bar
    }

    /// Cards reported so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for BarProgress {
    fn on_card(&self, current: usize, _total: usize, name: &str) {
        self.bar.set_message(fit_name(name));
        self.bar.set_position(current as u64);
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Wraps a card iterator and reports each card as it is consumed.
pub struct ProgressIter<'r, I> {
    inner: I,
    reporter: &'r dyn ProgressReporter,
    current: usize,
    total: usize,
}

impl<'r, I> ProgressIter<'r, I> {
    /// Wrap `inner`, which yields `total` items.
    pub fn new(inner: I, total: usize, reporter: &'r dyn ProgressReporter) -> Self {
        Self {
            inner,
            reporter,
            current: 0,
            total,
        }
    }
}

impl<'r, I, T> Iterator for ProgressIter<'r, I>
where
    I: Iterator<Item = (T, String)>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (item, name) = self.inner.next()?;
        self.current += 1;
        self.reporter.on_card(self.current, self.total, &name);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
