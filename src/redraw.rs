//! Redraw scheduling
//!
//! The badge never draws on its own. After every mutation it asks the host
//! for a redraw through a [`RedrawScheduler`]; the host decides when to
//! actually paint.

use std::{cell::Cell, rc::Rc};

pub trait RedrawScheduler {
    /// Ask the host to repaint the view at its next opportunity
    fn request_redraw(&self);
}

impl<F: Fn()> RedrawScheduler for F {
    fn request_redraw(&self) {
        self()
    }
}

/// Shared pending-redraw flag.
///
/// Clones share the same flag, so the host keeps one clone and hands the
/// other to the view. Any number of requests between two [`take`](Self::take)
/// calls collapse into a single pending redraw.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Clear the flag, returning whether a redraw was pending
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl RedrawScheduler for RedrawFlag {
    fn request_redraw(&self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_scheduler() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let scheduler = move || c.set(c.get() + 1);
        scheduler.request_redraw();
        scheduler.request_redraw();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn flag_coalesces_until_taken() {
        let host = RedrawFlag::new();
        let view_side = host.clone();
        assert!(!host.is_pending());

        view_side.request_redraw();
        view_side.request_redraw();
        assert!(host.is_pending());
        assert!(host.take());
        assert!(!host.take());
    }
}
