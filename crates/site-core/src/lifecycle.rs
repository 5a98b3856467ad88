use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a self-rescheduling loop.
///
/// Clones observe the same flag; once stopped it stays stopped.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}
