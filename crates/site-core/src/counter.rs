//! Numeric count-up animation stepping.

/// What the caller should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterTick {
    /// Intermediate value; write it and keep ticking.
    Show(i64),
    /// Final value; write it and clear the interval.
    Done(i64),
    /// The counter already finished; no DOM write.
    Idle,
}

/// Running total advanced by a fixed increment per tick.
#[derive(Clone, Debug)]
pub struct Counter {
    current: f64,
    target: i64,
    increment: f64,
    finished: bool,
}

impl Counter {
    /// `increment = target / (duration / tick)`.
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32) -> Self {
        let steps = duration_ms.max(1) as f64 / tick_ms.max(1) as f64;
        Self {
            current: 0.0,
            target,
            increment: target as f64 / steps,
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> CounterTick {
        if self.finished {
            return CounterTick::Idle;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            CounterTick::Done(self.target)
        } else {
            CounterTick::Show(self.current.floor() as i64)
        }
    }
}

/// Leading-integer parse of a label such as `"2400+"` or `" 15 km"`.
///
/// Returns `None` when no digits lead the text.
pub fn parse_counter_target(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|v| sign * v)
}

/// One-shot arming for a stats section.
#[derive(Debug, Default)]
pub struct SectionTrigger {
    fired: bool,
}

impl SectionTrigger {
    /// True only the first time the section becomes visible.
    pub fn arm(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
