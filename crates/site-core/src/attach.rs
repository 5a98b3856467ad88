use std::fmt;

/// Result of wiring one page component to its DOM targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attachment {
    Attached,
    /// Target not present on this page; the component stays inert.
    Skipped { missing: &'static str },
}

impl Attachment {
    pub fn is_attached(&self) -> bool {
        matches!(self, Attachment::Attached)
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Attached => write!(f, "attached"),
            Attachment::Skipped { missing } => write!(f, "skipped (missing {})", missing),
        }
    }
}

/// Which of the four page components activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageReport {
    pub scroll: Attachment,
    pub reveal: Attachment,
    pub counters: Attachment,
    pub hero: Attachment,
}

impl PageReport {
    pub fn attached_count(&self) -> usize {
        [&self.scroll, &self.reveal, &self.counters, &self.hero]
            .iter()
            .filter(|a| a.is_attached())
            .count()
    }
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scroll={} reveal={} counters={} hero={}",
            self.scroll, self.reveal, self.counters, self.hero
        )
    }
}
