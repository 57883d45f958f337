use crate::commands::CmdMessage;

/// Receives one tick per processed note, and every message as it is raised.
///
/// Messages arrive while the run is still going, so a caller can show them
/// even if a later note makes the run fail.
pub trait Progress {
    fn start(&mut self, total: usize);
    fn advance(&mut self);
    fn message(&mut self, _message: &CmdMessage) {}
    fn finish(&mut self) {}
}

/// Ignores all progress.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self) {}
}

/// Records ticks and messages, for tests and for callers that only want the counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingProgress {
    pub total: usize,
    pub done: usize,
    pub finished: bool,
    pub messages: Vec<CmdMessage>,
}

impl Progress for CountingProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.finished = false;
    }

    fn advance(&mut self) {
        self.done += 1;
    }

    fn message(&mut self, message: &CmdMessage) {
        self.messages.push(message.clone());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
