use super::print::print_message;
use console::Term;
use notegen::api::CmdMessage;
use notegen::progress::Progress;

/// Prints messages as they arrive, under a `generating notes... [n/total]`
/// line redrawn on stderr.
///
/// The progress line is only drawn when stderr is a terminal. Drawing is
/// best-effort and terminal errors are ignored.
pub(super) struct TermProgress {
    term: Term,
    total: usize,
    done: usize,
    drawing: bool,
}

impl TermProgress {
    pub(super) fn stderr() -> Self {
        Self {
            term: Term::stderr(),
            total: 0,
            done: 0,
            drawing: false,
        }
    }

    fn draw(&self) {
        if !self.drawing || !self.term.is_term() {
            return;
        }
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "generating notes... [{}/{}]",
            self.done, self.total
        ));
    }
}

impl Progress for TermProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.drawing = true;
        self.draw();
    }

    fn advance(&mut self) {
        self.done += 1;
        self.draw();
    }

    fn message(&mut self, message: &CmdMessage) {
        if self.drawing && self.term.is_term() {
            let _ = self.term.clear_line();
        }
        print_message(message);
        self.draw();
    }

    fn finish(&mut self) {
        if self.drawing && self.term.is_term() {
            let _ = self.term.clear_line();
            let _ = self.term.write_line(&format!(
                "generating notes... [{}/{}]",
                self.done, self.total
            ));
        }
        self.drawing = false;
    }
}
