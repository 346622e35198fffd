//! Presentation rules shared by both pad views: which buttons are live and how
//! scores are shown. Scores are passed through untouched by the adapter; any
//! rescaling happens here.

use crate::recognizer::RecognitionMatch;

pub const LOADING_MESSAGE: &str = "Loading character recognition data...";
pub const EMPTY_RESULTS_HINT: &str = "Draw a character to see recognition results";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub recognize: bool,
    pub undo: bool,
    pub clear: bool,
    pub next: bool,
}

impl Controls {
    /// Free recognition view.
    pub fn free(strokes: usize, ready: bool, busy: bool) -> Self {
        let has_strokes = strokes > 0;
        Self {
            recognize: has_strokes && ready && !busy,
            undo: has_strokes,
            clear: has_strokes,
            next: false,
        }
    }

    /// Definition check view. Drawing is frozen once the verdict is shown.
    pub fn definition(strokes: usize, ready: bool, busy: bool, answered: bool) -> Self {
        let editable = strokes > 0 && !answered;
        Self {
            recognize: editable && ready && !busy,
            undo: editable,
            clear: editable,
            next: answered,
        }
    }
}

/// Free-mode result list tied to the drawing it was requested for. Any edit
/// to the drawing moves the generation on, and answers for an older one are
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct FreeResults {
    matches: Vec<RecognitionMatch>,
    generation: u64,
}

impl FreeResults {
    pub fn matches(&self) -> &[RecognitionMatch] {
        &self.matches
    }

    /// Tag for a request about to be sent.
    pub fn ticket(&self) -> u64 {
        self.generation
    }

    /// The drawing changed: forget the shown results.
    pub fn invalidate(&mut self) {
        self.matches.clear();
        self.generation += 1;
    }

    /// Store `matches` if `ticket` still names the current drawing.
    pub fn accept(&mut self, ticket: u64, matches: Vec<RecognitionMatch>) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.matches = matches;
        true
    }
}

/// Fractional score shown as a whole percentage.
pub fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn stroke_counter(strokes: usize) -> String {
    format!("Strokes: {strokes}")
}

pub fn match_label(m: &RecognitionMatch) -> String {
    format!("{} {}% match", m.character, percent(m.score))
}

pub fn results_summary(matches: &[RecognitionMatch]) -> String {
    if matches.is_empty() {
        EMPTY_RESULTS_HINT.to_string()
    } else {
        format!("Found {} possible matches:", matches.len())
    }
}
