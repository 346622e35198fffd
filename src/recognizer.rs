//! The seam to the external handwriting recognizer.
//!
//! The recognizer is callback driven: reference data is loaded per named
//! dataset and signals completion once per dataset, and a match request answers
//! later through its own callback. Implementations are injected into the
//! adapter, so tests can stand in for the browser library.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::RecognizerError;

/// Label used when the recognizer had nothing to offer.
pub const NO_MATCH_LABEL: &str = "N/A";
/// Label used when the request failed.
pub const ERROR_LABEL: &str = "Error";

/// A scored candidate character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognitionMatch {
    pub character: String,
    pub score: f64,
}

impl RecognitionMatch {
    pub fn new(character: impl Into<String>, score: f64) -> Self {
        Self { character: character.into(), score }
    }

    pub fn no_match() -> Self {
        Self::new(NO_MATCH_LABEL, 0.0)
    }

    pub fn error() -> Self {
        Self::new(ERROR_LABEL, 0.0)
    }

    pub fn is_sentinel(&self) -> bool {
        self.score == 0.0 && (self.character == NO_MATCH_LABEL || self.character == ERROR_LABEL)
    }
}

pub type ReadyCallback = Box<dyn FnOnce()>;
pub type MatchAnswer = Result<Vec<RecognitionMatch>, RecognizerError>;
pub type MatchCallback = Box<dyn FnOnce(MatchAnswer)>;

pub trait Recognizer {
    /// Start loading dataset `name` from `path`; `on_loaded` fires once it is
    /// usable. An `Err` means loading never started.
    fn init(&self, name: &str, path: &str, on_loaded: ReadyCallback) -> Result<(), RecognizerError>;

    /// Analyze `strokes` (lists of `[x, y]` pairs in drawing order) and match
    /// them against dataset `matcher`. The answer, best first, arrives through
    /// `on_matches`. An `Err` is a synchronous failure; `on_matches` is then
    /// dropped without being called.
    fn match_strokes(
        &self,
        matcher: &str,
        strokes: &[Vec<[f64; 2]>],
        limit: usize,
        on_matches: MatchCallback,
    ) -> Result<(), RecognizerError>;
}

/// Countdown latch: ready once every armed dataset has reported in.
#[derive(Clone, Debug, Default)]
pub struct ReadinessLatch {
    remaining: Rc<Cell<usize>>,
    armed: Rc<Cell<bool>>,
}

impl ReadinessLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `count` signals. Zero is ready on the spot.
    pub fn arm(&self, count: usize) {
        self.remaining.set(count);
        self.armed.set(true);
    }

    pub fn is_ready(&self) -> bool {
        self.armed.get() && self.remaining.get() == 0
    }

    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    /// Returns true on the signal that made the latch ready.
    pub fn count_down(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return false;
        }
        self.remaining.set(left - 1);
        left == 1
    }
}

/// Loads every dataset through `recognizer` and calls `on_ready` once all of
/// them have signalled. Each dataset's signal is a `FnOnce`, so it counts at
/// most once. Returns the datasets whose loading failed to start; while
/// any did, readiness is never reached.
pub fn load_datasets<R: Recognizer + ?Sized>(
    recognizer: &R,
    latch: &ReadinessLatch,
    datasets: &[crate::config::DataSet],
    on_ready: impl FnOnce() + 'static,
) -> Vec<(String, RecognizerError)> {
    latch.arm(datasets.len());
    let boxed: Box<dyn FnOnce()> = Box::new(on_ready);
    let on_ready = Rc::new(RefCell::new(Some(boxed)));
    if datasets.is_empty() {
        fire(&on_ready);
        return Vec::new();
    }

    let mut failed = Vec::new();
    for ds in datasets {
        let latch = latch.clone();
        let on_ready = on_ready.clone();
        let name = ds.name.clone();
        let signal: ReadyCallback = Box::new(move || {
            debug!("recognition dataset '{name}' loaded");
            if latch.count_down() {
                info!("recognition data ready");
                fire(&on_ready);
            }
        });
        if let Err(e) = recognizer.init(&ds.name, &ds.path, signal) {
            failed.push((ds.name.clone(), e));
        }
    }
    failed
}

fn fire(slot: &Rc<RefCell<Option<Box<dyn FnOnce()>>>>) {
    let cb = slot.borrow_mut().take();
    if let Some(cb) = cb {
        cb();
    }
}
