//! Recognition adapter: hands a finished `StrokeSet` to the recognizer and turns
//! its callback into a single awaitable answer.
//!
//! One request per adapter at a time; a second one is refused with `Busy`
//! rather than queued. Every request races an optional timeout so a recognizer
//! that never calls back cannot hold the slot forever.

use std::cell::Cell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, Either};
use log::{debug, error, warn};

use crate::challenge::CheckOutcome;
use crate::config::{DataSet, PadConfig};
use crate::dataset::CharacterRecord;
use crate::error::RecognitionError;
use crate::recognizer::{self, MatchAnswer, ReadinessLatch, RecognitionMatch, Recognizer};
use crate::stroke::StrokeSet;
use crate::timer::Timer;

/// Candidates asked for when only the best guess matters.
const CHECK_LIMIT: usize = 1;

pub struct RecognitionAdapter<R, T> {
    recognizer: R,
    timer: T,
    matcher: String,
    timeout_ms: Option<u32>,
    readiness: ReadinessLatch,
    in_flight: Rc<Cell<bool>>,
}

/// Holds the single request slot; frees it on drop, including when the
/// request future itself is dropped mid-flight.
struct Slot(Rc<Cell<bool>>);

impl Slot {
    fn claim(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Slot(flag.clone()))
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<R: Recognizer, T: Timer> RecognitionAdapter<R, T> {
    pub fn new(recognizer: R, timer: T, matcher: impl Into<String>, timeout_ms: Option<u32>) -> Self {
        Self {
            recognizer,
            timer,
            matcher: matcher.into(),
            timeout_ms,
            readiness: ReadinessLatch::new(),
            in_flight: Rc::new(Cell::new(false)),
        }
    }

    pub fn from_config(recognizer: R, timer: T, cfg: &PadConfig) -> Self {
        Self::new(recognizer, timer, cfg.matcher.clone(), cfg.timeout_ms)
    }

    /// Load the reference data. `on_ready` runs once every dataset is in.
    pub fn initialize(&self, datasets: &[DataSet], on_ready: impl FnOnce() + 'static) {
        let failed = recognizer::load_datasets(&self.recognizer, &self.readiness, datasets, on_ready);
        for (name, e) in failed {
            error!("recognition dataset '{name}' failed to load: {e}");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Raw request. Guards come back as `NotReady`, `EmptyStrokes` or `Busy`
    /// without touching the recognizer; everything else is a runtime failure.
    pub async fn submit(
        &self,
        strokes: &StrokeSet,
        max_results: usize,
    ) -> Result<Vec<RecognitionMatch>, RecognitionError> {
        if !self.is_ready() {
            return Err(RecognitionError::NotReady);
        }
        if strokes.is_empty() {
            return Err(RecognitionError::EmptyStrokes);
        }
        let Some(_slot) = Slot::claim(&self.in_flight) else {
            return Err(RecognitionError::Busy);
        };

        let pairs = strokes.to_pairs();
        let (tx, rx) = oneshot::channel::<MatchAnswer>();
        debug!("recognizing {} strokes, limit {max_results}", pairs.len());
        self.recognizer.match_strokes(
            &self.matcher,
            &pairs,
            max_results,
            Box::new(move |answer: MatchAnswer| {
                let _ = tx.send(answer);
            }),
        )?;

        let answer = match self.timeout_ms {
            None => rx.await.map_err(|_| RecognitionError::Dropped)?,
            Some(ms) => match future::select(rx, self.timer.sleep(ms)).await {
                Either::Left((answer, _)) => answer.map_err(|_| RecognitionError::Dropped)?,
                Either::Right(_) => return Err(RecognitionError::Timeout(ms)),
            },
        };
        let mut matches = answer?;
        rank(&mut matches, max_results);
        Ok(matches)
    }

    /// Free recognition: ordered candidates, possibly none. Runtime failures
    /// become a single `"Error"` sentinel; only guard rejections are `Err`.
    pub async fn recognize(
        &self,
        strokes: &StrokeSet,
        max_results: usize,
    ) -> Result<Vec<RecognitionMatch>, RecognitionError> {
        match self.submit(strokes, max_results).await {
            Ok(matches) => Ok(matches),
            Err(e) if e.is_input_guard() => {
                warn!("recognition refused: {e}");
                Err(e)
            }
            Err(e) => {
                error!("Recognition error: {e}");
                Ok(vec![RecognitionMatch::error()])
            }
        }
    }

    /// Definition check: judge the single best candidate against `target`.
    /// No candidate reads as `"N/A"`, a failure as `"Error"`; both score 0.
    pub async fn check(
        &self,
        strokes: &StrokeSet,
        target: &CharacterRecord,
    ) -> Result<CheckOutcome, RecognitionError> {
        let top = self
            .recognize(strokes, CHECK_LIMIT)
            .await?
            .into_iter()
            .next()
            .unwrap_or_else(RecognitionMatch::no_match);
        Ok(CheckOutcome::judge(&top, target))
    }
}

/// Best first; ties keep the recognizer's order. NaN scores rank last.
fn rank(matches: &mut Vec<RecognitionMatch>, limit: usize) {
    let key = |m: &RecognitionMatch| if m.score.is_nan() { f64::NEG_INFINITY } else { m.score };
    matches.sort_by(|a, b| key(b).total_cmp(&key(a)));
    matches.truncate(limit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_and_truncates() {
        let mut m = vec![
            RecognitionMatch::new("a", 0.2),
            RecognitionMatch::new("b", 0.9),
            RecognitionMatch::new("c", 0.5),
        ];
        rank(&mut m, 2);
        assert_eq!(m, vec![RecognitionMatch::new("b", 0.9), RecognitionMatch::new("c", 0.5)]);
    }

    #[test]
    fn test_rank_puts_nan_scores_last() {
        let mut m: Vec<_> = (0..30)
            .map(|i| {
                let score = if i % 3 == 0 { f64::NAN } else { i as f64 };
                RecognitionMatch::new(format!("c{i}"), score)
            })
            .collect();
        rank(&mut m, 25);
        let scores: Vec<f64> = m.iter().map(|r| r.score).collect();
        assert!(scores[..20].windows(2).all(|w| w[0] > w[1]));
        assert_eq!(scores[0], 29.0);
        assert!(scores[20..].iter().all(|s| s.is_nan()));
    }

    #[test]
    fn test_slot_is_exclusive_and_released() {
        let flag = Rc::new(Cell::new(false));
        let first = Slot::claim(&flag).unwrap();
        assert!(Slot::claim(&flag).is_none());
        drop(first);
        assert!(!flag.get());
        assert!(Slot::claim(&flag).is_some());
    }
}
