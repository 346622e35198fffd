//! "Draw from definition": show a meaning, let the learner draw, judge the
//! recognizer's best guess against the target's written forms.

use crate::dataset::{self, CharacterRecord};
use crate::recognizer::RecognitionMatch;

/// Verdict on one drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    pub character: String,
    /// Top score rounded to a whole number.
    pub score: i64,
    pub is_correct: bool,
}

impl CheckOutcome {
    /// `top` is the recognizer's best candidate, or one of the sentinels.
    pub fn judge(top: &RecognitionMatch, target: &CharacterRecord) -> Self {
        let is_correct = !top.is_sentinel() && target.is_written_as(&top.character);
        Self {
            character: top.character.clone(),
            score: top.score.round() as i64,
            is_correct,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DefinitionChallenge {
    target: CharacterRecord,
    outcome: Option<CheckOutcome>,
}

impl DefinitionChallenge {
    pub fn new(target: CharacterRecord) -> Self {
        Self { target, outcome: None }
    }

    /// Random target from `pool`; `None` when the pool is empty.
    pub fn from_pool(pool: &[CharacterRecord]) -> Option<Self> {
        dataset::pick_random(pool).cloned().map(Self::new)
    }

    pub fn target(&self) -> &CharacterRecord {
        &self.target
    }

    /// What the learner is shown.
    pub fn prompt(&self) -> &str {
        &self.target.meaning
    }

    pub fn outcome(&self) -> Option<&CheckOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.outcome.is_some()
    }

    /// First verdict wins; the challenge is over once answered.
    pub fn record(&mut self, outcome: CheckOutcome) -> &CheckOutcome {
        self.outcome.get_or_insert(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> CharacterRecord {
        CharacterRecord::new("人", "人", "rén", "person")
    }

    #[test]
    fn test_judge_rounds_and_matches() {
        let o = CheckOutcome::judge(&RecognitionMatch::new("人", 86.6), &person());
        assert_eq!(o, CheckOutcome { character: "人".into(), score: 87, is_correct: true });
    }

    #[test]
    fn test_judge_accepts_traditional_form() {
        let fish = CharacterRecord::new("鱼", "魚", "yú", "fish");
        assert!(CheckOutcome::judge(&RecognitionMatch::new("魚", 40.0), &fish).is_correct);
        assert!(!CheckOutcome::judge(&RecognitionMatch::new("角", 40.0), &fish).is_correct);
    }

    #[test]
    fn test_sentinels_are_never_correct() {
        let na = CharacterRecord::new("N/A", "N/A", "", "");
        assert!(!CheckOutcome::judge(&RecognitionMatch::no_match(), &na).is_correct);
        assert!(!CheckOutcome::judge(&RecognitionMatch::error(), &person()).is_correct);
    }

    #[test]
    fn test_first_verdict_sticks() {
        let mut ch = DefinitionChallenge::new(person());
        assert_eq!(ch.prompt(), "person");
        assert!(!ch.is_answered());
        ch.record(CheckOutcome::judge(&RecognitionMatch::new("人", 90.0), &person()));
        ch.record(CheckOutcome::judge(&RecognitionMatch::error(), &person()));
        assert!(ch.outcome().unwrap().is_correct);
    }

    #[test]
    fn test_from_pool() {
        assert!(DefinitionChallenge::from_pool(&[]).is_none());
        let ch = DefinitionChallenge::from_pool(&[person()]).unwrap();
        assert_eq!(ch.target(), &person());
    }
}
