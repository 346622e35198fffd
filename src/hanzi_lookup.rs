//! Binding to the `HanziLookup` handwriting library loaded by the host page as
//! `window.HanziLookup`.

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::RecognizerError;
use crate::recognizer::{MatchCallback, ReadyCallback, RecognitionMatch, Recognizer};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = HanziLookup, js_name = init, catch)]
    fn hanzi_lookup_init(name: &str, path: &str, ready: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = HanziLookup)]
    type AnalyzedCharacter;

    #[wasm_bindgen(constructor, js_namespace = HanziLookup, catch)]
    fn new(strokes: &JsValue) -> Result<AnalyzedCharacter, JsValue>;

    #[wasm_bindgen(js_namespace = HanziLookup)]
    type Matcher;

    #[wasm_bindgen(constructor, js_namespace = HanziLookup, catch)]
    fn new(name: &str) -> Result<Matcher, JsValue>;

    #[wasm_bindgen(method, js_name = "match", catch)]
    fn match_character(
        this: &Matcher,
        analyzed: &AnalyzedCharacter,
        limit: u32,
        done: &js_sys::Function,
    ) -> Result<(), JsValue>;
}

/// Recognizer backed by the page's `HanziLookup` global.
#[derive(Clone, Copy, Debug)]
pub struct HanziLookup {
    _present: (),
}

impl HanziLookup {
    /// `None` when the page did not load the library.
    pub fn detect() -> Option<Self> {
        let global = js_sys::global();
        match js_sys::Reflect::has(&global, &JsValue::from_str("HanziLookup")) {
            Ok(true) => Some(Self { _present: () }),
            _ => {
                warn!("window.HanziLookup is missing; recognition stays disabled");
                None
            }
        }
    }
}

impl Recognizer for HanziLookup {
    fn init(&self, name: &str, path: &str, on_loaded: ReadyCallback) -> Result<(), RecognizerError> {
        let cb = Closure::wrap(Box::new(ignore_repeats(on_loaded)) as Box<dyn FnMut()>).into_js_value();
        hanzi_lookup_init(name, path, cb.unchecked_ref())?;
        Ok(())
    }

    fn match_strokes(
        &self,
        matcher: &str,
        strokes: &[Vec<[f64; 2]>],
        limit: usize,
        on_matches: MatchCallback,
    ) -> Result<(), RecognizerError> {
        let payload = serde_json::to_string(strokes)?;
        let js_strokes = js_sys::JSON::parse(&payload)?;
        let analyzed = AnalyzedCharacter::new(&js_strokes)?;
        let matcher = Matcher::new(matcher)?;
        let done = Closure::once_into_js(move |matches: JsValue| on_matches(decode_matches(&matches)));
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);
        matcher.match_character(&analyzed, limit, done.unchecked_ref())?;
        Ok(())
    }
}

/// The library may report a dataset as loaded more than once; only the first
/// report is passed on.
fn ignore_repeats(on_loaded: ReadyCallback) -> impl FnMut() + 'static {
    let mut pending = Some(on_loaded);
    move || {
        if let Some(f) = pending.take() {
            f();
        }
    }
}

/// The library reports `null` for "nothing found"; anything else must be an
/// array of `{character, score}`.
fn decode_matches(value: &JsValue) -> Result<Vec<RecognitionMatch>, RecognizerError> {
    if value.is_null() || value.is_undefined() {
        return Ok(Vec::new());
    }
    let text = js_sys::JSON::stringify(value)
        .map_err(RecognizerError::from)?
        .as_string()
        .ok_or_else(|| RecognizerError::Decode("match list is not serializable".into()))?;
    serde_json::from_str(&text).map_err(|e| RecognizerError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_repeated_ready_reports_fire_once() {
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        let mut signal = ignore_repeats(Box::new(move || f.set(f.get() + 1)));
        signal();
        signal();
        signal();
        assert_eq!(fired.get(), 1);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn parsed(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn null_or_undefined_payload_is_empty() {
        assert!(decode_matches(&JsValue::NULL).unwrap().is_empty());
        assert!(decode_matches(&JsValue::UNDEFINED).unwrap().is_empty());
    }

    #[wasm_bindgen_test]
    fn extra_fields_are_ignored() {
        let got = decode_matches(&parsed(r#"[{"character":"人","score":0.9,"extra":1}]"#)).unwrap();
        assert_eq!(got, vec![RecognitionMatch::new("人", 0.9)]);
    }

    #[wasm_bindgen_test]
    fn malformed_payload_is_a_decode_error() {
        let err = decode_matches(&parsed(r#"[{"character":1}]"#)).unwrap_err();
        assert!(matches!(err, RecognizerError::Decode(_)));
        let err = decode_matches(&parsed(r#"{"character":"人"}"#)).unwrap_err();
        assert!(matches!(err, RecognizerError::Decode(_)));
    }
}
