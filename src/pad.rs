//! Browser views: the free recognition pad and the draw-from-definition quiz.
//!
//! Each call to a `start_*` entry point builds an independent pad around one
//! canvas: its own strokes, recognizer adapter and readiness. Optional page
//! elements are found by id prefix, e.g. for canvas `pad`:
//! `pad-recognize`, `pad-undo`, `pad-clear`, `pad-next` (buttons),
//! `pad-strokes`, `pad-status`, `pad-results`, `pad-prompt` (text).

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlButtonElement, HtmlCanvasElement, MouseEvent, TouchEvent};

use crate::capture::StrokeCapture;
use crate::challenge::DefinitionChallenge;
use crate::config::PadConfig;
use crate::dataset::{self, CharacterRecord};
use crate::error::{ConfigError, ShellError};
use crate::geometry::{DisplayRect, RawPoint, Sample};
use crate::hanzi_lookup::HanziLookup;
use crate::recognition::RecognitionAdapter;
use crate::recognizer::RecognitionMatch;
use crate::surface::CanvasSurface;
use crate::timer::BrowserTimer;
use crate::view::{self, Controls, FreeResults};

type Adapter = RecognitionAdapter<HanziLookup, BrowserTimer>;

enum Mode {
    Free {
        results: FreeResults,
    },
    Definition {
        pool: Vec<CharacterRecord>,
        challenge: DefinitionChallenge,
    },
}

enum Request {
    /// Free recognition, tagged with the drawing generation.
    Free(u64),
    Check(CharacterRecord),
}

struct Pad {
    id: String,
    doc: Document,
    canvas: HtmlCanvasElement,
    capture: StrokeCapture<CanvasSurface>,
    max_results: usize,
    /// Set on click, before the request future first runs.
    pending: bool,
    mode: Mode,
}

#[derive(Clone)]
struct Shell {
    pad: Rc<RefCell<Pad>>,
    adapter: Option<Rc<Adapter>>,
}

/// Free recognition: draw anything, list the best candidates.
#[wasm_bindgen]
pub fn start_drawing_pad(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let cfg = PadConfig::from_optional_json(config_json.as_deref()).map_err(ShellError::from)?;
    start(canvas_id, cfg, Mode::Free { results: FreeResults::default() })?;
    Ok(())
}

/// Draw from definition: a meaning is shown, the drawing is checked against
/// it. `characters_json` replaces the built-in character list.
#[wasm_bindgen]
pub fn start_definition_quiz(
    canvas_id: &str,
    config_json: Option<String>,
    characters_json: Option<String>,
) -> Result<(), JsValue> {
    let cfg = PadConfig::from_optional_json(config_json.as_deref()).map_err(ShellError::from)?;
    let pool = match characters_json.as_deref() {
        Some(json) => dataset::parse_records(json)
            .map_err(ConfigError::from)
            .map_err(ShellError::from)?,
        None => dataset::builtin(),
    };
    let challenge = DefinitionChallenge::from_pool(&pool).ok_or_else(|| {
        ShellError::Config(ConfigError::Invalid("character list is empty".into()))
    })?;
    start(canvas_id, cfg, Mode::Definition { pool, challenge })?;
    Ok(())
}

fn start(canvas_id: &str, cfg: PadConfig, mode: Mode) -> Result<(), ShellError> {
    let win = web_sys::window().ok_or(ShellError::NoWindow)?;
    let doc = win.document().ok_or(ShellError::NoDocument)?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| ShellError::MissingElement(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| ShellError::MissingElement(canvas_id.to_string()))?;
    let surface = CanvasSurface::new(&canvas, cfg.logical_size(), cfg.style.clone())?;

    let adapter = HanziLookup::detect()
        .map(|lookup| Rc::new(RecognitionAdapter::from_config(lookup, BrowserTimer, &cfg)));

    let shell = Shell {
        pad: Rc::new(RefCell::new(Pad {
            id: canvas_id.to_string(),
            doc: doc.clone(),
            canvas: canvas.clone(),
            capture: StrokeCapture::new(surface, cfg.logical_size()),
            max_results: cfg.max_results,
            pending: false,
            mode,
        })),
        adapter,
    };

    attach_pointer(&shell, &canvas)?;
    attach_buttons(&shell, &doc, canvas_id)?;

    if let Some(adapter) = &shell.adapter {
        let on_ready = shell.clone();
        adapter.initialize(&cfg.datasets, move || on_ready.render());
    }
    shell.render();
    debug!("pad '{canvas_id}' started");
    Ok(())
}

// --- Input ------------------------------------------------------------------

fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static) -> Result<(), ShellError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn sample_at(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Sample {
    // Layout can change between events, so the rect is read every time.
    let rect = canvas.get_bounding_client_rect();
    Sample::new(
        RawPoint::new(client_x, client_y),
        DisplayRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
    )
}

fn mouse_sample(canvas: &HtmlCanvasElement, evt: &MouseEvent) -> Sample {
    sample_at(canvas, evt.client_x() as f64, evt.client_y() as f64)
}

/// First active touch point, if any.
fn touch_sample(canvas: &HtmlCanvasElement, evt: &TouchEvent) -> Option<Sample> {
    let touch = evt.touches().get(0)?;
    Some(sample_at(canvas, touch.client_x() as f64, touch.client_y() as f64))
}

fn attach_pointer(shell: &Shell, canvas: &HtmlCanvasElement) -> Result<(), ShellError> {
    let target: &EventTarget = canvas.as_ref();

    let s = shell.clone();
    listen(target, "mousedown", move |evt: MouseEvent| {
        evt.prevent_default();
        s.press(|c| mouse_sample(c, &evt));
    })?;
    let s = shell.clone();
    listen(target, "mousemove", move |evt: MouseEvent| {
        s.drag(|c| Some(mouse_sample(c, &evt)), &evt);
    })?;
    for kind in ["mouseup", "mouseleave"] {
        let s = shell.clone();
        listen(target, kind, move |evt: MouseEvent| s.release(&evt))?;
    }

    let s = shell.clone();
    listen(target, "touchstart", move |evt: TouchEvent| {
        evt.prevent_default();
        let c = s.pad.borrow().canvas.clone();
        if let Some(sample) = touch_sample(&c, &evt) {
            s.press(|_| sample);
        }
    })?;
    let s = shell.clone();
    listen(target, "touchmove", move |evt: TouchEvent| {
        s.drag(|c| touch_sample(c, &evt), &evt);
    })?;
    for kind in ["touchend", "touchcancel"] {
        let s = shell.clone();
        listen(target, kind, move |evt: TouchEvent| s.release(&evt))?;
    }
    Ok(())
}

impl Shell {
    fn drawing_locked(pad: &Pad) -> bool {
        matches!(&pad.mode, Mode::Definition { challenge, .. } if challenge.is_answered())
    }

    fn press(&self, sample: impl FnOnce(&HtmlCanvasElement) -> Sample) {
        {
            let mut pad = self.pad.borrow_mut();
            if Self::drawing_locked(&pad) {
                return;
            }
            let sample = sample(&pad.canvas);
            pad.capture.begin_stroke(sample);
        }
    }

    fn drag(&self, sample: impl FnOnce(&HtmlCanvasElement) -> Option<Sample>, evt: &web_sys::Event) {
        let mut pad = self.pad.borrow_mut();
        if pad.capture.state() == crate::capture::CaptureState::Idle {
            return;
        }
        evt.prevent_default();
        if let Some(sample) = sample(&pad.canvas) {
            pad.capture.extend_stroke(sample);
        }
    }

    fn release(&self, evt: &web_sys::Event) {
        let closed = {
            let mut pad = self.pad.borrow_mut();
            if pad.capture.state() == crate::capture::CaptureState::Idle {
                false
            } else {
                evt.prevent_default();
                pad.capture.end_stroke();
                true
            }
        };
        if closed {
            self.render();
        }
    }
}

// --- Buttons ----------------------------------------------------------------

fn attach_buttons(shell: &Shell, doc: &Document, id: &str) -> Result<(), ShellError> {
    let actions: [(&str, fn(&Shell)); 4] = [
        ("recognize", Shell::recognize),
        ("undo", Shell::undo),
        ("clear", Shell::clear),
        ("next", Shell::next),
    ];
    for (suffix, action) in actions {
        let Some(el) = doc.get_element_by_id(&format!("{id}-{suffix}")) else {
            continue;
        };
        let s = shell.clone();
        listen(el.as_ref(), "click", move |_evt: MouseEvent| action(&s))?;
    }
    Ok(())
}

impl Shell {
    fn undo(&self) {
        {
            let mut pad = self.pad.borrow_mut();
            if Self::drawing_locked(&pad) {
                return;
            }
            pad.capture.undo();
            if let Mode::Free { results } = &mut pad.mode {
                results.invalidate();
            }
        }
        self.render();
    }

    fn clear(&self) {
        {
            let mut pad = self.pad.borrow_mut();
            if Self::drawing_locked(&pad) {
                return;
            }
            pad.capture.clear();
            if let Mode::Free { results } = &mut pad.mode {
                results.invalidate();
            }
        }
        self.render();
    }

    /// New random target; only meaningful in the definition quiz.
    fn next(&self) {
        {
            let mut pad = self.pad.borrow_mut();
            let Mode::Definition { pool, challenge } = &mut pad.mode else {
                return;
            };
            match DefinitionChallenge::from_pool(pool) {
                Some(fresh) => *challenge = fresh,
                None => {
                    warn!("no character available for a new challenge");
                    return;
                }
            }
            pad.capture.clear();
        }
        self.render();
    }

    fn recognize(&self) {
        let Some(adapter) = self.adapter.clone() else {
            return;
        };
        let (strokes, max_results, request) = {
            let mut pad = self.pad.borrow_mut();
            let controls = controls_for(&pad, adapter.is_ready(), adapter.is_busy());
            if !controls.recognize {
                return;
            }
            pad.pending = true;
            let request = match &pad.mode {
                Mode::Definition { challenge, .. } => Request::Check(challenge.target().clone()),
                Mode::Free { results } => Request::Free(results.ticket()),
            };
            (pad.capture.strokes().clone(), pad.max_results, request)
        };
        self.render();

        let shell = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match request {
                Request::Free(ticket) => {
                    let answer = adapter.recognize(&strokes, max_results).await;
                    let mut pad = shell.pad.borrow_mut();
                    if let (Ok(matches), Mode::Free { results }) = (answer, &mut pad.mode) {
                        if !results.accept(ticket, matches) {
                            debug!("dropping results for an edited drawing");
                        }
                    }
                }
                Request::Check(target) => {
                    let answer = adapter.check(&strokes, &target).await;
                    let mut pad = shell.pad.borrow_mut();
                    if let (Ok(outcome), Mode::Definition { challenge, .. }) = (answer, &mut pad.mode) {
                        // Ignore a verdict that arrives after "next" moved on.
                        if challenge.target() == &target {
                            challenge.record(outcome);
                        }
                    }
                }
            }
            shell.pad.borrow_mut().pending = false;
            shell.render();
        });
    }
}

// --- Rendering --------------------------------------------------------------

fn controls_for(pad: &Pad, ready: bool, busy: bool) -> Controls {
    let strokes = pad.capture.stroke_count();
    let busy = busy || pad.pending;
    match &pad.mode {
        Mode::Free { .. } => Controls::free(strokes, ready, busy),
        Mode::Definition { challenge, .. } => {
            Controls::definition(strokes, ready, busy, challenge.is_answered())
        }
    }
}

impl Shell {
    fn render(&self) {
        let ready = self.adapter.as_ref().is_some_and(|a| a.is_ready());
        let busy = self.adapter.as_ref().is_some_and(|a| a.is_busy());
        let pad = self.pad.borrow();
        let controls = controls_for(&pad, ready, busy);

        pad.set_enabled("recognize", controls.recognize);
        pad.set_enabled("undo", controls.undo);
        pad.set_enabled("clear", controls.clear);
        pad.set_enabled("next", controls.next);
        pad.set_text("strokes", &view::stroke_counter(pad.capture.stroke_count()));
        pad.set_text("status", if ready { "" } else { view::LOADING_MESSAGE });

        let lines = match &pad.mode {
            Mode::Free { results } => free_lines(results.matches()),
            Mode::Definition { challenge, .. } => {
                pad.set_text("prompt", challenge.prompt());
                definition_lines(challenge)
            }
        };
        if let Err(e) = pad.set_lines("results", &lines) {
            warn!("could not render results: {e}");
        }
    }
}

fn free_lines(results: &[RecognitionMatch]) -> Vec<String> {
    let mut lines = vec![view::results_summary(results)];
    lines.extend(results.iter().map(view::match_label));
    if let Some(best) = results.first() {
        lines.push(format!("Best Match: {}", best.character));
        lines.push(format!("Confidence: {}%", view::percent(best.score)));
    }
    lines
}

fn definition_lines(challenge: &DefinitionChallenge) -> Vec<String> {
    let Some(outcome) = challenge.outcome() else {
        return Vec::new();
    };
    let target = challenge.target();
    vec![
        if outcome.is_correct { "Correct!" } else { "Incorrect" }.to_string(),
        format!("You drew: {}", outcome.character),
        format!("Confidence: {}%", outcome.score),
        format!("Correct Character: {}", target.simplified),
        format!("Pinyin: {}", target.pinyin),
        format!("Meaning: {}", target.meaning),
    ]
}

impl Pad {
    fn element(&self, suffix: &str) -> Option<web_sys::Element> {
        self.doc.get_element_by_id(&format!("{}-{suffix}", self.id))
    }

    fn set_enabled(&self, suffix: &str, enabled: bool) {
        if let Some(button) = self
            .element(suffix)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(!enabled);
        }
    }

    fn set_text(&self, suffix: &str, text: &str) {
        if let Some(el) = self.element(suffix) {
            el.set_text_content(Some(text));
        }
    }

    /// One `<div>` per line; text only, never markup.
    fn set_lines(&self, suffix: &str, lines: &[String]) -> Result<(), ShellError> {
        let Some(el) = self.element(suffix) else {
            return Ok(());
        };
        el.set_text_content(None);
        for line in lines {
            let div = self.doc.create_element("div")?;
            div.set_text_content(Some(line));
            el.append_child(&div)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_lines_empty_state() {
        assert_eq!(free_lines(&[]), vec![view::EMPTY_RESULTS_HINT.to_string()]);
    }

    #[test]
    fn test_free_lines_list_best_match() {
        let lines = free_lines(&[RecognitionMatch::new("大", 0.91), RecognitionMatch::new("太", 0.4)]);
        assert_eq!(lines[0], "Found 2 possible matches:");
        assert_eq!(lines[1], "大 91% match");
        assert_eq!(lines[3], "Best Match: 大");
        assert_eq!(lines[4], "Confidence: 91%");
    }

    #[test]
    fn test_definition_lines_only_after_verdict() {
        let target = CharacterRecord::new("人", "人", "rén", "person");
        let mut ch = DefinitionChallenge::new(target.clone());
        assert!(definition_lines(&ch).is_empty());
        ch.record(crate::challenge::CheckOutcome::judge(&RecognitionMatch::new("入", 55.0), &target));
        let lines = definition_lines(&ch);
        assert_eq!(lines[0], "Incorrect");
        assert_eq!(lines[1], "You drew: 入");
        assert_eq!(lines[2], "Confidence: 55%");
        assert_eq!(lines[4], "Pinyin: rén");
    }
}
