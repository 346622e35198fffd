//! Hanzi Sketch core crate.
//!
//! A drawing pad for Chinese characters: strokes are captured from mouse or
//! touch input in a fixed logical coordinate space and handed to the page's
//! handwriting recognizer. Two browser views are exported, free recognition
//! (`start_drawing_pad`) and the draw-from-definition quiz
//! (`start_definition_quiz`). Everything below the `pad` module is plain Rust
//! and runs natively under `cargo test`.

use wasm_bindgen::prelude::*;

pub mod capture;
pub mod challenge;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod hanzi_lookup;
pub mod pad;
pub mod recognition;
pub mod recognizer;
pub mod stroke;
pub mod surface;
pub mod timer;
pub mod view;

pub use capture::{CaptureState, StrokeCapture};
pub use challenge::{CheckOutcome, DefinitionChallenge};
pub use config::{DataSet, PadConfig, StrokeStyle};
pub use dataset::CharacterRecord;
pub use error::{ConfigError, RecognitionError, RecognizerError, ShellError};
pub use geometry::{DisplayRect, LogicalSize, Point, RawPoint, Sample};
pub use recognition::RecognitionAdapter;
pub use recognizer::{ReadinessLatch, RecognitionMatch, Recognizer};
pub use stroke::{Stroke, StrokeSet};
pub use surface::{RecordingSurface, Surface};
pub use timer::Timer;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    init_logging();
}

/// Route `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
fn init_logging() {
    // A second module instance on the same page finds the logger taken.
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::info!("hanzi-sketch loaded");
    }
}
