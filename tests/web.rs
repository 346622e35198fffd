// Browser-only checks. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use hanzi_sketch::surface::CanvasSurface;
use hanzi_sketch::{
    DisplayRect, LogicalSize, Point, RawPoint, Sample, StrokeCapture, StrokeStyle, Surface,
};

const SIZE: LogicalSize = LogicalSize { width: 400.0, height: 400.0 };

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.create_element("canvas").unwrap().dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn canvas_bitmap_is_fixed_to_logical_size() {
    let c = canvas();
    c.set_width(50);
    c.set_height(80);
    let mut surface = CanvasSurface::new(&c, SIZE, StrokeStyle::default()).unwrap();
    assert_eq!((c.width(), c.height()), (400, 400));

    surface.segment(Point::new(10.0, 10.0), Point::new(390.0, 390.0));
    surface.polyline(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0), Point::new(200.0, 200.0)]);
    surface.clear();
}

#[wasm_bindgen_test]
fn missing_recognizer_is_detected() {
    assert!(hanzi_sketch::hanzi_lookup::HanziLookup::detect().is_none());
}

fn pixels(c: &HtmlCanvasElement) -> Vec<u8> {
    let ctx: CanvasRenderingContext2d = c.get_context("2d").unwrap().unwrap().dyn_into().unwrap();
    ctx.get_image_data(0.0, 0.0, 400.0, 400.0).unwrap().data().0
}

fn draw(cap: &mut StrokeCapture<CanvasSurface>, path: &[(f64, f64)]) {
    let rect = DisplayRect::new(0.0, 0.0, 400.0, 400.0);
    let at = |&(x, y): &(f64, f64)| Sample::new(RawPoint::new(x, y), rect);
    cap.begin_stroke(at(&path[0]));
    for p in &path[1..] {
        cap.extend_stroke(at(p));
    }
    cap.end_stroke();
}

#[wasm_bindgen_test]
fn undo_leaves_the_same_pixels_as_a_clean_draw() {
    let strokes: [&[(f64, f64)]; 3] = [
        &[(60.0, 80.0), (200.0, 90.0), (340.0, 70.0)],
        &[(200.0, 40.0), (190.0, 200.0), (120.0, 360.0)],
        &[(210.0, 210.0), (280.0, 300.0), (350.0, 360.0)],
    ];

    let undone_canvas = canvas();
    let mut undone =
        StrokeCapture::new(CanvasSurface::new(&undone_canvas, SIZE, StrokeStyle::default()).unwrap(), SIZE);
    for s in strokes {
        draw(&mut undone, s);
    }
    undone.undo();

    let clean_canvas = canvas();
    let mut clean =
        StrokeCapture::new(CanvasSurface::new(&clean_canvas, SIZE, StrokeStyle::default()).unwrap(), SIZE);
    for s in &strokes[..2] {
        draw(&mut clean, s);
    }

    let (a, b) = (pixels(&undone_canvas), pixels(&clean_canvas));
    assert!(a.iter().any(|&v| v != 0));
    assert!(a == b, "redraw after undo differs from a clean draw");
}
