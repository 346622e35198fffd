use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Source of delays for request timeouts.
pub trait Timer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// `window.setTimeout` backed timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        let Some(win) = web_sys::window() else {
            warn!("no window: recognition timeout disabled");
            return future::pending().boxed_local();
        };
        let (tx, rx) = oneshot::channel::<()>();
        let cb = Closure::once_into_js(move || {
            let _ = tx.send(());
        });
        let delay = i32::try_from(ms).unwrap_or(i32::MAX);
        if win
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
            .is_err()
        {
            warn!("setTimeout failed: recognition timeout disabled");
            return future::pending().boxed_local();
        }
        async move {
            let _ = rx.await;
        }
        .boxed_local()
    }
}
