//! Debouncing on top of `setTimeout`.
//!
//! Same contract as [`tabula_core::Debouncer`], with the browser's timer
//! standing in for the injected clock: every call clears the pending
//! timeout and schedules a new one carrying the latest arguments.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

type Callback<A> = Rc<RefCell<Box<dyn FnMut(A)>>>;

/// Trailing-edge debouncer driven by browser timeouts.
pub struct TimeoutDebouncer<A: 'static> {
    delay_ms: i32,
    callback: Callback<A>,
    pending: Rc<Cell<bool>>,
    handle: Option<i32>,
    timeout: Option<Closure<dyn FnMut()>>,
}

impl<A: 'static> TimeoutDebouncer<A> {
    /// Wrap `callback` so it runs `delay_ms` after the last call.
    pub fn new(delay_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self {
            delay_ms: i32::try_from(delay_ms).unwrap_or(i32::MAX),
            callback: Rc::new(RefCell::new(Box::new(callback))),
            pending: Rc::new(Cell::new(false)),
            handle: None,
            timeout: None,
        }
    }

    /// Schedule an invocation with `args`, replacing any pending one.
    pub fn call(&mut self, args: A) -> Result<(), JsValue> {
        self.cancel();

        let callback = Rc::clone(&self.callback);
        let pending = Rc::clone(&self.pending);
        let mut args = Some(args);
        let timeout = Closure::new(move || {
            pending.set(false);
            if let Some(args) = args.take() {
                tracing::trace!("debounced call fired");
                (callback.borrow_mut())(args);
            }
        });

        let handle = window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                timeout.as_ref().unchecked_ref(),
                self.delay_ms,
            )?;
        self.pending.set(true);
        self.handle = Some(handle);
        self.timeout = Some(timeout);
        Ok(())
    }

    /// Drop the pending invocation. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.pending.replace(false);
        if let Some(handle) = self.handle.take() {
            if let Some(w) = window() {
                w.clear_timeout_with_handle(handle);
            }
        }
        self.timeout = None;
        if was_pending {
            tracing::trace!("debounced call cancelled");
        }
        was_pending
    }

    /// Whether an invocation is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

impl<A: 'static> Drop for TimeoutDebouncer<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}
