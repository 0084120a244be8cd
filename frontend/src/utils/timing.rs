use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{js_sys, Window};

use crate::error::EffectResult;

/// Resolves on the next animation frame with the frame timestamp in ms.
pub async fn next_frame(window: &Window) -> EffectResult<f64> {
    let mut schedule = |resolve: js_sys::Function, reject: js_sys::Function| {
        if let Err(e) = window.request_animation_frame(&resolve) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    };
    let timestamp = JsFuture::from(js_sys::Promise::new(&mut schedule)).await?;
    Ok(timestamp.as_f64().unwrap_or_default())
}

/// Monotonic counter; only the most recently issued ticket stays current.
#[derive(Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

pub struct Ticket {
    source: Rc<Cell<u64>>,
    value: u64,
}

impl Generation {
    pub fn advance(&self) -> Ticket {
        let value = self.0.get().wrapping_add(1);
        self.0.set(value);
        Ticket {
            source: self.0.clone(),
            value,
        }
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.source.get() == self.value
    }
}

/// At most one pending run: `try_open` succeeds again only after `release`.
#[derive(Debug, Default)]
pub struct Gate {
    pending: Cell<bool>,
}

impl Gate {
    pub fn try_open(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

/// Lets one callback through per delay; triggers while a callback is pending
/// are dropped.
#[derive(Clone)]
pub struct Throttle {
    delay_ms: u32,
    gate: Rc<Gate>,
    timeout: Rc<RefCell<Option<Timeout>>>,
}

impl Throttle {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            gate: Rc::new(Gate::default()),
            timeout: Rc::new(RefCell::new(None)),
        }
    }

    pub fn trigger<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        if !self.gate.try_open() {
            return;
        }
        let gate = self.gate.clone();
        let timeout = Timeout::new(self.delay_ms, move || {
            gate.release();
            callback();
        });
        // The previous handle has already fired, dropping it is a no-op.
        *self.timeout.borrow_mut() = Some(timeout);
    }
}

/// Fires once after `delay_ms` of quiet; every trigger restarts the wait.
#[derive(Clone)]
pub struct Debounce {
    delay_ms: u32,
    timeout: Rc<RefCell<Option<Timeout>>>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            timeout: Rc::new(RefCell::new(None)),
        }
    }

    pub fn trigger<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let timeout = Timeout::new(self.delay_ms, callback);
        // Replacing the handle cancels the pending one.
        *self.timeout.borrow_mut() = Some(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_is_current() {
        let generation = Generation::default();
        let first = generation.advance();
        assert!(first.is_current());

        let second = generation.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn cloned_generations_share_the_counter() {
        let generation = Generation::default();
        let ticket = generation.advance();
        generation.clone().advance();
        assert!(!ticket.is_current());
    }

    #[test]
    fn gate_holds_one_pending_run() {
        let gate = Gate::default();
        assert!(!gate.is_pending());
        assert!(gate.try_open());
        assert!(gate.is_pending());

        // Scroll events during the wait are dropped.
        assert!(!gate.try_open());
        assert!(!gate.try_open());

        gate.release();
        assert!(!gate.is_pending());
        assert!(gate.try_open());
    }

    #[test]
    fn triggers_between_runs_yield_one_run_per_window() {
        let gate = Gate::default();
        let mut runs = 0;
        // Five bursts of four events; the timer fires after each burst.
        for _ in 0..5 {
            for _ in 0..4 {
                if gate.try_open() {
                    runs += 1;
                }
            }
            gate.release();
        }
        assert_eq!(runs, 5);
    }
}
