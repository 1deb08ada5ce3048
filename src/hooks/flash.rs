//! Flash-message auto-dismissal.
//!
//! A mounted flash hides itself after a fixed delay. Hovering restarts the
//! countdown; a `flash:hide-start` event on the element (the app beginning
//! its own hide transition) cancels it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::error::HookError;

/// How long a flash message stays up without interaction.
pub const FLASH_HIDE_MS: u32 = 8_000;

/// DOM event that cancels the pending auto-dismiss.
const HIDE_START_EVENT: &str = "flash:hide-start";

pub struct Flash {
    el: HtmlElement,
    timer: Rc<RefCell<Option<Timeout>>>,
    mouseover: Option<Closure<dyn FnMut()>>,
    hide_start: Option<Closure<dyn FnMut()>>,
}

impl Flash {
    pub fn mount(
        el: HtmlElement,
        on_dismiss: impl Fn() + 'static,
    ) -> Result<Flash, HookError> {
        let on_dismiss: Rc<dyn Fn()> = Rc::new(on_dismiss);
        let timer = Rc::new(RefCell::new(Some(schedule(Rc::clone(&on_dismiss)))));

        let mouseover = {
            let timer = Rc::clone(&timer);
            let on_dismiss = Rc::clone(&on_dismiss);
            Closure::wrap(Box::new(move || {
                *timer.borrow_mut() = Some(schedule(Rc::clone(&on_dismiss)));
            }) as Box<dyn FnMut()>)
        };
        el.add_event_listener_with_callback("mouseover", mouseover.as_ref().unchecked_ref())?;

        let hide_start = {
            let timer = Rc::clone(&timer);
            Closure::wrap(Box::new(move || {
                *timer.borrow_mut() = None;
            }) as Box<dyn FnMut()>)
        };
        el.add_event_listener_with_callback(HIDE_START_EVENT, hide_start.as_ref().unchecked_ref())?;

        Ok(Flash {
            el,
            timer,
            mouseover: Some(mouseover),
            hide_start: Some(hide_start),
        })
    }
}

fn schedule(on_dismiss: Rc<dyn Fn()>) -> Timeout {
    Timeout::new(FLASH_HIDE_MS, move || on_dismiss())
}

impl Drop for Flash {
    fn drop(&mut self) {
        if let Some(cb) = self.mouseover.as_ref() {
            let _ = self
                .el
                .remove_event_listener_with_callback("mouseover", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.hide_start.as_ref() {
            let _ = self
                .el
                .remove_event_listener_with_callback(HIDE_START_EVENT, cb.as_ref().unchecked_ref());
        }
        *self.timer.borrow_mut() = None;
    }
}
