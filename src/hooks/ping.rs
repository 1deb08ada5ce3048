//! Round-trip-time display.
//!
//! Pushes a `ping` at mount and renders the measured RTT when the server's
//! `pong` comes back.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::HtmlElement;

use crate::channel::EventChannel;
use crate::events::ClientEvent;
use crate::time;

pub struct Ping {
    el: HtmlElement,
    channel: Rc<dyn EventChannel>,
    sent_at_ms: Cell<f64>,
    last_rtt: Cell<Option<f64>>,
}

impl Ping {
    pub fn mount(el: HtmlElement, channel: Rc<dyn EventChannel>) -> Ping {
        let ping = Ping {
            el,
            channel,
            sent_at_ms: Cell::new(0.0),
            last_rtt: Cell::new(None),
        };
        ping.send();
        ping
    }

    /// Server answered: render the measured round trip.
    pub fn handle_pong(&self) {
        let rtt = time::now_millis() - self.sent_at_ms.get();
        self.last_rtt.set(Some(rtt));
        self.el.set_inner_text(&format!("ping: {}ms", rtt.round()));
    }

    /// The channel reconnected; measure again from scratch.
    pub fn reconnected(&self) {
        self.send();
    }

    fn send(&self) {
        self.sent_at_ms.set(time::now_millis());
        self.channel.push(ClientEvent::Ping {
            rtt: self.last_rtt.get(),
        });
    }
}
