//! Connection-status indicator: shown while the channel is down, hidden once
//! it (re)opens.

use web_sys::HtmlElement;

pub struct ConnectionStatus {
    el: HtmlElement,
}

impl ConnectionStatus {
    pub fn new(el: HtmlElement) -> ConnectionStatus {
        ConnectionStatus { el }
    }

    pub fn on_open(&self) {
        let _ = self.el.set_attribute("hidden", "hidden");
    }

    pub fn on_error(&self) {
        let _ = self.el.remove_attribute("hidden");
    }
}
