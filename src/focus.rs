//! Accessible focus traversal.
//!
//! Used by the composing application after route updates and when elements
//! are removed, so keyboard focus never silently vanishes.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Move focus to the main heading (or `main` itself) without leaving it in
/// the tab order.
pub fn focus_main(document: &Document) {
    let target = document
        .query_selector("main h1")
        .ok()
        .flatten()
        .or_else(|| document.query_selector("main").ok().flatten());
    let Some(target) = target.and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
        return;
    };
    let original_tab_index = target.tab_index();
    target.set_tab_index(-1);
    let _ = target.focus();
    target.set_tab_index(original_tab_index);
}

/// An element takes part in layout or has at least one client rect.
pub fn is_visible(el: &HtmlElement) -> bool {
    el.offset_width() > 0 || el.offset_height() > 0 || el.get_client_rects().length() > 0
}

/// Whether the element can receive focus, following the usual platform
/// rules: explicit tab indices win, disabled controls never qualify, and the
/// rest depends on the element kind.
pub fn is_focusable(el: &Element) -> bool {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if html.tab_index() > 0 || (html.tab_index() == 0 && el.get_attribute("tabIndex").is_some())
        {
            return true;
        }
    }
    if el.has_attribute("disabled") {
        return false;
    }

    match el.node_name().as_str() {
        "A" => {
            el.has_attribute("href") && el.get_attribute("rel").as_deref() != Some("ignore")
        }
        "INPUT" => {
            let input_type = el.get_attribute("type").unwrap_or_else(|| "text".to_string());
            input_type != "hidden" && input_type != "file"
        }
        "BUTTON" | "SELECT" | "TEXTAREA" => true,
        _ => false,
    }
}

/// Try to focus the element; true if it actually took focus.
pub fn attempt_focus(el: &Element) -> bool {
    if !is_focusable(el) {
        return false;
    }
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
    el.owner_document()
        .and_then(|doc| doc.active_element())
        .is_some_and(|active| &active == el)
}

/// Depth-first search for the first focusable descendant.
pub fn focus_first_descendant(el: &Element) -> bool {
    let children = el.child_nodes();
    for i in 0..children.length() {
        let Some(child) = children.item(i).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if attempt_focus(&child) || focus_first_descendant(&child) {
            return true;
        }
    }
    false
}

/// Depth-first search, last child first, for the last focusable descendant.
pub fn focus_last_descendant(el: &Element) -> bool {
    let children = el.child_nodes();
    for i in (0..children.length()).rev() {
        let Some(child) = children.item(i).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if attempt_focus(&child) || focus_last_descendant(&child) {
            return true;
        }
    }
    false
}

/// Focus the nearest visible sibling (following siblings first, then
/// preceding ones), falling back to the parent and finally the main heading.
pub fn focus_closest(el: &Element) {
    let mut sibling = el.next_element_sibling();
    while let Some(current) = sibling {
        if sibling_takes_focus(&current) {
            return;
        }
        sibling = current.next_element_sibling();
    }
    let mut sibling = el.previous_element_sibling();
    while let Some(current) = sibling {
        if sibling_takes_focus(&current) {
            return;
        }
        sibling = current.previous_element_sibling();
    }
    let parent_focused = el
        .parent_element()
        .map(|parent| attempt_focus(&parent))
        .unwrap_or(false);
    if !parent_focused {
        if let Some(document) = el.owner_document() {
            focus_main(&document);
        }
    }
}

fn sibling_takes_focus(el: &Element) -> bool {
    el.dyn_ref::<HtmlElement>()
        .map(is_visible)
        .unwrap_or(false)
        && attempt_focus(el)
}
