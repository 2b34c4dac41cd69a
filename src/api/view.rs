//! Score container event wiring
//!
//! `ScoreView` acquires the pointer listeners on the rendered score's
//! container and guarantees their release on `detach` (and on drop), so
//! re-renders never leak handlers. Handlers take per-event DOM snapshots,
//! run the pure mapping core, apply the visual marks, and hand tooltip
//! state to the host through a callback.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use super::audio;
use crate::models::{NodeSnapshot, Point, Rect};
use crate::player::{self, PLAYING_MARK_MS};
use crate::tooltip::TooltipCoordinator;
use crate::{wasm_info, wasm_log, wasm_warn};

/// CSS class for hover highlight marks
const HIGHLIGHT_CLASS: &str = "highlighted";

/// CSS class for the transient "now playing" mark
const PLAYING_CLASS: &str = "playing";

/// Selector for the renderer's staff-tagged groups
const STAFF_SELECTOR: &str = "[class*=\"staff\"], [class*=\"vf-staff\"]";

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

/// Interactive view over the rendered score container
///
/// The tooltip callback receives the serialized tooltip state on hover and
/// `null` on unhover.
#[wasm_bindgen]
pub struct ScoreView {
    container: Element,
    tooltip_callback: js_sys::Function,
    tooltip: Rc<RefCell<TooltipCoordinator>>,
    on_over: Option<MouseHandler>,
    on_out: Option<MouseHandler>,
    on_click: Option<MouseHandler>,
}

#[wasm_bindgen]
impl ScoreView {
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, tooltip_callback: js_sys::Function) -> ScoreView {
        ScoreView {
            container,
            tooltip_callback,
            tooltip: Rc::new(RefCell::new(TooltipCoordinator::new())),
            on_over: None,
            on_out: None,
            on_click: None,
        }
    }

    /// Subscribe the pointer listeners; call after the score has rendered
    ///
    /// Idempotent: a second call on an attached view does nothing.
    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.on_click.is_some() {
            return Ok(());
        }

        let container = self.container.clone();
        let callback = self.tooltip_callback.clone();
        let tooltip = Rc::clone(&self.tooltip);
        let over = Closure::wrap(Box::new(move |event: MouseEvent| {
            handle_mouse_over(&container, &callback, &tooltip, &event);
        }) as Box<dyn FnMut(MouseEvent)>);
        self.container
            .add_event_listener_with_callback("mouseover", over.as_ref().unchecked_ref())?;
        self.on_over = Some(over);

        let container = self.container.clone();
        let callback = self.tooltip_callback.clone();
        let tooltip = Rc::clone(&self.tooltip);
        let out = Closure::wrap(Box::new(move |_event: MouseEvent| {
            handle_mouse_out(&container, &callback, &tooltip);
        }) as Box<dyn FnMut(MouseEvent)>);
        self.container
            .add_event_listener_with_callback("mouseout", out.as_ref().unchecked_ref())?;
        self.on_out = Some(out);

        let container = self.container.clone();
        let click = Closure::wrap(Box::new(move |event: MouseEvent| {
            handle_click(&container, &event);
        }) as Box<dyn FnMut(MouseEvent)>);
        self.container
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        self.on_click = Some(click);

        wasm_info!("score interactions attached");
        Ok(())
    }

    /// Unsubscribe every listener; safe to call repeatedly
    pub fn detach(&mut self) {
        if let Some(handler) = self.on_over.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("mouseover", handler.as_ref().unchecked_ref());
        }
        if let Some(handler) = self.on_out.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("mouseout", handler.as_ref().unchecked_ref());
        }
        if let Some(handler) = self.on_click.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ScoreView {
    fn drop(&mut self) {
        self.detach();
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

fn handle_mouse_over(
    container: &Element,
    callback: &js_sys::Function,
    tooltip: &Rc<RefCell<TooltipCoordinator>>,
    event: &MouseEvent,
) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    let origin = container_origin(container);
    let node = snapshot_element(&target, container, origin, 0);

    // The coordinator borrow must end before the callback runs: the host is
    // free to dispatch another pointer event from inside it
    let entered = tooltip.borrow_mut().pointer_enter(&node);

    match entered {
        Some(state) => {
            wasm_log!("hover tooltip: {}", state.classification.key());
            match super::helpers::serialize(&state, "Failed to serialize tooltip state") {
                Ok(js) => {
                    let _ = callback.call1(&JsValue::NULL, &js);
                }
                Err(_) => return,
            }
            let _ = target.class_list().add_1(HIGHLIGHT_CLASS);
        }
        None => {
            let _ = callback.call1(&JsValue::NULL, &JsValue::NULL);
            sweep_class(container, HIGHLIGHT_CLASS);
        }
    }
}

fn handle_mouse_out(
    container: &Element,
    callback: &js_sys::Function,
    tooltip: &Rc<RefCell<TooltipCoordinator>>,
) {
    tooltip.borrow_mut().pointer_leave();
    let _ = callback.call1(&JsValue::NULL, &JsValue::NULL);
    // Unconditional sweep: missed leave events on fast pointer movement
    // may have left marks on other nodes
    sweep_class(container, HIGHLIGHT_CLASS);
}

fn handle_click(container: &Element, event: &MouseEvent) {
    let origin = container_origin(container);
    let pointer = Point::new(
        event.client_x() as f64 - origin.x,
        event.client_y() as f64 - origin.y,
    );

    let (elements, snapshots) = collect_note_candidates(container, origin);
    let Some(action) = player::resolve_click(pointer, &snapshots) else {
        wasm_log!("no note near click at ({:.1}, {:.1})", pointer.x, pointer.y);
        return;
    };

    if let Some(element) = elements.get(action.node_id) {
        mark_playing(element, container);
    }

    audio::play_descriptor(&action.descriptor);
}

/// Apply the transient "playing" mark and schedule its removal
///
/// The mark comes off after the fixed delay whether or not playback
/// succeeds.
pub fn mark_playing(element: &Element, container: &Element) {
    let _ = element.class_list().add_1(PLAYING_CLASS);
    schedule_playing_sweep(container);
}

// ============================================================================
// DOM Snapshotting
// ============================================================================

/// Container top-left in client coordinates; the shared origin for all
/// pointer and rectangle normalization
fn container_origin(container: &Element) -> Point {
    let rect = container.get_bounding_client_rect();
    Point::new(rect.left(), rect.top())
}

fn class_tags(element: &Element) -> Vec<String> {
    element
        .get_attribute("class")
        .map(|attr| attr.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

fn client_rect(element: &Element, origin: Point) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(
        rect.left() - origin.x,
        rect.top() - origin.y,
        rect.width(),
        rect.height(),
    )
}

/// Take a per-event snapshot of one rendered element
///
/// Reads geometry, class tags up the ancestor chain (stopping at the
/// container), renderer hints, and the nearest staff rectangle. The DOM is
/// only read, never retained.
fn snapshot_element(element: &Element, container: &Element, origin: Point, id: usize) -> NodeSnapshot {
    let mut node = NodeSnapshot::bare(id, client_rect(element, origin), class_tags(element));

    let mut parent = element.parent_element();
    while let Some(ancestor) = parent {
        if &ancestor == container {
            break;
        }
        node.ancestor_classes.extend(class_tags(&ancestor));
        parent = ancestor.parent_element();
    }

    node.duration_hint = element.get_attribute("data-duration");
    node.clef_hint = element.get_attribute("data-clef");
    node.time_hint = element.get_attribute("data-time");

    if let Ok(Some(staff)) = element.closest(STAFF_SELECTOR) {
        node.staff_rect = Some(client_rect(&staff, origin));
    }

    node
}

/// Snapshot the container's `path` elements, the note-candidate universe
fn collect_note_candidates(container: &Element, origin: Point) -> (Vec<Element>, Vec<NodeSnapshot>) {
    let paths = container.get_elements_by_tag_name("path");
    let mut elements = Vec::with_capacity(paths.length() as usize);
    let mut snapshots = Vec::with_capacity(paths.length() as usize);

    for i in 0..paths.length() {
        if let Some(element) = paths.item(i) {
            let snapshot = snapshot_element(&element, container, origin, elements.len());
            elements.push(element);
            snapshots.push(snapshot);
        }
    }

    (elements, snapshots)
}

// ============================================================================
// Visual Marks
// ============================================================================

/// Remove a mark class from every element currently carrying it
fn sweep_class(container: &Element, class: &str) {
    let Ok(marked) = container.query_selector_all(&format!(".{}", class)) else {
        return;
    };
    for i in 0..marked.length() {
        if let Some(element) = marked.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = element.class_list().remove_1(class);
        }
    }
}

/// Schedule the unconditional "playing" sweep after the feedback delay
fn schedule_playing_sweep(container: &Element) {
    let Some(window) = web_sys::window() else {
        wasm_warn!("no window object, skipping playing-mark timeout");
        return;
    };

    let container = container.clone();
    let sweep = Closure::once_into_js(move || {
        sweep_class(&container, PLAYING_CLASS);
    });

    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            sweep.unchecked_ref(),
            PLAYING_MARK_MS,
        )
        .is_err()
    {
        wasm_warn!("failed to schedule playing-mark removal");
    }
}
