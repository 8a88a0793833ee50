//! WASM entry point mounting a table into a container element.

use super::download::BrowserFileSaver;
use super::timer::TimeoutDebouncer;
use crate::app::{TableMessage, TableState};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tabula_core::{CommandExecutor, Event, Key, State, TableRow, TARGET_ATTR};
use tabula_yaml::{TableManifest, DEALS_MANIFEST};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlInputElement, KeyboardEvent};

struct Mounted {
    state: TableState,
    executor: CommandExecutor<BrowserFileSaver>,
    container: Element,
}

impl Mounted {
    fn apply(&mut self, msg: TableMessage) {
        let mut pending = vec![msg];
        while let Some(msg) = pending.pop() {
            let command = self.state.update(msg);
            pending.extend(self.executor.execute(command).into_messages());
        }
        self.render();
    }

    /// Replace the container's markup, keeping focus and caret on a
    /// focused input such as the filter.
    fn render(&self) {
        let focused = FocusedInput::capture(&self.container);
        self.container.set_inner_html(&self.state.to_html());
        if let Some(focused) = focused {
            focused.restore(&self.container);
        }
    }
}

/// An input inside the container that had focus before a re-render.
struct FocusedInput {
    target: String,
    selection: Option<(u32, u32)>,
}

impl FocusedInput {
    fn capture(container: &Element) -> Option<Self> {
        let active = container.owner_document()?.active_element()?;
        if !container.contains(Some(active.as_ref())) {
            return None;
        }
        let target = active.get_attribute(TARGET_ATTR)?;
        let input = active.dyn_ref::<HtmlInputElement>()?;
        let start = input.selection_start().ok().flatten();
        let end = input.selection_end().ok().flatten();
        Some(Self {
            target,
            selection: start.zip(end),
        })
    }

    fn restore(&self, container: &Element) {
        let selector = format!("[{TARGET_ATTR}=\"{}\"]", self.target);
        let Some(input) = container
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let _ = input.focus();
        if let Some((start, end)) = self.selection {
            let _ = input.set_selection_range(start, end);
        }
    }
}

/// A table mounted in the page.
#[wasm_bindgen]
pub struct TableApp {
    mounted: Rc<RefCell<Mounted>>,
    filter: Rc<RefCell<TimeoutDebouncer<String>>>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

#[wasm_bindgen]
impl TableApp {
    /// Mount a table into the element with id `container_id`.
    ///
    /// `rows_json` is a JSON array of row objects. Without a manifest the
    /// example deals manifest is used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        rows_json: &str,
        manifest_yaml: Option<String>,
    ) -> Result<TableApp, JsValue> {
        console_error_panic_hook::set_once();

        let container = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?
            .get_element_by_id(container_id)
            .ok_or_else(|| format!("Container '{container_id}' not found"))?;

        let manifest = TableManifest::load(manifest_yaml.as_deref().unwrap_or(DEALS_MANIFEST))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let model = manifest
            .build_model()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let rows = parse_rows(rows_json)?;

        let mounted = Rc::new(RefCell::new(Mounted {
            state: TableState::new(Arc::new(model), rows),
            executor: CommandExecutor::new(BrowserFileSaver::new()),
            container,
        }));

        let target = Rc::clone(&mounted);
        let delay = u32::try_from(manifest.filter_debounce_ms).unwrap_or(u32::MAX);
        let filter = TimeoutDebouncer::new(delay, move |text: String| {
            target.borrow_mut().apply(TableMessage::FilterChanged(text));
        });

        let mut app = Self {
            mounted,
            filter: Rc::new(RefCell::new(filter)),
            listeners: Vec::new(),
        };
        app.attach()?;
        app.render();
        Ok(app)
    }

    /// Re-render into the container.
    pub fn render(&self) {
        self.mounted.borrow().render();
    }

    /// Current view as HTML.
    pub fn html(&self) -> String {
        self.mounted.borrow().state.to_html()
    }

    /// Replace the rows with a JSON array of row objects.
    pub fn set_rows(&self, rows_json: &str) -> Result<(), JsValue> {
        let rows = parse_rows(rows_json)?;
        self.mounted.borrow_mut().apply(TableMessage::SetRows(rows));
        Ok(())
    }

    /// Export the displayed rows as `data.csv`.
    pub fn export_csv(&self) -> Result<(), JsValue> {
        let mut mounted = self.mounted.borrow_mut();
        mounted.apply(TableMessage::ExportCsv);
        match mounted.state.last_export_error() {
            Some(e) => Err(JsValue::from_str(&e.to_string())),
            None => Ok(()),
        }
    }

    fn attach(&mut self) -> Result<(), JsValue> {
        let container = self.mounted.borrow().container.clone();

        let mounted = Rc::clone(&self.mounted);
        self.listen(&container, "click", move |e| {
            let Some(element) = targeted_element(&e) else {
                return;
            };
            // Targeted anchors are controls, not links.
            if element.tag_name().eq_ignore_ascii_case("a") {
                e.prevent_default();
            }
            if let Some(target) = element.get_attribute(TARGET_ATTR) {
                dispatch(&mounted, &Event::click(target));
            }
        })?;

        let mounted = Rc::clone(&self.mounted);
        self.listen(&container, "keydown", move |e| {
            let (Some(target), Some(kb)) = (event_target(&e), e.dyn_ref::<KeyboardEvent>()) else {
                return;
            };
            let key = match kb.key().as_str() {
                "Enter" => Key::Enter,
                " " => Key::Space,
                "Escape" => Key::Escape,
                "Tab" => Key::Tab,
                _ => Key::Other,
            };
            dispatch(&mounted, &Event::KeyDown { target, key });
        })?;

        let mounted = Rc::clone(&self.mounted);
        let filter = Rc::clone(&self.filter);
        self.listen(&container, "input", move |e| {
            let Some(target) = event_target(&e) else {
                return;
            };
            let Some(value) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
            else {
                return;
            };
            let msg = mounted
                .borrow()
                .state
                .message_for(&Event::Input { target, value });
            match msg {
                Some(TableMessage::FilterChanged(text)) => {
                    if let Err(err) = filter.borrow_mut().call(text) {
                        web_sys::console::error_1(&err);
                    }
                }
                Some(other) => mounted.borrow_mut().apply(other),
                None => {}
            }
        })?;

        Ok(())
    }

    fn listen(
        &mut self,
        container: &Element,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        container.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push((event, closure));
        Ok(())
    }
}

impl Drop for TableApp {
    fn drop(&mut self) {
        let container = self.mounted.borrow().container.clone();
        for (event, closure) in &self.listeners {
            let _ = container
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

fn dispatch(mounted: &Rc<RefCell<Mounted>>, event: &Event) {
    let msg = mounted.borrow().state.message_for(event);
    if let Some(msg) = msg {
        mounted.borrow_mut().apply(msg);
    }
}

/// Nearest ancestor of the event's element carrying a `data-target`.
fn targeted_element(event: &web_sys::Event) -> Option<Element> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    element.closest(&format!("[{TARGET_ATTR}]")).ok()?
}

fn event_target(event: &web_sys::Event) -> Option<String> {
    targeted_element(event)?.get_attribute(TARGET_ATTR)
}

fn parse_rows(json: &str) -> Result<Vec<TableRow>, JsValue> {
    crate::rows_from_json(json).map_err(|e| JsValue::from_str(&format!("Invalid rows: {e}")))
}
