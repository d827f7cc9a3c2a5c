//! Browser host: listeners, timers, relay calls
//!
//! 负责把浏览器事件送进 `Page`，并执行 `Page` 返回的 Effect：
//!     PreventDefault  → event.preventDefault()
//!     StartTimer      → setTimeout
//!     SendForm        → spawn_local(relay.submit)

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use landing_app::{EventKind, EventSource, Page, PageEvent};
use landing_core::types::{Effect, FormSubmission, Key, KeyPress, TimerId};
use landing_relay::{FormRelay, HttpFormRelay};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, DocumentReadyState, Element, Event, EventTarget,
    KeyboardEvent, Window,
};

use crate::dom::WebDom;

struct Listener {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

/// Every listener the host registered. Dropping removes them all.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<Listener>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn add(&mut self, target: EventTarget, kind: EventKind, callback: Closure<dyn FnMut(Event)>) {
        let options = AddEventListenerOptions::new();
        options.set_passive(kind.is_passive());
        let added = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.dom_name(),
            callback.as_ref().unchecked_ref(),
            &options,
        );
        match added {
            Ok(()) => self.listeners.push(Listener {
                target,
                kind,
                callback,
            }),
            Err(e) => log::warn!("[web] Failed to listen for '{}': {e:?}", kind.dom_name()),
        }
    }

    /// Remove every listener.
    pub fn unbind(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind.dom_name(),
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        self.unbind();
    }
}

/// The page plus what it needs from the browser.
pub struct WebApp {
    page: RefCell<Page<WebDom>>,
    relay: HttpFormRelay,
    window: Window,
    document: Document,
    timers: RefCell<Vec<i32>>,
}

impl WebApp {
    pub fn new(page: Page<WebDom>, relay: HttpFormRelay) -> Rc<Self> {
        let window = page.dom().window().clone();
        let document = page.dom().document().clone();
        Rc::new(Self {
            page: RefCell::new(page),
            relay,
            window,
            document,
            timers: RefCell::new(Vec::new()),
        })
    }

    /// Run start-up effects, bind every subscription, and catch up on a
    /// `load` that fired before the module ran.
    pub fn start(self: &Rc<Self>) -> Bindings {
        let effects = self.page.borrow_mut().start();
        self.apply(effects, None);

        let bindings = self.bind();
        log::debug!("[web] {} listener(s) bound", bindings.len());

        if self.document.ready_state() == DocumentReadyState::Complete {
            self.dispatch(PageEvent::Load, None);
        }
        bindings
    }

    fn bind(self: &Rc<Self>) -> Bindings {
        let subscriptions = self.page.borrow().subscriptions();
        let mut bindings = Bindings::default();
        for sub in subscriptions {
            let target: EventTarget = match sub.source {
                EventSource::Window => self.window.clone().into(),
                EventSource::Document => self.document.clone().into(),
                EventSource::Element(element) => element.into(),
            };
            let kind = sub.kind;
            let app = Rc::clone(self);
            let callback = Closure::wrap(Box::new(move |event: Event| {
                if let Some(page_event) = translate(kind, &event) {
                    app.dispatch(page_event, Some(&event));
                }
            }) as Box<dyn FnMut(Event)>);
            bindings.add(target, kind, callback);
        }
        bindings
    }

    /// Feed one event to the page.
    ///
    /// Focus moves made while handling an event fire `focusout` synchronously;
    /// those nested events find the page borrowed and are dropped.
    fn dispatch(self: &Rc<Self>, event: PageEvent<Element>, dom_event: Option<&Event>) {
        let effects = match self.page.try_borrow_mut() {
            Ok(mut page) => page.dispatch(event),
            Err(_) => {
                log::trace!("[web] Nested {event:?} skipped");
                return;
            }
        };
        self.apply(effects, dom_event);
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>, dom_event: Option<&Event>) {
        for effect in effects {
            match effect {
                Effect::PreventDefault => {
                    if let Some(event) = dom_event {
                        event.prevent_default();
                    }
                }
                Effect::StartTimer { timer, after } => self.start_timer(timer, after),
                Effect::SendForm(submission) => self.send(submission),
            }
        }
    }

    fn start_timer(self: &Rc<Self>, timer: TimerId, after: Duration) {
        let handle = Rc::new(Cell::new(0));
        let fired = Rc::clone(&handle);
        let app = Rc::clone(self);
        let callback = Closure::once_into_js(move || {
            app.timers.borrow_mut().retain(|&h| h != fired.get());
            app.dispatch(PageEvent::Timer(timer), None);
        });

        let millis = i32::try_from(after.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(id) => {
                handle.set(id);
                self.timers.borrow_mut().push(id);
            }
            Err(e) => log::error!("[web] setTimeout failed: {e:?}"),
        }
    }

    fn send(self: &Rc<Self>, submission: FormSubmission) {
        let app = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = app.relay.submit(&submission).await;
            match app.page.try_borrow_mut() {
                Ok(mut page) => {
                    let state = page.submission_finished(&outcome);
                    log::debug!("[web] Submission finished: {state:?}");
                }
                Err(_) => log::error!("[web] Page busy, relay answer dropped"),
            }
        });
    }

    /// Cancel every pending timer.
    pub fn clear_timers(&self) {
        for id in self.timers.borrow_mut().drain(..) {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

/// Reduce a DOM event to a [`PageEvent`]. `None` when the target is not an
/// element or a `keydown` is not a `KeyboardEvent`.
fn translate(kind: EventKind, event: &Event) -> Option<PageEvent<Element>> {
    let target = || event.target().and_then(|t| t.dyn_into::<Element>().ok());
    let page_event = match kind {
        EventKind::Click => PageEvent::Click { target: target()? },
        EventKind::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            let code = Key::from_dom_key(&key.key());
            PageEvent::KeyDown(if key.shift_key() {
                KeyPress::shifted(code)
            } else {
                KeyPress::new(code)
            })
        }
        EventKind::Submit => PageEvent::Submit,
        EventKind::FocusOut => PageEvent::FocusOut { target: target()? },
        EventKind::Input => PageEvent::Input { target: target()? },
        EventKind::Scroll => PageEvent::Scroll,
        EventKind::Resize => PageEvent::Resize,
        EventKind::Load => PageEvent::Load,
    };
    Some(page_event)
}
