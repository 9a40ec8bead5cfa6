//! Event wiring between the page and an [`EditorSession`].
//!
//! `EditorHandle` owns the session behind `Rc<RefCell<_>>`, every DOM
//! listener, and the wake-up timer for the session's next deadline. Dropping
//! the handle detaches the listeners and cancels pending timers.
//!
//! Handlers borrow the session for one call and release it before touching
//! focus: `focus()` and `blur()` dispatch events synchronously, and the blur
//! handler needs the session again. Adding a range inside the editable also
//! moves focus, so only the blur handler restores the link range.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, KeyboardEvent};
use zenpen_core::{
    EditorConfig, EditorError, EditorSession, EventOrigin, EventOutcome, FormatKind, Key,
    Millis,
};

use crate::platform::BrowserPlatform;
use crate::storage::{LocalDocumentStore, supports_local_storage};

pub type BrowserSession = EditorSession<BrowserPlatform, LocalDocumentStore>;

/// Classes marking the toolbar's own input controls.
const URL_INPUT_CLASS: &str = "url-input";
const URL_CLASS: &str = "url";
const UI_INPUTS_CLASS: &str = "ui-inputs";

/// Delay before a mouseup is processed, so the selection has settled.
const MOUSEUP_DELAY_MS: u32 = 1;

/// Current time in the unit the session expects.
pub fn now() -> Millis {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Classify an event by its target.
///
/// Events from the link input, the link control or anything inside the
/// toolbar's input group only refresh the control states.
pub fn event_origin(event: &Event) -> EventOrigin {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return EventOrigin::Document;
    };

    let in_inputs = target
        .parent_element()
        .is_some_and(|parent| parent.class_list().contains(UI_INPUTS_CLASS));

    if target.class_name() == URL_INPUT_CLASS || target.class_list().contains(URL_CLASS) || in_inputs
    {
        EventOrigin::ToolbarInput
    } else {
        EventOrigin::Document
    }
}

struct Inner {
    session: RefCell<BrowserSession>,
    url_input: HtmlInputElement,
    listeners: RefCell<Vec<EventListener>>,
    tick_timer: RefCell<Option<Timeout>>,
    mouseup_timer: RefCell<Option<Timeout>>,
}

impl Inner {
    /// Run `f` against the session, then apply its outcome and reschedule.
    fn dispatch(self: &Rc<Self>, f: impl FnOnce(&mut BrowserSession) -> EventOutcome) -> EventOutcome {
        let outcome = f(&mut self.session.borrow_mut());
        self.apply(outcome);
        self.reschedule();
        outcome
    }

    fn apply(&self, outcome: EventOutcome) {
        if outcome.focus_link_input {
            let _ = self.url_input.focus();
        }
        if outcome.blur_link_input {
            let _ = self.url_input.blur();
        }
    }

    /// Arm a single timeout for the session's earliest deadline.
    fn reschedule(self: &Rc<Self>) {
        let deadline = self.session.borrow().next_deadline();

        let timer = deadline.map(|deadline| {
            let delay = (deadline - now()).max(0.0).ceil() as u32;
            let weak = Rc::downgrade(self);
            Timeout::new(delay, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.dispatch(|session| session.tick(now()));
                }
            })
        });

        // Replacing the slot cancels any earlier wake-up.
        *self.tick_timer.borrow_mut() = timer;
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        handler: impl Fn(&Rc<Inner>, &Event) + 'static,
    ) {
        let weak: Weak<Inner> = Rc::downgrade(self);
        let listener = EventListener::new(target, event_type, move |event| {
            if let Some(inner) = weak.upgrade() {
                handler(&inner, event);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn listen_preventable(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        handler: impl Fn(&Rc<Inner>, &Event) + 'static,
    ) {
        let weak: Weak<Inner> = Rc::downgrade(self);
        let listener = EventListener::new_with_options(
            target,
            event_type,
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(inner) = weak.upgrade() {
                    handler(&inner, event);
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
    }
}

/// A mounted editor.
pub struct EditorHandle {
    inner: Rc<Inner>,
}

impl EditorHandle {
    /// Bind the page, load content and install every listener.
    pub fn mount(config: EditorConfig) -> Result<Self, EditorError> {
        let platform = BrowserPlatform::bind(&config.selectors)?;
        let store = supports_local_storage().then(LocalDocumentStore::new);

        let mut session = EditorSession::new(platform, store, config);
        session.init();

        let url_input = session.platform().url_input().clone();
        let inner = Rc::new(Inner {
            session: RefCell::new(session),
            url_input,
            listeners: RefCell::new(Vec::new()),
            tick_timer: RefCell::new(None),
            mouseup_timer: RefCell::new(None),
        });

        install_listeners(&inner);
        tracing::info!(target: "zenpen::events", "editor mounted");

        Ok(Self { inner })
    }

    pub fn save_state(&self) -> Result<(), EditorError> {
        let result = self.inner.session.borrow_mut().save_state(now());
        self.inner.reschedule();
        result
    }

    pub fn word_count(&self) -> usize {
        self.inner.session.borrow().word_count()
    }

    pub fn toggle_typewriter_mode(&self) -> bool {
        self.inner.session.borrow_mut().toggle_typewriter()
    }

    pub fn toggle_focus_mode(&self) -> bool {
        self.inner.session.borrow_mut().toggle_focus()
    }

    /// Run a toolbar action against the current selection.
    pub fn apply_format(&self, kind: FormatKind) {
        self.inner.dispatch(|session| {
            session.apply_format(kind, now());
            EventOutcome::default()
        });
    }

    /// Run `f` with shared access to the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&BrowserSession) -> R) -> R {
        f(&self.inner.session.borrow())
    }

    /// Detach listeners and cancel timers. Equivalent to dropping the handle.
    pub fn destroy(self) {}
}

impl Drop for EditorHandle {
    fn drop(&mut self) {
        self.inner.listeners.borrow_mut().clear();
        self.inner.tick_timer.borrow_mut().take();
        self.inner.mouseup_timer.borrow_mut().take();
        if let Ok(mut session) = self.inner.session.try_borrow_mut() {
            session.clear_timers();
        }
        tracing::debug!(target: "zenpen::events", "editor detached");
    }
}

fn install_listeners(inner: &Rc<Inner>) {
    let (window, document, body, bold, italic, quote, url) = {
        let session = inner.session.borrow();
        let platform = session.platform();
        (
            platform.window().clone(),
            platform.document().clone(),
            platform.document().body(),
            platform.bold_button().clone(),
            platform.italic_button().clone(),
            platform.quote_button().clone(),
            platform.url_button().clone(),
        )
    };
    let url_input = inner.url_input.clone();

    inner.listen(&document, "keyup", |inner, event| {
        let origin = event_origin(event);
        inner.dispatch(|session| {
            session.on_key_up(origin, now());
            EventOutcome::default()
        });
    });

    inner.listen(&document, "mousedown", |inner, event| {
        let origin = event_origin(event);
        inner.dispatch(|session| {
            session.on_mouse_down(origin, now());
            EventOutcome::default()
        });
    });

    inner.listen(&document, "mouseup", |inner, event| {
        let origin = event_origin(event);
        let weak = Rc::downgrade(inner);
        let timer = Timeout::new(MOUSEUP_DELAY_MS, move || {
            if let Some(inner) = weak.upgrade() {
                inner.dispatch(|session| {
                    session.on_mouse_up(origin, now());
                    EventOutcome::default()
                });
            }
        });
        *inner.mouseup_timer.borrow_mut() = Some(timer);
    });

    inner.listen(&window, "resize", |inner, _| {
        inner.session.borrow_mut().on_resize();
    });

    if let Some(body) = body {
        inner.listen(&body, "scroll", |inner, _| {
            inner.session.borrow_mut().on_scroll();
        });
    }

    inner.listen(&document, "compositionstart", |inner, _| {
        inner.session.borrow_mut().on_composition_start();
    });

    inner.listen(&document, "compositionend", |inner, _| {
        inner.session.borrow_mut().on_composition_end();
    });

    inner.listen(&bold, "click", |inner, _| {
        inner.session.borrow_mut().on_bold_click();
    });

    inner.listen(&italic, "click", |inner, _| {
        inner.session.borrow_mut().on_italic_click();
    });

    inner.listen(&quote, "click", |inner, _| {
        inner.session.borrow_mut().on_quote_click();
    });

    inner.listen(&url, "mousedown", |inner, _| {
        inner.dispatch(|session| {
            session.on_link_click(now());
            EventOutcome::default()
        });
    });

    inner.listen(&url_input, "blur", |inner, _| {
        inner.dispatch(|session| {
            session.on_link_input_blur();
            EventOutcome::default()
        });
    });

    inner.listen_preventable(&url_input, "keydown", |inner, event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_dom(&event.key());
        let outcome = inner.dispatch(|session| session.on_link_input_key(&key));
        if outcome.prevent_default {
            event.prevent_default();
        }
    });
}
