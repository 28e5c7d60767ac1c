//! Browser bindings: DOM-backed collaborators and the page bootstrap.
//!
//! Each `[data-lottie]` element gets one [`Mailbox`] holding its
//! controller. Every DOM, engine and scroll callback posts a
//! [`ControllerEvent`] into the element's mailbox instead of touching the
//! controller directly; a callback that fires while the controller is busy
//! is queued and drained by the call already in progress.

mod engine;
mod host;
mod scroll;
mod visibility;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use engine::DotLottieEngine;
pub use host::WebHost;
pub use scroll::ScrollTriggerLibrary;
pub use visibility::IntersectionVisibility;

use crate::controller::{
    AnimationController, Collaborators, ControllerEvent, Mailbox,
};
use crate::options::ControllerOptions;
use crate::player::HandleId;

/// Attribute carrying the JSON payload.
pub const PAYLOAD_ATTRIBUTE: &str = "data-lottie";

/// Element state shared by every collaborator of one controller.
pub(crate) struct Scope {
    pub(crate) element: web_sys::HtmlElement,
    pub(crate) canvas: RefCell<Option<web_sys::HtmlCanvasElement>>,
    pub(crate) players: RefCell<FxHashMap<HandleId, JsValue>>,
    pub(crate) postbox: Postbox,
}

impl Scope {
    fn new(element: web_sys::HtmlElement, postbox: Postbox) -> Rc<Self> {
        Rc::new(Self {
            element,
            canvas: RefCell::new(None),
            players: RefCell::new(FxHashMap::default()),
            postbox,
        })
    }

    pub(crate) fn player(&self, id: HandleId) -> Option<JsValue> {
        self.players.borrow().get(&id).cloned()
    }
}

/// Sending side of a [`Mailbox`], held by callbacks.
#[derive(Clone)]
pub(crate) struct Postbox(Weak<Mailbox>);

impl Postbox {
    pub(crate) fn post(&self, event: ControllerEvent) {
        if let Some(mailbox) = self.0.upgrade() {
            mailbox.post(event);
        }
    }
}

/// Mount a controller on `element` from its payload attribute.
///
/// The mailbox is registered for [`teardown_all`] before the controller
/// mounts, so a teardown requested by a `lottie-ready` listener still
/// reaches it. `None` leaves the element untouched.
pub fn mount(
    element: web_sys::HtmlElement,
    options: ControllerOptions,
) -> Option<Rc<Mailbox>> {
    let payload = element.get_attribute(PAYLOAD_ATTRIBUTE)?;
    let window = web_sys::window()?;
    let mailbox = Mailbox::new();
    MOUNTED.with(|all| all.borrow_mut().push(Rc::clone(&mailbox)));
    let scope = Scope::new(element, Postbox(Rc::downgrade(&mailbox)));
    let collaborators = Collaborators {
        engine: Box::new(DotLottieEngine::new(
            window.clone(),
            Rc::clone(&scope),
        )),
        host: Box::new(WebHost::new(window.clone(), Rc::clone(&scope))),
        visibility: Box::new(IntersectionVisibility::new(Rc::clone(
            &scope,
        ))),
        scroll: Box::new(ScrollTriggerLibrary::new(window, scope)),
    };

    let Some(controller) =
        AnimationController::try_mount(&payload, collaborators, options)
    else {
        MOUNTED.with(|all| {
            all.borrow_mut().retain(|m| !Rc::ptr_eq(m, &mailbox));
        });
        return None;
    };
    mailbox.install(controller);
    Some(mailbox)
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

thread_local! {
    static MOUNTED: RefCell<Vec<Rc<Mailbox>>> =
        const { RefCell::new(Vec::new()) };
}

/// Mount a controller on every `[data-lottie]` element in the document.
pub fn mount_all(options: &ControllerOptions) -> usize {
    let Some(document) = document() else {
        return 0;
    };
    let Ok(nodes) =
        document.query_selector_all(&format!("[{PAYLOAD_ATTRIBUTE}]"))
    else {
        return 0;
    };

    let mut count = 0;
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            continue;
        };
        if mount(element, options.clone()).is_some() {
            count += 1;
        }
    }
    log::info!("mounted {count} lottie element(s)");
    count
}

/// Tear down every mounted controller.
#[wasm_bindgen(js_name = teardownAll)]
pub fn teardown_all() {
    let mounted = MOUNTED.with(|all| std::mem::take(&mut *all.borrow_mut()));
    for mailbox in &mounted {
        mailbox.teardown();
    }
}

/// Initialize logging and mount once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    let Some(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        let _ = mount_all(&ControllerOptions::default());
        return;
    }
    let on_ready = Closure::once_into_js(move || {
        let _ = mount_all(&ControllerOptions::default());
    });
    if let Err(e) = document.add_event_listener_with_callback(
        "DOMContentLoaded",
        on_ready.unchecked_ref(),
    ) {
        log::warn!("could not wait for DOMContentLoaded: {e:?}");
    }
}
