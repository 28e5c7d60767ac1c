use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Event, HtmlCanvasElement, HtmlImageElement,
    Window,
};
use web_time::Duration;

use super::Scope;
use crate::controller::ControllerEvent;
use crate::host::{
    CanvasSpec, ElementHost, Interaction, ReadyDetail, READY_EVENT,
};
use crate::player::HandleId;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
/// Property the live player is exposed under, on both canvas and element.
const HANDLE_PROPERTY: &str = "dotLottie";

type Listener = Closure<dyn FnMut(Event)>;

/// [`ElementHost`] over one block element and its anchor image.
pub struct WebHost {
    window: Window,
    scope: Rc<Scope>,
    image: Option<HtmlImageElement>,
    listeners: FxHashMap<HandleId, Vec<(Interaction, Listener)>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl WebHost {
    pub(crate) fn new(window: Window, scope: Rc<Scope>) -> Self {
        let image = scope
            .element
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlImageElement>().ok());

        let postbox = scope.postbox.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            postbox.post(ControllerEvent::Resize);
        });
        if let Err(e) = window.add_event_listener_with_callback(
            "resize",
            on_resize.as_ref().unchecked_ref(),
        ) {
            log::warn!("resize listener not installed: {e:?}");
        }

        Self {
            window,
            scope,
            image,
            listeners: FxHashMap::default(),
            on_resize: Some(on_resize),
        }
    }

    fn canvas(&self) -> Option<HtmlCanvasElement> {
        self.scope.canvas.borrow().clone()
    }

    fn expose_on(&self, target: &JsValue, value: &JsValue) {
        if let Err(e) = js_sys::Reflect::set(
            target,
            &JsValue::from_str(HANDLE_PROPERTY),
            value,
        ) {
            log::warn!("could not expose player: {e:?}");
        }
    }
}

fn style(canvas: &HtmlCanvasElement, property: &str, value: &str) {
    if let Err(e) = canvas.style().set_property(property, value) {
        log::warn!("canvas {property} not set: {e:?}");
    }
}

impl ElementHost for WebHost {
    fn viewport_width(&self) -> u32 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| JsValue::as_f64(&w))
            .map_or(0, |w| w.max(0.0) as u32)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| web_sys::MediaQueryList::matches(&query))
    }

    fn has_image(&self) -> bool {
        self.image.is_some()
    }

    fn image_size(&self) -> Option<(u32, u32)> {
        let image = self.image.as_ref()?;
        let (w, h) = (image.natural_width(), image.natural_height());
        (w > 0 && h > 0).then_some((w, h))
    }

    fn insert_canvas(&mut self, spec: &CanvasSpec) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        let Some(canvas) = self
            .window
            .document()
            .and_then(|d| d.create_element("canvas").ok())
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("could not create canvas");
            return;
        };

        canvas.set_class_name(&image.class_name());
        if let Some(id) = &spec.id {
            canvas.set_id(id);
        }
        let width = image.width();
        let height = image.height();
        style(&canvas, "width", &if width > 0 {
            format!("{width}px")
        } else {
            "100%".to_owned()
        });
        style(&canvas, "height", &if height > 0 {
            format!("{height}px")
        } else {
            "auto".to_owned()
        });
        if let Some((w, h)) = spec.aspect_ratio {
            style(&canvas, "aspect-ratio", &format!("{w} / {h}"));
        }

        // Inside the image's parent so a wrapping link stays clickable.
        let parent = image
            .parent_element()
            .unwrap_or_else(|| self.scope.element.clone().into());
        if let Err(e) = parent.append_child(&canvas) {
            log::warn!("could not insert canvas: {e:?}");
            return;
        }
        *self.scope.canvas.borrow_mut() = Some(canvas);
    }

    fn set_aspect_ratio(&mut self, ratio: (u32, u32)) {
        if let Some(canvas) = self.canvas() {
            let (w, h) = ratio;
            style(&canvas, "aspect-ratio", &format!("{w} / {h}"));
        }
    }

    fn remove_canvas(&mut self) {
        if let Some(canvas) = self.scope.canvas.borrow_mut().take() {
            canvas.remove();
        }
    }

    fn add_class(&mut self, class: &str) {
        if let Err(e) = self.scope.element.class_list().add_1(class) {
            log::warn!("could not add class {class}: {e:?}");
        }
    }

    fn remove_class(&mut self, class: &str) {
        if let Err(e) = self.scope.element.class_list().remove_1(class) {
            log::warn!("could not remove class {class}: {e:?}");
        }
    }

    fn bind(&mut self, handle: HandleId, interactions: &[Interaction]) {
        let Some(canvas) = self.canvas() else {
            return;
        };
        let mut bound = Vec::with_capacity(interactions.len());
        for &interaction in interactions {
            let postbox = self.scope.postbox.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                postbox.post(ControllerEvent::Interaction {
                    handle,
                    interaction,
                });
            });
            match canvas.add_event_listener_with_callback(
                interaction.event_name(),
                listener.as_ref().unchecked_ref(),
            ) {
                Ok(()) => bound.push((interaction, listener)),
                Err(e) => log::warn!(
                    "{} listener not installed: {e:?}",
                    interaction.event_name()
                ),
            }
        }
        if let Some(stale) = self.listeners.insert(handle, bound) {
            log::debug!("replaced {} listener(s) for {handle}", stale.len());
        }
    }

    fn unbind(&mut self, handle: HandleId) {
        let Some(bound) = self.listeners.remove(&handle) else {
            return;
        };
        let Some(canvas) = self.canvas() else {
            return;
        };
        for (interaction, listener) in &bound {
            if let Err(e) = canvas.remove_event_listener_with_callback(
                interaction.event_name(),
                listener.as_ref().unchecked_ref(),
            ) {
                log::warn!("listener for {handle} not removed: {e:?}");
            }
        }
    }

    fn expose_handle(&mut self, handle: Option<HandleId>) {
        let value = handle
            .and_then(|id| self.scope.player(id))
            .unwrap_or(JsValue::UNDEFINED);
        if let Some(canvas) = self.canvas() {
            self.expose_on(canvas.as_ref(), &value);
        }
        self.expose_on(self.scope.element.as_ref(), &value);
    }

    fn dispatch_ready(&mut self, detail: &ReadyDetail) {
        let payload = js_sys::Object::new();
        let player = self
            .scope
            .player(detail.handle)
            .unwrap_or(JsValue::UNDEFINED);
        for (key, value) in [
            ("id", JsValue::from_str(&detail.id)),
            ("src", JsValue::from_str(&detail.src)),
            ("handle", player),
        ] {
            let _ =
                js_sys::Reflect::set(&payload, &JsValue::from_str(key), &value);
        }

        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&payload);
        match CustomEvent::new_with_event_init_dict(READY_EVENT, &init) {
            Ok(event) => {
                if let Err(e) = self.scope.element.dispatch_event(&event) {
                    log::warn!("{READY_EVENT} not dispatched: {e:?}");
                }
            }
            Err(e) => log::warn!("{READY_EVENT} not created: {e:?}"),
        }
    }

    fn request_animation_frame(&mut self) {
        let postbox = self.scope.postbox.clone();
        let callback = Closure::once_into_js(move || {
            postbox.post(ControllerEvent::AnimationFrame);
        });
        if let Err(e) =
            self.window.request_animation_frame(callback.unchecked_ref())
        {
            log::warn!("animation frame not requested: {e:?}");
        }
    }

    fn schedule_scroll_poll(&mut self, delay: Duration) {
        let postbox = self.scope.postbox.clone();
        let callback = Closure::once_into_js(move || {
            postbox.post(ControllerEvent::ScrollLibraryPoll);
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
        {
            log::warn!("scroll poll not scheduled: {e:?}");
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self.window.remove_event_listener_with_callback(
                "resize",
                on_resize.as_ref().unchecked_ref(),
            );
        }
    }
}
