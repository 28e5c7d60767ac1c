use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::Scope;
use crate::controller::ControllerEvent;
use crate::error::LottieError;
use crate::scroll::{
    ScrollBinding, ScrollBindingId, ScrollLibrary, ScrollMode, ScrollSignal,
};

/// Global the scroll library registers itself under.
const LIBRARY_GLOBAL: &str = "ScrollTrigger";

struct Instance {
    trigger: JsValue,
    _callback: Closure<dyn FnMut(JsValue)>,
}

/// [`ScrollLibrary`] over the page's `ScrollTrigger` global.
pub struct ScrollTriggerLibrary {
    window: Window,
    scope: Rc<Scope>,
    instances: FxHashMap<ScrollBindingId, Instance>,
    next_id: u64,
}

impl ScrollTriggerLibrary {
    pub(crate) fn new(window: Window, scope: Rc<Scope>) -> Self {
        Self {
            window,
            scope,
            instances: FxHashMap::default(),
            next_id: 0,
        }
    }

    fn library(&self) -> Option<JsValue> {
        Reflect::get(&self.window, &JsValue::from_str(LIBRARY_GLOBAL))
            .ok()
            .filter(|lib| !lib.is_undefined() && !lib.is_null())
    }
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

impl ScrollLibrary for ScrollTriggerLibrary {
    fn is_available(&self) -> bool {
        self.library().is_some()
    }

    fn create(
        &mut self,
        binding: &ScrollBinding,
    ) -> Result<ScrollBindingId, LottieError> {
        let library = self.library().ok_or_else(|| {
            LottieError::ScrollBinding(format!("{LIBRARY_GLOBAL} is not loaded"))
        })?;
        let create = method(&library, "create").ok_or_else(|| {
            LottieError::ScrollBinding(format!("{LIBRARY_GLOBAL}.create missing"))
        })?;

        let handle = binding.handle;
        let postbox = self.scope.postbox.clone();
        let vars = Object::new();
        set(&vars, "trigger", &self.scope.element);
        set(&vars, "start", &JsValue::from_str(&binding.start));
        set(&vars, "end", &JsValue::from_str(&binding.end));
        let callback = match binding.mode {
            ScrollMode::Scrub => {
                let callback = Closure::<dyn FnMut(JsValue)>::new(
                    move |instance: JsValue| {
                        let key = JsValue::from_str("progress");
                        let progress = Reflect::get(&instance, &key)
                            .ok()
                            .and_then(|p| p.as_f64())
                            .unwrap_or(0.0);
                        postbox.post(ControllerEvent::Scroll {
                            handle,
                            signal: ScrollSignal::Progress(progress),
                        });
                    },
                );
                set(&vars, "scrub", &JsValue::TRUE);
                set(&vars, "onUpdate", callback.as_ref());
                callback
            }
            ScrollMode::Once => {
                let callback =
                    Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                        postbox.post(ControllerEvent::Scroll {
                            handle,
                            signal: ScrollSignal::Enter,
                        });
                    });
                set(&vars, "once", &JsValue::TRUE);
                set(&vars, "onEnter", callback.as_ref());
                callback
            }
        };

        let trigger = create.call1(&library, &vars).map_err(|e| {
            LottieError::ScrollBinding(
                e.as_string().unwrap_or_else(|| format!("{e:?}")),
            )
        })?;
        self.next_id += 1;
        let id = ScrollBindingId(self.next_id);
        let _ = self.instances.insert(
            id,
            Instance {
                trigger,
                _callback: callback,
            },
        );
        Ok(id)
    }

    fn kill(&mut self, id: ScrollBindingId) {
        let Some(instance) = self.instances.remove(&id) else {
            return;
        };
        match method(&instance.trigger, "kill") {
            Some(kill) => {
                if let Err(e) = kill.call0(&instance.trigger) {
                    log::warn!("scroll binding not killed: {e:?}");
                }
            }
            None => log::warn!("scroll binding has no kill()"),
        }
    }
}
