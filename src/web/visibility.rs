use std::rc::Rc;

use js_sys::Array;
use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::Scope;
use crate::controller::ControllerEvent;
use crate::host::VisibilityService;
use crate::player::HandleId;

type Callback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// [`VisibilityService`] with one `IntersectionObserver` per handle.
pub struct IntersectionVisibility {
    scope: Rc<Scope>,
    observers: FxHashMap<HandleId, (IntersectionObserver, Callback)>,
}

impl IntersectionVisibility {
    pub(crate) fn new(scope: Rc<Scope>) -> Self {
        Self {
            scope,
            observers: FxHashMap::default(),
        }
    }
}

impl VisibilityService for IntersectionVisibility {
    fn observe(&mut self, handle: HandleId, thresholds: &[f64]) {
        self.unobserve(handle);

        let postbox = self.scope.postbox.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _: IntersectionObserver| {
                // Only the latest entry of a batch matters.
                let latest = entries
                    .length()
                    .checked_sub(1)
                    .map(|last| entries.get(last))
                    .and_then(|e| e.dyn_into::<IntersectionObserverEntry>().ok());
                if let Some(entry) = latest {
                    postbox.post(ControllerEvent::Visibility {
                        handle,
                        intersecting: entry.is_intersecting(),
                    });
                }
            },
        );

        let init = IntersectionObserverInit::new();
        let threshold: Array =
            thresholds.iter().map(|&t| JsValue::from_f64(t)).collect();
        init.set_threshold(&threshold);
        match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => {
                observer.observe(&self.scope.element);
                let _ = self.observers.insert(handle, (observer, callback));
            }
            Err(e) => log::warn!("visibility not tracked for {handle}: {e:?}"),
        }
    }

    fn unobserve(&mut self, handle: HandleId) {
        if let Some((observer, _callback)) = self.observers.remove(&handle) {
            observer.disconnect();
        }
    }
}
