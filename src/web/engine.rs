use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::Scope;
use crate::controller::ControllerEvent;
use crate::error::LottieError;
use crate::player::{
    HandleId, PlayMode, PlaybackEngine, PlaybackHandle, PlayerConfig,
};

/// Global constructor of the dotLottie web player.
const PLAYER_GLOBAL: &str = "DotLottie";

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// [`PlaybackEngine`] over the page's `DotLottie` global.
pub struct DotLottieEngine {
    window: Window,
    scope: Rc<Scope>,
}

impl DotLottieEngine {
    pub(crate) fn new(window: Window, scope: Rc<Scope>) -> Self {
        Self { window, scope }
    }

    fn constructor(&self) -> Result<Function, LottieError> {
        Reflect::get(&self.window, &JsValue::from_str(PLAYER_GLOBAL))
            .ok()
            .and_then(|c| c.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                LottieError::Engine(format!("{PLAYER_GLOBAL} is not loaded"))
            })
    }

    fn player_options(
        &self,
        config: &PlayerConfig,
    ) -> Result<Object, LottieError> {
        let canvas = self.scope.canvas.borrow().clone().ok_or_else(|| {
            LottieError::Engine("no canvas to render into".to_owned())
        })?;
        let options = Object::new();
        set(&options, "canvas", &canvas);
        if let Some(src) = &config.src {
            set(&options, "src", &JsValue::from_str(src));
        }
        set(&options, "autoplay", &JsValue::from_bool(config.autoplay));
        set(&options, "loop", &JsValue::from_bool(config.loop_playback));
        set(&options, "mode", &JsValue::from_str(config.mode.as_str()));
        if let Some(layout) = config.layout {
            let value = Object::new();
            set(&value, "fit", &JsValue::from_str(layout.fit.as_str()));
            let align = Array::of2(
                &JsValue::from_f64(f64::from(layout.align[0])),
                &JsValue::from_f64(f64::from(layout.align[1])),
            );
            set(&value, "align", &align);
            set(&options, "layout", &value);
        }
        Ok(options)
    }
}

impl PlaybackEngine for DotLottieEngine {
    fn create(
        &mut self,
        id: HandleId,
        config: &PlayerConfig,
    ) -> Result<Box<dyn PlaybackHandle>, LottieError> {
        let constructor = self.constructor()?;
        let options = self.player_options(config)?;
        let player = Reflect::construct(&constructor, &Array::of1(&options))
            .map_err(|e| LottieError::Engine(js_message(&e)))?;

        let postbox = self.scope.postbox.clone();
        let on_load = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            postbox.post(ControllerEvent::Loaded { handle: id });
        });
        let handle = DotLottieHandle {
            id,
            player,
            on_load: Some(on_load),
            scope: Rc::clone(&self.scope),
        };
        if let Some(on_load) = &handle.on_load {
            handle.call(
                "addEventListener",
                &[JsValue::from_str("load"), on_load.as_ref().clone()],
            );
        }
        let _ = self
            .scope
            .players
            .borrow_mut()
            .insert(id, handle.player.clone());
        Ok(Box::new(handle))
    }
}

struct DotLottieHandle {
    id: HandleId,
    player: JsValue,
    on_load: Option<Closure<dyn FnMut(JsValue)>>,
    scope: Rc<Scope>,
}

impl DotLottieHandle {
    fn call(&self, method: &str, args: &[JsValue]) {
        let Some(function) =
            Reflect::get(&self.player, &JsValue::from_str(method))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
        else {
            log::warn!("player {} has no method {method}", self.id);
            return;
        };
        let args: Array = args.iter().collect();
        if let Err(e) = function.apply(&self.player, &args) {
            log::warn!("player {} {method} failed: {}", self.id, js_message(&e));
        }
    }

    fn property(&self, name: &str) -> JsValue {
        Reflect::get(&self.player, &JsValue::from_str(name))
            .unwrap_or(JsValue::UNDEFINED)
    }
}

impl PlaybackHandle for DotLottieHandle {
    fn play(&mut self) {
        self.call("play", &[]);
    }

    fn pause(&mut self) {
        self.call("pause", &[]);
    }

    fn stop(&mut self) {
        self.call("stop", &[]);
    }

    fn set_frame(&mut self, frame: u32) {
        self.call("setFrame", &[JsValue::from(frame)]);
    }

    fn set_mode(&mut self, mode: PlayMode) {
        self.call("setMode", &[JsValue::from_str(mode.as_str())]);
    }

    fn load(&mut self, src: &str) {
        let config = Object::new();
        set(&config, "src", &JsValue::from_str(src));
        self.call("load", &[config.into()]);
    }

    fn freeze(&mut self) {
        self.call("freeze", &[]);
    }

    fn unfreeze(&mut self) {
        self.call("unfreeze", &[]);
    }

    fn total_frames(&self) -> u32 {
        self.property("totalFrames")
            .as_f64()
            .map_or(0, |frames| frames.max(0.0) as u32)
    }

    fn is_loaded(&self) -> bool {
        self.property("isLoaded").as_bool().unwrap_or(false)
    }

    fn destroy(&mut self) {
        if let Some(on_load) = self.on_load.take() {
            self.call(
                "removeEventListener",
                &[JsValue::from_str("load"), on_load.as_ref().clone()],
            );
        }
        self.call("destroy", &[]);
        let _ = self.scope.players.borrow_mut().remove(&self.id);
    }
}
