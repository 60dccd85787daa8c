use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use js_sys::Promise;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use shared::draw::draw_prize;
use shared::notice::Notice;
use shared::{LuckyDraw, WinStore};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{window, CustomEvent, CustomEventInit};

use crate::config::load_config;
use crate::models::{FailureView, PrizeView, SettledView, SpinView, StatsView};
use crate::storage::LocalStorageWinStore;

pub const SETTLED_EVENT: &str = "luckyDrawSettled";

type SharedDraw = Rc<RefCell<LuckyDraw<LocalStorageWinStore>>>;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(to_js_error)?;
    js_sys::JSON::parse(&json)
}

fn to_js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn dispatch_settled(view: &SettledView) {
    if let Some(window) = window() {
        let event_init = CustomEventInit::new();
        match to_js(view) {
            Ok(detail) => event_init.set_detail(&detail),
            Err(e) => log::warn!("Could not encode settled event: {:?}", e),
        }
        if let Ok(event) = CustomEvent::new_with_event_init_dict(SETTLED_EVENT, &event_init) {
            let _ = window.dispatch_event(&event);
        }
    }
}

/// Headless wheel for a host page. The page draws the wheel and the modal;
/// this object owns the draw, the spin gate and the session counters.
#[wasm_bindgen]
pub struct LuckyDrawWidget {
    draw: SharedDraw,
}

#[wasm_bindgen]
impl LuckyDrawWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LuckyDrawWidget, JsValue> {
        let config = load_config();
        let mut store = LocalStorageWinStore::new(&config.storage_key);

        // Fresh state on every page load
        if config.reset_on_load {
            if let Err(e) = store.clear() {
                log::warn!("Could not reset stored win under {}: {}", store.key(), e);
            }
        }

        let draw = LuckyDraw::new(&config, store).map_err(to_js_error)?;
        log::info!("🎡 LUCKY DRAW: wheel ready with {} prizes", draw.prizes().len());

        Ok(Self {
            draw: Rc::new(RefCell::new(draw)),
        })
    }

    pub fn prizes(&self) -> Result<JsValue, JsValue> {
        to_js(&PrizeView::list(self.draw.borrow().prizes()))
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&StatsView::from(self.draw.borrow().session()))
    }

    #[wasm_bindgen(js_name = canSpin)]
    pub fn can_spin(&self) -> bool {
        self.draw.borrow().can_spin()
    }

    pub fn rotation(&self) -> f64 {
        self.draw.borrow().rotation()
    }

    #[wasm_bindgen(js_name = lastWin)]
    pub fn last_win(&self) -> Result<JsValue, JsValue> {
        let record = self.draw.borrow().store().load().map_err(to_js_error)?;
        to_js(&record)
    }

    /// Resolves with the landing plan once the draw is in. The wheel settles
    /// `rotation.durationMs` later, announced by a `luckyDrawSettled` event.
    pub fn spin(&self) -> Promise {
        future_to_promise(run_spin(Rc::clone(&self.draw)))
    }

    /// Settles the spin in flight, for pages that run their own animation.
    /// Resolves to `null` when no spin is waiting to settle.
    pub fn settle(&self) -> Result<JsValue, JsValue> {
        let view = SettledView::settle(&mut self.draw.borrow_mut());
        match view {
            Some(view) => {
                dispatch_settled(&view);
                to_js(&view)
            }
            None => Ok(JsValue::NULL),
        }
    }

    pub fn dismiss(&self) {
        self.draw.borrow_mut().dismiss_result();
    }
}

async fn run_spin(draw: SharedDraw) -> Result<JsValue, JsValue> {
    let (prizes, delay_ms) = {
        let mut state = draw.borrow_mut();
        state.begin_spin().map_err(|e| {
            log::debug!("Spin ignored: {}", e);
            to_js_error(e)
        })?;
        (state.prizes().to_vec(), state.settings().draw_delay_ms)
    };

    let mut rng = SmallRng::from_entropy();
    let result = match draw_prize(&prizes, &mut rng, TimeoutFuture::new(delay_ms)).await {
        Ok(result) => result,
        Err(e) => {
            draw.borrow_mut().fail_spin(&e);
            let message = e.to_string();
            let failure = FailureView {
                notice: Notice::for_failure(Some(&message)),
                error: message,
            };
            return Err(to_js(&failure).unwrap_or_else(|e| e));
        }
    };

    let (plan, stats) = {
        let mut state = draw.borrow_mut();
        let plan = state
            .resolve_spin(result, &mut rng, Utc::now())
            .map_err(to_js_error)?;
        (plan, state.session())
    };

    schedule_settle(Rc::clone(&draw), plan.rotation.duration_ms);
    to_js(&SpinView::new(plan, stats))
}

fn schedule_settle(draw: SharedDraw, after_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(after_ms).await;
        let view = SettledView::settle(&mut draw.borrow_mut());
        if let Some(view) = view {
            dispatch_settled(&view);
        }
    });
}
