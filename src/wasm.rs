use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::config::ViewerConfig;
use crate::data::{DescriptorLoader, FetchSource, load_manifests};
use crate::render::{DomView, JUMP_INDEX_ATTR};
use crate::viewer::{Viewer, ViewerAction};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ViewerConfig::default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = run_app(config).await {
            log::error!("Viewer failed to start: {:?}", e);
        }
    });
}

/// Browser-side application: the viewer plus the DOM it draws into.
struct WebApp {
    viewer: RefCell<Viewer>,
    loader: DescriptorLoader<FetchSource>,
    dom: DomView,
}

async fn run_app(config: ViewerConfig) -> Result<(), JsValue> {
    log::info!("Species viewer starting...");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let dom = DomView::mount(document)?;

    let manifests = match load_manifests(&FetchSource::uncached(), &config.data_dir).await {
        Ok(manifests) => manifests,
        Err(e) => {
            log::error!("Failed to load dataset: {}", e);
            dom.show_status(&format!("Failed to load dataset: {}", e));
            return Ok(());
        }
    };

    if manifests.images.is_empty() {
        dom.show_status("No images in dataset.");
    }

    let app = Rc::new(WebApp {
        viewer: RefCell::new(Viewer::new(manifests, &config)),
        loader: DescriptorLoader::new(FetchSource::new(), config.descriptor_dir.clone()),
        dom,
    });

    wire_controls(&app)?;
    WebApp::render(&app);
    Ok(())
}

impl WebApp {
    fn dispatch(app: &Rc<Self>, action: ViewerAction) {
        app.viewer.borrow_mut().dispatch(action);
        Self::render(app);
    }

    /// Draw the current image once its descriptors are loaded, unless the
    /// viewer has moved on by then.
    fn render(app: &Rc<Self>) {
        let Some(request) = app.viewer.borrow().render_request() else {
            return;
        };

        let app = Rc::clone(app);
        wasm_bindgen_futures::spawn_local(async move {
            let descriptors = request.load_descriptors(&app.loader).await;

            let viewer = app.viewer.borrow();
            if !viewer.is_current(request.generation) {
                log::debug!("Dropping stale render for {}", request.entry.species);
                return;
            }
            if let Some(vm) = viewer.view_model(&descriptors) {
                if let Err(e) = app.dom.render(&vm) {
                    log::error!("Render failed: {:?}", e);
                }
            }
        });
    }
}

fn on_click(target: &Element, app: &Rc<WebApp>, action: ViewerAction) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        WebApp::dispatch(&app, action);
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_controls(app: &Rc<WebApp>) -> Result<(), JsValue> {
    on_click(app.dom.prev_button(), app, ViewerAction::Previous)?;
    on_click(app.dom.next_button(), app, ViewerAction::Next)?;
    on_click(app.dom.page_button(), app, ViewerAction::AdvancePage)?;
    on_click(app.dom.shuffle_button(), app, ViewerAction::Shuffle)?;

    // Jump buttons are rebuilt on every render, so listen on their container
    let strip_app = Rc::clone(app);
    let on_jump = Closure::wrap(Box::new(move |event: Event| {
        let index = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute(JUMP_INDEX_ATTR))
            .and_then(|attr| attr.parse::<usize>().ok());
        if let Some(index) = index {
            WebApp::dispatch(&strip_app, ViewerAction::Jump(index));
        }
    }) as Box<dyn FnMut(Event)>);
    app.dom
        .jump_strip()
        .add_event_listener_with_callback("click", on_jump.as_ref().unchecked_ref())?;
    on_jump.forget();

    let key_app = Rc::clone(app);
    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }
        if let Some(action) = ViewerAction::from_key(&event.key()) {
            event.prevent_default();
            WebApp::dispatch(&key_app, action);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    app.dom
        .document()
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    Ok(())
}
