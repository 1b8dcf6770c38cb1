use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver};

use wisp_engine::{
    BannerSpec, Engine, GroupId, GroupSpec, Page, PageManifest, RevealKind, RootMargin, StyleOp,
    TargetDesc, TargetId, WatchGroup,
};

use crate::dom::{self, DomHost};
use crate::error::WebError;
use crate::listen;
use crate::observe;
use crate::widgets::CoresWidget;

/// Inline styling frozen into the injected progress bar. The engine owns
/// its width and transition from the first flush on.
const PROGRESS_BAR_CSS: &str = "position:fixed;top:0;left:0;height:3px;width:0%;\
background:linear-gradient(90deg, #667eea, #f093fb, #4facfe);z-index:9999;";

/// Global stylesheet injected when the user prefers reduced motion.
const REDUCED_MOTION_CSS: &str =
    "*, *::before, *::after { animation: none !important; transition: none !important; }";

/// Keyframes backing the emblem easter egg.
const EMBLEM_KEYFRAMES: &str = "@keyframes spin { from { transform: rotate(0deg); } \
to { transform: rotate(360deg); } } \
@keyframes pulse { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.1); } }";

/// One registered element: the node ops style, plus the observed node and
/// its observer when the group watches visibility.
struct Binding {
    styled: Element,
    watched: Option<(Element, IntersectionObserver)>,
}

/// Target-id keyed element lookup shared with the listeners, plus the
/// identity map observers use to resolve elements back to ids.
pub struct Bindings {
    entries: HashMap<u32, Binding>,
    ids: js_sys::Map,
}

impl Bindings {
    fn new() -> Self {
        Self { entries: HashMap::new(), ids: js_sys::Map::new() }
    }

    /// The element-to-id map handle. Clones share the same underlying map.
    fn ids(&self) -> js_sys::Map {
        self.ids.clone()
    }

    /// Bind the element ops for `id` apply to.
    pub fn bind_styled(&mut self, id: TargetId, element: Element) {
        self.entries.insert(id.0, Binding { styled: element, watched: None });
    }

    /// Bind a styled element plus the observed element the observer is
    /// already watching.
    fn bind_watched(
        &mut self,
        id: TargetId,
        styled: Element,
        observed: Element,
        observer: IntersectionObserver,
    ) {
        self.ids.set(observed.as_ref(), &JsValue::from_f64(f64::from(id.0)));
        self.entries.insert(id.0, Binding { styled, watched: Some((observed, observer)) });
    }

    fn styled(&self, id: TargetId) -> Option<&Element> {
        self.entries.get(&id.0).map(|binding| &binding.styled)
    }

    /// Stop observing `id`. The element stays bound for later ops.
    fn release(&mut self, id: TargetId) {
        if let Some(binding) = self.entries.get_mut(&id.0) {
            if let Some((observed, observer)) = binding.watched.take() {
                observer.unobserve(&observed);
                self.ids.delete(observed.as_ref());
            }
        }
    }

    /// Drop `id` entirely and detach its node from the document.
    pub fn unbind(&mut self, id: TargetId) {
        if let Some(binding) = self.entries.remove(&id.0) {
            if let Some((observed, observer)) = binding.watched {
                observer.unobserve(&observed);
                self.ids.delete(observed.as_ref());
            }
            binding.styled.remove();
        }
    }
}

/// Drives a `Page`: builds the engine from its manifest, owns the DOM
/// bindings, and pumps the frame loop.
///
/// Each concrete page creates a `thread_local!` PageRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct PageRunner<P: Page> {
    page: P,
    engine: Rc<RefCell<Engine>>,
    host: DomHost,
    bindings: Rc<RefCell<Bindings>>,
    initialized: bool,
}

impl<P: Page> PageRunner<P> {
    pub fn new(page: P) -> Result<Self, WebError> {
        let host = DomHost::new()?;
        let mut config = page.config();
        config.reduced_motion = host.reduced_motion();
        Ok(Self {
            page,
            engine: Rc::new(RefCell::new(Engine::new(config))),
            host,
            bindings: Rc::new(RefCell::new(Bindings::new())),
            initialized: false,
        })
    }

    /// Mount the page's own manifest. Call once after construction.
    pub fn init(&mut self) -> Result<(), WebError> {
        let manifest = self.page.manifest();
        self.mount(&manifest)
    }

    /// Mount a manifest supplied as JSON instead of the page's own.
    pub fn init_with_manifest(&mut self, json: &str) -> Result<(), WebError> {
        let manifest =
            PageManifest::from_json(json).map_err(|err| WebError::Manifest(err.to_string()))?;
        self.mount(&manifest)
    }

    fn mount(&mut self, manifest: &PageManifest) -> Result<(), WebError> {
        if self.engine.borrow().reduced_motion() {
            self.host.inject_style(REDUCED_MOTION_CSS)?;
        }
        if manifest.emblem.is_some() {
            self.host.inject_style(EMBLEM_KEYFRAMES)?;
        }

        for spec in &manifest.groups {
            self.mount_group(spec)?;
        }

        if let Some(spec) = &manifest.parallax {
            let group = self.add_group(WatchGroup::new(RevealKind::ParallaxBlob));
            for blob in self.host.query_all(&spec.selector)? {
                self.register_plain(group, blob, TargetDesc::new());
            }
        }

        if manifest.progress_bar {
            let bar = self.host.create_element("div")?;
            bar.set_attribute("style", PROGRESS_BAR_CSS)?;
            self.host.body()?.append_child(&bar)?;
            let group = self.add_group(WatchGroup::new(RevealKind::ProgressBar));
            self.register_plain(group, bar, TargetDesc::new());
        }

        if let Some(spec) = &manifest.hover {
            let group = self.add_group(WatchGroup::new(RevealKind::CardIcon));
            for card in self.host.query_all(&spec.card)? {
                let Some(icon) = card.query_selector(&spec.icon)? else {
                    continue;
                };
                if let Some(id) = self.register_plain(group, icon, TargetDesc::new()) {
                    listen::wire_hover(&card, id, self.engine.clone())?;
                }
            }
        }

        if let Some(spec) = &manifest.emblem {
            if let Some(element) = self.host.try_query(&spec.selector)? {
                self.engine.borrow_mut().set_emblem_clicks(spec.clicks);
                let group = self.add_group(WatchGroup::new(RevealKind::Emblem));
                if let Some(id) = self.register_plain(group, element.clone(), TargetDesc::new()) {
                    listen::wire_emblem(&element, id, self.engine.clone())?;
                }
            }
        }

        if let Some(spec) = &manifest.ripple {
            let group = self.add_group(WatchGroup::new(RevealKind::Ripple));
            listen::wire_ripples(
                &self.host,
                &spec.selector,
                group,
                self.engine.clone(),
                self.bindings.clone(),
            )?;
        }

        if manifest.body_fade {
            let group = self.add_group(WatchGroup::new(RevealKind::Body));
            let body = self.host.body()?;
            if let Some(id) = self.register_plain(group, body, TargetDesc::new()) {
                listen::wire_load(&self.host, self.engine.clone(), id)?;
            }
        }

        if let Some(nav) = &manifest.nav {
            listen::wire_anchors(&self.host, nav.anchor_offset_px)?;
            listen::wire_menu(&self.host, nav)?;
            if let Some(start) = &nav.start_button {
                listen::wire_start_button(&self.host, &start.button, &start.target)?;
            }
        }

        if let Some(spec) = &manifest.accordion {
            listen::wire_accordion(&self.host, &spec.item, &spec.question, &spec.active_class)?;
        }

        if let Some(spec) = &manifest.cores {
            let group = self.add_group(WatchGroup::new(RevealKind::CoreBox));
            // Button closures keep the widget alive for the page's life.
            CoresWidget::mount(
                &self.host,
                spec.clone(),
                group,
                self.engine.clone(),
                self.bindings.clone(),
            )?;
        }

        listen::wire_scroll(&self.host, self.engine.clone())?;

        if let Some(banner) = &manifest.banner {
            print_banner(banner);
        }

        self.page.init(&mut self.engine.borrow_mut());

        // First flush paints every hidden state before the loop starts.
        self.flush();
        self.initialized = true;
        Ok(())
    }

    /// Register one group of observed elements.
    fn mount_group(&mut self, spec: &GroupSpec) -> Result<(), WebError> {
        let kind = spec.kind;
        let mut config = kind.default_config();
        if let Some(threshold) = spec.threshold {
            config.threshold = threshold;
        }
        if let Some(raw) = spec.root_margin.as_deref() {
            match RootMargin::parse(raw) {
                Some(margin) => config.root_margin = margin,
                None => log::warn!("root margin {:?} not parseable, default kept", raw),
            }
        }

        let mut group = WatchGroup::new(kind).with_config(config);
        if let Some(step) = spec.stagger_ms {
            group = group.with_stagger_step_ms(step);
        }
        if let Some(class) = spec.reveal_class.as_deref() {
            group = group.with_reveal_class(class);
        }
        let group_id = self.add_group(group);

        let observer = if kind.observed() {
            Some(observe::group_observer(
                self.engine.clone(),
                self.bindings.borrow().ids(),
                &config,
            )?)
        } else {
            None
        };

        for element in self.host.query_all(&spec.selector)? {
            let styled = match spec.inner.as_deref() {
                Some(inner_sel) => match element.query_selector(inner_sel)? {
                    Some(inner) => inner,
                    None => {
                        log::debug!(
                            "{:?} member missing inner {:?}, skipped",
                            spec.selector,
                            inner_sel
                        );
                        continue;
                    }
                },
                None => element.clone(),
            };

            let mut desc = TargetDesc::new();
            if kind == RevealKind::StatCard {
                if let Some(text) = styled.text_content() {
                    desc = desc.with_counter_text(&text);
                }
            }
            if kind == RevealKind::SpeedBar {
                if let Some(html) = styled.dyn_ref::<web_sys::HtmlElement>() {
                    if let Ok(width) = html.style().get_property_value("width") {
                        if !width.is_empty() {
                            desc = desc.with_bar_width(&width);
                        }
                    }
                }
            }
            if let Some(start_sel) = spec.start_visible.as_deref() {
                if element.matches(start_sel)? {
                    desc = desc.visible();
                }
            }

            let Some(id) = self.engine.borrow_mut().register(group_id, desc) else {
                continue;
            };
            match &observer {
                Some(observer) => {
                    observer.observe(&element);
                    self.bindings.borrow_mut().bind_watched(
                        id,
                        styled,
                        element,
                        observer.clone(),
                    );
                }
                None => self.bindings.borrow_mut().bind_styled(id, styled),
            }
        }
        Ok(())
    }

    /// Run one frame: page hook, engine tick, op flush.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.initialized {
            return;
        }
        self.page.update(&mut self.engine.borrow_mut());
        self.engine.borrow_mut().tick(dt_ms);
        self.flush();
    }

    fn flush(&self) {
        let ops = self.engine.borrow_mut().drain_ops();
        if ops.is_empty() {
            return;
        }
        let mut bindings = self.bindings.borrow_mut();
        for op in &ops {
            match op {
                StyleOp::Release { target } => bindings.release(*target),
                StyleOp::Remove { target } => bindings.unbind(*target),
                op => {
                    if let Some(element) = bindings.styled(op.target()) {
                        dom::apply_style(element, op);
                    }
                }
            }
        }
    }

    fn add_group(&mut self, group: WatchGroup) -> GroupId {
        self.engine.borrow_mut().add_group(group)
    }

    fn register_plain(
        &mut self,
        group: GroupId,
        element: Element,
        desc: TargetDesc,
    ) -> Option<TargetId> {
        let id = self.engine.borrow_mut().register(group, desc)?;
        self.bindings.borrow_mut().bind_styled(id, element);
        Some(id)
    }

    // ---- Accessors for the wasm exports ----

    pub fn target_count(&self) -> u32 {
        self.engine.borrow().target_count() as u32
    }

    pub fn reduced_motion(&self) -> bool {
        self.engine.borrow().reduced_motion()
    }
}

fn print_banner(banner: &BannerSpec) {
    web_sys::console::log_2(
        &JsValue::from_str(&format!("%c{}", banner.title)),
        &JsValue::from_str("color: #667eea; font-size: 24px; font-weight: bold;"),
    );
    if let Some(subtitle) = &banner.subtitle {
        web_sys::console::log_2(
            &JsValue::from_str(&format!("%c{}", subtitle)),
            &JsValue::from_str("color: #666; font-size: 14px;"),
        );
    }
}

/// Drive a callback from requestAnimationFrame with the frame delta in ms.
/// The loop runs for the life of the page.
pub fn spawn_frame_loop<F: FnMut(f64) + 'static>(mut on_frame: F) -> Result<(), WebError> {
    let window = web_sys::window().ok_or(WebError::DomUnavailable)?;
    let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let last = Rc::new(Cell::new(None::<f64>));

    let next = handle.clone();
    let inner_window = window.clone();
    *handle.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let dt = match last.replace(Some(timestamp)) {
            Some(previous) => (timestamp - previous).max(0.0),
            None => 0.0,
        };
        on_frame(dt);
        if let Some(closure) = next.borrow().as_ref() {
            let request = inner_window.request_animation_frame(closure.as_ref().unchecked_ref());
            if let Err(err) = request {
                log::error!("frame request failed: {:?}", err);
            }
        }
    }));

    if let Some(closure) = handle.borrow().as_ref() {
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}
