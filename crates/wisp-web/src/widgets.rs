// widgets.rs
//
// The interactive cores display. Buttons tear the boxes down and rebuild
// them; the engine staggers the reveal wave over the fresh targets.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use wisp_engine::{CoresSpec, Engine, GroupId, PageInput, TargetDesc, TargetId};

use crate::dom::DomHost;
use crate::error::WebError;
use crate::runner::Bindings;

pub struct CoresWidget {
    host: DomHost,
    display: Element,
    spec: CoresSpec,
    group: GroupId,
    engine: Rc<RefCell<Engine>>,
    bindings: Rc<RefCell<Bindings>>,
    current: Vec<TargetId>,
}

impl CoresWidget {
    /// Mount the widget: build the initial boxes and wire the buttons.
    /// Returns `None` when the display element is absent from the page.
    pub fn mount(
        host: &DomHost,
        spec: CoresSpec,
        group: GroupId,
        engine: Rc<RefCell<Engine>>,
        bindings: Rc<RefCell<Bindings>>,
    ) -> Result<Option<Rc<RefCell<Self>>>, WebError> {
        let Some(display) = host.try_query(&spec.display)? else {
            log::debug!("cores display {:?} not present, widget skipped", spec.display);
            return Ok(None);
        };
        let buttons = host.query_all(&spec.buttons)?;
        let initial = spec.initial;

        let widget = Rc::new(RefCell::new(Self {
            host: host.clone(),
            display,
            spec,
            group,
            engine,
            bindings,
            current: Vec::new(),
        }));
        widget.borrow_mut().rebuild(initial)?;

        for button in &buttons {
            let widget = widget.clone();
            let all = buttons.clone();
            let clicked = button.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || {
                let mut widget = widget.borrow_mut();
                let active = widget.spec.active_class.clone();
                for other in &all {
                    let _ = other.class_list().remove_1(&active);
                }
                let _ = clicked.class_list().add_1(&active);

                let count = clicked
                    .get_attribute(&widget.spec.count_attr)
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .unwrap_or(widget.spec.initial);
                if let Err(err) = widget.rebuild(count) {
                    log::warn!("cores rebuild failed: {}", err);
                }
            });
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }
        Ok(Some(widget))
    }

    /// Tear down the old boxes and build `count` fresh ones.
    pub fn rebuild(&mut self, count: u32) -> Result<(), WebError> {
        {
            let mut engine = self.engine.borrow_mut();
            let mut bindings = self.bindings.borrow_mut();
            for id in self.current.drain(..) {
                engine.remove(id);
                bindings.unbind(id);
            }
        }
        self.display.set_inner_html("");

        let mut fresh = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let core = self.host.create_element("div")?;
            core.set_class_name(&self.spec.box_class);
            core.set_inner_html(&format!(
                "<div class=\"core-label\">{} {}</div><div class=\"core-status\">{}</div>",
                self.spec.label, i, self.spec.status
            ));
            // Hidden inline before insertion; the engine repeats this in its
            // first ops, then reveals on its own clock.
            if let Some(html) = core.dyn_ref::<HtmlElement>() {
                let style = html.style();
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "scale(0.8)");
            }
            self.display.append_child(&core)?;

            let Some(id) = self.engine.borrow_mut().register(self.group, TargetDesc::new())
            else {
                continue;
            };
            self.bindings.borrow_mut().bind_styled(id, core);
            fresh.push(id);
        }

        self.current = fresh.clone();
        self.engine.borrow_mut().push(PageInput::CoresRebuilt { targets: fresh });
        Ok(())
    }
}
