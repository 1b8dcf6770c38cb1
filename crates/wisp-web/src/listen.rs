// listen.rs
//
// DOM event wiring. Listeners translate browser events into engine inputs
// or plain class toggles; reveal state never lives out here.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, MouseEvent, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions,
};

use wisp_engine::{Engine, GroupId, NavSpec, PageInput, TargetDesc, TargetId};

use crate::dom::DomHost;
use crate::error::WebError;
use crate::runner::Bindings;

/// Forward window scrolls to the engine, and sample once immediately so
/// parallax and the progress bar are right before the first scroll.
pub fn wire_scroll(host: &DomHost, engine: Rc<RefCell<Engine>>) -> Result<(), WebError> {
    engine.borrow_mut().push(PageInput::Scroll {
        offset: host.scroll_offset() as f32,
        max: host.scroll_max() as f32,
    });

    let sampler = host.clone();
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        engine.borrow_mut().push(PageInput::Scroll {
            offset: sampler.scroll_offset() as f32,
            max: sampler.scroll_max() as f32,
        });
    });
    host.window()
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

/// Push the loaded input once the window load event fires, or right away
/// when it already has.
pub fn wire_load(
    host: &DomHost,
    engine: Rc<RefCell<Engine>>,
    body: TargetId,
) -> Result<(), WebError> {
    if host.load_complete() {
        engine.borrow_mut().push(PageInput::Loaded { body });
        return Ok(());
    }
    let on_load = Closure::<dyn FnMut()>::new(move || {
        engine.borrow_mut().push(PageInput::Loaded { body });
    });
    host.window()
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();
    Ok(())
}

/// Smooth-scroll same-page anchors, offset by the fixed header height.
pub fn wire_anchors(host: &DomHost, offset_px: f64) -> Result<(), WebError> {
    for anchor in host.query_all("a[href^='#']")? {
        let doc = host.clone();
        let link = anchor.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Ok(Some(section)) = doc.try_query(&href) else {
                return;
            };
            let top = section.get_bounding_client_rect().top() + doc.scroll_offset() - offset_px;
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            doc.window().scroll_to_with_scroll_to_options(&options);
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Menu toggle: the button flips the menu's active class, menu links close
/// it, and clicks landing outside both the button and the menu close it.
pub fn wire_menu(host: &DomHost, nav: &NavSpec) -> Result<(), WebError> {
    let (Some(button_sel), Some(menu_sel)) = (nav.menu_button.as_deref(), nav.menu.as_deref())
    else {
        return Ok(());
    };
    let Some(button) = host.try_query(button_sel)? else {
        log::debug!("menu button {:?} not present, menu unwired", button_sel);
        return Ok(());
    };
    let Some(menu) = host.try_query(menu_sel)? else {
        log::debug!("menu {:?} not present, menu unwired", menu_sel);
        return Ok(());
    };
    let active = nav.active_class.clone();

    {
        let menu = menu.clone();
        let active = active.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let _ = menu.class_list().toggle(&active);
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    for link in host.query_all(&format!("{} a", menu_sel))? {
        let menu = menu.clone();
        let active = active.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let _ = menu.class_list().remove_1(&active);
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    let on_doc_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        if button.contains(Some(&node)) || menu.contains(Some(&node)) {
            return;
        }
        let _ = menu.class_list().remove_1(&active);
    });
    host.document()
        .add_event_listener_with_callback("click", on_doc_click.as_ref().unchecked_ref())?;
    on_doc_click.forget();
    Ok(())
}

/// The call-to-action button scrolls its section into view.
pub fn wire_start_button(
    host: &DomHost,
    button_sel: &str,
    target_sel: &str,
) -> Result<(), WebError> {
    let Some(button) = host.try_query(button_sel)? else {
        return Ok(());
    };
    let doc = host.clone();
    let target_sel = target_sel.to_string();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Ok(Some(section)) = doc.try_query(&target_sel) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            section.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Accordion: a question click toggles its item and closes every other.
pub fn wire_accordion(
    host: &DomHost,
    item_sel: &str,
    question_sel: &str,
    active: &str,
) -> Result<(), WebError> {
    let items = host.query_all(item_sel)?;
    for (index, item) in items.iter().enumerate() {
        let Some(question) = item.query_selector(question_sel)? else {
            log::debug!("accordion item without {:?} skipped", question_sel);
            continue;
        };
        let all = items.clone();
        let active = active.to_string();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            for (other_index, other) in all.iter().enumerate() {
                if other_index != index && other.class_list().contains(&active) {
                    let _ = other.class_list().remove_1(&active);
                }
            }
            let _ = all[index].class_list().toggle(&active);
        });
        question.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Ripple clicks. The listener builds the span and hands it to the engine;
/// the engine owns its pose and its death from there.
pub fn wire_ripples(
    host: &DomHost,
    selector: &str,
    group: GroupId,
    engine: Rc<RefCell<Engine>>,
    bindings: Rc<RefCell<Bindings>>,
) -> Result<(), WebError> {
    for button in host.query_all(selector)? {
        // Ripples are clipped inside the button.
        if let Some(html) = button.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("position", "relative");
            let _ = style.set_property("overflow", "hidden");
        }

        let doc = host.clone();
        let engine = engine.clone();
        let bindings = bindings.clone();
        let parent = button.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let rect = parent.get_bounding_client_rect();
            let size = rect.width().max(rect.height());
            let origin = Vec2::new(
                (f64::from(event.client_x()) - rect.left()) as f32,
                (f64::from(event.client_y()) - rect.top()) as f32,
            );
            let spawned = spawn_ripple(&doc, &parent, size, origin, group, &engine, &bindings);
            if let Err(err) = spawned {
                log::warn!("ripple spawn failed: {}", err);
            }
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn spawn_ripple(
    host: &DomHost,
    parent: &Element,
    size: f64,
    origin: Vec2,
    group: GroupId,
    engine: &Rc<RefCell<Engine>>,
    bindings: &Rc<RefCell<Bindings>>,
) -> Result<(), WebError> {
    let span = host.create_element("span")?;
    if let Some(html) = span.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let px = format!("{}px", size);
        let _ = style.set_property("width", &px);
        let _ = style.set_property("height", &px);
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("border-radius", "50%");
        let _ = style.set_property("background", "rgba(255, 255, 255, 0.5)");
        let _ = style.set_property("pointer-events", "none");
        // Hidden until the engine's first pose lands.
        let _ = style.set_property("transform", "scale(0)");
    }
    parent.append_child(&span)?;

    let mut engine = engine.borrow_mut();
    let Some(id) = engine.register(group, TargetDesc::new()) else {
        span.remove();
        return Ok(());
    };
    bindings.borrow_mut().bind_styled(id, span);
    engine.push(PageInput::RippleSpawned { target: id, origin, size: size as f32 });
    Ok(())
}

/// Hover on the card drives its icon's pose.
pub fn wire_hover(
    card: &Element,
    icon: TargetId,
    engine: Rc<RefCell<Engine>>,
) -> Result<(), WebError> {
    {
        let engine = engine.clone();
        let on_enter = Closure::<dyn FnMut()>::new(move || {
            engine.borrow_mut().push(PageInput::Hover { target: icon, entered: true });
        });
        card.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
        on_enter.forget();
    }
    let on_leave = Closure::<dyn FnMut()>::new(move || {
        engine.borrow_mut().push(PageInput::Hover { target: icon, entered: false });
    });
    card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_leave.forget();
    Ok(())
}

/// Emblem clicks feed the easter egg counter.
pub fn wire_emblem(
    emblem: &Element,
    id: TargetId,
    engine: Rc<RefCell<Engine>>,
) -> Result<(), WebError> {
    let on_click = Closure::<dyn FnMut()>::new(move || {
        engine.borrow_mut().push(PageInput::EmblemClick { target: id });
    });
    emblem.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
