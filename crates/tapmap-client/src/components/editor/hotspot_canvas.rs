//! Interactive canvas for drawing, moving, and resizing hotspots.
//!
//! The component feeds device-space pointer events into the shared
//! [`EditorSession`] and paints the resulting render plan. Painting is
//! never done synchronously from an event handler: every mutation
//! cancels the pending animation frame and schedules a fresh one, so
//! bursts of events collapse into one paint per display refresh.
//! Pointer moves additionally pass through a ~60 Hz throttle.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use tapmap_core::{
    EditorSession, FrameCoalescer, Point, PointerThrottle, Size, build_render_plan,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::prelude::*;

use super::context_menu::{ContextMenu, ContextMenuState};
use super::painter;

#[derive(Properties)]
pub struct HotspotCanvasProps {
    pub session: Rc<RefCell<EditorSession>>,
    /// Object URL of the background image, if one has been chosen.
    #[prop_or_default]
    pub image_url: Option<AttrValue>,
    /// Bumped whenever the session is mutated outside this component
    /// (toolbar, keyboard shortcuts, import).
    pub version: u32,
    #[prop_or_default]
    pub on_change: Callback<()>,
}

impl PartialEq for HotspotCanvasProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
            && self.image_url == other.image_url
            && self.version == other.version
            && self.on_change == other.on_change
    }
}

/// Pointer position relative to the canvas plus its displayed size,
/// both in CSS pixels.
fn device_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (Point, Size) {
    let rect = canvas.get_bounding_client_rect();
    (
        Point::new(
            f64::from(client_x) - rect.left(),
            f64::from(client_y) - rect.top(),
        ),
        Size::new(rect.width(), rect.height()),
    )
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// Maximum display box for the drawing surface, derived from the
/// window with room for the toolbar.
fn viewport_max_box(window: &web_sys::Window) -> Size {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    Size::new((width - 48.0).max(320.0), (height - 160.0).max(240.0))
}

#[function_component(HotspotCanvas)]
pub fn hotspot_canvas(props: &HotspotCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    // Decoded background image, present only after the load callback.
    let image = use_mut_ref(|| None::<HtmlImageElement>);
    let coalescer = use_mut_ref(FrameCoalescer::<i32>::new);
    let throttle = use_mut_ref(PointerThrottle::new);
    let render_closure = use_mut_ref(|| None::<Closure<dyn FnMut(f64)>>);
    let context_menu_state = use_state(ContextMenuState::new);
    // Tracks an active draw/drag/resize (for document-level listeners).
    let is_gesturing = use_state(|| false);

    // Cancel the pending frame, then schedule exactly one.
    let schedule_render: Rc<dyn Fn()> = {
        let coalescer = coalescer.clone();
        let render_closure = render_closure.clone();
        Rc::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(prev) = coalescer.borrow_mut().cancel() {
                let _ = window.cancel_animation_frame(prev);
            }
            let closure = render_closure.borrow();
            let Some(closure) = closure.as_ref() else {
                return;
            };
            if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                coalescer.borrow_mut().reschedule(id);
            }
        })
    };

    // Install the frame callback and the initial display box; cancel
    // any pending frame on teardown.
    {
        let canvas_ref = canvas_ref.clone();
        let session = props.session.clone();
        let image = image.clone();
        let coalescer = coalescer.clone();
        let render_closure = render_closure.clone();
        let schedule_render = schedule_render.clone();
        use_effect_with((), move |_| {
            {
                let coalescer = coalescer.clone();
                *render_closure.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
                    coalescer.borrow_mut().begin_frame();
                    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                        return;
                    };
                    let session = session.borrow();
                    let Some(plan) = build_render_plan(&session) else {
                        return;
                    };
                    let (w, h) = (plan.canvas_width as u32, plan.canvas_height as u32);
                    if canvas.width() != w {
                        canvas.set_width(w);
                    }
                    if canvas.height() != h {
                        canvas.set_height(h);
                    }
                    let Some(ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        return;
                    };
                    painter::paint(&ctx, &plan, image.borrow().as_ref());
                }));
            }
            schedule_render();

            let coalescer = coalescer.clone();
            move || {
                if let Some(id) = coalescer.borrow_mut().cancel() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
            }
        });
    }

    // Track the window size into the layout's display box.
    {
        let session = props.session.clone();
        let schedule_render = schedule_render.clone();
        use_effect_with((), move |_| {
            let window = gloo::utils::window();
            if let Err(err) = session.borrow_mut().set_max_box(viewport_max_box(&window)) {
                tracing::error!("layout failed: {err}");
            }
            let listener = EventListener::new(&window, "resize", move |_| {
                let window = gloo::utils::window();
                match session.borrow_mut().set_max_box(viewport_max_box(&window)) {
                    Ok(()) => schedule_render(),
                    Err(err) => tracing::error!("layout failed: {err}"),
                }
            });
            move || drop(listener)
        });
    }

    // Decode the background image; the session rejects pointer input
    // until this completes and layout geometry exists.
    {
        let session = props.session.clone();
        let image = image.clone();
        let schedule_render = schedule_render.clone();
        let on_change = props.on_change.clone();
        use_effect_with(props.image_url.clone(), move |url| {
            let Some(url) = url.clone() else {
                return;
            };
            let Ok(element) = HtmlImageElement::new() else {
                return;
            };
            let onload = {
                let element = element.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let (w, h) = (element.natural_width(), element.natural_height());
                    match session.borrow_mut().set_image(w, h) {
                        Ok(()) => {
                            tracing::info!(width = w, height = h, "background image decoded");
                            *image.borrow_mut() = Some(element.clone());
                            on_change.emit(());
                            schedule_render();
                        }
                        Err(err) => tracing::error!("background image rejected: {err}"),
                    }
                })
            };
            element.set_onload(Some(onload.as_ref().unchecked_ref()));
            element.set_src(&url);
            onload.forget();
        });
    }

    // Repaint when the session was mutated elsewhere.
    {
        let schedule_render = schedule_render.clone();
        use_effect_with(props.version, move |_| {
            schedule_render();
        });
    }

    // Document-level listeners carry an active gesture outside the
    // canvas bounds.
    {
        let session = props.session.clone();
        let canvas_ref = canvas_ref.clone();
        let schedule_render = schedule_render.clone();
        let throttle = throttle.clone();
        let on_change = props.on_change.clone();
        let is_gesturing_state = is_gesturing.clone();
        use_effect_with(*is_gesturing, move |active| {
            let listeners = if *active {
                let document = gloo::utils::document();

                let mousemove = {
                    let session = session.clone();
                    let canvas_ref = canvas_ref.clone();
                    let schedule_render = schedule_render.clone();
                    EventListener::new(&document, "mousemove", move |event| {
                        let event = event.dyn_ref::<web_sys::MouseEvent>().unwrap();
                        if !throttle.borrow_mut().allow(now_ms()) {
                            return;
                        }
                        let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                            return;
                        };
                        let (device, css) = device_pos(&canvas, event.client_x(), event.client_y());
                        session.borrow_mut().pointer_move(device, css);
                        schedule_render();
                    })
                };

                let mouseup = EventListener::new(&document, "mouseup", move |_event| {
                    if session.borrow_mut().pointer_up().is_some() {
                        on_change.emit(());
                    }
                    is_gesturing_state.set(false);
                    schedule_render();
                });

                Some((mousemove, mouseup))
            } else {
                None
            };

            move || drop(listeners)
        });
    }

    let onmousedown = {
        let session = props.session.clone();
        let canvas_ref = canvas_ref.clone();
        let schedule_render = schedule_render.clone();
        let on_change = props.on_change.clone();
        let is_gesturing = is_gesturing.clone();
        let context_menu_state = context_menu_state.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            if context_menu_state.visible {
                context_menu_state.set(ContextMenuState::hide());
            }
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let (device, css) = device_pos(&canvas, e.client_x(), e.client_y());
            let event = session.borrow_mut().pointer_down(device, css);
            if event.is_some() {
                on_change.emit(());
            }
            if !session.borrow().interaction().is_idle() {
                is_gesturing.set(true);
            }
            schedule_render();
        })
    };

    // Hover crosshair; gesture moves are handled at the document level.
    let onmousemove = {
        let session = props.session.clone();
        let canvas_ref = canvas_ref.clone();
        let schedule_render = schedule_render.clone();
        let throttle = throttle.clone();
        Callback::from(move |e: MouseEvent| {
            if !session.borrow().interaction().is_idle() {
                return;
            }
            if !throttle.borrow_mut().allow(now_ms()) {
                return;
            }
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let (device, css) = device_pos(&canvas, e.client_x(), e.client_y());
            session.borrow_mut().pointer_move(device, css);
            schedule_render();
        })
    };

    let onwheel = {
        let session = props.session.clone();
        let schedule_render = schedule_render.clone();
        Callback::from(move |e: WheelEvent| {
            e.prevent_default();
            session.borrow_mut().wheel_zoom(e.delta_y());
            schedule_render();
        })
    };

    let oncontextmenu = {
        let session = props.session.clone();
        let canvas_ref = canvas_ref.clone();
        let context_menu_state = context_menu_state.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let (device, css) = device_pos(&canvas, e.client_x(), e.client_y());
            if let Some(target) = session.borrow().hotspot_at_device(device, css) {
                context_menu_state.set(ContextMenuState::show(
                    (f64::from(e.client_x()), f64::from(e.client_y())),
                    target,
                ));
            }
        })
    };

    let on_menu_close = {
        let context_menu_state = context_menu_state.clone();
        Callback::from(move |()| context_menu_state.set(ContextMenuState::hide()))
    };

    let on_menu_move = {
        let session = props.session.clone();
        let schedule_render = schedule_render.clone();
        let is_gesturing = is_gesturing.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |id| {
            if session.borrow_mut().begin_move(id).is_some() {
                on_change.emit(());
            }
            if !session.borrow().interaction().is_idle() {
                is_gesturing.set(true);
            }
            schedule_render();
        })
    };

    let on_menu_delete = {
        let session = props.session.clone();
        let schedule_render = schedule_render.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |id| {
            if session.borrow_mut().remove_hotspot(id).is_some() {
                on_change.emit(());
            }
            schedule_render();
        })
    };

    html! {
        <div class="hotspot-editor">
            <canvas
                ref={canvas_ref}
                class="hotspot-surface"
                tabindex="0"
                {onmousedown}
                {onmousemove}
                {onwheel}
                {oncontextmenu}
            />
            <ContextMenu
                state={(*context_menu_state).clone()}
                on_close={on_menu_close}
                on_move={on_menu_move}
                on_delete={on_menu_delete}
            />
        </div>
    }
}
