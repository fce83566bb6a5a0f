//! Canvas2D painting of a [`RenderPlan`].
//!
//! Pure drawing: every frame repaints the whole surface from the plan
//! the core produced. No state is kept between frames.

use js_sys::Array;
use tapmap_core::{Color, HotspotSprite, Rect, RenderPlan};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

const BACKGROUND: &str = "#1f2227";
const GRID_STROKE: &str = "rgba(255, 255, 255, 0.14)";
const DRAFT_STROKE: &str = "rgba(255, 255, 255, 0.9)";
const CROSSHAIR_STROKE: &str = "rgba(255, 255, 255, 0.3)";
const LABEL_FILL: &str = "rgba(255, 255, 255, 0.95)";
const HANDLE_SIZE: f64 = 8.0;
const CORNER_RADIUS: f64 = 6.0;

fn css_rgba(color: Color, alpha: f64) -> String {
    format!("rgba({}, {}, {}, {alpha})", color.r, color.g, color.b)
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    ctx.begin_path();
    ctx.move_to(rect.x + r, rect.y);
    let _ = ctx.arc_to(rect.right(), rect.y, rect.right(), rect.bottom(), r);
    let _ = ctx.arc_to(rect.right(), rect.bottom(), rect.x, rect.bottom(), r);
    let _ = ctx.arc_to(rect.x, rect.bottom(), rect.x, rect.y, r);
    let _ = ctx.arc_to(rect.x, rect.y, rect.right(), rect.y, r);
    ctx.close_path();
}

fn set_dash(ctx: &CanvasRenderingContext2d, pattern: &[f64]) {
    let dash = Array::new();
    for v in pattern {
        dash.push(&JsValue::from_f64(*v));
    }
    let _ = ctx.set_line_dash(&dash);
}

fn draw_hotspot(ctx: &CanvasRenderingContext2d, sprite: &HotspotSprite) {
    rounded_rect_path(ctx, sprite.rect, CORNER_RADIUS);

    ctx.set_shadow_color("rgba(0, 0, 0, 0.35)");
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_y(2.0);
    let fill_alpha = if sprite.active { 0.38 } else { 0.22 };
    ctx.set_fill_style_str(&css_rgba(sprite.color, fill_alpha));
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_offset_y(0.0);

    if sprite.active {
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(3.0);
    } else {
        ctx.set_stroke_style_str(&css_rgba(sprite.color, 1.0));
        ctx.set_line_width(if sprite.selected { 2.5 } else { 1.5 });
    }
    ctx.stroke();

    // Corner handles
    for handle in sprite.handles {
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_rect(
            handle.x - HANDLE_SIZE / 2.0,
            handle.y - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        );
        ctx.set_stroke_style_str(&css_rgba(sprite.color, 1.0));
        ctx.set_line_width(1.0);
        ctx.stroke_rect(
            handle.x - HANDLE_SIZE / 2.0,
            handle.y - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        );
    }

    // Centered label
    ctx.set_font("13px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(LABEL_FILL);
    let _ = ctx.fill_text(
        &sprite.label,
        sprite.rect.x + sprite.rect.width / 2.0,
        sprite.rect.y + sprite.rect.height / 2.0,
    );
}

/// Repaints the whole surface from a frame plan.
pub fn paint(ctx: &CanvasRenderingContext2d, plan: &RenderPlan, image: Option<&HtmlImageElement>) {
    ctx.clear_rect(0.0, 0.0, plan.canvas_width, plan.canvas_height);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, plan.canvas_width, plan.canvas_height);

    if let Some(image) = image {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            plan.image_rect.x,
            plan.image_rect.y,
            plan.image_rect.width,
            plan.image_rect.height,
        );
    }

    if !plan.grid_lines.is_empty() {
        ctx.set_stroke_style_str(GRID_STROKE);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for (from, to) in &plan.grid_lines {
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
        }
        ctx.stroke();
    }

    for sprite in &plan.hotspots {
        draw_hotspot(ctx, sprite);
    }

    if let Some(draft) = plan.draft {
        set_dash(ctx, &[6.0, 4.0]);
        ctx.set_stroke_style_str(DRAFT_STROKE);
        ctx.set_line_width(1.5);
        ctx.stroke_rect(draft.x, draft.y, draft.width, draft.height);
        set_dash(ctx, &[]);
    }

    if let Some(crosshair) = plan.crosshair {
        ctx.set_stroke_style_str(CROSSHAIR_STROKE);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(crosshair.surface.x, 0.0);
        ctx.line_to(crosshair.surface.x, plan.canvas_height);
        ctx.move_to(0.0, crosshair.surface.y);
        ctx.line_to(plan.canvas_width, crosshair.surface.y);
        ctx.stroke();

        ctx.set_font("12px monospace");
        ctx.set_text_align("left");
        ctx.set_text_baseline("bottom");
        ctx.set_fill_style_str(LABEL_FILL);
        let _ = ctx.fill_text(
            &format!(
                "{}, {}",
                crosshair.logical.x.round(),
                crosshair.logical.y.round()
            ),
            crosshair.surface.x + 10.0,
            crosshair.surface.y - 8.0,
        );
    }
}
