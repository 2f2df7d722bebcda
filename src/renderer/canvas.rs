//! Canvas 2D painter

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Scene, Sprite};
use crate::sim::ShapeKind;

const OUTLINE: &str = "#ffffff";

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Map a client-space pointer position to playfield coordinates
    pub fn to_playfield(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let sy = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        (
            ((client_x - rect.left()) * sx) as f32,
            ((client_y - rect.top()) * sy) as f32,
        )
    }

    pub fn draw(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, scene.width as f64, scene.height as f64);

        for sprite in &scene.sprites {
            match sprite {
                Sprite::Shape {
                    kind,
                    pos,
                    size,
                    color,
                } => self.draw_shape(*kind, pos.x as f64, pos.y as f64, *size as f64, color)?,
                Sprite::Particle {
                    pos,
                    size,
                    color,
                    opacity,
                } => {
                    ctx.set_global_alpha(*opacity as f64);
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.arc(pos.x as f64, pos.y as f64, *size as f64, 0.0, TAU)?;
                    ctx.fill();
                    ctx.set_global_alpha(1.0);
                }
            }
        }
        Ok(())
    }

    fn draw_shape(
        &self,
        kind: ShapeKind,
        x: f64,
        y: f64,
        size: f64,
        color: &str,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.set_stroke_style_str(OUTLINE);
        ctx.set_line_width(2.0);

        match kind {
            ShapeKind::Circle => {
                ctx.begin_path();
                ctx.arc(x, y, size, 0.0, TAU)?;
                ctx.fill();
                ctx.stroke();
            }
            ShapeKind::Square => {
                ctx.fill_rect(x - size, y - size, size * 2.0, size * 2.0);
                ctx.stroke_rect(x - size, y - size, size * 2.0, size * 2.0);
            }
            ShapeKind::Triangle => {
                ctx.begin_path();
                ctx.move_to(x, y - size);
                ctx.line_to(x - size, y + size);
                ctx.line_to(x + size, y + size);
                ctx.close_path();
                ctx.fill();
                ctx.stroke();
            }
        }
        Ok(())
    }
}
