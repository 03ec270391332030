//! Canvas 2D backend: replays a [`Frame`] onto a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::draw::{DrawCommand, Frame};

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Wipe the surface (used when the game is closed)
    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn paint(&self, frame: &Frame) -> Result<(), JsValue> {
        for command in &frame.commands {
            self.draw(command)?;
        }
        Ok(())
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::FillRect { rect, color } => {
                let size = rect.size();
                ctx.set_fill_style_str(&color.to_string());
                ctx.fill_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCommand::RoundRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                let size = rect.size();
                ctx.set_fill_style_str(&fill.to_string());
                ctx.begin_path();
                ctx.round_rect_with_f64(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    size.x as f64,
                    size.y as f64,
                    *radius as f64,
                )?;
                ctx.fill();
                if let Some(stroke) = stroke {
                    ctx.set_stroke_style_str(&stroke.color.to_string());
                    ctx.set_line_width(stroke.width as f64);
                    ctx.stroke();
                }
            }
            DrawCommand::Circles { circles, color } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.begin_path();
                for (center, radius) in circles {
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                }
                ctx.fill();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Text {
                text,
                pos,
                font,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.set_font(&font.css());
                ctx.set_text_align("center");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
