//! Commits a [`Frame`]'s draw commands to a 2D canvas context.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::render::{DrawCommand, Frame};

const DASH: (f64, f64) = (6.0, 4.0);

/// Paints every command in order. The popover is not drawn here; the
/// component renders it as HTML so its link is clickable.
pub fn commit(ctx: &CanvasRenderingContext2d, frame: &Frame, surface_width: f64, surface_height: f64) {
	for command in &frame.commands {
		match command {
			DrawCommand::Clear { color } => {
				ctx.set_fill_style_str(&color.to_css());
				ctx.fill_rect(0.0, 0.0, surface_width, surface_height);
			}
			DrawCommand::Line {
				from,
				to,
				width,
				color,
				dashed,
			} => {
				if *dashed {
					let _ = ctx.set_line_dash(&js_sys::Array::of2(
						&JsValue::from_f64(DASH.0),
						&JsValue::from_f64(DASH.1),
					));
				} else {
					let _ = ctx.set_line_dash(&js_sys::Array::new());
				}
				ctx.set_stroke_style_str(&color.to_css());
				ctx.set_line_width(*width);
				ctx.begin_path();
				ctx.move_to(from.0, from.1);
				ctx.line_to(to.0, to.1);
				ctx.stroke();
			}
			DrawCommand::Disc {
				center,
				radius,
				fill,
				stroke,
			} => {
				ctx.begin_path();
				let _ = ctx.arc(center.0, center.1, *radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(&fill.to_css());
				ctx.fill();
				if let Some(stroke) = stroke {
					let _ = ctx.set_line_dash(&js_sys::Array::new());
					ctx.set_stroke_style_str(&stroke.color.to_css());
					ctx.set_line_width(stroke.width);
					ctx.stroke();
				}
			}
			DrawCommand::Text {
				at,
				text,
				font_px,
				color,
			} => {
				ctx.set_fill_style_str(&color.to_css());
				ctx.set_font(&format!("{}px sans-serif", font_px));
				let _ = ctx.fill_text(text, at.0, at.1);
			}
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
