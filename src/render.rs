//! Perspective grid backdrop with floating orbs.
//!
//! Geometry is computed by plain functions over [`RenderState`] so it can be
//! checked on the host; [`paint`] only replays it onto a 2D canvas context.
//! Nothing here looks at the attack controller.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::GameConfig;

const HORIZON_RATIO: f64 = 0.55;
const ORB_RADIUS: f64 = 18.0;
/// Upper bound on rungs per frame, whatever the spacing.
pub const MAX_RUNGS: usize = 256;
const ORB_COLORS: [&str; 2] = ["rgba(255, 113, 232, 0.3)", "rgba(147, 250, 93, 0.3)"];

/// Fixed drawing parameters, taken from config once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    pub rung_spacing: f64,
    pub scroll_step: f64,
    /// Rails on each side of the centre rail.
    pub rails_per_side: i32,
    pub orb_count: usize,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self { rung_spacing: 44.0, scroll_step: 0.65, rails_per_side: 16, orb_count: 8 }
    }
}

impl From<&GameConfig> for GridStyle {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            rung_spacing: cfg.rung_spacing,
            scroll_step: cfg.scroll_step,
            rails_per_side: cfg.rails_per_side,
            orb_count: cfg.orb_count,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orb {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug)]
pub struct RenderState {
    pub style: GridStyle,
    pub width: f64,
    pub height: f64,
    /// Total scroll so far. Only ever grows; wrapping happens in [`RenderState::rungs`].
    grid_offset: f64,
}

impl RenderState {
    pub fn new(style: GridStyle, width: f64, height: f64) -> Self {
        Self { style, width, height, grid_offset: 0.0 }
    }

    pub fn grid_offset(&self) -> f64 {
        self.grid_offset
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn horizon(&self) -> f64 {
        self.height * HORIZON_RATIO
    }

    /// Advance the scroll by one frame.
    pub fn step(&mut self) {
        self.grid_offset += self.style.scroll_step;
    }

    /// Horizontal rungs from the horizon down past the bottom edge, each
    /// widening with depth and shifted by the wrapped scroll.
    pub fn rungs(&self) -> Vec<Segment> {
        let gap = self.style.rung_spacing;
        if gap.is_nan() || gap <= 0.0 {
            return Vec::new();
        }
        let horizon = self.horizon();
        let shift = self.grid_offset % gap;
        let half = self.width * 0.5;
        let mut out = Vec::new();
        let mut y = horizon;
        while y <= self.height + gap && out.len() < MAX_RUNGS {
            let perspective = (y - horizon) / (self.height - horizon + 1.0);
            let spread = self.width * (0.55 + perspective * 0.62);
            out.push(Segment { x1: half - spread, y1: y + shift, x2: half + spread, y2: y + shift });
            y += gap;
        }
        out
    }

    /// Rails converging from the bottom edge toward the horizon.
    pub fn rails(&self) -> Vec<Segment> {
        let n = self.style.rails_per_side;
        let horizon = self.horizon();
        (-n..=n)
            .map(|i| {
                let i = i as f64;
                Segment {
                    x1: self.width / 2.0 + i * (self.width / 20.0),
                    y1: self.height,
                    x2: self.width / 2.0 + i * 14.0,
                    y2: horizon,
                }
            })
            .collect()
    }

    /// Orb positions at wall-clock `t_ms`: linear drift wrapping across the
    /// width, sinusoidal bob above the horizon.
    pub fn orbs(&self, t_ms: f64) -> Vec<Orb> {
        let horizon = self.horizon();
        let span = self.width + 120.0;
        (0..self.style.orb_count)
            .map(|i| {
                let fi = i as f64;
                Orb {
                    x: (t_ms * 0.015 + fi * 90.0).rem_euclid(span) - 60.0,
                    y: horizon - 45.0 - (t_ms * 0.001 + fi).sin() * 18.0,
                    radius: ORB_RADIUS,
                    color: ORB_COLORS[i % 2],
                }
            })
            .collect()
    }
}

fn stroke(ctx: &CanvasRenderingContext2d, s: &Segment) {
    ctx.begin_path();
    ctx.move_to(s.x1, s.y1);
    ctx.line_to(s.x2, s.y2);
    ctx.stroke();
}

/// Draw one frame and advance the scroll.
pub fn paint(state: &mut RenderState, ctx: &CanvasRenderingContext2d, t_ms: f64) -> Result<(), JsValue> {
    let (w, h) = (state.width, state.height);
    let horizon = state.horizon();
    ctx.clear_rect(0.0, 0.0, w, h);

    let glow = ctx.create_linear_gradient(0.0, horizon, 0.0, h);
    glow.add_color_stop(0.0, "rgba(255, 255, 255, 0.1)")?;
    glow.add_color_stop(1.0, "rgba(116, 189, 255, 0.45)")?;
    ctx.set_fill_style_canvas_gradient(&glow);
    ctx.fill_rect(0.0, horizon, w, h - horizon);

    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
    ctx.set_line_width(3.0);
    for s in state.rungs().iter().chain(state.rails().iter()) {
        stroke(ctx, s);
    }

    for orb in state.orbs(t_ms) {
        ctx.set_fill_style_str(orb.color);
        ctx.begin_path();
        ctx.arc(orb.x, orb.y, orb.radius, 0.0, std::f64::consts::TAU)?;
        ctx.fill();
    }

    state.step();
    Ok(())
}
