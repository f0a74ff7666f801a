//! Signature capture pad.
//!
//! The pad is a two-state machine decoupled from any rendering layer.
//! The caller feeds it strokes and comment text, then drives one of the
//! terminal actions.
//!
//! ## State Transitions
//!
//! ```text
//! Editing -> (clear) -> Editing
//! Editing -> (cancel) -> Closed      (nothing produced)
//! Editing -> (save, >=1 stroke) -> Closed  (one DigitalSignature)
//! Editing -> (save, 0 strokes) -> Editing  (silent no-op)
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A point on the signature canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One continuous pen stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadState {
    Editing,
    Closed,
}

/// An approval record. Created once per save; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalSignature {
    pub signer_name: String,
    pub signer_role: String,
    /// `data:image/svg+xml;base64,...` rendering of the strokes.
    pub image_data: String,
    pub comment: String,
    pub captured_at: DateTime<Utc>,
}

/// Signature capture state machine.
///
/// Signer name and role are fixed at construction; strokes and comment
/// accumulate while `Editing`. Once `Closed` every command is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignaturePad {
    signer_name: String,
    signer_role: String,
    state: PadState,
    strokes: Vec<Stroke>,
    comment: String,
}

impl SignaturePad {
    pub fn new(signer_name: impl Into<String>, signer_role: impl Into<String>) -> Self {
        Self {
            signer_name: signer_name.into(),
            signer_role: signer_role.into(),
            state: PadState::Editing,
            strokes: Vec::new(),
            comment: String::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PadState {
        self.state
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a stroke. Strokes without points are dropped.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        if self.state != PadState::Editing || stroke.points.is_empty() {
            return;
        }
        self.strokes.push(stroke);
    }

    pub fn set_comment(&mut self, text: impl Into<String>) {
        if self.state != PadState::Editing {
            return;
        }
        self.comment = text.into();
    }

    /// Reset the canvas; stays in `Editing`.
    pub fn clear(&mut self) {
        if self.state != PadState::Editing {
            return;
        }
        self.strokes.clear();
    }

    /// Discard all input and close. Produces nothing.
    pub fn cancel(&mut self) {
        self.state = PadState::Closed;
        self.strokes.clear();
        self.comment.clear();
    }

    /// Serialize the canvas and close, returning the signature record.
    ///
    /// With an empty canvas this is a silent no-op: the pad stays in
    /// `Editing` and `None` is returned.
    pub fn save(&mut self) -> Option<DigitalSignature> {
        if self.state != PadState::Editing || self.strokes.is_empty() {
            return None;
        }
        let signature = DigitalSignature {
            signer_name: self.signer_name.clone(),
            signer_role: self.signer_role.clone(),
            image_data: self.render_data_url(),
            comment: self.comment.clone(),
            captured_at: Utc::now(),
        };
        self.state = PadState::Closed;
        self.strokes.clear();
        Some(signature)
    }

    /// Like [`save`](Self::save), but hands ownership of the record to
    /// the caller's callback. Returns whether the callback was invoked.
    pub fn save_with<F>(&mut self, on_save: F) -> bool
    where
        F: FnOnce(DigitalSignature),
    {
        match self.save() {
            Some(signature) => {
                on_save(signature);
                true
            }
            None => false,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Render the strokes as an SVG document wrapped in a base64 data URL.
    fn render_data_url(&self) -> String {
        let (min_x, min_y, max_x, max_y) = self
            .strokes
            .iter()
            .flat_map(|s| &s.points)
            .fold((f64::MAX, f64::MAX, f64::MIN, f64::MIN), |acc, p| {
                (
                    acc.0.min(p.x),
                    acc.1.min(p.y),
                    acc.2.max(p.x),
                    acc.3.max(p.y),
                )
            });
        const MARGIN: f64 = 4.0;
        let width = (max_x - min_x).max(1.0) + 2.0 * MARGIN;
        let height = (max_y - min_y).max(1.0) + 2.0 * MARGIN;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">",
            min_x - MARGIN,
            min_y - MARGIN,
            width,
            height
        );
        for stroke in &self.strokes {
            let mut d = String::new();
            for (i, p) in stroke.points.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{:.2} {:.2} ", cmd, p.x, p.y);
            }
            let _ = write!(
                svg,
                "<path d=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"2\"/>",
                d.trim_end()
            );
        }
        svg.push_str("</svg>");
        format!("data:image/svg+xml;base64,{}", BASE64.encode(svg))
    }
}
