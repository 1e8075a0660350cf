//! Frame-timing ring buffer and overlay renderer.
//!
//! [`PerfGraph`] keeps the last 100 frame durations in a fixed circular
//! buffer and draws them as a small FPS chart with a text overlay. It is an
//! example consumer of this crate: the application loop feeds it once per
//! frame, and it renders through the abstract [`Canvas`] collaborator
//! (implemented by whatever vector-drawing context the application uses).
//!
//! ```ignore
//! let mut graph = PerfGraph::new("Frame Time", "sans");
//!
//! loop {
//!     let (elapsed, delta) = graph.update();
//!     // ... render the scene ...
//!     graph.render(&mut canvas, 5.0, 5.0);
//!     // ... swap buffers, poll events ...
//! }
//! ```

use std::time::Instant;

use bitflags::bitflags;

/// Number of frame samples kept in the ring.
pub const GRAPH_HISTORY_COUNT: usize = 100;

/// Chart box width in canvas units.
const GRAPH_WIDTH: f32 = 200.0;
/// Chart box height in canvas units.
const GRAPH_HEIGHT: f32 = 35.0;
/// Cap on the implied per-sample FPS curve.
const FPS_CAP: f32 = 80.0;
/// Keeps the implied-FPS division finite while the ring still holds its
/// initial zero samples.
const FPS_EPSILON: f32 = 1e-5;

const BACKGROUND_COLOR: Color = Color::rgba(0, 0, 0, 128);
const GRAPH_COLOR: Color = Color::rgba(255, 192, 0, 128);
const TITLE_TEXT_COLOR: Color = Color::rgba(255, 192, 0, 128);
const FPS_TEXT_COLOR: Color = Color::rgba(240, 240, 240, 255);
const MS_TEXT_COLOR: Color = Color::rgba(240, 240, 240, 160);

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Build a color from channel values.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

bitflags! {
    /// Horizontal and vertical text anchoring for [`Canvas::text`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextAlign: u32 {
        /// Anchor at the left edge of the text.
        const LEFT = 1 << 0;
        /// Anchor at the horizontal center.
        const CENTER = 1 << 1;
        /// Anchor at the right edge.
        const RIGHT = 1 << 2;
        /// Anchor at the top of the line box.
        const TOP = 1 << 3;
        /// Anchor at the vertical middle.
        const MIDDLE = 1 << 4;
        /// Anchor at the bottom of the line box.
        const BOTTOM = 1 << 5;
        /// Anchor at the text baseline.
        const BASELINE = 1 << 6;
    }
}

impl Default for TextAlign {
    fn default() -> Self {
        Self::LEFT | Self::BASELINE
    }
}

/// Direct-mode drawing surface the graph renders against.
///
/// This is the capability set of an immediate-mode vector context, owned by
/// the application. Path state accumulates between `begin_path` and `fill`;
/// fill color, font face, font size and text alignment are sticky state.
pub trait Canvas {
    /// Clear the current path.
    fn begin_path(&mut self);
    /// Add an axis-aligned rectangle to the current path.
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Start a new sub-path at the given point.
    fn move_to(&mut self, x: f32, y: f32);
    /// Add a line segment from the current point.
    fn line_to(&mut self, x: f32, y: f32);
    /// Fill the current path with the current fill color.
    fn fill(&mut self);
    /// Set the sticky fill color.
    fn set_fill_color(&mut self, color: Color);
    /// Select the font face used for subsequent text.
    fn set_font_face(&mut self, face: &str);
    /// Set the font size in canvas units.
    fn set_font_size(&mut self, size: f32);
    /// Set how subsequent text is anchored to its position.
    fn set_text_align(&mut self, align: TextAlign);
    /// Draw a string at the given anchor point.
    fn text(&mut self, x: f32, y: f32, text: &str);
}

/// A fixed-capacity ring of recent frame times with an overlay renderer.
///
/// The ring always holds exactly [`GRAPH_HISTORY_COUNT`] samples; slots start
/// at zero and are overwritten in circular order, with `head` pointing at the
/// most recently written slot. [`average`] is therefore the mean over the
/// whole ring, including any still-zero initial slots.
///
/// [`average`]: Self::average
pub struct PerfGraph {
    name: String,
    font_face: String,
    values: [f32; GRAPH_HISTORY_COUNT],
    head: usize,
    start_time: Instant,
    last_update_time: Instant,
}

impl PerfGraph {
    /// Create a graph starting its clock now.
    pub fn new(name: impl Into<String>, font_face: impl Into<String>) -> Self {
        Self::new_at(name, font_face, Instant::now())
    }

    /// Create a graph with an explicit start instant.
    ///
    /// Exists so tests (and replay tooling) can drive the clock; the
    /// application loop normally uses [`new`] and [`update`].
    ///
    /// [`new`]: Self::new
    /// [`update`]: Self::update
    pub fn new_at(name: impl Into<String>, font_face: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.into(),
            font_face: font_face.into(),
            values: [0.0; GRAPH_HISTORY_COUNT],
            head: 0,
            start_time: start,
            last_update_time: start,
        }
    }

    /// Record the current frame boundary.
    ///
    /// Returns `(seconds_since_start, frame_delta_seconds)` and stores the
    /// delta as the newest ring sample.
    pub fn update(&mut self) -> (f32, f32) {
        self.update_at(Instant::now())
    }

    /// [`update`] with an injected clock reading.
    ///
    /// [`update`]: Self::update
    pub fn update_at(&mut self, now: Instant) -> (f32, f32) {
        let time_from_start = now.duration_since(self.start_time).as_secs_f32();
        let frame_time = now.duration_since(self.last_update_time).as_secs_f32();
        self.last_update_time = now;

        self.head = (self.head + 1) % GRAPH_HISTORY_COUNT;
        self.values[self.head] = frame_time;

        (time_from_start, frame_time)
    }

    /// Arithmetic mean of all stored samples, in seconds.
    pub fn average(&self) -> f32 {
        self.values.iter().sum::<f32>() / GRAPH_HISTORY_COUNT as f32
    }

    /// Draw the graph with its top-left corner at `(x, y)`.
    ///
    /// The chart box is 200x35 canvas units. Each sample contributes an
    /// implied FPS of `min(80, 1 / (sample + 1e-5))`, drawn as a filled
    /// polygon across the box and closed along its bottom edge. The text
    /// overlay shows the title (top-left, when the name is non-empty), the
    /// FPS derived from the running average (top-right, unclamped), and the
    /// average frame time in milliseconds (bottom-right).
    pub fn render(&self, canvas: &mut dyn Canvas, x: f32, y: f32) {
        let avg = self.average();
        let w = GRAPH_WIDTH;
        let h = GRAPH_HEIGHT;

        canvas.begin_path();
        canvas.rect(x, y, w, h);
        canvas.set_fill_color(BACKGROUND_COLOR);
        canvas.fill();

        canvas.begin_path();
        canvas.move_to(x, y + h);
        for i in 0..GRAPH_HISTORY_COUNT {
            let sample = self.values[(self.head + i) % GRAPH_HISTORY_COUNT];
            let v = (1.0 / (FPS_EPSILON + sample)).min(FPS_CAP);
            let vx = x + (i as f32 / (GRAPH_HISTORY_COUNT - 1) as f32) * w;
            let vy = y + h - (v / FPS_CAP) * h;
            canvas.line_to(vx, vy);
        }
        canvas.line_to(x + w, y + h);
        canvas.set_fill_color(GRAPH_COLOR);
        canvas.fill();

        canvas.set_font_face(&self.font_face);

        if !self.name.is_empty() {
            canvas.set_font_size(14.0);
            canvas.set_text_align(TextAlign::LEFT | TextAlign::TOP);
            canvas.set_fill_color(TITLE_TEXT_COLOR);
            canvas.text(x + 3.0, y + 1.0, &self.name);
        }

        canvas.set_font_size(18.0);
        canvas.set_text_align(TextAlign::RIGHT | TextAlign::TOP);
        canvas.set_fill_color(FPS_TEXT_COLOR);
        canvas.text(x + w - 3.0, y + 1.0, &format!("{:.2} FPS", 1.0 / avg));

        canvas.set_font_size(15.0);
        canvas.set_text_align(TextAlign::RIGHT | TextAlign::BOTTOM);
        canvas.set_fill_color(MS_TEXT_COLOR);
        canvas.text(x + w - 3.0, y + h + 1.0, &format!("{:.2} ms", avg * 1000.0));
    }
}

impl std::fmt::Debug for PerfGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfGraph")
            .field("name", &self.name)
            .field("head", &self.head)
            .field("average", &self.average())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Canvas that records every drawing call for assertions.
    #[derive(Default)]
    struct RecordingCanvas {
        line_points: Vec<(f32, f32)>,
        texts: Vec<(f32, f32, String)>,
        fills: usize,
    }

    impl Canvas for RecordingCanvas {
        fn begin_path(&mut self) {}
        fn rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
        fn move_to(&mut self, _x: f32, _y: f32) {}
        fn line_to(&mut self, x: f32, y: f32) {
            self.line_points.push((x, y));
        }
        fn fill(&mut self) {
            self.fills += 1;
        }
        fn set_fill_color(&mut self, _color: Color) {}
        fn set_font_face(&mut self, _face: &str) {}
        fn set_font_size(&mut self, _size: f32) {}
        fn set_text_align(&mut self, _align: TextAlign) {}
        fn text(&mut self, x: f32, y: f32, text: &str) {
            self.texts.push((x, y, text.to_string()));
        }
    }

    /// Drive `graph` with fixed frame deltas, first frame at `start`.
    fn drive(graph: &mut PerfGraph, start: Instant, deltas: &[f32]) {
        let mut t = start;
        for &delta in deltas {
            t += Duration::from_secs_f32(delta);
            graph.update_at(t);
        }
    }

    #[test]
    fn test_update_reports_elapsed_and_delta() {
        let t0 = Instant::now();
        let mut graph = PerfGraph::new_at("fps", "sans", t0);

        let (elapsed, delta) = graph.update_at(t0 + Duration::from_millis(16));
        assert!((elapsed - 0.016).abs() < 1e-6);
        assert!((delta - 0.016).abs() < 1e-6);

        let (elapsed, delta) = graph.update_at(t0 + Duration::from_millis(36));
        assert!((elapsed - 0.036).abs() < 1e-6);
        assert!((delta - 0.020).abs() < 1e-6);
    }

    #[test]
    fn test_average_after_exactly_n_updates() {
        let t0 = Instant::now();
        let mut graph = PerfGraph::new_at("fps", "sans", t0);

        // One zero-length frame followed by 99 at 20 ms.
        graph.update_at(t0);
        drive(&mut graph, t0, &[0.02; 99]);

        // Mean of {0.0} + 99 x 0.02 over all 100 slots.
        assert!((graph.average() - 0.0198).abs() < 1e-4);
    }

    #[test]
    fn test_ring_overwrites_oldest_samples() {
        let t0 = Instant::now();
        let mut graph = PerfGraph::new_at("fps", "sans", t0);

        // Fill the whole ring with 10 ms frames, then 40 more at 30 ms.
        drive(&mut graph, t0, &[0.01; GRAPH_HISTORY_COUNT]);
        let mut t = t0 + Duration::from_secs_f32(0.01 * GRAPH_HISTORY_COUNT as f32);
        for _ in 0..40 {
            t += Duration::from_secs_f32(0.03);
            graph.update_at(t);
        }

        // 60 old samples at 0.01 and 40 new ones at 0.03 remain.
        let expected = (60.0 * 0.01 + 40.0 * 0.03) / 100.0;
        assert!((graph.average() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_fps_text_from_average() {
        let t0 = Instant::now();
        let mut graph = PerfGraph::new_at("", "sans", t0);
        graph.update_at(t0);
        drive(&mut graph, t0, &[0.02; 99]);

        let mut canvas = RecordingCanvas::default();
        graph.render(&mut canvas, 0.0, 0.0);

        // 1 / 0.0198 = 50.505..., rendered with two decimals.
        let fps = canvas.texts.iter().find(|(_, _, s)| s.ends_with("FPS"));
        assert_eq!(fps.unwrap().2, "50.51 FPS");

        let ms = canvas.texts.iter().find(|(_, _, s)| s.ends_with("ms"));
        assert_eq!(ms.unwrap().2, "19.80 ms");
    }

    #[test]
    fn test_title_skipped_when_name_empty() {
        let graph = PerfGraph::new("", "sans");
        let mut canvas = RecordingCanvas::default();
        graph.render(&mut canvas, 0.0, 0.0);
        // Only the FPS and millisecond overlays.
        assert_eq!(canvas.texts.len(), 2);

        let named = PerfGraph::new("Frame Time", "sans");
        let mut canvas = RecordingCanvas::default();
        named.render(&mut canvas, 0.0, 0.0);
        assert_eq!(canvas.texts.len(), 3);
        assert_eq!(canvas.texts[0].2, "Frame Time");
    }

    #[test]
    fn test_all_zero_ring_renders_finite_curve() {
        let graph = PerfGraph::new("fps", "sans");
        let mut canvas = RecordingCanvas::default();
        graph.render(&mut canvas, 10.0, 20.0);

        // Curve points plus the closing bottom-edge segment.
        assert_eq!(canvas.line_points.len(), GRAPH_HISTORY_COUNT + 1);
        for &(px, py) in &canvas.line_points {
            assert!(px.is_finite() && py.is_finite());
        }
        // 1 / 1e-5 caps at 80, which maps every curve point to the box top.
        for &(_, py) in &canvas.line_points[..GRAPH_HISTORY_COUNT] {
            assert!((py - 20.0).abs() < 1e-4);
        }
        assert_eq!(canvas.fills, 2);
    }

    #[test]
    fn test_curve_spans_chart_box() {
        let mut graph = PerfGraph::new("fps", "sans");
        let t = Instant::now();
        drive(&mut graph, t, &[0.02; 10]);

        let mut canvas = RecordingCanvas::default();
        graph.render(&mut canvas, 5.0, 0.0);

        let first = canvas.line_points[0];
        let last = canvas.line_points[GRAPH_HISTORY_COUNT - 1];
        assert!((first.0 - 5.0).abs() < 1e-4);
        assert!((last.0 - 205.0).abs() < 1e-4);
    }

    #[test]
    fn test_average_is_order_independent() {
        let t0 = Instant::now();

        let mut forward = PerfGraph::new_at("a", "sans", t0);
        drive(&mut forward, t0, &[0.01, 0.02, 0.03, 0.04]);

        let mut reversed = PerfGraph::new_at("b", "sans", t0);
        drive(&mut reversed, t0, &[0.04, 0.03, 0.02, 0.01]);

        assert!((forward.average() - reversed.average()).abs() < 1e-6);
    }
}
