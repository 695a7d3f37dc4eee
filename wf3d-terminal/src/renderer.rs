/// Line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wf3d_core::{Corner, Edge, Frame};

/// Glyph drawn on every node.
const NODE_GLYPH: char = 'o';

/// Draws projected wireframes into a character grid.
///
/// Frames arrive in viewport units (the coordinate space the projection
/// works in); the renderer scales them down to terminal cells.
pub struct LineRenderer {
    width: usize,
    height: usize,
    viewport_width: f64,
    viewport_height: f64,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize, viewport_width: f64, viewport_height: f64) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            viewport_width,
            viewport_height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
        self.color_buffer = vec![Color::Reset; width * height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Color)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    /// Draw every edge of the frame, then the nodes on top.
    pub fn render_frame(&mut self, frame: &Frame<'_>) {
        for (edge, from, to) in frame.segments() {
            let from = self.to_cell(&from);
            let to = self.to_cell(&to);
            self.draw_line(from, to, edge_color(edge));
        }

        for point in frame.points() {
            let (x, y) = self.to_cell(point);
            if x.is_finite() && y.is_finite() {
                self.plot(x.round() as i64, y.round() as i64, NODE_GLYPH, Color::White);
            }
        }
    }

    fn to_cell(&self, point: &Point2<f64>) -> (f64, f64) {
        (
            point.x / self.viewport_width * self.width as f64,
            point.y / self.viewport_height * self.height as f64,
        )
    }

    /// Bresenham line between two cell positions, clipped to the grid first
    /// so far-off projections cost nothing.
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let bounds = (
            -0.5,
            -0.5,
            self.width as f64 - 0.5,
            self.height as f64 - 0.5,
        );
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };

        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
        let glyph = slope_glyph(x1 - x0, y1 - y0);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, glyph, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, character: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = color;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Front face blue, back face green, the rest grey.
pub fn edge_color(edge: Edge) -> Color {
    match (Corner::from_index(edge.a), Corner::from_index(edge.b)) {
        (Some(a), Some(b)) if a.is_front() && b.is_front() => Color::Blue,
        (Some(a), Some(b)) if !a.is_front() && !b.is_front() => Color::Green,
        _ => Color::Grey,
    }
}

/// Pick a character that follows a line's slope. Rows grow downwards.
fn slope_glyph(dx: i64, dy: i64) -> char {
    if dy == 0 {
        return '-';
    }
    if dx == 0 {
        return '|';
    }

    let ratio = dy.abs() as f64 / dx.abs() as f64;
    if ratio < 0.5 {
        '-'
    } else if ratio > 2.0 {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clipping of a segment to `(min_x, min_y, max_x, max_y)`.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if ![from.0, from.1, to.0, to.1].iter().all(|c| c.is_finite()) {
        return None;
    }

    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}
