use crate::{
    config,
    starfield::Starfield,
    types::{ColorId, Facing, FrameSnapshot, Regime, Vec2},
};

const STAR_DEPTH: u8 = 0;
const BODY_DEPTH: u8 = 1;
const SHIP_DEPTH: u8 = 2;

const EARTH_SPRITE: &str = "(O)";
const MASS_SPRITE: &str = "(@)";

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub depth: u8,
    pub color: ColorId,
}

const EMPTY: RenderCell = RenderCell {
    ch: ' ',
    depth: 0,
    color: ColorId::White,
};

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, EMPTY);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: i32, y: i32, ch: char, depth: u8, color: ColorId) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if cell.ch == ' ' || depth >= cell.depth {
            *cell = RenderCell { ch, depth, color };
        }
    }

    fn put_str(&mut self, x: i32, y: i32, text: &str, depth: u8, color: ColorId) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, ch, depth, color);
        }
    }
}

/// Draws the starfield, Earth, the massive body and the ship for one frame.
pub fn draw(scene: &FrameSnapshot, stars: &Starfield, viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    draw_stars(stars, viewport, frame);

    let center_x = viewport.width as i32 / 2;
    let center_y = viewport.height as i32 / 2;

    if let Some(x) = earth_column(scene, viewport) {
        frame.put_str(x - 1, center_y, EARTH_SPRITE, BODY_DEPTH, ColorId::SkyBlue);
    }
    if let Some(x) = mass_column(scene, viewport) {
        frame.put_str(x - 1, center_y, MASS_SPRITE, BODY_DEPTH, ColorId::Purple);
    }

    let ship = match scene.facing {
        Facing::Right => "=>",
        Facing::Left => "<=",
    };
    let color = if scene.terminal {
        ColorId::Red
    } else {
        ColorId::Pink
    };
    frame.put_str(center_x - 1, center_y, ship, SHIP_DEPTH, color);
}

fn draw_stars(stars: &Starfield, viewport: Viewport, frame: &mut FrameBuffer) {
    let size = Vec2::new(viewport.width as f32, viewport.height as f32);
    for layer in stars.layers() {
        for star in &layer.stars {
            let x = (star.pos.x * size.x - layer.offset.x).rem_euclid(size.x);
            let y = star.pos.y * size.y;
            frame.set(x as i32, y as i32, star.glyph, STAR_DEPTH, star.color);
        }
    }
}

/// Earth sits under the ship at launch and slides off the left edge during departure.
fn earth_column(scene: &FrameSnapshot, viewport: Viewport) -> Option<i32> {
    if scene.regime != Regime::NearOrigin {
        return None;
    }
    let center = viewport.width as f64 / 2.0;
    let departed = (scene.ship_position - config::SHIP_START_POSITION).clamp(0.0, 1.0);
    Some((center - departed * (center + EARTH_SPRITE.len() as f64)).round() as i32)
}

/// The massive body enters at the right edge and closes on the ship as the
/// horizon distance shrinks.
fn mass_column(scene: &FrameSnapshot, viewport: Viewport) -> Option<i32> {
    if scene.regime != Regime::Approach {
        return None;
    }
    let span = scene.horizon_position - scene.massive_body_position;
    let progress = ((scene.ship_position - scene.massive_body_position) / span).clamp(0.0, 1.0);
    let right = viewport.width as f64 - 2.0;
    let center = viewport.width as f64 / 2.0 + 2.0;
    Some((right - progress * (right - center)).round() as i32)
}
