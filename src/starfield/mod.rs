use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config,
    types::{ColorId, Regime, Vec2},
};

// Columns scrolled per unit of ship travel at layer speed 1.
const SCROLL_SCALE: f32 = 0.1;

// (share of STARS_PER_LAYER as divisor, speed); the first layer never moves.
const LAYERS: [(usize, f32); 4] = [(4, 0.0), (3, 1.0), (2, 5.0), (1, 10.0)];

// Per-layer speed factors while approaching the mass.
const APPROACH_DAMPING: [f32; 4] = [1.0, 1.0, 0.5, 0.2];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Fractional position in `[0, 1)` on both axes.
    pub pos: Vec2,
    pub glyph: char,
    pub color: ColorId,
}

#[derive(Clone, Debug)]
pub struct StarLayer {
    pub stars: Vec<Star>,
    pub speed: f32,
    /// Accumulated scroll in columns.
    pub offset: Vec2,
}

#[derive(Debug)]
pub struct Starfield {
    layers: Vec<StarLayer>,
}

impl Starfield {
    pub fn new() -> Self {
        Self::with_rng(&mut StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: &mut StdRng) -> Self {
        let layers = LAYERS
            .iter()
            .enumerate()
            .map(|(layer_idx, &(share, speed))| {
                let stars = (0..config::STARS_PER_LAYER / share)
                    .map(|i| {
                        let pos = Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
                        if layer_idx == 0 {
                            Star {
                                pos,
                                glyph: '.',
                                color: ColorId::White,
                            }
                        } else {
                            let (glyph, color) = star_style(i);
                            Star { pos, glyph, color }
                        }
                    })
                    .collect();
                StarLayer {
                    stars,
                    speed,
                    offset: Vec2::ZERO,
                }
            })
            .collect();
        Self { layers }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    /// Scrolls the moving layers opposite to the ship. Near the origin the ship is
    /// still pulling away from Earth and the background holds still.
    pub fn advance(&mut self, displacement: f64, regime: Regime) {
        if regime == Regime::NearOrigin {
            return;
        }
        for (idx, layer) in self.layers.iter_mut().enumerate() {
            let damping = if regime == Regime::Approach {
                APPROACH_DAMPING[idx]
            } else {
                1.0
            };
            let dx = displacement as f32 * layer.speed * damping * SCROLL_SCALE;
            layer.offset += Vec2::new(dx, 0.0);
        }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

/// Most stars are small and white; a few are large light blue, grey or yellow.
fn star_style(index: usize) -> (char, ColorId) {
    match index % config::STAR_COLOR_MOD {
        0 => ('*', ColorId::LightBlue),
        1 => ('+', ColorId::Grey),
        2 | 3 => ('.', ColorId::Yellow),
        _ => ('.', ColorId::White),
    }
}
