use crate::food::Food;
use crate::grid::Cell;
use crate::snake::Snake;

/// Role a painted cell plays, mapped to glyph and color by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Tile {
    SnakeHead,
    SnakeBody,
    SnakeTail,
    Food,
}

/// One grid cell an entity asks the renderer to paint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Sprite {
    pub cell: Cell,
    pub tile: Tile,
}

/// Per-frame sprite list in paint order, reused across frames.
#[derive(Debug, Default)]
pub struct FrameSketch {
    sprites: Vec<Sprite>,
}

impl FrameSketch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn push(&mut self, cell: Cell, tile: Tile) {
        self.sprites.push(Sprite { cell, tile });
    }

    #[must_use]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }
}

/// Capability to describe itself as grid sprites.
///
/// Entities emit render descriptors; color, glyph, and cell-to-terminal
/// mapping stay entirely with the renderer.
pub trait Drawable {
    /// Appends this entity's sprites to the sketch.
    fn draw(&self, sketch: &mut FrameSketch);
}

impl Drawable for Food {
    fn draw(&self, sketch: &mut FrameSketch) {
        sketch.push(self.position, Tile::Food);
    }
}

impl Drawable for Snake {
    fn draw(&self, sketch: &mut FrameSketch) {
        let last = self.len().saturating_sub(1);
        for (index, segment) in self.segments().enumerate() {
            let tile = if index == 0 {
                Tile::SnakeHead
            } else if index == last {
                Tile::SnakeTail
            } else {
                Tile::SnakeBody
            };
            sketch.push(*segment, tile);
        }
    }
}
