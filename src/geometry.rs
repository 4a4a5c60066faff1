/// Axis-aligned rectangles shared by every collision test.

use crate::entities::{Bullet, Coin, Enemy, Heart, Platform, Player};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Strict overlap: rectangles that only share an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Length of the shared horizontal span of two `[x, x + w)` intervals.
pub fn horizontal_overlap(x1: f32, w1: f32, x2: f32, w2: f32) -> f32 {
    let start = x1.max(x2);
    let end = (x1 + w1).min(x2 + w2);
    (end - start).max(0.0)
}

/// Anything with a world-space bounding box.
pub trait Bounds {
    fn rect(&self) -> Rect;

    fn hits<B: Bounds>(&self, other: &B) -> bool {
        overlaps(&self.rect(), &other.rect())
    }
}

impl Bounds for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

impl Bounds for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Bounds for Platform {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Bounds for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Bounds for Bullet {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Bounds for Coin {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

impl Bounds for Heart {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}
