mod config;
mod error;
mod geometry;
mod quadtree;
mod sampling;

/// Callbacks for [`Quadtree::traverse`]. Every method defaults to doing
/// nothing so a visitor only implements what it looks at.
pub trait QuadtreeVisitor {
    /// A point held by the leaf visited just before.
    fn point(&mut self, _depth: u8, _point: Point) {}
    fn leaf(&mut self, _depth: u8, _bounds: &Rect) {}
    fn branch(&mut self, _depth: u8, _bounds: &Rect, _boundary: &Boundary) {}
}

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use quadtree::*;
pub use sampling::*;
