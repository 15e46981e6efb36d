use log::{trace, warn};

use crate::{
    Boundary, Point, Quadrant, QuadtreeConfig, QuadtreeError, QuadtreeVisitor, Rect, SplitPolicy,
};

#[derive(Clone, Debug)]
enum Quadrants {
    Leaf,
    Split {
        boundary: Boundary,
        children: Box<[Quadtree; 4]>,
    },
}

/// A point quadtree node. The root is owned by the caller and every node
/// owns its four children once it has split.
#[derive(Clone, Debug)]
pub struct Quadtree {
    bounds: Rect,
    config: QuadtreeConfig,
    depth: u8,
    points: Vec<Point>,
    quadrants: Quadrants,
}

impl Quadtree {
    pub fn new(bounds: Rect, capacity: usize) -> Result<Self, QuadtreeError> {
        Self::with_config(bounds, QuadtreeConfig::new(capacity))
    }

    pub fn with_config(bounds: Rect, config: QuadtreeConfig) -> Result<Self, QuadtreeError> {
        bounds.validate()?;
        config.validate()?;
        Ok(Self::node(bounds, config, 0))
    }

    fn node(bounds: Rect, config: QuadtreeConfig, depth: u8) -> Self {
        Self {
            bounds,
            config,
            depth,
            points: Vec::new(),
            quadrants: Quadrants::Leaf,
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Distance from the root this node was created under.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Points held directly by this node. Under [`SplitPolicy::Retain`] a
    /// split node still reports the points it held before splitting.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.quadrants, Quadrants::Leaf)
    }

    /// The four children in NW, NE, SW, SE order, if this node has split.
    pub fn children(&self) -> Option<&[Quadtree; 4]> {
        match &self.quadrants {
            Quadrants::Leaf => None,
            Quadrants::Split { children, .. } => Some(&**children),
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Quadtree> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// The lines recorded when this node split.
    pub fn boundary(&self) -> Option<&Boundary> {
        match &self.quadrants {
            Quadrants::Leaf => None,
            Quadrants::Split { boundary, .. } => Some(boundary),
        }
    }

    pub fn is_in_bounds(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Stores `point` in this node or one of its descendants. Returns `false`
    /// when the point lies outside this node's bounds, in which case the tree
    /// is left untouched.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.is_in_bounds(point) {
            trace!("rejected {point}: outside {:?}", self.bounds);
            return false;
        }

        if self.is_leaf() && (self.points.len() < self.config.capacity || !self.can_subdivide()) {
            self.points.push(point);
            return true;
        }

        if self.is_leaf() {
            self.subdivide();
        }

        if let Quadrants::Split { children, .. } = &mut self.quadrants {
            for child in children.iter_mut() {
                if child.insert(point) {
                    return true;
                }
            }
        }

        // Only reachable when rounding at the midlines leaves a gap.
        warn!("{point} is inside {:?} but no quadrant accepted it", self.bounds);
        false
    }

    /// Inserts every point and returns how many were accepted.
    pub fn insert_all<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().filter(|&point| self.insert(point)).count()
    }

    fn can_subdivide(&self) -> bool {
        self.depth < self.config.max_depth && self.bounds.can_split()
    }

    fn subdivide(&mut self) {
        debug_assert!(self.is_leaf());
        trace!("splitting {:?} at depth {}", self.bounds, self.depth);

        let mut children = Box::new(
            Quadrant::ALL
                .map(|quadrant| Self::node(self.bounds.quadrant(quadrant), self.config, self.depth + 1)),
        );

        match self.config.split_policy {
            SplitPolicy::Migrate => {
                for point in self.points.drain(..) {
                    if !children.iter_mut().any(|child| child.insert(point)) {
                        warn!("dropped {point} while splitting {:?}", self.bounds);
                    }
                }
            }
            SplitPolicy::Retain => {
                for &point in &self.points {
                    for child in children.iter_mut() {
                        child.insert(point);
                    }
                }
            }
        }

        self.quadrants = Quadrants::Split {
            boundary: self.bounds.split_lines(),
            children,
        };
    }

    /// Walks the tree depth first, parents before children and children in
    /// NW, NE, SW, SE order.
    pub fn traverse<V>(&self, visitor: &mut V)
    where
        V: QuadtreeVisitor,
    {
        let mut to_process = vec![self];

        while let Some(node) = to_process.pop() {
            match &node.quadrants {
                Quadrants::Split { boundary, children } => {
                    visitor.branch(node.depth, &node.bounds, boundary);
                    // Reversed so the stack pops NW first.
                    to_process.extend(children.iter().rev());
                }
                Quadrants::Leaf => {
                    visitor.leaf(node.depth, &node.bounds);
                    for &point in &node.points {
                        visitor.point(node.depth, point);
                    }
                }
            }
        }
    }

    /// Every boundary recorded in this subtree, this node's own first.
    pub fn collect_boundaries(&self) -> Vec<Boundary> {
        let mut collector = BoundaryCollector::default();
        self.traverse(&mut collector);
        collector.boundaries
    }

    /// Points held by the leaves of this subtree.
    pub fn leaf_points(&self) -> Vec<Point> {
        let mut collector = PointCollector::default();
        self.traverse(&mut collector);
        collector.points
    }

    pub fn len(&self) -> usize {
        self.stats().points
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        let stats = self.stats();
        stats.branches + stats.leaves
    }

    pub fn branch_count(&self) -> usize {
        self.stats().branches
    }

    /// Depth of the deepest node below this one. A lone leaf has height 0.
    pub fn height(&self) -> u8 {
        self.stats().deepest - self.depth
    }

    fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        self.traverse(&mut stats);
        stats
    }
}

#[derive(Default)]
struct BoundaryCollector {
    boundaries: Vec<Boundary>,
}

impl QuadtreeVisitor for BoundaryCollector {
    fn branch(&mut self, _depth: u8, _bounds: &Rect, boundary: &Boundary) {
        self.boundaries.push(*boundary);
    }
}

#[derive(Default)]
struct PointCollector {
    points: Vec<Point>,
}

impl QuadtreeVisitor for PointCollector {
    fn point(&mut self, _depth: u8, point: Point) {
        self.points.push(point);
    }
}

#[derive(Default)]
struct Stats {
    points: usize,
    leaves: usize,
    branches: usize,
    deepest: u8,
}

impl QuadtreeVisitor for Stats {
    fn point(&mut self, _depth: u8, _point: Point) {
        self.points += 1;
    }

    fn leaf(&mut self, depth: u8, _bounds: &Rect) {
        self.leaves += 1;
        self.deepest = self.deepest.max(depth);
    }

    fn branch(&mut self, depth: u8, _bounds: &Rect, _boundary: &Boundary) {
        self.branches += 1;
        self.deepest = self.deepest.max(depth);
    }
}
