use serde::{Deserialize, Serialize};

use crate::QuadtreeError;

/// What a node does with the points it already holds when it splits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Each held point moves to the first child that accepts it and the
    /// node's own list is cleared.
    #[default]
    Migrate,
    /// Each held point is offered to all four children and the node keeps
    /// its own list. A point on a midline ends up in more than one child.
    Retain,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// Points a leaf holds before it splits.
    pub capacity: usize,
    /// Leaves at this depth never split and take points past capacity.
    /// Leaves too small to halve in `f64` stop splitting on their own.
    pub max_depth: u8,
    pub split_policy: SplitPolicy,
}

impl QuadtreeConfig {
    pub const DEFAULT_CAPACITY: usize = 1;
    pub const DEFAULT_MAX_DEPTH: u8 = u8::MAX;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_split_policy(mut self, split_policy: SplitPolicy) -> Self {
        self.split_policy = split_policy;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), QuadtreeError> {
        if self.capacity == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            split_policy: SplitPolicy::default(),
        }
    }
}
