//! Bounded history of past spacecraft positions for the trail line.

use std::collections::VecDeque;

use bevy::math::DVec3;
use bevy::prelude::Resource;

/// Default number of trail points kept.
pub const TRAIL_CAPACITY: usize = 1000;

/// FIFO buffer of recent positions. The oldest point is evicted when full.
#[derive(Resource, Clone, Debug)]
pub struct Trail {
    points: VecDeque<DVec3>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl Trail {
    /// Create an empty trail holding at most `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when at capacity.
    pub fn push(&mut self, pos: DVec3) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }
}
