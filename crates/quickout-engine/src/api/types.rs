use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a ball in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// 3-bit collision category set. Used both as a fixture's own category and
/// as the mask of categories it is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionCategory(u8);

impl CollisionCategory {
    pub const NONE: Self = Self(0);
    pub const WALL: Self = Self(1);
    pub const BALL: Self = Self(1 << 1);
    pub const SPECIAL: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for CollisionCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Category + mask pair. Two fixtures interact only when each one's category
/// is in the other's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionFilter {
    pub category: CollisionCategory,
    pub mask: CollisionCategory,
}

impl CollisionFilter {
    /// Collides with nothing at all (anchor bodies).
    pub const NONE: Self = Self::new(CollisionCategory::NONE, CollisionCategory::NONE);

    pub const fn new(category: CollisionCategory, mask: CollisionCategory) -> Self {
        Self { category, mask }
    }

    /// Solid arena edge.
    pub const fn wall() -> Self {
        Self::new(CollisionCategory::WALL, CollisionCategory::ALL)
    }

    /// Ball fixture, touching every category.
    pub const fn ball() -> Self {
        Self::new(CollisionCategory::BALL, CollisionCategory::ALL)
    }

    /// Edge sensor. Shares the ball category so a ball's own fixture reports
    /// a contact against it.
    pub const fn boundary_sensor() -> Self {
        Self::new(CollisionCategory::BALL, CollisionCategory::ALL)
    }

    pub const fn allows(self, other: Self) -> bool {
        self.mask.intersects(other.category) && other.mask.intersects(self.category)
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::new(CollisionCategory::ALL, CollisionCategory::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_distinct_bits() {
        let all = CollisionCategory::WALL | CollisionCategory::BALL | CollisionCategory::SPECIAL;
        assert_eq!(all, CollisionCategory::ALL);
        assert!(!CollisionCategory::WALL.intersects(CollisionCategory::BALL));
        assert!(all.intersects(CollisionCategory::SPECIAL));
    }

    #[test]
    fn filters_are_symmetric() {
        let ball = CollisionFilter::ball();
        let wall = CollisionFilter::wall();
        assert!(ball.allows(wall));
        assert!(wall.allows(ball));
        assert!(!CollisionFilter::NONE.allows(ball));
        assert!(!ball.allows(CollisionFilter::NONE));
    }

    #[test]
    fn ball_only_mask_ignores_walls() {
        let picky = CollisionFilter::new(CollisionCategory::SPECIAL, CollisionCategory::BALL);
        assert!(picky.allows(CollisionFilter::ball()));
        assert!(!picky.allows(CollisionFilter::wall()));
    }
}
