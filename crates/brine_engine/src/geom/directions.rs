//! Four-way directions and directional collision relations

use bitflags::bitflags;

use super::Transform;

/// One of the two movement axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

/// A four-way movement direction
///
/// The coordinate system is screen-style: y grows downwards, so `Up` moves
/// towards smaller y values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller y
    Up,
    /// Towards greater y
    Down,
    /// Towards smaller x
    Left,
    /// Towards greater x
    Right,
}

impl Direction {
    /// The axis this direction moves along
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// The opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

bitflags! {
    /// A set of directions, used as the directional relation of a collision:
    /// which side(s) of an object face the object it overlaps with.
    ///
    /// An empty set on a collision event means "no overlap"; the physics
    /// component receives such events to reset transient collision state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirectionSet: u8 {
        /// The top side
        const UP = 1;
        /// The bottom side
        const DOWN = 1 << 1;
        /// The left side
        const LEFT = 1 << 2;
        /// The right side
        const RIGHT = 1 << 3;
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }
}

impl DirectionSet {
    /// Whether the set contains the given direction
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.into())
    }
}

/// Compute the directional relation of `a` towards `b`: which side(s) of `a`
/// face `b`, judged by the separation of the two middles.
///
/// The dominant axis wins; when the separations are equal both axes are
/// recorded, which is what lets corner contacts push out diagonally.
pub fn relation(a: &Transform, b: &Transform) -> DirectionSet {
    let am = a.middle();
    let bm = b.middle();
    let dx = bm.x - am.x;
    let dy = bm.y - am.y;

    let mut result = DirectionSet::empty();
    if dx.abs() >= dy.abs() {
        result |= if dx >= 0.0 {
            DirectionSet::RIGHT
        } else {
            DirectionSet::LEFT
        };
    }
    if dy.abs() >= dx.abs() {
        result |= if dy >= 0.0 {
            DirectionSet::DOWN
        } else {
            DirectionSet::UP
        };
    }
    result
}
