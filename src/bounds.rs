/*!

  Immutable geometry values for circuit layouts.

*/

/// A point on the drawing canvas, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    /// Creates a new location at the given coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the location
    pub fn get_x(&self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the location
    pub fn get_y(&self) -> i32 {
        self.y
    }

    /// Returns the location displaced by the given amounts
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        if dx == 0 && dy == 0 {
            return self;
        }
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the manhattan distance to the other location
    pub fn manhattan_distance_to(self, other: Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the four cardinal directions a component can face on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum Direction {
    /// Facing right
    East,
    /// Facing left
    West,
    /// Facing up
    North,
    /// Facing down
    South,
}

impl Direction {
    /// Returns the degrees of counterclockwise rotation from east
    pub fn to_degrees(self) -> i32 {
        match self {
            Direction::East => 0,
            Direction::North => 90,
            Direction::West => 180,
            Direction::South => 270,
        }
    }

    /// Returns the opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Returns the direction a quarter turn counterclockwise
    pub fn get_left(self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
        }
    }

    /// Returns the direction a quarter turn clockwise
    pub fn get_right(self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::North => Direction::East,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::East => write!(f, "east"),
            Direction::West => write!(f, "west"),
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
        }
    }
}

/// An immutable rectangular bounding box on the canvas.
///
/// Every operation returns a new value; dimensions are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Bounds {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Bounds {
    /// Bounds of zero size, located at the origin. Adding a point to it
    /// yields the bounds of that point alone, and it cannot be expanded or
    /// translated.
    pub const EMPTY: Bounds = Bounds {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Returns a bounds value for the given location and size. Negative
    /// dimensions are clamped to zero.
    pub fn create(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Returns the 1x1 bounds covering a single location
    pub fn create_at(p: Location) -> Self {
        Self::create(p.get_x(), p.get_y(), 1, 1)
    }

    /// Returns the bounds x-coordinate
    pub fn get_x(&self) -> i32 {
        self.x
    }

    /// Returns the bounds y-coordinate
    pub fn get_y(&self) -> i32 {
        self.y
    }

    /// Returns the bounds width
    pub fn get_width(&self) -> i32 {
        self.width
    }

    /// Returns the bounds height
    pub fn get_height(&self) -> i32 {
        self.height
    }

    /// Returns the x-coordinate of the center of the bounds
    pub fn get_center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Returns the y-coordinate of the center of the bounds
    pub fn get_center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Returns `true` if the given location lies within the bounds
    pub fn contains(&self, p: Location) -> bool {
        self.contains_with_error(p.get_x(), p.get_y(), 0)
    }

    /// Returns `true` if the given point lies within the bounds
    pub fn contains_xy(&self, px: i32, py: i32) -> bool {
        self.contains_with_error(px, py, 0)
    }

    /// Returns `true` if the given point lies within the bounds, or just
    /// outside them by no more than `allowed_error`.
    pub fn contains_with_error(&self, px: i32, py: i32, allowed_error: i32) -> bool {
        px >= self.x - allowed_error
            && px < self.x + self.width + allowed_error
            && py >= self.y - allowed_error
            && py < self.y + self.height + allowed_error
    }

    /// Returns `true` if the other bounds lie wholly within these bounds
    pub fn contains_bounds(&self, bd: Bounds) -> bool {
        let oth_x = if bd.width <= 0 { bd.x } else { bd.x + bd.width - 1 };
        let oth_y = if bd.height <= 0 { bd.y } else { bd.y + bd.height - 1 };
        self.contains_xy(bd.x, bd.y) && self.contains_xy(oth_x, oth_y)
    }

    /// Returns `true` if the given location lies on the border of the
    /// bounds, no further from it than `fudge`.
    pub fn border_contains(&self, p: Location, fudge: i32) -> bool {
        let px = p.get_x();
        let py = p.get_y();
        let x1 = self.x + self.width - 1;
        let y1 = self.y + self.height - 1;
        if (px - self.x).abs() <= fudge || (px - x1).abs() <= fudge {
            // maybe on east or west border?
            return self.y - fudge <= py && py <= y1 + fudge;
        }
        if (py - self.y).abs() <= fudge || (py - y1).abs() <= fudge {
            // maybe on north or south border?
            return self.x - fudge <= px && px <= x1 + fudge;
        }
        false
    }

    /// Returns these bounds extended to cover the given location
    pub fn add(self, p: Location) -> Self {
        self.add_xy(p.get_x(), p.get_y())
    }

    /// Returns these bounds extended to cover the given point
    pub fn add_xy(self, x: i32, y: i32) -> Self {
        if self == Self::EMPTY {
            return Self::create(x, y, 1, 1);
        }
        if self.contains_xy(x, y) {
            return self;
        }

        let mut new_x = self.x;
        let mut new_width = self.width;
        let mut new_y = self.y;
        let mut new_height = self.height;
        if x < self.x {
            new_x = x;
            new_width = (self.x + self.width) - x;
        } else if x >= self.x + self.width {
            new_width = x - self.x + 1;
        }
        if y < self.y {
            new_y = y;
            new_height = (self.y + self.height) - y;
        } else if y >= self.y + self.height {
            new_height = y - self.y + 1;
        }
        Self::create(new_x, new_y, new_width, new_height)
    }

    /// Returns the union of these bounds with the other bounds
    pub fn add_bounds(self, bd: Bounds) -> Self {
        if self == Self::EMPTY {
            return bd;
        }
        if bd == Self::EMPTY {
            return self;
        }

        let ret_x = bd.x.min(self.x);
        let ret_y = bd.y.min(self.y);
        let ret_width = (bd.x + bd.width).max(self.x + self.width) - ret_x;
        let ret_height = (bd.y + bd.height).max(self.y + self.height) - ret_y;
        if ret_x == self.x && ret_y == self.y && ret_width == self.width && ret_height == self.height
        {
            self
        } else if ret_x == bd.x && ret_y == bd.y && ret_width == bd.width && ret_height == bd.height
        {
            bd
        } else {
            Self::create(ret_x, ret_y, ret_width, ret_height)
        }
    }

    /// Returns these bounds grown by `d` in each direction. A negative `d`
    /// shrinks the bounds instead. [Bounds::EMPTY] cannot be expanded.
    pub fn expand(self, d: i32) -> Self {
        if self == Self::EMPTY || d == 0 {
            return self;
        }
        Self::create(self.x - d, self.y - d, self.width + 2 * d, self.height + 2 * d)
    }

    /// Returns these bounds displaced by the given amounts.
    /// [Bounds::EMPTY] cannot be translated.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        if self == Self::EMPTY || (dx == 0 && dy == 0) {
            return self;
        }
        Self::create(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns these bounds rotated around `(xc, yc)`, assuming the
    /// component they box is facing `from` and should face `to`. Only
    /// quarter turns change anything.
    pub fn rotate(self, from: Direction, to: Direction, xc: i32, yc: i32) -> Self {
        let mut degrees = to.to_degrees() - from.to_degrees();
        while degrees >= 360 {
            degrees -= 360;
        }
        while degrees < 0 {
            degrees += 360;
        }

        let dx = self.x - xc;
        let dy = self.y - yc;
        match degrees {
            90 => Self::create(xc + dy, yc - dx - self.width, self.height, self.width),
            180 => Self::create(
                xc - dx - self.width,
                yc - dy - self.height,
                self.width,
                self.height,
            ),
            270 => Self::create(xc - dy - self.height, yc + dx, self.height, self.width),
            _ => self,
        }
    }

    /// Returns the intersection of these bounds with the other bounds,
    /// [Bounds::EMPTY] if they do not overlap.
    pub fn intersect(self, other: Bounds) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x1 < x0 || y1 < y0 {
            Self::EMPTY
        } else {
            Self::create(x0, y0, x1 - x0, y1 - y0)
        }
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}): {}x{}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_and_shrink() {
        let b = Bounds::create(10, 20, 100, 150);
        assert_eq!(b.expand(2), Bounds::create(8, 18, 104, 154));
        assert_eq!(b.expand(-3), Bounds::create(13, 23, 94, 144));
        assert_eq!(Bounds::EMPTY.expand(5), Bounds::EMPTY);
    }

    #[test]
    fn add_points() {
        let b = Bounds::EMPTY.add_xy(30, 40);
        assert_eq!(b, Bounds::create(30, 40, 1, 1));
        // a contained point changes nothing
        assert_eq!(b.add_xy(30, 40), b);
        let b = b.add_xy(25, 50);
        assert_eq!(b, Bounds::create(25, 40, 6, 11));
        assert!(b.contains(Location::new(25, 50)));
    }

    #[test]
    fn union_prefers_the_cover() {
        let outer = Bounds::create(0, 0, 50, 50);
        let inner = Bounds::create(10, 10, 5, 5);
        assert_eq!(outer.add_bounds(inner), outer);
        assert_eq!(inner.add_bounds(outer), outer);
        assert_eq!(Bounds::EMPTY.add_bounds(inner), inner);
    }

    #[test]
    fn intersection() {
        let a = Bounds::create(0, 0, 20, 20);
        let b = Bounds::create(10, 10, 20, 20);
        assert_eq!(a.intersect(b), Bounds::create(10, 10, 10, 10));
        let apart = Bounds::create(100, 100, 5, 5);
        assert_eq!(a.intersect(apart), Bounds::EMPTY);
    }

    #[test]
    fn quarter_turns() {
        let b = Bounds::create(10, 0, 20, 10);
        let quarter = b.rotate(Direction::East, Direction::North, 0, 0);
        assert_eq!(quarter, Bounds::create(0, -30, 10, 20));
        let half = b.rotate(Direction::East, Direction::West, 0, 0);
        assert_eq!(half, Bounds::create(-30, -10, 20, 10));
        let full = b.rotate(Direction::North, Direction::North, 0, 0);
        assert_eq!(full, b);
    }

    #[test]
    fn borders() {
        let b = Bounds::create(0, 0, 10, 10);
        assert!(b.border_contains(Location::new(0, 5), 0));
        assert!(b.border_contains(Location::new(5, 9), 0));
        assert!(!b.border_contains(Location::new(5, 5), 0));
        assert!(b.border_contains(Location::new(5, 5), 4));
    }

    #[test]
    fn locations() {
        let p = Location::new(3, 4);
        assert_eq!(p.translate(2, -1), Location::new(5, 3));
        assert_eq!(p.manhattan_distance_to(Location::new(0, 0)), 7);
        assert_eq!(p.to_string(), "(3,4)");
    }

    #[test]
    fn directions() {
        assert_eq!(Direction::East.reverse(), Direction::West);
        assert_eq!(Direction::North.get_left(), Direction::West);
        assert_eq!(Direction::North.get_right(), Direction::East);
        assert_eq!(Direction::South.to_degrees(), 270);
    }
}
