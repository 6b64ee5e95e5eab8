//! Shape data and the pairwise collision predicate matrix.

use crate::{error::CollisionError, Fp, Vec2};
use std::convert::TryFrom;

/// What counts as a collision for a test.
///
/// Threaded through every predicate; none of the current predicates distinguish
/// between the variants, so all three give the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollideType {
    Contains,
    Intersects,
    All,
}
impl Default for CollideType {
    fn default() -> Self {
        CollideType::All
    }
}

// ---------- Primitives ---------- //

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: Vec2,
}
impl Point {
    #[inline]
    pub fn new(x: Fp, y: Fp) -> Point {
        Point { pos: Vec2::new(x, y) }
    }
    #[inline]
    pub fn translate(self, offset: Vec2) -> Point {
        Point { pos: self.pos + offset }
    }
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        self.pos
    }
}
impl From<Vec2> for Point {
    fn from(pos: Vec2) -> Self {
        Point { pos }
    }
}

/// An axis-aligned rectangle. `pos` is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}
impl Rect {
    #[inline]
    pub fn new(x: Fp, y: Fp, width: Fp, height: Fp) -> Rect {
        Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
    #[inline]
    pub fn from_size(size: Vec2) -> Rect {
        //! Creates a rect of `size` with its top-left corner at the origin.
        Rect { pos: Vec2::ZERO, size }
    }
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Rect {
        Rect { pos, size }
    }

    #[inline]
    pub fn left(&self) -> Fp {
        self.pos.x
    }
    #[inline]
    pub fn top(&self) -> Fp {
        self.pos.y
    }
    #[inline]
    pub fn right(&self) -> Fp {
        self.pos.x + self.size.x
    }
    #[inline]
    pub fn bottom(&self) -> Fp {
        self.pos.y + self.size.y
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Rect {
        Rect {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    pub fn contain(&mut self, loc: Vec2) {
        //! Stretches the rect so that `loc` lies within its bounds.
        //! Edges already past `loc` stay put.
        if loc.x < self.left() {
            self.size.x += self.left() - loc.x;
            self.pos.x = loc.x;
        } else if loc.x > self.right() {
            self.size.x = loc.x - self.pos.x;
        }

        if loc.y < self.top() {
            self.size.y += self.top() - loc.y;
            self.pos.y = loc.y;
        } else if loc.y > self.bottom() {
            self.size.y = loc.y - self.pos.y;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub rad: Fp,
    pub pos: Vec2,
}
impl Circle {
    #[inline]
    pub fn new(rad: Fp, posx: Fp, posy: Fp) -> Circle {
        Circle {
            rad: rad.abs(),
            pos: Vec2::new(posx, posy),
        }
    }
    #[inline]
    pub fn translate(self, offset: Vec2) -> Circle {
        Circle {
            pos: self.pos + offset,
            rad: self.rad,
        }
    }
}

// ---------- Shape-Shape collision tests ---------- //

fn rect_circle_test(rect: &Rect, circle: &Circle) -> bool {
    let half = rect.size * 0.5;
    let dist = (circle.pos - rect.center()).abs();

    if dist.x > half.x + circle.rad || dist.y > half.y + circle.rad {
        return false;
    }
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }
    // center lies off a corner: compare against the corner itself
    (dist - half).length_squared() <= circle.rad * circle.rad
}

// ---------- Collide ---------- //

/// Per-variant collision predicates. Each receiver implements its own side of the
/// matrix; the pairs are deliberately not mirrored (see `Point::rect_test`).
///
/// Rect-circle tests measure from the rect's center, not from its top-left `pos`.
pub trait Collide {
    fn point_test(&self, point: &Point, ty: CollideType) -> bool;
    fn rect_test(&self, rect: &Rect, ty: CollideType) -> bool;
    fn circle_test(&self, circle: &Circle, ty: CollideType) -> bool;
}

impl Collide for Point {
    #[inline]
    fn point_test(&self, point: &Point, _ty: CollideType) -> bool {
        //! Exact coordinate equality, no epsilon.
        self.pos == point.pos
    }
    #[inline]
    fn rect_test(&self, rect: &Rect, _ty: CollideType) -> bool {
        //! Vertical bounds are tested inverted relative to `Rect::point_test`,
        //! which only holds for rects with no positive height.
        rect.top() >= self.pos.y
            && rect.left() <= self.pos.x
            && rect.right() >= self.pos.x
            && rect.bottom() <= self.pos.y
    }
    #[inline]
    fn circle_test(&self, _circle: &Circle, _ty: CollideType) -> bool {
        false
    }
}

impl Collide for Rect {
    #[inline]
    fn point_test(&self, point: &Point, _ty: CollideType) -> bool {
        //! Returns whether the point lies within the rect, edges inclusive.
        self.top() <= point.pos.y
            && self.left() <= point.pos.x
            && self.right() >= point.pos.x
            && self.bottom() >= point.pos.y
    }
    #[inline]
    fn rect_test(&self, other: &Rect, _ty: CollideType) -> bool {
        other.left() <= self.right()
            && other.right() >= self.left()
            && other.top() <= self.bottom()
            && other.bottom() >= self.top()
    }
    #[inline]
    fn circle_test(&self, circle: &Circle, _ty: CollideType) -> bool {
        rect_circle_test(self, circle)
    }
}

impl Collide for Circle {
    #[inline]
    fn point_test(&self, _point: &Point, _ty: CollideType) -> bool {
        false
    }
    #[inline]
    fn rect_test(&self, rect: &Rect, _ty: CollideType) -> bool {
        rect_circle_test(rect, self)
    }
    #[inline]
    fn circle_test(&self, other: &Circle, _ty: CollideType) -> bool {
        (other.pos - self.pos).length() <= self.rad + other.rad
    }
}

// ---------- Shape ---------- //

/// Tag of a `Shape` variant, with a stable numeric id.
///
/// Decoding an id with `TryFrom<u8>` is the only source of
/// `CollisionError::UnsupportedShape`; `Shape` is closed, so predicate dispatch never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point = 0,
    Rect = 1,
    Circle = 2,
}
impl ShapeKind {
    pub fn id(self) -> u8 {
        self as u8
    }
}
impl TryFrom<u8> for ShapeKind {
    type Error = CollisionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(ShapeKind::Point),
            1 => Ok(ShapeKind::Rect),
            2 => Ok(ShapeKind::Circle),
            _ => Err(CollisionError::UnsupportedShape(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Point(Point),
    Rect(Rect),
    Circle(Circle),
}
impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        match self {
            Shape::Point(p) => p.pos,
            Shape::Rect(r) => r.pos,
            Shape::Circle(c) => c.pos,
        }
    }
    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        //! Moves the shape without touching its size or radius.
        match self {
            Shape::Point(p) => p.pos = pos,
            Shape::Rect(r) => r.pos = pos,
            Shape::Circle(c) => c.pos = pos,
        }
    }
    #[inline]
    pub fn translate(self, offset: Vec2) -> Shape {
        match self {
            Shape::Point(p) => Shape::Point(p.translate(offset)),
            Shape::Rect(r) => Shape::Rect(r.translate(offset)),
            Shape::Circle(c) => Shape::Circle(c.translate(offset)),
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Shape::Point(p) => Some(p),
            _ => None,
        }
    }
    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Shape::Rect(r) => Some(r),
            _ => None,
        }
    }
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn shape_test(&self, other: &Shape, ty: CollideType) -> bool {
        //! Resolves both variants and runs the receiver's predicate for the pair.
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => a.point_test(b, ty),
            (Shape::Point(a), Shape::Rect(b)) => a.rect_test(b, ty),
            (Shape::Point(a), Shape::Circle(b)) => a.circle_test(b, ty),
            (Shape::Rect(a), Shape::Point(b)) => a.point_test(b, ty),
            (Shape::Rect(a), Shape::Rect(b)) => a.rect_test(b, ty),
            (Shape::Rect(a), Shape::Circle(b)) => a.circle_test(b, ty),
            (Shape::Circle(a), Shape::Point(b)) => a.point_test(b, ty),
            (Shape::Circle(a), Shape::Rect(b)) => a.rect_test(b, ty),
            (Shape::Circle(a), Shape::Circle(b)) => a.circle_test(b, ty),
        }
    }
}

impl Collide for Shape {
    fn point_test(&self, point: &Point, ty: CollideType) -> bool {
        match self {
            Shape::Point(p) => p.point_test(point, ty),
            Shape::Rect(r) => r.point_test(point, ty),
            Shape::Circle(c) => c.point_test(point, ty),
        }
    }
    fn rect_test(&self, rect: &Rect, ty: CollideType) -> bool {
        match self {
            Shape::Point(p) => p.rect_test(rect, ty),
            Shape::Rect(r) => r.rect_test(rect, ty),
            Shape::Circle(c) => c.rect_test(rect, ty),
        }
    }
    fn circle_test(&self, circle: &Circle, ty: CollideType) -> bool {
        match self {
            Shape::Point(p) => p.circle_test(circle, ty),
            Shape::Rect(r) => r.circle_test(circle, ty),
            Shape::Circle(c) => c.circle_test(circle, ty),
        }
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}
impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}
impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// Returns whether `a` collides with `b`, with `a` as the receiving side of the predicate.
#[inline]
pub fn collides(a: &Shape, b: &Shape, ty: CollideType) -> bool {
    a.shape_test(b, ty)
}
