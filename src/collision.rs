//! Pure overlap tests used to resolve every entity interaction.
//!
//! Rectangles are axis-aligned and stored by edges; touching edges count as
//! an overlap.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect { left, top, right, bottom }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Rect {
            left: cx - width / 2.0,
            top: cy - height / 2.0,
            right: cx + width / 2.0,
            bottom: cy + height / 2.0,
        }
    }

    /// Grow every side by `margin`.
    pub fn expanded(&self, margin: f32) -> Self {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Circle { x, y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Three vertices; winding order does not matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Triangle { a, b, c }
    }

    pub fn contains(&self, p: Point) -> bool {
        point_in_triangle(p, self.a, self.b, self.c)
    }
}

/// Separating-axis rejection on both axes.
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}

/// Clamp the circle centre onto the rectangle and compare squared distances.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let nearest_x = circle.x.clamp(rect.left.min(rect.right), rect.right.max(rect.left));
    let nearest_y = circle.y.clamp(rect.top.min(rect.bottom), rect.bottom.max(rect.top));
    let dx = circle.x - nearest_x;
    let dy = circle.y - nearest_y;
    dx * dx + dy * dy <= circle.radius * circle.radius
}

fn area(a: Point, b: Point, c: Point) -> f32 {
    ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
}

/// True when the three sub-triangles formed with `p` add up to the triangle's
/// own area.  The tolerance is relative so it holds at any scale.
pub fn point_in_triangle(p: Point, t1: Point, t2: Point, t3: Point) -> bool {
    let whole = area(t1, t2, t3);
    let parts = area(p, t2, t3) + area(t1, p, t3) + area(t1, t2, p);
    (parts - whole).abs() <= 1e-4 * whole.max(1.0)
}
