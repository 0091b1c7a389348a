use crate::body::{Body, Shape};
use crate::math::{self, Vec2};

/// A reported overlap between two shapes.
///
/// Only ever produced together with a positive detection result; "no
/// collision" is `None`, never a zeroed contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit separation axis, pointing from the first shape toward the
    /// second.
    pub normal: Vec2,
    /// Non-negative penetration distance along `normal`.
    pub depth: f32,
}

/// Tests two bodies for overlap, dispatching on the shape pair.
///
/// The contact normal points from `b0` toward `b1`.
pub fn collide(b0: &Body, b1: &Body) -> Option<Contact> {
    match (b0.shape(), b1.shape()) {
        (Shape::Box { transformed: a, .. }, Shape::Box { transformed: b, .. }) => {
            intersect_polygons(a, b)
        }
        (Shape::Box { transformed, .. }, Shape::Circle { radius }) => {
            // the routine's normal points circle -> polygon, which is b1 -> b0
            intersect_polygon_circle(b1.position(), *radius, transformed).map(|contact| Contact {
                normal: -contact.normal,
                depth: contact.depth,
            })
        }
        (Shape::Circle { radius }, Shape::Box { transformed, .. }) => {
            intersect_polygon_circle(b0.position(), *radius, transformed)
        }
        (Shape::Circle { radius: r0 }, Shape::Circle { radius: r1 }) => {
            intersect_circles(b0.position(), *r0, b1.position(), *r1)
        }
    }
}

/// Separating-axis test between two convex polygons.
///
/// Scans the edge normals of both polygons; any axis with disjoint
/// projections proves separation. Otherwise the axis of minimum overlap
/// becomes the contact normal, oriented from `vertices_a`'s centroid toward
/// `vertices_b`'s.
pub fn intersect_polygons(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> Option<Contact> {
    let mut normal = Vec2::ZERO;
    let mut depth = f32::MAX;

    for vertices in [vertices_a, vertices_b] {
        for i in 0..vertices.len() {
            let edge = vertices[(i + 1) % vertices.len()] - vertices[i];
            let axis = edge.normalize().perp();

            let (min_a, max_a) = math::project_vertices(vertices_a, axis);
            let (min_b, max_b) = math::project_vertices(vertices_b, axis);

            if min_a > max_b || min_b > max_a {
                return None;
            }

            let axis_depth = (max_a - min_b).min(max_b - min_a);
            if axis_depth < depth {
                depth = axis_depth;
                normal = axis;
            }
        }
    }

    let direction = polygon_center(vertices_b) - polygon_center(vertices_a);
    if direction.dot(normal) < 0.0 {
        normal = -normal;
    }

    Some(Contact { normal, depth })
}

/// Separating-axis test between a circle and a convex polygon.
///
/// The polygon's edge normals alone miss separations near a corner, since
/// the circle has no edges to contribute; the direction from the circle's
/// center to the polygon's closest vertex supplies the missing axis. The
/// normal is oriented from the circle's center toward the polygon's
/// centroid.
pub fn intersect_polygon_circle(
    center: Vec2,
    radius: f32,
    vertices: &[Vec2],
) -> Option<Contact> {
    let mut normal = Vec2::ZERO;
    let mut depth = f32::MAX;

    for i in 0..vertices.len() {
        let edge = vertices[(i + 1) % vertices.len()] - vertices[i];
        let axis = edge.normalize().perp();

        let (min_p, max_p) = math::project_vertices(vertices, axis);
        let (min_c, max_c) = math::project_circle(center, radius, axis);

        if min_p >= max_c || min_c >= max_p {
            return None;
        }

        let axis_depth = (max_p - min_c).min(max_c - min_p);
        if axis_depth < depth {
            depth = axis_depth;
            normal = axis;
        }
    }

    let closest = vertices[closest_vertex_to(center, vertices)];
    let axis = (closest - center).normalize();

    let (min_p, max_p) = math::project_vertices(vertices, axis);
    let (min_c, max_c) = math::project_circle(center, radius, axis);

    if min_p > max_c || min_c > max_p {
        return None;
    }

    let axis_depth = (max_p - min_c).min(max_c - min_p);
    if axis_depth < depth {
        depth = axis_depth;
        normal = axis;
    }

    let direction = polygon_center(vertices) - center;
    if direction.dot(normal) < 0.0 {
        normal = -normal;
    }

    Some(Contact { normal, depth })
}

/// Overlap test between two circles. Tangency is exclusive: circles whose
/// surfaces exactly touch do not collide.
pub fn intersect_circles(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> Option<Contact> {
    let distance = center_a.distance(center_b);
    let radii = radius_a + radius_b;

    if distance >= radii {
        return None;
    }

    Some(Contact {
        normal: (center_b - center_a).normalize(),
        depth: radii - distance,
    })
}

/// Index of the vertex closest to `point`, by squared distance.
pub fn closest_vertex_to(point: Vec2, vertices: &[Vec2]) -> usize {
    debug_assert!(!vertices.is_empty());

    let mut index = 0;
    let mut best = f32::MAX;

    for (i, vertex) in vertices.iter().enumerate() {
        let distance = vertex.distance_squared(point);
        if distance < best {
            best = distance;
            index = i;
        }
    }

    index
}

/// Signed polygon area via the shoelace formula. Positive when the winding
/// matches the box vertex order.
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    let mut sum = 0.0;

    for i in 0..vertices.len() {
        let p0 = vertices[i];
        let p1 = vertices[(i + 1) % vertices.len()];
        sum += p0.x * p1.y - p1.x * p0.y;
    }

    0.5 * sum
}

/// Polygon centroid: cross-term weighted vertex sums divided by six times
/// the signed area. A zero-area polygon has no shoelace centroid; the
/// vertex mean is returned instead.
pub fn polygon_center(vertices: &[Vec2]) -> Vec2 {
    let area = polygon_area(vertices);
    if area == 0.0 {
        let mut sum = Vec2::ZERO;
        for vertex in vertices {
            sum += *vertex;
        }
        return sum * (1.0 / vertices.len() as f32);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..vertices.len() {
        let p0 = vertices[i];
        let p1 = vertices[(i + 1) % vertices.len()];
        let cross = p0.x * p1.y - p1.x * p0.y;
        cx += (p0.x + p1.x) * cross;
        cy += (p0.y + p1.y) * cross;
    }

    let scale = 1.0 / (6.0 * area);
    Vec2::new(cx * scale, cy * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use approx::assert_relative_eq;

    fn boxed(position: Vec2) -> Body {
        Body::new_box(position, 10.0, 10.0, 1.0, 0.5, 0.0, false).unwrap()
    }

    fn circle(center: Vec2, radius: f32) -> Body {
        Body::new_circle(center, radius, 1.0, 0.5, 0.0, false).unwrap()
    }

    #[test]
    fn tangent_circles_do_not_collide() {
        let contact = intersect_circles(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0);
        assert!(contact.is_none());
    }

    #[test]
    fn overlapping_circles_report_depth_along_center_line() {
        let contact = intersect_circles(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0).unwrap();
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(contact.depth, 2.0);
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = boxed(Vec2::new(0.0, 0.0));
        let b = boxed(Vec2::new(25.0, 0.0));
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn overlapping_boxes_report_minimum_overlap() {
        let a = boxed(Vec2::new(0.0, 0.0));
        let b = boxed(Vec2::new(8.0, 1.0));
        let contact = collide(&a, &b).unwrap();

        // x overlap (2) is smaller than y overlap (9)
        assert_relative_eq!(contact.depth, 2.0, epsilon = 1e-5);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(contact.normal.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn sat_is_symmetric_for_boxes() {
        let a = boxed(Vec2::new(0.0, 0.0));
        let b = boxed(Vec2::new(7.0, 3.0));

        let ab = collide(&a, &b).unwrap();
        let ba = collide(&b, &a).unwrap();

        assert_relative_eq!(ab.depth, ba.depth, epsilon = 1e-5);
        assert_relative_eq!(ab.normal.x, -ba.normal.x, epsilon = 1e-5);
        assert_relative_eq!(ab.normal.y, -ba.normal.y, epsilon = 1e-5);
    }

    #[test]
    fn sat_is_symmetric_for_box_and_circle() {
        let a = boxed(Vec2::new(0.0, 0.0));
        let b = circle(Vec2::new(8.0, 0.0), 4.0);

        let ab = collide(&a, &b).unwrap();
        let ba = collide(&b, &a).unwrap();

        assert_relative_eq!(ab.depth, ba.depth, epsilon = 1e-5);
        assert_relative_eq!(ab.normal.x, -ba.normal.x, epsilon = 1e-5);
        assert_relative_eq!(ab.normal.y, -ba.normal.y, epsilon = 1e-5);

        // normal points from the box toward the circle
        assert!(ab.normal.x > 0.0);
    }

    #[test]
    fn circle_near_box_corner_uses_closest_vertex_axis() {
        // diagonally off the (5, 5) corner, close enough to overlap
        let b = circle(Vec2::new(8.0, 8.0), 5.0);
        let a = boxed(Vec2::new(0.0, 0.0));
        let contact = collide(&a, &b).unwrap();

        assert!(contact.depth > 0.0);
        // separation axis runs along the corner-to-center diagonal
        assert_relative_eq!(contact.normal.x, contact.normal.y, epsilon = 1e-5);
    }

    #[test]
    fn circle_clearly_outside_corner_does_not_collide() {
        // the corner axis is what rules this overlap of projections out
        let a = boxed(Vec2::new(0.0, 0.0));
        let b = circle(Vec2::new(9.5, 9.5), 5.0);
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn unit_square_area_and_centroid() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_relative_eq!(polygon_area(&square), 1.0);
        let center = polygon_center(&square);
        assert_relative_eq!(center.x, 0.5);
        assert_relative_eq!(center.y, 0.5);
    }

    #[test]
    fn degenerate_polygon_centroid_falls_back_to_vertex_mean() {
        let collapsed = [Vec2::new(2.0, 3.0); 4];
        assert_eq!(polygon_area(&collapsed), 0.0);
        assert_eq!(polygon_center(&collapsed), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn closest_vertex_minimizes_squared_distance() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(closest_vertex_to(Vec2::new(9.0, 8.0), &square), 2);
        assert_eq!(closest_vertex_to(Vec2::new(-1.0, -1.0), &square), 0);
    }
}
