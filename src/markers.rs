use geo_types::Geometry;
use geo_types::Point;

use crate::projection::Transform;

pub(crate) const SOLID_RADIUS: f64 = 5.0;
pub(crate) const RING_RADIUS: f64 = 3.0;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub(crate) enum CircleStyle {
    Solid,
    Ring
}

#[derive(Clone,Copy,Debug,PartialEq)]
pub(crate) struct Circle {
    pub(crate) center: Point<f64>,
    pub(crate) radius: f64,
    pub(crate) style: CircleStyle
}

/// A bullseye: a solid circle with a smaller hollow ring drawn over it.
pub(crate) fn draw_marker(center: Point<f64>) -> [Circle; 2] {
    [
        Circle {
            center,
            radius: SOLID_RADIUS,
            style: CircleStyle::Solid
        },
        Circle {
            center,
            radius: RING_RADIUS,
            style: CircleStyle::Ring
        }
    ]
}

/// Where on the canvas a feature's marker belongs: a point feature's own position, otherwise the centroid of its shape.
pub(crate) fn marker_position(transform: &Transform, geometry: &Geometry<f64>) -> Option<Point<f64>> {
    match geometry {
        Geometry::Point(point) => Some(transform.project_point(*point)),
        _ => transform.centroid(geometry)
    }
}

#[derive(Clone,Debug,PartialEq)]
pub(crate) struct Marker {
    pub(crate) id: Option<String>,
    pub(crate) circles: [Circle; 2]
}

impl Marker {

    pub(crate) fn new(id: Option<String>, center: Point<f64>) -> Self {
        Self {
            id,
            circles: draw_marker(center)
        }
    }

}

#[cfg(test)]
mod test {

    use geo_types::Geometry;
    use geo_types::point;
    use geo_types::polygon;

    use super::CircleStyle;
    use super::draw_marker;
    use super::marker_position;
    use crate::geometry::MergedShape;
    use crate::projection::Canvas;
    use crate::projection::Transform;

    #[test]
    fn test_marker_composition() {
        let center = point!(x: 12.5, y: 40.0);
        let [solid, ring] = draw_marker(center);
        assert_eq!(solid.center, center);
        assert_eq!(ring.center, center);
        assert_eq!(solid.style, CircleStyle::Solid);
        assert_eq!(ring.style, CircleStyle::Ring);
        assert!(solid.radius > ring.radius);
        assert!((solid.radius - 5.0).abs() < f64::EPSILON);
        assert!((ring.radius - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_marker_position() {
        let square: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)].into();
        let shape: MergedShape = [square.clone()].into_iter().collect();
        let transform = Transform::fit(&shape, Canvas { width: 100, height: 100 }).unwrap();

        let centroid = marker_position(&transform, &square).unwrap();
        assert!((centroid.x() - 50.0).abs() < 1e-9);
        assert!((centroid.y() - 50.0).abs() < 1e-9);

        let corner = marker_position(&transform, &point!(x: 0.0, y: 10.0).into()).unwrap();
        assert!(corner.x().abs() < 1e-9);
        assert!(corner.y().abs() < 1e-9);
    }
}
