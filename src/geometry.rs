use std::fmt::Write;

use geo::BoundingRect;
use geo_types::Coord;
use geo_types::Geometry;
use geo_types::GeometryCollection;
use geo_types::LineString;
use geo_types::Polygon;

use crate::utils::extent::Extent;
use crate::utils::format_number;

/// The radius the path generator uses when a point geometry is drawn as a path.
pub(crate) const POINT_PATH_RADIUS: f64 = 4.5;

/**
The union of several layers, used only to find the extent that the canvas has to show. It carries no identifiers or properties, so it can't be rendered.
*/
#[derive(Clone,Debug,Default)]
pub(crate) struct MergedShape {
    geometries: GeometryCollection<f64>
}

impl MergedShape {

    pub(crate) fn push(&mut self, geometry: Geometry<f64>) {
        self.geometries.0.push(geometry)
    }

    pub(crate) fn len(&self) -> usize {
        self.geometries.0.len()
    }

    pub(crate) fn extent(&self) -> Option<Extent> {
        self.geometries.bounding_rect().map(Extent::from)
    }

}

impl FromIterator<Geometry<f64>> for MergedShape {

    fn from_iter<Items: IntoIterator<Item = Geometry<f64>>>(iter: Items) -> Self {
        Self {
            geometries: GeometryCollection(iter.into_iter().collect())
        }
    }
}

struct PathWriter {
    data: String,
    precision: Option<usize>
}

impl PathWriter {

    const fn new(precision: Option<usize>) -> Self {
        Self {
            data: String::new(),
            precision
        }
    }

    fn coordinate(&mut self, command: char, coord: Coord<f64>) {
        self.data.push(command);
        self.data.push_str(&format_number(coord.x, self.precision));
        self.data.push(',');
        self.data.push_str(&format_number(coord.y, self.precision));
    }

    fn line(&mut self, line: &LineString<f64>) {
        for (i,coord) in line.0.iter().enumerate() {
            self.coordinate(if i == 0 { 'M' } else { 'L' }, *coord)
        }
    }

    fn ring(&mut self, ring: &LineString<f64>) {
        // the closing vertex repeats the first one, 'Z' takes its place.
        let count = if ring.is_closed() && ring.0.len() > 1 {
            ring.0.len() - 1
        } else {
            ring.0.len()
        };
        if count == 0 {
            return;
        }
        for (i,coord) in ring.0.iter().take(count).enumerate() {
            self.coordinate(if i == 0 { 'M' } else { 'L' }, *coord)
        }
        self.data.push('Z');
    }

    fn polygon(&mut self, polygon: &Polygon<f64>) {
        self.ring(polygon.exterior());
        for interior in polygon.interiors() {
            self.ring(interior)
        }
    }

    fn point(&mut self, coord: Coord<f64>) {
        let radius = format_number(POINT_PATH_RADIUS, self.precision);
        let diameter = format_number(POINT_PATH_RADIUS * 2.0, self.precision);
        self.coordinate('M', coord);
        // writing to a String can't fail
        _ = write!(self.data, "m0,{radius}a{radius},{radius} 0 1,1 0,-{diameter}a{radius},{radius} 0 1,1 0,{diameter}z");
    }

    fn geometry(&mut self, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(point) => self.point(point.0),
            Geometry::MultiPoint(points) => for point in points {
                self.point(point.0)
            },
            Geometry::Line(line) => {
                self.coordinate('M', line.start);
                self.coordinate('L', line.end);
            },
            Geometry::LineString(line) => self.line(line),
            Geometry::MultiLineString(lines) => for line in lines {
                self.line(line)
            },
            Geometry::Polygon(polygon) => self.polygon(polygon),
            Geometry::MultiPolygon(polygons) => for polygon in polygons {
                self.polygon(polygon)
            },
            Geometry::GeometryCollection(collection) => for member in collection {
                self.geometry(member)
            },
            Geometry::Rect(rect) => self.polygon(&rect.to_polygon()),
            Geometry::Triangle(triangle) => self.polygon(&triangle.to_polygon()),
        }
    }

}

/// Writes SVG path data for a geometry that has already been projected onto the canvas.
pub(crate) fn path_data(geometry: &Geometry<f64>, precision: Option<usize>) -> String {
    let mut writer = PathWriter::new(precision);
    writer.geometry(geometry);
    writer.data
}
