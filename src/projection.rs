use geo::Centroid;
use geo::MapCoords;
use geo_types::Coord;
use geo_types::Geometry;
use geo_types::Point;
use ordered_float::NotNan;

use crate::errors::CommandError;
use crate::geometry::MergedShape;
use crate::geometry::path_data;

/// The fixed logical canvas that maps are drawn on.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub(crate) struct Canvas {
    pub(crate) width: u32,
    pub(crate) height: u32
}

impl Canvas {

    pub(crate) const DEFAULT_WIDTH: u32 = 500;
    pub(crate) const DEFAULT_HEIGHT: u32 = 700;

}

impl Default for Canvas {

    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT
        }
    }
}

/**
Maps pre-projected source coordinates onto the canvas. The vertical axis is reflected, since the source data has north at larger y values while the canvas origin is the top left corner, and then everything is scaled uniformly and translated so the fitted shape touches the canvas edges.
*/
#[derive(Clone,Copy,Debug,PartialEq)]
pub(crate) struct Transform {
    scale: f64,
    translate_x: f64,
    translate_y: f64
}

impl Transform {

    pub(crate) fn fit(shape: &MergedShape, canvas: Canvas) -> Result<Self,CommandError> {

        let extent = shape.extent().ok_or(CommandError::EmptyExtent)?;

        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);

        // an axis with no span places no constraint on the scale, but one of them has to have a span
        let scale = match (extent.width > 0.0, extent.height > 0.0) {
            (true, true) => (width / extent.width).min(height / extent.height),
            (true, false) => width / extent.width,
            (false, true) => height / extent.height,
            (false, false) => return Err(CommandError::EmptyExtent)
        };
        let scale = NotNan::new(scale)?.into_inner();

        let translate_x = NotNan::new((width - scale * (extent.west + extent.east())) / 2.0)?.into_inner();
        let translate_y = NotNan::new((height + scale * (extent.south + extent.north())) / 2.0)?.into_inner();

        Ok(Self {
            scale,
            translate_x,
            translate_y
        })

    }

    #[cfg(test)]
    pub(crate) const fn scale(&self) -> f64 {
        self.scale
    }

    pub(crate) fn project_coord(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.scale * coord.x + self.translate_x,
            y: -self.scale * coord.y + self.translate_y
        }
    }

    pub(crate) fn project_point(&self, point: Point<f64>) -> Point<f64> {
        Point(self.project_coord(point.0))
    }

    pub(crate) fn project<Geom: MapCoords<f64,f64>>(&self, geometry: &Geom) -> Geom::Output {
        geometry.map_coords(|coord| self.project_coord(coord))
    }

    /// The SVG path description of the geometry on the canvas.
    pub(crate) fn path(&self, geometry: &Geometry<f64>, precision: Option<usize>) -> String {
        path_data(&self.project(geometry), precision)
    }

    /// The area-weighted center of the geometry on the canvas.
    pub(crate) fn centroid(&self, geometry: &Geometry<f64>) -> Option<Point<f64>> {
        self.project(geometry).centroid()
    }

}
