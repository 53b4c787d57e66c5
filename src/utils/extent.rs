use geo::Rect;

#[derive(Clone,Debug,PartialEq)]
pub(crate) struct Extent {
    pub(crate) height: f64,
    pub(crate) width: f64,
    pub(crate) south: f64,
    pub(crate) west: f64,
}

impl Extent {

    pub(crate) fn from_bounds(west: f64, south: f64, east: f64, north: f64) -> Self {
        let width = east - west;
        let height = north - south;
        Self { 
            height, 
            width, 
            south, 
            west 
        }
    }

    pub(crate) fn east(&self) -> f64 {
        self.west + self.width
    }

    pub(crate) fn north(&self) -> f64 {
        self.south + self.height
    }

}

impl From<Rect<f64>> for Extent {

    fn from(value: Rect<f64>) -> Self {
        Self::from_bounds(value.min().x, value.min().y, value.max().x, value.max().y)
    }
}
