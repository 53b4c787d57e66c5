use geo_types::Coord;
use geo_types::Geometry;
use geo_types::GeometryCollection;
use geo_types::LineString;
use geo_types::MultiLineString;
use geo_types::MultiPoint;
use geo_types::MultiPolygon;
use geo_types::Point;
use geo_types::Polygon;
use geojson::FeatureCollection;
use geojson::GeoJson;
use geojson::JsonObject;
use geojson::Value;
use indexmap::IndexMap;
use topojson::TopoJson;
use topojson::Topology;

use crate::errors::CommandError;
use crate::geometry::MergedShape;

/// One geographic entity. Features are never changed once they are loaded.
#[derive(Clone,Debug,Default)]
pub(crate) struct Feature {
    pub(crate) geometry: Option<Geometry<f64>>,
    pub(crate) properties: JsonObject
}

impl Feature {

    pub(crate) fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

}

impl TryFrom<geojson::Feature> for Feature {

    type Error = CommandError;

    fn try_from(value: geojson::Feature) -> Result<Self,Self::Error> {
        let geometry = match value.geometry {
            Some(geometry) => Some(convert_value(geometry.value)?),
            None => None
        };
        Ok(Self {
            geometry,
            properties: value.properties.unwrap_or_default()
        })
    }
}

fn convert_position(position: &[f64]) -> Result<Coord<f64>,CommandError> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(CommandError::MalformedInput(format!("a position needs at least two values, found {}",position.len())))
    }
}

fn convert_line(positions: &[Vec<f64>]) -> Result<LineString<f64>,CommandError> {
    Ok(LineString::new(positions.iter().map(|position| convert_position(position)).collect::<Result<Vec<_>,_>>()?))
}

fn convert_polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>,CommandError> {
    let mut rings = rings.iter().map(|ring| convert_line(ring));
    let exterior = match rings.next() {
        Some(exterior) => exterior?,
        None => LineString::new(Vec::new())
    };
    let interiors = rings.collect::<Result<Vec<_>,_>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn convert_value(value: Value) -> Result<Geometry<f64>,CommandError> {
    Ok(match value {
        Value::Point(position) => Point(convert_position(&position)?).into(),
        Value::MultiPoint(positions) => MultiPoint::new(positions.iter().map(|position| convert_position(position).map(Point)).collect::<Result<Vec<_>,_>>()?).into(),
        Value::LineString(positions) => convert_line(&positions)?.into(),
        Value::MultiLineString(lines) => MultiLineString::new(lines.iter().map(|line| convert_line(line)).collect::<Result<Vec<_>,_>>()?).into(),
        Value::Polygon(rings) => convert_polygon(&rings)?.into(),
        Value::MultiPolygon(polygons) => MultiPolygon::new(polygons.iter().map(|rings| convert_polygon(rings)).collect::<Result<Vec<_>,_>>()?).into(),
        Value::GeometryCollection(members) => Geometry::GeometryCollection(GeometryCollection(members.into_iter().map(|member| convert_value(member.value)).collect::<Result<Vec<_>,_>>()?)),
    })
}

/// An ordered collection of features that share a convention for their properties.
#[derive(Clone,Debug)]
pub(crate) struct Layer {
    name: String,
    features: Vec<Feature>
}

impl Layer {

    pub(crate) fn new(name: String, features: Vec<Feature>) -> Self {
        Self {
            name,
            features
        }
    }

    pub(crate) fn from_feature_collection(name: String, collection: FeatureCollection) -> Result<Self,CommandError> {
        let features = collection.features.into_iter().map(Feature::try_from).collect::<Result<Vec<_>,_>>()?;
        Ok(Self::new(name, features))
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn features(&self) -> &[Feature] {
        &self.features
    }

    pub(crate) fn len(&self) -> usize {
        self.features.len()
    }

}

/**
The layers of one input document, all in the same pre-projected coordinate space. A TopoJSON topology contributes one layer per named object. A GeoJSON feature collection is a single layer, and has to be given its name by the caller.
*/
#[derive(Clone,Debug,Default)]
pub(crate) struct GeometryContainer {
    layers: IndexMap<String,Layer>
}

impl GeometryContainer {

    pub(crate) fn load(source: &str, geojson_layer: &str) -> Result<Self,CommandError> {

        let document: serde_json::Value = serde_json::from_str(source).map_err(|e| CommandError::MalformedInput(format!("{e}")))?;

        let is_topology = document.get("type").and_then(serde_json::Value::as_str) == Some("Topology");

        if is_topology {
            match source.parse::<TopoJson>()? {
                TopoJson::Topology(topology) => Self::from_topology(&topology),
                TopoJson::Geometry(_) => Err(CommandError::MalformedInput("expected a TopoJSON topology".to_owned()))
            }
        } else {
            match source.parse::<GeoJson>()? {
                GeoJson::FeatureCollection(collection) => Ok(Self::from_layers([Layer::from_feature_collection(geojson_layer.to_owned(), collection)?])),
                GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(CommandError::MalformedInput("expected a TopoJSON topology or a GeoJSON FeatureCollection".to_owned()))
            }
        }

    }

    pub(crate) fn from_topology(topology: &Topology) -> Result<Self,CommandError> {
        let mut layers = Vec::new();
        for object in &topology.objects {
            let collection = topojson::to_geojson(topology, &object.name)?;
            layers.push(Layer::from_feature_collection(object.name.clone(), collection)?);
        }
        Ok(Self::from_layers(layers))
    }

    pub(crate) fn from_layers<Layers: IntoIterator<Item = Layer>>(layers: Layers) -> Self {
        Self {
            layers: layers.into_iter().map(|layer| (layer.name.clone(),layer)).collect()
        }
    }

    pub(crate) fn layer(&self, name: &str) -> Result<&Layer,CommandError> {
        self.layers.get(name).ok_or_else(|| CommandError::LayerNotFound(name.to_owned()))
    }

    pub(crate) fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Collects the geometries of the named layers, in order, into one shape for extent fitting.
    pub(crate) fn merge_layers<Name: AsRef<str>>(&self, names: &[Name]) -> Result<MergedShape,CommandError> {
        let mut shape = MergedShape::default();
        for name in names {
            let layer = self.layer(name.as_ref())?;
            for geometry in layer.features().iter().filter_map(|feature| feature.geometry.clone()) {
                shape.push(geometry)
            }
        }
        Ok(shape)
    }

}
