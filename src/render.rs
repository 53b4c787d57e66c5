use std::collections::BTreeSet;

use crate::errors::CommandError;
use crate::identify::IdentifierRules;
use crate::layers::GeometryContainer;
use crate::layers::Layer;
use crate::markers::Marker;
use crate::markers::marker_position;
use crate::plans::LayerPlan;
use crate::plans::LayerRole;
use crate::plans::RenderPlan;
use crate::progress::ProgressObserver;
use crate::progress::WatchableIterator;
use crate::projection::Transform;

#[derive(Clone,Debug,PartialEq,Eq)]
pub(crate) struct Outline {
    pub(crate) id: Option<String>,
    pub(crate) path: String
}

/// One drawing instruction. Identifiers may repeat across primitives, and some primitives have none.
#[derive(Clone,Copy,Debug,PartialEq)]
pub(crate) enum Primitive<'rendering> {
    Outline(&'rendering Outline),
    Marker(&'rendering Marker)
}

impl<'rendering> Primitive<'rendering> {

    pub(crate) fn id(&self) -> Option<&'rendering str> {
        match self {
            Self::Outline(outline) => outline.id.as_deref(),
            Self::Marker(marker) => marker.id.as_deref(),
        }
    }
}

/// Everything drawn for one entry in the plan. Outlines come first, followed by any markers drawn for city features.
#[derive(Clone,Debug,PartialEq)]
pub(crate) struct LayerPass {
    pub(crate) layer: String,
    pub(crate) role: LayerRole,
    pub(crate) outlines: Vec<Outline>,
    pub(crate) markers: Vec<Marker>
}

impl LayerPass {

    fn new(plan: &LayerPlan) -> Self {
        Self {
            layer: plan.layer.clone(),
            role: plan.role,
            outlines: Vec::new(),
            markers: Vec::new()
        }
    }

    pub(crate) fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> {
        self.outlines.iter().map(Primitive::Outline).chain(self.markers.iter().map(Primitive::Marker))
    }
}

#[derive(Clone,Debug,Default,PartialEq)]
pub(crate) struct Rendering {
    pub(crate) passes: Vec<LayerPass>
}

impl Rendering {

    /// All primitives in drawing order.
    #[cfg(test)]
    pub(crate) fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> {
        self.passes.iter().flat_map(LayerPass::primitives)
    }

}

struct Renderer<'plan> {
    plan: &'plan RenderPlan,
    rules: IdentifierRules,
    transform: &'plan Transform,
    precision: Option<usize>,
    // cities which a marker layer will draw, so boundary layers mustn't draw them again
    marked_cities: BTreeSet<String>
}

impl<'plan> Renderer<'plan> {

    fn new(plan: &'plan RenderPlan, transform: &'plan Transform, precision: Option<usize>) -> Self {
        Self {
            plan,
            rules: IdentifierRules::default().with_rules(&plan.identifier_rules),
            transform,
            precision,
            marked_cities: BTreeSet::new()
        }
    }

    fn collect_marked_cities(&mut self, container: &GeometryContainer) -> Result<(),CommandError> {
        for layer_plan in self.plan.layers.iter().filter(|layer_plan| layer_plan.role == LayerRole::CityMarker) {
            let layer = container.layer(&layer_plan.layer)?;
            for feature in layer.features().iter().filter(|feature| feature.geometry.is_some()) {
                let resolved = self.rules.identify(layer.name(), feature);
                if layer_plan.filter.accepts(resolved.as_deref()) && !self.plan.is_excluded_capital(resolved.as_deref()) {
                    if let Some(id) = layer_plan.fixed_id.clone().or(resolved) {
                        _ = self.marked_cities.insert(id);
                    }
                }
            }
        }
        Ok(())
    }

    fn render_layer<Progress: ProgressObserver>(&self, layer_plan: &LayerPlan, layer: &Layer, progress: &mut Progress) -> LayerPass {

        let mut pass = LayerPass::new(layer_plan);
        let mut warnings = Vec::new();

        for (index,feature) in layer.features().iter().enumerate().watch(progress, format!("Drawing layer {}.",layer.name()), format!("Layer {} drawn.",layer.name())) {

            let resolved = self.rules.identify(layer.name(), feature);
            if !layer_plan.filter.accepts(resolved.as_deref()) {
                continue;
            }

            let Some(geometry) = &feature.geometry else {
                warnings.push(format!("Feature {index} in layer '{}' has no geometry and was skipped.",layer.name()));
                continue;
            };

            let is_city = self.plan.is_city(resolved.as_deref());
            let is_excluded_capital = self.plan.is_excluded_capital(resolved.as_deref());
            let id = layer_plan.fixed_id.clone().or(resolved);
            if id.is_none() {
                warnings.push(format!("Feature {index} in layer '{}' has no identifier, it will be drawn without one.",layer.name()));
            }

            match layer_plan.role {
                LayerRole::RegionOutline => pass.outlines.push(Outline {
                    id,
                    path: self.transform.path(geometry, self.precision)
                }),
                LayerRole::Boundary => if is_city {
                    let already_marked = id.as_ref().is_some_and(|id| self.marked_cities.contains(id));
                    if self.plan.city_markers_at_centroids && !already_marked && !is_excluded_capital {
                        if let Some(center) = marker_position(self.transform, geometry) {
                            pass.markers.push(Marker::new(id, center))
                        } else {
                            warnings.push(format!("Feature {index} in layer '{}' has no centroid, its marker was skipped.",layer.name()));
                        }
                    }
                } else {
                    pass.outlines.push(Outline {
                        id,
                        path: self.transform.path(geometry, self.precision)
                    })
                },
                LayerRole::CityMarker => if !is_excluded_capital {
                    if let Some(center) = marker_position(self.transform, geometry) {
                        pass.markers.push(Marker::new(id, center))
                    } else {
                        warnings.push(format!("Feature {index} in layer '{}' has no position, its marker was skipped.",layer.name()));
                    }
                }
            }

        }

        for warning in warnings {
            progress.warning(|| warning)
        }

        pass

    }

}

// repeated identifiers are still drawn, but they make for ambiguous ids in the document
fn warn_repeated_ids<Progress: ProgressObserver>(rendering: &Rendering, progress: &mut Progress) {
    let mut drawn = BTreeSet::new();
    for pass in &rendering.passes {
        for id in pass.primitives().filter_map(|primitive| primitive.id()) {
            if !drawn.insert(id) {
                progress.warning(|| format!("'{id}' in layer '{}' has already been drawn.",pass.layer))
            }
        }
    }
}

/**
Draws the layers named by the plan, in plan order, with every feature projected by the same transform. Every layer is checked before anything is drawn, so a missing layer fails the whole rendering.
*/
pub(crate) fn render<Progress: ProgressObserver>(container: &GeometryContainer, plan: &RenderPlan, transform: &Transform, precision: Option<usize>, progress: &mut Progress) -> Result<Rendering,CommandError> {

    let layers = plan.layers.iter().map(|layer_plan| Ok((layer_plan,container.layer(&layer_plan.layer)?))).collect::<Result<Vec<_>,CommandError>>()?;

    let mut renderer = Renderer::new(plan, transform, precision);
    renderer.collect_marked_cities(container)?;

    let mut rendering = Rendering::default();
    for (layer_plan,layer) in layers {
        rendering.passes.push(renderer.render_layer(layer_plan, layer, progress));
    }

    warn_repeated_ids(&rendering, progress);

    Ok(rendering)

}

#[cfg(test)]
mod test {

    use geo_types::Geometry;
    use geo_types::point;
    use geo_types::polygon;
    use serde_json::json;

    use super::Primitive;
    use super::render;
    use crate::errors::CommandError;
    use crate::layers::Feature;
    use crate::layers::GeometryContainer;
    use crate::layers::Layer;
    use crate::plans::LayerPlan;
    use crate::plans::LayerRole;
    use crate::plans::RenderPlan;
    use crate::projection::Canvas;
    use crate::projection::Transform;

    fn square(x: f64, y: f64) -> Geometry<f64> {
        polygon![(x: x, y: y), (x: x + 10.0, y: y), (x: x + 10.0, y: y + 10.0), (x: x, y: y + 10.0)].into()
    }

    fn feature(geometry: Geometry<f64>, properties: serde_json::Value) -> Feature {
        Feature {
            geometry: Some(geometry),
            properties: properties.as_object().cloned().unwrap_or_default()
        }
    }

    fn container() -> GeometryContainer {
        GeometryContainer::from_layers([
            Layer::new("roi".to_owned(), vec![feature(square(0.0, 0.0), json!({ "name": "IE" }))]),
            Layer::new("pub_las".to_owned(), vec![
                feature(square(20.0, 0.0), json!({ "local_auth": "Kent" })),
                feature(square(30.0, 0.0), json!({ "local_auth": "Glasgow City" })),
                feature(square(40.0, 0.0), json!({ "other": "no id" })),
            ]),
            Layer::new("gb_cities".to_owned(), vec![
                feature(point!(x: 35.0, y: 5.0).into(), json!({ "NAME": "Glasgow City" })),
                feature(point!(x: 25.0, y: 5.0).into(), json!({ "NAME": "London" })),
            ]),
        ])
    }

    fn fit(container: &GeometryContainer, plan: &RenderPlan) -> Transform {
        Transform::fit(&container.merge_layers(&plan.layers_to_fit()).unwrap(), Canvas::default()).unwrap()
    }

    fn plan(layers: Vec<LayerPlan>, centroid_markers: bool) -> RenderPlan {
        let mut plan = RenderPlan::county_boundaries();
        plan.layers = layers;
        plan.fit_layers = Vec::new();
        plan.city_ids = vec!["Glasgow City".to_owned()];
        plan.city_markers_at_centroids = centroid_markers;
        plan
    }

    fn ids<'rendering>(primitives: impl Iterator<Item = Primitive<'rendering>>) -> Vec<Option<&'rendering str>> {
        primitives.map(|primitive| match primitive {
            Primitive::Outline(outline) => outline.id.as_deref(),
            Primitive::Marker(marker) => marker.id.as_deref(),
        }).collect()
    }

    #[test]
    fn test_city_county_becomes_centroid_marker() {
        let container = container();
        let plan = plan(vec![
            LayerPlan::new("roi", LayerRole::RegionOutline).with_fixed_id("Republic of Ireland"),
            LayerPlan::new("pub_las", LayerRole::Boundary),
        ], true);
        let rendering = render(&container, &plan, &fit(&container, &plan), None, &mut ()).unwrap();

        assert_eq!(ids(rendering.primitives()), vec![Some("Republic of Ireland"), Some("Kent"), None, Some("Glasgow City")]);
        let boundaries = &rendering.passes[1];
        assert_eq!(boundaries.outlines.len(), 2);
        assert_eq!(boundaries.markers.len(), 1);
        assert!(boundaries.outlines.iter().all(|outline| outline.id.as_deref() != Some("Glasgow City")));
    }

    #[test]
    fn test_city_drawn_once_with_city_layer() {
        let container = container();
        let plan = plan(vec![
            LayerPlan::new("pub_las", LayerRole::Boundary),
            LayerPlan::new("gb_cities", LayerRole::CityMarker),
        ], true);
        let rendering = render(&container, &plan, &fit(&container, &plan), None, &mut ()).unwrap();

        let glasgow: Vec<_> = rendering.primitives().filter(|primitive| primitive.id() == Some("Glasgow City")).collect();
        assert_eq!(glasgow.len(), 1);
        assert!(matches!(glasgow[0], Primitive::Marker(_)));
        assert!(rendering.passes[0].markers.is_empty());
        assert_eq!(rendering.passes[1].markers.len(), 2);
    }

    #[test]
    fn test_excluded_capital() {
        let container = container();
        let mut plan = plan(vec![LayerPlan::new("gb_cities", LayerRole::CityMarker)], false);
        plan.excluded_capital = Some("London".to_owned());
        let rendering = render(&container, &plan, &fit(&container, &plan), None, &mut ()).unwrap();
        assert_eq!(ids(rendering.primitives()), vec![Some("Glasgow City")]);
    }

    #[test]
    fn test_excluded_capital_gets_no_centroid_marker() {
        let container = GeometryContainer::from_layers([
            Layer::new("roi".to_owned(), vec![feature(square(0.0, 0.0), json!({}))]),
            Layer::new("OSNI_Open_Data_-_Largescale_Boundaries_-_County_Boundaries_".to_owned(), Vec::new()),
            Layer::new("england_wales_counties".to_owned(), Vec::new()),
            Layer::new("pub_las".to_owned(), vec![
                feature(square(20.0, 0.0), json!({ "local_auth": "Kent" })),
                feature(square(30.0, 0.0), json!({ "local_auth": "City of Edinburgh" })),
                feature(square(40.0, 0.0), json!({ "local_auth": "Glasgow City" })),
            ]),
        ]);
        let mut plan = RenderPlan::counties();
        plan.excluded_capital = Some("City of Edinburgh".to_owned());
        let rendering = render(&container, &plan, &fit(&container, &plan), None, &mut ()).unwrap();
        assert_eq!(ids(rendering.primitives()), vec![Some("Republic of Ireland"), Some("Kent"), Some("Glasgow City")]);
        assert!(rendering.primitives().all(|primitive| primitive.id() != Some("City of Edinburgh")));
    }

    #[test]
    fn test_marker_at_point() {
        let container = container();
        let plan = plan(vec![
            LayerPlan::new("pub_las", LayerRole::Boundary),
            LayerPlan::new("gb_cities", LayerRole::CityMarker),
        ], false);
        let transform = fit(&container, &plan);
        let rendering = render(&container, &plan, &transform, None, &mut ()).unwrap();
        let glasgow = &rendering.passes[1].markers[0];
        let expected = transform.project_point(point!(x: 35.0, y: 5.0));
        assert_eq!(glasgow.circles[0].center, expected);
        assert_eq!(glasgow.circles[1].center, expected);
    }

    #[test]
    fn test_missing_layer_is_fatal() {
        let container = container();
        let plan = plan(vec![
            LayerPlan::new("roi", LayerRole::RegionOutline),
            LayerPlan::new("ni_cities", LayerRole::CityMarker),
        ], false);
        let transform = Transform::fit(&container.merge_layers(&["roi"]).unwrap(), Canvas::default()).unwrap();
        assert!(matches!(render(&container, &plan, &transform, None, &mut ()), Err(CommandError::LayerNotFound(name)) if name == "ni_cities"));
    }

    #[test]
    fn test_features_without_geometry_are_skipped() {
        let container = GeometryContainer::from_layers([
            Layer::new("england_wales_counties".to_owned(), vec![
                feature(square(0.0, 0.0), json!({ "NAME": "Kent" })),
                Feature::default(),
            ]),
        ]);
        let plan = plan(vec![LayerPlan::new("england_wales_counties", LayerRole::Boundary)], false);
        let rendering = render(&container, &plan, &fit(&container, &plan), None, &mut ()).unwrap();
        assert_eq!(ids(rendering.primitives()), vec![Some("Kent")]);
    }
}
