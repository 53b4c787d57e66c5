use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::CommandError;
use crate::identify::IdentifierRule;

pub(crate) const ROI_LAYER: &str = "roi";
pub(crate) const NI_COUNTIES_LAYER: &str = "OSNI_Open_Data_-_Largescale_Boundaries_-_County_Boundaries_";
pub(crate) const ENGLAND_WALES_COUNTIES_LAYER: &str = "england_wales_counties";
pub(crate) const LOCAL_AUTHORITIES_LAYER: &str = "pub_las";
pub(crate) const NI_CITIES_LAYER: &str = "ni_cities";
pub(crate) const GB_CITIES_LAYER: &str = "gb_cities";
pub(crate) const NUTS_REGIONS_LAYER: &str = "NUTS_RG_03M_2021_3035";

pub(crate) const COUNTY_LAYERS: [&str; 3] = [NI_COUNTIES_LAYER, ENGLAND_WALES_COUNTIES_LAYER, LOCAL_AUTHORITIES_LAYER];
pub(crate) const CITY_LAYERS: [&str; 2] = [NI_CITIES_LAYER, GB_CITIES_LAYER];

/// Counties and local authorities which are really cities, and get a city marker instead of a boundary.
pub(crate) const CITY_COUNTY_IDS: [&str; 6] = [
    "Bristol",
    "City and County of the City of London",
    "Dundee City",
    "Aberdeen City",
    "City of Edinburgh",
    "Glasgow City",
];

pub(crate) const ROI_ID: &str = "Republic of Ireland";
pub(crate) const IRELAND_REGION_ID: &str = "Ireland";

pub(crate) const COUNTIES_GROUP: &str = "counties";
pub(crate) const REGIONS_GROUP: &str = "regions";
pub(crate) const CITIES_GROUP: &str = "cities";

pub(crate) const COUNTIES_PLAN: &str = "counties";
pub(crate) const COUNTY_BOUNDARIES_PLAN: &str = "county-boundaries";
pub(crate) const CITIES_PLAN: &str = "cities";
pub(crate) const REGIONS_PLAN: &str = "regions";

pub(crate) const BUILTIN_PLANS: [&str; 4] = [COUNTIES_PLAN, COUNTY_BOUNDARIES_PLAN, CITIES_PLAN, REGIONS_PLAN];

/// How the features of a layer are drawn.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize,JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LayerRole {
    /// Filled boundary paths, placed in the boundary group.
    Boundary,
    /// Bullseye markers, placed in the marker group.
    CityMarker,
    /// Dashed, unfilled outline paths, placed directly in the document.
    RegionOutline,
}

/// Chooses features by their resolved identifier.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize,JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FeatureFilter {
    #[default]
    All,
    /// Only features with one of these identifiers.
    Only(Vec<String>),
    /// All features except those with one of these identifiers. Features without an identifier are kept.
    Except(Vec<String>),
}

impl FeatureFilter {

    pub(crate) fn accepts(&self, id: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => id.is_some_and(|id| ids.iter().any(|item| item == id)),
            Self::Except(ids) => !id.is_some_and(|id| ids.iter().any(|item| item == id)),
        }
    }
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize,JsonSchema)]
pub(crate) struct LayerPlan {
    /// Name of the layer in the input document
    pub(crate) layer: String,
    pub(crate) role: LayerRole,
    #[serde(default)]
    pub(crate) filter: FeatureFilter,
    /// If set, every drawn feature gets this identifier instead of its own
    #[serde(default)]
    pub(crate) fixed_id: Option<String>,
}

impl LayerPlan {

    pub(crate) fn new(layer: &str, role: LayerRole) -> Self {
        Self {
            layer: layer.to_owned(),
            role,
            filter: FeatureFilter::All,
            fixed_id: None
        }
    }

    #[must_use]
    pub(crate) fn filtered(mut self, filter: FeatureFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub(crate) fn with_fixed_id(mut self, id: &str) -> Self {
        self.fixed_id = Some(id.to_owned());
        self
    }
}

fn default_boundary_group() -> String {
    COUNTIES_GROUP.to_owned()
}

fn default_marker_group() -> String {
    CITIES_GROUP.to_owned()
}

/**
Describes one map: which layers are fitted to the canvas, which are drawn and how, and the rules for features that would otherwise be drawn twice. Plans can be written as JSON files, see the `show-plan` command for examples.
*/
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize,JsonSchema)]
pub(crate) struct RenderPlan {
    /// Layers whose combined extent is fitted to the canvas. If empty, every layer drawn by the plan is used.
    #[serde(default)]
    pub(crate) fit_layers: Vec<String>,
    /// Layers in drawing order, later layers are drawn over earlier ones.
    pub(crate) layers: Vec<LayerPlan>,
    /// The id of the group holding boundary layers.
    #[serde(default = "default_boundary_group")]
    pub(crate) boundary_group: String,
    /// The id of the group holding city marker layers.
    #[serde(default = "default_marker_group")]
    pub(crate) marker_group: String,
    /// Boundary features with these identifiers are cities, and are not drawn as boundaries.
    #[serde(default)]
    pub(crate) city_ids: Vec<String>,
    /// If true, cities found in boundary layers are drawn as markers at their centroids, unless a city marker layer already draws them.
    #[serde(default)]
    pub(crate) city_markers_at_centroids: bool,
    /// A city left out of the marker layers, because it is drawn in detail elsewhere.
    #[serde(default)]
    pub(crate) excluded_capital: Option<String>,
    /// Identifier rules for layers, overriding the built-in table.
    #[serde(default)]
    pub(crate) identifier_rules: BTreeMap<String,IdentifierRule>,
}

impl RenderPlan {

    fn new(layers: Vec<LayerPlan>) -> Self {
        Self {
            fit_layers: Vec::new(),
            layers,
            boundary_group: default_boundary_group(),
            marker_group: default_marker_group(),
            city_ids: Vec::new(),
            city_markers_at_centroids: false,
            excluded_capital: None,
            identifier_rules: BTreeMap::new()
        }
    }

    pub(crate) fn builtin(name: &str) -> Result<Self,CommandError> {
        match name {
            COUNTIES_PLAN => Ok(Self::counties()),
            COUNTY_BOUNDARIES_PLAN => Ok(Self::county_boundaries()),
            CITIES_PLAN => Ok(Self::cities()),
            REGIONS_PLAN => Ok(Self::regions()),
            _ => Err(CommandError::UnknownPlan(name.to_owned()))
        }
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self,CommandError> {
        let file = File::open(path).map_err(|e| CommandError::PlanFileRead(format!("{e}")))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| CommandError::PlanFileRead(format!("{e}")))
    }

    fn county_layers() -> impl Iterator<Item = LayerPlan> {
        [LayerPlan::new(ROI_LAYER, LayerRole::RegionOutline).with_fixed_id(ROI_ID)].into_iter()
            .chain(COUNTY_LAYERS.iter().map(|layer| LayerPlan::new(layer, LayerRole::Boundary)))
    }

    /// Every county drawn as a boundary.
    pub(crate) fn county_boundaries() -> Self {
        let mut plan = Self::new(Self::county_layers().collect());
        plan.fit_layers = [ROI_LAYER].iter().chain(COUNTY_LAYERS.iter()).map(|layer| (*layer).to_owned()).collect();
        plan
    }

    /// Counties, with the counties that are really cities drawn as markers.
    pub(crate) fn counties() -> Self {
        let mut plan = Self::county_boundaries();
        plan.city_ids = CITY_COUNTY_IDS.iter().map(|id| (*id).to_owned()).collect();
        plan.city_markers_at_centroids = true;
        plan
    }

    /// Counties without the city counties, and the city layers drawn as markers.
    pub(crate) fn cities() -> Self {
        let mut plan = Self::new(Self::county_layers()
            .chain(CITY_LAYERS.iter().map(|layer| LayerPlan::new(layer, LayerRole::CityMarker)))
            .collect());
        plan.fit_layers = [ROI_LAYER].iter().chain(COUNTY_LAYERS.iter()).chain(CITY_LAYERS.iter()).map(|layer| (*layer).to_owned()).collect();
        plan.city_ids = CITY_COUNTY_IDS.iter().map(|id| (*id).to_owned()).collect();
        plan
    }

    /// NUTS regions, with Ireland as an outline.
    pub(crate) fn regions() -> Self {
        let ireland = vec![IRELAND_REGION_ID.to_owned()];
        let mut plan = Self::new(vec![
            LayerPlan::new(NUTS_REGIONS_LAYER, LayerRole::RegionOutline).filtered(FeatureFilter::Only(ireland.clone())).with_fixed_id(IRELAND_REGION_ID),
            LayerPlan::new(NUTS_REGIONS_LAYER, LayerRole::Boundary).filtered(FeatureFilter::Except(ireland)),
        ]);
        plan.fit_layers = vec![NUTS_REGIONS_LAYER.to_owned()];
        plan.boundary_group = REGIONS_GROUP.to_owned();
        plan
    }

    /// The layers to fit the canvas to, without repeats.
    pub(crate) fn layers_to_fit(&self) -> Vec<&str> {
        let names: Vec<&str> = if self.fit_layers.is_empty() {
            self.layers.iter().map(|layer| layer.layer.as_str()).collect()
        } else {
            self.fit_layers.iter().map(String::as_str).collect()
        };
        let mut result: Vec<&str> = Vec::new();
        for name in names {
            if !result.contains(&name) {
                result.push(name)
            }
        }
        result
    }

    /// The name of the first layer mentioned by the plan, which a GeoJSON feature collection is loaded as by default.
    pub(crate) fn first_layer(&self) -> Option<&str> {
        self.layers_to_fit().first().copied()
    }

    pub(crate) fn is_city(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| self.city_ids.iter().any(|city| city == id))
    }

    pub(crate) fn is_excluded_capital(&self, id: Option<&str>) -> bool {
        self.excluded_capital.as_deref().is_some_and(|capital| id == Some(capital))
    }

}

#[cfg(test)]
mod test {

    use super::FeatureFilter;
    use super::LayerRole;
    use super::RenderPlan;
    use super::BUILTIN_PLANS;
    use crate::errors::CommandError;

    #[test]
    fn test_builtin_plans_exist() {
        for name in BUILTIN_PLANS {
            let plan = RenderPlan::builtin(name).unwrap();
            assert!(!plan.layers.is_empty());
            assert!(!plan.layers_to_fit().is_empty());
        }
        assert!(matches!(RenderPlan::builtin("parishes"), Err(CommandError::UnknownPlan(_))));
    }

    #[test]
    fn test_plan_json_round_trip() {
        let plan = RenderPlan::cities();
        let text = serde_json::to_string_pretty(&plan).unwrap();
        let read: RenderPlan = serde_json::from_str(&text).unwrap();
        assert_eq!(plan, read);
    }

    #[test]
    fn test_minimal_plan_file() {
        let plan: RenderPlan = serde_json::from_str(r#"{
            "layers": [
                { "layer": "roi", "role": "region_outline", "fixed_id": "Republic of Ireland" },
                { "layer": "counties", "role": "boundary", "filter": { "except": ["Dublin"] } }
            ]
        }"#).unwrap();
        assert_eq!(plan.layers[0].role, LayerRole::RegionOutline);
        assert_eq!(plan.layers[1].filter, FeatureFilter::Except(vec!["Dublin".to_owned()]));
        assert_eq!(plan.boundary_group, "counties");
        assert_eq!(plan.marker_group, "cities");
        assert_eq!(plan.layers_to_fit(), vec!["roi", "counties"]);
        assert_eq!(plan.first_layer(), Some("roi"));
    }

    #[test]
    fn test_regions_fit_once() {
        assert_eq!(RenderPlan::regions().layers_to_fit(), vec!["NUTS_RG_03M_2021_3035"]);
    }

    #[test]
    fn test_filters() {
        let only = FeatureFilter::Only(vec!["Ireland".to_owned()]);
        assert!(only.accepts(Some("Ireland")));
        assert!(!only.accepts(Some("Wales")));
        assert!(!only.accepts(None));
        let except = FeatureFilter::Except(vec!["Ireland".to_owned()]);
        assert!(!except.accepts(Some("Ireland")));
        assert!(except.accepts(Some("Wales")));
        assert!(except.accepts(None));
        assert!(FeatureFilter::All.accepts(None));
    }

    #[test]
    fn test_city_and_capital_checks() {
        let mut plan = RenderPlan::counties();
        assert!(plan.is_city(Some("Glasgow City")));
        assert!(!plan.is_city(Some("Kent")));
        assert!(!plan.is_city(None));
        assert!(!plan.is_excluded_capital(Some("Belfast")));
        plan.excluded_capital = Some("Belfast".to_owned());
        assert!(plan.is_excluded_capital(Some("Belfast")));
        assert!(!plan.is_excluded_capital(None));
    }
}
