use svg::Document;
use svg::node::element::Circle as SvgCircle;
use svg::node::element::Group;
use svg::node::element::Path;

use crate::markers::Circle;
use crate::markers::CircleStyle;
use crate::markers::Marker;
use crate::plans::LayerRole;
use crate::plans::RenderPlan;
use crate::projection::Canvas;
use crate::render::LayerPass;
use crate::render::Outline;
use crate::render::Rendering;
use crate::utils::format_number;

const DISPLAY_WIDTH: &str = "65vw";
const DISPLAY_HEIGHT: &str = "65vh";
const OUTLINE_STROKE: &str = "#aaa";
const OUTLINE_DASHES: &str = "2,2";
const BOUNDARY_FILL: &str = "#aaa";
const BOUNDARY_STROKE: &str = "#777";
const RING_STROKE: &str = "#fff";

struct DocumentBuilder<'plan> {
    plan: &'plan RenderPlan,
    precision: Option<usize>,
    document: Document,
    // the groups are added to the document when they are complete, at the position of their first layer
    boundaries: Option<Group>,
    markers: Option<Group>,
    order: Vec<Section>
}

enum Section {
    Outline(Path),
    Boundaries,
    Markers
}

impl<'plan> DocumentBuilder<'plan> {

    fn new(plan: &'plan RenderPlan, canvas: Canvas, precision: Option<usize>) -> Self {
        let document = Document::new()
            .set("width", DISPLAY_WIDTH)
            .set("height", DISPLAY_HEIGHT)
            .set("viewBox", format!("0 0 {} {}",canvas.width,canvas.height))
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");
        Self {
            plan,
            precision,
            document,
            boundaries: None,
            markers: None,
            order: Vec::new()
        }
    }

    fn number(&self, value: f64) -> String {
        format_number(value, self.precision)
    }

    fn path(outline: &Outline) -> Path {
        let path = Path::new().set("d", outline.path.as_str());
        match &outline.id {
            Some(id) => path.set("id", id.as_str()),
            None => path
        }
    }

    fn circle(&self, circle: &Circle) -> SvgCircle {
        let element = SvgCircle::new()
            .set("cx", self.number(circle.center.x()))
            .set("cy", self.number(circle.center.y()))
            .set("r", self.number(circle.radius));
        match circle.style {
            CircleStyle::Solid => element,
            CircleStyle::Ring => element
                .set("fill-opacity", "0")
                .set("stroke", RING_STROKE)
                .set("stroke-width", "1")
        }
    }

    fn marker(&self, marker: &Marker) -> Group {
        let group = marker.circles.iter().fold(Group::new(), |group, circle| group.add(self.circle(circle)));
        match &marker.id {
            Some(id) => group.set("id", id.as_str()),
            None => group
        }
    }

    fn marker_layer(&self, markers: &[Marker]) -> Group {
        markers.iter().fold(Group::new(), |group, marker| group.add(self.marker(marker)))
    }

    fn outline_layer(outlines: &[Outline]) -> Group {
        outlines.iter().fold(Group::new(), |group, outline| group.add(Self::path(outline)))
    }

    fn boundary_group(&mut self) -> Group {
        match self.boundaries.take() {
            Some(group) => group,
            None => {
                self.order.push(Section::Boundaries);
                Group::new()
                    .set("id", self.plan.boundary_group.as_str())
                    .set("fill", BOUNDARY_FILL)
                    .set("stroke", BOUNDARY_STROKE)
            }
        }
    }

    fn marker_group(&mut self) -> Group {
        match self.markers.take() {
            Some(group) => group,
            None => {
                self.order.push(Section::Markers);
                Group::new().set("id", self.plan.marker_group.as_str())
            }
        }
    }

    fn add_pass(&mut self, pass: &LayerPass) {
        match pass.role {
            LayerRole::RegionOutline => for outline in &pass.outlines {
                let path = Self::path(outline)
                    .set("fill-opacity", "0")
                    .set("stroke-dasharray", OUTLINE_DASHES)
                    .set("stroke", OUTLINE_STROKE);
                self.order.push(Section::Outline(path));
            },
            LayerRole::Boundary => {
                let mut group = self.boundary_group().add(Self::outline_layer(&pass.outlines));
                if self.plan.city_markers_at_centroids {
                    group = group.add(self.marker_layer(&pass.markers));
                }
                self.boundaries = Some(group);
            },
            LayerRole::CityMarker => {
                let group = self.marker_group().add(self.marker_layer(&pass.markers));
                self.markers = Some(group);
            }
        }
    }

    fn finish(self) -> Document {
        let mut document = self.document;
        let mut boundaries = self.boundaries;
        let mut markers = self.markers;
        for section in self.order {
            match section {
                Section::Outline(path) => document = document.add(path),
                Section::Boundaries => if let Some(group) = boundaries.take() {
                    document = document.add(group)
                },
                Section::Markers => if let Some(group) = markers.take() {
                    document = document.add(group)
                }
            }
        }
        document
    }
}

/// Builds the SVG document for a rendering. Region outlines sit at the top level, boundary layers and marker layers are collected into one group each.
pub(crate) fn build_document(rendering: &Rendering, plan: &RenderPlan, canvas: Canvas, precision: Option<usize>) -> Document {
    let mut builder = DocumentBuilder::new(plan, canvas, precision);
    for pass in &rendering.passes {
        builder.add_pass(pass)
    }
    builder.finish()
}
