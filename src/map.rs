use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::errors::CommandError;
use crate::layers::GeometryContainer;
use crate::plans::RenderPlan;
use crate::progress::ProgressObserver;
use crate::projection::Canvas;
use crate::projection::Transform;
use crate::render::render;
use crate::svg_document::build_document;

#[derive(Clone,Debug,Default)]
pub(crate) struct MapOptions {
    pub(crate) canvas: Canvas,
    pub(crate) precision: Option<usize>,
    /// The layer name for a GeoJSON feature collection. Defaults to the first layer named by the plan.
    pub(crate) geojson_layer: Option<String>,
}

/// Load, fit, render and serialize. The same source and plan always produce the same text.
pub(crate) fn draw_map<Progress: ProgressObserver>(source: &str, plan: &RenderPlan, options: &MapOptions, progress: &mut Progress) -> Result<String,CommandError> {

    progress.announce(|| "Loading layers");
    let geojson_layer = options.geojson_layer.as_deref().or_else(|| plan.first_layer()).unwrap_or_default();
    let container = GeometryContainer::load(source, geojson_layer)?;
    for name in container.layer_names() {
        let layer = container.layer(name)?;
        progress.announce(|| format!("Layer {name} has {} features",layer.len()));
    }

    let shape = container.merge_layers(&plan.layers_to_fit())?;
    progress.announce(|| format!("Fitting {} geometries to the canvas",shape.len()));
    let transform = Transform::fit(&shape, options.canvas)?;

    progress.announce(|| "Drawing layers");
    let rendering = render(&container, plan, &transform, options.precision, progress)?;

    Ok(build_document(&rendering, plan, options.canvas, options.precision).to_string())

}

fn partial_path(target: &Path) -> PathBuf {
    let name = target.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    target.with_file_name(format!(".{name}.partial"))
}

/// Writes the whole document beside the target and then moves it into place, so the target is never left half written.
pub(crate) fn write_output(target: &Path, text: &str) -> Result<(),CommandError> {
    let partial = partial_path(target);
    if let Err(err) = fs::write(&partial, text).and_then(|()| fs::rename(&partial, target)) {
        _ = fs::remove_file(&partial);
        return Err(CommandError::OutputWrite(format!("{}: {err}",target.display())))
    }
    Ok(())
}

pub(crate) fn read_input(source: &Path) -> Result<String,CommandError> {
    fs::read_to_string(source).map_err(|e| CommandError::InputRead(format!("{}: {e}",source.display())))
}
