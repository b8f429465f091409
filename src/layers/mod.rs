//! Best-effort loading of the four reference boundary layers.
//!
//! Every loader failure degrades the layer to `Unavailable` with a
//! warning; a run never aborts because reference data is missing.

mod arcgis;
mod cache;
mod convert;
mod drive;
mod kkprl;

pub use arcgis::fetch_conservation;
pub use cache::LayerCache;
pub use drive::{fetch_shapefile_layer, read_shapefile};
pub use kkprl::load_kkprl;

use tracing::warn;

use crate::config::Sources;
use crate::models::{LayerKind, LayerLoad, ReferenceLayerSet};

fn to_load(kind: LayerKind, result: anyhow::Result<crate::models::ReferenceLayer>) -> LayerLoad {
    match result {
        Ok(layer) => LayerLoad::Loaded(layer),
        Err(err) => {
            warn!(layer = kind.name(), "layer unavailable: {err:#}");
            LayerLoad::Unavailable(format!("{err:#}"))
        }
    }
}

/// Load all four layers, single attempt each, no retries.
///
/// The sedimentation layer is only fetched when the user opted in; without
/// the opt-in it is treated as absent even if the source is reachable.
pub async fn load_all(sources: &Sources, sedimentation_opt_in: bool) -> ReferenceLayerSet {
    let conservation = to_load(
        LayerKind::Conservation,
        fetch_conservation(&sources.conservation_url).await,
    );
    let twelve_mile = to_load(
        LayerKind::TwelveMile,
        fetch_shapefile_layer(LayerKind::TwelveMile, &sources.twelve_mile_url).await,
    );
    let kkprl = to_load(LayerKind::Kkprl, load_kkprl(&sources.kkprl_path));
    let sedimentation = if sedimentation_opt_in {
        to_load(
            LayerKind::Sedimentation,
            fetch_shapefile_layer(LayerKind::Sedimentation, &sources.sedimentation_url).await,
        )
    } else {
        LayerLoad::Unavailable("sedimentation check not requested".to_string())
    };

    ReferenceLayerSet {
        conservation,
        twelve_mile,
        kkprl,
        sedimentation,
    }
}
