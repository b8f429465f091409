//! Shapefile export: writes the run geometry plus sidecar files and
//! bundles them into a single zip under the user-supplied base name.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, PolygonRing};
use tracing::info;

use crate::geometry::{CoreGeometry, POLYGON_ID};

/// WGS84 geographic CRS, ESRI WKT flavor, for the `.prj` sidecar.
const WGS84_PRJ: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]";

const SIDECAR_EXTENSIONS: [&str; 5] = ["shp", "shx", "dbf", "cpg", "prj"];

/// Write `<base_name>.zip` into `output_dir`, containing the shapefile and
/// every sidecar the writer produced.
pub fn export_bundle(
    geometry: &CoreGeometry,
    base_name: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let tmp = tempfile::Builder::new()
        .prefix("verdok-export-")
        .tempdir()
        .context("failed to create export temp dir")?;

    let shp_path = tmp.path().join(format!("{base_name}.shp"));
    write_shapefile(geometry, &shp_path)?;
    write_sidecars(&shp_path)?;

    let zip_path = output_dir.join(format!("{base_name}.zip"));
    bundle(&shp_path, &zip_path)?;

    info!(path = %zip_path.display(), "export bundle written");
    Ok(zip_path)
}

/// Write `.shp`/`.shx`/`.dbf` with a single character `id` attribute.
pub fn write_shapefile(geometry: &CoreGeometry, shp_path: &Path) -> Result<()> {
    let id_field = FieldName::try_from("id").expect("'id' is a valid field name");
    let table = TableWriterBuilder::new().add_character_field(id_field, 50);

    match geometry {
        CoreGeometry::Points(points) => {
            let mut writer = shapefile::Writer::from_path(shp_path, table)
                .context("failed to create shapefile writer")?;
            for (id, point) in points {
                let mut record = Record::default();
                record.insert("id".to_string(), FieldValue::Character(Some(id.clone())));
                writer
                    .write_shape_and_record(&Point::new(point.x(), point.y()), &record)
                    .context("failed to write point record")?;
            }
        }
        CoreGeometry::Polygon(polygon) => {
            let mut writer = shapefile::Writer::from_path(shp_path, table)
                .context("failed to create shapefile writer")?;
            let ring: Vec<Point> = polygon
                .exterior()
                .0
                .iter()
                .map(|c| Point::new(c.x, c.y))
                .collect();
            let shape = shapefile::Polygon::new(PolygonRing::Outer(ring));
            let mut record = Record::default();
            record.insert(
                "id".to_string(),
                FieldValue::Character(Some(POLYGON_ID.to_string())),
            );
            writer
                .write_shape_and_record(&shape, &record)
                .context("failed to write polygon record")?;
        }
    }

    Ok(())
}

/// `.prj` and `.cpg` are not produced by the shapefile writer.
fn write_sidecars(shp_path: &Path) -> Result<()> {
    std::fs::write(shp_path.with_extension("prj"), WGS84_PRJ)
        .context("failed to write .prj sidecar")?;
    std::fs::write(shp_path.with_extension("cpg"), "UTF-8")
        .context("failed to write .cpg sidecar")?;
    Ok(())
}

fn bundle(shp_path: &Path, zip_path: &Path) -> Result<()> {
    let file = File::create(zip_path)
        .with_context(|| format!("failed to create {}", zip_path.display()))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    for ext in SIDECAR_EXTENSIONS {
        let member = shp_path.with_extension(ext);
        if !member.exists() {
            continue;
        }
        let name = member
            .file_name()
            .and_then(|n| n.to_str())
            .context("non-UTF-8 member name")?;
        zip.start_file(name, options)?;
        let bytes = std::fs::read(&member)?;
        zip.write_all(&bytes)?;
    }

    zip.finish().context("failed to finalize zip")?;
    Ok(())
}
