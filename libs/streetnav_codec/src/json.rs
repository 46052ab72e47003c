use indexmap::IndexMap;
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::CodecError;
use crate::id::PanoId;
use crate::route::Route;

/// Original panorama identifier to canonical identifier, in file order.
pub type PanoramaMapping = IndexMap<PanoId, PanoId>;

pub fn read_routes(path: &Path) -> Result<Vec<Route>, CodecError> {
    let reader = BufReader::new(File::open(path)?);
    let routes: Vec<Route> = serde_json::from_reader(reader)?;

    debug!("Read {} routes from {}", routes.len(), path.display());
    Ok(routes)
}

/// Writes the routes as a pretty-printed JSON array.
///
/// The array is first written beside the destination and then moved
/// over it, so an interrupted write never truncates a previous checkpoint.
pub fn write_routes(path: &Path, routes: &[Route]) -> Result<(), CodecError> {
    let partial = partial_path(path);

    {
        let mut writer = BufWriter::new(File::create(&partial)?);
        serde_json::to_writer_pretty(&mut writer, routes)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    fs::rename(&partial, path)?;
    debug!("Wrote {} routes to {}", routes.len(), path.display());
    Ok(())
}

pub fn read_mapping(path: &Path) -> Result<PanoramaMapping, CodecError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
