//! The two-file flat graph format.
//!
//! Node files hold one `id,yaw_angle,lat,lng` line per panorama,
//! link files one `from_id,heading,to_id` line per directed edge.
//! Fields are split on commas without any quoting or escaping, so
//! identifiers must never contain a comma or a line break.

use log::debug;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::CodecError;
use crate::id::PanoId;

/// A single line of a flat graph file.
pub trait Record: Sized + Display {
    fn parse(line: &str) -> Result<Self, String>;

    /// The identifiers written by this record, checked before writing.
    fn identifiers(&self) -> [&PanoId; 2];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: PanoId,
    pub yaw: i32,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub from: PanoId,
    pub heading: i32,
    pub to: PanoId,
}

/// Parses an integral angle. Fractional angles, as written by some
/// interpolation stages, are truncated towards zero.
fn parse_angle(field: &str) -> Result<i32, String> {
    i32::from_str(field).or_else(|_| {
        f64::from_str(field)
            .ok()
            .filter(|angle| angle.is_finite())
            .map(|angle| angle.trunc() as i32)
            .ok_or(format!("invalid angle {field:?}"))
    })
}

fn parse_degree(field: &str) -> Result<f64, String> {
    f64::from_str(field).map_err(|err| format!("invalid coordinate {field:?}: {err}"))
}

fn split<const N: usize>(line: &str) -> Result<[&str; N], String> {
    let fields = line.split(',').collect::<Vec<_>>();
    fields
        .try_into()
        .map_err(|fields: Vec<&str>| format!("expected {N} fields, found {}", fields.len()))
}

impl Record for NodeRecord {
    fn parse(line: &str) -> Result<Self, String> {
        let [id, yaw, lat, lng] = split::<4>(line)?;

        Ok(NodeRecord {
            id: PanoId::from(id),
            yaw: parse_angle(yaw)?,
            lat: parse_degree(lat)?,
            lng: parse_degree(lng)?,
        })
    }

    fn identifiers(&self) -> [&PanoId; 2] {
        [&self.id, &self.id]
    }
}

impl Display for NodeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{:?},{:?}", self.id, self.yaw, self.lat, self.lng)
    }
}

impl Record for LinkRecord {
    fn parse(line: &str) -> Result<Self, String> {
        let [from, heading, to] = split::<3>(line)?;

        Ok(LinkRecord {
            from: PanoId::from(from),
            heading: parse_angle(heading)?,
            to: PanoId::from(to),
        })
    }

    fn identifiers(&self) -> [&PanoId; 2] {
        [&self.from, &self.to]
    }
}

impl Display for LinkRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.from, self.heading, self.to)
    }
}

/// Reads every record of a flat graph file, skipping blank lines.
pub fn read_records<R: Record>(path: &Path) -> Result<Vec<R>, CodecError> {
    let reader = BufReader::new(File::open(path)?);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = R::parse(line).map_err(|reason| CodecError::Malformed {
            file: path.to_path_buf(),
            line: index + 1,
            reason,
        })?;

        records.push(record);
    }

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Writes records, one per line, replacing any existing file.
pub fn write_records<'a, R: Record + 'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a R>,
) -> Result<usize, CodecError> {
    let mut writer = BufWriter::new(File::create(path)?);

    let mut written = 0;
    for record in records {
        if let Some(id) = record
            .identifiers()
            .into_iter()
            .find(|id| !id.is_representable())
        {
            return Err(CodecError::UnrepresentableId(id.to_string()));
        }

        writeln!(writer, "{record}")?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}
