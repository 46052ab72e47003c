use geo::{Line, LineInterpolatePoint, Point};
use itertools::Itertools;
use strum::{Display, EnumString};

use crate::bearing::bearing;
use crate::distance::distance;
use crate::error::GeoError;

/// How an oversized gap is divided into segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Subdivision {
    /// `ceil(gap / spacing)` segments, no output segment exceeds the spacing.
    #[default]
    Ceil,

    /// `floor(gap / spacing)` segments (at least one), as produced by the
    /// first generation of datasets. Segments may exceed the spacing.
    Floor,
}

impl Subdivision {
    fn segments(&self, gap: f64, spacing: f64) -> usize {
        let ratio = gap / spacing;
        let segments = match self {
            Subdivision::Ceil => ratio.ceil(),
            Subdivision::Floor => ratio.floor(),
        };

        (segments as usize).max(1)
    }
}

/// The densified path, with one heading per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Densified {
    pub points: Vec<Point>,
    pub headings: Vec<f64>,

    /// For each input point, its index within [`Densified::points`].
    pub origins: Vec<usize>,
}

impl Densified {
    /// Whether the point at `index` was inserted by interpolation.
    pub fn is_inserted(&self, index: usize) -> bool {
        self.origins.binary_search(&index).is_err()
    }
}

/// Inserts evenly spaced points between any consecutive pair further
/// apart than `spacing` meters (geodesic).
///
/// Inserted points are linearly interpolated in coordinate space and
/// inherit the bearing of the segment they were drawn from. Every
/// original point carries the bearing of the segment it starts, the
/// final point carries `end_heading`.
pub fn densify(
    points: &[Point],
    end_heading: f64,
    spacing: f64,
    subdivision: Subdivision,
) -> Result<Densified, GeoError> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(GeoError::InvalidSpacing(spacing));
    }

    let mut dense = Densified {
        points: Vec::with_capacity(points.len()),
        headings: Vec::with_capacity(points.len()),
        origins: Vec::with_capacity(points.len()),
    };

    let Some(first) = points.first() else {
        return Ok(dense);
    };

    dense.origins.push(0);
    dense.points.push(*first);

    for (start, end) in points.iter().copied().tuple_windows() {
        let gap = distance(start, end);
        let heading = bearing(start, end);
        dense.headings.push(heading);

        if gap > spacing {
            let segments = subdivision.segments(gap, spacing);
            let line = Line::new(start, end);

            for step in 1..segments {
                let fraction = step as f64 / segments as f64;
                let point = line
                    .line_interpolate_point(fraction)
                    .ok_or(GeoError::Interpolation(start, end))?;

                dense.points.push(point);
                dense.headings.push(heading);
            }
        }

        dense.origins.push(dense.points.len());
        dense.points.push(end);
    }

    dense.headings.push(end_heading);
    Ok(dense)
}
