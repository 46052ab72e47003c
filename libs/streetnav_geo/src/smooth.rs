use crate::bearing::normalize;
use crate::error::GeoError;

/// Circular mean of a set of headings, in degrees within `[0, 360)`.
///
/// Returns `None` for an empty set.
pub fn circular_mean(headings: &[f64]) -> Option<f64> {
    if headings.is_empty() {
        return None;
    }

    let (sin, cos) = headings.iter().fold((0.0, 0.0), |(sin, cos), heading| {
        let radians = heading.to_radians();
        (sin + radians.sin(), cos + radians.cos())
    });

    Some(normalize(sin.atan2(cos).to_degrees()))
}

/// Replaces each heading with the circular mean of a symmetric window
/// centred upon it.
///
/// The window is truncated at the boundaries of the sequence rather
/// than wrapping between the first and last headings.
pub fn smooth(headings: &[f64], window: usize) -> Result<Vec<f64>, GeoError> {
    if window % 2 == 0 {
        return Err(GeoError::InvalidWindow(window));
    }

    let half = window / 2;
    let last = headings.len().saturating_sub(1);

    Ok((0..headings.len())
        .filter_map(|index| {
            let lower = index.saturating_sub(half);
            let upper = (index + half).min(last);
            circular_mean(&headings[lower..=upper])
        })
        .collect())
}
