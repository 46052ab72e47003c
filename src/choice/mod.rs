//! Selection of multiple-choice annotation targets along a route.
//!
//! Both selectors draw from a caller-provided random source, so a run
//! is reproducible given the seed of that source.

#[doc(hidden)]
pub mod easy;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod standard;


/// Choices are labelled `1..=MAX_CHOICES` within a `u8`.
pub const MAX_CHOICES: usize = u8::MAX as usize;

fn check_count(requested: usize) -> Result<(), ChoiceError> {
    match requested > MAX_CHOICES {
        true => Err(ChoiceError::TooManyChoices {
            requested,
            max: MAX_CHOICES,
        }),
        false => Ok(()),
    }
}

#[doc(inline)]
pub use easy::{EasyConfig, select_easy};
#[doc(inline)]
pub use error::ChoiceError;
#[doc(inline)]
pub use standard::{StandardConfig, candidate_indices, select_standard};
