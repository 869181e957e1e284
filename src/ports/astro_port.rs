//! Profile generation port trait.

use crate::domain::error::MuhurtaError;
use crate::domain::profile::{BirthDetails, Profile};

/// Port for deriving a personalization profile from birth details, backed
/// by a third-party text-generation API. Failures here are the provider's
/// domain; evaluation continues on the last-known or default profile.
pub trait AstroPort {
    fn fetch_profile(&self, birth: &BirthDetails) -> Result<Profile, MuhurtaError>;
}
