//! Profile storage port trait.

use crate::domain::error::MuhurtaError;
use crate::domain::profile::Profile;

/// Port for loading and persisting the personalization profile.
///
/// `load` returning `Ok(None)` means "nothing stored"; callers fall back to
/// [`Profile::default`]. The provider may replace the stored profile between
/// evaluation ticks; each tick sees an immutable snapshot.
pub trait ProfilePort {
    fn load(&self) -> Result<Option<Profile>, MuhurtaError>;

    fn save(&self, profile: &Profile) -> Result<(), MuhurtaError>;
}
