//! Port traits decoupling the domain from its external collaborators.

pub mod astro_port;
pub mod clock_port;
pub mod config_port;
pub mod presenter_port;
pub mod profile_port;
