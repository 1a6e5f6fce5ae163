// Track selection state: default policy, engine sync and persistence

pub mod builder;
pub mod persist;
pub mod state;

pub use builder::{HostProfile, ParametersBuilder};
pub use persist::{persist, restore, PARAMETERS_VERSION};
pub use state::{will_have_content, TrackSelectionState};
