pub mod error;
pub mod frequency;
mod outcome;
pub mod reservation;
mod space;
mod synthetic;
mod utility;

pub use error::{BuildError, OutcomeError, SpaceError};
pub use frequency::{FrequencyEstimate, IssueFrequencies};
pub use outcome::Outcome;
pub use reservation::{estimate_reservation, percentile, DEFAULT_RESERVATION};
pub use space::{Enumerate, Issue, OutcomeSpace};
pub use synthetic::SyntheticUtility;
pub use utility::{
    build_utility, utility_of_value, Preferences, SharedUtility, TableUtility,
    TableUtilityBuilder, UtilityConfig, UtilityFunction, NEUTRAL_SCORE,
};
