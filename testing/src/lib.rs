pub mod error;
mod framework;
mod negotiation_record;
pub mod scenarios;
mod test_directory;

pub use error::FrameworkError;
pub use framework::{Framework, Participant, DEFAULT_ROUNDS};
pub use negotiation_record::NegotiationRecord;
pub use test_directory::prepare_test_dir;
