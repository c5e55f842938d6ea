pub mod acceptance;
pub mod adaptive;
pub mod bidding;
pub mod config;
pub mod fallback;
pub mod opponent;

pub use acceptance::{AcceptanceRule, Decision, MultiCriteriaAcceptance};
pub use adaptive::AdaptiveBoa;
pub use bidding::Bidding;
pub use config::{AcceptanceConfig, AdaptiveBoaConfig, BiddingConfig, OpponentConfig};
pub use opponent::OpponentModel;

use boa_negotiator_component::static_lib::{factory, register_negotiator};

pub const LIBRARY_NAME: &str = "boa-negotiators";

pub fn register_negotiators() {
    register_negotiator(LIBRARY_NAME, "AdaptiveBoa", factory::<AdaptiveBoa>());
}
