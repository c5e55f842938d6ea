pub mod component;
pub mod session;
pub mod static_lib;

pub use component::{BoxedNegotiator, NegotiationState, Negotiator, PerformanceStats, Response};
pub use session::{Agreement, OfferRecord, PartyUtilities, SessionResult};
pub use static_lib::{
    create_static_negotiator, factory, register_negotiator, registered_negotiators,
    NegotiatorFactory,
};

pub use boa_outcome_utils::{Outcome, OutcomeSpace, SharedUtility, UtilityFunction};
