pub mod factory;

pub use factory::{create_negotiator, create_negotiators, LoadMode, NegotiatorConfig, NegotiatorsConfig};

pub use boa_negotiator_component::{
    Agreement, BoxedNegotiator, NegotiationState, Negotiator, OfferRecord, PartyUtilities,
    PerformanceStats, Response, SessionResult,
};

pub mod builtin {
    pub use boa_builtin_negotiators::{
        register_negotiators, AdaptiveBoa, AdaptiveBoaConfig, LIBRARY_NAME,
    };
}

pub mod component {
    pub use boa_negotiator_component::static_lib::{
        factory, register_negotiator, registered_negotiators, NegotiatorFactory,
    };
}

pub mod outcome {
    pub use boa_outcome_utils::{
        build_utility, Issue, Outcome, OutcomeSpace, Preferences, SharedUtility,
        SyntheticUtility, TableUtility, UtilityConfig, UtilityFunction,
    };
}

pub mod analysis {
    pub use boa_nash_analysis::*;
}
