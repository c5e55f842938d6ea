use serde::{Deserialize, Serialize};

use boa_outcome_utils::Outcome;

use crate::component::Response;

/// Utilities of both negotiating parties for single outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyUtilities {
    pub first: f64,
    pub second: f64,
}

/// Single offer exchanged during negotiation together with reaction to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub round: u32,
    pub proposer: String,
    pub offer: Outcome,
    pub utilities: PartyUtilities,
    pub response: Response,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub offer: Outcome,
    pub round: u32,
    pub proposer: String,
    pub utilities: PartyUtilities,
}

/// Result of finished bilateral negotiation, as recorded by protocol driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub first: String,
    pub second: String,
    pub total_rounds: u32,
    pub agreement: Option<Agreement>,
    pub offers: Vec<OfferRecord>,
}

impl SessionResult {
    pub fn agreement_reached(&self) -> bool {
        self.agreement.is_some()
    }

    /// Round in which agreement was reached, or `total_rounds` if it wasn't.
    pub fn final_round(&self) -> u32 {
        self.agreement
            .as_ref()
            .map(|agreement| agreement.round)
            .unwrap_or(self.total_rounds)
    }

    /// Offers made by named party in order they were sent.
    pub fn offers_of<'a>(&'a self, proposer: &'a str) -> impl Iterator<Item = &'a Outcome> + 'a {
        self.offers
            .iter()
            .filter(move |record| record.proposer == proposer)
            .map(|record| &record.offer)
    }
}
