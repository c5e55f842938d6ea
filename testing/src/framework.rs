use boa_nash_analysis::{
    analyze_negotiation_session, party_utilities, AnalysisConfig, Party, SessionAnalysis,
};
use boa_negotiator_component::{
    Agreement, BoxedNegotiator, NegotiationState, Negotiator, OfferRecord, Response, SessionResult,
};
use boa_negotiators::factory::{create_negotiator, NegotiatorConfig};
use boa_outcome_utils::{Outcome, OutcomeSpace, SharedUtility};

use crate::error::FrameworkError;
use crate::negotiation_record::NegotiationRecord;
use crate::test_directory::{prepare_test_dir, save_json};

use std::path::PathBuf;

pub const DEFAULT_ROUNDS: u32 = 20;

/// Negotiator together with utility function it was given.
pub struct Participant {
    pub negotiator: BoxedNegotiator,
    pub ufun: Option<SharedUtility>,
}

/// Runs bilateral alternating-offers negotiation between two negotiators.
///
/// In every round first party proposes and second responds. If second party
/// rejects, it makes counter offer in the same round. Negotiation ends with
/// first accepted offer or after the last round.
pub struct Framework {
    pub first: Option<Participant>,
    pub second: Option<Participant>,

    pub rounds: u32,
    pub test_dir: PathBuf,
}

impl Framework {
    pub fn new_empty(test_name: &str) -> Result<Framework, FrameworkError> {
        let _ = env_logger::builder().try_init();

        Ok(Framework {
            first: None,
            second: None,
            rounds: DEFAULT_ROUNDS,
            test_dir: prepare_test_dir(test_name).map_err(FrameworkError::TestDir)?,
        })
    }

    pub fn new(
        test_name: &str,
        first: NegotiatorConfig,
        first_ufun: Option<SharedUtility>,
        second: NegotiatorConfig,
        second_ufun: Option<SharedUtility>,
    ) -> Result<Framework, FrameworkError> {
        Self::new_empty(test_name)?
            .add_first(first, first_ufun)?
            .add_second(second, second_ufun)
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn add_first(
        mut self,
        config: NegotiatorConfig,
        ufun: Option<SharedUtility>,
    ) -> Result<Self, FrameworkError> {
        self.first = Some(participant(config, ufun)?);
        Ok(self)
    }

    pub fn add_second(
        mut self,
        config: NegotiatorConfig,
        ufun: Option<SharedUtility>,
    ) -> Result<Self, FrameworkError> {
        self.second = Some(participant(config, ufun)?);
        Ok(self)
    }

    /// Adds already constructed negotiator as first party.
    pub fn with_first(mut self, negotiator: BoxedNegotiator, ufun: Option<SharedUtility>) -> Self {
        self.first = Some(Participant { negotiator, ufun });
        self
    }

    pub fn with_second(mut self, negotiator: BoxedNegotiator, ufun: Option<SharedUtility>) -> Self {
        self.second = Some(Participant { negotiator, ufun });
        self
    }

    pub fn first(&self) -> Option<&dyn Negotiator> {
        self.first
            .as_ref()
            .map(|party| party.negotiator.as_ref() as &dyn Negotiator)
    }

    pub fn second(&self) -> Option<&dyn Negotiator> {
        self.second
            .as_ref()
            .map(|party| party.negotiator.as_ref() as &dyn Negotiator)
    }

    /// Negotiators are initialized at the beginning, so the same framework
    /// can be run many times. Statistics of negotiators accumulate.
    pub fn run(&mut self) -> Result<SessionResult, FrameworkError> {
        let rounds = self.rounds;
        let first = self
            .first
            .as_mut()
            .ok_or(FrameworkError::MissingParty("First"))?;
        let second = self
            .second
            .as_mut()
            .ok_or(FrameworkError::MissingParty("Second"))?;

        let first_name = first.negotiator.name().to_string();
        let second_name = second.negotiator.name().to_string();
        if first_name == second_name {
            return Err(FrameworkError::NameClash(first_name));
        }

        let first_ufun = first.ufun.clone();
        let second_ufun = second.ufun.clone();

        first.negotiator.initialize(first_ufun.clone());
        second.negotiator.initialize(second_ufun.clone());

        log::info!(
            "Starting negotiation [{}] vs [{}] ({} rounds).",
            first_name,
            second_name,
            rounds
        );

        let mut offers = Vec::new();
        let mut agreement = None;

        'negotiation: for round in 0..rounds {
            let state = NegotiationState::at_step(round, rounds);

            for first_proposes in [true, false] {
                let (proposer, exchanged) = match first_proposes {
                    true => (&first_name, exchange(first, second, &state)),
                    false => (&second_name, exchange(second, first, &state)),
                };

                // Party that has nothing to offer loses its turn.
                let (offer, response) = match exchanged {
                    Some(exchanged) => exchanged,
                    None => continue,
                };

                let utilities =
                    party_utilities(&offer, first_ufun.as_deref(), second_ufun.as_deref());
                log::debug!(
                    "Round {}: [{}] offers {} (utilities {:.3}/{:.3}). Response: {}.",
                    round,
                    proposer,
                    offer,
                    utilities.first,
                    utilities.second,
                    response
                );

                offers.push(OfferRecord {
                    round,
                    proposer: proposer.clone(),
                    offer: offer.clone(),
                    utilities,
                    response,
                });

                if response == Response::Accept {
                    agreement = Some(Agreement {
                        offer,
                        round,
                        proposer: proposer.clone(),
                        utilities,
                    });
                    break 'negotiation;
                }
            }
        }

        match &agreement {
            Some(agreement) => log::info!(
                "Agreement reached in round {}: {}.",
                agreement.round,
                agreement.offer
            ),
            None => log::info!("No agreement after {} rounds.", rounds),
        }

        Ok(SessionResult {
            first: first_name,
            second: second_name,
            total_rounds: rounds,
            agreement,
            offers,
        })
    }

    /// Analyzes agreement using reservation values reported by negotiators.
    pub fn analyze(
        &self,
        result: &SessionResult,
        space: &OutcomeSpace,
        config: &AnalysisConfig,
    ) -> Result<SessionAnalysis, FrameworkError> {
        let first = self
            .first
            .as_ref()
            .ok_or(FrameworkError::MissingParty("First"))?;
        let second = self
            .second
            .as_ref()
            .ok_or(FrameworkError::MissingParty("Second"))?;

        Ok(analyze_negotiation_session(
            result,
            analysis_party(first),
            analysis_party(second),
            space,
            config,
        ))
    }

    /// Saves negotiation record in test directory.
    pub fn save_record(
        &self,
        result: &SessionResult,
        analysis: &SessionAnalysis,
    ) -> Result<PathBuf, FrameworkError> {
        let stats = self
            .first()
            .into_iter()
            .chain(self.second())
            .map(|negotiator| negotiator.performance_stats())
            .collect();
        let record = NegotiationRecord::new(result.clone(), stats, analysis);

        save_json(&self.test_dir, "negotiation-record.json", &record)
            .map_err(FrameworkError::TestDir)
    }
}

fn participant(
    config: NegotiatorConfig,
    ufun: Option<SharedUtility>,
) -> Result<Participant, FrameworkError> {
    Ok(Participant {
        negotiator: create_negotiator(config).map_err(FrameworkError::Creation)?,
        ufun,
    })
}

fn analysis_party(participant: &Participant) -> Party<'_> {
    Party {
        ufun: participant.ufun.as_deref(),
        reservation: participant.negotiator.performance_stats().reservation_value,
    }
}

fn exchange(
    proposer: &mut Participant,
    receiver: &mut Participant,
    state: &NegotiationState,
) -> Option<(Outcome, Response)> {
    let offer = proposer.negotiator.propose(state)?;
    let response = receiver
        .negotiator
        .respond(&state.clone().with_offer(offer.clone()));
    Some((offer, response))
}
