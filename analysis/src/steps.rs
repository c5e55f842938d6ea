use derive_more::Display;
use serde::Serialize;

use boa_outcome_utils::{Outcome, UtilityFunction};

/// Kind of move made by proposing party, judged by its own utility.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
pub enum StepKind {
    #[display(fmt = "Opening Offer")]
    Opening,
    #[display(fmt = "Concession (worse for proposer)")]
    Concession,
    #[display(fmt = "Improvement (better for proposer)")]
    Improvement,
    #[display(fmt = "Lateral Move (same utility for proposer)")]
    Lateral,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepClassification {
    /// Counted from 1.
    pub step: usize,
    pub offer: Outcome,
    pub receiver_utility: f64,
    pub proposer_utility: f64,
    pub kind: StepKind,
    pub above_reservation: bool,
}

/// Classifies consecutive offers of one party.
pub fn classify_steps(
    offers: &[Outcome],
    receiver: &dyn UtilityFunction,
    proposer: &dyn UtilityFunction,
    proposer_reservation: f64,
) -> Vec<StepClassification> {
    let mut previous: Option<f64> = None;

    offers
        .iter()
        .enumerate()
        .map(|(idx, offer)| {
            let proposer_utility = proposer.utility(offer);
            let kind = match previous {
                None => StepKind::Opening,
                Some(prev) if proposer_utility < prev => StepKind::Concession,
                Some(prev) if proposer_utility > prev => StepKind::Improvement,
                Some(_) => StepKind::Lateral,
            };
            previous = Some(proposer_utility);

            StepClassification {
                step: idx + 1,
                offer: offer.clone(),
                receiver_utility: receiver.utility(offer),
                proposer_utility,
                kind,
                above_reservation: proposer_utility > proposer_reservation,
            }
        })
        .collect()
}
