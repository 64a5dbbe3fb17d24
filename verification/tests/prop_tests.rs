use proptest::prelude::*;

use gate_types::{
    CollectionTag, ExternalIdentity, FailureKind, OwnedAsset, VerificationStatus, WalletAddress,
    WalletState,
};
use gate_verification::{Effect, Event, OwnershipRule, StateMachine};

const REQUIRED: u32 = 3;
const OWNER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

fn assets(matching: usize, noise: &[String]) -> Vec<OwnedAsset> {
    let mut out: Vec<OwnedAsset> = (0..matching)
        .map(|i| OwnedAsset::new(format!("m{i}"), vec![CollectionTag::collection("COL1")]))
        .collect();
    out.extend(
        noise
            .iter()
            .enumerate()
            .map(|(i, v)| OwnedAsset::new(format!("n{i}"), vec![CollectionTag::collection(v.clone())])),
    );
    out
}

/// Drive a fresh session through connect + ownership answer.
fn run(assets: Vec<OwnedAsset>) -> (StateMachine, Option<Effect>) {
    let mut m = StateMachine::new(
        OwnershipRule::new("COL1", REQUIRED),
        None,
        ExternalIdentity::new("99"),
    );
    let owner = WalletAddress::parse(OWNER).unwrap();
    let effect = m.handle(Event::WalletChanged(WalletState::connected(owner)));
    let attempt = effect.expect("connect starts a check").attempt();
    let next = m.handle(Event::OwnershipResolved {
        attempt,
        result: Ok(assets),
    });
    (m, next)
}

proptest! {
    /// Without any target-tagged asset the count is zero and the check fails.
    #[test]
    fn no_target_assets_fail(noise in prop::collection::vec("[A-Z]{2,6}[02-9]", 0..20)) {
        let (m, next) = run(assets(0, &noise));
        prop_assert!(next.is_none());
        prop_assert_eq!(m.outcome().owned_count, 0);
        prop_assert_eq!(m.status(), VerificationStatus::Failure);
    }

    /// Below the threshold: failure citing both counts, no backend call.
    #[test]
    fn below_threshold_fails(matching in 0usize..REQUIRED as usize, noise in prop::collection::vec("[A-Z]{2,6}[02-9]", 0..10)) {
        let (m, next) = run(assets(matching, &noise));
        prop_assert!(next.is_none());
        prop_assert_eq!(m.status(), VerificationStatus::Failure);
        prop_assert_eq!(m.outcome().owned_count, matching as u32);
        prop_assert_eq!(m.outcome().failure, Some(FailureKind::ThresholdNotMet));
        let msg = m.outcome().message.clone().unwrap();
        let required_text = format!("at least {REQUIRED}");
        let actual_text = format!("hold {matching}");
        prop_assert!(msg.contains(&required_text));
        prop_assert!(msg.contains(&actual_text));
    }

    /// At or above the threshold: success and exactly one notification effect.
    #[test]
    fn at_or_above_threshold_notifies_once(matching in REQUIRED as usize..40, noise in prop::collection::vec("[A-Z]{2,6}[02-9]", 0..10)) {
        let (mut m, next) = run(assets(matching, &noise));
        prop_assert_eq!(m.status(), VerificationStatus::Success);
        prop_assert_eq!(m.outcome().owned_count, matching as u32);
        let effect = next.expect("notification requested");
        let attempt = effect.attempt();
        prop_assert!(matches!(effect, Effect::NotifyBackend { .. }), "expected NotifyBackend");
        let after = m.handle(Event::BackendResolved { attempt, result: Ok(()) });
        prop_assert!(after.is_none());
        prop_assert_eq!(m.status(), VerificationStatus::BackendNotified);
    }
}
