//! # Domain Transition Scenarios
//!
//! Full expiry / reregistration cycles: snapshotting, deactivation,
//! inheritance by new and returning owners, self-healing after missed expiry
//! events, and the intentional accept/reject asymmetry.

use crate::fixtures::{world, ALICE, BOB, TEMPORARY};
use club_registry::domain::{normalize, ClubError, DomainStatus, TransitionStatus};
use club_registry::events::ClubEventKind;
use club_registry::ports::ClubRegistryApi;

#[tokio::test]
async fn full_cycle_new_owner_inherits_members() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.registry
        .write()
        .update_membership(BOB, "alpha", true, TEMPORARY)
        .unwrap();

    // Domain lapses; token burned with the registration.
    w.domains.set_status(&normalize("alpha"), DomainStatus::Reclaimed);
    w.domains.burn_token(7);
    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_000)
        .await
        .unwrap();

    {
        let registry = w.registry.read();
        assert!(!registry.is_club_active("alpha"));
        let t = registry.transition_of("alpha").unwrap();
        assert_eq!(t.status, TransitionStatus::Pending);
        assert!(t.nft_destroyed);
        assert_eq!(t.previous_admin, ALICE);
    }

    // BOB registers the domain fresh under a new token and inherits.
    w.domains.rebind(&normalize("alpha"), 21, BOB);
    w.registry
        .write()
        .handle_domain_reregistration("alpha", BOB, 6_000)
        .await
        .unwrap();

    let registry = w.registry.read();
    let club = registry.get_club("alpha").unwrap();
    assert!(club.active);
    assert_eq!(club.admin, BOB);
    assert_eq!(club.token_id, 21);
    // The whole member set survived the cycle.
    assert!(registry.is_member("alpha", &ALICE));
    assert!(registry.is_member("alpha", &BOB));
    assert_eq!(
        registry.transition_of("alpha").unwrap().status,
        TransitionStatus::Accepted
    );
    assert!(registry.events().iter().any(|e| matches!(
        e.kind,
        ClubEventKind::DomainReregistered {
            token_changed: true,
            ..
        }
    )));
}

#[tokio::test]
async fn expiry_rejected_while_domain_live() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    assert!(matches!(
        w.registry.write().handle_domain_expiry("alpha", 0).await,
        Err(ClubError::DomainNotExpired {
            status: DomainStatus::Active
        })
    ));
    assert!(w.registry.read().is_club_active("alpha"));
}

#[tokio::test]
async fn repeated_expiry_overwrites_snapshot() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.domains.set_status(&normalize("alpha"), DomainStatus::Frozen);

    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_000)
        .await
        .unwrap();
    assert_eq!(w.registry.read().transition_of("alpha").unwrap().at, 5_000);

    // Second detection while Pending: snapshot refreshed, still Pending.
    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_500)
        .await
        .unwrap();
    let registry = w.registry.read();
    let t = registry.transition_of("alpha").unwrap();
    assert_eq!(t.at, 5_500);
    assert_eq!(t.status, TransitionStatus::Pending);
}

#[tokio::test]
async fn returning_owner_keeps_same_token() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.domains.set_status(&normalize("alpha"), DomainStatus::Frozen);
    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_000)
        .await
        .unwrap();

    // ALICE renews inside the grace window; same token, same owner.
    w.domains.set_status(&normalize("alpha"), DomainStatus::Active);
    w.registry
        .write()
        .handle_domain_reregistration("alpha", ALICE, 6_000)
        .await
        .unwrap();

    let registry = w.registry.read();
    let club = registry.get_club("alpha").unwrap();
    assert!(club.active);
    assert_eq!(club.admin, ALICE);
    assert_eq!(club.token_id, 7);
    assert!(registry.events().iter().any(|e| matches!(
        e.kind,
        ClubEventKind::DomainReregistered {
            token_changed: false,
            ..
        }
    )));
}

#[tokio::test]
async fn missed_expiry_is_self_healed_on_reregistration() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    // Nobody reported the expiry; the domain reappears bound to a new token.
    w.domains.rebind(&normalize("alpha"), 9, BOB);

    w.registry
        .write()
        .handle_domain_reregistration("alpha", BOB, 6_000)
        .await
        .unwrap();

    let registry = w.registry.read();
    let t = registry.transition_of("alpha").unwrap();
    assert_eq!(t.status, TransitionStatus::Accepted);
    assert_eq!(t.prior_token_id, 7);
    assert!(t.nft_destroyed);
    assert_eq!(registry.get_club("alpha").unwrap().token_id, 9);
    assert!(registry.is_member("alpha", &ALICE));
}

#[tokio::test]
async fn reject_decision_still_preserves_club() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.registry
        .write()
        .update_membership(BOB, "alpha", true, TEMPORARY)
        .unwrap();
    w.domains.set_status(&normalize("alpha"), DomainStatus::Frozen);
    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_000)
        .await
        .unwrap();

    w.registry
        .write()
        .decide_club_inheritance("alpha", false, ALICE, 6_000)
        .await
        .unwrap();

    let registry = w.registry.read();
    // Intentional asymmetry: "reject" behaves like "accept" except for the
    // recorded preference.
    assert!(registry.is_club_active("alpha"));
    assert!(registry.is_member("alpha", &ALICE));
    assert!(registry.is_member("alpha", &BOB));
    assert!(registry.events().iter().any(|e| matches!(
        e.kind,
        ClubEventKind::InheritanceDecided {
            accepted: false,
            ..
        }
    )));
}

#[tokio::test]
async fn inheritance_gated_to_token_owner() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.domains.set_status(&normalize("alpha"), DomainStatus::Frozen);
    w.registry
        .write()
        .handle_domain_expiry("alpha", 5_000)
        .await
        .unwrap();

    assert!(matches!(
        w.registry
            .write()
            .decide_club_inheritance("alpha", true, BOB, 6_000)
            .await,
        Err(ClubError::NotDomainOwner)
    ));
}

#[tokio::test]
async fn status_outage_aborts_transition_untouched() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.domains.fail_method("status_of");

    assert!(matches!(
        w.registry.write().handle_domain_expiry("alpha", 0).await,
        Err(ClubError::Registry(_))
    ));
    assert!(matches!(
        w.registry
            .write()
            .handle_domain_reregistration("alpha", ALICE, 0)
            .await,
        Err(ClubError::Registry(_))
    ));

    let registry = w.registry.read();
    assert!(registry.is_club_active("alpha"));
    assert!(registry.transition_of("alpha").is_none());
}

#[tokio::test]
async fn two_consecutive_cycles() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;

    for (cycle, (token, owner)) in [(21u64, BOB), (22u64, ALICE)].into_iter().enumerate() {
        let at = 10_000 + cycle as u64 * 1_000;
        w.domains.set_status(&normalize("alpha"), DomainStatus::Reclaimed);
        w.registry
            .write()
            .handle_domain_expiry("alpha", at)
            .await
            .unwrap();
        w.domains.rebind(&normalize("alpha"), token, owner);
        w.registry
            .write()
            .handle_domain_reregistration("alpha", owner, at + 500)
            .await
            .unwrap();
    }

    let registry = w.registry.read();
    let club = registry.get_club("alpha").unwrap();
    assert!(club.active);
    assert_eq!(club.admin, ALICE);
    assert_eq!(club.token_id, 22);
    // Two transfers from the cycles (ALICE->BOB, BOB->ALICE).
    assert_eq!(club.admin_history.len(), 2);
    assert!(registry.is_member("alpha", &ALICE));
}
