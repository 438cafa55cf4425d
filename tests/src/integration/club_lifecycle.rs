//! # Club Lifecycle Scenarios
//!
//! Creation with full back-end initialization, rollback atomicity, admin
//! transfer propagation, and the additive membership policy — exercised
//! through the public API over live adapters.

use crate::fixtures::{world, ALICE, BOB, CAROL, TEMPORARY};
use club_registry::domain::{normalize, ClubError, InitStage};
use club_registry::events::ClubEventKind;
use club_registry::ports::ClubRegistryApi;

#[tokio::test]
async fn founded_club_is_fully_visible() {
    let w = world();
    w.found_club("alpha.web3.club", 7, ALICE).await;

    let registry = w.registry.read();
    let club = registry.get_club("alpha").expect("club exists");
    assert!(club.active);
    assert_eq!(club.admin, ALICE);
    assert_eq!(club.member_count, 1);
    assert!(registry.is_member("alpha.web3.club", &ALICE));
    assert_eq!(registry.get_user_clubs(&ALICE), vec!["alpha".to_owned()]);
    // Both reversible back-ends saw the club.
    assert!(w.temporary.is_initialized(&normalize("alpha")));
    assert!(w.token_access.is_initialized(&normalize("alpha")));
}

#[tokio::test]
async fn failed_creation_leaves_no_trace_but_flags_orphan() {
    let w = world();
    w.domains.register(&normalize("alpha"), 7, ALICE);
    w.token_access.fail_method("initialize_club");

    let err = w
        .registry
        .write()
        .create_club("alpha", ALICE, 2_000)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClubError::InitializationFailed {
            stage: InitStage::TokenAccess,
            ..
        }
    ));

    let registry = w.registry.read();
    // All-or-nothing: no club, no membership, temporary rolled back.
    assert!(registry.get_club("alpha").is_err());
    assert!(!registry.is_member("alpha", &ALICE));
    assert!(!w.temporary.is_initialized(&normalize("alpha")));
    // The irreversible pass-card creation is surfaced for reconciliation.
    let orphaned = registry.events().iter().any(|e| {
        matches!(
            e.kind,
            ClubEventKind::IrreversibleStepCommitted {
                stage: InitStage::PermanentPass,
                ..
            }
        )
    });
    assert!(orphaned);
}

#[tokio::test]
async fn creation_can_be_retried_after_outage() {
    let w = world();
    w.domains.register(&normalize("alpha"), 7, ALICE);
    w.temporary.fail_method("initialize_club");
    assert!(w
        .registry
        .write()
        .create_club("alpha", ALICE, 2_000)
        .await
        .is_err());

    w.temporary.restore_method("initialize_club");
    w.registry
        .write()
        .create_club("alpha", ALICE, 2_100)
        .await
        .expect("retry succeeds");
    assert!(w.registry.read().is_club_active("alpha"));
}

#[tokio::test]
async fn admin_transfer_survives_follower_outage() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    // Followers are eventually consistent; the registry is authoritative.
    w.permanent.fail_method("update_admin");
    w.temporary.fail_method("update_club_admin");
    w.token_access.fail_method("update_club_admin");

    w.registry
        .write()
        .transfer_admin("alpha", BOB, ALICE, 3_000)
        .await
        .expect("transfer succeeds despite followers");

    let registry = w.registry.read();
    assert_eq!(registry.get_club_admin("alpha").unwrap(), BOB);
    let history = &registry.get_club("alpha").unwrap().admin_history;
    assert_eq!(history.len(), 1);
    assert_eq!((history[0].from, history[0].to), (ALICE, BOB));
}

#[tokio::test]
async fn membership_is_monotone_under_any_call_sequence() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;

    {
        let mut registry = w.registry.write();
        registry
            .update_membership(BOB, "alpha", true, TEMPORARY)
            .unwrap();
        // Revocations, duplicates, and repeated grants change nothing.
        registry
            .update_membership(BOB, "alpha", false, TEMPORARY)
            .unwrap();
        registry
            .update_membership(BOB, "alpha", true, TEMPORARY)
            .unwrap();
        registry
            .update_membership(BOB, "alpha", false, TEMPORARY)
            .unwrap();
    }

    let registry = w.registry.read();
    assert!(registry.is_member("alpha", &BOB));
    assert_eq!(registry.get_club("alpha").unwrap().member_count, 2);
    // Exactly one MemberAdded for BOB.
    let additions = registry
        .events()
        .iter()
        .filter(|e| matches!(e.kind, ClubEventKind::MemberAdded { user, .. } if user == BOB))
        .count();
    assert_eq!(additions, 1);
}

#[tokio::test]
async fn second_club_same_owner_different_domain() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    w.found_club("beta", 8, ALICE).await;

    let registry = w.registry.read();
    assert_eq!(
        registry.get_user_clubs(&ALICE),
        vec!["alpha".to_owned(), "beta".to_owned()]
    );
    // Re-creating either fails.
    drop(registry);
    assert!(matches!(
        w.registry.write().create_club("alpha", ALICE, 0).await,
        Err(ClubError::ClubAlreadyExists { .. })
    ));
}

#[tokio::test]
async fn unauthorized_membership_writers_are_rejected() {
    let w = world();
    w.found_club("alpha", 7, ALICE).await;
    let mut registry = w.registry.write();
    // Not even the club admin may write membership directly.
    assert!(matches!(
        registry.update_membership(CAROL, "alpha", true, ALICE),
        Err(ClubError::NotAuthorized)
    ));
    // The registry owner may.
    registry
        .update_membership(CAROL, "alpha", true, crate::fixtures::OWNER)
        .unwrap();
    assert!(registry.is_member("alpha", &CAROL));
}
