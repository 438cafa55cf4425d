//! Shared fixtures: a fully wired registry + resolver over the in-memory
//! collaborator adapters, with handles kept so scenarios can script them.

use club_registry::adapters::{
    InMemoryDomainRegistry, InMemoryPermanentLedger, InMemoryTemporaryLedger,
    InMemoryTokenAccessLedger,
};
use club_registry::ports::{
    ClubRegistryApi, DomainRegistryClient, PermanentMembershipLedger, TemporaryMembershipLedger,
    TokenAccessLedger,
};
use club_registry::{ClubRegistry, Collaborators, ContractConfig};
use club_resolver::MembershipResolver;
use club_types::Address;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registry owner in every scenario.
pub const OWNER: Address = [0xaa; 20];
/// Default first club founder.
pub const ALICE: Address = [0x01; 20];
/// Second actor.
pub const BOB: Address = [0x02; 20];
/// Third actor.
pub const CAROL: Address = [0x03; 20];
/// Configured pass-card factory address.
pub const FACTORY: Address = [0xf1; 20];
/// Configured temporary-ledger address.
pub const TEMPORARY: Address = [0xf2; 20];
/// Configured token-ledger address.
pub const TOKEN_ACCESS: Address = [0xf3; 20];

/// A wired world: scriptable collaborators, the registry, and a resolver.
pub struct World {
    /// Scriptable domain registry.
    pub domains: Arc<InMemoryDomainRegistry>,
    /// Scriptable permanent ledger.
    pub permanent: Arc<InMemoryPermanentLedger>,
    /// Scriptable temporary ledger.
    pub temporary: Arc<InMemoryTemporaryLedger>,
    /// Scriptable token-access ledger.
    pub token_access: Arc<InMemoryTokenAccessLedger>,
    /// The registry under test, shared with the resolver.
    pub registry: Arc<RwLock<ClubRegistry>>,
    /// Resolver reading through the registry.
    pub resolver: MembershipResolver<ClubRegistry>,
}

/// Build a world whose temporary ledger's clock reads 1_000.
pub fn world() -> World {
    init_tracing();
    let domains = Arc::new(InMemoryDomainRegistry::new());
    let permanent = Arc::new(InMemoryPermanentLedger::new(FACTORY));
    let temporary = Arc::new(InMemoryTemporaryLedger::new(1_000));
    let token_access = Arc::new(InMemoryTokenAccessLedger::new());

    let registry = Arc::new(RwLock::new(ClubRegistry::new(
        OWNER,
        ContractConfig {
            registry_contract: [0xd0; 20],
            nft_contract: [0xd1; 20],
            permanent_factory: FACTORY,
            temporary: TEMPORARY,
            token_access: TOKEN_ACCESS,
        },
        Collaborators {
            domains: Arc::clone(&domains) as Arc<dyn DomainRegistryClient>,
            permanent: Arc::clone(&permanent) as Arc<dyn PermanentMembershipLedger>,
            temporary: Arc::clone(&temporary) as Arc<dyn TemporaryMembershipLedger>,
            token_access: Arc::clone(&token_access) as Arc<dyn TokenAccessLedger>,
        },
    )));

    let resolver = MembershipResolver::new(
        Arc::clone(&registry),
        Arc::clone(&permanent) as Arc<dyn PermanentMembershipLedger>,
        Arc::clone(&temporary) as Arc<dyn TemporaryMembershipLedger>,
        Arc::clone(&token_access) as Arc<dyn TokenAccessLedger>,
    );

    World {
        domains,
        permanent,
        temporary,
        token_access,
        registry,
        resolver,
    }
}

impl World {
    /// Register `domain` to `owner` under `token_id` and create its club.
    pub async fn found_club(&self, domain: &str, token_id: u64, owner: Address) {
        let name = club_registry::domain::normalize(domain);
        self.domains.register(&name, token_id, owner);
        self.registry
            .write()
            .create_club(domain, owner, 2_000)
            .await
            .expect("club creation");
    }
}

/// Install the env-filtered subscriber once per process.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    });
}
