use num_bigint::BigUint;
use skaf_core::constants::FEE_COLLECTOR_NAME;
use skaf_core::{module_address, Bech32AddressValidator, Context, Dec, InMemoryLedger, Ledger};
use skaf_economics::*;
use skaf_storage::{KvStore, MemStore};
use std::sync::Arc;

fn setup(policy: IssuancePolicy) -> (MintKeeper, Arc<InMemoryLedger>, Arc<MemStore>) {
    let validator = Bech32AddressValidator::new("skaf").unwrap();
    let ledger = Arc::new(InMemoryLedger::new());
    for name in [constants::MODULE_NAME, FEE_COLLECTOR_NAME] {
        ledger.register_module(name, module_address(&validator, name).unwrap());
    }

    let store = Arc::new(MemStore::new());
    let keeper = MintKeeper::new(
        store.clone(),
        ledger.clone(),
        Arc::new(FixedStakingInfo::default()),
        policy,
    );
    (keeper, ledger, store)
}

#[test]
fn test_issuance_over_many_blocks() {
    let (keeper, ledger, _) = setup(IssuancePolicy::default());
    init_genesis(&keeper, &GenesisState::default()).unwrap();

    for height in 1..=10 {
        let mut ctx = Context::new(height);
        keeper.begin_block(&mut ctx).unwrap();
    }

    let collector = ledger.module_address(FEE_COLLECTOR_NAME).unwrap();
    assert_eq!(ledger.balance(&collector).to_string(), "10000000uskaf");
    assert_eq!(ledger.supply("uskaf"), BigUint::from(10_000_000u64));

    // mint module keeps nothing
    let mint = ledger.module_address(constants::MODULE_NAME).unwrap();
    assert!(ledger.balance(&mint).is_empty());
}

#[test]
fn test_genesis_roundtrip_through_store() {
    let (keeper, _, store) = setup(IssuancePolicy::default());
    let state = GenesisState::new(
        Minter::new(Dec::new_with_prec(1, 2), Dec::from_int(42u32)),
        MintParams::default(),
    );
    init_genesis(&keeper, &state).unwrap();

    assert!(store.has(constants::MINTER_KEY).unwrap());
    assert!(store.has(constants::PARAMS_KEY).unwrap());
    assert_eq!(export_genesis(&keeper).unwrap(), state);
}

#[test]
fn test_invalid_genesis_leaves_store_empty() {
    let (keeper, _, store) = setup(IssuancePolicy::default());
    let state = GenesisState::new(
        Minter::default(),
        MintParams {
            blocks_per_year: 0,
            ..Default::default()
        },
    );

    assert!(init_genesis(&keeper, &state).is_err());
    assert!(store.is_empty());
}

#[test]
fn test_zero_block_reward_mints_nothing() {
    let policy = IssuancePolicy {
        block_reward: 0,
        ..Default::default()
    };
    let (keeper, ledger, _) = setup(policy);
    init_genesis(&keeper, &GenesisState::default()).unwrap();

    let mut ctx = Context::new(1);
    keeper.begin_block(&mut ctx).unwrap();

    assert_eq!(ledger.supply("uskaf"), BigUint::from(0u32));
    let event = ctx.events().of_kind("mint").next().unwrap();
    assert_eq!(event.attribute("amount"), Some("0"));
}

#[test]
fn test_minter_is_informational() {
    let policy = IssuancePolicy {
        fixed_inflation: Dec::new_with_prec(2, 2),
        ..Default::default()
    };
    let (keeper, ledger, _) = setup(policy);
    init_genesis(&keeper, &GenesisState::default()).unwrap();

    keeper.begin_block(&mut Context::new(1)).unwrap();

    // inflation changes the report, never the issued amount
    let minter = keeper.minter().unwrap();
    assert_eq!(minter.inflation, Dec::new_with_prec(2, 2));
    assert_eq!(minter.annual_provisions, Dec::from_int(20_000u32));
    assert_eq!(ledger.supply("uskaf"), BigUint::from(1_000_000u64));
}
