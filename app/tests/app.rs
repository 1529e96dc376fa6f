use num_bigint::BigUint;
use skaf_app::*;
use skaf_core::constants::FEE_COLLECTOR_NAME;
use skaf_core::{Address, AddressValidator, Context, Ledger, TxError};
use skaf_feedist::{MsgEnableFeeDistribution, MsgSetDeveloperAddress};
use tempfile::TempDir;

const PAYER: [u8; 20] = [0x01; 20];
const DEVELOPER: [u8; 20] = [0xde; 20];
const AUTHORITY: [u8; 20] = [0xaa; 20];

fn addr(app: &SkafApp, payload: &[u8]) -> Address {
    app.address_validator().encode(payload).unwrap()
}

fn base_config() -> NodeConfig {
    let mut config = NodeConfig::default();
    let validator = skaf_core::Bech32AddressValidator::new("skaf").unwrap();
    config.node.authority = validator.encode(&AUTHORITY).unwrap().to_string();
    config.genesis.accounts.push(GenesisAccount {
        address: validator.encode(&PAYER).unwrap().to_string(),
        coins: "1000000000uskaf".to_string(),
    });
    config
}

fn app_with(config: NodeConfig) -> SkafApp {
    let app = SkafApp::new(config).unwrap();
    app.init_genesis().unwrap();
    app
}

fn send_tx(app: &SkafApp, fee: &str, amount: &str) -> AppTx {
    AppTx::new(addr(app, &PAYER), fee.parse().unwrap()).with_msg(AppMsg::Send {
        from: addr(app, &PAYER),
        to: addr(app, &[0x02; 20]),
        amount: amount.parse().unwrap(),
    })
}

fn deliver(app: &SkafApp, tx: &AppTx) -> Result<TxResult, TxError> {
    let mut ctx = Context::new(7).with_tx_bytes(tx.tx_bytes());
    app.deliver_tx(&mut ctx, tx, false)
}

fn enable_distribution(app: &SkafApp) {
    let authority = app.authority().to_string();
    let developer = addr(app, &DEVELOPER).to_string();
    let tx = AppTx::new(addr(app, &PAYER), "0uskaf".parse().unwrap())
        .with_msg(AppMsg::SetDeveloperAddress(MsgSetDeveloperAddress::new(
            &authority, developer,
        )))
        .with_msg(AppMsg::EnableFeeDistribution(MsgEnableFeeDistribution::new(
            authority, true,
        )));
    assert!(deliver(app, &tx).unwrap().success);
}

fn collector_balance(app: &SkafApp) -> String {
    let collector = app.ledger().module_address(FEE_COLLECTOR_NAME).unwrap();
    app.ledger().balance(&collector).to_string()
}

#[test]
fn test_disabled_fee_never_reaches_developer() {
    let app = app_with(base_config());

    let result = deliver(&app, &send_tx(&app, "100uskaf", "5uskaf")).unwrap();
    assert!(result.success);

    assert!(app.ledger().balance(&addr(&app, &DEVELOPER)).is_empty());
    assert_eq!(collector_balance(&app), "100uskaf");
    assert!(result.events.iter().all(|e| e.kind != "fee_distribution"));
}

#[test]
fn test_post_stage_distributes_after_success() {
    let app = app_with(base_config());
    enable_distribution(&app);

    let result = deliver(&app, &send_tx(&app, "1000000uskaf", "5uskaf")).unwrap();
    assert!(result.success);
    assert_eq!(
        app.ledger().balance(&addr(&app, &DEVELOPER)).to_string(),
        "100000uskaf"
    );
    assert_eq!(collector_balance(&app), "900000uskaf");

    let kinds: Vec<&str> = result.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["transfer", "developer_fee_distribution", "fee_distribution"]
    );
}

#[test]
fn test_post_stage_skips_failed_tx() {
    let app = app_with(base_config());
    enable_distribution(&app);

    // payer cannot afford the transfer, but pays the fee
    let result = deliver(&app, &send_tx(&app, "1000uskaf", "999999999999uskaf")).unwrap();
    assert!(!result.success);
    assert!(result.log.contains("Insufficient funds"));
    assert!(app.ledger().balance(&addr(&app, &DEVELOPER)).is_empty());
    assert_eq!(collector_balance(&app), "1000uskaf");
}

#[test]
fn test_ante_stage_distributes_even_if_tx_fails() {
    let mut config = base_config();
    config.node.distribution_stage = DistributionStage::Ante;
    let app = app_with(config);
    enable_distribution(&app);

    let result = deliver(&app, &send_tx(&app, "1000uskaf", "999999999999uskaf")).unwrap();
    assert!(!result.success);
    assert_eq!(
        app.ledger().balance(&addr(&app, &DEVELOPER)).to_string(),
        "100uskaf"
    );
    assert_eq!(collector_balance(&app), "900uskaf");
}

#[test]
fn test_unpaid_fee_rejects_tx() {
    let app = app_with(base_config());
    let tx = AppTx::new(addr(&app, &[0x09; 20]), "10uskaf".parse().unwrap()).with_msg(
        AppMsg::Send {
            from: addr(&app, &[0x09; 20]),
            to: addr(&app, &PAYER),
            amount: "1uskaf".parse().unwrap(),
        },
    );

    let err = deliver(&app, &tx).unwrap_err();
    assert!(matches!(err, TxError::Ledger(_)));
    assert_eq!(collector_balance(&app), "");
}

#[test]
fn test_simulate_moves_nothing() {
    let app = app_with(base_config());
    enable_distribution(&app);

    let tx = send_tx(&app, "1000uskaf", "5uskaf");
    let mut ctx = Context::new(7);
    let result = app.deliver_tx(&mut ctx, &tx, true).unwrap();

    assert!(result.success);
    assert!(result.events.is_empty());
    assert_eq!(collector_balance(&app), "");
    assert!(app.ledger().balance(&addr(&app, &[0x02; 20])).is_empty());
}

#[test]
fn test_only_authority_configures() {
    let app = app_with(base_config());
    let outsider = addr(&app, &PAYER).to_string();
    let tx = AppTx::new(addr(&app, &PAYER), "10uskaf".parse().unwrap()).with_msg(
        AppMsg::SetDeveloperAddress(MsgSetDeveloperAddress::new(
            outsider.clone(),
            outsider,
        )),
    );

    let result = deliver(&app, &tx).unwrap();
    assert!(!result.success);
    assert!(result.log.contains("Unauthorized"));
    assert!(app
        .feedist()
        .fee_distribution_config()
        .unwrap()
        .developer_address
        .is_empty());
    // the fee is still collected
    assert_eq!(collector_balance(&app), "10uskaf");
}

#[test]
fn test_empty_tx_rejected() {
    let app = app_with(base_config());
    let tx = AppTx::new(addr(&app, &PAYER), "10uskaf".parse().unwrap());
    assert!(matches!(
        deliver(&app, &tx),
        Err(TxError::InvalidRequest(_))
    ));
}

#[test]
fn test_begin_block_feeds_fee_collector() {
    let app = app_with(base_config());

    let events = app.begin_block(1).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "mint");
    assert_eq!(collector_balance(&app), "1000000uskaf");
    assert_eq!(
        app.ledger().supply("uskaf"),
        BigUint::from(1_001_000_000u64)
    );
}

#[test]
fn test_invalid_genesis_writes_nothing() {
    let mut config = base_config();
    config.genesis.fee_distribution.enabled = true;
    let app = SkafApp::new(config).unwrap();

    assert!(matches!(app.init_genesis(), Err(AppError::Genesis(_))));
    assert!(!app.is_initialized().unwrap());
    assert!(app.ledger().balance(&addr(&app, &PAYER)).is_empty());
}

#[test]
fn test_sled_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = base_config();
    config.node.data_dir = Some(temp_dir.path().join("data"));

    {
        let app = app_with(config.clone());
        enable_distribution(&app);
        app.begin_block(1).unwrap();
    }

    let app = SkafApp::new(config).unwrap();
    assert!(app.is_initialized().unwrap());

    let status = app.status().unwrap();
    assert!(status.fee_distribution.enabled);
    assert_eq!(
        status.fee_distribution.developer_address,
        addr(&app, &DEVELOPER).as_str()
    );
    assert_eq!(status.params.mint_denom, "uskaf");

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["distribution_stage"], "post");
    assert_eq!(json["minter"]["annual_provisions"], "5000.000000000000000000");
}
