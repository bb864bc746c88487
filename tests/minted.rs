#![cfg(not(target_arch = "wasm32"))]

mod utils;

use crowdsale::{
    Call, DeliveryError, Invocation, MemToken, MintedDelivery, SaleError, TokenError,
    TokenLedger, Unrestricted,
};

use crate::utils::*;

#[test]
fn mints_exact_amount() {
    let mut host = host(tokens(1000));
    host.token_mut().transfer_minter(ISSUER, SALE).unwrap();
    let mut runtime = setup(host, fixed(1000), MintedDelivery, Unrestricted);
    let supply = runtime.host().token().total_supply();

    let receipt = runtime
        .execute(Call::with_value(ALICE, coins(5)), Invocation::Send)
        .unwrap();

    assert_eq!(receipt.purchase().unwrap().amount, tokens(5000));
    let token = runtime.host().token();
    assert_eq!(token.balance_of(ALICE), tokens(5000));
    assert_eq!(token.total_supply(), supply.checked_add(tokens(5000)).unwrap());
    assert_eq!(runtime.host().funds().balance_of(WALLET), coins(5));
    assert_eq!(runtime.sale().remaining_tokens(runtime.host()), None);
}

#[test]
fn requires_minter_role() {
    let mut runtime = setup(host(tokens(1000)), fixed(1000), MintedDelivery, Unrestricted);
    let before = snapshot(runtime.host());

    assert_eq!(
        runtime.execute(Call::with_value(ALICE, coins(5)), Invocation::Send),
        Err(SaleError::Delivery(DeliveryError::Token(TokenError::NotMinter(SALE))))
    );
    assert_eq!(snapshot(runtime.host()), before);

    runtime
        .host_mut()
        .token_mut()
        .transfer_minter(ISSUER, SALE)
        .unwrap();
    assert!(runtime
        .execute(Call::with_value(ALICE, coins(5)), Invocation::Send)
        .is_ok());
}

#[test]
fn supply_cap_is_enforced_by_ledger() {
    let mut token = MemToken::issue(TOKEN, ISSUER, tokens(1000)).with_cap(tokens(2000));
    token.transfer_minter(ISSUER, SALE).unwrap();
    let mut runtime = setup(host_with(token), fixed(100), MintedDelivery, Unrestricted);
    assert_eq!(runtime.sale().remaining_tokens(runtime.host()), Some(tokens(1000)));

    runtime
        .execute(Call::with_value(BOB, coins(6)), Invocation::Send)
        .unwrap();
    assert_eq!(runtime.sale().remaining_tokens(runtime.host()), Some(tokens(400)));

    let err = runtime
        .execute(Call::with_value(BOB, coins(5)), Invocation::Send)
        .unwrap_err();
    assert_eq!(
        err,
        SaleError::Delivery(DeliveryError::Token(TokenError::CapExceeded(tokens(2000))))
    );
    assert_eq!(runtime.host().token().total_supply(), tokens(1600));
    assert_eq!(runtime.host().funds().balance_of(BOB), coins(994));
    assert_eq!(runtime.sale().raised(), coins(6));
    assert_eq!(runtime.host().token().balance_of(BOB), tokens(600));
}
