#![cfg(not(target_arch = "wasm32"))]

mod utils;

use crowdsale::{
    AllowanceDelivery, Amount, Call, ConstructionError, Crowdsale, DeliveryError, Invocation,
    SaleError, SaleEvent, TokenError, TokenLedger, TokenPurchase, Unrestricted, Value,
};

use crate::utils::*;

fn allowance_sale(
    rate: u128,
    allowance: Amount,
) -> crowdsale::Runtime<crowdsale::MemToken, AllowanceDelivery, Unrestricted> {
    let mut host = host(tokens(1_000_000));
    host.token_mut()
        .transfer(ISSUER, TOKEN_WALLET, tokens(100_000))
        .unwrap();
    host.token_mut()
        .approve(TOKEN_WALLET, SALE, allowance)
        .unwrap();
    setup(host, fixed(rate), AllowanceDelivery::new(TOKEN_WALLET), Unrestricted)
}

#[test]
fn fractional_purchase() {
    let mut runtime = allowance_sale(1, tokens(10_000));
    let value = Value::from_units(0, 42, 2).unwrap();

    let receipt = runtime
        .execute(Call::with_value(ALICE, value), Invocation::BuyTokens { beneficiary: BOB })
        .unwrap();

    let expected = Amount::from_units(0, 42, 2).unwrap();
    assert_eq!(receipt.events, vec![SaleEvent::TokenPurchase(TokenPurchase {
        purchaser: ALICE,
        beneficiary: BOB,
        value,
        amount: expected,
    })]);
    let host = runtime.host();
    assert_eq!(host.token().balance_of(BOB), expected);
    assert_eq!(host.token().balance_of(TOKEN_WALLET), tokens(100_000).saturating_sub(expected));
    assert_eq!(runtime.sale().remaining_tokens(host), Amount::from_units(9999, 58, 2));
    assert_eq!(host.funds().balance_of(WALLET), value);
    assert_eq!(host.funds().balance_of(ALICE), coins(1000).saturating_sub(value));
    assert_eq!(runtime.sale().raised(), value);
}

#[test]
fn bare_transfer_buys_for_caller() {
    let mut runtime = allowance_sale(10, tokens(10_000));
    let receipt = runtime
        .execute(Call::with_value(CAROL, coins(2)), Invocation::Send)
        .unwrap();
    let purchase = receipt.purchase().unwrap();
    assert_eq!(purchase.beneficiary, CAROL);
    assert_eq!(purchase.amount, tokens(20));
    assert_eq!(runtime.host().token().balance_of(CAROL), tokens(20));
}

#[test]
fn allowance_decreases_by_delivered_amount() {
    let mut runtime = allowance_sale(3, tokens(100));
    let mut remaining = tokens(100);
    for value in [1u128, 5, 7, 11] {
        let value = coins(value);
        runtime.execute(Call::with_value(ALICE, value), Invocation::Send).unwrap();
        remaining = remaining
            .checked_sub(Amount::from(value.value() * 3))
            .unwrap();
        assert_eq!(runtime.sale().remaining_tokens(runtime.host()), Some(remaining));
    }
    assert_eq!(remaining, tokens(28));
}

#[test]
fn exceeding_allowance_fails() {
    let mut runtime = allowance_sale(1, tokens(10));
    let before = snapshot(runtime.host());

    let err = runtime
        .execute(Call::with_value(ALICE, coins(11)), Invocation::Send)
        .unwrap_err();

    assert_eq!(
        err,
        SaleError::Delivery(DeliveryError::Token(TokenError::InsufficientAllowance(
            TOKEN_WALLET,
            SALE,
            tokens(10),
            tokens(11)
        )))
    );
    assert_eq!(snapshot(runtime.host()), before);
    assert_eq!(runtime.sale().remaining_tokens(runtime.host()), Some(tokens(10)));
    assert!(runtime.host().events().is_empty());
    assert_eq!(runtime.sale().raised(), Value::ZERO);

    runtime
        .execute(Call::with_value(ALICE, coins(10)), Invocation::Send)
        .unwrap();
    assert_eq!(runtime.sale().remaining_tokens(runtime.host()), Some(Amount::ZERO));
}

#[test]
fn construction() {
    let host = host(tokens(1000));
    assert_eq!(
        Crowdsale::deploy(&host, params(fixed(1)), AllowanceDelivery::new(TOKEN), Unrestricted)
            .unwrap_err(),
        ConstructionError::TokenWalletIsToken(TOKEN)
    );
    assert_eq!(
        Crowdsale::deploy(
            &host,
            params(fixed(1)),
            AllowanceDelivery::new(crowdsale::Account::ZERO),
            Unrestricted
        )
        .unwrap_err(),
        ConstructionError::NullTokenWallet
    );
    let sale = Crowdsale::deploy(
        &host,
        params(fixed(1)),
        AllowanceDelivery::new(TOKEN_WALLET),
        Unrestricted,
    )
    .unwrap();
    assert_eq!(sale.remaining_tokens(&host), Some(Amount::ZERO));
}
