#![cfg(not(target_arch = "wasm32"))]

mod utils;

use crowdsale::{
    Call, DirectDelivery, IndividualCaps, Invocation, MemToken, Runtime, SaleError, SaleEvent,
    TokenLedger, ValidationError, Value,
};

use crate::utils::*;

fn capped() -> Runtime<MemToken, DirectDelivery, IndividualCaps> {
    let mut host = host(tokens(1_000_000));
    host.token_mut()
        .transfer(ISSUER, SALE, tokens(100_000))
        .unwrap();
    setup(host, fixed(1), DirectDelivery, IndividualCaps::new())
}

#[test]
fn uncapped_beneficiary_cant_buy() {
    let mut runtime = capped();
    assert_eq!(runtime.sale().user_cap(ALICE), Some(Value::ZERO));
    assert_eq!(
        runtime.execute(Call::with_value(ALICE, coins(1)), Invocation::Send),
        Err(SaleError::Validation(ValidationError::CapExceeded(ALICE, coins(1), Value::ZERO)))
    );
}

#[test]
fn contributions_stay_within_cap() {
    let mut runtime = capped();
    let receipt = runtime
        .execute(Call::by(ISSUER), Invocation::SetUserCap { beneficiary: ALICE, cap: coins(10) })
        .unwrap();
    assert_eq!(receipt.events, vec![SaleEvent::CapSet { beneficiary: ALICE, cap: coins(10) }]);

    runtime
        .execute(Call::with_value(ALICE, coins(4)), Invocation::Send)
        .unwrap();
    // paid by somebody else, still counts against the beneficiary
    runtime
        .execute(Call::with_value(BOB, coins(6)), Invocation::BuyTokens { beneficiary: ALICE })
        .unwrap();
    assert_eq!(runtime.sale().user_contribution(ALICE), Some(coins(10)));

    assert_eq!(
        runtime.execute(Call::with_value(ALICE, Value::from(1u32)), Invocation::Send),
        Err(SaleError::Validation(ValidationError::CapExceeded(
            ALICE,
            coins(10).checked_add(1u32).unwrap(),
            coins(10)
        )))
    );
    assert_eq!(runtime.host().token().balance_of(ALICE), tokens(10));
}

#[test]
fn failed_purchase_does_not_count() {
    let mut runtime = capped();
    runtime
        .execute(Call::by(ISSUER), Invocation::SetUserCap { beneficiary: ALICE, cap: coins(5000) })
        .unwrap();

    // ALICE has only 1000 coins
    assert!(runtime
        .execute(Call::with_value(ALICE, coins(2000)), Invocation::Send)
        .is_err());
    assert_eq!(runtime.sale().user_contribution(ALICE), Some(Value::ZERO));

    runtime
        .execute(Call::with_value(ALICE, coins(1000)), Invocation::Send)
        .unwrap();
    assert_eq!(runtime.sale().user_contribution(ALICE), Some(coins(1000)));
}

#[test]
fn group_cap() {
    let mut runtime = capped();
    let receipt = runtime
        .execute(Call::by(ISSUER), Invocation::SetGroupCap {
            beneficiaries: PURCHASERS.to_vec(),
            cap: coins(3),
        })
        .unwrap();
    assert_eq!(receipt.events.len(), 3);
    for account in PURCHASERS {
        assert_eq!(runtime.sale().user_cap(account), Some(coins(3)));
        runtime
            .execute(Call::with_value(account, coins(3)), Invocation::Send)
            .unwrap();
    }
    assert_eq!(runtime.sale().raised(), coins(9));

    assert_eq!(
        runtime.execute(Call::by(BOB), Invocation::SetGroupCap {
            beneficiaries: vec![BOB],
            cap: coins(100),
        }),
        Err(crowdsale::AuthorizationError::NotOwner(BOB).into())
    );
    assert_eq!(runtime.sale().user_cap(BOB), Some(coins(3)));
}
