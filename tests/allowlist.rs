#![cfg(not(target_arch = "wasm32"))]

mod utils;

use crowdsale::{
    Account, Allowlist, AuthorizationError, Call, DirectDelivery, Invocation, Runtime, SaleError,
    SaleEvent, TokenLedger, ValidationError, MAX_BATCH,
};

use crate::utils::*;

fn allowlisted(
    listed: impl IntoIterator<Item = Account>,
) -> Runtime<crowdsale::MemToken, DirectDelivery, Allowlist> {
    let mut host = host(tokens(1_000_000));
    host.token_mut()
        .transfer(ISSUER, SALE, tokens(100_000))
        .unwrap();
    setup(host, fixed(1), DirectDelivery, Allowlist::with(listed))
}

#[test]
fn beneficiary_is_checked_not_payer() {
    let mut runtime = allowlisted([ALICE]);

    // unlisted payer buying for a listed beneficiary
    runtime
        .execute(Call::with_value(BOB, coins(1)), Invocation::BuyTokens { beneficiary: ALICE })
        .unwrap();
    // listed payer buying for an unlisted beneficiary
    assert_eq!(
        runtime.execute(Call::with_value(ALICE, coins(1)), Invocation::BuyTokens {
            beneficiary: BOB
        }),
        Err(SaleError::Validation(ValidationError::NotAllowed(BOB)))
    );
    assert_eq!(
        runtime.execute(Call::with_value(BOB, coins(1)), Invocation::Send),
        Err(SaleError::Validation(ValidationError::NotAllowed(BOB)))
    );
    assert_eq!(runtime.host().token().balance_of(ALICE), tokens(1));
    assert_eq!(runtime.host().token().balance_of(BOB), tokens(0));
}

#[test]
fn removal_is_immediate() {
    let mut runtime = allowlisted([ALICE, BOB]);
    runtime
        .execute(Call::with_value(ALICE, coins(1)), Invocation::Send)
        .unwrap();

    let receipt = runtime
        .execute(Call::by(ISSUER), Invocation::RemoveFromAllowlist { account: ALICE })
        .unwrap();
    assert_eq!(receipt.events, vec![SaleEvent::AllowlistRemoved { account: ALICE }]);
    assert!(!runtime.sale().is_allowed(ALICE));
    assert!(runtime.sale().is_allowed(BOB));

    assert_eq!(
        runtime.execute(Call::with_value(ALICE, coins(1)), Invocation::Send),
        Err(SaleError::Validation(ValidationError::NotAllowed(ALICE)))
    );
}

#[test]
fn batch_operations() {
    let mut runtime = allowlisted([]);
    let receipt = runtime
        .execute(Call::by(ISSUER), Invocation::AddManyToAllowlist {
            accounts: vec![ALICE, BOB, CAROL],
        })
        .unwrap();
    assert_eq!(receipt.events.len(), 3);
    assert!(PURCHASERS.iter().all(|account| runtime.sale().is_allowed(*account)));

    runtime
        .execute(Call::by(ISSUER), Invocation::RemoveManyFromAllowlist {
            accounts: vec![ALICE, CAROL],
        })
        .unwrap();
    assert!(!runtime.sale().is_allowed(ALICE));
    assert!(runtime.sale().is_allowed(BOB));
    assert!(!runtime.sale().is_allowed(CAROL));
}

#[test]
fn oversized_batch_changes_nothing() {
    let mut runtime = allowlisted([]);
    let accounts = (1..=MAX_BATCH as u8 + 1)
        .map(Account::with_fill)
        .collect::<Vec<_>>();

    assert_eq!(
        runtime.execute(Call::by(ISSUER), Invocation::AddManyToAllowlist {
            accounts: accounts.clone()
        }),
        Err(SaleError::Validation(ValidationError::BatchTooLarge(MAX_BATCH + 1)))
    );
    assert!(runtime.host().events().is_empty());
    assert!(accounts.iter().all(|account| !runtime.sale().is_allowed(*account)));

    runtime
        .execute(Call::by(ISSUER), Invocation::AddManyToAllowlist {
            accounts: accounts[..MAX_BATCH].to_vec(),
        })
        .unwrap();
    assert_eq!(runtime.sale().gate().len(), MAX_BATCH);
}

#[test]
fn null_account_rejects_whole_batch() {
    let mut runtime = allowlisted([]);
    assert_eq!(
        runtime.execute(Call::by(ISSUER), Invocation::AddManyToAllowlist {
            accounts: vec![ALICE, Account::ZERO],
        }),
        Err(SaleError::Validation(ValidationError::NullAccount))
    );
    assert!(!runtime.sale().is_allowed(ALICE));
}

#[test]
fn only_owner_manages_list() {
    let mut runtime = allowlisted([]);
    assert_eq!(
        runtime.execute(Call::by(ALICE), Invocation::AddToAllowlist { account: ALICE }),
        Err(SaleError::Authorization(AuthorizationError::NotOwner(ALICE)))
    );
    assert!(!runtime.sale().is_allowed(ALICE));

    runtime
        .execute(Call::by(ISSUER), Invocation::AddToAllowlist { account: ALICE })
        .unwrap();
    assert_eq!(
        runtime.execute(Call::by(BOB), Invocation::RemoveFromAllowlist { account: ALICE }),
        Err(SaleError::Authorization(AuthorizationError::NotOwner(BOB)))
    );
    assert!(runtime.sale().is_allowed(ALICE));
}
