use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use escrowed_auction::asset::{AuctionAssetUnchecked, BidCurrencyUnchecked};
use escrowed_auction::deadline::Phase;
use escrowed_auction::sealed_auction::{AuctionState, ExecuteMsg, InstantiateMsg, QueryMsg};
use escrowed_auction::PhaseError;

use crate::contract::{execute, instantiate, migrate, query};
use crate::ContractError;

const OPERATOR: &str = "operator";
const ALICE: &str = "alice";
const BOB: &str = "bob";
const CAROL: &str = "carol";
const ITEM: &str = "uitem";
const DENOM: &str = "ucoin";

fn auction_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query).with_migrate(migrate))
}

fn setup() -> (App, Addr) {
    let mut app = App::new(|router, _, storage| {
        router.bank.init_balance(storage, &Addr::unchecked(OPERATOR), coins(1, ITEM)).unwrap();
        for bidder in [ALICE, BOB, CAROL] {
            router.bank.init_balance(storage, &Addr::unchecked(bidder), coins(1_000, DENOM)).unwrap();
        }
    });

    let code_id = app.store_code(auction_contract());
    let auction = app
        .instantiate_contract(
            code_id,
            Addr::unchecked(OPERATOR),
            &InstantiateMsg {
                owner: None,
                asset: AuctionAssetUnchecked::Native {
                    denom: ITEM.to_string(),
                    amount: Uint128::one(),
                },
                bid_currency: BidCurrencyUnchecked::Native {
                    denom: DENOM.to_string(),
                },
            },
            &[],
            "sealed-bid-auction",
            Some(OPERATOR.to_string()),
        )
        .unwrap();

    app.execute_contract(
        Addr::unchecked(OPERATOR),
        auction.clone(),
        &ExecuteMsg::Start {
            bidding_duration: 10,
            reveal_duration: 5,
        },
        &coins(1, ITEM),
    )
    .unwrap();

    (app, auction)
}

fn balance(app: &App, addr: &str, denom: &str) -> u128 {
    app.wrap().query_balance(addr, denom).unwrap().amount.u128()
}

fn commit(app: &mut App, auction: &Addr, bidder: &str, price: u128) {
    let commitment: Binary = app
        .wrap()
        .query_wasm_smart(
            auction,
            &QueryMsg::Commitment {
                bidder: bidder.to_string(),
                price: Uint128::new(price),
            },
        )
        .unwrap();
    app.execute_contract(
        Addr::unchecked(bidder),
        auction.clone(),
        &ExecuteMsg::Commit {
            commitment,
        },
        &[],
    )
    .unwrap();
}

fn reveal(app: &mut App, auction: &Addr, bidder: &str, price: u128) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(bidder),
        auction.clone(),
        &ExecuteMsg::Reveal {
            price: Uint128::new(price),
        },
        &coins(price, DENOM),
    )
}

fn settle(app: &mut App, auction: &Addr) -> AnyResult<AppResponse> {
    app.execute_contract(Addr::unchecked(OPERATOR), auction.clone(), &ExecuteMsg::Settle {}, &[])
}

#[test]
fn second_price_settlement_reconciles_balances() {
    let (mut app, auction) = setup();
    assert_eq!(balance(&app, auction.as_str(), ITEM), 1);

    commit(&mut app, &auction, ALICE, 50);
    commit(&mut app, &auction, BOB, 60);
    commit(&mut app, &auction, CAROL, 30);
    assert_eq!(balance(&app, auction.as_str(), DENOM), 0);

    app.update_block(|block| block.height += 10);

    reveal(&mut app, &auction, ALICE, 50).unwrap();
    assert_eq!(balance(&app, auction.as_str(), DENOM), 50);

    reveal(&mut app, &auction, CAROL, 30).unwrap();
    assert_eq!(balance(&app, auction.as_str(), DENOM), 50);
    assert_eq!(balance(&app, CAROL, DENOM), 1_000);

    reveal(&mut app, &auction, BOB, 60).unwrap();
    assert_eq!(balance(&app, auction.as_str(), DENOM), 60);
    assert_eq!(balance(&app, ALICE, DENOM), 1_000);
    assert_eq!(balance(&app, BOB, DENOM), 940);

    let err = settle(&mut app, &auction).unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::AuctionStillActive {
            ..
        }
    ));

    app.update_block(|block| block.height += 5);
    settle(&mut app, &auction).unwrap();

    assert_eq!(balance(&app, BOB, ITEM), 1);
    assert_eq!(balance(&app, BOB, DENOM), 950);
    assert_eq!(balance(&app, OPERATOR, DENOM), 50);
    assert_eq!(balance(&app, auction.as_str(), DENOM), 0);
    assert_eq!(balance(&app, auction.as_str(), ITEM), 0);

    let state: AuctionState = app.wrap().query_wasm_smart(&auction, &QueryMsg::Auction {}).unwrap();
    assert_eq!(state.phase, Phase::Concluded);
    assert_eq!(state.second_price, Uint128::new(50));

    let err = settle(&mut app, &auction).unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::Phase(PhaseError::AlreadyConcluded)
    );
    assert_eq!(balance(&app, OPERATOR, DENOM), 50);
}

#[test]
fn mismatched_reveal_keeps_funds_with_bidder() {
    let (mut app, auction) = setup();
    commit(&mut app, &auction, ALICE, 50);
    app.update_block(|block| block.height += 10);

    let err = reveal(&mut app, &auction, ALICE, 40).unwrap_err();
    assert_eq!(err.downcast::<ContractError>().unwrap(), ContractError::CommitmentMismatch);
    assert_eq!(balance(&app, ALICE, DENOM), 1_000);
    assert_eq!(balance(&app, auction.as_str(), DENOM), 0);

    // reveals close with the reveal phase
    app.update_block(|block| block.height += 5);
    assert!(reveal(&mut app, &auction, ALICE, 50).is_err());

    settle(&mut app, &auction).unwrap();
    assert_eq!(balance(&app, OPERATOR, ITEM), 1);
    assert_eq!(balance(&app, ALICE, DENOM), 1_000);
}
