use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, ensure, ensure_eq, wasm_execute, Addr, Api, BankMsg, CosmosMsg, MessageInfo,
    StdResult, Uint128,
};
use cw20::Cw20ExecuteMsg;
use cw721::Cw721ExecuteMsg;

use crate::cw1155::Cw1155ExecuteMsg;
use crate::EscrowError;

/// Discriminant of the asset put up for auction.
#[cw_serde]
#[derive(Copy)]
pub enum AssetKind {
    Native,
    Fungible,
    NonFungible,
    SemiFungible,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Native => write!(f, "native"),
            AssetKind::Fungible => write!(f, "fungible"),
            AssetKind::NonFungible => write!(f, "non_fungible"),
            AssetKind::SemiFungible => write!(f, "semi_fungible"),
        }
    }
}

/// The asset held in escrow while an auction runs.
#[cw_serde]
pub enum AuctionAssetBase<T> {
    /// An amount of a bank denom, attached to the `start` message.
    Native {
        denom: String,
        amount: Uint128,
    },
    /// An amount of a cw20 token, pulled with `TransferFrom`.
    Fungible {
        contract: T,
        amount: Uint128,
    },
    /// A single cw721 item, pulled with `TransferNft`.
    NonFungible {
        contract: T,
        token_id: String,
    },
    /// An amount of a cw1155 token id, pulled with `SendFrom`.
    SemiFungible {
        contract: T,
        token_id: String,
        amount: Uint128,
    },
}

pub type AuctionAssetUnchecked = AuctionAssetBase<String>;
pub type AuctionAsset = AuctionAssetBase<Addr>;

impl AuctionAssetUnchecked {
    pub fn check(&self, api: &dyn Api) -> Result<AuctionAsset, EscrowError> {
        let asset = match self {
            AuctionAssetBase::Native {
                denom,
                amount,
            } => AuctionAssetBase::Native {
                denom: denom.clone(),
                amount: *amount,
            },
            AuctionAssetBase::Fungible {
                contract,
                amount,
            } => AuctionAssetBase::Fungible {
                contract: api.addr_validate(contract)?,
                amount: *amount,
            },
            AuctionAssetBase::NonFungible {
                contract,
                token_id,
            } => AuctionAssetBase::NonFungible {
                contract: api.addr_validate(contract)?,
                token_id: token_id.clone(),
            },
            AuctionAssetBase::SemiFungible {
                contract,
                token_id,
                amount,
            } => AuctionAssetBase::SemiFungible {
                contract: api.addr_validate(contract)?,
                token_id: token_id.clone(),
                amount: *amount,
            },
        };

        match &asset {
            AuctionAssetBase::Native {
                amount,
                ..
            }
            | AuctionAssetBase::Fungible {
                amount,
                ..
            } => ensure!(!amount.is_zero(), EscrowError::ZeroAmount),
            AuctionAssetBase::NonFungible {
                token_id,
                ..
            } => ensure!(!token_id.is_empty(), EscrowError::EmptyTokenId),
            AuctionAssetBase::SemiFungible {
                token_id,
                amount,
                ..
            } => {
                ensure!(!token_id.is_empty(), EscrowError::EmptyTokenId);
                ensure!(!amount.is_zero(), EscrowError::ZeroAmount);
            },
        }

        Ok(asset)
    }
}

impl AuctionAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            AuctionAssetBase::Native {
                ..
            } => AssetKind::Native,
            AuctionAssetBase::Fungible {
                ..
            } => AssetKind::Fungible,
            AuctionAssetBase::NonFungible {
                ..
            } => AssetKind::NonFungible,
            AuctionAssetBase::SemiFungible {
                ..
            } => AssetKind::SemiFungible,
        }
    }

    /// Takes the asset into custody of `contract` from the message sender.
    ///
    /// A native asset must be attached to the message in full. Token assets are
    /// pulled by the returned messages, so the sender must have granted the
    /// contract an allowance (cw20) or operator approval (cw721, cw1155).
    pub fn lock(&self, info: &MessageInfo, contract: &Addr) -> Result<Vec<CosmosMsg>, EscrowError> {
        let messages: Vec<CosmosMsg> = match self {
            AuctionAssetBase::Native {
                denom,
                amount,
            } => {
                let received = cw_utils::must_pay(info, denom)?;
                ensure_eq!(
                    received,
                    *amount,
                    EscrowError::FundsMismatch {
                        denom: denom.clone(),
                        expected: *amount,
                        received,
                    }
                );
                vec![]
            },
            AuctionAssetBase::Fungible {
                contract: token,
                amount,
            } => {
                cw_utils::nonpayable(info)?;
                vec![wasm_execute(
                    token,
                    &Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: contract.to_string(),
                        amount: *amount,
                    },
                    vec![],
                )?
                .into()]
            },
            AuctionAssetBase::NonFungible {
                contract: collection,
                token_id,
            } => {
                cw_utils::nonpayable(info)?;
                vec![wasm_execute(
                    collection,
                    &Cw721ExecuteMsg::TransferNft {
                        recipient: contract.to_string(),
                        token_id: token_id.clone(),
                    },
                    vec![],
                )?
                .into()]
            },
            AuctionAssetBase::SemiFungible {
                contract: collection,
                token_id,
                amount,
            } => {
                cw_utils::nonpayable(info)?;
                vec![wasm_execute(
                    collection,
                    &Cw1155ExecuteMsg::SendFrom {
                        from: info.sender.to_string(),
                        to: contract.to_string(),
                        token_id: token_id.clone(),
                        value: *amount,
                        msg: None,
                    },
                    vec![],
                )?
                .into()]
            },
        };

        Ok(messages)
    }

    /// Moves the whole asset out of the custody of `contract` to `to`.
    pub fn release_msg(&self, contract: &Addr, to: &Addr) -> StdResult<CosmosMsg> {
        match self {
            AuctionAssetBase::Native {
                denom,
                amount,
            } => Ok(BankMsg::Send {
                to_address: to.to_string(),
                amount: coins(amount.u128(), denom),
            }
            .into()),
            AuctionAssetBase::Fungible {
                contract: token,
                amount,
            } => Ok(wasm_execute(
                token,
                &Cw20ExecuteMsg::Transfer {
                    recipient: to.to_string(),
                    amount: *amount,
                },
                vec![],
            )?
            .into()),
            AuctionAssetBase::NonFungible {
                contract: collection,
                token_id,
            } => Ok(wasm_execute(
                collection,
                &Cw721ExecuteMsg::TransferNft {
                    recipient: to.to_string(),
                    token_id: token_id.clone(),
                },
                vec![],
            )?
            .into()),
            AuctionAssetBase::SemiFungible {
                contract: collection,
                token_id,
                amount,
            } => Ok(wasm_execute(
                collection,
                &Cw1155ExecuteMsg::SendFrom {
                    from: contract.to_string(),
                    to: to.to_string(),
                    token_id: token_id.clone(),
                    value: *amount,
                    msg: None,
                },
                vec![],
            )?
            .into()),
        }
    }
}

/// The currency bids are paid in.
#[cw_serde]
pub enum BidCurrencyBase<T> {
    /// A bank denom, attached to each bid.
    Native {
        denom: String,
    },
    /// A cw20 token, pulled from the bidder with `TransferFrom`.
    Fungible {
        contract: T,
    },
}

pub type BidCurrencyUnchecked = BidCurrencyBase<String>;
pub type BidCurrency = BidCurrencyBase<Addr>;

impl BidCurrencyUnchecked {
    pub fn check(&self, api: &dyn Api) -> Result<BidCurrency, EscrowError> {
        Ok(match self {
            BidCurrencyBase::Native {
                denom,
            } => BidCurrencyBase::Native {
                denom: denom.clone(),
            },
            BidCurrencyBase::Fungible {
                contract,
            } => BidCurrencyBase::Fungible {
                contract: api.addr_validate(contract)?,
            },
        })
    }
}

impl fmt::Display for BidCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidCurrencyBase::Native {
                denom,
            } => write!(f, "native:{denom}"),
            BidCurrencyBase::Fungible {
                contract,
            } => write!(f, "cw20:{contract}"),
        }
    }
}

impl BidCurrency {
    /// Checks the funds attached to `info` against a payment of `amount`.
    ///
    /// For a native currency exactly `amount` of the denom must be attached
    /// (nothing at all when `amount` is zero) and the attached amount is
    /// returned. A cw20 currency accepts no native funds and returns zero.
    pub fn receive(&self, info: &MessageInfo, amount: Uint128) -> Result<Uint128, EscrowError> {
        match self {
            BidCurrencyBase::Native {
                denom,
            } => {
                if amount.is_zero() {
                    cw_utils::nonpayable(info)?;
                    return Ok(Uint128::zero());
                }
                let received = cw_utils::must_pay(info, denom)?;
                ensure_eq!(
                    received,
                    amount,
                    EscrowError::FundsMismatch {
                        denom: denom.clone(),
                        expected: amount,
                        received,
                    }
                );
                Ok(received)
            },
            BidCurrencyBase::Fungible {
                ..
            } => {
                cw_utils::nonpayable(info)?;
                Ok(Uint128::zero())
            },
        }
    }

    /// Message pulling `amount` from `from` into `contract`. Native payments
    /// arrive attached to the message, so there is nothing to pull.
    pub fn pull_msg(
        &self,
        from: &Addr,
        contract: &Addr,
        amount: Uint128,
    ) -> StdResult<Option<CosmosMsg>> {
        match self {
            BidCurrencyBase::Fungible {
                contract: token,
            } if !amount.is_zero() => Ok(Some(wasm_execute(
                token,
                &Cw20ExecuteMsg::TransferFrom {
                    owner: from.to_string(),
                    recipient: contract.to_string(),
                    amount,
                },
                vec![],
            )?
            .into())),
            _ => Ok(None),
        }
    }

    /// Validates the payment attached to `info` and returns the message that
    /// completes custody of `amount`, if one is needed.
    pub fn lock(
        &self,
        info: &MessageInfo,
        contract: &Addr,
        amount: Uint128,
    ) -> Result<Option<CosmosMsg>, EscrowError> {
        self.receive(info, amount)?;
        Ok(self.pull_msg(&info.sender, contract, amount)?)
    }

    /// Message paying `amount` out of escrow to `to`. Zero amounts yield no
    /// message, bank sends of nothing are rejected by the chain.
    pub fn release_msg(&self, to: &Addr, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
        if amount.is_zero() {
            return Ok(None);
        }
        match self {
            BidCurrencyBase::Native {
                denom,
            } => Ok(Some(
                BankMsg::Send {
                    to_address: to.to_string(),
                    amount: coins(amount.u128(), denom),
                }
                .into(),
            )),
            BidCurrencyBase::Fungible {
                contract: token,
            } => Ok(Some(wasm_execute(
                token,
                &Cw20ExecuteMsg::Transfer {
                    recipient: to.to_string(),
                    amount,
                },
                vec![],
            )?
            .into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::{mock_dependencies, mock_info};
    use cosmwasm_std::{coin, coins, to_json_binary, WasmMsg};
    use cw_utils::PaymentError;

    use super::*;

    #[test]
    fn check_rejects_empty_assets() {
        let deps = mock_dependencies();

        let asset = AuctionAssetUnchecked::Native {
            denom: "uitem".to_string(),
            amount: Uint128::zero(),
        };
        assert_eq!(asset.check(&deps.api).unwrap_err(), EscrowError::ZeroAmount);

        let asset = AuctionAssetUnchecked::NonFungible {
            contract: "collection".to_string(),
            token_id: "".to_string(),
        };
        assert_eq!(asset.check(&deps.api).unwrap_err(), EscrowError::EmptyTokenId);

        let asset = AuctionAssetUnchecked::SemiFungible {
            contract: "collection".to_string(),
            token_id: "sword".to_string(),
            amount: Uint128::new(3),
        };
        assert_eq!(asset.check(&deps.api).unwrap().kind(), AssetKind::SemiFungible);
    }

    #[test]
    fn native_asset_lock_requires_exact_funds() {
        let asset = AuctionAsset::Native {
            denom: "uitem".to_string(),
            amount: Uint128::new(10),
        };
        let contract = Addr::unchecked("auction");

        let info = mock_info("operator", &coins(10, "uitem"));
        assert!(asset.lock(&info, &contract).unwrap().is_empty());

        let info = mock_info("operator", &coins(9, "uitem"));
        assert_eq!(
            asset.lock(&info, &contract).unwrap_err(),
            EscrowError::FundsMismatch {
                denom: "uitem".to_string(),
                expected: Uint128::new(10),
                received: Uint128::new(9),
            }
        );

        let info = mock_info("operator", &[coin(10, "uitem"), coin(1, "ucoin")]);
        assert_eq!(
            asset.lock(&info, &contract).unwrap_err(),
            EscrowError::Payment(PaymentError::MultipleDenoms {})
        );
    }

    #[test]
    fn semi_fungible_release_sends_from_contract() {
        let asset = AuctionAsset::SemiFungible {
            contract: Addr::unchecked("collection"),
            token_id: "sword".to_string(),
            amount: Uint128::new(3),
        };

        let msg = asset.release_msg(&Addr::unchecked("auction"), &Addr::unchecked("winner")).unwrap();
        assert_eq!(
            msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: "collection".to_string(),
                msg: to_json_binary(&Cw1155ExecuteMsg::SendFrom {
                    from: "auction".to_string(),
                    to: "winner".to_string(),
                    token_id: "sword".to_string(),
                    value: Uint128::new(3),
                    msg: None,
                })
                .unwrap(),
                funds: vec![],
            })
        );
    }

    #[test]
    fn fungible_currency_pulls_and_refuses_native_funds() {
        let currency = BidCurrency::Fungible {
            contract: Addr::unchecked("token"),
        };
        let contract = Addr::unchecked("auction");

        let info = mock_info("alice", &[]);
        let msg = currency.lock(&info, &contract, Uint128::new(5)).unwrap();
        assert_eq!(
            msg,
            Some(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: "token".to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: "alice".to_string(),
                    recipient: "auction".to_string(),
                    amount: Uint128::new(5),
                })
                .unwrap(),
                funds: vec![],
            }))
        );

        let info = mock_info("alice", &coins(5, "ucoin"));
        assert_eq!(
            currency.lock(&info, &contract, Uint128::new(5)).unwrap_err(),
            EscrowError::Payment(PaymentError::NonPayable {})
        );
    }

    #[test]
    fn zero_amounts_are_never_released() {
        let currency = BidCurrency::Native {
            denom: "ucoin".to_string(),
        };
        assert_eq!(currency.release_msg(&Addr::unchecked("alice"), Uint128::zero()).unwrap(), None);

        let info = mock_info("alice", &[]);
        assert_eq!(currency.receive(&info, Uint128::zero()).unwrap(), Uint128::zero());
    }
}
