use cosmwasm_std::{Addr, Uint128};
use sha3::{Digest, Keccak256};

pub const COMMITMENT_LENGTH: usize = 32;

/// Sealed bid commitment: `keccak256(price as a 32 byte big-endian word ‖ bidder)`.
///
/// The bidder address is part of the preimage, so a commitment seen on chain
/// can't be replayed by another account.
pub fn compute_commitment(price: Uint128, bidder: &Addr) -> [u8; COMMITMENT_LENGTH] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&price.u128().to_be_bytes());

    let mut hasher = Keccak256::new();
    hasher.update(word);
    hasher.update(bidder.as_bytes());
    to_array(&hasher.finalize())
}

pub fn verify_commitment(commitment: &[u8], price: Uint128, bidder: &Addr) -> bool {
    commitment == compute_commitment(price, bidder).as_slice()
}

/// Outcome of a reveal that ties with the recorded winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// The recorded winner keeps the lead.
    Incumbent,
    /// The revealer takes the lead.
    Challenger,
}

/// `keccak256(incumbent ‖ challenger) mod 2`.
///
/// Both inputs are public once committed, so the outcome is predictable by
/// anyone before the second reveal. It is a reproducible coin flip, not a
/// source of randomness.
pub fn tie_break(incumbent: &[u8], challenger: &[u8]) -> TieBreak {
    let mut hasher = Keccak256::new();
    hasher.update(incumbent);
    hasher.update(challenger);
    let digest = hasher.finalize();

    if digest[COMMITMENT_LENGTH - 1] & 1 == 0 {
        TieBreak::Incumbent
    } else {
        TieBreak::Challenger
    }
}

fn to_array(digest: &[u8]) -> [u8; COMMITMENT_LENGTH] {
    let mut out = [0u8; COMMITMENT_LENGTH];
    out.copy_from_slice(digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_matches_reference() {
        let digest = Keccak256::digest(b"");
        assert_eq!(
            digest.as_slice(),
            [
                0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc,
                0xc7, 0x03, 0xc0, 0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa,
                0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
            ]
        );
    }

    #[test]
    fn commitment_binds_price_and_bidder() {
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");
        let commitment = compute_commitment(Uint128::new(50), &alice);

        assert!(verify_commitment(&commitment, Uint128::new(50), &alice));
        assert!(!verify_commitment(&commitment, Uint128::new(51), &alice));
        assert!(!verify_commitment(&commitment, Uint128::new(50), &bob));
        assert!(!verify_commitment(&commitment[..31], Uint128::new(50), &alice));
    }

    #[test]
    fn tie_break_is_reproducible_and_not_constant() {
        let alice = compute_commitment(Uint128::new(60), &Addr::unchecked("alice"));

        let outcomes: Vec<TieBreak> = (0u128..64)
            .map(|price| {
                let other = compute_commitment(Uint128::new(price), &Addr::unchecked("bob"));
                let outcome = tie_break(&alice, &other);
                assert_eq!(outcome, tie_break(&alice, &other));
                outcome
            })
            .collect();

        assert!(outcomes.contains(&TieBreak::Incumbent));
        assert!(outcomes.contains(&TieBreak::Challenger));
    }
}
