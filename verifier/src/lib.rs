//! Top-level entry points: domain-dispatching wrappers around the
//! `ethereum` and `substrate-trie` verifiers, plus the convenience
//! [`verify_merkle_proof`] for callers carrying a [`common::MerkleProof`]
//! end to end.

use common::{Domain, MerkleProof, ProofOutput};

pub use trie_core::TrieError as VerifyError;

/// Verifies `keys` against an Ethereum state-trie proof rooted at `root`.
pub fn verify_ethereum_proof(
    root: [u8; 32],
    proof: &[Vec<u8>],
    keys: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, VerifyError> {
    ethereum::verify_proof(root, proof, keys)
}

/// Verifies `keys` against a Substrate state-trie proof rooted at `root`.
pub fn verify_substrate_proof(
    root: [u8; 32],
    proof: &[Vec<u8>],
    keys: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, VerifyError> {
    substrate_trie::verify_proof(root, proof, keys)
}

/// Verifies `keys` against a Substrate default child trie named by
/// `child_info`, whose root is itself proven inside the parent trie
/// rooted at `root`.
pub fn read_child_proof_check(
    root: [u8; 32],
    proof: &[Vec<u8>],
    keys: &[Vec<u8>],
    child_info: &[u8],
) -> Result<Vec<Vec<u8>>, VerifyError> {
    substrate_trie::read_child_proof_check(root, proof, keys, child_info)
}

/// Dispatches on `proof.domain` and returns the committed root/keys/values.
pub fn verify_merkle_proof(proof: MerkleProof) -> Result<ProofOutput, VerifyError> {
    let values = match proof.domain {
        Domain::Ethereum => verify_ethereum_proof(proof.root, &proof.proof, &proof.keys)?,
        Domain::Substrate => verify_substrate_proof(proof.root, &proof.proof, &proof.keys)?,
    };
    Ok(ProofOutput {
        domain: proof.domain,
        root: proof.root,
        keys: proof.keys,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_ethereum_and_reports_missing_root() {
        let err = verify_ethereum_proof([0xab; 32], &[], &[b"x".to_vec()]).unwrap_err();
        assert_eq!(err, VerifyError::MissingNode { hash: [0xab; 32] });
    }

    #[test]
    fn dispatches_substrate_and_reports_missing_root() {
        let err = verify_substrate_proof([0xcd; 32], &[], &[b"x".to_vec()]).unwrap_err();
        assert_eq!(err, VerifyError::MissingNode { hash: [0xcd; 32] });
    }
}
