//! Oracle attestations for booking mints.
//!
//! The oracle signs the canonical booking message off-chain. The mint
//! transaction carries that signature in an ed25519 precompile instruction
//! placed immediately before the mint instruction; the runtime rejects the
//! whole transaction if the signature does not verify. This module decodes
//! that instruction and binds it to the registered oracle and to the exact
//! booking terms being minted.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use crate::errors::ObligationError;

pub const ED25519_PROGRAM_ID: Pubkey = pubkey!("Ed25519SigVerify111111111111111111111111111");

pub const ED25519_PUBKEY_LEN: usize = 32;
pub const ED25519_SIGNATURE_LEN: usize = 64;

const OFFSETS_START: usize = 2;
const OFFSETS_LEN: usize = 14;
const PAYLOAD_START: usize = OFFSETS_START + OFFSETS_LEN;
const PUBKEY_OFFSET: usize = PAYLOAD_START;
const SIGNATURE_OFFSET: usize = PUBKEY_OFFSET + ED25519_PUBKEY_LEN;
const MESSAGE_OFFSET: usize = SIGNATURE_OFFSET + ED25519_SIGNATURE_LEN;

// Instruction index meaning "this same instruction" in the precompile offsets
const SAME_INSTRUCTION: u16 = u16::MAX;

/// Bytes the oracle signs for a booking. Shared by signers and the program,
/// so any change here invalidates every outstanding attestation.
pub fn canonical_message(
    booking_id: &str,
    face_amount: u64,
    start_time: i64,
    end_time: i64,
    host: &Pubkey,
) -> Vec<u8> {
    let id = booking_id.as_bytes();
    let mut message = Vec::with_capacity(4 + id.len() + 8 * 3 + 32);
    message.extend_from_slice(&(id.len() as u32).to_le_bytes());
    message.extend_from_slice(id);
    message.extend_from_slice(&face_amount.to_le_bytes());
    message.extend_from_slice(&start_time.to_le_bytes());
    message.extend_from_slice(&end_time.to_le_bytes());
    message.extend_from_slice(host.as_ref());
    message
}

/// One signature as carried by an ed25519 precompile instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519Attestation {
    pub signer: Pubkey,
    pub signature: [u8; ED25519_SIGNATURE_LEN],
    pub message: Vec<u8>,
}

impl Ed25519Attestation {
    /// Decodes precompile instruction data holding exactly one signature whose
    /// key, signature and message all live inside that same instruction.
    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() >= PAYLOAD_START, ObligationError::InvalidAttestation);
        require!(data[0] == 1, ObligationError::InvalidAttestation);

        let signature_offset = read_u16(data, OFFSETS_START)?;
        let signature_ix = read_u16(data, OFFSETS_START + 2)?;
        let pubkey_offset = read_u16(data, OFFSETS_START + 4)?;
        let pubkey_ix = read_u16(data, OFFSETS_START + 6)?;
        let message_offset = read_u16(data, OFFSETS_START + 8)?;
        let message_size = read_u16(data, OFFSETS_START + 10)?;
        let message_ix = read_u16(data, OFFSETS_START + 12)?;

        // Offsets pointing into another instruction would let the signed bytes
        // differ from the bytes we inspect here.
        require!(
            signature_ix == SAME_INSTRUCTION
                && pubkey_ix == SAME_INSTRUCTION
                && message_ix == SAME_INSTRUCTION,
            ObligationError::InvalidAttestation
        );

        let signer = slice_at(data, pubkey_offset, ED25519_PUBKEY_LEN)?;
        let signature = slice_at(data, signature_offset, ED25519_SIGNATURE_LEN)?;
        let message = slice_at(data, message_offset, message_size as usize)?;

        let mut sig = [0u8; ED25519_SIGNATURE_LEN];
        sig.copy_from_slice(signature);

        Ok(Self {
            signer: Pubkey::try_from(signer).map_err(|_| error!(ObligationError::InvalidAttestation))?,
            signature: sig,
            message: message.to_vec(),
        })
    }

    /// Builds the precompile instruction data a client places before the mint.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(MESSAGE_OFFSET + self.message.len());
        data.push(1);
        data.push(0);
        for value in [
            SIGNATURE_OFFSET as u16,
            SAME_INSTRUCTION,
            PUBKEY_OFFSET as u16,
            SAME_INSTRUCTION,
            MESSAGE_OFFSET as u16,
            self.message.len() as u16,
            SAME_INSTRUCTION,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(self.signer.as_ref());
        data.extend_from_slice(&self.signature);
        data.extend_from_slice(&self.message);
        data
    }

    /// The signature itself was checked by the precompile; what remains is that
    /// the signer is the registered oracle and the message is the one expected.
    pub fn verify(&self, expected_message: &[u8], registered_oracle: &Pubkey) -> Result<()> {
        if self.signer != *registered_oracle {
            msg!("Attestation signer {} is not the registered oracle {}", self.signer, registered_oracle);
            return err!(ObligationError::InvalidAttestation);
        }
        if self.message.as_slice() != expected_message {
            msg!("Attested message does not match the submitted booking terms");
            return err!(ObligationError::InvalidAttestation);
        }
        Ok(())
    }
}

/// Loads the ed25519 precompile instruction immediately preceding the
/// currently executing one.
pub fn load_preceding_attestation(instructions_sysvar: &AccountInfo) -> Result<Ed25519Attestation> {
    let current = load_current_index_checked(instructions_sysvar)?;
    let previous = current
        .checked_sub(1)
        .ok_or(ObligationError::InvalidAttestation)?;
    let ix = load_instruction_at_checked(previous as usize, instructions_sysvar)?;
    require_keys_eq!(ix.program_id, ED25519_PROGRAM_ID, ObligationError::InvalidAttestation);
    Ed25519Attestation::decode(&ix.data)
}

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    data.get(at..at + 2)
        .and_then(|bytes| <[u8; 2]>::try_from(bytes).ok())
        .map(u16::from_le_bytes)
        .ok_or_else(|| error!(ObligationError::InvalidAttestation))
}

fn slice_at(data: &[u8], offset: u16, len: usize) -> Result<&[u8]> {
    let start = offset as usize;
    let end = start
        .checked_add(len)
        .ok_or(ObligationError::InvalidAttestation)?;
    data.get(start..end)
        .ok_or_else(|| error!(ObligationError::InvalidAttestation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Signer, SigningKey, Verifier};

    fn oracle_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn host() -> Pubkey {
        Pubkey::new_from_array([3u8; 32])
    }

    fn sample_message() -> Vec<u8> {
        canonical_message("HM-4412", 1_000_000, 1_700_000_000, 1_700_005_000, &host())
    }

    fn attest(key: &SigningKey, message: Vec<u8>) -> Ed25519Attestation {
        Ed25519Attestation {
            signer: Pubkey::new_from_array(key.verifying_key().to_bytes()),
            signature: key.sign(&message).to_bytes(),
            message,
        }
    }

    #[test]
    fn precompile_id_is_the_native_verifier() {
        assert_eq!(ED25519_PROGRAM_ID.to_string(), "Ed25519SigVerify111111111111111111111111111");
    }

    #[test]
    fn canonical_message_layout() {
        let message = sample_message();
        assert_eq!(message.len(), 4 + 7 + 8 + 8 + 8 + 32);
        assert_eq!(&message[0..4], &7u32.to_le_bytes());
        assert_eq!(&message[4..11], b"HM-4412");
        assert_eq!(&message[11..19], &1_000_000u64.to_le_bytes());
        assert_eq!(&message[19..27], &1_700_000_000i64.to_le_bytes());
        assert_eq!(&message[27..35], &1_700_005_000i64.to_le_bytes());
        assert_eq!(&message[35..], host().as_ref());
    }

    #[test]
    fn field_order_matters() {
        let swapped = canonical_message("HM-4412", 1_000_000, 1_700_005_000, 1_700_000_000, &host());
        assert_ne!(swapped, sample_message());
    }

    #[test]
    fn encoded_layout_matches_precompile() {
        let attestation = attest(&oracle_key(), sample_message());
        let data = attestation.encode();
        assert_eq!(data[0], 1);
        assert_eq!(&data[16..48], attestation.signer.as_ref());
        assert_eq!(&data[48..112], &attestation.signature);
        assert_eq!(&data[112..], attestation.message.as_slice());
        assert_eq!(Ed25519Attestation::decode(&data).unwrap(), attestation);
    }

    #[test]
    fn decode_rejects_malformed_data() {
        let data = attest(&oracle_key(), sample_message()).encode();

        assert!(Ed25519Attestation::decode(&data[..10]).is_err());
        // message runs past the end
        assert!(Ed25519Attestation::decode(&data[..data.len() - 1]).is_err());

        let mut no_sigs = data.clone();
        no_sigs[0] = 0;
        assert!(Ed25519Attestation::decode(&no_sigs).is_err());

        let mut two_sigs = data.clone();
        two_sigs[0] = 2;
        assert!(Ed25519Attestation::decode(&two_sigs).is_err());
    }

    #[test]
    fn decode_rejects_cross_instruction_offsets() {
        let data = attest(&oracle_key(), sample_message()).encode();
        for index_field in [OFFSETS_START + 2, OFFSETS_START + 6, OFFSETS_START + 12] {
            let mut forged = data.clone();
            forged[index_field..index_field + 2].copy_from_slice(&0u16.to_le_bytes());
            assert_eq!(
                Ed25519Attestation::decode(&forged).unwrap_err(),
                ObligationError::InvalidAttestation.into()
            );
        }
    }

    #[test]
    fn verify_requires_registered_oracle() {
        let attestation = attest(&oracle_key(), sample_message());
        let registered = attestation.signer;
        assert!(attestation.verify(&sample_message(), &registered).is_ok());

        let impostor = attest(&SigningKey::from_bytes(&[9u8; 32]), sample_message());
        assert_eq!(
            impostor.verify(&sample_message(), &registered).unwrap_err(),
            ObligationError::InvalidAttestation.into()
        );
    }

    #[test]
    fn verify_rejects_different_terms() {
        let attestation = attest(&oracle_key(), sample_message());
        let inflated = canonical_message("HM-4412", 1_000_001, 1_700_000_000, 1_700_005_000, &host());
        assert_eq!(
            attestation.verify(&inflated, &attestation.signer).unwrap_err(),
            ObligationError::InvalidAttestation.into()
        );
    }

    #[test]
    fn any_single_byte_flip_breaks_the_signature() {
        let key = oracle_key();
        let message = sample_message();
        let signature = Signature::from_bytes(&key.sign(&message).to_bytes());
        assert!(key.verifying_key().verify(&message, &signature).is_ok());

        for i in 0..message.len() {
            let mut tampered = message.clone();
            tampered[i] ^= 0x01;
            assert!(
                key.verifying_key().verify(&tampered, &signature).is_err(),
                "byte {i} flipped but signature still verified"
            );
        }
    }
}
