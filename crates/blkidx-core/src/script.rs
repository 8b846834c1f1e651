//! Script template recognition and best-effort address derivation.
//!
//! Grounded on `ScriptType`/`standard_type()` (`bitcoin/src/types/script.rs`),
//! extended with the two templates it doesn't recognise (P2PK, OP_RETURN) and the
//! scriptSig address-extraction heuristic, both of which come from the Python
//! reference implementation's `_extract_address_from_scriptsig` / coinbase handling
//! rather than from any Rust source in the pack.

use crate::address::{self, NetworkParams};
use crate::hash::hash160;

/// The recognised output script templates. `NonStandard` covers everything else,
/// including multisig and other raw-script forms this indexer does not resolve to
/// an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    Pkh,
    Sh,
    Pk,
    Wpkh,
    Wsh,
    OpReturn,
    NonStandard,
}

/// Classifies a `scriptPubKey` by its exact byte template, mirroring the
/// length-and-prefix matching in `ScriptPubkey::standard_type()`.
pub fn classify(script: &[u8]) -> ScriptType {
    match script.len() {
        25 if script.starts_with(&[0x76, 0xa9, 0x14]) && script.ends_with(&[0x88, 0xac]) => {
            ScriptType::Pkh
        }
        23 if script.starts_with(&[0xa9, 0x14]) && script.ends_with(&[0x87]) => ScriptType::Sh,
        22 if script.starts_with(&[0x00, 0x14]) => ScriptType::Wpkh,
        34 if script.starts_with(&[0x00, 0x20]) => ScriptType::Wsh,
        35 if script[0] == 0x21 && script[34] == 0xac => ScriptType::Pk,
        67 if script[0] == 0x41 && script[66] == 0xac => ScriptType::Pk,
        _ if script.first() == Some(&0x6a) => ScriptType::OpReturn,
        _ => ScriptType::NonStandard,
    }
}

/// Derives the address a `scriptPubKey` pays to, or `None` for non-standard /
/// unspendable / unrecognised scripts. Never fails: script decoding is always
/// best-effort per the indexer's error-handling design.
pub fn address_for_script_pubkey(script: &[u8], params: NetworkParams) -> Option<String> {
    match classify(script) {
        ScriptType::Pkh => Some(address::encode_base58(params.pkh_version, &script[3..23])),
        ScriptType::Sh => Some(address::encode_base58(params.sh_version, &script[2..22])),
        ScriptType::Pk => {
            let pubkey = if script[0] == 0x21 {
                &script[1..34]
            } else {
                &script[1..66]
            };
            let hash = hash160(pubkey);
            Some(address::encode_base58(params.pkh_version, &hash))
        }
        ScriptType::Wpkh => address::encode_segwit(params.hrp, 0, &script[2..22]).ok(),
        ScriptType::Wsh => address::encode_segwit(params.hrp, 0, &script[2..34]).ok(),
        ScriptType::OpReturn | ScriptType::NonStandard => None,
    }
}

/// Best-effort address for a spending input, scanning its scriptSig for a DER
/// signature followed by a compressed (33-byte) or uncompressed (65-byte) pubkey
/// push, ported from the Python reference's scriptSig scan (it has no Rust
/// counterpart in the pack). Returns `None` when the pattern isn't found, e.g. for
/// P2SH, P2WPKH, or otherwise-shaped inputs.
pub fn address_for_script_sig(script_sig: &[u8], params: NetworkParams) -> Option<String> {
    let mut i = 0usize;
    while i < script_sig.len() {
        if script_sig[i] == 0x30 && i + 1 < script_sig.len() {
            let sig_len = script_sig[i + 1] as usize;
            let sig_end = i + 2 + sig_len;
            if sig_end <= script_sig.len() {
                // Immediately after the DER signature push (and its own length-prefix
                // byte before it) should come a pubkey push.
                let pk_len_pos = sig_end;
                if pk_len_pos < script_sig.len() {
                    let pk_len = script_sig[pk_len_pos] as usize;
                    let pk_start = pk_len_pos + 1;
                    let pk_end = pk_start + pk_len;
                    if (pk_len == 33 || pk_len == 65) && pk_end <= script_sig.len() {
                        let pubkey = &script_sig[pk_start..pk_end];
                        let hash = hash160(pubkey);
                        return Some(address::encode_base58(params.pkh_version, &hash));
                    }
                }
            }
        }
        i += 1;
    }
    None
}

/// Extracts a BIP-34 block height from a coinbase scriptSig, ported from the Python
/// reference's `_extract_height_from_coinbase`: the first byte is a push length; a
/// push of 0 bytes, or one longer than 8 bytes or than the script itself, carries no
/// height. Otherwise the pushed bytes are a little-endian integer.
///
/// This is never gated on a coin's BIP-34 activation height (see `Coin::bip34_activation_height`):
/// the original extracts unconditionally whenever the push is well-formed, and so do we.
pub fn extract_bip34_height(script_sig: &[u8]) -> Option<u32> {
    let push_len = *script_sig.first()? as usize;
    if push_len < 1 || push_len > 8 || push_len > script_sig.len() - 1 {
        return None;
    }
    let mut buf = [0u8; 4];
    let height_bytes = &script_sig[1..1 + push_len];
    for (i, b) in height_bytes.iter().take(4).enumerate() {
        buf[i] = *b;
    }
    // Heights beyond u32 range never occur in practice; bytes past the 4th are
    // legitimate per BIP-34 (a CScriptNum can use up to 8) but would overflow a
    // block height, so fold them away rather than panic.
    Some(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::address::BITCOIN_MAINNET;

    #[test]
    fn classifies_pkh() {
        let s = hex::decode("76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac").unwrap();
        assert_eq!(classify(&s), ScriptType::Pkh);
        assert_eq!(
            address_for_script_pubkey(&s, BITCOIN_MAINNET).unwrap(),
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
        );
    }

    #[test]
    fn classifies_sh() {
        let s = hex::decode("a914e88869b88866281ab166541ad8aafba8f8aba47a87").unwrap();
        assert_eq!(classify(&s), ScriptType::Sh);
        assert_eq!(
            address_for_script_pubkey(&s, BITCOIN_MAINNET).unwrap(),
            "3NtY7BrF3xrcb31JXXaYCKVcz1cH3Azo5y"
        );
    }

    #[test]
    fn classifies_wpkh() {
        let s = hex::decode("0014751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(classify(&s), ScriptType::Wpkh);
        assert_eq!(
            address_for_script_pubkey(&s, BITCOIN_MAINNET).unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn classifies_op_return() {
        let s = hex::decode("6a0b68656c6c6f20776f726c64").unwrap();
        assert_eq!(classify(&s), ScriptType::OpReturn);
        assert!(address_for_script_pubkey(&s, BITCOIN_MAINNET).is_none());
    }

    #[test]
    fn classifies_nonstandard() {
        let s = hex::decode("deadbeef").unwrap();
        assert_eq!(classify(&s), ScriptType::NonStandard);
        assert!(address_for_script_pubkey(&s, BITCOIN_MAINNET).is_none());
    }

    #[test]
    fn classifies_compressed_pubkey() {
        let mut s = vec![0x21];
        s.extend_from_slice(&[0x02; 33]);
        s.push(0xac);
        assert_eq!(classify(&s), ScriptType::Pk);
        assert!(address_for_script_pubkey(&s, BITCOIN_MAINNET).is_some());
    }

    #[test]
    fn scriptsig_extraction_finds_pubkey_after_signature() {
        let mut sig_script = vec![0x47, 0x30, 0x44]; // push 0x47 bytes, DER seq, len 0x44
        sig_script.extend_from_slice(&[0u8; 0x44]);
        sig_script.push(0x21); // pubkey push length
        sig_script.extend_from_slice(&[0x03; 33]);
        let addr = address_for_script_sig(&sig_script, BITCOIN_MAINNET);
        assert!(addr.is_some());
    }

    #[test]
    fn scriptsig_extraction_returns_none_for_unrecognized_input() {
        let sig_script = vec![0x00, 0x01, 0x02];
        assert!(address_for_script_sig(&sig_script, BITCOIN_MAINNET).is_none());
    }

    #[test]
    fn bip34_height_extracts_little_endian_push() {
        // Block 227835, the real BIP-34 activation block on mainnet: push 3 bytes,
        // little-endian encoding of 227835 (0x379fb).
        let script_sig = [0x03, 0xfb, 0x79, 0x03];
        assert_eq!(extract_bip34_height(&script_sig), Some(227_835));
    }

    #[test]
    fn bip34_height_is_none_for_zero_length_push() {
        let script_sig = [0x00, 0xff, 0xff];
        assert_eq!(extract_bip34_height(&script_sig), None);
    }

    #[test]
    fn bip34_height_is_none_when_push_exceeds_script() {
        let script_sig = [0x05, 0x01, 0x02];
        assert_eq!(extract_bip34_height(&script_sig), None);
    }

    #[test]
    fn bip34_height_is_none_when_push_exceeds_eight_bytes() {
        let mut script_sig = vec![0x09];
        script_sig.extend_from_slice(&[0u8; 9]);
        assert_eq!(extract_bip34_height(&script_sig), None);
    }

    #[test]
    fn bip34_height_is_none_for_empty_scriptsig() {
        assert_eq!(extract_bip34_height(&[]), None);
    }
}
