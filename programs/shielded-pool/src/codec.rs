//! Compressed wire format for BN254 points, Groth16 proofs and verifying keys.
//!
//! The layout matches arkworks `serialize_compressed`:
//!
//! | Item | Size | Layout |
//! |------|------|--------|
//! | G1 | 32 | x (LE), flags in byte 31 |
//! | G2 | 64 | x.c0 (LE) \|\| x.c1 (LE), flags in byte 63 |
//! | Proof | 128 | A (G1) \|\| B (G2) \|\| C (G1) |
//! | Verifying key | 232 + 32n | alpha (G1) \|\| beta \|\| gamma \|\| delta (G2) \|\| n (u64 LE) \|\| IC[n] (G1) |
//!
//! Flags live in the top two bits of the last byte: `0x80` marks the larger of
//! the two candidate y coordinates, `0x40` marks the point at infinity.

use core::cmp::Ordering;

use ark_bn254::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ff::{BigInt, BigInteger, PrimeField};
use privacy_pool_interface::{
    CircuitKind, FIELD_ELEMENT_SIZE, G1_COMPRESSED_SIZE, G2_COMPRESSED_SIZE, PROOF_SIZE,
    VERIFYING_KEY_HEADER_SIZE,
};

use crate::{
    errors::CodecError,
    types::{field_from_slice_canonical, field_to_bytes},
};

const FLAG_Y_LARGEST: u8 = 0x80;
const FLAG_INFINITY: u8 = 0x40;
const FLAG_MASK: u8 = FLAG_Y_LARGEST | FLAG_INFINITY;

/// Whether `y` is the larger of `{y, -y}` as an integer.
fn fq_is_largest(y: &Fq) -> bool {
    y.into_bigint() > Fq::MODULUS_MINUS_ONE_DIV_TWO
}

/// Whether `y` is the larger of `{y, -y}`, comparing c1 first then c0.
fn fq2_is_largest(y: &Fq2) -> bool {
    let neg = -*y;
    match y.c1.into_bigint().cmp(&neg.c1.into_bigint()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => y.c0.into_bigint() > neg.c0.into_bigint(),
    }
}

fn fq_to_le(value: &Fq, out: &mut [u8]) {
    let le = value.into_bigint().to_bytes_le();
    out[..le.len()].copy_from_slice(&le);
}

/// Read a base field element; the top two bits must already be cleared.
fn fq_from_le(bytes: &[u8]) -> Option<Fq> {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks(8)) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    Fq::from_bigint(BigInt(limbs))
}

/// Split the flag bits off the last byte of a compressed point.
fn take_flags(bytes: &mut [u8]) -> (bool, bool) {
    let last = bytes.len() - 1;
    let flags = bytes[last] & FLAG_MASK;
    bytes[last] &= !FLAG_MASK;
    (flags & FLAG_Y_LARGEST != 0, flags & FLAG_INFINITY != 0)
}

/// Compress a G1 point to 32 bytes.
pub fn encode_g1(point: &G1Affine) -> [u8; G1_COMPRESSED_SIZE] {
    let mut out = [0u8; G1_COMPRESSED_SIZE];
    if point.infinity {
        out[G1_COMPRESSED_SIZE - 1] |= FLAG_INFINITY;
        return out;
    }
    fq_to_le(&point.x, &mut out);
    if fq_is_largest(&point.y) {
        out[G1_COMPRESSED_SIZE - 1] |= FLAG_Y_LARGEST;
    }
    out
}

/// Decompress a G1 point.
///
/// # Errors
///
/// Returns [`CodecError::InvalidG1Length`] for input not 32 bytes long and
/// [`CodecError::InvalidG1`] if the point is off-curve, outside the subgroup,
/// non-canonical, or carries contradictory flags.
pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, CodecError> {
    let mut buf: [u8; G1_COMPRESSED_SIZE] = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidG1Length(bytes.len()))?;
    let (largest, infinity) = take_flags(&mut buf);

    if infinity {
        if largest || buf.iter().any(|b| *b != 0) {
            return Err(CodecError::InvalidG1);
        }
        return Ok(G1Affine::identity());
    }

    let x = fq_from_le(&buf).ok_or(CodecError::InvalidG1)?;
    let (smaller, larger) = G1Affine::get_ys_from_x_unchecked(x).ok_or(CodecError::InvalidG1)?;
    let point = G1Affine::new_unchecked(x, if largest { larger } else { smaller });
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CodecError::InvalidG1);
    }
    Ok(point)
}

/// Compress a G2 point to 64 bytes.
pub fn encode_g2(point: &G2Affine) -> [u8; G2_COMPRESSED_SIZE] {
    let mut out = [0u8; G2_COMPRESSED_SIZE];
    if point.infinity {
        out[G2_COMPRESSED_SIZE - 1] |= FLAG_INFINITY;
        return out;
    }
    fq_to_le(&point.x.c0, &mut out[..32]);
    fq_to_le(&point.x.c1, &mut out[32..]);
    if fq2_is_largest(&point.y) {
        out[G2_COMPRESSED_SIZE - 1] |= FLAG_Y_LARGEST;
    }
    out
}

/// Decompress a G2 point.
///
/// # Errors
///
/// Returns [`CodecError::InvalidG2Length`] for input not 64 bytes long and
/// [`CodecError::InvalidG2`] if the point is off-curve, outside the subgroup,
/// non-canonical, or carries contradictory flags.
pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, CodecError> {
    let mut buf: [u8; G2_COMPRESSED_SIZE] = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidG2Length(bytes.len()))?;
    let (largest, infinity) = take_flags(&mut buf);

    if infinity {
        if largest || buf.iter().any(|b| *b != 0) {
            return Err(CodecError::InvalidG2);
        }
        return Ok(G2Affine::identity());
    }

    let c0 = fq_from_le(&buf[..32]).ok_or(CodecError::InvalidG2)?;
    let c1 = fq_from_le(&buf[32..]).ok_or(CodecError::InvalidG2)?;
    let x = Fq2::new(c0, c1);
    let (smaller, larger) = G2Affine::get_ys_from_x_unchecked(x).ok_or(CodecError::InvalidG2)?;
    let point = G2Affine::new_unchecked(x, if largest { larger } else { smaller });
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CodecError::InvalidG2);
    }
    Ok(point)
}

/// Decoded Groth16 proof `(A, B, C)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Groth16Proof {
    /// A (G1)
    pub a: G1Affine,
    /// B (G2)
    pub b: G2Affine,
    /// C (G1)
    pub c: G1Affine,
}

impl Groth16Proof {
    /// Decode a 128-byte compressed proof.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidProofLength`] or the point error for the
    /// first component that fails to decode.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != PROOF_SIZE {
            return Err(CodecError::InvalidProofLength(bytes.len()));
        }
        let (a, rest) = bytes.split_at(G1_COMPRESSED_SIZE);
        let (b, c) = rest.split_at(G2_COMPRESSED_SIZE);
        Ok(Self {
            a: decode_g1(a)?,
            b: decode_g2(b)?,
            c: decode_g1(c)?,
        })
    }

    /// Encode to 128 bytes.
    pub fn encode(&self) -> [u8; PROOF_SIZE] {
        let mut out = [0u8; PROOF_SIZE];
        out[..32].copy_from_slice(&encode_g1(&self.a));
        out[32..96].copy_from_slice(&encode_g2(&self.b));
        out[96..].copy_from_slice(&encode_g1(&self.c));
        out
    }
}

/// Decoded Groth16 verifying key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16VerifyingKey {
    /// alpha (G1)
    pub alpha_g1: G1Affine,
    /// beta (G2)
    pub beta_g2: G2Affine,
    /// gamma (G2)
    pub gamma_g2: G2Affine,
    /// delta (G2)
    pub delta_g2: G2Affine,
    /// Input commitment bases, one more than the number of public inputs
    pub ic: Vec<G1Affine>,
}

impl Groth16VerifyingKey {
    /// Decode a verifying key of any IC length.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVerifyingKeyLength`] if the byte length
    /// disagrees with the declared IC count, or a point error.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let header = bytes
            .get(..VERIFYING_KEY_HEADER_SIZE)
            .ok_or(CodecError::InvalidVerifyingKeyLength {
                expected: VERIFYING_KEY_HEADER_SIZE,
                actual: bytes.len(),
            })?;

        let mut ic_len_bytes = [0u8; 8];
        ic_len_bytes.copy_from_slice(&header[224..232]);
        let ic_len = u64::from_le_bytes(ic_len_bytes);

        let expected = usize::try_from(ic_len)
            .ok()
            .and_then(|n| n.checked_mul(G1_COMPRESSED_SIZE))
            .and_then(|n| n.checked_add(VERIFYING_KEY_HEADER_SIZE))
            .ok_or(CodecError::InvalidVerifyingKeyLength {
                expected: usize::MAX,
                actual: bytes.len(),
            })?;
        if bytes.len() != expected {
            return Err(CodecError::InvalidVerifyingKeyLength {
                expected,
                actual: bytes.len(),
            });
        }

        let ic = bytes[VERIFYING_KEY_HEADER_SIZE..]
            .chunks_exact(G1_COMPRESSED_SIZE)
            .map(decode_g1)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            alpha_g1: decode_g1(&header[..32])?,
            beta_g2: decode_g2(&header[32..96])?,
            gamma_g2: decode_g2(&header[96..160])?,
            delta_g2: decode_g2(&header[160..224])?,
            ic,
        })
    }

    /// Decode a verifying key and check its IC count against `kind`.
    ///
    /// # Errors
    ///
    /// As [`Self::decode`], plus [`CodecError::InvalidIcLength`].
    pub fn decode_for(kind: CircuitKind, bytes: &[u8]) -> Result<Self, CodecError> {
        let vk = Self::decode(bytes)?;
        if vk.ic.len() != kind.ic_len() {
            return Err(CodecError::InvalidIcLength {
                expected: kind.ic_len(),
                actual: vk.ic.len(),
            });
        }
        Ok(vk)
    }

    /// Encode to `232 + 32 * ic.len()` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(VERIFYING_KEY_HEADER_SIZE + self.ic.len() * 32);
        out.extend_from_slice(&encode_g1(&self.alpha_g1));
        out.extend_from_slice(&encode_g2(&self.beta_g2));
        out.extend_from_slice(&encode_g2(&self.gamma_g2));
        out.extend_from_slice(&encode_g2(&self.delta_g2));
        out.extend_from_slice(&(self.ic.len() as u64).to_le_bytes());
        for point in &self.ic {
            out.extend_from_slice(&encode_g1(point));
        }
        out
    }
}

/// Decode a concatenation of canonical 32-byte field elements.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFieldLength`] if the length is not a multiple
/// of 32, or [`CodecError::NonCanonicalField`].
pub fn decode_public_inputs(bytes: &[u8]) -> Result<Vec<Fr>, CodecError> {
    if bytes.len() % FIELD_ELEMENT_SIZE != 0 {
        return Err(CodecError::InvalidFieldLength(bytes.len()));
    }
    bytes
        .chunks_exact(FIELD_ELEMENT_SIZE)
        .map(field_from_slice_canonical)
        .collect()
}

/// Encode field elements as concatenated 32-byte little-endian strings.
pub fn encode_public_inputs(inputs: &[Fr]) -> Vec<u8> {
    inputs
        .iter()
        .flat_map(field_to_bytes)
        .collect()
}
