//! Class join codes.

use rand::Rng;

pub const CLASS_CODE_LENGTH: usize = 8;
pub const MAX_CODE_ATTEMPTS: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_class_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CLASS_CODE_LENGTH)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
