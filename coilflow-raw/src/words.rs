//! Word order correction for 32-bit registers
//!
//! Some devices transmit a 32-bit quantity as two 16-bit registers in the
//! opposite word order to their internal byte order. Swapping the two
//! words of the 4-byte buffer restores little-endian order.

/// Size of the uniform register buffer produced by encoding
pub const REGISTER_BUFFER_LEN: usize = 4;

/// Exchange the two 16-bit words of a 4-byte buffer
///
/// Any other length is returned unchanged.
///
/// ```
/// use coilflow_raw::swap_words;
///
/// assert_eq!(swap_words(b"abcd"), b"cdab");
/// assert_eq!(swap_words(b"ab"), b"ab");
/// ```
pub fn swap_words(bytes: &[u8]) -> Vec<u8> {
    match <[u8; REGISTER_BUFFER_LEN]>::try_from(bytes) {
        Ok(buf) => swap_word_array(buf).to_vec(),
        Err(_) => bytes.to_vec(),
    }
}

/// Fixed-size variant of [`swap_words`]
pub fn swap_word_array(buf: [u8; REGISTER_BUFFER_LEN]) -> [u8; REGISTER_BUFFER_LEN] {
    let [a, b, c, d] = buf;
    [c, d, a, b]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_swap_words() {
        assert_eq!(swap_words(b"abcd"), b"cdab".to_vec());
        assert_eq!(swap_words(b"ab"), b"ab".to_vec());
        assert_eq!(swap_words(b""), Vec::<u8>::new());
        assert_eq!(swap_words(b"abcde"), b"abcde".to_vec());
    }

    #[test]
    fn test_swap_word_array() {
        assert_eq!(
            swap_word_array([0x00, 0x00, 0x28, 0x06]),
            [0x28, 0x06, 0x00, 0x00]
        );
    }

    proptest! {
        #[test]
        fn swap_is_involution(buf in any::<[u8; 4]>()) {
            prop_assert_eq!(swap_words(&swap_words(&buf)), buf.to_vec());
            prop_assert_eq!(swap_word_array(swap_word_array(buf)), buf);
        }

        #[test]
        fn swap_is_identity_off_four_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..12)) {
            prop_assume!(bytes.len() != REGISTER_BUFFER_LEN);
            prop_assert_eq!(swap_words(&bytes), bytes);
        }
    }
}
