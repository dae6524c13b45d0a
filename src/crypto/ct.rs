use subtle::ConstantTimeEq;

/// Byte equality whose running time does not depend on where the inputs differ.
///
/// Lengths are not secret, so a length mismatch returns `false` straight away.
pub fn eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn equal_inputs() {
        assert!(eq(b"", b""));
        assert!(eq(b"abc", b"abc"));
    }

    #[test]
    fn different_inputs() {
        assert!(!eq(b"abc", b"abd"));
        assert!(!eq(b"abc", b"ab"));
        assert!(!eq(b"", b"a"));
    }

    // Coarse sanity check only: a mismatch in the first byte must not be
    // dramatically faster than one in the last byte.
    #[test]
    fn timing_does_not_track_mismatch_position() {
        const LEN: usize = 4096;
        const ROUNDS: usize = 2000;

        let base = vec![0x5au8; LEN];
        let mut early = base.clone();
        early[0] ^= 1;
        let mut late = base.clone();
        late[LEN - 1] ^= 1;

        let time = |other: &[u8]| {
            let mut best = u128::MAX;
            for _ in 0..5 {
                let start = Instant::now();
                for _ in 0..ROUNDS {
                    assert!(!eq(std::hint::black_box(&base), std::hint::black_box(other)));
                }
                best = best.min(start.elapsed().as_nanos());
            }
            best
        };

        let t_early = time(&early[..]);
        let t_late = time(&late[..]);
        assert!(
            t_early * 4 > t_late,
            "early mismatch {t_early}ns vs late mismatch {t_late}ns"
        );
    }
}
