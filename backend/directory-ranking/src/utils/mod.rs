// Utility functions for directory-ranking

/// Arithmetic mean of review scores, 0.0 for an empty set
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u64 = ratings.iter().map(|&r| u64::from(r)).sum();
    sum as f64 / ratings.len() as f64
}

/// First eight bytes of a digest as a big-endian integer
pub fn digest_prefix_u64(digest: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = digest.len().min(8);
    buf[..n].copy_from_slice(&digest[..n]);
    u64::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert!((average_rating(&[5, 4, 3]) - 4.0).abs() < 0.001);
        assert!((average_rating(&[1, 2]) - 1.5).abs() < 0.001);
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_digest_prefix_u64() {
        let digest = [0u8, 0, 0, 0, 0, 0, 1, 2, 0xff, 0xff];
        assert_eq!(digest_prefix_u64(&digest), 258);

        // Short input is zero-padded on the right
        assert_eq!(digest_prefix_u64(&[1]), 1u64 << 56);
    }
}
