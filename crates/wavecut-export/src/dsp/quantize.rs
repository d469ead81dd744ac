//! Float to integer sample conversion with clipping.

/// Convert float sample to unsigned 8-bit with clipping (silence is 127)
#[inline]
pub(crate) fn float_to_u8(sample: f32) -> u8 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 127.5 + 127.5) as u8
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
pub(crate) fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert float sample to 24-bit integer (stored as i32) with clipping
#[inline]
pub(crate) fn float_to_i24(sample: f32) -> i32 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 8388607.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_float_to_u8() {
        assert_eq!(float_to_u8(-1.0), 0);
        assert_eq!(float_to_u8(0.0), 127);
        assert_eq!(float_to_u8(1.0), 255);
        assert_eq!(float_to_u8(2.0), 255);
    }

    #[test]
    fn test_float_to_i16() {
        assert_eq!(float_to_i16(0.0), 0);
        assert_eq!(float_to_i16(1.0), 32767);
        assert_eq!(float_to_i16(-1.0), -32767);
        // Test clipping
        assert_eq!(float_to_i16(1.5), 32767);
        assert_eq!(float_to_i16(-1.5), -32767);
    }

    #[test]
    fn test_float_to_i24() {
        assert_eq!(float_to_i24(0.0), 0);
        assert_eq!(float_to_i24(0.5), 4194303);
        assert_eq!(float_to_i24(1.0), 8388607);
        assert_eq!(float_to_i24(-1.0), -8388607);
    }

    #[test]
    fn test_quantize_error_within_one_step() {
        for &s in &[0.1f32, -0.33, 0.7071, -0.999] {
            assert_abs_diff_eq!(float_to_i16(s) as f32 / 32767.0, s, epsilon = 1.0 / 32767.0);
            assert_abs_diff_eq!(float_to_i24(s) as f32 / 8388607.0, s, epsilon = 1e-6);
        }
    }
}
