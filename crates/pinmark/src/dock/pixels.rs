// License: MIT

/// tiny-skia keeps premultiplied RGBA; wl_shm ARGB8888 is premultiplied
/// too, stored little-endian as B, G, R, A. Only the channel order changes.
pub(crate) fn copy_rgba_to_argb(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = s[3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_red_and_blue() {
        let src = [10, 20, 30, 40, 1, 2, 3, 4];
        let mut dst = [0u8; 8];
        copy_rgba_to_argb(&src, &mut dst);
        assert_eq!(dst, [30, 20, 10, 40, 3, 2, 1, 4]);
    }

    #[test]
    fn short_destination_is_not_overrun() {
        let src = [1u8; 8];
        let mut dst = [0u8; 4];
        copy_rgba_to_argb(&src, &mut dst);
        assert_eq!(dst, [1, 1, 1, 1]);
    }
}
