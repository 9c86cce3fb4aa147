use super::*;

#[test]
fn fnv_hash_is_stable_across_chunking() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"animecard");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"anime");
    b.write_bytes(b"card");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(Fnv1a64::new_default().finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unpremul_inverts_opaque_and_half_alpha() {
    assert_eq!(unpremul_u8(77, 255), 77);
    assert_eq!(unpremul_u8(0, 0), 0);
    let premul = mul_div255_u8(200, 128);
    let back = unpremul_u8(premul, 128);
    assert!((i32::from(back) - 200).abs() <= 1);
}
