use alloc::vec::Vec;

/// XOR two byte slices into a new buffer
///
/// If lengths are unequal, XOR of the min length
pub fn xor(el: &[u8], ar: &[u8]) -> Vec<u8> {
    let len = core::cmp::min(el.len(), ar.len());
    let mut res: Vec<u8> = Vec::with_capacity(len);
    for (eb, ab) in el[..len].iter().zip(ar[..len].iter()) {
        res.push(eb ^ ab);
    }
    res
}

/// XOR a byte slice into the left byte slice in place
///
/// If lengths are unequal, XOR of the min length
pub fn xor_assign(el: &mut [u8], ar: &[u8]) {
    let len = core::cmp::min(el.len(), ar.len());
    for (eb, ab) in el[..len].iter_mut().zip(ar[..len].iter()) {
        *eb ^= ab;
    }
}
