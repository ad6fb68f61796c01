//! Algebraic laws of the code-point set, checked over random inputs.

use quickcheck_macros::quickcheck;
use trex_uniset::Uniset;

fn set_from(points: &[u16]) -> Uniset {
    Uniset::from_points(points.iter().map(|&p| p as u32))
}

#[quickcheck]
fn complement_involution_preserves_membership(points: Vec<u16>, probe: u16) -> bool {
    let u = set_from(&points);
    let back = u.complement().complement();
    back.contains(probe as u32) == u.contains(probe as u32)
}

#[quickcheck]
fn complement_partitions_the_code_space(points: Vec<u16>, probe: u16) -> bool {
    let u = set_from(&points);
    let c = u.complement();
    u.contains(probe as u32) != c.contains(probe as u32)
}

#[quickcheck]
fn union_size_adds_for_disjoint_inputs(points: Vec<u16>) -> bool {
    let low: Vec<u16> = points.iter().copied().filter(|&p| p < 0x8000).collect();
    let high: Vec<u16> = points.iter().copied().filter(|&p| p >= 0x8000).collect();
    let a = set_from(&low);
    let b = set_from(&high);
    a.union(&b).size() == a.size() + b.size()
}

#[quickcheck]
fn union_contains_both_sides(points: Vec<u16>, probe: u16) -> bool {
    let mid = points.len() / 2;
    let a = set_from(&points[..mid]);
    let b = set_from(&points[mid..]);
    let u = a.union(&b);
    u.contains(probe as u32) == (a.contains(probe as u32) || b.contains(probe as u32))
}
