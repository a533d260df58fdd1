//! Log-space helpers shared by the scorer and the reconstructor.

/// Natural log of a probability, mapping `0` to `-inf`.
#[inline]
pub fn ln_prob(p: f64) -> f64 {
    if p == 0.0 {
        f64::NEG_INFINITY
    } else {
        p.ln()
    }
}

/// Index and value of the maximum, preferring the lowest index on ties.
///
/// Returns `None` when every value is `-inf` (or the iterator is empty), i.e.
/// when no candidate has non-zero probability.
#[inline]
pub fn argmax_lowest<I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, v) in values.into_iter().enumerate() {
        if v == f64::NEG_INFINITY {
            continue;
        }
        // Strict comparison keeps the earlier index on exact ties.
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{argmax_lowest, ln_prob};

    #[test]
    fn ln_of_zero_is_negative_infinity() {
        assert_eq!(ln_prob(0.0), f64::NEG_INFINITY);
        assert_eq!(ln_prob(1.0), 0.0);
        assert!((ln_prob(0.5) - 0.5f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        assert_eq!(argmax_lowest([1.0, 3.0, 3.0, 2.0]), Some((1, 3.0)));
        assert_eq!(argmax_lowest([-2.0, -2.0]), Some((0, -2.0)));
    }

    #[test]
    fn all_impossible_yields_none() {
        assert_eq!(argmax_lowest([f64::NEG_INFINITY; 3]), None);
        assert_eq!(argmax_lowest(std::iter::empty()), None);
    }

    #[test]
    fn skips_leading_impossible_entries() {
        assert_eq!(
            argmax_lowest([f64::NEG_INFINITY, -5.0, -1.0, -1.0]),
            Some((2, -1.0))
        );
    }
}
