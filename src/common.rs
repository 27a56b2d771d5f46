//! General purpose tools shared by the profile, section and marching code.

pub mod points;
pub mod surface_point;

/// Generate a vec of domain values which are linearly spaced between `start` and `end` and which
/// have a count of `count`. The first value will be `start` and the last value will be `end`.
///
/// # Arguments
///
/// * `start`: the starting value of the domain, inclusive
/// * `end`: the ending value of the domain, inclusive
/// * `count`: the total number of discrete, evenly spaced values in the domain, at least 2
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use cadwing::common::linear_space;
/// let domain = linear_space(0.0, 1.0, 3);
/// assert_eq!(domain, vec![0.0, 0.5, 1.0]);
/// ```
pub fn linear_space(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start; count];
    }
    let step = (end - start) / (count - 1) as f64;
    let mut result = (0..count - 1)
        .map(|i| start + i as f64 * step)
        .collect::<Vec<_>>();
    result.push(end);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_space_hits_both_ends() {
        let d = linear_space(-2.0, 3.0, 7);
        assert_eq!(d.len(), 7);
        assert_relative_eq!(d[0], -2.0);
        assert_relative_eq!(d[6], 3.0);
        assert_relative_eq!(d[1] - d[0], 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_space_degenerate_counts() {
        assert!(linear_space(0.0, 1.0, 0).is_empty());
        assert_eq!(linear_space(4.0, 1.0, 1), vec![4.0]);
    }
}
