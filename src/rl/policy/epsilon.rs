//! Epsilon-greedy selection over action values.

use rand::Rng;

/// Index of the largest value; the first one wins ties. `None` when empty.
pub fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// With probability `epsilon` returns a uniform index, otherwise the argmax.
pub fn epsilon_greedy<R: Rng + ?Sized>(rng: &mut R, epsilon: f64, q_values: &[f32]) -> usize {
    if q_values.is_empty() {
        return 0;
    }
    if rng.gen::<f64>() < epsilon {
        rng.gen_range(0..q_values.len())
    } else {
        argmax(q_values).unwrap_or(0)
    }
}
