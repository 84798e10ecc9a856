/// Uniform sampling of poses inside the per-component box of a reference pose
use log::trace;
use rand::Rng;

/// Draws each value uniformly from `(-|bound|, |bound|)`.
///
/// A zero bound yields exactly zero for that component.
pub fn sample_within<R: Rng + ?Sized, const N: usize>(bounds: &[f64; N], rng: &mut R) -> [f64; N] {
    let mut sample = [0.0; N];
    for (value, bound) in sample.iter_mut().zip(bounds) {
        let limit = bound.abs();
        if limit > 0.0 {
            *value = rng.random_range(-limit..limit);
        }
    }
    trace!("sampled {:?} within {:?}", sample, bounds);
    sample
}
