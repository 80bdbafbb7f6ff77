//! Chroma normalization strategies

const EPSILON: f32 = 1e-10;

/// Scale a chroma frame so its largest entry is 1.0 (L-infinity norm)
///
/// Frames whose maximum is below numerical noise are left untouched, so
/// silent frames stay all-zero instead of amplifying noise.
pub fn normalize_frame_max(chroma: &mut [f32]) {
    let max = chroma.iter().copied().fold(0.0f32, f32::max);
    if max <= EPSILON {
        return;
    }
    for value in chroma.iter_mut() {
        *value /= max;
    }
}
