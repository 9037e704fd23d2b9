use argminmax::ArgMinMax;

// Callers guarantee non-empty input; argminmax panics on an empty slice.
pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

pub fn get_min_max(vec: &[f64]) -> (f64, f64) {
    (get_min(vec), get_max(vec))
}

/// Round to 2 decimals. Display boundary only; sums and means are carried at
/// full precision and rounded exactly once, here.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
