/// Upper axis bound with 10% headroom. Never below `floor`.
pub fn padded_max(values: impl IntoIterator<Item = f64>, floor: f64) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    (max * 1.1).max(floor)
}

pub fn truncate_label(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_max_adds_headroom() {
        assert!((padded_max([1.0, 10.0, 4.0], 1.0) - 11.0).abs() < 1e-12);
        assert_eq!(padded_max(std::iter::empty(), 1.0), 1.0);
        assert_eq!(padded_max([f64::INFINITY, 0.5], 1.0), 1.0);
    }

    #[test]
    fn truncate_label_adds_ellipsis() {
        assert_eq!(truncate_label("hello", 10), "hello");
        assert_eq!(truncate_label("abcdefghijklmnopqrstuvwxyz", 8), "abcde...");
        assert_eq!(truncate_label("μ=1.5 λλλλλλ", 6), "μ=1...");
    }
}
