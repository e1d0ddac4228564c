//! Easing curves mapping progress 0..1 onto 0..1.
//!
//! Every curve clamps: input <= 0 gives 0, input >= 1 gives 1.

use std::f64::consts::PI;

pub type EaseFn = fn(f64) -> f64;

/// Curves addressable by name, e.g. from settings.
pub const EASE_FUNCTIONS: &[(&str, EaseFn)] = &[
    ("linear", ease_linear),
    ("quad_in", quad_in),
    ("quad_out", quad_out),
    ("quad_in_out", quad_in_out),
    ("cubic_in", cubic_in),
    ("cubic_out", cubic_out),
    ("cubic_in_out", cubic_in_out),
    ("expo_in", expo_in),
    ("expo_out", expo_out),
    ("expo_in_out", expo_in_out),
    ("sin_in", sin_in),
    ("sin_out", sin_out),
    ("sin_in_out", sin_in_out),
    ("quart_in", quart_in),
    ("quart_out", quart_out),
    ("quart_in_out", quart_in_out),
    ("quint_in", quint_in),
    ("quint_out", quint_out),
    ("quint_in_out", quint_in_out),
    ("circ_in", circ_in),
    ("circ_out", circ_out),
    ("circ_in_out", circ_in_out),
];

pub fn ease_by_name(name: &str) -> Option<EaseFn> {
    EASE_FUNCTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
}

/// Ends of the curve, shared by every ease.
fn clamped(x: f64) -> Option<f64> {
    if x <= 0.0 {
        Some(0.0)
    } else if x >= 1.0 {
        Some(1.0)
    } else {
        None
    }
}

pub fn ease_linear(x: f64) -> f64 {
    clamped(x).unwrap_or(x)
}

pub fn quad_in(x: f64) -> f64 {
    clamped(x).unwrap_or(x * x)
}

pub fn quad_out(x: f64) -> f64 {
    clamped(x).unwrap_or(x * (2.0 - x))
}

pub fn quad_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        if x < 0.5 {
            2.0 * x * x
        } else {
            1.0 - (-2.0 * x + 2.0).powi(2) / 2.0
        }
    })
}

pub fn cubic_in(x: f64) -> f64 {
    clamped(x).unwrap_or(x * x * x)
}

pub fn cubic_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        let t = x - 1.0;
        t * t * t + 1.0
    })
}

pub fn cubic_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        let t = x * 2.0;
        if t <= 1.0 {
            t * t * t / 2.0
        } else {
            let t = t - 2.0;
            (t * t * t + 2.0) / 2.0
        }
    })
}

pub fn expo_in(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 2f64.powf(10.0 * x - 10.0))
}

pub fn expo_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 1.0 - 2f64.powf(-10.0 * x))
}

pub fn expo_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        if x < 0.5 {
            2f64.powf(20.0 * x - 10.0) / 2.0
        } else {
            (2.0 - 2f64.powf(-20.0 * x + 10.0)) / 2.0
        }
    })
}

pub fn sin_in(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 1.0 - (x * PI / 2.0).cos())
}

pub fn sin_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| (x * PI / 2.0).sin())
}

pub fn sin_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| -((PI * x).cos() - 1.0) / 2.0)
}

pub fn quart_in(x: f64) -> f64 {
    clamped(x).unwrap_or(x * x * x * x)
}

pub fn quart_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 1.0 - (1.0 - x).powi(4))
}

pub fn quart_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        if x < 0.5 {
            8.0 * x * x * x * x
        } else {
            1.0 - (-2.0 * x + 2.0).powi(4) / 2.0
        }
    })
}

pub fn quint_in(x: f64) -> f64 {
    clamped(x).unwrap_or(x * x * x * x * x)
}

pub fn quint_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 1.0 - (1.0 - x).powi(5))
}

pub fn quint_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        if x < 0.5 {
            16.0 * x * x * x * x * x
        } else {
            1.0 - (-2.0 * x + 2.0).powi(5) / 2.0
        }
    })
}

pub fn circ_in(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| 1.0 - (1.0 - x * x).sqrt())
}

pub fn circ_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| (1.0 - (x - 1.0).powi(2)).sqrt())
}

pub fn circ_in_out(x: f64) -> f64 {
    clamped(x).unwrap_or_else(|| {
        if x < 0.5 {
            (1.0 - (1.0 - (2.0 * x).powi(2)).sqrt()) / 2.0
        } else {
            ((1.0 - (-2.0 * x + 2.0).powi(2)).sqrt() + 1.0) / 2.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_all_curves_clamp() {
        for (name, ease) in EASE_FUNCTIONS {
            assert_eq!(ease(-0.5), 0.0, "{name} below range");
            assert_eq!(ease(0.0), 0.0, "{name} at 0");
            assert_eq!(ease(1.0), 1.0, "{name} at 1");
            assert_eq!(ease(3.0), 1.0, "{name} above range");
        }
    }

    #[test]
    fn test_all_curves_are_monotonic() {
        for (name, ease) in EASE_FUNCTIONS {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = ease(i as f64 / 100.0);
                assert!(v + 1e-12 >= last, "{name} decreases at {i}");
                last = v;
            }
        }
    }

    #[test]
    fn test_midpoints() {
        assert_close(ease_linear(0.25), 0.25);
        assert_close(quad_in(0.5), 0.25);
        assert_close(quad_out(0.5), 0.75);
        assert_close(cubic_in(0.5), 0.125);
        assert_close(cubic_out(0.5), 0.875);
        assert_close(quart_in(0.5), 0.0625);
        assert_close(quint_in(0.5), 0.03125);
        assert_close(sin_out(0.5), (PI / 4.0).sin());
        for ease in [quad_in_out, cubic_in_out, quart_in_out, quint_in_out, sin_in_out, circ_in_out, expo_in_out] {
            assert_close(ease(0.5), 0.5);
        }
    }

    #[test]
    fn test_quint_in_out_halves() {
        assert_close(quint_in_out(0.25), 16.0 * 0.25f64.powi(5));
        assert_close(quint_in_out(0.75), 1.0 - 0.5f64.powi(5) / 2.0);
    }

    #[test]
    fn test_lookup_by_name() {
        let ease = ease_by_name("cubic_in").unwrap();
        assert_close(ease(0.5), 0.125);
        assert!(ease_by_name("bounce").is_none());
    }
}
