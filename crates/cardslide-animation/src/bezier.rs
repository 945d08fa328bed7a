//! Cubic-bezier evaluation and root solving.
//!
//! A timing curve is a cubic bezier with fixed endpoints (0,0) and (1,1)
//! and two free control points. The x axis is playback time, the y axis is
//! visual progress. Two solvers live here: y-given-x for evaluating an
//! easing function, and x-given-y for resuming a finishing animation at
//! the playback time matching the progress a drag left the card at.

/// One axis of a unit-endpoint cubic bezier in power-basis form,
/// `sample(t) = ((a*t + b)*t + c)*t`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BezierAxis {
    a: f32,
    b: f32,
    c: f32,
}

impl BezierAxis {
    pub(crate) fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    pub(crate) fn sample(&self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    pub(crate) fn derivative(&self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Real roots of `sample(t) == target` within [0, 1].
    fn roots_for(&self, target: f32) -> CubicRoots {
        solve_cubic(self.a, self.b, self.c, -target)
    }
}

/// Up to three real roots, without heap allocation.
#[derive(Clone, Copy, Debug, Default)]
struct CubicRoots {
    values: [f32; 3],
    count: usize,
}

impl CubicRoots {
    fn push(&mut self, root: f32) {
        self.values[self.count] = root;
        self.count += 1;
    }

    fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values[..self.count].iter().copied()
    }
}

/// Solve `a*t^3 + b*t^2 + c*t + d == 0` for real roots, degrading to the
/// quadratic and linear cases when leading coefficients vanish.
fn solve_cubic(a: f32, b: f32, c: f32, d: f32) -> CubicRoots {
    const EPSILON: f32 = 1e-7;
    let mut roots = CubicRoots::default();

    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            if c.abs() >= EPSILON {
                roots.push(-d / c);
            }
            return roots;
        }
        let discriminant = c * c - 4.0 * b * d;
        if discriminant >= 0.0 {
            let sqrt_d = discriminant.sqrt();
            roots.push((-c + sqrt_d) / (2.0 * b));
            if sqrt_d > EPSILON {
                roots.push((-c - sqrt_d) / (2.0 * b));
            }
        }
        return roots;
    }

    // Normalize and depress: t = s - p/3 turns the cubic into s^3 + Q*s + R.
    let p = b / a;
    let q = c / a;
    let r = d / a;
    let shift = p / 3.0;

    let big_q = (3.0 * q - p * p) / 9.0;
    let big_r = (9.0 * p * q - 27.0 * r - 2.0 * p * p * p) / 54.0;
    let discriminant = big_q * big_q * big_q + big_r * big_r;

    if discriminant > EPSILON {
        // One real root (Cardano).
        let sqrt_d = discriminant.sqrt();
        let s = (big_r + sqrt_d).cbrt();
        let t = (big_r - sqrt_d).cbrt();
        roots.push(s + t - shift);
    } else if discriminant >= -EPSILON {
        // Repeated roots.
        let s = big_r.cbrt();
        roots.push(2.0 * s - shift);
        roots.push(-s - shift);
    } else {
        // Three distinct real roots (trigonometric form).
        let theta = (big_r / (-big_q * big_q * big_q).sqrt()).clamp(-1.0, 1.0).acos();
        let magnitude = 2.0 * (-big_q).sqrt();
        for k in 0..3 {
            let angle = (theta + 2.0 * std::f32::consts::PI * k as f32) / 3.0;
            roots.push(magnitude * angle.cos() - shift);
        }
    }

    roots
}

/// Evaluate a timing curve: visual progress for a playback-time fraction.
///
/// Newton-Raphson on the x polynomial with a binary-subdivision fallback,
/// then one y evaluation at the solved parameter.
pub fn bezier_progress(c1: (f32, f32), c2: (f32, f32), fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let x_axis = BezierAxis::new(c1.0, c2.0);
    let y_axis = BezierAxis::new(c1.1, c2.1);

    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let error = x_axis.sample(t) - fraction;
        if error.abs() < 1e-6 {
            converged = true;
            break;
        }
        let slope = x_axis.derivative(t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    if !converged {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..16 {
            let error = x_axis.sample(t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    y_axis.sample(t)
}

/// Recover the playback-time fraction at which a timing curve's output
/// equals `progression`.
///
/// Solves the y polynomial for the curve parameter, then maps the first
/// in-range root through the x polynomial. Inputs outside [0, 1] clamp,
/// and the exact boundaries short-circuit so resumed playback lands
/// precisely on an endpoint.
pub fn time_given_progression(c1: (f32, f32), c2: (f32, f32), progression: f32) -> f32 {
    let progression = progression.clamp(0.0, 1.0);
    if progression <= 0.0 {
        return 0.0;
    }
    if progression >= 1.0 {
        return 1.0;
    }

    const SLACK: f32 = 1e-4;
    let x_axis = BezierAxis::new(c1.0, c2.0);
    let y_axis = BezierAxis::new(c1.1, c2.1);

    for root in y_axis.roots_for(progression).iter() {
        if (-SLACK..=1.0 + SLACK).contains(&root) {
            return x_axis.sample(root.clamp(0.0, 1.0)).clamp(0.0, 1.0);
        }
    }

    // No in-range root; fall back to the linear guess rather than failing.
    progression
}
