//! Error-free transformations
//!
//! Each operation returns its round-to-nearest result together with the
//! rounding error `exact - nearest`. The sign of the error is always exact;
//! the magnitude is exact for add, sub, mul and cast and a close
//! approximation for div and the fused operations.
//!
//! Any case whose nearest result is NaN or infinite, or whose error cannot
//! be represented, is reported as exact so that it is never perturbed. The
//! same holds when the other candidate would be ±∞ (nearest is ±MAX), so no
//! mode rounds a finite result out of range.
//!
//! Limitation: when a product or fused result is subnormal or underflows to
//! zero, its error is below the smallest subnormal and comes back as 0. Such
//! results keep their IEEE value in every mode.

use super::real::Real;

/// Round-to-nearest result and its rounding error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exact<T> {
    /// IEEE round-to-nearest result
    pub nearest: T,
    /// `exact - nearest`, 0 when the result is exact or must not be perturbed
    pub error: f64,
}

impl<T: Real> Exact<T> {
    /// Result passed through untouched
    pub fn ieee(nearest: T) -> Self {
        Self {
            nearest,
            error: 0.0,
        }
    }

    fn checked(nearest: T, error: f64) -> Self {
        if !nearest.is_finite() || !error.is_finite() {
            return Self::ieee(nearest);
        }
        // A finite result next to ±MAX never rounds out to infinity
        let beyond = if error > 0.0 {
            nearest.next_up()
        } else {
            nearest.next_down()
        };
        if error != 0.0 && !beyond.is_finite() {
            return Self::ieee(nearest);
        }
        Self { nearest, error }
    }

    pub fn is_exact(&self) -> bool {
        self.error == 0.0
    }

    /// The round-down and round-up candidates bracketing the exact value
    pub fn candidates(&self) -> (T, T) {
        if self.error > 0.0 {
            (self.nearest, self.nearest.next_up())
        } else if self.error < 0.0 {
            (self.nearest.next_down(), self.nearest)
        } else {
            (self.nearest, self.nearest)
        }
    }

    /// Fractional position of the exact value between the two candidates
    ///
    /// 0 at the round-down candidate, 1 at the round-up candidate. This is
    /// the probability of rounding up in the weighted modes.
    pub fn position(&self) -> f64 {
        let (down, up) = self.candidates();
        let gap = up.to_f64() - down.to_f64();
        if gap == 0.0 {
            return 0.0;
        }
        let frac = (self.error.abs() / gap).clamp(0.0, 1.0);
        if self.error > 0.0 {
            frac
        } else {
            1.0 - frac
        }
    }
}

/// Knuth's TwoSum: `a + b = s + e` exactly
#[inline]
pub fn two_sum<T: Real>(a: T, b: T) -> (T, T) {
    let s = a + b;
    let bp = s - a;
    let ap = s - bp;
    let db = b - bp;
    let da = a - ap;
    (s, da + db)
}

/// `a * b = p + e` exactly, using a fused multiply-add
#[inline]
pub fn two_prod<T: Real>(a: T, b: T) -> (T, T) {
    let p = a * b;
    (p, a.fused_mul_add(b, -p))
}

pub fn add<T: Real>(a: T, b: T) -> Exact<T> {
    let (s, e) = two_sum(a, b);
    if !s.is_finite() {
        return Exact::ieee(s);
    }
    Exact::checked(s, e.to_f64())
}

pub fn sub<T: Real>(a: T, b: T) -> Exact<T> {
    add(a, -b)
}

pub fn mul<T: Real>(a: T, b: T) -> Exact<T> {
    let (p, e) = two_prod(a, b);
    if !p.is_finite() {
        return Exact::ieee(p);
    }
    Exact::checked(p, e.to_f64())
}

pub fn div<T: Real>(a: T, b: T) -> Exact<T> {
    let q = a / b;
    if !q.is_finite() {
        return Exact::ieee(q);
    }
    // a - q*b is exactly representable and computed exactly by the fma
    let remainder = (-q).fused_mul_add(b, a);
    Exact::checked(q, remainder.to_f64() / b.to_f64())
}

/// `a * b + c` rounded once, with the ErrFma approximation of its error
pub fn fma<T: Real>(a: T, b: T, c: T) -> Exact<T> {
    let r1 = a.fused_mul_add(b, c);
    if !r1.is_finite() {
        return Exact::ieee(r1);
    }
    let (u1, u2) = two_prod(a, b);
    let (alpha1, z) = two_sum(c, u2);
    let (beta1, beta2) = two_sum(u1, alpha1);
    let gamma = (beta1 - r1) + beta2;
    Exact::checked(r1, gamma.to_f64() + z.to_f64())
}

/// Narrowing conversion with its error measured in double precision
pub fn cast(x: f64) -> Exact<f32> {
    let r = x as f32;
    if x.is_nan() || !r.is_finite() {
        return Exact::ieee(r);
    }
    Exact::checked(r, x - r as f64)
}
