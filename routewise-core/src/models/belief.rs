//! Beta belief over "this route is the best choice in this context".
//!
//! Prior: Beta(alpha0, beta0), uniform at (1, 1).
//! Update: alpha += o, beta += 1 - o for a graded outcome o in [0, 1].
//! Conjugacy is exact only for binary outcomes; graded rewards are folded in
//! as fractional pseudo-counts.
//! Decay: x' = x0 + f * (x - x0) for both parameters, f in (0, 1].
//! Forget: alpha -= o, beta -= 1 - o, each floored at the prior.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use super::Outcome;

/// Immutable Beta parameters for one (context, route) pair.
///
/// Updates produce a new value; the store swaps it in under the key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeliefState {
    pub alpha: f64,
    pub beta: f64,
    /// Number of outcomes folded into this belief.
    #[serde(default)]
    pub updates: u64,
}

impl BeliefState {
    /// Belief at the prior with no evidence. Callers validate the prior.
    pub fn prior(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            updates: 0,
        }
    }

    /// Both parameters finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.alpha > 0.0 && self.beta > 0.0
    }

    /// Fold one outcome in.
    pub fn applied(&self, outcome: Outcome) -> Self {
        Self {
            alpha: self.alpha + outcome.value(),
            beta: self.beta + outcome.complement(),
            updates: self.updates + 1,
        }
    }

    /// Pull both parameters toward `prior` by `factor`.
    ///
    /// The result is a convex combination of two positive values, so it stays
    /// positive. `factor` must already be validated to lie in (0, 1].
    pub fn decayed(&self, prior: &BeliefState, factor: f64) -> Self {
        Self {
            alpha: prior.alpha + factor * (self.alpha - prior.alpha),
            beta: prior.beta + factor * (self.beta - prior.beta),
            updates: self.updates,
        }
    }

    /// Take one previously applied outcome back out.
    ///
    /// Each parameter is floored at `prior`, so float drift after many
    /// apply/forget pairs can never push a belief below where it started.
    pub fn forgotten(&self, prior: &BeliefState, outcome: Outcome) -> Self {
        Self {
            alpha: (self.alpha - outcome.value()).max(prior.alpha),
            beta: (self.beta - outcome.complement()).max(prior.beta),
            updates: self.updates.saturating_sub(1),
        }
    }

    /// Posterior mean: alpha / (alpha + beta).
    pub fn mean(&self) -> f64 {
        let sum = self.alpha + self.beta;
        if sum <= 0.0 || !sum.is_finite() {
            return 0.5;
        }
        (self.alpha / sum).clamp(0.0, 1.0)
    }

    /// Posterior variance: alpha*beta / ((alpha+beta)^2 * (alpha+beta+1)).
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        let denom = sum * sum * (sum + 1.0);
        if denom <= 0.0 || !denom.is_finite() {
            return 0.25;
        }
        let var = (self.alpha * self.beta) / denom;
        if var.is_finite() {
            var.max(0.0)
        } else {
            0.25
        }
    }

    /// Central credible interval holding `level` of the probability mass.
    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        credible_interval(self.alpha, self.beta, level)
    }
}

/// Compute the central credible interval of Beta(alpha, beta) via the
/// inverse CDF. Returns (0, 1) for invalid parameters.
pub fn credible_interval(alpha: f64, beta_param: f64, level: f64) -> (f64, f64) {
    if alpha <= 0.0 || beta_param <= 0.0 || !alpha.is_finite() || !beta_param.is_finite() {
        return (0.0, 1.0);
    }

    // The inverse CDF gets unstable for huge parameters; the mass is a spike.
    if alpha > 1e6 || beta_param > 1e6 {
        let mean = alpha / (alpha + beta_param);
        let epsilon = 1e-6;
        return ((mean - epsilon).max(0.0), (mean + epsilon).min(1.0));
    }

    let tail = (1.0 - level) / 2.0;

    match Beta::new(alpha, beta_param) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);
            let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
            let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };
            (low, high)
        }
        Err(_) => (0.0, 1.0),
    }
}
