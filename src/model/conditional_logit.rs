//! model::conditional_logit — stratified conditional-logit partial likelihood.
//!
//! Purpose
//! -------
//! Implement [`LogLikelihood`] for
//! `ℓ(β) = Σ_s [ η_case(s) − log Σ_{i ∈ s} exp(η_i) ]`, `η = Xβ`,
//! with closed-form gradient and observed information so the default
//! Newton-Raphson solver can fit it directly.
//!
//! Key behaviors
//! -------------
//! - Per stratum: linear predictors, max-shifted softmax probabilities
//!   `p_i`, expected features `x̄ = Σ p_i x_i`.
//!   - `ℓ_s = η_case − log Σ exp(η_i)`
//!   - `∇ℓ_s = x_case − x̄`
//!   - `I_s = Σ p_i (x_i − x̄)(x_i − x̄)ᵀ` (equal to the weighted second
//!     moment minus `x̄ x̄ᵀ`, accumulated in centered form)
//! - Strata contributions are summed sequentially or, with `parallel`,
//!   as a rayon fold/reduce over strata.
//!
//! Invariants & assumptions
//! ------------------------
//! - The design is validated by [`StratifiedDesign::new`]; features are
//!   finite and every stratum has one case.
//! - `I(β)` is positive semi-definite for every `β`; it is singular when
//!   features do not vary within strata.
//!
//! Testing notes
//! -------------
//! - Gradient and information are checked against `finitediff` central
//!   differences of the value and gradient.
use crate::model::design::{Stratum, StratifiedDesign};
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Cost, Evaluation, Grad, Hessian, LogLikelihood, Theta, validation::validate_theta0,
    },
    numerical_stability::transformations::softmax_in_place,
};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// How much of the likelihood to accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Value,
    Gradient,
    Full,
}

/// Running sums over strata.
#[derive(Debug, Clone)]
struct Accumulator {
    loglik: f64,
    grad: Array1<f64>,
    info: Array2<f64>,
}

impl Accumulator {
    fn zeros(p: usize, order: Order) -> Self {
        let grad_len = if order == Order::Value { 0 } else { p };
        let info_dim = if order == Order::Full { p } else { 0 };
        Accumulator {
            loglik: 0.0,
            grad: Array1::zeros(grad_len),
            info: Array2::zeros((info_dim, info_dim)),
        }
    }

    fn merge(mut self, other: Accumulator) -> Self {
        self.loglik += other.loglik;
        self.grad += &other.grad;
        self.info += &other.info;
        self
    }
}

/// ConditionalLogit — the stratified partial likelihood of a case-control
/// sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalLogit {
    parallel: bool,
}

impl ConditionalLogit {
    pub fn new(parallel: bool) -> Self {
        ConditionalLogit { parallel }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn accumulate(&self, beta: &Theta, design: &StratifiedDesign, order: Order) -> Accumulator {
        let p = design.n_features();
        if self.parallel {
            design
                .strata()
                .par_iter()
                .fold(
                    || Accumulator::zeros(p, order),
                    |mut acc, stratum| {
                        add_stratum(&mut acc, beta, design, stratum, order);
                        acc
                    },
                )
                .reduce(|| Accumulator::zeros(p, order), Accumulator::merge)
        } else {
            let mut acc = Accumulator::zeros(p, order);
            for stratum in design.strata() {
                add_stratum(&mut acc, beta, design, stratum, order);
            }
            acc
        }
    }
}

fn add_stratum(
    acc: &mut Accumulator, beta: &Theta, design: &StratifiedDesign, stratum: &Stratum, order: Order,
) {
    let mut probs = Array1::from_iter(stratum.rows.iter().map(|&r| design.row(r).dot(beta)));
    let case_eta = probs[stratum.case];
    let log_norm = softmax_in_place(probs.view_mut());
    acc.loglik += case_eta - log_norm;
    if order == Order::Value {
        return;
    }

    let mut mean = Array1::<f64>::zeros(design.n_features());
    for (&row, &prob) in stratum.rows.iter().zip(probs.iter()) {
        mean.scaled_add(prob, &design.row(row));
    }
    acc.grad += &design.row(stratum.case_row());
    acc.grad -= &mean;
    if order == Order::Gradient {
        return;
    }

    let p = design.n_features();
    for (&row, &prob) in stratum.rows.iter().zip(probs.iter()) {
        let centered = &design.row(row) - &mean;
        for j in 0..p {
            let wj = prob * centered[j];
            if wj == 0.0 {
                continue;
            }
            for k in j..p {
                acc.info[[j, k]] += wj * centered[k];
            }
        }
    }
    for j in 0..p {
        for k in 0..j {
            acc.info[[j, k]] = acc.info[[k, j]];
        }
    }
}

impl LogLikelihood for ConditionalLogit {
    type Data = StratifiedDesign;

    fn value(&self, theta: &Theta, data: &StratifiedDesign) -> OptResult<Cost> {
        Ok(self.accumulate(theta, data, Order::Value).loglik)
    }

    fn check(&self, theta: &Theta, data: &StratifiedDesign) -> OptResult<()> {
        validate_theta0(theta, data.n_features())
    }

    fn grad(&self, theta: &Theta, data: &StratifiedDesign) -> OptResult<Grad> {
        Ok(self.accumulate(theta, data, Order::Gradient).grad)
    }

    fn hessian(&self, theta: &Theta, data: &StratifiedDesign) -> OptResult<Hessian> {
        Ok(self.accumulate(theta, data, Order::Full).info)
    }

    fn evaluate(&self, theta: &Theta, data: &StratifiedDesign) -> OptResult<Evaluation> {
        let acc = self.accumulate(theta, data, Order::Full);
        Ok(Evaluation { value: acc.loglik, grad: acc.grad, information: acc.info })
    }
}
