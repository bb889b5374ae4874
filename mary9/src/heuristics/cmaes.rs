#[cfg(test)]
#[path = "../../tests/unit/heuristics/cmaes_test.rs"]
mod cmaes_test;

use super::*;
use crate::models::Objective;
use crate::utils::{Environment, Float, LogLevel, Subsystem, compare_floats};
use std::sync::Arc;

const INITIAL_SIGMA: Float = 0.3;
const MIN_SIGMA: Float = 1e-12;
const MAX_SIGMA: Float = 1.;

/// A separable (diagonal covariance) covariance matrix adaptation evolution strategy which runs
/// in normalized coordinates. Each advance recombines the best half of the current population,
/// adapts the search distribution and replaces the population with a fresh generation.
pub struct CmaEsHeuristic {
    objective: Arc<Objective>,
    environment: Arc<Environment>,
    population: Population,
    weights: Vec<Float>,
    mu_eff: Float,
    c_sigma: Float,
    d_sigma: Float,
    c_c: Float,
    c_1: Float,
    c_mu: Float,
    chi_n: Float,
    mean: Vec<Float>,
    sigma: Float,
    p_sigma: Vec<Float>,
    p_c: Vec<Float>,
    c_diag: Vec<Float>,
    generation: usize,
}

impl CmaEsHeuristic {
    /// Creates a new instance of `CmaEsHeuristic` starting from given population.
    pub fn new(population: Population, objective: Arc<Objective>, environment: Arc<Environment>) -> Self {
        let dim = objective.dimensions() as Float;
        let mu = (population.popsize() / 2).max(1);

        let weights = (0..mu).map(|i| ((mu as Float + 0.5).ln() - ((i + 1) as Float).ln()).max(0.)).collect::<Vec<_>>();
        let sum_w = weights.iter().sum::<Float>();
        let weights = weights.into_iter().map(|w| w / sum_w).collect::<Vec<_>>();
        let mu_eff = 1. / weights.iter().map(|w| w * w).sum::<Float>();

        let c_sigma = (mu_eff + 2.) / (dim + mu_eff + 5.);
        let d_sigma = 1. + 2. * ((mu_eff - 1.) / (dim + 1.)).max(0.).sqrt() + c_sigma;
        let c_c = (4. + mu_eff / dim) / (dim + 4. + 2. * mu_eff / dim);
        let c_1 = 2. / ((dim + 1.3).powi(2) + mu_eff);
        // separable variant may learn faster as it adapts only the diagonal
        let c_mu = ((dim + 2.) / 3.
            * (2. * (mu_eff - 2. + 1. / mu_eff) / ((dim + 2.).powi(2) + mu_eff)))
            .min(1. - c_1);
        let chi_n = dim.sqrt() * (1. - 1. / (4. * dim) + 1. / (21. * dim * dim));

        let mut heuristic = Self {
            objective,
            environment,
            population,
            weights,
            mu_eff,
            c_sigma,
            d_sigma,
            c_c,
            c_1,
            c_mu,
            chi_n,
            mean: vec![],
            sigma: INITIAL_SIGMA,
            p_sigma: vec![0.; dim as usize],
            p_c: vec![0.; dim as usize],
            c_diag: vec![1.; dim as usize],
            generation: 0,
        };
        heuristic.mean = heuristic.recombine();

        heuristic
    }

    /// Returns current step size.
    pub fn sigma(&self) -> Float {
        self.sigma
    }

    /// Returns current distribution mean in normalized coordinates.
    pub fn mean(&self) -> &[Float] {
        self.mean.as_slice()
    }

    fn get_parents(&self) -> Vec<&[Float]> {
        let individuals = self.population.individuals();
        let mut order = (0..individuals.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| compare_floats(individuals[a].fitness, individuals[b].fitness));

        order.into_iter().take(self.weights.len()).map(|idx| individuals[idx].x.as_slice()).collect()
    }

    fn recombine(&self) -> Vec<Float> {
        let dim = self.objective.dimensions();

        self.get_parents().iter().zip(self.weights.iter()).fold(vec![0.; dim], |mut mean, (x, w)| {
            mean.iter_mut().zip(x.iter()).for_each(|(m, v)| *m += w * v);
            mean
        })
    }

    fn adapt(&mut self) {
        let old_mean = self.mean.clone();
        let mean = self.recombine();
        let sigma = self.sigma;

        let y_w = mean.iter().zip(old_mean.iter()).map(|(m, o)| (m - o) / sigma).collect::<Vec<_>>();

        let ps_factor = (self.c_sigma * (2. - self.c_sigma) * self.mu_eff).sqrt();
        self.p_sigma
            .iter_mut()
            .zip(y_w.iter().zip(self.c_diag.iter()))
            .for_each(|(p, (y, c))| *p = (1. - self.c_sigma) * *p + ps_factor * y / c.sqrt());

        let ps_norm = self.p_sigma.iter().map(|p| p * p).sum::<Float>().sqrt();
        let generation = (self.generation + 1) as i32;
        let h_sigma_threshold = (1.4 + 2. / (self.c_diag.len() as Float + 1.)) * self.chi_n;
        let h_sigma = ps_norm / (1. - (1. - self.c_sigma).powi(2 * generation)).sqrt() < h_sigma_threshold;

        let pc_factor = if h_sigma { (self.c_c * (2. - self.c_c) * self.mu_eff).sqrt() } else { 0. };
        self.p_c.iter_mut().zip(y_w.iter()).for_each(|(p, y)| *p = (1. - self.c_c) * *p + pc_factor * y);

        let parents = self.get_parents();
        let rank_mu = (0..self.c_diag.len())
            .map(|dim| {
                parents
                    .iter()
                    .zip(self.weights.iter())
                    .map(|(x, w)| w * ((x[dim] - old_mean[dim]) / sigma).powi(2))
                    .sum::<Float>()
            })
            .collect::<Vec<_>>();

        let (c_1, c_mu) = (self.c_1, self.c_mu);
        self.c_diag.iter_mut().zip(self.p_c.iter().zip(rank_mu)).for_each(|(c, (p, r))| {
            *c = ((1. - c_1 - c_mu) * *c + c_1 * p * p + c_mu * r).max(Float::EPSILON);
        });

        self.sigma = (sigma * ((self.c_sigma / self.d_sigma) * (ps_norm / self.chi_n - 1.)).exp()).clamp(MIN_SIGMA, MAX_SIGMA);
        self.mean = mean;
    }

    fn sample(&self) -> Vec<Vec<Float>> {
        let random = self.environment.random.as_ref();

        (0..self.population.popsize())
            .map(|_| {
                self.mean
                    .iter()
                    .zip(self.c_diag.iter())
                    .map(|(m, c)| (m + self.sigma * c.sqrt() * random.normal()).clamp(0., 1.))
                    .collect()
            })
            .collect()
    }
}

impl GlobalHeuristic for CmaEsHeuristic {
    fn name(&self) -> &str {
        "CMAES"
    }

    fn advance(&mut self) {
        if self.population.is_empty() {
            return;
        }

        self.adapt();

        let offspring = self.sample();
        let fitness = self.objective.evaluate_batch(offspring.as_slice(), self.environment.is_parallel);
        self.population.replace_all(offspring, fitness);
        self.generation += 1;

        self.environment.log(Subsystem::Global, LogLevel::Debug, || {
            format!(
                "CMAES generation {}: sigma {:.3e}, best fitness {}",
                self.generation,
                self.sigma,
                self.population.best_fitness()
            )
        });
    }

    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }
}
