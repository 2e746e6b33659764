use crate::*;

/// Выходная связь нейрона с нейроном следующего слоя
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    /// Номер нейрона-приемника в следующем слое
    pub(crate) destination: usize,
    pub(crate) weight: f64,
    /// Предыдущее изменение веса (для момента)
    pub(crate) last_update: f64,
}

impl Connection {
    pub fn new(destination: usize, weight: f64) -> Self {
        Self {
            destination,
            weight,
            last_update: 0.0,
        }
    }

    /// Связь со случайным весом из [0, 1)
    pub fn random(rng: &mut dyn RngCore, destination: usize) -> Self {
        Self::new(destination, rng.gen_range(0.0..1.0))
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Изменение веса с учетом момента: eta * вход * градиент + alpha * прошлое изменение
    pub(crate) fn apply_update(&mut self, input: f64, gradient: f64, params: &Hyperparameters) {
        let update = params.learning_rate * input * gradient + params.momentum * self.last_update;
        self.weight += update;
        self.last_update = update;
    }
}
