use crate::*;

/// Гиперпараметры обучения.
///
/// Задаются один раз при создании сети и дальше не меняются.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparameters {
    /// Скорость обучения (eta), обычно [0.0; 1.0]
    pub learning_rate: f64,
    /// Доля предыдущего изменения веса (alpha, момент), [0.0; n]
    pub momentum: f64,
    /// Сглаживание скользящей средней ошибки
    pub smoothing_factor: f64,
    /// Зерно генератора начальных весов; None - из энтропии ОС
    pub seed: Option<u64>,
    /// Проверять входы и цели на NaN/бесконечность
    pub check_finite: bool,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.15,
            momentum: 0.5,
            smoothing_factor: 100.0,
            seed: None,
            check_finite: true,
        }
    }
}

impl Hyperparameters {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let named = [
            ("learning_rate", self.learning_rate),
            ("momentum", self.momentum),
            ("smoothing_factor", self.smoothing_factor),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(NetError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Генератор для начальных весов (один на сеть)
    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
