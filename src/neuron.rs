use crate::*;

/// Функция активации (гиперболический тангенс), диапазон (-1, 1)
pub fn transfer(x: f64) -> f64 {
    x.tanh()
}

/// Производная tanh, выраженная через уже вычисленный выход нейрона: 1 - a^2
pub fn transfer_derivative(activation: f64) -> f64 {
    1.0 - activation * activation
}

#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    /// Выход нейрона
    activation: f64,
    /// Градиент ошибки
    gradient: f64,
    /// Номер нейрона в слое
    position: usize,
    /// Связи с нейронами следующего слоя, упорядочены по номеру приемника
    outgoing: Vec<Connection>,
}

impl Neuron {
    /// Конструктор
    pub fn new(position: usize, outgoing: Vec<Connection>) -> Self {
        debug_assert!(outgoing.iter().tuple_windows().all(|(a, b)| a.destination < b.destination));
        Self {
            activation: 0.0,
            gradient: 0.0,
            position,
            outgoing,
        }
    }

    /// Нейрон со случайными весами выходных связей
    pub fn random(rng: &mut dyn RngCore, outgoing_count: usize, position: usize) -> Self {
        let outgoing = (0..outgoing_count)
            .map(|destination| Connection::random(rng, destination))
            .collect();
        Self::new(position, outgoing)
    }

    pub fn activation(&self) -> f64 {
        self.activation
    }

    pub(crate) fn set_activation(&mut self, value: f64) {
        self.activation = value;
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn outgoing(&self) -> &[Connection] {
        &self.outgoing
    }

    /// Связь с нейроном `destination` следующего слоя
    pub fn connection_to(&self, destination: usize) -> Option<&Connection> {
        self.outgoing
            .binary_search_by_key(&destination, |c| c.destination)
            .ok()
            .map(|i| &self.outgoing[i])
    }

    fn connection_to_mut(&mut self, destination: usize) -> Option<&mut Connection> {
        self.outgoing
            .binary_search_by_key(&destination, |c| c.destination)
            .ok()
            .map(move |i| &mut self.outgoing[i])
    }

    /// Расчет выхода по предыдущему слою (включая его нейрон смещения)
    pub(crate) fn forward_propagate(&mut self, prev: &Layer) {
        let sum: f64 = prev
            .iter()
            .map(|n| {
                n.activation * n.connection_to(self.position).map_or(0.0, |c| c.weight)
            })
            .sum();
        self.activation = transfer(sum);
    }

    /// Градиент нейрона выходного слоя
    pub(crate) fn compute_output_gradient(&mut self, target: f64) {
        let delta = target - self.activation;
        self.gradient = delta * transfer_derivative(self.activation);
    }

    /// Градиент нейрона скрытого слоя
    pub(crate) fn compute_hidden_gradient(&mut self, next: &Layer) {
        let dow = self.weighted_downstream_sum(next);
        self.gradient = dow * transfer_derivative(self.activation);
    }

    /// Вклад нейрона в ошибки следующего слоя (без его смещения)
    fn weighted_downstream_sum(&self, next: &Layer) -> f64 {
        self.outgoing
            .iter()
            .filter_map(|c| next.neurons().get(c.destination).map(|n| c.weight * n.gradient))
            .sum()
    }

    /// Обновление весов входных связей: они хранятся в нейронах предыдущего слоя
    pub(crate) fn update_incoming_weights(&self, prev: &mut Layer, params: &Hyperparameters) {
        for n in prev.iter_mut() {
            let input = n.activation;
            if let Some(edge) = n.connection_to_mut(self.position) {
                edge.apply_update(input, self.gradient, params);
            }
        }
    }
}
