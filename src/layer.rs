use crate::*;

/// Слой сети: нейроны и отдельно нейрон смещения.
///
/// Выход смещения всегда 1.0. Смещение участвует как вход следующего слоя,
/// но само не рассчитывается прямым проходом и не имеет входных связей.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    bias: Neuron,
}

impl Layer {
    pub(crate) fn new(neurons: Vec<Neuron>, mut bias: Neuron) -> Self {
        bias.set_activation(1.0);
        Self { neurons, bias }
    }

    /// Слой из `width` нейронов (+ смещение) со случайными весами
    /// `outgoing` связей у каждого
    pub fn random(rng: &mut dyn RngCore, width: usize, outgoing: usize) -> Self {
        let neurons = (0..width)
            .map(|position| Neuron::random(rng, outgoing, position))
            .collect();
        let bias = Neuron::random(rng, outgoing, width);
        Self::new(neurons, bias)
    }

    /// Количество нейронов без смещения
    pub fn width(&self) -> usize {
        self.neurons.len()
    }

    /// Количество нейронов вместе со смещением
    pub fn len(&self) -> usize {
        self.neurons.len() + 1
    }

    /// Слой никогда не пуст: нейрон смещения есть всегда
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn bias(&self) -> &Neuron {
        &self.bias
    }

    /// Все нейроны слоя, смещение последним
    pub fn iter(&self) -> impl Iterator<Item = &Neuron> + '_ {
        self.neurons.iter().chain(iter::once(&self.bias))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Neuron> + '_ {
        self.neurons.iter_mut().chain(iter::once(&mut self.bias))
    }

    /// Выходы нейронов (без смещения)
    pub fn activations(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::activation).collect()
    }
}

/// Индекс `width()` - нейрон смещения
impl Index<usize> for Layer {
    type Output = Neuron;

    fn index(&self, index: usize) -> &Neuron {
        if index == self.neurons.len() {
            &self.bias
        } else {
            &self.neurons[index]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_is_last() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let layer = Layer::random(&mut rng, 3, 2);
        assert_eq!(layer.width(), 3);
        assert_eq!(layer.len(), 4);
        assert_eq!(layer[3].activation(), 1.0);
        assert_eq!(layer[3].position(), 3);
        assert_eq!(layer.iter().map(Neuron::position).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(layer.iter().all(|n| n.outgoing().len() == 2));
    }

    #[test]
    fn activations_exclude_bias() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let mut layer = Layer::random(&mut rng, 2, 0);
        layer.neurons_mut()[1].set_activation(0.5);
        assert_eq!(layer.activations(), vec![0.0, 0.5]);
    }
}
