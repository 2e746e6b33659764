use crate::*;

/// Сеть: входной слой, скрытые слои, выходной слой.
///
/// Обучение по одному примеру: `forward_propagate`, затем `backward_propagate`
/// с целевыми значениями для выходов, полученных этим же прямым проходом.
#[derive(Clone, Debug)]
pub struct Network {
    /// Слои сети, минимум 2
    layers: Vec<Layer>,
    params: Hyperparameters,
    /// RMS ошибка последнего обратного прохода
    last_error: f64,
    /// Скользящая средняя ошибки
    recent_average_error: f64,
}

impl Network {
    /// Создание сети со случайными весами; генератор создается один раз на сеть
    pub fn new(layers: &[LayerTopology], params: Hyperparameters) -> Result<Self> {
        let mut rng = params.rng();
        Self::random(&mut rng, layers, params)
    }

    /// Создание сети со случайными весами из [0, 1) и указанной топологией
    pub fn random(
        rng: &mut dyn RngCore,
        layers: &[LayerTopology],
        params: Hyperparameters,
    ) -> Result<Self> {
        LayerTopology::validate(layers)?;
        params.validate()?;

        let built = layers
            .iter()
            .enumerate()//обход послойно
            .map(|(i, layer)| {
                //у нейронов последнего слоя выходных связей нет
                let outgoing = layers.get(i + 1).map_or(0, |next| next.neurons);
                Layer::random(rng, layer.neurons, outgoing)
            })
            .collect();
        Ok(Self::with_layers(built, params))
    }

    /// Создание сети с заданными весами.
    ///
    /// Порядок весов как у `weights()`: послойно, по нейрону-источнику
    /// (смещение последним), по нейрону-приемнику.
    pub fn from_weights(
        layers: &[LayerTopology],
        params: Hyperparameters,
        weights: impl IntoIterator<Item = f64>,
    ) -> Result<Self> {
        LayerTopology::validate(layers)?;
        params.validate()?;

        let weights: Vec<f64> = weights.into_iter().collect();
        let expected = Self::connection_count(layers);
        check_len("weights", &weights, expected)?;

        let mut weights = weights.into_iter();
        let built = layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let outgoing = layers.get(i + 1).map_or(0, |next| next.neurons);
                let mut neuron = |position: usize| {
                    let connections = weights
                        .by_ref()
                        .take(outgoing)
                        .enumerate()
                        .map(|(destination, w)| Connection::new(destination, w))
                        .collect();
                    Neuron::new(position, connections)
                };
                let neurons = (0..layer.neurons).map(&mut neuron).collect();
                //последний - смещение
                let bias = neuron(layer.neurons);
                Layer::new(neurons, bias)
            })
            .collect();
        Ok(Self::with_layers(built, params))
    }

    fn with_layers(layers: Vec<Layer>, params: Hyperparameters) -> Self {
        debug!(
            "network created: topology=[{}] connections={}",
            layers.iter().map(Layer::width).join(", "),
            layers.iter().flat_map(Layer::iter).map(|n| n.outgoing().len()).sum::<usize>()
        );
        Self {
            layers,
            params,
            last_error: 0.0,
            recent_average_error: 0.0,
        }
    }

    /// Количество связей сети с топологией `layers` (включая связи смещений)
    pub fn connection_count(layers: &[LayerTopology]) -> usize {
        layers
            .iter()
            .tuple_windows()
            .map(|(l, next)| (l.neurons + 1) * next.neurons)
            .sum()
    }

    /// Расчет в прямом направлении
    pub fn forward_propagate(&mut self, inputs: &[f64]) -> Result<()> {
        self.check_vector("inputs", inputs, self.layers[0].width())?;

        //входы - прямо в выходы нейронов входного слоя, смещение не трогаем
        for (neuron, &x) in self.layers[0].neurons_mut().iter_mut().zip_eq(inputs) {
            neuron.set_activation(x);
        }
        //входной слой пропускаем
        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let prev = &done[i - 1];
            for neuron in rest[0].neurons_mut() {
                neuron.forward_propagate(prev);
            }
            trace!("layer {i} activations: {:?}", rest[0].activations());
        }
        Ok(())
    }

    /// Обратное распространение ошибки и обновление весов
    pub fn backward_propagate(&mut self, targets: &[f64]) -> Result<()> {
        let last = self.layers.len() - 1;
        self.check_vector("targets", targets, self.layers[last].width())?;

        //RMS ошибка выходных нейронов
        let output = &self.layers[last];
        let squared: f64 = output
            .neurons()
            .iter()
            .zip_eq(targets)
            .map(|(n, &t)| (t - n.activation()).powi(2))
            .sum();
        let error = (squared / output.width() as f64).sqrt();
        //конечные, но огромные цели дают переполнение ошибки
        if self.params.check_finite && !error.is_finite() {
            debug!("rejected targets: rms error overflowed");
            return Err(NetError::NonFinite { what: "error", index: 0 });
        }
        self.last_error = error;
        let smoothing = self.params.smoothing_factor;
        self.recent_average_error =
            (self.recent_average_error * smoothing + self.last_error) / (smoothing + 1.0);
        debug!(
            "backward pass: rms error={:.6} recent average={:.6}",
            self.last_error, self.recent_average_error
        );

        //градиенты выходного слоя
        for (neuron, &t) in self.layers[last].neurons_mut().iter_mut().zip_eq(targets) {
            neuron.compute_output_gradient(t);
        }
        //градиенты скрытых слоев, от выхода к входу (смещение тоже, хотя он не используется)
        for i in (1..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let next = &tail[0];
            for neuron in head[i].iter_mut() {
                neuron.compute_hidden_gradient(next);
            }
        }
        //веса: от выходного слоя до первого скрытого включительно
        for i in (1..=last).rev() {
            let (head, tail) = self.layers.split_at_mut(i);
            let prev = &mut head[i - 1];
            for neuron in tail[0].neurons() {
                neuron.update_incoming_weights(prev, &self.params);
            }
            trace!("layer {i}: incoming weights updated");
        }
        Ok(())
    }

    /// Выходы сети (без смещения выходного слоя)
    pub fn results(&self) -> Vec<f64> {
        self.layers[self.layers.len() - 1].activations()
    }

    /// Все связи послойно: (вес, слой, нейрон-источник, нейрон-приемник).
    /// Номер источника, равный ширине слоя, - смещение.
    pub fn weights(&self) -> impl Iterator<Item = (f64, usize, usize, usize)> + '_ {
        self.layers.iter().enumerate().flat_map(|(l, layer)| {
            layer.iter().flat_map(move |n| {
                n.outgoing()
                    .iter()
                    .map(move |c| (c.weight(), l, n.position(), c.destination()))
            })
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn topology(&self) -> Vec<LayerTopology> {
        self.layers.iter().map(|l| l.width().into()).collect()
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.params
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_average_error
    }

    /// Проверка вектора вызывающей стороны до изменения состояния сети
    fn check_vector(&self, what: &'static str, values: &[f64], expected: usize) -> Result<()> {
        check_len(what, values, expected)
            .and_then(|_| match self.params.check_finite {
                true => check_finite(what, values),
                false => Ok(()),
            })
            .map_err(|e| {
                debug!("rejected {what}: {e}");
                e
            })
    }
}
