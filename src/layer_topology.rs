use crate::*;

/// Топология слоя
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTopology {
    /// Количество нейронов в слое (без нейрона смещения)
    pub neurons: usize,
}

impl From<usize> for LayerTopology {
    fn from(neurons: usize) -> Self {
        Self { neurons }
    }
}

impl LayerTopology {
    /// Топология сети из списка ширин слоев: [3, 2, 1]
    pub fn from_widths(widths: &[usize]) -> Vec<LayerTopology> {
        widths.iter().map(|&w| w.into()).collect()
    }

    /// Сеть строится минимум из 2 слоев (вход и выход), в каждом хотя бы 1 нейрон
    pub fn validate(layers: &[LayerTopology]) -> Result<()> {
        if layers.len() < 2 {
            return Err(NetError::InvalidTopology(format!(
                "at least 2 layers are required, got {}",
                layers.len()
            )));
        }
        if let Some((i, _)) = layers.iter().find_position(|l| l.neurons == 0) {
            return Err(NetError::InvalidTopology(format!("layer {i} has no neurons")));
        }
        Ok(())
    }
}
