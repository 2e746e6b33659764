//! Полносвязная сеть прямого распространения с обучением
//! методом обратного распространения ошибки (по одному примеру, с моментом).
//!
//! Порядок работы вызывающей стороны:
//! 1. `Network::new(&topology, params)`
//! 2. `forward_propagate(&inputs)`
//! 3. для обучения `backward_propagate(&targets)`
//! 4. `results()`

pub use self::{
    config::*,
    connection::*,
    error::*,
    layer::*,
    layer_topology::*,
    network::*,
    neuron::*,
};

use itertools::Itertools;
use log::{debug, trace};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::iter;
use std::ops::Index;

mod config;
mod connection;
mod error;
mod layer;
mod layer_topology;
mod network;
mod neuron;
