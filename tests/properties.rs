use approx::assert_relative_eq;
use lib_feedforward_net::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn params() -> Hyperparameters {
    Hyperparameters::default().with_seed(2024)
}

#[test]
fn layers_have_bias() {
    init_logger();
    for widths in [vec![1, 1], vec![3, 2, 1], vec![4, 5, 6, 2]] {
        let network = Network::new(&LayerTopology::from_widths(&widths), params()).unwrap();
        for (layer, &w) in network.layers().iter().zip(&widths) {
            assert_eq!(layer.len(), w + 1);
            assert_eq!(layer[w].activation(), 1.0);
        }
        assert_eq!(network.layers().last().unwrap().bias().outgoing().len(), 0);
    }
}

#[test]
fn results_len() {
    init_logger();
    let topology = LayerTopology::from_widths(&[3, 4, 2]);
    let mut network = Network::new(&topology, params()).unwrap();
    assert_eq!(network.results().len(), 2);
    network.forward_propagate(&[30.0, 20.0, 10.0]).unwrap();
    assert_eq!(network.results().len(), 2);
    network.backward_propagate(&[0.5, -0.5]).unwrap();
    assert_eq!(network.results().len(), 2);
    assert!(network.forward_propagate(&[1.0]).is_err());
    assert_eq!(network.results().len(), 2);
}

#[test]
fn zero_weights_zero_inputs() {
    init_logger();
    let topology = LayerTopology::from_widths(&[3, 2, 2]);
    let zeros = vec![0.0; Network::connection_count(&topology)];
    let mut network = Network::from_weights(&topology, params(), zeros).unwrap();
    network.forward_propagate(&[0.0, 0.0, 0.0]).unwrap();

    assert_eq!(network.results(), vec![0.0, 0.0]);
    for layer in network.layers() {
        assert!(layer.neurons().iter().all(|n| n.activation() == 0.0));
        assert_eq!(layer.bias().activation(), 1.0);
    }
}

#[test]
fn forward_is_deterministic() {
    init_logger();
    let topology = LayerTopology::from_widths(&[2, 3, 2]);
    let mut network = Network::new(&topology, params()).unwrap();
    network.forward_propagate(&[0.25, -0.75]).unwrap();
    let first = network.results();
    for _ in 0..5 {
        network.forward_propagate(&[0.25, -0.75]).unwrap();
        assert_eq!(network.results(), first);
    }
}

#[test]
fn single_weight_update() {
    init_logger();
    //[1, 1]: вход->выход w0 и смещение->выход, сумма = 0, выход 0
    let topology = LayerTopology::from_widths(&[1, 1]);
    let w0 = 0.2;
    let mut network = Network::from_weights(&topology, params(), [w0, -0.2]).unwrap();
    network.forward_propagate(&[1.0]).unwrap();
    assert_relative_eq!(network.results()[0], 0.0, epsilon = 1e-12);

    //градиент выхода = (0.5 - 0) * (1 - 0) = 0.5
    network.backward_propagate(&[0.5]).unwrap();
    assert_relative_eq!(network.layers()[1][0].gradient(), 0.5, epsilon = 1e-12);

    let edge = network.layers()[0][0].outgoing()[0];
    assert_relative_eq!(edge.last_update(), 0.075, epsilon = 1e-12);
    assert_relative_eq!(edge.weight(), w0 + 0.075, epsilon = 1e-12);
}

#[test]
fn momentum_carries_last_update() {
    init_logger();
    let topology = LayerTopology::from_widths(&[1, 1]);
    let mut network = Network::from_weights(&topology, params(), [0.2, -0.2]).unwrap();
    network.forward_propagate(&[1.0]).unwrap();
    network.backward_propagate(&[0.5]).unwrap();
    //без нового прямого прохода выход тот же - градиент тот же
    network.backward_propagate(&[0.5]).unwrap();

    let edge = network.layers()[0][0].outgoing()[0];
    assert_relative_eq!(edge.last_update(), 0.075 + 0.5 * 0.075, epsilon = 1e-12);
    assert_relative_eq!(edge.weight(), 0.2 + 0.075 + 0.1125, epsilon = 1e-12);
}

#[test]
fn length_mismatch_rejected() {
    init_logger();
    let topology = LayerTopology::from_widths(&[3, 2, 1]);
    let mut network = Network::new(&topology, params()).unwrap();
    network.forward_propagate(&[0.1, 0.2, 0.3]).unwrap();
    let before = network.clone();

    assert_eq!(
        network.forward_propagate(&[1.0, 2.0]),
        Err(NetError::SizeMismatch { what: "inputs", got: 2, expected: 3 })
    );
    assert!(network.forward_propagate(&[1.0, 2.0, 3.0, 4.0]).is_err());
    assert_eq!(network.layers(), before.layers());

    assert_eq!(
        network.backward_propagate(&[1.0, 0.0]),
        Err(NetError::SizeMismatch { what: "targets", got: 2, expected: 1 })
    );
    assert_eq!(network.layers(), before.layers());
    assert_eq!(network.last_error(), before.last_error());
}

#[test]
fn backward_without_forward() {
    init_logger();
    let topology = LayerTopology::from_widths(&[2, 2, 1]);
    let mut network = Network::new(&topology, params()).unwrap();
    network.backward_propagate(&[0.5]).unwrap();
    //все выходы 0.0 - ошибка равна цели
    assert_relative_eq!(network.last_error(), 0.5, epsilon = 1e-12);
    assert!(network.weights().all(|(w, ..)| w.is_finite()));
}

#[test]
fn error_decreases() {
    init_logger();
    let topology = LayerTopology::from_widths(&[2, 2, 1]);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut network = Network::random(&mut rng, &topology, Hyperparameters::default()).unwrap();
    let (inputs, targets) = ([1.0, 0.0], [0.5]);

    network.forward_propagate(&inputs).unwrap();
    network.backward_propagate(&targets).unwrap();
    let first = network.last_error();

    for _ in 1..1000 {
        network.forward_propagate(&inputs).unwrap();
        network.backward_propagate(&targets).unwrap();
    }
    assert!(network.last_error() < first);
    assert!(network.recent_average_error() > 0.0);
}
