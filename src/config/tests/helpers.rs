//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::ActivityConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose an [`ActivityConfig`] from a sequence of `(layer_type, value)` pairs.
///
/// The struct defaults are always pushed first, as the loader does, so an
/// empty slice yields [`ActivityConfig::default`].
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> ActivityConfig {
    let mut composer = MergeComposer::new();
    let defaults =
        serde_json::to_value(ActivityConfig::default()).expect("defaults should serialise");
    composer.push_defaults(defaults);

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    ActivityConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
