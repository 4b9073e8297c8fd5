// Host-side tests for data-attribute configuration.

use flowfield_core::{FallbackMode, FlowConfig, FlowError};

#[test]
fn no_attributes_means_defaults() {
    let (config, errors) = FlowConfig::from_attrs(std::iter::empty());
    assert_eq!(config, FlowConfig::default());
    assert!(errors.is_empty());
    assert_eq!(config.fallback, FallbackMode::Static);
}

#[test]
fn prefixed_attributes_are_applied() {
    let (config, errors) = FlowConfig::from_attrs([
        ("data-flow-smoothing", "0.2"),
        ("data-flow-time-scale", "0.09"),
        ("data-flow-max-dpr", "2"),
        ("data-flow-fallback", "cpu"),
        ("data-flow-cpu-cell", "6"),
    ]);
    assert!(errors.is_empty());
    assert_eq!(config.smoothing, 0.2);
    assert_eq!(config.time_scale, 0.09);
    assert_eq!(config.max_dpr, 2.0);
    assert_eq!(config.fallback, FallbackMode::Cpu);
    assert_eq!(config.cpu_cell, 6);
}

#[test]
fn bad_values_keep_defaults_and_are_reported() {
    let (config, errors) = FlowConfig::from_attrs([
        ("data-flow-smoothing", "1.5"),
        ("data-flow-time-scale", "-1"),
        ("data-flow-fallback", "webgl"),
        ("data-flow-cpu-cell", "0"),
    ]);
    assert_eq!(config, FlowConfig::default());
    assert_eq!(errors.len(), 4);
    assert!(errors.contains(&FlowError::InvalidConfig {
        key: "fallback".into(),
        value: "webgl".into(),
    }));
}

#[test]
fn unknown_keys_are_ignored() {
    let (config, errors) = FlowConfig::from_attrs([("data-flow-colour", "teal")]);
    assert_eq!(config, FlowConfig::default());
    assert!(errors.is_empty());
}

#[test]
fn device_pixel_ratio_is_capped() {
    let config = FlowConfig::default();
    assert_eq!(config.effective_dpr(3.0), 1.6f32 as f64);
    assert_eq!(config.effective_dpr(0.5), 1.0);
    assert_eq!(config.effective_dpr(f64::NAN), 1.0);
    assert_eq!(config.effective_dpr(1.25), 1.25);
}
