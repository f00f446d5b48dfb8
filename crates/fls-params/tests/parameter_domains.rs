//! Domain enforcement of the parameter model.

use fls_params::{ChannelWidth, ParamError, ParameterModel, PhyType, PropagationModel};
use proptest::prelude::*;

fn assert_invalid(result: Result<(), ParamError>, expected_field: &str) {
    match result {
        Err(ParamError::InvalidParameter { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidParameter for {expected_field}, got {other:?}"),
    }
}

#[test]
fn node_count_above_domain_is_rejected() {
    let mut model = ParameterModel::new();
    assert_invalid(model.set_node_count(51), "node_count");
    assert_eq!(model.snapshot().node_count, 10);
}

#[test]
fn disabled_phy_type_is_rejected() {
    let mut model = ParameterModel::new();
    assert_eq!(
        model.set_phy_type_str("ble"),
        Err(ParamError::UnsupportedPhyType { phy: PhyType::Ble })
    );
    assert_eq!(model.snapshot().phy_type, PhyType::Wifi);
}

#[test]
fn unknown_phy_name_is_an_invalid_parameter() {
    let mut model = ParameterModel::new();
    assert_invalid(model.set_phy_type_str("lte"), "phy_type");
    assert_eq!(model.snapshot().phy_type, PhyType::Wifi);
}

#[test]
fn boundary_values_are_accepted() {
    let mut model = ParameterModel::new();
    model.set_node_count(2).unwrap();
    model.set_node_count(50).unwrap();
    model.set_simulation_time(1).unwrap();
    model.set_simulation_time(30).unwrap();
    model.set_tx_power(0).unwrap();
    model.set_tx_power(30).unwrap();
    model.set_frequency(2.4).unwrap();
    model.set_frequency(6.0).unwrap();
    model.set_channel_width(20).unwrap();
    model.set_channel_width(160).unwrap();

    let config = model.snapshot();
    assert_eq!(config.node_count, 50);
    assert_eq!(config.simulation_time_s, 30);
    assert_eq!(config.tx_power_dbm, 30);
    assert_eq!(config.frequency_ghz, 6.0);
    assert_eq!(config.channel_width, ChannelWidth::Mhz160);
}

#[test]
fn channel_width_between_steps_is_rejected() {
    let mut model = ParameterModel::new();
    assert_invalid(model.set_channel_width(70), "channel_width");
    assert_eq!(model.snapshot().channel_width, ChannelWidth::Mhz80);
}

#[test]
fn propagation_model_text_boundary() {
    let mut model = ParameterModel::new();
    model
        .set_propagation_model_str("RangePropagationPropagationLossModel")
        .unwrap();
    assert_eq!(
        model.snapshot().propagation_model,
        PropagationModel::RangePropagation
    );
    assert_invalid(model.set_propagation_model_str("Hata"), "propagation_model");
    assert_eq!(
        model.snapshot().propagation_model,
        PropagationModel::RangePropagation
    );
}

#[test]
fn wifi_fields_survive_phy_round_trip() {
    let mut model = ParameterModel::new().with_enabled_phy_types(&[PhyType::Ble, PhyType::Zigbee]);
    model.set_tx_power(7).unwrap();
    model.set_frequency(2.4).unwrap();
    model.set_channel_width(40).unwrap();
    model.set_propagation_model(PropagationModel::Nakagami);
    let wifi_before = model.snapshot();

    for phy in [PhyType::Ble, PhyType::Zigbee] {
        model.set_phy_type(phy).unwrap();
        assert!(!model.wifi_params_apply());
        model.set_phy_type(PhyType::Wifi).unwrap();
        assert!(model.wifi_params_apply());
        assert_eq!(model.snapshot(), wifi_before);
    }
}

fn outside_u32(lo: u32, hi: u32) -> impl Strategy<Value = u32> {
    prop_oneof![0..lo, (hi + 1)..=u32::MAX]
}

proptest! {
    #[test]
    fn out_of_domain_node_count_leaves_model_unchanged(v in outside_u32(2, 50)) {
        let mut model = ParameterModel::new();
        let before = model.snapshot();
        let rejected = matches!(model.set_node_count(v), Err(ParamError::InvalidParameter { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn out_of_domain_simulation_time_leaves_model_unchanged(v in outside_u32(1, 30)) {
        let mut model = ParameterModel::new();
        let before = model.snapshot();
        let rejected = matches!(model.set_simulation_time(v), Err(ParamError::InvalidParameter { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn out_of_domain_tx_power_leaves_model_unchanged(
        v in prop_oneof![i32::MIN..0, 31..=i32::MAX]
    ) {
        let mut model = ParameterModel::new();
        let before = model.snapshot();
        let rejected = matches!(model.set_tx_power(v), Err(ParamError::InvalidParameter { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn out_of_domain_frequency_leaves_model_unchanged(
        v in prop_oneof![-1.0e6_f64..2.35, 6.05_f64..1.0e6]
    ) {
        let mut model = ParameterModel::new();
        let before = model.snapshot();
        let rejected = matches!(model.set_frequency(v), Err(ParamError::InvalidParameter { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn unlisted_channel_width_leaves_model_unchanged(v in 0_u32..400) {
        prop_assume!(ChannelWidth::from_mhz(v).is_none());
        let mut model = ParameterModel::new();
        let before = model.snapshot();
        let rejected = matches!(model.set_channel_width(v), Err(ParamError::InvalidParameter { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn in_domain_frequency_is_committed(k in 24_u32..=60) {
        let ghz = k as f64 / 10.0;
        let mut model = ParameterModel::new();
        model.set_frequency(ghz).unwrap();
        prop_assert_eq!(model.snapshot().frequency_ghz, ghz);
    }
}
