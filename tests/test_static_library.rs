use boa_negotiators::builtin::{register_negotiators, LIBRARY_NAME};
use boa_negotiators::component::registered_negotiators;
use boa_negotiators::factory::*;
use boa_negotiators::Negotiator;

use boa_negotiators_testing::scenarios::party_utilities;
use boa_negotiators_testing::Framework;

fn static_config(alias: &str, params: &str) -> NegotiatorConfig {
    NegotiatorConfig {
        name: "AdaptiveBoa".to_string(),
        alias: Some(alias.to_string()),
        load_mode: LoadMode::StaticLib {
            library: LIBRARY_NAME.to_string(),
        },
        params: serde_yaml::from_str(params).unwrap(),
    }
}

#[test]
fn test_static_library_negotiators() {
    register_negotiators();
    assert!(registered_negotiators().contains(&"boa-negotiators::AdaptiveBoa".to_string()));

    let config: NegotiatorsConfig = serde_yaml::from_str(
        r#"
negotiators:
  - name: AdaptiveBoa
    alias: first
    load_mode:
      StaticLib:
        library: boa-negotiators
    params:
      seed: 11
      reservation_value: 0.4
  - name: AdaptiveBoa
    alias: second
    load_mode: BuiltIn
    params:
      seed: 12
"#,
    )
    .unwrap();

    let mut negotiators = create_negotiators(config).unwrap();
    assert_eq!(negotiators.len(), 2);
    assert_eq!(negotiators[0].name(), "first");
    assert_eq!(negotiators[1].name(), "second");

    // Configured reservation value takes effect when negotiation starts.
    negotiators[0].initialize(None);
    assert_eq!(negotiators[0].performance_stats().reservation_value, 0.4);
}

#[test]
fn test_unknown_static_negotiator() {
    register_negotiators();

    let mut config = static_config("unknown", "seed: 1");
    config.name = "Boulware".to_string();
    assert!(create_negotiator(config).is_err());

    let config = NegotiatorConfig {
        load_mode: LoadMode::StaticLib {
            library: "other-library".to_string(),
        },
        ..static_config("unknown", "seed: 1")
    };
    assert!(create_negotiator(config).is_err());

    let invalid = static_config("invalid", "reservation_value: 1.5");
    assert!(create_negotiator(invalid).is_err());
}

#[test]
fn test_static_library_negotiation() {
    register_negotiators();
    let (first_ufun, second_ufun) = party_utilities().unwrap();

    let mut framework = Framework::new(
        "static_library_negotiation",
        static_config("first", "{seed: 5, reservation_value: 0.5}"),
        Some(first_ufun),
        static_config("second", "{seed: 6, reservation_value: 0.5}"),
        Some(second_ufun),
    )
    .unwrap()
    .rounds(10);

    let result = framework.run().unwrap();
    assert_eq!(result.total_rounds, 10);
    assert!(!result.offers.is_empty());

    let stats = framework.first().unwrap().performance_stats();
    assert_eq!(stats.name, "first");
    assert_eq!(stats.reservation_value, 0.5);
    assert_eq!(stats.total_negotiations, 1);
}
