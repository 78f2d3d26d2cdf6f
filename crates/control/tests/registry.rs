use control::{CartPoleConfig, EnvConfig, EnvError, EnvKind, PendulumConfig, UnknownEnv};

#[test]
fn kinds_parse_and_display_by_name() {
    for kind in EnvKind::ALL {
        assert_eq!(kind.name().parse::<EnvKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.name());
    }
    assert_eq!("CartPole".parse::<EnvKind>().unwrap(), EnvKind::CartPole);
    assert!("mountaincar".parse::<EnvKind>().is_err());
}

#[test]
fn unknown_name_is_reported_as_an_error() {
    let err = "mountaincar".parse::<EnvKind>().unwrap_err();
    assert_eq!(err, UnknownEnv("mountaincar".to_string()));
    assert_eq!(err.to_string(), "unknown environment `mountaincar` (expected acrobot, cartpole or pendulum)");
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert!(boxed.source().is_none());
}

#[test]
fn made_environments_have_reference_shapes() {
    let shapes: Vec<_> = EnvKind::ALL
        .iter()
        .map(|k| {
            let env = k.make().unwrap();
            let d = env.descriptor();
            (d.name(), d.state_size(), d.observation_size(), d.action_size(), d.render_width(), d.render_height())
        })
        .collect();
    assert_eq!(
        shapes,
        vec![
            ("acrobot", 4, 6, 3, 500, 500),
            ("cartpole", 4, 4, 2, 400, 400),
            ("pendulum", 2, 3, 1, 500, 500),
        ]
    );
}

#[test]
fn json_config_overrides_only_given_fields() {
    let config: EnvConfig = serde_json::from_str(r#"{"env": "cartpole", "force_mag": 5.0}"#).unwrap();
    let expected = CartPoleConfig { force_mag: 5.0, ..CartPoleConfig::default() };
    assert_eq!(config, EnvConfig::CartPole(expected));
    assert_eq!(config.kind(), EnvKind::CartPole);
    assert!(config.build().is_ok());
}

#[test]
fn json_round_trip_keeps_the_tag() {
    let config = EnvConfig::Pendulum(PendulumConfig { max_steps: 50, ..PendulumConfig::default() });
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""env":"pendulum""#));
    let back: EnvConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn unknown_tag_fails_to_parse() {
    assert!(serde_json::from_str::<EnvConfig>(r#"{"env": "lunarlander"}"#).is_err());
}

#[test]
fn invalid_values_fail_at_build() {
    let config: EnvConfig = serde_json::from_str(r#"{"env": "pendulum", "dt": 0.0}"#).unwrap();
    assert!(matches!(config.build(), Err(EnvError::InvalidConfig(_))));
}
