use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use boa_builtin_negotiators::AdaptiveBoa;
use boa_negotiator_component::static_lib::{create_static_negotiator, NegotiatorFactory};
use boa_negotiator_component::BoxedNegotiator;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum LoadMode {
    BuiltIn,
    /// Negotiator registered with `register_negotiator` under `library`.
    StaticLib { library: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiatorConfig {
    /// Name of negotiator implementation.
    pub name: String,
    /// Name of created negotiator instance. Implementation name is used if not set.
    #[serde(default)]
    pub alias: Option<String>,
    pub load_mode: LoadMode,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiatorsConfig {
    pub negotiators: Vec<NegotiatorConfig>,
}

impl NegotiatorConfig {
    pub fn builtin(name: &str, params: serde_yaml::Value) -> NegotiatorConfig {
        NegotiatorConfig {
            name: name.to_string(),
            alias: None,
            load_mode: LoadMode::BuiltIn,
            params,
        }
    }

    pub fn alias(mut self, alias: &str) -> NegotiatorConfig {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn instance_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

pub fn create_negotiator(config: NegotiatorConfig) -> anyhow::Result<BoxedNegotiator> {
    let instance = config.instance_name().to_string();
    let negotiator = match &config.load_mode {
        LoadMode::BuiltIn => create_builtin(&config.name, &instance, config.params),
        LoadMode::StaticLib { library } => create_static_negotiator(
            &format!("{}::{}", library, config.name),
            &instance,
            config.params,
        ),
    }
    .with_context(|| format!("Creating negotiator '{}' ({}).", instance, config.name))?;

    log::debug!("Created negotiator '{}' ({}).", instance, config.name);
    Ok(negotiator)
}

pub fn create_negotiators(config: NegotiatorsConfig) -> anyhow::Result<Vec<BoxedNegotiator>> {
    config
        .negotiators
        .into_iter()
        .map(create_negotiator)
        .collect()
}

pub fn create_builtin(
    name: &str,
    instance: &str,
    config: serde_yaml::Value,
) -> anyhow::Result<BoxedNegotiator> {
    let negotiator = match name {
        "AdaptiveBoa" => Box::new(AdaptiveBoa::new(instance, config)?) as BoxedNegotiator,
        _ => bail!("BuiltIn negotiator {} doesn't exists.", name),
    };
    Ok(negotiator)
}
