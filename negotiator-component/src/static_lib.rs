use anyhow::anyhow;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::component::{BoxedNegotiator, Negotiator};

pub type ConstructorFunction =
    Box<dyn Fn(&str, serde_yaml::Value) -> anyhow::Result<BoxedNegotiator> + Send + Sync>;

lazy_static! {
    /// Contains functions that can create negotiators by name.
    static ref CONSTRUCTORS: Arc<Mutex<HashMap<String, ConstructorFunction>>> = Arc::new(Mutex::new(HashMap::new()));
}

/// Negotiators that can be created from yaml configuration.
pub trait NegotiatorFactory: Negotiator + Send + Sync + Sized + 'static {
    fn new(name: &str, config: serde_yaml::Value) -> anyhow::Result<Self>;
}

pub fn factory<T: NegotiatorFactory>() -> ConstructorFunction {
    Box::new(
        |name: &str, config: serde_yaml::Value| -> anyhow::Result<BoxedNegotiator> {
            Ok(Box::new(T::new(name, config)?))
        },
    )
}

pub fn register_negotiator(library: &str, name: &str, constructor: ConstructorFunction) {
    (*CONSTRUCTORS)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(format!("{}::{}", library, name), constructor);
}

pub fn registered_negotiators() -> Vec<String> {
    let mut names = (*CONSTRUCTORS)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    names.sort();
    names
}

/// Creates negotiator registered under `name_path` (`library::name`) and names
/// the instance `instance_name`.
pub fn create_static_negotiator(
    name_path: &str,
    instance_name: &str,
    config: serde_yaml::Value,
) -> anyhow::Result<BoxedNegotiator> {
    let map = (*CONSTRUCTORS)
        .lock()
        .map_err(|e| anyhow!("Failed to acquire static Negotiator creation lock: {}", e))?;

    match map.get(name_path) {
        Some(constructor) => constructor(instance_name, config),
        None => Err(anyhow!("Negotiator '{}' not found.", name_path)),
    }
}
