//! Typed access to the parts of a chain spec JSON document that get patched.
//!
//! The document itself stays an untyped `serde_json::Value`: everything that is not
//! touched here is carried through verbatim, in its original key order.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{PatchError, Result},
    inputs::load_json,
};

const CHAIN_TYPE: &str = "chainType";
const ID: &str = "id";
const NAME: &str = "name";
const BOOT_NODES: &str = "bootNodes";

/// Location of the runtime genesis patch, outermost key first.
const RUNTIME_PATCH_PATH: [&str; 3] = ["genesis", "runtimeGenesis", "patch"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ChainType {
    Live,
    Development,
}

impl ChainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Live => "Live",
            ChainType::Development => "Development",
        }
    }
}

/// A chain spec document with a JSON object at its root.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainSpec(Map<String, Value>);

impl ChainSpec {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(ChainSpec(root)),
            _ => Err(PatchError::UnexpectedType {
                path: "<root>".to_string(),
                expected: "an object",
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(load_json(path)?)
    }

    /// Returns `None` when `chainType` is absent or holds an unknown variant.
    #[cfg(test)]
    pub fn chain_type(&self) -> Option<ChainType> {
        self.0
            .get(CHAIN_TYPE)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn set_chain_type(&mut self, chain_type: ChainType) {
        self.0.insert(
            CHAIN_TYPE.to_string(),
            Value::String(chain_type.as_str().to_string()),
        );
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID).and_then(Value::as_str)
    }

    pub fn set_id(&mut self, id: &str) {
        self.0.insert(ID.to_string(), Value::String(id.to_string()));
    }

    #[cfg(test)]
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME).and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.0.insert(NAME.to_string(), Value::String(name.to_string()));
    }

    #[cfg(test)]
    pub fn boot_nodes(&self) -> Option<&Vec<Value>> {
        self.0.get(BOOT_NODES).and_then(Value::as_array)
    }

    /// Replaces the whole bootnode list.
    pub fn set_boot_nodes(&mut self, boot_nodes: Vec<String>) {
        self.0.insert(
            BOOT_NODES.to_string(),
            Value::Array(boot_nodes.into_iter().map(Value::String).collect()),
        );
    }

    /// Locates `genesis.runtimeGenesis.patch`.
    pub fn runtime_patch_mut(&mut self) -> Result<RuntimePatch<'_>> {
        let mut current = &mut self.0;
        let mut path = String::new();
        for key in RUNTIME_PATCH_PATH {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(key);
            current = object_mut(current, key, &path)?;
        }
        Ok(RuntimePatch(current))
    }

    #[cfg(test)]
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    #[cfg(test)]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Serializes the document with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(|source| PatchError::Json {
            path: "<stdout>".into(),
            source,
        })
    }
}

/// Mutable view of `genesis.runtimeGenesis.patch`.
pub struct RuntimePatch<'a>(&'a mut Map<String, Value>);

impl RuntimePatch<'_> {
    /// Replaces `aura.authorities`.
    pub fn set_aura_authorities(&mut self, authorities: Vec<Value>) -> Result<()> {
        self.section_mut("aura")?
            .insert("authorities".to_string(), Value::Array(authorities));
        Ok(())
    }

    /// Replaces `grandpa.authorities`.
    pub fn set_grandpa_authorities(&mut self, authorities: Vec<Value>) -> Result<()> {
        self.section_mut("grandpa")?
            .insert("authorities".to_string(), Value::Array(authorities));
        Ok(())
    }

    pub fn sudo_key(&self) -> Result<&Value> {
        let sudo = self
            .0
            .get("sudo")
            .ok_or_else(|| PatchError::MissingPath(patch_path("sudo")))?
            .as_object()
            .ok_or_else(|| PatchError::UnexpectedType {
                path: patch_path("sudo"),
                expected: "an object",
            })?;
        sudo.get("key")
            .ok_or_else(|| PatchError::MissingPath(patch_path("sudo.key")))
    }

    pub fn set_sudo_key(&mut self, key: &str) -> Result<()> {
        self.section_mut("sudo")?
            .insert("key".to_string(), Value::String(key.to_string()));
        Ok(())
    }

    /// Replaces `balances.balances` with `balances`.
    pub fn replace_balances(&mut self, balances: Vec<Value>) -> Result<()> {
        self.section_mut("balances")?
            .insert("balances".to_string(), Value::Array(balances));
        Ok(())
    }

    /// Appends `balances` after the entries already in `balances.balances`.
    pub fn append_balances(&mut self, balances: Vec<Value>) -> Result<()> {
        let path = patch_path("balances.balances");
        self.section_mut("balances")?
            .get_mut("balances")
            .ok_or_else(|| PatchError::MissingPath(path.clone()))?
            .as_array_mut()
            .ok_or(PatchError::UnexpectedType {
                path,
                expected: "an array",
            })?
            .extend(balances);
        Ok(())
    }

    fn section_mut(&mut self, section: &str) -> Result<&mut Map<String, Value>> {
        object_mut(self.0, section, &patch_path(section))
    }
}

fn patch_path(suffix: &str) -> String {
    format!("{}.{}", RUNTIME_PATCH_PATH.join("."), suffix)
}

fn object_mut<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a mut Map<String, Value>> {
    map.get_mut(key)
        .ok_or_else(|| PatchError::MissingPath(path.to_string()))?
        .as_object_mut()
        .ok_or_else(|| PatchError::UnexpectedType {
            path: path.to_string(),
            expected: "an object",
        })
}
