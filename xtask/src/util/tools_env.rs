use std::collections::BTreeMap;
use std::process::Command;

/// Environment variables layered over the inherited environment of every
/// spawned tool. Built once per run and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolEnv {
    vars: BTreeMap<String, String>,
}

impl ToolEnv {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Applies every variable to `cmd`, overriding inherited values.
    pub fn apply_to_command(&self, cmd: &mut Command) {
        cmd.envs(&self.vars);
    }
}
