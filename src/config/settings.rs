use std::path::Path;

use serde_yaml::Value;

use crate::core::errors::{NexoformError, Result};

/// Root key of the config document.
pub const ROOT_KEY: &str = "nexoform";

/// Reserved pseudo-entry under `environments` naming the default env.
pub const DEFAULT_ENV_KEY: &str = "default";

/// Plan-file overwrite policy for an environment.
///
/// On disk this is `true`, `false` or the literal `"ask"`. The original
/// tool also accepted `yes`/`no` spellings, which are kept for
/// compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Always,
    Never,
    Ask,
}

/// Parsed `nexoform.yml` document.
///
/// The document is held as a YAML value keyed by plain strings, so
/// lookups have exactly one canonical key representation. Mappings keep
/// document order, which [`Settings::environments`] relies on. Query
/// accessors never mutate the structure; only the resolver's write
/// operations touch the on-disk file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: Value,
}

impl Settings {
    /// Parse settings from YAML text.
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let root: Value = serde_yaml::from_str(content)?;
        Ok(Self { root })
    }

    /// Wrap an already-parsed YAML document.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The underlying YAML document.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Serialize back to YAML text.
    ///
    /// Plain-string keys serialize as plain untagged YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).map_err(|e| NexoformError::SerializeError {
            detail: e.to_string(),
        })
    }

    /// Walk an ordered key chain through the document.
    ///
    /// Fails immediately with [`NexoformError::MissingKey`] at the first
    /// key whose value is absent or null, naming that key and the full
    /// chain. Lookup never silently defaults; the absence-means-false
    /// policy lives in the specific derived queries, not here.
    pub fn find_value(&self, keys: &[&str]) -> Result<&Value> {
        let chain = keys.join(" -> ");
        let mut current = &self.root;
        for key in keys {
            let next = current.get(*key);
            match next {
                Some(value) if !value.is_null() => current = value,
                _ => {
                    return Err(NexoformError::MissingKey {
                        key: (*key).to_string(),
                        chain,
                    });
                }
            }
        }
        Ok(current)
    }

    fn find_str(&self, keys: &[&str]) -> Result<String> {
        let value = self.find_value(keys)?;
        scalar_to_string(value).ok_or_else(|| NexoformError::UnexpectedType {
            chain: keys.join(" -> "),
            expected: "scalar",
            found: value_type_name(value).to_string(),
        })
    }

    fn find_bool(&self, keys: &[&str]) -> Result<bool> {
        let value = self.find_value(keys)?;
        coerce_bool(value).ok_or_else(|| NexoformError::UnexpectedType {
            chain: keys.join(" -> "),
            expected: "boolean",
            found: value_type_name(value).to_string(),
        })
    }

    /// Terraform var-file path for an environment.
    pub fn var_file(&self, environment: &str) -> Result<String> {
        self.find_str(&[ROOT_KEY, "environments", environment, "varFile"])
    }

    /// S3 state bucket for an environment.
    pub fn bucket(&self, environment: &str) -> Result<String> {
        self.find_str(&[ROOT_KEY, "environments", environment, "state", "bucket"])
    }

    /// State object key for an environment.
    pub fn state_key(&self, environment: &str) -> Result<String> {
        self.find_str(&[ROOT_KEY, "environments", environment, "state", "key"])
    }

    /// Region where the state bucket lives (not the provisioning target).
    pub fn region(&self, environment: &str) -> Result<String> {
        self.find_str(&[ROOT_KEY, "environments", environment, "state", "region"])
    }

    /// Whether a plan file is used for an environment.
    pub fn plan_enabled(&self, environment: &str) -> Result<bool> {
        self.find_bool(&[ROOT_KEY, "environments", environment, "plan", "enabled"])
    }

    /// Whether planning is explicitly turned off for an environment.
    ///
    /// An environment with no `plan` block at all is *not* disabled:
    /// a missing key maps to `false` here. Any other lookup failure
    /// still propagates.
    pub fn plan_disabled(&self, environment: &str) -> Result<bool> {
        match self.plan_enabled(environment) {
            Ok(enabled) => Ok(!enabled),
            Err(e) if e.is_missing_key() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// File the plan is saved to for an environment.
    pub fn plan_file(&self, environment: &str) -> Result<String> {
        self.find_str(&[ROOT_KEY, "environments", environment, "plan", "file"])
    }

    /// The plan file to use, if planning is active and a file is named.
    ///
    /// `None` when planning is disabled or when no `plan.file` key
    /// exists (absence means the feature is off, not an error).
    pub fn plan_file_if_enabled(&self, environment: &str) -> Result<Option<String>> {
        if self.plan_disabled(environment)? {
            return Ok(None);
        }
        match self.plan_file(environment) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.is_missing_key() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Overwrite policy for an existing plan file.
    pub fn plan_file_overwrite(&self, environment: &str) -> Result<OverwritePolicy> {
        let keys = [ROOT_KEY, "environments", environment, "plan", "overwrite"];
        let value = self.find_value(&keys)?;
        coerce_overwrite(value).ok_or_else(|| NexoformError::UnexpectedType {
            chain: keys.join(" -> "),
            expected: "boolean or \"ask\"",
            found: value_type_name(value).to_string(),
        })
    }

    /// Whether an explicit overwrite policy is configured.
    pub fn has_plan_file_overwrite(&self, environment: &str) -> Result<bool> {
        match self.plan_file_overwrite(environment) {
            Ok(_) => Ok(true),
            Err(e) if e.is_missing_key() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All real environment names, in document order.
    ///
    /// The reserved `default` pseudo-entry is excluded.
    pub fn environments(&self) -> Vec<String> {
        self.root
            .get(ROOT_KEY)
            .and_then(|root| root.get("environments"))
            .and_then(Value::as_mapping)
            .map(|envs| {
                envs.keys()
                    .filter_map(Value::as_str)
                    .filter(|k| *k != DEFAULT_ENV_KEY)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The environment named by the `default` pseudo-entry, if any.
    pub fn default_env(&self) -> Option<&str> {
        self.root
            .get(ROOT_KEY)
            .and_then(|root| root.get("environments"))
            .and_then(|envs| envs.get(DEFAULT_ENV_KEY))
            .and_then(Value::as_str)
    }

    /// Root-level `debug` flag; absent means off.
    pub fn debug_enabled(&self) -> bool {
        self.root
            .get(ROOT_KEY)
            .and_then(|root| root.get("debug"))
            .and_then(coerce_bool)
            .unwrap_or(false)
    }
}

/// Render a scalar YAML value as a string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a YAML value into a boolean.
///
/// Accepts real booleans plus the YAML 1.1 `yes`/`no` spellings the
/// original config format allowed (serde_yaml parses those as strings).
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "yes" | "true" => Some(true),
            "no" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_overwrite(value: &Value) -> Option<OverwritePolicy> {
    if let Value::String(s) = value {
        if s == "ask" {
            return Some(OverwritePolicy::Ask);
        }
    }
    coerce_bool(value).map(|b| {
        if b {
            OverwritePolicy::Always
        } else {
            OverwritePolicy::Never
        }
    })
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        Settings::from_yaml_str(
            r#"
nexoform:
  environments:
    default: dev
    dev:
      varFile: dev.tfvars
      plan:
        enabled: true
        file: dev.tfplan
        overwrite: ask
      state:
        region: us-east-1
        bucket: acme-terraform-state
        key: dev.tfstate
    prod:
      varFile: prod.tfvars
      state:
        region: us-east-1
        bucket: acme-terraform-state
        key: prod.tfstate
"#,
        )
        .unwrap()
    }

    #[test]
    fn find_value_reports_key_and_chain() {
        let settings = Settings::from_yaml_str("a:\n  b: 1\n").unwrap();
        let err = settings.find_value(&["a", "b", "c"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a -> b -> c"), "chain missing from: {msg}");
        assert!(msg.contains("'c'"), "failing key missing from: {msg}");
    }

    #[test]
    fn find_value_treats_null_as_missing() {
        let settings = Settings::from_yaml_str("a:\n  b: ~\n").unwrap();
        assert!(settings.find_value(&["a", "b"]).unwrap_err().is_missing_key());
    }

    #[test]
    fn typed_accessors_resolve_fixed_chains() {
        let s = sample();
        assert_eq!(s.var_file("dev").unwrap(), "dev.tfvars");
        assert_eq!(s.bucket("dev").unwrap(), "acme-terraform-state");
        assert_eq!(s.state_key("prod").unwrap(), "prod.tfstate");
        assert_eq!(s.region("dev").unwrap(), "us-east-1");
        assert_eq!(s.plan_file("dev").unwrap(), "dev.tfplan");
        assert!(s.plan_enabled("dev").unwrap());
    }

    #[test]
    fn plan_disabled_maps_absence_to_false() {
        let s = sample();
        // prod has no plan block at all.
        assert!(!s.plan_disabled("prod").unwrap());

        let off = Settings::from_yaml_str(
            "nexoform:\n  environments:\n    dev:\n      plan:\n        enabled: false\n",
        )
        .unwrap();
        assert!(off.plan_disabled("dev").unwrap());
    }

    #[test]
    fn plan_file_if_enabled_policy() {
        let s = sample();
        assert_eq!(s.plan_file_if_enabled("dev").unwrap().as_deref(), Some("dev.tfplan"));
        // No plan block: planning not disabled, but no file either.
        assert_eq!(s.plan_file_if_enabled("prod").unwrap(), None);

        let off = Settings::from_yaml_str(
            "nexoform:\n  environments:\n    dev:\n      plan:\n        enabled: false\n        file: dev.tfplan\n",
        )
        .unwrap();
        assert_eq!(off.plan_file_if_enabled("dev").unwrap(), None);
    }

    #[test]
    fn overwrite_policy_parses_bool_and_ask() {
        let s = sample();
        assert_eq!(s.plan_file_overwrite("dev").unwrap(), OverwritePolicy::Ask);
        assert!(s.has_plan_file_overwrite("dev").unwrap());
        assert!(!s.has_plan_file_overwrite("prod").unwrap());

        let yes = Settings::from_yaml_str(
            "nexoform:\n  environments:\n    dev:\n      plan:\n        overwrite: yes\n",
        )
        .unwrap();
        assert_eq!(
            yes.plan_file_overwrite("dev").unwrap(),
            OverwritePolicy::Always
        );
    }

    #[test]
    fn environments_keep_document_order_and_skip_default() {
        let s = sample();
        assert_eq!(s.environments(), vec!["dev".to_string(), "prod".to_string()]);
        assert_eq!(s.default_env(), Some("dev"));
    }

    #[test]
    fn debug_flag_defaults_off() {
        let s = sample();
        assert!(!s.debug_enabled());

        let dbg = Settings::from_yaml_str("nexoform:\n  environments: {}\n  debug: true\n").unwrap();
        assert!(dbg.debug_enabled());
    }

    #[test]
    fn wrong_shape_is_not_a_missing_key() {
        // varFile is a mapping, not a scalar: must not look like absence.
        let s = Settings::from_yaml_str(
            "nexoform:\n  environments:\n    dev:\n      varFile:\n        nested: true\n",
        )
        .unwrap();
        let err = s.var_file("dev").unwrap_err();
        assert!(!err.is_missing_key());
    }
}
