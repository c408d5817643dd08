use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::config::settings::{OverwritePolicy, Settings};

/// Placeholder substituted when no project name is supplied.
pub const PROJECT_NAME_PLACEHOLDER: &str = "<companyname>";

/// Region every generated environment starts with.
pub const DEFAULT_REGION: &str = "us-east-1";

/// The three environments a fresh config is seeded with.
pub const DEFAULT_ENVIRONMENTS: [&str; 3] = ["dev", "staging", "prod"];

/// One environment entry, in the canonical on-disk shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub var_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanConfig>,
    pub state: StateConfig,
}

/// The optional `plan` block. When present and enabled it avoids the
/// interactive confirmation prompt on apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub enabled: bool,
    pub file: String,
    pub overwrite: OverwritePolicy,
}

/// The s3 state backend block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    pub region: String,
    pub bucket: String,
    pub key: String,
}

// On disk the overwrite policy is `true`, `false` or the string "ask".
impl Serialize for OverwritePolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OverwritePolicy::Always => serializer.serialize_bool(true),
            OverwritePolicy::Never => serializer.serialize_bool(false),
            OverwritePolicy::Ask => serializer.serialize_str("ask"),
        }
    }
}

impl<'de> Deserialize<'de> for OverwritePolicy {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct PolicyVisitor;

        impl<'de> Visitor<'de> for PolicyVisitor {
            type Value = OverwritePolicy;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("true, false, yes, no or \"ask\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(if v {
                    OverwritePolicy::Always
                } else {
                    OverwritePolicy::Never
                })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                match v {
                    "ask" => Ok(OverwritePolicy::Ask),
                    "yes" | "true" => Ok(OverwritePolicy::Always),
                    "no" | "false" => Ok(OverwritePolicy::Never),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(PolicyVisitor)
    }
}

/// Resolve the project name, substituting the placeholder when empty.
pub fn proj_name(project_name: Option<&str>) -> &str {
    match project_name {
        Some(name) if !name.is_empty() => name,
        _ => PROJECT_NAME_PLACEHOLDER,
    }
}

/// Seed configuration for one environment.
pub fn default_environment(env: &str, project_name: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        var_file: format!("{env}.tfvars"),
        plan: Some(PlanConfig {
            enabled: true,
            file: format!("{env}.tfplan"),
            overwrite: OverwritePolicy::Always,
        }),
        state: StateConfig {
            region: DEFAULT_REGION.to_string(),
            bucket: format!("{project_name}-terraform-state"),
            key: format!("{env}.tfstate"),
        },
    }
}

/// Structured default settings, equivalent to parsing [`default_yaml`].
///
/// The `environments` mapping opens with the `default` pseudo-entry and
/// then the three seed environments, in declaration order.
pub fn default_settings(project_name: Option<&str>) -> Settings {
    let project = proj_name(project_name);

    let mut environments = Mapping::new();
    environments.insert(
        Value::from("default"),
        Value::from(DEFAULT_ENVIRONMENTS[0]),
    );
    for env in DEFAULT_ENVIRONMENTS {
        // Infallible: the seed structs serialize to plain scalars/maps.
        let entry = serde_yaml::to_value(default_environment(env, project))
            .unwrap_or(Value::Null);
        environments.insert(Value::from(env), entry);
    }

    let mut section = Mapping::new();
    section.insert(Value::from("environments"), Value::Mapping(environments));

    let mut root = Mapping::new();
    root.insert(Value::from("nexoform"), Value::Mapping(section));

    Settings::from_value(Value::Mapping(root))
}

/// The commented template written by config initialization.
///
/// Loading this text yields the same structure as [`default_settings`];
/// the comments exist only for the human editing the file afterwards.
pub fn default_yaml(project_name: Option<&str>) -> String {
    let project = proj_name(project_name);
    format!(
        r#"---
nexoform:
  environments:
    default: dev          # optional default env so you don't have to specify
    dev:                  # name of environment
      varFile: dev.tfvars # terraform var-file to use
      plan:               # optional block. Avoids getting prompted
        enabled: true     # true | false.  If false, a plan file is not used
        file: dev.tfplan  # file the plan is saved to automatically
        overwrite: true   # overwrite existing file. could be: true | false | ask
      state:              # configuration for state management s3 backend
        region: us-east-1 # Region where the BUCKET specified here lives, not the region you are provisioning to
        bucket: {project}-terraform-state
        key: dev.tfstate
    staging:                  # name of environment
      varFile: staging.tfvars # terraform var-file to use
      plan:                   # optional block. Avoids getting prompted
        enabled: true         # true | false.  If false, a plan file is not used
        file: staging.tfplan  # file the plan is saved to automatically
        overwrite: true       # overwrite existing file. could be: true | false | ask
      state:                  # configuration for state management s3 backend
        region: us-east-1     # Region where the BUCKET specified here lives, not the region you are provisioning to
        bucket: {project}-terraform-state
        key: staging.tfstate
    prod:                  # name of environment
      varFile: prod.tfvars # terraform var-file to use
      plan:                # optional block. Avoids getting prompted
        enabled: true      # true | false.  If false, a plan file is not used
        file: prod.tfplan  # file the plan is saved to automatically
        overwrite: true    # overwrite existing file. could be: true | false | ask
      state:               # configuration for state management s3 backend
        region: us-east-1  # Region where the BUCKET specified here lives, not the region you are provisioning to
        bucket: {project}-terraform-state
        key: prod.tfstate
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proj_name_falls_back_to_placeholder() {
        assert_eq!(proj_name(Some("acme")), "acme");
        assert_eq!(proj_name(Some("")), PROJECT_NAME_PLACEHOLDER);
        assert_eq!(proj_name(None), PROJECT_NAME_PLACEHOLDER);
    }

    #[test]
    fn template_and_structured_defaults_agree() {
        let from_template = Settings::from_yaml_str(&default_yaml(Some("acme"))).unwrap();
        let structured = default_settings(Some("acme"));
        assert_eq!(from_template, structured);
    }

    #[test]
    fn default_settings_round_trip() {
        let settings = default_settings(Some("acme"));
        let rendered = settings.to_yaml_string().unwrap();
        let reparsed = Settings::from_yaml_str(&rendered).unwrap();

        assert_eq!(
            reparsed.bucket("dev").unwrap(),
            "acme-terraform-state"
        );
        for env in DEFAULT_ENVIRONMENTS {
            assert!(reparsed.plan_enabled(env).unwrap(), "{env} plan not enabled");
        }
    }

    #[test]
    fn default_settings_lists_envs_in_order() {
        let settings = default_settings(None);
        assert_eq!(settings.environments(), vec!["dev", "staging", "prod"]);
        assert_eq!(settings.default_env(), Some("dev"));
        assert_eq!(
            settings.bucket("prod").unwrap(),
            format!("{PROJECT_NAME_PLACEHOLDER}-terraform-state")
        );
    }

    #[test]
    fn overwrite_policy_serde() {
        let plan: PlanConfig =
            serde_yaml::from_str("enabled: true\nfile: a.tfplan\noverwrite: ask\n").unwrap();
        assert_eq!(plan.overwrite, OverwritePolicy::Ask);

        let rendered = serde_yaml::to_string(&PlanConfig {
            enabled: false,
            file: "a.tfplan".into(),
            overwrite: OverwritePolicy::Never,
        })
        .unwrap();
        assert!(rendered.contains("overwrite: false"));
    }
}
