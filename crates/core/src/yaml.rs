use std::{env, fs::File, io::Read, path::PathBuf};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::edgegate_error;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub host: Option<String>,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SetupConfig {
    pub name: String,
    pub auth: AuthConfig,
    pub api: ApiConfig,
}

#[derive(Error, Debug)]
pub enum ReadYamlError {
    #[error("Can not find the yaml file")]
    CanNotFindYaml,

    #[error("Can not read the yaml file")]
    CanNotReadYaml,

    #[error("The yaml is invalid: {0}")]
    SetupConfigInvalidYaml(String),

    #[error("Environment variable {0} not found")]
    MissingEnvironmentVariable(String),

    #[error("{0}")]
    InvalidEnvSubstitution(#[from] regex::Error),
}

fn substitute_env_variables(contents: &str) -> Result<String, ReadYamlError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;

    let mut missing: Vec<String> = Vec::new();
    let result = re.replace_all(contents, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                missing.push(var_name.to_string());
                String::new()
            }
        }
    });
    let substituted = result.into_owned();

    if let Some(var_name) = missing.into_iter().next() {
        edgegate_error!("Environment variable {} not found", var_name);
        return Err(ReadYamlError::MissingEnvironmentVariable(var_name));
    }

    Ok(substituted)
}

/// Reads the project yaml, substituting `${VAR}` references from the
/// environment.
///
/// Empty credentials still parse - the gate runs and challenges every viewer
/// that does not present the matching pair - but they are near-certainly a
/// misconfiguration, so a warning is logged.
pub fn read(file_path: &PathBuf) -> Result<SetupConfig, ReadYamlError> {
    let mut file = File::open(file_path).map_err(|_| ReadYamlError::CanNotFindYaml)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|_| ReadYamlError::CanNotReadYaml)?;

    let substituted_contents = substitute_env_variables(&contents)?;

    let config: SetupConfig = serde_yaml::from_str(&substituted_contents)
        .map_err(|e| ReadYamlError::SetupConfigInvalidYaml(e.to_string()))?;

    if config.auth.username.is_empty() || config.auth.password.is_empty() {
        warn!("The auth username or password in the yaml is empty - this looks like a misconfiguration");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_substitutes_env_variables() {
        env::set_var("EDGEGATE_TEST_PASSWORD", "secret");

        let file = write_yaml(
            "name: gate\nauth:\n  username: admin\n  password: ${EDGEGATE_TEST_PASSWORD}\napi:\n  port: 8080\n",
        );

        let config = read(&file.path().to_path_buf()).unwrap();

        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "secret");
        assert_eq!(config.api.port, 8080);
        assert!(config.api.host.is_none());
    }

    #[test]
    fn test_read_errors_on_missing_env_variable() {
        let file = write_yaml(
            "name: gate\nauth:\n  username: admin\n  password: ${EDGEGATE_TEST_DOES_NOT_EXIST}\napi:\n  port: 8080\n",
        );

        let error = read(&file.path().to_path_buf()).unwrap_err();

        assert!(matches!(
            error,
            ReadYamlError::MissingEnvironmentVariable(var) if var == "EDGEGATE_TEST_DOES_NOT_EXIST"
        ));
    }

    #[test]
    fn test_read_accepts_empty_credentials() {
        let file = write_yaml(
            "name: gate\nauth:\n  username: \"\"\n  password: \"\"\napi:\n  port: 8080\n",
        );

        let config = read(&file.path().to_path_buf()).unwrap();

        assert!(config.auth.username.is_empty());
        assert!(config.auth.password.is_empty());
    }

    #[test]
    fn test_read_errors_when_the_file_is_missing() {
        let error = read(&PathBuf::from("/does/not/exist/edgegate.yaml")).unwrap_err();

        assert!(matches!(error, ReadYamlError::CanNotFindYaml));
    }
}
