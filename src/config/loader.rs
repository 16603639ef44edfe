//! Configuration loader with TOML parsing and environment variable substitution

use super::schema::AspexConfig;
use crate::domain::errors::AspexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AspexConfig`]
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is not set, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use aspex::config::load_config;
///
/// let config = load_config("aspex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AspexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AspexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AspexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AspexConfig = toml::from_str(&contents)
        .map_err(|e| AspexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    config.validate()?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error so a missing credential fails the run up front instead of logging
/// in with a literal `${...}` password.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AspexError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars_replaces_set_variable() {
        std::env::set_var("ASPEX_TEST_SUBST", "swapped-in");
        let result = substitute_env_vars("password = \"${ASPEX_TEST_SUBST}\"").unwrap();
        assert_eq!(result, "password = \"swapped-in\"\n");
        std::env::remove_var("ASPEX_TEST_SUBST");
    }

    #[test]
    fn test_substitute_env_vars_missing_variable_errors() {
        let result = substitute_env_vars("password = \"${ASPEX_TEST_DEFINITELY_UNSET}\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("ASPEX_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let result = substitute_env_vars("# password = \"${ASPEX_TEST_DEFINITELY_UNSET}\"");
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/aspex.toml").unwrap_err();
        assert!(matches!(err, AspexError::Configuration(_)));
        assert!(err.to_string().contains("not found"));
    }
}
