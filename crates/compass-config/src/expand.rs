//! `${VAR}` and `${VAR:-default}` substitution in `site.url`, `site.base`
//! and `content.dir`, so one `compass.toml` can serve a local preview and
//! the published site.

use crate::ConfigError;

/// Rewrite `value` with its variables substituted.
///
/// `field` names the key in errors. Values without `${` are left untouched.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(value.as_str(), lookup)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })?
        .into_owned();
    *value = expanded;
    Ok(())
}

/// Resolve a variable, treating "unset" as an error so `${VAR}` fails loudly.
fn lookup(var: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(var).map(Some).map_err(|_| UnsetVar)
}

/// Lookup failure for a variable with no default.
#[derive(Debug)]
struct UnsetVar;
