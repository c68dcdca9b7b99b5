use anyhow::{bail, Context, Result};

use pipet::config::{mask_secret, Settings};

const API_KEY_PATH: &str = "google.gemini.apiKey";

fn read_config_value() -> Result<serde_json::Value> {
    let config_path = pipet::path_utils::config_path();
    if !config_path.exists() {
        return Ok(serde_json::to_value(Settings::default())?);
    }
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    if content.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", config_path.display()))
}

/// `config show`: display the full config with the API key masked.
pub fn run_show() -> Result<()> {
    let mut config = read_config_value()?;
    mask_api_key(&mut config);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// `config get <key>`: display a single config value.
///
/// Key uses dot notation: `google.gemini.textModel`, `timeout_secs`
pub fn run_get(key: &str) -> Result<()> {
    let config = read_config_value()?;
    match resolve_path(&config, key) {
        Some(serde_json::Value::String(s)) if key == API_KEY_PATH => {
            println!("{}", serde_json::to_string(&mask_secret(s))?)
        }
        Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
        None => bail!("Key not found: {}", key),
    }
    Ok(())
}

/// `config set <key> <value>`: set a config value.
///
/// Value is parsed as JSON (bool, number, string), falling back to a plain
/// string. The result must still deserialize as settings.
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let config_path = pipet::path_utils::config_path();
    let mut config = if config_path.exists() {
        read_config_value()?
    } else {
        serde_json::json!({})
    };

    let parsed: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    set_path(&mut config, key, parsed.clone())?;
    serde_json::from_value::<Settings>(config.clone())
        .with_context(|| format!("'{}' is not a valid value for {}", value, key))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!(key = %key, path = %config_path.display(), "Config updated");

    let shown = match parsed.as_str() {
        Some(s) if key == API_KEY_PATH => serde_json::Value::String(mask_secret(s)),
        _ => parsed.clone(),
    };
    println!("{} = {}", key, serde_json::to_string(&shown)?);
    Ok(())
}

fn mask_api_key(config: &mut serde_json::Value) {
    if let Some(serde_json::Value::String(key)) = config
        .get_mut("google")
        .and_then(|g| g.get_mut("gemini"))
        .and_then(|g| g.get_mut("apiKey"))
    {
        *key = mask_secret(key);
    }
}

/// Resolve a dot-separated path in a JSON value.
fn resolve_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Set a value at a dot-separated path, creating intermediate objects as needed.
fn set_path(root: &mut serde_json::Value, path: &str, value: serde_json::Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("Empty key path");
    };
    if last.is_empty() || parents.iter().any(|s| s.is_empty()) {
        bail!("Invalid key path: {}", path);
    }

    let mut current = root;
    for segment in parents {
        if !current.is_object() {
            *current = serde_json::json!({});
        }
        current = match current.as_object_mut() {
            Some(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| serde_json::json!({})),
            None => bail!("Cannot descend into {}", segment),
        };
    }

    if !current.is_object() {
        *current = serde_json::json!({});
    }
    if let serde_json::Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
    Ok(())
}
