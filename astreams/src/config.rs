#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub context: ContextConfig,

	#[serde(default)]
	pub resolver: ResolverConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ContextConfig {
	#[serde_inline_default(true)]
	/// for `{ "alias": "https://..." }` context entries, also map the vocabulary uri (both schemes)
	/// back to its alias; disable to only keep entries exactly as written
	pub reverse_mappings: bool,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ResolverConfig {
	#[serde_inline_default(false)]
	/// sort every non functional property of resolved entities before handing them to callbacks
	pub normalize: bool,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn defaults_when_nothing_is_given() {
		let config = Config::load(None);
		assert!(config.context.reverse_mappings);
		assert!(!config.resolver.normalize);
	}

	#[test]
	fn partial_tables_keep_other_defaults() {
		let config: Config = toml::from_str("[resolver]\nnormalize = true\n").expect("valid toml");
		assert!(config.resolver.normalize);
		assert!(config.context.reverse_mappings);
	}

	#[test]
	fn unreadable_file_falls_back_to_defaults() {
		let path = std::path::PathBuf::from("/definitely/not/a/config.toml");
		let config = Config::load(Some(&path));
		assert!(config.context.reverse_mappings);
	}
}
