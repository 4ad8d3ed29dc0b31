use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::paths::{find_project_root, CONFIG_FILE_NAME};
use crate::pattern::{Extension, PathPattern};
use crate::remote::local::LocalRemote;
use crate::remote::Remote as RemoteTrait;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Remote {
    Local(LocalRemote),
}

/// Parameters sent along with every file of a push source.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PushParams {
    /// Upload every matched file to this locale. May contain `<locale_code>`
    /// and `<locale_name>`, filled from each file's path.
    #[serde(default)]
    pub locale_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub update_translations: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PullParams {
    #[serde(default)]
    pub locale_id: Option<String>,
    /// Only download keys with this tag. Also fills `<tag>` in the pattern.
    #[serde(default)]
    pub tag: Option<String>,
}

/// A pattern of local files to push.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Source {
    pub file: String,
    pub project_id: Option<String>,
    pub file_format: Option<String>,
    #[serde(default)]
    pub params: PushParams,
}

/// A pattern of local files to pull into.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Target {
    pub file: String,
    pub project_id: Option<String>,
    pub file_format: Option<String>,
    #[serde(default)]
    pub params: PullParams,
}

impl Source {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            project_id: None,
            file_format: None,
            params: PushParams::default(),
        }
    }
}

impl Target {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            project_id: None,
            file_format: None,
            params: PullParams::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PushConfig {
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PullConfig {
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Project used by sources and targets that don't name their own
    project_id: Option<String>,
    /// Format used by sources and targets that don't name their own.
    /// When unset everywhere, the literal extension of the pattern is used.
    file_format: Option<String>,
    remote: Remote,
    #[serde(default)]
    push: PushConfig,
    #[serde(default)]
    pull: PullConfig,
}

impl Config {
    pub fn new_local(
        project_id: Option<String>,
        file_format: Option<String>,
        remote_path: impl AsRef<Path>,
    ) -> Config {
        Config {
            project_id,
            file_format,
            remote: Remote::Local(LocalRemote::new(remote_path)),
            push: PushConfig::default(),
            pull: PullConfig::default(),
        }
    }

    pub fn save(&self, directory: impl AsRef<Path>) -> Result<()> {
        let config_path = directory.as_ref().join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(&self)?;
        fs::write(&config_path, content)?;
        log::info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    pub fn find(current_directory: impl AsRef<Path>) -> Option<Result<Self>> {
        let project_root = find_project_root(current_directory)?;
        let config_path = project_root.join(CONFIG_FILE_NAME);
        log::debug!("Looking for config at {}", config_path.display());
        if config_path.exists() {
            let content = match fs::read_to_string(&config_path) {
                Ok(c) => c,
                Err(e) => return Some(Err(e.into())),
            };
            Some(
                toml::from_str::<Config>(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))
                    .map(|config| config.with_remote_relative_to(&project_root)),
            )
        } else {
            log::debug!("No config file found at {}", config_path.display());
            None
        }
    }

    /// A relative remote path is relative to the project root.
    fn with_remote_relative_to(mut self, project_root: &Path) -> Self {
        match &mut self.remote {
            Remote::Local(r) if r.path.is_relative() => r.path = project_root.join(&r.path),
            Remote::Local(_) => {}
        }
        self
    }

    /// Check every pattern decomposes and every source and target resolves
    /// to a project and a file format.
    pub fn validate(&self) -> Result<()> {
        for source in self.sources() {
            let pattern = PathPattern::decompose(&source.file)
                .with_context(|| format!("Invalid push source '{}'", source.file))?;
            self.project_id_for(source.project_id.as_deref(), &source.file)?;
            self.file_format_for(source.file_format.as_deref(), &pattern)?;
        }
        for target in self.targets() {
            let pattern = PathPattern::decompose(&target.file)
                .with_context(|| format!("Invalid pull target '{}'", target.file))?;
            self.project_id_for(target.project_id.as_deref(), &target.file)?;
            self.file_format_for(target.file_format.as_deref(), &pattern)?;
        }
        Ok(())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn file_format(&self) -> Option<&str> {
        self.file_format.as_deref()
    }

    pub fn sources(&self) -> &[Source] {
        &self.push.sources
    }

    pub fn targets(&self) -> &[Target] {
        &self.pull.targets
    }

    pub fn add_source(&mut self, source: Source) {
        self.push.sources.push(source);
    }

    pub fn add_target(&mut self, target: Target) {
        self.pull.targets.push(target);
    }

    /// The given project id, or the top-level one.
    pub fn project_id_for<'a>(&'a self, own: Option<&'a str>, file: &str) -> Result<&'a str> {
        own.filter(|id| !id.is_empty())
            .or(self.project_id())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("No project id for '{}'", file))
    }

    /// The given file format, the top-level one, or the pattern's literal
    /// extension, in that order.
    pub fn file_format_for(&self, own: Option<&str>, pattern: &PathPattern) -> Result<String> {
        if let Some(format) = own.or(self.file_format()).filter(|f| !f.is_empty()) {
            return Ok(format.to_string());
        }
        match pattern.extension() {
            Extension::Literal(ext) => Ok(ext.clone()),
            _ => Err(anyhow!("No file format for '{}'", pattern.raw())),
        }
    }

    pub fn remote(&self) -> &dyn RemoteTrait {
        match &self.remote {
            Remote::Local(r) => r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::create_temp_project;

    fn sample(root: &Path) -> Config {
        let mut config = Config::new_local(Some("my-project".to_string()), None, root.join(".lsync-remote"));
        let mut source = Source::new("./locales/<locale_code>.yml");
        source.params.tags = vec!["web".to_string()];
        source.params.update_translations = Some(true);
        config.add_source(source);

        let mut target = Target::new("./play/<tag>/play.<locale_code>");
        target.file_format = Some("properties".to_string());
        target.params.tag = Some("app".to_string());
        config.add_target(target);
        config
    }

    #[test]
    fn config_save_and_find_roundtrip() {
        let (_tmp, root) = create_temp_project();
        let original = sample(&root);
        original.save(&root).unwrap();

        let loaded = Config::find(&root).unwrap().unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn config_find_from_subdirectory() {
        let (_tmp, root) = create_temp_project();
        sample(&root).save(&root).unwrap();
        let sub = root.join("locales/nested");
        fs::create_dir_all(&sub).unwrap();
        assert!(Config::find(&sub).unwrap().is_ok());
    }

    #[test]
    fn config_find_returns_none_without_config_file() {
        let (_tmp, root) = create_temp_project();
        assert!(Config::find(&root).is_none());
    }

    #[test]
    fn config_parses_hand_written_file() {
        let (_tmp, root) = create_temp_project();
        fs::write(
            root.join(CONFIG_FILE_NAME),
            r#"
project_id = "p1"
file_format = "json"

[remote]
path = "/srv/lsync"

[[push.sources]]
file = "./<locale_name>/<locale_code>.json"

[[pull.targets]]
file = "./out/<locale_code>.json"
project_id = "p2"
[pull.targets.params]
tag = "web"
"#,
        )
        .unwrap();

        let config = Config::find(&root).unwrap().unwrap();
        assert_eq!(config.sources().len(), 1);
        assert_eq!(config.sources()[0].params, PushParams::default());
        assert_eq!(config.targets()[0].params.tag.as_deref(), Some("web"));
        assert_eq!(
            config.project_id_for(config.targets()[0].project_id.as_deref(), "x").unwrap(),
            "p2"
        );
        assert_eq!(config.remote, Remote::Local(LocalRemote::new("/srv/lsync")));
        config.validate().unwrap();
    }

    #[test]
    fn relative_remote_is_resolved_from_root() {
        let (_tmp, root) = create_temp_project();
        Config::new_local(Some("p".to_string()), None, ".lsync-remote")
            .save(&root)
            .unwrap();
        let sub = root.join("sub");
        fs::create_dir_all(&sub).unwrap();

        let loaded = Config::find(&sub).unwrap().unwrap();
        assert_eq!(
            loaded.remote,
            Remote::Local(LocalRemote::new(root.join(".lsync-remote")))
        );
    }

    #[test]
    fn config_reports_parse_errors() {
        let (_tmp, root) = create_temp_project();
        fs::write(root.join(CONFIG_FILE_NAME), "project_id = [").unwrap();
        let err = Config::find(&root).unwrap().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn file_format_falls_back_to_extension() {
        let config = Config::new_local(Some("p".to_string()), None, "/remote");
        let yml = PathPattern::decompose("./<locale_code>.yml").unwrap();
        let play = PathPattern::decompose("./play.<locale_code>").unwrap();

        assert_eq!(config.file_format_for(None, &yml).unwrap(), "yml");
        assert_eq!(config.file_format_for(Some("yaml"), &yml).unwrap(), "yaml");
        assert!(config.file_format_for(None, &play).is_err());

        let config = Config::new_local(Some("p".to_string()), Some("json".to_string()), "/remote");
        assert_eq!(config.file_format_for(None, &play).unwrap(), "json");
    }

    #[test]
    fn validate_flags_bad_sources() {
        let mut config = Config::new_local(None, None, "/remote");
        config.add_source(Source::new("./<locale_code>.yml"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("No project id"));

        let mut config = Config::new_local(Some("p".to_string()), None, "/remote");
        config.add_source(Source::new("   "));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid push source"));

        let mut config = Config::new_local(Some("p".to_string()), None, "/remote");
        config.add_target(Target::new("./<locale_code>/strings.<locale_name>"));
        assert!(config.validate().is_err());
    }
}
