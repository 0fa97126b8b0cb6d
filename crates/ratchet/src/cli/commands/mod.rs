//! CLI commands

mod bump;
mod changelog;
mod version;

pub use bump::BumpCommand;
pub use changelog::ChangelogCommand;
pub use version::VersionCommand;

use std::sync::Arc;

use ratchet_changelog::{Classifier, ClassifierSettings, TreeBuilder};
use ratchet_core::config::{load_config_or_default, Config};
use ratchet_git::{CommitRecord, Repo, TagRecord};
use ratchet_version::{SchemeRegistry, TagTemplate, Version, VersionScheme};

/// Everything a release-facing command needs, loaded once per run
pub struct ReleaseContext {
    pub config: Config,
    pub repo: Repo,
    pub scheme: Arc<dyn VersionScheme>,
    pub template: TagTemplate,
    pub classifier: Classifier,
}

impl ReleaseContext {
    /// Load configuration and open the repository from the current
    /// directory. Configuration problems surface here, before any
    /// commit is touched.
    pub fn load() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        let repo = Repo::discover(&cwd)?;
        let scheme = SchemeRegistry::new().resolve(&config.version.scheme)?;
        let template = TagTemplate::new(&config.version.tag_format)?;
        let classifier = Classifier::new(ClassifierSettings::from_config(&config)?)?;

        Ok(Self {
            config,
            repo,
            scheme,
            template,
            classifier,
        })
    }

    /// The newest reachable tag that parses under the template and
    /// scheme, together with its version
    pub fn latest_release(&self) -> anyhow::Result<Option<(TagRecord, Version)>> {
        let tags = self.repo.tags()?;
        Ok(tags.into_iter().find_map(|tag| {
            self.template
                .extract(&tag.name, self.scheme.as_ref())
                .map(|version| (tag, version))
        }))
    }

    /// Commits to consider for the next release: everything after the
    /// latest release tag, or the full history without one
    pub fn pending_commits(
        &self,
        latest: Option<&TagRecord>,
    ) -> anyhow::Result<Vec<CommitRecord>> {
        Ok(match latest {
            Some(tag) => self.repo.commits_since_tag(&tag.name)?,
            None => self.repo.commits()?,
        })
    }

    /// A tree builder wired up from the loaded configuration
    pub fn tree_builder(&self) -> anyhow::Result<TreeBuilder> {
        let classifier = Classifier::new(self.classifier.settings().clone())?;
        Ok(TreeBuilder::new(classifier, self.scheme.clone(), self.template.clone())
            .with_unreleased_label(self.config.changelog.unreleased_label.as_str())
            .with_merged_prereleases(self.config.changelog.merge_prereleases))
    }
}
