//! Bump command

use std::path::Path;

use clap::Args;
use console::style;
use tracing::{info, instrument};

use ratchet_changelog::{dialect_by_name, guess_dialect, merge, ChangelogRenderer, MarkdownRenderer};
use ratchet_version::{BumpSpec, Increment, PrereleaseKind, Version};

use crate::cli::{Cli, OutputFormat};

use super::ReleaseContext;

/// Bump the version: tag the release and update the changelog
#[derive(Debug, Args)]
pub struct BumpCommand {
    /// Force an increment instead of deriving it from commits
    #[arg(short, long, value_parser = parse_increment)]
    pub increment: Option<Increment>,

    /// Cut a prerelease of the given kind (alpha, beta, rc)
    #[arg(short, long, value_parser = parse_prerelease)]
    pub prerelease: Option<PrereleaseKind>,

    /// Attach a devrelease number
    #[arg(long, value_name = "N")]
    pub devrelease: Option<u64>,

    /// Bump the local version segment instead of the public version
    #[arg(long)]
    pub local: bool,

    /// Compute and print everything without writing the changelog or
    /// creating the tag
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_increment(value: &str) -> Result<Increment, String> {
    Increment::from_name(value).ok_or_else(|| format!("unknown increment '{value}'"))
}

fn parse_prerelease(value: &str) -> Result<PrereleaseKind, String> {
    PrereleaseKind::from_label(value).ok_or_else(|| format!("unknown prerelease kind '{value}'"))
}

impl BumpCommand {
    /// Execute the bump command
    #[instrument(skip(self, cli), fields(dry_run = self.dry_run))]
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = ReleaseContext::load()?;

        let latest = ctx.latest_release()?;
        let current = latest
            .as_ref()
            .map(|(_, version)| version.clone())
            .unwrap_or_else(Version::zero);

        let commits = ctx.pending_commits(latest.as_ref().map(|(tag, _)| tag))?;

        let derived = ctx.classifier.aggregate_increment(&commits);
        let increment = self.increment.unwrap_or(derived);

        // Doc-only change sets are a normal outcome, not a failure;
        // report them and leave without cutting an empty release.
        if increment == Increment::None
            && self.prerelease.is_none()
            && self.devrelease.is_none()
            && !self.local
        {
            let reason = ratchet_core::error::ChangelogError::NoEligibleChanges;
            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "released": false,
                        "reason": reason.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    if !cli.quiet {
                        println!("{}", style(reason.to_string()).yellow());
                    }
                }
            }
            return Ok(());
        }

        let mut spec = BumpSpec::increment(increment)
            .with_prerelease_offset(ctx.config.version.prerelease_offset);
        if let Some(kind) = self.prerelease {
            spec = spec.with_prerelease(kind);
        }
        if let Some(dev) = self.devrelease {
            spec = spec.with_devrelease(dev);
        }
        if self.local {
            spec = spec.local();
        }

        let next = current.bump(&spec);
        let next_str = ctx.scheme.render(&next);
        let tag_name = ctx.template.render(&next, ctx.scheme.as_ref());

        info!(current = %ctx.scheme.render(&current), next = %next_str, tag = %tag_name, "bumping version");

        let changelog_path = if ctx.config.changelog.enabled {
            let path = ctx.config.changelog.file.clone();
            self.update_changelog(&ctx, &next_str, &commits, &path)?;
            Some(path)
        } else {
            None
        };

        if !self.dry_run {
            ctx.repo.create_tag(&tag_name)?;
        }

        self.output_result(
            &ctx.scheme.render(&current),
            &next_str,
            &tag_name,
            increment,
            changelog_path.as_deref(),
            cli,
        )
    }

    /// Render the pending changes under the upcoming version label and
    /// splice them into the changelog file
    fn update_changelog(
        &self,
        ctx: &ReleaseContext,
        next_version: &str,
        commits: &[ratchet_git::CommitRecord],
        path: &Path,
    ) -> anyhow::Result<()> {
        let dialect = match &ctx.config.changelog.dialect {
            Some(name) => dialect_by_name(name)?,
            None => guess_dialect(path),
        };

        let existing = if path.exists() {
            std::fs::read_to_string(path)?
        } else {
            String::new()
        };
        let lines: Vec<String> = existing.lines().map(String::from).collect();
        let metadata = dialect.extract_metadata(&lines);

        let today = chrono::Local::now().date_naive();
        let tags = ctx.repo.tags()?;
        let buckets = ctx
            .tree_builder()?
            .with_release_hint(next_version, today)
            .build(commits, &tags);

        let block = MarkdownRenderer::new().render(&buckets);
        let merged = merge(&block, &lines, &metadata);

        if !self.dry_run {
            let mut content = merged.join("\n");
            content.push('\n');
            std::fs::write(path, content)?;
        }

        Ok(())
    }

    fn output_result(
        &self,
        current: &str,
        next: &str,
        tag: &str,
        increment: Increment,
        changelog: Option<&Path>,
        cli: &Cli,
    ) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": current,
                    "next": next,
                    "tag": tag,
                    "increment": increment.to_string(),
                    "changelog": changelog.map(|p| p.display().to_string()),
                    "dry_run": self.dry_run,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{next}");
                    return Ok(());
                }

                if self.dry_run {
                    println!("{}", style("Dry run - nothing written").yellow().bold());
                    println!();
                }
                println!("  Current version: {}", style(current).cyan());
                println!("  New version:     {}", style(next).green().bold());
                println!("  Tag:             {}", style(tag).green());
                println!("  Increment:       {}", style(increment.to_string()).yellow());
                if let Some(path) = changelog {
                    println!("  Changelog:       {}", style(path.display()).cyan());
                }
            }
        }
        Ok(())
    }
}
