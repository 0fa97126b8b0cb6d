//! Changelog command

use clap::Args;
use console::style;
use tracing::{info, instrument};

use ratchet_changelog::{dialect_by_name, guess_dialect, merge, ChangelogRenderer, MarkdownRenderer};

use crate::cli::{Cli, OutputFormat};

use super::ReleaseContext;

/// Generate or update the changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Merge only the unreleased block into the existing file instead of
    /// rebuilding the whole document
    #[arg(short, long)]
    pub incremental: bool,

    /// Write to the configured changelog file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Label unreleased changes with this upcoming version
    #[arg(long, value_name = "VERSION")]
    pub unreleased_version: Option<String>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    #[instrument(skip(self, cli), fields(incremental = self.incremental, write = self.write))]
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = ReleaseContext::load()?;

        if self.incremental {
            self.incremental_update(&ctx, cli)
        } else {
            self.full_rebuild(&ctx, cli)
        }
    }

    /// Regenerate the whole document from the full history
    fn full_rebuild(&self, ctx: &ReleaseContext, cli: &Cli) -> anyhow::Result<()> {
        let commits = ctx.repo.commits()?;
        let tags = ctx.repo.tags()?;

        let buckets = self.builder(ctx)?.build(&commits, &tags);
        let rendered = MarkdownRenderer::new().render(&buckets);

        if self.write {
            let path = &ctx.config.changelog.file;
            std::fs::write(path, format!("{rendered}\n"))?;
            self.report_written(path, cli);
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&buckets)?),
            OutputFormat::Text => println!("{rendered}"),
        }
        Ok(())
    }

    /// Merge the unreleased block into the existing document, leaving
    /// everything below the latest release untouched
    fn incremental_update(&self, ctx: &ReleaseContext, cli: &Cli) -> anyhow::Result<()> {
        let path = &ctx.config.changelog.file;
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
        info!(?metadata.latest_version, "parsed existing changelog");

        let latest = ctx.latest_release()?;
        let commits = ctx.pending_commits(latest.as_ref().map(|(tag, _)| tag))?;
        let tags = ctx.repo.tags()?;

        let buckets = self.builder(ctx)?.build(&commits, &tags);
        let block = MarkdownRenderer::new().render(&buckets);
        let merged = merge(&block, &lines, &metadata);

        if self.write {
            let mut content = merged.join("\n");
            content.push('\n');
            std::fs::write(path, content)?;
            self.report_written(path, cli);
        } else {
            println!("{}", merged.join("\n"));
        }
        Ok(())
    }

    fn builder(&self, ctx: &ReleaseContext) -> anyhow::Result<ratchet_changelog::TreeBuilder> {
        let mut builder = ctx.tree_builder()?;
        if let Some(version) = &self.unreleased_version {
            builder = builder.with_release_hint(version.as_str(), chrono::Local::now().date_naive());
        }
        Ok(builder)
    }

    fn report_written(&self, path: &std::path::Path, cli: &Cli) {
        if !cli.quiet {
            println!(
                "{} Changelog written to {}",
                style("ok").green().bold(),
                style(path.display()).cyan()
            );
        }
    }
}
