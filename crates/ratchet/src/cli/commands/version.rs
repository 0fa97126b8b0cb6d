//! Version command

use clap::Args;
use console::style;
use tracing::info;

use ratchet_version::{BumpSpec, Increment, Version};

use crate::cli::{Cli, OutputFormat};

use super::ReleaseContext;

/// Show the current version and the computed next version
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Show the current version only
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(current = self.current, "executing version command");
        let ctx = ReleaseContext::load()?;

        let latest = ctx.latest_release()?;
        let current = latest
            .as_ref()
            .map(|(_, version)| version.clone())
            .unwrap_or_else(Version::zero);
        let current_str = ctx.scheme.render(&current);

        if self.current {
            return self.output_current(&current_str, cli);
        }

        let commits = ctx.pending_commits(latest.as_ref().map(|(tag, _)| tag))?;
        let increment = ctx.classifier.aggregate_increment(&commits);

        let next = current.bump(
            &BumpSpec::increment(increment)
                .with_prerelease_offset(ctx.config.version.prerelease_offset),
        );
        let next_str = ctx.scheme.render(&next);

        self.output_result(&current_str, &next_str, increment, commits.len(), cli)
    }

    fn output_current(&self, version: &str, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "current": version });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{version}");
            }
        }
        Ok(())
    }

    fn output_result(
        &self,
        current: &str,
        next: &str,
        increment: Increment,
        commit_count: usize,
        cli: &Cli,
    ) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "current": current,
                    "next": next,
                    "increment": increment.to_string(),
                    "commits": commit_count,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{next}");
                } else {
                    println!("{}", style("Version Calculation").bold());
                    println!();
                    println!("  Current version:  {}", style(current).cyan());
                    println!("  Next version:     {}", style(next).green().bold());
                    println!("  Increment:        {}", style(increment.to_string()).yellow());
                    println!("  Commits analyzed: {commit_count}");
                }
            }
        }
        Ok(())
    }
}
