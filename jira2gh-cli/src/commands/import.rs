//! Import command - JIRA export to GitHub issues

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use jira2gh_core::jira::read_export;
use jira2gh_core::{
    resolve_issue, Config, ImportReport, Importer, MigrationContext, Project, ReconcileReport,
    Reconciler, ReferenceRewriter, Secrets, SystemClock,
};
use jira2gh_github::GitHubClient;

/// Arguments for the import
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// The JIRA XML export file
    #[arg(short = 'f', long, required_unless_present = "reconcile_only")]
    pub filename: Option<PathBuf>,

    /// The JIRA project name
    #[arg(short = 'j', long, required_unless_present = "reconcile_only")]
    pub jira_project: Option<String>,

    /// The GitHub access token
    #[arg(short = 't', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// The repository to which the issues are to be added (name, owner/name or URL)
    #[arg(short = 'r', long)]
    pub repository: Option<String>,

    /// The owner or organization of the repository
    #[arg(short = 'o', long)]
    pub owner: Option<String>,

    /// Config file (defaults to ~/.config/jira2gh/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Parse and resolve the export, print the result, touch nothing on GitHub
    #[arg(long, conflicts_with = "reconcile_only")]
    pub dry_run: bool,

    /// Only patch placeholders in existing comments
    #[arg(long)]
    pub reconcile_only: bool,
}

impl ImportArgs {
    /// Execute the import
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = Config::load_with_overrides(
            self.config.as_deref(),
            self.owner.clone(),
            self.repository.clone(),
        )?;

        if self.dry_run {
            let project = self.load_project()?;
            return preview(project, &config);
        }

        let client = connect(&config, self.access_token.as_deref())?;
        client.test_connection().await?;

        println!("Importing into {}/{}", client.owner(), client.repo());
        println!();

        if !self.reconcile_only {
            let project = self.load_project()?;
            let rewriter = ReferenceRewriter::for_project(&project.name, &config.jira.browse_url)?;
            let clock = SystemClock;
            let ctx = MigrationContext::new(&client, &clock, config.import);
            let report = Importer::new(ctx, rewriter).import_project(project).await;
            print_import_report(&report);
        }

        let report = Reconciler::new(&client)
            .run()
            .await
            .context("Placeholder reconciliation failed; rerun with --reconcile-only")?;
        print_reconcile_report(&report);

        Ok(())
    }

    fn load_project(&self) -> anyhow::Result<Project> {
        let (Some(path), Some(name)) = (self.filename.as_deref(), self.jira_project.as_deref())
        else {
            anyhow::bail!("--filename and --jira-project are required");
        };
        tracing::info!(project = %name, "Reading JIRA export");
        load(name, path)
    }
}

fn load(name: &str, path: &Path) -> anyhow::Result<Project> {
    read_export(name, path).with_context(|| format!("Failed to read {}", path.display()))
}

fn connect(config: &Config, token: Option<&str>) -> anyhow::Result<GitHubClient> {
    let token = Secrets::load()?.github_token(token).ok_or_else(|| {
        anyhow::anyhow!(
            "GitHub token not found. Pass --access-token, set GITHUB_TOKEN \
             or add it to ~/.config/jira2gh/secrets.toml"
        )
    })?;

    let repository = config
        .github
        .repository
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("No repository specified. Use --repository"))?;

    Ok(GitHubClient::for_repository(
        config.github.owner.as_deref(),
        repository,
        token,
        config.import.request_timeout,
    )?)
}

/// Resolve every issue and print it as JSON
fn preview(mut project: Project, config: &Config) -> anyhow::Result<()> {
    let rewriter = ReferenceRewriter::for_project(&project.name, &config.jira.browse_url)?;
    for issue in &mut project.issues {
        resolve_issue(issue, &rewriter);
    }

    println!("[Dry run] {} issue(s) would be imported", project.issues.len());
    println!("Milestones: {}", project.milestones.join(", "));
    println!("Labels: {}", project.labels.join(", "));
    println!();
    for issue in &project.issues {
        println!("{}", serde_json::to_string_pretty(issue)?);
    }
    Ok(())
}

fn print_import_report(report: &ImportReport) {
    println!();
    println!("Import Summary");
    println!("==============");
    println!("Milestones: {}", report.milestones.len());
    println!("Labels:     {}", report.labels);
    println!("Issues:     {}", report.issues.len());
    println!("Comments:   {}", report.comments);
    println!("Closed:     {}", report.closed);
    if !report.errors.is_empty() {
        println!();
        println!("{} item(s) failed and were skipped:", report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
}

fn print_reconcile_report(report: &ReconcileReport) {
    println!();
    println!(
        "Patched {} of {} comment(s) across {} page(s)",
        report.patched, report.scanned, report.pages
    );
}
