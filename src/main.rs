use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use merge_tagger::boundary::BoundaryWarning;
use merge_tagger::cli::{run_publish_workflow, Args, PublishWorkflowArgs, Settings};
use merge_tagger::github::{self, Commenter};
use merge_tagger::{config, event, ui, TaggerError};
use merge_tagger::git::Git2Repository;

fn main() {
    init_logger();

    let args = Args::parse();

    if let Err(e) = run(args) {
        // Version errors get the same wording as the pull request comment
        let message = match e
            .downcast_ref::<TaggerError>()
            .and_then(TaggerError::offending_tag)
        {
            Some(tag) => github::failure_comment(tag),
            None => format!("{:#}", e),
        };
        ui::display_error(&message);
        std::process::exit(1);
    }
}

/// Debug builds log everything; release builds log info and above.
/// `RUST_LOG` overrides both.
fn init_logger() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config)?;
    debug!(
        "Repository {} at {}, remote '{}', dry run: {}",
        settings.repository,
        settings.repo_path.display(),
        settings.remote_name,
        settings.dry_run
    );

    let event = event::load_event(&settings.event_path)?;
    if !event.is_merged() {
        ui::display_boundary_warning(&BoundaryWarning::PullRequestNotMerged {
            pull_request: event.number,
        });
        return Ok(());
    }
    let merge_commit = event.merge_commit()?.to_string();

    let repo = Git2Repository::open(&settings.repo_path).with_context(|| {
        format!(
            "Cannot open repository at {}",
            settings.repo_path.display()
        )
    })?;

    let client = settings.github_client();
    if settings.comment && client.is_none() && !settings.dry_run {
        ui::display_boundary_warning(&BoundaryWarning::CommentSkipped {
            reason: "no token available".to_string(),
        });
    }

    let workflow_args = PublishWorkflowArgs {
        merge_commit,
        pull_request: event.number,
        remote: settings.remote_target(),
        releases_url: settings.releases_url(),
        dry_run: settings.dry_run,
    };

    ui::display_status(&format!(
        "Tagging merge commit {} of pull request #{}",
        workflow_args.merge_commit, workflow_args.pull_request
    ));

    let result = run_publish_workflow(
        &repo,
        client.as_ref().map(|c| c as &dyn Commenter),
        &workflow_args,
    )?;

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_proposed_tag(result.previous.as_deref(), &result.tag);

    if result.pushed {
        ui::display_success(&format!(
            "Pushed tag {} to {}",
            result.tag, settings.remote_name
        ));
    }
    if result.commented {
        ui::display_success(&format!(
            "Commented on pull request #{}",
            workflow_args.pull_request
        ));
    }

    Ok(())
}
