//! In-memory integration tests for fuzzy task name resolution.

use std::sync::Arc;

use crate::in_memory::helpers::{repository, seed_task};
use eyre::{bail, ensure};
use gantt::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{NameResolution, TaskNameResolver},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exact_name_beats_overlapping_substring_matches(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let expected = seed_task(&repository, "Buy groceries").await?;
    seed_task(&repository, "Buy groceries for the party").await?;
    seed_task(&repository, "Buy groceries before the trip").await?;
    let resolver = TaskNameResolver::new(Arc::clone(&repository));

    let resolution = resolver.resolve("buy groceries").await?;

    ensure!(resolution == NameResolution::Resolved(expected));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_reference_resolves_a_single_match(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let expected = seed_task(&repository, "Prepare quarterly review").await?;
    seed_task(&repository, "Buy groceries").await?;
    let resolver = TaskNameResolver::new(Arc::clone(&repository));

    let resolution = resolver.resolve("  Quarterly  ").await?;

    ensure!(resolution == NameResolution::Resolved(expected));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlapping_matches_surface_candidate_summaries(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    seed_task(&repository, "Review the budget").await?;
    seed_task(&repository, "Review the roadmap").await?;
    let resolver = TaskNameResolver::new(Arc::clone(&repository));

    let resolution = resolver.resolve("review").await?;

    let NameResolution::Ambiguous(candidates) = resolution else {
        bail!("expected an ambiguous resolution, got {resolution:?}");
    };
    let names: Vec<&str> = candidates
        .iter()
        .map(|candidate| candidate.name.as_str())
        .collect();
    ensure!(names == vec!["Review the roadmap", "Review the budget"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmatched_reference_reports_not_found(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    seed_task(&repository, "Buy groceries").await?;
    let resolver = TaskNameResolver::new(Arc::clone(&repository));

    let resolution = resolver.resolve("homework").await?;

    ensure!(resolution == NameResolution::NotFound);
    Ok(())
}
