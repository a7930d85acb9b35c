use crate::config::{DEFAULT_FILENAME, MissingFilenamePolicy};
use crate::download::{Fetcher, SaveTarget, download};
use crate::filename::extract_filename;
use crate::results::{DownloadTask, Report};
use crate::utils::{disambiguate, sanitize_filename};
use futures::future::join_all;

/// Pairs each located URL with a filename.
///
/// Returns the tasks to submit, and the URLs left out because no filename could
/// be derived under `policy`.
pub fn plan(urls: &[String], policy: MissingFilenamePolicy) -> (Vec<DownloadTask>, Vec<String>) {
    let mut urls_to_fetch = Vec::new();
    let mut names = Vec::new();
    let mut skipped = Vec::new();

    for url in urls {
        let name = match (extract_filename(url), policy) {
            (Some(name), _) => name,
            (None, MissingFilenamePolicy::Default) => DEFAULT_FILENAME.to_string(),
            (None, MissingFilenamePolicy::Skip) => {
                ::log::debug!("No filename in {}, skipping", url);
                skipped.push(url.clone());
                continue;
            }
        };
        urls_to_fetch.push(url.clone());
        names.push(sanitize_filename(&name));
    }

    let tasks = urls_to_fetch
        .into_iter()
        .zip(disambiguate(&names))
        .map(|(url, filename)| DownloadTask::new(url, filename))
        .collect();

    (tasks, skipped)
}

/// Starts every task at once and waits for all of them to settle.
///
/// One failure never stops the others; the report is built only after the
/// last task reaches a terminal state.
pub async fn run_tasks<F, T>(
    fetcher: &F,
    target: &T,
    tasks: &[DownloadTask],
    skipped: Vec<String>,
    check_status: bool,
) -> Report
where
    F: Fetcher + ?Sized,
    T: SaveTarget + ?Sized,
{
    ::log::info!("Downloading {} image(s)", tasks.len());

    let outcomes = join_all(
        tasks
            .iter()
            .map(|task| download(fetcher, target, task, check_status)),
    )
    .await;

    let report = Report::from_outcomes(tasks, outcomes, skipped);
    report.log();
    report
}

/// Plans and runs downloads for the URLs the locator returned
pub async fn harvest_urls<F, T>(
    fetcher: &F,
    target: &T,
    urls: &[String],
    policy: MissingFilenamePolicy,
    check_status: bool,
) -> Report
where
    F: Fetcher + ?Sized,
    T: SaveTarget + ?Sized,
{
    let (tasks, skipped) = plan(urls, policy);
    run_tasks(fetcher, target, &tasks, skipped, check_status).await
}
