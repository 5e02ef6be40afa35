//! Concurrent processing of a directory of PX documents
//!
//! Documents are discovered with walkdir, fetched through the shared
//! [`Fetcher`], parsed on the blocking pool and written one output file per
//! input. Failures are recorded per file and never stop the batch.

use crate::app::services::export::write_output;
use crate::app::services::fetcher::{DocumentSource, Fetcher};
use crate::app::services::px_parser::{ParseStats, PxParser};
use crate::config::{Config, OutputConfig};
use crate::constants::PX_EXTENSION;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Result of processing one document
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,

    /// Written file, when an output directory was given and parsing succeeded
    pub output: Option<PathBuf>,

    pub result: Result<ParseStats>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Totals over a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
    pub duration: Duration,
}

impl BatchSummary {
    pub fn files(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files() - self.succeeded()
    }

    /// Data rows over all successfully parsed documents
    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .map(|stats| stats.rows)
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Parses many PX documents concurrently
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    parser: Arc<PxParser>,
    fetcher: Arc<Fetcher>,
    output: OutputConfig,
    workers: usize,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            parser: Arc::new(PxParser::new(&config.parsing)?),
            fetcher: Arc::new(Fetcher::new(&config.fetch)?),
            output: config.output.clone(),
            workers: config.performance.workers.max(1),
            show_progress: false,
        })
    }

    /// Show an indicatif progress bar while processing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Parse every `.px` file under `input_dir`, writing outputs under `output_dir`
    pub async fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<BatchSummary> {
        let start = Instant::now();
        let files = discover_files(input_dir)?;
        info!(
            "Found {} PX files in {} ({} workers)",
            files.len(),
            input_dir.display(),
            self.workers
        );

        let pb = self.create_progress_bar(files.len() as u64);
        let concurrent_limit = self.workers.min(files.len()).max(1);

        let mut outcomes: Vec<FileOutcome> = stream::iter(files)
            .map(|input| {
                let output = output_dir.map(|dir| self.output_path(input_dir, dir, &input));
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = input.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                    let result = self.process_file(&input, output.as_deref()).await;
                    pb.inc(1);

                    match &result {
                        Ok(stats) => debug!("Processed {}: {} rows", input.display(), stats.rows),
                        Err(e) if e.is_structural() => {
                            warn!("Skipping malformed document {}: {}", input.display(), e)
                        }
                        Err(e) => error!("Failed to process {}: {}", input.display(), e),
                    }

                    FileOutcome {
                        output: output.filter(|_| result.is_ok()),
                        input,
                        result,
                    }
                }
            })
            .buffer_unordered(concurrent_limit)
            .collect()
            .await;

        pb.finish_with_message("Batch complete");
        outcomes.sort_by(|a, b| a.input.cmp(&b.input));

        let summary = BatchSummary {
            outcomes,
            duration: start.elapsed(),
        };
        info!(
            "Batch finished: {} succeeded, {} failed, {} rows in {:.2?}",
            summary.succeeded(),
            summary.failed(),
            summary.total_rows(),
            summary.duration
        );
        Ok(summary)
    }

    /// Fetch, parse and optionally export one document
    pub async fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<ParseStats> {
        let uri = input.to_string_lossy().into_owned();
        let text = self.fetcher.fetch(&uri).await?;

        let parser = Arc::clone(&self.parser);
        let output_config = self.output.clone();
        let output = output.map(Path::to_path_buf);

        tokio::task::spawn_blocking(move || -> Result<ParseStats> {
            let result = parser.parse_detailed(&text)?;
            if let Some(path) = &output {
                write_output(&result.px, path, &output_config)?;
            }
            Ok(result.stats)
        })
        .await
        .map_err(|e| Error::processing_interrupted(format!("Parse task for {} failed: {}", uri, e)))?
    }

    /// Mirror `input` under `output_dir` with the output format's extension
    fn output_path(&self, input_dir: &Path, output_dir: &Path, input: &Path) -> PathBuf {
        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        output_dir
            .join(relative)
            .with_extension(self.output.format.extension())
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Processing files");
        pb
    }
}

/// PX files under `dir`, sorted by path
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::io(
            format!("Input directory does not exist: {}", dir.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "Directory not found"),
        ));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PX_EXTENSION))
        })
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    const VALID: &str = r#"STUB="A";HEADING="B";VALUES("A")="x","y";VALUES("B")="p","q";DATA=1 2 3 4;"#;
    const MISALIGNED: &str = r#"STUB="A";VALUES("A")="x","y";DATA=1;"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config() -> Config {
        Config::default().with_encoding("utf-8").with_workers(2)
    }

    #[test]
    fn test_discover_files_filters_extension() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.px", VALID);
        write(dir.path(), "a.PX", VALID);
        write(dir.path(), "nested/c.px", VALID);
        write(dir.path(), "notes.txt", "ignore me");

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|path| {
                path.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(names, vec!["a.PX", "b.px", "nested/c.px"]);
    }

    #[test]
    fn test_discover_files_missing_directory() {
        let result = discover_files(Path::new("/definitely/not/a/dir"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_process_directory_records_failures() {
        let input = TempDir::new().unwrap();
        write(input.path(), "good.px", VALID);
        write(input.path(), "bad.px", MISALIGNED);

        let processor = BatchProcessor::new(&config()).unwrap();
        let summary = processor.process_directory(input.path(), None).await.unwrap();

        assert_eq!(summary.files(), 2);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.total_rows(), 4);

        let failure = summary.failures().next().unwrap();
        assert!(failure.input.ends_with("bad.px"));
        assert!(matches!(failure.result, Err(Error::MisalignedData { .. })));
    }

    #[tokio::test]
    async fn test_process_directory_writes_outputs() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "one.px", VALID);
        write(input.path(), "sub/two.px", VALID);

        let processor =
            BatchProcessor::new(&config().with_output_format(OutputFormat::Csv)).unwrap();
        let summary = processor
            .process_directory(input.path(), Some(output.path()))
            .await
            .unwrap();

        assert_eq!(summary.succeeded(), 2);
        let written = output.path().join("sub").join("two.csv");
        assert!(written.exists());
        assert_eq!(
            summary.outcomes[1].output.as_deref(),
            Some(written.as_path())
        );

        let content = std::fs::read_to_string(output.path().join("one.csv")).unwrap();
        assert!(content.starts_with("A,B,DATA"));
    }

    #[tokio::test]
    async fn test_existing_output_requires_force() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "one.px", VALID);
        write(output.path(), "one.csv", "existing");

        let processor = BatchProcessor::new(&config()).unwrap();
        let summary = processor
            .process_directory(input.path(), Some(output.path()))
            .await
            .unwrap();
        assert_eq!(summary.failed(), 1);
        assert!(summary.outcomes[0].output.is_none());

        let mut forced = config();
        forced.output.force_overwrite = true;
        let processor = BatchProcessor::new(&forced).unwrap();
        let summary = processor
            .process_directory(input.path(), Some(output.path()))
            .await
            .unwrap();
        assert_eq!(summary.succeeded(), 1);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let input = TempDir::new().unwrap();
        let summary = BatchProcessor::new(&config())
            .unwrap()
            .process_directory(input.path(), None)
            .await
            .unwrap();
        assert_eq!(summary.files(), 0);
        assert_eq!(summary.total_rows(), 0);
    }
}
