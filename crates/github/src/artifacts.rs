use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use compat_check_core::models::CompatReport;
use octocrab::{Octocrab, models::RunId, params::actions::ArchiveFormat};

/// Artifact the external checker uploads alongside the workflow run.
pub const REPORT_ARTIFACT_NAME: &str = "jcc";
/// Report file inside the artifact archive.
pub const REPORT_FILE_NAME: &str = "jcc.json";

/// Locate and decode the compatibility report attached to a workflow run.
/// Returns `None` if the run produced no report artifact.
pub async fn fetch_compat_report(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    run_id: RunId,
) -> Result<Option<CompatReport>> {
    let artifacts = client
        .all_pages(
            client
                .actions()
                .list_workflow_run_artifacts(owner, repo, run_id)
                .send()
                .await
                .context("Failed to fetch artifacts")?
                .value
                .unwrap_or_default(),
        )
        .await?;
    tracing::debug!("Run {} (artifacts {})", run_id, artifacts.len());
    let Some(artifact) =
        artifacts.iter().find(|a| a.name == REPORT_ARTIFACT_NAME && !a.expired)
    else {
        return Ok(None);
    };
    tracing::info!("Found artifact {}: {}", artifact.id, artifact.archive_download_url);
    let bytes = client
        .actions()
        .download_artifact(owner, repo, artifact.id, ArchiveFormat::Zip)
        .await
        .context("Failed to download artifact")?;
    read_report_from_zip(bytes.as_ref()).map(Some)
}

fn read_report_from_zip(bytes: &[u8]) -> Result<CompatReport> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive
        .by_name(REPORT_FILE_NAME)
        .with_context(|| format!("No {REPORT_FILE_NAME} in report artifact"))?;
    let mut contents = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut contents)?;
    serde_json::from_slice(&contents).context("Failed to parse compatibility report")
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::{REPORT_FILE_NAME, read_report_from_zip};

    fn archive_with(name: &str, contents: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_report_from_zip() {
        let data = archive_with(
            REPORT_FILE_NAME,
            r#"{"libA":{"Foo":{"classIncompatibilities":[{"message":"removed","isError":true}]}}}"#,
        );
        let report = read_report_from_zip(&data).unwrap();
        assert!(report["libA"]["Foo"].class_incompatibilities[0].is_error);
    }

    #[test]
    fn test_report_file_missing() {
        let data = archive_with("other.json", "{}");
        assert!(read_report_from_zip(&data).is_err());
    }

    #[test]
    fn test_report_malformed() {
        let data = archive_with(REPORT_FILE_NAME, "not json");
        assert!(read_report_from_zip(&data).is_err());
    }
}
