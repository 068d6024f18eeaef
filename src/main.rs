use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use futures::FutureExt;
use futures::future::BoxFuture;

use essaymark::config::ReviewConfig;
use essaymark::correction::payload::{MediaKind, UploadedMedia};
use essaymark::correction::sink::{JsonFileSink, file_safe_id};
use essaymark::domain::Annotation;
use essaymark::replay::{self, ReplayScript};
use essaymark::submission::SubmissionBody;
use essaymark::{correction, fl, localize, render};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();

    let Some(arg) = std::env::args_os().nth(1) else {
        bail!("usage: essaymark <replay-script.json> | --init-config");
    };

    let config = ReviewConfig::load();
    if arg == "--init-config" {
        config.save();
        return Ok(());
    }

    let script_path = PathBuf::from(arg);
    let script = replay::load_script(&script_path)?;
    run(script, config).await
}

async fn run(script: ReplayScript, config: ReviewConfig) -> Result<()> {
    let session = replay::replay(&script, config.clone())?;

    let overlays = render::overlay::project(
        session.mode,
        session.store.all(),
        config.quote_preview_chars,
    );
    println!("{}", fl!("summary-header", count = overlays.len()));
    for line in overlays.describe() {
        println!("  {line}");
    }

    let output_dir = config.output_dir();
    let mut uploads: Vec<BoxFuture<'static, Result<UploadedMedia>>> = Vec::new();
    if let SubmissionBody::Image(url) = script.submission.body()?
        && let Some(src) = local_image_path(url)
    {
        let dest = output_dir.join(format!(
            "annotated-{}.png",
            file_safe_id(&script.submission.id)
        ));
        uploads.push(flatten_upload(
            src,
            dest,
            session.store.all().to_vec(),
            config.clone(),
        ));
    }

    let sink = JsonFileSink::new(&output_dir);
    let location = correction::submit_correction(
        &session,
        &script.submission.id,
        script.correction.clone(),
        uploads,
        &sink,
    )
    .await?;
    println!("{}", fl!("submitted-to", path = location));
    Ok(())
}

/// Local file behind an image submission URL; remote URLs are left alone
fn local_image_path(url: &str) -> Option<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if url.contains("://") {
        log::info!("Remote submission image {}, skipping flattened export", url);
        return None;
    }
    Some(PathBuf::from(url))
}

/// Flattened export, run as one of the uploads the submission waits for
fn flatten_upload(
    src: PathBuf,
    dest: PathBuf,
    annotations: Vec<Annotation>,
    config: ReviewConfig,
) -> BoxFuture<'static, Result<UploadedMedia>> {
    async move {
        let written = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            render::image::flatten_submission_image(&src, &dest, &annotations, &config)?;
            Ok(dest)
        })
        .await
        .context("Flattening task failed")??;

        Ok(UploadedMedia {
            kind: MediaKind::AnnotatedImage,
            url: path_url(&written),
        })
    }
    .boxed()
}

fn path_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_image_path() {
        assert_eq!(
            local_image_path("file:///tmp/scan.png"),
            Some(PathBuf::from("/tmp/scan.png"))
        );
        assert_eq!(local_image_path("scans/a.jpg"), Some(PathBuf::from("scans/a.jpg")));
        assert_eq!(local_image_path("https://cdn.example/a.jpg"), None);
    }
}
