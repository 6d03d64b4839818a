//! Startup loading of the report and the document
//!
//! Both loads run concurrently. Neither failure stops the tool: without a
//! report every page reads as clean, and without a document the page range
//! comes from the report and highlights have no page size to map onto.

use std::path::Path;

use anyhow::Context;
use review_core::{PdfDocumentInfo, ReviewSession};

pub async fn load_session(report: &Path, document: Option<&Path>) -> ReviewSession {
    let (report_text, document_info) = tokio::join!(load_report(report), load_document(document));

    let mut session = ReviewSession::new();
    match report_text {
        Ok(text) => {
            session.load_report(&text);
        }
        Err(e) => tracing::error!("Failed to load findings report: {:#}", e),
    }

    if let Some(info) = document_info {
        tracing::info!("Document has {} pages", info.page_count());
        for event in info.events() {
            session.apply_page_event(event);
        }
    }

    session
}

async fn load_report(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

async fn load_document(path: Option<&Path>) -> Option<PdfDocumentInfo> {
    let path = path?;
    match read_document(path).await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!("Continuing without document metadata: {:#}", e);
            None
        }
    }
}

async fn read_document(path: &Path) -> anyhow::Result<PdfDocumentInfo> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let info = tokio::task::spawn_blocking(move || review_core::get_document_info(&bytes))
        .await
        .context("PDF parsing task failed")??;
    Ok(info)
}
