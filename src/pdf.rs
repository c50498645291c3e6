use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use lopdf::Document;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}

/// Raw text of every page, in page order. A page whose text cannot be
/// decoded comes back as `None`; only an unreadable document is an error.
pub fn read_pages(path: &Path) -> Result<Vec<Option<String>>, ExtractError> {
    let doc = Document::load(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
    info!(pages = page_numbers.len(), path = %path.display(), "extracting text");

    let pb = ProgressBar::new(page_numbers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut pages = Vec::with_capacity(page_numbers.len());
    for n in page_numbers {
        match doc.extract_text(&[n]) {
            Ok(text) => pages.push(Some(text)),
            Err(e) => {
                warn!(page = n, error = %e, "no extractable text");
                pages.push(None);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// One page per entry; `None` gives a page with an empty content stream.
    fn write_pdf(path: &Path, texts: &[Option<&str>]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let operations = match text {
                Some(t) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*t)]),
                    Operation::new("ET", vec![]),
                ],
                None => Vec::new(),
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn pages_in_order_with_empty_page_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handbook.pdf");
        write_pdf(&path, &[Some("3 Intro"), None, Some("body")]);

        let pages = read_pages(&path).unwrap();
        assert_eq!(pages.len(), 3);
        let trimmed: Vec<Option<&str>> = pages.iter().map(|p| p.as_deref().map(str::trim)).collect();
        assert_eq!(trimmed, vec![Some("3 Intro"), Some(""), Some("body")]);
    }

    #[test]
    fn extracted_pages_feed_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handbook.pdf");
        write_pdf(&path, &[Some("3 Intro"), None, Some("body")]);

        let raw = read_pages(&path).unwrap();
        let corpus = crate::parser::build_corpus("handbook.pdf", raw, &crate::settings::Settings::default());
        assert_eq!(corpus.page_count(), 3);
        assert_eq!(corpus.pages[1].text, "");
        assert_eq!(corpus.toc.len(), 1);
        assert_eq!(corpus.sections[0].start_page, 3);
        assert_eq!(corpus.sections[0].end_page, 3);
        assert_eq!(corpus.sections[0].content, "עמוד 3\nbody");
    }

    #[test]
    fn missing_file_is_open_error() {
        let err = read_pages(Path::new("/nonexistent/handbook.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/handbook.pdf"));
    }

    #[test]
    fn garbage_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();
        assert!(matches!(read_pages(&path), Err(ExtractError::Open { .. })));
    }
}
