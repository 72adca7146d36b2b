use omnisumma::config::ExtractionConfig;
use omnisumma::source::{ExtractError, Extractor};
use omnisumma::SourceKind;
use std::io::Write;

fn extractor(transcription: bool, max_file_size: u64) -> Extractor {
    Extractor::new(ExtractionConfig {
        transcription,
        max_file_size,
    })
}

#[tokio::test]
async fn reads_plain_text() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "Hello world.\n\nSecond paragraph.").unwrap();

    let source = extractor(false, 1024)
        .extract(file.path(), None)
        .await
        .unwrap();
    assert_eq!(source.kind, SourceKind::Document);
    assert!(source.text.starts_with("Hello world."));
    assert!(source.file_name.ends_with(".txt"));
}

#[tokio::test]
async fn rejects_large_files() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(&[b'a'; 64]).unwrap();

    let err = extractor(false, 16)
        .extract(file.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::TooLarge { size: 64, limit: 16 }));
}

#[tokio::test]
async fn rejects_empty_text() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"  \n\n ").unwrap();

    let err = extractor(false, 1024)
        .extract(file.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::NoContent(_)));
}

#[tokio::test]
async fn media_needs_transcription_enabled() {
    let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    file.write_all(b"ID3").unwrap();

    let err = extractor(false, 1024)
        .extract(file.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::TranscriptionUnavailable(_)));

    // Enabled, but nothing to transcribe with.
    let err = extractor(true, 1024)
        .extract(file.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::TranscriptionUnavailable(_)));
}

#[tokio::test]
async fn reads_docx_paragraphs() {
    let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    {
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(
            br#"<?xml version="1.0"?><w:document xmlns:w="w"><w:body>
<w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
<w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t xml:space="preserve"> paragraph.</w:t></w:r></w:p>
</w:body></w:document>"#,
        )
        .unwrap();
        zip.finish().unwrap();
    }

    let source = extractor(false, 1024 * 1024)
        .extract(file.path(), None)
        .await
        .unwrap();
    assert_eq!(source.text, "First paragraph.\n\nSecond paragraph.");
}
