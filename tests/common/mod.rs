//! Shared test helpers.

#![allow(dead_code)]

use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::{Embedder, Embedding, UploadedFile};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Mutex;

/// Bag-of-words embedder: every distinct word gets its own dimension, so
/// cosine similarity is exact word-count overlap with no hash collisions.
pub struct VocabularyEmbedder {
    dimension: usize,
    vocabulary: Mutex<HashMap<String, usize>>,
}

impl VocabularyEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vocabulary: Mutex::new(HashMap::new()),
        }
    }
}

impl Embedder for VocabularyEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut vocabulary = self.vocabulary.lock().unwrap();
        let mut values = vec![0.0_f32; self.dimension];

        for word in text.split_whitespace() {
            let next = vocabulary.len();
            let index = *vocabulary.entry(word.to_string()).or_insert(next);
            if index >= self.dimension {
                return Err(ResumeRankerError::Embedding("vocabulary exhausted".to_string()));
            }
            values[index] += 1.0;
        }

        Ok(Embedding::new(values))
    }

    fn model_name(&self) -> &str {
        "vocabulary"
    }
}

pub fn txt(name: &str, content: &str) -> UploadedFile {
    UploadedFile::new(name, content.as_bytes().to_vec())
}

/// Minimal DOCX package with one paragraph per line.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<?xml version=\"1.0\"?><Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>")
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}
