use std::io;
use std::path::{Path, PathBuf};

/// URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_NAME_LEN: usize = 120;

/// Local directory holding resumes and company logos.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_exists(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `data` under `name` (already sanitized) and return the public
    /// path, e.g. `/uploads/3_7_resume.pdf`. Existing files are overwritten.
    pub async fn save(&self, name: &str, data: &[u8]) -> io::Result<String> {
        tokio::fs::write(self.root.join(name), data).await?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    /// Remove a file by its public path. Missing files are not an error.
    pub async fn remove(&self, public_path: &str) -> io::Result<()> {
        let Some(name) = Path::new(public_path).file_name() else {
            return Ok(());
        };
        match tokio::fs::remove_file(self.root.join(name)).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Best-effort removal of several files; failures are logged.
    pub async fn remove_all<I, S>(&self, public_paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in public_paths {
            if let Err(e) = self.remove(path.as_ref()).await {
                tracing::warn!(path = path.as_ref(), "Failed to remove upload: {e}");
            }
        }
    }

    /// Number of regular files currently stored.
    pub async fn count_files(&self) -> io::Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

pub fn is_pdf(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Storage name for a resume: `<user_id>_<job_id>_<client filename>`.
pub fn resume_name(user_id: i64, job_id: i64, original: &str) -> String {
    format!("{user_id}_{job_id}_{}", sanitize_filename(original))
}

/// Reduce a client-supplied filename to a single safe path component.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        return "file".to_string();
    }

    // Keep the extension when truncating long names.
    if trimmed.len() > MAX_NAME_LEN {
        let ext = Path::new(trimmed)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let keep = MAX_NAME_LEN.saturating_sub(ext.len());
        return format!("{}{ext}", &trimmed[..keep]);
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_check_uses_extension_case_insensitively() {
        assert!(is_pdf("cv.pdf"));
        assert!(is_pdf("CV.PDF"));
        assert!(!is_pdf("cv.pdf.exe"));
        assert!(!is_pdf("cv.docx"));
        assert!(!is_pdf("pdf"));
    }

    #[test]
    fn sanitized_names_cannot_escape_directory() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume__final_.pdf");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn dot_only_pdf_name_loses_its_extension() {
        assert!(is_pdf("..pdf"));
        assert_eq!(sanitize_filename("..pdf"), "pdf");
        assert!(!is_pdf(&sanitize_filename("..pdf")));
        assert!(is_pdf(&sanitize_filename("../cv.pdf")));
    }

    #[test]
    fn long_names_keep_extension() {
        let long = format!("{}.pdf", "a".repeat(300));
        let name = sanitize_filename(&long);
        assert_eq!(name.len(), MAX_NAME_LEN);
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn resume_name_embeds_user_and_job() {
        assert_eq!(resume_name(3, 7, "cv.pdf"), "3_7_cv.pdf");
    }

    #[tokio::test]
    async fn save_count_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadDir::new(dir.path().join("nested"));
        uploads.ensure_exists().await.unwrap();

        let path = uploads.save("1_2_cv.pdf", b"%PDF").await.unwrap();
        assert_eq!(path, "/uploads/1_2_cv.pdf");
        assert_eq!(uploads.count_files().await.unwrap(), 1);

        uploads.remove(&path).await.unwrap();
        uploads.remove(&path).await.unwrap();
        assert_eq!(uploads.count_files().await.unwrap(), 0);
    }
}
