use std::collections::HashMap;

use axum::http::HeaderMap;
use bytes::Bytes;

/// A file part of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Text fields and files of a submitted form.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parse a form body based on the Content-Type header. Accepts
/// `multipart/form-data` and `application/x-www-form-urlencoded`.
pub async fn parse_form(headers: &HeaderMap, body: Bytes) -> Result<FormData, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(FormData {
            fields: parse_form_urlencoded(&body),
            files: HashMap::new(),
        })
    } else {
        Err("Expected multipart/form-data or application/x-www-form-urlencoded body".to_string())
    }
}

fn parse_form_urlencoded(body: &[u8]) -> HashMap<String, String> {
    form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<FormData, String> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|_| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("File read error: {e}"))?;
                form.files.insert(name, UploadedFile { filename, data });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| format!("Field read error: {e}"))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use bytes::Bytes;

    use super::parse_form;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[tokio::test]
    async fn parses_multipart_fields_and_files() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"job_id\"\r\n\r\n\
            12\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            %PDF-1.4\r\n\
            --XYZ--\r\n";

        let form = parse_form(&headers("multipart/form-data; boundary=XYZ"), Bytes::from(body))
            .await
            .unwrap();

        assert_eq!(form.field("job_id"), Some("12"));
        let resume = &form.files["resume"];
        assert_eq!(resume.filename, "cv.pdf");
        assert_eq!(&resume.data[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn parses_urlencoded_fields() {
        let form = parse_form(
            &headers("application/x-www-form-urlencoded"),
            Bytes::from_static(b"name=Acme+Corp&status=true&industry="),
        )
        .await
        .unwrap();

        assert_eq!(form.field("name"), Some("Acme Corp"));
        assert_eq!(form.field("status"), Some("true"));
        assert_eq!(form.field("industry"), None);
        assert!(form.files.is_empty());
    }

    #[tokio::test]
    async fn rejects_json_body() {
        let result = parse_form(&headers("application/json"), Bytes::from_static(b"{}")).await;
        assert!(result.is_err());
    }
}
